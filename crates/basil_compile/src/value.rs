//! Compile-time values.
//!
//! A [`Value`] is the universal currency of the compiler: parsed code,
//! intermediate results, and fully reduced constants are all values. Every
//! value carries the source position that gave rise to it, its [`Type`],
//! and a lazily resolved [`Form`] describing how it applies to neighboring
//! terms.
//!
//! Composite payloads are reference-counted and shared; [`Value::deep_clone`]
//! copies composites structurally while sharing functions and modules.
//! Lists are cons cells; dropping a long uniquely-owned chain is iterative
//! so destructor recursion cannot overflow the stack.
//!
//! Equality is structural over type and payload, ignoring positions and
//! forms — it is the equality pattern matching and tests use.

use crate::ast::Ast;
use crate::env::EnvRef;
use crate::forms::Form;
use crate::func::FunctionData;
use basil_base::{Interner, Pos, Symbol};
use basil_types::{Kind, Type, TypeStore, T_ANY, T_BOOL, T_CHAR, T_DOUBLE, T_ERROR, T_FLOAT, T_INT, T_STRING, T_SYMBOL, T_TYPE, T_UNDEFINED, T_VOID};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// One cell of a list value.
///
/// The fields are interior-mutable because grouping and form resolution
/// annotate and rewrite terms in place while the list is shared.
pub struct ListCell {
    pub head: RefCell<Value>,
    pub tail: RefCell<Value>,
}

impl Drop for ListCell {
    fn drop(&mut self) {
        // unlink uniquely-owned tails iteratively so long lists don't
        // recurse one stack frame per cell
        let mut tail = self.tail.replace(Value::void(Pos::default()));
        loop {
            let rc = match tail.repr {
                Repr::List(ref cell) => Rc::clone(cell),
                _ => break,
            };
            drop(tail);
            match Rc::try_unwrap(rc) {
                Ok(cell) => tail = cell.tail.replace(Value::void(Pos::default())),
                Err(_) => break,
            }
        }
    }
}

/// The payload of a value.
#[derive(Clone)]
pub enum Repr {
    Void,
    Error,
    Int(i64),
    Float(f32),
    Double(f64),
    Symbol(Symbol),
    TypeVal(Type),
    Char(char),
    Bool(bool),
    /// A placeholder for a variable that has a known form but no value yet.
    Undefined(Symbol),
    String(Rc<String>),
    List(Rc<ListCell>),
    Tuple(Rc<Vec<Value>>),
    Array(Rc<Vec<Value>>),
    /// The current member of a union-typed value.
    Union(Rc<Value>),
    /// The base value of a named-typed value.
    Named(Rc<Value>),
    Struct(Rc<BTreeMap<Symbol, Value>>),
    Dict(Rc<Vec<(Value, Value)>>),
    /// Type-level intersection: one value per member type.
    Intersect(Rc<BTreeMap<Type, Value>>),
    /// Form-level intersection: one value per overloaded form.
    FormIsect(Rc<Vec<(Rc<Form>, Value)>>),
    Module(EnvRef),
    Function(Rc<RefCell<FunctionData>>),
    /// A function known only at the form level (predefinition).
    FormFn(Rc<RefCell<FunctionData>>),
    /// A value that exists only as emitted code.
    Runtime(Ast),
}

/// A compile-time value: position, type, optional form, payload.
#[derive(Clone)]
pub struct Value {
    pub pos: Pos,
    pub ty: Type,
    pub form: Option<Rc<Form>>,
    pub repr: Repr,
}

impl Value {
    fn raw(pos: Pos, ty: Type, repr: Repr) -> Value {
        Value { pos, ty, form: None, repr }
    }

    pub fn void(pos: Pos) -> Value {
        Value::raw(pos, T_VOID, Repr::Void)
    }

    pub fn error(pos: Pos) -> Value {
        Value::raw(pos, T_ERROR, Repr::Error)
    }

    pub fn int(pos: Pos, i: i64) -> Value {
        Value::raw(pos, T_INT, Repr::Int(i))
    }

    pub fn float(pos: Pos, f: f32) -> Value {
        Value::raw(pos, T_FLOAT, Repr::Float(f))
    }

    pub fn double(pos: Pos, d: f64) -> Value {
        Value::raw(pos, T_DOUBLE, Repr::Double(d))
    }

    pub fn symbol(pos: Pos, s: Symbol) -> Value {
        Value::raw(pos, T_SYMBOL, Repr::Symbol(s))
    }

    pub fn type_val(pos: Pos, t: Type) -> Value {
        Value::raw(pos, T_TYPE, Repr::TypeVal(t))
    }

    pub fn char_val(pos: Pos, c: char) -> Value {
        Value::raw(pos, T_CHAR, Repr::Char(c))
    }

    pub fn bool(pos: Pos, b: bool) -> Value {
        Value::raw(pos, T_BOOL, Repr::Bool(b))
    }

    pub fn string(pos: Pos, s: impl Into<String>) -> Value {
        Value::raw(pos, T_STRING, Repr::String(Rc::new(s.into())))
    }

    pub fn undefined(pos: Pos, name: Symbol, form: Option<Rc<Form>>) -> Value {
        let mut v = Value::raw(pos, T_UNDEFINED, Repr::Undefined(name));
        v.form = form;
        v
    }

    /// A cons cell: `head :: tail`. `tail` must be a list or void.
    pub fn cons(pos: Pos, ty: Type, head: Value, tail: Value) -> Value {
        Value::raw(
            pos,
            ty,
            Repr::List(Rc::new(ListCell { head: RefCell::new(head), tail: RefCell::new(tail) })),
        )
    }

    /// A list of the provided values; void if `values` is empty.
    pub fn list(pos: Pos, ty: Type, values: Vec<Value>) -> Value {
        let mut acc = Value::void(pos);
        for v in values.into_iter().rev() {
            acc = Value::cons(pos, ty, v, acc);
        }
        acc
    }

    pub fn tuple(pos: Pos, ty: Type, values: Vec<Value>) -> Value {
        Value::raw(pos, ty, Repr::Tuple(Rc::new(values)))
    }

    pub fn array(pos: Pos, ty: Type, values: Vec<Value>) -> Value {
        Value::raw(pos, ty, Repr::Array(Rc::new(values)))
    }

    pub fn union(pos: Pos, ty: Type, value: Value) -> Value {
        Value::raw(pos, ty, Repr::Union(Rc::new(value)))
    }

    pub fn named(pos: Pos, ty: Type, value: Value) -> Value {
        Value::raw(pos, ty, Repr::Named(Rc::new(value)))
    }

    pub fn struct_val(pos: Pos, ty: Type, fields: BTreeMap<Symbol, Value>) -> Value {
        Value::raw(pos, ty, Repr::Struct(Rc::new(fields)))
    }

    pub fn dict(pos: Pos, ty: Type, entries: Vec<(Value, Value)>) -> Value {
        Value::raw(pos, ty, Repr::Dict(Rc::new(entries)))
    }

    pub fn intersect(pos: Pos, ty: Type, values: BTreeMap<Type, Value>) -> Value {
        Value::raw(pos, ty, Repr::Intersect(Rc::new(values)))
    }

    pub fn form_isect(
        pos: Pos,
        ty: Type,
        form: Rc<Form>,
        overloads: Vec<(Rc<Form>, Value)>,
    ) -> Value {
        let mut v = Value::raw(pos, ty, Repr::FormIsect(Rc::new(overloads)));
        v.form = Some(form);
        v
    }

    pub fn module(pos: Pos, ty: Type, env: EnvRef) -> Value {
        Value::raw(pos, ty, Repr::Module(env))
    }

    pub fn function(pos: Pos, ty: Type, data: FunctionData) -> Value {
        Value::raw(pos, ty, Repr::Function(Rc::new(RefCell::new(data))))
    }

    pub fn form_fn(pos: Pos, ty: Type, form: Rc<Form>, data: FunctionData) -> Value {
        let mut v = Value::raw(pos, ty, Repr::FormFn(Rc::new(RefCell::new(data))));
        v.form = Some(form);
        v
    }

    pub fn runtime(pos: Pos, ty: Type, ast: Ast) -> Value {
        Value::raw(pos, ty, Repr::Runtime(ast))
    }

    /// Attaches a form, builder-style.
    pub fn with(mut self, form: Rc<Form>) -> Value {
        self.form = Some(form);
        self
    }

    // --- accessors ------------------------------------------------------

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self.repr {
            Repr::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.repr {
            Repr::Int(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.repr {
            Repr::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_type(&self) -> Option<Type> {
        match self.repr {
            Repr::TypeVal(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self.repr {
            Repr::String(ref s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ast(&self) -> Option<Ast> {
        match self.repr {
            Repr::Runtime(ref ast) => Some(ast.clone()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<Rc<RefCell<FunctionData>>> {
        match self.repr {
            Repr::Function(ref f) => Some(f.clone()),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.ty == T_ERROR
    }

    pub fn is_list(&self) -> bool {
        matches!(self.repr, Repr::List(_))
    }

    /// Whether this value is the empty list.
    pub fn is_empty_list(&self) -> bool {
        matches!(self.repr, Repr::Void)
    }

    fn cell(&self) -> &Rc<ListCell> {
        match self.repr {
            Repr::List(ref cell) => cell,
            _ => panic!("expected a list value"),
        }
    }

    /// The head of a list value.
    pub fn head(&self) -> Value {
        self.cell().head.borrow().clone()
    }

    /// Replaces the head of a list value.
    pub fn set_head(&self, v: Value) {
        *self.cell().head.borrow_mut() = v;
    }

    /// The tail of a list value (void past the last cell).
    pub fn tail(&self) -> Value {
        self.cell().tail.borrow().clone()
    }

    /// Replaces the tail of a list value.
    pub fn set_tail(&self, v: Value) {
        *self.cell().tail.borrow_mut() = v;
    }

    /// Collects the elements of a list (or void) value.
    pub fn list_values(&self) -> Vec<Value> {
        let mut out = Vec::new();
        let mut cur = self.clone();
        while let Repr::List(cell) = cur.repr {
            out.push(cell.head.borrow().clone());
            let next = cell.tail.borrow().clone();
            cur = next;
        }
        out
    }

    /// The length of a list value. Linear.
    pub fn list_len(&self) -> usize {
        let mut n = 0;
        let mut cur = self.clone();
        while let Repr::List(cell) = cur.repr {
            n += 1;
            let next = cell.tail.borrow().clone();
            cur = next;
        }
        n
    }

    /// The elements of a tuple or array value.
    pub fn elements(&self) -> &[Value] {
        match self.repr {
            Repr::Tuple(ref vs) | Repr::Array(ref vs) => vs,
            _ => panic!("expected a tuple or array value"),
        }
    }

    /// The number of elements of a tuple, array, struct, or dict value.
    pub fn len(&self) -> usize {
        match self.repr {
            Repr::Tuple(ref vs) | Repr::Array(ref vs) => vs.len(),
            Repr::Struct(ref fields) => fields.len(),
            Repr::Dict(ref entries) => entries.len(),
            _ => panic!("expected a sized value"),
        }
    }

    /// Indexes a tuple or array value.
    pub fn at(&self, i: usize) -> Value {
        self.elements()[i].clone()
    }

    /// The current member of a union value.
    pub fn union_value(&self) -> Value {
        match self.repr {
            Repr::Union(ref v) => (**v).clone(),
            _ => panic!("expected a union value"),
        }
    }

    /// The base value of a named value.
    pub fn named_value(&self) -> Value {
        match self.repr {
            Repr::Named(ref v) => (**v).clone(),
            _ => panic!("expected a named value"),
        }
    }

    /// Deep-copies composites; functions, modules, and runtime asts are
    /// shared.
    pub fn deep_clone(&self) -> Value {
        let repr = match &self.repr {
            Repr::List(cell) => {
                let head = cell.head.borrow().deep_clone();
                let tail = cell.tail.borrow().deep_clone();
                Repr::List(Rc::new(ListCell { head: RefCell::new(head), tail: RefCell::new(tail) }))
            }
            Repr::Tuple(vs) => Repr::Tuple(Rc::new(vs.iter().map(Value::deep_clone).collect())),
            Repr::Array(vs) => Repr::Array(Rc::new(vs.iter().map(Value::deep_clone).collect())),
            Repr::Union(v) => Repr::Union(Rc::new(v.deep_clone())),
            Repr::Named(v) => Repr::Named(Rc::new(v.deep_clone())),
            Repr::Struct(fields) => Repr::Struct(Rc::new(
                fields.iter().map(|(k, v)| (*k, v.deep_clone())).collect(),
            )),
            Repr::Dict(entries) => Repr::Dict(Rc::new(
                entries.iter().map(|(k, v)| (k.deep_clone(), v.deep_clone())).collect(),
            )),
            Repr::Intersect(values) => Repr::Intersect(Rc::new(
                values.iter().map(|(t, v)| (*t, v.deep_clone())).collect(),
            )),
            other => other.clone(),
        };
        Value { pos: self.pos, ty: self.ty, form: self.form.clone(), repr }
    }

    /// Renders the value for diagnostics.
    pub fn display(&self, interner: &Interner, types: &TypeStore) -> String {
        match &self.repr {
            Repr::Void => "()".into(),
            Repr::Error => "<error>".into(),
            Repr::Int(i) => i.to_string(),
            Repr::Float(f) => format!("{}", f),
            Repr::Double(d) => format!("{}", d),
            Repr::Symbol(s) => interner.resolve(*s).to_string(),
            Repr::TypeVal(t) => types.display(*t, interner),
            Repr::Char(c) => format!("'{}'", c),
            Repr::Bool(b) => b.to_string(),
            Repr::Undefined(name) => format!("<undefined {}>", interner.resolve(*name)),
            Repr::String(s) => format!("{:?}", s),
            Repr::List(_) => {
                let parts: Vec<String> =
                    self.list_values().iter().map(|v| v.display(interner, types)).collect();
                format!("({})", parts.join(" "))
            }
            Repr::Tuple(vs) => {
                let parts: Vec<String> = vs.iter().map(|v| v.display(interner, types)).collect();
                format!("({})", parts.join(", "))
            }
            Repr::Array(vs) => {
                let parts: Vec<String> = vs.iter().map(|v| v.display(interner, types)).collect();
                format!("[{}]", parts.join(" "))
            }
            Repr::Union(v) => v.display(interner, types),
            Repr::Named(v) => format!(
                "{} of {}",
                interner.resolve(types.name_of(self.ty)),
                v.display(interner, types)
            ),
            Repr::Struct(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(k, v)| format!("{}: {}", interner.resolve(*k), v.display(interner, types)))
                    .collect();
                format!("{{{}}}", parts.join("; "))
            }
            Repr::Dict(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| {
                        format!("{} -> {}", k.display(interner, types), v.display(interner, types))
                    })
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Repr::Intersect(_) | Repr::FormIsect(_) => {
                format!("<overloaded {}>", types.display(self.ty, interner))
            }
            Repr::Module(_) => "<module>".into(),
            Repr::Function(f) => match f.borrow().name {
                Some(name) => format!("<procedure {}>", interner.resolve(name)),
                None => "<procedure>".into(),
            },
            Repr::FormFn(_) => "<procedure>".into(),
            Repr::Runtime(ast) => format!(
                "<runtime {}>",
                types.display(ast.borrow().ty, interner)
            ),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.ty != other.ty {
            return false;
        }
        match (&self.repr, &other.repr) {
            (Repr::Void, Repr::Void) => true,
            (Repr::Error, Repr::Error) => true,
            (Repr::Int(a), Repr::Int(b)) => a == b,
            (Repr::Float(a), Repr::Float(b)) => a == b,
            (Repr::Double(a), Repr::Double(b)) => a == b,
            (Repr::Symbol(a), Repr::Symbol(b)) => a == b,
            (Repr::TypeVal(a), Repr::TypeVal(b)) => a == b,
            (Repr::Char(a), Repr::Char(b)) => a == b,
            (Repr::Bool(a), Repr::Bool(b)) => a == b,
            (Repr::Undefined(a), Repr::Undefined(b)) => a == b,
            (Repr::String(a), Repr::String(b)) => a == b,
            (Repr::List(a), Repr::List(b)) => {
                *a.head.borrow() == *b.head.borrow() && *a.tail.borrow() == *b.tail.borrow()
            }
            (Repr::Tuple(a), Repr::Tuple(b)) => a == b,
            (Repr::Array(a), Repr::Array(b)) => a == b,
            (Repr::Union(a), Repr::Union(b)) => a == b,
            (Repr::Named(a), Repr::Named(b)) => a == b,
            (Repr::Struct(a), Repr::Struct(b)) => a == b,
            (Repr::Dict(a), Repr::Dict(b)) => a == b,
            (Repr::Intersect(a), Repr::Intersect(b)) => a == b,
            (Repr::FormIsect(a), Repr::FormIsect(b)) => Rc::ptr_eq(a, b),
            (Repr::Module(a), Repr::Module(b)) => Rc::ptr_eq(a, b),
            (Repr::Function(a), Repr::Function(b)) => Rc::ptr_eq(a, b),
            (Repr::FormFn(a), Repr::FormFn(b)) => Rc::ptr_eq(a, b),
            (Repr::Runtime(a), Repr::Runtime(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// --- compile-time type inference ---------------------------------------
//
// These find a reasonable type containing all provided values. They are
// safe to call at compile time: heterogeneous elements fall back to Any,
// deferring to dynamic typing; each Any becomes a type variable when
// lowered.

/// Infers a list type for the given head and tail. Returns `T_ERROR` when
/// the tail is neither list nor void.
pub fn infer_cons(ts: &mut TypeStore, head: &Value, tail: &Value) -> Type {
    if tail.ty == T_VOID {
        return ts.list(head.ty);
    }
    if ts.of(tail.ty, Kind::List) {
        if head.ty == ts.list_element(tail.ty) {
            return tail.ty;
        }
        return ts.list(T_ANY);
    }
    T_ERROR
}

/// Infers a list type containing all of `values`.
pub fn infer_list(ts: &mut TypeStore, values: &[Value]) -> Type {
    match values.first() {
        None => ts.list(T_ANY),
        Some(first) => {
            if values.iter().all(|v| v.ty == first.ty) {
                ts.list(first.ty)
            } else {
                ts.list(T_ANY)
            }
        }
    }
}

/// Infers the most precise tuple type for `values`.
pub fn infer_tuple(ts: &mut TypeStore, values: &[Value]) -> Type {
    let types: Vec<Type> = values.iter().map(|v| v.ty).collect();
    if types.len() < 2 {
        ts.incomplete_tuple(types)
    } else {
        ts.tuple(types)
    }
}

/// Infers the most precise array type for `values`.
pub fn infer_array(ts: &mut TypeStore, values: &[Value]) -> Type {
    match values.first() {
        None => ts.sized_array(T_ANY, 0),
        Some(first) => {
            if values.iter().all(|v| v.ty == first.ty) {
                ts.sized_array(first.ty, values.len() as u64)
            } else {
                ts.sized_array(T_ANY, values.len() as u64)
            }
        }
    }
}

/// Infers the most precise struct type for `fields`.
pub fn infer_struct(ts: &mut TypeStore, fields: &BTreeMap<Symbol, Value>) -> Type {
    let field_types = fields.iter().map(|(k, v)| (*k, v.ty)).collect();
    ts.struct_of(field_types, false)
}

/// Infers the most precise dictionary type for `entries`.
pub fn infer_dict(ts: &mut TypeStore, entries: &[(Value, Value)]) -> Type {
    match entries.first() {
        None => ts.dict(T_ANY, T_ANY),
        Some((k0, v0)) => {
            let key = if entries.iter().all(|(k, _)| k.ty == k0.ty) { k0.ty } else { T_ANY };
            let value = if entries.iter().all(|(_, v)| v.ty == v0.ty) { v0.ty } else { T_ANY };
            ts.dict(key, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_list(ts: &mut TypeStore, values: &[i64]) -> Value {
        let vs: Vec<Value> = values.iter().map(|&i| Value::int(Pos::default(), i)).collect();
        let ty = infer_list(ts, &vs);
        Value::list(Pos::default(), ty, vs)
    }

    #[test]
    fn list_construction_and_access() {
        let mut ts = TypeStore::new();
        let l = int_list(&mut ts, &[1, 2, 3]);
        assert_eq!(l.head().as_int(), Some(1));
        assert_eq!(l.tail().head().as_int(), Some(2));
        assert_eq!(l.list_len(), 3);
        assert_eq!(l.list_values().len(), 3);
        assert!(l.tail().tail().tail().is_empty_list());
    }

    #[test]
    fn empty_list_is_void() {
        let mut ts = TypeStore::new();
        let ty = ts.list(T_ANY);
        let l = Value::list(Pos::default(), ty, vec![]);
        assert!(l.is_empty_list());
        assert_eq!(l.ty, T_VOID);
    }

    #[test]
    fn equality_ignores_positions_and_forms() {
        let a = Value::int(Pos::at(3, 4), 42);
        let b = Value::int(Pos::at(9, 1), 42).with(Form::term());
        assert_eq!(a, b);
        assert_ne!(a, Value::int(Pos::default(), 43));
        assert_ne!(a, Value::double(Pos::default(), 42.0));
    }

    #[test]
    fn list_equality_is_structural() {
        let mut ts = TypeStore::new();
        let a = int_list(&mut ts, &[1, 2]);
        let b = int_list(&mut ts, &[1, 2]);
        let c = int_list(&mut ts, &[1, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn deep_clone_detaches_composites() {
        let mut ts = TypeStore::new();
        let a = int_list(&mut ts, &[1, 2]);
        let b = a.deep_clone();
        a.set_head(Value::int(Pos::default(), 99));
        assert_eq!(a.head().as_int(), Some(99));
        assert_eq!(b.head().as_int(), Some(1));
    }

    #[test]
    fn dropping_a_long_list_does_not_overflow() {
        let mut ts = TypeStore::new();
        let ty = ts.list(T_INT);
        let mut l = Value::void(Pos::default());
        for i in 0..200_000 {
            l = Value::cons(Pos::default(), ty, Value::int(Pos::default(), i), l);
        }
        drop(l); // iterative Drop must unwind this chain
    }

    #[test]
    fn infer_list_generifies_heterogeneous_elements() {
        let mut ts = TypeStore::new();
        let homogeneous =
            vec![Value::int(Pos::default(), 1), Value::int(Pos::default(), 2)];
        let expected = ts.list(T_INT);
        assert_eq!(infer_list(&mut ts, &homogeneous), expected);

        let mixed = vec![Value::int(Pos::default(), 1), Value::string(Pos::default(), "s")];
        let anys = ts.list(T_ANY);
        assert_eq!(infer_list(&mut ts, &mixed), anys);
    }

    #[test]
    fn infer_cons_keeps_compatible_tails() {
        let mut ts = TypeStore::new();
        let tail = int_list(&mut ts, &[2, 3]);
        let head = Value::int(Pos::default(), 1);
        let inferred = infer_cons(&mut ts, &head, &tail);
        assert_eq!(inferred, tail.ty);

        let bad_tail = Value::int(Pos::default(), 9);
        assert_eq!(infer_cons(&mut ts, &head, &bad_tail), T_ERROR);
    }

    #[test]
    fn infer_array_records_size() {
        let mut ts = TypeStore::new();
        let vs = vec![Value::int(Pos::default(), 1), Value::int(Pos::default(), 2)];
        let inferred = infer_array(&mut ts, &vs);
        assert_eq!(ts.array_size(inferred), Some(2));
        assert_eq!(ts.array_element(inferred), T_INT);
    }

    #[test]
    fn display_renders_nested_lists() {
        let mut ts = TypeStore::new();
        let interner = Interner::new();
        let inner = int_list(&mut ts, &[2, 3]);
        let lty = ts.list(T_ANY);
        let outer = Value::list(
            Pos::default(),
            lty,
            vec![Value::int(Pos::default(), 1), inner],
        );
        assert_eq!(outer.display(&interner, &ts), "(1 (2 3))");
    }
}
