//! The hash-consed type store.
//!
//! Every type the compiler manipulates is an opaque [`Type`] handle into a
//! [`TypeStore`]. Constructing a type with the same structural content twice
//! returns the same handle, so handle equality is type equality, and
//! structural comparison never recurses at use sites.
//!
//! The store also owns all type-variable state: the binding table, the
//! nonbinding suppression counter used by overload scoring, and the
//! intersect-mode staging area that accumulates candidate bindings instead
//! of committing them (committed as intersections when the mode fully
//! exits).
//!
//! # Coercion
//!
//! `coerces_to` is the user-facing relation: identity, `Any`/`Error` as top
//! elements, numeric widening, void-to-list, elementwise composite rules,
//! union wrapping, runtime lifting, and type-variable binding.
//! `coerces_to_generic` is the binding-aware structural variant used during
//! generic matching: it recurses into composites but never widens numerics
//! and never lifts into `runtime`. The `nonbinding_` variants evaluate the
//! same relations with type-variable binding suppressed.

use basil_base::{Interner, Symbol};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// An opaque handle to a hash-consed type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Type(u32);

impl Type {
    pub(crate) const fn from_raw(id: u32) -> Type {
        Type(id)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.0)
    }
}

/// The void type (also the empty list).
pub const T_VOID: Type = Type::from_raw(0);
/// The 64-bit integer type.
pub const T_INT: Type = Type::from_raw(1);
/// The 32-bit floating-point type.
pub const T_FLOAT: Type = Type::from_raw(2);
/// The 64-bit floating-point type.
pub const T_DOUBLE: Type = Type::from_raw(3);
/// The symbol type.
pub const T_SYMBOL: Type = Type::from_raw(4);
/// The string type.
pub const T_STRING: Type = Type::from_raw(5);
/// The character type.
pub const T_CHAR: Type = Type::from_raw(6);
/// The boolean type.
pub const T_BOOL: Type = Type::from_raw(7);
/// The type of types.
pub const T_TYPE: Type = Type::from_raw(8);
/// The contagious error type.
pub const T_ERROR: Type = Type::from_raw(9);
/// The module type.
pub const T_MODULE: Type = Type::from_raw(10);
/// The top type.
pub const T_ANY: Type = Type::from_raw(11);
/// The type of not-yet-defined placeholders.
pub const T_UNDEFINED: Type = Type::from_raw(12);

/// Discriminates the structural shape of a type.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Kind {
    Void,
    Int,
    Float,
    Double,
    Symbol,
    String,
    Char,
    Bool,
    Type,
    Error,
    Module,
    Any,
    Undefined,
    Named,
    List,
    Tuple,
    Array,
    Union,
    Intersect,
    Function,
    Struct,
    Dict,
    FormFn,
    FormIsect,
    TVar,
    Runtime,
}

/// Key identifying a parsing form inside a form-level intersection type.
///
/// Forms themselves live above this crate; the type layer only needs to
/// tell them apart, so it stores the form's hash.
pub type FormKey = u64;

#[derive(Clone, PartialEq, Eq, Hash)]
enum TypeData {
    Prim(Kind),
    Named { name: Symbol, base: Type },
    List(Type),
    Tuple { members: Vec<Type>, incomplete: bool },
    Array { element: Type, size: Option<u64> },
    Union(BTreeSet<Type>),
    Intersect(Vec<Type>),
    Function { arg: Type, ret: Type, is_macro: bool },
    Struct { fields: BTreeMap<Symbol, Type>, incomplete: bool },
    Dict { key: Type, value: Type },
    FormFn { arity: u32 },
    FormIsect { members: Vec<(FormKey, Type)> },
    TVar { id: u32, name: Symbol },
    Runtime(Type),
}

/// The process-wide type table for one compilation.
pub struct TypeStore {
    list: Vec<TypeData>,
    map: HashMap<TypeData, Type>,
    tvar_bindings: Vec<Type>,
    tvar_isects: Vec<Vec<Type>>,
    tvar_isecting: BTreeSet<u32>,
    isect_mode: u32,
    nonbinding: u32,
}

impl TypeStore {
    /// Creates a store with the primitive types interned in their fixed
    /// order, so the `T_*` constants are valid handles.
    pub fn new() -> TypeStore {
        let mut store = TypeStore {
            list: Vec::new(),
            map: HashMap::new(),
            tvar_bindings: Vec::new(),
            tvar_isects: Vec::new(),
            tvar_isecting: BTreeSet::new(),
            isect_mode: 0,
            nonbinding: 0,
        };
        for kind in [
            Kind::Void,
            Kind::Int,
            Kind::Float,
            Kind::Double,
            Kind::Symbol,
            Kind::String,
            Kind::Char,
            Kind::Bool,
            Kind::Type,
            Kind::Error,
            Kind::Module,
            Kind::Any,
            Kind::Undefined,
        ] {
            store.intern(TypeData::Prim(kind));
        }
        debug_assert_eq!(store.kind(T_UNDEFINED), Kind::Undefined);
        store
    }

    fn intern(&mut self, data: TypeData) -> Type {
        if let Some(&found) = self.map.get(&data) {
            return found;
        }
        let t = Type(self.list.len() as u32);
        self.list.push(data.clone());
        self.map.insert(data, t);
        t
    }

    fn data(&self, t: Type) -> &TypeData {
        &self.list[t.0 as usize]
    }

    // --- construction ---------------------------------------------------

    /// `[T]`, the list type with element `element`.
    pub fn list(&mut self, element: Type) -> Type {
        self.intern(TypeData::List(element))
    }

    /// A complete tuple type. Panics on fewer than two members.
    pub fn tuple(&mut self, members: Vec<Type>) -> Type {
        assert!(members.len() >= 2, "complete tuple types need at least two members");
        self.intern(TypeData::Tuple { members, incomplete: false })
    }

    /// An incomplete tuple type: a known prefix of members, any suffix.
    pub fn incomplete_tuple(&mut self, members: Vec<Type>) -> Type {
        self.intern(TypeData::Tuple { members, incomplete: true })
    }

    /// An unsized array type.
    pub fn array(&mut self, element: Type) -> Type {
        self.intern(TypeData::Array { element, size: None })
    }

    /// A sized array type.
    pub fn sized_array(&mut self, element: Type, size: u64) -> Type {
        self.intern(TypeData::Array { element, size: Some(size) })
    }

    /// A union type. Members that are themselves unions are flattened.
    /// Panics if fewer than two distinct members remain.
    pub fn union_of(&mut self, members: impl IntoIterator<Item = Type>) -> Type {
        let mut set = BTreeSet::new();
        for t in members {
            if let TypeData::Union(inner) = self.data(t) {
                set.extend(inner.iter().copied());
            } else {
                set.insert(t);
            }
        }
        assert!(set.len() >= 2, "union types need at least two distinct members");
        self.intern(TypeData::Union(set))
    }

    /// An intersection type. Members equal after type-variable resolution
    /// are deduplicated. Panics on zero members.
    pub fn intersect(&mut self, members: Vec<Type>) -> Type {
        assert!(!members.is_empty(), "intersection types need at least one member");
        let mut deduped: Vec<Type> = Vec::new();
        for t in members {
            if !deduped.iter().any(|&d| self.soft_eq(d, t)) {
                deduped.push(t);
            }
        }
        self.intern(TypeData::Intersect(deduped))
    }

    /// `arg -> ret`, a function type.
    pub fn func(&mut self, arg: Type, ret: Type) -> Type {
        self.intern(TypeData::Function { arg, ret, is_macro: false })
    }

    /// A macro function type.
    pub fn macro_fn(&mut self, arg: Type, ret: Type) -> Type {
        self.intern(TypeData::Function { arg, ret, is_macro: true })
    }

    /// A struct type.
    pub fn struct_of(&mut self, fields: BTreeMap<Symbol, Type>, incomplete: bool) -> Type {
        self.intern(TypeData::Struct { fields, incomplete })
    }

    /// A dictionary type.
    pub fn dict(&mut self, key: Type, value: Type) -> Type {
        self.intern(TypeData::Dict { key, value })
    }

    /// `name of base`, a named (nominal) wrapper around `base`.
    pub fn named(&mut self, name: Symbol, base: Type) -> Type {
        self.intern(TypeData::Named { name, base })
    }

    /// The type of a form-level function of the given arity.
    pub fn form_fn(&mut self, arity: u32) -> Type {
        self.intern(TypeData::FormFn { arity })
    }

    /// A form-level intersection type, mapping form keys to member types.
    pub fn form_isect(&mut self, members: impl IntoIterator<Item = (FormKey, Type)>) -> Type {
        let mut members: Vec<(FormKey, Type)> = members.into_iter().collect();
        members.sort_by_key(|&(k, _)| k);
        members.dedup_by_key(|&mut (k, _)| k);
        self.intern(TypeData::FormIsect { members })
    }

    /// A fresh type variable, initially unbound.
    pub fn var(&mut self, name: Symbol) -> Type {
        let id = self.tvar_bindings.len() as u32;
        self.tvar_bindings.push(T_UNDEFINED);
        self.tvar_isects.push(Vec::new());
        self.intern(TypeData::TVar { id, name })
    }

    /// `runtime(base)`. Idempotent: wrapping a runtime type returns it.
    pub fn runtime(&mut self, base: Type) -> Type {
        if self.true_kind(base) == Kind::Runtime {
            return base;
        }
        self.intern(TypeData::Runtime(base))
    }

    // --- inspection -----------------------------------------------------

    /// The kind of `t`, resolving type variables to their concrete targets.
    pub fn kind(&self, t: Type) -> Kind {
        let mut t = t;
        loop {
            match *self.data(t) {
                TypeData::Prim(k) => return k,
                TypeData::TVar { id, .. } => t = self.tvar_bindings[id as usize],
                TypeData::Named { .. } => return Kind::Named,
                TypeData::List(_) => return Kind::List,
                TypeData::Tuple { .. } => return Kind::Tuple,
                TypeData::Array { .. } => return Kind::Array,
                TypeData::Union(_) => return Kind::Union,
                TypeData::Intersect(_) => return Kind::Intersect,
                TypeData::Function { .. } => return Kind::Function,
                TypeData::Struct { .. } => return Kind::Struct,
                TypeData::Dict { .. } => return Kind::Dict,
                TypeData::FormFn { .. } => return Kind::FormFn,
                TypeData::FormIsect { .. } => return Kind::FormIsect,
                TypeData::Runtime(_) => return Kind::Runtime,
            }
        }
    }

    /// The kind of `t` without resolving type variables.
    pub fn true_kind(&self, t: Type) -> Kind {
        match *self.data(t) {
            TypeData::Prim(k) => k,
            TypeData::TVar { .. } => Kind::TVar,
            TypeData::Named { .. } => Kind::Named,
            TypeData::List(_) => Kind::List,
            TypeData::Tuple { .. } => Kind::Tuple,
            TypeData::Array { .. } => Kind::Array,
            TypeData::Union(_) => Kind::Union,
            TypeData::Intersect(_) => Kind::Intersect,
            TypeData::Function { .. } => Kind::Function,
            TypeData::Struct { .. } => Kind::Struct,
            TypeData::Dict { .. } => Kind::Dict,
            TypeData::FormFn { .. } => Kind::FormFn,
            TypeData::FormIsect { .. } => Kind::FormIsect,
            TypeData::Runtime(_) => Kind::Runtime,
        }
    }

    /// Returns `true` if `t` is a type variable (bound or not).
    pub fn is_tvar(&self, t: Type) -> bool {
        matches!(self.data(t), TypeData::TVar { .. })
    }

    /// Returns `true` if `t`'s resolved kind is `kind`.
    pub fn of(&self, t: Type, kind: Kind) -> bool {
        self.kind(t) == kind
    }

    /// The element type of a list type.
    pub fn list_element(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::List(element) => element,
            _ => panic!("expected list type"),
        }
    }

    /// The `i`th member of a tuple type.
    pub fn tuple_at(&self, t: Type, i: usize) -> Type {
        match self.data(self.concrete(t)) {
            TypeData::Tuple { members, .. } => members[i],
            _ => panic!("expected tuple type"),
        }
    }

    /// The number of known members of a tuple type.
    pub fn tuple_len(&self, t: Type) -> usize {
        match self.data(self.concrete(t)) {
            TypeData::Tuple { members, .. } => members.len(),
            _ => panic!("expected tuple type"),
        }
    }

    /// Whether a tuple type is complete.
    pub fn tuple_is_complete(&self, t: Type) -> bool {
        match self.data(self.concrete(t)) {
            TypeData::Tuple { incomplete, .. } => !incomplete,
            _ => panic!("expected tuple type"),
        }
    }

    /// The element type of an array type.
    pub fn array_element(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::Array { element, .. } => element,
            _ => panic!("expected array type"),
        }
    }

    /// The size of a sized array type, if any.
    pub fn array_size(&self, t: Type) -> Option<u64> {
        match *self.data(self.concrete(t)) {
            TypeData::Array { size, .. } => size,
            _ => panic!("expected array type"),
        }
    }

    /// The members of a union type.
    pub fn union_members(&self, t: Type) -> Vec<Type> {
        match self.data(self.concrete(t)) {
            TypeData::Union(members) => members.iter().copied().collect(),
            _ => panic!("expected union type"),
        }
    }

    /// Whether a union type contains `member` as a handle.
    pub fn union_has(&self, t: Type, member: Type) -> bool {
        match self.data(self.concrete(t)) {
            TypeData::Union(members) => members.contains(&member),
            _ => panic!("expected union type"),
        }
    }

    /// The members of an intersection type.
    pub fn intersect_members(&self, t: Type) -> Vec<Type> {
        match self.data(self.concrete(t)) {
            TypeData::Intersect(members) => members.clone(),
            _ => panic!("expected intersection type"),
        }
    }

    /// Whether every member of an intersection is a function (possibly
    /// runtime-wrapped), i.e. the intersection can be applied.
    pub fn intersect_procedural(&self, t: Type) -> bool {
        self.intersect_members(t)
            .into_iter()
            .all(|m| self.kind(self.runtime_base(m)) == Kind::Function)
    }

    /// Adds a member to an intersection (no-op if soft-equal to an existing
    /// member).
    pub fn intersect_with(&mut self, t: Type, other: Type) -> Type {
        let mut members = self.intersect_members(t);
        if !members.iter().any(|&m| self.soft_eq(m, other)) {
            members.push(other);
        }
        self.intersect(members)
    }

    /// The argument type of a function type.
    pub fn arg(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::Function { arg, .. } => arg,
            _ => panic!("expected function type"),
        }
    }

    /// The return type of a function type.
    pub fn ret(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::Function { ret, .. } => ret,
            _ => panic!("expected function type"),
        }
    }

    /// The number of arguments a function type accepts (tuple arity, else 1).
    pub fn arity(&self, t: Type) -> usize {
        let arg = self.arg(t);
        if self.kind(arg) == Kind::Tuple {
            self.tuple_len(arg)
        } else {
            1
        }
    }

    /// Whether a function type is a macro type.
    pub fn is_macro_fn(&self, t: Type) -> bool {
        match *self.data(self.concrete(t)) {
            TypeData::Function { is_macro, .. } => is_macro,
            _ => panic!("expected function type"),
        }
    }

    /// The fields of a struct type.
    pub fn struct_fields(&self, t: Type) -> BTreeMap<Symbol, Type> {
        match self.data(self.concrete(t)) {
            TypeData::Struct { fields, .. } => fields.clone(),
            _ => panic!("expected struct type"),
        }
    }

    /// Whether a struct type is complete.
    pub fn struct_is_complete(&self, t: Type) -> bool {
        match self.data(self.concrete(t)) {
            TypeData::Struct { incomplete, .. } => !incomplete,
            _ => panic!("expected struct type"),
        }
    }

    /// The key type of a dictionary type.
    pub fn dict_key(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::Dict { key, .. } => key,
            _ => panic!("expected dictionary type"),
        }
    }

    /// The value type of a dictionary type.
    pub fn dict_value(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::Dict { value, .. } => value,
            _ => panic!("expected dictionary type"),
        }
    }

    /// The name of a named type.
    pub fn name_of(&self, t: Type) -> Symbol {
        match *self.data(self.concrete(t)) {
            TypeData::Named { name, .. } => name,
            _ => panic!("expected named type"),
        }
    }

    /// The base of a named type.
    pub fn base_of(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::Named { base, .. } => base,
            _ => panic!("expected named type"),
        }
    }

    /// The arity of a form-level function type.
    pub fn form_fn_arity(&self, t: Type) -> u32 {
        match *self.data(self.concrete(t)) {
            TypeData::FormFn { arity } => arity,
            _ => panic!("expected form-level function type"),
        }
    }

    /// The members of a form-level intersection type.
    pub fn form_isect_members(&self, t: Type) -> Vec<(FormKey, Type)> {
        match self.data(self.concrete(t)) {
            TypeData::FormIsect { members } => members.clone(),
            _ => panic!("expected form-level intersection type"),
        }
    }

    /// The member type a form-level intersection associates with `key`.
    pub fn overload_for(&self, t: Type, key: FormKey) -> Option<Type> {
        self.form_isect_members(t).into_iter().find(|&(k, _)| k == key).map(|(_, t)| t)
    }

    /// Strips one `runtime` wrapper, if present.
    pub fn runtime_base(&self, t: Type) -> Type {
        match *self.data(self.concrete(t)) {
            TypeData::Runtime(base) => base,
            _ => t,
        }
    }

    // --- type variables -------------------------------------------------

    fn tvar_id(&self, t: Type) -> u32 {
        match *self.data(t) {
            TypeData::TVar { id, .. } => id,
            _ => panic!("expected type variable"),
        }
    }

    /// The name a type variable was declared with.
    pub fn tvar_name(&self, t: Type) -> Symbol {
        match *self.data(t) {
            TypeData::TVar { name, .. } => name,
            _ => panic!("expected type variable"),
        }
    }

    /// Follows a type variable's binding chain to a non-variable type
    /// (`T_UNDEFINED` when unbound).
    pub fn tvar_concrete(&self, t: Type) -> Type {
        let mut t = self.tvar_bindings[self.tvar_id(t) as usize];
        while self.is_tvar(t) {
            t = self.tvar_bindings[self.tvar_id(t) as usize];
        }
        t
    }

    /// Resolves `t` through type variables; non-variables pass through.
    pub fn concrete(&self, t: Type) -> Type {
        if self.is_tvar(t) {
            self.tvar_concrete(t)
        } else {
            t
        }
    }

    /// Binds a type variable to `target`, refusing cyclic chains.
    pub fn bind_tvar(&mut self, tvar: Type, target: Type) {
        self.bind_tvar_id(self.tvar_id(tvar), target);
    }

    fn bind_tvar_id(&mut self, id: u32, target: Type) {
        let mut walk = target;
        while self.is_tvar(walk) {
            let walk_id = self.tvar_id(walk);
            if walk_id == id {
                return; // binding would close a cycle
            }
            walk = self.tvar_bindings[walk_id as usize];
        }
        self.tvar_bindings[id as usize] = target;
    }

    /// Unbinds a type variable.
    pub fn unbind_tvar(&mut self, tvar: Type) {
        let id = self.tvar_id(tvar);
        self.tvar_bindings[id as usize] = T_UNDEFINED;
    }

    /// Enters intersect mode: bindings are staged per variable rather than
    /// committed. Nests.
    pub fn enable_isect(&mut self) {
        self.isect_mode += 1;
    }

    /// Exits one level of intersect mode. When the outermost level exits,
    /// each staged variable is bound to its single candidate, or to the
    /// intersection of its candidates.
    pub fn disable_isect(&mut self) {
        assert!(self.isect_mode > 0, "intersect mode is not enabled");
        self.isect_mode -= 1;
        if self.isect_mode > 0 {
            return;
        }
        let staged: Vec<u32> = std::mem::take(&mut self.tvar_isecting).into_iter().collect();
        for id in staged {
            let candidates = std::mem::take(&mut self.tvar_isects[id as usize]);
            match candidates.len() {
                0 => {}
                1 => self.bind_tvar_id(id, candidates[0]),
                _ => {
                    let isect = self.intersect(candidates);
                    self.bind_tvar_id(id, isect);
                }
            }
        }
    }

    /// A type variable "accepts" `other` if its current binding coerces to
    /// it; on success the variable is bound (or staged, in intersect mode)
    /// unless binding is suppressed. Unbound variables accept anything.
    fn tvar_coerce(&mut self, tvar: Type, other: Type) -> bool {
        let id = self.tvar_id(tvar);
        let binding = self.tvar_bindings[id as usize];
        let result = self.coerces_to(binding, other);
        if result && self.nonbinding == 0 && self.kind(other) != Kind::Any {
            if self.isect_mode > 0 {
                if binding != other {
                    self.tvar_isecting.insert(id);
                    self.tvar_isects[id as usize].push(other);
                }
            } else {
                self.bind_tvar_id(id, other);
            }
        }
        result
    }

    // --- coercion -------------------------------------------------------

    /// `coerces_to` with type-variable binding suppressed.
    pub fn nonbinding_coerces_to(&mut self, a: Type, b: Type) -> bool {
        self.nonbinding += 1;
        let result = self.coerces_to(a, b);
        self.nonbinding -= 1;
        result
    }

    /// `coerces_to_generic` with type-variable binding suppressed.
    pub fn nonbinding_coerces_to_generic(&mut self, a: Type, b: Type) -> bool {
        self.nonbinding += 1;
        let result = self.coerces_to_generic(a, b);
        self.nonbinding -= 1;
        result
    }

    /// Equality after resolving type variables on both sides.
    pub fn soft_eq(&self, a: Type, b: Type) -> bool {
        self.concrete(a) == self.concrete(b)
    }

    /// The shared base rules: identity, `Any` and `Error` as top elements,
    /// and delegation when the target is a type variable.
    fn base_generic(&mut self, a: Type, b: Type) -> bool {
        if self.is_tvar(b) {
            if !self.is_concrete(b) {
                if self.tvar_coerce(b, a) {
                    return true;
                }
            } else {
                let target = self.tvar_concrete(b);
                if self.coerces_to_generic(a, target) {
                    return true;
                }
            }
        }
        a == b || matches!(self.kind(b), Kind::Any | Kind::Error)
    }

    /// The structural, binding-aware coercion relation. Recurses into
    /// composites without numeric widening or runtime lifting.
    pub fn coerces_to_generic(&mut self, a: Type, b: Type) -> bool {
        if self.is_tvar(a) {
            return self.tvar_coerce(a, b);
        }
        if self.base_generic(a, b) {
            return true;
        }
        match self.data(a).clone() {
            TypeData::Prim(Kind::Undefined) => true, // undefined converts to anything
            TypeData::Prim(Kind::Void) => self.kind(b) == Kind::List,
            TypeData::Named { name, base } => {
                self.kind(b) == Kind::Named
                    && self.name_of(b) == name
                    && {
                        let b_base = self.base_of(b);
                        self.coerces_to_generic(base, b_base)
                    }
            }
            TypeData::List(element) => {
                self.kind(b) == Kind::List && {
                    let b_elt = self.list_element(b);
                    self.coerces_to_generic(element, b_elt)
                }
            }
            TypeData::Tuple { members, incomplete } => {
                self.tuple_coerces(&members, incomplete, b, true)
            }
            TypeData::Array { element, size } => {
                self.kind(b) == Kind::Array
                    && {
                        let b_elt = self.array_element(b);
                        self.coerces_to_generic(element, b_elt)
                    }
                    && match self.array_size(b) {
                        None => true,
                        Some(n) => size == Some(n),
                    }
            }
            TypeData::Union(members) => {
                // we permit inference on a single member, e.g. T?|Int -> String|Int;
                // unions are unordered, so more than one cannot be inferred
                if self.kind(b) != Kind::Union {
                    return false;
                }
                let b_members: BTreeSet<Type> = self.union_members(b).into_iter().collect();
                let only_a: Vec<Type> = members.difference(&b_members).copied().collect();
                let only_b: Vec<Type> = b_members.difference(&members).copied().collect();
                only_a.len() == 1
                    && only_b.len() == 1
                    && self.coerces_to_generic(only_a[0], only_b[0])
            }
            TypeData::Function { arg, ret, is_macro } => {
                self.kind(b) == Kind::Function
                    && self.is_macro_fn(b) == is_macro
                    && {
                        let (b_arg, b_ret) = (self.arg(b), self.ret(b));
                        self.coerces_to_generic(arg, b_arg) && self.coerces_to_generic(ret, b_ret)
                    }
            }
            TypeData::Dict { key, value } => {
                self.kind(b) == Kind::Dict && {
                    let (b_key, b_value) = (self.dict_key(b), self.dict_value(b));
                    self.coerces_to_generic(key, b_key) && self.coerces_to_generic(value, b_value)
                }
            }
            TypeData::Runtime(base) => {
                self.kind(b) == Kind::Runtime && {
                    let b_base = self.runtime_base(b);
                    self.coerces_to_generic(base, b_base)
                }
            }
            _ => false,
        }
    }

    fn tuple_coerces(&mut self, members: &[Type], incomplete: bool, b: Type, generic: bool) -> bool {
        if self.kind(b) != Kind::Tuple {
            return false;
        }
        let b_complete = self.tuple_is_complete(b);
        if incomplete && b_complete {
            return false; // can't promise members we don't have
        }
        let b_len = self.tuple_len(b);
        for (i, &member) in members.iter().enumerate() {
            if i >= b_len {
                return !b_complete; // shrinking is only allowed toward an incomplete target
            }
            let target = self.tuple_at(b, i);
            let ok = if generic {
                self.coerces_to_generic(member, target)
            } else {
                self.coerces_to(member, target)
            };
            if !ok {
                return false;
            }
        }
        members.len() == b_len // a complete target may not grow
    }

    /// The user-facing coercion relation.
    pub fn coerces_to(&mut self, a: Type, b: Type) -> bool {
        if self.coerces_to_generic(a, b) {
            return true;
        }
        // target-side rules shared by every source type
        if self.is_tvar(b) && self.is_concrete(b) {
            let target = self.tvar_concrete(b);
            if self.coerces_to(a, target) {
                return true;
            }
        }
        if self.true_kind(b) == Kind::Runtime {
            let base = self.runtime_base(b);
            if self.coerces_to(a, base) {
                return true;
            }
        }
        if self.kind(b) == Kind::Union && self.union_has(b, a) {
            return true;
        }
        match self.data(a).clone() {
            TypeData::Prim(Kind::Int) => matches!(self.kind(b), Kind::Float | Kind::Double),
            TypeData::Prim(Kind::Float) => self.kind(b) == Kind::Double,
            TypeData::Named { base, .. } => {
                self.kind(b) == Kind::Type && self.coerces_to(base, T_TYPE)
            }
            TypeData::List(element) => {
                // a single-element list of types reads as a type
                self.kind(b) == Kind::Type && self.coerces_to(element, T_TYPE)
            }
            TypeData::Tuple { members, incomplete } => {
                if self.kind(b) == Kind::Type {
                    // a tuple of type values reads as a tuple type
                    return members.into_iter().all(|m| self.coerces_to(m, T_TYPE));
                }
                self.tuple_coerces(&members, incomplete, b, false)
            }
            TypeData::Array { element, size } => {
                // identical element converts to the unsized rendition
                self.kind(b) == Kind::Array
                    && self.array_element(b) == element
                    && self.array_size(b).is_none()
                    && size.is_some()
            }
            TypeData::Union(members) => {
                // a union coerces to any superset union
                self.kind(b) == Kind::Union && {
                    let b_members: BTreeSet<Type> =
                        self.union_members(b).into_iter().collect();
                    members.iter().all(|m| b_members.contains(m))
                }
            }
            TypeData::Intersect(members) => {
                if self.kind(b) == Kind::Intersect {
                    let b_members = self.intersect_members(b);
                    b_members
                        .into_iter()
                        .all(|m| members.iter().any(|&n| self.soft_eq(m, n)))
                } else {
                    members.iter().any(|&m| self.soft_eq(m, b))
                }
            }
            TypeData::Struct { fields, incomplete } => {
                if self.kind(b) != Kind::Struct {
                    return false;
                }
                let b_fields = self.struct_fields(b);
                let b_complete = self.struct_is_complete(b);
                if incomplete && b_complete {
                    return false;
                }
                if !incomplete && b_complete && b_fields.len() != fields.len() {
                    return false;
                }
                for (name, &target) in &b_fields {
                    match fields.get(name) {
                        Some(&field) if field == target || self.kind(target) == Kind::Any => {}
                        _ => return false,
                    }
                }
                b_fields.len() <= fields.len()
            }
            TypeData::Dict { key, value } => {
                self.kind(b) == Kind::Dict && {
                    let (b_key, b_value) = (self.dict_key(b), self.dict_value(b));
                    self.coerces_to(key, b_key)
                        && self.coerces_to(value, b_value)
                        && ((self.kind(key) != Kind::Any && self.kind(b_key) == Kind::Any)
                            || (self.kind(value) != Kind::Any && self.kind(b_value) == Kind::Any))
                }
            }
            TypeData::FormIsect { members } => {
                self.kind(b) == Kind::FormIsect && {
                    let b_members = self.form_isect_members(b);
                    b_members
                        .iter()
                        .all(|(k, t)| members.iter().any(|(mk, mt)| mk == k && mt == t))
                }
            }
            TypeData::Runtime(base) => {
                self.true_kind(b) == Kind::Runtime && {
                    let b_base = self.runtime_base(b);
                    self.coerces_to(base, b_base)
                }
            }
            _ => false,
        }
    }

    // --- lowering & concreteness ----------------------------------------

    /// Whether `t` mentions no `Any`, `Undefined`, unbound variable, or
    /// incomplete tuple/struct anywhere.
    pub fn is_concrete(&self, t: Type) -> bool {
        match self.data(t).clone() {
            TypeData::TVar { .. } => {
                let c = self.tvar_concrete(t);
                self.is_concrete(c)
            }
            TypeData::Prim(Kind::Any) | TypeData::Prim(Kind::Undefined) => false,
            TypeData::Prim(_) => true,
            TypeData::FormFn { .. } | TypeData::FormIsect { .. } => true,
            TypeData::Runtime(base) => self.is_concrete(base),
            TypeData::List(element) => self.is_concrete(element),
            TypeData::Function { arg, ret, .. } => self.is_concrete(arg) && self.is_concrete(ret),
            TypeData::Dict { key, value } => self.is_concrete(key) && self.is_concrete(value),
            TypeData::Named { base, .. } => self.is_concrete(base),
            TypeData::Union(members) => members.iter().all(|&m| self.is_concrete(m)),
            TypeData::Intersect(members) => members.iter().all(|&m| self.is_concrete(m)),
            TypeData::Struct { fields, incomplete } => {
                !incomplete && fields.values().all(|&f| self.is_concrete(f))
            }
            TypeData::Tuple { members, incomplete } => {
                !incomplete && members.iter().all(|&m| self.is_concrete(m))
            }
            TypeData::Array { element, .. } => self.is_concrete(element),
        }
    }

    /// Produces the runtime counterpart of a compile-time type: strips
    /// `runtime`, turns `Any` into a fresh variable, recurses into
    /// composites, and returns `T_ERROR` for compile-time-only types
    /// (modules, macros, form-level types).
    pub fn lower(&mut self, t: Type) -> Type {
        match self.data(t).clone() {
            TypeData::TVar { .. } => t,
            TypeData::Prim(Kind::Any) => self.var(Symbol::NONE),
            TypeData::Prim(Kind::Module) | TypeData::Prim(Kind::Error) => T_ERROR,
            TypeData::Prim(_) => t,
            TypeData::FormFn { .. } | TypeData::FormIsect { .. } => T_ERROR,
            TypeData::Runtime(base) => base,
            TypeData::List(element) => {
                let lowered = self.lower(element);
                if lowered == T_ERROR {
                    T_ERROR
                } else {
                    self.list(lowered)
                }
            }
            TypeData::Function { arg, ret, is_macro } => {
                if is_macro {
                    return T_ERROR; // macro types have no runtime counterpart
                }
                let arg = self.lower(arg);
                let ret = self.lower(ret);
                if arg == T_ERROR || ret == T_ERROR {
                    T_ERROR
                } else {
                    self.func(arg, ret)
                }
            }
            TypeData::Dict { key, value } => {
                let key = self.lower(key);
                let value = self.lower(value);
                if key == T_ERROR || value == T_ERROR {
                    T_ERROR
                } else {
                    self.dict(key, value)
                }
            }
            TypeData::Named { name, base } => {
                let base = self.lower(base);
                if base == T_ERROR {
                    T_ERROR
                } else {
                    self.named(name, base)
                }
            }
            TypeData::Union(members) => {
                let mut lowered = BTreeSet::new();
                for m in members {
                    let l = self.lower(m);
                    if l == T_ERROR {
                        return T_ERROR;
                    }
                    lowered.insert(l);
                }
                self.union_of(lowered)
            }
            TypeData::Intersect(members) => {
                let mut lowered = Vec::new();
                for m in members {
                    let l = self.lower(m);
                    if l == T_ERROR {
                        return T_ERROR;
                    }
                    lowered.push(l);
                }
                self.intersect(lowered)
            }
            TypeData::Struct { fields, incomplete } => {
                let mut lowered = BTreeMap::new();
                for (name, field) in fields {
                    let l = self.lower(field);
                    if l == T_ERROR {
                        return T_ERROR;
                    }
                    lowered.insert(name, l);
                }
                self.struct_of(lowered, incomplete)
            }
            TypeData::Tuple { members, incomplete } => {
                let mut lowered = Vec::new();
                for m in members {
                    let l = self.lower(m);
                    if l == T_ERROR {
                        return T_ERROR;
                    }
                    lowered.push(l);
                }
                if incomplete {
                    self.incomplete_tuple(lowered)
                } else {
                    self.tuple(lowered)
                }
            }
            TypeData::Array { element, size } => {
                let lowered = self.lower(element);
                if lowered == T_ERROR {
                    T_ERROR
                } else {
                    match size {
                        Some(n) => self.sized_array(lowered, n),
                        None => self.array(lowered),
                    }
                }
            }
        }
    }

    /// Unbinds every type variable reachable from `t`.
    pub fn unbind_in(&mut self, t: Type) {
        match self.data(t).clone() {
            TypeData::TVar { id, .. } => self.bind_tvar_id(id, T_UNDEFINED),
            TypeData::Runtime(base) => self.unbind_in(base),
            TypeData::List(element) => self.unbind_in(element),
            TypeData::Function { arg, ret, .. } => {
                self.unbind_in(arg);
                self.unbind_in(ret);
            }
            TypeData::Dict { key, value } => {
                self.unbind_in(key);
                self.unbind_in(value);
            }
            TypeData::Named { base, .. } => self.unbind_in(base),
            TypeData::Union(members) => {
                for m in members {
                    self.unbind_in(m);
                }
            }
            TypeData::Intersect(members) => {
                for m in members {
                    self.unbind_in(m);
                }
            }
            TypeData::Struct { fields, .. } => {
                for (_, f) in fields {
                    self.unbind_in(f);
                }
            }
            TypeData::Tuple { members, .. } => {
                for m in members {
                    self.unbind_in(m);
                }
            }
            TypeData::Array { element, .. } => self.unbind_in(element),
            TypeData::FormIsect { members } => {
                for (_, m) in members {
                    self.unbind_in(m);
                }
            }
            _ => {}
        }
    }

    // --- display --------------------------------------------------------

    /// Renders `t` for diagnostics.
    pub fn display(&self, t: Type, interner: &Interner) -> String {
        match self.data(t).clone() {
            TypeData::Prim(kind) => match kind {
                Kind::Void => "Void".into(),
                Kind::Int => "Int".into(),
                Kind::Float => "Float".into(),
                Kind::Double => "Double".into(),
                Kind::Symbol => "Symbol".into(),
                Kind::String => "String".into(),
                Kind::Char => "Char".into(),
                Kind::Bool => "Bool".into(),
                Kind::Type => "Type".into(),
                Kind::Error => "Error".into(),
                Kind::Module => "Module".into(),
                Kind::Any => "Any".into(),
                Kind::Undefined => "Undefined".into(),
                _ => unreachable!("non-primitive kind in primitive data"),
            },
            TypeData::Named { name, base } => {
                format!("{} of {}", interner.resolve(name), self.display(base, interner))
            }
            TypeData::List(element) => format!("[{}]", self.display(element, interner)),
            TypeData::Tuple { members, incomplete } => {
                let mut parts: Vec<String> =
                    members.iter().map(|&m| self.display(m, interner)).collect();
                if incomplete {
                    parts.push("...".into());
                }
                format!("({})", parts.join(", "))
            }
            TypeData::Array { element, size } => match size {
                Some(n) => format!("{}[{}]", self.display(element, interner), n),
                None => format!("{}[]", self.display(element, interner)),
            },
            TypeData::Union(members) => {
                let parts: Vec<String> =
                    members.iter().map(|&m| self.display(m, interner)).collect();
                format!("({})", parts.join(" | "))
            }
            TypeData::Intersect(members) => {
                let parts: Vec<String> =
                    members.iter().map(|&m| self.display(m, interner)).collect();
                format!("({})", parts.join(" & "))
            }
            TypeData::Function { arg, ret, is_macro } => format!(
                "{} -{}> {}",
                self.display(arg, interner),
                if is_macro { "macro" } else { "" },
                self.display(ret, interner)
            ),
            TypeData::Struct { fields, incomplete } => {
                let mut parts: Vec<String> = fields
                    .iter()
                    .map(|(name, &field)| {
                        format!("{} : {}", interner.resolve(*name), self.display(field, interner))
                    })
                    .collect();
                if incomplete {
                    parts.push("...".into());
                }
                format!("{{{}}}", parts.join("; "))
            }
            TypeData::Dict { key, value } => {
                format!("{}[{}]", self.display(key, interner), self.display(value, interner))
            }
            TypeData::FormFn { arity } => format!("form-function({})", arity),
            TypeData::FormIsect { members } => {
                let parts: Vec<String> =
                    members.iter().map(|(_, t)| self.display(*t, interner)).collect();
                format!("overloaded({})", parts.join(" & "))
            }
            TypeData::TVar { id, name } => {
                let label = if name == Symbol::NONE {
                    format!("#{}", id)
                } else {
                    interner.resolve(name).to_string()
                };
                let binding = self.tvar_bindings[id as usize];
                if binding != T_UNDEFINED {
                    format!("{}({})", label, self.display(binding, interner))
                } else {
                    label
                }
            }
            TypeData::Runtime(base) => format!("runtime({})", self.display(base, interner)),
        }
    }
}

impl Default for TypeStore {
    fn default() -> Self {
        Self::new()
    }
}
