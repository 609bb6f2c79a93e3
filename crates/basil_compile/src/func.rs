//! User functions, per-form-tuple body resolution, and monomorphization.
//!
//! A user function's body is kept syntactic until it is needed. The first
//! call with a new tuple of *argument forms* resolves a clone of the body
//! against those forms and caches the result in an [`InstTable`]; the
//! table then collects one [`FnInst`] — a typed, concrete AST body — per
//! argument-type tuple that reaches runtime.
//!
//! Recursion is guarded twice: `resolving` marks tables whose body form is
//! mid-resolution (re-entry resolves to a term form), and `is_inst` counts
//! in-flight instantiations per argument type so a self-recursive function
//! emits a call to its own in-progress stub instead of re-entering
//! `monomorphize`.

use crate::ast::{self, Ast, AstKind};
use crate::builtin::Builtin;
use crate::driver::Session;
use crate::env::{clone_env, def, EnvRef};
use crate::eval::eval;
use crate::forms::Form;
use crate::lower::lower;
use crate::resolve::resolve_form;
use crate::value::Value;
use basil_base::Symbol;
use basil_types::{Kind, Type, T_ERROR};
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The shared state of a user-defined (or form-level) function value.
pub struct FunctionData {
    /// The function's name, when one could be determined.
    pub name: Option<Symbol>,
    /// Builtin behavior, if this function wraps one.
    pub builtin: Option<Rc<Builtin>>,
    /// The local environment of the function.
    pub env: EnvRef,
    /// Names of the non-keyword arguments.
    pub args: Vec<Symbol>,
    /// The body expression as declared, prior to form resolution.
    pub body: Value,
    /// Body resolutions, keyed by argument-form tuple.
    pub resolutions: HashMap<FormTuple, Rc<RefCell<InstTable>>>,
}

impl FunctionData {
    pub fn new(
        name: Option<Symbol>,
        builtin: Option<Rc<Builtin>>,
        env: EnvRef,
        args: Vec<Symbol>,
        body: Value,
    ) -> FunctionData {
        FunctionData { name, builtin, env, args, body, resolutions: HashMap::new() }
    }
}

/// A hashed tuple of argument forms, the key of body resolution.
#[derive(Clone)]
pub struct FormTuple {
    hash: u64,
    pub forms: Vec<Rc<Form>>,
}

impl FormTuple {
    pub fn new(forms: Vec<Rc<Form>>) -> FormTuple {
        let mut h: u64 = 0x16c7_a935_29d1_4d4f;
        for form in &forms {
            h = h.wrapping_mul(0xb90c_6517_8f2a_31d1) ^ form.key();
        }
        FormTuple { hash: h, forms }
    }
}

impl PartialEq for FormTuple {
    fn eq(&self, other: &Self) -> bool {
        self.forms.len() == other.forms.len()
            && self.forms.iter().zip(&other.forms).all(|(a, b)| **a == **b)
    }
}

impl Eq for FormTuple {}

impl Hash for FormTuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

/// One monomorphization: a function body compiled for a specific argument
/// type tuple.
pub struct FnInst {
    pub args_type: Type,
    pub env: EnvRef,
    pub func: Ast,
}

/// The per-form-tuple resolution record of a function: the resolution
/// environment, the form-resolved body, and its instantiations.
pub struct InstTable {
    pub env: EnvRef,
    pub base: Value,
    pub insts: HashMap<Type, Rc<FnInst>>,
    pub is_inst: HashMap<Type, u32>,
    pub resolving: u32,
}

impl InstTable {
    /// Whether an instantiation for `args_type` is currently in flight.
    /// When it is, we've hit a recursive call inside the compiling
    /// function: emit a runtime call to the stub instead of re-entering.
    pub fn is_instantiating(&self, args_type: Type) -> bool {
        self.is_inst.get(&args_type).copied().unwrap_or(0) > 0
    }

    /// Whether this table's body form is still being resolved.
    pub fn is_resolving(&self) -> bool {
        self.resolving > 0
    }
}

/// Returns the resolution record for the given argument forms, resolving
/// the body on first use.
pub fn resolve_body(
    sess: &mut Session,
    func: &Rc<RefCell<FunctionData>>,
    forms: Vec<Option<Rc<Form>>>,
) -> Rc<RefCell<InstTable>> {
    let tuple = FormTuple::new(
        forms.into_iter().map(|f| f.unwrap_or_else(Form::term)).collect(),
    );
    if let Some(found) = func.borrow().resolutions.get(&tuple) {
        return found.clone();
    }

    let (fn_env, fn_args, base) = {
        let borrowed = func.borrow();
        (borrowed.env.clone(), borrowed.args.clone(), borrowed.body.deep_clone())
    };
    let env = clone_env(&fn_env);
    for (name, form) in fn_args.iter().zip(&tuple.forms) {
        def(&env, *name, Value::undefined(base.pos, *name, Some(form.clone())));
    }
    let table = Rc::new(RefCell::new(InstTable {
        env: env.clone(),
        base,
        insts: HashMap::new(),
        is_inst: HashMap::new(),
        resolving: 1,
    }));
    func.borrow_mut().resolutions.insert(tuple, table.clone());

    // the body lives behind the table so recursive resolution sees the
    // in-progress record; interior list mutation survives the round trip
    let mut base = table.borrow().base.clone();
    resolve_form(sess, &env, &mut base);
    {
        let mut borrowed = table.borrow_mut();
        borrowed.base = base;
        borrowed.resolving -= 1;
    }
    table
}

/// Like [`resolve_body`], keyed by the forms of an evaluated argument bag
/// (a scalar for arity one, a tuple otherwise).
pub fn resolve_body_for_args(
    sess: &mut Session,
    func: &Rc<RefCell<FunctionData>>,
    args: &Value,
) -> Rc<RefCell<InstTable>> {
    let arity = func.borrow().args.len();
    let forms: Vec<Option<Rc<Form>>> = if arity == 1 {
        vec![args.form.clone()]
    } else {
        (0..arity).map(|i| args.at(i).form.clone()).collect()
    };
    resolve_body(sess, func, forms)
}

/// Compiles the function body for `args_type`, producing a typed AST
/// function node.
///
/// Parameters are bound as `runtime` unknowns of their lowered types. For
/// named functions a stub of type `args -> ?r` is installed first (and a
/// placeholder instantiation recorded) so recursive references compile as
/// calls to the stub; the body's type must then coerce to `?r`, which
/// binds the return type.
pub fn monomorphize(
    sess: &mut Session,
    func: &Rc<RefCell<FunctionData>>,
    table: &Rc<RefCell<InstTable>>,
    args_type_in: Type,
) -> Option<Rc<FnInst>> {
    let args_type = sess.types.lower(args_type_in);
    let base_pos = table.borrow().base.pos;
    if args_type == T_ERROR {
        let shown = sess.types.display(args_type_in, &sess.interner);
        sess.diags.error(
            base_pos,
            format!("could not compile function: argument type '{}' cannot be lowered", shown),
        );
        return None;
    }

    let (fn_name, fn_args) = {
        let borrowed = func.borrow();
        (borrowed.name, borrowed.args.clone())
    };
    let local = clone_env(&table.borrow().env);
    for (i, &arg) in fn_args.iter().enumerate() {
        let arg_ty = if i == 0 && sess.types.kind(args_type) != Kind::Tuple {
            args_type
        } else {
            sess.types.tuple_at(args_type, i)
        };
        let rt = sess.types.runtime(arg_ty);
        def(
            &local,
            arg,
            Value::runtime(base_pos, rt, ast::node(base_pos, arg_ty, AstKind::Unknown)),
        );
    }

    let ret_var = sess.types.var(Symbol::NONE);
    let stub_type = sess.types.func(args_type, ret_var);
    if let Some(name) = fn_name {
        let stub_ast =
            ast::node(base_pos, stub_type, AstKind::FuncStub { name, local: true });
        let rt = sess.types.runtime(stub_type);
        def(&local, name, Value::runtime(base_pos, rt, stub_ast.clone()));
        // make the stub visible to recursive calls (keyed like the caller's
        // cache lookups); replaced on success
        table.borrow_mut().insts.insert(
            args_type_in,
            Rc::new(FnInst { args_type, env: local.clone(), func: stub_ast }),
        );
    }

    let mut body = table.borrow().base.deep_clone();
    let evaled = eval(sess, &local, &mut body);
    if evaled.is_error() {
        return None;
    }
    let lowered = lower(sess, &local, &evaled);
    if lowered.is_error() {
        return None;
    }
    let body_ast = lowered.as_ast().expect("lowering produced a non-runtime value");
    let body_ty = ast::ty(&body_ast);

    let declared_ret = sess.types.ret(stub_type);
    if !sess.types.coerces_to(declared_ret, body_ty) {
        let expected = sess.types.display(declared_ret, &sess.interner);
        let found = sess.types.display(body_ty, &sess.interner);
        sess.diags.error(
            base_pos,
            format!(
                "incompatible function body: expected expression of type '{}', found '{}'",
                expected, found
            ),
        );
        return None;
    }
    let ret_ty = if fn_name.is_some() { sess.types.concrete(declared_ret) } else { body_ty };
    let fn_type = sess.types.func(args_type, ret_ty);

    Some(Rc::new(FnInst {
        args_type,
        env: local.clone(),
        func: ast::node(
            base_pos,
            fn_type,
            AstKind::Func { name: fn_name, args: fn_args, body: body_ast },
        ),
    }))
}

/// Returns the instantiation of `func` at `args_type` for the given table,
/// compiling it on first use. `None` propagates compilation errors.
pub fn instantiate(
    sess: &mut Session,
    func: &Rc<RefCell<FunctionData>>,
    table: &Rc<RefCell<InstTable>>,
    args_type: Type,
) -> Option<Rc<FnInst>> {
    if let Some(found) = table.borrow().insts.get(&args_type) {
        return Some(found.clone());
    }
    *table.borrow_mut().is_inst.entry(args_type).or_insert(0) += 1;
    let morph = monomorphize(sess, func, table, args_type);
    {
        let mut borrowed = table.borrow_mut();
        if let Some(ref inst) = morph {
            borrowed.insts.insert(args_type, inst.clone());
        }
        if let Some(count) = borrowed.is_inst.get_mut(&args_type) {
            *count -= 1;
        }
    }
    morph
}
