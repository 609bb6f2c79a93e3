//! Lowering compile-time values to runtime AST, and the unified coercion
//! path.
//!
//! [`lower`] maps a reduced value to a `runtime(T)`-wrapped AST node of
//! its lowered type. [`coerce`] is the single conversion path used by
//! arguments, annotations, and returns; it short-circuits on identity and
//! generic coercion, lowers when the target is runtime, folds type-valued
//! structures into type values, and otherwise performs representational
//! changes (numeric widening, tuple elementwise conversion, union
//! wrapping).
//!
//! `coerce` must not be called unless `coerces_to` holds; conversions that
//! reach the end anyway are compiler bugs and panic.

use crate::ast::{self, AstKind};
use crate::driver::Session;
use crate::env::EnvRef;
use crate::value::{Repr, Value};
use basil_types::{Kind, Type, T_ERROR, T_TYPE, T_VOID};

/// Lowers a compile-time value to a runtime value, or reports an error for
/// compile-time-only values (modules, macros, form-level functions).
///
/// No coercion is performed: the source must already have the right type.
pub fn lower(sess: &mut Session, env: &EnvRef, src: &Value) -> Value {
    let _ = env;
    let lowered = sess.types.lower(src.ty);
    let pos = src.pos;
    let rt = |sess: &mut Session, kind: AstKind, lowered: Type| {
        let wrapper = sess.types.runtime(lowered);
        Value::runtime(pos, wrapper, ast::node(pos, lowered, kind))
    };
    match &src.repr {
        Repr::Int(i) => rt(sess, AstKind::IntConst(*i), lowered),
        Repr::Float(f) => rt(sess, AstKind::FloatConst(*f), lowered),
        Repr::Double(d) => rt(sess, AstKind::DoubleConst(*d), lowered),
        Repr::Symbol(s) => rt(sess, AstKind::SymbolConst(*s), lowered),
        Repr::Char(c) => rt(sess, AstKind::CharConst(*c), lowered),
        Repr::String(s) => rt(sess, AstKind::StringConst((**s).clone()), lowered),
        Repr::TypeVal(t) => rt(sess, AstKind::TypeConst(*t), lowered),
        Repr::Void => rt(sess, AstKind::VoidConst, T_VOID),
        Repr::Bool(b) => rt(sess, AstKind::BoolConst(*b), lowered),
        Repr::Named(inner) => {
            let lowered_inner = lower(sess, env, inner);
            if lowered_inner.is_error() {
                return lowered_inner;
            }
            let inner_ast = lowered_inner
                .as_ast()
                .expect("lowering produced a non-runtime value");
            // retag a copy: the original node may be shared elsewhere
            let retagged = ast::shallow_copy(&inner_ast);
            retagged.borrow_mut().ty = lowered;
            let wrapper = sess.types.runtime(lowered);
            Value::runtime(pos, wrapper, retagged)
        }
        Repr::Error | Repr::Runtime(_) => src.clone(),
        _ => {
            let shown = src.display(&sess.interner, &sess.types);
            let ty_shown = sess.types.display(src.ty, &sess.interner);
            sess.diags.error(
                pos,
                format!(
                    "attempted to lower compile-time-only value '{}' of type '{}'",
                    shown, ty_shown
                ),
            );
            Value::error(pos)
        }
    }
}

/// Coerces `src` to `target`, or returns an error value when conversion is
/// impossible. Should not fail when `coerces_to(src.ty, target)` holds.
pub fn coerce(sess: &mut Session, env: &EnvRef, src: &Value, target: Type) -> Value {
    if src.ty == target {
        return src.clone();
    }
    if sess.types.coerces_to_generic(src.ty, target) {
        // generic conversions require no representational change
        return src.clone();
    }

    if sess.types.kind(target) == Kind::Runtime {
        let base = sess.types.runtime_base(target);
        if let Repr::Runtime(ref inner) = src.repr {
            let coerced = ast::node(src.pos, base, AstKind::Coerce(inner.clone()));
            return Value::runtime(src.pos, target, coerced);
        }
        let prepared = if sess.types.coerces_to_generic(src.ty, base) {
            src.clone()
        } else {
            coerce(sess, env, src, base)
        };
        if prepared.is_error() {
            return prepared;
        }
        let lowered = lower(sess, env, &prepared);
        if lowered.is_error() {
            return lowered;
        }
        let lowered_ast = lowered.as_ast().expect("lowering produced a non-runtime value");
        if ast::ty(&lowered_ast) != base && sess.types.kind(base) != Kind::TVar {
            let coerced = ast::node(src.pos, base, AstKind::Coerce(lowered_ast));
            return Value::runtime(src.pos, target, coerced);
        }
        return lowered;
    }

    if target == T_TYPE {
        match &src.repr {
            Repr::List(_) => {
                let values = src.list_values();
                assert!(
                    values.len() == 1,
                    "list coerced to a type must have exactly one element"
                );
                let element = coerce(sess, env, &values[0], T_TYPE);
                let element_ty =
                    element.as_type().expect("list element coerced to type was not a type");
                let list_ty = sess.types.list(element_ty);
                return Value::type_val(src.pos, list_ty);
            }
            Repr::Tuple(values) => {
                let values = values.clone();
                let mut member_types = Vec::new();
                for v in values.iter() {
                    let coerced = coerce(sess, env, v, T_TYPE);
                    member_types.push(
                        coerced.as_type().expect("tuple member coerced to type was not a type"),
                    );
                }
                let tuple_ty = sess.types.tuple(member_types);
                return Value::type_val(src.pos, tuple_ty);
            }
            Repr::Named(inner) => {
                let name = sess.types.name_of(src.ty);
                let base = coerce(sess, env, inner, T_TYPE);
                let base_ty =
                    base.as_type().expect("named base coerced to type was not a type");
                let named_ty = sess.types.named(name, base_ty);
                return Value::type_val(src.pos, named_ty);
            }
            _ => {}
        }
    }

    if sess.types.kind(target) == Kind::Tuple && sess.types.kind(src.ty) == Kind::Tuple {
        let mut members = Vec::new();
        for i in 0..src.len() {
            let member_target = sess.types.tuple_at(target, i);
            let coerced = coerce(sess, env, &src.at(i), member_target);
            if coerced.is_error() {
                return coerced;
            }
            members.push(coerced);
        }
        return Value::tuple(src.pos, target, members);
    }

    match (&src.repr, sess.types.kind(target)) {
        (Repr::Int(i), Kind::Float) => return Value::float(src.pos, *i as f32),
        (Repr::Int(i), Kind::Double) => return Value::double(src.pos, *i as f64),
        (Repr::Float(f), Kind::Double) => return Value::double(src.pos, *f as f64),
        _ => {}
    }

    if sess.types.kind(target) == Kind::Union && sess.types.union_has(target, src.ty) {
        return Value::union(src.pos, target, src.clone());
    }

    let shown = src.display(&sess.interner, &sess.types);
    let from = sess.types.display(src.ty, &sess.interner);
    let to = sess.types.display(target, &sess.interner);
    panic!("unimplemented type conversion from '{}: {}' to '{}'", shown, from, to);
}
