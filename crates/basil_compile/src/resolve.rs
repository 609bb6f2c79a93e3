//! Form resolution: assigning each term its parsing form.
//!
//! Forms are resolved lazily and cached on the value. Constants are terms;
//! symbols take the form of their definition (or a form inferred from its
//! type); lists are grouped first, then their head decides: a callable
//! callback computes the form dynamically, and a user function's form
//! comes from resolving its body against the argument forms at this call
//! site.

use crate::driver::Session;
use crate::env::{self, EnvRef};
use crate::forms::{
    f_callable, f_overloaded, p_var, with_macro, Assoc, Form, FormKind, Invokable, ParamKind,
    P_SELF,
};
use crate::func::resolve_body;
use crate::group::group;
use crate::value::{Repr, Value};
use basil_base::Symbol;
use basil_types::{Kind, Type};
use std::rc::Rc;

/// Deduces a form from a type alone: functions become prefix callables of
/// their arity, procedural intersections become overloaded forms (when
/// their members agree on macro-ness), anything else is a term.
pub fn infer_form(sess: &mut Session, ty: Type) -> Rc<Form> {
    match sess.types.kind(ty) {
        Kind::Function => {
            let mut params = vec![P_SELF];
            for _ in 0..sess.types.arity(ty) {
                params.push(p_var(Symbol::NONE)); // anonymous parameters
            }
            let form = f_callable(0, Assoc::Right, params);
            if sess.types.is_macro_fn(ty) {
                with_macro(form)
            } else {
                form
            }
        }
        Kind::Intersect if sess.types.intersect_procedural(ty) => {
            let members = sess.types.intersect_members(ty);
            let forms: Vec<Rc<Form>> = members.into_iter().map(|m| infer_form(sess, m)).collect();
            let is_macro = forms[0].is_macro;
            if forms.iter().any(|f| f.is_macro != is_macro) {
                return Form::term(); // inconsistent macro-ness is not applicable
            }
            if forms.len() == 1 {
                return forms.into_iter().next().unwrap();
            }
            let (precedence, assoc) = (forms[0].precedence, forms[0].assoc);
            match f_overloaded(precedence, assoc, forms, &mut sess.interner) {
                Some(form) => {
                    if is_macro {
                        with_macro(form)
                    } else {
                        form
                    }
                }
                None => Form::term(),
            }
        }
        _ => Form::term(),
    }
}

/// Returns a copy of a callable/overloaded form with any second-position
/// self slot swapped to the front, so an infix operator can be called by
/// name in prefix position.
pub fn to_prefix(sess: &mut Session, src: &Rc<Form>) -> Rc<Form> {
    fn swap_self(params: &[crate::forms::Param]) -> Vec<crate::forms::Param> {
        let mut params = params.to_vec();
        if params.len() > 1 && params[1].kind == ParamKind::SelfName {
            params[1] = params[0];
            params[0] = P_SELF;
        }
        params
    }
    let swapped = match &src.invokable {
        Some(Invokable::Callable(c)) => f_callable(src.precedence, src.assoc, swap_self(&c.params)),
        Some(Invokable::Overloaded(o)) => {
            let overloads: Vec<Rc<Form>> = o
                .overloads
                .iter()
                .map(|c| f_callable(src.precedence, src.assoc, swap_self(&c.params)))
                .collect();
            match f_overloaded(src.precedence, src.assoc, overloads, &mut sess.interner) {
                Some(form) => form,
                None => return src.clone(),
            }
        }
        None => return src.clone(),
    };
    if src.is_macro {
        with_macro(swapped)
    } else {
        swapped
    }
}

/// Resolves the form of `term` in place (no-op when already resolved).
pub fn resolve_form(sess: &mut Session, env: &EnvRef, term: &mut Value) {
    if term.form.is_some() {
        return;
    }
    match &term.repr {
        Repr::Symbol(name) => {
            term.form = Some(match env::find(env, *name) {
                Some(found) => match found.form {
                    Some(form) => form,
                    None => infer_form(sess, found.ty),
                },
                None => Form::term(),
            });
        }
        Repr::List(_) => {
            if term.head().form.is_none() {
                group(sess, env, term); // group all terms within the list first
            }
            if !term.is_list() {
                // grouping may collapse to a single atom; keep list shape
                let pos = term.pos;
                let list_ty = sess.types.list(basil_types::T_ANY);
                let inner = std::mem::replace(term, Value::void(pos));
                *term = Value::cons(pos, list_ty, inner, Value::void(pos));
            }

            let head = term.head();
            let head_form = head.form.clone().unwrap_or_else(Form::term);
            if head_form.kind != FormKind::Callable {
                term.form = Some(Form::term());
                return;
            }
            if let Some(Invokable::Callable(callable)) = &head_form.invokable {
                if let Some(callback) = callable.callback {
                    term.form = Some(callback(sess, env, term));
                    if term.form.is_none() {
                        term.form = Some(Form::term());
                    }
                    return;
                }
            }

            // a user function or form-level function resolves its body
            // against the forms of the arguments at this call site
            let looked_up = head.as_symbol().and_then(|s| env::find(env, s));
            let fn_data = looked_up.as_ref().and_then(|v| match &v.repr {
                Repr::Function(f) if f.borrow().builtin.is_none() => Some(f.clone()),
                Repr::FormFn(f) => Some(f.clone()),
                _ => None,
            });
            let lookup_callable = looked_up
                .as_ref()
                .and_then(|v| v.form.clone())
                .map_or(false, |f| f.kind == FormKind::Callable);
            match fn_data {
                Some(func) if lookup_callable => {
                    let mut machine = head_form.start();
                    let mut args: Vec<Option<Rc<Form>>> = Vec::new();
                    let mut on_variadic = false;
                    for arg in term.tail().list_values() {
                        if let Invokable::Callable(c) = &machine {
                            if c.current_param().map(|p| p.kind) == Some(ParamKind::SelfName) {
                                machine.advance(&Value::void(arg.pos)); // skip self
                            }
                        }
                        if machine.is_finished() {
                            break;
                        }
                        machine.precheck_keyword(&arg); // keywords end variadics
                        let current = match &machine {
                            Invokable::Callable(c) => c.current_param(),
                            Invokable::Overloaded(_) => None,
                        };
                        let Some(param) = current else { break };
                        if !param.kind.is_variadic() && on_variadic {
                            args.push(Some(Form::term())); // variadics group as terms
                            on_variadic = false;
                        } else if param.kind.is_variadic() {
                            on_variadic = true;
                        } else if param.kind == ParamKind::Term {
                            args.push(Some(Form::term()));
                        } else if param.kind != ParamKind::Keyword {
                            args.push(arg.form.clone().or_else(|| Some(Form::term())));
                        }
                        machine.advance(&arg);
                    }
                    if on_variadic {
                        args.push(Some(Form::term()));
                    }

                    let table = resolve_body(sess, &func, args);
                    let resolving = table.borrow().is_resolving();
                    term.form = if resolving {
                        Some(Form::term())
                    } else {
                        Some(table.borrow().base.form.clone().unwrap_or_else(Form::term))
                    };
                }
                _ => term.form = Some(Form::term()),
            }
        }
        // constants and already-evaluated values stand as terms
        _ => term.form = Some(Form::term()),
    }
}
