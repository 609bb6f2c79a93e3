//! The mixed-mode evaluator.
//!
//! [`eval`] threads one value through compile-time execution, partial
//! evaluation, and lowering: a term either reduces to a compile-time value
//! or becomes a `runtime(T)`-wrapped AST. [`call`] implements the full
//! dispatch sequence — perf budget gate, overload narrowing (first by
//! form, then by type), the runtime decision, argument coercion, and the
//! six dispatch arms — and [`resolve_call`] scores overload candidates.
//!
//! Error values are contagious: any operation receiving one returns one
//! without reporting again.

use crate::ast::{self, AstKind, OverloadCase};
use crate::builtin::BuiltinFlags;
use crate::driver::Session;
use crate::env::{self, clone_env, detach, EnvRef};
use crate::forms::{Form, FormKind, Invokable, Param, ParamKind};
use crate::func::{instantiate, resolve_body_for_args};
use crate::lower::{coerce, lower};
use crate::resolve::{infer_form, resolve_form};
use crate::value::{infer_list, infer_tuple, Repr, Value};
use basil_base::sym;
use basil_types::{Kind, Type, T_ANY, T_ERROR, T_TYPE, T_UNDEFINED, T_VOID};
use smallvec::SmallVec;

/// Metadata for reporting an overload resolution failure.
pub struct OverloadError {
    /// True when candidates conflicted rather than all mismatching.
    pub ambiguous: bool,
    /// Candidate function type, and the argument position at fault.
    pub mismatches: Vec<(Type, usize)>,
}

/// Whether any argument type is runtime-wrapped.
fn is_args_runtime(sess: &TypeStoreRef, args: Type) -> bool {
    let ts = sess;
    if ts.kind(args) == Kind::Tuple {
        (0..ts.tuple_len(args)).any(|i| ts.kind(ts.tuple_at(args, i)) == Kind::Runtime)
    } else {
        ts.kind(args) == Kind::Runtime
    }
}

type TypeStoreRef = basil_types::TypeStore;

/// Removes the runtime wrapper from each argument type, if present.
pub fn strip_runtime(ts: &mut TypeStoreRef, args: Type) -> Type {
    if ts.kind(args) == Kind::Tuple {
        let members: Vec<Type> =
            (0..ts.tuple_len(args)).map(|i| ts.runtime_base(ts.tuple_at(args, i))).collect();
        ts.tuple(members)
    } else {
        ts.runtime_base(args)
    }
}

/// Scores one overload against the actual argument type.
///
/// Exact matches rank above generic matches, which rank above coercions,
/// which rank above union-member matches; the weights are powers of
/// `len + 1` so one better match anywhere dominates any number of weaker
/// ones. Binding coercion is avoided here — we don't yet know which
/// overloads survive, so type variables must not be constrained early.
fn overload_priority(
    sess: &mut Session,
    fn_args: Type,
    args: Type,
) -> Result<i64, (Type, usize)> {
    let len =
        if sess.types.kind(fn_args) == Kind::Tuple { sess.types.tuple_len(fn_args) } else { 1 };

    let union_priority = 1i64;
    let coerce_priority = len as i64 + 1;
    let generic_priority = coerce_priority * coerce_priority;
    let equal_priority = generic_priority * coerce_priority;

    let mut priority = 0i64;
    for i in 0..len {
        let fn_arg = if len == 1 { fn_args } else { sess.types.tuple_at(fn_args, i) };
        if len > 1 && sess.types.kind(args) != Kind::Tuple {
            return Err((fn_arg, i));
        }
        let arg = if len == 1 { args } else { sess.types.tuple_at(args, i) };

        if arg == fn_arg {
            priority += equal_priority;
        } else if sess.types.nonbinding_coerces_to_generic(arg, fn_arg) {
            priority += generic_priority;
        } else if sess.types.nonbinding_coerces_to(arg, fn_arg) {
            priority += coerce_priority;
        } else if sess.types.kind(arg) == Kind::Union && sess.types.coerces_to(fn_arg, arg) {
            priority += union_priority;
        } else {
            return Err((fn_arg, i));
        }
    }
    Ok(priority)
}

/// Resolves an overloaded call over the candidate function types, given
/// the actual argument type. Returns the single best candidate, or an
/// [`OverloadError`] describing the mismatches or the ambiguity.
pub fn resolve_call(
    sess: &mut Session,
    overloads: &[Type],
    args: Type,
) -> Result<Type, OverloadError> {
    assert!(!overloads.is_empty(), "cannot resolve an empty overload list");
    if overloads.len() == 1 {
        return Ok(overloads[0]);
    }

    let priorities: Vec<Result<i64, (Type, usize)>> = overloads
        .iter()
        .map(|&fn_ty| {
            let fn_args = sess.types.arg(fn_ty);
            overload_priority(sess, fn_args, args)
        })
        .collect();

    let max_priority = priorities.iter().filter_map(|p| p.as_ref().ok()).copied().max();

    let Some(max_priority) = max_priority else {
        // every candidate mismatched
        let mismatches = overloads
            .iter()
            .zip(&priorities)
            .map(|(&fn_ty, p)| match p {
                Err((_, i)) => (fn_ty, *i),
                Ok(_) => unreachable!("no candidate scored"),
            })
            .collect();
        return Err(OverloadError { ambiguous: false, mismatches });
    };

    let best: Vec<Type> = overloads
        .iter()
        .zip(&priorities)
        .filter(|(_, p)| matches!(p, Ok(score) if *score == max_priority))
        .map(|(&fn_ty, _)| fn_ty)
        .collect();

    if best.len() > 1 {
        let mismatches = best.into_iter().map(|t| (t, 0)).collect();
        return Err(OverloadError { ambiguous: true, mismatches });
    }
    Ok(best[0])
}

/// Coerces one argument, lowering when the call is runtime.
///
/// Quoted and term parameters skip ordinary evaluation; when lowering they
/// get an evaluate-then-lower pass unless the builtin preserves quotes.
/// Variadic parameter lists lower elementwise.
fn coerce_rt(
    sess: &mut Session,
    env: &EnvRef,
    param: Param,
    is_runtime: bool,
    flags: BuiltinFlags,
    v: &Value,
    dest: Type,
) -> Value {
    let mut dest = dest;
    let v_runtime = sess.types.kind(v.ty) == Kind::Runtime;
    if (v_runtime || is_runtime) && sess.types.kind(dest) != Kind::Runtime {
        let lowered = sess.types.lower(dest);
        dest = sess.types.runtime(lowered);
    }
    if sess.types.kind(dest) == Kind::Runtime && !v_runtime {
        let mut v2 = v.clone();
        if !param.kind.is_evaluated() {
            if flags.contains(BuiltinFlags::PRESERVING) {
                return v.clone();
            }
            v2 = eval(sess, env, &mut v2);
            if v2.is_error() {
                return Value::error(v.pos);
            }
        } else if param.kind.is_variadic() && flags.contains(BuiltinFlags::AST_ANYLIST) {
            if !is_runtime {
                return v2;
            }
            let mut lowered = Vec::new();
            for element in v2.list_values() {
                let low = lower(sess, env, &element);
                if low.is_error() {
                    return Value::error(v.pos);
                }
                lowered.push(low);
            }
            if lowered.is_empty() {
                return Value::void(v.pos);
            }
            let pos = lowered.first().unwrap().pos.span(lowered.last().unwrap().pos);
            let list_ty = sess.types.list(T_ANY);
            return Value::list(pos, list_ty, lowered);
        } else if param.kind.is_variadic() {
            let base = sess.types.runtime_base(dest);
            if sess.types.kind(base) != Kind::List {
                let shown = v.display(&sess.interner, &sess.types);
                let to = sess.types.display(dest, &sess.interner);
                sess.diags.error(
                    v.pos,
                    format!(
                        "tried to coerce variadic parameter list '{}' to non-list type '{}'",
                        shown, to
                    ),
                );
                return Value::error(v.pos);
            }
            let element = sess.types.list_element(base);
            let element_dest = sess.types.runtime(element);
            let mut coerced = Vec::new();
            for element_value in v2.list_values() {
                let c = coerce(sess, env, &element_value, element_dest);
                if c.is_error() {
                    return Value::error(v.pos);
                }
                coerced.push(c);
            }
            if coerced.is_empty() {
                return Value::void(v.pos);
            }
            let pos = coerced.first().unwrap().pos.span(coerced.last().unwrap().pos);
            let list_ty = sess.types.list(element_dest);
            return Value::list(pos, list_ty, coerced);
        }
        return coerce(sess, env, &v2, dest);
    }
    coerce(sess, env, v, dest)
}

/// Coerces the whole argument bag against the destination type.
fn coerce_args(
    sess: &mut Session,
    env: &EnvRef,
    params: &[Param],
    is_runtime: bool,
    flags: BuiltinFlags,
    args: &Value,
    dest: Type,
) -> Value {
    if sess.types.kind(dest) == Kind::Tuple && sess.types.kind(args.ty) == Kind::Tuple {
        let mut coerced = Vec::new();
        for i in 0..args.len() {
            let param = params.get(i).copied().unwrap_or(Param {
                name: basil_base::Symbol::NONE,
                kind: ParamKind::Variable,
            });
            let dest_i = sess.types.tuple_at(dest, i);
            let c = coerce_rt(sess, env, param, is_runtime, flags, &args.at(i), dest_i);
            if c.is_error() {
                return Value::error(args.pos);
            }
            coerced.push(c);
        }
        let ty = infer_tuple(&mut sess.types, &coerced);
        return Value::tuple(args.pos, ty, coerced);
    }
    let param = params
        .first()
        .copied()
        .unwrap_or(Param { name: basil_base::Symbol::NONE, kind: ParamKind::Variable });
    coerce_rt(sess, env, param, is_runtime, flags, args, dest)
}

/// Invokes `func` on the argument bag `args` (a scalar for arity one, a
/// tuple otherwise) for the call term `call_term`.
pub fn call(sess: &mut Session, env: &EnvRef, call_term: &Value, func: Value, args: &Value) -> Value {
    if sess.perf.depth() > 0
        && (sess.perf.current_count() >= sess.perf.max_count
            || sess.perf.depth() as u32 >= sess.perf.max_depth)
        && !sess.perf.is_instantiating()
        && !sess.perf.is_comptime()
    {
        return Value::error(call_term.pos); // the current call is too expensive
    }

    let mut func = func;
    let func_term = call_term.head();

    // resolve the type of each runtime argument, then strip the wrappers:
    // overload resolution works on the underlying types
    let mut fixed: Vec<Type> = Vec::new();
    if sess.types.kind(args.ty) == Kind::Tuple {
        for i in 0..args.len() {
            fixed.push(args.at(i).ty);
        }
    } else {
        fixed.push(args.ty);
    }
    let args_type = if fixed.len() == 1 {
        fixed[0]
    } else {
        sess.types.tuple(fixed)
    };
    let args_type = strip_runtime(&mut sess.types, args_type);

    // collect the value parameters so we know which arguments were quoted
    let func_form = func_term.form.clone().expect("called function's form was not resolved");
    let callable = match &func_form.invokable {
        Some(Invokable::Callable(c)) => c.clone(),
        _ => panic!("expected called function's form to resolve to a single callable"),
    };
    let params: SmallVec<[Param; 4]> = callable
        .params
        .iter()
        .filter(|p| p.kind != ParamKind::Keyword && p.kind != ParamKind::SelfName)
        .copied()
        .collect();

    let mut fntype = sess.types.runtime_base(func.ty);

    // narrow a form-level intersection by the call term's resolved form
    if sess.types.kind(fntype) == Kind::FormIsect {
        let overloads = match &func.repr {
            Repr::FormIsect(overloads) => overloads.clone(),
            _ => panic!("form-level intersection value expected"),
        };
        let found = overloads.iter().find(|(form, _)| **form == *func_form);
        match found {
            Some((_, v)) => {
                func = v.clone();
                fntype = sess.types.runtime_base(func.ty);
            }
            None => {
                let shown = func_term.display(&sess.interner, &sess.types);
                sess.diags.error(
                    func_term.pos,
                    format!("function '{}' has unresolved overloaded form", shown),
                );
                return Value::error(call_term.pos);
            }
        }
    }

    if sess.types.kind(fntype) == Kind::Intersect {
        // type-level overload resolution among the intersection's cases
        let values = match &func.repr {
            Repr::Intersect(values) => values.clone(),
            _ => panic!("intersection value expected"),
        };
        let valid: Vec<Type> = values
            .keys()
            .copied()
            .filter(|&t| {
                let base = sess.types.runtime_base(t);
                sess.types.kind(base) == Kind::Function
            })
            .map(|t| sess.types.runtime_base(t))
            .collect();

        if valid.is_empty() {
            let shown = func_term.display(&sess.interner, &sess.types);
            sess.diags.error(
                call_term.pos,
                format!("no overloads of function '{}' matched the applied form", shown),
            );
            return Value::error(call_term.pos);
        }

        match resolve_call(sess, &valid, args_type) {
            Ok(selected) => {
                func = values[&selected].clone();
                fntype = sess.types.runtime_base(func.ty);
                let expected = sess.types.arg(fntype);
                if !sess.types.coerces_to(args_type, expected) {
                    panic!("overload resolution selected incompatible arguments");
                }
            }
            Err(error) if error.ambiguous => {
                if !sess.types.is_concrete(args_type) {
                    // defer the choice: stage type-variable bindings for
                    // every tied candidate and narrow to an intersection
                    sess.types.enable_isect();
                    let mut isect_types = Vec::new();
                    let mut isect_values = std::collections::BTreeMap::new();
                    for &(candidate, _) in &error.mismatches {
                        let case_arg = sess.types.arg(candidate);
                        sess.types.coerces_to(args_type, case_arg); // for the tvar side effects
                        isect_values.insert(candidate, values[&candidate].clone());
                        isect_types.push(candidate);
                    }
                    sess.types.disable_isect();
                    let narrowed = sess.types.intersect(isect_types);
                    func = Value::intersect(func.pos, narrowed, isect_values);
                    fntype = narrowed;
                } else {
                    let shown = func_term.display(&sess.interner, &sess.types);
                    sess.diags.error(
                        args.pos,
                        format!("ambiguous call to overloaded function '{}'", shown),
                    );
                    for (candidate, _) in &error.mismatches {
                        let candidate_shown = sess.types.display(*candidate, &sess.interner);
                        sess.diags.note(
                            func.pos,
                            format!("candidate function found of type '{}'", candidate_shown),
                        );
                    }
                    return Value::error(call_term.pos);
                }
            }
            Err(error) => {
                let args_shown = sess.types.display(args_type, &sess.interner);
                let fn_shown = func_term.display(&sess.interner, &sess.types);
                sess.diags.error(
                    args.pos,
                    format!("incompatible arguments '{}' for function '{}'", args_shown, fn_shown),
                );
                for (candidate, position) in &error.mismatches {
                    let candidate_shown = sess.types.display(*candidate, &sess.interner);
                    let arg = if sess.types.kind(args.ty) == Kind::Tuple {
                        args.at(*position)
                    } else {
                        args.clone()
                    };
                    let arg_shown = arg.display(&sess.interner, &sess.types);
                    sess.diags.note(
                        values.get(candidate).map_or(func.pos, |v| v.pos),
                        format!(
                            "candidate of type '{}' given incompatible argument '{}'",
                            candidate_shown, arg_shown
                        ),
                    );
                }
                return Value::error(call_term.pos);
            }
        }
    } else if sess.types.kind(fntype) == Kind::Function {
        let expected = sess.types.arg(fntype);
        if !sess.types.coerces_to(args_type, expected) {
            let expected_shown = sess.types.display(expected, &sess.interner);
            let got_shown = sess.types.display(args_type, &sess.interner);
            let fn_shown = func_term.display(&sess.interner, &sess.types);
            sess.diags.error(
                args.pos,
                format!(
                    "incompatible arguments for function '{}': expected '{}', got '{}'",
                    fn_shown, expected_shown, got_shown
                ),
            );
            return Value::error(call_term.pos);
        }
    } else if func.is_error() {
        return Value::error(call_term.pos);
    } else {
        panic!("tried to call a non-callable value");
    }

    let mut is_runtime = is_args_runtime(&sess.types, args.ty)
        || sess.types.kind(func.ty) == Kind::Runtime
        || sess.types.kind(fntype) == Kind::Intersect;
    let mut flags = BuiltinFlags::empty();

    let builtin = func.as_function().and_then(|f| f.borrow().builtin.clone());
    if let Some(ref b) = builtin {
        if !b.flags.contains(BuiltinFlags::COMPTIME)
            || (b.flags.contains(BuiltinFlags::STATEFUL) && !sess.perf.is_meta())
        {
            is_runtime = true; // runtime-only, or stateful outside meta
        }
        flags = b.flags;
    }

    let orig_args = args.clone();
    let dest = if sess.types.kind(func.ty) == Kind::Intersect {
        args_type
    } else {
        let base = sess.types.runtime_base(fntype);
        sess.types.arg(base)
    };
    let args = coerce_args(sess, env, &params, is_runtime, flags, args, dest);
    if args.is_error() || func.is_error() {
        return Value::error(call_term.pos);
    }

    let func_base = sess.types.runtime_base(func.ty);
    if sess.types.kind(func_base) == Kind::Intersect {
        // dispatch deferred past the evaluator: emit a call against the
        // full candidate table and let codegen pick the target
        let values = match &func.repr {
            Repr::Intersect(values) => values.clone(),
            _ => unreachable!(),
        };
        let mut cases = Vec::new();
        for (&t, v) in values.iter() {
            let data = v.as_function().expect("intersection member was not a function");
            let case = match data.borrow().builtin.clone() {
                Some(b) => OverloadCase::Builtin(b),
                None => OverloadCase::Inst(resolve_body_for_args(sess, &data, &args)),
            };
            cases.push((t, case));
        }
        let arg_nodes = runtime_arg_nodes(&args);
        let overload_node = ast::node(func.pos, func_base, AstKind::Overload { cases });
        let call_node =
            ast::node(args.pos, T_ANY, AstKind::Call { callee: overload_node, args: arg_nodes });
        let rt_any = sess.types.runtime(T_ANY);
        return Value::runtime(call_term.pos, rt_any, call_node);
    }

    if let Some(b) = builtin {
        if is_runtime {
            if !b.flags.contains(BuiltinFlags::RUNTIME) {
                let shown = func_term.display(&sess.interner, &sess.types);
                sess.diags.error(
                    call_term.pos,
                    format!(
                        "compile-time only function '{}' was invoked on runtime arguments",
                        shown
                    ),
                );
                return Value::error(call_term.pos);
            }
            sess.perf.begin_call(call_term, None, 1); // builtins are cheap
            sess.perf.end_call();
            let runtime_fn = b.runtime.expect("runtime-capable builtin lacks a runtime path");
            let Some(node) = runtime_fn(sess, env, call_term, &args) else {
                return Value::error(call_term.pos);
            };
            let node_ty = ast::ty(&node);
            let rt = sess.types.runtime(node_ty);
            return Value::runtime(call_term.pos, rt, node);
        }
        sess.perf.begin_call(call_term, None, 1);
        if !b.flags.contains(BuiltinFlags::RUNTIME) {
            sess.perf.make_comptime(); // comptime-locked builtins are budget-exempt
        }
        let comptime_fn = b.comptime.expect("comptime-capable builtin lacks a comptime path");
        let result = comptime_fn(sess, env, call_term, &args);
        if (sess.perf.current_count() >= sess.perf.max_count
            || sess.perf.depth() as u32 >= sess.perf.max_depth)
            && !sess.perf.is_comptime()
        {
            // too expensive after all: fall back to a runtime call
            sess.perf.end_call();
            let fn_arg = sess.types.arg(fntype);
            let args = coerce_args(sess, env, &params, true, b.flags, &args, fn_arg);
            if args.is_error() {
                return Value::error(call_term.pos);
            }
            sess.perf.begin_call(call_term, None, 1);
            sess.perf.end_call();
            let Some(runtime_fn) = b.runtime else {
                return Value::error(call_term.pos);
            };
            let Some(node) = runtime_fn(sess, env, call_term, &args) else {
                return Value::error(call_term.pos);
            };
            let node_ty = ast::ty(&node);
            let rt = sess.types.runtime(node_ty);
            return Value::runtime(call_term.pos, rt, node);
        }
        sess.perf.end_call();
        return result;
    }

    if sess.types.kind(func.ty) == Kind::Runtime && func.as_function().is_none() {
        // calling a runtime function value: emit the call directly
        let callee = func.as_ast().expect("runtime value carries an ast");
        let arg_nodes = runtime_arg_nodes(&args);
        let ret = sess.types.ret(func_base);
        let rt = sess.types.runtime(ret);
        let call_node =
            ast::node(func.pos, ret, AstKind::Call { callee, args: arg_nodes });
        return Value::runtime(call_term.pos, rt, call_node);
    }

    // user-defined function
    let func_data = func.as_function().expect("user function value expected");
    let table = resolve_body_for_args(sess, &func_data, &orig_args);
    sess.perf.begin_call(call_term, Some(table.clone()), 1);

    let mut result = Value::void(call_term.pos);
    let mut is_runtime = is_runtime;
    if !is_runtime {
        let in_flight = table.borrow().is_instantiating(args_type);
        let already_compiled = table.borrow().insts.contains_key(&args_type);
        if in_flight || already_compiled {
            // recursion into a function being compiled (or one already
            // compiled for these types): call the instantiation instead
            is_runtime = true;
        } else {
            let record = clone_env(&table.borrow().env);
            let fn_args = func_data.borrow().args.clone();
            if fn_args.len() == 1 {
                env::def(&record, fn_args[0], args.clone());
            } else {
                for (i, &name) in fn_args.iter().enumerate() {
                    env::def(&record, name, args.at(i));
                }
            }
            let mut body = table.borrow().base.clone();
            result = eval(sess, &record, &mut body);
            let parent = record.borrow().parent.clone();
            if let Some(parent) = parent {
                detach(&parent, &record); // release the call record
            }
        }
    }

    if (is_runtime
        || sess.perf.current_count() >= sess.perf.max_count
        || sess.perf.depth_exceeded())
        && !sess.perf.is_comptime()
    {
        sess.perf.end_call();
        if sess.perf.on_stack(&table) {
            return Value::error(call_term.pos); // defer to the outer call
        }

        // instantiate and emit a runtime call; the call itself costs one
        sess.perf.begin_call(call_term, Some(table.clone()), 0);
        sess.perf.make_instantiating();
        let inst_table = resolve_body_for_args(sess, &func_data, &args);
        let inst = instantiate(sess, &func_data, &inst_table, args_type);
        sess.perf.end_call_without_add();
        let Some(inst) = inst else {
            return Value::error(call_term.pos);
        };

        let inst_type = ast::ty(&inst.func);
        if inst_type == T_ERROR {
            return Value::error(call_term.pos);
        }
        let fn_arg = sess.types.arg(inst_type);
        let rt_args =
            coerce_args(sess, env, &params, true, BuiltinFlags::empty(), &args, fn_arg);
        if rt_args.is_error() {
            return Value::error(call_term.pos);
        }
        let arg_nodes = runtime_arg_nodes(&rt_args);
        let ret = sess.types.ret(inst_type);
        let rt = sess.types.runtime(ret);
        let call_node = ast::node(
            rt_args.pos,
            ret,
            AstKind::Call { callee: inst.func.clone(), args: arg_nodes },
        );
        return Value::runtime(call_term.pos, rt, call_node);
    }

    sess.perf.end_call();
    result
}

fn runtime_arg_nodes(args: &Value) -> Vec<ast::Ast> {
    let collect = |v: &Value| v.as_ast().expect("runtime call argument was not lowered");
    if let Repr::Tuple(elements) = &args.repr {
        elements.iter().map(collect).collect()
    } else {
        vec![collect(args)]
    }
}

/// Expands a `(splice …)` wrapper: macro invocations in the tail evaluate
/// now, raw terms pass through, and the spliced sequence regroups and
/// evaluates.
fn expand_splice(sess: &mut Session, env: &EnvRef, term: &Value) -> Value {
    let mut expanded: Vec<Value> = Vec::new();
    for mut element in term.tail().list_values() {
        let is_macro_call = element.is_list()
            && element.head().form.as_ref().map_or(false, |f| f.is_macro);
        if is_macro_call {
            let result = eval(sess, env, &mut element);
            if result.is_error() {
                return Value::error(term.pos);
            }
            expanded.push(result);
        } else {
            expanded.push(element);
        }
    }
    let list_ty = infer_list(&mut sess.types, &expanded);
    let mut regrouped = Value::list(term.pos, list_ty, expanded);
    resolve_form(sess, env, &mut regrouped);
    eval(sess, env, &mut regrouped)
}

/// Evaluates `term` within `env`.
pub fn eval(sess: &mut Session, env: &EnvRef, term: &mut Value) -> Value {
    if term.form.is_none() {
        resolve_form(sess, env, term);
    }
    match &term.repr {
        // constants evaluate to themselves
        Repr::Void
        | Repr::Int(_)
        | Repr::Float(_)
        | Repr::Double(_)
        | Repr::Char(_)
        | Repr::String(_)
        | Repr::Bool(_)
        | Repr::TypeVal(_) => term.clone(),
        Repr::Error => Value::error(term.pos),
        Repr::Symbol(name) => {
            let name = *name;
            let found = env::find(env, name);
            let Some(found) = found else {
                let shown = sess.interner.resolve(name).to_string();
                sess.diags.error(term.pos, format!("undefined variable '{}'", shown));
                return Value::error(term.pos);
            };
            if found.ty == T_UNDEFINED {
                // a placeholder from form resolution, not an actual value
                let shown = sess.interner.resolve(name).to_string();
                sess.diags.error(term.pos, format!("undefined variable '{}'", shown));
                return Value::error(term.pos);
            }
            if found.ty == T_TYPE {
                if let Some(t) = found.as_type() {
                    if sess.types.is_tvar(t) {
                        return Value::type_val(found.pos, sess.types.tvar_concrete(t));
                    }
                }
            }
            if sess.types.kind(found.ty) == Kind::Runtime {
                let base = sess.types.runtime_base(found.ty);
                return Value::runtime(
                    found.pos,
                    found.ty,
                    ast::node(found.pos, base, AstKind::Var(name)),
                );
            }
            found
        }
        Repr::List(_) => {
            if sess.diags.count() > 0 {
                return Value::error(term.pos); // form resolution went awry
            }

            if term.head().as_symbol() == Some(sym::SPLICE) {
                return expand_splice(sess, env, &term.clone());
            }

            let mut head_term = term.head();
            let head = eval(sess, env, &mut head_term);
            term.set_head(head_term);

            if term.tail().ty == T_VOID {
                // e.g. (+): the function itself, re-inferred as a form
                let form = infer_form(sess, head.ty);
                return head.with(form);
            }

            let head_base = sess.types.runtime_base(head.ty);
            let callable_head = sess.types.kind(head_base) == Kind::Function
                || (sess.types.kind(head_base) == Kind::Intersect
                    && sess.types.intersect_procedural(head_base))
                || sess.types.kind(head.ty) == Kind::FormIsect;

            if callable_head {
                if term
                    .head()
                    .form
                    .as_ref()
                    .map_or(true, |f| f.kind != FormKind::Callable)
                {
                    let inferred = infer_form(sess, head.ty);
                    let head_value = term.head().with(inferred);
                    term.set_head(head_value);
                }
                let head_form = term.head().form.unwrap_or_else(Form::term);
                match head_form.kind {
                    FormKind::Callable => {}
                    FormKind::Overloaded => {
                        let shown = term.head().display(&sess.interner, &sess.types);
                        sess.diags.error(
                            term.head().pos,
                            format!("call to function '{}' is syntactically ambiguous", shown),
                        );
                        return Value::error(term.pos);
                    }
                    _ => {
                        let shown = term.head().display(&sess.interner, &sess.types);
                        sess.diags.error(
                            term.head().pos,
                            format!(
                                "couldn't figure out how to apply function '{}': term has a non-applicable form",
                                shown
                            ),
                        );
                        return Value::error(term.pos);
                    }
                }

                let mut machine = head_form.start();
                let mut args: Vec<Value> = Vec::new();
                let mut varargs: Vec<Value> = Vec::new();

                // walk the callable over the argument list to decide where
                // to evaluate
                let tail = term.tail();
                let mut cursor = tail.clone();
                while cursor.is_list() {
                    let mut arg = cursor.head();
                    let current_kind = |m: &Invokable| match m {
                        Invokable::Callable(c) => c.current_param().map(|p| p.kind),
                        Invokable::Overloaded(_) => None,
                    };
                    if current_kind(&machine) == Some(ParamKind::SelfName) {
                        machine.advance(&Value::void(arg.pos)); // skip the self slot
                    }
                    if machine.is_finished() {
                        let shown = term.head().display(&sess.interner, &sess.types);
                        let arg_shown = arg.display(&sess.interner, &sess.types);
                        sess.diags.error(
                            arg.pos,
                            format!(
                                "too many parameters provided to function '{}': found term '{}' after the last matching parameter",
                                shown, arg_shown
                            ),
                        );
                        return Value::error(term.pos);
                    }

                    machine.precheck_keyword(&arg); // keywords end variadics

                    let current = current_kind(&machine);
                    if let Some(kind) = current {
                        if !kind.is_variadic() && !varargs.is_empty() {
                            let pos =
                                varargs.first().unwrap().pos.span(varargs.last().unwrap().pos);
                            let list_ty = infer_list(&mut sess.types, &varargs);
                            args.push(Value::list(pos, list_ty, std::mem::take(&mut varargs)));
                        }
                        match kind {
                            ParamKind::Term
                            | ParamKind::Quoted => args.push(arg.clone()),
                            ParamKind::TermVariadic | ParamKind::QuotedVariadic => {
                                varargs.push(arg.clone())
                            }
                            ParamKind::Keyword | ParamKind::SelfName => {}
                            ParamKind::Variable | ParamKind::Variadic => {
                                let mut value = eval(sess, env, &mut arg);
                                if value.is_error() {
                                    return Value::error(term.pos);
                                }
                                value.pos = arg.pos;
                                if kind == ParamKind::Variadic {
                                    varargs.push(value);
                                } else {
                                    args.push(value);
                                }
                            }
                        }
                    }
                    machine.advance(&arg);
                    cursor.set_head(arg);
                    let next = cursor.tail();
                    cursor = next;
                }
                if !varargs.is_empty() {
                    let pos = varargs.first().unwrap().pos.span(varargs.last().unwrap().pos);
                    let list_ty = infer_list(&mut sess.types, &varargs);
                    args.push(Value::list(pos, list_ty, varargs));
                }

                if args.is_empty() {
                    let shown = term.head().display(&sess.interner, &sess.types);
                    sess.diags.error(
                        term.pos,
                        format!(
                            "procedure '{}' must be called on one or more arguments; zero given",
                            shown
                        ),
                    );
                    return Value::error(term.pos);
                }
                if args.iter().any(Value::is_error) {
                    return Value::error(term.pos);
                }

                let args_value = if args.len() == 1 {
                    args.into_iter().next().unwrap()
                } else {
                    let pos = args.first().unwrap().pos.span(args.last().unwrap().pos);
                    let ty = infer_tuple(&mut sess.types, &args);
                    Value::tuple(pos, ty, args)
                };

                let mut result = call(sess, env, term, head, &args_value);
                result.form = term.form.clone();
                if result.is_error() && sess.diags.count() == 0 {
                    return result;
                }
                if result.form.is_none() {
                    result.form = Some(infer_form(sess, result.ty));
                }
                result.pos = term.pos; // prefer the call term's position
                return result;
            }

            if head.is_error() {
                return Value::error(term.pos);
            }
            let shown = term.display(&sess.interner, &sess.types);
            sess.diags.error(term.pos, format!("could not evaluate list '{}'", shown));
            Value::error(term.pos)
        }
        _ => {
            let shown = term.display(&sess.interner, &sess.types);
            sess.diags.error(term.pos, format!("could not evaluate term '{}'", shown));
            Value::error(term.pos)
        }
    }
}
