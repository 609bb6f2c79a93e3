//! The grouper: flat term sequences to nested application trees.
//!
//! Parsing in Basil is form-driven. Each term resolves to a [`Form`]
//! carrying precedence, associativity, and a parameter pattern; the
//! grouper walks those patterns as state machines over the flat term
//! vector produced by the context-free parser.
//!
//! For each scan position: a term whose form has a prefix case starts a
//! machine with itself as the first parameter ([`try_group`]); otherwise
//! it stands as an atom. After producing a group, a following term with an
//! infix case of high enough precedence extends it as an infix
//! application.
//!
//! While a machine advances, keyword prechecks take priority over grouping
//! (so `else` terminates a variadic rather than starting an argument), the
//! *last* accepting state wins (maximal munch), and a right-hand argument
//! that is itself an unapplied infix operator of higher precedence
//! triggers backtracking along the right spine — this is what groups
//! `a + b * c` correctly without lookahead.
//!
//! Subgroups headed by macro forms are not grouped in place: their ranges
//! are recorded, grouping of the surrounding list is undone, and the list
//! is rewrapped as `(splice …)` so the evaluator expands macros before
//! regrouping.

use crate::driver::Session;
use crate::env::EnvRef;
use crate::forms::{Assoc, Callable, Form, FormKind, Invokable, ParamKind};
use crate::resolve::resolve_form;
use crate::value::Value;
use basil_base::sym;
use basil_types::T_ANY;
use std::rc::Rc;

/// A grouped expression: the value (with resolved form) and the index of
/// the term immediately after it.
pub struct GroupResult {
    pub value: Value,
    pub next: usize,
}

/// The information carried out of a failed grouping: the candidate
/// machines with the deepest successful-advance prefix.
pub struct GroupError {
    pub candidates: Vec<Callable>,
}

/// A subrange of the term vector replaced by a grouped macro invocation.
struct MacroRange {
    begin: usize,
    end: usize,
    term: Value,
}

fn form_of(v: &Value) -> Rc<Form> {
    v.form.clone().unwrap_or_else(Form::term)
}

/// Renders a callable's pattern with the operator name in its self slot,
/// for error notes.
fn format_callable(sess: &Session, self_term: &Value, callable: &Callable) -> String {
    let mut parts = Vec::new();
    for p in callable.params.iter() {
        match p.kind {
            ParamKind::SelfName => parts.push(self_term.display(&sess.interner, &sess.types)),
            ParamKind::Keyword => parts.push(sess.interner.resolve(p.name).to_string()),
            ParamKind::Variable | ParamKind::Quoted | ParamKind::Term => {
                parts.push(format!("{}?", sess.interner.resolve(p.name)))
            }
            ParamKind::Variadic | ParamKind::QuotedVariadic | ParamKind::TermVariadic => {
                parts.push(format!("{}...?", sess.interner.resolve(p.name)))
            }
        }
    }
    parts.join(" ")
}

/// Reports a grouping failure, with one note per best candidate naming the
/// first mismatched value (or the parameter that went unfilled).
pub fn report_group_error(sess: &mut Session, error: &GroupError, term: &Value, params: &[Value]) {
    let shown = term.display(&sess.interner, &sess.types);
    sess.diags
        .error(term.pos, format!("couldn't figure out how to apply procedure '{}'", shown));
    for callable in &error.candidates {
        let rendered = format_callable(sess, term, callable);
        let matched: Vec<String> = params
            .iter()
            .skip(1)
            .take((callable.advances as usize).saturating_sub(1))
            .map(|p| format!("'{}'", p.display(&sess.interner, &sess.types)))
            .collect();
        let matched = if matched.is_empty() {
            String::from("nothing")
        } else {
            matched.join(", ")
        };
        let expected = callable.params[callable.mismatch_index()];
        let expected_text = match expected.kind {
            ParamKind::Keyword => sess.interner.resolve(expected.name).to_string(),
            _ => format!("{}?", sess.interner.resolve(expected.name)),
        };
        let (pos, tail) = match &callable.wrong_value {
            Some(wrong) => (
                wrong.pos,
                format!(
                    "but found '{}' instead of '{}'",
                    wrong.display(&sess.interner, &sess.types),
                    expected_text
                ),
            ),
            None => (term.pos, format!("but could not find a matching term for '{}'", expected_text)),
        };
        sess.diags
            .note(pos, format!("candidate '{}' matched {}, {}", rendered, matched, tail));
    }
}

/// Attempts to finish a grouping whose machine has already consumed its
/// leading parameters (the operator name, and the left operand for infix
/// starts).
///
/// Tracks the deepest accepting state seen; when the machine stops, the
/// last match wins and any extra explored terms are released.
#[allow(clippy::too_many_arguments)]
fn try_group(
    sess: &mut Session,
    env: &EnvRef,
    params: &mut Vec<Value>,
    sm: &mut Invokable,
    terms: &[Value],
    mut it: usize,
    outer_assoc: Assoc,
    outer_prec: i64,
    ranges: &mut Vec<MacroRange>,
) -> Result<GroupResult, GroupError> {
    let is_infix = params.len() > 1;
    let mut best_match: Option<(Callable, usize, usize)> = None; // callable, param count, next

    if let Some(m) = sm.matching() {
        best_match = Some((m.clone(), params.len(), it));
    }

    let mut found_macro = false;

    while !sm.is_finished() && it < terms.len() {
        let tok = terms[it].clone();
        if sm.precheck_keyword(&tok) || sm.precheck_term(&tok) {
            params.push(tok.clone());
            sm.advance(&tok);
            it += 1;
        } else {
            let gr = next_group(sess, env, terms, it, outer_assoc, outer_prec, ranges);
            let mut grouped = gr.value;
            let grouped_form = form_of(&grouped);
            if grouped_form.has_infix_case()
                && params.len() > if is_infix { 2 } else { 1 }
                && (grouped_form.precedence > outer_prec
                    || (grouped_form.precedence == outer_prec
                        && outer_assoc == Assoc::Right
                        && is_infix))
            {
                // an unapplied infix operator arrived as an argument:
                // extend the previous argument's right spine instead of
                // nesting
                it = gr.next;
                let mut back = params.pop().expect("backtracking requires a prior argument");
                backtrack(sess, env, &mut back, &grouped, terms, &mut it, ranges);
                params.push(back);
            } else {
                let prev = it;
                it = gr.next;
                resolve_form(sess, env, &mut grouped);
                while form_of(&grouped).has_prefix_case() && it < terms.len() {
                    let ogr = retry_group(sess, env, &grouped, terms, it, ranges);
                    it = ogr.next;
                    if ogr.value.is_error() {
                        break; // retrying made no progress
                    }
                    grouped = ogr.value;
                    resolve_form(sess, env, &mut grouped);
                }

                if grouped.is_list() {
                    let head_form = grouped.head().form;
                    if head_form.map_or(false, |f| f.is_macro) {
                        ranges.push(MacroRange { begin: prev, end: it, term: grouped.clone() });
                        found_macro = true;
                    }
                }

                sm.advance(&grouped);
                params.push(grouped);
            }
        }
        if let Some(m) = sm.matching() {
            best_match = Some((m.clone(), params.len(), it));
        }
    }

    if found_macro {
        // grouping of this expression is deferred until the macro expands;
        // the caller discards this placeholder result
        return Ok(GroupResult { value: Value::void(Default::default()), next: it });
    }

    match best_match {
        Some((callable, count, next)) => {
            params.truncate(count);

            let head_form = form_of(&params[0]);
            let mut reset = callable;
            reset.reset();
            params[0].form = Some(Rc::new(Form {
                kind: FormKind::Callable,
                precedence: head_form.precedence,
                assoc: head_form.assoc,
                invokable: Some(Invokable::Callable(reset)),
                compound: None,
                is_macro: head_form.is_macro,
            }));

            let mut pos = params.first().unwrap().pos.span(params.last().unwrap().pos);
            if params.len() >= 2 {
                pos = params[1].pos.span(pos); // covers the infix left operand
            }
            let list_ty = sess.types.list(T_ANY);
            let mut result = Value::list(pos, list_ty, params.clone());
            resolve_form(sess, env, &mut result);
            Ok(GroupResult { value: result, next })
        }
        None => Err(GroupError { candidates: sm.deepest_candidates() }),
    }
}

/// Pulls the next complete expression starting at `it`.
///
/// `outer_assoc`/`outer_prec` carry the properties of the enclosing form;
/// pass `i64::MIN` when there is none.
pub fn next_group(
    sess: &mut Session,
    env: &EnvRef,
    terms: &[Value],
    start: usize,
    outer_assoc: Assoc,
    outer_prec: i64,
    ranges: &mut Vec<MacroRange>,
) -> GroupResult {
    assert!(start < terms.len(), "tried to pull a group from an empty term range");

    let mut term = terms[start].clone();
    resolve_form(sess, env, &mut term);
    let mut it = start + 1;

    // prefix applications apply regardless of the outer precedence
    while form_of(&term).has_prefix_case() {
        let form = form_of(&term);
        let mut params = vec![term.clone()];
        let mut sm = form.start();
        sm.advance(&term);
        match try_group(sess, env, &mut params, &mut sm, terms, it, form.assoc, form.precedence, ranges)
        {
            Ok(gr) => {
                term = gr.value;
                resolve_form(sess, env, &mut term);
                it = gr.next;
            }
            Err(error) => {
                if params.len() > 1 {
                    report_group_error(sess, &error, &term, &params);
                }
                // the term stands alone, not applied to anything
                break;
            }
        }
    }

    // fold in infix operators while their precedence admits it
    while it < terms.len() {
        let mut op = terms[it].clone();
        resolve_form(sess, env, &mut op);
        let op_form = form_of(&op);
        let viable = op_form.has_infix_case()
            && (op_form.precedence > outer_prec
                || (outer_assoc == Assoc::Right && op_form.precedence == outer_prec));
        if !viable {
            break;
        }
        let mut params = vec![op.clone(), term.clone()];
        let mut sm = op_form.start();
        sm.advance(&term); // past the left operand
        sm.advance(&op); // past the operator
        match try_group(
            sess,
            env,
            &mut params,
            &mut sm,
            terms,
            it + 1,
            op_form.assoc,
            op_form.precedence,
            ranges,
        ) {
            Ok(gr) => {
                term = gr.value;
                resolve_form(sess, env, &mut term);
                it = gr.next;
            }
            Err(error) => {
                report_group_error(sess, &error, &op, &params);
                it += 1;
                break;
            }
        }
    }

    GroupResult { value: term, next: it }
}

/// Repeatedly applies trailing infix operators to `term`, used while
/// extending a backtracked right spine.
fn backtrack_group(
    sess: &mut Session,
    env: &EnvRef,
    mut term: Value,
    mut op: Value,
    terms: &[Value],
    mut it: usize,
    ranges: &mut Vec<MacroRange>,
) -> GroupResult {
    loop {
        resolve_form(sess, env, &mut op);
        let op_form = form_of(&op);
        if !op_form.has_infix_case() {
            break;
        }
        let mut params = vec![op.clone(), term.clone()];
        let mut sm = op_form.start();
        sm.advance(&term);
        sm.advance(&op);
        match try_group(
            sess,
            env,
            &mut params,
            &mut sm,
            terms,
            it,
            op_form.assoc,
            op_form.precedence,
            ranges,
        ) {
            Ok(gr) => {
                term = gr.value;
                resolve_form(sess, env, &mut term);
                it = gr.next;
            }
            Err(error) => {
                report_group_error(sess, &error, &op, &params);
                break;
            }
        }
        if it >= terms.len() {
            break;
        }
        op = terms[it].clone();
        it += 1;
    }
    GroupResult { value: term, next: it }
}

/// Merges a pending higher-precedence operator into the right spine of the
/// previous argument.
fn backtrack(
    sess: &mut Session,
    env: &EnvRef,
    back: &mut Value,
    op: &Value,
    terms: &[Value],
    it: &mut usize,
    ranges: &mut Vec<MacroRange>,
) {
    let op_form = form_of(op);
    // only descend into bare (form-less) groups: parenthesized lists keep
    // their own grouping
    let descend = back.form.is_none() && back.is_list() && {
        let head_form = form_of(&back.head());
        op_form.precedence > head_form.precedence
            || (op_form.precedence == head_form.precedence && head_form.assoc == Assoc::Right)
    };
    if descend {
        let values = back.list_values();
        let mut last = values.last().expect("non-empty list").clone();
        backtrack(sess, env, &mut last, op, terms, it, ranges);
        let list_ty = sess.types.list(T_ANY);
        let mut rebuilt: Vec<Value> = values;
        *rebuilt.last_mut().unwrap() = last;
        let pos = back.pos;
        *back = Value::list(pos, list_ty, rebuilt);
    } else {
        // the outer expression binds tighter (or is a constant): apply the
        // operator here, with the floor reopened
        let next_it = *it;
        let gr = backtrack_group(sess, env, back.clone(), op.clone(), terms, next_it, ranges);
        *back = gr.value;
        *it = gr.next;
    }
}

/// Re-attempts prefix application of an already grouped value against the
/// remaining terms. Returns an error value (with the advanced index) when
/// no further argument matches.
fn retry_group(
    sess: &mut Session,
    env: &EnvRef,
    outer: &Value,
    terms: &[Value],
    it: usize,
    ranges: &mut Vec<MacroRange>,
) -> GroupResult {
    assert!(it < terms.len(), "tried to retry grouping with no terms remaining");
    let form = form_of(outer);
    let mut params = vec![outer.clone()];
    let mut sm = form.start();
    sm.advance(outer);
    match try_group(sess, env, &mut params, &mut sm, terms, it, form.assoc, form.precedence, ranges)
    {
        Ok(gr) => {
            let mut value = gr.value;
            resolve_form(sess, env, &mut value);
            GroupResult { value, next: gr.next }
        }
        Err(error) => {
            if params.len() > 1 {
                report_group_error(sess, &error, outer, &params);
            }
            GroupResult { value: Value::error(outer.pos), next: it + 1 }
        }
    }
}

/// Finds all groups within the provided list term and replaces it with the
/// list of those groups (or the single group, when there is only one).
///
/// When macro invocations were found, grouping is undone except for the
/// invocations themselves and the list is wrapped as `(splice …)`.
pub fn group(sess: &mut Session, env: &EnvRef, term: &mut Value) {
    let terms = term.list_values();
    if terms.is_empty() {
        return;
    }
    let mut ranges: Vec<MacroRange> = Vec::new();
    let mut results: Vec<Value> = Vec::new();

    let mut begin = 0;
    while begin < terms.len() {
        let gr = next_group(sess, env, &terms, begin, Assoc::Right, i64::MIN, &mut ranges);
        let mut value = gr.value;
        resolve_form(sess, env, &mut value);
        begin = gr.next.max(begin + 1);
        results.push(value);
    }

    if !ranges.is_empty() {
        // keep raw terms around macro invocations so the expression can
        // regroup after expansion
        let mut spliced: Vec<Value> = Vec::new();
        let mut iter = 0;
        for range in &ranges {
            while iter < range.begin {
                spliced.push(terms[iter].clone());
                iter += 1;
            }
            spliced.push(range.term.clone());
            iter = range.end;
        }
        while iter < terms.len() {
            spliced.push(terms[iter].clone());
            iter += 1;
        }
        let list_ty = sess.types.list(T_ANY);
        let pos = term.pos;
        let tail = Value::list(pos, list_ty, spliced);
        *term = Value::cons(pos, list_ty, Value::symbol(pos, sym::SPLICE), tail);
        let mut head = term.head();
        resolve_form(sess, env, &mut head);
        term.set_head(head);
    } else if results.len() == 1 {
        *term = results.pop().unwrap();
    } else {
        let pos = results.first().unwrap().pos.span(results.last().unwrap().pos);
        let list_ty = sess.types.list(T_ANY);
        *term = Value::list(pos, list_ty, results);
    }
}
