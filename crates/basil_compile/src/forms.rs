//! The form model: how values apply to the terms around them.
//!
//! A [`Form`] describes a value's parsing behavior — precedence,
//! associativity, and (for invokable values) a parameter pattern. Forms are
//! more abstract than function types: the grouper walks them over flat term
//! sequences before any evaluation happens.
//!
//! Invokable forms carry a state machine: a single [`Callable`], or an
//! [`Overloaded`] set of callables advanced in lockstep. Machines support
//! keyword and term *prechecks* (giving keywords priority over ordinary
//! grouping), per-step advancing, and mismatch tracking used verbatim in
//! grouping error notes.
//!
//! Overload ambiguity is detected by *mangling*: each callable's parameter
//! pattern renders to a canonical signature symbol, and adding an overload
//! whose signature already exists is rejected.

use crate::driver::Session;
use crate::env::EnvRef;
use crate::value::Value;
use basil_base::{Interner, Symbol};
use basil_types::{FormKey, T_SYMBOL};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// The kinds of parameters permitted in a callable form.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ParamKind {
    /// Binds any single grouped term.
    Variable,
    /// Binds any number of grouped terms.
    Variadic,
    /// Matches only the corresponding symbol; part of the signature.
    Keyword,
    /// Binds a single ungrouped term.
    Term,
    /// Binds any number of ungrouped terms.
    TermVariadic,
    /// Binds a single grouped term, skipping evaluation.
    Quoted,
    /// Binds any number of grouped terms, skipping evaluation.
    QuotedVariadic,
    /// The slot occupied by the operator or function name itself.
    SelfName,
}

impl ParamKind {
    /// Whether this parameter accepts multiple terms.
    pub fn is_variadic(self) -> bool {
        matches!(self, ParamKind::Variadic | ParamKind::TermVariadic | ParamKind::QuotedVariadic)
    }

    /// Whether arguments bound to this parameter are evaluated before a
    /// call.
    pub fn is_evaluated(self) -> bool {
        matches!(self, ParamKind::Variable | ParamKind::Variadic | ParamKind::SelfName)
    }
}

/// A single parameter within a callable form.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Param {
    pub name: Symbol,
    pub kind: ParamKind,
}

/// The self parameter never changes, so it gets a constant.
pub const P_SELF: Param = Param { name: Symbol::NONE, kind: ParamKind::SelfName };

pub fn p_var(name: Symbol) -> Param {
    Param { name, kind: ParamKind::Variable }
}

pub fn p_variadic(name: Symbol) -> Param {
    Param { name, kind: ParamKind::Variadic }
}

pub fn p_keyword(name: Symbol) -> Param {
    Param { name, kind: ParamKind::Keyword }
}

pub fn p_term(name: Symbol) -> Param {
    Param { name, kind: ParamKind::Term }
}

pub fn p_term_variadic(name: Symbol) -> Param {
    Param { name, kind: ParamKind::TermVariadic }
}

pub fn p_quoted(name: Symbol) -> Param {
    Param { name, kind: ParamKind::Quoted }
}

pub fn p_quoted_variadic(name: Symbol) -> Param {
    Param { name, kind: ParamKind::QuotedVariadic }
}

impl Param {
    /// Whether this parameter accepts the provided code value.
    pub fn matches(&self, value: &Value) -> bool {
        match self.kind {
            ParamKind::Keyword => value.ty == T_SYMBOL && value.as_symbol() == Some(self.name),
            _ => true,
        }
    }
}

/// A callback used to dynamically resolve forms during application.
///
/// Form callbacks should not report errors; if one cannot complete, it
/// returns a term form.
pub type FormCallback = fn(&mut Session, &EnvRef, &Value) -> Rc<Form>;

/// A callable form's parameter pattern plus its in-flight matching state.
///
/// The pattern (`params`, `callback`) is shared; the state fields are reset
/// whenever a machine is started from a form.
#[derive(Clone)]
pub struct Callable {
    pub params: Rc<SmallVec<[Param; 4]>>,
    pub callback: Option<FormCallback>,

    // state machine fields
    index: usize,
    stopped: bool,
    /// Number of successful advances, used to pick the deepest candidates
    /// for grouping errors.
    pub advances: u32,
    /// The first mismatched value this machine saw, if any.
    pub wrong_value: Option<Value>,
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        *self.params == *other.params
    }
}

impl Callable {
    pub fn new(params: SmallVec<[Param; 4]>, callback: Option<FormCallback>) -> Callable {
        Callable {
            params: Rc::new(params),
            callback,
            index: 0,
            stopped: false,
            advances: 0,
            wrong_value: None,
        }
    }

    pub fn has_prefix_case(&self) -> bool {
        matches!(
            self.params.first().map(|p| p.kind),
            Some(ParamKind::Keyword) | Some(ParamKind::SelfName)
        )
    }

    pub fn has_infix_case(&self) -> bool {
        self.params.len() > 1
            && !matches!(self.params[0].kind, ParamKind::Keyword | ParamKind::SelfName)
            && matches!(self.params[1].kind, ParamKind::Keyword | ParamKind::SelfName)
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.stopped = false;
        self.advances = 0;
        self.wrong_value = None;
    }

    /// The parameter the machine is currently waiting on.
    pub fn current_param(&self) -> Option<Param> {
        if self.stopped {
            None
        } else {
            self.params.get(self.index).copied()
        }
    }

    /// Accepts a keyword if the current parameter is that keyword, or if
    /// the machine sits on a variadic whose following parameter is that
    /// keyword (keywords can end variadics early).
    pub fn precheck_keyword(&mut self, keyword: &Value) -> bool {
        if self.is_finished() {
            return false;
        }
        if self.params[self.index].kind == ParamKind::Keyword {
            return self.params[self.index].matches(keyword);
        }
        if self.params[self.index].kind.is_variadic()
            && self.index + 1 < self.params.len()
            && self.params[self.index + 1].kind == ParamKind::Keyword
            && self.params[self.index + 1].matches(keyword)
        {
            self.index += 1;
            return true;
        }
        false
    }

    /// Accepts an ungrouped term if the current parameter is a term
    /// parameter (plain or variadic). Lower priority than the keyword
    /// precheck, and never escapes a variadic.
    pub fn precheck_term(&mut self, _term: &Value) -> bool {
        !self.is_finished()
            && matches!(
                self.params[self.index].kind,
                ParamKind::Term | ParamKind::TermVariadic
            )
    }

    /// Moves the machine forward by one value. Variadic parameters remain
    /// current; a mismatch stops the machine and records the culprit.
    pub fn advance(&mut self, value: &Value) {
        if self.is_finished() {
            return;
        }
        if self.params[self.index].matches(value) {
            self.advances += 1;
            if !self.params[self.index].kind.is_variadic() {
                self.index += 1;
            }
        } else {
            if self.wrong_value.is_none() {
                self.wrong_value = Some(value.clone());
            }
            self.stopped = true;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stopped || self.index >= self.params.len()
    }

    /// Whether the machine is in an accepting state: every parameter has
    /// been consumed, or only variadic parameters remain.
    pub fn is_match(&self) -> bool {
        !self.stopped && self.params[self.index..].iter().all(|p| p.kind.is_variadic())
    }

    /// The index of the parameter a grouping error should point at.
    pub fn mismatch_index(&self) -> usize {
        self.index.min(self.params.len().saturating_sub(1))
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// An overloaded set of callables advanced in lockstep.
#[derive(Clone)]
pub struct Overloaded {
    pub overloads: Vec<Callable>,
    pub mangled: Rc<BTreeSet<Symbol>>,
}

impl Overloaded {
    pub fn has_prefix_case(&self) -> bool {
        self.overloads.iter().any(|c| c.has_prefix_case())
    }

    pub fn has_infix_case(&self) -> bool {
        self.overloads.iter().any(|c| c.has_infix_case())
    }

    pub fn reset(&mut self) {
        for overload in &mut self.overloads {
            overload.reset();
        }
    }

    /// If any child machine accepts the keyword, the children that do not
    /// are stopped: keywords take priority over grouping.
    pub fn precheck_keyword(&mut self, keyword: &Value) -> bool {
        let results: Vec<bool> =
            self.overloads.iter_mut().map(|c| c.precheck_keyword(keyword)).collect();
        let matched = results.iter().any(|&r| r);
        if matched {
            for (overload, &r) in self.overloads.iter_mut().zip(&results) {
                if !r {
                    overload.stop();
                }
            }
        }
        matched
    }

    /// Like the keyword precheck, but for ungrouped terms.
    pub fn precheck_term(&mut self, term: &Value) -> bool {
        let results: Vec<bool> =
            self.overloads.iter_mut().map(|c| c.precheck_term(term)).collect();
        let matched = results.iter().any(|&r| r);
        if matched {
            for (overload, &r) in self.overloads.iter_mut().zip(&results) {
                if !r {
                    overload.stop();
                }
            }
        }
        matched
    }

    pub fn advance(&mut self, value: &Value) {
        for overload in &mut self.overloads {
            overload.advance(value);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.overloads.iter().all(|c| c.is_finished())
    }

    /// The first matching child. Mangling forbids ambiguous overload sets,
    /// so the first match is the only one.
    pub fn matching(&self) -> Option<&Callable> {
        self.overloads.iter().find(|c| c.is_match())
    }
}

/// The state machine of an invokable form.
#[derive(Clone)]
pub enum Invokable {
    Callable(Callable),
    Overloaded(Overloaded),
}

impl Invokable {
    pub fn has_prefix_case(&self) -> bool {
        match self {
            Invokable::Callable(c) => c.has_prefix_case(),
            Invokable::Overloaded(o) => o.has_prefix_case(),
        }
    }

    pub fn has_infix_case(&self) -> bool {
        match self {
            Invokable::Callable(c) => c.has_infix_case(),
            Invokable::Overloaded(o) => o.has_infix_case(),
        }
    }

    pub fn precheck_keyword(&mut self, keyword: &Value) -> bool {
        match self {
            Invokable::Callable(c) => c.precheck_keyword(keyword),
            Invokable::Overloaded(o) => o.precheck_keyword(keyword),
        }
    }

    pub fn precheck_term(&mut self, term: &Value) -> bool {
        match self {
            Invokable::Callable(c) => c.precheck_term(term),
            Invokable::Overloaded(o) => o.precheck_term(term),
        }
    }

    pub fn advance(&mut self, value: &Value) {
        match self {
            Invokable::Callable(c) => c.advance(value),
            Invokable::Overloaded(o) => o.advance(value),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Invokable::Callable(c) => c.is_finished(),
            Invokable::Overloaded(o) => o.is_finished(),
        }
    }

    /// The callable this machine matched, if it is in an accepting state.
    pub fn matching(&self) -> Option<&Callable> {
        match self {
            Invokable::Callable(c) => c.is_match().then_some(c),
            Invokable::Overloaded(o) => o.matching(),
        }
    }

    /// The individual callables with the deepest successful-advance prefix,
    /// for grouping error notes.
    pub fn deepest_candidates(&self) -> Vec<Callable> {
        match self {
            Invokable::Callable(c) => vec![c.clone()],
            Invokable::Overloaded(o) => {
                let best = o.overloads.iter().map(|c| c.advances).max().unwrap_or(0);
                o.overloads.iter().filter(|c| c.advances == best).cloned().collect()
            }
        }
    }
}

/// Discriminates what a form is.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum FormKind {
    /// A non-applied, singular value.
    Term,
    /// Applicable, like a single function.
    Callable,
    /// Applicable in several ways, like an overloaded function.
    Overloaded,
    /// Contains other forms indexed by values; used by modules.
    Compound,
}

/// Associativity of operators at equal precedence.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Assoc {
    Left,
    Right,
}

/// The compound data of a module form: member values mapped to forms.
#[derive(Clone)]
pub struct Compound {
    pub members: Vec<(Value, Rc<Form>)>,
}

impl Compound {
    pub fn find(&self, key: &Value) -> Option<Rc<Form>> {
        self.members.iter().find(|(k, _)| k == key).map(|(_, f)| f.clone())
    }
}

/// The form of a value: how (or whether) it applies to surrounding terms.
#[derive(Clone)]
pub struct Form {
    pub kind: FormKind,
    pub precedence: i64,
    pub assoc: Assoc,
    pub invokable: Option<Invokable>,
    pub compound: Option<Compound>,
    pub is_macro: bool,
}

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind
            || self.precedence != other.precedence
            || self.assoc != other.assoc
            || self.is_macro != other.is_macro
        {
            return false;
        }
        match (&self.invokable, &other.invokable) {
            (None, None) => true,
            (Some(Invokable::Callable(a)), Some(Invokable::Callable(b))) => a == b,
            (Some(Invokable::Overloaded(a)), Some(Invokable::Overloaded(b))) => {
                a.overloads == b.overloads
            }
            _ => false,
        }
    }
}

impl Form {
    /// The form of a single term.
    pub fn term() -> Rc<Form> {
        Rc::new(Form {
            kind: FormKind::Term,
            precedence: 0,
            assoc: Assoc::Left,
            invokable: None,
            compound: None,
            is_macro: false,
        })
    }

    pub fn is_invokable(&self) -> bool {
        self.invokable.is_some()
    }

    pub fn has_prefix_case(&self) -> bool {
        self.invokable.as_ref().map_or(false, |i| i.has_prefix_case())
    }

    pub fn has_infix_case(&self) -> bool {
        self.invokable.as_ref().map_or(false, |i| i.has_infix_case())
    }

    /// Returns the form's state machine, reset to the starting position.
    ///
    /// Panics if the form is not invokable; check before calling.
    pub fn start(&self) -> Invokable {
        let mut machine =
            self.invokable.clone().expect("attempted to start state machine of non-invokable form");
        match &mut machine {
            Invokable::Callable(c) => c.reset(),
            Invokable::Overloaded(o) => o.reset(),
        }
        machine
    }

    /// A stable key identifying this form inside form-level intersection
    /// types.
    pub fn key(&self) -> FormKey {
        let mut hasher = DefaultHasher::new();
        self.kind.hash(&mut hasher);
        self.precedence.hash(&mut hasher);
        self.assoc.hash(&mut hasher);
        self.is_macro.hash(&mut hasher);
        match &self.invokable {
            None => 0u8.hash(&mut hasher),
            Some(Invokable::Callable(c)) => {
                1u8.hash(&mut hasher);
                c.params.hash(&mut hasher);
            }
            Some(Invokable::Overloaded(o)) => {
                2u8.hash(&mut hasher);
                for c in &o.overloads {
                    c.params.hash(&mut hasher);
                }
            }
        }
        hasher.finish()
    }
}

/// Renders a callable's parameter pattern as a canonical signature symbol.
///
/// Keyword names appear verbatim, other slots as `#`, each followed by a
/// `\` separator. Leading and trailing variadics are collapsed, so
/// signatures that differ only in optional repetition collide.
pub fn mangle(callable: &Callable, interner: &mut Interner) -> Symbol {
    let params = &callable.params;
    let mut first = 0;
    let mut last = params.len();
    while first < last && params[first].kind.is_variadic() {
        first += 1;
    }
    while last > first && params[last - 1].kind.is_variadic() {
        last -= 1;
    }
    let mut acc = String::new();
    for p in &params[first..last] {
        if p.kind == ParamKind::Keyword {
            acc.push_str(interner.resolve(p.name));
        } else {
            acc.push('#'); // '#' is invalid in identifiers
        }
        acc.push('\\');
    }
    interner.intern(&acc)
}

fn check_named(params: &[Param]) {
    assert!(!params.is_empty(), "attempted to construct callable form with no parameters");
    let named = matches!(params[0].kind, ParamKind::Keyword | ParamKind::SelfName)
        || (params.len() > 1
            && matches!(params[1].kind, ParamKind::Keyword | ParamKind::SelfName));
    assert!(named, "attempted to construct callable form with no name slot");
}

/// Constructs a callable form from a parameter pattern.
pub fn f_callable(precedence: i64, assoc: Assoc, params: impl IntoIterator<Item = Param>) -> Rc<Form> {
    let params: SmallVec<[Param; 4]> = params.into_iter().collect();
    check_named(&params);
    Rc::new(Form {
        kind: FormKind::Callable,
        precedence,
        assoc,
        invokable: Some(Invokable::Callable(Callable::new(params, None))),
        compound: None,
        is_macro: false,
    })
}

/// Constructs a callable form with a form-resolution callback.
pub fn f_callable_cb(
    precedence: i64,
    assoc: Assoc,
    callback: FormCallback,
    params: impl IntoIterator<Item = Param>,
) -> Rc<Form> {
    let params: SmallVec<[Param; 4]> = params.into_iter().collect();
    check_named(&params);
    Rc::new(Form {
        kind: FormKind::Callable,
        precedence,
        assoc,
        invokable: Some(Invokable::Callable(Callable::new(params, Some(callback)))),
        compound: None,
        is_macro: false,
    })
}

/// Constructs an overloaded form from invokable forms. Overloaded inputs
/// are flattened, so overloaded forms only ever contain callables.
///
/// Returns `None` if two overloads mangle to the same signature.
pub fn f_overloaded(
    precedence: i64,
    assoc: Assoc,
    overloads: impl IntoIterator<Item = Rc<Form>>,
    interner: &mut Interner,
) -> Option<Rc<Form>> {
    let mut callables: Vec<Callable> = Vec::new();
    for form in overloads {
        match &form.invokable {
            Some(Invokable::Callable(c)) => callables.push(c.clone()),
            Some(Invokable::Overloaded(o)) => callables.extend(o.overloads.iter().cloned()),
            None => panic!("attempted to add non-invokable form to overloaded form"),
        }
    }
    let mut mangled = BTreeSet::new();
    for callable in &callables {
        if !mangled.insert(mangle(callable, interner)) {
            return None; // ambiguous overload
        }
    }
    Some(Rc::new(Form {
        kind: FormKind::Overloaded,
        precedence,
        assoc,
        invokable: Some(Invokable::Overloaded(Overloaded {
            overloads: callables,
            mangled: Rc::new(mangled),
        })),
        compound: None,
        is_macro: false,
    }))
}

/// Adds an invokable form's callables to an existing overloaded form,
/// returning the merged form, or `None` on a signature collision.
pub fn f_add_overload(
    overloaded: &Rc<Form>,
    addend: &Rc<Form>,
    interner: &mut Interner,
) -> Option<Rc<Form>> {
    assert!(
        overloaded.kind == FormKind::Overloaded,
        "attempted to add overload to non-overloaded form"
    );
    f_overloaded(
        overloaded.precedence,
        overloaded.assoc,
        [overloaded.clone(), addend.clone()],
        interner,
    )
}

/// Constructs a compound (module) form from member forms.
pub fn f_compound(members: Vec<(Value, Rc<Form>)>) -> Rc<Form> {
    Rc::new(Form {
        kind: FormKind::Compound,
        precedence: 0,
        assoc: Assoc::Left,
        invokable: None,
        compound: Some(Compound { members }),
        is_macro: false,
    })
}

/// Returns a copy of `form` with its macro flag set.
pub fn with_macro(form: Rc<Form>) -> Rc<Form> {
    let mut copy = (*form).clone();
    copy.is_macro = true;
    Rc::new(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use basil_base::Pos;

    fn sym_value(interner: &mut Interner, text: &str) -> Value {
        let s = interner.intern(text);
        Value::symbol(Pos::default(), s)
    }

    #[test]
    fn term_forms_are_not_invokable() {
        let f = Form::term();
        assert!(!f.is_invokable());
        assert_eq!(f.kind, FormKind::Term);
    }

    #[test]
    fn prefix_callable_matches_name_then_args() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let f = f_callable(0, Assoc::Right, [P_SELF, p_var(x)]);
        assert!(f.has_prefix_case());
        assert!(!f.has_infix_case());

        let mut machine = f.start();
        assert!(!machine.is_finished());
        machine.advance(&sym_value(&mut interner, "f"));
        assert!(!machine.is_finished());
        assert!(machine.matching().is_none());
        machine.advance(&Value::int(Pos::default(), 1));
        assert!(machine.is_finished());
        assert!(machine.matching().is_some());
    }

    #[test]
    fn infix_callable_matches_lhs_name_rhs() {
        let mut interner = Interner::new();
        let (x, y) = (interner.intern("x"), interner.intern("y"));
        let f = f_callable(40, Assoc::Left, [p_var(x), P_SELF, p_var(y)]);
        assert!(f.has_infix_case());
        assert!(!f.has_prefix_case());

        let mut machine = f.start();
        machine.advance(&Value::int(Pos::default(), 1));
        machine.advance(&sym_value(&mut interner, "+"));
        assert!(!machine.is_finished());
        machine.advance(&Value::int(Pos::default(), 2));
        assert!(machine.is_finished());
        assert!(machine.matching().is_some());
    }

    #[test]
    fn keyword_mismatch_stops_the_machine() {
        let mut interner = Interner::new();
        let (then, cond) = (interner.intern("then"), interner.intern("cond"));
        let f = f_callable(0, Assoc::Right, [P_SELF, p_var(cond), p_keyword(then), p_var(cond)]);
        let mut machine = f.start();
        machine.advance(&sym_value(&mut interner, "if"));
        machine.advance(&Value::bool(Pos::default(), true));
        let not_then = sym_value(&mut interner, "otherwise");
        assert!(!machine.precheck_keyword(&not_then));
        machine.advance(&not_then);
        assert!(machine.is_finished());
        assert!(machine.matching().is_none());
    }

    #[test]
    fn keyword_precheck_escapes_variadics() {
        let mut interner = Interner::new();
        let (items, end) = (interner.intern("items"), interner.intern("end"));
        let f = f_callable(0, Assoc::Right, [P_SELF, p_variadic(items), p_keyword(end)]);
        let mut machine = f.start();
        machine.advance(&sym_value(&mut interner, "seq"));
        machine.advance(&Value::int(Pos::default(), 1));
        machine.advance(&Value::int(Pos::default(), 2));
        let end_kw = sym_value(&mut interner, "end");
        assert!(machine.precheck_keyword(&end_kw));
        machine.advance(&end_kw);
        assert!(machine.is_finished());
        assert!(machine.matching().is_some());
    }

    #[test]
    fn trailing_variadics_accept_any_count() {
        let mut interner = Interner::new();
        let items = interner.intern("items");
        let f = f_callable(0, Assoc::Right, [P_SELF, p_variadic(items)]);
        let mut machine = f.start();
        machine.advance(&sym_value(&mut interner, "list"));
        assert!(machine.matching().is_some()); // zero items is fine
        machine.advance(&Value::int(Pos::default(), 1));
        machine.advance(&Value::int(Pos::default(), 2));
        assert!(machine.matching().is_some());
        assert!(!machine.is_finished()); // still accepting
    }

    #[test]
    fn overloaded_picks_the_matching_child() {
        let mut interner = Interner::new();
        let (x, y) = (interner.intern("x"), interner.intern("y"));
        let unary = f_callable(0, Assoc::Right, [P_SELF, p_var(x)]);
        let binary = f_callable(0, Assoc::Right, [P_SELF, p_var(x), p_var(y)]);
        let over = f_overloaded(0, Assoc::Right, [unary, binary], &mut interner).unwrap();

        let mut machine = over.start();
        machine.advance(&sym_value(&mut interner, "f"));
        machine.advance(&Value::int(Pos::default(), 1));
        let m = machine.matching().expect("unary should match");
        assert_eq!(m.params.len(), 2);
        machine.advance(&Value::int(Pos::default(), 2));
        let m = machine.matching().expect("binary should match");
        assert_eq!(m.params.len(), 3);
    }

    #[test]
    fn mangling_collisions_reject_overloads() {
        let mut interner = Interner::new();
        let (x, y) = (interner.intern("x"), interner.intern("y"));
        let a = f_callable(0, Assoc::Right, [P_SELF, p_var(x)]);
        let b = f_callable(0, Assoc::Right, [P_SELF, p_var(y)]);
        // same shape, different names: identical signatures
        assert!(f_overloaded(0, Assoc::Right, [a, b], &mut interner).is_none());
    }

    #[test]
    fn mangling_collapses_trailing_variadics() {
        let mut interner = Interner::new();
        let (x, xs) = (interner.intern("x"), interner.intern("xs"));
        let plain = Callable::new([P_SELF, p_var(x)].into_iter().collect(), None);
        let variadic =
            Callable::new([P_SELF, p_var(x), p_variadic(xs)].into_iter().collect(), None);
        assert_eq!(mangle(&plain, &mut interner), mangle(&variadic, &mut interner));
    }

    #[test]
    fn mangled_signatures_distinguish_keywords() {
        let mut interner = Interner::new();
        let (c, t) = (interner.intern("c"), interner.intern("then"));
        let with_kw =
            Callable::new([P_SELF, p_var(c), p_keyword(t), p_var(c)].into_iter().collect(), None);
        let without =
            Callable::new([P_SELF, p_var(c), p_var(c), p_var(c)].into_iter().collect(), None);
        assert_ne!(mangle(&with_kw, &mut interner), mangle(&without, &mut interner));
    }

    #[test]
    fn form_keys_are_stable_and_distinct() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let a = f_callable(0, Assoc::Right, [P_SELF, p_var(x)]);
        let b = f_callable(0, Assoc::Right, [P_SELF, p_var(x)]);
        let c = f_callable(10, Assoc::Right, [P_SELF, p_var(x)]);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }
}
