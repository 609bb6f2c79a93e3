//! Environments: chained symbol-to-value scopes.
//!
//! An [`Env`] maps symbols to values and chains to a parent. Parents keep
//! back-edges to their children so the whole tree can be torn down at
//! session exit: function closures capture their defining environment,
//! which closes `Rc` cycles that [`unbind`] breaks.

use crate::value::Value;
use basil_base::Symbol;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type EnvRef = Rc<RefCell<Env>>;

/// One scope: local bindings plus the parent chain.
#[derive(Default)]
pub struct Env {
    pub parent: Option<EnvRef>,
    pub values: HashMap<Symbol, Value>,
    pub children: Vec<EnvRef>,
}

/// Creates an empty, parentless environment.
pub fn new_env() -> EnvRef {
    Rc::new(RefCell::new(Env::default()))
}

/// Creates a child of `parent` and records the back-edge.
pub fn extend(parent: &EnvRef) -> EnvRef {
    let child = Rc::new(RefCell::new(Env {
        parent: Some(parent.clone()),
        values: HashMap::new(),
        children: Vec::new(),
    }));
    parent.borrow_mut().children.push(child.clone());
    child
}

/// Defines (or redefines) `name` in `env`'s local scope.
pub fn def(env: &EnvRef, name: Symbol, value: Value) {
    env.borrow_mut().values.insert(name, value);
}

/// Looks up `name`, chaining to parents. Returns a clone of the binding.
pub fn find(env: &EnvRef, name: Symbol) -> Option<Value> {
    let borrowed = env.borrow();
    if let Some(v) = borrowed.values.get(&name) {
        return Some(v.clone());
    }
    let parent = borrowed.parent.clone();
    drop(borrowed);
    parent.and_then(|p| find(&p, name))
}

/// Replaces the binding of `name` wherever it is defined along the chain.
/// Returns `false` if `name` is not defined anywhere.
pub fn set_existing(env: &EnvRef, name: Symbol, value: Value) -> bool {
    let mut borrowed = env.borrow_mut();
    if let Some(slot) = borrowed.values.get_mut(&name) {
        *slot = value;
        return true;
    }
    let parent = borrowed.parent.clone();
    drop(borrowed);
    match parent {
        Some(p) => set_existing(&p, name, value),
        None => false,
    }
}

/// Finds the environment along the chain that defines `name`.
pub fn locate(env: &EnvRef, name: Symbol) -> Option<EnvRef> {
    if env.borrow().values.contains_key(&name) {
        return Some(env.clone());
    }
    let parent = env.borrow().parent.clone();
    parent.and_then(|p| locate(&p, name))
}

/// Copies only the local map, sharing the parent. Used to snapshot scopes
/// (e.g. before a `while` body may lower its variables).
pub fn clone_env(env: &EnvRef) -> EnvRef {
    let borrowed = env.borrow();
    Rc::new(RefCell::new(Env {
        parent: borrowed.parent.clone(),
        values: borrowed.values.clone(),
        children: Vec::new(),
    }))
}

/// Detaches `child` from `parent`'s children list, letting it drop if it
/// is otherwise unreferenced.
pub fn detach(parent: &EnvRef, child: &EnvRef) {
    parent.borrow_mut().children.retain(|c| !Rc::ptr_eq(c, child));
}

/// Breaks parent/child cycles below `env`. Call on the root at teardown.
pub fn unbind(env: &EnvRef) {
    let children: Vec<EnvRef> = std::mem::take(&mut env.borrow_mut().children);
    for child in children {
        unbind(&child);
        child.borrow_mut().parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basil_base::{Interner, Pos};

    #[test]
    fn lookups_chain_to_parents() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let y = interner.intern("y");
        let root = new_env();
        def(&root, x, Value::int(Pos::default(), 1));
        let child = extend(&root);
        def(&child, y, Value::int(Pos::default(), 2));

        assert_eq!(find(&child, x).unwrap().as_int(), Some(1));
        assert_eq!(find(&child, y).unwrap().as_int(), Some(2));
        assert_eq!(find(&root, y), None);
    }

    #[test]
    fn local_definitions_shadow_parents() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let root = new_env();
        def(&root, x, Value::int(Pos::default(), 1));
        let child = extend(&root);
        def(&child, x, Value::int(Pos::default(), 2));
        assert_eq!(find(&child, x).unwrap().as_int(), Some(2));
        assert_eq!(find(&root, x).unwrap().as_int(), Some(1));
    }

    #[test]
    fn set_existing_updates_the_defining_scope() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let root = new_env();
        def(&root, x, Value::int(Pos::default(), 1));
        let child = extend(&root);
        assert!(set_existing(&child, x, Value::int(Pos::default(), 5)));
        assert_eq!(find(&root, x).unwrap().as_int(), Some(5));
        let missing = interner.intern("missing");
        assert!(!set_existing(&child, missing, Value::int(Pos::default(), 0)));
    }

    #[test]
    fn locate_finds_the_defining_env() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let root = new_env();
        def(&root, x, Value::int(Pos::default(), 1));
        let child = extend(&root);
        let found = locate(&child, x).expect("x is defined");
        assert!(Rc::ptr_eq(&found, &root));
    }

    #[test]
    fn clone_env_snapshots_the_local_map() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let root = new_env();
        def(&root, x, Value::int(Pos::default(), 1));
        let snapshot = clone_env(&root);
        def(&root, x, Value::int(Pos::default(), 2));
        assert_eq!(find(&snapshot, x).unwrap().as_int(), Some(1));
    }

    #[test]
    fn unbind_breaks_cycles() {
        let root = new_env();
        let child = extend(&root);
        assert!(child.borrow().parent.is_some());
        unbind(&root);
        assert!(child.borrow().parent.is_none());
        assert!(root.borrow().children.is_empty());
    }
}
