//! # basil-types
//!
//! The structural type system underpinning Basil's mixed-mode evaluator.
//!
//! Types are hash-consed: building the same structural type twice yields
//! the same opaque [`Type`] handle, so equality is handle equality. The
//! [`TypeStore`] owns the table plus all type-variable state, and exposes
//! the two coercion relations (`coerces_to`, `coerces_to_generic`) with
//! their binding-suppressed variants, `lower` for producing runtime
//! counterparts, and concreteness/soft-equality queries.
//!
//! This crate depends only on `basil-base` and knows nothing about values,
//! forms, or evaluation.

pub mod store;

pub use store::{
    FormKey, Kind, Type, TypeStore, T_ANY, T_BOOL, T_CHAR, T_DOUBLE, T_ERROR, T_FLOAT, T_INT,
    T_MODULE, T_STRING, T_SYMBOL, T_TYPE, T_UNDEFINED, T_VOID,
};

#[cfg(test)]
mod tests {
    use super::*;
    use basil_base::Symbol;

    #[test]
    fn primitives_have_fixed_handles() {
        let ts = TypeStore::new();
        assert_eq!(ts.kind(T_VOID), Kind::Void);
        assert_eq!(ts.kind(T_INT), Kind::Int);
        assert_eq!(ts.kind(T_FLOAT), Kind::Float);
        assert_eq!(ts.kind(T_DOUBLE), Kind::Double);
        assert_eq!(ts.kind(T_SYMBOL), Kind::Symbol);
        assert_eq!(ts.kind(T_STRING), Kind::String);
        assert_eq!(ts.kind(T_CHAR), Kind::Char);
        assert_eq!(ts.kind(T_BOOL), Kind::Bool);
        assert_eq!(ts.kind(T_TYPE), Kind::Type);
        assert_eq!(ts.kind(T_ERROR), Kind::Error);
        assert_eq!(ts.kind(T_MODULE), Kind::Module);
        assert_eq!(ts.kind(T_ANY), Kind::Any);
        assert_eq!(ts.kind(T_UNDEFINED), Kind::Undefined);
    }

    #[test]
    fn hash_consing_returns_identical_handles() {
        let mut ts = TypeStore::new();
        let a = ts.list(T_INT);
        let b = ts.list(T_INT);
        assert_eq!(a, b);

        let t1 = ts.tuple(vec![T_INT, T_STRING]);
        let t2 = ts.tuple(vec![T_INT, T_STRING]);
        assert_eq!(t1, t2);
        assert_ne!(t1, ts.tuple(vec![T_STRING, T_INT]));

        let f1 = ts.func(T_INT, T_BOOL);
        let f2 = ts.func(T_INT, T_BOOL);
        assert_eq!(f1, f2);
        assert_ne!(f1, ts.macro_fn(T_INT, T_BOOL));
    }

    #[test]
    fn unions_are_unordered_and_flattened() {
        let mut ts = TypeStore::new();
        let a = ts.union_of([T_INT, T_STRING]);
        let b = ts.union_of([T_STRING, T_INT]);
        assert_eq!(a, b);

        let nested = ts.union_of([a, T_BOOL]);
        let flat = ts.union_of([T_INT, T_STRING, T_BOOL]);
        assert_eq!(nested, flat);
        assert_eq!(ts.union_members(nested).len(), 3);
    }

    #[test]
    fn coercion_is_reflexive_and_any_is_top() {
        let mut ts = TypeStore::new();
        let types = [T_INT, T_STRING, T_BOOL];
        for t in types {
            assert!(ts.coerces_to(t, t));
            assert!(ts.coerces_to(t, T_ANY));
            assert!(ts.coerces_to(t, T_ERROR));
        }
        assert!(!ts.coerces_to(T_STRING, T_INT));
    }

    #[test]
    fn numeric_widening() {
        let mut ts = TypeStore::new();
        assert!(ts.coerces_to(T_INT, T_FLOAT));
        assert!(ts.coerces_to(T_INT, T_DOUBLE));
        assert!(ts.coerces_to(T_FLOAT, T_DOUBLE));
        assert!(!ts.coerces_to(T_DOUBLE, T_FLOAT));
        assert!(!ts.coerces_to(T_FLOAT, T_INT));
        // generic coercion never widens
        assert!(!ts.coerces_to_generic(T_INT, T_FLOAT));
    }

    #[test]
    fn void_coerces_to_lists() {
        let mut ts = TypeStore::new();
        let ints = ts.list(T_INT);
        assert!(ts.coerces_to(T_VOID, ints));
        assert!(ts.coerces_to_generic(T_VOID, ints));
    }

    #[test]
    fn tuple_completeness_rules() {
        let mut ts = TypeStore::new();
        let complete = ts.tuple(vec![T_INT, T_STRING, T_BOOL]);
        let shorter_incomplete = ts.incomplete_tuple(vec![T_INT, T_STRING]);
        let shorter_complete = ts.tuple(vec![T_INT, T_STRING]);
        let longer = ts.tuple(vec![T_INT, T_STRING, T_BOOL, T_CHAR]);

        assert!(ts.coerces_to(complete, shorter_incomplete));
        assert!(!ts.coerces_to(complete, shorter_complete));
        assert!(!ts.coerces_to(complete, longer));
        assert!(!ts.coerces_to(shorter_incomplete, complete));
    }

    #[test]
    fn array_sizing_rules() {
        let mut ts = TypeStore::new();
        let sized = ts.sized_array(T_INT, 3);
        let unsized_ = ts.array(T_INT);
        assert!(ts.coerces_to(sized, unsized_));
        assert!(!ts.coerces_to(unsized_, sized));
    }

    #[test]
    fn any_type_coerces_into_a_union_containing_it() {
        let mut ts = TypeStore::new();
        let u = ts.union_of([T_INT, T_STRING]);
        assert!(ts.coerces_to(T_INT, u));
        assert!(ts.coerces_to(T_STRING, u));
        assert!(!ts.coerces_to(T_BOOL, u));

        let wider = ts.union_of([T_INT, T_STRING, T_BOOL]);
        assert!(ts.coerces_to(u, wider));
        assert!(!ts.coerces_to(wider, u));
    }

    #[test]
    fn intersect_coerces_to_members() {
        let mut ts = TypeStore::new();
        let f1 = ts.func(T_INT, T_INT);
        let f2 = ts.func(T_FLOAT, T_FLOAT);
        let isect = ts.intersect(vec![f1, f2]);
        assert!(ts.coerces_to(isect, f1));
        assert!(ts.coerces_to(isect, f2));
        assert!(ts.intersect_procedural(isect));

        let mixed = ts.intersect(vec![f1, T_INT]);
        assert!(!ts.intersect_procedural(mixed));
    }

    #[test]
    fn intersect_members_are_deduplicated() {
        let mut ts = TypeStore::new();
        let f1 = ts.func(T_INT, T_INT);
        let isect = ts.intersect(vec![f1, f1]);
        assert_eq!(ts.intersect_members(isect).len(), 1);
    }

    #[test]
    fn runtime_wrapping_is_idempotent() {
        let mut ts = TypeStore::new();
        let rt = ts.runtime(T_INT);
        let rt2 = ts.runtime(rt);
        assert_eq!(rt, rt2);
        assert_eq!(ts.runtime_base(rt), T_INT);
    }

    #[test]
    fn values_lift_into_runtime() {
        let mut ts = TypeStore::new();
        let rt_int = ts.runtime(T_INT);
        assert!(ts.coerces_to(T_INT, rt_int));
        // but generic coercion never lifts
        assert!(!ts.coerces_to_generic(T_INT, rt_int));
    }

    #[test]
    fn unbound_tvar_binds_on_coercion() {
        let mut ts = TypeStore::new();
        let tv = ts.var(Symbol::NONE);
        assert!(!ts.is_concrete(tv));
        assert!(ts.coerces_to(T_INT, tv));
        assert_eq!(ts.tvar_concrete(tv), T_INT);
        assert!(ts.is_concrete(tv));
    }

    #[test]
    fn nonbinding_coercion_suppresses_binding() {
        let mut ts = TypeStore::new();
        let tv = ts.var(Symbol::NONE);
        assert!(ts.nonbinding_coerces_to(T_INT, tv));
        assert_eq!(ts.tvar_concrete(tv), T_UNDEFINED);
    }

    #[test]
    fn isect_mode_stages_bindings_and_commits_on_exit() {
        let mut ts = TypeStore::new();
        let tv = ts.var(Symbol::NONE);
        ts.enable_isect();
        assert!(ts.coerces_to(T_INT, tv));
        assert!(ts.coerces_to(T_STRING, tv));
        // not yet committed
        assert_eq!(ts.tvar_concrete(tv), T_UNDEFINED);
        ts.disable_isect();
        let bound = ts.tvar_concrete(tv);
        assert_eq!(ts.kind(bound), Kind::Intersect);
        let members = ts.intersect_members(bound);
        assert!(members.contains(&T_INT) && members.contains(&T_STRING));
    }

    #[test]
    fn soft_equality_resolves_tvars() {
        let mut ts = TypeStore::new();
        let tv = ts.var(Symbol::NONE);
        ts.bind_tvar(tv, T_INT);
        assert!(ts.soft_eq(tv, T_INT));
        assert!(!ts.soft_eq(tv, T_STRING));
    }

    #[test]
    fn cyclic_tvar_bindings_are_refused() {
        let mut ts = TypeStore::new();
        let a = ts.var(Symbol::NONE);
        let b = ts.var(Symbol::NONE);
        ts.bind_tvar(a, b);
        ts.bind_tvar(b, a); // would close a cycle; refused
        assert_eq!(ts.tvar_concrete(a), T_UNDEFINED);
    }

    #[test]
    fn lower_strips_runtime_and_freshens_any() {
        let mut ts = TypeStore::new();
        let rt = ts.runtime(T_INT);
        assert_eq!(ts.lower(rt), T_INT);

        let lowered_any = ts.lower(T_ANY);
        assert!(ts.is_tvar(lowered_any));

        let anys = ts.list(T_ANY);
        let lowered = ts.lower(anys);
        assert_eq!(ts.kind(lowered), Kind::List);
        assert!(ts.is_tvar(ts.list_element(lowered)));
    }

    #[test]
    fn lower_rejects_compile_time_only_types() {
        let mut ts = TypeStore::new();
        assert_eq!(ts.lower(T_MODULE), T_ERROR);
        let ff = ts.form_fn(2);
        assert_eq!(ts.lower(ff), T_ERROR);
        let mac = ts.macro_fn(T_INT, T_INT);
        assert_eq!(ts.lower(mac), T_ERROR);
        let bad_list = ts.list(T_MODULE);
        assert_eq!(ts.lower(bad_list), T_ERROR);
    }

    #[test]
    fn is_concrete_fails_on_incomplete_shapes() {
        let mut ts = TypeStore::new();
        assert!(!ts.is_concrete(T_ANY));
        assert!(!ts.is_concrete(T_UNDEFINED));
        let inc = ts.incomplete_tuple(vec![T_INT]);
        assert!(!ts.is_concrete(inc));
        let full = ts.tuple(vec![T_INT, T_STRING]);
        assert!(ts.is_concrete(full));
        let holey = ts.list(T_ANY);
        assert!(!ts.is_concrete(holey));
    }

    #[test]
    fn named_types_are_nominal() {
        let mut ts = TypeStore::new();
        let mut interner = basil_base::Interner::new();
        let meters = interner.intern("Meters");
        let feet = interner.intern("Feet");
        let m = ts.named(meters, T_INT);
        let f = ts.named(feet, T_INT);
        assert_ne!(m, f);
        assert!(ts.coerces_to(m, m));
        assert!(!ts.coerces_to(m, f));
        assert!(!ts.coerces_to(m, T_INT));
    }

    #[test]
    fn display_renders_structures() {
        let mut ts = TypeStore::new();
        let interner = basil_base::Interner::new();
        let ints = ts.list(T_INT);
        assert_eq!(ts.display(ints, &interner), "[Int]");
        let f = ts.func(T_INT, T_BOOL);
        assert_eq!(ts.display(f, &interner), "Int -> Bool");
        let tup = ts.tuple(vec![T_INT, T_STRING]);
        assert_eq!(ts.display(tup, &interner), "(Int, String)");
    }
}
