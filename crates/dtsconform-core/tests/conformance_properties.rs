//! Property tests for the conformance engine and report builder

use dtsconform_core::{
    compare, relate, DeclarationKind, Export, MatchPolicy, Module, RoleLabels, TableOracle,
    TypeRepr,
};
use proptest::prelude::*;

const TYPES: [&str; 5] = [
    "number",
    "string",
    "(x: number) => number",
    "(x: string) => string",
    "{ debug: boolean }",
];

fn build_module(id: &str, prefix: &str, types: &[usize]) -> Module {
    let exports = types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Export::new(
                format!("{prefix}{i}"),
                TypeRepr::new(DeclarationKind::Variable, TYPES[*t]),
            )
        })
        .collect();
    Module::new(id, exports).unwrap()
}

fn module_types() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..TYPES.len(), 0..8)
}

fn table_pairs() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..TYPES.len(), 0..TYPES.len()), 0..10)
}

fn oracle_from(pairs: &[(usize, usize)], reflexive: bool) -> TableOracle {
    let mut oracle = TableOracle::new();
    if reflexive {
        oracle = oracle.reflexive();
    }
    for (s, t) in pairs {
        oracle = oracle.allow(TYPES[*s], TYPES[*t]);
    }
    oracle
}

proptest! {
    #[test]
    fn relation_is_reflexive(types in module_types(), pairs in table_pairs()) {
        let module = build_module("m", "e", &types);
        let oracle = oracle_from(&pairs, true);
        let rel = relate(&module, &module, MatchPolicy::All, &oracle).unwrap();
        prop_assert!(rel.is_submodule);
        prop_assert_eq!(rel.fraction, 1.0);
    }

    #[test]
    fn empty_target_is_vacuously_satisfied(types in module_types(), pairs in table_pairs()) {
        let source = build_module("a", "a", &types);
        let target = Module::empty("b");
        let oracle = oracle_from(&pairs, false);
        for policy in [MatchPolicy::First, MatchPolicy::All] {
            let rel = relate(&source, &target, policy, &oracle).unwrap();
            prop_assert!(rel.is_submodule);
            prop_assert_eq!(rel.fraction, 1.0);
            prop_assert_eq!(rel.total, 0);
        }
    }

    #[test]
    fn fraction_is_bounded(a in module_types(), b in module_types(), pairs in table_pairs()) {
        let source = build_module("a", "a", &a);
        let target = build_module("b", "b", &b);
        let oracle = oracle_from(&pairs, false);
        let rel = relate(&source, &target, MatchPolicy::First, &oracle).unwrap();
        prop_assert!((0.0..=1.0).contains(&rel.fraction));
        prop_assert!(rel.matched_count <= rel.total);
        prop_assert_eq!(rel.total, target.len());
    }

    #[test]
    fn equivalence_decomposes(
        a in module_types(),
        b in module_types(),
        pairs in table_pairs(),
        all in any::<bool>(),
    ) {
        let candidate = build_module("a", "a", &a);
        let reference = build_module("b", "b", &b);
        let oracle = oracle_from(&pairs, true);
        let policy = if all { MatchPolicy::All } else { MatchPolicy::First };
        let report = compare(&candidate, &reference, policy, &oracle, &RoleLabels::default()).unwrap();

        prop_assert_eq!(
            report.equivalence_score,
            report.completeness_fraction * report.soundness_fraction
        );
        prop_assert_eq!(report.equivalence, report.completeness && report.soundness);
        prop_assert_eq!(report.completeness, report.completeness_relation.is_submodule);
        prop_assert_eq!(report.soundness, report.soundness_relation.is_submodule);
    }

    #[test]
    fn adding_source_exports_never_loses_matches(
        a in module_types(),
        extra in module_types(),
        b in module_types(),
        pairs in table_pairs(),
    ) {
        let target = build_module("b", "b", &b);
        let oracle = oracle_from(&pairs, false);

        let smaller = build_module("a", "a", &a);
        let mut grown_types = a.clone();
        grown_types.extend(extra);
        let larger = build_module("a", "a", &grown_types);

        let before = relate(&smaller, &target, MatchPolicy::All, &oracle).unwrap();
        let after = relate(&larger, &target, MatchPolicy::All, &oracle).unwrap();
        prop_assert!(after.matched_count >= before.matched_count);
    }

    #[test]
    fn policies_agree_on_existence(a in module_types(), b in module_types(), pairs in table_pairs()) {
        let source = build_module("a", "a", &a);
        let target = build_module("b", "b", &b);
        let oracle = oracle_from(&pairs, false);

        let first = relate(&source, &target, MatchPolicy::First, &oracle).unwrap();
        let all = relate(&source, &target, MatchPolicy::All, &oracle).unwrap();

        prop_assert_eq!(first.matched_count, all.matched_count);
        prop_assert_eq!(first.fraction, all.fraction);
        prop_assert_eq!(first.is_submodule, all.is_submodule);
        for (name, witness) in &first.witnesses {
            let names = witness.names();
            let all_names = all.witnesses[name].names();
            // The first-match witness is the head of the collect-all list
            prop_assert_eq!(names.first(), all_names.first());
        }
    }
}
