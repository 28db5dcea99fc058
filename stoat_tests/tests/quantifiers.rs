//! Restricted quantifier behaviour: witnesses, instantiation, and the caps.

use stoat_tab::config::Config;
use stoat_tab::engine::Engine;
use stoat_tab::models::extract_all_models;
use stoat_tab::reports::{BuildResult, ExhaustionReason};
use stoat_tab::structures::sign::System;
use stoat_tab::structures::signed::{F, T};
use stoat_tab::structures::truth::TruthValue;

use stoat_tests::{build_sat, build_unsat, parse};

mod witnesses {
    use super::*;

    #[test]
    fn a_true_existential_builds_its_witness() {
        let result = build_sat(System::WKrQ, vec![T(parse("[exists X Student(X)]Human(X)"))]);

        let models = extract_all_models(&result).unwrap();
        assert_eq!(models.len(), 1);

        let model = &models[0];
        assert!(model.domain().contains("c_0"));
        assert_eq!(model.value_of(&parse("Student(c_0)")), TruthValue::True);
        assert_eq!(model.value_of(&parse("Human(c_0)")), TruthValue::True);
    }

    #[test]
    fn witnesses_avoid_constants_already_present() {
        let result = build_sat(
            System::WKrQ,
            vec![
                T(parse("Student(c_0)")),
                T(parse("[exists X Student(X)]Human(X)")),
            ],
        );

        let models = extract_all_models(&result).unwrap();
        // c_0 was taken, so the witness is c_1.
        assert!(models[0].domain().contains("c_1"));
        assert_eq!(models[0].value_of(&parse("Human(c_1)")), TruthValue::True);
    }

    #[test]
    fn a_false_universal_builds_a_counterexample() {
        let result = build_sat(System::WKrQ, vec![F(parse("[forall X Bird(X)]Flies(X)"))]);

        let models = extract_all_models(&result).unwrap();
        let model = &models[0];
        assert_eq!(model.value_of(&parse("Bird(c_0)")), TruthValue::True);
        assert_eq!(model.value_of(&parse("Flies(c_0)")), TruthValue::False);
    }
}

mod instantiation {
    use super::*;

    #[test]
    fn a_universal_meets_its_counterexample() {
        let result = build_unsat(
            System::WKrQ,
            vec![
                T(parse("[forall X Bird(X)]Flies(X)")),
                T(parse("Bird(tweety)")),
                F(parse("Flies(tweety)")),
            ],
        );

        // One instantiation at tweety; both children of the instance close.
        assert_eq!(result.stats().gamma_instantiations, 1);
    }

    #[test]
    fn a_vacuous_universal_is_satisfiable() {
        let result = build_sat(System::WKrQ, vec![T(parse("[forall X Bird(X)]Flies(X)"))]);

        let models = extract_all_models(&result).unwrap();
        assert!(models[0].domain().is_empty());
    }

    #[test]
    fn guards_matter() {
        // A non-bird is no counterexample.
        build_sat(
            System::WKrQ,
            vec![
                T(parse("[forall X Bird(X)]Flies(X)")),
                T(parse("Fish(nemo)")),
                F(parse("Flies(nemo)")),
            ],
        );
    }

    #[test]
    fn universals_refire_as_witnesses_arrive() {
        let result = build_sat(
            System::WKrQ,
            vec![
                T(parse("[forall X Bird(X)]Flies(X)")),
                T(parse("[exists X Bird(X)]Sings(X)")),
            ],
        );

        // The existential's witness lands in the domain before the universal
        // fires, so the universal covers it.
        let models = extract_all_models(&result).unwrap();
        let model = &models[0];
        assert_eq!(model.value_of(&parse("Bird(c_0)")), TruthValue::True);
        assert_eq!(model.value_of(&parse("Sings(c_0)")), TruthValue::True);
        assert_eq!(model.value_of(&parse("Flies(c_0)")), TruthValue::True);
    }

    #[test]
    fn dependent_nesting_runs_into_the_cap() {
        // Every γ instance raises a fresh existential over the new witness, so
        // the chain regenerates itself; the instantiation cap is what stops it.
        let result = stoat_tests::build(
            System::WKrQ,
            vec![
                T(parse("[forall X Person(X)]([exists Y Person(Y)]Knows(Y, X))")),
                T(parse("Person(socrates)")),
            ],
        );

        assert!(matches!(
            result,
            BuildResult::ResourceExhausted {
                reason: ExhaustionReason::InstantiationLimit(_),
                ..
            }
        ));
    }
}

mod caps {
    use super::*;

    #[test]
    fn the_instantiation_cap_reports_exhaustion() {
        let mut config = Config::for_system(System::WKrQ);
        config.max_instantiations_per_universal = 1;

        let result = Engine::from_config(config)
            .build(vec![
                T(parse("[forall X Bird(X)]Flies(X)")),
                T(parse("Bird(huey) & Bird(dewey)")),
            ])
            .unwrap();

        assert!(matches!(
            result,
            BuildResult::ResourceExhausted {
                reason: ExhaustionReason::InstantiationLimit(1),
                ..
            }
        ));
    }

    #[test]
    fn the_branch_cap_reports_exhaustion() {
        let mut config = Config::for_system(System::Classical);
        config.max_branches = 2;

        let result = Engine::from_config(config)
            .build(vec![T(parse("p | q")), T(parse("r | s"))])
            .unwrap();

        assert!(matches!(
            result,
            BuildResult::ResourceExhausted {
                reason: ExhaustionReason::BranchLimit(2),
                ..
            }
        ));
    }
}
