//! Boundary behaviours of the engine, across the three systems.

use stoat_tab::models::extract_all_models;
use stoat_tab::structures::sign::System;
use stoat_tab::structures::signed::{F, M, N, T, U};
use stoat_tab::structures::truth::TruthValue;

use stoat_tests::{build_sat, build_unsat, parse};

mod basic {
    use super::*;

    #[test]
    fn an_empty_input_is_vacuously_satisfiable() {
        for system in [System::Classical, System::WK3, System::WKrQ] {
            let result = build_sat(system, vec![]);
            let models = extract_all_models(&result).unwrap();
            assert_eq!(models.len(), 1);
            assert_eq!(models[0].assignments().count(), 0);
        }
    }

    #[test]
    fn one_literal() {
        let result = build_sat(System::Classical, vec![T(parse("p"))]);
        let models = extract_all_models(&result).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].value_of_name("p"), TruthValue::True);
    }

    #[test]
    fn a_definite_clash_closes_in_every_system() {
        for system in [System::Classical, System::WK3, System::WKrQ] {
            let result = build_unsat(system, vec![T(parse("p")), F(parse("p"))]);
            let stats = result.stats();
            assert_eq!(stats.closures, 1);
        }
    }

    #[test]
    fn a_gap_literal_is_satisfiable() {
        let result = build_sat(System::WK3, vec![U(parse("p"))]);
        let models = extract_all_models(&result).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].value_of_name("p"), TruthValue::Undefined);
    }

    #[test]
    fn the_epistemic_signs_do_not_clash() {
        let result = build_sat(System::WKrQ, vec![M(parse("p")), N(parse("p"))]);

        let models = extract_all_models(&result).unwrap();
        assert_eq!(models.len(), 1);

        let model = &models[0];
        assert_eq!(model.value_of_name("p"), TruthValue::Undefined);
        assert!(model.is_epistemic(&parse("p")));
    }

    #[test]
    fn excluded_middle_is_satisfiable_everywhere() {
        for system in [System::Classical, System::WK3, System::WKrQ] {
            build_sat(system, vec![T(parse("p | ~p"))]);
        }
    }

    #[test]
    fn negation_is_not_read_through_by_closure() {
        // T:¬p and F:p are jointly satisfiable: the contradiction test keys
        // on whole formulas, and the negation rule yields only a duplicate.
        let result = build_sat(System::Classical, vec![T(parse("~p")), F(parse("p"))]);
        let models = extract_all_models(&result).unwrap();
        assert_eq!(models[0].value_of_name("p"), TruthValue::False);
    }
}
