//! Shared helpers for the integration tests.

use stoat_tab::engine::Engine;
use stoat_tab::parsing;
use stoat_tab::reports::BuildResult;
use stoat_tab::structures::formula::Formula;
use stoat_tab::structures::sign::System;
use stoat_tab::structures::signed::SignedFormula;

/// Parse a formula, panicking on malformed test input.
pub fn parse(text: &str) -> Formula {
    match parsing::parse(text) {
        Ok(formula) => formula,
        Err(e) => panic!("test formula {text:?}: {e}"),
    }
}

/// Build a tableau for the signed formulas under the given system.
pub fn build(system: System, initial: Vec<SignedFormula>) -> BuildResult {
    Engine::new(system).build(initial).expect("build failed")
}

/// Build and insist on a satisfiable result.
pub fn build_sat(system: System, initial: Vec<SignedFormula>) -> BuildResult {
    let result = build(system, initial);
    assert!(result.is_sat(), "expected Sat, got {:?}", result.report());
    result
}

/// Build and insist on an unsatisfiable result.
pub fn build_unsat(system: System, initial: Vec<SignedFormula>) -> BuildResult {
    let result = build(system, initial);
    assert!(result.is_unsat(), "expected Unsat, got {:?}", result.report());
    result
}
