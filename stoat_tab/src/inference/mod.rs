/*!
The inference façade --- high-level queries over the engine.

An [Inference] instance owns its configuration and an explicit query cache; there is no global state.
Each operation composes engines with the initial signed formulas its system calls for and interprets the outcome:

- *Satisfiability.* Classically a set of formulas is satisfiable when the all-`T` tableau is.
  In the gap systems a formula is satisfiable when it can take a non-false value, so the sign choices per formula are `{T, U}` (WK3), respectively `{T, M}` (wKrQ), and the query succeeds when some choice vector yields an open tableau.
  Vectors are tried in a fixed order, all-`T` first.
- *Theoremhood.* A formula is a theorem when it cannot fail to be true: classically `F:φ` must close; in WK3 both `F:φ` and `U:φ` must; in wKrQ both `F:φ` and `N:φ` must.
- *Models.* [find_models](Inference::find_models) extracts up to a requested count of models, in the deterministic leftmost-branch order the engine produces.
- *Analysis.* [analyze](Inference::analyze) bundles the verdict, models, and statistics; [analyze_theorem](Inference::analyze_theorem) reports countermodels when a would-be theorem fails; [compare_systems] runs one analysis per supported system.

Boolean queries on a build that ended without a verdict (cancelled, bound tripped) return the [Unresolved](crate::types::err::ErrorKind::Unresolved) error rather than guessing.

# Example

```rust
# use stoat_tab::inference::Inference;
# use stoat_tab::parsing::parse;
# use stoat_tab::structures::sign::System;
let mut classical = Inference::new(System::Classical);

let excluded_middle = parse("p | ~p").unwrap();
assert!(classical.is_theorem(&excluded_middle).unwrap());

// Not so under weak Kleene: p may be undefined.
let mut wk3 = Inference::new(System::WK3);
assert!(!wk3.is_theorem(&excluded_middle).unwrap());
```
*/

use std::collections::HashMap;

use crate::config::Config;
use crate::engine::{Counters, Engine};
use crate::misc::log::targets::{self};
use crate::models::{self, Model};
use crate::reports::{BuildResult, Report};
use crate::structures::formula::Formula;
use crate::structures::sign::{Sign, System};
use crate::structures::signed::SignedFormula;
use crate::types::err::{ErrorKind, UnresolvedKind};

/// How many models [analyze](Inference::analyze) and [analyze_theorem](Inference::analyze_theorem) gather.
const ANALYSIS_MODEL_CAP: usize = 16;

/// The kinds of query the cache distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum QueryKind {
    Satisfiable,
    Theorem,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    system: System,
    kind: QueryKind,
    text: String,
}

/// Hit and miss counts for the façade cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// The full record of a satisfiability analysis.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub system: System,

    pub satisfiable: bool,

    /// Models witnessing satisfiability, when there are any.
    pub models: Vec<Model>,

    /// Statistics of the decisive build.
    pub stats: Counters,

    /// Wall time across every build the analysis ran.
    pub elapsed: std::time::Duration,
}

/// The record of a theoremhood analysis.
#[derive(Clone, Debug)]
pub struct TheoremAnalysis {
    pub system: System,

    pub theorem: bool,

    /// Models refuting the formula, when it is no theorem.
    pub countermodels: Vec<Model>,
}

/// One analysis per supported system, for side-by-side comparison.
#[derive(Clone, Debug)]
pub struct SystemComparison {
    pub classical: Analysis,
    pub wk3: Analysis,
    pub wkrq: Analysis,
}

impl SystemComparison {
    pub fn results(&self) -> [&Analysis; 3] {
        [&self.classical, &self.wk3, &self.wkrq]
    }
}

/// Run [Inference::analyze] under each supported system with default configuration.
pub fn compare_systems(formulas: &[Formula]) -> Result<SystemComparison, ErrorKind> {
    Ok(SystemComparison {
        classical: Inference::new(System::Classical).analyze(formulas)?,
        wk3: Inference::new(System::WK3).analyze(formulas)?,
        wkrq: Inference::new(System::WKrQ).analyze(formulas)?,
    })
}

/// The high-level query interface over the tableau engine.
#[derive(Clone, Debug)]
pub struct Inference {
    config: Config,
    caching: bool,
    cache: HashMap<CacheKey, bool>,
    hits: u64,
    misses: u64,
}

impl Inference {
    /// An inference instance for the given system, caching enabled.
    pub fn new(system: System) -> Self {
        Self::from_config(Config::for_system(system))
    }

    pub fn from_config(config: Config) -> Self {
        Inference {
            config,
            caching: true,
            cache: HashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn system(&self) -> System {
        self.config.system
    }

    /// Enable or disable result caching.
    pub fn set_caching(&mut self, enabled: bool) {
        self.caching = enabled;
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_statistics(&self) -> CacheStatistics {
        CacheStatistics {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.len(),
        }
    }

    /// Whether the formulas are jointly satisfiable under the system's semantics.
    pub fn is_satisfiable(&mut self, formulas: &[Formula]) -> Result<bool, ErrorKind> {
        let key = self.cache_key(QueryKind::Satisfiable, formulas);
        if let Some(answer) = self.cache_lookup(&key) {
            return Ok(answer);
        }

        let mut satisfiable = false;
        self.for_each_choice_vector(formulas, |result| {
            satisfiable |= result.is_sat();
            Ok(!satisfiable)
        })?;

        self.cache_store(key, satisfiable);
        Ok(satisfiable)
    }

    /// Whether the formula evaluates to true under every assignment the system allows.
    pub fn is_theorem(&mut self, formula: &Formula) -> Result<bool, ErrorKind> {
        let formulas = std::slice::from_ref(formula);
        let key = self.cache_key(QueryKind::Theorem, formulas);
        if let Some(answer) = self.cache_lookup(&key) {
            return Ok(answer);
        }

        let mut theorem = true;
        for sign in refuting_signs(self.system()) {
            let result = self.run(vec![SignedFormula::new(*sign, formula.clone())])?;
            if result.is_sat() {
                theorem = false;
                break;
            }
        }

        self.cache_store(key, theorem);
        Ok(theorem)
    }

    /// Up to `max` models of the formulas, in deterministic order.
    ///
    /// Models repeated across sign-choice vectors are reported once.
    pub fn find_models(&mut self, formulas: &[Formula], max: usize) -> Result<Vec<Model>, ErrorKind> {
        let mut found: Vec<Model> = Vec::default();

        self.for_each_choice_vector(formulas, |result| {
            for model in models::extract_all_models(result)? {
                if found.len() == max {
                    return Ok(false);
                }
                if !found.contains(&model) {
                    found.push(model);
                }
            }
            Ok(found.len() < max)
        })?;

        Ok(found)
    }

    /// The full analysis: verdict, witnessing models, and statistics.
    pub fn analyze(&mut self, formulas: &[Formula]) -> Result<Analysis, ErrorKind> {
        let timer = std::time::Instant::now();

        let mut satisfiable = false;
        let mut gathered: Vec<Model> = Vec::default();
        let mut stats = Counters::default();

        self.for_each_choice_vector(formulas, |result| {
            stats = result.stats().clone();
            if result.is_sat() {
                satisfiable = true;
                for model in models::extract_all_models(result)? {
                    if gathered.len() == ANALYSIS_MODEL_CAP {
                        break;
                    }
                    if !gathered.contains(&model) {
                        gathered.push(model);
                    }
                }
                return Ok(false);
            }
            Ok(true)
        })?;

        log::info!(
            target: targets::INFERENCE,
            "{}: analysis of {} formula(s): {}",
            self.system(),
            formulas.len(),
            if satisfiable { "satisfiable" } else { "unsatisfiable" },
        );

        Ok(Analysis {
            system: self.system(),
            satisfiable,
            models: gathered,
            stats,
            elapsed: timer.elapsed(),
        })
    }

    /// Theoremhood with countermodels on failure.
    pub fn analyze_theorem(&mut self, formula: &Formula) -> Result<TheoremAnalysis, ErrorKind> {
        let mut theorem = true;
        let mut countermodels: Vec<Model> = Vec::default();

        for sign in refuting_signs(self.system()) {
            let result = self.run(vec![SignedFormula::new(*sign, formula.clone())])?;
            theorem &= !result.is_sat();

            for model in models::extract_all_models(&result)? {
                if countermodels.len() == ANALYSIS_MODEL_CAP {
                    break;
                }
                if !countermodels.contains(&model) {
                    countermodels.push(model);
                }
            }
        }

        Ok(TheoremAnalysis {
            system: self.system(),
            theorem,
            countermodels,
        })
    }

    /// Run one build over the given initial signed formulas.
    ///
    /// Verdicts pass through; a cancelled or exhausted build becomes the [Unresolved](ErrorKind::Unresolved) error.
    fn run(&self, initial: Vec<SignedFormula>) -> Result<BuildResult, ErrorKind> {
        let result = Engine::from_config(self.config.clone()).build(initial)?;
        match result.report() {
            Report::Satisfiable | Report::Unsatisfiable => Ok(result),
            Report::Cancelled => Err(ErrorKind::Unresolved(UnresolvedKind::Cancelled)),
            Report::ResourceExhausted => {
                Err(ErrorKind::Unresolved(UnresolvedKind::ResourceExhausted))
            }
        }
    }

    /// Drive `visit` over the builds for every sign-choice vector, all-`T` first, until it asks to stop by returning `Ok(false)`.
    ///
    /// Classically there is one choice per formula, hence one build.
    fn for_each_choice_vector(
        &self,
        formulas: &[Formula],
        mut visit: impl FnMut(&BuildResult) -> Result<bool, ErrorKind>,
    ) -> Result<(), ErrorKind> {
        let choices = satisfying_signs(self.system());

        // Digits of an odometer over the choice list, one digit per formula.
        let mut digits = vec![0usize; formulas.len()];

        loop {
            let initial = formulas
                .iter()
                .zip(digits.iter())
                .map(|(formula, digit)| SignedFormula::new(choices[*digit], formula.clone()))
                .collect();

            let result = self.run(initial)?;
            if !visit(&result)? {
                return Ok(());
            }

            // Advance the odometer; done when it wraps around.
            let mut position = digits.len();
            loop {
                match position {
                    0 => return Ok(()),
                    _ => {
                        position -= 1;
                        digits[position] += 1;
                        if digits[position] < choices.len() {
                            break;
                        }
                        digits[position] = 0;
                    }
                }
            }
        }
    }

    fn cache_key(&self, kind: QueryKind, formulas: &[Formula]) -> CacheKey {
        let text = formulas
            .iter()
            .map(Formula::to_string)
            .collect::<Vec<_>>()
            .join(" ; ");
        CacheKey {
            system: self.system(),
            kind,
            text,
        }
    }

    fn cache_lookup(&mut self, key: &CacheKey) -> Option<bool> {
        if !self.caching {
            return None;
        }
        match self.cache.get(key) {
            Some(answer) => {
                self.hits += 1;
                Some(*answer)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn cache_store(&mut self, key: CacheKey, answer: bool) {
        if self.caching {
            self.cache.insert(key, answer);
        }
    }
}

/// The signs a formula may carry for a satisfiability query: the non-false claims of the system.
fn satisfying_signs(system: System) -> &'static [Sign] {
    match system {
        System::Classical => &[Sign::T],
        System::WK3 => &[Sign::T, Sign::U],
        System::WKrQ => &[Sign::T, Sign::M],
    }
}

/// The signs to refute for a theoremhood query.
fn refuting_signs(system: System) -> &'static [Sign] {
    match system {
        System::Classical => &[Sign::F],
        System::WK3 => &[Sign::F, Sign::U],
        System::WKrQ => &[Sign::F, Sign::N],
    }
}

#[cfg(test)]
mod facade_tests {
    use super::*;
    use crate::parsing::parse;

    #[test]
    fn caching_is_observable() {
        let mut inference = Inference::new(System::Classical);
        let formula = parse("p & q").unwrap();

        assert!(inference.is_satisfiable(std::slice::from_ref(&formula)).unwrap());
        assert!(inference.is_satisfiable(std::slice::from_ref(&formula)).unwrap());

        let statistics = inference.cache_statistics();
        assert_eq!(statistics.hits, 1);
        assert_eq!(statistics.misses, 1);
        assert_eq!(statistics.entries, 1);

        inference.clear_cache();
        assert_eq!(inference.cache_statistics().entries, 0);
    }

    #[test]
    fn caching_can_be_disabled() {
        let mut inference = Inference::new(System::Classical);
        inference.set_caching(false);
        let formula = parse("p").unwrap();

        assert!(inference.is_satisfiable(std::slice::from_ref(&formula)).unwrap());
        assert!(inference.is_satisfiable(std::slice::from_ref(&formula)).unwrap());

        let statistics = inference.cache_statistics();
        assert_eq!(statistics.hits, 0);
        assert_eq!(statistics.misses, 0);
    }

    #[test]
    fn sign_choices_per_system() {
        assert_eq!(satisfying_signs(System::Classical), &[Sign::T]);
        assert_eq!(satisfying_signs(System::WK3), &[Sign::T, Sign::U]);
        assert_eq!(satisfying_signs(System::WKrQ), &[Sign::T, Sign::M]);

        assert_eq!(refuting_signs(System::Classical), &[Sign::F]);
        assert_eq!(refuting_signs(System::WK3), &[Sign::F, Sign::U]);
        assert_eq!(refuting_signs(System::WKrQ), &[Sign::F, Sign::N]);
    }
}
