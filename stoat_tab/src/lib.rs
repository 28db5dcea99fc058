/*!
A library for deciding the satisfiability of propositional and lightly quantified formulas by the method of signed semantic tableaux.

stoat_tab supports three logical systems through one engine: classical two-valued logic, weak Kleene three-valued logic (WK3, on which the undefined value is infectious), and Ferguson's wKrQ (weak Kleene with restricted quantifiers and the epistemic signs `M` and `N`).
On a satisfiable input the engine hands back open branches and explicit models; on an unsatisfiable input, a closed tableau with a contradiction witness on every branch.

# Orientation

The library is designed around a [build](crate::engine::Engine::build): signed formulas go in, a [BuildResult](crate::reports::BuildResult) comes out.

At a high level:
- A [signed formula](crate::structures::signed) is a claim (`T`, `F`, `U`, `M`, `N`) about a [formula](crate::structures::formula).
- The [rules](crate::rules) decompose a signed formula into the claims it commits a branch to.
- A [branch](crate::branch) accumulates claims, notices contradictions through a sign index, and queues what remains to process.
- The [engine](crate::engine) drives branches to closure or saturation; the loop itself is in [procedures].
- [Models](crate::models) are read off open saturated branches.
- The [inference](crate::inference) façade asks the usual questions --- satisfiability, theoremhood, model enumeration, cross-system comparison --- in terms of builds.

Formulas are built [programmatically](crate::structures::formula::Formula) or by [parsing](crate::parsing) the concrete syntax.
Which signs exist, which contradict, and which rules fire is the business of the [system](crate::structures::sign::System) alone; branches and the engine are system-agnostic.

# Examples

+ Modus ponens, as an unsatisfiable signed set:

```rust
use stoat_tab::engine::Engine;
use stoat_tab::parsing::parse;
use stoat_tab::reports::Report;
use stoat_tab::structures::sign::System;
use stoat_tab::structures::signed::{F, T};

let premises = vec![
    T(parse("p -> q").unwrap()),
    T(parse("p").unwrap()),
    F(parse("q").unwrap()),
];

let result = Engine::new(System::Classical).build(premises).unwrap();
assert_eq!(result.report(), Report::Unsatisfiable);
```

+ The gap value escapes classical law:

```rust
use stoat_tab::inference::Inference;
use stoat_tab::parsing::parse;
use stoat_tab::structures::sign::System;

let contradiction = parse("p & ~p").unwrap();

// No classical model, but a WK3 model with p undefined.
assert!(!Inference::new(System::Classical)
    .is_satisfiable(std::slice::from_ref(&contradiction))
    .unwrap());
assert!(Inference::new(System::WK3)
    .is_satisfiable(std::slice::from_ref(&contradiction))
    .unwrap());
```

# Determinism

A build is fully determined by its input and configuration: rule order is the priority tuple (rule class, formula depth, insertion order), branches split depth-first, and fresh constants are allocated least-first.
Identical queries produce identical branch counts, identical model enumeration orders, and identical statistics.
Tests rely on this, and so may you.

# Logs

Calls to [log!](log) are made throughout, under the targets listed in [misc::log].
No implementation is provided; pair the library with [env_logger](https://docs.rs/env_logger/latest/env_logger/) or similar to see them.
*/

pub mod branch;
pub mod config;
pub mod engine;
pub mod inference;
pub mod misc;
pub mod models;
pub mod parsing;
pub mod procedures;
pub mod reports;
pub mod rules;
pub mod structures;
pub mod types;
