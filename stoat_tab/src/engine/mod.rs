/*!
The engine --- which drives a tableau construction from initial signed formulas to a verdict.

An engine is single-shot: constructed for one query, driven to completion by [build](Engine::build), and consumed.
All state of a build is owned by the engine; independent queries on separate engines share nothing mutable.

# Example

```rust
# use stoat_tab::engine::Engine;
# use stoat_tab::parsing::parse;
# use stoat_tab::reports::Report;
# use stoat_tab::structures::sign::System;
# use stoat_tab::structures::signed::{F, T};
let modus_ponens = vec![
    T(parse("p -> q").unwrap()),
    T(parse("p").unwrap()),
    F(parse("q").unwrap()),
];

let result = Engine::new(System::Classical).build(modus_ponens).unwrap();
assert_eq!(result.report(), Report::Unsatisfiable);
```
*/

use crate::branch::BranchId;
use crate::config::Config;
use crate::structures::sign::System;

mod cancel;
pub use cancel::CancellationToken;

mod counters;
pub use counters::Counters;

/// The tableau construction engine.
///
/// The build loop itself lives with the other algorithm steps, in [procedures](crate::procedures).
#[derive(Clone, Debug)]
pub struct Engine {
    pub(crate) config: Config,
    pub(crate) counters: Counters,
    pub(crate) cancellation: Option<CancellationToken>,
    next_branch_id: BranchId,
}

impl Engine {
    /// An engine for the given system, with the default configuration otherwise.
    pub fn new(system: System) -> Self {
        Self::from_config(Config::for_system(system))
    }

    /// An engine with the given configuration.
    pub fn from_config(config: Config) -> Self {
        Engine {
            config,
            counters: Counters::default(),
            cancellation: None,
            next_branch_id: 0,
        }
    }

    /// Attach a cancellation token, checked once per build-loop iteration.
    pub fn set_cancellation_token(&mut self, token: CancellationToken) {
        self.cancellation = Some(token);
    }

    pub fn system(&self) -> System {
        self.config.system
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The statistics gathered so far.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// A branch identifier never handed out before.
    pub(crate) fn fresh_branch_id(&mut self) -> BranchId {
        let id = self.next_branch_id;
        self.next_branch_id += 1;
        id
    }
}
