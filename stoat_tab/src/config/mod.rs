/*!
Configuration of an engine.

All configuration for an engine is contained within [Config].
The engine clones the configuration it is given; a configuration is inert data.
*/

use crate::structures::sign::System;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The logical system: the sign set and rule subset used.
    pub system: System,

    /// A cap on the count of active branches.
    /// Exceeding the cap ends the build with a resource-exhausted outcome.
    pub max_branches: usize,

    /// A cap on γ-rule firings per universal signed formula per branch.
    /// Exceeding the cap ends the build with a resource-exhausted outcome.
    pub max_instantiations_per_universal: usize,

    /// Prune open branches subsumed by another open branch.
    ///
    /// Subsumption never changes a verdict, only the set of branches reported, at a quadratic comparison cost.
    pub enable_subsumption: bool,
}

impl Config {
    /// The default configuration for the given system.
    pub fn for_system(system: System) -> Self {
        Config {
            system,
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            system: System::Classical,
            max_branches: 100_000,
            max_instantiations_per_universal: 64,
            enable_subsumption: false,
        }
    }
}
