/*!
Miscellaneous items related to [logging](log).

Calls to the log macro are made throughout the library.
No log implementation is provided; for details, see [log].

The targets below narrow output to relevant parts of the library.
For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/), logs of closures alone can be requested with `RUST_LOG=closure …`.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to rule application and branch expansion.
    pub const EXPANSION: &str = "expansion";

    /// Logs related to branch closure.
    pub const CLOSURE: &str = "closure";

    /// Logs related to branch creation and splitting.
    pub const BRANCH: &str = "branch";

    /// Logs related to the expansion queue.
    pub const QUEUE: &str = "queue";

    /// Logs related to model extraction.
    pub const MODELS: &str = "models";

    /// Logs related to the inference façade.
    pub const INFERENCE: &str = "inference";
}
