/*!
The algorithm for constructing a tableau, factored into a collection of procedures.

- [build](crate::engine::Engine::build) --- the main loop: prime a root branch, then repeatedly pick a branch, pick its best waiting signed formula, and apply the rule for it, until every branch is closed or saturated.
- [subsumption] --- optional pruning of redundant open branches after the loop.
*/

mod build;
pub mod subsumption;
