/*!
Subsumption elimination over open branches.

A branch whose signed-formula set includes another open branch's set carries strictly more commitments: any model it yields, the smaller branch yields too.
The larger branch is redundant and may be pruned.

Pruning never changes a verdict --- it runs only once every branch is closed or saturated, and only removes open branches while at least one remains.
The comparison is quadratic in the count of open branches, which is why it is off by default.
*/

use crate::branch::Branch;
use crate::engine::Counters;
use crate::misc::log::targets::{self};

/// Remove every open branch subsumed by another, preserving the order of the survivors.
pub fn prune(open: Vec<Branch>, counters: &mut Counters) -> Vec<Branch> {
    let mut survivors: Vec<Branch> = Vec::with_capacity(open.len());

    for (index, branch) in open.iter().enumerate() {
        let redundant = open.iter().enumerate().any(|(other_index, other)| {
            if index == other_index {
                return false;
            }
            // On equal sets the earlier branch survives.
            match other.subset_of(branch) {
                true if branch.subset_of(other) => other_index < index,
                subsumes => subsumes,
            }
        });

        match redundant {
            true => {
                log::trace!(target: targets::BRANCH, "Branch {} subsumed", branch.id());
                counters.subsumption_eliminations += 1;
            }
            false => survivors.push(branch.clone()),
        }
    }

    survivors
}

#[cfg(test)]
mod subsumption_tests {
    use super::*;
    use crate::structures::formula::Formula;
    use crate::structures::sign::System;
    use crate::structures::signed::T;

    fn branch_with(id: u64, names: &[&str]) -> Branch {
        let mut branch = Branch::new(id, System::Classical);
        for name in names {
            branch.add(T(Formula::atom(*name).unwrap()));
        }
        branch
    }

    #[test]
    fn supersets_are_pruned() {
        let small = branch_with(0, &["p"]);
        let large = branch_with(1, &["p", "q"]);

        let mut counters = Counters::default();
        let survivors = prune(vec![small, large], &mut counters);

        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].id(), 0);
        assert_eq!(counters.subsumption_eliminations, 1);
    }

    #[test]
    fn incomparable_branches_survive() {
        let left = branch_with(0, &["p"]);
        let right = branch_with(1, &["q"]);

        let mut counters = Counters::default();
        let survivors = prune(vec![left, right], &mut counters);

        assert_eq!(survivors.len(), 2);
        assert_eq!(counters.subsumption_eliminations, 0);
    }

    #[test]
    fn equal_branches_keep_the_first() {
        let one = branch_with(0, &["p"]);
        let two = branch_with(1, &["p"]);

        let mut counters = Counters::default();
        let survivors = prune(vec![one, two], &mut counters);

        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].id(), 0);
    }
}
