/*!
Branches --- the nodes of the search space.

A branch is a consistent-so-far set of signed formulas together with the machinery for extending it:

- a membership set and an ordered trail (the order in which signed formulas arrived);
- a sign index from each formula to the signs attached to it, giving O(1) closure detection.
  The index is keyed on the *entire* formula: `T:¬p` and `F:p` are distinct keys and never close a branch between them --- they only come to contradict once the negation rule rewrites the former;
- an [ExpansionQueue] holding exactly the signed formulas a rule applies to which have not been processed here;
- a Herbrand domain: the constants seen in formulas on the branch, plus any δ-introduced witnesses;
- δ and γ bookkeeping: which signed formulas have fired their δ-rule (at most once per branch), and which constants each universal has been instantiated at.

A branch is created at the root or by a β-split, and ends closed (a contradictory pair arrived) or saturated (nothing left to process).
A closed branch is never re-opened.
Children of a split are independent copies; cloning is cheap because formulas share structure.
*/

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::misc::log::targets::{self};
use crate::rules::{self, RuleClass};
use crate::structures::formula::Formula;
use crate::structures::sign::{SignSet, System};
use crate::structures::signed::SignedFormula;
use crate::structures::term::Term;

mod queue;
pub use queue::ExpansionQueue;

/// The identifier of a branch, unique within an engine.
pub type BranchId = u64;

/// The result of adding a signed formula to a branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The signed formula was new to the branch.
    Added,

    /// The signed formula was already on the branch; nothing changed.
    Duplicate,

    /// The signed formula contradicts one already present; the branch is now closed.
    Closed,
}

/// A node of the tableau search space.
#[derive(Clone, Debug)]
pub struct Branch {
    id: BranchId,
    system: System,

    /// The branch this one was split from, if any.
    parent: Option<BranchId>,

    /// The signed formula whose β-rule caused the split that created this branch.
    split_on: Option<SignedFormula>,

    members: HashSet<SignedFormula>,
    trail: Vec<SignedFormula>,
    index: HashMap<Formula, SignSet>,
    queue: ExpansionQueue,

    /// Constants seen in formulas on the branch or introduced by δ-rules.
    domain: BTreeSet<String>,

    /// The contradictory pair that closed the branch.
    closure: Option<(SignedFormula, SignedFormula)>,

    saturated: bool,

    /// Signed formulas whose δ-rule has fired on this branch.
    delta_fired: HashSet<SignedFormula>,

    /// For each γ signed formula, the constants already instantiated on this branch.
    gamma_used: HashMap<SignedFormula, BTreeSet<String>>,
}

impl Branch {
    /// A fresh root branch.
    pub fn new(id: BranchId, system: System) -> Self {
        Branch {
            id,
            system,
            parent: None,
            split_on: None,
            members: HashSet::default(),
            trail: Vec::default(),
            index: HashMap::default(),
            queue: ExpansionQueue::default(),
            domain: BTreeSet::default(),
            closure: None,
            saturated: false,
            delta_fired: HashSet::default(),
            gamma_used: HashMap::default(),
        }
    }

    /// An independent copy of the branch, as a child created by splitting on `split_on`.
    pub fn child(&self, id: BranchId, split_on: SignedFormula) -> Self {
        log::trace!(target: targets::BRANCH, "Branch {id} split from {} on {split_on}", self.id);

        Branch {
            id,
            parent: Some(self.id),
            split_on: Some(split_on),
            ..self.clone()
        }
    }

    pub fn id(&self) -> BranchId {
        self.id
    }

    pub fn parent(&self) -> Option<BranchId> {
        self.parent
    }

    pub fn split_on(&self) -> Option<&SignedFormula> {
        self.split_on.as_ref()
    }

    /// Add a signed formula, updating the membership set, trail, sign index, domain, and queue together.
    ///
    /// Closure is checked against the index before anything else happens; a closed branch accepts no further additions.
    pub fn add(&mut self, signed: SignedFormula) -> AddOutcome {
        if self.closure.is_some() {
            return AddOutcome::Closed;
        }
        if self.members.contains(&signed) {
            return AddOutcome::Duplicate;
        }

        let signs = self.index.entry(signed.formula.clone()).or_default();

        if signs.contradicts(signed.sign) {
            // Only T and F contradict, so the witness carries the dual sign.
            let witness = SignedFormula::new(signed.sign.dual(), signed.formula.clone());
            log::trace!(
                target: targets::CLOSURE,
                "Branch {} closed: {witness} against {signed}",
                self.id
            );

            signs.insert(signed.sign);
            self.members.insert(signed.clone());
            self.trail.push(signed.clone());
            self.closure = Some((witness, signed));

            return AddOutcome::Closed;
        }

        signs.insert(signed.sign);
        self.members.insert(signed.clone());
        self.trail.push(signed.clone());

        let mut domain_grew = false;
        for constant in signed.formula.constants() {
            domain_grew |= self.domain.insert(constant);
        }
        if domain_grew {
            self.requeue_universals();
        }

        if let Some(class) = rules::classify(self.system, &signed) {
            self.queue.push(class, signed);
        }

        AddOutcome::Added
    }

    /// The highest-priority unprocessed signed formula, if any.
    pub fn pop_next(&mut self) -> Option<SignedFormula> {
        self.queue.pop()
    }

    pub fn is_closed(&self) -> bool {
        self.closure.is_some()
    }

    /// The contradictory pair that closed the branch.
    pub fn closure(&self) -> Option<&(SignedFormula, SignedFormula)> {
        self.closure.as_ref()
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    pub fn mark_saturated(&mut self) {
        self.saturated = true;
    }

    /// The count of signed formulas on the branch.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, signed: &SignedFormula) -> bool {
        self.members.contains(signed)
    }

    /// The signed formulas on the branch, in arrival order.
    pub fn trail(&self) -> &[SignedFormula] {
        &self.trail
    }

    /// Whether every member of this branch is also on `other`.
    pub fn subset_of(&self, other: &Branch) -> bool {
        self.members.len() <= other.members.len()
            && self.members.iter().all(|signed| other.members.contains(signed))
    }

    /// The signs attached to each formula, in a deterministic order.
    ///
    /// Model extraction reads literals out of this.
    pub fn sign_index(&self) -> BTreeMap<&Formula, SignSet> {
        self.index.iter().map(|(formula, signs)| (formula, *signs)).collect()
    }

    /// The branch's Herbrand domain.
    pub fn domain(&self) -> &BTreeSet<String> {
        &self.domain
    }

    /// The domain as constant terms, in name order.
    pub fn domain_terms(&self) -> Vec<Term> {
        self.domain
            .iter()
            .map(|name| Term::Constant(name.clone()))
            .collect()
    }

    /// Allocate a δ witness: the least `c_k` not already in the branch's constant set.
    ///
    /// The witness joins the domain immediately, so waiting universals re-enter the queue before the witness instances arrive.
    pub fn allocate_witness(&mut self) -> Term {
        let mut k = 0usize;
        let name = loop {
            let candidate = format!("c_{k}");
            if !self.domain.contains(&candidate) {
                break candidate;
            }
            k += 1;
        };

        log::trace!(target: targets::BRANCH, "Branch {} allocates witness {name}", self.id);

        self.domain.insert(name.clone());
        self.requeue_universals();

        Term::Constant(name)
    }

    /// Whether the δ-rule for this signed formula has already fired here.
    pub fn delta_fired(&self, signed: &SignedFormula) -> bool {
        self.delta_fired.contains(signed)
    }

    pub fn note_delta_fired(&mut self, signed: SignedFormula) {
        self.delta_fired.insert(signed);
    }

    /// The domain constants this universal has not yet been instantiated at, in name order.
    pub fn gamma_uninstantiated(&self, signed: &SignedFormula) -> Vec<Term> {
        let used = self.gamma_used.get(signed);
        self.domain
            .iter()
            .filter(|name| !used.is_some_and(|used| used.contains(*name)))
            .map(|name| Term::Constant(name.clone()))
            .collect()
    }

    /// The count of instantiations this universal has made on this branch.
    pub fn gamma_count(&self, signed: &SignedFormula) -> usize {
        self.gamma_used.get(signed).map_or(0, BTreeSet::len)
    }

    /// Record that the universal has been instantiated at the given constants.
    ///
    /// Registers the universal for re-queueing on domain growth even when no constants were available.
    pub fn note_gamma_instantiated(&mut self, signed: &SignedFormula, constants: &[Term]) {
        let used = self.gamma_used.entry(signed.clone()).or_default();
        for constant in constants {
            used.insert(constant.name().to_owned());
        }
    }

    /// Put every universal with outstanding constants back on the queue.
    ///
    /// The map iterates in an unstable order, and the queue breaks ties by
    /// push sequence, so the outstanding universals are ordered --- by depth,
    /// then structurally --- before any sequence numbers are stamped.
    fn requeue_universals(&mut self) {
        let mut outstanding: Vec<SignedFormula> = self
            .gamma_used
            .iter()
            .filter(|(_, used)| self.domain.iter().any(|name| !used.contains(name)))
            .map(|(signed, _)| signed.clone())
            .collect();

        outstanding.sort_by(|a, b| a.depth().cmp(&b.depth()).then_with(|| a.cmp(b)));

        for signed in outstanding {
            log::trace!(target: targets::QUEUE, "Branch {} requeues {signed}", self.id);
            self.queue.push(RuleClass::Gamma, signed);
        }
    }
}

#[cfg(test)]
mod branch_tests {
    use super::*;
    use crate::structures::signed::{F, T, U};

    fn p() -> Formula {
        Formula::atom("p").unwrap()
    }

    fn q() -> Formula {
        Formula::atom("q").unwrap()
    }

    #[test]
    fn closure_on_contradictory_signs() {
        let mut branch = Branch::new(0, System::Classical);

        assert_eq!(branch.add(T(p())), AddOutcome::Added);
        assert_eq!(branch.add(T(q())), AddOutcome::Added);
        assert_eq!(branch.add(F(p())), AddOutcome::Closed);

        assert!(branch.is_closed());
        let (witness, arrival) = branch.closure().unwrap();
        assert_eq!(witness, &T(p()));
        assert_eq!(arrival, &F(p()));
    }

    #[test]
    fn closure_is_not_read_through_negation() {
        let mut branch = Branch::new(0, System::Classical);

        assert_eq!(branch.add(T(Formula::not(p()))), AddOutcome::Added);
        // The index keys on the whole formula, so F:p does not close against T:¬p.
        assert_eq!(branch.add(F(p())), AddOutcome::Added);
        assert!(!branch.is_closed());
    }

    #[test]
    fn gap_signs_never_close() {
        let mut branch = Branch::new(0, System::WK3);

        assert_eq!(branch.add(U(p())), AddOutcome::Added);
        assert_eq!(branch.add(F(p())), AddOutcome::Added);
        assert!(!branch.is_closed());
    }

    #[test]
    fn duplicates_change_nothing() {
        let mut branch = Branch::new(0, System::Classical);

        assert_eq!(branch.add(T(p())), AddOutcome::Added);
        assert_eq!(branch.add(T(p())), AddOutcome::Duplicate);
        assert_eq!(branch.len(), 1);
    }

    #[test]
    fn the_domain_collects_constants() {
        let mut branch = Branch::new(0, System::WKrQ);

        let tweety = Formula::pred("Bird", vec![Term::constant("tweety").unwrap()]).unwrap();
        branch.add(T(tweety));

        assert!(branch.domain().contains("tweety"));
    }

    #[test]
    fn witnesses_are_least_unused() {
        let mut branch = Branch::new(0, System::WKrQ);

        assert_eq!(branch.allocate_witness(), Term::Constant("c_0".to_owned()));
        assert_eq!(branch.allocate_witness(), Term::Constant("c_1".to_owned()));

        let c_2 = Formula::pred("Seen", vec![Term::constant("c_2").unwrap()]).unwrap();
        branch.add(T(c_2));
        assert_eq!(branch.allocate_witness(), Term::Constant("c_3".to_owned()));
    }

    #[test]
    fn children_are_independent() {
        let mut parent = Branch::new(0, System::Classical);
        parent.add(T(p()));

        let mut child = parent.child(1, T(Formula::or(p(), q())));
        child.add(T(q()));

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert_eq!(child.parent(), Some(0));
    }

    #[test]
    fn queue_only_holds_rule_bearing_formulas() {
        let mut branch = Branch::new(0, System::Classical);

        branch.add(T(p()));
        assert_eq!(branch.pop_next(), None);

        let compound = T(Formula::and(p(), q()));
        branch.add(compound.clone());
        assert_eq!(branch.pop_next(), Some(compound));
        assert_eq!(branch.pop_next(), None);
    }

    #[test]
    fn requeued_universals_come_back_in_a_fixed_order() {
        let mut branch = Branch::new(0, System::WKrQ);

        let universal = |guard: &str, body: &str| {
            let x = Term::variable("X").unwrap();
            T(Formula::rforall(
                "X",
                Formula::pred(guard, vec![x.clone()]).unwrap(),
                Formula::pred(body, vec![x]).unwrap(),
            )
            .unwrap())
        };

        let first = universal("P", "Q");
        let second = universal("R", "S");
        let third = universal("V", "W");

        // Register each as an instantiated universal with nothing waiting.
        for signed in [&third, &first, &second] {
            branch.add(signed.clone());
            assert_eq!(branch.pop_next().as_ref(), Some(signed));
            branch.note_gamma_instantiated(signed, &[]);
        }

        // A fresh witness re-queues all three at once. Their depths are
        // equal, so the pop order is down to the re-queue pass, which must
        // not follow map iteration order.
        branch.allocate_witness();

        assert_eq!(branch.pop_next(), Some(first));
        assert_eq!(branch.pop_next(), Some(second));
        assert_eq!(branch.pop_next(), Some(third));
        assert_eq!(branch.pop_next(), None);
    }
}
