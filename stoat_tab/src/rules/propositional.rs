/*!
Expansions for the propositional connectives.

The definite signs obey the classical signed rules in every system.
`U` obeys the weak Kleene preimage rules: a `U`-signed compound branches over every minimal combination of operand signs whose weak Kleene result is the undefined value --- by infection these are exactly the combinations in which some operand carries `U`, five for each binary connective.
`M` and `N` obey Ferguson's rules, which mirror the classical rules under the `T↔M`, `F↔N` correspondence.

The full table, with `⇒ α{…}` one delta and `⇒ β{…|…}` one delta per alternative:

```none
T:¬A   ⇒ α{F:A}        F:¬A   ⇒ α{T:A}
U:¬A   ⇒ α{U:A}        M:¬A   ⇒ α{N:A}        N:¬A   ⇒ α{M:A}
T:¬¬A  ⇒ α{T:A}        F:¬¬A  ⇒ α{F:A}

T:A∧B  ⇒ α{T:A, T:B}   F:A∧B  ⇒ β{F:A | F:B}
M:A∧B  ⇒ α{M:A, M:B}   N:A∧B  ⇒ β{N:A | N:B}

T:A∨B  ⇒ β{T:A | T:B}  F:A∨B  ⇒ α{F:A, F:B}
M:A∨B  ⇒ β{M:A | M:B}  N:A∨B  ⇒ α{N:A, N:B}

T:A→B  ⇒ β{F:A | T:B}  F:A→B  ⇒ α{T:A, F:B}
M:A→B  ⇒ β{N:A | M:B}  N:A→B  ⇒ α{M:A, N:B}

U:A•B  ⇒ β{U:A,U:B | U:A,T:B | T:A,U:B | U:A,F:B | F:A,U:B}   for • ∈ {∧, ∨, →}
```
*/

use crate::rules::RuleResult;
use crate::structures::formula::Formula;
use crate::structures::sign::Sign;
use crate::structures::signed::SignedFormula;

/// The expansion of a signed connective formula, or `None` when no α/β rule applies (literals and quantifiers).
pub fn expand(signed: &SignedFormula) -> Option<RuleResult> {
    let sign = signed.sign;
    match &signed.formula {
        Formula::Not(operand) => Some(expand_negation(sign, operand)),
        Formula::And(left, right) => Some(expand_conjunction(sign, left, right)),
        Formula::Or(left, right) => Some(expand_disjunction(sign, left, right)),
        Formula::Imp(left, right) => Some(expand_implication(sign, left, right)),
        Formula::Pred { .. } | Formula::RExists { .. } | Formula::RForall { .. } => None,
    }
}

fn expand_negation(sign: Sign, operand: &Formula) -> RuleResult {
    // The definite signs step through a double negation in one go.
    if sign.is_definite() {
        if let Formula::Not(inner) = operand {
            return RuleResult::alpha(vec![SignedFormula::new(sign, (**inner).clone())]);
        }
    }

    RuleResult::alpha(vec![SignedFormula::new(sign.dual(), operand.clone())])
}

fn expand_conjunction(sign: Sign, left: &Formula, right: &Formula) -> RuleResult {
    match sign {
        Sign::T | Sign::M => RuleResult::alpha(vec![
            SignedFormula::new(sign, left.clone()),
            SignedFormula::new(sign, right.clone()),
        ]),

        Sign::F | Sign::N => RuleResult::beta(vec![
            vec![SignedFormula::new(sign, left.clone())],
            vec![SignedFormula::new(sign, right.clone())],
        ]),

        Sign::U => undefined_preimages(left, right),
    }
}

fn expand_disjunction(sign: Sign, left: &Formula, right: &Formula) -> RuleResult {
    match sign {
        Sign::F | Sign::N => RuleResult::alpha(vec![
            SignedFormula::new(sign, left.clone()),
            SignedFormula::new(sign, right.clone()),
        ]),

        Sign::T | Sign::M => RuleResult::beta(vec![
            vec![SignedFormula::new(sign, left.clone())],
            vec![SignedFormula::new(sign, right.clone())],
        ]),

        Sign::U => undefined_preimages(left, right),
    }
}

fn expand_implication(sign: Sign, left: &Formula, right: &Formula) -> RuleResult {
    match sign {
        Sign::F | Sign::N => RuleResult::alpha(vec![
            SignedFormula::new(sign.dual(), left.clone()),
            SignedFormula::new(sign, right.clone()),
        ]),

        Sign::T | Sign::M => RuleResult::beta(vec![
            vec![SignedFormula::new(sign.dual(), left.clone())],
            vec![SignedFormula::new(sign, right.clone())],
        ]),

        Sign::U => undefined_preimages(left, right),
    }
}

/// The five minimal sign combinations under which a weak Kleene binary connective takes the undefined value.
///
/// By infection the connective does not matter: the result is `e` exactly when some operand is `e`, whatever the other operand.
fn undefined_preimages(left: &Formula, right: &Formula) -> RuleResult {
    use crate::structures::signed::SignedFormula as SF;

    RuleResult::beta(vec![
        vec![SF::new(Sign::U, left.clone()), SF::new(Sign::U, right.clone())],
        vec![SF::new(Sign::U, left.clone()), SF::new(Sign::T, right.clone())],
        vec![SF::new(Sign::T, left.clone()), SF::new(Sign::U, right.clone())],
        vec![SF::new(Sign::U, left.clone()), SF::new(Sign::F, right.clone())],
        vec![SF::new(Sign::F, left.clone()), SF::new(Sign::U, right.clone())],
    ])
}
