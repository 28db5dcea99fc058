/*!
Expansions for the restricted quantifiers.

An instance of `[∃X φ(X)]ψ(X)` at a constant `c` is the conjunction `φ(c) ∧ ψ(c)`, and an instance of `[∀X φ(X)]ψ(X)` is the implication `φ(c) → ψ(c)`.
A signed quantifier distributes its sign onto instances, and the style of the rule follows from whether the signed instance calls for a witness:

- δ (fresh constant, once per signed formula per branch): `T`/`M` on `∃` --- a witness making guard and body hold --- and `F`/`N` on `∀` --- a counterexample whose guard holds while its body fails.
  The delta is the α expansion of the signed instance at the witness, added directly.
- γ (instantiation over the branch domain, re-fired as the domain grows): the remaining signs.
  The delta adds the signed instance *formula* for each constant, and the ordinary connective rules take it from there.

Both styles are α-shaped: a quantifier rule never splits a branch by itself.
*/

use crate::rules::RuleResult;
use crate::structures::formula::Formula;
use crate::structures::sign::Sign;
use crate::structures::signed::SignedFormula;
use crate::structures::term::Term;

/// The δ expansion of a signed quantifier at a fresh witness constant.
///
/// `None` when the signed formula is not δ-classified.
pub fn expand_delta(signed: &SignedFormula, witness: &Term) -> Option<RuleResult> {
    let sign = signed.sign;
    match &signed.formula {
        Formula::RExists {
            variable,
            guard,
            body,
        } if matches!(sign, Sign::T | Sign::M) => Some(RuleResult::alpha(vec![
            SignedFormula::new(sign, guard.substitute(variable, witness)),
            SignedFormula::new(sign, body.substitute(variable, witness)),
        ])),

        Formula::RForall {
            variable,
            guard,
            body,
        } if matches!(sign, Sign::F | Sign::N) => Some(RuleResult::alpha(vec![
            SignedFormula::new(sign.dual(), guard.substitute(variable, witness)),
            SignedFormula::new(sign, body.substitute(variable, witness)),
        ])),

        _ => None,
    }
}

/// The γ expansion of a signed quantifier over the given constants.
///
/// One delta carrying the signed instance formula per constant; an empty constant list yields an empty delta, a no-op on the branch.
/// `None` when the signed formula is not γ-classified.
pub fn expand_gamma(signed: &SignedFormula, constants: &[Term]) -> Option<RuleResult> {
    let sign = signed.sign;
    match &signed.formula {
        Formula::RForall {
            variable,
            guard,
            body,
        } if matches!(sign, Sign::T | Sign::M) => {
            let instances = constants
                .iter()
                .map(|constant| {
                    SignedFormula::new(
                        sign,
                        Formula::imp(
                            guard.substitute(variable, constant),
                            body.substitute(variable, constant),
                        ),
                    )
                })
                .collect();
            Some(RuleResult::alpha(instances))
        }

        Formula::RExists {
            variable,
            guard,
            body,
        } if matches!(sign, Sign::F | Sign::N) => {
            let instances = constants
                .iter()
                .map(|constant| {
                    SignedFormula::new(
                        sign,
                        Formula::and(
                            guard.substitute(variable, constant),
                            body.substitute(variable, constant),
                        ),
                    )
                })
                .collect();
            Some(RuleResult::alpha(instances))
        }

        _ => None,
    }
}
