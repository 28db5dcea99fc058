/*!
Logical systems, signs, and the relations between signs.

A sign prefixes a formula with a claim about its truth.
The definite signs `T` and `F` claim the formula is true, respectively false.
`U` (weak Kleene only) claims the formula takes the undefined value.
`M` and `N` (wKrQ only) are Ferguson's epistemic signs: `M` claims the formula *may* be true (its value is `t` or `e`), `N` that it *may* fail to be true (`f` or `e`).

Two relations matter to the tableau:

- [contradicts](Sign::contradicts) drives branch closure.
  In every system only `T` and `F` contradict: `U` never participates in closure, and neither `M` nor `N` contradicts anything --- not each other, and not the definite signs.
  `{M:p, N:p}` is a coherent epistemic state.
- [dual](Sign::dual) is the involution used by the negation rules: `T ↔ F`, `U ↔ U`, `M ↔ N`.

The projection [truth_value](Sign::truth_value) collapses `U`, `M`, and `N` to the undefined value; it is lossy, and model extraction preserves the originating signs alongside it.
*/

use crate::structures::truth::TruthValue;

/// A logical system supported by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum System {
    /// Classical two-valued propositional logic.
    Classical,

    /// Weak Kleene three-valued logic.
    WK3,

    /// Ferguson's weak Kleene logic with restricted quantifiers and epistemic signs.
    WKrQ,
}

impl System {
    /// The signs belonging to the system.
    pub fn signs(self) -> &'static [Sign] {
        match self {
            System::Classical => &[Sign::T, Sign::F],
            System::WK3 => &[Sign::T, Sign::F, Sign::U],
            System::WKrQ => &[Sign::T, Sign::F, Sign::M, Sign::N],
        }
    }

    /// Whether the sign belongs to the system.
    pub fn admits(self, sign: Sign) -> bool {
        self.signs().contains(&sign)
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            System::Classical => write!(f, "classical"),
            System::WK3 => write!(f, "wk3"),
            System::WKrQ => write!(f, "wkrq"),
        }
    }
}

/// A sign prefixed to a formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// The formula is true.
    T,

    /// The formula is false.
    F,

    /// The formula takes the undefined value (WK3).
    U,

    /// The formula may be true: value `t` or `e` (wKrQ).
    M,

    /// The formula may fail to be true: value `f` or `e` (wKrQ).
    N,
}

impl Sign {
    /// Whether the two signs close a branch when attached to the same formula.
    ///
    /// Symmetric, and true exactly for the pair `{T, F}`.
    pub fn contradicts(self, other: Sign) -> bool {
        matches!((self, other), (Sign::T, Sign::F) | (Sign::F, Sign::T))
    }

    /// The dual sign, used by the negation rules. An involution.
    pub fn dual(self) -> Sign {
        match self {
            Sign::T => Sign::F,
            Sign::F => Sign::T,
            Sign::U => Sign::U,
            Sign::M => Sign::N,
            Sign::N => Sign::M,
        }
    }

    /// The projection onto truth values: `T ↦ t`, `F ↦ f`, and the rest to `e`.
    pub fn truth_value(self) -> TruthValue {
        match self {
            Sign::T => TruthValue::True,
            Sign::F => TruthValue::False,
            Sign::U | Sign::M | Sign::N => TruthValue::Undefined,
        }
    }

    /// Whether the sign is `T` or `F`.
    pub fn is_definite(self) -> bool {
        matches!(self, Sign::T | Sign::F)
    }

    /// Whether the sign is `M` or `N`.
    pub fn is_epistemic(self) -> bool {
        matches!(self, Sign::M | Sign::N)
    }

    /// Whether a model in which the formula evaluates to `value` honours the sign.
    ///
    /// `T` demands `t`, `F` demands `f`, `U` demands `e`, while `M` accepts `t` or `e` and `N` accepts `f` or `e`.
    pub fn admits_value(self, value: TruthValue) -> bool {
        match self {
            Sign::T => value == TruthValue::True,
            Sign::F => value == TruthValue::False,
            Sign::U => value == TruthValue::Undefined,
            Sign::M => value != TruthValue::False,
            Sign::N => value != TruthValue::True,
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::T => write!(f, "T"),
            Sign::F => write!(f, "F"),
            Sign::U => write!(f, "U"),
            Sign::M => write!(f, "M"),
            Sign::N => write!(f, "N"),
        }
    }
}

/// A small set of signs, used by the branch index and by model extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignSet(u8);

impl SignSet {
    const ORDER: [Sign; 5] = [Sign::T, Sign::F, Sign::U, Sign::M, Sign::N];

    fn bit(sign: Sign) -> u8 {
        match sign {
            Sign::T => 1,
            Sign::F => 1 << 1,
            Sign::U => 1 << 2,
            Sign::M => 1 << 3,
            Sign::N => 1 << 4,
        }
    }

    pub fn insert(&mut self, sign: Sign) {
        self.0 |= Self::bit(sign);
    }

    pub fn contains(&self, sign: Sign) -> bool {
        self.0 & Self::bit(sign) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The signs in the set, in the fixed order `T, F, U, M, N`.
    pub fn iter(&self) -> impl Iterator<Item = Sign> + '_ {
        Self::ORDER.into_iter().filter(|sign| self.contains(*sign))
    }

    /// Whether some sign in the set contradicts `sign`.
    pub fn contradicts(&self, sign: Sign) -> bool {
        self.iter().any(|present| present.contradicts(sign))
    }

    /// Whether a single truth value honours every sign in the set.
    ///
    /// A branch may be open under the closure relation while attaching, say, `U` and `F` to the same atom; no valuation honours such a set, and model extraction skips the branch.
    pub fn admits_common_value(&self) -> bool {
        use TruthValue::*;
        self.is_empty() || [True, False, Undefined].into_iter().any(|value| {
            self.iter().all(|sign| sign.admits_value(value))
        })
    }
}

impl std::iter::FromIterator<Sign> for SignSet {
    fn from_iter<I: IntoIterator<Item = Sign>>(iter: I) -> Self {
        let mut set = SignSet::default();
        for sign in iter {
            set.insert(sign);
        }
        set
    }
}
