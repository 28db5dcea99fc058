/*!
Truth values, and the weak Kleene operations on them.

Three values are distinguished: true (`t`), false (`f`), and undefined (`e`).
The operations follow the *weak* Kleene scheme, on which `e` is infectious: an operation returns `e` whenever any operand is `e`, and otherwise agrees with the classical operation.

The strong Kleene scheme would fix definite values for several of the `e` cells (`f ∧ e`, `t ∨ e`, and so on).
This library deliberately does not.

# Example

```rust
# use stoat_tab::structures::truth::TruthValue;
use TruthValue::*;

assert_eq!(True.and(False), False);
assert_eq!(False.and(Undefined), Undefined);
assert_eq!(True.or(Undefined), Undefined);
assert_eq!(Undefined.negate(), Undefined);
```
*/

/// A truth value of the three-valued weak Kleene algebra.
///
/// The ordering is incidental (it supports use as a map key) and carries no logical meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TruthValue {
    /// The designated value, `t`.
    True,

    /// The anti-designated value, `f`.
    False,

    /// The undefined (gap) value, `e`.
    Undefined,
}

impl TruthValue {
    /// Whether the value is `t` or `f`.
    pub fn is_definite(self) -> bool {
        !matches!(self, TruthValue::Undefined)
    }

    /// Weak Kleene negation: `¬t = f`, `¬f = t`, `¬e = e`.
    pub fn negate(self) -> Self {
        match self {
            TruthValue::True => TruthValue::False,
            TruthValue::False => TruthValue::True,
            TruthValue::Undefined => TruthValue::Undefined,
        }
    }

    /// Weak Kleene conjunction.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (TruthValue::Undefined, _) | (_, TruthValue::Undefined) => TruthValue::Undefined,
            (TruthValue::True, TruthValue::True) => TruthValue::True,
            _ => TruthValue::False,
        }
    }

    /// Weak Kleene disjunction.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (TruthValue::Undefined, _) | (_, TruthValue::Undefined) => TruthValue::Undefined,
            (TruthValue::False, TruthValue::False) => TruthValue::False,
            _ => TruthValue::True,
        }
    }

    /// Weak Kleene implication, defined as `¬A ∨ B`.
    pub fn implies(self, other: Self) -> Self {
        self.negate().or(other)
    }
}

impl std::fmt::Display for TruthValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TruthValue::True => write!(f, "t"),
            TruthValue::False => write!(f, "f"),
            TruthValue::Undefined => write!(f, "e"),
        }
    }
}

#[cfg(test)]
mod weak_kleene_tests {
    use super::TruthValue::*;

    const VALUES: [super::TruthValue; 3] = [True, False, Undefined];

    #[test]
    fn negation_table() {
        assert_eq!(True.negate(), False);
        assert_eq!(False.negate(), True);
        assert_eq!(Undefined.negate(), Undefined);
    }

    #[test]
    fn infection() {
        for value in VALUES {
            assert_eq!(value.and(Undefined), Undefined);
            assert_eq!(Undefined.and(value), Undefined);
            assert_eq!(value.or(Undefined), Undefined);
            assert_eq!(Undefined.or(value), Undefined);
            assert_eq!(value.implies(Undefined), Undefined);
            assert_eq!(Undefined.implies(value), Undefined);
        }
    }

    #[test]
    fn classical_fragment() {
        assert_eq!(True.and(True), True);
        assert_eq!(True.and(False), False);
        assert_eq!(False.and(False), False);

        assert_eq!(True.or(False), True);
        assert_eq!(False.or(False), False);

        assert_eq!(True.implies(False), False);
        assert_eq!(False.implies(False), True);
        assert_eq!(False.implies(True), True);
        assert_eq!(True.implies(True), True);
    }

    #[test]
    fn implication_is_material() {
        for a in VALUES {
            for b in VALUES {
                assert_eq!(a.implies(b), a.negate().or(b));
            }
        }
    }
}
