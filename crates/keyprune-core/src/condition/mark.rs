use std::ops::{BitAnd, BitOr, Not};

///
/// Mark
///
/// Three-valued feasibility verdict for a predicate over a key range:
/// whether some row in the range can satisfy it, and whether some row can
/// fail it. `(false, false)` never arises from evaluation.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Mark {
    pub can_be_true: bool,
    pub can_be_false: bool,
}

impl Mark {
    /// Identity seed for OR-accumulation over hyper-rectangles.
    pub const CONSIDER_ONLY_BE_TRUE: Self = Self::new(false, true);

    /// Nothing is known; the predicate may go either way.
    pub const UNKNOWN: Self = Self::new(true, true);

    #[must_use]
    pub const fn new(can_be_true: bool, can_be_false: bool) -> Self {
        Self {
            can_be_true,
            can_be_false,
        }
    }

    #[must_use]
    pub const fn negate(self) -> Self {
        Self::new(self.can_be_false, self.can_be_true)
    }

    /// Apply `negate` only when `negated` is set.
    #[must_use]
    pub const fn negate_if(self, negated: bool) -> Self {
        if negated { self.negate() } else { self }
    }

    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        Self::new(
            self.can_be_true && other.can_be_true,
            self.can_be_false || other.can_be_false,
        )
    }

    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self::new(
            self.can_be_true || other.can_be_true,
            self.can_be_false && other.can_be_false,
        )
    }

    /// Both outcomes are possible; further OR-ing cannot change the mark.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.can_be_true && self.can_be_false
    }
}

impl Not for Mark {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl BitAnd for Mark {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for Mark {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}
