use std::ops::{Add, Neg};

use serde::{Deserialize, Serialize};

/// Rotation state of a piece, or a rotation direction.
///
/// The four values form a cyclic group of order 4 under `+` (addition of
/// quarter turns modulo 4), with [`Rotation::R0`] as the identity and unary
/// `-` as the inverse.
///
/// - `R0`: 0° (spawn orientation)
/// - `Cw`: 90° clockwise
/// - `R180`: 180°
/// - `Ccw`: 270° clockwise (90° counterclockwise)
///
/// # Example
///
/// ```
/// use ztrix_engine::Rotation;
///
/// assert_eq!(Rotation::Cw + Rotation::Cw, Rotation::R180);
/// assert_eq!(Rotation::R180 + Rotation::Cw, Rotation::Ccw);
/// assert_eq!(-Rotation::Cw, Rotation::Ccw);
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[repr(u8)]
pub enum Rotation {
    #[default]
    R0 = 0,
    Cw = 1,
    R180 = 2,
    Ccw = 3,
}

impl Rotation {
    /// Number of rotation states (4).
    pub const LEN: usize = 4;

    /// All rotation states in quarter-turn order.
    pub const ALL: [Self; Self::LEN] = [Self::R0, Self::Cw, Self::R180, Self::Ccw];

    /// Number of clockwise quarter turns this rotation represents (0-3).
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// Builds a rotation from a number of clockwise quarter turns, modulo 4.
    #[must_use]
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Self::R0,
            1 => Self::Cw,
            2 => Self::R180,
            _ => Self::Ccw,
        }
    }

    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    pub(crate) const fn as_usize(self) -> usize {
        self as usize
    }
}

impl Add for Rotation {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl Neg for Rotation {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_quarter_turns(4 - self.quarter_turns())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_group_table() {
        assert_eq!(Rotation::Cw + Rotation::Cw, Rotation::R180);
        assert_eq!(Rotation::Ccw + Rotation::Ccw, Rotation::R180);
        assert_eq!(Rotation::R180 + Rotation::R180, Rotation::R0);
        assert_eq!(Rotation::R180 + Rotation::Cw, Rotation::Ccw);
        assert_eq!(Rotation::Cw + Rotation::Ccw, Rotation::R0);
        assert_eq!(Rotation::Ccw + Rotation::R180, Rotation::Cw);
    }

    #[test]
    fn test_identity_and_inverse() {
        for r in Rotation::ALL {
            assert_eq!(r + Rotation::R0, r);
            assert_eq!(Rotation::R0 + r, r);
            assert_eq!(r + -r, Rotation::R0);
        }
        assert_eq!(-Rotation::R0, Rotation::R0);
        assert_eq!(-Rotation::Cw, Rotation::Ccw);
        assert_eq!(-Rotation::R180, Rotation::R180);
        assert_eq!(-Rotation::Ccw, Rotation::Cw);
    }

    #[test]
    fn test_quarter_turns() {
        for (i, r) in Rotation::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(r.quarter_turns()), i);
            assert_eq!(Rotation::from_quarter_turns(r.quarter_turns()), r);
            assert_eq!(Rotation::from_quarter_turns(r.quarter_turns() + 4), r);
        }
    }

    fn rotation() -> impl Strategy<Value = Rotation> {
        (0u8..4).prop_map(Rotation::from_quarter_turns)
    }

    proptest! {
        #[test]
        fn plus_is_commutative(a in rotation(), b in rotation()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn plus_is_associative(a in rotation(), b in rotation(), c in rotation()) {
            prop_assert_eq!((a + b) + c, a + (b + c));
        }
    }
}
