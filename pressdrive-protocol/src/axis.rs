//! Axis identifiers and target bounds shared by both ends of the link

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of actuator axes on the machine
pub const AXIS_COUNT: usize = 6;

/// Identifier of one actuator axis
///
/// Internally a 0-based index; on the wire axes are labelled 1..=6
/// (`P1`..`P6`, `M1`..`M6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisId(u8);

impl AxisId {
    /// Every axis in index order
    pub const ALL: [AxisId; AXIS_COUNT] = [
        AxisId(0),
        AxisId(1),
        AxisId(2),
        AxisId(3),
        AxisId(4),
        AxisId(5),
    ];

    /// Create an axis id from a 0-based index
    pub const fn new(index: usize) -> Option<Self> {
        if index < AXIS_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Create an axis id from its 1-based wire label
    pub const fn from_label(label: u8) -> Option<Self> {
        if label >= 1 && label as usize <= AXIS_COUNT {
            Some(Self(label - 1))
        } else {
            None
        }
    }

    /// Create an axis id from the label digit as typed by the operator
    ///
    /// Returns `None` for non-digits as well as for digits outside 1..=6;
    /// callers that need to tell the two apart check `is_ascii_digit` first.
    pub fn from_digit(digit: char) -> Option<Self> {
        digit
            .to_digit(10)
            .and_then(|d| Self::from_label(d as u8))
    }

    /// 0-based index into per-axis arrays
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based label as printed on the wire
    pub const fn label(self) -> u8 {
        self.0 + 1
    }

    /// Iterate over every axis in index order
    pub fn all() -> impl Iterator<Item = AxisId> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inclusive range of accepted pressure targets (psi)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetRange {
    /// Lowest accepted target
    pub min_psi: f32,
    /// Highest accepted target
    pub max_psi: f32,
}

impl TargetRange {
    /// Create a new target range
    pub const fn new(min_psi: f32, max_psi: f32) -> Self {
        Self { min_psi, max_psi }
    }

    /// Check whether a target lies inside the range
    ///
    /// Bounds are inclusive. NaN is never contained.
    pub fn contains(&self, psi: f32) -> bool {
        psi >= self.min_psi && psi <= self.max_psi
    }

    /// Check that the range itself is well formed
    pub fn is_valid(&self) -> bool {
        self.min_psi.is_finite() && self.max_psi.is_finite() && self.min_psi <= self.max_psi
    }
}
