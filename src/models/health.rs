use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;

use crate::utils::math::format_fixed;

/// Collateral-factor-weighted supply value divided by borrow value.
///
/// `Infinite` stands for "nothing borrowed" and compares greater than every
/// finite ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthRatio {
    Finite(Decimal),
    Infinite,
}

impl HealthRatio {
    /// Ratios at or above this value are healthy.
    pub const THRESHOLD: Decimal = Decimal::ONE;

    pub fn from_values(collateral_value: Decimal, borrow_value: Decimal) -> Self {
        if borrow_value.is_zero() {
            return HealthRatio::Infinite;
        }
        // a quotient beyond Decimal range only happens for dust borrows
        HealthRatio::Finite(
            collateral_value
                .checked_div(borrow_value)
                .unwrap_or(Decimal::MAX),
        )
    }

    pub fn is_healthy(&self) -> bool {
        match self {
            HealthRatio::Infinite => true,
            HealthRatio::Finite(ratio) => *ratio >= Self::THRESHOLD,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, HealthRatio::Infinite)
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            HealthRatio::Finite(ratio) => Some(*ratio),
            HealthRatio::Infinite => None,
        }
    }
}

impl Ord for HealthRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (HealthRatio::Infinite, HealthRatio::Infinite) => Ordering::Equal,
            (HealthRatio::Infinite, HealthRatio::Finite(_)) => Ordering::Greater,
            (HealthRatio::Finite(_), HealthRatio::Infinite) => Ordering::Less,
            (HealthRatio::Finite(a), HealthRatio::Finite(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for HealthRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HealthRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthRatio::Infinite => f.write_str("inf"),
            HealthRatio::Finite(ratio) => f.write_str(&format_fixed(*ratio, 2)),
        }
    }
}
