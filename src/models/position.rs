use alloy::primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Borrow leg of a position, in human units and USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowDetails {
    pub symbol: String,
    pub amount: Decimal,
    pub price: Decimal,
}

impl BorrowDetails {
    pub fn value(&self) -> Decimal {
        self.amount * self.price
    }
}

/// One supplied collateral asset, in human units and USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyDetail {
    pub asset: Address,
    pub symbol: String,
    pub amount: Decimal,
    pub price: Decimal,
    /// Borrow collateral factor as a fraction in [0, 1].
    pub collateral_factor: Decimal,
}

impl SupplyDetail {
    pub fn value(&self) -> Decimal {
        self.amount * self.price
    }

    /// Value counted toward borrowing capacity.
    pub fn adjusted_value(&self) -> Decimal {
        self.value() * self.collateral_factor
    }
}

/// A wallet's current state in one market. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub borrow: BorrowDetails,
    pub supplies: Vec<SupplyDetail>,
}

impl Position {
    pub fn collateral_value(&self) -> Decimal {
        self.supplies.iter().map(SupplyDetail::adjusted_value).sum()
    }
}
