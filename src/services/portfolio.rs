use alloy::primitives::Address;
use rust_decimal::Decimal;
use std::fmt;
use tracing::warn;

use super::health_ratio::health_ratio;
use super::position_reader::PositionReader;
use crate::blockchain::AssetRegistry;
use crate::error::{EngineError, RegistryError};
use crate::models::{AssetId, BorrowDetails, HealthRatio, SupplyDetail};
use crate::utils::math::format_fixed;

/// A supply entry with the display precision of its asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyLine {
    pub detail: SupplyDetail,
    pub decimals: u8,
}

/// Markdown summary of a Compound position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioReport {
    /// Entries the market reported before registry filtering.
    pub supply_entries: usize,
    pub supplies: Vec<SupplyLine>,
    pub borrow: BorrowDetails,
    pub health: HealthRatio,
}

impl PortfolioReport {
    pub fn total_supply_value(&self) -> Decimal {
        self.supplies.iter().map(|line| line.detail.value()).sum()
    }
}

impl fmt::Display for PortfolioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("# Portfolio Details\n\n")?;

        f.write_str("## Supply Details\n\n")?;
        if self.supply_entries == 0 {
            f.write_str("No supplied assets found in your Compound position.\n\n")?;
        }
        for line in &self.supplies {
            let supply = &line.detail;
            writeln!(f, "### {}", supply.symbol)?;
            writeln!(
                f,
                "- **Supply Amount:** {}",
                format_fixed(supply.amount, u32::from(line.decimals))
            )?;
            writeln!(f, "- **Price:** ${}", format_fixed(supply.price, 2))?;
            writeln!(
                f,
                "- **Collateral Factor:** {}",
                format_fixed(supply.collateral_factor, 2)
            )?;
            write!(f, "- **Asset Value:** ${}\n\n", format_fixed(supply.value(), 2))?;
        }
        write!(
            f,
            "### Total Supply Value: ${}\n\n",
            format_fixed(self.total_supply_value(), 2)
        )?;

        f.write_str("## Borrow Details\n\n")?;
        if self.borrow.amount > Decimal::ZERO {
            writeln!(f, "### {}", self.borrow.symbol)?;
            writeln!(f, "- **Borrow Amount:** {}", format_fixed(self.borrow.amount, 6))?;
            writeln!(f, "- **Price:** ${}", format_fixed(self.borrow.price, 2))?;
            write!(f, "- **Borrow Value:** ${}\n\n", format_fixed(self.borrow.value(), 2))?;
        } else {
            f.write_str("No borrowed assets found in your Compound position.\n\n")?;
        }

        f.write_str("## Overall Health\n\n")?;
        writeln!(f, "- **Health Ratio:** {}", self.health)
    }
}

/// Fetch the position once and build the report from it.
pub async fn portfolio_details(
    positions: &PositionReader<'_>,
    registry: &dyn AssetRegistry,
    comet: Address,
    account: Address,
) -> Result<PortfolioReport, EngineError> {
    let position = positions.position(comet, account).await?;
    let health = health_ratio(&position);

    let mut supplies = Vec::with_capacity(position.supplies.len());
    for detail in &position.supplies {
        match registry
            .fetch(positions.network(), &AssetId::symbol(&detail.symbol))
            .await
        {
            Ok(asset) => supplies.push(SupplyLine {
                detail: detail.clone(),
                decimals: asset.decimals,
            }),
            Err(RegistryError::NotFound(_)) => {
                warn!(symbol = %detail.symbol, "Omitting supply entry missing from registry");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(PortfolioReport {
        supply_entries: position.supplies.len(),
        supplies,
        borrow: position.borrow,
        health,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn weth_line() -> SupplyLine {
        SupplyLine {
            detail: SupplyDetail {
                asset: Address::ZERO,
                symbol: "WETH".to_string(),
                amount: dec("1"),
                price: dec("2000"),
                collateral_factor: dec("0.8"),
            },
            decimals: 18,
        }
    }

    #[test]
    fn test_render_full_report() {
        let report = PortfolioReport {
            supply_entries: 1,
            supplies: vec![weth_line()],
            borrow: BorrowDetails {
                symbol: "usdc".to_string(),
                amount: dec("1000"),
                price: dec("1"),
            },
            health: HealthRatio::Finite(dec("1.6")),
        };

        let expected = "# Portfolio Details\n\n\
            ## Supply Details\n\n\
            ### WETH\n\
            - **Supply Amount:** 1.000000000000000000\n\
            - **Price:** $2000.00\n\
            - **Collateral Factor:** 0.80\n\
            - **Asset Value:** $2000.00\n\n\
            ### Total Supply Value: $2000.00\n\n\
            ## Borrow Details\n\n\
            ### usdc\n\
            - **Borrow Amount:** 1000.000000\n\
            - **Price:** $1.00\n\
            - **Borrow Value:** $1000.00\n\n\
            ## Overall Health\n\n\
            - **Health Ratio:** 1.60\n";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_render_empty_position() {
        let report = PortfolioReport {
            supply_entries: 0,
            supplies: vec![],
            borrow: BorrowDetails {
                symbol: "usdc".to_string(),
                amount: Decimal::ZERO,
                price: dec("1"),
            },
            health: HealthRatio::Infinite,
        };

        let rendered = report.to_string();
        assert!(rendered.contains("No supplied assets found in your Compound position.\n\n"));
        assert!(rendered.contains("### Total Supply Value: $0.00\n\n"));
        assert!(rendered.contains("No borrowed assets found in your Compound position.\n\n"));
        assert!(rendered.ends_with("- **Health Ratio:** inf\n"));
    }
}
