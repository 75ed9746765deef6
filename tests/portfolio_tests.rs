mod common;

use std::sync::Arc;

use base_compound_actions::actions::portfolio_details::get_portfolio_details;
use base_compound_actions::{ActionErrorKind, ChainError};

use common::*;

#[tokio::test]
async fn test_full_report() {
    let chain = Arc::new(weth_position("1000"));
    let ctx = common::context(&chain);

    let report = get_portfolio_details(&ctx).await.unwrap();
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
    assert_eq!(report.message, expected);
    assert!(report.transactions.is_empty());
}

#[tokio::test]
async fn test_report_without_borrow() {
    let chain = Arc::new(
        FakeChain::mainnet().with_collateral(CBBTC, "cbBTC", 8, "60000", "0.7", "0.5"),
    );
    let ctx = common::context(&chain);

    let report = get_portfolio_details(&ctx).await.unwrap().message;
    assert!(report.contains("### cbBTC\n- **Supply Amount:** 0.50000000\n"));
    assert!(report.contains("### Total Supply Value: $30000.00\n\n"));
    assert!(report.contains("## Borrow Details\n\nNo borrowed assets found in your Compound position.\n\n"));
    assert!(report.ends_with("- **Health Ratio:** inf\n"));
}

#[tokio::test]
async fn test_report_with_empty_market() {
    let chain = Arc::new(FakeChain::mainnet());
    let ctx = common::context(&chain);

    let report = get_portfolio_details(&ctx).await.unwrap().message;
    assert!(report.contains(
        "## Supply Details\n\nNo supplied assets found in your Compound position.\n\n### Total Supply Value: $0.00\n\n"
    ));
}

#[tokio::test]
async fn test_report_skips_assets_unknown_on_testnet() {
    let chain = Arc::new(
        FakeChain::testnet()
            .with_collateral(SEPOLIA_CBETH, "cbETH", 18, "2100", "0.75", "2")
            .with_collateral(WETH, "WETH", 18, "2000", "0.8", "1")
            .with_borrow("500"),
    );
    let ctx = common::context(&chain);

    let report = get_portfolio_details(&ctx).await.unwrap().message;
    assert!(!report.contains("cbETH"));
    assert!(report.contains("### Total Supply Value: $2000.00\n\n"));
    assert!(report.contains("- **Borrow Value:** $500.00\n\n"));
    assert!(report.ends_with("- **Health Ratio:** 3.20\n"));
}

#[tokio::test]
async fn test_report_omits_unregistered_symbol() {
    let chain = Arc::new(
        FakeChain::mainnet()
            .with_collateral(WETH, "WETH", 18, "2000", "0.8", "1")
            .with_collateral(CBETH, "cbETH-legacy", 18, "2000", "0.75", "1")
            .with_borrow("1000"),
    );
    let ctx = common::context(&chain);

    let report = get_portfolio_details(&ctx).await.unwrap().message;
    assert!(!report.contains("cbETH-legacy"));
    assert!(report.contains("### Total Supply Value: $2000.00\n\n"));
    // the omitted entry still counts toward health: (1600 + 1500) / 1000
    assert!(report.ends_with("- **Health Ratio:** 3.10\n"));
}

#[tokio::test]
async fn test_report_failure() {
    let chain = Arc::new(
        weth_position("1000").failing_reads(ChainError::RpcError("503 Service Unavailable".to_string())),
    );
    let ctx = common::context(&chain);

    let err = get_portfolio_details(&ctx).await.unwrap_err();
    assert_eq!(err.kind(), ActionErrorKind::ExternalCallFailed);
    assert_eq!(
        err.to_string(),
        "Error retrieving portfolio details from Compound: RPC error: 503 Service Unavailable"
    );
}
