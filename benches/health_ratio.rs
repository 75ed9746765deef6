use alloy::primitives::Address;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

use base_compound_actions::models::{BorrowDetails, Position, SupplyDetail};
use base_compound_actions::services::{
    health_ratio, health_ratio_after_borrow, health_ratio_after_withdraw, PortfolioReport,
    SupplyLine,
};

fn sample_position() -> Position {
    let collateral = [
        ("WETH", Decimal::new(15, 1), Decimal::new(2500, 0), Decimal::new(83, 2)),
        ("cbETH", Decimal::new(2, 0), Decimal::new(2700, 0), Decimal::new(80, 2)),
        ("cbBTC", Decimal::new(5, 2), Decimal::new(61000, 0), Decimal::new(80, 2)),
        ("wstETH", Decimal::new(3, 0), Decimal::new(2900, 0), Decimal::new(80, 2)),
    ];

    Position {
        borrow: BorrowDetails {
            symbol: "usdc".to_string(),
            amount: Decimal::new(4_250_123_456, 6),
            price: Decimal::new(99_990_000, 8),
        },
        supplies: collateral
            .iter()
            .map(|(symbol, amount, price, factor)| SupplyDetail {
                asset: Address::ZERO,
                symbol: symbol.to_string(),
                amount: *amount,
                price: *price,
                collateral_factor: *factor,
            })
            .collect(),
    }
}

fn benchmark_health_ratio(c: &mut Criterion) {
    let position = sample_position();

    c.bench_function("health_ratio", |b| {
        b.iter(|| health_ratio(black_box(&position)))
    });

    c.bench_function("health_ratio_after_borrow", |b| {
        b.iter(|| health_ratio_after_borrow(black_box(&position), black_box(Decimal::new(500, 0))))
    });

    c.bench_function("health_ratio_after_withdraw", |b| {
        b.iter(|| {
            health_ratio_after_withdraw(
                black_box(&position),
                black_box("cbeth"),
                black_box(Decimal::new(5, 1)),
            )
        })
    });
}

fn benchmark_report_rendering(c: &mut Criterion) {
    let position = sample_position();
    let report = PortfolioReport {
        supply_entries: position.supplies.len(),
        supplies: position
            .supplies
            .iter()
            .map(|detail| SupplyLine {
                detail: detail.clone(),
                decimals: 18,
            })
            .collect(),
        borrow: position.borrow.clone(),
        health: health_ratio(&position),
    };

    c.bench_function("portfolio_report_render", |b| {
        b.iter(|| black_box(&report).to_string())
    });
}

criterion_group!(benches, benchmark_health_ratio, benchmark_report_rendering);
criterion_main!(benches);
