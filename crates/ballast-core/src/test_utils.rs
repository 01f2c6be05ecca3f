//! Test utilities for ballast-core
//!
//! Terse builders for snapshot entities so tests can describe a portfolio in a
//! few lines. Timestamps are pinned to [`fixed_now`] so holding periods are
//! reproducible.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{
    CryptoHolding, DebtLiability, DebtType, RealEstateHolding, RetirementAccount, Snapshot,
    StockHolding,
};

/// Reference "now" used across tests: 2026-01-01T00:00:00Z
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// January 1st of the given year, UTC
pub fn jan_first(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()
}

pub fn debt(
    name: &str,
    debt_type: DebtType,
    balance: f64,
    rate: f64,
    minimum: f64,
) -> DebtLiability {
    DebtLiability {
        name: name.to_string(),
        debt_type,
        current_balance: balance,
        interest_rate: rate,
        minimum_payment: minimum,
        monthly_payment: None,
    }
}

pub fn house(value: f64, mortgage: f64, payment: Option<f64>) -> RealEstateHolding {
    RealEstateHolding {
        name: "Home".to_string(),
        estimated_value: value,
        mortgage_balance: mortgage,
        monthly_mortgage_payment: payment,
    }
}

/// A stock bought on January 1st of `year`
pub fn stock_at(
    symbol: &str,
    shares: f64,
    cost_basis: f64,
    current_price: Option<f64>,
    year: i32,
) -> StockHolding {
    StockHolding {
        symbol: symbol.to_string(),
        shares,
        cost_basis,
        current_price,
        created_at: jan_first(year),
    }
}

/// A stock position worth exactly `value` with no gain
pub fn stock(value: f64) -> StockHolding {
    stock_at("VTI", 1.0, value, None, 2024)
}

/// A crypto position worth exactly `value` with no gain
pub fn crypto(value: f64) -> CryptoHolding {
    CryptoHolding {
        symbol: "BTC".to_string(),
        quantity: 1.0,
        cost_basis: value,
        current_price: None,
        created_at: jan_first(2024),
    }
}

pub fn retirement(balance: f64) -> RetirementAccount {
    RetirementAccount {
        name: "401k".to_string(),
        balance,
        contributions: None,
    }
}

/// A snapshot holding only investable assets
pub fn investments(stocks: f64, crypto_value: f64, retirement_balance: f64) -> Snapshot {
    let mut snapshot = Snapshot::default();
    if stocks > 0.0 {
        snapshot.stocks.push(stock(stocks));
    }
    if crypto_value > 0.0 {
        snapshot.crypto.push(crypto(crypto_value));
    }
    if retirement_balance > 0.0 {
        snapshot.retirement.push(retirement(retirement_balance));
    }
    snapshot
}
