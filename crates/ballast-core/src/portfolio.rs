//! Portfolio aggregation
//!
//! Reduces a [`Snapshot`] to the scalar totals every insight rule works from.
//! Mortgages on real estate are netted into equity, so they count toward
//! obligations and the debt-to-asset ratio but never toward `total_debts` or
//! net worth a second time.

use serde::{Deserialize, Serialize};

use crate::models::Snapshot;

/// Annual rate assumed for real-estate mortgages in the weighted average.
/// Actual mortgage rates are not modeled.
pub const MORTGAGE_PLACEHOLDER_RATE: f64 = 6.0;

/// Debts at or above this annual rate are high-interest
pub const HIGH_INTEREST_RATE: f64 = 10.0;

/// Portfolio health summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub total_assets: f64,
    /// Liabilities table only; real-estate mortgages are excluded
    pub total_debts: f64,
    pub total_mortgage_balances: f64,
    /// Debts plus mortgage balances
    pub total_all_obligations: f64,
    pub net_worth: f64,
    pub debt_to_asset_ratio: f64,
    pub weighted_avg_debt_rate: f64,
    pub monthly_debt_payments: f64,
    pub high_interest_debt_total: f64,
    pub good_debt_total: f64,
    pub good_debt_monthly: f64,
    pub bad_debt_total: f64,
    pub bad_debt_monthly: f64,

    pub real_estate_equity: f64,
    pub stocks_value: f64,
    pub crypto_value: f64,
    pub retirement_value: f64,

    /// Filled in from the leverage analysis
    pub annualized_return_pct: f64,
}

impl PortfolioMetrics {
    /// Stocks, crypto and retirement (excludes real estate)
    pub fn investable_assets(&self) -> f64 {
        self.stocks_value + self.crypto_value + self.retirement_value
    }

    /// Stocks plus crypto, the only holdings treated as liquid
    pub fn liquid_assets(&self) -> f64 {
        self.stocks_value + self.crypto_value
    }
}

/// Aggregate a snapshot into portfolio totals
///
/// `annualized_return_pct` is left at zero; the report fills it in.
pub fn aggregate(snapshot: &Snapshot) -> PortfolioMetrics {
    let real_estate_equity: f64 = snapshot.real_estate.iter().map(|h| h.equity()).sum();
    let stocks_value: f64 = snapshot.stocks.iter().map(|s| s.value()).sum();
    let crypto_value: f64 = snapshot.crypto.iter().map(|c| c.value()).sum();
    let retirement_value: f64 = snapshot.retirement.iter().map(|r| r.balance).sum();
    let total_assets = real_estate_equity + stocks_value + crypto_value + retirement_value;

    let total_debts: f64 = snapshot.debts.iter().map(|d| d.current_balance).sum();
    let total_mortgage_balances: f64 = snapshot
        .real_estate
        .iter()
        .map(|h| h.mortgage_balance)
        .sum();
    let total_all_obligations = total_debts + total_mortgage_balances;
    let net_worth = total_assets - total_debts;

    let debt_to_asset_ratio = if total_assets > 0.0 {
        total_all_obligations / total_assets
    } else {
        0.0
    };

    let rate_weighted: f64 = snapshot
        .debts
        .iter()
        .map(|d| d.interest_rate * d.current_balance)
        .sum::<f64>()
        + total_mortgage_balances * MORTGAGE_PLACEHOLDER_RATE;
    let weighted_avg_debt_rate = if total_all_obligations > 0.0 {
        rate_weighted / total_all_obligations
    } else {
        0.0
    };

    let mortgage_payments: f64 = snapshot
        .real_estate
        .iter()
        .filter_map(|h| h.monthly_mortgage_payment)
        .sum();
    let monthly_debt_payments: f64 = snapshot
        .debts
        .iter()
        .map(|d| d.effective_payment())
        .sum::<f64>()
        + mortgage_payments;

    let high_interest_debt_total = snapshot
        .debts
        .iter()
        .filter(|d| d.interest_rate >= HIGH_INTEREST_RATE)
        .map(|d| d.current_balance)
        .sum();

    let (good, bad): (Vec<_>, Vec<_>) = snapshot.debts.iter().partition(|d| d.is_good_debt());
    let good_debt_total =
        good.iter().map(|d| d.current_balance).sum::<f64>() + total_mortgage_balances;
    let good_debt_monthly =
        good.iter().map(|d| d.effective_payment()).sum::<f64>() + mortgage_payments;
    let bad_debt_total = bad.iter().map(|d| d.current_balance).sum();
    let bad_debt_monthly = bad.iter().map(|d| d.effective_payment()).sum();

    PortfolioMetrics {
        total_assets,
        total_debts,
        total_mortgage_balances,
        total_all_obligations,
        net_worth,
        debt_to_asset_ratio,
        weighted_avg_debt_rate,
        monthly_debt_payments,
        high_interest_debt_total,
        good_debt_total,
        good_debt_monthly,
        bad_debt_total,
        bad_debt_monthly,
        real_estate_equity,
        stocks_value,
        crypto_value,
        retirement_value,
        annualized_return_pct: 0.0,
    }
}
