//! Leverage analysis
//!
//! Converts the equity portfolio's total gain into an annualized return so it
//! can be compared against debt interest rates in the same unit (annual %).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DebtType, Snapshot};

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// A debt costing more per year than the portfolio earns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAboveReturn {
    pub name: String,
    pub debt_type: DebtType,
    pub balance: f64,
    pub rate: f64,
    /// Rate minus annualized return, in percentage points
    pub spread: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeverageAnalysis {
    pub total_gain: f64,
    pub total_cost_basis: f64,
    /// Holding period of the oldest stock, never less than one year
    pub holding_years: f64,
    pub annualized_return_pct: f64,
    pub debts_above_return: Vec<DebtAboveReturn>,
    /// Open credit-card balances
    pub credit_card_balance: f64,
    /// Whether any stocks or crypto with value are held
    pub holds_investments: bool,
}

impl LeverageAnalysis {
    /// Carrying card debt while holding investments
    pub fn credit_card_while_investing(&self) -> bool {
        self.credit_card_balance > 0.0 && self.holds_investments
    }

    /// Whether a return estimate exists to compare debts against
    pub fn has_return_estimate(&self) -> bool {
        self.total_cost_basis > 0.0
    }
}

/// Annualize a total return over `years`
pub fn annualized_return(total_gain: f64, total_cost_basis: f64, years: f64) -> f64 {
    if total_cost_basis <= 0.0 {
        return 0.0;
    }
    let growth = 1.0 + total_gain / total_cost_basis;
    (growth.powf(1.0 / years) - 1.0) * 100.0
}

pub fn analyze(snapshot: &Snapshot, now: DateTime<Utc>) -> LeverageAnalysis {
    let total_gain: f64 = snapshot.stocks.iter().map(|s| s.gain()).sum();
    let total_cost_basis: f64 = snapshot.stocks.iter().map(|s| s.cost()).sum();

    let holding_years = snapshot
        .stocks
        .iter()
        .map(|s| s.created_at)
        .min()
        .map(|earliest| (now - earliest).num_seconds() as f64 / SECONDS_PER_YEAR)
        .unwrap_or(1.0)
        .max(1.0);

    let annualized_return_pct = annualized_return(total_gain, total_cost_basis, holding_years);

    let debts_above_return = if total_cost_basis > 0.0 {
        snapshot
            .debts
            .iter()
            .filter(|d| d.is_active() && d.interest_rate > annualized_return_pct)
            .map(|d| DebtAboveReturn {
                name: d.name.clone(),
                debt_type: d.debt_type,
                balance: d.current_balance,
                rate: d.interest_rate,
                spread: d.interest_rate - annualized_return_pct,
            })
            .collect()
    } else {
        Vec::new()
    };

    let credit_card_balance = snapshot
        .debts
        .iter()
        .filter(|d| d.debt_type == DebtType::CreditCard)
        .map(|d| d.current_balance)
        .sum();

    let holds_investments = snapshot.stocks.iter().any(|s| s.value() > 0.0)
        || snapshot.crypto.iter().any(|c| c.value() > 0.0);

    LeverageAnalysis {
        total_gain,
        total_cost_basis,
        holding_years,
        annualized_return_pct,
        debts_above_return,
        credit_card_balance,
        holds_investments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{crypto, debt, fixed_now, stock_at};

    #[test]
    fn test_no_stocks_has_zero_return() {
        let snapshot = Snapshot {
            debts: vec![debt("Car", DebtType::AutoLoan, 10_000.0, 6.0, 250.0)],
            ..Default::default()
        };
        let analysis = analyze(&snapshot, fixed_now());

        assert_eq!(analysis.annualized_return_pct, 0.0);
        assert_eq!(analysis.holding_years, 1.0);
        // Nothing to compare against
        assert!(analysis.debts_above_return.is_empty());
    }

    #[test]
    fn test_annualized_over_two_years() {
        let snapshot = Snapshot {
            stocks: vec![stock_at("VTI", 10.0, 100.0, Some(121.0), 2024)],
            ..Default::default()
        };
        let analysis = analyze(&snapshot, fixed_now());

        assert!((analysis.total_gain - 210.0).abs() < 1e-9);
        assert!((analysis.holding_years - 2.0).abs() < 0.01);
        // 21% total over two years is ~10% per year
        assert!((analysis.annualized_return_pct - 10.0).abs() < 0.05);
    }

    #[test]
    fn test_recent_purchase_uses_one_year_floor() {
        let snapshot = Snapshot {
            stocks: vec![stock_at("QQQ", 1.0, 100.0, Some(130.0), 2025)],
            ..Default::default()
        };
        let analysis = analyze(&snapshot, fixed_now());
        assert_eq!(analysis.holding_years, 1.0);
        assert!((analysis.annualized_return_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_flags_debts_above_return() {
        let snapshot = Snapshot {
            stocks: vec![stock_at("VTI", 10.0, 100.0, Some(108.0), 2025)],
            debts: vec![
                debt("Card", DebtType::CreditCard, 2_000.0, 21.0, 60.0),
                debt("Federal", DebtType::StudentLoan, 15_000.0, 4.0, 150.0),
                debt("Paid off", DebtType::PersonalLoan, 0.0, 15.0, 0.0),
            ],
            ..Default::default()
        };
        let analysis = analyze(&snapshot, fixed_now());

        assert_eq!(analysis.debts_above_return.len(), 1);
        let flagged = &analysis.debts_above_return[0];
        assert_eq!(flagged.name, "Card");
        assert!((flagged.spread - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_credit_card_flag_independent_of_return() {
        let snapshot = Snapshot {
            crypto: vec![crypto(5_000.0)],
            debts: vec![debt("Card", DebtType::CreditCard, 800.0, 0.0, 25.0)],
            ..Default::default()
        };
        let analysis = analyze(&snapshot, fixed_now());

        assert!(analysis.debts_above_return.is_empty());
        assert!(analysis.credit_card_while_investing());
    }

    #[test]
    fn test_annualized_return_zero_cost_basis() {
        assert_eq!(annualized_return(500.0, 0.0, 3.0), 0.0);
    }
}
