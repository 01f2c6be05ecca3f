//! Multi-debt payoff simulation
//!
//! Month-by-month amortization under a fixed total budget:
//! 1. accrue a month of interest on every debt with a balance
//! 2. pay each debt's minimum in priority order until the budget runs out
//! 3. send whatever is left to the first debt (in priority order) still owing
//!
//! The simulator never reorders debts. Avalanche and snowball differ only in
//! the order their debts are handed in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::models::DebtLiability;

/// Simulation stops after 50 years regardless of remaining balance
pub const MAX_MONTHS: u32 = 600;

/// Remaining totals at or below this count as paid off
pub const PAYOFF_EPSILON: f64 = 0.01;

/// Repayment priority strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffMethod {
    /// Highest interest rate first
    Avalanche,
    /// Smallest balance first
    Snowball,
}

impl PayoffMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffMethod::Avalanche => "avalanche",
            PayoffMethod::Snowball => "snowball",
        }
    }

    /// Arrange debts in this method's priority order (stable for ties)
    pub fn order(&self, debts: &[DebtLiability]) -> Vec<PayoffDebt> {
        let mut ordered: Vec<PayoffDebt> = debts.iter().map(PayoffDebt::from).collect();
        match self {
            PayoffMethod::Avalanche => ordered.sort_by(|a, b| b.rate.total_cmp(&a.rate)),
            PayoffMethod::Snowball => ordered.sort_by(|a, b| a.balance.total_cmp(&b.balance)),
        }
        ordered
    }
}

impl fmt::Display for PayoffMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PayoffMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avalanche" => Ok(PayoffMethod::Avalanche),
            "snowball" => Ok(PayoffMethod::Snowball),
            _ => Err(format!("Unknown payoff method: {}", s)),
        }
    }
}

/// One debt as the simulator sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffDebt {
    pub name: String,
    pub balance: f64,
    /// Annual rate in percent
    pub rate: f64,
    pub minimum_payment: f64,
}

impl From<&DebtLiability> for PayoffDebt {
    fn from(debt: &DebtLiability) -> Self {
        Self {
            name: debt.name.clone(),
            balance: debt.current_balance,
            rate: debt.interest_rate,
            minimum_payment: debt.minimum_payment,
        }
    }
}

/// Result of one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PayoffOutcome {
    pub months: u32,
    pub total_interest: f64,
    /// True when the month cap ended the run with balance still owing
    pub capped: bool,
}

/// Simulate paying `debts` (highest priority first) with a fixed monthly budget
pub fn simulate(debts: &[PayoffDebt], monthly_budget: f64) -> PayoffOutcome {
    if debts.is_empty() || monthly_budget <= 0.0 {
        return PayoffOutcome::default();
    }

    let mut balances: Vec<f64> = debts.iter().map(|d| d.balance).collect();
    let mut months = 0;
    let mut total_interest = 0.0;

    loop {
        let remaining: f64 = balances.iter().sum();
        if remaining <= PAYOFF_EPSILON || months >= MAX_MONTHS {
            break;
        }

        for (balance, debt) in balances.iter_mut().zip(debts) {
            if *balance > 0.0 {
                let interest = *balance * (debt.rate / 100.0 / 12.0);
                *balance += interest;
                total_interest += interest;
            }
        }

        let mut budget = monthly_budget;
        for (balance, debt) in balances.iter_mut().zip(debts) {
            if budget <= 0.0 {
                break;
            }
            if *balance > 0.0 {
                let payment = debt.minimum_payment.min(*balance).min(budget);
                *balance -= payment;
                budget -= payment;
            }
        }

        if budget > 0.0 {
            if let Some(target) = balances.iter_mut().find(|b| **b > 0.0) {
                let payment = budget.min(*target);
                *target -= payment;
            }
        }

        months += 1;
    }

    let capped = months >= MAX_MONTHS && balances.iter().sum::<f64>() > PAYOFF_EPSILON;
    if capped {
        warn!(
            debts = debts.len(),
            monthly_budget, "Payoff simulation hit the month cap"
        );
    } else {
        debug!(debts = debts.len(), months, total_interest, "Payoff simulated");
    }

    PayoffOutcome {
        months,
        total_interest,
        capped,
    }
}

/// Months until every debt is paid, saturating at [`MAX_MONTHS`]
pub fn months_to_payoff(debts: &[PayoffDebt], monthly_budget: f64) -> u32 {
    simulate(debts, monthly_budget).months
}

/// Sum of minimum payments across all debts
pub fn total_monthly_minimum(debts: &[DebtLiability]) -> f64 {
    debts.iter().map(|d| d.minimum_payment).sum()
}

/// A repayment plan under one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffPlan {
    pub method: PayoffMethod,
    /// Debts in priority order
    pub debts: Vec<PayoffDebt>,
    pub total_monthly_minimum: f64,
    pub months_to_payoff: u32,
    pub total_interest_paid: f64,
    #[serde(default)]
    pub capped: bool,
}

impl DebtPayoffPlan {
    /// Order `debts` per `method` and simulate with `monthly_budget`
    pub fn build(method: PayoffMethod, debts: &[DebtLiability], monthly_budget: f64) -> Self {
        let ordered = method.order(debts);
        let outcome = simulate(&ordered, monthly_budget);
        Self {
            method,
            debts: ordered,
            total_monthly_minimum: monthly_budget,
            months_to_payoff: outcome.months,
            total_interest_paid: outcome.total_interest,
            capped: outcome.capped,
        }
    }
}

/// Avalanche and snowball plans over the same debts and budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffComparison {
    pub avalanche: DebtPayoffPlan,
    pub snowball: DebtPayoffPlan,
}

impl PayoffComparison {
    /// Build both plans; `None` when there are no debts
    pub fn from_debts(debts: &[DebtLiability]) -> Option<Self> {
        if debts.is_empty() {
            return None;
        }

        let budget = total_monthly_minimum(debts);
        Some(Self {
            avalanche: DebtPayoffPlan::build(PayoffMethod::Avalanche, debts, budget),
            snowball: DebtPayoffPlan::build(PayoffMethod::Snowball, debts, budget),
        })
    }

    /// Interest avoided by choosing avalanche over snowball
    pub fn interest_saved(&self) -> f64 {
        self.snowball.total_interest_paid - self.avalanche.total_interest_paid
    }

    /// The plan that finishes first, or `None` on a tie
    pub fn faster_method(&self) -> Option<PayoffMethod> {
        use std::cmp::Ordering;
        match self
            .avalanche
            .months_to_payoff
            .cmp(&self.snowball.months_to_payoff)
        {
            Ordering::Less => Some(PayoffMethod::Avalanche),
            Ordering::Greater => Some(PayoffMethod::Snowball),
            Ordering::Equal => None,
        }
    }
}
