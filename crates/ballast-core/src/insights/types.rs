//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Area of personal finance an insight speaks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    DebtPayoff,
    Leverage,
    PortfolioHealth,
    CashFlow,
    Opportunity,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::DebtPayoff => "debt_payoff",
            InsightCategory::Leverage => "leverage",
            InsightCategory::PortfolioHealth => "portfolio_health",
            InsightCategory::CashFlow => "cash_flow",
            InsightCategory::Opportunity => "opportunity",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debt_payoff" => Ok(InsightCategory::DebtPayoff),
            "leverage" => Ok(InsightCategory::Leverage),
            "portfolio_health" => Ok(InsightCategory::PortfolioHealth),
            "cash_flow" => Ok(InsightCategory::CashFlow),
            "opportunity" => Ok(InsightCategory::Opportunity),
            _ => Err(format!("Unknown insight category: {}", s)),
        }
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Critical,
    /// Something going well
    Positive,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::Positive => "positive",
        }
    }

    /// Numeric priority for ranking (higher = shown first)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Positive => 1,
            Severity::Info => 2,
            Severity::Warning => 3,
            Severity::Critical => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            "positive" => Ok(Severity::Positive),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Identifies the rule that produced an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    GoodVsBadDebt,
    HighInterestDebt,
    MinimumPaymentOnly,
    AnnualInterestCost,
    DebtAboveReturn,
    CreditCardWithInvestments,
    DebtToAssetRatio,
    CryptoConcentration,
    StockConcentration,
    EmergencyBuffer,
    DebtFree,
    RetirementAllocation,
    YearsToRetirement,
    YoungCryptoAllocation,
    LateCareerEquityExposure,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::GoodVsBadDebt => "good_vs_bad_debt",
            RuleId::HighInterestDebt => "high_interest_debt",
            RuleId::MinimumPaymentOnly => "minimum_payment_only",
            RuleId::AnnualInterestCost => "annual_interest_cost",
            RuleId::DebtAboveReturn => "debt_above_return",
            RuleId::CreditCardWithInvestments => "credit_card_with_investments",
            RuleId::DebtToAssetRatio => "debt_to_asset_ratio",
            RuleId::CryptoConcentration => "crypto_concentration",
            RuleId::StockConcentration => "stock_concentration",
            RuleId::EmergencyBuffer => "emergency_buffer",
            RuleId::DebtFree => "debt_free",
            RuleId::RetirementAllocation => "retirement_allocation",
            RuleId::YearsToRetirement => "years_to_retirement",
            RuleId::YoungCryptoAllocation => "young_crypto_allocation",
            RuleId::LateCareerEquityExposure => "late_career_equity_exposure",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single human-readable observation about the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Rule that generated this insight
    pub rule: RuleId,
    pub category: InsightCategory,
    pub severity: Severity,
    /// Short title (e.g., "High-Interest Debt")
    pub title: String,
    pub description: String,
    /// Optional note on what acting on this is worth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl Insight {
    pub fn new(
        rule: RuleId,
        category: InsightCategory,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            category,
            severity,
            title: title.into(),
            description: description.into(),
            impact: None,
        }
    }

    /// Add impact text
    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }
}

/// Format a dollar amount with thousands separators, rounded to whole dollars
pub fn money(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && rounded > 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a ratio (0.25) as a percentage ("25%")
pub fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
