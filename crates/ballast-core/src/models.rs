//! Domain models for Ballast
//!
//! Every type here is an immutable value snapshot supplied by the host. The
//! engine reads these and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Student loans at or below this annual rate count as good debt
pub const GOOD_STUDENT_LOAN_MAX_RATE: f64 = 7.0;

/// A property with an optional mortgage against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstateHolding {
    #[serde(default)]
    pub name: String,
    pub estimated_value: f64,
    #[serde(default)]
    pub mortgage_balance: f64,
    #[serde(default)]
    pub monthly_mortgage_payment: Option<f64>,
}

impl RealEstateHolding {
    /// Estimated value net of the mortgage (may be negative when underwater)
    pub fn equity(&self) -> f64 {
        self.estimated_value - self.mortgage_balance
    }
}

/// A stock or fund position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHolding {
    pub symbol: String,
    pub shares: f64,
    /// Cost basis per share
    pub cost_basis: f64,
    #[serde(default)]
    pub current_price: Option<f64>,
    /// When the position was opened
    pub created_at: DateTime<Utc>,
}

impl StockHolding {
    /// Current price, falling back to cost basis when no quote is available
    pub fn price(&self) -> f64 {
        self.current_price.unwrap_or(self.cost_basis)
    }

    pub fn value(&self) -> f64 {
        self.shares * self.price()
    }

    pub fn cost(&self) -> f64 {
        self.shares * self.cost_basis
    }

    /// Unrealized gain; zero when no quote is available
    pub fn gain(&self) -> f64 {
        (self.price() - self.cost_basis) * self.shares
    }
}

/// A crypto position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoHolding {
    pub symbol: String,
    pub quantity: f64,
    /// Cost basis per coin
    pub cost_basis: f64,
    #[serde(default)]
    pub current_price: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl CryptoHolding {
    pub fn price(&self) -> f64 {
        self.current_price.unwrap_or(self.cost_basis)
    }

    pub fn value(&self) -> f64 {
        self.quantity * self.price()
    }
}

/// A retirement account (401k, IRA, pension)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementAccount {
    #[serde(default)]
    pub name: String,
    pub balance: f64,
    #[serde(default)]
    pub contributions: Option<f64>,
}

impl RetirementAccount {
    /// Growth above contributions, when contributions are known
    pub fn growth(&self) -> Option<f64> {
        self.contributions.map(|c| self.balance - c)
    }
}

/// Kinds of debt tracked in the liabilities table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    StudentLoan,
    AutoLoan,
    PersonalLoan,
    Mortgage,
    Medical,
    Other,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::StudentLoan => "student_loan",
            Self::AutoLoan => "auto_loan",
            Self::PersonalLoan => "personal_loan",
            Self::Mortgage => "mortgage",
            Self::Medical => "medical",
            Self::Other => "other",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::StudentLoan => "Student Loan",
            Self::AutoLoan => "Auto Loan",
            Self::PersonalLoan => "Personal Loan",
            Self::Mortgage => "Mortgage",
            Self::Medical => "Medical",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for DebtType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit_card" | "creditcard" => Ok(Self::CreditCard),
            "student_loan" | "studentloan" => Ok(Self::StudentLoan),
            "auto_loan" | "autoloan" => Ok(Self::AutoLoan),
            "personal_loan" | "personalloan" => Ok(Self::PersonalLoan),
            "mortgage" => Ok(Self::Mortgage),
            "medical" => Ok(Self::Medical),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown debt type: {}", s)),
        }
    }
}

impl std::fmt::Display for DebtType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A debt in the liabilities table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtLiability {
    pub name: String,
    pub debt_type: DebtType,
    pub current_balance: f64,
    /// Annual interest rate in percent (e.g. 19.99)
    pub interest_rate: f64,
    pub minimum_payment: f64,
    /// Actual monthly payment, when it differs from the minimum
    #[serde(default)]
    pub monthly_payment: Option<f64>,
}

impl DebtLiability {
    /// What actually gets paid each month
    pub fn effective_payment(&self) -> f64 {
        self.monthly_payment.unwrap_or(self.minimum_payment)
    }

    /// Mortgages, and student loans at or below 7%, are good debt
    pub fn is_good_debt(&self) -> bool {
        match self.debt_type {
            DebtType::Mortgage => true,
            DebtType::StudentLoan => self.interest_rate <= GOOD_STUDENT_LOAN_MAX_RATE,
            _ => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.current_balance > 0.0
    }

    /// Interest accrued over a year at the current balance
    pub fn annual_interest(&self) -> f64 {
        self.current_balance * self.interest_rate / 100.0
    }
}

/// Everything the engine needs to know about a person's finances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub real_estate: Vec<RealEstateHolding>,
    #[serde(default)]
    pub stocks: Vec<StockHolding>,
    #[serde(default)]
    pub crypto: Vec<CryptoHolding>,
    #[serde(default)]
    pub retirement: Vec<RetirementAccount>,
    #[serde(default)]
    pub debts: Vec<DebtLiability>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.real_estate.is_empty()
            && self.stocks.is_empty()
            && self.crypto.is_empty()
            && self.retirement.is_empty()
            && self.debts.is_empty()
    }

    /// Reject non-finite numbers and negative amounts, naming the first offending field
    pub fn validate(&self) -> Result<()> {
        for (i, h) in self.real_estate.iter().enumerate() {
            check_amount(|| format!("real_estate[{}].estimated_value", i), h.estimated_value)?;
            check_amount(|| format!("real_estate[{}].mortgage_balance", i), h.mortgage_balance)?;
            check_optional(
                || format!("real_estate[{}].monthly_mortgage_payment", i),
                h.monthly_mortgage_payment,
            )?;
        }

        for (i, s) in self.stocks.iter().enumerate() {
            check_amount(|| format!("stocks[{}].shares", i), s.shares)?;
            check_amount(|| format!("stocks[{}].cost_basis", i), s.cost_basis)?;
            check_optional(|| format!("stocks[{}].current_price", i), s.current_price)?;
        }

        for (i, c) in self.crypto.iter().enumerate() {
            check_amount(|| format!("crypto[{}].quantity", i), c.quantity)?;
            check_amount(|| format!("crypto[{}].cost_basis", i), c.cost_basis)?;
            check_optional(|| format!("crypto[{}].current_price", i), c.current_price)?;
        }

        for (i, r) in self.retirement.iter().enumerate() {
            check_amount(|| format!("retirement[{}].balance", i), r.balance)?;
            check_optional(|| format!("retirement[{}].contributions", i), r.contributions)?;
        }

        for (i, d) in self.debts.iter().enumerate() {
            check_amount(|| format!("debts[{}].current_balance", i), d.current_balance)?;
            check_amount(|| format!("debts[{}].interest_rate", i), d.interest_rate)?;
            check_amount(|| format!("debts[{}].minimum_payment", i), d.minimum_payment)?;
            check_optional(|| format!("debts[{}].monthly_payment", i), d.monthly_payment)?;
        }

        Ok(())
    }
}

fn check_amount(field: impl FnOnce() -> String, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid_snapshot(field(), "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::invalid_snapshot(
            field(),
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(())
}

fn check_optional(field: impl FnOnce() -> String, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) => check_amount(field, v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn debt(debt_type: DebtType, rate: f64) -> DebtLiability {
        DebtLiability {
            name: "test".to_string(),
            debt_type,
            current_balance: 1000.0,
            interest_rate: rate,
            minimum_payment: 25.0,
            monthly_payment: None,
        }
    }

    #[test]
    fn test_debt_type_as_str() {
        assert_eq!(DebtType::CreditCard.as_str(), "credit_card");
        assert_eq!(DebtType::StudentLoan.as_str(), "student_loan");
        assert_eq!(DebtType::Other.as_str(), "other");
    }

    #[test]
    fn test_debt_type_from_str() {
        assert_eq!(
            "credit_card".parse::<DebtType>().unwrap(),
            DebtType::CreditCard
        );
        assert_eq!("MORTGAGE".parse::<DebtType>().unwrap(), DebtType::Mortgage);
        assert!("payday".parse::<DebtType>().is_err());
    }

    #[test]
    fn test_debt_type_serde() {
        let json = serde_json::to_string(&DebtType::AutoLoan).unwrap();
        assert_eq!(json, r#""auto_loan""#);

        let parsed: DebtType = serde_json::from_str(r#""personal_loan""#).unwrap();
        assert_eq!(parsed, DebtType::PersonalLoan);
    }

    #[test]
    fn test_good_debt_classification() {
        assert!(debt(DebtType::Mortgage, 9.0).is_good_debt());
        assert!(debt(DebtType::StudentLoan, 7.0).is_good_debt());
        assert!(!debt(DebtType::StudentLoan, 7.01).is_good_debt());
        assert!(!debt(DebtType::CreditCard, 0.0).is_good_debt());
        assert!(!debt(DebtType::AutoLoan, 3.0).is_good_debt());
        assert!(!debt(DebtType::Medical, 0.0).is_good_debt());
    }

    #[test]
    fn test_effective_payment_defaults_to_minimum() {
        let mut d = debt(DebtType::CreditCard, 20.0);
        assert_eq!(d.effective_payment(), 25.0);
        d.monthly_payment = Some(100.0);
        assert_eq!(d.effective_payment(), 100.0);
    }

    #[test]
    fn test_holding_value_falls_back_to_cost_basis() {
        let mut stock = StockHolding {
            symbol: "VTI".to_string(),
            shares: 10.0,
            cost_basis: 200.0,
            current_price: None,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        };
        assert_eq!(stock.value(), 2000.0);
        assert_eq!(stock.gain(), 0.0);

        stock.current_price = Some(250.0);
        assert_eq!(stock.value(), 2500.0);
        assert_eq!(stock.gain(), 500.0);
    }

    #[test]
    fn test_underwater_equity_is_negative() {
        let house = RealEstateHolding {
            name: "Condo".to_string(),
            estimated_value: 200_000.0,
            mortgage_balance: 250_000.0,
            monthly_mortgage_payment: Some(1500.0),
        };
        assert_eq!(house.equity(), -50_000.0);
    }

    #[test]
    fn test_retirement_growth() {
        let account = RetirementAccount {
            name: "401k".to_string(),
            balance: 150_000.0,
            contributions: Some(100_000.0),
        };
        assert_eq!(account.growth(), Some(50_000.0));
    }

    #[test]
    fn test_validate_names_offending_field() {
        let mut snapshot = Snapshot::default();
        snapshot.debts.push(debt(DebtType::CreditCard, 20.0));
        snapshot.debts.push(DebtLiability {
            current_balance: -5.0,
            ..debt(DebtType::Medical, 0.0)
        });

        match snapshot.validate() {
            Err(Error::InvalidSnapshot { field, .. }) => {
                assert_eq!(field, "debts[1].current_balance")
            }
            other => panic!("expected InvalidSnapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let snapshot = Snapshot {
            retirement: vec![RetirementAccount {
                name: "IRA".to_string(),
                balance: f64::NAN,
                contributions: None,
            }],
            ..Default::default()
        };
        assert!(matches!(
            snapshot.validate(),
            Err(Error::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_snapshot_deserializes_with_missing_lists() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"debts": [{"name": "Visa", "debt_type": "credit_card", "current_balance": 900.0,
                "interest_rate": 22.9, "minimum_payment": 35.0}]}"#,
        )
        .unwrap();
        assert!(snapshot.stocks.is_empty());
        assert_eq!(snapshot.debts.len(), 1);
        assert!(snapshot.validate().is_ok());
    }
}
