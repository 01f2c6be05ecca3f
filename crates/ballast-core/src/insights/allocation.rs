//! Portfolio health rules: leverage ratio, concentration, liquidity, retirement

use super::engine::{AnalysisContext, InsightRule};
use super::types::{money, percent, Insight, InsightCategory, RuleId, Severity};

/// Debt-to-asset ratio band edges. Fixed policy, not configuration.
pub const DTA_POSITIVE_BELOW: f64 = 0.20;
pub const DTA_INFO_BELOW: f64 = 0.40;
pub const DTA_WARNING_BELOW: f64 = 0.60;

/// Crypto above this share of investable assets is a warning
const CRYPTO_CONCENTRATION: f64 = 0.30;

/// Stocks above this share of investable assets is noted
const STOCK_CONCENTRATION: f64 = 0.80;

/// Months of expenses the liquid buffer should cover
const BUFFER_MONTHS: f64 = 3.0;

/// Rough monthly expenses as a multiple of monthly debt payments
const EXPENSE_MULTIPLIER: f64 = 2.0;

/// Retirement at or above this share of total assets is positive
const RETIREMENT_SHARE: f64 = 0.20;

/// Severity tier for a debt-to-asset ratio
pub fn ratio_severity(ratio: f64) -> Severity {
    if ratio < DTA_POSITIVE_BELOW {
        Severity::Positive
    } else if ratio < DTA_INFO_BELOW {
        Severity::Info
    } else if ratio < DTA_WARNING_BELOW {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

pub struct DebtToAssetRatioRule;

impl InsightRule for DebtToAssetRatioRule {
    fn id(&self) -> RuleId {
        RuleId::DebtToAssetRatio
    }

    fn name(&self) -> &'static str {
        "Debt-to-Asset Ratio"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        if m.total_assets <= 0.0 {
            return None;
        }

        let severity = ratio_severity(m.debt_to_asset_ratio);
        let title = match severity {
            Severity::Positive => "Low Debt-to-Asset Ratio",
            Severity::Info => "Moderate Debt-to-Asset Ratio",
            Severity::Warning => "Elevated Debt-to-Asset Ratio",
            Severity::Critical => "High Debt-to-Asset Ratio",
        };

        Some(Insight::new(
            self.id(),
            InsightCategory::PortfolioHealth,
            severity,
            title,
            format!(
                "Your obligations ({}) are {} of your assets ({}).",
                money(m.total_all_obligations),
                percent(m.debt_to_asset_ratio),
                money(m.total_assets)
            ),
        ))
    }
}

pub struct CryptoConcentrationRule;

impl InsightRule for CryptoConcentrationRule {
    fn id(&self) -> RuleId {
        RuleId::CryptoConcentration
    }

    fn name(&self) -> &'static str {
        "Crypto Concentration"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        let investable = m.investable_assets();
        if investable <= 0.0 {
            return None;
        }

        let share = m.crypto_value / investable;
        if share <= CRYPTO_CONCENTRATION {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightCategory::PortfolioHealth,
                Severity::Warning,
                "Heavy Crypto Allocation",
                format!(
                    "Crypto is {} of your investable assets ({}).",
                    percent(share),
                    money(m.crypto_value)
                ),
            )
            .with_impact("A large drawdown in crypto would hit your whole plan"),
        )
    }
}

pub struct StockConcentrationRule;

impl InsightRule for StockConcentrationRule {
    fn id(&self) -> RuleId {
        RuleId::StockConcentration
    }

    fn name(&self) -> &'static str {
        "Stock Concentration"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        let investable = m.investable_assets();
        if investable <= 0.0 {
            return None;
        }

        let share = m.stocks_value / investable;
        if share <= STOCK_CONCENTRATION {
            return None;
        }

        Some(Insight::new(
            self.id(),
            InsightCategory::PortfolioHealth,
            Severity::Info,
            "Stock-Heavy Portfolio",
            format!(
                "Taxable stocks are {} of your investable assets. Retirement accounts \
                 may offer tax advantages for new contributions.",
                percent(share)
            ),
        ))
    }
}

/// Liquid holdings vs. a rough expense estimate
pub struct EmergencyBufferRule;

impl InsightRule for EmergencyBufferRule {
    fn id(&self) -> RuleId {
        RuleId::EmergencyBuffer
    }

    fn name(&self) -> &'static str {
        "Emergency Buffer"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        let monthly_expenses = m.monthly_debt_payments * EXPENSE_MULTIPLIER;
        if monthly_expenses <= 0.0 {
            return None;
        }

        let liquid = m.liquid_assets();
        if liquid >= monthly_expenses * BUFFER_MONTHS {
            return None;
        }

        let months_covered = liquid / monthly_expenses;

        Some(
            Insight::new(
                self.id(),
                InsightCategory::CashFlow,
                Severity::Warning,
                "Thin Emergency Buffer",
                format!(
                    "Liquid holdings ({}) cover about {:.1} months of estimated expenses ({}/month).",
                    money(liquid),
                    months_covered,
                    money(monthly_expenses)
                ),
            )
            .with_impact(format!(
                "Aim for at least {} to cover {:.0} months",
                money(monthly_expenses * BUFFER_MONTHS),
                BUFFER_MONTHS
            )),
        )
    }
}

pub struct RetirementAllocationRule;

impl InsightRule for RetirementAllocationRule {
    fn id(&self) -> RuleId {
        RuleId::RetirementAllocation
    }

    fn name(&self) -> &'static str {
        "Retirement Allocation"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        if m.total_assets <= 0.0 {
            return None;
        }

        let share = m.retirement_value / m.total_assets;
        if share < RETIREMENT_SHARE {
            return None;
        }

        let insight = Insight::new(
            self.id(),
            InsightCategory::PortfolioHealth,
            Severity::Positive,
            "Solid Retirement Savings",
            format!(
                "Retirement accounts hold {} of your assets ({}).",
                percent(share),
                money(m.retirement_value)
            ),
        );

        let growth: Vec<f64> = ctx
            .snapshot
            .retirement
            .iter()
            .filter_map(|r| r.growth())
            .collect();
        if growth.is_empty() {
            Some(insight)
        } else {
            Some(insight.with_impact(format!(
                "{} of growth above contributions",
                money(growth.iter().sum())
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leverage;
    use crate::models::{DebtType, RetirementAccount, Snapshot};
    use crate::portfolio;
    use crate::test_utils::{debt, fixed_now, house, investments};

    fn run(rule: &dyn InsightRule, snapshot: &Snapshot) -> Option<Insight> {
        let metrics = portfolio::aggregate(snapshot);
        let analysis = leverage::analyze(snapshot, fixed_now());
        let ctx = AnalysisContext::new(snapshot, &metrics, &analysis, None);
        rule.evaluate(&ctx)
    }

    #[test]
    fn test_ratio_bands() {
        assert_eq!(ratio_severity(0.0), Severity::Positive);
        assert_eq!(ratio_severity(0.199), Severity::Positive);
        assert_eq!(ratio_severity(0.20), Severity::Info);
        assert_eq!(ratio_severity(0.399), Severity::Info);
        assert_eq!(ratio_severity(0.40), Severity::Warning);
        assert_eq!(ratio_severity(0.59), Severity::Warning);
        assert_eq!(ratio_severity(0.60), Severity::Critical);
        assert_eq!(ratio_severity(4.0), Severity::Critical);
    }

    #[test]
    fn test_dta_gated_on_assets() {
        let snapshot = Snapshot {
            debts: vec![debt("Card", DebtType::CreditCard, 1_000.0, 20.0, 30.0)],
            ..Default::default()
        };
        assert!(run(&DebtToAssetRatioRule, &snapshot).is_none());
    }

    #[test]
    fn test_dta_counts_mortgages() {
        // 400k home with 240k mortgage: equity 160k, obligations 240k
        let snapshot = Snapshot {
            real_estate: vec![house(400_000.0, 240_000.0, Some(1_800.0))],
            ..Default::default()
        };
        let insight = run(&DebtToAssetRatioRule, &snapshot).unwrap();
        assert_eq!(insight.severity, Severity::Critical);
        assert!(insight.description.contains("150%"));
    }

    #[test]
    fn test_crypto_concentration() {
        let heavy = investments(50_000.0, 40_000.0, 10_000.0);
        let insight = run(&CryptoConcentrationRule, &heavy).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.description.contains("40%"));

        let exactly_thirty = investments(70_000.0, 30_000.0, 0.0);
        assert!(run(&CryptoConcentrationRule, &exactly_thirty).is_none());
    }

    #[test]
    fn test_stock_concentration() {
        let heavy = investments(90_000.0, 0.0, 10_000.0);
        assert_eq!(
            run(&StockConcentrationRule, &heavy).unwrap().severity,
            Severity::Info
        );

        let balanced = investments(50_000.0, 0.0, 50_000.0);
        assert!(run(&StockConcentrationRule, &balanced).is_none());
    }

    #[test]
    fn test_emergency_buffer() {
        // $500/month in payments => $1,000/month expenses => $3,000 target
        let mut snapshot = investments(2_000.0, 0.0, 0.0);
        snapshot
            .debts
            .push(debt("Car", DebtType::AutoLoan, 10_000.0, 5.0, 500.0));
        let insight = run(&EmergencyBufferRule, &snapshot).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.description.contains("2.0 months"));

        snapshot.stocks[0].cost_basis = 3_000.0;
        assert!(run(&EmergencyBufferRule, &snapshot).is_none());
    }

    #[test]
    fn test_emergency_buffer_needs_payments() {
        let snapshot = investments(0.0, 0.0, 10_000.0);
        assert!(run(&EmergencyBufferRule, &snapshot).is_none());
    }

    #[test]
    fn test_retirement_allocation_reports_growth() {
        let snapshot = Snapshot {
            retirement: vec![RetirementAccount {
                name: "401k".to_string(),
                balance: 80_000.0,
                contributions: Some(60_000.0),
            }],
            ..investments(120_000.0, 0.0, 0.0)
        };
        let insight = run(&RetirementAllocationRule, &snapshot).unwrap();
        assert_eq!(insight.severity, Severity::Positive);
        assert_eq!(
            insight.impact.as_deref(),
            Some("$20,000 of growth above contributions")
        );

        let low = investments(95_000.0, 0.0, 5_000.0);
        assert!(run(&RetirementAllocationRule, &low).is_none());
    }
}
