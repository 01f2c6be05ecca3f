//! Debt rules
//!
//! - Good vs. bad debt overview
//! - High-interest debt (10%+)
//! - Debts paid at (or barely above) the minimum
//! - Yearly interest cost
//! - Debt-free milestone

use crate::portfolio::HIGH_INTEREST_RATE;

use super::engine::{AnalysisContext, InsightRule};
use super::types::{money, Insight, InsightCategory, RuleId, Severity};

/// High-interest debt becomes critical above this share of total assets
const HIGH_INTEREST_CRITICAL_SHARE: f64 = 0.10;

/// Payments within 5% of the minimum count as minimum-only
const MINIMUM_PAYMENT_TOLERANCE: f64 = 1.05;

/// Yearly interest above this is a warning
const ANNUAL_INTEREST_WARNING: f64 = 2_000.0;

/// Summarizes the good/bad debt split
pub struct GoodVsBadDebtRule;

impl InsightRule for GoodVsBadDebtRule {
    fn id(&self) -> RuleId {
        RuleId::GoodVsBadDebt
    }

    fn name(&self) -> &'static str {
        "Good vs. Bad Debt"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        if m.total_all_obligations <= 0.0 {
            return None;
        }

        let severity = if m.bad_debt_total > m.good_debt_total {
            Severity::Warning
        } else {
            Severity::Info
        };

        let insight = Insight::new(
            self.id(),
            InsightCategory::DebtPayoff,
            severity,
            "Good vs. Bad Debt",
            format!(
                "{} of your obligations is good debt (mortgages, student loans at 7% or less) \
                 and {} is bad debt.",
                money(m.good_debt_total),
                money(m.bad_debt_total)
            ),
        );

        if m.bad_debt_total > 0.0 {
            Some(insight.with_impact(format!(
                "Bad debt takes {}/month in payments",
                money(m.bad_debt_monthly)
            )))
        } else {
            Some(insight)
        }
    }
}

/// Flags debts charging 10% or more
pub struct HighInterestDebtRule;

impl InsightRule for HighInterestDebtRule {
    fn id(&self) -> RuleId {
        RuleId::HighInterestDebt
    }

    fn name(&self) -> &'static str {
        "High-Interest Debt"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        if m.high_interest_debt_total <= 0.0 {
            return None;
        }

        let high: Vec<_> = ctx
            .snapshot
            .debts
            .iter()
            .filter(|d| d.is_active() && d.interest_rate >= HIGH_INTEREST_RATE)
            .collect();
        let top_rate = high
            .iter()
            .map(|d| d.interest_rate)
            .fold(0.0_f64, f64::max);

        let severity =
            if m.high_interest_debt_total > m.total_assets * HIGH_INTEREST_CRITICAL_SHARE {
                Severity::Critical
            } else {
                Severity::Warning
            };

        Some(
            Insight::new(
                self.id(),
                InsightCategory::DebtPayoff,
                severity,
                "High-Interest Debt",
                format!(
                    "{} debt(s) at {:.0}%+ interest total {}.",
                    high.len(),
                    HIGH_INTEREST_RATE,
                    money(m.high_interest_debt_total)
                ),
            )
            .with_impact(format!(
                "Paying these down is a guaranteed {:.1}% return",
                top_rate
            )),
        )
    }
}

/// Flags debts paid at the minimum
pub struct MinimumPaymentOnlyRule;

impl InsightRule for MinimumPaymentOnlyRule {
    fn id(&self) -> RuleId {
        RuleId::MinimumPaymentOnly
    }

    fn name(&self) -> &'static str {
        "Minimum Payments Only"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let minimum_only: Vec<&str> = ctx
            .snapshot
            .debts
            .iter()
            .filter(|d| {
                d.is_active()
                    && d.effective_payment() <= d.minimum_payment * MINIMUM_PAYMENT_TOLERANCE
            })
            .map(|d| d.name.as_str())
            .collect();

        if minimum_only.is_empty() {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightCategory::DebtPayoff,
                Severity::Warning,
                "Paying Only the Minimum",
                format!(
                    "{} debt(s) are paid at or near the minimum: {}.",
                    minimum_only.len(),
                    minimum_only.join(", ")
                ),
            )
            .with_impact("Paying above the minimum shortens payoff and cuts total interest"),
        )
    }
}

/// Estimates yearly interest across the liabilities table
pub struct AnnualInterestCostRule;

impl InsightRule for AnnualInterestCostRule {
    fn id(&self) -> RuleId {
        RuleId::AnnualInterestCost
    }

    fn name(&self) -> &'static str {
        "Annual Interest Cost"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let annual: f64 = ctx
            .snapshot
            .debts
            .iter()
            .map(|d| d.annual_interest())
            .sum();
        if annual <= 0.0 {
            return None;
        }

        let severity = if annual > ANNUAL_INTEREST_WARNING {
            Severity::Warning
        } else {
            Severity::Info
        };

        Some(Insight::new(
            self.id(),
            InsightCategory::CashFlow,
            severity,
            "Annual Interest Cost",
            format!(
                "Your debts cost about {}/year in interest ({}/month).",
                money(annual),
                money(annual / 12.0)
            ),
        ))
    }
}

/// Celebrates a clear liabilities table
pub struct DebtFreeRule;

impl InsightRule for DebtFreeRule {
    fn id(&self) -> RuleId {
        RuleId::DebtFree
    }

    fn name(&self) -> &'static str {
        "Debt Free"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let m = ctx.metrics;
        if m.total_debts > 0.0 || m.net_worth <= 0.0 {
            return None;
        }

        Some(Insight::new(
            self.id(),
            InsightCategory::PortfolioHealth,
            Severity::Positive,
            "Debt Free",
            format!(
                "You carry no consumer debt and your net worth is {}.",
                money(m.net_worth)
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leverage::{self, LeverageAnalysis};
    use crate::models::{DebtType, Snapshot};
    use crate::portfolio::{self, PortfolioMetrics};
    use crate::test_utils::{debt, fixed_now, house, investments};

    fn run(rule: &dyn InsightRule, snapshot: &Snapshot) -> Option<Insight> {
        let metrics: PortfolioMetrics = portfolio::aggregate(snapshot);
        let analysis: LeverageAnalysis = leverage::analyze(snapshot, fixed_now());
        let ctx = AnalysisContext::new(snapshot, &metrics, &analysis, None);
        rule.evaluate(&ctx)
    }

    #[test]
    fn test_good_vs_bad_requires_obligations() {
        assert!(run(&GoodVsBadDebtRule, &Snapshot::default()).is_none());
    }

    #[test]
    fn test_good_vs_bad_escalates_when_bad_dominates() {
        let mostly_bad = Snapshot {
            debts: vec![
                debt("Card", DebtType::CreditCard, 8_000.0, 22.0, 200.0),
                debt("Federal", DebtType::StudentLoan, 3_000.0, 5.0, 50.0),
            ],
            ..Default::default()
        };
        let insight = run(&GoodVsBadDebtRule, &mostly_bad).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.impact.is_some());

        let mostly_good = Snapshot {
            real_estate: vec![house(300_000.0, 200_000.0, Some(1_400.0))],
            ..Default::default()
        };
        let insight = run(&GoodVsBadDebtRule, &mostly_good).unwrap();
        assert_eq!(insight.severity, Severity::Info);
        assert!(insight.impact.is_none());
    }

    #[test]
    fn test_high_interest_severity() {
        let mut snapshot = investments(100_000.0, 0.0, 0.0);
        snapshot
            .debts
            .push(debt("Card", DebtType::CreditCard, 5_000.0, 24.0, 150.0));
        let insight = run(&HighInterestDebtRule, &snapshot).unwrap();
        assert_eq!(insight.severity, Severity::Warning);

        snapshot
            .debts
            .push(debt("Personal", DebtType::PersonalLoan, 10_000.0, 11.0, 300.0));
        let insight = run(&HighInterestDebtRule, &snapshot).unwrap();
        // 15k > 10% of 100k
        assert_eq!(insight.severity, Severity::Critical);
        assert!(insight.description.starts_with("2 debt(s)"));
    }

    #[test]
    fn test_high_interest_ignores_low_rates() {
        let snapshot = Snapshot {
            debts: vec![debt("Car", DebtType::AutoLoan, 20_000.0, 9.99, 400.0)],
            ..Default::default()
        };
        assert!(run(&HighInterestDebtRule, &snapshot).is_none());
    }

    #[test]
    fn test_minimum_payment_only() {
        let mut paying_extra = debt("Car", DebtType::AutoLoan, 12_000.0, 6.0, 300.0);
        paying_extra.monthly_payment = Some(400.0);
        let mut barely_over = debt("Card", DebtType::CreditCard, 2_000.0, 20.0, 100.0);
        barely_over.monthly_payment = Some(105.0);

        let snapshot = Snapshot {
            debts: vec![paying_extra, barely_over],
            ..Default::default()
        };
        let insight = run(&MinimumPaymentOnlyRule, &snapshot).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.description.contains("Card"));
        assert!(!insight.description.contains("Car,"));
    }

    #[test]
    fn test_minimum_payment_skips_paid_off_debts() {
        let snapshot = Snapshot {
            debts: vec![debt("Old card", DebtType::CreditCard, 0.0, 20.0, 0.0)],
            ..Default::default()
        };
        assert!(run(&MinimumPaymentOnlyRule, &snapshot).is_none());
    }

    #[test]
    fn test_annual_interest_threshold() {
        let small = Snapshot {
            debts: vec![debt("Card", DebtType::CreditCard, 5_000.0, 20.0, 150.0)],
            ..Default::default()
        };
        // $1,000/year
        assert_eq!(
            run(&AnnualInterestCostRule, &small).unwrap().severity,
            Severity::Info
        );

        let large = Snapshot {
            debts: vec![debt("Card", DebtType::CreditCard, 15_000.0, 20.0, 450.0)],
            ..Default::default()
        };
        let insight = run(&AnnualInterestCostRule, &large).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.description.contains("$3,000/year"));
    }

    #[test]
    fn test_debt_free() {
        let snapshot = investments(50_000.0, 0.0, 20_000.0);
        let insight = run(&DebtFreeRule, &snapshot).unwrap();
        assert_eq!(insight.severity, Severity::Positive);

        // No assets means nothing to celebrate
        assert!(run(&DebtFreeRule, &Snapshot::default()).is_none());
    }
}
