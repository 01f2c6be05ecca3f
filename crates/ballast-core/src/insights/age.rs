//! Age-conditioned rules
//!
//! Only run when the host supplies an age.

use super::engine::{AnalysisContext, InsightRule};
use super::types::{percent, Insight, InsightCategory, RuleId, Severity};

pub const DEFAULT_RETIREMENT_AGE: u32 = 65;

/// Younger investors can carry a modest crypto position
const YOUNG_AGE_LIMIT: u32 = 35;
const YOUNG_CRYPTO_MIN: f64 = 0.05;
const YOUNG_CRYPTO_MAX: f64 = 0.25;

/// Late-career investors with most assets in stocks and crypto
const LATE_CAREER_AGE: u32 = 50;
const LATE_CAREER_EQUITY_MAX: f64 = 0.80;

pub struct YearsToRetirementRule {
    retirement_age: u32,
}

impl YearsToRetirementRule {
    pub fn new(retirement_age: u32) -> Self {
        Self { retirement_age }
    }
}

impl Default for YearsToRetirementRule {
    fn default() -> Self {
        Self::new(DEFAULT_RETIREMENT_AGE)
    }
}

impl InsightRule for YearsToRetirementRule {
    fn id(&self) -> RuleId {
        RuleId::YearsToRetirement
    }

    fn name(&self) -> &'static str {
        "Years to Retirement"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let age = ctx.age?;

        let insight = if age < self.retirement_age {
            let years = self.retirement_age - age;
            Insight::new(
                self.id(),
                InsightCategory::Opportunity,
                Severity::Info,
                format!("{} Years to Retirement", years),
                format!(
                    "At {} you have {} years until a retirement age of {}.",
                    age, years, self.retirement_age
                ),
            )
        } else {
            Insight::new(
                self.id(),
                InsightCategory::Opportunity,
                Severity::Info,
                "At Retirement Age",
                format!(
                    "At {} you have reached a retirement age of {}. Focus on preserving \
                     capital and steady withdrawals.",
                    age, self.retirement_age
                ),
            )
        };

        Some(insight)
    }
}

pub struct YoungCryptoAllocationRule;

impl InsightRule for YoungCryptoAllocationRule {
    fn id(&self) -> RuleId {
        RuleId::YoungCryptoAllocation
    }

    fn name(&self) -> &'static str {
        "Age-Appropriate Crypto Allocation"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let age = ctx.age?;
        if age >= YOUNG_AGE_LIMIT {
            return None;
        }

        let m = ctx.metrics;
        let investable = m.investable_assets();
        if investable <= 0.0 {
            return None;
        }

        let share = m.crypto_value / investable;
        if !(YOUNG_CRYPTO_MIN..=YOUNG_CRYPTO_MAX).contains(&share) {
            return None;
        }

        Some(Insight::new(
            self.id(),
            InsightCategory::PortfolioHealth,
            Severity::Positive,
            "Age-Appropriate Crypto Allocation",
            format!(
                "At {}, a {} crypto allocation leaves room for growth without dominating \
                 your portfolio.",
                age,
                percent(share)
            ),
        ))
    }
}

pub struct LateCareerEquityExposureRule;

impl InsightRule for LateCareerEquityExposureRule {
    fn id(&self) -> RuleId {
        RuleId::LateCareerEquityExposure
    }

    fn name(&self) -> &'static str {
        "Late-Career Equity Exposure"
    }

    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight> {
        let age = ctx.age?;
        if age < LATE_CAREER_AGE {
            return None;
        }

        let m = ctx.metrics;
        if m.total_assets <= 0.0 {
            return None;
        }

        let share = m.liquid_assets() / m.total_assets;
        if share <= LATE_CAREER_EQUITY_MAX {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightCategory::PortfolioHealth,
                Severity::Warning,
                "High Equity Exposure Near Retirement",
                format!(
                    "At {}, {} of your assets are in stocks and crypto.",
                    age,
                    percent(share)
                ),
            )
            .with_impact("A market downturn now leaves less time to recover before retirement"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leverage;
    use crate::models::Snapshot;
    use crate::portfolio;
    use crate::test_utils::{fixed_now, investments};

    fn run(rule: &dyn InsightRule, snapshot: &Snapshot, age: Option<u32>) -> Option<Insight> {
        let metrics = portfolio::aggregate(snapshot);
        let analysis = leverage::analyze(snapshot, fixed_now());
        let ctx = AnalysisContext::new(snapshot, &metrics, &analysis, age);
        rule.evaluate(&ctx)
    }

    #[test]
    fn test_age_rules_need_age() {
        let snapshot = investments(85_000.0, 15_000.0, 0.0);
        assert!(run(&YearsToRetirementRule::default(), &snapshot, None).is_none());
        assert!(run(&YoungCryptoAllocationRule, &snapshot, None).is_none());
        assert!(run(&LateCareerEquityExposureRule, &snapshot, None).is_none());
    }

    #[test]
    fn test_years_to_retirement() {
        let snapshot = Snapshot::default();
        let insight = run(&YearsToRetirementRule::default(), &snapshot, Some(40)).unwrap();
        assert_eq!(insight.title, "25 Years to Retirement");
        assert_eq!(insight.severity, Severity::Info);

        let insight = run(&YearsToRetirementRule::new(60), &snapshot, Some(62)).unwrap();
        assert_eq!(insight.title, "At Retirement Age");
    }

    #[test]
    fn test_young_crypto_allocation() {
        let snapshot = investments(85_000.0, 15_000.0, 0.0);
        let insight = run(&YoungCryptoAllocationRule, &snapshot, Some(28)).unwrap();
        assert_eq!(insight.severity, Severity::Positive);

        assert!(run(&YoungCryptoAllocationRule, &snapshot, Some(35)).is_none());

        let too_much = investments(60_000.0, 40_000.0, 0.0);
        assert!(run(&YoungCryptoAllocationRule, &too_much, Some(28)).is_none());

        let none = investments(100_000.0, 0.0, 0.0);
        assert!(run(&YoungCryptoAllocationRule, &none, Some(28)).is_none());
    }

    #[test]
    fn test_late_career_equity_exposure() {
        let snapshot = investments(80_000.0, 5_000.0, 15_000.0);
        let insight = run(&LateCareerEquityExposureRule, &snapshot, Some(58)).unwrap();
        assert_eq!(insight.severity, Severity::Warning);
        assert!(insight.description.contains("85%"));

        assert!(run(&LateCareerEquityExposureRule, &snapshot, Some(49)).is_none());

        let balanced = investments(50_000.0, 0.0, 50_000.0);
        assert!(run(&LateCareerEquityExposureRule, &balanced, Some(58)).is_none());
    }
}
