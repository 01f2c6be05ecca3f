//! Insight Engine - runs the rule set against an analyzed snapshot

use crate::leverage::LeverageAnalysis;
use crate::models::Snapshot;
use crate::portfolio::PortfolioMetrics;

use super::age::{
    LateCareerEquityExposureRule, YearsToRetirementRule, YoungCryptoAllocationRule,
    DEFAULT_RETIREMENT_AGE,
};
use super::allocation::{
    CryptoConcentrationRule, DebtToAssetRatioRule, EmergencyBufferRule, RetirementAllocationRule,
    StockConcentrationRule,
};
use super::debt::{
    AnnualInterestCostRule, DebtFreeRule, GoodVsBadDebtRule, HighInterestDebtRule,
    MinimumPaymentOnlyRule,
};
use super::leverage::{CreditCardWithInvestmentsRule, DebtAboveReturnRule};
use super::types::{Insight, RuleId};

/// Context provided to insight rules
pub struct AnalysisContext<'a> {
    /// Raw holdings and debts
    pub snapshot: &'a Snapshot,
    /// Aggregated totals
    pub metrics: &'a PortfolioMetrics,
    /// Return-vs-rate comparison
    pub leverage: &'a LeverageAnalysis,
    /// Age, when the host knows it (enables age-based rules)
    pub age: Option<u32>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        snapshot: &'a Snapshot,
        metrics: &'a PortfolioMetrics,
        leverage: &'a LeverageAnalysis,
        age: Option<u32>,
    ) -> Self {
        Self {
            snapshot,
            metrics,
            leverage,
            age,
        }
    }
}

/// A threshold rule producing at most one insight
pub trait InsightRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> RuleId;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule; `None` when its trigger condition does not hold
    fn evaluate(&self, ctx: &AnalysisContext<'_>) -> Option<Insight>;
}

/// Runs every registered rule in order
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules and a retirement age of 65
    pub fn new() -> Self {
        Self::with_retirement_age(DEFAULT_RETIREMENT_AGE)
    }

    /// Create an engine with the built-in rules
    pub fn with_retirement_age(retirement_age: u32) -> Self {
        let mut engine = Self { rules: vec![] };

        // Debt
        engine.register(Box::new(GoodVsBadDebtRule));
        engine.register(Box::new(HighInterestDebtRule));
        engine.register(Box::new(MinimumPaymentOnlyRule));
        engine.register(Box::new(AnnualInterestCostRule));

        // Leverage
        engine.register(Box::new(DebtAboveReturnRule));
        engine.register(Box::new(CreditCardWithInvestmentsRule));

        // Portfolio health
        engine.register(Box::new(DebtToAssetRatioRule));
        engine.register(Box::new(CryptoConcentrationRule));
        engine.register(Box::new(StockConcentrationRule));
        engine.register(Box::new(EmergencyBufferRule));
        engine.register(Box::new(DebtFreeRule));
        engine.register(Box::new(RetirementAllocationRule));

        // Age-based
        engine.register(Box::new(YearsToRetirementRule::new(retirement_age)));
        engine.register(Box::new(YoungCryptoAllocationRule));
        engine.register(Box::new(LateCareerEquityExposureRule));

        engine
    }

    /// Register a rule; it runs after those already registered
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Evaluate every rule, returning insights in engine order
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut insights = vec![];

        for rule in &self.rules {
            if let Some(insight) = rule.evaluate(ctx) {
                tracing::debug!(
                    rule = rule.id().as_str(),
                    severity = insight.severity.as_str(),
                    "Insight rule fired"
                );
                insights.push(insight);
            }
        }

        insights
    }

    /// Get list of registered rules
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}

/// Sort by severity (highest first); equal severities keep engine order
pub fn rank(insights: &mut [Insight]) {
    insights.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::{InsightCategory, Severity};
    use crate::leverage;
    use crate::portfolio;
    use crate::test_utils::fixed_now;

    #[test]
    fn test_engine_creation() {
        let engine = InsightEngine::new();
        let ids = engine.rule_ids();

        assert_eq!(ids.len(), 15);
        assert_eq!(ids[0], RuleId::GoodVsBadDebt);
        assert_eq!(ids[6], RuleId::DebtToAssetRatio);
        assert_eq!(ids[14], RuleId::LateCareerEquityExposure);
    }

    #[test]
    fn test_analyze_empty_snapshot() {
        let snapshot = Snapshot::default();
        let metrics = portfolio::aggregate(&snapshot);
        let analysis = leverage::analyze(&snapshot, fixed_now());
        let ctx = AnalysisContext::new(&snapshot, &metrics, &analysis, None);

        let insights = InsightEngine::new().analyze_all(&ctx);
        assert!(insights.is_empty());
    }

    struct AlwaysFires;

    impl InsightRule for AlwaysFires {
        fn id(&self) -> RuleId {
            RuleId::DebtFree
        }

        fn name(&self) -> &'static str {
            "Always"
        }

        fn evaluate(&self, _ctx: &AnalysisContext<'_>) -> Option<Insight> {
            Some(Insight::new(
                self.id(),
                InsightCategory::Opportunity,
                Severity::Info,
                "Always",
                "Fires unconditionally",
            ))
        }
    }

    #[test]
    fn test_registered_rule_runs_last() {
        let snapshot = Snapshot::default();
        let metrics = portfolio::aggregate(&snapshot);
        let analysis = leverage::analyze(&snapshot, fixed_now());
        let ctx = AnalysisContext::new(&snapshot, &metrics, &analysis, None);

        let mut engine = InsightEngine::new();
        engine.register(Box::new(AlwaysFires));

        let insights = engine.analyze_all(&ctx);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Always");
    }

    #[test]
    fn test_rank_is_stable_within_severity() {
        let make = |title: &str, severity| {
            Insight::new(
                RuleId::GoodVsBadDebt,
                InsightCategory::DebtPayoff,
                severity,
                title,
                "",
            )
        };
        let mut insights = vec![
            make("a", Severity::Positive),
            make("b", Severity::Warning),
            make("c", Severity::Info),
            make("d", Severity::Warning),
            make("e", Severity::Critical),
        ];
        rank(&mut insights);

        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["e", "b", "d", "c", "a"]);
    }
}
