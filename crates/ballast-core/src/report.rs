//! Insights report assembly
//!
//! The single entry point hosts call: validate the snapshot, aggregate,
//! analyze leverage, run the rules, rank them and simulate both payoff plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::insights::{rank, AnalysisContext, Insight, InsightEngine};
use crate::leverage;
use crate::models::Snapshot;
use crate::payoff::PayoffComparison;
use crate::portfolio::{self, PortfolioMetrics};

/// Everything produced for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    pub generated_at: DateTime<Utc>,
    /// Ranked by severity, most urgent first
    pub insights: Vec<Insight>,
    /// `None` when there are no debts
    pub debt_payoff: Option<PayoffComparison>,
    pub metrics: PortfolioMetrics,
}

/// Generate a report stamped with the current time
pub fn generate_insights_report(snapshot: &Snapshot, age: Option<u32>) -> Result<InsightsReport> {
    generate_insights_report_at(snapshot, age, Utc::now())
}

/// Generate a report as of `now`
pub fn generate_insights_report_at(
    snapshot: &Snapshot,
    age: Option<u32>,
    now: DateTime<Utc>,
) -> Result<InsightsReport> {
    ReportBuilder::new().age(age).build_at(snapshot, now)
}

/// Report generation with a customized engine
pub struct ReportBuilder {
    engine: InsightEngine,
    age: Option<u32>,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self {
            engine: InsightEngine::new(),
            age: None,
        }
    }

    pub fn with_engine(engine: InsightEngine) -> Self {
        Self { engine, age: None }
    }

    pub fn age(mut self, age: Option<u32>) -> Self {
        self.age = age;
        self
    }

    pub fn build(&self, snapshot: &Snapshot) -> Result<InsightsReport> {
        self.build_at(snapshot, Utc::now())
    }

    pub fn build_at(&self, snapshot: &Snapshot, now: DateTime<Utc>) -> Result<InsightsReport> {
        snapshot.validate()?;

        let mut metrics = portfolio::aggregate(snapshot);
        let analysis = leverage::analyze(snapshot, now);
        metrics.annualized_return_pct = analysis.annualized_return_pct;

        let ctx = AnalysisContext::new(snapshot, &metrics, &analysis, self.age);
        let mut insights = self.engine.analyze_all(&ctx);
        rank(&mut insights);

        let debt_payoff = PayoffComparison::from_debts(&snapshot.debts);

        info!(
            insights = insights.len(),
            debts = snapshot.debts.len(),
            net_worth = metrics.net_worth,
            "Insights report generated"
        );

        Ok(InsightsReport {
            generated_at: now,
            insights,
            debt_payoff,
            metrics,
        })
    }
}
