//! Ballast Core Library
//!
//! Analytics engine for the Ballast personal finance planner:
//! - Portfolio aggregation (net worth, obligations, good/bad debt split)
//! - Leverage analysis against the portfolio's annualized return
//! - Threshold-based insight rules ranked by severity
//! - Avalanche and snowball debt payoff simulation
//! - Snapshot sources (JSON documents, SQLite databases)
//! - Settings with embedded defaults and a data-dir override

pub mod config;
pub mod error;
pub mod insights;
pub mod leverage;
pub mod models;
pub mod payoff;
pub mod portfolio;
pub mod report;
pub mod source;

/// Snapshot builders shared by tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use insights::{Insight, InsightCategory, InsightEngine, InsightRule, RuleId, Severity};
pub use leverage::LeverageAnalysis;
pub use models::{
    CryptoHolding, DebtLiability, DebtType, RealEstateHolding, RetirementAccount, Snapshot,
    StockHolding,
};
pub use payoff::{DebtPayoffPlan, PayoffComparison, PayoffMethod};
pub use portfolio::PortfolioMetrics;
pub use report::{
    generate_insights_report, generate_insights_report_at, InsightsReport, ReportBuilder,
};
pub use source::{
    ImportStats, JsonSnapshotSource, SnapshotDocument, SnapshotSource, SqliteSnapshotSource,
};
