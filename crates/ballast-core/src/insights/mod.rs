//! Insight Engine - threshold rules over an analyzed portfolio
//!
//! Each rule is a pure function of the aggregated metrics, the leverage
//! analysis, the raw snapshot and (optionally) the person's age. A rule emits
//! at most one insight; the engine collects them in registration order and the
//! report ranks them by severity.
//!
//! ## Rule Groups
//!
//! - **Debt** - good/bad split, high interest, minimum-only payments, interest cost
//! - **Leverage** - debt rates vs. annualized return, card debt while investing
//! - **Allocation** - debt-to-asset ratio, concentration, emergency buffer, retirement
//! - **Age** - retirement horizon and age-appropriate allocation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ballast_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new(&snapshot, &metrics, &leverage, Some(34));
//! let insights = engine.analyze_all(&ctx);
//! ```

pub mod age;
pub mod allocation;
pub mod debt;
pub mod engine;
pub mod leverage;
pub mod types;

pub use engine::{rank, AnalysisContext, InsightEngine, InsightRule};
pub use types::{money, percent, Insight, InsightCategory, RuleId, Severity};
