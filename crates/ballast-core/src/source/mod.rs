//! Snapshot sources
//!
//! The engine itself never performs I/O. Hosts load a [`Snapshot`] through a
//! [`SnapshotSource`] and hand it to the report builder.
//!
//! # Architecture
//!
//! - `SnapshotSource` trait defines the interface for snapshot backends
//! - `JsonSnapshotSource` reads a JSON document from a file or string
//! - `SqliteSnapshotSource` reads a pooled SQLite database
//!
//! # Document Format
//!
//! ```json
//! {
//!   "age": 41,
//!   "real_estate": [{ "name": "Home", "estimated_value": 450000, "mortgage_balance": 300000 }],
//!   "stocks": [{ "symbol": "VTI", "shares": 10, "cost_basis": 200, "current_price": 250,
//!                "created_at": "2022-03-01T00:00:00Z" }],
//!   "crypto": [],
//!   "retirement": [{ "name": "401k", "balance": 120000, "contributions": 90000 }],
//!   "debts": [{ "name": "Visa", "debt_type": "credit_card", "current_balance": 4200,
//!               "interest_rate": 22.9, "minimum_payment": 120 }]
//! }
//! ```
//!
//! Every section is optional.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Snapshot;

mod json;
mod sqlite;

pub use json::JsonSnapshotSource;
pub use sqlite::{ImportStats, SqliteSnapshotSource};

/// A snapshot plus the optional age stored alongside it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

/// Trait for snapshot backends
pub trait SnapshotSource {
    /// Load the full snapshot
    fn load_snapshot(&self) -> Result<Snapshot>;

    /// Age recorded with the snapshot, if any
    fn load_age(&self) -> Result<Option<u32>>;

    /// Human-readable origin for logs and CLI output
    fn describe(&self) -> String;

    /// Load snapshot and age together
    fn load_document(&self) -> Result<SnapshotDocument> {
        Ok(SnapshotDocument {
            age: self.load_age()?,
            snapshot: self.load_snapshot()?,
        })
    }
}
