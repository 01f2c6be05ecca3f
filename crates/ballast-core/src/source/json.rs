//! JSON snapshot documents

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{SnapshotDocument, SnapshotSource};
use crate::error::{Error, Result};
use crate::models::Snapshot;

enum Origin {
    File(PathBuf),
    Inline(String),
}

/// Snapshot read from a JSON file or an in-memory string
pub struct JsonSnapshotSource {
    origin: Origin,
}

impl JsonSnapshotSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }

    pub fn from_json(content: impl Into<String>) -> Self {
        Self {
            origin: Origin::Inline(content.into()),
        }
    }

    /// File path, when backed by a file
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::File(path) => Some(path),
            Origin::Inline(_) => None,
        }
    }

    fn read(&self) -> Result<SnapshotDocument> {
        let document: SnapshotDocument = match &self.origin {
            Origin::File(path) => {
                if !path.exists() {
                    return Err(Error::NotFound(format!(
                        "Snapshot file {}",
                        path.display()
                    )));
                }
                let content = fs::read_to_string(path)?;
                serde_json::from_str(&content)?
            }
            Origin::Inline(content) => serde_json::from_str(content)?,
        };

        debug!(
            source = %self.describe(),
            stocks = document.snapshot.stocks.len(),
            debts = document.snapshot.debts.len(),
            "Loaded JSON snapshot"
        );
        Ok(document)
    }
}

impl SnapshotSource for JsonSnapshotSource {
    fn load_snapshot(&self) -> Result<Snapshot> {
        Ok(self.read()?.snapshot)
    }

    fn load_age(&self) -> Result<Option<u32>> {
        Ok(self.read()?.age)
    }

    fn describe(&self) -> String {
        match &self.origin {
            Origin::File(path) => format!("json:{}", path.display()),
            Origin::Inline(_) => "json:<inline>".to_string(),
        }
    }

    fn load_document(&self) -> Result<SnapshotDocument> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DebtType;
    use std::io::Write;

    const DOCUMENT: &str = r#"{
        "age": 41,
        "real_estate": [
            { "name": "Home", "estimated_value": 450000, "mortgage_balance": 300000,
              "monthly_mortgage_payment": 2100 }
        ],
        "stocks": [
            { "symbol": "VTI", "shares": 10, "cost_basis": 200, "current_price": 250,
              "created_at": "2022-03-01T00:00:00Z" }
        ],
        "debts": [
            { "name": "Visa", "debt_type": "credit_card", "current_balance": 4200,
              "interest_rate": 22.9, "minimum_payment": 120 }
        ]
    }"#;

    #[test]
    fn test_inline_document() {
        let source = JsonSnapshotSource::from_json(DOCUMENT);
        let document = source.load_document().unwrap();

        assert_eq!(document.age, Some(41));
        assert_eq!(document.snapshot.real_estate.len(), 1);
        assert_eq!(document.snapshot.stocks[0].value(), 2500.0);
        assert!(document.snapshot.crypto.is_empty());
        assert!(document.snapshot.retirement.is_empty());
        assert_eq!(document.snapshot.debts[0].debt_type, DebtType::CreditCard);
        assert_eq!(document.snapshot.debts[0].monthly_payment, None);
        assert_eq!(source.describe(), "json:<inline>");
    }

    #[test]
    fn test_empty_document() {
        let source = JsonSnapshotSource::from_json("{}");
        assert!(source.load_snapshot().unwrap().is_empty());
        assert_eq!(source.load_age().unwrap(), None);
    }

    #[test]
    fn test_file_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let source = JsonSnapshotSource::from_path(file.path());
        assert_eq!(source.path(), Some(file.path()));
        assert_eq!(source.load_age().unwrap(), Some(41));
        assert!(source.describe().starts_with("json:"));
    }

    #[test]
    fn test_missing_file() {
        let source = JsonSnapshotSource::from_path("/nonexistent/snapshot.json");
        assert!(matches!(source.load_snapshot(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_malformed_document() {
        let source = JsonSnapshotSource::from_json(r#"{ "debts": [{ "name": "x" }] }"#);
        assert!(matches!(source.load_snapshot(), Err(Error::Json(_))));

        let bad_type = JsonSnapshotSource::from_json(
            r#"{ "debts": [{ "name": "x", "debt_type": "payday", "current_balance": 1,
                 "interest_rate": 1, "minimum_payment": 1 }] }"#,
        );
        assert!(bad_type.load_snapshot().is_err());
    }

    #[test]
    fn test_document_roundtrip_omits_missing_age() {
        let document = SnapshotDocument::default();
        let json = serde_json::to_value(&document).unwrap();
        assert!(json.get("age").is_none());
        assert!(json["debts"].as_array().unwrap().is_empty());
    }
}
