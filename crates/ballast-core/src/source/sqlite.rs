//! SQLite snapshot database with connection pooling
//!
//! Tables:
//! - `real_estate`, `stocks`, `crypto`, `retirement_accounts`, `debts` - one row per entity
//! - `settings` - key/value pairs (`age`)

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{SnapshotDocument, SnapshotSource};
use crate::error::{Error, Result};
use crate::models::{
    CryptoHolding, DebtLiability, DebtType, RealEstateHolding, RetirementAccount, Snapshot,
    StockHolding,
};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

const AGE_KEY: &str = "age";

/// Parse a stored timestamp (RFC 3339, or SQLite's `CURRENT_TIMESTAMP` format)
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .map_err(|_| Error::InvalidData(format!("Invalid timestamp: {}", s)))
}

/// Row counts written by [`SqliteSnapshotSource::import_document`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub real_estate: usize,
    pub stocks: usize,
    pub crypto: usize,
    pub retirement: usize,
    pub debts: usize,
}

impl ImportStats {
    pub fn total(&self) -> usize {
        self.real_estate + self.stocks + self.crypto + self.retirement + self.debts
    }
}

/// Snapshot database wrapper with connection pooling
#[derive(Clone)]
pub struct SqliteSnapshotSource {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl SqliteSnapshotSource {
    /// Open (or create) a database file
    pub fn open(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        info!(path, "Snapshot database ready");
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    ///
    /// Every `:memory:` connection is its own database, so the pool holds one.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;

        let db = Self {
            pool,
            db_path: ":memory:".to_string(),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS real_estate (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                estimated_value REAL NOT NULL,
                mortgage_balance REAL NOT NULL DEFAULT 0,
                monthly_mortgage_payment REAL
            );

            CREATE TABLE IF NOT EXISTS stocks (
                id INTEGER PRIMARY KEY,
                symbol TEXT NOT NULL,
                shares REAL NOT NULL,
                cost_basis REAL NOT NULL,
                current_price REAL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS crypto (
                id INTEGER PRIMARY KEY,
                symbol TEXT NOT NULL,
                quantity REAL NOT NULL,
                cost_basis REAL NOT NULL,
                current_price REAL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS retirement_accounts (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL DEFAULT '',
                balance REAL NOT NULL,
                contributions REAL
            );

            CREATE TABLE IF NOT EXISTS debts (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                debt_type TEXT NOT NULL,
                current_balance REAL NOT NULL,
                interest_rate REAL NOT NULL,
                minimum_payment REAL NOT NULL,
                monthly_payment REAL
            );

            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        debug!(path = %self.db_path, "Snapshot schema ready");
        Ok(())
    }

    pub fn insert_real_estate(&self, holding: &RealEstateHolding) -> Result<i64> {
        let conn = self.conn()?;
        insert_real_estate(&conn, holding)
    }

    pub fn insert_stock(&self, holding: &StockHolding) -> Result<i64> {
        let conn = self.conn()?;
        insert_stock(&conn, holding)
    }

    pub fn insert_crypto(&self, holding: &CryptoHolding) -> Result<i64> {
        let conn = self.conn()?;
        insert_crypto(&conn, holding)
    }

    pub fn insert_retirement(&self, account: &RetirementAccount) -> Result<i64> {
        let conn = self.conn()?;
        insert_retirement(&conn, account)
    }

    pub fn insert_debt(&self, debt: &DebtLiability) -> Result<i64> {
        let conn = self.conn()?;
        insert_debt(&conn, debt)
    }

    /// Store (or clear, with `None`) the age used for age-conditioned insights
    pub fn set_age(&self, age: Option<u32>) -> Result<()> {
        let conn = self.conn()?;
        set_age(&conn, age)
    }

    /// Replace the database contents with a snapshot document
    pub fn import_document(&self, document: &SnapshotDocument) -> Result<ImportStats> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute_batch(
            r#"
            DELETE FROM real_estate;
            DELETE FROM stocks;
            DELETE FROM crypto;
            DELETE FROM retirement_accounts;
            DELETE FROM debts;
            "#,
        )?;

        let snapshot = &document.snapshot;
        for holding in &snapshot.real_estate {
            insert_real_estate(&tx, holding)?;
        }
        for holding in &snapshot.stocks {
            insert_stock(&tx, holding)?;
        }
        for holding in &snapshot.crypto {
            insert_crypto(&tx, holding)?;
        }
        for account in &snapshot.retirement {
            insert_retirement(&tx, account)?;
        }
        for debt in &snapshot.debts {
            insert_debt(&tx, debt)?;
        }
        set_age(&tx, document.age)?;

        tx.commit()?;

        let stats = ImportStats {
            real_estate: snapshot.real_estate.len(),
            stocks: snapshot.stocks.len(),
            crypto: snapshot.crypto.len(),
            retirement: snapshot.retirement.len(),
            debts: snapshot.debts.len(),
        };
        info!(path = %self.db_path, rows = stats.total(), "Snapshot imported");
        Ok(stats)
    }

    fn list_real_estate(&self, conn: &Connection) -> Result<Vec<RealEstateHolding>> {
        let mut stmt = conn.prepare(
            "SELECT name, estimated_value, mortgage_balance, monthly_mortgage_payment
             FROM real_estate ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RealEstateHolding {
                    name: row.get(0)?,
                    estimated_value: row.get(1)?,
                    mortgage_balance: row.get(2)?,
                    monthly_mortgage_payment: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn list_stocks(&self, conn: &Connection) -> Result<Vec<StockHolding>> {
        let mut stmt = conn.prepare(
            "SELECT symbol, shares, cost_basis, current_price, created_at
             FROM stocks ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(symbol, shares, cost_basis, current_price, created_at)| {
                Ok(StockHolding {
                    symbol,
                    shares,
                    cost_basis,
                    current_price,
                    created_at: parse_datetime(&created_at)?,
                })
            })
            .collect()
    }

    fn list_crypto(&self, conn: &Connection) -> Result<Vec<CryptoHolding>> {
        let mut stmt = conn.prepare(
            "SELECT symbol, quantity, cost_basis, current_price, created_at
             FROM crypto ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(symbol, quantity, cost_basis, current_price, created_at)| {
                Ok(CryptoHolding {
                    symbol,
                    quantity,
                    cost_basis,
                    current_price,
                    created_at: parse_datetime(&created_at)?,
                })
            })
            .collect()
    }

    fn list_retirement(&self, conn: &Connection) -> Result<Vec<RetirementAccount>> {
        let mut stmt = conn.prepare(
            "SELECT name, balance, contributions FROM retirement_accounts ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RetirementAccount {
                    name: row.get(0)?,
                    balance: row.get(1)?,
                    contributions: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn list_debts(&self, conn: &Connection) -> Result<Vec<DebtLiability>> {
        let mut stmt = conn.prepare(
            "SELECT name, debt_type, current_balance, interest_rate, minimum_payment, monthly_payment
             FROM debts ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, Option<f64>>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(
                |(name, debt_type, current_balance, interest_rate, minimum_payment, monthly_payment)| {
                    let debt_type: DebtType = debt_type
                        .parse()
                        .map_err(|e| Error::InvalidData(format!("Debt {:?}: {}", name, e)))?;
                    Ok(DebtLiability {
                        name,
                        debt_type,
                        current_balance,
                        interest_rate,
                        minimum_payment,
                        monthly_payment,
                    })
                },
            )
            .collect()
    }
}

impl SnapshotSource for SqliteSnapshotSource {
    fn load_snapshot(&self) -> Result<Snapshot> {
        let conn = self.conn()?;

        let snapshot = Snapshot {
            real_estate: self.list_real_estate(&conn)?,
            stocks: self.list_stocks(&conn)?,
            crypto: self.list_crypto(&conn)?,
            retirement: self.list_retirement(&conn)?,
            debts: self.list_debts(&conn)?,
        };

        debug!(
            path = %self.db_path,
            stocks = snapshot.stocks.len(),
            debts = snapshot.debts.len(),
            "Loaded snapshot from database"
        );
        Ok(snapshot)
    }

    fn load_age(&self) -> Result<Option<u32>> {
        let conn = self.conn()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![AGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        value
            .map(|v| {
                v.trim()
                    .parse::<u32>()
                    .map_err(|_| Error::InvalidData(format!("Invalid stored age: {:?}", v)))
            })
            .transpose()
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.db_path)
    }
}

fn insert_real_estate(conn: &Connection, holding: &RealEstateHolding) -> Result<i64> {
    conn.execute(
        "INSERT INTO real_estate (name, estimated_value, mortgage_balance, monthly_mortgage_payment)
         VALUES (?, ?, ?, ?)",
        params![
            holding.name,
            holding.estimated_value,
            holding.mortgage_balance,
            holding.monthly_mortgage_payment
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_stock(conn: &Connection, holding: &StockHolding) -> Result<i64> {
    conn.execute(
        "INSERT INTO stocks (symbol, shares, cost_basis, current_price, created_at)
         VALUES (?, ?, ?, ?, ?)",
        params![
            holding.symbol,
            holding.shares,
            holding.cost_basis,
            holding.current_price,
            holding.created_at.to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_crypto(conn: &Connection, holding: &CryptoHolding) -> Result<i64> {
    conn.execute(
        "INSERT INTO crypto (symbol, quantity, cost_basis, current_price, created_at)
         VALUES (?, ?, ?, ?, ?)",
        params![
            holding.symbol,
            holding.quantity,
            holding.cost_basis,
            holding.current_price,
            holding.created_at.to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_retirement(conn: &Connection, account: &RetirementAccount) -> Result<i64> {
    conn.execute(
        "INSERT INTO retirement_accounts (name, balance, contributions) VALUES (?, ?, ?)",
        params![account.name, account.balance, account.contributions],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_debt(conn: &Connection, debt: &DebtLiability) -> Result<i64> {
    conn.execute(
        "INSERT INTO debts (name, debt_type, current_balance, interest_rate, minimum_payment, monthly_payment)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            debt.name,
            debt.debt_type.as_str(),
            debt.current_balance,
            debt.interest_rate,
            debt.minimum_payment,
            debt.monthly_payment
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn set_age(conn: &Connection, age: Option<u32>) -> Result<()> {
    match age {
        Some(age) => {
            conn.execute(
                "INSERT INTO settings (key, value) VALUES (?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![AGE_KEY, age.to_string()],
            )?;
        }
        None => {
            conn.execute("DELETE FROM settings WHERE key = ?", params![AGE_KEY])?;
        }
    }
    Ok(())
}
