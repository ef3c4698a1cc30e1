mod schema;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::categorize::{needs_category, OverwritePolicy, Resolver};
use crate::error::{Error, Result};
use crate::models::{default_tolerance, AmountMatch, Category, Rule, Transaction, TransactionType};

/// Owns the embedded store. Every public operation runs in one short-lived
/// transactional scope; readers always re-query committed state.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(Error::storage("open database"))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .map_err(Error::storage("set database pragmas"))?;
        let mut db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::storage("open database"))?;
        let mut db = Self { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    // ── Schema & migration ────────────────────────────────────

    /// Creates the schema on a fresh store and upgrades an existing one to
    /// the current version. Safe to call on every start; a no-op when the
    /// store is current. A failure here is fatal to the caller: nothing is
    /// committed and the store is left at its previous version.
    pub fn ensure_schema(&mut self) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(Error::storage("begin schema migration"))?;

        let has_version_table =
            table_exists(&tx, "schema_version").map_err(Error::storage("inspect schema"))?;
        let current: i32 = if has_version_table {
            tx.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0)
        } else if table_exists(&tx, "transactions").map_err(Error::storage("inspect schema"))? {
            // Store predates schema versioning
            1
        } else {
            0
        };

        if current == 0 {
            tx.execute_batch(schema::SCHEMA)
                .map_err(Error::storage("create schema"))?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )
            .map_err(Error::storage("record schema version"))?;
            tx.commit().map_err(Error::storage("commit schema"))?;
            return Ok(());
        }

        if current < schema::CURRENT_VERSION {
            for version in (current + 1)..=schema::CURRENT_VERSION {
                apply_migration(&tx, version).map_err(Error::storage("apply schema migration"))?;
                info!(version, "applied schema migration");
            }
            tx.execute(
                "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
                [],
            )
            .map_err(Error::storage("record schema version"))?;
            let changed = tx
                .execute(
                    "UPDATE schema_version SET version = ?1",
                    params![schema::CURRENT_VERSION],
                )
                .map_err(Error::storage("record schema version"))?;
            if changed == 0 {
                tx.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    params![schema::CURRENT_VERSION],
                )
                .map_err(Error::storage("record schema version"))?;
            }
        }

        tx.commit().map_err(Error::storage("commit schema migration"))
    }

    // ── Transactions ──────────────────────────────────────────

    pub fn insert_transaction(&mut self, txn: &Transaction) -> Result<i64> {
        if txn.description.trim().is_empty() {
            return Err(Error::Validation("description must not be empty".into()));
        }
        if txn.amount < Decimal::ZERO {
            return Err(Error::Validation("amount must not be negative".into()));
        }

        let tx = self
            .conn
            .transaction()
            .map_err(Error::storage("insert transaction"))?;
        ensure_category(&tx, &txn.category).map_err(Error::storage("insert transaction"))?;
        tx.execute(
            "INSERT INTO transactions (date, amount, description, category, transaction_type, ignored)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fmt_timestamp(&txn.date),
                txn.amount.to_string(),
                txn.description,
                txn.category,
                txn.kind.as_str(),
                txn.ignored,
            ],
        )
        .map_err(Error::storage("insert transaction"))?;
        let id = tx.last_insert_rowid();
        tx.commit().map_err(Error::storage("insert transaction"))?;
        Ok(id)
    }

    /// Every transaction, most recent first. Display ordering only; callers
    /// aggregating must not rely on it.
    pub fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, date, amount, description, category, transaction_type, ignored
                 FROM transactions ORDER BY date DESC, id DESC",
            )
            .map_err(Error::storage("list transactions"))?;
        let rows = stmt
            .query_map([], row_to_transaction)
            .map_err(Error::storage("list transactions"))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::storage("list transactions"))
    }

    /// Transactions in the month containing `day`, half-open window
    /// `[first of month, first of next month)`, ascending.
    pub fn get_transactions_for_month(&self, day: NaiveDate) -> Result<Vec<Transaction>> {
        let (start, end) = month_bounds(day);
        self.transactions_in_window(start, end)
    }

    /// Transactions in `[Jan 1 year, Jan 1 year+1)`, ascending.
    pub fn get_transactions_for_year(&self, year: i32) -> Result<Vec<Transaction>> {
        let (start, end) = year_bounds(year);
        self.transactions_in_window(start, end)
    }

    fn transactions_in_window(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, date, amount, description, category, transaction_type, ignored
                 FROM transactions WHERE date >= ?1 AND date < ?2 ORDER BY date ASC, id ASC",
            )
            .map_err(Error::storage("list transactions"))?;
        let rows = stmt
            .query_map(
                params![fmt_timestamp(&start), fmt_timestamp(&end)],
                row_to_transaction,
            )
            .map_err(Error::storage("list transactions"))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::storage("list transactions"))
    }

    pub fn get_transaction_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
            .map_err(Error::storage("count transactions"))
    }

    pub fn update_transaction_category(&mut self, id: i64, new_category: &str) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(Error::storage("update transaction category"))?;
        ensure_category(&tx, new_category)
            .map_err(Error::storage("update transaction category"))?;
        let changed = tx
            .execute(
                "UPDATE transactions SET category = ?1 WHERE id = ?2",
                params![new_category, id],
            )
            .map_err(Error::storage("update transaction category"))?;
        if changed == 0 {
            return Err(Error::NotFound(format!("transaction {id}")));
        }
        tx.commit()
            .map_err(Error::storage("update transaction category"))
    }

    /// Re-categorize by the full attribute tuple, for callers holding a
    /// display row rather than an id. Amounts compare by numeric equality of
    /// the exact decimal value. Zero matches is an error, never a silent
    /// success.
    pub fn update_category_by_match(
        &mut self,
        date: NaiveDateTime,
        amount: Decimal,
        description: &str,
        kind: TransactionType,
        new_category: &str,
    ) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(Error::storage("update transaction category"))?;
        let ids = matching_ids(
            &tx,
            "SELECT id, amount FROM transactions
             WHERE date = ?1 AND description = ?2 AND transaction_type = ?3",
            params![fmt_timestamp(&date), description, kind.as_str()],
            amount,
        )
        .map_err(Error::storage("update transaction category"))?;
        if ids.is_empty() {
            return Err(Error::NotFound(format!(
                "transaction matching '{description}'"
            )));
        }
        ensure_category(&tx, new_category)
            .map_err(Error::storage("update transaction category"))?;
        for id in &ids {
            tx.execute(
                "UPDATE transactions SET category = ?1 WHERE id = ?2",
                params![new_category, id],
            )
            .map_err(Error::storage("update transaction category"))?;
        }
        tx.commit()
            .map_err(Error::storage("update transaction category"))?;
        Ok(ids.len())
    }

    pub fn set_transaction_ignored(&self, id: i64, ignored: bool) -> Result<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE transactions SET ignored = ?1 WHERE id = ?2",
                params![ignored, id],
            )
            .map_err(Error::storage("set transaction ignored"))?;
        if changed == 0 {
            return Err(Error::NotFound(format!("transaction {id}")));
        }
        Ok(())
    }

    /// Returns the number of rows removed so callers can detect a no-op.
    pub fn delete_transaction(&self, id: i64) -> Result<usize> {
        self.conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])
            .map_err(Error::storage("delete transaction"))
    }

    /// Bulk delete by the full attribute tuple; returns the rows removed.
    pub fn delete_by_match(
        &mut self,
        date: NaiveDateTime,
        amount: Decimal,
        description: &str,
        category: &str,
        kind: TransactionType,
    ) -> Result<usize> {
        let tx = self
            .conn
            .transaction()
            .map_err(Error::storage("delete transaction"))?;
        let ids = matching_ids(
            &tx,
            "SELECT id, amount FROM transactions
             WHERE date = ?1 AND description = ?2 AND category = ?3 AND transaction_type = ?4",
            params![fmt_timestamp(&date), description, category, kind.as_str()],
            amount,
        )
        .map_err(Error::storage("delete transaction"))?;
        for id in &ids {
            tx.execute("DELETE FROM transactions WHERE id = ?1", params![id])
                .map_err(Error::storage("delete transaction"))?;
        }
        tx.commit().map_err(Error::storage("delete transaction"))?;
        Ok(ids.len())
    }

    // ── Categories ────────────────────────────────────────────

    pub fn add_category(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation("category name must not be empty".into()));
        }
        ensure_category(&self.conn, name).map_err(Error::storage("add category"))
    }

    /// Configured categories only; implicit ones live on transactions.
    pub fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, budget_goal, tags FROM categories ORDER BY name")
            .map_err(Error::storage("list categories"))?;
        let rows = stmt
            .query_map([], |row| {
                let goal: Option<String> = row.get(1)?;
                Ok(Category {
                    name: row.get(0)?,
                    budget_goal: goal.and_then(|g| Decimal::from_str(&g).ok()),
                    tags: row.get(2)?,
                })
            })
            .map_err(Error::storage("list categories"))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::storage("list categories"))
    }

    /// The union of configured names and names in use on transactions. A
    /// category exists here from usage alone, before it is ever configured.
    pub fn get_all_categories(&self) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT DISTINCT category FROM transactions WHERE category != ''
                 UNION SELECT name FROM categories",
            )
            .map_err(Error::storage("list categories"))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(Error::storage("list categories"))?;
        rows.collect::<std::result::Result<BTreeSet<_>, _>>()
            .map_err(Error::storage("list categories"))
    }

    /// Removes configuration only. Transactions referencing the name keep it,
    /// and the name stays visible through `get_all_categories` while in use.
    pub fn delete_category(&self, name: &str) -> Result<usize> {
        self.conn
            .execute("DELETE FROM categories WHERE name = ?1", params![name])
            .map_err(Error::storage("delete category"))
    }

    pub fn set_budget_goal(&self, category: &str, amount: Decimal) -> Result<()> {
        if category.trim().is_empty() {
            return Err(Error::Validation("category name must not be empty".into()));
        }
        if amount <= Decimal::ZERO {
            return Err(Error::Validation("budget goal must be positive".into()));
        }
        self.conn
            .execute(
                "INSERT INTO categories (name, budget_goal) VALUES (?1, ?2)
                 ON CONFLICT(name) DO UPDATE SET budget_goal = excluded.budget_goal",
                params![category, amount.to_string()],
            )
            .map_err(Error::storage("set budget goal"))?;
        Ok(())
    }

    pub fn get_budget_goal(&self, category: &str) -> Result<Option<Decimal>> {
        let result = self.conn.query_row(
            "SELECT budget_goal FROM categories WHERE name = ?1",
            params![category],
            |row| row.get::<_, Option<String>>(0),
        );
        match result {
            Ok(goal) => Ok(goal.and_then(|g| Decimal::from_str(&g).ok())),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Error::storage("get budget goal")(e)),
        }
    }

    pub fn get_budget_goals(&self) -> Result<BTreeMap<String, Decimal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, budget_goal FROM categories WHERE budget_goal IS NOT NULL")
            .map_err(Error::storage("list budget goals"))?;
        let rows = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let goal: String = row.get(1)?;
                Ok((name, Decimal::from_str(&goal).unwrap_or_default()))
            })
            .map_err(Error::storage("list budget goals"))?;
        rows.collect::<std::result::Result<BTreeMap<_, _>, _>>()
            .map_err(Error::storage("list budget goals"))
    }

    /// Upserts tags for a category, creating the row when absent. An empty
    /// value leaves existing tags untouched.
    pub fn set_category_tags(&self, category: &str, tags: &str) -> Result<()> {
        if category.trim().is_empty() {
            return Err(Error::Validation("category name must not be empty".into()));
        }
        self.conn
            .execute(
                "INSERT INTO categories (name, budget_goal, tags) VALUES (?1, NULL, ?2)
                 ON CONFLICT(name) DO UPDATE SET
                 tags = CASE WHEN excluded.tags != '' THEN excluded.tags ELSE categories.tags END",
                params![category, tags],
            )
            .map_err(Error::storage("set category tags"))?;
        Ok(())
    }

    /// Categories with a non-empty tag set.
    pub fn get_category_tags(&self) -> Result<BTreeMap<String, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, tags FROM categories WHERE tags != ''")
            .map_err(Error::storage("list category tags"))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(Error::storage("list category tags"))?;
        rows.collect::<std::result::Result<BTreeMap<_, _>, _>>()
            .map_err(Error::storage("list category tags"))
    }

    // ── Categorization rules ──────────────────────────────────

    /// Rejects empty patterns/categories and duplicate `(pattern, category)`
    /// identities before anything touches the store.
    pub fn add_rule(&self, rule: &Rule) -> Result<i64> {
        let pattern = rule.pattern.trim();
        let category = rule.category.trim();
        if pattern.is_empty() {
            return Err(Error::Validation("rule pattern must not be empty".into()));
        }
        if category.is_empty() {
            return Err(Error::Validation("rule category must not be empty".into()));
        }
        let exists: bool = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM categorization_rules WHERE pattern = ?1 AND category = ?2)",
                params![pattern, category],
                |row| row.get(0),
            )
            .map_err(Error::storage("add rule"))?;
        if exists {
            return Err(Error::Validation(format!(
                "rule ('{pattern}', '{category}') already exists"
            )));
        }
        self.conn
            .execute(
                "INSERT INTO categorization_rules (pattern, category, amount, amount_tolerance, priority)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    pattern,
                    category,
                    rule.amount.map(|a| a.value.to_string()),
                    rule.amount
                        .map(|a| a.tolerance)
                        .unwrap_or_else(default_tolerance)
                        .to_string(),
                    rule.priority,
                ],
            )
            .map_err(Error::storage("add rule"))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Highest priority first; insertion order breaks ties so repeated
    /// resolutions are reproducible.
    pub fn get_rules(&self) -> Result<Vec<Rule>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, pattern, category, amount, amount_tolerance, priority
                 FROM categorization_rules ORDER BY priority DESC, id ASC",
            )
            .map_err(Error::storage("list rules"))?;
        let rows = stmt
            .query_map([], |row| {
                let amount: Option<String> = row.get(3)?;
                let tolerance: String = row.get(4)?;
                Ok(Rule {
                    id: Some(row.get(0)?),
                    pattern: row.get(1)?,
                    category: row.get(2)?,
                    priority: row.get(5)?,
                    amount: amount.map(|a| AmountMatch {
                        value: Decimal::from_str(&a).unwrap_or_default(),
                        tolerance: Decimal::from_str(&tolerance)
                            .unwrap_or_else(|_| default_tolerance()),
                    }),
                })
            })
            .map_err(Error::storage("list rules"))?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::storage("list rules"))
    }

    pub fn delete_rule(&self, pattern: &str, category: &str) -> Result<usize> {
        self.conn
            .execute(
                "DELETE FROM categorization_rules WHERE pattern = ?1 AND category = ?2",
                params![pattern, category],
            )
            .map_err(Error::storage("delete rule"))
    }

    /// Resolve a category for a description (and optionally an amount) from
    /// the stored rule set. `None` means no rule matched; never a guess.
    pub fn resolve_category(
        &self,
        description: &str,
        amount: Option<Decimal>,
    ) -> Result<Option<String>> {
        let rules = self.get_rules()?;
        Ok(Resolver::new(&rules)
            .resolve(description, amount)
            .map(str::to_string))
    }

    /// One pass of the stored rules over every transaction, as a single
    /// committed batch. Returns `(updated, total)`. Running it again with no
    /// intervening changes updates nothing.
    pub fn apply_rules_to_existing(&mut self, policy: OverwritePolicy) -> Result<(usize, usize)> {
        let rules = self.get_rules()?;
        let resolver = Resolver::new(&rules);

        let tx = self
            .conn
            .transaction()
            .map_err(Error::storage("apply rules"))?;
        let rows: Vec<(i64, String, String, String)> = {
            let mut stmt = tx
                .prepare("SELECT id, description, amount, category FROM transactions")
                .map_err(Error::storage("apply rules"))?;
            let mapped = stmt
                .query_map([], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                })
                .map_err(Error::storage("apply rules"))?;
            mapped
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(Error::storage("apply rules"))?
        };

        let total = rows.len();
        let mut updated = 0;
        for (id, description, amount, category) in &rows {
            let eligible = match policy {
                OverwritePolicy::All => true,
                OverwritePolicy::IfUncategorized => needs_category(category),
            };
            if !eligible {
                continue;
            }
            let amount = Decimal::from_str(amount).unwrap_or_default();
            if let Some(new_category) = resolver.resolve(description, Some(amount)) {
                if new_category != category {
                    ensure_category(&tx, new_category).map_err(Error::storage("apply rules"))?;
                    tx.execute(
                        "UPDATE transactions SET category = ?1 WHERE id = ?2",
                        params![new_category, id],
                    )
                    .map_err(Error::storage("apply rules"))?;
                    updated += 1;
                }
            }
        }
        tx.commit().map_err(Error::storage("apply rules"))?;
        debug!(updated, total, "applied rules to existing transactions");
        Ok((updated, total))
    }
}

// ── Helpers ───────────────────────────────────────────────────

fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(1)?;
    let amount_str: String = row.get(2)?;
    let date = parse_timestamp(&date_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        date,
        amount: Decimal::from_str(&amount_str).unwrap_or_default(),
        description: row.get(3)?,
        category: row.get(4)?,
        kind: TransactionType::parse(&row.get::<_, String>(5)?),
        ignored: row.get(6)?,
    })
}

/// Registers a category name so the category and transaction tables never
/// disagree about names in use. Blank names are not categories.
fn ensure_category(conn: &Connection, name: &str) -> rusqlite::Result<()> {
    if name.trim().is_empty() {
        return Ok(());
    }
    conn.execute(
        "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
        params![name],
    )?;
    Ok(())
}

/// Candidate ids whose stored amount equals `amount` numerically. String
/// comparison would false-negative on formatting differences ("16.0" vs
/// "16.00").
fn matching_ids(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
    amount: Decimal,
) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?;
    let mut ids = Vec::new();
    for row in rows {
        let (id, amount_str) = row?;
        if Decimal::from_str(&amount_str).map(|a| a == amount).unwrap_or(false) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn apply_migration(conn: &Connection, version: i32) -> rusqlite::Result<()> {
    match version {
        2 => {
            // Additive columns; guarded so stores ALTERed by older builds
            // upgrade cleanly.
            if !has_column(conn, "categories", "tags")? {
                conn.execute(
                    "ALTER TABLE categories ADD COLUMN tags TEXT NOT NULL DEFAULT ''",
                    [],
                )?;
            }
            if !has_column(conn, "transactions", "ignored")? {
                conn.execute(
                    "ALTER TABLE transactions ADD COLUMN ignored INTEGER NOT NULL DEFAULT 0",
                    [],
                )?;
            }
        }
        3 => {
            if !has_column(conn, "categorization_rules", "amount")? {
                conn.execute_batch(schema::RULES_REBUILD)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        params![name],
        |row| row.get(0),
    )
}

fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM pragma_table_info(?1) WHERE name = ?2",
        params![table, column],
        |row| row.get(0),
    )
}

/// Stored timestamps are normalized to this shape so text ordering is
/// chronological ordering.
pub(crate) fn fmt_timestamp(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub(crate) fn parse_timestamp(s: &str) -> chrono::ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
}

fn month_bounds(day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = day.with_day(1).unwrap_or(day);
    let end = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
    }
    .unwrap_or(start);
    (start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
}

fn year_bounds(year: i32) -> (NaiveDateTime, NaiveDateTime) {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap_or(NaiveDate::MAX);
    (start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
}
