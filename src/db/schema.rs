/// Full current-shape schema, applied to fresh stores.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS transactions (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    date             TEXT NOT NULL,
    amount           TEXT NOT NULL,
    description      TEXT NOT NULL,
    category         TEXT NOT NULL DEFAULT '',
    transaction_type TEXT NOT NULL,
    ignored          INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);

CREATE TABLE IF NOT EXISTS categories (
    name        TEXT PRIMARY KEY,
    budget_goal TEXT,
    tags        TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS categorization_rules (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern          TEXT NOT NULL,
    category         TEXT NOT NULL,
    amount           TEXT,
    amount_tolerance TEXT NOT NULL DEFAULT '0.01',
    priority         INTEGER NOT NULL DEFAULT 0,
    UNIQUE(pattern, category)
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 3;

/// v3: rules gain optional amount matching. The table is rebuilt in the new
/// shape and every existing row is carried over with defaulted new columns.
pub(crate) const RULES_REBUILD: &str = r#"
CREATE TABLE categorization_rules_new (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern          TEXT NOT NULL,
    category         TEXT NOT NULL,
    amount           TEXT,
    amount_tolerance TEXT NOT NULL DEFAULT '0.01',
    priority         INTEGER NOT NULL DEFAULT 0,
    UNIQUE(pattern, category)
);
INSERT OR IGNORE INTO categorization_rules_new (pattern, category, priority)
    SELECT pattern, category, priority FROM categorization_rules;
DROP TABLE categorization_rules;
ALTER TABLE categorization_rules_new RENAME TO categorization_rules;
"#;

/// Pre-v3 rule table, used when seeding a legacy-shape store in tests.
#[cfg(test)]
pub(crate) const LEGACY_V1: &str = r#"
CREATE TABLE transactions (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    date             TEXT NOT NULL,
    amount           TEXT NOT NULL,
    description      TEXT NOT NULL,
    category         TEXT NOT NULL DEFAULT '',
    transaction_type TEXT NOT NULL
);

CREATE TABLE categories (
    name        TEXT PRIMARY KEY,
    budget_goal TEXT
);

CREATE TABLE categorization_rules (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    pattern  TEXT NOT NULL,
    category TEXT NOT NULL,
    priority INTEGER NOT NULL DEFAULT 0
);
"#;
