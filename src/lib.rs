//! Core engine for a personal budget tracker: owns the transaction,
//! category and categorization-rule schema (including in-place migration),
//! resolves prioritized rules against transaction descriptions and amounts,
//! and computes budget and time-window aggregates. Presentation, CSV
//! parsing and AI clients are the consuming application's concern.

pub mod categorize;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod report;

pub use categorize::{CategorySuggester, OverwritePolicy, Resolver, UNCATEGORIZED};
pub use db::Database;
pub use error::{Error, Result};
pub use import::ImportSummary;
pub use models::{AmountMatch, Category, Rule, Transaction, TransactionType};
