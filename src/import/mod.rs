//! Entry point for the import collaborator. The producer hands over fully
//! parsed transaction records; this module only categorizes the blanks and
//! persists them, one row at a time so a bad row never takes down the batch.

use tracing::{info, warn};

use crate::categorize::{normalize_suggestion, CategorySuggester, Resolver, UNCATEGORIZED};
use crate::db::Database;
use crate::error::Result;
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Persists a batch of already-parsed records. Records with a blank category
/// go through the rule engine, then — only when no rule matched and a
/// suggester is present — the suggester, and otherwise fall back to
/// `Uncategorized`. A failed row is logged and counted; rows already
/// committed stay committed.
pub fn import_transactions(
    db: &mut Database,
    records: &[Transaction],
    suggester: Option<&dyn CategorySuggester>,
) -> Result<ImportSummary> {
    let rules = db.get_rules()?;
    let resolver = Resolver::new(&rules);
    let known = db.get_all_categories()?;

    let mut summary = ImportSummary::default();
    for record in records {
        let mut txn = record.clone();
        if txn.category.trim().is_empty() {
            txn.category = match resolver.resolve(&txn.description, Some(txn.amount)) {
                Some(category) => category.to_string(),
                None => match suggester {
                    Some(s) => {
                        normalize_suggestion(&s.suggest(&txn.description, txn.amount, &known), &known)
                    }
                    None => UNCATEGORIZED.to_string(),
                },
            };
        }
        match db.insert_transaction(&txn) {
            Ok(_) => summary.imported += 1,
            Err(e) => {
                warn!(description = %txn.description, error = %e, "skipping import row");
                summary.skipped += 1;
            }
        }
    }

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        "import complete"
    );
    Ok(summary)
}
