mod category;
mod rule;
mod transaction;

pub use category::{is_income_tagged, Category};
pub use rule::{default_tolerance, AmountMatch, Rule};
pub use transaction::{Transaction, TransactionType};
