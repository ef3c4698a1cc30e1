use chrono::NaiveDateTime;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "income" => Self::Income,
            _ => Self::Expense,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single financial transaction. `amount` is always non-negative; the
/// direction is carried by `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Option<i64>,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub kind: TransactionType,
    /// Excluded from every aggregate, kept for display and audit.
    pub ignored: bool,
}

impl Transaction {
    pub fn new(
        date: NaiveDateTime,
        amount: Decimal,
        description: String,
        category: String,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: None,
            date,
            amount,
            description,
            category,
            kind,
            ignored: false,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with its direction applied: income positive, expense negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}
