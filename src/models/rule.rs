use rust_decimal::Decimal;

/// Optional amount constraint on a rule: matches when the transaction amount
/// is within `tolerance` of `value`, boundary inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountMatch {
    pub value: Decimal,
    pub tolerance: Decimal,
}

impl AmountMatch {
    pub fn new(value: Decimal) -> Self {
        Self {
            value,
            tolerance: default_tolerance(),
        }
    }

    pub fn with_tolerance(value: Decimal, tolerance: Decimal) -> Self {
        Self { value, tolerance }
    }

    pub fn matches(&self, amount: Decimal) -> bool {
        (amount - self.value).abs() <= self.tolerance
    }
}

/// One minimal currency unit.
pub fn default_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// A categorization rule. `pattern` is matched case-insensitively as a
/// substring of the transaction description. Identity is `(pattern,
/// category)`; edits are delete + recreate.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: Option<i64>,
    pub pattern: String,
    pub category: String,
    pub priority: i32,
    pub amount: Option<AmountMatch>,
}

impl Rule {
    pub fn new(pattern: String, category: String) -> Self {
        Self {
            id: None,
            pattern,
            category,
            priority: 0,
            amount: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_amount(mut self, amount: AmountMatch) -> Self {
        self.amount = Some(amount);
        self
    }
}
