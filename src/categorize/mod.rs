use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::models::{AmountMatch, Rule, Transaction};

/// Sentinel category for transactions nothing could classify.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// How a bulk rule-application pass treats already-categorized rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Only rows whose category is blank or the `Uncategorized` sentinel.
    IfUncategorized,
    /// Every row, overwriting existing categories.
    All,
}

/// True when a category value counts as "not yet categorized".
pub fn needs_category(category: &str) -> bool {
    category.trim().is_empty() || category == UNCATEGORIZED
}

/// A compiled snapshot of a rule set. Rules are ordered by priority, highest
/// first; equal priorities keep their slice order, so passing rules in
/// insertion order makes repeated resolutions reproducible.
pub struct Resolver {
    rules: Vec<CompiledRule>,
}

struct CompiledRule {
    pattern: String,
    category: String,
    amount: Option<AmountMatch>,
}

impl Resolver {
    pub fn new(rules: &[Rule]) -> Self {
        let mut ordered: Vec<&Rule> = rules.iter().collect();
        ordered.sort_by_key(|r| std::cmp::Reverse(r.priority));
        let compiled = ordered
            .into_iter()
            .map(|r| CompiledRule {
                pattern: r.pattern.to_lowercase(),
                category: r.category.clone(),
                amount: r.amount,
            })
            .collect();
        Self { rules: compiled }
    }

    /// First matching rule wins. A rule matches when its pattern is a
    /// case-insensitive substring of the description and, if it carries an
    /// amount constraint, the amount is within tolerance (inclusive). A rule
    /// with an amount constraint never matches when no amount is supplied.
    /// `None` means no rule matched; the engine never guesses.
    pub fn resolve(&self, description: &str, amount: Option<Decimal>) -> Option<&str> {
        let desc_lower = description.to_lowercase();

        for rule in &self.rules {
            if !desc_lower.contains(&rule.pattern) {
                continue;
            }
            let amount_ok = match (&rule.amount, amount) {
                (None, _) => true,
                (Some(constraint), Some(amount)) => constraint.matches(amount),
                (Some(_), None) => false,
            };
            if amount_ok {
                return Some(&rule.category);
            }
        }

        None
    }
}

/// Collaborator that proposes a category when no rule matches. External and
/// optional; the core never depends on one being present.
pub trait CategorySuggester {
    fn suggest(
        &self,
        description: &str,
        amount: Decimal,
        known_categories: &BTreeSet<String>,
    ) -> String;
}

/// Any response outside the known category set collapses to the
/// `Uncategorized` sentinel.
pub fn normalize_suggestion(response: &str, known: &BTreeSet<String>) -> String {
    let trimmed = response.trim();
    if known.contains(trimmed) {
        trimmed.to_string()
    } else {
        UNCATEGORIZED.to_string()
    }
}

/// Propose rules from transaction history: repeated descriptions that were
/// consistently categorized become a substring rule, with an amount
/// constraint when the amount repeats too. Pure and deterministic.
pub fn suggest_rules(transactions: &[Transaction]) -> Vec<Rule> {
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for txn in transactions {
        let key: Vec<&str> = txn
            .description
            .split_whitespace()
            .filter(|w| w.len() > 3)
            .collect();
        if key.is_empty() {
            continue;
        }
        groups.entry(key.join(" ").to_lowercase()).or_default().push(txn);
    }

    let mut rules = Vec::new();
    for (pattern, group) in &groups {
        if group.len() < 2 {
            continue;
        }
        let categories: BTreeSet<&str> = group.iter().map(|t| t.category.as_str()).collect();
        if categories.len() != 1 {
            continue;
        }
        let category = group[0].category.clone();
        if needs_category(&category) {
            continue;
        }
        let amounts: BTreeSet<Decimal> = group.iter().map(|t| t.amount).collect();
        let mut rule = Rule::new(pattern.clone(), category);
        if amounts.len() == 1 {
            rule = rule.with_amount(AmountMatch::new(group[0].amount));
        }
        rules.push(rule);
    }
    rules
}
