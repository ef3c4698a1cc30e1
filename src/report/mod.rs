//! Pure read-side aggregation over transactions and budget goals. Nothing
//! here mutates stored state, and all arithmetic stays in the exact decimal
//! type; floats exist only behind [`chart_points`] for the presentation
//! boundary. Ignored transactions are excluded from every figure.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{is_income_tagged, Transaction};

/// Total spending per category: expense-type, non-ignored transactions only.
pub fn category_totals(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions {
        if txn.is_expense() && !txn.ignored {
            *totals.entry(txn.category.clone()).or_default() += txn.amount;
        }
    }
    totals
}

/// Budget-vs-actual figures for one month. Goals are split into income and
/// expense buckets by each category's tags; actuals come from the supplied
/// month's transactions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BudgetSummary {
    pub budget_income: Decimal,
    pub budget_expense: Decimal,
    pub actual_income: Decimal,
    pub actual_expense: Decimal,
}

impl BudgetSummary {
    pub fn budget_balance(&self) -> Decimal {
        self.budget_income - self.budget_expense
    }

    pub fn actual_balance(&self) -> Decimal {
        self.actual_income - self.actual_expense
    }
}

pub fn budget_vs_actual(
    month: &[Transaction],
    goals: &BTreeMap<String, Decimal>,
    tags: &BTreeMap<String, String>,
) -> BudgetSummary {
    let mut summary = BudgetSummary::default();

    for (category, goal) in goals {
        let category_tags = tags.get(category).map(String::as_str).unwrap_or("");
        if is_income_tagged(category_tags) {
            summary.budget_income += *goal;
        } else {
            summary.budget_expense += *goal;
        }
    }

    for txn in month {
        if txn.ignored {
            continue;
        }
        if txn.is_income() {
            summary.actual_income += txn.amount;
        } else {
            summary.actual_expense += txn.amount;
        }
    }

    summary
}

/// Expense totals for the same slice of two consecutive years.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub prior: Decimal,
    pub current: Decimal,
}

impl Delta {
    pub fn difference(&self) -> Decimal {
        self.current - self.prior
    }

    /// `None` when the prior total is exactly zero — presented as "N/A",
    /// never a division error.
    pub fn percent_change(&self) -> Option<Decimal> {
        if self.prior.is_zero() {
            None
        } else {
            Some(self.difference() / self.prior * Decimal::ONE_HUNDRED)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearComparison {
    pub by_category: BTreeMap<String, Delta>,
    pub total: Delta,
}

/// Per-category (or, with a filter, single-category) expense totals for two
/// consecutive years. `None` means all categories.
pub fn year_over_year(
    prior: &[Transaction],
    current: &[Transaction],
    category: Option<&str>,
) -> YearComparison {
    let prior_totals = filtered_totals(prior, category);
    let current_totals = filtered_totals(current, category);

    let mut by_category: BTreeMap<String, Delta> = BTreeMap::new();
    for (name, amount) in &prior_totals {
        by_category.entry(name.clone()).or_default().prior = *amount;
    }
    for (name, amount) in &current_totals {
        by_category.entry(name.clone()).or_default().current = *amount;
    }

    let total = Delta {
        prior: prior_totals.values().copied().sum(),
        current: current_totals.values().copied().sum(),
    };

    YearComparison { by_category, total }
}

fn filtered_totals(
    transactions: &[Transaction],
    category: Option<&str>,
) -> BTreeMap<String, Decimal> {
    let mut totals = category_totals(transactions);
    if let Some(name) = category {
        totals.retain(|k, _| k == name);
    }
    totals
}

/// Net cash flow per month (`"YYYY-MM"` keys): income adds, expense
/// subtracts. Optionally restricted to one category.
pub fn monthly_net_series(
    transactions: &[Transaction],
    category: Option<&str>,
) -> BTreeMap<String, Decimal> {
    let mut series: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in transactions {
        if txn.ignored {
            continue;
        }
        if let Some(name) = category {
            if txn.category != name {
                continue;
            }
        }
        let key = txn.date.format("%Y-%m").to_string();
        *series.entry(key).or_default() += txn.signed_amount();
    }
    series
}

/// Constant per-month net implied by the configured goals: income-tagged
/// goals add, the rest subtract.
pub fn monthly_budget_net(
    goals: &BTreeMap<String, Decimal>,
    tags: &BTreeMap<String, String>,
) -> Decimal {
    let mut net = Decimal::ZERO;
    for (category, goal) in goals {
        let category_tags = tags.get(category).map(String::as_str).unwrap_or("");
        if is_income_tagged(category_tags) {
            net += *goal;
        } else {
            net -= *goal;
        }
    }
    net
}

/// Linear projection from a zero baseline: the cumulative budget net after
/// each of `n_months` successive months. A deterministic extrapolation, not
/// a forecast.
pub fn project_forward(
    goals: &BTreeMap<String, Decimal>,
    tags: &BTreeMap<String, String>,
    n_months: usize,
) -> Vec<Decimal> {
    let net = monthly_budget_net(goals, tags);
    let mut running = Decimal::ZERO;
    (0..n_months)
        .map(|_| {
            running += net;
            running
        })
        .collect()
}

/// The one sanctioned decimal-to-float conversion, for charting only. The
/// result must never feed back into stored or compared values.
pub fn chart_points(series: &BTreeMap<String, Decimal>) -> Vec<(String, f64)> {
    series
        .iter()
        .map(|(k, v)| (k.clone(), v.to_f64().unwrap_or(0.0)))
        .collect()
}

#[cfg(test)]
mod tests;
