#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::TransactionType;

fn make_txn(
    y: i32,
    m: u32,
    d: u32,
    amount: Decimal,
    category: &str,
    kind: TransactionType,
) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        amount,
        "test".into(),
        category.into(),
        kind,
    )
}

fn expense(y: i32, m: u32, d: u32, amount: Decimal, category: &str) -> Transaction {
    make_txn(y, m, d, amount, category, TransactionType::Expense)
}

fn income(y: i32, m: u32, d: u32, amount: Decimal, category: &str) -> Transaction {
    make_txn(y, m, d, amount, category, TransactionType::Income)
}

fn goals(entries: &[(&str, Decimal)]) -> BTreeMap<String, Decimal> {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn tags(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ── category_totals ───────────────────────────────────────────

#[test]
fn test_category_totals_groups_expenses() {
    let txns = vec![
        expense(2024, 1, 5, dec!(20.00), "Groceries"),
        expense(2024, 1, 9, dec!(35.50), "Groceries"),
        expense(2024, 1, 12, dec!(12.00), "Coffee Shops"),
        income(2024, 1, 15, dec!(3000.00), "Salary"),
    ];
    let totals = category_totals(&txns);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals["Groceries"], dec!(55.50));
    assert_eq!(totals["Coffee Shops"], dec!(12.00));
    // Income never shows up in spending totals
    assert!(!totals.contains_key("Salary"));
}

#[test]
fn test_category_totals_skips_ignored() {
    let mut refund = expense(2024, 1, 5, dec!(100.00), "Groceries");
    refund.ignored = true;
    let txns = vec![refund, expense(2024, 1, 9, dec!(10.00), "Groceries")];
    assert_eq!(category_totals(&txns)["Groceries"], dec!(10.00));
}

#[test]
fn test_category_totals_empty() {
    assert!(category_totals(&[]).is_empty());
}

// ── budget_vs_actual ──────────────────────────────────────────

#[test]
fn test_budget_vs_actual_buckets() {
    let month = vec![
        income(2024, 1, 1, dec!(3200.00), "Salary"),
        expense(2024, 1, 10, dec!(250.00), "Groceries"),
        expense(2024, 1, 20, dec!(1200.00), "Rent"),
    ];
    let goals = goals(&[
        ("Salary", dec!(3000.00)),
        ("Groceries", dec!(300.00)),
        ("Rent", dec!(1200.00)),
    ]);
    let tags = tags(&[("Salary", "income"), ("Groceries", "essential")]);

    let summary = budget_vs_actual(&month, &goals, &tags);
    assert_eq!(summary.budget_income, dec!(3000.00));
    // Untagged goals are expense targets
    assert_eq!(summary.budget_expense, dec!(1500.00));
    assert_eq!(summary.actual_income, dec!(3200.00));
    assert_eq!(summary.actual_expense, dec!(1450.00));
    assert_eq!(summary.budget_balance(), dec!(1500.00));
    assert_eq!(summary.actual_balance(), dec!(1750.00));
}

#[test]
fn test_budget_vs_actual_revenue_tag_counts_as_income() {
    let goals = goals(&[("Consulting", dec!(2000.00))]);
    let tags = tags(&[("Consulting", "Revenue, irregular")]);
    let summary = budget_vs_actual(&[], &goals, &tags);
    assert_eq!(summary.budget_income, dec!(2000.00));
    assert_eq!(summary.budget_expense, dec!(0));
}

#[test]
fn test_budget_vs_actual_skips_ignored() {
    let mut reimbursed = expense(2024, 1, 10, dec!(500.00), "Travel");
    reimbursed.ignored = true;
    let month = vec![reimbursed, expense(2024, 1, 11, dec!(40.00), "Travel")];
    let summary = budget_vs_actual(&month, &BTreeMap::new(), &BTreeMap::new());
    assert_eq!(summary.actual_expense, dec!(40.00));
}

#[test]
fn test_budget_vs_actual_empty() {
    let summary = budget_vs_actual(&[], &BTreeMap::new(), &BTreeMap::new());
    assert_eq!(summary, BudgetSummary::default());
    assert_eq!(summary.budget_balance(), dec!(0));
    assert_eq!(summary.actual_balance(), dec!(0));
}

// ── year_over_year ────────────────────────────────────────────

#[test]
fn test_year_over_year_per_category() {
    let prior = vec![
        expense(2023, 3, 1, dec!(100.00), "Groceries"),
        expense(2023, 6, 1, dec!(50.00), "Travel"),
    ];
    let current = vec![
        expense(2024, 3, 1, dec!(150.00), "Groceries"),
        expense(2024, 8, 1, dec!(75.00), "Dining"),
    ];

    let cmp = year_over_year(&prior, &current, None);
    assert_eq!(cmp.by_category.len(), 3);

    let groceries = &cmp.by_category["Groceries"];
    assert_eq!(groceries.prior, dec!(100.00));
    assert_eq!(groceries.current, dec!(150.00));
    assert_eq!(groceries.difference(), dec!(50.00));
    assert_eq!(groceries.percent_change(), Some(dec!(50)));

    // Seen last year only
    let travel = &cmp.by_category["Travel"];
    assert_eq!(travel.current, dec!(0));
    assert_eq!(travel.percent_change(), Some(dec!(-100)));

    assert_eq!(cmp.total.prior, dec!(150.00));
    assert_eq!(cmp.total.current, dec!(225.00));
    assert_eq!(cmp.total.difference(), dec!(75.00));
    assert_eq!(cmp.total.percent_change(), Some(dec!(50)));
}

#[test]
fn test_year_over_year_zero_prior_is_not_a_division() {
    let current = vec![expense(2024, 5, 1, dec!(100.00), "Dining")];
    let cmp = year_over_year(&[], &current, None);

    // Prior total is exactly zero: "N/A", never a divide-by-zero
    assert_eq!(cmp.by_category["Dining"].percent_change(), None);
    assert_eq!(cmp.total.percent_change(), None);
    assert_eq!(cmp.total.difference(), dec!(100.00));
}

#[test]
fn test_year_over_year_category_filter() {
    let prior = vec![
        expense(2023, 3, 1, dec!(100.00), "Groceries"),
        expense(2023, 6, 1, dec!(50.00), "Travel"),
    ];
    let current = vec![expense(2024, 3, 1, dec!(80.00), "Groceries")];

    let cmp = year_over_year(&prior, &current, Some("Groceries"));
    assert_eq!(cmp.by_category.len(), 1);
    assert_eq!(cmp.total.prior, dec!(100.00));
    assert_eq!(cmp.total.current, dec!(80.00));
    assert_eq!(cmp.total.percent_change(), Some(dec!(-20)));
}

// ── monthly_net_series ────────────────────────────────────────

#[test]
fn test_monthly_net_series() {
    let txns = vec![
        income(2024, 1, 1, dec!(3000.00), "Salary"),
        expense(2024, 1, 15, dec!(1200.00), "Rent"),
        expense(2024, 2, 15, dec!(1200.00), "Rent"),
    ];
    let series = monthly_net_series(&txns, None);
    assert_eq!(series.len(), 2);
    assert_eq!(series["2024-01"], dec!(1800.00));
    assert_eq!(series["2024-02"], dec!(-1200.00));
}

#[test]
fn test_monthly_net_series_category_filter() {
    let txns = vec![
        expense(2024, 1, 15, dec!(1200.00), "Rent"),
        expense(2024, 1, 20, dec!(80.00), "Groceries"),
    ];
    let series = monthly_net_series(&txns, Some("Rent"));
    assert_eq!(series["2024-01"], dec!(-1200.00));
}

#[test]
fn test_monthly_net_series_skips_ignored() {
    let mut big = expense(2024, 1, 15, dec!(9999.00), "Rent");
    big.ignored = true;
    let txns = vec![big, expense(2024, 1, 20, dec!(80.00), "Rent")];
    assert_eq!(monthly_net_series(&txns, None)["2024-01"], dec!(-80.00));
}

// ── Projection ────────────────────────────────────────────────

#[test]
fn test_project_forward_linear() {
    let goals = goals(&[("Salary", dec!(3000.00)), ("Rent", dec!(1200.00))]);
    let tags = tags(&[("Salary", "income")]);

    assert_eq!(monthly_budget_net(&goals, &tags), dec!(1800.00));

    let projection = project_forward(&goals, &tags, 4);
    assert_eq!(
        projection,
        vec![dec!(1800.00), dec!(3600.00), dec!(5400.00), dec!(7200.00)]
    );
    // Monotonic for a positive net
    for window in projection.windows(2) {
        assert!(window[1] > window[0]);
    }
}

#[test]
fn test_project_forward_negative_net() {
    let goals = goals(&[("Rent", dec!(1000.00))]);
    let projection = project_forward(&goals, &BTreeMap::new(), 2);
    assert_eq!(projection, vec![dec!(-1000.00), dec!(-2000.00)]);
}

#[test]
fn test_project_forward_zero_months() {
    assert!(project_forward(&BTreeMap::new(), &BTreeMap::new(), 0).is_empty());
}

// ── Chart boundary ────────────────────────────────────────────

#[test]
fn test_chart_points() {
    let mut series = BTreeMap::new();
    series.insert("2024-01".to_string(), dec!(1800.50));
    series.insert("2024-02".to_string(), dec!(-1200.00));

    let points = chart_points(&series);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].0, "2024-01");
    assert!((points[0].1 - 1800.5).abs() < f64::EPSILON);
    assert!((points[1].1 + 1200.0).abs() < f64::EPSILON);
}
