use std::fmt::Write as _;

use chrono::NaiveDateTime;
use finboard_core::analytics::{CategoryBreakdown, MonthlyTrend, SummaryResponse};
use finboard_core::budgets::{BudgetStatus, BudgetTier};
use finboard_core::transactions::{Transaction, TransactionType};
use rust_decimal::Decimal;

/// Everything the dashboard renders, fetched in one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub summary: SummaryResponse,
    pub by_category: Vec<CategoryBreakdown>,
    pub trend: Vec<MonthlyTrend>,
    pub budgets: Vec<BudgetStatus>,
    pub recent: Vec<Transaction>,
    pub fetched_at: NaiveDateTime,
}

impl Snapshot {
    /// Expense categories sorted by total, largest first.
    pub fn top_expenses(&self) -> Vec<&CategoryBreakdown> {
        let mut rows: Vec<&CategoryBreakdown> = self
            .by_category
            .iter()
            .filter(|row| row.category_type == TransactionType::Expense)
            .collect();
        rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        rows
    }

    pub fn budgets_over(&self) -> usize {
        self.budgets
            .iter()
            .filter(|b| b.status == BudgetTier::Over)
            .count()
    }
}

/// Formats an amount as `$1,234.56`, with a leading minus for negatives.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

pub fn format_amount(amount: f64) -> String {
    format_money(Decimal::try_from(amount).unwrap_or_default())
}

pub fn tier_label(tier: BudgetTier) -> &'static str {
    match tier {
        BudgetTier::Under => "UNDER",
        BudgetTier::Near => "NEAR",
        BudgetTier::Over => "OVER",
    }
}

/// Plain-text rendering used by `--once`.
pub fn report(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let s = &snapshot.summary;

    let _ = writeln!(
        out,
        "Finboard at {}",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Income:       {}", format_money(s.total_income));
    let _ = writeln!(out, "Expenses:     {}", format_money(s.total_expenses));
    let _ = writeln!(out, "Balance:      {}", format_money(s.balance));
    let _ = writeln!(out, "Transactions: {}", s.transaction_count);

    if !snapshot.trend.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Monthly trend");
        for month in &snapshot.trend {
            let _ = writeln!(
                out,
                "  {:<9} {}  in {:>14}  out {:>14}  net {:>14}",
                month.month,
                month.year,
                format_money(month.income),
                format_money(month.expenses),
                format_money(month.balance)
            );
        }
    }

    let expenses = snapshot.top_expenses();
    if !expenses.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Expenses by category");
        for row in expenses {
            let _ = writeln!(
                out,
                "  {:<16} {:>14}  ({})",
                row.category_name,
                format_money(row.total_amount),
                row.transaction_count
            );
        }
    }

    if !snapshot.budgets.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Budgets");
        for budget in &snapshot.budgets {
            let _ = writeln!(
                out,
                "  {:<16} {:>12} / {:>12}  {:>6}%  {}",
                budget.category_name,
                format_money(budget.spent_amount),
                format_money(budget.budget_amount),
                budget.percentage_used.round_dp(1),
                tier_label(budget.status)
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finboard_core::budgets::BudgetPeriod;
    use rust_decimal_macros::dec;

    fn snapshot() -> Snapshot {
        let start = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();
        Snapshot {
            summary: SummaryResponse {
                total_income: dec!(100000),
                total_expenses: dec!(1500),
                balance: dec!(98500),
                transaction_count: 2,
            },
            by_category: vec![
                CategoryBreakdown {
                    category_id: 2,
                    category_name: "Groceries".into(),
                    category_type: TransactionType::Expense,
                    total_amount: dec!(300),
                    transaction_count: 3,
                },
                CategoryBreakdown {
                    category_id: 1,
                    category_name: "Rent".into(),
                    category_type: TransactionType::Expense,
                    total_amount: dec!(1200),
                    transaction_count: 1,
                },
            ],
            trend: vec![MonthlyTrend {
                month: "October".into(),
                year: 2026,
                income: dec!(100000),
                expenses: dec!(1500),
                balance: dec!(98500),
            }],
            budgets: vec![BudgetStatus {
                budget_id: 1,
                category_id: 1,
                category_name: "Rent".into(),
                period: BudgetPeriod::Monthly,
                period_start: start,
                period_end: end,
                budget_amount: dec!(1000),
                spent_amount: dec!(1200),
                remaining: dec!(-200),
                percentage_used: dec!(120),
                is_over_budget: true,
                status: BudgetTier::Over,
            }],
            recent: vec![],
            fetched_at: start.and_hms_opt(9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn money_is_grouped_by_thousands() {
        assert_eq!(format_money(dec!(0)), "$0.00");
        assert_eq!(format_money(dec!(999.5)), "$999.50");
        assert_eq!(format_money(dec!(1234.567)), "$1,234.57");
        assert_eq!(format_money(dec!(98500)), "$98,500.00");
        assert_eq!(format_money(dec!(-1234567.1)), "-$1,234,567.10");
        assert_eq!(format_amount(15.0), "$15.00");
    }

    #[test]
    fn top_expenses_are_sorted_largest_first() {
        let snap = snapshot();
        let names: Vec<_> = snap
            .top_expenses()
            .iter()
            .map(|row| row.category_name.as_str())
            .collect();
        assert_eq!(names, vec!["Rent", "Groceries"]);
        assert_eq!(snap.budgets_over(), 1);
    }

    #[test]
    fn report_lists_every_section() {
        let text = report(&snapshot());
        assert!(text.starts_with("Finboard at 2026-10-01 09:30:00"));
        assert!(text.contains("Income:       $100,000.00"));
        assert!(text.contains("Balance:      $98,500.00"));
        assert!(text.contains("October"));
        assert!(text.contains("Groceries"));
        assert!(text.contains("OVER"));
    }
}
