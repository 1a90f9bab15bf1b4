//! Sample data for demos: default categories, about three months of
//! transactions and a monthly budget per expense category.

use chrono::{Duration, NaiveDate};
use finboard_core::analytics::SummaryResponse;
use finboard_core::budgets::{BudgetPeriod, NewBudget};
use finboard_core::categories::Category;
use finboard_core::transactions::{NewTransaction, TransactionQuery, TransactionType};
use finboard_core::utils::time_utils::today;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::main_lib::AppState;

/// Days of history covered by generated transactions.
pub const SEED_WINDOW_DAYS: i64 = 90;

const RECURRING_MONTHS: i64 = 3;
const INCOME_SHARE: f64 = 0.3;

const INCOME_RANGES: &[(&str, f64, f64)] = &[
    ("Salary", 30000.0, 80000.0),
    ("Freelance", 5000.0, 25000.0),
    ("Investment", 1000.0, 10000.0),
    ("Gift", 500.0, 5000.0),
    ("Other Income", 100.0, 3000.0),
];

const EXPENSE_RANGES: &[(&str, f64, f64)] = &[
    ("Food & Dining", 100.0, 3000.0),
    ("Transportation", 200.0, 2000.0),
    ("Utilities", 500.0, 3000.0),
    ("Rent", 8000.0, 25000.0),
    ("Entertainment", 200.0, 2000.0),
    ("Shopping", 500.0, 5000.0),
    ("Healthcare", 200.0, 5000.0),
    ("Education", 500.0, 10000.0),
    ("Travel", 2000.0, 20000.0),
    ("Other Expense", 100.0, 1000.0),
];

const DESCRIPTIONS: &[(&str, &[&str])] = &[
    ("Salary", &["Monthly salary", "Salary payment", "Paycheck deposit"]),
    (
        "Freelance",
        &["Web development project", "Design work", "Consulting fee", "Contract work"],
    ),
    (
        "Investment",
        &["Dividend payment", "Stock sale", "Interest income", "Mutual fund returns"],
    ),
    ("Gift", &["Birthday gift", "Holiday bonus", "Cash gift"]),
    (
        "Other Income",
        &["Refund received", "Cashback", "Lottery win", "Side hustle"],
    ),
    (
        "Food & Dining",
        &["Grocery shopping", "Restaurant dinner", "Coffee shop", "Fast food", "Food delivery"],
    ),
    (
        "Transportation",
        &["Fuel", "Bus fare", "Metro ticket", "Uber ride", "Car maintenance"],
    ),
    (
        "Utilities",
        &["Electricity bill", "Water bill", "Internet bill", "Phone bill", "Gas bill"],
    ),
    ("Rent", &["Monthly rent", "Rent payment"]),
    (
        "Entertainment",
        &["Movie tickets", "Netflix subscription", "Concert tickets", "Gaming"],
    ),
    (
        "Shopping",
        &["Clothes shopping", "Electronics", "Home decor", "Amazon purchase"],
    ),
    (
        "Healthcare",
        &["Doctor visit", "Medicine", "Health checkup", "Pharmacy"],
    ),
    (
        "Education",
        &["Online course", "Books", "Tuition fee", "Workshop"],
    ),
    (
        "Travel",
        &["Flight tickets", "Hotel booking", "Vacation expenses"],
    ),
    (
        "Other Expense",
        &["Miscellaneous", "ATM withdrawal", "Bank fees"],
    ),
];

const BUDGET_AMOUNTS: &[(&str, f64)] = &[
    ("Food & Dining", 8000.0),
    ("Transportation", 3000.0),
    ("Utilities", 5000.0),
    ("Rent", 25000.0),
    ("Entertainment", 3000.0),
    ("Shopping", 5000.0),
    ("Healthcare", 3000.0),
    ("Education", 5000.0),
    ("Travel", 10000.0),
    ("Other Expense", 2000.0),
];
const DEFAULT_BUDGET_AMOUNT: f64 = 5000.0;

fn lookup<T: Copy>(table: &[(&str, T)], name: &str) -> Option<T> {
    table.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Amount range used for a category, with a fallback per type.
pub fn amount_range(category: &Category) -> (f64, f64) {
    let table = match category.category_type {
        TransactionType::Income => INCOME_RANGES,
        TransactionType::Expense => EXPENSE_RANGES,
    };
    table
        .iter()
        .find(|(name, _, _)| *name == category.name)
        .map(|(_, lo, hi)| (*lo, *hi))
        .unwrap_or(match category.category_type {
            TransactionType::Income => (1000.0, 10000.0),
            TransactionType::Expense => (100.0, 1000.0),
        })
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn random_amount<R: Rng>(rng: &mut R, category: &Category) -> f64 {
    let (lo, hi) = amount_range(category);
    round_cents(rng.gen_range(lo..hi))
}

fn random_description<R: Rng>(rng: &mut R, category: &Category) -> String {
    let fallback: &[&str] = match category.category_type {
        TransactionType::Income => &["Income"],
        TransactionType::Expense => &["Expense"],
    };
    let choices = lookup(DESCRIPTIONS, &category.name).unwrap_or(fallback);
    choices
        .choose(rng)
        .copied()
        .unwrap_or(fallback[0])
        .to_string()
}

fn recurring<R: Rng>(
    rng: &mut R,
    category: &Category,
    description: &str,
    first: NaiveDate,
) -> Vec<NewTransaction> {
    (0..RECURRING_MONTHS)
        .map(|month| NewTransaction {
            amount: random_amount(rng, category),
            transaction_type: category.category_type,
            description: Some(description.to_string()),
            transaction_date: first + Duration::days(month * 30),
            category_id: category.category_id,
        })
        .collect()
}

/// Generates `count` transactions dated within the window ending at `today`.
///
/// Three monthly salaries and three monthly rents come first when those
/// categories exist; the rest is split roughly 30/70 between income and
/// expense categories.
pub fn sample_transactions<R: Rng>(
    rng: &mut R,
    categories: &[Category],
    today: NaiveDate,
    count: usize,
) -> Vec<NewTransaction> {
    let start = today - Duration::days(SEED_WINDOW_DAYS);
    let income: Vec<&Category> = categories
        .iter()
        .filter(|c| c.category_type == TransactionType::Income)
        .collect();
    let expense: Vec<&Category> = categories
        .iter()
        .filter(|c| c.category_type == TransactionType::Expense)
        .collect();

    let mut transactions = Vec::with_capacity(count);
    if let Some(salary) = income.iter().find(|c| c.name == "Salary").or(income.first()) {
        transactions.extend(recurring(
            rng,
            salary,
            "Monthly salary",
            start + Duration::days(1),
        ));
    }
    if let Some(rent) = expense.iter().find(|c| c.name == "Rent").or(expense.first()) {
        transactions.extend(recurring(
            rng,
            rent,
            "Monthly rent",
            start + Duration::days(5),
        ));
    }
    transactions.truncate(count);

    while transactions.len() < count {
        let pool = if rng.gen_bool(INCOME_SHARE) && !income.is_empty() {
            &income
        } else {
            &expense
        };
        let Some(category) = pool.choose(rng) else {
            break;
        };
        transactions.push(NewTransaction {
            amount: random_amount(rng, category),
            transaction_type: category.category_type,
            description: Some(random_description(rng, category)),
            transaction_date: start + Duration::days(rng.gen_range(0..=SEED_WINDOW_DAYS)),
            category_id: category.category_id,
        });
    }
    transactions
}

/// One monthly budget per expense category.
pub fn sample_budgets(categories: &[Category]) -> Vec<NewBudget> {
    categories
        .iter()
        .filter(|c| c.category_type == TransactionType::Expense)
        .map(|c| NewBudget {
            category_id: c.category_id,
            amount: lookup(BUDGET_AMOUNTS, &c.name).unwrap_or(DEFAULT_BUDGET_AMOUNT),
            period: BudgetPeriod::Monthly,
        })
        .collect()
}

pub struct SeedOptions {
    pub transactions: usize,
    pub reset: bool,
}

pub struct SeedReport {
    pub categories: Vec<Category>,
    pub transactions_created: usize,
    pub budgets_created: usize,
    pub summary: SummaryResponse,
}

fn has_transactions(state: &AppState) -> anyhow::Result<bool> {
    let first = TransactionQuery {
        limit: 1,
        ..Default::default()
    };
    Ok(!state.transaction_service.get_transactions(first)?.is_empty())
}

/// Populates the database behind `state`. Existing data is only replaced
/// when `options.reset` is set.
pub async fn run<R: Rng>(
    state: &AppState,
    options: &SeedOptions,
    rng: &mut R,
) -> anyhow::Result<SeedReport> {
    if has_transactions(state)? {
        if !options.reset {
            anyhow::bail!("Database already has transactions; rerun with --reset to replace them");
        }
        // Deleting a category removes its transactions and budget too
        for category in state.category_service.get_categories()? {
            state
                .category_service
                .delete_category(category.category_id)
                .await?;
        }
        tracing::info!("Cleared existing categories, transactions and budgets");
    }

    state.category_service.ensure_default_categories().await?;
    let categories = state.category_service.get_categories()?;

    let transactions = sample_transactions(rng, &categories, today(), options.transactions);
    let transactions_created = transactions.len();
    for transaction in transactions {
        state
            .transaction_service
            .create_transaction(transaction)
            .await?;
    }

    let budgets = sample_budgets(&categories);
    let budgets_created = budgets.len();
    for budget in budgets {
        state.budget_service.set_budget(budget).await?;
    }

    let summary = state.analytics_service.get_summary(None, None)?;
    Ok(SeedReport {
        categories,
        transactions_created,
        budgets_created,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn category(id: i32, name: &str, category_type: TransactionType) -> Category {
        Category {
            category_id: id,
            name: name.to_string(),
            category_type,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn categories() -> Vec<Category> {
        vec![
            category(1, "Salary", TransactionType::Income),
            category(2, "Gift", TransactionType::Income),
            category(3, "Rent", TransactionType::Expense),
            category(4, "Food & Dining", TransactionType::Expense),
            category(5, "Pets", TransactionType::Expense),
        ]
    }

    #[test]
    fn generated_transactions_fit_their_categories() {
        let mut rng = StdRng::seed_from_u64(7);
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let cats = categories();
        let generated = sample_transactions(&mut rng, &cats, today, 60);

        assert_eq!(generated.len(), 60);
        let start = today - Duration::days(SEED_WINDOW_DAYS);
        for tx in &generated {
            let cat = cats.iter().find(|c| c.category_id == tx.category_id).unwrap();
            assert_eq!(tx.transaction_type, cat.category_type);
            let (lo, hi) = amount_range(cat);
            assert!(tx.amount >= lo && tx.amount <= hi, "{} out of range", tx.amount);
            assert!(tx.transaction_date >= start && tx.transaction_date <= today);
        }

        let salaries: Vec<_> = generated
            .iter()
            .filter(|t| t.description.as_deref() == Some("Monthly salary"))
            .collect();
        assert!(salaries.len() >= 3);
        assert_eq!(salaries[0].transaction_date, start + Duration::days(1));
        assert_eq!(generated[3].transaction_date, start + Duration::days(5));
        assert_eq!(generated[5].transaction_date, start + Duration::days(65));
    }

    #[test]
    fn small_counts_are_respected() {
        let mut rng = StdRng::seed_from_u64(1);
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(sample_transactions(&mut rng, &categories(), today, 2).len(), 2);
        assert!(sample_transactions(&mut rng, &[], today, 10).is_empty());
    }

    #[test]
    fn budgets_cover_expense_categories_only() {
        let budgets = sample_budgets(&categories());
        let amounts: Vec<(i32, f64)> = budgets.iter().map(|b| (b.category_id, b.amount)).collect();
        assert_eq!(amounts, vec![(3, 25000.0), (4, 8000.0), (5, DEFAULT_BUDGET_AMOUNT)]);
        assert!(budgets.iter().all(|b| b.period == BudgetPeriod::Monthly));
    }
}
