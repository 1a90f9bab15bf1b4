/// Decimal places kept for money amounts in responses
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal places kept for percentages in responses
pub const PERCENT_DECIMAL_PRECISION: u32 = 1;

/// Percentage of a budget above which spending counts as "near" the limit
pub const BUDGET_NEAR_THRESHOLD_PERCENT: i64 = 80;

/// Largest accepted transaction or budget amount
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// Default and maximum page size for transaction listings
pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Bounds for the monthly trend window
pub const DEFAULT_TREND_MONTHS: u32 = 6;
pub const MAX_TREND_MONTHS: u32 = 24;

pub const MAX_CATEGORY_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Categories created on first start when the table is empty.
pub const DEFAULT_INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investment", "Gift", "Other Income"];

pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Utilities",
    "Rent",
    "Entertainment",
    "Shopping",
    "Healthcare",
    "Education",
    "Travel",
    "Other Expense",
];
