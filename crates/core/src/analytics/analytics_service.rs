use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::analytics_model::{BalanceResponse, CategoryBreakdown, MonthlyTrend, SummaryResponse};
use super::analytics_traits::AnalyticsServiceTrait;
use crate::categories::CategoryRepositoryTrait;
use crate::constants::MAX_TREND_MONTHS;
use crate::errors::{Error, Result};
use crate::transactions::{
    Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionType,
};
use crate::utils::money_utils::{checked_sum, round_money, to_decimal};
use crate::utils::time_utils::{month_bounds, today, trailing_months, validate_date_range};

/// Running income/expense totals.
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    income: Decimal,
    expenses: Decimal,
    count: i64,
}

impl Totals {
    fn add(&mut self, transaction: &Transaction) -> Result<()> {
        let amount = to_decimal(transaction.amount)?;
        match transaction.transaction_type {
            TransactionType::Income => self.income = checked_sum(self.income, amount)?,
            TransactionType::Expense => self.expenses = checked_sum(self.expenses, amount)?,
        }
        self.count += 1;
        Ok(())
    }

    fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Result<Self> {
        let mut totals = Totals::default();
        for transaction in transactions {
            totals.add(transaction)?;
        }
        Ok(totals)
    }

    fn balance(&self) -> Decimal {
        round_money(self.income - self.expenses)
    }
}

pub struct AnalyticsService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl AnalyticsService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            category_repository,
        }
    }

    fn load_range(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>> {
        validate_date_range(start_date, end_date)?;
        self.transaction_repository
            .load_transactions(&TransactionFilter::between(start_date, end_date))
    }

    /// Monthly trend ending with the month of `today`.
    pub fn get_monthly_trend_as_of(
        &self,
        today: NaiveDate,
        months: u32,
    ) -> Result<Vec<MonthlyTrend>> {
        if months == 0 || months > MAX_TREND_MONTHS {
            return Err(Error::invalid_input(format!(
                "months must be between 1 and {}",
                MAX_TREND_MONTHS
            )));
        }

        let window = trailing_months(today, months);
        let (first_year, first_month) = window[0];
        let start = month_bounds(first_year, first_month).map(|(start, _)| start);
        let end = month_bounds(today.year(), today.month()).map(|(_, end)| end);
        let transactions = self
            .transaction_repository
            .load_transactions(&TransactionFilter::between(start, end))?;

        let mut by_month: BTreeMap<(i32, u32), Totals> = BTreeMap::new();
        for transaction in &transactions {
            let date = transaction.transaction_date;
            by_month
                .entry((date.year(), date.month()))
                .or_default()
                .add(transaction)?;
        }
        debug!(
            "Monthly trend over {} months from {} transactions",
            months,
            transactions.len()
        );

        window
            .into_iter()
            .map(|(year, month)| {
                let name = NaiveDate::from_ymd_opt(year, month, 1)
                    .map(|d| d.format("%B").to_string())
                    .ok_or_else(|| {
                        Error::Unexpected(format!("invalid month {}-{}", year, month))
                    })?;
                let totals = by_month.get(&(year, month)).copied().unwrap_or_default();
                Ok(MonthlyTrend {
                    month: name,
                    year,
                    income: round_money(totals.income),
                    expenses: round_money(totals.expenses),
                    balance: totals.balance(),
                })
            })
            .collect()
    }
}

impl AnalyticsServiceTrait for AnalyticsService {
    fn get_summary(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<SummaryResponse> {
        let totals = Totals::of(&self.load_range(start_date, end_date)?)?;
        Ok(SummaryResponse {
            total_income: round_money(totals.income),
            total_expenses: round_money(totals.expenses),
            balance: totals.balance(),
            transaction_count: totals.count,
        })
    }

    fn get_category_breakdown(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        transaction_type: Option<TransactionType>,
    ) -> Result<Vec<CategoryBreakdown>> {
        validate_date_range(start_date, end_date)?;
        let filter = TransactionFilter::between(start_date, end_date).with_type(transaction_type);
        let transactions = self.transaction_repository.load_transactions(&filter)?;

        let mut sums: HashMap<i32, (Decimal, i64)> = HashMap::new();
        for transaction in &transactions {
            let entry = sums.entry(transaction.category_id).or_default();
            entry.0 = checked_sum(entry.0, to_decimal(transaction.amount)?)?;
            entry.1 += 1;
        }

        let mut breakdown: Vec<CategoryBreakdown> = self
            .category_repository
            .list_categories()?
            .into_iter()
            .filter_map(|category| {
                let (total, count) = sums.remove(&category.category_id)?;
                Some(CategoryBreakdown {
                    category_id: category.category_id,
                    category_name: category.name,
                    category_type: category.category_type,
                    total_amount: round_money(total),
                    transaction_count: count,
                })
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.total_amount
                .cmp(&a.total_amount)
                .then_with(|| a.category_name.cmp(&b.category_name))
        });
        Ok(breakdown)
    }

    fn get_monthly_trend(&self, months: u32) -> Result<Vec<MonthlyTrend>> {
        self.get_monthly_trend_as_of(today(), months)
    }

    fn get_balance(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<BalanceResponse> {
        let totals = Totals::of(&self.load_range(start_date, end_date)?)?;
        Ok(BalanceResponse {
            balance: totals.balance(),
            total_income: round_money(totals.income),
            total_expenses: round_money(totals.expenses),
        })
    }
}
