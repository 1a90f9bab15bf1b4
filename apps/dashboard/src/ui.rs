//! Dashboard rendering
//!
//! Layout, top to bottom: status header, summary cards, the monthly trend next
//! to expenses by category, budgets next to recent transactions, key help.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use finboard_core::budgets::BudgetTier;
use finboard_core::transactions::TransactionType;

use crate::app::App;
use crate::snapshot::{format_amount, format_money, tier_label, Snapshot};

const INCOME_COLOR: Color = Color::Green;
const EXPENSE_COLOR: Color = Color::Red;

pub fn tier_style(tier: BudgetTier) -> Style {
    match tier {
        BudgetTier::Under => Style::default().fg(Color::Green),
        BudgetTier::Near => Style::default().fg(Color::Yellow),
        BudgetTier::Over => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
}

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, rows[0]);
    render_footer(frame, app, rows[4]);

    let Some(snapshot) = &app.snapshot else {
        let waiting = Paragraph::new(format!("Waiting for data from {} ...", app.api_url))
            .alignment(Alignment::Center)
            .block(titled("Finboard"));
        frame.render_widget(waiting, rows[1].union(rows[2]).union(rows[3]));
        return;
    };

    render_cards(frame, snapshot, rows[1]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[2]);
    render_trend(frame, snapshot, middle[0]);
    render_categories(frame, snapshot, middle[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[3]);
    render_budgets(frame, snapshot, bottom[0]);
    render_recent(frame, snapshot, bottom[1]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "Finboard",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(format!("  {}", app.api_url)));

    if let Some(snapshot) = &app.snapshot {
        spans.push(Span::styled(
            format!(
                "  updated {}",
                snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S")
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(error) = &app.last_error {
        spans.push(Span::styled(
            format!("  refresh failed: {}", error),
            Style::default().fg(Color::Red),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn card(title: &str, value: String, color: Color) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        value,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(titled(title))
}

fn render_cards(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);
    let s = &snapshot.summary;
    let balance_color = if s.balance.is_sign_negative() {
        EXPENSE_COLOR
    } else {
        INCOME_COLOR
    };

    frame.render_widget(
        card("Income", format_money(s.total_income), INCOME_COLOR),
        cols[0],
    );
    frame.render_widget(
        card("Expenses", format_money(s.total_expenses), EXPENSE_COLOR),
        cols[1],
    );
    frame.render_widget(card("Balance", format_money(s.balance), balance_color), cols[2]);
    frame.render_widget(
        card("Transactions", s.transaction_count.to_string(), Color::White),
        cols[3],
    );
}

fn bar_value(amount: Decimal) -> u64 {
    amount.round().to_u64().unwrap_or(0)
}

fn render_trend(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let mut chart = BarChart::default()
        .block(titled("Monthly trend (income / expenses)"))
        .bar_width(4)
        .bar_gap(1)
        .group_gap(2);

    for month in &snapshot.trend {
        let label: String = month.month.chars().take(3).collect();
        let bars = [
            Bar::default()
                .value(bar_value(month.income))
                .text_value(String::new())
                .style(Style::default().fg(INCOME_COLOR)),
            Bar::default()
                .value(bar_value(month.expenses))
                .text_value(String::new())
                .style(Style::default().fg(EXPENSE_COLOR)),
        ];
        chart = chart.data(BarGroup::default().label(Line::from(label)).bars(&bars));
    }

    frame.render_widget(chart, area);
}

fn render_categories(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows_data = snapshot.top_expenses();
    let total: Decimal = rows_data.iter().map(|row| row.total_amount).sum();

    let rows: Vec<Row> = rows_data
        .iter()
        .map(|row| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                row.total_amount / total * Decimal::ONE_HUNDRED
            };
            Row::new(vec![
                Cell::from(row.category_name.clone()),
                Cell::from(format_money(row.total_amount)),
                Cell::from(format!("{:>5}%", share.round_dp(1))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(14),
            Constraint::Length(7),
        ],
    )
    .header(
        Row::new(vec!["Category", "Amount", "Share"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(titled("Expenses by category"));

    frame.render_widget(table, area);
}

fn render_budgets(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows: Vec<Row> = snapshot
        .budgets
        .iter()
        .map(|budget| {
            let style = tier_style(budget.status);
            Row::new(vec![
                Cell::from(budget.category_name.clone()),
                Cell::from(format_money(budget.spent_amount)),
                Cell::from(format_money(budget.budget_amount)),
                Cell::from(format!("{}%", budget.percentage_used.round_dp(1))).style(style),
                Cell::from(tier_label(budget.status)).style(style),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Category", "Spent", "Budget", "Used", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(titled("Budgets"));

    frame.render_widget(table, area);
}

fn render_recent(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let rows: Vec<Row> = snapshot
        .recent
        .iter()
        .map(|tx| {
            let (sign, color) = match tx.transaction_type {
                TransactionType::Income => ("+", INCOME_COLOR),
                TransactionType::Expense => ("-", EXPENSE_COLOR),
            };
            Row::new(vec![
                Cell::from(tx.transaction_date.format("%Y-%m-%d").to_string()),
                Cell::from(tx.description.clone().unwrap_or_default()),
                Cell::from(format!("{}{}", sign, format_amount(tx.amount)))
                    .style(Style::default().fg(color)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(10),
            Constraint::Length(13),
        ],
    )
    .header(
        Row::new(vec!["Date", "Description", "Amount"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(titled("Recent transactions"));

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help = Line::from(vec![
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(format!(" refresh  (auto every {}s)", app.refresh_secs)),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
