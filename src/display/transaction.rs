//! Transaction display formatting
//!
//! Transactions render as a register table with income/expense totals, as CSV,
//! or (through [`super::to_json`]) as JSON.

use std::fmt::Write as _;
use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::MoneyLoverResult;
use crate::models::{Transaction, TransactionInput};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: Decimal,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Serialize)]
struct CsvRecord<'a> {
    id: &'a str,
    date: String,
    wallet: &'a str,
    category: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: String,
    note: &'a str,
}

/// Render the transaction date, falling back to ISO days when the format is invalid
fn format_date(txn: &Transaction, date_format: &str) -> String {
    let Some(date) = txn.display_date else {
        return String::new();
    };

    let mut output = String::new();
    if write!(output, "{}", date.format(date_format)).is_err() {
        output = date.format("%Y-%m-%d").to_string();
    }
    output
}

fn wallet_name(txn: &Transaction) -> &str {
    txn.account.as_ref().map(|w| w.name.as_str()).unwrap_or("")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Income and expense totals over a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of income amounts
    pub income: Decimal,
    /// Sum of expense amounts, as a positive number
    pub expense: Decimal,
}

impl Totals {
    /// Add up a list of transactions
    pub fn of(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut totals, txn| {
            let signed = txn.signed_amount();
            if signed.is_sign_negative() {
                totals.expense += -signed;
            } else {
                totals.income += signed;
            }
            totals
        })
    }

    /// Income minus expense
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Format transactions as a register with totals, oldest first
pub fn format_transaction_register(transactions: &[Transaction], date_format: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.display_date);

    let rows = sorted.into_iter().map(|txn| TransactionRow {
        date: format_date(txn, date_format),
        amount: txn.signed_amount(),
        category: txn.category_name().to_string(),
        note: truncate(&txn.note, 30),
        wallet: wallet_name(txn).to_string(),
        id: txn.id.clone(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());

    let totals = Totals::of(transactions);
    let mut output = format!("{}\n", table);
    output.push_str(&format!(
        "{} transactions  income {}  expense {}  net {}\n",
        transactions.len(),
        totals.income,
        totals.expense,
        totals.net()
    ));
    output
}

/// Write transactions as CSV with a header row
pub fn write_transactions_csv<W: Write>(
    writer: W,
    transactions: &[Transaction],
    date_format: &str,
) -> MoneyLoverResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for txn in transactions {
        csv_writer.serialize(CsvRecord {
            id: &txn.id,
            date: format_date(txn, date_format),
            wallet: wallet_name(txn),
            category: txn.category_name(),
            kind: match &txn.category {
                Some(c) if c.is_income() => "income",
                Some(_) => "expense",
                None => "",
            },
            amount: txn.amount.to_string(),
            note: &txn.note,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Format a transaction about to be sent, plus the server's reply
pub fn format_added_transaction(input: &TransactionInput, created: &Map<String, Value>) -> String {
    let mut output = String::new();

    output.push_str("Transaction added\n");
    output.push_str(&format!("  Date:     {}\n", input.display_date.format("%Y-%m-%d")));
    output.push_str(&format!("  Amount:   {}\n", input.amount));
    output.push_str(&format!("  Wallet:   {}\n", input.account));
    output.push_str(&format!("  Category: {}\n", input.category));

    if !input.note.is_empty() {
        output.push_str(&format!("  Note:     {}\n", input.note));
    }

    if let Some(Value::String(id)) = created.get("_id") {
        output.push_str(&format!("  ID:       {}\n", id));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryType, Wallet};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn category(name: &str, category_type: CategoryType) -> Category {
        Category {
            id: format!("c-{}", name),
            icon: String::new(),
            metadata: String::new(),
            name: name.into(),
            category_type,
            parent: None,
            account: None,
            extra: Map::new(),
        }
    }

    fn txn(id: &str, day: u32, amount: Decimal, category: Category, note: &str) -> Transaction {
        Transaction {
            id: id.into(),
            note: note.into(),
            account: Some(Wallet {
                id: "w1".into(),
                name: "Cash".into(),
                ..Default::default()
            }),
            category: Some(category),
            amount,
            display_date: Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).single(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(
                "t2",
                5,
                dec!(45.50),
                category("Food", CategoryType::Expense),
                "Lunch, with friends",
            ),
            txn("t1", 1, dec!(1000), category("Salary", CategoryType::Income), ""),
        ]
    }

    #[test]
    fn test_totals() {
        let totals = Totals::of(&sample());
        assert_eq!(totals.income, dec!(1000));
        assert_eq!(totals.expense, dec!(45.50));
        assert_eq!(totals.net(), dec!(954.50));
    }

    #[test]
    fn test_register_sorted_with_totals() {
        let output = format_transaction_register(&sample(), "%Y-%m-%d");

        let first = output.find("2024-03-01").unwrap();
        let second = output.find("2024-03-05").unwrap();
        assert!(first < second);
        assert!(output.contains("-45.50"));
        assert!(output.contains("2 transactions  income 1000  expense 45.50  net 954.50"));
    }

    #[test]
    fn test_register_empty() {
        assert_eq!(
            format_transaction_register(&[], "%Y-%m-%d"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_csv_output() {
        let mut buffer = Vec::new();
        write_transactions_csv(&mut buffer, &sample(), "%d/%m/%Y").unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "id,date,wallet,category,type,amount,note");
        assert_eq!(lines[1], "t2,05/03/2024,Cash,Food,expense,45.50,\"Lunch, with friends\"");
        assert_eq!(lines[2], "t1,01/03/2024,Cash,Salary,income,1000,");
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let output = format_transaction_register(&sample(), "%Q");
        assert!(output.contains("2024-03-01"));

        let mut buffer = Vec::new();
        write_transactions_csv(&mut buffer, &sample(), "%Q").unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("t1,2024-03-01,"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long note indeed", 10), "a very ...");
    }

    #[test]
    fn test_added_transaction() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let input = TransactionInput::new("w1", "c1", dec!(12), date).with_note("Taxi");
        let mut created = Map::new();
        created.insert("_id".into(), Value::String("t9".into()));

        let output = format_added_transaction(&input, &created);
        assert!(output.contains("Amount:   12"));
        assert!(output.contains("Note:     Taxi"));
        assert!(output.contains("ID:       t9"));
    }
}
