//! Transaction CLI commands
//!
//! Listing takes a date range (explicit bounds, or a number of days back from
//! today) and sends each bound as a local calendar day.

use std::io;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use clap::{Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::display::{
    format_added_transaction, format_transaction_register, to_json, write_transactions_csv,
};
use crate::error::{MoneyLoverError, MoneyLoverResult};
use crate::models::TransactionInput;

use super::CliContext;

/// Output format for `transaction list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    /// Register table with totals
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Decoded transactions as pretty-printed JSON
    Json,
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List a wallet's transactions
    #[command(alias = "ls")]
    List {
        /// Wallet ID
        #[arg(short, long)]
        wallet: String,
        /// First day to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day to include (YYYY-MM-DD, default today)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Days before --to to include when --from is not given
        #[arg(long, conflicts_with = "from")]
        days: Option<u32>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Add a transaction
    Add {
        /// Wallet ID
        #[arg(short, long)]
        wallet: String,
        /// Category ID (its type decides income or expense)
        #[arg(short, long)]
        category: String,
        /// Amount, e.g. "45.50"
        #[arg(short, long)]
        amount: Decimal,
        /// Note
        #[arg(short, long, default_value = "")]
        note: String,
        /// Transaction date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    ctx: &CliContext,
    cmd: TransactionCommands,
) -> MoneyLoverResult<()> {
    match cmd {
        TransactionCommands::List {
            wallet,
            from,
            to,
            days,
            format,
        } => {
            let today = Local::now().date_naive();
            let (from, to) = resolve_range(from, to, days, ctx.settings.transaction_days, today)?;
            let (start, end) = (local_noon(from)?, local_noon(to)?);

            let transactions =
                ctx.with_client(|client| client.get_transactions(&wallet, &start, &end))?;

            let format = if ctx.json { ListFormat::Json } else { format };
            match format {
                ListFormat::Table => print!(
                    "{}",
                    format_transaction_register(&transactions, &ctx.settings.date_format)
                ),
                ListFormat::Csv => write_transactions_csv(
                    io::stdout().lock(),
                    &transactions,
                    &ctx.settings.date_format,
                )?,
                ListFormat::Json => print!("{}", to_json(&transactions)?),
            }
        }

        TransactionCommands::Add {
            wallet,
            category,
            amount,
            note,
            date,
        } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let input = TransactionInput::new(wallet, category, amount, date).with_note(note);
            input.validate()?;

            let created = ctx.with_client(|client| client.add_transaction(&input))?;

            if ctx.json {
                print!("{}", to_json(&created)?);
            } else {
                print!("{}", format_added_transaction(&input, &created));
            }
        }
    }

    Ok(())
}

/// Work out the inclusive day range to list
///
/// `to` defaults to `today`; `from` defaults to `days` (or `default_days`)
/// before `to`.
pub fn resolve_range(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    days: Option<u32>,
    default_days: u32,
    today: NaiveDate,
) -> MoneyLoverResult<(NaiveDate, NaiveDate)> {
    let to = to.unwrap_or(today);

    let from = match from {
        Some(from) => from,
        None => {
            let days = days.unwrap_or(default_days);
            if days == 0 {
                return Err(MoneyLoverError::Validation(
                    "--days must be greater than zero".into(),
                ));
            }
            to.checked_sub_days(Days::new(u64::from(days))).ok_or_else(|| {
                MoneyLoverError::Validation(format!(
                    "--days {} reaches before the earliest supported date",
                    days
                ))
            })?
        }
    };

    if from > to {
        return Err(MoneyLoverError::Validation(format!(
            "Start date {} is after end date {}",
            from, to
        )));
    }

    Ok((from, to))
}

/// Midday on the given local day, clear of any DST transition at midnight
fn local_noon(date: NaiveDate) -> MoneyLoverResult<DateTime<Local>> {
    date.and_hms_opt(12, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .ok_or_else(|| MoneyLoverError::Validation(format!("{} is not a valid local date", date)))
}
