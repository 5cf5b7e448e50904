//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display:
//! tables for lists, aligned key/value blocks for single records, CSV for
//! transaction export and pretty JSON for `--json`.

pub mod category;
pub mod transaction;
pub mod user;
pub mod wallet;

use serde::Serialize;

use crate::error::MoneyLoverResult;

pub use category::format_category_list;
pub use transaction::{
    format_added_transaction, format_transaction_register, write_transactions_csv, Totals,
};
pub use user::{format_session_status, format_user_info, SessionStatus};
pub use wallet::format_wallet_list;

/// Render any model as pretty-printed JSON with a trailing newline
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> MoneyLoverResult<String> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}
