//! Wallet display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Wallet;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn wallet_status(wallet: &Wallet) -> String {
    let mut flags = Vec::new();
    if wallet.archived {
        flags.push("archived");
    }
    if wallet.exclude_total {
        flags.push("excluded");
    }
    if wallet.list_user.len() > 1 {
        flags.push("shared");
    }
    flags.join(", ")
}

/// Format wallets as a table, one row per balance currency
pub fn format_wallet_list(wallets: &[Wallet]) -> String {
    if wallets.is_empty() {
        return "No wallets found.\n".to_string();
    }

    let mut rows = Vec::new();
    for wallet in wallets {
        let status = wallet_status(wallet);
        let mut balances = wallet.balances().peekable();

        if balances.peek().is_none() {
            rows.push(WalletRow {
                id: wallet.id.clone(),
                name: wallet.name.clone(),
                currency: "-".into(),
                balance: "-".into(),
                status,
            });
            continue;
        }

        for (currency, amount) in balances {
            rows.push(WalletRow {
                id: wallet.id.clone(),
                name: wallet.name.clone(),
                currency: currency.to_string(),
                balance: amount.to_string(),
                status: status.clone(),
            });
        }
    }

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BalanceEntry, WalletUser};

    fn wallet(id: &str, name: &str, balances: &[(&str, &str)]) -> Wallet {
        Wallet {
            id: id.into(),
            name: name.into(),
            balance: balances
                .iter()
                .map(|(k, v)| BalanceEntry::from([(k.to_string(), v.to_string())]))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_wallet_list(&[]), "No wallets found.\n");
    }

    #[test]
    fn test_row_per_balance() {
        let mut shared = wallet("w2", "Travel", &[("THB", "100"), ("JPY", "2500")]);
        shared.list_user = vec![WalletUser::default(), WalletUser::default()];

        let output = format_wallet_list(&[wallet("w1", "Cash", &[]), shared]);

        assert!(output.contains("Name"));
        assert!(output.contains("Cash"));
        assert!(output.contains("THB"));
        assert!(output.contains("2500"));
        assert!(output.contains("shared"));
        assert_eq!(output.matches("Travel").count(), 2);
    }
}
