//! Wallet CLI commands

use clap::Subcommand;

use crate::display::{format_wallet_list, to_json};
use crate::error::MoneyLoverResult;

use super::CliContext;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// List all wallets with their balances
    #[command(alias = "ls")]
    List {
        /// Include archived wallets
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(ctx: &CliContext, cmd: WalletCommands) -> MoneyLoverResult<()> {
    match cmd {
        WalletCommands::List { all } => {
            let mut wallets = ctx.with_client(|client| client.get_wallets())?;
            wallets.retain(|w| !w.is_delete && (all || !w.archived));

            if ctx.json {
                print!("{}", to_json(&wallets)?);
            } else {
                print!("{}", format_wallet_list(&wallets));
            }
        }
    }

    Ok(())
}
