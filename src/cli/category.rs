//! Category CLI commands

use clap::{Subcommand, ValueEnum};

use crate::display::{format_category_list, to_json};
use crate::error::MoneyLoverResult;
use crate::models::CategoryType;

use super::CliContext;

/// Category type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeFilter {
    Income,
    Expense,
}

impl TypeFilter {
    fn matches(self, category_type: CategoryType) -> bool {
        matches!(
            (self, category_type),
            (Self::Income, CategoryType::Income) | (Self::Expense, CategoryType::Expense)
        )
    }
}

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the categories of a wallet
    #[command(alias = "ls")]
    List {
        /// Wallet ID
        #[arg(short, long)]
        wallet: String,
        /// Only show income or expense categories
        #[arg(short = 't', long = "type", value_enum)]
        category_type: Option<TypeFilter>,
    },
}

/// Handle a category command
pub fn handle_category_command(ctx: &CliContext, cmd: CategoryCommands) -> MoneyLoverResult<()> {
    match cmd {
        CategoryCommands::List {
            wallet,
            category_type,
        } => {
            let mut categories = ctx.with_client(|client| client.get_categories(&wallet))?;
            if let Some(filter) = category_type {
                categories.retain(|c| filter.matches(c.category_type));
            }

            if ctx.json {
                print!("{}", to_json(&categories)?);
            } else {
                print!("{}", format_category_list(&categories));
            }
        }
    }

    Ok(())
}
