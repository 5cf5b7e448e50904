use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use moneylover::cli::{
    handle_category_command, handle_login, handle_logout, handle_status, handle_transaction_command,
    handle_wallet_command, handle_whoami, CliContext,
};
use moneylover::config::{paths::MoneyLoverPaths, settings::Settings};
use moneylover::MoneyLoverError;

#[derive(Parser)]
#[command(
    name = "moneylover",
    version,
    about = "Command-line client for the MoneyLover personal finance service",
    long_about = "moneylover logs in to your MoneyLover account once, keeps the session \
                  alive between runs, and lets you list wallets, categories and \
                  transactions or record new transactions from the terminal."
)]
struct Cli {
    /// Log requests and session activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Dump raw HTTP requests and responses to stderr (includes tokens)
    #[arg(long, global = true)]
    debug_payload: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Account password (prompted for when not given)
        #[arg(short, long, env = "MONEYLOVER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show whether a session is stored
    Status {
        /// Refresh the session to check it still works
        #[arg(long)]
        check: bool,
    },

    /// Show the logged-in user
    Whoami,

    /// Wallet commands
    #[command(subcommand)]
    Wallet(moneylover::cli::WalletCommands),

    /// Category commands
    #[command(subcommand)]
    Category(moneylover::cli::CategoryCommands),

    /// Transaction commands
    #[command(subcommand, alias = "txn")]
    Transaction(moneylover::cli::TransactionCommands),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to config.json
        #[arg(long)]
        init: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        if let Some(hint) = err.downcast_ref::<MoneyLoverError>().and_then(MoneyLoverError::hint) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = MoneyLoverPaths::new()?;
    let stored = Settings::load_or_create(&paths)?;
    let mut settings = stored.clone();
    settings.debug_payload |= cli.debug_payload;

    let ctx = CliContext::new(paths, settings, cli.json);

    match cli.command {
        Some(Commands::Login { email, password }) => handle_login(&ctx, &email, password)?,
        Some(Commands::Logout) => handle_logout(&ctx)?,
        Some(Commands::Status { check }) => handle_status(&ctx, check)?,
        Some(Commands::Whoami) => handle_whoami(&ctx)?,
        Some(Commands::Wallet(cmd)) => handle_wallet_command(&ctx, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&ctx, cmd)?,
        Some(Commands::Transaction(cmd)) => handle_transaction_command(&ctx, cmd)?,
        Some(Commands::Config { init }) => {
            if init {
                stored.save(&ctx.paths)?;
                println!("Wrote {}", ctx.paths.settings_file().display());
                println!();
            }

            let settings = &ctx.settings;
            println!("moneylover-cli Configuration");
            println!("============================");
            println!("Config directory: {}", ctx.paths.base_dir().display());
            println!("Settings file:    {}", ctx.paths.settings_file().display());
            println!("Credentials file: {}", ctx.paths.credentials_file().display());
            println!();
            println!("Settings (schema v{}):", settings.schema_version);
            println!("  Web URL:          {}", settings.web_url);
            println!("  OAuth URL:        {}", settings.oauth_url);
            println!("  Timeout:          {}s", settings.timeout_secs);
            println!("  Debug payload:    {}", settings.debug_payload);
            println!("  Date format:      {}", settings.date_format);
            println!("  Transaction days: {}", settings.transaction_days);
        }
        None => {
            println!("moneylover - MoneyLover from the command line");
            println!();
            println!("Run 'moneylover --help' for usage information.");
            println!("Run 'moneylover login --email <EMAIL>' to get started.");
        }
    }

    Ok(())
}
