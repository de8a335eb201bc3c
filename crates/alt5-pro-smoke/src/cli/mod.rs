/*
[INPUT]:  Command-line arguments
[OUTPUT]: Parsed CLI with global flags and subcommands
[POS]:    Binary CLI layer - argument surface
[UPDATE]: When adding flags or subcommands
*/

pub mod commands;
pub mod terminal;

use std::path::PathBuf;

use alt5_pro_adapter::{Environment, Side, TimeInForce};
use alt5_pro_smoke::Settings;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser, Debug)]
#[command(name = "alt5-pro-smoke", version, about = "ALT5 Pro trading API smoke test")]
pub struct Cli {
    /// Settings file (YAML or TOML); ALT5_* environment variables override it
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: String,
    /// production or sandbox
    #[arg(long, value_name = "ENV", global = true)]
    pub environment: Option<Environment>,
    #[arg(long = "base-url", value_name = "URL", global = true)]
    pub base_url: Option<String>,
    /// 2FA code for email/password login; prompted for when absent
    #[arg(long = "two-fa-code", value_name = "CODE", global = true)]
    pub two_fa_code: Option<String>,
    /// Place orders without asking for confirmation
    #[arg(long, global = true)]
    pub yes: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Flags win over the settings file and environment
    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(environment) = self.environment {
            settings.environment = environment;
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = Some(base_url.clone());
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct AccountArg {
    /// Account id; looked up via /api/accounts when omitted
    #[arg(long)]
    pub account: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Full smoke scenario (default)
    Run,
    Profile,
    Accounts,
    Balances {
        #[command(flatten)]
        account: AccountArg,
    },
    /// Open orders of the account
    Orders {
        #[command(flatten)]
        account: AccountArg,
    },
    /// Past orders of the account, oldest first
    History {
        #[command(flatten)]
        account: AccountArg,
    },
    /// Deposit address or transfer details for an asset
    Deposit {
        /// Payment system name, e.g. the crypto network or bank rail
        #[arg(long = "payment-system")]
        payment_system: String,
        #[arg(long)]
        asset: String,
        #[command(flatten)]
        account: AccountArg,
    },
    /// Place an order; limit when --price is given, market otherwise
    Place {
        #[arg(long)]
        instrument: String,
        #[arg(long)]
        side: Side,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        price: Option<Decimal>,
        /// Activation price; makes it a stop order
        #[arg(long)]
        stop: Option<Decimal>,
        /// gtc, ioc or fok
        #[arg(long = "time-in-force")]
        time_in_force: Option<TimeInForce>,
        #[command(flatten)]
        account: AccountArg,
    },
    Cancel {
        order_id: String,
        #[command(flatten)]
        account: AccountArg,
    },
    /// Cancel every open order, optionally for one market
    CancelAll {
        #[arg(long)]
        market: Option<String>,
        #[command(flatten)]
        account: AccountArg,
    },
    /// Public market data, no authentication
    Market {
        #[command(subcommand)]
        query: MarketQuery,
    },
    /// Arbitrary frontoffice call, e.g. `raw --method GET /api/profile`
    Raw {
        #[arg(long, default_value = "GET")]
        method: String,
        endpoint: String,
        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MarketQuery {
    Instruments,
    Book { instrument: String },
    Trades { instrument: String },
    Ticker { instrument: String },
}
