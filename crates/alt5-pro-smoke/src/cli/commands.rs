/*
[INPUT]:  Parsed CLI, loaded settings and a prompter
[OUTPUT]: Console output per subcommand; error on failed calls
[POS]:    Binary CLI layer - subcommand handlers
[UPDATE]: When adding subcommands or changing their output
*/

use std::str::FromStr;
use std::sync::Arc;

use alt5_pro_adapter::{
    AccountBalance, Alt5Client, ApiResponse, Credentials, Method, NewOrder, OpenOrder, Side,
    TimeInForce,
};
use alt5_pro_smoke::{
    Connection, Prompter, ScenarioOptions, Settings, ask_confirm, build_client, connect,
    connect_with_account, run_scenario,
};
use anyhow::{Context, Result, bail};
use console::style;
use rust_decimal::Decimal;
use tracing::info;

use super::{AccountArg, Cli, Command, MarketQuery};

pub async fn dispatch(cli: &Cli, settings: &Settings, prompter: Arc<dyn Prompter>) -> Result<()> {
    let two_fa_code = cli.two_fa_code.as_deref();

    match &cli.command {
        None | Some(Command::Run) => run(cli, settings, prompter).await,
        Some(Command::Profile) => {
            let connection = login(settings, prompter, two_fa_code).await?;
            let response = connection.client.get_profile().await.context("profile request")?;
            finish(response)
        }
        Some(Command::Accounts) => {
            let connection = login(settings, prompter, two_fa_code).await?;
            let outcome = connection.client.get_accounts().await.context("accounts request")?;
            if let Some(id) = &outcome.account_id {
                println!("First account: {}", style(id).cyan());
            }
            finish(outcome.response)
        }
        Some(Command::Balances { account }) => {
            let (connection, account_id) =
                with_account(settings, prompter, two_fa_code, account).await?;
            let response = connection
                .client
                .get_balances(&account_id)
                .await
                .context("balances request")?;
            if let Ok(balances) = response.decode::<Vec<AccountBalance>>() {
                for balance in &balances {
                    println!(
                        "{:>8}  available {}  order-locked {}  transfer-locked {}",
                        style(&balance.asset_id).bold(),
                        balance.available,
                        balance.order_locked,
                        balance.transfer_locked
                    );
                }
            }
            finish(response)
        }
        Some(Command::Orders { account }) => {
            let (connection, account_id) =
                with_account(settings, prompter, two_fa_code, account).await?;
            let response = connection
                .client
                .get_orders(&account_id)
                .await
                .context("orders request")?;
            if let Ok(orders) = response.decode::<Vec<OpenOrder>>() {
                println!("{} open order(s)", orders.len());
                for order in &orders {
                    let price = order
                        .price
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "market".to_string());
                    println!(
                        "  {} {} {} {} at {}",
                        order.id, order.side, order.amount, order.instrument, price
                    );
                }
            }
            finish(response)
        }
        Some(Command::History { account }) => {
            let (connection, account_id) =
                with_account(settings, prompter, two_fa_code, account).await?;
            let response = connection
                .client
                .get_order_history(&account_id)
                .await
                .context("order history request")?;
            if let Ok(orders) = response.decode::<Vec<OpenOrder>>() {
                println!("{} historical order(s)", orders.len());
                for order in &orders {
                    println!(
                        "  {} {} {} {} [{}]",
                        order.id,
                        order.side,
                        order.amount,
                        order.instrument,
                        order.status.as_deref().unwrap_or("unknown")
                    );
                }
            }
            finish(response)
        }
        Some(Command::Deposit {
            payment_system,
            asset,
            account,
        }) => {
            let (connection, account_id) =
                with_account(settings, prompter, two_fa_code, account).await?;
            let response = connection
                .client
                .get_deposit_address(&account_id, payment_system, asset)
                .await
                .context("deposit address request")?;
            finish(response)
        }
        Some(Command::Place {
            instrument,
            side,
            amount,
            price,
            stop,
            time_in_force,
            account,
        }) => {
            let order = build_order(instrument, *side, *amount, *price, *stop, *time_in_force);
            let question = format!(
                "Place {} {} {} at {}?",
                side,
                amount,
                instrument,
                price.map(|p| p.to_string()).unwrap_or_else(|| "market".to_string())
            );
            if !cli.yes && !ask_confirm(&prompter, &question).await? {
                println!("Order not placed.");
                return Ok(());
            }

            let (connection, account_id) =
                with_account(settings, prompter, two_fa_code, account).await?;
            let response = connection
                .client
                .create_order(&account_id, order)
                .await
                .context("create order request")?;
            if let Some(order_id) = response.id_field(&["id", "orderId"]) {
                println!("Order id: {}", style(order_id).cyan());
            }
            finish(response)
        }
        Some(Command::Cancel { order_id, account }) => {
            let (connection, account_id) =
                with_account(settings, prompter, two_fa_code, account).await?;
            let response = connection
                .client
                .cancel_order(&account_id, order_id)
                .await
                .context("cancel order request")?;
            finish(response)
        }
        Some(Command::CancelAll { market, account }) => {
            let (connection, account_id) =
                with_account(settings, prompter, two_fa_code, account).await?;
            let response = connection
                .client
                .cancel_all_orders(&account_id, market.as_deref())
                .await
                .context("cancel all orders request")?;
            finish(response)
        }
        Some(Command::Market { query }) => market(settings, query).await,
        Some(Command::Raw {
            method,
            endpoint,
            body,
        }) => {
            let method = Method::from_str(&method.to_uppercase())
                .with_context(|| format!("invalid HTTP method {method:?}"))?;
            Alt5Client::check_method(&method).context("raw request")?;
            let body = body
                .as_deref()
                .map(serde_json::from_str::<serde_json::Value>)
                .transpose()
                .context("--body must be JSON")?;

            let connection = login(settings, prompter, two_fa_code).await?;
            let response = connection
                .client
                .request(method, endpoint, body.as_ref())
                .await
                .context("raw request")?;
            finish(response)
        }
    }
}

async fn run(cli: &Cli, settings: &Settings, prompter: Arc<dyn Prompter>) -> Result<()> {
    let options = ScenarioOptions {
        two_fa_code: cli.two_fa_code.clone(),
        assume_yes: cli.yes,
    };
    let report = run_scenario(settings, prompter, &options).await?;
    info!(?report, "scenario finished");

    if report.passed() {
        Ok(())
    } else {
        bail!("smoke test did not pass: {report:?}")
    }
}

async fn login(
    settings: &Settings,
    prompter: Arc<dyn Prompter>,
    two_fa_code: Option<&str>,
) -> Result<Connection> {
    let credentials = settings.credentials()?;
    info!(kind = credentials.kind(), "connecting");
    connect(settings, credentials, prompter, two_fa_code).await
}

async fn with_account(
    settings: &Settings,
    prompter: Arc<dyn Prompter>,
    two_fa_code: Option<&str>,
    account: &AccountArg,
) -> Result<(Connection, String)> {
    match &account.account {
        Some(id) => Ok((login(settings, prompter, two_fa_code).await?, id.clone())),
        None => {
            let credentials = settings.credentials()?;
            connect_with_account(settings, credentials, prompter, two_fa_code).await
        }
    }
}

fn build_order(
    instrument: &str,
    side: Side,
    amount: Decimal,
    price: Option<Decimal>,
    stop: Option<Decimal>,
    time_in_force: Option<TimeInForce>,
) -> NewOrder {
    let mut order = match price {
        Some(price) => NewOrder::limit(instrument, side, amount, price),
        None => NewOrder::market(instrument, side, amount),
    };
    if let Some(activation_price) = stop {
        order = order.with_stop(activation_price);
    }
    if let Some(time_in_force) = time_in_force {
        order = order.with_time_in_force(time_in_force);
    }
    order
}

async fn market(settings: &Settings, query: &MarketQuery) -> Result<()> {
    // Market data is never signed and needs no login
    let credentials = settings
        .credentials()
        .unwrap_or_else(|_| Credentials::login(String::new(), String::new()));
    let client = build_client(settings, credentials)?;

    match query {
        MarketQuery::Instruments => {
            let instruments = client.get_instruments().await.context("instruments request")?;
            for instrument in &instruments {
                println!(
                    "{}  ({} / {})",
                    style(&instrument.instrument).bold(),
                    instrument.base_asset,
                    instrument.quote_asset
                );
            }
        }
        MarketQuery::Book { instrument } => {
            let book = client.get_order_book(instrument).await.context("order book request")?;
            println!("{} (version {})", style(&book.instrument).bold(), book.version);
            match (book.best_bid(), book.best_ask()) {
                (Some(bid), Some(ask)) => println!(
                    "best bid {} x {}  |  best ask {} x {}",
                    style(bid.price).green(),
                    bid.amount,
                    style(ask.price).red(),
                    ask.amount
                ),
                _ => println!("{}", style("one side of the book is empty").yellow()),
            }
            println!("{} bids, {} asks", book.bids.len(), book.asks.len());
        }
        MarketQuery::Trades { instrument } => {
            let trades = client.get_recent_trades(instrument).await.context("trades request")?;
            for trade in &trades {
                println!(
                    "{}  {:<4} {} @ {}",
                    trade.trade_time,
                    trade.taker_side(),
                    trade.amount,
                    trade.execution_price
                );
            }
        }
        MarketQuery::Ticker { instrument } => {
            let ticker = client.get_ticker(instrument).await.context("ticker request")?;
            println!(
                "{}  open {}  high {}  low {}  close {}  volume {}",
                style(&ticker.instrument).bold(),
                ticker.open,
                ticker.high,
                ticker.low,
                ticker.close,
                ticker.volume
            );
        }
    }
    Ok(())
}

/// Print a response, then fail on a rejected status
fn finish(response: ApiResponse) -> Result<()> {
    print_response(&response);
    response.error_for_status().context("request rejected")?;
    Ok(())
}

fn print_response(response: &ApiResponse) {
    let status = if response.success {
        style(response.status).green()
    } else {
        style(response.status).red()
    };
    println!("Status: {status}");
    match response.data.as_json() {
        Some(value) => println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        ),
        None => println!("{}", response.data.to_text()),
    }
}
