/*
[INPUT]:  Settings, prompter and run options
[OUTPUT]: Console diagnostics plus a structured ScenarioReport
[POS]:    Smoke scenario - API key auth, login fallback, order round trip
[UPDATE]: When the scenario gains steps or outcomes
*/

use std::fmt;
use std::sync::Arc;

use alt5_pro_adapter::{
    AccountResolution, Alt5Client, ApiResponse, AuthManager, NewOrder, SessionContext, Side,
};
use anyhow::{Context, Result};
use console::style;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::{Settings, TestOrderConfig};
use crate::prompt::{PromptTwoFactor, Prompter, ask_confirm};
use crate::session::build_client;

/// Listed before placing the test order
const SHOWN_ORDERS: usize = 3;

pub const CONFIRM_QUESTION: &str = "Continue with test order?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    ApiKey,
    Login,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::ApiKey => write!(f, "API key"),
            AuthMethod::Login => write!(f, "email/password"),
        }
    }
}

/// Likely cause of a rejected test order, read from the error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureHint {
    InsufficientBalance,
    MissingPermissions,
}

impl FailureHint {
    pub fn classify(body: &str) -> Option<Self> {
        let body = body.to_lowercase();
        if body.contains("insufficient") {
            Some(FailureHint::InsufficientBalance)
        } else if body.contains("unauthorized") || body.contains("forbidden") {
            Some(FailureHint::MissingPermissions)
        } else {
            None
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FailureHint::InsufficientBalance => {
                "This might be due to insufficient balance, which is expected for testing"
            }
            FailureHint::MissingPermissions => {
                "This might be due to missing trading permissions on the account"
            }
        }
    }
}

/// How the place-then-cancel step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCheck {
    /// Confirmation declined, nothing placed
    Declined,
    Cancelled { order_id: String },
    /// Order is still resting and needs manual cancellation
    CancelFailed { order_id: String, status: u16 },
    /// Accepted, but the response carried no id to cancel with
    MissingOrderId,
    CreateFailed {
        status: u16,
        hint: Option<FailureHint>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Method that authenticated and resolved an account
    pub auth_method: Option<AuthMethod>,
    pub account_id: Option<String>,
    /// `None` when listing orders failed
    pub open_orders: Option<usize>,
    pub order_check: Option<OrderCheck>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.auth_method.is_some()
            && matches!(
                self.order_check,
                Some(OrderCheck::Cancelled { .. }) | Some(OrderCheck::Declined)
            )
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioOptions {
    /// Skips the 2FA prompt
    pub two_fa_code: Option<String>,
    /// Skips the order confirmation
    pub assume_yes: bool,
}

/// Full smoke run: API key first, then email/password, then the order check
///
/// Rejected requests are reported and fall through to the next method;
/// only transport failures come back as errors.
pub async fn run_scenario(
    settings: &Settings,
    prompter: Arc<dyn Prompter>,
    options: &ScenarioOptions,
) -> Result<ScenarioReport> {
    println!("{}", style("ALT5 Trading API smoke test").bold());
    println!("Endpoint: {}", settings.base_url());

    if let Some(credentials) = settings.api_key_credentials() {
        println!("\n{}", style("Method 1: API key authentication").cyan().bold());
        let client = build_client(settings, credentials)?;
        let mut session = SessionContext::new();

        if let Some(account_id) = try_api_key(&client, &mut session).await? {
            return finish(&client, AuthMethod::ApiKey, account_id, settings, &prompter, options)
                .await;
        }
    } else {
        println!("\n{}", style("API key not configured, skipping method 1").dim());
    }

    if let Some(credentials) = settings.login_credentials() {
        println!("\n{}", style("Method 2: email/password authentication").cyan().bold());
        if let Some(email) = &settings.pay_email {
            println!("Using email: {email}");
        }

        let client = build_client(settings, credentials)?;
        let auth = AuthManager::with_two_factor(client, Box::new(PromptTwoFactor::new(prompter.clone())));
        let mut session = SessionContext::new();

        let outcome = auth
            .login_with_credentials(options.two_fa_code.as_deref())
            .await
            .context("login request")?;
        session.record_login(&outcome);

        if outcome.success {
            println!(
                "{} Login successful (user id: {})",
                style("✓").green(),
                session.user_id().unwrap_or("unknown")
            );
            let client = auth.into_client();
            if let Some(account_id) = lookup_account(&client, &mut session).await? {
                return finish(&client, AuthMethod::Login, account_id, settings, &prompter, options)
                    .await;
            }
        } else {
            println!(
                "{} Login failed at {} step (status {}): {}",
                style("✗").red(),
                outcome.step,
                outcome.response.status,
                outcome.response.data.to_text()
            );
        }
    } else {
        println!("\n{}", style("Email/password not configured, skipping method 2").dim());
    }

    print_all_failed();
    Ok(ScenarioReport::default())
}

async fn try_api_key(client: &Alt5Client, session: &mut SessionContext) -> Result<Option<String>> {
    let profile = client.get_profile().await.context("profile request")?;
    session.record_signed_response(&profile);

    if !profile.success {
        println!(
            "{} API key authentication failed (status {}): {}",
            style("✗").red(),
            profile.status,
            profile.data.to_text()
        );
        return Ok(None);
    }
    println!("{} API key authentication successful", style("✓").green());

    lookup_account(client, session).await
}

async fn lookup_account(client: &Alt5Client, session: &mut SessionContext) -> Result<Option<String>> {
    let outcome = client.get_accounts().await.context("accounts request")?;
    session.record_accounts(&outcome);

    match outcome.resolution() {
        AccountResolution::Resolved(id) => {
            println!("{} Account id obtained: {id}", style("✓").green());
            Ok(Some(id))
        }
        AccountResolution::NoAccounts => {
            println!("{} Accounts request succeeded but listed no account", style("✗").red());
            Ok(None)
        }
        AccountResolution::RequestFailed { status } => {
            println!(
                "{} Failed to get accounts (status {status}): {}",
                style("✗").red(),
                outcome.response.data.to_text()
            );
            Ok(None)
        }
    }
}

async fn finish(
    client: &Alt5Client,
    auth_method: AuthMethod,
    account_id: String,
    settings: &Settings,
    prompter: &Arc<dyn Prompter>,
    options: &ScenarioOptions,
) -> Result<ScenarioReport> {
    info!(%auth_method, %account_id, "authenticated, running order check");
    let (open_orders, order_check) =
        order_check(client, &account_id, &settings.test_order, prompter, options.assume_yes).await?;

    Ok(ScenarioReport {
        auth_method: Some(auth_method),
        account_id: Some(account_id),
        open_orders,
        order_check: Some(order_check),
    })
}

/// List open orders, then place and cancel the configured test order
pub async fn order_check(
    client: &Alt5Client,
    account_id: &str,
    order: &TestOrderConfig,
    prompter: &Arc<dyn Prompter>,
    assume_yes: bool,
) -> Result<(Option<usize>, OrderCheck)> {
    println!("\n{}", style("Getting current active orders...").bold());
    let orders = client.get_orders(account_id).await.context("orders request")?;
    let open_orders = if orders.success {
        let items = order_items(&orders);
        println!("{} Current active orders: {}", style("✓").green(), items.len());
        for item in items.iter().take(SHOWN_ORDERS) {
            println!("  - {}", describe_order(item));
        }
        Some(items.len())
    } else {
        println!(
            "{} Failed to get orders (status {}): {}",
            style("!").yellow(),
            orders.status,
            orders.data.to_text()
        );
        None
    };

    println!(
        "\n{}",
        style("This will create a REAL order with a very low price (should not execute)").yellow()
    );
    println!("{}", style("The order is cancelled right after creation").yellow());

    if !assume_yes && !ask_confirm(prompter, CONFIRM_QUESTION).await? {
        println!("Test order creation skipped.");
        return Ok((open_orders, OrderCheck::Declined));
    }

    println!(
        "Creating test order: BUY {} {} at {}...",
        order.amount, order.instrument, order.price
    );
    let new_order = NewOrder::limit(order.instrument.clone(), Side::Buy, order.amount, order.price);
    let created = client
        .create_order(account_id, new_order)
        .await
        .context("create order request")?;

    if !created.success {
        let body = created.data.to_text();
        println!(
            "{} Test order creation failed (status {}): {body}",
            style("✗").red(),
            created.status
        );
        let hint = FailureHint::classify(&body);
        if let Some(hint) = hint {
            println!("{}", style(hint.message()).dim());
        }
        return Ok((
            open_orders,
            OrderCheck::CreateFailed {
                status: created.status,
                hint,
            },
        ));
    }

    let Some(order_id) = created.id_field(&["id", "orderId"]) else {
        println!("{} Order created but no id returned", style("!").yellow());
        println!("Order response: {}", created.data.to_text());
        return Ok((open_orders, OrderCheck::MissingOrderId));
    };
    println!("{} Test order created, id {order_id}", style("✓").green());

    let delay = order.cancel_delay();
    println!("Waiting {}ms before cancelling...", delay.as_millis());
    tokio::time::sleep(delay).await;

    let cancelled = client
        .cancel_order(account_id, &order_id)
        .await
        .context("cancel order request")?;

    if cancelled.success {
        println!("{} Test order cancelled", style("✓").green());
        println!("{}", style("ALT5 Trading API is working correctly").green().bold());
        Ok((open_orders, OrderCheck::Cancelled { order_id }))
    } else {
        warn!(%order_id, status = cancelled.status, "test order left open");
        println!(
            "{} Failed to cancel test order (status {}): {}",
            style("!").yellow(),
            cancelled.status,
            cancelled.data.to_text()
        );
        println!(
            "{}",
            style("Please cancel this order manually in the ALT5 interface").yellow().bold()
        );
        Ok((
            open_orders,
            OrderCheck::CancelFailed {
                order_id,
                status: cancelled.status,
            },
        ))
    }
}

fn order_items(response: &ApiResponse) -> &[Value] {
    match response.data.as_json() {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}

/// One-line summary of a raw order object; absent fields print as N/A
pub fn describe_order(order: &Value) -> String {
    let field = |key: &str| match order.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "N/A".to_string(),
        Some(other) => other.to_string(),
    };
    format!(
        "{} {} {} at {}",
        field("type"),
        field("amount"),
        field("instrument"),
        field("price")
    )
}

fn print_all_failed() {
    println!("\n{}", style("All authentication methods failed").red().bold());
    println!("Please check:");
    println!("  1. API key credentials are correct");
    println!("  2. Account has proper permissions");
    println!("  3. ALT5 API endpoints are accessible");
    println!("  4. ALT5_PAY_EMAIL and ALT5_PAY_PASSWORD are set");
}
