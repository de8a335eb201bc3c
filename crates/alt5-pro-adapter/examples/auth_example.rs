/*
[INPUT]:  ALT5_PAY_EMAIL / ALT5_PAY_PASSWORD environment variables, 2FA code argument
[OUTPUT]: Logged-in cookie session and resolved account id
[POS]:    Examples - authentication flow demonstration
[UPDATE]: When auth flow changes
*/

use alt5_pro_adapter::*;

/// Example: Authentication flow
///
/// 1. Create HTTP client with email/password credentials
/// 2. Sign in and confirm the 2FA code (first CLI argument)
/// 3. Resolve the account id on the same session
#[tokio::main]
async fn main() {
    println!("=== ALT5 Pro Authentication Example ===\n");

    let (Ok(email), Ok(password)) = (
        std::env::var("ALT5_PAY_EMAIL"),
        std::env::var("ALT5_PAY_PASSWORD"),
    ) else {
        eprintln!("Set ALT5_PAY_EMAIL and ALT5_PAY_PASSWORD first");
        return;
    };
    let Some(code) = std::env::args().nth(1) else {
        eprintln!("Usage: auth_example <2fa-code>");
        return;
    };

    let client = match Alt5Client::new(Credentials::login(email, password)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created");

    let auth_manager = AuthManager::with_two_factor(client, Box::new(StaticCode::new(code)));
    let mut ctx = SessionContext::new();

    match auth_manager.login_with_credentials(None).await {
        Ok(outcome) if outcome.success => {
            ctx.record_login(&outcome);
            println!("✓ Logged in, user id: {:?}", ctx.user_id());
        }
        Ok(outcome) => {
            println!(
                "✗ Login rejected at {} (status {}): {}",
                outcome.step,
                outcome.response.status,
                outcome.response.data.to_text()
            );
            return;
        }
        Err(e) => {
            eprintln!("✗ Error: {}", e);
            return;
        }
    }

    match auth_manager.client().get_accounts().await {
        Ok(accounts) => {
            ctx.record_accounts(&accounts);
            println!("✓ Account resolution: {:?}", accounts.resolution());
        }
        Err(e) => eprintln!("✗ Error: {}", e),
    }

    println!("\n✓ Authentication example complete ({:?})", ctx.stage());
}
