/*
[INPUT]:  Authenticated client (API key or session cookies)
[OUTPUT]: Profile, account list, balances and deposit details
[POS]:    HTTP layer - user data endpoints (require auth)
[UPDATE]: When adding new user endpoints or changing account resolution
*/

use reqwest::Method;
use tracing::debug;

use crate::http::client::encode_component;
use crate::http::{Alt5Client, Result};
use crate::types::{AccountsOutcome, ApiResponse};

impl Alt5Client {
    /// Fetch the user profile; doubles as an auth check
    ///
    /// GET /frontoffice/api/profile
    pub async fn get_profile(&self) -> Result<ApiResponse> {
        self.request_empty(Method::GET, "/api/profile").await
    }

    /// List accounts and pick out the first account id
    ///
    /// GET /frontoffice/api/accounts
    pub async fn get_accounts(&self) -> Result<AccountsOutcome> {
        let response = self.request_empty(Method::GET, "/api/accounts").await?;
        let outcome = AccountsOutcome::from_response(response);
        debug!(account_id = ?outcome.account_id, "accounts resolved");
        Ok(outcome)
    }

    /// Balances per asset for an account
    ///
    /// GET /frontoffice/api/{account_id}/balance
    pub async fn get_balances(&self, account_id: &str) -> Result<ApiResponse> {
        let endpoint = format!("/api/{}/balance", encode_component(account_id));
        self.request_empty(Method::GET, &endpoint).await
    }

    /// Deposit address or bank transfer details for one asset
    ///
    /// GET /frontoffice/api/wallet/{account_id}/deposit?paymentSystem={payment_system}&assetId={asset_id}
    pub async fn get_deposit_address(
        &self,
        account_id: &str,
        payment_system: &str,
        asset_id: &str,
    ) -> Result<ApiResponse> {
        let endpoint = format!(
            "/api/wallet/{}/deposit?paymentSystem={}&assetId={}",
            encode_component(account_id),
            encode_component(payment_system),
            encode_component(asset_id)
        );
        self.request_empty(Method::GET, &endpoint).await
    }
}
