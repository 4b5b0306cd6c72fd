use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// チェックアウトセッション作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub secret_key: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// 決済プロバイダが発行したセッション
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// ホスト型決済ページの URL
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// プロバイダがリクエストを拒否した
    #[error("{0}")]
    Rejected(String),

    #[error("payment provider unreachable: {0}")]
    Transport(String),
}

/// 決済プロバイダとの境界
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    async fn create_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession, CheckoutError>;
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Stripe Checkout API クライアント
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    api_base: String,
}

impl StripeClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn sessions_url(&self) -> String {
        format!("{}/v1/checkout/sessions", self.api_base)
    }
}

/// サブスクリプション用のフォームパラメータ
fn session_form(request: &CheckoutRequest) -> Vec<(&'static str, &str)> {
    vec![
        ("mode", "subscription"),
        ("payment_method_types[0]", "card"),
        ("line_items[0][price]", request.price_id.as_str()),
        ("line_items[0][quantity]", "1"),
        ("success_url", request.success_url.as_str()),
        ("cancel_url", request.cancel_url.as_str()),
    ]
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    async fn create_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession, CheckoutError> {
        let response = self
            .client
            .post(self.sessions_url())
            .bearer_auth(&request.secret_key)
            .form(&session_form(request))
            .send()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<CheckoutSession>()
                .await
                .map_err(|e| CheckoutError::Transport(format!("invalid session response: {e}")));
        }

        let message = response
            .json::<StripeErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error.message)
            .unwrap_or_else(|| format!("checkout session rejected with status {status}"));

        tracing::error!(status = %status, error = %message, "payment provider rejected checkout session");
        Err(CheckoutError::Rejected(message))
    }
}
