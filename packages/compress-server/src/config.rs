use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:3000";

/// チェックアウトに必要な設定が欠けている
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("checkout configuration missing: secret key")]
    MissingSecretKey,

    #[error("checkout configuration missing: price id")]
    MissingPriceId,
}

/// サーバー設定
///
/// 決済の認証情報は起動時には必須とせず、リクエストごとに検証する
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub stripe_secret_key: Option<String>,
    pub stripe_price_id: Option<String>,
    pub stripe_api_base: String,
    pub public_origin: String,
}

/// 検証済みのチェックアウト設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSettings<'a> {
    pub secret_key: &'a str,
    pub price_id: &'a str,
}

impl ServerConfig {
    /// 環境変数から読み込む
    ///
    /// - BIND_ADDR（既定 0.0.0.0:3000）
    /// - STRIPE_SECRET_KEY
    /// - STRIPE_PRICE_ID
    /// - STRIPE_API_BASE（既定 https://api.stripe.com）
    /// - PUBLIC_ORIGIN（Origin ヘッダがない場合の戻り先）
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            stripe_secret_key: non_empty_var("STRIPE_SECRET_KEY"),
            stripe_price_id: non_empty_var("STRIPE_PRICE_ID"),
            stripe_api_base: env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            public_origin: env::var("PUBLIC_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_ORIGIN.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    /// 秘密鍵 → 価格 ID の順に検証する
    pub fn checkout_settings(&self) -> Result<CheckoutSettings<'_>, ConfigError> {
        let secret_key = self
            .stripe_secret_key
            .as_deref()
            .ok_or(ConfigError::MissingSecretKey)?;
        let price_id = self
            .stripe_price_id
            .as_deref()
            .ok_or(ConfigError::MissingPriceId)?;

        Ok(CheckoutSettings {
            secret_key,
            price_id,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
