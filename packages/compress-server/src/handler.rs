use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::checkout::{CheckoutError, CheckoutRequest};
use crate::config::ConfigError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// サブスクリプション用のチェックアウトセッションを作成する
///
/// リクエストボディは不要。設定の検証はリクエストごとに行う
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CheckoutResponse>, AppError> {
    tracing::info!("create-checkout called");

    let settings = state.config.checkout_settings()?;
    let origin = request_origin(&headers).unwrap_or(state.config.public_origin.as_str());

    let request = CheckoutRequest {
        secret_key: settings.secret_key.to_string(),
        price_id: settings.price_id.to_string(),
        success_url: format!("{origin}/?success=true"),
        cancel_url: format!("{origin}/?canceled=true"),
    };

    tracing::info!(price_id = %request.price_id, origin = %origin, "creating checkout session");
    let session = state.checkout.create_session(&request).await?;
    tracing::info!(session_id = %session.id, "checkout session created");

    Ok(Json(CheckoutResponse {
        session_id: session.id,
        url: session.url,
    }))
}

fn request_origin(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(|origin| origin.trim_end_matches('/'))
        .filter(|origin| !origin.is_empty() && *origin != "null")
}

#[derive(Debug)]
pub enum AppError {
    Configuration(String),
    PaymentProvider(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        tracing::error!(error = %err, "checkout configuration error");
        AppError::Configuration(err.to_string())
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match &err {
            CheckoutError::Rejected(msg) => {
                tracing::error!(error = %msg, "checkout session rejected");
            }
            CheckoutError::Transport(msg) => {
                tracing::error!(error = %msg, "payment provider unreachable");
            }
        }
        AppError::PaymentProvider(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::PaymentProvider(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
