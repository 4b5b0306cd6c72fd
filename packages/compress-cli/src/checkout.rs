use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutReply {
    session_id: Option<String>,
    url: Option<String>,
    error: Option<String>,
}

/// 決済ページへの遷移先
#[derive(Debug, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub session_id: String,
    pub url: String,
}

/// エンドポイントを呼び出してセッションを取得する（再試行はしない）
pub async fn start_checkout(endpoint: &str) -> Result<CheckoutRedirect> {
    let response = reqwest::Client::new()
        .post(endpoint)
        .json(&serde_json::json!({}))
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}"))?;

    let status = response.status();
    let reply: Option<CheckoutReply> = response.json().await.ok();
    parse_reply(status.is_success(), status.as_u16(), reply)
}

fn parse_reply(success: bool, status: u16, reply: Option<CheckoutReply>) -> Result<CheckoutRedirect> {
    let reply = match reply {
        Some(reply) => reply,
        None if success => bail!("checkout endpoint returned an unreadable response"),
        None => bail!("HTTP {status}"),
    };

    if let Some(error) = reply.error {
        bail!("{error} (HTTP {status})");
    }
    if !success {
        bail!("HTTP {status}");
    }

    let session_id = reply
        .session_id
        .ok_or_else(|| anyhow!("checkout endpoint returned no session id"))?;
    let url = reply
        .url
        .ok_or_else(|| anyhow!("checkout session {session_id} has no hosted page URL"))?;

    Ok(CheckoutRedirect { session_id, url })
}
