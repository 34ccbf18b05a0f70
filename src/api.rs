//! payment-client/src/api.rs
//!
//! Backend REST client for the checkout and transaction endpoints.
//!
//! Both endpoints wrap their payload in a `{success, message, data}` envelope;
//! failures either carry a top-level `message` or a structured
//! `data.errors[{message}]` list. The most specific message available is what
//! the operator sees, so envelope decoding lives here rather than in the pages.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use gloo_net::http::{Request, Response};

use crate::checkout_form::PaymentCheckout;
use crate::config::AppConfig;

/// A backend call that did not produce a usable payload.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a failure envelope; the message is already
    /// the most specific one the response carried.
    #[error("{0}")]
    Backend(String),
    /// The request never produced a response.
    #[error("{0}")]
    Network(#[from] gloo_net::Error),
}

/// Body of `POST /massage/booking/checkout`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub cart_id: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CheckoutData {
    payment_intent: PaymentCheckout,
}

/// Payload of `GET /payment/transactions/{id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TransactionData {
    pub latest_history: LatestHistory,
    #[serde(default)]
    pub payment_confirm: bool,
    pub currency: String,
    /// The backend is loose about this field's type; numbers are accepted and
    /// rendered as-is.
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LatestHistory {
    #[serde(deserialize_with = "string_or_number")]
    pub event_id: String,
    #[serde(default)]
    pub event_client_secret: Option<String>,
}

/// Create a checkout for a cart and return the payment intent to confirm.
pub async fn post_checkout(
    config: &AppConfig,
    api_token: &str,
    request: &CheckoutRequest,
) -> Result<PaymentCheckout, ApiError> {
    let url = format!("{}/massage/booking/checkout", config.api_base_url);
    let response = Request::post(&url)
        .header("Content-Type", "application/json")
        .header("Authorization", &format!("Bearer {api_token}"))
        .json(request)?
        .send()
        .await?;
    let data: CheckoutData = decode_envelope(read_body(response).await?)?;
    Ok(data.payment_intent)
}

/// Fetch an existing transaction so its latest event can be confirmed.
pub async fn get_transaction(
    config: &AppConfig,
    api_token: &str,
    transaction_id: &str,
) -> Result<TransactionData, ApiError> {
    let url = format!("{}/payment/transactions/{}", config.api_base_url, transaction_id);
    let response = Request::get(&url)
        .header("Content-Type", "application/json")
        .header("Authorization", &format!("Bearer {api_token}"))
        .send()
        .await?;
    decode_envelope(read_body(response).await?)
}

async fn read_body(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    match response.json::<Value>().await {
        Ok(body) => Ok(body),
        // Failure statuses still flow through the envelope when the body is
        // JSON; this arm only covers bodies that are not.
        Err(_) => Err(ApiError::Backend(format!(
            "request failed with status {status}"
        ))),
    }
}

fn decode_envelope<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    if body.get("success").and_then(Value::as_bool) == Some(true) {
        let data = body
            .get("data")
            .cloned()
            .ok_or_else(|| ApiError::Backend("response carried no data".into()))?;
        serde_json::from_value(data)
            .map_err(|e| ApiError::Backend(format!("malformed response: {e}")))
    } else {
        Err(ApiError::Backend(failure_message(&body)))
    }
}

/// Most specific failure message in the envelope: structured error entries
/// joined with newlines when present, the top-level message otherwise.
fn failure_message(body: &Value) -> String {
    if let Some(errors) = body.pointer("/data/errors").and_then(Value::as_array) {
        let joined = errors
            .iter()
            .filter_map(|entry| entry.get("message").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("\n");
        if !joined.is_empty() {
            return joined;
        }
    }
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "Unexpected response from backend".to_string())
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// `string_or_number` for optional fields; `null` decodes to `None`.
pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_yields_payment_intent() {
        let body = json!({
            "success": true,
            "data": {
                "payment_intent": { "client_secret": "cs_1" },
                "payment_data": { "ignored": true }
            }
        });
        let data: CheckoutData = decode_envelope(body).unwrap();
        assert_eq!(data.payment_intent.client_secret, "cs_1");
    }

    #[test]
    fn structured_errors_join_with_newlines() {
        let body = json!({
            "success": false,
            "message": "Validation failed",
            "data": { "errors": [
                { "message": "Cart is empty" },
                { "message": "Cart already checked out" }
            ]}
        });
        let err = decode_envelope::<CheckoutData>(body).unwrap_err();
        assert_eq!(err.to_string(), "Cart is empty\nCart already checked out");
    }

    #[test]
    fn failure_falls_back_to_top_level_message() {
        let body = json!({ "success": false, "message": "Unauthorized" });
        let err = decode_envelope::<CheckoutData>(body).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn failure_without_message_gets_generic_text() {
        let err = decode_envelope::<CheckoutData>(json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected response from backend");
    }

    #[test]
    fn transaction_accepts_numeric_price_and_event_id() {
        let body = json!({
            "success": true,
            "data": {
                "latest_history": {
                    "event_id": 981,
                    "event_client_secret": "cs_evt"
                },
                "payment_confirm": false,
                "currency": "THB",
                "price": 1500
            }
        });
        let data: TransactionData = decode_envelope(body).unwrap();
        assert_eq!(data.latest_history.event_id, "981");
        assert_eq!(data.latest_history.event_client_secret.as_deref(), Some("cs_evt"));
        assert_eq!(data.price, "1500");
        assert!(!data.payment_confirm);
    }
}
