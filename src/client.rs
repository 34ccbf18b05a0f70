//! payment-client/src/client.rs
//!
//! High-level typed API over the Stripe.js bindings.
//!
//! This module provides:
//! - `ElementsOptions` to configure Stripe Elements with a PaymentIntent client secret.
//! - `ConfirmPaymentParams` for `stripe.confirmPayment`, carrying the return URL.
//! - `StripeHandle`, the explicitly constructed client handle a checkout panel
//!   owns for its lifetime. It is created at most once per mounted panel (the
//!   mount effect is keyed on script readiness plus the client secret) and is
//!   never shared through module state.
//! - `IntentSnapshot` / `IntentStatus`, the read-only projection of a payment
//!   intent fetched with `retrievePaymentIntent`.
//! - `PaymentResult` / `StripeError` for confirmation outcomes.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Object, Reflect};

use crate::bindings::{new_stripe, JsElements, JsPaymentElement, JsStripe};

/// Configuration for `stripe.elements({ clientSecret, appearance })`.
#[derive(Serialize, Clone, Debug)]
pub struct ElementsOptions {
    /// The PaymentIntent client secret issued by the backend or provider.
    #[serde(rename = "clientSecret")]
    pub client_secret: String,

    /// Optional Stripe Elements appearance settings.
    #[serde(rename = "appearance", skip_serializing_if = "Option::is_none")]
    pub appearance: Option<JsonValue>,
}

impl ElementsOptions {
    /// Options with the appearance the checkout pages use.
    pub fn with_default_appearance(client_secret: String) -> Self {
        Self {
            client_secret,
            appearance: Some(serde_json::json!({
                "theme": "stripe",
                "labels": "floating",
            })),
        }
    }
}

/// Parameters for `stripe.confirmPayment({ confirmParams })`.
#[derive(Serialize, Clone, Debug, Default)]
pub struct ConfirmPaymentParams {
    /// For redirect-based flows: where the provider sends the customer back
    /// after off-page authentication.
    #[serde(rename = "return_url", skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

/// Representation of a Stripe.js error object.
#[derive(Clone, Debug, Deserialize)]
pub struct StripeError {
    /// Human-readable message.
    pub message: String,
    /// Stripe's error type, e.g. `"card_error"`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Optional Stripe error code, e.g. `"card_declined"`.
    #[serde(default)]
    pub code: Option<String>,
}

impl StripeError {
    fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            code: None,
        }
    }

    /// Card- and validation-class errors carry a message safe to show the
    /// operator verbatim; anything else gets a generic fallback.
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self.error_type.as_deref(),
            Some("card_error") | Some("validation_error")
        )
    }
}

/// Read-only projection of a payment intent, fetched on panel mount.
///
/// Display only; nothing here is persisted or written back to the provider.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IntentSnapshot {
    #[serde(default)]
    pub id: String,
    pub status: String,
    /// Amount in the provider's minor units (except zero-decimal currencies).
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub livemode: bool,
}

impl IntentSnapshot {
    pub fn intent_status(&self) -> IntentStatus {
        IntentStatus::from(self.status.as_str())
    }
}

/// Provider intent status values the panel branches on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntentStatus {
    Succeeded,
    Processing,
    RequiresPaymentMethod,
    /// Any status this client does not act on specifically.
    Other(String),
}

impl From<&str> for IntentStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "succeeded" => IntentStatus::Succeeded,
            "processing" => IntentStatus::Processing,
            "requires_payment_method" => IntentStatus::RequiresPaymentMethod,
            other => IntentStatus::Other(other.to_string()),
        }
    }
}

/// Minimal information about a confirmed PaymentIntent.
#[derive(Clone, Debug)]
pub struct PaymentIntentInfo {
    /// Stripe's identifier, e.g. `pi_1Fxxxxxx`.
    pub id: String,
    /// Final status, e.g. `"succeeded"`.
    pub status: String,
}

/// Strongly-typed outcome of attempting to confirm a payment.
#[derive(Debug)]
pub enum PaymentResult {
    /// The PaymentIntent was confirmed without a redirect.
    Success(PaymentIntentInfo),
    /// Something went wrong. Contains Stripe's error details.
    Error(StripeError),
}

/// One mounted Stripe client: the `Stripe` instance and the `Elements` factory
/// whose Payment Element is mounted in the panel's DOM.
///
/// Constructed with [`StripeHandle::mount`] and owned by exactly one checkout
/// panel; dropping the panel retires it along with its DOM mount point.
#[derive(Clone, Debug)]
pub struct StripeHandle {
    stripe: JsStripe,
    elements: JsElements,
}

impl StripeHandle {
    /// Initialize Stripe.js, create an Elements instance, and mount a Payment
    /// Element into the node matched by `mount_selector`.
    ///
    /// Requires Stripe.js to be loaded (see `use_stripejs`); call once per
    /// client secret.
    pub async fn mount(
        publishable_key: &str,
        elements_options: ElementsOptions,
        mount_selector: &str,
    ) -> Result<Self, StripeError> {
        let stripe = new_stripe(publishable_key);

        let opts_js = to_value(&elements_options).map_err(serde_to_stripe_error)?;
        let elements = stripe.elements(opts_js).map_err(js_to_stripe_error)?;

        let payment_element: JsPaymentElement = elements
            .create_element("payment", JsValue::undefined())
            .map_err(js_to_stripe_error)?;
        payment_element
            .mount(mount_selector)
            .map_err(js_to_stripe_error)?;

        Ok(Self { stripe, elements })
    }

    /// Fetch the current state of the intent scoped by `client_secret`.
    ///
    /// # Errors
    ///
    /// Returns `Err(StripeError)` when Stripe.js rejects, reports an error
    /// object, or the response carries no payment intent.
    pub async fn retrieve_intent(&self, client_secret: &str) -> Result<IntentSnapshot, StripeError> {
        let promise = self
            .stripe
            .retrieve_payment_intent(client_secret)
            .map_err(js_to_stripe_error)?;
        let result = JsFuture::from(promise).await.map_err(js_to_stripe_error)?;

        if let Some(err) = error_property(&result) {
            return Err(err);
        }

        let intent_js = Reflect::get(&result, &JsValue::from_str("paymentIntent"))
            .map_err(js_to_stripe_error)?;
        if intent_js.is_undefined() || intent_js.is_null() {
            return Err(StripeError::from_message(
                "retrievePaymentIntent returned no payment intent",
            ));
        }
        from_value::<IntentSnapshot>(intent_js).map_err(serde_from_stripe_error)
    }

    /// Confirm the payment with the mounted Payment Element, handling SCA/3DS
    /// redirects through `redirect: "if_required"`.
    pub async fn confirm(&self, params: ConfirmPaymentParams) -> PaymentResult {
        // Build the JS options object dynamically
        let opts = Object::new();
        let _ = Reflect::set(
            &opts,
            &JsValue::from_str("elements"),
            self.elements.as_ref(),
        );
        let params_js = match to_value(&params) {
            Ok(v) => v,
            Err(e) => return PaymentResult::Error(serde_to_stripe_error(e)),
        };
        let _ = Reflect::set(&opts, &JsValue::from_str("confirmParams"), &params_js);
        let _ = Reflect::set(
            &opts,
            &JsValue::from_str("redirect"),
            &JsValue::from_str("if_required"),
        );

        let promise = match self.stripe.confirm_payment(opts.into()) {
            Ok(p) => p,
            Err(e) => return PaymentResult::Error(js_to_stripe_error(e)),
        };

        match JsFuture::from(promise).await {
            Ok(js_val) => {
                if let Some(err) = error_property(&js_val) {
                    return PaymentResult::Error(err);
                }
                // No redirect happened; pull out what the intent settled to.
                let intent = Reflect::get(&js_val, &JsValue::from_str("paymentIntent")).ok();
                let id = intent
                    .as_ref()
                    .and_then(|pi| Reflect::get(pi, &JsValue::from_str("id")).ok())
                    .and_then(|v| v.as_string())
                    .unwrap_or_default();
                let status = intent
                    .as_ref()
                    .and_then(|pi| Reflect::get(pi, &JsValue::from_str("status")).ok())
                    .and_then(|v| v.as_string())
                    .unwrap_or_else(|| "succeeded".into());
                PaymentResult::Success(PaymentIntentInfo { id, status })
            }
            Err(js_err) => PaymentResult::Error(js_to_stripe_error(js_err)),
        }
    }

}

/// Extract the `error` property of a Stripe.js result object, if present.
fn error_property(result: &JsValue) -> Option<StripeError> {
    let err_js = Reflect::get(result, &JsValue::from_str("error")).ok()?;
    if err_js.is_undefined() || err_js.is_null() {
        return None;
    }
    Some(js_to_stripe_error(err_js))
}

/// Convert any caught `JsValue` into a `StripeError` with best effort.
fn js_to_stripe_error(value: JsValue) -> StripeError {
    from_value::<StripeError>(value.clone()).unwrap_or_else(|_| {
        StripeError::from_message(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    })
}

fn serde_to_stripe_error(err: serde_wasm_bindgen::Error) -> StripeError {
    StripeError::from_message(err.to_string())
}

fn serde_from_stripe_error(err: serde_wasm_bindgen::Error) -> StripeError {
    StripeError::from_message(format!("malformed payment intent: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_status_maps_known_values() {
        assert_eq!(IntentStatus::from("succeeded"), IntentStatus::Succeeded);
        assert_eq!(IntentStatus::from("processing"), IntentStatus::Processing);
        assert_eq!(
            IntentStatus::from("requires_payment_method"),
            IntentStatus::RequiresPaymentMethod
        );
        assert_eq!(
            IntentStatus::from("requires_action"),
            IntentStatus::Other("requires_action".into())
        );
    }

    #[test]
    fn card_and_validation_errors_are_user_actionable() {
        let card = StripeError {
            message: "Your card was declined.".into(),
            error_type: Some("card_error".into()),
            code: Some("card_declined".into()),
        };
        let validation = StripeError {
            message: "Incomplete number".into(),
            error_type: Some("validation_error".into()),
            code: None,
        };
        let api = StripeError {
            message: "boom".into(),
            error_type: Some("api_error".into()),
            code: None,
        };
        assert!(card.is_user_actionable());
        assert!(validation.is_user_actionable());
        assert!(!api.is_user_actionable());
        assert!(!StripeError::from_message("x").is_user_actionable());
    }

    #[test]
    fn elements_options_serialize_camel_case_secret() {
        let opts = ElementsOptions::with_default_appearance("cs_123".into());
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["clientSecret"], "cs_123");
        assert_eq!(json["appearance"]["theme"], "stripe");
        assert_eq!(json["appearance"]["labels"], "floating");
    }
}
