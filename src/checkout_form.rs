//! payment-client/src/checkout_form.rs
//!
//! The payment confirmation panel.
//!
//! Mounted by an initiation page once a client secret exists, the panel
//! retrieves the intent's current state from Stripe, renders the Payment
//! Element, submits confirmation, and reports terminal status upward through
//! the status callback. It owns no durable state; everything resets on
//! remount.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use gloo_dialogs::alert;
use serde::Deserialize;

use crate::client::{
    ConfirmPaymentParams, ElementsOptions, IntentSnapshot, IntentStatus, PaymentResult,
    StripeError, StripeHandle,
};
use crate::config::use_app_config;
use crate::currency;
use crate::interop::use_stripejs;

const PAYMENT_ELEMENT_SELECTOR: &str = "#payment-element";

/// Which step of the checkout flow the page is showing.
///
/// Owned by the page; the panel only ever advances it through the status
/// callback. Matching is exhaustive everywhere so a new status forces every
/// consumer to be revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentStatus {
    Initial,
    Processing,
    Processed,
    Error,
}

/// Everything needed to mount the confirmation panel for one payment attempt.
///
/// Built once by an initiation flow, immutable afterwards, dropped on cancel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PaymentCheckout {
    /// Provider-issued secret scoping this payment attempt. Opaque; never
    /// mutated by this client.
    pub client_secret: String,
    #[serde(default, deserialize_with = "crate::api::opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub amount_display: Option<String>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

impl PaymentCheckout {
    pub fn from_client_secret(client_secret: String) -> Self {
        Self {
            client_secret,
            id: None,
            amount_display: None,
            customer: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "crate::api::string_or_number")]
    pub id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

/// Transient operator-facing notice; cleared only by remounting the panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    fn css_class(&self) -> &'static str {
        match self.kind {
            MessageKind::Success => "text-green-800",
            MessageKind::Error => "text-red-500",
            MessageKind::Info => "text-black",
        }
    }
}

/// Map a retrieved intent status to the status to report upward and the
/// message to show.
///
/// Only `succeeded` and unknown statuses advance to `Processed`; `processing`
/// stays in `Processing` with an informational notice, and
/// `requires_payment_method` leaves the panel interactive with no message.
fn snapshot_outcome(status: IntentStatus) -> (Option<PaymentStatus>, Option<Message>) {
    match status {
        IntentStatus::Succeeded => (
            Some(PaymentStatus::Processed),
            Some(Message::success("Payment succeeded!")),
        ),
        IntentStatus::Processing => (None, Some(Message::info("Your payment is processing"))),
        IntentStatus::RequiresPaymentMethod => (None, None),
        IntentStatus::Other(_) => (
            Some(PaymentStatus::Processed),
            Some(Message::error("Failed to retrieve payment information")),
        ),
    }
}

/// Card- and validation-class errors show the provider's message verbatim;
/// everything else gets a generic fallback.
fn confirm_error_message(error: &StripeError) -> Message {
    if error.is_user_actionable() {
        Message::error(error.message.clone())
    } else {
        Message::error("An unexpected error occured")
    }
}

/// Once any message is shown, no further submission is permitted without a
/// remount.
fn submit_disabled(loading: bool, handle_ready: bool, has_message: bool) -> bool {
    loading || !handle_ready || has_message
}

#[derive(Properties, PartialEq, Clone)]
pub struct CheckoutFormProps {
    /// The payment attempt being confirmed.
    pub payment: PaymentCheckout,
    /// Page-owned status; the panel renders its form only while `Processing`.
    pub status: PaymentStatus,
    /// Single channel through which the panel advances the page's status.
    pub on_status: Callback<PaymentStatus>,
}

/// Confirmation panel over the Stripe Payment Element.
///
/// Lifecycle: once Stripe.js is ready and a client secret is present, mount
/// the Payment Element and retrieve the intent snapshot; a submit then runs
/// `confirmPayment` with a return URL pointing at the by-secret page for
/// redirect-based authentication flows.
#[function_component(CheckoutForm)]
pub fn checkout_form(props: &CheckoutFormProps) -> Html {
    let config = use_app_config();
    let stripe_ready = use_stripejs();
    let handle = use_state(|| None::<StripeHandle>);
    let snapshot = use_state(|| None::<IntentSnapshot>);
    let message = use_state(|| None::<Message>);
    let loading = use_state(|| false);

    // Mount the Payment Element and reconcile the intent's current state,
    // re-running only when readiness or the client secret changes.
    {
        let handle = handle.clone();
        let snapshot = snapshot.clone();
        let message = message.clone();
        let on_status = props.on_status.clone();
        let publishable_key = config.publishable_key.clone();
        use_effect_with(
            (stripe_ready, props.payment.client_secret.clone()),
            move |(ready, client_secret)| {
                if *ready && !client_secret.is_empty() {
                    let client_secret = client_secret.clone();
                    spawn_local(async move {
                        let options =
                            ElementsOptions::with_default_appearance(client_secret.clone());
                        let mounted = StripeHandle::mount(
                            &publishable_key,
                            options,
                            PAYMENT_ELEMENT_SELECTOR,
                        )
                        .await;
                        let stripe = match mounted {
                            Ok(stripe) => stripe,
                            Err(err) => {
                                log::error!("failed to mount payment element: {}", err.message);
                                message.set(Some(Message::error(err.message)));
                                return;
                            }
                        };

                        match stripe.retrieve_intent(&client_secret).await {
                            Ok(intent) => {
                                let (next_status, notice) =
                                    snapshot_outcome(intent.intent_status());
                                snapshot.set(Some(intent));
                                if let Some(notice) = notice {
                                    message.set(Some(notice));
                                }
                                if let Some(next_status) = next_status {
                                    on_status.emit(next_status);
                                }
                            }
                            Err(err) => {
                                log::error!("failed to retrieve payment intent: {}", err.message);
                                message.set(Some(Message::error(err.message)));
                            }
                        }
                        handle.set(Some(stripe));
                    });
                }
                || ()
            },
        );
    }

    // Presentational projections of the snapshot.
    let amount_display = snapshot
        .as_ref()
        .map(|s| {
            let major = currency::to_major_units(s.amount, &s.currency);
            currency::format_for_display(major, &s.currency, 0)
        })
        .or_else(|| props.payment.amount_display.clone());
    let description = snapshot.as_ref().and_then(|s| s.description.clone());
    let testing_banner = snapshot.as_ref().is_some_and(|s| !s.livemode);

    let onsubmit = {
        let handle = handle.clone();
        let message = message.clone();
        let loading = loading.clone();
        let on_status = props.on_status.clone();
        let return_url = config.return_url(&props.payment.client_secret);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(stripe) = (*handle).clone() else {
                alert("Stripe not loaded");
                return;
            };
            let message = message.clone();
            let loading = loading.clone();
            let on_status = on_status.clone();
            let params = ConfirmPaymentParams {
                return_url: Some(return_url.clone()),
            };
            loading.set(true);
            spawn_local(async move {
                match stripe.confirm(params).await {
                    PaymentResult::Success(info) => {
                        log::info!("payment {} confirmed with status {}", info.id, info.status);
                        message.set(Some(Message::success("Payment succeeded!")));
                        on_status.emit(PaymentStatus::Processed);
                    }
                    PaymentResult::Error(err) => {
                        message.set(Some(confirm_error_message(&err)));
                    }
                }
                loading.set(false);
            });
        })
    };

    let disabled = submit_disabled(*loading, handle.is_some(), message.is_some());

    html! {
        <>
            {
                match props.status {
                    PaymentStatus::Processing => html! {
                        <form id="payment-form" {onsubmit} class="m-auto">
                            <div class="mb-4 space-y-1">
                                {
                                    if let Some(amount) = &amount_display {
                                        html! {
                                            <div class="text-center font-bold text-lg">
                                                { format!("Total: {amount}") }
                                            </div>
                                        }
                                    } else {
                                        Html::default()
                                    }
                                }
                                {
                                    if let Some(description) = &description {
                                        html! {
                                            <div class="text-center text-sm">{ description }</div>
                                        }
                                    } else {
                                        Html::default()
                                    }
                                }
                                {
                                    if testing_banner {
                                        html! {
                                            <div class="text-center text-md font-bold text-amber-300">
                                                { "Environment Testing" }
                                            </div>
                                        }
                                    } else {
                                        Html::default()
                                    }
                                }
                            </div>
                            <div id="payment-element"></div>
                            <button
                                id="submit"
                                class="rounded w-full p-2 my-2 bg-slate-500"
                                {disabled}
                            >
                                <span id="button-text">
                                    {
                                        if *loading {
                                            html! { <div class="spinner" id="spinner">{ "Loading..." }</div> }
                                        } else if let Some(amount) = &amount_display {
                                            html! { { format!("Pay {amount}") } }
                                        } else {
                                            html! { "Pay" }
                                        }
                                    }
                                </span>
                            </button>
                        </form>
                    },
                    PaymentStatus::Initial | PaymentStatus::Processed | PaymentStatus::Error => {
                        Html::default()
                    }
                }
            }
            {
                if let Some(notice) = &*message {
                    html! {
                        <div
                            id="payment-message"
                            class={classes!("text-center", "font-bold", notice.css_class())}
                        >
                            { &notice.text }
                        </div>
                    }
                } else {
                    Html::default()
                }
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_advances_and_reports_success() {
        let (status, message) = snapshot_outcome(IntentStatus::Succeeded);
        assert_eq!(status, Some(PaymentStatus::Processed));
        let message = message.unwrap();
        assert_eq!(message.kind, MessageKind::Success);
        assert!(message.text.contains("succeeded"));
    }

    #[test]
    fn processing_stays_interactive_with_info_notice() {
        let (status, message) = snapshot_outcome(IntentStatus::Processing);
        assert_eq!(status, None);
        assert_eq!(message.unwrap().kind, MessageKind::Info);
    }

    #[test]
    fn requires_payment_method_is_silent() {
        let (status, message) = snapshot_outcome(IntentStatus::RequiresPaymentMethod);
        assert_eq!(status, None);
        assert_eq!(message, None);
    }

    #[test]
    fn unknown_status_reports_retrieval_failure() {
        let (status, message) = snapshot_outcome(IntentStatus::Other("canceled".into()));
        assert_eq!(status, Some(PaymentStatus::Processed));
        let message = message.unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, "Failed to retrieve payment information");
    }

    #[test]
    fn card_error_message_is_shown_verbatim() {
        let err = StripeError {
            message: "Your card was declined.".into(),
            error_type: Some("card_error".into()),
            code: Some("card_declined".into()),
        };
        let message = confirm_error_message(&err);
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, "Your card was declined.");
    }

    #[test]
    fn other_errors_get_generic_message() {
        let err = StripeError {
            message: "internal".into(),
            error_type: Some("api_error".into()),
            code: None,
        };
        assert_eq!(confirm_error_message(&err).text, "An unexpected error occured");
    }

    #[test]
    fn any_message_disables_submission_permanently() {
        assert!(submit_disabled(false, true, true));
        assert!(submit_disabled(true, true, false));
        assert!(submit_disabled(false, false, false));
        assert!(!submit_disabled(false, true, false));
    }

    #[test]
    fn payment_checkout_decodes_with_minimal_fields() {
        let checkout: PaymentCheckout =
            serde_json::from_value(serde_json::json!({ "client_secret": "cs_1" })).unwrap();
        assert_eq!(checkout.client_secret, "cs_1");
        assert_eq!(checkout.id, None);
        assert_eq!(checkout.amount_display, None);
        assert_eq!(checkout.customer, None);
    }

    #[test]
    fn payment_checkout_decodes_numeric_ids() {
        let checkout: PaymentCheckout = serde_json::from_value(serde_json::json!({
            "client_secret": "cs_1",
            "id": 77,
            "customer": { "id": 12 }
        }))
        .unwrap();
        assert_eq!(checkout.id.as_deref(), Some("77"));
        assert_eq!(checkout.customer.unwrap().id, "12");
    }
}
