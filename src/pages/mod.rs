//! Top-level checkout pages and the state shell they share.

mod cart;
mod home;
mod secret;
mod transaction;

pub use cart::CartPage;
pub use home::HomePage;
pub use secret::SecretPage;
pub use transaction::TransactionPage;

use web_sys::HtmlInputElement;
use yew::functional::hook;
use yew::prelude::*;

use crate::checkout_form::{CheckoutForm, PaymentCheckout, PaymentStatus};

/// The `{status, payment}` pair each page owns.
///
/// Exactly one payment attempt is active at a time; cancelling drops it and
/// returns the page to its input form.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentState {
    pub status: PaymentStatus,
    pub payment: Option<PaymentCheckout>,
}

impl PaymentState {
    pub fn initial() -> Self {
        Self {
            status: PaymentStatus::Initial,
            payment: None,
        }
    }

    pub fn processing(payment: PaymentCheckout) -> Self {
        Self {
            status: PaymentStatus::Processing,
            payment: Some(payment),
        }
    }

    pub fn with_status(&self, status: PaymentStatus) -> Self {
        Self {
            status,
            payment: self.payment.clone(),
        }
    }
}

/// Read an input's current value through its node ref.
pub(crate) fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|el| el.value())
        .unwrap_or_default()
}

/// Move focus to the offending input after a validation failure.
pub(crate) fn focus_input(node: &NodeRef) {
    if let Some(el) = node.cast::<HtmlInputElement>() {
        let _ = el.focus();
    }
}

/// Set the document title for the current page.
#[hook]
pub(crate) fn use_document_title(title: &'static str) {
    use_effect_with((), move |_| {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
        || ()
    });
}

#[derive(Properties, PartialEq, Clone)]
pub struct ActiveCheckoutProps {
    pub payment: PaymentCheckout,
    pub status: PaymentStatus,
    pub on_status: Callback<PaymentStatus>,
    pub on_cancel: Callback<MouseEvent>,
    pub cancel_label: String,
}

/// The cancel/back control plus the mounted confirmation panel.
#[function_component(ActiveCheckout)]
pub fn active_checkout(props: &ActiveCheckoutProps) -> Html {
    html! {
        <>
            <button
                class="rounded w-full p-2 mb-2 bg-slate-500"
                onclick={props.on_cancel.clone()}
            >
                { &props.cancel_label }
            </button>
            <CheckoutForm
                payment={props.payment.clone()}
                status={props.status}
                on_status={props.on_status.clone()}
            />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_from_processing_returns_to_initial_and_clears_payment() {
        let state = PaymentState::processing(PaymentCheckout::from_client_secret("cs_1".into()));
        assert_eq!(state.status, PaymentStatus::Processing);
        assert!(state.payment.is_some());

        let state = PaymentState::initial();
        assert_eq!(state.status, PaymentStatus::Initial);
        assert_eq!(state.payment, None);
    }

    #[test]
    fn status_update_keeps_the_active_payment() {
        let state = PaymentState::processing(PaymentCheckout::from_client_secret("cs_1".into()));
        let state = state.with_status(PaymentStatus::Processed);
        assert_eq!(state.status, PaymentStatus::Processed);
        assert_eq!(state.payment.unwrap().client_secret, "cs_1");
    }
}
