//! Checkout by transaction: look up an existing transaction and confirm the
//! intent attached to its latest event.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use gloo_dialogs::alert;

use crate::api::{self, TransactionData};
use crate::checkout_form::{PaymentCheckout, PaymentStatus};
use crate::components::{Button, TextInput};
use crate::config::use_app_config;
use crate::pages::{
    focus_input, input_value, use_document_title, ActiveCheckout, PaymentState,
};

/// A transaction that cannot be (re)confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransactionRejection {
    AlreadyConfirmed,
    MissingClientSecret,
}

impl TransactionRejection {
    fn alert_text(self) -> &'static str {
        match self {
            TransactionRejection::AlreadyConfirmed => "Payment Already Confirmed",
            TransactionRejection::MissingClientSecret => "Payment Information not valid",
        }
    }
}

/// Build the payment attempt from a fetched transaction.
///
/// Rejected when the transaction is already confirmed or its latest event
/// carries no client secret.
fn payment_from_transaction(
    transaction: TransactionData,
) -> Result<PaymentCheckout, TransactionRejection> {
    if transaction.payment_confirm {
        return Err(TransactionRejection::AlreadyConfirmed);
    }
    let Some(client_secret) = transaction
        .latest_history
        .event_client_secret
        .filter(|secret| !secret.is_empty())
    else {
        return Err(TransactionRejection::MissingClientSecret);
    };
    Ok(PaymentCheckout {
        client_secret,
        id: Some(transaction.latest_history.event_id),
        amount_display: Some(format!("{} {}", transaction.currency, transaction.price)),
        customer: None,
    })
}

#[function_component(TransactionPage)]
pub fn transaction_page() -> Html {
    use_document_title("By Transaction Stripe .:. Payment Client");
    let config = use_app_config();
    let state = use_state(PaymentState::initial);

    let api_token = use_node_ref();
    let transaction_id = use_node_ref();

    let pay = {
        let config = config.clone();
        let state = state.clone();
        let api_token = api_token.clone();
        let transaction_id = transaction_id.clone();
        Callback::from(move |_: MouseEvent| {
            let token = input_value(&api_token);
            if token.is_empty() {
                focus_input(&api_token);
                alert("Please input API Token");
                return;
            }
            let id = input_value(&transaction_id);
            if id.is_empty() {
                focus_input(&transaction_id);
                alert("Please input Transaction ID");
                return;
            }

            let config = config.clone();
            let state = state.clone();
            spawn_local(async move {
                let transaction = match api::get_transaction(&config, &token, &id).await {
                    Ok(transaction) => transaction,
                    Err(err) => {
                        log::error!("transaction lookup failed: {err}");
                        alert(&err.to_string());
                        return;
                    }
                };
                match payment_from_transaction(transaction) {
                    Ok(payment) => state.set(PaymentState::processing(payment)),
                    Err(rejection) => alert(rejection.alert_text()),
                }
            });
        })
    };

    let cancel = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.set(PaymentState::initial()))
    };

    let on_status = {
        let state = state.clone();
        Callback::from(move |status: PaymentStatus| state.set(state.with_status(status)))
    };

    html! {
        <div class="w-[400px] min-h-[500px] mx-auto bg-slate-400 p-2">
            {
                match state.status {
                    PaymentStatus::Initial | PaymentStatus::Processed | PaymentStatus::Error => html! {
                        <>
                            <TextInput input_ref={api_token} placeholder="API Token" required={true} />
                            <TextInput
                                input_ref={transaction_id}
                                placeholder="Transaction ID"
                                required={true}
                            />
                            <Button label="Pay" onclick={pay} />
                        </>
                    },
                    PaymentStatus::Processing => html! {
                        if let Some(payment) = state.payment.clone() {
                            <ActiveCheckout
                                {payment}
                                status={state.status}
                                {on_status}
                                on_cancel={cancel}
                                cancel_label="Cancel"
                            />
                        }
                    },
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LatestHistory;

    fn transaction(payment_confirm: bool, secret: Option<&str>) -> TransactionData {
        TransactionData {
            latest_history: LatestHistory {
                event_id: "evt_9".into(),
                event_client_secret: secret.map(str::to_string),
            },
            payment_confirm,
            currency: "THB".into(),
            price: "1500".into(),
        }
    }

    #[test]
    fn confirmed_transaction_is_rejected() {
        assert_eq!(
            payment_from_transaction(transaction(true, Some("cs_evt"))),
            Err(TransactionRejection::AlreadyConfirmed)
        );
        assert_eq!(
            TransactionRejection::AlreadyConfirmed.alert_text(),
            "Payment Already Confirmed"
        );
    }

    #[test]
    fn missing_client_secret_is_rejected() {
        assert_eq!(
            payment_from_transaction(transaction(false, None)),
            Err(TransactionRejection::MissingClientSecret)
        );
        assert_eq!(
            payment_from_transaction(transaction(false, Some(""))),
            Err(TransactionRejection::MissingClientSecret)
        );
    }

    #[test]
    fn valid_transaction_builds_the_payment_attempt() {
        let payment = payment_from_transaction(transaction(false, Some("cs_evt"))).unwrap();
        assert_eq!(payment.client_secret, "cs_evt");
        assert_eq!(payment.id.as_deref(), Some("evt_9"));
        assert_eq!(payment.amount_display.as_deref(), Some("THB 1500"));
        assert_eq!(payment.customer, None);
    }
}
