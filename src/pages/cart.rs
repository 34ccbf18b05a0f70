//! Checkout by cart: the backend creates the payment intent for a cart and
//! hands back its client secret.

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use gloo_dialogs::alert;

use crate::api::{self, CheckoutRequest};
use crate::checkout_form::PaymentStatus;
use crate::components::{Button, TextInput};
use crate::config::use_app_config;
use crate::pages::{
    focus_input, input_value, use_document_title, ActiveCheckout, PaymentState,
};

/// The only payment method this client initiates.
const PAYMENT_METHOD: &str = "stripe";

/// Required input that was left empty, in validation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MissingCartField {
    ApiToken,
    CartId,
    PaymentMethod,
}

impl MissingCartField {
    fn alert_text(self) -> &'static str {
        match self {
            MissingCartField::ApiToken => "Please input API Token",
            MissingCartField::CartId => "Please input Cart ID",
            MissingCartField::PaymentMethod => "Please Pick Payment Method",
        }
    }
}

/// Validate operator input before any network call happens.
fn validate_cart_input(
    api_token: &str,
    cart_id: &str,
    payment_method: &str,
    remark: &str,
) -> Result<(String, CheckoutRequest), MissingCartField> {
    if api_token.is_empty() {
        return Err(MissingCartField::ApiToken);
    }
    if cart_id.is_empty() {
        return Err(MissingCartField::CartId);
    }
    if payment_method.is_empty() {
        return Err(MissingCartField::PaymentMethod);
    }
    Ok((
        api_token.to_string(),
        CheckoutRequest {
            cart_id: cart_id.to_string(),
            payment_method: payment_method.to_string(),
            remark: (!remark.is_empty()).then(|| remark.to_string()),
        },
    ))
}

#[function_component(CartPage)]
pub fn cart_page() -> Html {
    use_document_title("By Cart Stripe .:. Payment Client");
    let config = use_app_config();
    let state = use_state(PaymentState::initial);

    let api_token = use_node_ref();
    let cart_id = use_node_ref();
    let payment_method = use_node_ref();
    let remark = use_node_ref();

    let checkout = {
        let config = config.clone();
        let state = state.clone();
        let api_token = api_token.clone();
        let cart_id = cart_id.clone();
        let payment_method = payment_method.clone();
        let remark = remark.clone();
        Callback::from(move |_: MouseEvent| {
            let validated = validate_cart_input(
                &input_value(&api_token),
                &input_value(&cart_id),
                &input_value(&payment_method),
                &input_value(&remark),
            );
            let (token, request) = match validated {
                Ok(parts) => parts,
                Err(field) => {
                    focus_input(match field {
                        MissingCartField::ApiToken => &api_token,
                        MissingCartField::CartId => &cart_id,
                        MissingCartField::PaymentMethod => &payment_method,
                    });
                    alert(field.alert_text());
                    return;
                }
            };

            let config = config.clone();
            let state = state.clone();
            spawn_local(async move {
                match api::post_checkout(&config, &token, &request).await {
                    Ok(payment) => state.set(PaymentState::processing(payment)),
                    Err(err) => {
                        log::error!("checkout failed: {err}");
                        alert(&err.to_string());
                    }
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
                            <TextInput input_ref={cart_id} placeholder="Cart ID" required={true} />
                            <TextInput
                                input_ref={payment_method}
                                placeholder="Payment Method"
                                value={Some(PAYMENT_METHOD.to_string())}
                                readonly={true}
                                required={true}
                            />
                            <TextInput input_ref={remark} placeholder="Remark" />
                            <Button label="Checkout" onclick={checkout} />
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

    #[test]
    fn missing_api_token_is_reported_first() {
        assert_eq!(
            validate_cart_input("", "cart_1", PAYMENT_METHOD, ""),
            Err(MissingCartField::ApiToken)
        );
    }

    #[test]
    fn missing_cart_id_aborts_before_any_network_call() {
        let result = validate_cart_input("token", "", PAYMENT_METHOD, "note");
        assert_eq!(result, Err(MissingCartField::CartId));
        assert_eq!(
            MissingCartField::CartId.alert_text(),
            "Please input Cart ID"
        );
    }

    #[test]
    fn remark_stays_optional() {
        let (token, request) =
            validate_cart_input("token", "cart_1", PAYMENT_METHOD, "").unwrap();
        assert_eq!(token, "token");
        assert_eq!(request.cart_id, "cart_1");
        assert_eq!(request.payment_method, "stripe");
        assert_eq!(request.remark, None);

        let (_, request) = validate_cart_input("token", "cart_1", PAYMENT_METHOD, "vip").unwrap();
        assert_eq!(request.remark.as_deref(), Some("vip"));
    }
}
