//! Checkout by pre-issued client secret: no backend call, the operator (or
//! the `client_secret` URL parameter) supplies the secret directly.
//!
//! This page doubles as the provider's redirect target after off-page
//! authentication, which is why the parameter auto-submits.

use wasm_bindgen::JsValue;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use gloo_dialogs::alert;

use crate::checkout_form::{PaymentCheckout, PaymentStatus};
use crate::components::{Button, TextInput};
use crate::pages::{focus_input, input_value, use_document_title, ActiveCheckout, PaymentState};
use crate::query::search_param;

#[function_component(SecretPage)]
pub fn secret_page() -> Html {
    use_document_title("By Stripe Secret .:. Payment Client");
    let state = use_state(PaymentState::initial);
    let client_secret = use_node_ref();
    // Consume-once guard: a stable query parameter must never re-submit on a
    // re-render.
    let auto_submitted = use_mut_ref(|| false);

    let begin = {
        let state = state.clone();
        Callback::from(move |secret: String| {
            state.set(PaymentState::processing(PaymentCheckout::from_client_secret(
                secret,
            )));
        })
    };

    let pay = {
        let begin = begin.clone();
        let client_secret = client_secret.clone();
        Callback::from(move |_: MouseEvent| {
            let secret = input_value(&client_secret);
            if secret.is_empty() {
                focus_input(&client_secret);
                alert("Please input Client Secret");
                return;
            }
            begin.emit(secret);
        })
    };

    // Pre-fill and submit from the URL parameter, exactly once per page load.
    {
        let begin = begin.clone();
        let client_secret = client_secret.clone();
        use_effect_with((), move |_| {
            if let Some(secret) = search_param("client_secret").filter(|s| !s.is_empty()) {
                let mut consumed = auto_submitted.borrow_mut();
                if !*consumed {
                    *consumed = true;
                    if let Some(input) = client_secret.cast::<HtmlInputElement>() {
                        input.set_value(&secret);
                    }
                    begin.emit(secret);
                }
            }
            || ()
        });
    }

    // Back/cancel drops the query parameter before reloading so the attempt
    // does not restart itself.
    let cancel = Callback::from(move |_: MouseEvent| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        if let (Ok(history), Ok(pathname)) = (window.history(), location.pathname()) {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&pathname));
        }
        if let Err(err) = location.reload() {
            log::error!("page reload failed: {:?}", err);
        }
    });

    let on_status = {
        let state = state.clone();
        Callback::from(move |status: PaymentStatus| {
            if state.status != status {
                state.set(state.with_status(status));
            }
        })
    };

    html! {
        <div class="w-[400px] min-h-[500px] mx-auto bg-slate-400 p-2">
            {
                match state.status {
                    PaymentStatus::Initial => html! {
                        <>
                            <TextInput
                                input_ref={client_secret}
                                placeholder="Client Secret"
                                required={true}
                            />
                            <Button label="Pay" onclick={pay} />
                        </>
                    },
                    PaymentStatus::Processing | PaymentStatus::Processed | PaymentStatus::Error => html! {
                        if let Some(payment) = state.payment.clone() {
                            <ActiveCheckout
                                {payment}
                                status={state.status}
                                {on_status}
                                on_cancel={cancel}
                                cancel_label={
                                    if state.status == PaymentStatus::Processed { "Back" } else { "Cancel" }
                                }
                            />
                        }
                    },
                }
            }
        </div>
    }
}
