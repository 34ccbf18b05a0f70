//! Operator front end for Stripe hosted-payment checkout.
//!
//! A client-side-rendered Yew application: initiate a checkout by cart, by
//! existing transaction, or by a pre-issued client secret, then confirm it
//! through the Stripe Payment Element and watch its status. All state is
//! transient, scoped to a single page view.

mod api;
mod app;
mod bindings;
mod checkout_form;
mod client;
mod components;
mod config;
mod currency;
mod interop;
mod pages;
mod query;

pub use app::App;
pub use checkout_form::{CheckoutForm, Customer, Message, MessageKind, PaymentCheckout, PaymentStatus};
pub use client::{
    ConfirmPaymentParams, ElementsOptions, IntentSnapshot, IntentStatus, PaymentIntentInfo,
    PaymentResult, StripeError, StripeHandle,
};
pub use config::AppConfig;
pub use interop::use_stripejs;

use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
