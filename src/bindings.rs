//! payment-client/src/bindings.rs
//!
//! Low-level wasm-bindgen bindings to Stripe.js v3 and to `Intl.NumberFormat`.
//!
//! Exposes the raw Stripe.js handles (`JsStripe`, `JsElements`, `JsPaymentElement`)
//! and their async methods via `js_sys::Promise`.
//! Higher-level wrappers live in `client.rs`; the `Intl` bindings back the
//! currency utility in `currency.rs` (`js-sys` does not expose `formatToParts`).

use wasm_bindgen::prelude::*;
use web_sys::js_sys::{Array, Promise};

#[wasm_bindgen]
extern "C" {
    //------------------------------------------------------------------------------
    // Core Types
    //------------------------------------------------------------------------------

    /// Raw Stripe.js client handle.
    #[wasm_bindgen(js_name = Stripe, js_namespace = window)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    /// Raw Elements factory handle.
    #[wasm_bindgen(js_name = Elements)]
    #[derive(Debug, Clone)]
    pub type JsElements;

    /// Raw PaymentElement UI component handle.
    #[wasm_bindgen(js_name = PaymentElement)]
    #[derive(Debug, Clone)]
    pub type JsPaymentElement;

    //------------------------------------------------------------------------------
    // Constructors
    //------------------------------------------------------------------------------

    /// Construct a new `JsStripe` from your publishable key.
    ///
    /// ```js
    ///   const stripe = Stripe("pk_test_...");
    /// ```
    #[wasm_bindgen(js_name = Stripe, js_namespace = window)]
    pub fn new_stripe(publishable_key: &str) -> JsStripe;

    //------------------------------------------------------------------------------
    // Instance Methods
    //------------------------------------------------------------------------------

    /// `stripe.elements({ clientSecret, appearance })` → `JsElements`
    #[wasm_bindgen(method, catch, js_name = elements)]
    pub fn elements(this: &JsStripe, options: JsValue) -> Result<JsElements, JsValue>;

    /// `elements.create("payment", options)` → `JsPaymentElement`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create_element(
        this: &JsElements,
        element_type: &str,
        options: JsValue,
    ) -> Result<JsPaymentElement, JsValue>;

    /// `paymentElement.mount(selector)` → `()`
    #[wasm_bindgen(method, catch, js_name = mount)]
    pub fn mount(this: &JsPaymentElement, selector: &str) -> Result<(), JsValue>;

    /// `stripe.retrievePaymentIntent(clientSecret)` → JS `Promise`
    ///
    /// Resolves to `{ paymentIntent }` carrying the intent's current status,
    /// amount, currency, description and livemode flag.
    #[wasm_bindgen(method, catch, js_name = retrievePaymentIntent)]
    pub fn retrieve_payment_intent(
        this: &JsStripe,
        client_secret: &str,
    ) -> Result<Promise, JsValue>;

    /// `stripe.confirmPayment(opts)` → JS `Promise`
    #[wasm_bindgen(method, catch, js_name = confirmPayment)]
    pub fn confirm_payment(this: &JsStripe, options: JsValue) -> Result<Promise, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    //------------------------------------------------------------------------------
    // Intl.NumberFormat
    //------------------------------------------------------------------------------

    /// Raw `Intl.NumberFormat` formatter handle.
    #[wasm_bindgen(js_namespace = Intl, js_name = NumberFormat)]
    #[derive(Debug, Clone)]
    pub type NumberFormat;

    /// `new Intl.NumberFormat(locales, options)`
    #[wasm_bindgen(constructor, js_namespace = Intl, js_class = "NumberFormat")]
    pub fn new_number_format(locales: &Array, options: JsValue) -> NumberFormat;

    /// `numberFormat.format(value)` → `string`
    #[wasm_bindgen(method, js_name = format)]
    pub fn format(this: &NumberFormat, value: f64) -> String;

    /// `numberFormat.formatToParts(value)` → `Array<{type, value}>`
    #[wasm_bindgen(method, js_name = formatToParts)]
    pub fn format_to_parts(this: &NumberFormat, value: f64) -> Array;
}
