//! payment-client/src/currency.rs
//!
//! Currency display formatting and minor/major unit conversion.
//!
//! Stripe reports amounts in a currency's smallest unit, except for
//! zero-decimal currencies (JPY, KRW, ...) where the smallest unit equals one
//! display unit. Rather than carrying a currency table, zero-decimal detection
//! formats the amount with `Intl.NumberFormat` and checks whether the output
//! contains a `decimal` part.

use wasm_bindgen::JsValue;
use web_sys::js_sys::{Array, Object, Reflect};

use crate::bindings::NumberFormat;

fn currency_format(currency: &str, minimum_fraction_digits: Option<u32>) -> NumberFormat {
    let locales = Array::of1(&JsValue::from_str("en-US"));
    let options = Object::new();
    let _ = Reflect::set(
        &options,
        &JsValue::from_str("style"),
        &JsValue::from_str("currency"),
    );
    let _ = Reflect::set(
        &options,
        &JsValue::from_str("currency"),
        &JsValue::from_str(currency),
    );
    let _ = Reflect::set(
        &options,
        &JsValue::from_str("currencyDisplay"),
        &JsValue::from_str("symbol"),
    );
    if let Some(digits) = minimum_fraction_digits {
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("minimumFractionDigits"),
            &JsValue::from_f64(digits as f64),
        );
    }
    NumberFormat::new_number_format(&locales, options.into())
}

/// Render `amount` as a localized currency string, e.g. `$25.00` or `¥2,500`.
///
/// Invalid currency codes propagate as the underlying `RangeError`.
pub fn format_for_display(amount: f64, currency: &str, minimum_fraction_digits: u32) -> String {
    currency_format(currency, Some(minimum_fraction_digits)).format(amount)
}

/// True when the currency's locale rendering has no decimal component.
fn is_zero_decimal(amount: f64, currency: &str) -> bool {
    let parts = currency_format(currency, None).format_to_parts(amount);
    !parts.iter().any(|part| {
        Reflect::get(&part, &JsValue::from_str("type"))
            .ok()
            .and_then(|v| v.as_string())
            .is_some_and(|t| t == "decimal")
    })
}

/// Convert a major-unit amount to the provider's minor-unit representation.
///
/// Identity for zero-decimal currencies, otherwise rounds to the nearest
/// integer minor unit.
pub fn to_minor_units(amount: f64, currency: &str) -> f64 {
    if is_zero_decimal(amount, currency) {
        amount
    } else {
        (amount * 100.0).round()
    }
}

/// Convert a provider-reported minor-unit amount to major units.
///
/// Inverse of [`to_minor_units`]: identity for zero-decimal currencies,
/// otherwise divides by 100 and rounds to the nearest integer.
pub fn to_major_units(amount: f64, currency: &str) -> f64 {
    if is_zero_decimal(amount, currency) {
        amount
    } else {
        (amount / 100.0).round()
    }
}

// Intl only exists in a JS host, so these run under wasm-bindgen-test.
#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn zero_decimal_currency_conversions_are_identity() {
        assert_eq!(to_minor_units(2500.0, "JPY"), 2500.0);
        assert_eq!(to_major_units(2500.0, "JPY"), 2500.0);
    }

    #[wasm_bindgen_test]
    fn decimal_currency_round_trips_within_rounding() {
        assert_eq!(to_minor_units(25.0, "USD"), 2500.0);
        assert_eq!(to_major_units(2500.0, "USD"), 25.0);
        assert_eq!(to_minor_units(to_major_units(2501.0, "USD"), "USD"), 2500.0);
    }

    #[wasm_bindgen_test]
    fn display_uses_symbol_and_fraction_digits() {
        assert_eq!(format_for_display(25.0, "USD", 0), "$25");
        assert_eq!(format_for_display(25.0, "USD", 2), "$25.00");
    }
}
