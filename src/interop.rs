//! payment-client/src/interop.rs
//!
//! Yew hook that loads Stripe.js v3 at runtime (no inline JS).
//!
//! `use_stripejs()` injects a single
//! `<script id="stripejs-sdk" src="https://js.stripe.com/v3/" defer>`
//! into `<head>` on first use, returns `false` until the script's `load`
//! event fires, then `true` on every subsequent call. Components sharing a
//! page share the same script element.

use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::HtmlScriptElement;
use yew::functional::hook;
use yew::prelude::*;

const SCRIPT_ID: &str = "stripejs-sdk";
const SCRIPT_SRC: &str = "https://js.stripe.com/v3/";

/// Load Stripe.js exactly once and track readiness.
///
/// Returns `false` while the `<script>` is being fetched and parsed, `true`
/// once `window.Stripe` exists.
#[hook]
pub fn use_stripejs() -> bool {
    let loaded = use_state(stripe_global_present);

    {
        let loaded = loaded.clone();
        // One-shot: the script element is keyed by id, so even several panels
        // mounting concurrently inject it at most once.
        use_effect_with((), move |_| {
            if !*loaded {
                if stripe_global_present() {
                    loaded.set(true);
                } else {
                    inject_script(loaded);
                }
            }
            || ()
        });
    }

    *loaded
}

fn stripe_global_present() -> bool {
    web_sys::window()
        .map(|win| Reflect::has(&win, &JsValue::from_str("Stripe")).unwrap_or(false))
        .unwrap_or(false)
}

fn inject_script(loaded: UseStateHandle<bool>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("no document to inject Stripe.js into");
        return;
    };

    if let Some(existing) = document.get_element_by_id(SCRIPT_ID) {
        // Another component already started the load; piggyback on its event.
        attach_onload(&existing.unchecked_into::<HtmlScriptElement>(), loaded);
        return;
    }

    let script: HtmlScriptElement = match document
        .create_element("script")
        .map(|el| el.unchecked_into::<HtmlScriptElement>())
    {
        Ok(el) => el,
        Err(e) => {
            log::error!("failed to create Stripe.js script element: {:?}", e);
            return;
        }
    };
    script.set_id(SCRIPT_ID);
    script.set_src(SCRIPT_SRC);
    script.set_defer(true);
    attach_onload(&script, loaded);

    if let Some(head) = document.head() {
        if let Err(e) = head.append_child(&script) {
            log::error!("failed to append Stripe.js script element: {:?}", e);
        }
    }
}

fn attach_onload(script: &HtmlScriptElement, loaded: UseStateHandle<bool>) {
    let onload = Closure::wrap(Box::new(move || {
        loaded.set(true);
    }) as Box<dyn Fn()>);
    // A listener rather than `onload`, so panels racing to mount don't clobber
    // each other's callbacks.
    if let Err(e) =
        script.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())
    {
        log::error!("failed to observe Stripe.js load: {:?}", e);
    }
    // Leak so the closure lives until the load event fires.
    onload.forget();
}
