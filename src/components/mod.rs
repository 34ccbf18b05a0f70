use yew::prelude::*;

/// A full-width form button in the checkout pages' styling.
#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    /// Button label text
    pub label: String,
    /// Click handler
    pub onclick: Callback<MouseEvent>,
    /// Disable state
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    html! {
        <button
            onclick={props.onclick.clone()}
            disabled={props.disabled}
            class="rounded w-full p-2 mb-2 bg-slate-500"
        >
            { &props.label }
        </button>
    }
}

/// An uncontrolled text input read through its `NodeRef`.
///
/// The initiation forms read values on submit and focus the offending field
/// on validation failure, so the node ref is the contract here rather than a
/// controlled value/oninput pair.
#[derive(Properties, PartialEq)]
pub struct TextInputProps {
    /// Handle the owning form uses to read the value and move focus.
    pub input_ref: NodeRef,
    /// Placeholder text
    #[prop_or_default]
    pub placeholder: String,
    /// Pre-filled value, e.g. the fixed payment method.
    #[prop_or_default]
    pub value: Option<String>,
    #[prop_or_default]
    pub readonly: bool,
    #[prop_or_default]
    pub required: bool,
}

#[function_component(TextInput)]
pub fn text_input(props: &TextInputProps) -> Html {
    html! {
        <input
            ref={props.input_ref.clone()}
            type="text"
            class="rounded w-full p-2 mb-2 outline-none"
            placeholder={props.placeholder.clone()}
            value={props.value.clone()}
            readonly={props.readonly}
            required={props.required}
        />
    }
}
