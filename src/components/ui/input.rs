use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// One keystroke's worth of field state.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldEdit {
    pub text: String,
    /// Constraint validity (`checkValidity()`).
    pub valid: bool,
    /// The browser could not turn the text into a value, e.g. `1e` in a
    /// number field; `text` is then empty.
    pub bad_input: bool,
}

impl FieldEdit {
    fn read(input: &web_sys::HtmlInputElement) -> Self {
        Self {
            text: input.value(),
            valid: input.check_validity(),
            bad_input: input.validity().bad_input(),
        }
    }
}

/// Single-line field for one list row.
///
/// Reports every edit; turning text into a list value is the caller's job.
/// `value` is written into the field only when it changes, so text the user
/// is still typing stays put while the list settles around it.
#[component]
pub fn ListField(
    // Styling
    #[prop(into, optional)] class: String,

    // Common HTML attributes
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] required: bool,

    #[prop(into)] value: Signal<String>,
    #[prop(into)] invalid: Signal<bool>,

    on_edit: Callback<FieldEdit>,
    /// Validity after `value` was (re)written into the field.
    on_check: Callback<bool>,
) -> impl IntoView {
    let node_ref: NodeRef<html::Input> = NodeRef::new();

    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground dark:bg-input/30 border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50",
        "focus-visible:ring-2",
        "aria-invalid:ring-destructive/20 dark:aria-invalid:ring-destructive/40 aria-invalid:border-destructive",
        class
    );

    Effect::new(move |prev: Option<String>| {
        let text = value.get();
        if let Some(input) = node_ref.get() {
            if prev.as_ref() != Some(&text) && input.value() != text {
                input.set_value(&text);
            }
            on_check.run(input.check_validity());
        }
        text
    });

    // Manual wiring instead of `bind:value`; the list decides what the
    // field shows after each edit.
    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
                on_edit.run(FieldEdit::read(input));
            }
        }
    };

    view! {
        <input
            data-name="ListField"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            required=required
            aria-invalid=move || invalid.get().then_some("true")
            prop:value=value.get_untracked()
            on:input=on_input
            node_ref=node_ref
        />
    }
}
