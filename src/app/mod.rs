use crate::components::ui::{
    provide_row_templates, ListInput, RowContext, RowTemplate, RowTemplateRegistry,
};
use crate::config::{provide_list_input_config, ListInputConfig};
use leptos::prelude::*;
use serde_json::{json, Value};
use wasm_bindgen::JsCast;

pub const PERSON_TEMPLATE: &str = "person";

fn person_row(ctx: RowContext) -> AnyView {
    let name = move || {
        ctx.value
            .with(|v| v.get("name").and_then(Value::as_str).unwrap_or_default().to_string())
    };

    view! {
        <input
            data-name="PersonName"
            class="border-input h-9 w-full rounded-md border bg-transparent px-3 text-sm"
            placeholder=move || if ctx.is_last.get() { "Add a person" } else { "Name" }
            prop:value=name
            on:input=move |ev: web_sys::Event| {
                if let Some(input) = ev
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                {
                    let text = input.value();
                    if text.is_empty() {
                        ctx.set_item.run(json!({}));
                    } else {
                        ctx.set_field.run(("name".to_string(), Value::String(text)));
                    }
                }
            }
        />
    }
    .into_any()
}

fn json_preview(items: RwSignal<Value>) -> impl IntoView {
    view! {
        <pre class="text-xs text-muted-foreground">{move || items.get().to_string()}</pre>
    }
}

/// Showcase page: plain, numeric and structured lists side by side.
#[component]
pub fn App() -> impl IntoView {
    provide_list_input_config(ListInputConfig::default());
    provide_row_templates(
        RowTemplateRegistry::new().with(PERSON_TEMPLATE, RowTemplate::new(person_row)),
    );

    let tags = RwSignal::new(json!(["rust", "leptos"]));
    let numbers = RwSignal::new(json!([0, 1, 2]));
    let people = RwSignal::new(json!([{"name": "John"}]));

    view! {
        <main class="mx-auto flex max-w-xl flex-col gap-8 px-4 py-8">
            <section class="flex flex-col gap-2">
                <h2 class="text-sm font-semibold">"Tags"</h2>
                <ListInput items=tags placeholder="New tag" name="tags" />
                {json_preview(tags)}
            </section>
            <section class="flex flex-col gap-2">
                <h2 class="text-sm font-semibold">"Numbers"</h2>
                <ListInput items=numbers input_type="number" name="numbers" />
                {json_preview(numbers)}
            </section>
            <section class="flex flex-col gap-2">
                <h2 class="text-sm font-semibold">"People"</h2>
                <ListInput
                    items=people
                    custom_fields=true
                    template=PERSON_TEMPLATE
                    placeholder_value=json!({})
                />
                {json_preview(people)}
            </section>
        </main>
    }
}
