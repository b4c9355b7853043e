use leptos::prelude::*;
use serde_json::Value;
use tw_merge::tw_merge;

use crate::components::hooks::use_list_input::{use_list_input, UseListInput};
use crate::components::hooks::use_random::use_random_id_for;
use crate::components::ui::button::RemoveItemButton;
use crate::components::ui::input::{FieldEdit, ListField};
use crate::components::ui::row_template::{use_row_template, RowContext, RowTemplate};
use crate::config::{normalize_placeholder, use_list_input_config};
use crate::models::{field_text, FieldDraft, FieldKind};

/// Editable list bound to `items`, always ending in an empty row for the
/// next entry.
///
/// Empty entries are removed when focus leaves a row. With `custom_fields`
/// each row is drawn by a [`RowTemplate`], either passed as `row` or looked
/// up by the configured template name.
#[component]
pub fn ListInput(
    #[prop(into)] items: RwSignal<Value>,
    #[prop(optional)] placeholder_value: Option<Value>,
    #[prop(optional)] custom_fields: Option<bool>,
    #[prop(optional, into)] template: Option<String>,
    #[prop(optional)] row: Option<RowTemplate>,
    #[prop(into, default = "text")] input_type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let mut config = use_list_input_config();
    if let Some(placeholder_value) = placeholder_value {
        config.placeholder_value = normalize_placeholder(placeholder_value);
    }
    if let Some(custom_fields) = custom_fields {
        config.custom_fields = custom_fields;
    }
    if let Some(template) = template {
        config.list_input_template = template;
    }

    let row = if config.custom_fields {
        let found = row.or_else(|| use_row_template(&config.list_input_template));
        if found.is_none() {
            log::warn!(
                "no row template named `{}`; falling back to text fields",
                config.list_input_template
            );
        }
        found
    } else {
        None
    };

    let list = use_list_input(items, &config);
    let kind = FieldKind::from_input_type(input_type);
    let id_base = use_random_id_for("field");

    let merged_class = tw_merge!("flex flex-col gap-2", class);

    view! {
        <div node_ref=list.root data-name="ListInput" class=merged_class>
            <For
                each=move || list.rows.with(|rows| 0..rows.len())
                key=|index| *index
                children=move |index| {
                    let content = match row.clone() {
                        Some(template) => template.render(row_context(list, index)),
                        None => {
                            text_field(list, index, kind, input_type, &id_base, &name, &placeholder)
                        }
                    };
                    let remove = Callback::new(move |_: ()| {
                        list.with(|c| c.remove_item_at_index(index));
                    });

                    view! {
                        <div
                            data-list-input-row=""
                            class="flex items-center gap-2"
                            on:focusout=move |_| {
                                list.with(|c| {
                                    c.record_blur(index);
                                    c.commit_edits();
                                })
                            }
                        >
                            {content}
                            <RemoveItemButton
                                hidden=Signal::derive(move || list.is_last_row(index))
                                on_remove=remove
                            />
                        </div>
                    }
                }
            />
        </div>
    }
}

fn row_context(list: UseListInput, index: usize) -> RowContext {
    RowContext {
        index,
        value: Signal::derive(move || list.row_value(index)),
        is_last: Signal::derive(move || list.is_last_row(index)),
        set_item: Callback::new(move |value: Value| {
            list.with(|c| c.set_item(index, value));
        }),
        set_field: Callback::new(move |(key, value): (String, Value)| {
            list.with(|c| {
                c.update_item(index, |item| {
                    if !item.is_object() {
                        *item = Value::Object(Default::default());
                    }
                    item[key.as_str()] = value;
                })
            });
        }),
        remove: Callback::new(move |_: ()| {
            list.with(|c| c.remove_item_at_index(index));
        }),
    }
}

fn text_field(
    list: UseListInput,
    index: usize,
    kind: FieldKind,
    input_type: &'static str,
    id_base: &str,
    name: &str,
    placeholder: &str,
) -> AnyView {
    let valid = RwSignal::new(true);
    let draft: RwSignal<Option<FieldDraft>> = RwSignal::new(None);

    // Rows are keyed by position, so the text follows whatever item the row
    // holds now.
    let shown = Memo::new(move |_| {
        let value = list.row_value(index);
        draft.with(|draft| field_text(draft.as_ref(), &value))
    });

    let on_edit = Callback::new(move |edit: FieldEdit| {
        valid.set(edit.valid);
        let next = FieldDraft::from_edit(kind, &edit.text, edit.bad_input, &shown.get_untracked());
        let value = next.value.clone();
        draft.set(Some(next));
        list.with(|c| c.set_item(index, value));
    });

    let invalid = Signal::derive(move || {
        list.rows.track();
        let valid = valid.get();
        list.with(|c| c.row_shows_error(index, valid))
    });

    view! {
        <ListField
            r#type=input_type
            id=format!("{id_base}_{index}")
            name=name.to_string()
            placeholder=placeholder.to_string()
            value=shown
            invalid=invalid
            on_edit=on_edit
            on_check=Callback::new(move |ok: bool| valid.set(ok))
        />
    }
    .into_any()
}
