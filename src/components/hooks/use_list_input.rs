use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use serde_json::Value;

use crate::config::ListInputConfig;
use crate::controller::ListInputController;
use crate::focus::dom::DomFocus;
use crate::reconcile::ListBinding;
use crate::scheduler::TimeoutScheduler;

/// Two-way binding between a controller and Leptos signals: `source` is the
/// caller's list, `rows` mirrors the working list for rendering.
#[derive(Clone, Copy)]
pub struct SignalBinding {
    pub source: RwSignal<Value>,
    pub rows: RwSignal<Vec<Value>>,
}

impl ListBinding for SignalBinding {
    fn assign(&self, items: Vec<Value>) {
        self.source.set(Value::Array(items));
    }

    fn working_list_changed(&self, items: &[Value]) {
        self.rows.set(items.to_vec());
    }
}

#[derive(Clone, Copy)]
pub struct UseListInput {
    pub controller: StoredValue<ListInputController, LocalStorage>,
    pub rows: RwSignal<Vec<Value>>,
    pub root: NodeRef<html::Div>,
}

impl UseListInput {
    pub fn with<R>(&self, f: impl FnOnce(&ListInputController) -> R) -> R {
        self.controller.with_value(f)
    }

    pub fn row_value(&self, index: usize) -> Value {
        self.rows
            .with(|rows| rows.get(index).cloned())
            .unwrap_or(Value::Null)
    }

    pub fn is_last_row(&self, index: usize) -> bool {
        self.rows.with(|rows| index + 1 >= rows.len())
    }
}

/// Wires a [`ListInputController`] to `source` and to the rows rendered
/// under the returned `root`.
///
/// Later changes to `source` made by anyone else are picked up by an effect;
/// the controller's own writes come back through it too and are ignored.
pub fn use_list_input(source: RwSignal<Value>, config: &ListInputConfig) -> UseListInput {
    let root: NodeRef<html::Div> = NodeRef::new();
    let rows: RwSignal<Vec<Value>> = RwSignal::new(Vec::new());

    let binding = SignalBinding { source, rows };
    let initial = source.get_untracked();
    let controller = ListInputController::builder(
        Rc::new(binding),
        Rc::new(DomFocus::new(root)),
        Rc::new(TimeoutScheduler),
    )
    .config(config)
    .build(&initial);

    let controller = StoredValue::new_local(controller);

    Effect::new(move |_| {
        let incoming = source.get();
        controller.with_value(|c| c.on_external_list_changed(&incoming));
    });

    UseListInput {
        controller,
        rows,
        root,
    }
}
