use std::collections::HashMap;
use std::sync::Arc;

use leptos::prelude::*;
use serde_json::Value;

/// Everything a custom row needs to show and edit one list entry.
#[derive(Clone, Copy)]
pub struct RowContext {
    pub index: usize,
    pub value: Signal<Value>,
    /// True for the trailing new-item row.
    pub is_last: Signal<bool>,
    /// Replaces the whole entry.
    pub set_item: Callback<Value>,
    /// Sets one property of a structured entry, e.g. `("name", "John")`.
    pub set_field: Callback<(String, Value)>,
    pub remove: Callback<()>,
}

/// Renders the editing controls of one row.
#[derive(Clone)]
pub struct RowTemplate(Arc<dyn Fn(RowContext) -> AnyView + Send + Sync>);

impl RowTemplate {
    pub fn new(render: impl Fn(RowContext) -> AnyView + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }

    pub fn render(&self, ctx: RowContext) -> AnyView {
        (self.0)(ctx)
    }
}

/// Row templates by name, looked up through the `listInputTemplate`
/// setting.
#[derive(Clone, Default)]
pub struct RowTemplateRegistry {
    templates: HashMap<String, RowTemplate>,
}

impl RowTemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, template: RowTemplate) -> Self {
        self.insert(name, template);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, template: RowTemplate) -> Option<RowTemplate> {
        self.templates.insert(name.into(), template)
    }

    pub fn get(&self, name: &str) -> Option<RowTemplate> {
        self.templates.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

pub fn provide_row_templates(registry: RowTemplateRegistry) {
    provide_context(registry);
}

pub fn use_row_template(name: &str) -> Option<RowTemplate> {
    use_context::<RowTemplateRegistry>().and_then(|registry| registry.get(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_row() -> RowTemplate {
        RowTemplate::new(|_| ().into_any())
    }

    #[test]
    fn test_registry_lookup_by_name() {
        let registry = RowTemplateRegistry::new()
            .with("person", empty_row())
            .with("default", empty_row());

        assert_eq!(registry.len(), 2);
        assert!(registry.get("person").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_insert_replaces_existing_template() {
        let mut registry = RowTemplateRegistry::new();
        assert!(registry.insert("person", empty_row()).is_none());
        assert!(registry.insert("person", empty_row()).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_without_provider() {
        let owner = Owner::new();
        owner.with(|| {
            assert!(use_row_template("default").is_none());

            provide_row_templates(RowTemplateRegistry::new().with("default", empty_row()));
            assert!(use_row_template("default").is_some());
        });
    }
}
