use crate::models::is_falsy;
use serde_json::Value;

/// Result of stripping empty entries from a list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filtered {
    /// Significant entries, in their original relative order.
    pub items: Vec<Value>,
    /// Input indices of every dropped entry, ascending.
    pub removed_indices: Vec<usize>,
}

/// An entry is dropped when it is falsy (numbers never are) or when it
/// deep-equals the placeholder.
pub fn is_removable(item: &Value, placeholder: &Value) -> bool {
    is_falsy(item) || item == placeholder
}

/// Removes empty and placeholder entries from `list`.
///
/// Anything that is not an array is treated as an empty list.
pub fn filter_significant(list: &Value, placeholder: &Value) -> Filtered {
    match list {
        Value::Array(items) => filter_slice(items, placeholder),
        _ => Filtered::default(),
    }
}

pub fn filter_slice(list: &[Value], placeholder: &Value) -> Filtered {
    let mut filtered = Filtered::default();

    for (i, item) in list.iter().enumerate() {
        if is_removable(item, placeholder) {
            filtered.removed_indices.push(i);
        } else {
            filtered.items.push(item.clone());
        }
    }

    filtered
}

pub fn significant_items(list: &Value, placeholder: &Value) -> Vec<Value> {
    filter_significant(list, placeholder).items
}
