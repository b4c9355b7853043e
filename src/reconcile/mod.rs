use serde_json::Value;
use std::ops::Range;

/// Outward side of the two-way binding: the caller-owned source list and
/// whatever renders the working list.
pub trait ListBinding {
    /// Writes the committed list (never containing the trailing slot) back
    /// into the caller's binding.
    fn assign(&self, items: Vec<Value>);

    /// Raised only when the working list actually changed.
    fn working_list_changed(&self, _items: &[Value]) {}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reconciled {
    /// The list to assign into the source binding.
    pub source: Vec<Value>,
    pub working_changed: bool,
}

/// Keeps the editable copy of the list and the trailing new-item slot.
#[derive(Clone, Debug)]
pub struct ListReconciler {
    placeholder: Value,
    working: Vec<Value>,
    last_written: Option<Vec<Value>>,
}

impl ListReconciler {
    pub fn new(placeholder: Value) -> Self {
        Self {
            working: vec![placeholder.clone()],
            placeholder,
            last_written: None,
        }
    }

    pub fn placeholder(&self) -> &Value {
        &self.placeholder
    }

    pub fn working(&self) -> &[Value] {
        &self.working
    }

    pub fn items_range(&self) -> Range<usize> {
        0..self.working.len()
    }

    pub fn last_written(&self) -> Option<&[Value]> {
        self.last_written.as_deref()
    }

    /// The working list without its trailing slot.
    fn entries(&self) -> &[Value] {
        &self.working[..self.working.len().saturating_sub(1)]
    }

    /// Adopts `candidate` as the new working list.
    ///
    /// The source list is the candidate minus a trailing placeholder; the
    /// working list gains a fresh placeholder unless it already ends in one.
    pub fn reconcile(&mut self, candidate: &[Value]) -> Reconciled {
        let mut working = candidate.to_vec();
        let mut source = working.clone();

        if source.last() == Some(&self.placeholder) {
            source.pop();
        }

        if working.last() != Some(&self.placeholder) {
            working.push(self.placeholder.clone());
        }

        let working_changed = working != self.working;
        if working_changed {
            self.working = working;
        }

        self.last_written = Some(source.clone());

        Reconciled {
            source,
            working_changed,
        }
    }

    /// True when `incoming` is just our own last write coming back through
    /// the binding.
    pub fn is_echo(&self, incoming: &Value) -> bool {
        let Value::Array(items) = incoming else {
            return false;
        };

        if self.last_written.as_deref() == Some(items.as_slice()) {
            return true;
        }

        let stripped = match items.split_last() {
            Some((last, rest)) if last == &self.placeholder => rest,
            _ => items.as_slice(),
        };
        stripped == self.entries()
    }

    /// Swaps the placeholder and rebuilds the trailing slot around it.
    pub fn set_placeholder(&mut self, placeholder: Value) -> Reconciled {
        let mut entries = self.working.clone();
        if entries.last() == Some(&self.placeholder) {
            entries.pop();
        }
        self.placeholder = placeholder;
        self.reconcile(&entries)
    }

    /// Copy of the working list with `index` removed, or `None` when out of
    /// range.
    pub fn without(&self, index: usize) -> Option<Vec<Value>> {
        if index >= self.working.len() {
            return None;
        }
        let mut next = self.working.clone();
        next.remove(index);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(xs: &[&str]) -> Vec<Value> {
        xs.iter().map(|s| json!(s)).collect()
    }

    #[test]
    fn test_new_has_single_slot() {
        let r = ListReconciler::new(json!(""));
        assert_eq!(r.working(), &[json!("")]);
        assert_eq!(r.items_range(), 0..1);
        assert!(r.last_written().is_none());
    }

    #[test]
    fn test_reconcile_appends_slot() {
        let mut r = ListReconciler::new(json!(""));
        let out = r.reconcile(&strings(&["A", "B", "C"]));

        assert_eq!(out.source, strings(&["A", "B", "C"]));
        assert!(out.working_changed);
        assert_eq!(r.working(), strings(&["A", "B", "C", ""]).as_slice());
    }

    #[test]
    fn test_reconcile_keeps_existing_slot() {
        let mut r = ListReconciler::new(json!(""));
        let out = r.reconcile(&strings(&["A", ""]));

        assert_eq!(out.source, strings(&["A"]));
        assert_eq!(r.working(), strings(&["A", ""]).as_slice());
        assert_eq!(r.working().len(), out.source.len() + 1);
    }

    #[test]
    fn test_reconcile_unchanged_reports_no_change() {
        let mut r = ListReconciler::new(json!(""));
        r.reconcile(&strings(&["A"]));
        let out = r.reconcile(&strings(&["A", ""]));

        assert!(!out.working_changed);
        assert_eq!(out.source, strings(&["A"]));
    }

    #[test]
    fn test_reconcile_keeps_inner_empty_entries() {
        let mut r = ListReconciler::new(json!(""));
        let out = r.reconcile(&strings(&["", "B", "C", ""]));

        assert_eq!(out.source, strings(&["", "B", "C"]));
        assert_eq!(r.working(), strings(&["", "B", "C", ""]).as_slice());
    }

    #[test]
    fn test_reconcile_does_not_alias_input() {
        let mut r = ListReconciler::new(json!({}));
        let mut input = vec![json!({"name": "John"})];
        r.reconcile(&input);
        input[0]["name"] = json!("Changed");

        assert_eq!(r.working()[0], json!({"name": "John"}));
        assert_eq!(r.working()[1], json!({}));
    }

    #[test]
    fn test_is_echo_of_last_write() {
        let mut r = ListReconciler::new(json!(""));
        r.reconcile(&strings(&["", "B", "C", ""]));

        assert!(r.is_echo(&json!(["", "B", "C"])));
        assert!(r.is_echo(&json!(["", "B", "C", ""])));
        assert!(!r.is_echo(&json!(["B", "C"])));
    }

    #[test]
    fn test_is_echo_rejects_non_arrays() {
        let r = ListReconciler::new(json!(""));
        assert!(!r.is_echo(&json!(null)));
        assert!(!r.is_echo(&json!({"foo": "bar"})));
        assert!(r.is_echo(&json!([])));
    }

    #[test]
    fn test_set_placeholder_rebuilds_slot() {
        let mut r = ListReconciler::new(json!(""));
        r.reconcile(&strings(&["A"]));
        let out = r.set_placeholder(json!({}));

        assert_eq!(out.source, strings(&["A"]));
        assert_eq!(r.working(), &[json!("A"), json!({})]);
    }

    #[test]
    fn test_without_bounds() {
        let mut r = ListReconciler::new(json!(""));
        r.reconcile(&strings(&["A", "B"]));

        assert_eq!(r.without(0), Some(strings(&["B", ""])));
        assert_eq!(r.without(3), None);
    }
}
