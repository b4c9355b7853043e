use super::FocusQuery;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Marks a rendered row; rows must be direct children of the list root.
pub const ROW_ATTR: &str = "data-list-input-row";

const ROW_SELECTOR: &str = ":scope > [data-list-input-row]";
const FIELD_SELECTOR: &str = "input, textarea, select";

/// [`FocusQuery`] over the rows rendered under a list root element.
#[derive(Clone, Copy)]
pub struct DomFocus {
    root: NodeRef<html::Div>,
}

impl DomFocus {
    pub fn new(root: NodeRef<html::Div>) -> Self {
        Self { root }
    }

    fn rows(&self) -> Option<web_sys::NodeList> {
        let root = self.root.get_untracked()?;
        root.query_selector_all(ROW_SELECTOR).ok()
    }

    pub fn row_count(&self) -> usize {
        self.rows().map(|rows| rows.length() as usize).unwrap_or(0)
    }
}

impl FocusQuery for DomFocus {
    fn focused_index(&self) -> Option<usize> {
        let active = web_sys::window()?.document()?.active_element()?;
        let rows = self.rows()?;

        (0..rows.length())
            .find(|&i| {
                rows.item(i)
                    .is_some_and(|row| row.contains(Some(active.as_ref())))
            })
            .map(|i| i as usize)
    }

    fn focus(&self, index: usize) -> bool {
        let Some(rows) = self.rows() else {
            return false;
        };
        let Some(row) = rows.item(index as u32) else {
            return false;
        };
        let Ok(row) = row.dyn_into::<web_sys::Element>() else {
            return false;
        };
        let Ok(Some(field)) = row.query_selector(FIELD_SELECTOR) else {
            return false;
        };

        field.unchecked_into::<web_sys::HtmlElement>().focus().is_ok()
    }
}
