pub mod button;
pub mod input;
pub mod list_input;
pub mod row_template;

// Re-export component symbols so callers can `use crate::components::ui::ListInput` etc.
pub use button::*;
pub use input::*;
pub use list_input::*;
pub use row_template::*;
