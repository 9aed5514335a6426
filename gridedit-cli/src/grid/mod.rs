//! The paginated edit-overlay core: overlay store, pagination window, cell
//! edit protocol, and the controller that owns them.

pub mod controller;
pub mod editor;
pub mod overlay;
pub mod pagination;

pub use controller::GridController;
pub use editor::{CellEditor, SelectEdit, TextEdit, Validation, validate_field};
pub use overlay::EditOverlay;
pub use pagination::{PAGE_SIZE, PageWindow};
