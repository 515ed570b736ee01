pub mod list;
pub mod select;
pub mod text_input;

pub use list::{ListItem, ListState};
pub use select::SelectState;
pub use text_input::TextInputState;
