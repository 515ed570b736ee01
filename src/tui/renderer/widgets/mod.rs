pub mod layout;
pub mod primitives;

mod button;
mod list;
mod select;
mod text_input;

pub use button::render_button;
pub use list::render_list;
pub use select::render_select;
pub use text_input::render_text_input;
