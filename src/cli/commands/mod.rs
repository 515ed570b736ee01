pub mod backend;
pub mod session;
pub mod tui;

pub use backend::{BackendCommands, backend_command};
pub use session::{SessionCommands, session_command};
pub use tui::{TuiCommands, tui_command};
