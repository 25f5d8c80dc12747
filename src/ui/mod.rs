pub mod autocomplete;
pub mod log_mode;
pub mod runner;
pub mod terminal;

mod action;
mod event;
mod log_entry;
mod mode;
mod state;

pub use action::UIAction;
pub use autocomplete::AutocompleteMode;
pub use event::UIEvent;
pub use log_entry::LogEntry;
pub use log_mode::LogMode;
pub use mode::UIMode;
pub use runner::run_tui;
pub use state::UIState;
pub use terminal::TerminalUI;
