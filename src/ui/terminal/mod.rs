//! This module defines the terminal shell that hosts the autocomplete input
//! and the log view.
mod controller;
mod events;
mod lifecycle;
mod render;

pub use controller::TerminalUI;
