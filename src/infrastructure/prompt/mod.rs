//! Interactive prompt adapters

mod terminal;

pub use terminal::TerminalPrompter;
