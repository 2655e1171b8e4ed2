mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;
