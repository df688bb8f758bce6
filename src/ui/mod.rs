pub mod terminal;

pub use terminal::TerminalFrontend;
