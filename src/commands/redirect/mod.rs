//! Redirect block commands.

mod generate;

pub use generate::GenerateRedirectCommand;
