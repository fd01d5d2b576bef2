//! Site configuration commands.
//!
//! - `site.create` - Write a configuration and enable it
//! - `site.delete` - Remove a configuration and its symlink
//! - `site.exists` - Check whether a configuration exists

mod create;
mod delete;
mod exists;

pub use create::CreateSiteCommand;
pub use delete::DeleteSiteCommand;
pub use exists::SiteExistsCommand;
