//! Redirect rule generation.

mod block;

pub use block::{redirect_block, Indent, RedirectBlock, DEFAULT_SUBDOMAIN};
