//! Layouts compose providers around page trees.

pub mod admin;
pub mod public;

pub use admin::{AdminFrame, AdminLayout, NavItem, ShellView};
pub use public::PublicLayout;
