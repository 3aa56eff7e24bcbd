//! README parsing for awesome-list repositories.
//!
//! Parsing is split in two layers:
//!
//! - [`document`]: renders the Markdown, picks a strategy based on the
//!   document's shape and groups resources into categories
//! - [`resources`]: turns individual list items and table rows into
//!   [`Resource`](crate::models::Resource) records
//!
//! Both layers are synchronous and side-effect free apart from logging.
//! Only reading the README from disk can fail.

pub mod document;
pub mod resources;

pub use document::parse_awesome_list;
