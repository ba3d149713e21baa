//! Command implementations for projview-cli

pub mod convert;
pub mod find;
pub mod link;
pub mod sync;

pub use convert::run_convert;
pub use find::{run_find, run_list};
pub use link::{run_link, run_link_to};
pub use sync::{run_load, run_save};
