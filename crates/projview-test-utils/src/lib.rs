//! Shared test utilities for the projview workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`] - [`TestWorkspace`] with temporary storage and view roots

pub mod workspace;

pub use workspace::TestWorkspace;
