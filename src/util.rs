//! Utility functions and structures.

pub(crate) mod path;
pub(crate) mod walk;
