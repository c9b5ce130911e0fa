//! Compile Bulma themes and collect its extensions as static files.
//!
//! Simple Bulma can be used as both a CLI and a library. The library exposes
//! a static file [`Finder`](finder::Finder) compiling one stylesheet per theme,
//! the template directives loading them, and the collection step writing
//! everything into a static root.

#![warn(missing_docs)]

pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod finder;
pub mod tags;
pub(crate) mod util;

pub use collect::collect;
pub use config::Config;
pub use error::{Error, Result};
pub use tags::Tags;
