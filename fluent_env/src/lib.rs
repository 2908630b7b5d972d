//! A fluent, declarative loader for `.env`-style configuration files.
//!
//! [`FluentEnv`] reads key-value pairs from environment-definition files
//! (parsing is delegated to the `dotenvy` or `dotenv` crate behind the
//! [`importer::EnvFileImporter`] boundary), merges them into a
//! [`ValueStore`], and applies a declared pipeline of filtering,
//! validation and environment-population actions.
//!
//! Declarations may be made before or after loading: before, they are
//! deferred and applied once when the load completes; after, they apply
//! immediately against the loaded values. See [`FluentEnv`] for the full
//! contract and an example.

mod actions;
pub mod convert;
mod error;
pub mod importer;
mod keys;
mod loader;
mod sink;
mod store;

pub use error::{FluentEnvError, FluentEnvResult, ValidationError};
pub use importer::{EnvFileImporter, ImportError, ImporterSelection};
pub use keys::{IntoKeys, IntoPaths};
pub use loader::FluentEnv;
pub use sink::{EnvSink, MemorySink, ProcessEnv};
pub use store::ValueStore;
