//! Application layer: loading redirect data and resolving request paths.
//!
//! - [`loader`] - Decodes YAML/JSON redirect files
//! - [`resolver`] - Static and persistent lookup stages
//! - [`chain`] - Ordered resolution chain with a terminal fallback

pub mod chain;
pub mod loader;
pub mod resolver;

pub use chain::{ChainOutcome, DefaultPage, ResolutionChain, TerminalHandler, TerminalResponse};
pub use loader::{DecodeError, Format, LoadError};
pub use resolver::{PersistentResolver, RedirectResolver, Resolution, StaticResolver};
