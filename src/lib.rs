//! Submit the URLs listed in a sitemap to an IndexNow search engine.

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod http;
pub mod indexnow;
pub mod loader;
pub mod process;
pub mod reporter;
pub mod sitemap;
pub mod types;

pub use errors::Error;
pub use process::{process_sitemap, Outcome, Processor};
pub use types::Options;
