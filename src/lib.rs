//! Predecessor matching and changelog generation for replaced course files.
//!
//! When a file in a course section is replaced, this crate decides which
//! recently removed file (if any) is the prior version of the new upload,
//! using metadata similarity only, and optionally turns a line diff of the
//! two documents into a "changed pages" summary. Storage, mail delivery and
//! event wiring live in the surrounding application and reach this crate
//! through the traits in [`sources`].

pub mod config;
pub mod detector;
pub mod diff;
pub mod engine;
pub mod error;
pub mod hashing;
pub mod model;
pub mod sources;

pub use config::{load_configuration, AppConfig};
pub use detector::{Resolution, UpdateDetector};
pub use engine::{ChangelogEngine, ChangelogReport, PageSummary};
pub use error::Error;
