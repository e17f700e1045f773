//! Renames a misnamed Prisma migration directory to its canonical name.
//!
//! Scans the migrations root for the first directory whose name carries a
//! forbidden character or a bad token, then renames it to the configured
//! target name, or removes it when the target already exists.

pub mod config;
pub mod context;
pub mod error;
pub mod fixer;
pub mod scan;

pub use config::FixerConfig;
pub use context::AppContext;
pub use error::FixError;
pub use fixer::{fix, Outcome, Plan};
