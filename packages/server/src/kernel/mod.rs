//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ServerDeps, TwilioAdapter};
pub use test_dependencies::{MockVerificationService, TestDependencies};
pub use traits::*;
