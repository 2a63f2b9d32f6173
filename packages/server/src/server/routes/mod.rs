// HTTP routes
pub mod health;
pub mod verification;

pub use health::*;
pub use verification::*;
