// Common test utilities
#![allow(dead_code)]

pub mod client;
pub mod harness;

pub use client::*;
pub use harness::*;
