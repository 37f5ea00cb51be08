//! Test helpers for the Cloud Print SDK. Do not use outside of tests.

mod api;
pub use api::*;
