//! Test utilities for fetcher tests.
//!
//! This module provides an in-memory message source that records every
//! request made against it.

pub mod mock_source;

#[allow(unused_imports)]
pub use mock_source::{MockSource, Request, history};
