//! # Services Module
//!
//! Side effects that run outside the pure update function.

pub mod http;

pub use http::{HttpMethod, HttpService, PreparedRequest, RequestDispatcher, RequestSpec};
