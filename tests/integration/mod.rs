//! Integration tests against mock backends and the filesystem

pub mod api_client_test;
pub mod session_flow_test;
pub mod session_store_test;
