//! Integration tests exercising the client core against a real HTTP server.

mod support;

mod pipeline_http_test;
mod session_http_test;
