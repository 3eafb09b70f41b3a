//! Integration tests for medref-harvest
//!
//! These tests use wiremock to create mock HTTP servers and exercise the
//! full harvest cycle end-to-end.

mod crawl_tests;
