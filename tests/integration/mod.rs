//! Integration Tests Module
//!
//! Integration tests for Scenario Studio. Backend traffic goes to an
//! in-memory task store; nothing leaves the process.

// In-memory backend shared by the suites
mod fake_backend;

// Reconciliation controller tests
mod reconciliation_test;

// Command layer tests
mod commands_test;

// Normalizer, comparison and rollup tests
mod aggregation_test;
