#![warn(missing_docs)]
//! # face-checkin-contract-tests
//!
//! Integration-test-only crate validating the frozen wire schemas under
//! `contracts/` against their fixtures; see `tests/contract_validation.rs`.
