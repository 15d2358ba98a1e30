//! Integration tests for Printmint.
//!
//! The tests in `tests/` exercise the library surface of the app crate -
//! quota rules, session-token verification, and the API's JSON contracts -
//! without a live database or network.

#![cfg_attr(not(test), forbid(unsafe_code))]
