// src/tests/mod.rs

//! Tests for _gclslib_.
//!
//! Tests are placed at `src/tests/`, inside the `gclslib`. This is a
//! reasonable trade-off of separation and access.
//!
//! Tests placed at top-level path `tests/` do not have crate-internal
//! visibility. While it is recommended to not require internal visibility for
//! testing, in practice that often makes tests difficult or impossible to
//! implement.

pub mod decorator_tests;
pub mod event_tests;
pub mod eventstore_tests;
pub mod gclogprocessor_tests;
pub mod memory_tests;
pub mod preprocessor_tests;
