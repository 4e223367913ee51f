// src/lib.rs

//! _gclslib_ is the library behind the _gcls_ program. It sifts a JVM garbage
//! collection log into an ordered stream of typed events and aggregates them
//! into pause, heap, safepoint, and environment statistics.
//!
//! Processing is one sequential pass per log:
//!
//! 1. [`UnifiedPreprocessor`] merges the fragments of one unified logging
//!    (JDK9+) collection that share a `GC(n)` sequence id into one logical
//!    line. Legacy lines pass through.
//! 2. [`classify_line`] finds the first grammar of [`GRAMMAR_DATAS`] that
//!    matches the logical line.
//! 3. The grammar's extraction function builds a [`LogEvent`].
//! 4. [`EventStore::insert`] keeps blocking events ordered by timestamp and
//!    updates running statistics.
//!
//! [`GcLogProcessor`] drives these stages for one log.
//!
//! A line that matches no grammar, or whose numbers cannot be converted, is
//! kept verbatim as an "unidentified" line. It never stops processing.
//!
//! [`UnifiedPreprocessor`]: crate::readers::preprocessor::UnifiedPreprocessor
//! [`classify_line`]: crate::readers::classifier::classify_line
//! [`GRAMMAR_DATAS`]: crate::data::grammar::GRAMMAR_DATAS
//! [`LogEvent`]: crate::data::event::LogEvent
//! [`EventStore::insert`]: crate::readers::eventstore::EventStore::insert
//! [`GcLogProcessor`]: crate::readers::gclogprocessor::GcLogProcessor

pub mod common;
pub mod data;
pub mod debug;
pub mod readers;
#[cfg(test)]
pub mod tests;
