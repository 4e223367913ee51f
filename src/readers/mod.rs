// src/readers/mod.rs

//! "Readers" for _gclslib_.
//!
//! ## Overview of readers
//!
//! * A [`GcLogProcessor`] drives a [`UnifiedPreprocessor`] to derive logical
//!   lines.
//! * Each logical line is identified by [`classify_line`] and extracted into
//!   a [`LogEvent`].
//! * Each `LogEvent` is inserted into an [`EventStore`].
//! * When the log is exhausted, [`analyze_store`] derives [`Analysis`] keys
//!   from the `EventStore`.
//!
//! <br/>
//!
//! The _gcls_ binary program uses a `GcLogProcessor` instance, one per file,
//! to drive processing for a file.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`LogEvent`]: crate::data::event::LogEvent
//! [`GcLogProcessor`]: crate::readers::gclogprocessor::GcLogProcessor
//! [`UnifiedPreprocessor`]: crate::readers::preprocessor::UnifiedPreprocessor
//! [`classify_line`]: crate::readers::classifier::classify_line
//! [`EventStore`]: crate::readers::eventstore::EventStore
//! [`analyze_store`]: crate::readers::analysis::analyze_store
//! [`Analysis`]: crate::readers::analysis::Analysis

pub mod analysis;
pub mod classifier;
pub mod eventstore;
pub mod gclogprocessor;
pub mod preprocessor;
