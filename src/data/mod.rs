// src/data/mod.rs

//! The `data` module is specialized data containers and the grammar
//! registry for GC log lines: [`LogEvent`]s, [`Memory`] quantities,
//! [`GcTrigger`]s, and the [`GRAMMAR_DATAS`] that identify them.
//!
//! ## Definitions of data
//!
//! ### Logical line
//!
//! A "logical line" is one line of a GC log after preprocessing. For legacy
//! logging it is the physical line. For unified logging (JDK9+) it may be
//! several physical lines sharing one `GC(n)` sequence id merged into one.
//!
//! ### Decorator
//!
//! A "decorator" is the bracketed prefix of a unified logging line, e.g.
//! `[2021-03-09T14:45:02.441-0300][0.213s][info][gc,phases   ]`. Legacy
//! lines have a datestamp and/or uptime prefix instead.
//! See [`decorator`].
//!
//! ### Grammar
//!
//! A "grammar" is one [`GrammarInstr`] of the registry: a regular expression
//! for a logical line and the kind of [`LogEvent`] it produces.
//!
//! ### Event
//!
//! An "event" is a logical line that matched a grammar and was extracted
//! into a [`LogEvent`]. Events are placed on one timeline, milliseconds
//! since JVM start.
//!
//! [`LogEvent`]: crate::data::event::LogEvent
//! [`Memory`]: crate::data::memory::Memory
//! [`GcTrigger`]: crate::data::trigger::GcTrigger
//! [`GRAMMAR_DATAS`]: crate::data::grammar::GRAMMAR_DATAS
//! [`GrammarInstr`]: crate::data::grammar::GrammarInstr
//! [`decorator`]: crate::data::decorator

pub mod decorator;
pub mod event;
pub mod extract;
pub mod grammar;
pub mod jdkmath;
pub mod memory;
pub mod trigger;
