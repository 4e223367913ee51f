// src/readers/classifier.rs

//! Identify one logical line against the grammar registry and extract it.
//!
//! Grammars are tried in the declared order of [`GRAMMAR_DATAS`]; the first
//! match wins.
//!
//! [`GRAMMAR_DATAS`]: crate::data::grammar::GRAMMAR_DATAS

use crate::data::event::{LogEvent, LogEventType};
use crate::data::extract::ExtractContext;
use crate::data::grammar::{GrammarIndex, GrammarInstr, GRAMMAR_DATAS, GRAMMAR_DATAS_REGEX_VEC};
use crate::de_wrn;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::io::Result;

use ::regex::Captures;
use ::si_trace_print::{defn, defo, defx};

/// Result of classifying one logical line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResultClassify {
    /// The index of the first matching grammar.
    Found(GrammarIndex),
    /// No grammar matched; the line is unidentified.
    NotFound,
}

impl ResultClassify {
    pub const fn is_found(&self) -> bool {
        matches!(*self, ResultClassify::Found(_))
    }
}

/// Find the first grammar of [`GRAMMAR_DATAS`] matching `line`.
pub fn classify_line(line: &str) -> ResultClassify {
    defn!("({:?})", str_to_String_noraw(line));
    for (index, regex) in GRAMMAR_DATAS_REGEX_VEC.iter().enumerate() {
        if regex.is_match(line) {
            defx!("Found({}) {:?}", index, GRAMMAR_DATAS[index].kind);
            return ResultClassify::Found(index);
        }
    }
    defx!("NotFound");

    ResultClassify::NotFound
}

/// The kind of event `line` would produce, if identified.
pub fn identify_event_type(line: &str) -> Option<LogEventType> {
    match classify_line(line) {
        ResultClassify::Found(index) => Some(GRAMMAR_DATAS[index].kind),
        ResultClassify::NotFound => None,
    }
}

/// Extract `line` with the grammar at `index`.
pub fn extract_line(
    index: GrammarIndex,
    line: &str,
    ctx: &mut ExtractContext,
) -> Result<LogEvent> {
    let instr: &GrammarInstr = &GRAMMAR_DATAS[index];
    let captures: Captures = match GRAMMAR_DATAS_REGEX_VEC[index].captures(line) {
        Some(captures) => captures,
        None => {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("grammar {} does not match line {:?}", index, line),
            ));
        }
    };

    (instr.extract)(instr, &captures, line, ctx)
}

/// Classify then extract `line`.
///
/// Returns `None` when the line is unidentified: no grammar matched, or the
/// matching grammar failed to extract (malformed numeric text, missing
/// timestamp, a datestamp before the JVM start).
pub fn parse_log_line(
    line: &str,
    ctx: &mut ExtractContext,
) -> Option<LogEvent> {
    defn!();
    let index: GrammarIndex = match classify_line(line) {
        ResultClassify::Found(index) => index,
        ResultClassify::NotFound => {
            defx!("unidentified");
            return None;
        }
    };
    match extract_line(index, line, ctx) {
        Ok(event) => {
            defx!("{:?} timestamp {}", event.kind(), event.timestamp());
            Some(event)
        }
        Err(err) => {
            defo!("extract failed {}", err);
            de_wrn!("grammar {} matched but extraction failed: {}; line {:?}", index, err, line);
            defx!("unidentified");
            None
        }
    }
}
