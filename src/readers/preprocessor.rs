// src/readers/preprocessor.rs

//! Implements a [`UnifiedPreprocessor`], the merging of unified logging
//! (JDK9+) fragments that share one `GC(n)` sequence id into one logical
//! line.
//!
//! With `-Xlog:gc*` one collection is logged as several physical lines with
//! different tag sets:
//! ```text
//! [0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure)
//! [0.042s][info][gc,heap      ] GC(0) DefNew: 983K->128K(1152K)
//! [0.042s][info][gc,heap      ] GC(0) Tenured: 0K->458K(768K)
//! [0.042s][info][gc,metaspace ] GC(0) Metaspace: 246K->246K(1056768K)
//! [0.042s][info][gc           ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.393ms
//! [0.042s][info][gc,cpu       ] GC(0) User=0.00s Sys=0.00s Real=0.00s
//! ```
//! which become the one logical line
//! ```text
//! [0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) DefNew: 983K->128K(1152K) Tenured: 0K->458K(768K) Metaspace: 246K->246K(1056768K) 0M->0M(1M) 1.393ms User=0.00s Sys=0.00s Real=0.00s
//! ```
//!
//! Fragments are sorted into:
//!
//! * _start_, `Pause <name> (<cause>)` without memory or duration,
//! * _summary_, `Pause <name> ...` with a duration,
//! * _detail_, a generation transition such as `DefNew: ...`,
//! * _cpu_, `User=... Sys=... Real=...`, the terminating fragment,
//! * _informational_, worker counts, phase timings, region counts.
//!
//! Informational fragments of an open sequence are absorbed into it. Without
//! an open sequence they leave as [`PreprocessedLine::Informational`], never
//! classified and never unidentified.
//!
//! Every other line passes through unchanged.
//!
//! Each open sequence id has its own slot so interleaved ids are tracked
//! independently.

use crate::common::{Count, GcId};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

use std::collections::BTreeMap;
use std::fmt;

use ::lazy_static::lazy_static;
use ::regex::Regex;
use ::si_trace_print::{defn, defo, defx, defñ};

/// One line out of the [`UnifiedPreprocessor`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PreprocessedLine {
    /// A logical line to classify.
    Logical(String),
    /// A fragment that could not be merged, e.g. a truncated sequence.
    Unidentified(String),
    /// A known informational fragment outside any open sequence, e.g. the
    /// worker count of a concurrent cycle.
    Informational(String),
}

impl PreprocessedLine {
    pub fn as_str(&self) -> &str {
        match self {
            PreprocessedLine::Logical(s)
            | PreprocessedLine::Unidentified(s)
            | PreprocessedLine::Informational(s) => s.as_str(),
        }
    }
}

/// Lines out of one call to the `UnifiedPreprocessor`.
pub type PreprocessedLines = Vec<PreprocessedLine>;

lazy_static! {
    /// A unified fragment: decorators, sequence id, body.
    static ref FRAGMENT_REGEX: Regex = Regex::new(
        r"^(?P<decorator>(?:\[[^\]]{1,64}\])+) GC\((?P<gcid>\d{1,10})\) +(?P<body>.*?)[ ]*$"
    ).unwrap();

    static ref START_REGEX: Regex = Regex::new(
        r"^Pause [A-Z][A-Za-z ]*?(?: \([^()]+(?:\(\))?\))*$"
    ).unwrap();

    static ref SUMMARY_REGEX: Regex = Regex::new(
        r"^(?P<pause>Pause [A-Z][A-Za-z ]*?(?: \([^()]+(?:\(\))?\))*)(?P<rest>(?: \S+->\S+\(\S+\))? \d{1,9}[\.,]\d{3}ms)$"
    ).unwrap();

    static ref DETAIL_REGEX: Regex = Regex::new(
        r"^(?P<name>DefNew|PSYoungGen|ParNew|Tenured|ParOldGen|CMS|Metaspace): (?P<transition>\S+->\S+\(\S+\))"
    ).unwrap();

    static ref CPU_REGEX: Regex = Regex::new(
        r"^User=\d{1,7}[\.,]\d{2}s Sys=\d{1,7}[\.,]\d{2}s Real=\d{1,7}[\.,]\d{2}s$"
    ).unwrap();

    static ref INFORMATIONAL_REGEX: Regex = Regex::new(
        r"^(?:Using \d{1,5} (?:workers of \d{1,5}|of \d{1,5} workers) for .+|(?:[A-Z][a-z]+ Phase|Adjust Roots|Post Compact)(?: \d{1,9}[\.,]\d{3}ms)?|[A-Z][A-Za-z \-]+: \d{1,9}[\.,]\d{1,3}ms|Phase \d{1,2}: .+|[A-Z][a-z]+ regions: .+|Desired survivor size .+|Age table with threshold .+|- age .+)$"
    ).unwrap();
}

/// Rank of a detail in the merged line: young, then old, then metaspace.
fn detail_rank(name: &str) -> usize {
    match name {
        "DefNew" | "PSYoungGen" | "ParNew" => 0,
        "Tenured" | "ParOldGen" | "CMS" => 1,
        _ => 2,
    }
}

const DETAIL_RANKS: usize = 3;

/// Buffered fragments of one open sequence id.
#[derive(Clone, Debug, Default)]
struct OpenSequence {
    /// Decorator of the first fragment, used for the merged line.
    decorator: String,
    /// `Pause <name> (<cause>)`.
    pause: Option<String>,
    /// `name: transition` per rank, first seen wins.
    details: [Option<String>; DETAIL_RANKS],
    /// Memory and duration of the summary, after the pause name.
    summary: Option<String>,
    /// Detail fragments seen, verbatim.
    detail_raw: Vec<String>,
    /// Every fragment seen, verbatim, to flush if the sequence never
    /// completes.
    raw: Vec<String>,
}

impl OpenSequence {
    fn new(decorator: &str) -> OpenSequence {
        OpenSequence {
            decorator: String::from(decorator),
            ..Default::default()
        }
    }

    /// The merged logical line, `cpu` appended when given.
    fn merged(
        &self,
        gcid: GcId,
        cpu: Option<&str>,
    ) -> String {
        let mut line = format!("{} GC({})", self.decorator, gcid);
        if let Some(pause) = self.pause.as_ref() {
            line.push(' ');
            line.push_str(pause);
        }
        for detail in self.details.iter().flatten() {
            line.push(' ');
            line.push_str(detail);
        }
        if let Some(summary) = self.summary.as_ref() {
            line.push_str(summary);
        }
        if let Some(cpu) = cpu {
            line.push(' ');
            line.push_str(cpu);
        }

        line
    }

    /// Emit as merged if the summary arrived, else as unidentified fragments.
    fn flush(
        self,
        gcid: GcId,
        out: &mut PreprocessedLines,
    ) {
        if self.summary.is_some() {
            out.push(PreprocessedLine::Logical(self.merged(gcid, None)));
        } else {
            out.extend(self.raw.into_iter().map(PreprocessedLine::Unidentified));
        }
    }
}

/// The unified logging fragment merger. Legacy lines pass through.
///
/// Call [`process_line`] for each physical line in order, then [`finish`]
/// once at end of input.
///
/// [`process_line`]: UnifiedPreprocessor::process_line
/// [`finish`]: UnifiedPreprocessor::finish
#[derive(Default)]
pub struct UnifiedPreprocessor {
    open: BTreeMap<GcId, OpenSequence>,
    /// Count of logical lines synthesized from several fragments.
    merged_count: Count,
    /// Count of fragments flushed as unidentified.
    unidentified_count: Count,
    /// Count of informational fragments outside any open sequence.
    informational_count: Count,
}

impl fmt::Debug for UnifiedPreprocessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("UnifiedPreprocessor")
            .field("open ids", &self.open.keys().collect::<Vec<&GcId>>())
            .field("merged_count", &self.merged_count)
            .field("unidentified_count", &self.unidentified_count)
            .field("informational_count", &self.informational_count)
            .finish()
    }
}

impl UnifiedPreprocessor {
    pub fn new() -> UnifiedPreprocessor {
        UnifiedPreprocessor::default()
    }

    /// Number of sequence ids with buffered fragments.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    pub const fn merged_count(&self) -> Count {
        self.merged_count
    }

    pub const fn unidentified_count(&self) -> Count {
        self.unidentified_count
    }

    pub const fn informational_count(&self) -> Count {
        self.informational_count
    }

    fn tally(
        &mut self,
        out: &PreprocessedLines,
    ) {
        for line in out.iter() {
            match line {
                PreprocessedLine::Logical(_) => {}
                PreprocessedLine::Unidentified(_) => self.unidentified_count += 1,
                PreprocessedLine::Informational(_) => self.informational_count += 1,
            }
        }
    }

    /// Close every slot except `keep` that already has its summary.
    fn flush_completed_except(
        &mut self,
        keep: GcId,
        out: &mut PreprocessedLines,
    ) {
        let done: Vec<GcId> = self
            .open
            .iter()
            .filter(|(gcid, seq)| **gcid != keep && seq.summary.is_some())
            .map(|(gcid, _)| *gcid)
            .collect();
        for gcid in done {
            if let Some(seq) = self.open.remove(&gcid) {
                defo!("flush completed GC({}) without cpu", gcid);
                self.merged_count += 1;
                seq.flush(gcid, out);
            }
        }
    }

    /// Process one physical line. Returns zero or more lines, in order.
    pub fn process_line(
        &mut self,
        line: &str,
    ) -> PreprocessedLines {
        defn!("({:?})", str_to_String_noraw(line));
        let mut out = PreprocessedLines::new();
        let captures = match FRAGMENT_REGEX.captures(line) {
            Some(captures) => captures,
            None => {
                out.push(PreprocessedLine::Logical(String::from(line)));
                defx!("pass through, not a fragment");
                return out;
            }
        };
        let gcid: GcId = match captures["gcid"].parse::<GcId>() {
            Ok(gcid) => gcid,
            Err(_) => {
                out.push(PreprocessedLine::Logical(String::from(line)));
                defx!("pass through, bad id");
                return out;
            }
        };
        let decorator: &str = captures.name("decorator").map_or("", |m| m.as_str());
        let body: &str = captures.name("body").map_or("", |m| m.as_str());

        if START_REGEX.is_match(body) {
            defo!("start GC({})", gcid);
            self.flush_completed_except(gcid, &mut out);
            if let Some(seq) = self.open.remove(&gcid) {
                if seq.summary.is_some() {
                    self.merged_count += 1;
                }
                seq.flush(gcid, &mut out);
            }
            let mut seq = OpenSequence::new(decorator);
            seq.pause = Some(String::from(body));
            seq.raw.push(String::from(line));
            self.open.insert(gcid, seq);
        } else if let Some(summary) = SUMMARY_REGEX.captures(body) {
            let pause: &str = summary.name("pause").map_or("", |m| m.as_str());
            let rest: &str = summary.name("rest").map_or("", |m| m.as_str());
            if !rest.contains("->") {
                // no memory, nothing more to wait for
                defo!("summary without memory GC({})", gcid);
                out.push(PreprocessedLine::Logical(String::from(line)));
                if let Some(seq) = self.open.remove(&gcid) {
                    self.merged_count += 1;
                    // a summary without memory has no place for transitions
                    out.extend(seq.detail_raw.into_iter().map(PreprocessedLine::Unidentified));
                }
            } else {
                defo!("summary GC({})", gcid);
                self.flush_completed_except(gcid, &mut out);
                if self.open.get(&gcid).map_or(false, |seq| seq.summary.is_some()) {
                    if let Some(seq) = self.open.remove(&gcid) {
                        self.merged_count += 1;
                        seq.flush(gcid, &mut out);
                    }
                }
                let seq = self
                    .open
                    .entry(gcid)
                    .or_insert_with(|| OpenSequence::new(decorator));
                seq.pause = Some(String::from(pause));
                seq.summary = Some(String::from(rest));
                seq.raw.push(String::from(line));
            }
        } else if let Some(detail) = DETAIL_REGEX.captures(body) {
            match self.open.get_mut(&gcid) {
                Some(seq) => {
                    let rank: usize = detail_rank(&detail["name"]);
                    defo!("detail rank {} GC({})", rank, gcid);
                    if seq.details[rank].is_none() {
                        seq.details[rank] = Some(format!("{}: {}", &detail["name"], &detail["transition"]));
                    }
                    seq.detail_raw.push(String::from(line));
                    seq.raw.push(String::from(line));
                }
                None => {
                    defo!("detail without open GC({})", gcid);
                    out.push(PreprocessedLine::Unidentified(String::from(line)));
                }
            }
        } else if CPU_REGEX.is_match(body) {
            match self.open.remove(&gcid) {
                Some(seq) if seq.summary.is_some() => {
                    defo!("cpu terminates GC({})", gcid);
                    self.merged_count += 1;
                    out.push(PreprocessedLine::Logical(seq.merged(gcid, Some(body))));
                }
                Some(seq) => {
                    defo!("cpu before summary GC({})", gcid);
                    seq.flush(gcid, &mut out);
                    out.push(PreprocessedLine::Unidentified(String::from(line)));
                }
                None => {
                    defo!("cpu without open GC({})", gcid);
                    out.push(PreprocessedLine::Unidentified(String::from(line)));
                }
            }
        } else if INFORMATIONAL_REGEX.is_match(body) {
            match self.open.get_mut(&gcid) {
                Some(seq) => {
                    defo!("absorb informational GC({})", gcid);
                    seq.raw.push(String::from(line));
                }
                None => {
                    defo!("informational without open GC({})", gcid);
                    out.push(PreprocessedLine::Informational(String::from(line)));
                }
            }
        } else {
            out.push(PreprocessedLine::Logical(String::from(line)));
        }
        self.tally(&out);
        defx!("return {} lines, {} open", out.len(), self.open.len());

        out
    }

    /// End of input: merge every sequence that has its summary, flush the
    /// fragments of every truncated sequence as unidentified.
    pub fn finish(&mut self) -> PreprocessedLines {
        let mut out = PreprocessedLines::new();
        let open = std::mem::take(&mut self.open);
        for (gcid, seq) in open.into_iter() {
            if seq.summary.is_some() {
                self.merged_count += 1;
            }
            seq.flush(gcid, &mut out);
        }
        self.tally(&out);
        defñ!("return {} lines", out.len());

        out
    }
}
