// src/data/decorator.rs

//! Timestamp decorators of GC log lines and their resolution onto one
//! millisecond-since-JVM-start timeline.
//!
//! Unified logging (JDK9+) prefixes each line with bracketed decorators in
//! any combination:
//! ```text
//! [2021-03-09T14:45:02.441-0300][0.213s][info][gc,phases   ] GC(2) O: Pause Mark End 0.005ms
//! [7944ms][info][gc] GC(6432) Pause Remark 8M->8M(10M) 1.767ms
//! [2022-10-25T08:41:22.776-0400] GC(0) Pause Young (Allocation Failure) ...
//! ```
//!
//! Legacy logging prefixes each line with a datestamp, an uptime, or both:
//! ```text
//! 2016-10-18T10:03:27.435+0200: 19810.091: [GC (Allocation Failure) ...
//! ```
//!
//! When several timestamps are present, uptime-millis is preferred over
//! uptime seconds, which is preferred over a datestamp. A datestamp alone is
//! measured from the JVM start reference.

use crate::common::Millis;

use std::io::{Error, ErrorKind, Result};

use ::chrono::{DateTime, FixedOffset};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::Regex;
use ::si_trace_print::{defn, defx};

/// A datetime with a fixed offset, the type of a parsed datestamp.
pub type DateTimeL = DateTime<FixedOffset>;

/// Regular expression pattern fragment.
pub type RegexPattern = str;

/// Regular expression pattern fragment that declares a named capture group.
pub type CaptureGroupPattern = str;

/// Name of a regular expression capture group.
pub type CaptureGroupName = str;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// capture group names
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const CGN_DATESTAMP: &CaptureGroupName = "datestamp";
pub const CGN_UPTIME: &CaptureGroupName = "uptime";
pub const CGN_UPTIMEMILLIS: &CaptureGroupName = "uptimemillis";
pub const CGN_LEVEL: &CaptureGroupName = "level";
pub const CGN_TAGS: &CaptureGroupName = "tags";
pub const CGN_GCID: &CaptureGroupName = "gcid";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// regex patterns
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `2021-03-09T14:45:02.441-0300`, decimal separator may be `,`.
pub const RP_DATESTAMP: &RegexPattern = r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[\.,]\d{3}(?:[\+\-]\d{4}|Z)";

/// Uptime in seconds with millisecond precision, `7.944`.
pub const RP_UPTIME: &RegexPattern = r"\d{1,10}[\.,]\d{3}";

pub const CGP_UNIFIED_DATESTAMP: &CaptureGroupPattern =
    concatcp!(r"(?:\[(?P<", CGN_DATESTAMP, ">", RP_DATESTAMP, r")\])?");

pub const CGP_UNIFIED_UPTIME: &CaptureGroupPattern =
    concatcp!(r"(?:\[(?P<", CGN_UPTIME, ">", RP_UPTIME, r")s\])?");

pub const CGP_UNIFIED_UPTIMEMILLIS: &CaptureGroupPattern =
    concatcp!(r"(?:\[(?P<", CGN_UPTIMEMILLIS, r">\d{1,13})ms\])?");

pub const CGP_UNIFIED_LEVEL: &CaptureGroupPattern =
    concatcp!(r"(?:\[(?P<", CGN_LEVEL, r">trace|debug|info|warning|error)[ ]*\])?");

pub const CGP_UNIFIED_TAGS: &CaptureGroupPattern =
    concatcp!(r"(?:\[(?P<", CGN_TAGS, r">[a-z0-9]+(?:,[a-z0-9]+)*)[ ]*\])?");

/// Every unified decorator, anchored at line start, without the trailing
/// space.
pub const RP_UNIFIED_DECORATOR_NS: &RegexPattern = concatcp!(
    "^",
    CGP_UNIFIED_DATESTAMP,
    CGP_UNIFIED_UPTIME,
    CGP_UNIFIED_UPTIMEMILLIS,
    CGP_UNIFIED_LEVEL,
    CGP_UNIFIED_TAGS
);

/// Every unified decorator followed by the separating space.
pub const RP_UNIFIED_DECORATOR: &RegexPattern = concatcp!(RP_UNIFIED_DECORATOR_NS, " ");

/// The unified decorator of `[gc,init]` banner lines.
pub const RP_UNIFIED_DECORATOR_INIT: &RegexPattern = concatcp!(
    "^",
    CGP_UNIFIED_DATESTAMP,
    CGP_UNIFIED_UPTIME,
    CGP_UNIFIED_UPTIMEMILLIS,
    CGP_UNIFIED_LEVEL,
    r"\[gc,init[ ]*\] "
);

/// The event sequence id, `GC(6432) `.
pub const CGP_GCID: &CaptureGroupPattern = concatcp!(r"GC\((?P<", CGN_GCID, r">\d{1,10})\) ");

/// Optional event sequence id.
pub const CGP_GCID_OPT: &CaptureGroupPattern = concatcp!(r"(?:GC\((?P<", CGN_GCID, r">\d{1,10})\) )?");

/// Legacy leading datestamp and/or uptime, anchored at line start.
pub const RP_LEGACY_PREFIX: &RegexPattern = concatcp!(
    "^(?:(?P<", CGN_DATESTAMP, ">", RP_DATESTAMP, "): )?",
    "(?:(?P<", CGN_UPTIME, ">", RP_UPTIME, "): )?"
);

/// Legacy timestamps nested inside an event, e.g. the second `20.190: ` in
/// `20.189: [GC 20.190: [ParNew: ...`. Not captured.
pub const RP_LEGACY_INNER_STAMP: &RegexPattern =
    concatcp!("(?:", RP_DATESTAMP, ": )?(?:", RP_UPTIME, ": )?");

/// Tag set that marks a line logged at the start of an event.
pub const TAGS_GC_START: &str = "gc,start";

/// strftime format of a datestamp, after normalizing the decimal separator
/// and a `Z` offset.
const DATESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

lazy_static! {
    static ref DATESTAMP_REGEX: Regex = Regex::new(concatcp!("^", RP_DATESTAMP, "$")).unwrap();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// datestamp conversion
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse a logged datestamp like `2021-03-09T14:45:02.441-0300`.
pub fn datestamp_to_datetime(datestamp: &str) -> Result<DateTimeL> {
    defn!("({:?})", datestamp);
    if !DATESTAMP_REGEX.is_match(datestamp) {
        defx!("not a datestamp");
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("not a datestamp {:?}", datestamp),
        ));
    }
    let mut normalized: String = datestamp.replace(',', ".");
    if normalized.ends_with('Z') {
        normalized.pop();
        normalized.push_str("+0000");
    }
    let result = DateTime::parse_from_str(normalized.as_str(), DATESTAMP_FORMAT).map_err(|err| {
        Error::new(
            ErrorKind::InvalidData,
            format!("bad datestamp {:?}: {}", datestamp, err),
        )
    });
    defx!("return {:?}", result);

    result
}

/// Milliseconds from `jvm_start` to `datestamp`.
///
/// A datestamp earlier than `jvm_start` is an error.
pub fn datestamp_millis_since(
    datestamp: &str,
    jvm_start: &DateTimeL,
) -> Result<Millis> {
    let dt: DateTimeL = datestamp_to_datetime(datestamp)?;
    let millis: Millis = dt.timestamp_millis() - jvm_start.timestamp_millis();
    if millis < 0 {
        return Err(Error::new(
            ErrorKind::InvalidData,
            format!("datestamp {:?} is before JVM start {}", datestamp, jvm_start),
        ));
    }

    Ok(millis)
}

/// Does the logged tag set mark the start of an event?
pub fn is_start_tags(tags: &str) -> bool {
    tags.trim() == TAGS_GC_START
}
