// src/data/extract.rs

//! Turn the named captures of a matched grammar into a [`LogEvent`].
//!
//! Extraction is deterministic given the line and the [`ExtractContext`].
//! Any failure (an unparseable number, a missing required timestamp, a
//! datestamp earlier than JVM start) is returned as an `Err` and the caller
//! treats the line as unidentified.

use crate::common::{Bytes, GcId, Micros, Millis, Nanos, BYTES_UNSET};
use crate::data::decorator::{
    datestamp_millis_since,
    datestamp_to_datetime,
    is_start_tags,
    DateTimeL,
    CGN_DATESTAMP,
    CGN_GCID,
    CGN_TAGS,
    CGN_UPTIME,
    CGN_UPTIMEMILLIS,
};
use crate::data::event::{HeaderData, LogEvent, MemoryRegion, SafepointData, TimesData};
use crate::data::grammar::{
    Derive,
    GrammarInstr,
    RegionNames,
    StampRule,
    CGN_AT_NS,
    CGN_COMBINED,
    CGN_DURATION_MS,
    CGN_DURATION_NS,
    CGN_DURATION_SECS,
    CGN_OLD,
    CGN_OPTIONS,
    CGN_PERM,
    CGN_PHYSICAL,
    CGN_PHYSICAL_FREE,
    CGN_REACHING_NS,
    CGN_REAL,
    CGN_SAFEPOINT,
    CGN_SWAP,
    CGN_SWAP_FREE,
    CGN_SYS,
    CGN_TRIGGER,
    CGN_USER,
    CGN_VERSION,
    CGN_YOUNG,
};
use crate::data::jdkmath::{
    convert_micros_to_millis,
    convert_millis_to_micros,
    convert_nanos_to_micros,
    convert_secs_to_centis,
    convert_secs_to_micros,
    convert_secs_to_millis,
};
use crate::data::memory::Memory;
use crate::data::trigger::GcTrigger;

use std::io::{Error, ErrorKind, Result};

use ::regex::Captures;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Signature of the extraction function of a [`GrammarInstr`].
pub type ExtractFn = fn(&GrammarInstr, &Captures, &str, &mut ExtractContext) -> Result<LogEvent>;

/// State shared by every extraction of one log.
#[derive(Clone, Debug, Default)]
pub struct ExtractContext {
    /// Reference instant for lines that carry only a datestamp.
    ///
    /// When `None`, the first datestamp-only line extracted becomes the
    /// reference (its timestamp is `0`).
    pub jvm_start: Option<DateTimeL>,
}

impl ExtractContext {
    pub fn new(jvm_start: Option<DateTimeL>) -> ExtractContext {
        ExtractContext { jvm_start }
    }
}

fn invalid(message: String) -> Error {
    Error::new(ErrorKind::InvalidData, message)
}

/// Milliseconds since JVM start of the matched line.
///
/// Precedence is uptime-millis, then uptime seconds, then datestamp.
pub fn resolve_timestamp(
    captures: &Captures,
    ctx: &mut ExtractContext,
) -> Result<Millis> {
    if let Some(m) = captures.name(CGN_UPTIMEMILLIS) {
        return m
            .as_str()
            .parse::<Millis>()
            .map_err(|err| invalid(format!("bad uptime millis {:?}: {}", m.as_str(), err)));
    }
    if let Some(m) = captures.name(CGN_UPTIME) {
        return convert_secs_to_millis(m.as_str());
    }
    if let Some(m) = captures.name(CGN_DATESTAMP) {
        let jvm_start: DateTimeL = match ctx.jvm_start {
            Some(dt) => dt,
            None => {
                let dt = datestamp_to_datetime(m.as_str())?;
                defo!("JVM start reference set to {}", dt);
                ctx.jvm_start = Some(dt);
                dt
            }
        };
        return datestamp_millis_since(m.as_str(), &jvm_start);
    }

    Err(invalid(String::from("no timestamp")))
}

/// The duration of the event in microseconds, if logged.
fn capture_duration(captures: &Captures) -> Result<Option<Micros>> {
    if let Some(m) = captures.name(CGN_DURATION_MS) {
        return Ok(Some(convert_millis_to_micros(m.as_str())?));
    }
    if let Some(m) = captures.name(CGN_DURATION_SECS) {
        return Ok(Some(convert_secs_to_micros(m.as_str())?));
    }
    if let Some(m) = captures.name(CGN_DURATION_NS) {
        let nanos: Nanos = m
            .as_str()
            .parse::<Nanos>()
            .map_err(|err| invalid(format!("bad nanoseconds {:?}: {}", m.as_str(), err)))?;
        return Ok(Some(convert_nanos_to_micros(nanos)));
    }

    Ok(None)
}

fn capture_nanos_as_micros(
    captures: &Captures,
    name: &str,
) -> Result<Micros> {
    let m = captures
        .name(name)
        .ok_or_else(|| invalid(format!("missing {}", name)))?;
    let nanos: Nanos = m
        .as_str()
        .parse::<Nanos>()
        .map_err(|err| invalid(format!("bad nanoseconds {:?}: {}", m.as_str(), err)))?;

    Ok(convert_nanos_to_micros(nanos))
}

fn capture_memory(
    captures: &Captures,
    name: &str,
) -> Result<Option<Memory>> {
    match captures.name(name) {
        Some(m) => Ok(Some(Memory::parse(m.as_str())?)),
        None => Ok(None),
    }
}

/// The region named by `names`, or `None` if no part of it was logged.
fn capture_region(
    captures: &Captures,
    names: &RegionNames,
) -> Result<Option<MemoryRegion>> {
    let region = MemoryRegion::new(
        capture_memory(captures, names[0])?,
        capture_memory(captures, names[1])?,
        capture_memory(captures, names[2])?,
    );
    if region.is_empty() {
        return Ok(None);
    }

    Ok(Some(region))
}

/// CPU times, if logged. All three must be present.
fn capture_times(captures: &Captures) -> Result<Option<TimesData>> {
    let user = match captures.name(CGN_USER) {
        Some(m) => convert_secs_to_centis(m.as_str())?,
        None => return Ok(None),
    };
    let sys = match captures.name(CGN_SYS) {
        Some(m) => convert_secs_to_centis(m.as_str())?,
        None => return Err(invalid(String::from("user time without sys time"))),
    };
    let real = match captures.name(CGN_REAL) {
        Some(m) => convert_secs_to_centis(m.as_str())?,
        None => return Err(invalid(String::from("user time without real time"))),
    };

    Ok(Some(TimesData::new(user, sys, real)))
}

fn capture_gc_id(captures: &Captures) -> Result<Option<GcId>> {
    match captures.name(CGN_GCID) {
        Some(m) => Ok(Some(
            m.as_str()
                .parse::<GcId>()
                .map_err(|err| invalid(format!("bad GC id {:?}: {}", m.as_str(), err)))?,
        )),
        None => Ok(None),
    }
}

/// `whole - part` for each present pair of parts.
fn region_difference(
    whole: &MemoryRegion,
    part: &MemoryRegion,
) -> MemoryRegion {
    let sub = |a: Option<Memory>, b: Option<Memory>| match (a, b) {
        (Some(a), Some(b)) => Some(a.saturating_sub(&b)),
        _ => None,
    };
    MemoryRegion::new(
        sub(whole.occupancy_init, part.occupancy_init),
        sub(whole.occupancy_end, part.occupancy_end),
        sub(whole.space, part.space),
    )
}

fn apply_derive(
    derive: Derive,
    event: &mut LogEvent,
) {
    match derive {
        Derive::Nothing => {}
        Derive::OldFromCombined => {
            if let (Some(combined), Some(young)) = (event.combined.as_ref(), event.young.as_ref()) {
                event.old = Some(region_difference(combined, young));
            }
        }
        Derive::YoungFromCombined => {
            if let (Some(combined), Some(old)) = (event.combined.as_ref(), event.old.as_ref()) {
                event.young = Some(region_difference(combined, old));
            }
        }
    }
}

/// Event timestamp per the [`StampRule`] of the grammar.
///
/// For end-stamped lines the start is the logged timestamp less the
/// duration (truncated to milliseconds), clamped at `0`.
fn stamp_event(
    instr: &GrammarInstr,
    captures: &Captures,
    duration: Option<Micros>,
    ctx: &mut ExtractContext,
) -> Result<Millis> {
    match instr.stamp {
        StampRule::NoStamp => Ok(0),
        StampRule::Start => resolve_timestamp(captures, ctx),
        StampRule::EndUnlessStartTag => {
            let logged: Millis = resolve_timestamp(captures, ctx)?;
            let start_tagged: bool = captures
                .name(CGN_TAGS)
                .map_or(false, |m| is_start_tags(m.as_str()));
            match duration {
                Some(duration) if !start_tagged => Ok((logged - convert_micros_to_millis(duration)).max(0)),
                _ => Ok(logged),
            }
        }
    }
}

/// The extraction used by most grammars: timestamp, duration, sequence id,
/// memory regions, trigger, and CPU times, whichever were captured.
pub fn extract_standard(
    instr: &GrammarInstr,
    captures: &Captures,
    line: &str,
    ctx: &mut ExtractContext,
) -> Result<LogEvent> {
    defn!("({:?}, {:?})", instr.kind, line);
    let duration: Option<Micros> = capture_duration(captures)?;
    let timestamp: Millis = stamp_event(instr, captures, duration, ctx)?;
    let mut event = LogEvent::new(instr.kind, timestamp, duration, String::from(line));
    event.gc_id = capture_gc_id(captures)?;
    event.young = capture_region(captures, &CGN_YOUNG)?;
    event.old = capture_region(captures, &CGN_OLD)?;
    event.perm = capture_region(captures, &CGN_PERM)?;
    event.combined = capture_region(captures, &CGN_COMBINED)?;
    event.trigger = captures
        .name(CGN_TRIGGER)
        .map(|m| GcTrigger::from_text(m.as_str()));
    event.times = capture_times(captures)?;
    apply_derive(instr.derive, &mut event);
    defx!("timestamp {}, duration {:?}", event.timestamp, event.duration);

    Ok(event)
}

/// Unified `[safepoint]` lines: standard data plus the operation name and
/// the reaching and at-safepoint times.
pub fn extract_safepoint(
    instr: &GrammarInstr,
    captures: &Captures,
    line: &str,
    ctx: &mut ExtractContext,
) -> Result<LogEvent> {
    let mut event = extract_standard(instr, captures, line, ctx)?;
    let name = captures
        .name(CGN_SAFEPOINT)
        .ok_or_else(|| invalid(String::from("missing safepoint name")))?;
    event.safepoint = Some(SafepointData {
        name: String::from(name.as_str()),
        reaching: capture_nanos_as_micros(captures, CGN_REACHING_NS)?,
        at: capture_nanos_as_micros(captures, CGN_AT_NS)?,
    });

    Ok(event)
}

fn capture_kilobytes_as_bytes(
    captures: &Captures,
    name: &str,
) -> Result<Bytes> {
    match captures.name(name) {
        Some(m) => {
            let kb: Bytes = m
                .as_str()
                .parse::<Bytes>()
                .map_err(|err| invalid(format!("bad kilobytes {:?}: {}", m.as_str(), err)))?;
            kb.checked_mul(1024)
                .ok_or_else(|| invalid(format!("kilobytes {} out of range", kb)))
        }
        None => Ok(BYTES_UNSET),
    }
}

/// The legacy `Memory: 4k page, physical ...` banner.
///
/// Swap is [`BYTES_UNSET`] when not logged.
pub fn extract_header_memory(
    instr: &GrammarInstr,
    captures: &Captures,
    line: &str,
    ctx: &mut ExtractContext,
) -> Result<LogEvent> {
    let mut event = extract_standard(instr, captures, line, ctx)?;
    event.header = Some(HeaderData::Memory {
        text: String::from(line.trim_end()),
        physical: capture_kilobytes_as_bytes(captures, CGN_PHYSICAL)?,
        physical_free: capture_kilobytes_as_bytes(captures, CGN_PHYSICAL_FREE)?,
        swap: capture_kilobytes_as_bytes(captures, CGN_SWAP)?,
        swap_free: capture_kilobytes_as_bytes(captures, CGN_SWAP_FREE)?,
    });

    Ok(event)
}

/// JVM version banners, legacy and unified.
pub fn extract_header_version(
    instr: &GrammarInstr,
    captures: &Captures,
    line: &str,
    ctx: &mut ExtractContext,
) -> Result<LogEvent> {
    let mut event = extract_standard(instr, captures, line, ctx)?;
    let version = captures
        .name(CGN_VERSION)
        .ok_or_else(|| invalid(String::from("missing version")))?;
    event.header = Some(HeaderData::Version(String::from(version.as_str())));

    Ok(event)
}

/// The legacy `CommandLine flags:` banner.
pub fn extract_header_options(
    instr: &GrammarInstr,
    captures: &Captures,
    line: &str,
    ctx: &mut ExtractContext,
) -> Result<LogEvent> {
    let mut event = extract_standard(instr, captures, line, ctx)?;
    let options = captures
        .name(CGN_OPTIONS)
        .ok_or_else(|| invalid(String::from("missing options")))?;
    event.header = Some(HeaderData::Options(String::from(options.as_str())));

    Ok(event)
}
