// src/readers/analysis.rs

//! Diagnostic keys derived from a finished [`EventStore`], and the pass that
//! derives them.
//!
//! Keys are stable strings so a reporting layer can look up its own text
//! for each one.

use crate::common::{Kilobytes, Millis};
use crate::data::event::{CollectorFamily, LogEventType};
use crate::data::memory::Memory;
use crate::readers::eventstore::EventStore;

use std::fmt;

use ::lazy_static::lazy_static;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// First blocking event later than this (milliseconds since JVM start)
/// suggests the log does not start at JVM start.
pub const FIRST_TIMESTAMP_THRESHOLD: Millis = 60_000;

/// GC pause time below this percentage of stopped time means most stopped
/// time is not GC related.
pub const GC_STOPPED_RATIO_THRESHOLD: i64 = 80;

/// Thread stack sizes above this are large.
pub const THREAD_STACK_SIZE_LARGE: Kilobytes = 1024;

/// A diagnostic key.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Analysis {
    FirstTimestampThresholdExceeded,
    /// Explicit GC with a concurrent collector (CMS, G1, Shenandoah, Z).
    ExplicitGcUnnecessaryCmsG1,
    /// Explicit GC with a non-concurrent collector.
    ExplicitGcUnnecessary,
    /// Explicit GC run by a serial collection.
    ExplicitGcSerial,
    ExplicitGcDisabled,
    ApplicationStoppedTimeMissing,
    GcStoppedRatio,
    ThreadStackSizeNotSet,
    ThreadStackSizeLarge,
    MinHeapNotEqualMaxHeap,
    PermMetaspaceNotSet,
    MinPermNotEqualMaxPerm,
    MinMetaspaceNotEqualMaxMetaspace,
    /// The throughput collector fell back to a serial old collection.
    ThroughputSerialGc,
    CmsSerialGc,
    G1SerialGc,
    SwapDisabled,
    ParallelismInverted,
}

impl Analysis {
    /// Stable string key.
    pub const fn key(&self) -> &'static str {
        match self {
            Analysis::FirstTimestampThresholdExceeded => "first.timestamp.threshold.exceeded",
            Analysis::ExplicitGcUnnecessaryCmsG1 => "explicit.gc.unnecessary.cms.g1",
            Analysis::ExplicitGcUnnecessary => "explicit.gc.unnecessary",
            Analysis::ExplicitGcSerial => "explicit.gc.serial",
            Analysis::ExplicitGcDisabled => "explicit.gc.disabled",
            Analysis::ApplicationStoppedTimeMissing => "application.stopped.time.missing",
            Analysis::GcStoppedRatio => "gc.stopped.ratio",
            Analysis::ThreadStackSizeNotSet => "thread.stack.size.not.set",
            Analysis::ThreadStackSizeLarge => "thread.stack.size.large",
            Analysis::MinHeapNotEqualMaxHeap => "min.heap.not.equal.max.heap",
            Analysis::PermMetaspaceNotSet => "perm.metaspace.not.set",
            Analysis::MinPermNotEqualMaxPerm => "min.perm.not.equal.max.perm",
            Analysis::MinMetaspaceNotEqualMaxMetaspace => "min.metaspace.not.equal.max.metaspace",
            Analysis::ThroughputSerialGc => "throughput.serial.gc",
            Analysis::CmsSerialGc => "cms.serial.gc",
            Analysis::G1SerialGc => "g1.serial.gc",
            Analysis::SwapDisabled => "swap.disabled",
            Analysis::ParallelismInverted => "parallelism.inverted",
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// JVM options
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

lazy_static! {
    static ref RE_XSS: Regex = Regex::new(r"-Xss(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_THREAD_STACK_SIZE: Regex = Regex::new(r"-XX:ThreadStackSize=(\d+[kKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_XMS: Regex = Regex::new(r"-Xms(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_XMX: Regex = Regex::new(r"-Xmx(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_INITIAL_HEAP_SIZE: Regex = Regex::new(r"-XX:InitialHeapSize=(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_MAX_HEAP_SIZE: Regex = Regex::new(r"-XX:MaxHeapSize=(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_PERM_SIZE: Regex = Regex::new(r"-XX:PermSize=(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_MAX_PERM_SIZE: Regex = Regex::new(r"-XX:MaxPermSize=(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_METASPACE_SIZE: Regex = Regex::new(r"-XX:MetaspaceSize=(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
    static ref RE_MAX_METASPACE_SIZE: Regex = Regex::new(r"-XX:MaxMetaspaceSize=(\d+[bBkKmMgG]?)(?:\s|$)").unwrap();
}

const OPTION_DISABLE_EXPLICIT_GC: &str = "-XX:+DisableExplicitGC";

/// Size of an option value in kilobytes. A value without a unit suffix is
/// in `bare_unit`.
fn option_size(
    options: &str,
    regex: &Regex,
    bare_unit: char,
) -> Option<Kilobytes> {
    let value: &str = regex.captures(options)?.get(1)?.as_str();
    let last: char = value.chars().last()?;
    let memory = if last.is_ascii_digit() {
        Memory::parse(format!("{}{}", value, bare_unit).as_str())
    } else {
        Memory::parse(value)
    };
    match memory {
        Ok(memory) => Some(memory.as_kilobytes()),
        Err(_err) => {
            defñ!("bad option size {:?}: {}", value, _err);
            None
        }
    }
}

/// First of the sizes that is set.
fn option_size_any(
    options: &str,
    choices: &[(&Regex, char)],
) -> Option<Kilobytes> {
    choices
        .iter()
        .find_map(|(regex, bare_unit)| option_size(options, regex, *bare_unit))
}

/// Keys derived from the JVM options string.
pub fn analyze_options(options: &str) -> Vec<Analysis> {
    defn!("({:?})", options);
    let mut keys: Vec<Analysis> = Vec::new();

    if options.contains(OPTION_DISABLE_EXPLICIT_GC) {
        keys.push(Analysis::ExplicitGcDisabled);
    }

    // -XX:ThreadStackSize is in kilobytes when bare
    match option_size_any(options, &[(&*RE_XSS, 'B'), (&*RE_THREAD_STACK_SIZE, 'K')]) {
        None => keys.push(Analysis::ThreadStackSizeNotSet),
        Some(kb) if kb > THREAD_STACK_SIZE_LARGE => keys.push(Analysis::ThreadStackSizeLarge),
        Some(_) => {}
    }

    let min_heap = option_size_any(options, &[(&*RE_XMS, 'B'), (&*RE_INITIAL_HEAP_SIZE, 'B')]);
    let max_heap = option_size_any(options, &[(&*RE_XMX, 'B'), (&*RE_MAX_HEAP_SIZE, 'B')]);
    if let (Some(min_heap), Some(max_heap)) = (min_heap, max_heap) {
        if min_heap != max_heap {
            keys.push(Analysis::MinHeapNotEqualMaxHeap);
        }
    }

    let perm = option_size(options, &RE_PERM_SIZE, 'B');
    let max_perm = option_size(options, &RE_MAX_PERM_SIZE, 'B');
    let metaspace = option_size(options, &RE_METASPACE_SIZE, 'B');
    let max_metaspace = option_size(options, &RE_MAX_METASPACE_SIZE, 'B');
    if perm.is_none() && max_perm.is_none() && metaspace.is_none() && max_metaspace.is_none() {
        keys.push(Analysis::PermMetaspaceNotSet);
    }
    if let (Some(perm), Some(max_perm)) = (perm, max_perm) {
        if perm != max_perm {
            keys.push(Analysis::MinPermNotEqualMaxPerm);
        }
    }
    if let (Some(metaspace), Some(max_metaspace)) = (metaspace, max_metaspace) {
        if metaspace != max_metaspace {
            keys.push(Analysis::MinMetaspaceNotEqualMaxMetaspace);
        }
    }
    defx!("{:?}", keys);

    keys
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// store analysis
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Key for an explicit GC run by an event of `kind`.
const fn explicit_gc_key(kind: LogEventType) -> Option<Analysis> {
    if kind.is_serial_collection() {
        return Some(Analysis::ExplicitGcSerial);
    }
    match kind.collector_family() {
        CollectorFamily::Cms | CollectorFamily::G1 | CollectorFamily::Shenandoah | CollectorFamily::Z => {
            Some(Analysis::ExplicitGcUnnecessaryCmsG1)
        }
        CollectorFamily::Serial | CollectorFamily::Parallel => Some(Analysis::ExplicitGcUnnecessary),
        CollectorFamily::Unknown => None,
    }
}

/// Key for a serial collection run in place of a concurrent or parallel one.
const fn serial_fallback_key(kind: LogEventType) -> Option<Analysis> {
    match kind {
        LogEventType::ParallelSerialOld => Some(Analysis::ThroughputSerialGc),
        LogEventType::CmsSerialOld => Some(Analysis::CmsSerialGc),
        LogEventType::G1FullGc => Some(Analysis::G1SerialGc),
        _ => None,
    }
}

/// Derive keys from the events and metadata held by `store`, in a fixed
/// order. The store is not modified.
pub fn analyze_store(store: &EventStore) -> Vec<Analysis> {
    defn!();
    let mut keys: Vec<Analysis> = Vec::new();
    let mut push = |key: Analysis| {
        if !keys.contains(&key) {
            keys.push(key);
        }
    };

    if let Some(first) = store.first_gc_event() {
        if first.timestamp() > FIRST_TIMESTAMP_THRESHOLD {
            push(Analysis::FirstTimestampThresholdExceeded);
        }
    }

    for event in store.blocking_events().iter() {
        if event.trigger().map_or(false, |t| t.is_explicit_gc()) {
            if let Some(key) = explicit_gc_key(event.kind()) {
                push(key);
            }
        }
        if let Some(key) = serial_fallback_key(event.kind()) {
            push(key);
        }
    }

    if store.count_blocking() > 0 && store.count_stopped() == 0 && store.count_safepoint() == 0 {
        push(Analysis::ApplicationStoppedTimeMissing);
    }

    let total_stopped: Millis = store.total_stopped_time();
    if total_stopped > 0 && store.total_gc_pause() * 100 / total_stopped < GC_STOPPED_RATIO_THRESHOLD {
        push(Analysis::GcStoppedRatio);
    }

    if store.swap() == 0 {
        push(Analysis::SwapDisabled);
    }

    if store.inverted_parallelism_count() > 0 {
        push(Analysis::ParallelismInverted);
    }

    if let Some(options) = store.options() {
        for key in analyze_options(options).into_iter() {
            push(key);
        }
    }
    defx!("{:?}", keys);

    keys
}
