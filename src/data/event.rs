// src/data/event.rs

//! Implements [`LogEvent`], one classified and extracted logical line of a
//! GC log, and the enumerations describing it: [`LogEventType`],
//! [`CollectorFamily`], [`EventCategory`].
//!
//! A `LogEvent` is one struct for every kind of event. What an event can
//! report (young generation, old generation, perm/metaspace, combined heap,
//! trigger, CPU times) is held in optional capability fields. Queries test for
//! the presence of a capability, e.g. [`LogEvent::has_old_data`], rather than
//! for the kind.

use crate::common::{Bytes, Centis, GcId, Micros, Millis, Parallelism};
use crate::data::jdkmath::calc_parallelism;
use crate::data::memory::Memory;
use crate::data::trigger::GcTrigger;

use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CollectorFamily, EventCategory
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The garbage collector that logged an event.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CollectorFamily {
    Serial,
    Parallel,
    Cms,
    G1,
    Shenandoah,
    Z,
    /// Lines any collector may log, e.g. safepoints or banners.
    Unknown,
}

/// How an event participates in aggregation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventCategory {
    /// A pause of all application threads for collection.
    Blocking,
    /// A concurrent collector phase, application threads keep running.
    Concurrent,
    /// A unified logging safepoint line.
    Safepoint,
    /// A "Total time for which application threads were stopped" line.
    StoppedTime,
    /// JVM banners and `Using <collector>` lines.
    Header,
    /// Detail lines that carry no statistics.
    Informational,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogEventType
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Every kind of line the grammar registry can identify.
///
/// Legacy kinds come from `-verbose:gc`/`-XX:+PrintGCDetails` logging,
/// `Unified*`, `Shenandoah*`, and `Z*` kinds from JDK9+ `-Xlog:gc*`.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LogEventType {
    // informational
    BlankLine,
    TenuringDistribution,
    ApplicationConcurrentTime,
    UnifiedFooter,
    // headers
    HeaderVersion,
    HeaderMemory,
    HeaderCommandLineFlags,
    UnifiedHeader,
    UnifiedHeaderVersion,
    UsingSerial,
    UsingParallel,
    UsingCms,
    UsingG1,
    UsingShenandoah,
    UsingZ,
    // legacy blocking
    SerialNew,
    SerialOld,
    ParallelScavenge,
    ParallelSerialOld,
    ParallelCompactingOld,
    ParNew,
    CmsSerialOld,
    CmsInitialMark,
    CmsRemark,
    G1YoungPause,
    G1YoungInitialMark,
    G1MixedPause,
    G1FullGc,
    G1Remark,
    G1Cleanup,
    // legacy concurrent
    CmsConcurrent,
    G1Concurrent,
    // stopped time
    ApplicationStoppedTime,
    // unified blocking
    UnifiedSerialNew,
    UnifiedSerialOld,
    UnifiedParallelScavenge,
    UnifiedParallelCompactingOld,
    UnifiedParNew,
    UnifiedCmsInitialMark,
    UnifiedYoung,
    UnifiedOld,
    UnifiedRemark,
    UnifiedG1YoungPause,
    UnifiedG1MixedPause,
    UnifiedG1YoungInitialMark,
    UnifiedG1Cleanup,
    UnifiedG1FullGc,
    ShenandoahInitMark,
    ShenandoahFinalMark,
    ShenandoahInitUpdate,
    ShenandoahFinalUpdate,
    ShenandoahFullGc,
    ZMarkStart,
    ZMarkEnd,
    ZRelocateStart,
    ZMarkStartYoung,
    ZMarkEndYoung,
    ZRelocateStartYoung,
    ZMarkStartOld,
    ZMarkEndOld,
    ZRelocateStartOld,
    // unified concurrent
    UnifiedConcurrent,
    ShenandoahConcurrent,
    ZCollection,
    // unified safepoint
    UnifiedSafepoint,
}

impl LogEventType {
    pub const fn category(&self) -> EventCategory {
        match self {
            LogEventType::BlankLine
            | LogEventType::TenuringDistribution
            | LogEventType::ApplicationConcurrentTime
            | LogEventType::UnifiedFooter => EventCategory::Informational,
            LogEventType::HeaderVersion
            | LogEventType::HeaderMemory
            | LogEventType::HeaderCommandLineFlags
            | LogEventType::UnifiedHeader
            | LogEventType::UnifiedHeaderVersion
            | LogEventType::UsingSerial
            | LogEventType::UsingParallel
            | LogEventType::UsingCms
            | LogEventType::UsingG1
            | LogEventType::UsingShenandoah
            | LogEventType::UsingZ => EventCategory::Header,
            LogEventType::CmsConcurrent
            | LogEventType::G1Concurrent
            | LogEventType::UnifiedConcurrent
            | LogEventType::ShenandoahConcurrent
            | LogEventType::ZCollection => EventCategory::Concurrent,
            LogEventType::ApplicationStoppedTime => EventCategory::StoppedTime,
            LogEventType::UnifiedSafepoint => EventCategory::Safepoint,
            _ => EventCategory::Blocking,
        }
    }

    /// Did the event pause all application threads for collection?
    pub const fn is_blocking(&self) -> bool {
        matches!(self.category(), EventCategory::Blocking)
    }

    /// Does the kind contribute to the reported list of event kinds?
    ///
    /// Blank lines, banners, and application concurrent time lines are
    /// identified but not reported.
    pub const fn is_reportable(&self) -> bool {
        !matches!(
            self,
            LogEventType::BlankLine
                | LogEventType::ApplicationConcurrentTime
                | LogEventType::UnifiedFooter
                | LogEventType::HeaderVersion
                | LogEventType::HeaderMemory
                | LogEventType::HeaderCommandLineFlags
                | LogEventType::UnifiedHeader
                | LogEventType::UnifiedHeaderVersion
        )
    }

    pub const fn collector_family(&self) -> CollectorFamily {
        match self {
            LogEventType::UsingSerial
            | LogEventType::SerialNew
            | LogEventType::SerialOld
            | LogEventType::UnifiedSerialNew
            | LogEventType::UnifiedSerialOld => CollectorFamily::Serial,
            LogEventType::UsingParallel
            | LogEventType::ParallelScavenge
            | LogEventType::ParallelSerialOld
            | LogEventType::ParallelCompactingOld
            | LogEventType::UnifiedParallelScavenge
            | LogEventType::UnifiedParallelCompactingOld => CollectorFamily::Parallel,
            LogEventType::UsingCms
            | LogEventType::ParNew
            | LogEventType::CmsSerialOld
            | LogEventType::CmsInitialMark
            | LogEventType::CmsRemark
            | LogEventType::CmsConcurrent
            | LogEventType::UnifiedParNew
            | LogEventType::UnifiedCmsInitialMark => CollectorFamily::Cms,
            LogEventType::UsingG1
            | LogEventType::G1YoungPause
            | LogEventType::G1YoungInitialMark
            | LogEventType::G1MixedPause
            | LogEventType::G1FullGc
            | LogEventType::G1Remark
            | LogEventType::G1Cleanup
            | LogEventType::G1Concurrent
            | LogEventType::UnifiedG1YoungPause
            | LogEventType::UnifiedG1MixedPause
            | LogEventType::UnifiedG1YoungInitialMark
            | LogEventType::UnifiedG1Cleanup
            | LogEventType::UnifiedG1FullGc => CollectorFamily::G1,
            LogEventType::UsingShenandoah
            | LogEventType::ShenandoahInitMark
            | LogEventType::ShenandoahFinalMark
            | LogEventType::ShenandoahInitUpdate
            | LogEventType::ShenandoahFinalUpdate
            | LogEventType::ShenandoahFullGc
            | LogEventType::ShenandoahConcurrent => CollectorFamily::Shenandoah,
            LogEventType::UsingZ
            | LogEventType::ZMarkStart
            | LogEventType::ZMarkEnd
            | LogEventType::ZRelocateStart
            | LogEventType::ZMarkStartYoung
            | LogEventType::ZMarkEndYoung
            | LogEventType::ZRelocateStartYoung
            | LogEventType::ZMarkStartOld
            | LogEventType::ZMarkEndOld
            | LogEventType::ZRelocateStartOld
            | LogEventType::ZCollection => CollectorFamily::Z,
            _ => CollectorFamily::Unknown,
        }
    }

    /// Logged by JDK9+ unified logging.
    pub const fn is_unified(&self) -> bool {
        matches!(
            self,
            LogEventType::UnifiedFooter
                | LogEventType::UnifiedHeader
                | LogEventType::UnifiedHeaderVersion
                | LogEventType::UsingSerial
                | LogEventType::UsingParallel
                | LogEventType::UsingCms
                | LogEventType::UsingG1
                | LogEventType::UsingShenandoah
                | LogEventType::UsingZ
                | LogEventType::UnifiedSerialNew
                | LogEventType::UnifiedSerialOld
                | LogEventType::UnifiedParallelScavenge
                | LogEventType::UnifiedParallelCompactingOld
                | LogEventType::UnifiedParNew
                | LogEventType::UnifiedCmsInitialMark
                | LogEventType::UnifiedYoung
                | LogEventType::UnifiedOld
                | LogEventType::UnifiedRemark
                | LogEventType::UnifiedG1YoungPause
                | LogEventType::UnifiedG1MixedPause
                | LogEventType::UnifiedG1YoungInitialMark
                | LogEventType::UnifiedG1Cleanup
                | LogEventType::UnifiedG1FullGc
                | LogEventType::ShenandoahInitMark
                | LogEventType::ShenandoahFinalMark
                | LogEventType::ShenandoahInitUpdate
                | LogEventType::ShenandoahFinalUpdate
                | LogEventType::ShenandoahFullGc
                | LogEventType::ShenandoahConcurrent
                | LogEventType::ZMarkStart
                | LogEventType::ZMarkEnd
                | LogEventType::ZRelocateStart
                | LogEventType::ZMarkStartYoung
                | LogEventType::ZMarkEndYoung
                | LogEventType::ZRelocateStartYoung
                | LogEventType::ZMarkStartOld
                | LogEventType::ZMarkEndOld
                | LogEventType::ZRelocateStartOld
                | LogEventType::ZCollection
                | LogEventType::UnifiedConcurrent
                | LogEventType::UnifiedSafepoint
        )
    }

    /// A collection done by multiple worker threads, so its CPU times are
    /// expected to exceed wall clock time.
    pub const fn is_parallel_collection(&self) -> bool {
        matches!(
            self,
            LogEventType::ParallelScavenge
                | LogEventType::ParallelCompactingOld
                | LogEventType::ParNew
                | LogEventType::CmsInitialMark
                | LogEventType::CmsRemark
                | LogEventType::G1YoungPause
                | LogEventType::G1YoungInitialMark
                | LogEventType::G1MixedPause
                | LogEventType::G1Remark
                | LogEventType::G1Cleanup
                | LogEventType::UnifiedParallelScavenge
                | LogEventType::UnifiedParallelCompactingOld
                | LogEventType::UnifiedParNew
                | LogEventType::UnifiedCmsInitialMark
                | LogEventType::UnifiedRemark
                | LogEventType::UnifiedG1YoungPause
                | LogEventType::UnifiedG1MixedPause
                | LogEventType::UnifiedG1YoungInitialMark
                | LogEventType::UnifiedG1Cleanup
                | LogEventType::UnifiedG1FullGc
        )
    }

    /// A single threaded full collection of the old generation.
    pub const fn is_serial_collection(&self) -> bool {
        matches!(
            self,
            LogEventType::SerialOld
                | LogEventType::UnifiedSerialOld
                | LogEventType::ParallelSerialOld
                | LogEventType::CmsSerialOld
                | LogEventType::G1FullGc
        )
    }
}

impl fmt::Display for LogEventType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// capability data
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Occupancy of one memory region before and after an event, and the
/// region's capacity. Each part is `None` when not logged.
///
/// Logs are sometimes internally inconsistent (occupancy larger than
/// capacity). Values are stored as logged.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MemoryRegion {
    pub occupancy_init: Option<Memory>,
    pub occupancy_end: Option<Memory>,
    pub space: Option<Memory>,
}

impl MemoryRegion {
    pub const fn new(
        occupancy_init: Option<Memory>,
        occupancy_end: Option<Memory>,
        space: Option<Memory>,
    ) -> MemoryRegion {
        MemoryRegion { occupancy_init, occupancy_end, space }
    }

    pub const fn is_empty(&self) -> bool {
        self.occupancy_init.is_none() && self.occupancy_end.is_none() && self.space.is_none()
    }
}

/// CPU times of a collection in centiseconds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimesData {
    pub user: Centis,
    pub sys: Centis,
    pub real: Centis,
}

impl TimesData {
    pub const fn new(
        user: Centis,
        sys: Centis,
        real: Centis,
    ) -> TimesData {
        TimesData { user, sys, real }
    }

    /// See [`calc_parallelism`].
    pub fn parallelism(&self) -> Parallelism {
        calc_parallelism(self.user, self.sys, self.real)
    }
}

/// Safepoint detail from a unified `[safepoint]` line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SafepointData {
    /// The VM operation, e.g. `ICBufferFull`.
    pub name: String,
    /// Time to reach the safepoint.
    pub reaching: Micros,
    /// Time spent at the safepoint.
    pub at: Micros,
}

/// JVM environment metadata carried by banner lines.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HeaderData {
    /// The JVM version banner text.
    Version(String),
    /// The JVM options string.
    Options(String),
    /// The legacy `Memory:` banner.
    Memory {
        text: String,
        physical: Bytes,
        physical_free: Bytes,
        swap: Bytes,
        swap_free: Bytes,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogEvent
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One identified logical line.
///
/// Built once by the extractor. Only the perm/metaspace region and the
/// trigger may be overwritten afterwards, see [`set_perm`] and
/// [`set_trigger`].
///
/// [`set_perm`]: LogEvent::set_perm
/// [`set_trigger`]: LogEvent::set_trigger
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogEvent {
    pub(crate) kind: LogEventType,
    /// Start of the event, milliseconds since JVM start.
    pub(crate) timestamp: Millis,
    /// `None` for events that have no duration (banners, markers).
    pub(crate) duration: Option<Micros>,
    pub(crate) text: String,
    pub(crate) gc_id: Option<GcId>,
    pub(crate) young: Option<MemoryRegion>,
    pub(crate) old: Option<MemoryRegion>,
    pub(crate) perm: Option<MemoryRegion>,
    pub(crate) combined: Option<MemoryRegion>,
    pub(crate) trigger: Option<GcTrigger>,
    pub(crate) times: Option<TimesData>,
    pub(crate) safepoint: Option<SafepointData>,
    pub(crate) header: Option<HeaderData>,
}

impl LogEvent {
    /// A new `LogEvent` with no capability data.
    pub fn new(
        kind: LogEventType,
        timestamp: Millis,
        duration: Option<Micros>,
        text: String,
    ) -> LogEvent {
        LogEvent {
            kind,
            timestamp,
            duration,
            text,
            gc_id: None,
            young: None,
            old: None,
            perm: None,
            combined: None,
            trigger: None,
            times: None,
            safepoint: None,
            header: None,
        }
    }

    pub const fn kind(&self) -> LogEventType {
        self.kind
    }

    pub const fn timestamp(&self) -> Millis {
        self.timestamp
    }

    pub const fn duration(&self) -> Option<Micros> {
        self.duration
    }

    /// The logical line the event was extracted from.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub const fn gc_id(&self) -> Option<GcId> {
        self.gc_id
    }

    pub const fn is_blocking(&self) -> bool {
        self.kind.is_blocking()
    }

    pub const fn is_reportable(&self) -> bool {
        self.kind.is_reportable()
    }

    pub const fn category(&self) -> EventCategory {
        self.kind.category()
    }

    pub const fn collector_family(&self) -> CollectorFamily {
        self.kind.collector_family()
    }

    pub const fn young(&self) -> Option<&MemoryRegion> {
        self.young.as_ref()
    }

    pub const fn old(&self) -> Option<&MemoryRegion> {
        self.old.as_ref()
    }

    pub const fn perm(&self) -> Option<&MemoryRegion> {
        self.perm.as_ref()
    }

    pub const fn combined(&self) -> Option<&MemoryRegion> {
        self.combined.as_ref()
    }

    pub const fn trigger(&self) -> Option<&GcTrigger> {
        self.trigger.as_ref()
    }

    pub const fn times(&self) -> Option<&TimesData> {
        self.times.as_ref()
    }

    pub const fn safepoint(&self) -> Option<&SafepointData> {
        self.safepoint.as_ref()
    }

    pub const fn header(&self) -> Option<&HeaderData> {
        self.header.as_ref()
    }

    pub const fn has_young_data(&self) -> bool {
        self.young.is_some()
    }

    /// Reports separate old (and usually young) generation regions.
    pub const fn has_old_data(&self) -> bool {
        self.old.is_some()
    }

    pub const fn has_perm_data(&self) -> bool {
        self.perm.is_some()
    }

    /// Reports young and old as one region.
    pub const fn has_combined_data(&self) -> bool {
        self.combined.is_some()
    }

    pub const fn has_times_data(&self) -> bool {
        self.times.is_some()
    }

    /// Parallelism when CPU times were logged.
    pub fn parallelism(&self) -> Option<Parallelism> {
        self.times.as_ref().map(TimesData::parallelism)
    }

    /// Overwrite the perm/metaspace region.
    pub fn set_perm(
        &mut self,
        perm: MemoryRegion,
    ) {
        self.perm = Some(perm);
    }

    /// Overwrite the trigger.
    pub fn set_trigger(
        &mut self,
        trigger: GcTrigger,
    ) {
        self.trigger = Some(trigger);
    }
}
