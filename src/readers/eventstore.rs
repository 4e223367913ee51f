// src/readers/eventstore.rs

//! Implements an [`EventStore`], the system of record of one analysis run.
//!
//! Blocking events are held in ascending timestamp order. Safepoint and
//! stopped time events are held in arrival order. Every query is a pure
//! reduction over the held events that returns zero or `None` for an empty
//! store.
//!
//! Some state is fed in by the caller rather than computed here: inverted
//! parallelism counters, the parallel collection count, the maxima seen on
//! non-blocking events, and the JVM environment metadata.

use crate::common::{Bytes, Count, Kilobytes, Micros, Millis, BYTES_UNSET};
use crate::data::event::{CollectorFamily, EventCategory, LogEvent, LogEventType, MemoryRegion};
use crate::data::jdkmath::convert_micros_to_millis;
use crate::data::memory::Memory;
use crate::readers::analysis::Analysis;

use std::fmt;
use std::sync::{Arc, Mutex};

use ::min_max::max;
use ::si_trace_print::{defn, defo, defx, defñ};

/// An [`EventStore`] shared between threads.
///
/// Each run should have its own store; the `Mutex` guards the mutating
/// operations so a store can be handed to a worker thread.
pub type SharedEventStore = Arc<Mutex<EventStore>>;

/// Create a new, unused [`SharedEventStore`].
pub fn new_shared_store() -> SharedEventStore {
    Arc::new(Mutex::new(EventStore::new()))
}

/// The aggregation store.
#[derive(Clone)]
pub struct EventStore {
    /// Set while a run uses the store. Cleared by [`reset`].
    ///
    /// [`reset`]: EventStore::reset
    in_use: bool,
    /// Ordered by timestamp, non-decreasing.
    blocking_events: Vec<LogEvent>,
    safepoint_events: Vec<LogEvent>,
    stopped_time_events: Vec<LogEvent>,
    unidentified_log_lines: Vec<String>,
    /// Insertion ordered, no duplicates.
    analysis: Vec<Analysis>,
    /// Insertion ordered, no duplicates.
    collector_families: Vec<CollectorFamily>,
    /// Insertion ordered, no duplicates.
    event_types: Vec<LogEventType>,
    inverted_parallelism_count: Count,
    worst_inverted_parallelism_event: Option<LogEvent>,
    parallel_count: Count,
    max_heap_occupancy_non_blocking: Kilobytes,
    max_heap_space_non_blocking: Kilobytes,
    max_perm_occupancy_non_blocking: Kilobytes,
    max_perm_space_non_blocking: Kilobytes,
    memory: Option<String>,
    options: Option<String>,
    version: Option<String>,
    physical_memory: Bytes,
    physical_memory_free: Bytes,
    /// [`BYTES_UNSET`] until set, so an absent swap figure is not mistaken
    /// for disabled swap.
    swap: Bytes,
    swap_free: Bytes,
}

impl Default for EventStore {
    fn default() -> Self {
        EventStore::new()
    }
}

impl fmt::Debug for EventStore {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("EventStore")
            .field("in_use", &self.in_use)
            .field("blocking events", &self.blocking_events.len())
            .field("safepoint events", &self.safepoint_events.len())
            .field("stopped time events", &self.stopped_time_events.len())
            .field("unidentified lines", &self.unidentified_log_lines.len())
            .field("analysis", &self.analysis)
            .field("collector_families", &self.collector_families)
            .field("version", &self.version)
            .finish()
    }
}

/// `young + old` of an event with separate regions, `combined` of an event
/// with one region, else zero.
fn heap_figure(
    event: &LogEvent,
    part: fn(&MemoryRegion) -> Option<Memory>,
) -> Option<Memory> {
    if event.has_old_data() {
        let young: Option<Memory> = event.young().and_then(part);
        let old: Option<Memory> = event.old().and_then(part);
        Some(Memory::add_opt(young, old))
    } else if event.has_combined_data() {
        event.combined().and_then(part)
    } else {
        Some(Memory::ZERO)
    }
}

fn part_init(region: &MemoryRegion) -> Option<Memory> {
    region.occupancy_init
}

fn part_end(region: &MemoryRegion) -> Option<Memory> {
    region.occupancy_end
}

fn part_space(region: &MemoryRegion) -> Option<Memory> {
    region.space
}

/// Max duration of `events` in microseconds, zero when none.
fn max_duration(events: &[LogEvent]) -> Micros {
    events
        .iter()
        .filter_map(LogEvent::duration)
        .max()
        .unwrap_or(0)
}

/// Total duration of `events` in microseconds.
fn total_duration(events: &[LogEvent]) -> Micros {
    events
        .iter()
        .filter_map(LogEvent::duration)
        .sum()
}

/// The event of longest duration, first one wins a tie.
fn max_duration_event(events: &[LogEvent]) -> Option<&LogEvent> {
    let mut worst: Option<&LogEvent> = None;
    for event in events.iter() {
        let duration = match event.duration() {
            Some(duration) => duration,
            None => continue,
        };
        match worst {
            Some(w) if w.duration().unwrap_or(0) >= duration => {}
            _ => worst = Some(event),
        }
    }

    worst
}

impl EventStore {
    pub fn new() -> EventStore {
        EventStore {
            in_use: false,
            blocking_events: Vec::new(),
            safepoint_events: Vec::new(),
            stopped_time_events: Vec::new(),
            unidentified_log_lines: Vec::new(),
            analysis: Vec::new(),
            collector_families: Vec::new(),
            event_types: Vec::new(),
            inverted_parallelism_count: 0,
            worst_inverted_parallelism_event: None,
            parallel_count: 0,
            max_heap_occupancy_non_blocking: 0,
            max_heap_space_non_blocking: 0,
            max_perm_occupancy_non_blocking: 0,
            max_perm_space_non_blocking: 0,
            memory: None,
            options: None,
            version: None,
            physical_memory: 0,
            physical_memory_free: 0,
            swap: BYTES_UNSET,
            swap_free: 0,
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // run guard
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Is a run using this store?
    pub const fn is_in_use(&self) -> bool {
        self.in_use
    }

    /// Mark the store as used by a run.
    pub fn mark_in_use(&mut self) {
        self.in_use = true;
    }

    /// Clear the blocking events and the run guard.
    ///
    /// Everything else accumulated is kept; use a new `EventStore` for a
    /// fully isolated run.
    pub fn reset(&mut self) {
        defñ!("clear {} blocking events", self.blocking_events.len());
        self.blocking_events.clear();
        self.in_use = false;
    }

    /// Same as [`reset`](EventStore::reset).
    pub fn cleanup(&mut self) {
        self.reset();
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // insertion
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Insert an event by its category.
    ///
    /// Blocking events are inserted in timestamp order, after any held event
    /// of equal timestamp. Safepoint and stopped time events are appended.
    /// Other categories are not held. Reportable kinds are recorded in the
    /// event type and collector family sets.
    pub fn insert(
        &mut self,
        event: LogEvent,
    ) {
        defn!("({:?} @{})", event.kind(), event.timestamp());
        if event.is_reportable() {
            self.add_event_type(event.kind());
            self.add_collector_family(event.collector_family());
        }
        match event.category() {
            EventCategory::Blocking => self.add_blocking_event(event),
            EventCategory::Safepoint => self.add_safepoint_event(event),
            EventCategory::StoppedTime => self.add_stopped_time_event(event),
            EventCategory::Concurrent | EventCategory::Header | EventCategory::Informational => {
                defo!("not held");
            }
        }
        defx!();
    }

    /// Insertion point keeping `blocking_events` sorted and stable.
    fn insert_position(
        &self,
        timestamp: Millis,
    ) -> usize {
        match self.blocking_events.last() {
            Some(last) if last.timestamp() <= timestamp => self.blocking_events.len(),
            None => 0,
            Some(_) => self
                .blocking_events
                .partition_point(|e| e.timestamp() <= timestamp),
        }
    }

    pub fn add_blocking_event(
        &mut self,
        event: LogEvent,
    ) {
        let at: usize = self.insert_position(event.timestamp());
        defo!("insert at {} of {}", at, self.blocking_events.len());
        self.blocking_events.insert(at, event);
    }

    pub fn add_safepoint_event(
        &mut self,
        event: LogEvent,
    ) {
        self.safepoint_events.push(event);
    }

    pub fn add_stopped_time_event(
        &mut self,
        event: LogEvent,
    ) {
        self.stopped_time_events.push(event);
    }

    pub fn add_unidentified_log_line(
        &mut self,
        line: String,
    ) {
        self.unidentified_log_lines.push(line);
    }

    /// Add `analysis` unless already present.
    pub fn add_analysis(
        &mut self,
        analysis: Analysis,
    ) {
        if !self.analysis.contains(&analysis) {
            self.analysis.push(analysis);
        }
    }

    pub fn add_collector_family(
        &mut self,
        family: CollectorFamily,
    ) {
        if family != CollectorFamily::Unknown && !self.collector_families.contains(&family) {
            self.collector_families.push(family);
        }
    }

    pub fn add_event_type(
        &mut self,
        kind: LogEventType,
    ) {
        if !self.event_types.contains(&kind) {
            self.event_types.push(kind);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // event lists
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn blocking_events(&self) -> &[LogEvent] {
        self.blocking_events.as_slice()
    }

    /// Blocking events of one kind, in timestamp order.
    pub fn blocking_events_of(
        &self,
        kind: LogEventType,
    ) -> Vec<&LogEvent> {
        self.blocking_events
            .iter()
            .filter(|e| e.kind() == kind)
            .collect()
    }

    pub fn safepoint_events(&self) -> &[LogEvent] {
        self.safepoint_events.as_slice()
    }

    pub fn stopped_time_events(&self) -> &[LogEvent] {
        self.stopped_time_events.as_slice()
    }

    pub fn unidentified_log_lines(&self) -> &[String] {
        self.unidentified_log_lines.as_slice()
    }

    pub fn analysis(&self) -> &[Analysis] {
        self.analysis.as_slice()
    }

    pub fn collector_families(&self) -> &[CollectorFamily] {
        self.collector_families.as_slice()
    }

    pub fn event_types(&self) -> &[LogEventType] {
        self.event_types.as_slice()
    }

    pub fn count_blocking(&self) -> Count {
        self.blocking_events.len() as Count
    }

    pub fn count_safepoint(&self) -> Count {
        self.safepoint_events.len() as Count
    }

    pub fn count_stopped(&self) -> Count {
        self.stopped_time_events.len() as Count
    }

    pub fn first_gc_event(&self) -> Option<&LogEvent> {
        self.blocking_events.first()
    }

    pub fn last_gc_event(&self) -> Option<&LogEvent> {
        self.blocking_events.last()
    }

    /// The blocking event of longest duration.
    pub fn max_gc_event(&self) -> Option<&LogEvent> {
        max_duration_event(&self.blocking_events)
    }

    pub fn first_safepoint_event(&self) -> Option<&LogEvent> {
        self.safepoint_events.first()
    }

    pub fn last_safepoint_event(&self) -> Option<&LogEvent> {
        self.safepoint_events.last()
    }

    pub fn max_safepoint_event(&self) -> Option<&LogEvent> {
        max_duration_event(&self.safepoint_events)
    }

    pub fn first_stopped_event(&self) -> Option<&LogEvent> {
        self.stopped_time_events.first()
    }

    pub fn last_stopped_event(&self) -> Option<&LogEvent> {
        self.stopped_time_events.last()
    }

    pub fn max_stopped_event(&self) -> Option<&LogEvent> {
        max_duration_event(&self.stopped_time_events)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // pause reductions, milliseconds truncated
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn max_gc_pause(&self) -> Millis {
        convert_micros_to_millis(max_duration(&self.blocking_events))
    }

    /// Sum of blocking durations, converted once after summing.
    pub fn total_gc_pause(&self) -> Millis {
        convert_micros_to_millis(total_duration(&self.blocking_events))
    }

    pub fn max_safepoint_time(&self) -> Millis {
        convert_micros_to_millis(max_duration(&self.safepoint_events))
    }

    pub fn total_safepoint_time(&self) -> Millis {
        convert_micros_to_millis(total_duration(&self.safepoint_events))
    }

    pub fn max_stopped_time(&self) -> Millis {
        convert_micros_to_millis(max_duration(&self.stopped_time_events))
    }

    pub fn total_stopped_time(&self) -> Millis {
        convert_micros_to_millis(total_duration(&self.stopped_time_events))
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // memory reductions, kilobytes
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn max_heap_figure(
        &self,
        part: fn(&MemoryRegion) -> Option<Memory>,
    ) -> Kilobytes {
        self.blocking_events
            .iter()
            .filter_map(|e| heap_figure(e, part))
            .map(|m| m.as_kilobytes())
            .max()
            .unwrap_or(0)
    }

    /// Max of `part` of `region` over blocking events that have the region.
    fn max_region_figure(
        &self,
        region: fn(&LogEvent) -> Option<&MemoryRegion>,
        part: fn(&MemoryRegion) -> Option<Memory>,
    ) -> Kilobytes {
        self.blocking_events
            .iter()
            .filter_map(|e| region(e).and_then(part))
            .map(|m| m.as_kilobytes())
            .max()
            .unwrap_or(0)
    }

    /// Max heap occupancy before collection.
    pub fn max_heap_occupancy(&self) -> Kilobytes {
        self.max_heap_figure(part_init)
    }

    /// Max heap capacity.
    pub fn max_heap_space(&self) -> Kilobytes {
        self.max_heap_figure(part_space)
    }

    /// Max heap occupancy after collection, the greater of the separate
    /// regions and the combined region.
    pub fn max_heap_after_gc(&self) -> Kilobytes {
        let old_max: Kilobytes = self
            .blocking_events
            .iter()
            .filter(|e| e.has_old_data())
            .map(|e| {
                Memory::add_opt(
                    e.young().and_then(part_end),
                    e.old().and_then(part_end),
                )
                .as_kilobytes()
            })
            .max()
            .unwrap_or(0);
        let combined_max: Kilobytes = self.max_region_figure(LogEvent::combined, part_end);

        max!(old_max, combined_max)
    }

    pub fn max_old_space(&self) -> Kilobytes {
        self.max_region_figure(LogEvent::old, part_space)
    }

    pub fn max_young_space(&self) -> Kilobytes {
        self.max_region_figure(LogEvent::young, part_space)
    }

    pub fn max_perm_occupancy(&self) -> Kilobytes {
        self.max_region_figure(LogEvent::perm, part_init)
    }

    pub fn max_perm_after_gc(&self) -> Kilobytes {
        self.max_region_figure(LogEvent::perm, part_end)
    }

    pub fn max_perm_space(&self) -> Kilobytes {
        self.max_region_figure(LogEvent::perm, part_space)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // state fed in by the caller
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub const fn inverted_parallelism_count(&self) -> Count {
        self.inverted_parallelism_count
    }

    pub fn set_inverted_parallelism_count(
        &mut self,
        count: Count,
    ) {
        self.inverted_parallelism_count = count;
    }

    pub fn worst_inverted_parallelism_event(&self) -> Option<&LogEvent> {
        self.worst_inverted_parallelism_event.as_ref()
    }

    pub fn set_worst_inverted_parallelism_event(
        &mut self,
        event: Option<LogEvent>,
    ) {
        self.worst_inverted_parallelism_event = event;
    }

    pub const fn parallel_count(&self) -> Count {
        self.parallel_count
    }

    pub fn set_parallel_count(
        &mut self,
        count: Count,
    ) {
        self.parallel_count = count;
    }

    pub const fn max_heap_occupancy_non_blocking(&self) -> Kilobytes {
        self.max_heap_occupancy_non_blocking
    }

    pub fn set_max_heap_occupancy_non_blocking(
        &mut self,
        kb: Kilobytes,
    ) {
        self.max_heap_occupancy_non_blocking = kb;
    }

    pub const fn max_heap_space_non_blocking(&self) -> Kilobytes {
        self.max_heap_space_non_blocking
    }

    pub fn set_max_heap_space_non_blocking(
        &mut self,
        kb: Kilobytes,
    ) {
        self.max_heap_space_non_blocking = kb;
    }

    pub const fn max_perm_occupancy_non_blocking(&self) -> Kilobytes {
        self.max_perm_occupancy_non_blocking
    }

    pub fn set_max_perm_occupancy_non_blocking(
        &mut self,
        kb: Kilobytes,
    ) {
        self.max_perm_occupancy_non_blocking = kb;
    }

    pub const fn max_perm_space_non_blocking(&self) -> Kilobytes {
        self.max_perm_space_non_blocking
    }

    pub fn set_max_perm_space_non_blocking(
        &mut self,
        kb: Kilobytes,
    ) {
        self.max_perm_space_non_blocking = kb;
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // environment metadata
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// The `Memory:` banner, opaque.
    pub fn memory(&self) -> Option<&str> {
        self.memory.as_deref()
    }

    pub fn set_memory(
        &mut self,
        memory: String,
    ) {
        self.memory = Some(memory);
    }

    pub fn options(&self) -> Option<&str> {
        self.options.as_deref()
    }

    pub fn set_options(
        &mut self,
        options: String,
    ) {
        self.options = Some(options);
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(
        &mut self,
        version: String,
    ) {
        self.version = Some(version);
    }

    pub const fn physical_memory(&self) -> Bytes {
        self.physical_memory
    }

    pub fn set_physical_memory(
        &mut self,
        bytes: Bytes,
    ) {
        self.physical_memory = bytes;
    }

    pub const fn physical_memory_free(&self) -> Bytes {
        self.physical_memory_free
    }

    pub fn set_physical_memory_free(
        &mut self,
        bytes: Bytes,
    ) {
        self.physical_memory_free = bytes;
    }

    pub const fn swap(&self) -> Bytes {
        self.swap
    }

    pub fn set_swap(
        &mut self,
        bytes: Bytes,
    ) {
        self.swap = bytes;
    }

    pub const fn swap_free(&self) -> Bytes {
        self.swap_free
    }

    pub fn set_swap_free(
        &mut self,
        bytes: Bytes,
    ) {
        self.swap_free = bytes;
    }
}
