// src/tests/eventstore_tests.rs

//! tests for `eventstore.rs`

#![allow(non_snake_case)]

use crate::common::{Kilobytes, Micros, Millis, BYTES_UNSET};
use crate::data::event::{CollectorFamily, LogEvent, LogEventType, MemoryRegion};
use crate::data::memory::Memory;
use crate::readers::analysis::Analysis;
use crate::readers::eventstore::{new_shared_store, EventStore};

use ::si_trace_print::stack::stack_offset_set;

fn event(
    kind: LogEventType,
    timestamp: Millis,
    duration: Micros,
    text: &str,
) -> LogEvent {
    LogEvent::new(kind, timestamp, Some(duration), String::from(text))
}

fn region(
    init: Kilobytes,
    end: Kilobytes,
    space: Kilobytes,
) -> Option<MemoryRegion> {
    Some(MemoryRegion::new(
        Some(Memory::kilobytes(init)),
        Some(Memory::kilobytes(end)),
        Some(Memory::kilobytes(space)),
    ))
}

fn texts(store: &EventStore) -> Vec<&str> {
    store.blocking_events().iter().map(|e| e.text()).collect()
}

#[test]
fn test_EventStore_empty() {
    let store = EventStore::new();
    assert!(!store.is_in_use());
    assert_eq!(store.count_blocking(), 0);
    assert_eq!(store.count_safepoint(), 0);
    assert_eq!(store.count_stopped(), 0);
    assert!(store.first_gc_event().is_none());
    assert!(store.last_gc_event().is_none());
    assert!(store.max_gc_event().is_none());
    assert!(store.max_safepoint_event().is_none());
    assert!(store.max_stopped_event().is_none());
    assert_eq!(store.max_gc_pause(), 0);
    assert_eq!(store.total_gc_pause(), 0);
    assert_eq!(store.total_safepoint_time(), 0);
    assert_eq!(store.total_stopped_time(), 0);
    assert_eq!(store.max_heap_occupancy(), 0);
    assert_eq!(store.max_heap_space(), 0);
    assert_eq!(store.max_heap_after_gc(), 0);
    assert_eq!(store.max_perm_space(), 0);
    assert_eq!(store.swap(), BYTES_UNSET);
    assert_eq!(store.physical_memory(), 0);
    assert!(store.version().is_none());
    assert!(store.analysis().is_empty());
}

#[test]
fn test_insert_sorted() {
    stack_offset_set(Some(2));
    let mut store = EventStore::new();
    store.insert(event(LogEventType::ParallelScavenge, 30, 1000, "c"));
    store.insert(event(LogEventType::ParallelScavenge, 10, 1000, "a"));
    store.insert(event(LogEventType::ParallelScavenge, 20, 1000, "b"));
    assert_eq!(texts(&store), vec!["a", "b", "c"]);
    assert_eq!(store.first_gc_event().unwrap().timestamp(), 10);
    assert_eq!(store.last_gc_event().unwrap().timestamp(), 30);
}

#[test]
fn test_insert_equal_timestamps_stable() {
    let mut store = EventStore::new();
    store.insert(event(LogEventType::ParallelScavenge, 10, 1000, "a"));
    store.insert(event(LogEventType::ParallelScavenge, 10, 1000, "b"));
    store.insert(event(LogEventType::ParallelScavenge, 5, 1000, "c"));
    store.insert(event(LogEventType::ParallelScavenge, 10, 1000, "d"));
    store.insert(event(LogEventType::ParallelScavenge, 7, 1000, "e"));
    assert_eq!(texts(&store), vec!["c", "e", "a", "b", "d"]);
}

#[test]
fn test_insert_routes_by_category() {
    let mut store = EventStore::new();
    store.insert(event(LogEventType::UnifiedG1YoungPause, 10, 1000, "blocking"));
    store.insert(event(LogEventType::UnifiedSafepoint, 11, 80, "safepoint"));
    store.insert(event(LogEventType::ApplicationStoppedTime, 12, 654, "stopped"));
    store.insert(event(LogEventType::UnifiedConcurrent, 13, 5000, "concurrent"));
    store.insert(LogEvent::new(LogEventType::BlankLine, 0, None, String::new()));
    store.insert(LogEvent::new(LogEventType::UsingG1, 0, None, String::from("Using G1")));
    assert_eq!(store.count_blocking(), 1);
    assert_eq!(store.count_safepoint(), 1);
    assert_eq!(store.count_stopped(), 1);
    assert_eq!(
        store.event_types(),
        &[
            LogEventType::UnifiedG1YoungPause,
            LogEventType::UnifiedSafepoint,
            LogEventType::ApplicationStoppedTime,
            LogEventType::UnifiedConcurrent,
            LogEventType::UsingG1,
        ]
    );
    assert_eq!(store.collector_families(), &[CollectorFamily::G1]);
}

#[test]
fn test_blocking_events_of() {
    let mut store = EventStore::new();
    store.insert(event(LogEventType::ParNew, 10, 1000, "a"));
    store.insert(event(LogEventType::CmsRemark, 20, 1000, "b"));
    store.insert(event(LogEventType::ParNew, 30, 1000, "c"));
    let parnew: Vec<&str> = store
        .blocking_events_of(LogEventType::ParNew)
        .iter()
        .map(|e| e.text())
        .collect();
    assert_eq!(parnew, vec!["a", "c"]);
    assert!(store.blocking_events_of(LogEventType::SerialNew).is_empty());
}

#[test]
fn test_total_gc_pause_truncated_after_sum() {
    let mut store = EventStore::new();
    store.insert(event(LogEventType::UnifiedRemark, 7943, 1767, "a"));
    store.insert(event(LogEventType::UnifiedRemark, 8943, 1767, "b"));
    assert_eq!(store.total_gc_pause(), 3);
    assert_eq!(store.max_gc_pause(), 1);
}

#[test]
fn test_max_gc_event_first_wins_tie() {
    let mut store = EventStore::new();
    store.insert(event(LogEventType::UnifiedYoung, 10, 500, "short"));
    store.insert(event(LogEventType::UnifiedYoung, 20, 2000, "long 1"));
    store.insert(event(LogEventType::UnifiedYoung, 30, 2000, "long 2"));
    assert_eq!(store.max_gc_event().unwrap().text(), "long 1");
}

#[test]
fn test_stopped_and_safepoint_times() {
    let mut store = EventStore::new();
    store.insert(event(LogEventType::ApplicationStoppedTime, 100, 654, "s1"));
    store.insert(event(LogEventType::ApplicationStoppedTime, 50, 2500, "s2"));
    store.insert(event(LogEventType::UnifiedSafepoint, 10, 81, "p1"));
    // arrival order, not sorted
    assert_eq!(store.first_stopped_event().unwrap().text(), "s1");
    assert_eq!(store.last_stopped_event().unwrap().text(), "s2");
    assert_eq!(store.max_stopped_event().unwrap().text(), "s2");
    assert_eq!(store.total_stopped_time(), 3);
    assert_eq!(store.max_stopped_time(), 2);
    assert_eq!(store.total_safepoint_time(), 0);
    assert_eq!(store.first_safepoint_event().unwrap().text(), "p1");
}

#[test]
fn test_heap_maxima() {
    let mut store = EventStore::new();
    let mut separate = event(LogEventType::ParallelScavenge, 10, 1000, "separate");
    separate.young = region(100, 10, 200);
    separate.old = region(300, 310, 1000);
    separate.perm = region(20, 25, 64);
    store.insert(separate);
    let mut combined = event(LogEventType::UnifiedYoung, 20, 1000, "combined");
    combined.combined = region(500, 50, 1100);
    store.insert(combined);

    assert_eq!(store.max_heap_occupancy(), 500);
    assert_eq!(store.max_heap_space(), 1200);
    assert_eq!(store.max_heap_after_gc(), 320);
    assert_eq!(store.max_old_space(), 1000);
    assert_eq!(store.max_young_space(), 200);
    assert_eq!(store.max_perm_occupancy(), 20);
    assert_eq!(store.max_perm_after_gc(), 25);
    assert_eq!(store.max_perm_space(), 64);
}

#[test]
fn test_add_analysis_no_duplicates() {
    let mut store = EventStore::new();
    store.add_analysis(Analysis::SwapDisabled);
    store.add_analysis(Analysis::GcStoppedRatio);
    store.add_analysis(Analysis::SwapDisabled);
    assert_eq!(store.analysis(), &[Analysis::SwapDisabled, Analysis::GcStoppedRatio]);
}

#[test]
fn test_add_collector_family_ignores_unknown() {
    let mut store = EventStore::new();
    store.add_collector_family(CollectorFamily::Unknown);
    store.add_collector_family(CollectorFamily::Cms);
    store.add_collector_family(CollectorFamily::Cms);
    assert_eq!(store.collector_families(), &[CollectorFamily::Cms]);
}

#[test]
fn test_reset() {
    let mut store = EventStore::new();
    store.mark_in_use();
    store.insert(event(LogEventType::ParNew, 10, 1000, "a"));
    store.insert(event(LogEventType::ApplicationStoppedTime, 10, 1000, "s"));
    assert!(store.is_in_use());
    store.reset();
    assert!(!store.is_in_use());
    assert_eq!(store.count_blocking(), 0);
    assert_eq!(store.count_stopped(), 1);
}

#[test]
fn test_metadata_setters() {
    let mut store = EventStore::new();
    store.set_version(String::from("OpenJDK 64-Bit Server VM"));
    store.set_options(String::from("-Xmx1g"));
    store.set_memory(String::from("Memory: 4k page"));
    store.set_swap(0);
    store.set_physical_memory(1024);
    assert_eq!(store.version(), Some("OpenJDK 64-Bit Server VM"));
    assert_eq!(store.options(), Some("-Xmx1g"));
    assert_eq!(store.memory(), Some("Memory: 4k page"));
    assert_eq!(store.swap(), 0);
    assert_eq!(store.physical_memory(), 1024);
}

#[test]
fn test_shared_store() {
    let shared = new_shared_store();
    {
        let mut store = shared.lock().unwrap();
        store.insert(event(LogEventType::ParNew, 10, 1000, "a"));
    }
    assert_eq!(shared.lock().unwrap().count_blocking(), 1);
}
