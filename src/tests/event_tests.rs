// src/tests/event_tests.rs

//! tests for `event.rs`

#![allow(non_snake_case)]

use crate::data::event::{LogEvent, LogEventType, MemoryRegion};
use crate::data::extract::ExtractContext;
use crate::data::memory::{Memory, Unit};
use crate::data::trigger::GcTrigger;
use crate::readers::classifier::parse_log_line;

use ::test_case::test_case;

fn kb(value: u64) -> Option<Memory> {
    Some(Memory::new(value, Unit::Kilobytes))
}

#[test]
fn test_LogEvent_set_perm() {
    let mut event = LogEvent::new(LogEventType::ParallelScavenge, 2125, Some(22521), String::from("x"));
    assert!(!event.has_perm_data());
    assert_eq!(event.perm(), None);

    let perm = MemoryRegion::new(kb(13092), kb(13094), kb(131072));
    event.set_perm(perm);
    assert!(event.has_perm_data());
    assert_eq!(event.perm(), Some(&perm));

    // overwrites
    let perm2 = MemoryRegion::new(kb(1), kb(2), kb(3));
    event.set_perm(perm2);
    assert_eq!(event.perm(), Some(&perm2));
    assert_eq!(event.perm().unwrap().space, kb(3));
}

#[test]
fn test_LogEvent_set_perm_parsed() {
    let mut ctx = ExtractContext::new(None);
    let mut event = parse_log_line(
        "2.125: [GC (Allocation Failure) [PSYoungGen: 27808K->632K(28032K)] 160183K->133159K(585088K), 0.0225213 secs] [Times: user=0.08 sys=0.00, real=0.02 secs]",
        &mut ctx,
    )
    .unwrap();
    assert_eq!(event.perm(), None);
    let young_before = event.young().copied();
    event.set_perm(MemoryRegion::new(kb(246), kb(246), kb(1056768)));
    assert_eq!(event.perm().unwrap().occupancy_init, kb(246));
    // nothing else changes
    assert_eq!(event.young().copied(), young_before);
    assert_eq!(event.timestamp(), 2125);
}

#[test]
fn test_LogEvent_set_trigger() {
    let mut event = LogEvent::new(LogEventType::UnifiedG1YoungPause, 337, Some(2895), String::from("x"));
    assert_eq!(event.trigger(), None);

    event.set_trigger(GcTrigger::G1EvacuationPause);
    assert_eq!(event.trigger(), Some(&GcTrigger::G1EvacuationPause));
    assert!(!event.trigger().unwrap().is_explicit_gc());

    event.set_trigger(GcTrigger::SystemGc);
    assert_eq!(event.trigger(), Some(&GcTrigger::SystemGc));
    assert!(event.trigger().unwrap().is_explicit_gc());

    event.set_trigger(GcTrigger::from_text("Something New"));
    assert_eq!(event.trigger().unwrap().as_text(), "Something New");
}

#[test_case(LogEventType::UnifiedG1YoungPause, true)]
#[test_case(LogEventType::UnifiedSerialNew, true)]
#[test_case(LogEventType::UsingG1, true)]
#[test_case(LogEventType::UnifiedHeader, true)]
#[test_case(LogEventType::ShenandoahFullGc, true)]
#[test_case(LogEventType::ZCollection, true)]
#[test_case(LogEventType::UnifiedConcurrent, true)]
#[test_case(LogEventType::UnifiedSafepoint, true)]
#[test_case(LogEventType::ParallelScavenge, false)]
#[test_case(LogEventType::G1YoungPause, false)]
#[test_case(LogEventType::CmsConcurrent, false)]
#[test_case(LogEventType::HeaderVersion, false)]
#[test_case(LogEventType::BlankLine, false)]
fn test_LogEventType_is_unified(
    kind: LogEventType,
    expect: bool,
) {
    assert_eq!(kind.is_unified(), expect);
}

#[test]
fn test_is_unified_parsed() {
    let mut ctx = ExtractContext::new(None);
    let unified = parse_log_line("[7.944s][info][gc] GC(6432) Pause Remark 8M->8M(10M) 1.767ms", &mut ctx).unwrap();
    assert!(unified.kind().is_unified());
    let legacy = parse_log_line(
        "3.600: [Full GC [PSYoungGen: 5424K->0K(38208K)] [PSOldGen: 488K->5786K(87424K)] 5912K->5786K(125632K) [PSPermGen: 13092K->13094K(131072K)], 0.0699360 secs]",
        &mut ctx,
    )
    .unwrap();
    assert!(!legacy.kind().is_unified());
}
