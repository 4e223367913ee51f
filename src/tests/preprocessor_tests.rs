// src/tests/preprocessor_tests.rs

//! tests for `preprocessor.rs`

#![allow(non_snake_case)]

use crate::readers::preprocessor::{PreprocessedLine, PreprocessedLines, UnifiedPreprocessor};

use ::si_trace_print::stack::stack_offset_set;
use ::test_case::test_case;

/// Run every line then `finish`, collect all output.
fn preprocess_all(lines: &[&str]) -> (PreprocessedLines, UnifiedPreprocessor) {
    let mut pp = UnifiedPreprocessor::new();
    let mut out = PreprocessedLines::new();
    for line in lines.iter() {
        out.extend(pp.process_line(line));
    }
    out.extend(pp.finish());

    (out, pp)
}

fn logical(s: &str) -> PreprocessedLine {
    PreprocessedLine::Logical(String::from(s))
}

fn unidentified(s: &str) -> PreprocessedLine {
    PreprocessedLine::Unidentified(String::from(s))
}

const SERIAL_FRAGMENTS: [&str; 6] = [
    "[0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure)",
    "[0.042s][info][gc,heap      ] GC(0) DefNew: 983K->128K(1152K)",
    "[0.042s][info][gc,heap      ] GC(0) Tenured: 0K->458K(768K)",
    "[0.042s][info][gc,metaspace ] GC(0) Metaspace: 246K->246K(1056768K)",
    "[0.042s][info][gc           ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.393ms",
    "[0.042s][info][gc,cpu       ] GC(0) User=0.00s Sys=0.00s Real=0.00s",
];

const SERIAL_MERGED: &str = "[0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) DefNew: 983K->128K(1152K) Tenured: 0K->458K(768K) Metaspace: 246K->246K(1056768K) 0M->0M(1M) 1.393ms User=0.00s Sys=0.00s Real=0.00s";

#[test]
fn test_merge_serial_fragments() {
    stack_offset_set(Some(2));
    let mut pp = UnifiedPreprocessor::new();
    for line in SERIAL_FRAGMENTS[..5].iter() {
        assert!(pp.process_line(line).is_empty(), "line {:?}", line);
    }
    assert_eq!(pp.open_count(), 1);
    let out = pp.process_line(SERIAL_FRAGMENTS[5]);
    assert_eq!(out, vec![logical(SERIAL_MERGED)]);
    assert_eq!(pp.open_count(), 0);
    assert_eq!(pp.merged_count(), 1);
    assert_eq!(pp.unidentified_count(), 0);
    assert!(pp.finish().is_empty());
}

#[test]
fn test_merge_details_ranked() {
    // old before young in the log, young first in the merged line
    let lines = [
        SERIAL_FRAGMENTS[0],
        SERIAL_FRAGMENTS[3],
        SERIAL_FRAGMENTS[2],
        SERIAL_FRAGMENTS[1],
        SERIAL_FRAGMENTS[4],
        SERIAL_FRAGMENTS[5],
    ];
    let (out, _pp) = preprocess_all(&lines);
    assert_eq!(out, vec![logical(SERIAL_MERGED)]);
}

#[test]
fn test_merge_summary_and_cpu() {
    let lines = [
        "[0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.393ms",
        "[0.042s][info][gc,cpu       ] GC(0) User=0.01s Sys=0.00s Real=0.01s",
    ];
    let (out, pp) = preprocess_all(&lines);
    assert_eq!(
        out,
        vec![logical(
            "[0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.393ms User=0.01s Sys=0.00s Real=0.01s"
        )]
    );
    assert_eq!(pp.merged_count(), 1);
}

#[test]
fn test_summary_with_memory_flushed_at_finish() {
    let line = "[7.944s][info][gc] GC(6432) Pause Remark 8M->8M(10M) 1.767ms";
    let mut pp = UnifiedPreprocessor::new();
    assert!(pp.process_line(line).is_empty());
    assert_eq!(pp.finish(), vec![logical(line)]);
}

#[test]
fn test_summary_with_memory_flushed_by_next_start() {
    let remark = "[7.944s][info][gc] GC(6432) Pause Remark 8M->8M(10M) 1.767ms";
    let start = "[8.000s][info][gc,start] GC(6433) Pause Young (Allocation Failure)";
    let mut pp = UnifiedPreprocessor::new();
    assert!(pp.process_line(remark).is_empty());
    assert_eq!(pp.process_line(start), vec![logical(remark)]);
    assert_eq!(pp.open_count(), 1);
}

#[test]
fn test_summary_without_memory_emitted_directly() {
    let line = "[0.437s][info][gc] GC(0) Pause Init Mark (unload classes) 0.295ms";
    let mut pp = UnifiedPreprocessor::new();
    assert_eq!(pp.process_line(line), vec![logical(line)]);
    assert_eq!(pp.open_count(), 0);
}

#[test]
fn test_truncated_sequence_unidentified_at_finish() {
    let lines = [SERIAL_FRAGMENTS[0], SERIAL_FRAGMENTS[1]];
    let (out, pp) = preprocess_all(&lines);
    assert_eq!(out, vec![unidentified(lines[0]), unidentified(lines[1])]);
    assert_eq!(pp.unidentified_count(), 2);
    assert_eq!(pp.merged_count(), 0);
}

#[test]
fn test_interleaved_ids() {
    let lines = [
        "[1.000s][info][gc,start] GC(1) Pause Young (Allocation Failure)",
        "[1.001s][info][gc,start] GC(2) Pause Full (Ergonomics)",
        "[1.002s][info][gc] GC(1) Pause Young (Allocation Failure) 4M->1M(8M) 1.000ms",
        "[1.003s][info][gc,cpu] GC(1) User=0.01s Sys=0.00s Real=0.01s",
        "[1.010s][info][gc] GC(2) Pause Full (Ergonomics) 4M->2M(8M) 9.000ms",
    ];
    let (out, pp) = preprocess_all(&lines);
    assert_eq!(
        out,
        vec![
            logical(
                "[1.000s][info][gc,start] GC(1) Pause Young (Allocation Failure) 4M->1M(8M) 1.000ms User=0.01s Sys=0.00s Real=0.01s"
            ),
            logical("[1.001s][info][gc,start] GC(2) Pause Full (Ergonomics) 4M->2M(8M) 9.000ms"),
        ]
    );
    assert_eq!(pp.merged_count(), 2);
    assert_eq!(pp.open_count(), 0);
}

#[test]
fn test_informational_absorbed() {
    let lines = [
        "[0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.393ms",
        "[0.042s][info][gc,phases    ] GC(0) Pre Evacuate Collection Set: 0.0ms",
        "[0.042s][info][gc,task      ] GC(0) Using 2 workers of 4 for evacuation",
        "[0.042s][info][gc,cpu       ] GC(0) User=0.01s Sys=0.00s Real=0.01s",
    ];
    let (out, _pp) = preprocess_all(&lines);
    assert_eq!(out.len(), 1);
    assert!(matches!(out[0], PreprocessedLine::Logical(_)));
}

pub(crate) const G1_YOUNG_JDK17: [&str; 14] = [
    "[0.337s][info][gc,start    ] GC(0) Pause Young (Normal) (G1 Evacuation Pause)",
    "[0.337s][info][gc,task     ] GC(0) Using 2 workers of 4 for evacuation",
    "[0.340s][info][gc,phases   ] GC(0)   Pre Evacuate Collection Set: 0.1ms",
    "[0.340s][info][gc,phases   ] GC(0)   Merge Heap Roots: 0.1ms",
    "[0.340s][info][gc,phases   ] GC(0)   Evacuate Collection Set: 2.3ms",
    "[0.340s][info][gc,phases   ] GC(0)   Post Evacuate Collection Set: 0.2ms",
    "[0.340s][info][gc,phases   ] GC(0)   Other: 0.1ms",
    "[0.340s][info][gc,heap     ] GC(0) Eden regions: 12->0(10)",
    "[0.340s][info][gc,heap     ] GC(0) Survivor regions: 0->2(2)",
    "[0.340s][info][gc,heap     ] GC(0) Old regions: 0->1",
    "[0.340s][info][gc,heap     ] GC(0) Humongous regions: 0->0",
    "[0.340s][info][gc,metaspace] GC(0) Metaspace: 1234K(1408K)->1234K(1408K) NonClass: 1100K(1216K)->1100K(1216K) Class: 134K(192K)->134K(192K)",
    "[0.340s][info][gc          ] GC(0) Pause Young (Normal) (G1 Evacuation Pause) 12M->2M(256M) 2.895ms",
    "[0.340s][info][gc,cpu      ] GC(0) User=0.00s Sys=0.00s Real=0.00s",
];

#[test]
fn test_merge_g1_young_indented_phases() {
    let (out, pp) = preprocess_all(&G1_YOUNG_JDK17);
    assert_eq!(
        out,
        vec![logical(
            "[0.337s][info][gc,start    ] GC(0) Pause Young (Normal) (G1 Evacuation Pause) Metaspace: 1234K(1408K)->1234K(1408K) 12M->2M(256M) 2.895ms User=0.00s Sys=0.00s Real=0.00s"
        )]
    );
    assert_eq!(pp.merged_count(), 1);
    assert_eq!(pp.unidentified_count(), 0);
    assert_eq!(pp.informational_count(), 0);
}

#[test]
fn test_merge_parallel_full_phases() {
    let lines = [
        "[1.095s][info][gc,start       ] GC(3) Pause Full (Ergonomics)",
        "[1.095s][info][gc,task        ] GC(3) Using 4 workers of 4 for full compaction",
        "[1.095s][info][gc,phases,start] GC(3) Marking Phase",
        "[1.097s][info][gc,phases      ] GC(3) Marking Phase 1.580ms",
        "[1.097s][info][gc,phases,start] GC(3) Summary Phase",
        "[1.097s][info][gc,phases      ] GC(3) Summary Phase 0.011ms",
        "[1.097s][info][gc,phases,start] GC(3) Adjust Roots",
        "[1.097s][info][gc,phases      ] GC(3) Adjust Roots 0.456ms",
        "[1.097s][info][gc,phases,start] GC(3) Compaction Phase",
        "[1.099s][info][gc,phases      ] GC(3) Compaction Phase 2.023ms",
        "[1.099s][info][gc,phases,start] GC(3) Post Compact",
        "[1.099s][info][gc,phases      ] GC(3) Post Compact 0.064ms",
        "[1.099s][info][gc,heap        ] GC(3) PSYoungGen: 2544K->0K(29696K)",
        "[1.099s][info][gc,heap        ] GC(3) ParOldGen: 6144K->8051K(68608K)",
        "[1.099s][info][gc,metaspace   ] GC(3) Metaspace: 2926K->2926K(1056768K)",
        "[1.099s][info][gc             ] GC(3) Pause Full (Ergonomics) 8M->7M(96M) 4.466ms",
        "[1.099s][info][gc,cpu         ] GC(3) User=0.01s Sys=0.00s Real=0.00s",
    ];
    let (out, pp) = preprocess_all(&lines);
    assert_eq!(
        out,
        vec![logical(
            "[1.095s][info][gc,start       ] GC(3) Pause Full (Ergonomics) PSYoungGen: 2544K->0K(29696K) ParOldGen: 6144K->8051K(68608K) Metaspace: 2926K->2926K(1056768K) 8M->7M(96M) 4.466ms User=0.01s Sys=0.00s Real=0.00s"
        )]
    );
    assert_eq!(pp.unidentified_count(), 0);
}

#[test_case("[0.400s][info][gc,task     ] GC(1) Using 1 workers of 1 for marking"; "workers")]
#[test_case("[0.436s][info][gc,task     ] GC(9) Using 2 of 4 workers for concurrent marking"; "workers shenandoah")]
#[test_case("[0.340s][info][gc,phases   ] GC(9)   Other: 0.1ms"; "indented phase")]
#[test_case("[1.097s][info][gc,phases,start] GC(9) Marking Phase"; "phase start")]
#[test_case("[1.099s][info][gc,phases      ] GC(9) Post Compact 0.064ms"; "post compact")]
fn test_informational_without_open_sequence(line: &str) {
    let mut pp = UnifiedPreprocessor::new();
    assert_eq!(pp.process_line(line), vec![PreprocessedLine::Informational(String::from(line))]);
    assert_eq!(pp.informational_count(), 1);
    assert_eq!(pp.unidentified_count(), 0);
    assert!(pp.finish().is_empty());
}

#[test]
fn test_summary_without_memory_keeps_buffered_details() {
    let lines = [
        "[0.436s][info][gc,start     ] GC(5) Pause Init Mark (unload classes)",
        "[0.436s][info][gc,task      ] GC(5) Using 2 of 4 workers for init marking",
        "[0.437s][info][gc,metaspace ] GC(5) Metaspace: 246K->246K(1056768K)",
        "[0.437s][info][gc           ] GC(5) Pause Init Mark (unload classes) 0.295ms",
    ];
    let (out, pp) = preprocess_all(&lines);
    assert_eq!(out, vec![logical(lines[3]), unidentified(lines[2])]);
    assert_eq!(pp.merged_count(), 1);
    assert_eq!(pp.unidentified_count(), 1);
    assert_eq!(pp.open_count(), 0);
}

#[test]
fn test_detail_without_open_sequence() {
    let line = "[0.042s][info][gc,heap      ] GC(7) DefNew: 983K->128K(1152K)";
    let mut pp = UnifiedPreprocessor::new();
    assert_eq!(pp.process_line(line), vec![unidentified(line)]);
    assert_eq!(pp.unidentified_count(), 1);
}

#[test]
fn test_cpu_without_open_sequence() {
    let line = "[0.042s][info][gc,cpu       ] GC(7) User=0.01s Sys=0.00s Real=0.01s";
    let mut pp = UnifiedPreprocessor::new();
    assert_eq!(pp.process_line(line), vec![unidentified(line)]);
}

#[test_case("2.618: Total time for which application threads were stopped: 0.0006540 seconds"; "legacy")]
#[test_case("[0.005s][info][gc     ] Using G1"; "unified without id")]
#[test_case(""; "blank")]
#[test_case("[16.601s][info][gc] GC(1355) Concurrent Mark Cycle"; "unified concurrent")]
fn test_pass_through(line: &str) {
    let mut pp = UnifiedPreprocessor::new();
    assert_eq!(pp.process_line(line), vec![logical(line)]);
    assert!(pp.finish().is_empty());
}

#[test]
fn test_PreprocessedLine_as_str() {
    assert_eq!(logical("abc").as_str(), "abc");
    assert_eq!(unidentified("xyz").as_str(), "xyz");
    assert_eq!(PreprocessedLine::Informational(String::from("i")).as_str(), "i");
}
