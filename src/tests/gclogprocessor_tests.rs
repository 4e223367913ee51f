// src/tests/gclogprocessor_tests.rs

//! tests for `gclogprocessor.rs`

#![allow(non_snake_case)]

use crate::common::BYTES_UNSET;
use crate::data::decorator::datestamp_to_datetime;
use crate::data::event::{CollectorFamily, LogEventType};
use crate::debug::helpers::create_temp_log;
use crate::readers::analysis::Analysis;
use crate::readers::eventstore::new_shared_store;
use crate::readers::gclogprocessor::{process_log, GcLogProcessor, ProcessorConfig};
use crate::tests::preprocessor_tests::G1_YOUNG_JDK17;

use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind};

use ::si_trace_print::stack::stack_offset_set;

const LOG_LEGACY_PARALLEL: &str = "\
OpenJDK 64-Bit Server VM (25.242-b08) for linux-amd64 JRE (1.8.0_242-b08), built on Jan 28 2020 14:28:22 by \"mockbuild\" with gcc 4.8.5 20150623 (Red Hat 4.8.5-39)
Memory: 4k page, physical 65806300k(58281908k free), swap 16777212k(16777212k free)
CommandLine flags: -XX:InitialHeapSize=2147483648 -XX:MaxHeapSize=2147483648 -XX:+PrintGC -XX:+PrintGCDetails -XX:+UseParallelGC
2.124: Application time: 0.4924630 seconds
2.125: [GC (Allocation Failure) [PSYoungGen: 27808K->632K(28032K)] 160183K->133159K(585088K), 0.0225213 secs] [Times: user=0.08 sys=0.00, real=0.02 secs]
2.148: Total time for which application threads were stopped: 0.0231540 seconds
this line is garbage
3.600: [Full GC [PSYoungGen: 5424K->0K(38208K)] [PSOldGen: 488K->5786K(87424K)] 5912K->5786K(125632K) [PSPermGen: 13092K->13094K(131072K)], 0.0699360 secs]
3.671: Total time for which application threads were stopped: 0.0702000 seconds
";

const LOG_UNIFIED_SERIAL: &str = "\
[0.003s][info][gc] Using Serial\r
[0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure)\r
[0.042s][info][gc,heap      ] GC(0) DefNew: 983K->128K(1152K)\r
[0.042s][info][gc,heap      ] GC(0) Tenured: 0K->458K(768K)\r
[0.042s][info][gc,metaspace ] GC(0) Metaspace: 246K->246K(1056768K)\r
[0.042s][info][gc           ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.393ms\r
[0.042s][info][gc,cpu       ] GC(0) User=0.00s Sys=0.00s Real=0.00s\r
[0.075s][info][gc,start     ] GC(1) Pause Young (Allocation Failure)\r
[0.076s][info][gc,heap      ] GC(1) DefNew: 1125K->0K(1152K)\r
";

#[test]
fn test_process_reader_legacy_parallel() {
    stack_offset_set(Some(2));
    let ntf = create_temp_log(LOG_LEGACY_PARALLEL);
    let file = File::open(ntf.path()).unwrap();
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    processor.process_reader(BufReader::new(file)).unwrap();
    let summary = processor.finish();

    assert_eq!(summary.lines_processed, 9);
    assert_eq!(summary.logical_lines, 9);
    assert_eq!(summary.events_identified, 8);
    assert_eq!(summary.lines_unidentified, 1);
    assert_eq!(summary.lines_merged, 0);

    let store_arc = processor.store();
    let store = store_arc.lock().unwrap();
    assert!(store.is_in_use());
    assert_eq!(store.count_blocking(), 2);
    assert_eq!(store.count_stopped(), 2);
    assert_eq!(store.unidentified_log_lines(), &[String::from("this line is garbage")]);
    assert_eq!(
        store.event_types(),
        &[
            LogEventType::ParallelScavenge,
            LogEventType::ApplicationStoppedTime,
            LogEventType::ParallelSerialOld,
        ]
    );
    assert_eq!(store.collector_families(), &[CollectorFamily::Parallel]);
    assert!(store.version().unwrap().starts_with("OpenJDK 64-Bit Server VM (25.242-b08)"));
    assert_eq!(store.physical_memory(), 65806300 * 1024);
    assert_eq!(store.swap(), 16777212 * 1024);
    assert!(store.options().unwrap().contains("-XX:+UseParallelGC"));
    assert_eq!(store.total_gc_pause(), 92);
    assert_eq!(store.total_stopped_time(), 93);
    assert_eq!(store.max_perm_space(), 131072);
    assert_eq!(store.parallel_count(), 1);
    assert_eq!(store.inverted_parallelism_count(), 0);
    assert_eq!(
        store.analysis(),
        &[
            Analysis::ThroughputSerialGc,
            Analysis::ThreadStackSizeNotSet,
            Analysis::PermMetaspaceNotSet,
        ]
    );
}

#[test]
fn test_process_reader_unified_crlf() {
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    processor
        .process_reader(Cursor::new(LOG_UNIFIED_SERIAL.as_bytes()))
        .unwrap();
    let summary = processor.finish();

    assert_eq!(summary.lines_processed, 9);
    assert_eq!(summary.lines_merged, 1);
    // "Using Serial", the merged line, the two truncated GC(1) fragments
    assert_eq!(summary.logical_lines, 4);
    assert_eq!(summary.events_identified, 2);
    assert_eq!(summary.lines_unidentified, 2);

    let store_arc = processor.store();
    let store = store_arc.lock().unwrap();
    assert_eq!(store.count_blocking(), 1);
    let event = store.first_gc_event().unwrap();
    assert_eq!(event.kind(), LogEventType::UnifiedSerialNew);
    assert_eq!(event.timestamp(), 41);
    assert_eq!(event.duration(), Some(1393));
    assert_eq!(store.collector_families(), &[CollectorFamily::Serial]);
    assert_eq!(
        store.unidentified_log_lines(),
        &[
            String::from("[0.075s][info][gc,start     ] GC(1) Pause Young (Allocation Failure)"),
            String::from("[0.076s][info][gc,heap      ] GC(1) DefNew: 1125K->0K(1152K)"),
        ]
    );
    assert!(store.analysis().contains(&Analysis::ApplicationStoppedTimeMissing));
}

#[test]
fn test_process_g1_young_with_phases() {
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    for line in G1_YOUNG_JDK17.iter() {
        processor.process_line(line);
    }
    let summary = processor.finish();
    assert_eq!(summary.lines_processed, 14);
    assert_eq!(summary.lines_merged, 1);
    assert_eq!(summary.logical_lines, 1);
    assert_eq!(summary.events_identified, 1);
    assert_eq!(summary.lines_unidentified, 0);
    assert_eq!(summary.lines_informational, 0);

    let store_arc = processor.store();
    let store = store_arc.lock().unwrap();
    assert!(store.unidentified_log_lines().is_empty());
    let event = store.first_gc_event().unwrap();
    assert_eq!(event.kind(), LogEventType::UnifiedG1YoungPause);
    assert_eq!(event.timestamp(), 337);
    assert_eq!(event.duration(), Some(2895));
}

#[test]
fn test_process_concurrent_cycle_workers_informational() {
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    processor.process_line("[0.400s][info][gc,marking  ] GC(1) Concurrent Mark From Roots");
    processor.process_line("[0.400s][info][gc,task     ] GC(1) Using 1 workers of 1 for marking");
    processor.process_line("[0.410s][info][gc,marking  ] GC(1) Concurrent Mark From Roots 1.200ms");
    let summary = processor.finish();
    assert_eq!(summary.lines_processed, 3);
    assert_eq!(summary.logical_lines, 2);
    assert_eq!(summary.events_identified, 2);
    assert_eq!(summary.lines_informational, 1);
    assert_eq!(summary.lines_unidentified, 0);

    let store_arc = processor.store();
    assert!(store_arc.lock().unwrap().unidentified_log_lines().is_empty());
}

#[test]
fn test_remark_flushed_by_finish() {
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    processor.process_line("[7.944s][info][gc] GC(6432) Pause Remark 8M->8M(10M) 1.767ms");
    {
        let store_arc = processor.store();
        assert_eq!(store_arc.lock().unwrap().count_blocking(), 0);
    }
    processor.finish();
    let store_arc = processor.store();
    let store = store_arc.lock().unwrap();
    assert_eq!(store.count_blocking(), 1);
    assert_eq!(store.first_gc_event().unwrap().timestamp(), 7943);
}

#[test]
fn test_finish_idempotent() {
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    processor.process_line("[0.029s][info][gc] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 0.521ms");
    let summary1 = processor.finish();
    let summary2 = processor.finish();
    assert_eq!(summary1, summary2);
    assert_eq!(processor.store().lock().unwrap().count_blocking(), 1);
}

#[test]
fn test_with_store_in_use() {
    let store = new_shared_store();
    let _processor = GcLogProcessor::with_store(ProcessorConfig::default(), store.clone()).unwrap();
    let result = GcLogProcessor::with_store(ProcessorConfig::default(), store.clone());
    match result {
        Err(err) => assert_eq!(err.kind(), ErrorKind::InvalidInput),
        Ok(_) => panic!("expected an error for a store in use"),
    }
    store.lock().unwrap().reset();
    assert!(GcLogProcessor::with_store(ProcessorConfig::default(), store).is_ok());
}

#[test]
fn test_new_marks_store_in_use() {
    let processor = GcLogProcessor::new(ProcessorConfig::default());
    assert!(processor.store().lock().unwrap().is_in_use());
}

#[test]
fn test_inverted_parallelism() {
    let lines = [
        "20.189: [GC 20.190: [ParNew: 86199K->8454K(91712K), 0.0375060 secs] 89399K->11655K(907328K), 0.0387074 secs] [Times: user=0.02 sys=0.00, real=0.04 secs]",
        "21.189: [GC 21.190: [ParNew: 86199K->8454K(91712K), 0.0375060 secs] 89399K->11655K(907328K), 0.0387074 secs] [Times: user=0.01 sys=0.00, real=0.04 secs]",
        "22.189: [GC 22.190: [ParNew: 86199K->8454K(91712K), 0.0375060 secs] 89399K->11655K(907328K), 0.0387074 secs] [Times: user=0.16 sys=0.00, real=0.04 secs]",
        "23.189: [GC 23.190: [ParNew: 86199K->8454K(91712K), 0.0375060 secs] 89399K->11655K(907328K), 0.0387074 secs] [Times: user=0.00 sys=0.00, real=0.00 secs]",
    ];
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    for line in lines.iter() {
        processor.process_line(line);
    }
    processor.finish();
    let store_arc = processor.store();
    let store = store_arc.lock().unwrap();
    assert_eq!(store.parallel_count(), 4);
    assert_eq!(store.inverted_parallelism_count(), 2);
    let worst = store.worst_inverted_parallelism_event().unwrap();
    assert_eq!(worst.timestamp(), 21189);
    assert_eq!(worst.parallelism(), Some(25));
    assert!(store.analysis().contains(&Analysis::ParallelismInverted));
}

#[test]
fn test_parallelism_threshold_configurable() {
    let config = ProcessorConfig {
        parallelism_low_threshold: 20,
        ..Default::default()
    };
    let mut processor = GcLogProcessor::new(config);
    processor.process_line(
        "21.189: [GC 21.190: [ParNew: 86199K->8454K(91712K), 0.0375060 secs] 89399K->11655K(907328K), 0.0387074 secs] [Times: user=0.01 sys=0.00, real=0.04 secs]",
    );
    let summary = processor.finish();
    assert_eq!(summary.parallelism_low_threshold, 20);
    assert_eq!(processor.store().lock().unwrap().inverted_parallelism_count(), 0);
}

#[test]
fn test_config_overrides_header() {
    let config = ProcessorConfig {
        jvm_version: Some(String::from("configured version")),
        swap: Some(0),
        ..Default::default()
    };
    let (store_arc, _summary) = process_log(config, Cursor::new(LOG_LEGACY_PARALLEL.as_bytes())).unwrap();
    let store = store_arc.lock().unwrap();
    assert_eq!(store.version(), Some("configured version"));
    assert_eq!(store.swap(), 0);
    // not configured, taken from the log
    assert_eq!(store.physical_memory(), 65806300 * 1024);
    assert!(store.analysis().contains(&Analysis::SwapDisabled));
}

#[test]
fn test_header_memory_without_swap() {
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    processor.process_line("Memory: 4k page, physical 8388608k(2097152k free)");
    processor.finish();
    let store_arc = processor.store();
    let store = store_arc.lock().unwrap();
    assert_eq!(store.memory(), Some("Memory: 4k page, physical 8388608k(2097152k free)"));
    assert_eq!(store.swap(), BYTES_UNSET);
    assert!(!store.analysis().contains(&Analysis::SwapDisabled));
}

#[test]
fn test_jvm_start_from_first_datestamp() {
    let mut processor = GcLogProcessor::new(ProcessorConfig::default());
    assert!(processor.jvm_start().is_none());
    processor.process_line(
        "[2021-03-09T14:45:02.441-0300][info][gc] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 0.521ms",
    );
    processor.process_line(
        "[2021-03-09T14:45:03.441-0300][info][gc] GC(1) Pause Young (Allocation Failure) 0M->0M(1M) 0.521ms",
    );
    processor.finish();
    assert_eq!(
        processor.jvm_start(),
        Some(datestamp_to_datetime("2021-03-09T14:45:02.441-0300").unwrap())
    );
    let store_arc = processor.store();
    let store = store_arc.lock().unwrap();
    let timestamps: Vec<i64> = store.blocking_events().iter().map(|e| e.timestamp()).collect();
    assert_eq!(timestamps, vec![0, 1000]);
}

#[test]
fn test_jvm_start_configured() {
    let config = ProcessorConfig {
        jvm_start: Some(datestamp_to_datetime("2021-03-09T14:45:00.000-0300").unwrap()),
        ..Default::default()
    };
    let mut processor = GcLogProcessor::new(config);
    // before the JVM start, unidentified
    processor.process_line(
        "[2021-03-09T14:44:59.000-0300][info][gc] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 0.521ms",
    );
    processor.process_line(
        "[2021-03-09T14:45:02.441-0300][info][gc] GC(1) Pause Young (Allocation Failure) 0M->0M(1M) 0.521ms",
    );
    let summary = processor.finish();
    assert_eq!(summary.lines_unidentified, 1);
    assert_eq!(summary.events_identified, 1);
    assert_eq!(processor.store().lock().unwrap().first_gc_event().unwrap().timestamp(), 2441);
}
