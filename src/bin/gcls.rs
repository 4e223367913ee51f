// src/bin/gcls.rs

//! Driver program _gcls_ drives the [_gclslib_].
//!
//! Processes user-passed command-line arguments.
//! For each log file path passed, a file processing thread is created.
//! Each file processing thread runs a [`GcLogProcessor`] over the whole file
//! then sends the finished [`EventStore`] to the main thread over a
//! [crossbeam channel]. The main thread prints a summary for each file in
//! the order the paths were passed.
//!
//! A file that cannot be opened or read is reported and skipped; the other
//! files are still processed. The exit code is failure if any file failed.
//!
//! [_gclslib_]: gclslib
//! [`GcLogProcessor`]: gclslib::readers::gclogprocessor::GcLogProcessor
//! [`EventStore`]: gclslib::readers::eventstore::EventStore
//! [crossbeam channel]: crossbeam_channel

#![allow(non_camel_case_types)]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::thread;

use ::anyhow::{self, Context};
use ::chrono::DateTime;
use ::clap::Parser;
use ::const_format::concatcp;
use ::crossbeam_channel;
use ::itertools::Itertools; // for `join`
use ::si_trace_print::{defn, defo, defx, stack::stack_offset_set};

use ::gclslib::common::{Bytes, Count, FPath, FPaths, Parallelism, PARALLELISM_UNITY};
use ::gclslib::data::decorator::{datestamp_to_datetime, DateTimeL};
use ::gclslib::data::event::LogEvent;
use ::gclslib::debug::printers::e_err;
use ::gclslib::readers::eventstore::{EventStore, SharedEventStore};
use ::gclslib::readers::gclogprocessor::{
    GcLogProcessor,
    ProcessorConfig,
    SummaryGcLogProcessor,
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const CLI_HELP_AFTER: &str = "\
Each PATH is one JVM garbage collection log, legacy (JDK 8 and earlier)
verbose GC logging or unified (JDK 9 and later) logging.

Metadata passed on the command-line takes the place of metadata parsed from
the log header.

Lines that match no known pattern are counted as unidentified. Pass
--summary-unidentified to print them.";

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "gcls",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(GC Log Sifter)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n"
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of JVM garbage collection log files.
    #[clap(required = true, verbatim_doc_comment)]
    paths: Vec<String>,

    /// Low parallelism threshold, a percentage. Parallel collections with a
    /// parallelism below this are "inverted" (the collection used less CPU
    /// time than wall clock time).
    #[clap(
        short = 't',
        long,
        verbatim_doc_comment,
        default_value_t = PARALLELISM_UNITY,
    )]
    threshold: Parallelism,

    /// JVM start datetime, the reference for log lines that have only a
    /// datestamp. For example, "2021-03-09T14:45:02.441-0300".
    /// If not passed then the first datestamp in the log is the reference.
    #[clap(
        long,
        verbatim_doc_comment,
        value_parser = cli_parse_jvm_start,
    )]
    jvm_start: Option<DateTimeL>,

    /// JVM version string.
    #[clap(long, verbatim_doc_comment)]
    jvm_version: Option<String>,

    /// JVM options string. To pass a value with leading "-" use "=" notation,
    /// e.g. --jvm-options="-Xss256k -Xmx2g".
    #[clap(long, verbatim_doc_comment, allow_hyphen_values = true)]
    jvm_options: Option<String>,

    /// Physical memory in bytes.
    #[clap(long, verbatim_doc_comment)]
    physical_memory: Option<Bytes>,

    /// Swap size in bytes. "0" means swap is disabled.
    #[clap(long, verbatim_doc_comment)]
    swap: Option<Bytes>,

    /// Print unidentified lines after each file summary.
    #[clap(short = 'u', long, verbatim_doc_comment)]
    summary_unidentified: bool,
}

/// `clap` argument parser for `--jvm-start`.
///
/// Accepts the JVM datestamp format or RFC 3339.
fn cli_parse_jvm_start(value: &str) -> std::result::Result<DateTimeL, String> {
    match datestamp_to_datetime(value) {
        Ok(dt) => Ok(dt),
        Err(_) => match DateTime::parse_from_rfc3339(value) {
            Ok(dt) => Ok(dt),
            Err(err) => Err(format!("Unable to parse a datetime from {:?}: {}", value, err)),
        },
    }
}

/// Process user-passed command-line arguments.
fn cli_process_args() -> (FPaths, ProcessorConfig, bool) {
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let config = ProcessorConfig {
        parallelism_low_threshold: args.threshold,
        jvm_start: args.jvm_start,
        jvm_version: args.jvm_version,
        jvm_options: args.jvm_options,
        physical_memory: args.physical_memory,
        swap: args.swap,
        ..ProcessorConfig::default()
    };

    (args.paths, config, args.summary_unidentified)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file processing threads
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Index of a path in the order passed.
type PathId = usize;

/// Result of processing one file.
type FileResult = anyhow::Result<(SummaryGcLogProcessor, SharedEventStore)>;

/// Data sent from a file processing thread to the main thread.
type ChanDatum = (PathId, FileResult);
type ChanSendDatum = crossbeam_channel::Sender<ChanDatum>;
type ChanRecvDatum = crossbeam_channel::Receiver<ChanDatum>;

/// Process one file. Called by a file processing thread.
fn process_file(
    path: &FPath,
    config: ProcessorConfig,
) -> FileResult {
    defn!("({:?})", path);
    let file = File::open(path).with_context(|| format!("open {:?}", path))?;
    let mut processor = GcLogProcessor::new(config);
    processor
        .process_reader(BufReader::new(file))
        .with_context(|| format!("read {:?}", path))?;
    let summary = processor.finish();
    defx!("{:?}", summary);

    Ok((summary, processor.store()))
}

fn exec_fileprocessor_thread(
    chan_send: ChanSendDatum,
    pathid: PathId,
    path: FPath,
    config: ProcessorConfig,
) {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(2));
    }
    let result: FileResult = process_file(&path, config);
    if let Err(err) = chan_send.send((pathid, result)) {
        e_err!("thread for {:?} failed to send result: {}", path, err);
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// printing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn event_brief(event: Option<&LogEvent>) -> String {
    match event {
        Some(event) => format!(
            "{:?} at {} ms, {} µs",
            event.kind(),
            event.timestamp(),
            event.duration().unwrap_or(0),
        ),
        None => String::from("none"),
    }
}

fn print_summary(
    path: &FPath,
    summary: &SummaryGcLogProcessor,
    store: &EventStore,
    summary_unidentified: bool,
) {
    const OPT_NONE: &str = "unknown";

    println!("File: {}", path);
    println!("  JVM version: {}", store.version().unwrap_or(OPT_NONE));
    println!("  JVM options: {}", store.options().unwrap_or(OPT_NONE));
    println!("  Physical memory: {} bytes, free {} bytes", store.physical_memory(), store.physical_memory_free());
    println!("  Swap: {} bytes, free {} bytes", store.swap(), store.swap_free());
    println!(
        "  Collector families: {}",
        store
            .collector_families()
            .iter()
            .map(|family| format!("{:?}", family))
            .join(", ")
    );
    println!(
        "  Event types: {}",
        store
            .event_types()
            .iter()
            .map(|kind| format!("{:?}", kind))
            .join(", ")
    );
    println!(
        "  Lines: {} processed, {} logical, {} merged, {} informational, {} identified, {} unidentified",
        summary.lines_processed,
        summary.logical_lines,
        summary.lines_merged,
        summary.lines_informational,
        summary.events_identified,
        summary.lines_unidentified,
    );
    println!("  GC events: {}", store.count_blocking());
    println!("    first: {}", event_brief(store.first_gc_event()));
    println!("    last: {}", event_brief(store.last_gc_event()));
    println!("    max: {}", event_brief(store.max_gc_event()));
    println!("    pause max {} ms, total {} ms", store.max_gc_pause(), store.total_gc_pause());
    println!("  Stopped time events: {}", store.count_stopped());
    println!("    max {} ms, total {} ms", store.max_stopped_time(), store.total_stopped_time());
    println!("  Safepoint events: {}", store.count_safepoint());
    println!("    max {} ms, total {} ms", store.max_safepoint_time(), store.total_safepoint_time());
    println!(
        "  Heap: max occupancy {}K, max space {}K, max after GC {}K",
        store.max_heap_occupancy(),
        store.max_heap_space(),
        store.max_heap_after_gc(),
    );
    println!(
        "  Perm/Metaspace: max occupancy {}K, max space {}K, max after GC {}K",
        store.max_perm_occupancy(),
        store.max_perm_space(),
        store.max_perm_after_gc(),
    );
    println!(
        "  Parallel collections: {}, inverted (parallelism < {}): {}",
        store.parallel_count(),
        summary.parallelism_low_threshold,
        store.inverted_parallelism_count(),
    );
    if let Some(event) = store.worst_inverted_parallelism_event() {
        println!(
            "    worst: {} at {} ms",
            event.parallelism().unwrap_or(0),
            event.timestamp(),
        );
    }
    println!("  Analysis: {}", store.analysis().iter().join(", "));
    if summary_unidentified {
        for line in store.unidentified_log_lines().iter() {
            println!("  Unidentified: {}", line);
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// main
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Process all files, print the summaries. Return `true` if every file was
/// processed.
fn processing_loop(
    paths: FPaths,
    config: ProcessorConfig,
    summary_unidentified: bool,
) -> bool {
    defn!("({} paths)", paths.len());
    let (chan_send, chan_recv): (ChanSendDatum, ChanRecvDatum) = crossbeam_channel::unbounded();
    let mut thread_err_count: Count = 0;
    for (pathid, path) in paths.iter().enumerate() {
        let chan_send_ = chan_send.clone();
        let path_ = path.clone();
        let config_ = config.clone();
        if let Err(err) = thread::Builder::new()
            .name(path.clone())
            .spawn(move || exec_fileprocessor_thread(chan_send_, pathid, path_, config_))
        {
            thread_err_count += 1;
            e_err!("thread.name({:?}).spawn() failed {:?}", path, err);
        }
    }
    // the receiver ends when every thread has dropped its sender
    drop(chan_send);

    let mut results: BTreeMap<PathId, FileResult> = BTreeMap::new();
    for (pathid, result) in chan_recv.iter() {
        defo!("received result for PathId {}", pathid);
        results.insert(pathid, result);
    }

    let mut ok: bool = thread_err_count == 0;
    for (pathid, result) in results.into_iter() {
        match result {
            Ok((summary, store)) => {
                let store = match store.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                print_summary(&paths[pathid], &summary, &store, summary_unidentified);
            }
            Err(err) => {
                e_err!("{:#}", err);
                ok = false;
            }
        }
    }
    defx!("return {}", ok);

    ok
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let (paths, config, summary_unidentified) = cli_process_args();
    let ret: bool = processing_loop(paths, config, summary_unidentified);

    let exitcode = if ret { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
