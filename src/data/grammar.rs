// src/data/grammar.rs

//! The grammar registry: an ordered catalog of every GC log line format that
//! can be identified, [`GRAMMAR_DATAS`].
//!
//! Each [`GrammarInstr`] is a regular expression for one logical line, the
//! [`LogEventType`] it produces, how its timestamp relates to the event, and
//! the extraction function that turns its named capture groups into a
//! [`LogEvent`].
//!
//! Capture groups are named. Every grammar that reports, say, a young
//! generation transition uses the same `young_init`, `young_end`,
//! `young_space` group names so one extraction function serves most
//! grammars.
//!
//! [`LogEvent`]: crate::data::event::LogEvent

use crate::data::decorator::{
    CaptureGroupName,
    CaptureGroupPattern,
    RegexPattern,
    CGP_GCID,
    CGP_GCID_OPT,
    RP_LEGACY_INNER_STAMP,
    RP_LEGACY_PREFIX,
    RP_UNIFIED_DECORATOR,
    RP_UNIFIED_DECORATOR_INIT,
};
use crate::data::event::LogEventType;
use crate::data::extract::{
    extract_header_memory,
    extract_header_options,
    extract_header_version,
    extract_safepoint,
    extract_standard,
    ExtractFn,
};

use std::fmt;

use ::const_format::concatcp;
use ::lazy_static::lazy_static;
use ::regex::Regex;

/// Index into [`GRAMMAR_DATAS`].
pub type GrammarIndex = usize;

/// How the timestamp of a line relates to the event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StampRule {
    /// The line carries no timestamp, e.g. banners. Timestamp is `0`.
    NoStamp,
    /// Legacy logging: the timestamp is the event start. Required.
    Start,
    /// Unified logging: the timestamp is the event end unless the line has
    /// the `gc,start` tag set. Required.
    EndUnlessStartTag,
}

/// Region data computed from the combined heap after extraction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Derive {
    Nothing,
    /// Legacy young collections log young and combined heap; old is the
    /// difference.
    OldFromCombined,
    /// Legacy full collections log old and combined heap; young is the
    /// difference.
    YoungFromCombined,
}

/// One grammar of the registry.
pub struct GrammarInstr<'a> {
    /// Regex pattern matched against an entire logical line.
    pub regex_pattern: &'a RegexPattern,
    /// Kind of event produced.
    pub kind: LogEventType,
    pub stamp: StampRule,
    pub derive: Derive,
    /// Named captures to [`LogEvent`].
    ///
    /// [`LogEvent`]: crate::data::event::LogEvent
    pub extract: ExtractFn,
    /// Hardcoded self-test cases.
    #[cfg(any(debug_assertions, test))]
    pub _test_cases: &'a [&'a str],
    /// Source code line number of declaration, to aid debugging.
    pub _line_num: u32,
}

impl fmt::Debug for GrammarInstr<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("GrammarInstr")
            .field("kind", &self.kind)
            .field("stamp", &self.stamp)
            .field("derive", &self.derive)
            .field("regex_pattern", &self.regex_pattern)
            .field("_line_num", &self._line_num)
            .finish()
    }
}

/// Declare a [`GrammarInstr`] more easily.
#[macro_export]
macro_rules! GP {
    (
        $rp:expr,
        $kind:expr,
        $stamp:expr,
        $derive:expr,
        $extract:expr,
        $test_cases:expr,
        $line_num:expr,
    ) => {
        GrammarInstr {
            regex_pattern: $rp,
            kind: $kind,
            stamp: $stamp,
            derive: $derive,
            extract: $extract,
            #[cfg(any(debug_assertions, test))]
            _test_cases: $test_cases,
            _line_num: $line_num,
        }
    };
}
// Allow easy macro import via `use gclslib::data::grammar::GP;`
pub use GP;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// capture group names
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const CGN_YOUNG_INIT: &CaptureGroupName = "young_init";
pub const CGN_YOUNG_END: &CaptureGroupName = "young_end";
pub const CGN_YOUNG_SPACE: &CaptureGroupName = "young_space";
pub const CGN_OLD_INIT: &CaptureGroupName = "old_init";
pub const CGN_OLD_END: &CaptureGroupName = "old_end";
pub const CGN_OLD_SPACE: &CaptureGroupName = "old_space";
pub const CGN_PERM_INIT: &CaptureGroupName = "perm_init";
pub const CGN_PERM_END: &CaptureGroupName = "perm_end";
pub const CGN_PERM_SPACE: &CaptureGroupName = "perm_space";
pub const CGN_COMBINED_INIT: &CaptureGroupName = "combined_init";
pub const CGN_COMBINED_END: &CaptureGroupName = "combined_end";
pub const CGN_COMBINED_SPACE: &CaptureGroupName = "combined_space";

/// Group names of one region: occupancy before, occupancy after, capacity.
pub type RegionNames = [&'static CaptureGroupName; 3];

pub const CGN_YOUNG: RegionNames = [CGN_YOUNG_INIT, CGN_YOUNG_END, CGN_YOUNG_SPACE];
pub const CGN_OLD: RegionNames = [CGN_OLD_INIT, CGN_OLD_END, CGN_OLD_SPACE];
pub const CGN_PERM: RegionNames = [CGN_PERM_INIT, CGN_PERM_END, CGN_PERM_SPACE];
pub const CGN_COMBINED: RegionNames = [CGN_COMBINED_INIT, CGN_COMBINED_END, CGN_COMBINED_SPACE];

pub const CGN_TRIGGER: &CaptureGroupName = "trigger";
pub const CGN_DURATION_MS: &CaptureGroupName = "duration_ms";
pub const CGN_DURATION_SECS: &CaptureGroupName = "duration_secs";
pub const CGN_DURATION_NS: &CaptureGroupName = "duration_ns";
pub const CGN_USER: &CaptureGroupName = "user";
pub const CGN_SYS: &CaptureGroupName = "sys";
pub const CGN_REAL: &CaptureGroupName = "real";
pub const CGN_SAFEPOINT: &CaptureGroupName = "safepoint";
pub const CGN_REACHING_NS: &CaptureGroupName = "reaching_ns";
pub const CGN_AT_NS: &CaptureGroupName = "at_ns";
pub const CGN_VERSION: &CaptureGroupName = "version";
pub const CGN_OPTIONS: &CaptureGroupName = "options";
pub const CGN_PHYSICAL: &CaptureGroupName = "physical";
pub const CGN_PHYSICAL_FREE: &CaptureGroupName = "physical_free";
pub const CGN_SWAP: &CaptureGroupName = "swap";
pub const CGN_SWAP_FREE: &CaptureGroupName = "swap_free";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// regex pattern fragments
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A memory quantity, `983K`, `24M`, `112.0M`.
pub const RP_SIZE: &RegexPattern = r"\d{1,12}(?:[\.,]\d{1,3})?[bBkKmMgG]";

/// A region transition `before->after(capacity)`. JDK17 also logs the
/// capacity before, `6124K(7168K)->0K(7168K)`, which is not captured.
macro_rules! region_transition {
    ($init:expr, $end:expr, $space:expr) => {
        concatcp!(
            "(?P<", $init, ">", RP_SIZE, r")(?:\(", RP_SIZE, r"\))?->",
            "(?P<", $end, ">", RP_SIZE, r")\((?P<", $space, ">", RP_SIZE, r")\)"
        )
    };
}

pub const CGP_YOUNG: &CaptureGroupPattern = region_transition!(CGN_YOUNG_INIT, CGN_YOUNG_END, CGN_YOUNG_SPACE);
pub const CGP_OLD: &CaptureGroupPattern = region_transition!(CGN_OLD_INIT, CGN_OLD_END, CGN_OLD_SPACE);
pub const CGP_PERM: &CaptureGroupPattern = region_transition!(CGN_PERM_INIT, CGN_PERM_END, CGN_PERM_SPACE);
pub const CGP_COMBINED: &CaptureGroupPattern =
    region_transition!(CGN_COMBINED_INIT, CGN_COMBINED_END, CGN_COMBINED_SPACE);

/// Occupancy and capacity without a transition, `4150488K(8303424K)`.
pub const CGP_COMBINED_BEFORE: &CaptureGroupPattern = concatcp!(
    "(?P<", CGN_COMBINED_INIT, ">", RP_SIZE, r")\((?P<", CGN_COMBINED_SPACE, ">", RP_SIZE, r")\)"
);

/// The collection cause, `(Allocation Failure)`, `(System.gc())`.
pub const CGP_TRIGGER: &CaptureGroupPattern = concatcp!(r"\((?P<", CGN_TRIGGER, r">[^()]+(?:\(\))?)\)");

/// Unified duration, `1.767ms`.
pub const CGP_DURATION_MS: &CaptureGroupPattern = concatcp!("(?P<", CGN_DURATION_MS, r">\d{1,9}[\.,]\d{3})ms");

/// Legacy duration, `0.0225410 secs`.
pub const CGP_DURATION_SECS: &CaptureGroupPattern =
    concatcp!("(?P<", CGN_DURATION_SECS, r">\d{1,7}[\.,]\d{3,9}) secs");

/// Legacy duration nested inside an event, not captured.
pub const RP_DURATION_SECS_INNER: &RegexPattern = r"\d{1,7}[\.,]\d{3,9} secs";

/// Stopped time duration, `0.0006540 seconds`.
pub const CGP_DURATION_SECONDS: &CaptureGroupPattern =
    concatcp!("(?P<", CGN_DURATION_SECS, r">\d{1,4}[\.,]\d{7}) seconds");

/// CPU seconds with centisecond precision.
pub const RP_CPU_SECS: &RegexPattern = r"\d{1,7}[\.,]\d{2}";

/// Optional unified CPU times, ` User=0.01s Sys=0.00s Real=0.00s`.
pub const CGP_UNIFIED_TIMES: &CaptureGroupPattern = concatcp!(
    "(?: User=(?P<", CGN_USER, ">", RP_CPU_SECS, ")s",
    " Sys=(?P<", CGN_SYS, ">", RP_CPU_SECS, ")s",
    " Real=(?P<", CGN_REAL, ">", RP_CPU_SECS, ")s)?"
);

/// Optional legacy CPU times, ` [Times: user=0.02 sys=0.00, real=0.02 secs]`.
pub const CGP_LEGACY_TIMES: &CaptureGroupPattern = concatcp!(
    r"(?: \[Times: user=(?P<", CGN_USER, ">", RP_CPU_SECS, ")",
    " sys=(?P<", CGN_SYS, ">", RP_CPU_SECS, ")",
    ", real=(?P<", CGN_REAL, ">", RP_CPU_SECS, r") secs\])?"
);

/// Optional unified metaspace transition.
pub const CGP_UNIFIED_METASPACE_OPT: &CaptureGroupPattern = concatcp!("(?: Metaspace: ", CGP_PERM, ")?");

/// Legacy perm/metaspace block, `[PSPermGen: 13092K->13094K(131072K)]`.
pub const CGP_LEGACY_PERM: &CaptureGroupPattern =
    concatcp!(r"\[(?:Perm |PSPermGen|Metaspace|CMS Perm ): ", CGP_PERM, r"\]");

/// G1 humongous region counts, not captured.
pub const RP_G1_HUMONGOUS_OPT: &RegexPattern = r"(?: Humongous regions: \d{1,6}->\d{1,6})?";

/// G1 young pause type of JDK10+.
pub const RP_G1_YOUNG_TYPE: &RegexPattern = r"\((?:Normal|Concurrent Start|Prepare Mixed|Concurrent End)\)";

/// Shenandoah pause qualifiers, ` (unload classes) (process weakrefs)`.
pub const RP_SHENANDOAH_QUALIFIERS: &RegexPattern = r"(?: \([a-z ]{1,32}\))*";

/// Trailing whitespace allowed at end of every line.
pub const RP_TRAILING: &RegexPattern = r"[ ]*$";

/// The summary of a unified collection: combined heap, duration, times.
const RP_UNIFIED_SUMMARY: &RegexPattern =
    concatcp!(" ", CGP_COMBINED, " ", CGP_DURATION_MS, CGP_UNIFIED_TIMES, RP_TRAILING);

/// Start of a legacy line.
const LP: &RegexPattern = RP_LEGACY_PREFIX;

/// Legacy nested timestamp.
const LIS: &RegexPattern = RP_LEGACY_INNER_STAMP;

/// Start of a unified line with a sequence id.
const UDG: &RegexPattern = concatcp!(RP_UNIFIED_DECORATOR, CGP_GCID);

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// the registry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Length of [`GRAMMAR_DATAS`].
pub const GRAMMAR_DATAS_LEN: usize = 70;

/// The ordered grammar registry.
///
/// Order of declaration matters: grammars are tried from index 0 and the
/// first match wins. Grammars are exclusive in practice because each
/// includes literal event text. Where two grammars could both match the
/// same line, the more specific one is declared first:
///
/// * G1 young/mixed/initial-mark pauses are declared before the generic
///   unified young and old collections. A JDK9 G1 young pause whose trigger
///   is not a `G1 ...` trigger (e.g. `GCLocker Initiated GC`) and that has no
///   G1 detail is identified as [`LogEventType::UnifiedYoung`].
/// * Unified `Pause Full (...)` with a `Metaspace:` detail and no
///   generation names is [`LogEventType::UnifiedG1FullGc`]; without the
///   detail it is [`LogEventType::UnifiedOld`].
/// * `Using <collector>` lines are declared before the `[gc,init]` banner
///   catch-all.
/// * A blank line is declared first of all.
#[rustfmt::skip]
pub const GRAMMAR_DATAS: [GrammarInstr; GRAMMAR_DATAS_LEN] = [
    // ---------------------------------------------------------------------------------------------
    // informational
    //
    GP!(
        r"^[ \t]*$",
        LogEventType::BlankLine, StampRule::NoStamp, Derive::Nothing, extract_standard,
        &["", "   ", "\t"],
        line!(),
    ),
    GP!(
        r"^(?:\[[^\]]{1,64}\])+[ ]*$",
        LogEventType::BlankLine, StampRule::NoStamp, Derive::Nothing, extract_standard,
        &[
            "[0.008s][info][gc,heap,exit ]",
            "[2020-03-17T04:28:48.476-0400][info][gc]  ",
        ],
        line!(),
    ),
    GP!(
        r"^(?:Desired survivor size \d{1,11} bytes, new threshold \d{1,2} \(max(?: threshold)? \d{1,2}\)|- age[ ]+\d{1,2}:[ ]+\d{1,11} bytes,[ ]+\d{1,11} total)[ ]*$",
        LogEventType::TenuringDistribution, StampRule::NoStamp, Derive::Nothing, extract_standard,
        &[
            "Desired survivor size 2228224 bytes, new threshold 1 (max 15)",
            "Desired survivor size 1572864 bytes, new threshold 15 (max threshold 15)",
            "- age   1:    3177664 bytes,    3177664 total",
        ],
        line!(),
    ),
    GP!(
        concatcp!(LP, r"Application time: \d{1,4}[\.,]\d{7} seconds", RP_TRAILING),
        LogEventType::ApplicationConcurrentTime, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "2.124: Application time: 0.4924630 seconds",
            "2016-10-18T10:03:27.435+0200: 2.124: Application time: 0.4924630 seconds",
        ],
        line!(),
    ),
    GP!(
        r"^(?:\[[^\]]{1,64}\])*\[(?:gc,heap,exit|gc,stats|safepoint,stats)[ ]*\] .*$",
        LogEventType::UnifiedFooter, StampRule::NoStamp, Derive::Nothing, extract_standard,
        &[
            "[25.016s][info][gc,heap,exit ] Heap",
            "[25.016s][info][gc,heap,exit ]  garbage-first heap   total 59392K, used 38015K [0x00000000fc000000, 0x0000000100000000)",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // legacy headers
    //
    GP!(
        concatcp!(r"^(?P<", CGN_VERSION, r">(?:Java HotSpot\(TM\)|OpenJDK) .+ VM \(.+\) for .+ JRE \(.+\).*?)", RP_TRAILING),
        LogEventType::HeaderVersion, StampRule::NoStamp, Derive::Nothing, extract_header_version,
        &[
            "OpenJDK 64-Bit Server VM (25.242-b08) for linux-amd64 JRE (1.8.0_242-b08), built on Jan 28 2020 14:28:22 by \"mockbuild\" with gcc 4.8.5 20150623 (Red Hat 4.8.5-39)",
            "Java HotSpot(TM) 64-Bit Server VM (24.85-b08) for linux-amd64 JRE (1.7.0_85-b34), built on Sep 29 2015 08:44:21 by \"java_re\" with gcc 4.3.0 20080428 (Red Hat 4.3.0-8)",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            r"^Memory: \d{1,2}k page, physical (?P<", CGN_PHYSICAL, r">\d{1,12})k\((?P<", CGN_PHYSICAL_FREE, r">\d{1,12})k free\)",
            r"(?:, swap (?P<", CGN_SWAP, r">\d{1,12})k\((?P<", CGN_SWAP_FREE, r">\d{1,12})k free\))?",
            RP_TRAILING
        ),
        LogEventType::HeaderMemory, StampRule::NoStamp, Derive::Nothing, extract_header_memory,
        &[
            "Memory: 4k page, physical 65806300k(58281908k free), swap 16777212k(16777212k free)",
            "Memory: 4k page, physical 8388608k(2097152k free)",
        ],
        line!(),
    ),
    GP!(
        concatcp!(r"^CommandLine flags: (?P<", CGN_OPTIONS, ">.+?)", RP_TRAILING),
        LogEventType::HeaderCommandLineFlags, StampRule::NoStamp, Derive::Nothing, extract_header_options,
        &[
            "CommandLine flags: -XX:InitialHeapSize=2147483648 -XX:MaxHeapSize=2147483648 -XX:+PrintGC -XX:+PrintGCDetails -XX:+UseParallelGC",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // stopped time and safepoints
    //
    GP!(
        concatcp!(
            LP, "Total time for which application threads were stopped: ", CGP_DURATION_SECONDS,
            r"(?:, Stopping threads took: \d{1,4}[\.,]\d{7} seconds)?", RP_TRAILING
        ),
        LogEventType::ApplicationStoppedTime, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "2.618: Total time for which application threads were stopped: 0.0006540 seconds",
            "2016-10-18T10:03:27.435+0200: 2.618: Total time for which application threads were stopped: 0.0006540 seconds, Stopping threads took: 0.0000230 seconds",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            RP_UNIFIED_DECORATOR, "Total time for which application threads were stopped: ", CGP_DURATION_SECONDS,
            r"(?:, Stopping threads took: \d{1,4}[\.,]\d{7} seconds)?", RP_TRAILING
        ),
        LogEventType::ApplicationStoppedTime, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.061s][info][safepoint    ] Total time for which application threads were stopped: 0.0001215 seconds, Stopping threads took: 0.0000271 seconds",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            RP_UNIFIED_DECORATOR, r#"Safepoint "(?P<"#, CGN_SAFEPOINT, r#">[^"]{1,64})", Time since last: \d{1,15} ns, "#,
            r"Reaching safepoint: (?P<", CGN_REACHING_NS, r">\d{1,15}) ns, (?:Cleanup: \d{1,15} ns, )?",
            r"At safepoint: (?P<", CGN_AT_NS, r">\d{1,15}) ns, Total: (?P<", CGN_DURATION_NS, r">\d{1,15}) ns",
            RP_TRAILING
        ),
        LogEventType::UnifiedSafepoint, StampRule::EndUnlessStartTag, Derive::Nothing, extract_safepoint,
        &[
            r#"[0.031s][info][safepoint   ] Safepoint "ICBufferFull", Time since last: 1214400 ns, Reaching safepoint: 60400 ns, At safepoint: 20900 ns, Total: 81300 ns"#,
            r#"[2022-12-29T10:13:48.886+0000][5.119s][info][safepoint] Safepoint "G1CollectForAllocation", Time since last: 8146432 ns, Reaching safepoint: 40144 ns, Cleanup: 1024 ns, At safepoint: 4296456 ns, Total: 4337624 ns"#,
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // unified headers
    //
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR, "Using Serial", RP_TRAILING),
        LogEventType::UsingSerial, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.003s][info][gc] Using Serial"],
        line!(),
    ),
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR, "Using Parallel", RP_TRAILING),
        LogEventType::UsingParallel, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.002s][info][gc] Using Parallel",
            "[2019-02-05T14:47:31.091-0200][info][gc     ] Using Parallel",
        ],
        line!(),
    ),
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR, "Using Concurrent Mark Sweep", RP_TRAILING),
        LogEventType::UsingCms, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.003s][info][gc] Using Concurrent Mark Sweep"],
        line!(),
    ),
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR, "Using G1", RP_TRAILING),
        LogEventType::UsingG1, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.005s][info][gc     ] Using G1"],
        line!(),
    ),
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR, "Using Shenandoah", RP_TRAILING),
        LogEventType::UsingShenandoah, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.006s][info][gc] Using Shenandoah"],
        line!(),
    ),
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR, r"Using The Z Garbage Collector(?: \(generational\))?", RP_TRAILING),
        LogEventType::UsingZ, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.018s][info][gc,init] Using The Z Garbage Collector"],
        line!(),
    ),
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR_INIT, "Version: (?P<", CGN_VERSION, ">.+?)", RP_TRAILING),
        LogEventType::UnifiedHeaderVersion, StampRule::EndUnlessStartTag, Derive::Nothing, extract_header_version,
        &["[0.013s][info][gc,init] Version: 17.0.1+12-LTS (release)"],
        line!(),
    ),
    GP!(
        concatcp!(RP_UNIFIED_DECORATOR_INIT, ".+?", RP_TRAILING),
        LogEventType::UnifiedHeader, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.013s][info][gc,init] CPUs: 12 total, 12 available",
            "[0.013s][info][gc,init] Heap Region Size: 1M",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            RP_UNIFIED_DECORATOR,
            r"(?:Heap region size: \d{1,4}M|Heap address: .+|Heap Min Capacity: .+|Heap Initial Capacity: .+|Heap Max Capacity: .+|Periodic GC: .+|Min heap equals to max heap, disabling ShrinkHeapInSteps|Heuristics ergonomically sets .+|Humongous object threshold: .+|Max TLAB size: .+|Regions: .+)",
            RP_TRAILING
        ),
        LogEventType::UnifiedHeader, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.004s][info][gc,heap] Heap region size: 1M",
            "[0.014s][info][gc,heap,coops] Heap address: 0x00000006c2800000, size: 4056 MB, Compressed Oops mode: Zero based, Oop shift amount: 3",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // legacy serial
    //
    GP!(
        concatcp!(
            LP, r"\[GC(?: ", CGP_TRIGGER, ")? ", LIS, r"\[DefNew: ", CGP_YOUNG, ", ", RP_DURATION_SECS_INNER, r"\] ",
            CGP_COMBINED, ", ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::SerialNew, StampRule::Start, Derive::OldFromCombined, extract_standard,
        &[
            "10.204: [GC 10.204: [DefNew: 36825K->4352K(39424K), 0.0224830 secs] 36825K->6327K(126848K), 0.0225410 secs] [Times: user=0.02 sys=0.00, real=0.02 secs]",
            "2.213: [GC (Allocation Failure) 2.213: [DefNew: 2752K->320K(3072K), 0.0040560 secs] 2752K->1011K(9920K), 0.0041090 secs] [Times: user=0.00 sys=0.00, real=0.01 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[Full GC(?: ", CGP_TRIGGER, ")? ", LIS, r"\[Tenured: ", CGP_OLD, ", ", RP_DURATION_SECS_INNER, r"\] ",
            CGP_COMBINED, ", ", CGP_LEGACY_PERM, ", ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::SerialOld, StampRule::Start, Derive::YoungFromCombined, extract_standard,
        &[
            "1.474: [Full GC (System.gc()) 1.474: [Tenured: 0K->1193K(87424K), 0.0255580 secs] 2935K->1193K(126720K), [Metaspace: 2711K->2711K(1056768K)], 0.0256890 secs] [Times: user=0.02 sys=0.00, real=0.03 secs]",
            "2.457: [Full GC 2.457: [Tenured: 1193K->1193K(87424K), 0.0246080 secs] 1193K->1193K(126720K), [Perm : 2711K->2711K(21248K)], 0.0246980 secs]",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // legacy parallel
    //
    GP!(
        concatcp!(
            LP, r"\[GC(?:--)?(?: ", CGP_TRIGGER, r")?(?:--)? \[PSYoungGen: ", CGP_YOUNG, r"\] ",
            CGP_COMBINED, ", ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::ParallelScavenge, StampRule::Start, Derive::OldFromCombined, extract_standard,
        &[
            "19810.091: [GC (Allocation Failure) [PSYoungGen: 27808K->632K(28032K)] 160183K->133159K(585088K), 0.0225213 secs] [Times: user=0.08 sys=0.00, real=0.02 secs]",
            "10.392: [GC [PSYoungGen: 99808K->11153K(115200K)] 185208K->96553K(371456K), 0.0267550 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[Full GC(?: ", CGP_TRIGGER, r")? \[PSYoungGen: ", CGP_YOUNG, r"\] \[PSOldGen: ", CGP_OLD, r"\] ",
            CGP_COMBINED, r",? \[(?:PSPermGen|Metaspace): ", CGP_PERM, r"\],? ", CGP_DURATION_SECS, r"\]",
            CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::ParallelSerialOld, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "3.600: [Full GC [PSYoungGen: 5424K->0K(38208K)] [PSOldGen: 488K->5786K(87424K)] 5912K->5786K(125632K) [PSPermGen: 13092K->13094K(131072K)], 0.0699360 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[Full GC(?: ", CGP_TRIGGER, r")? \[PSYoungGen: ", CGP_YOUNG, r"\] \[ParOldGen: ", CGP_OLD, r"\] ",
            CGP_COMBINED, r",? \[(?:PSPermGen|Metaspace): ", CGP_PERM, r"\],? ", CGP_DURATION_SECS, r"\]",
            CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::ParallelCompactingOld, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "2182.541: [Full GC (Ergonomics) [PSYoungGen: 1940K->0K(98560K)] [ParOldGen: 813929K->422305K(815616K)] 815869K->422305K(914176K), [Metaspace: 72907K->72907K(1114112K)], 0.6183430 secs] [Times: user=1.92 sys=0.02, real=0.62 secs]",
            "1.234: [Full GC [PSYoungGen: 960K->0K(13824K)] [ParOldGen: 26648K->24586K(40960K)] 27608K->24586K(54784K) [PSPermGen: 22271K->22271K(44544K)], 0.1354730 secs] [Times: user=0.31 sys=0.00, real=0.14 secs]",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // legacy CMS
    //
    GP!(
        concatcp!(
            LP, r"\[GC(?: ", CGP_TRIGGER, ")? ", LIS, r"\[ParNew: ", CGP_YOUNG, ", ", RP_DURATION_SECS_INNER, r"\] ",
            CGP_COMBINED, ", ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::ParNew, StampRule::Start, Derive::OldFromCombined, extract_standard,
        &[
            "20.189: [GC 20.190: [ParNew: 86199K->8454K(91712K), 0.0375060 secs] 89399K->11655K(907328K), 0.0387074 secs] [Times: user=0.08 sys=0.00, real=0.04 secs]",
            "2016-10-18T10:03:27.435+0200: 42.342: [GC (Allocation Failure) 2016-10-18T10:03:27.435+0200: 42.342: [ParNew: 1284095K->66106K(1412928K), 0.0435316 secs] 1284095K->66106K(4554752K), 0.0436773 secs] [Times: user=0.27 sys=0.02, real=0.04 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[Full GC(?: ", CGP_TRIGGER, ")? ", LIS, r"\[CMS: ", CGP_OLD, ", ", RP_DURATION_SECS_INNER, r"\] ",
            CGP_COMBINED, ", ", CGP_LEGACY_PERM, ", ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::CmsSerialOld, StampRule::Start, Derive::YoungFromCombined, extract_standard,
        &[
            "5.980: [Full GC 5.980: [CMS: 5589K->5796K(122880K), 0.0889610 secs] 11695K->5796K(131072K), [CMS Perm : 13140K->13124K(131072K)], 0.0891270 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[GC(?: \((?P<", CGN_TRIGGER, r">CMS Initial Mark)\))? \[1 CMS-initial-mark: \d{1,12}K\(\d{1,12}K\)\] ",
            CGP_COMBINED_BEFORE, ", ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::CmsInitialMark, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "251.763: [GC (CMS Initial Mark) [1 CMS-initial-mark: 4133273K(8388608K)] 4150488K(8303424K), 0.0174433 secs] [Times: user=0.04 sys=0.00, real=0.01 secs]",
            "8.722: [GC [1 CMS-initial-mark: 0K(6291456K)] 1151454K(8126464K), 0.0544850 secs] [Times: user=0.05 sys=0.00, real=0.05 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[GC(?: \((?P<", CGN_TRIGGER, r">CMS Final Remark)\))?[ ]?\[YG occupancy: \d{1,12} K \(\d{1,12} K\)\].*",
            r"\[1 CMS-remark: \d{1,12}K\(\d{1,12}K\)\] ", CGP_COMBINED_BEFORE, ", ", CGP_DURATION_SECS, r"\]",
            CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::CmsRemark, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "253.103: [GC (CMS Final Remark) [YG occupancy: 16172 K (149120 K)]253.103: [Rescan (parallel) , 0.0226730 secs]253.126: [weak refs processing, 0.0000610 secs]253.126: [class unloading, 0.0003050 secs]253.126: [scrub symbol table, 0.0007670 secs]253.127: [scrub string table, 0.0001020 secs][1 CMS-remark: 4166434K(8388608K)] 4182607K(8537728K), 0.0242870 secs] [Times: user=0.06 sys=0.00, real=0.02 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[CMS-concurrent-(?:mark|preclean|abortable-preclean|sweep|reset)",
            r"(?:-start\]|: \d{1,6}[\.,]\d{3}/\d{1,6}[\.,]\d{3} secs\])", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::CmsConcurrent, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "251.781: [CMS-concurrent-mark-start]",
            "252.797: [CMS-concurrent-mark: 1.016/1.016 secs] [Times: user=1.54 sys=0.04, real=1.02 secs]",
            "253.128: [CMS-concurrent-abortable-preclean-start]",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // legacy G1
    //
    GP!(
        concatcp!(
            LP, r"\[GC pause(?: ", CGP_TRIGGER, r")? \(young\) ", CGP_COMBINED, ", ", CGP_DURATION_SECS, r"\]",
            CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::G1YoungPause, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "1113.145: [GC pause (G1 Evacuation Pause) (young) 1227M->1067M(2048M), 0.0204270 secs]",
            "0.807: [GC pause (young) 65M->8142K(1024M), 0.0048580 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[GC pause(?: ", CGP_TRIGGER, r")? \(young\) \(initial-mark\) ", CGP_COMBINED, ", ",
            CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::G1YoungInitialMark, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "1.519: [GC pause (G1 Humongous Allocation) (young) (initial-mark) 35M->35M(1024M), 0.0031310 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[GC pause(?: ", CGP_TRIGGER, r")? \(mixed\) ", CGP_COMBINED, ", ", CGP_DURATION_SECS, r"\]",
            CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::G1MixedPause, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "2972.698: [GC pause (G1 Evacuation Pause) (mixed) 1191M->1188M(2048M), 0.0238140 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[Full GC(?: ", CGP_TRIGGER, r")? {1,2}", CGP_COMBINED, r"(?:, \[Metaspace: ", CGP_PERM, r"\])?, ",
            CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::G1FullGc, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "2.847: [Full GC (System.gc()) 1042M->38M(2048M), 0.2046891 secs]",
            "1.234: [Full GC (Metadata GC Threshold)  46M->12M(1024M), [Metaspace: 20507K->20507K(1067008K)], 0.0683460 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(LP, r"\[GC remark(?: .+?)?, ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING),
        LogEventType::G1Remark, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "2.998: [GC remark, 0.0017300 secs]",
            "2971.469: [GC remark 2971.470: [GC ref-proc, 0.0000440 secs], 0.0034170 secs] [Times: user=0.01 sys=0.00, real=0.00 secs]",
        ],
        line!(),
    ),
    GP!(
        concatcp!(LP, r"\[GC cleanup ", CGP_COMBINED, ", ", CGP_DURATION_SECS, r"\]", CGP_LEGACY_TIMES, RP_TRAILING),
        LogEventType::G1Cleanup, StampRule::Start, Derive::Nothing, extract_standard,
        &["2972.698: [GC cleanup 1191M->1191M(2048M), 0.0012730 secs]"],
        line!(),
    ),
    GP!(
        concatcp!(
            LP, r"\[GC concurrent-(?:root-region-scan|mark|cleanup|mark-reset|string-deduplication)",
            r"(?:-start\]|-end, ", CGP_DURATION_SECS, r"\]|-abort\])", CGP_LEGACY_TIMES, RP_TRAILING
        ),
        LogEventType::G1Concurrent, StampRule::Start, Derive::Nothing, extract_standard,
        &[
            "27744.494: [GC concurrent-mark-start]",
            "27744.501: [GC concurrent-root-region-scan-end, 0.0046990 secs]",
            "2.512: [GC concurrent-mark-reset-start]",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // unified serial, parallel, CMS (preprocessed, with generation detail)
    //
    GP!(
        concatcp!(
            UDG, "Pause Young ", CGP_TRIGGER, " DefNew: ", CGP_YOUNG, " Tenured: ", CGP_OLD,
            CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedSerialNew, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.041s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) DefNew: 983K->128K(1152K) Tenured: 0K->458K(768K) Metaspace: 246K->246K(1056768K) 0M->0M(1M) 1.393ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, "Pause Full ", CGP_TRIGGER, " DefNew: ", CGP_YOUNG, " Tenured: ", CGP_OLD,
            CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedSerialOld, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.075s][info][gc,start     ] GC(3) Pause Full (Allocation Failure) DefNew: 1125K->0K(1152K) Tenured: 458K->929K(960K) Metaspace: 697K->697K(1056768K) 1M->0M(2M) 3.061ms User=0.01s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, "Pause Young ", CGP_TRIGGER, " PSYoungGen: ", CGP_YOUNG, " ParOldGen: ", CGP_OLD,
            CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedParallelScavenge, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.031s][info][gc,start     ] GC(2) Pause Young (Allocation Failure) PSYoungGen: 1527K->496K(1536K) ParOldGen: 480K->1096K(2048K) Metaspace: 701K->701K(1056768K) 1M->1M(3M) 1.183ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, "Pause Full ", CGP_TRIGGER, " PSYoungGen: ", CGP_YOUNG, " ParOldGen: ", CGP_OLD,
            CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedParallelCompactingOld, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.083s][info][gc,start     ] GC(3) Pause Full (Ergonomics) PSYoungGen: 502K->496K(1536K) ParOldGen: 472K->432K(2048K) Metaspace: 701K->701K(1056768K) 0M->0M(3M) 4.336ms User=0.01s Sys=0.00s Real=0.01s",
            "[2022-02-08T07:33:14.540+0000][7732788ms] GC(112) Pause Full (Ergonomics) PSYoungGen: 6124K(7168K)->0K(7168K) ParOldGen: 17736K(20480K)->17721K(20480K) Metaspace: 3735K(3968K)->3735K(3968K) 23M->17M(27M) 74.961ms User=0.54s Sys=0.00s Real=0.07s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, "Pause Young ", CGP_TRIGGER, " ParNew: ", CGP_YOUNG, " CMS: ", CGP_OLD,
            CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedParNew, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.053s][info][gc,start     ] GC(1) Pause Young (Allocation Failure) ParNew: 974K->128K(1152K) CMS: 0K->518K(960K) Metaspace: 250K->250K(1056768K) 0M->0M(2M) 3.544ms User=0.01s Sys=0.00s Real=0.01s",
            "[2022-10-25T08:41:22.776-0400] GC(0) Pause Young (Allocation Failure) ParNew: 2944K->320K(3264K) CMS: 0K->1201K(7040K) Metaspace: 1162K(1216K)->1162K(1216K) 2M->1M(10M) 2.416ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Initial Mark", RP_UNIFIED_SUMMARY),
        LogEventType::UnifiedCmsInitialMark, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.053s][info][gc] GC(1) Pause Initial Mark 1M->1M(2M) 0.278ms User=0.00s Sys=0.00s Real=0.00s"],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // unified G1
    //
    GP!(
        concatcp!(
            UDG, "Pause Initial Mark ", CGP_TRIGGER, RP_G1_HUMONGOUS_OPT, CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedG1YoungInitialMark, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[2020-02-14T15:21:55.207-0500][info][gc           ] GC(44) Pause Initial Mark (G1 Humongous Allocation) 562M->5M(1250M) 1.212ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Remark", RP_UNIFIED_SUMMARY),
        LogEventType::UnifiedRemark, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[7.944s][info][gc] GC(6432) Pause Remark 8M->8M(10M) 1.767ms",
            "[16.053s][info][gc] GC(969) Pause Remark 29M->29M(46M) 2.328ms User=0.01s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Cleanup", RP_UNIFIED_SUMMARY),
        LogEventType::UnifiedG1Cleanup, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[16.082s][info][gc] GC(969) Pause Cleanup 28M->28M(46M) 0.064ms User=0.00s Sys=0.00s Real=0.00s"],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, r"Pause Young \(Mixed\) ", CGP_TRIGGER, RP_G1_HUMONGOUS_OPT, CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedG1MixedPause, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[16.629s][info][gc,start      ] GC(1355) Pause Young (Mixed) (G1 Evacuation Pause) Metaspace: 3801K->3801K(1056768K) 15M->12M(31M) 1.202ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Mixed ", CGP_TRIGGER, RP_G1_HUMONGOUS_OPT, CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY),
        LogEventType::UnifiedG1MixedPause, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[2019-05-09T01:39:07.136+0000][5413ms] GC(24) Pause Mixed (G1 Evacuation Pause) 61M->37M(1024M) 12.103ms"],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, "Pause Young ", RP_G1_YOUNG_TYPE, " ", CGP_TRIGGER, RP_G1_HUMONGOUS_OPT, CGP_UNIFIED_METASPACE_OPT,
            RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedG1YoungPause, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.337s][info][gc,start     ] GC(0) Pause Young (Normal) (G1 Evacuation Pause) Metaspace: 3801K->3801K(1056768K) 24M->13M(31M) 0.753ms User=0.00s Sys=0.00s Real=0.00s",
            "[2.640s][info][gc] GC(10) Pause Young (Concurrent Start) (G1 Humongous Allocation) 34M->19M(64M) 0.872ms",
        ],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, r"Pause Young \((?P<", CGN_TRIGGER, r">G1 Evacuation Pause|G1 Humongous Allocation|G1 Preventive Collection)\)",
            RP_G1_HUMONGOUS_OPT, CGP_UNIFIED_METASPACE_OPT, RP_UNIFIED_SUMMARY
        ),
        LogEventType::UnifiedG1YoungPause, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.071s][info][gc] GC(0) Pause Young (G1 Evacuation Pause) 6M->3M(1024M) 8.143ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Full ", CGP_TRIGGER, RP_G1_HUMONGOUS_OPT, " Metaspace: ", CGP_PERM, RP_UNIFIED_SUMMARY),
        LogEventType::UnifiedG1FullGc, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[2021-03-13T03:37:40.051+0530][79853119ms] GC(8646) Pause Full (G1 Evacuation Pause) Metaspace: 214120K->214120K(1257472K) 8186M->8178M(8192M) 35.909ms User=0.01s Sys=0.00s Real=0.04s",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // unified, no generation detail
    //
    GP!(
        concatcp!(UDG, "Pause Young ", CGP_TRIGGER, RP_UNIFIED_SUMMARY),
        LogEventType::UnifiedYoung, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.029s][info][gc] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 0.521ms",
            "[2019-05-09T01:39:00.821+0000][5413ms] GC(0) Pause Young (GCLocker Initiated GC) 2M->1M(7M) 0.981ms User=0.00s Sys=0.00s Real=0.00s",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Full ", CGP_TRIGGER, RP_UNIFIED_SUMMARY),
        LogEventType::UnifiedOld, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.091s][info][gc] GC(3) Pause Full (Ergonomics) 0M->0M(3M) 4.336ms User=0.01s Sys=0.00s Real=0.01s",
            "[5.003s][info][gc] GC(7) Pause Full (System.gc()) 8M->7M(25M) 33.261ms",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // Shenandoah
    //
    GP!(
        concatcp!(UDG, "Pause Init Mark", RP_SHENANDOAH_QUALIFIERS, " ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ShenandoahInitMark, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.437s][info][gc] GC(0) Pause Init Mark (unload classes) 0.295ms",
            "[41.911s][info][gc] GC(1500) Pause Init Mark (update refs) (process weakrefs) 0.295ms",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Final Mark", RP_SHENANDOAH_QUALIFIERS, " ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ShenandoahFinalMark, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.531s][info][gc] GC(1) Pause Final Mark (unload classes) 0.411ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Init Update Refs ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ShenandoahInitUpdate, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.544s][info][gc] GC(1) Pause Init Update Refs 0.017ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Final Update Refs ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ShenandoahFinalUpdate, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.570s][info][gc] GC(1) Pause Final Update Refs 0.049ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Full", RP_UNIFIED_SUMMARY),
        LogEventType::ShenandoahFullGc, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[2020-06-16T12:34:40.425-0400][1001ms] GC(0) Pause Full 1589M->1002M(1690M) 1202.671ms"],
        line!(),
    ),
    GP!(
        concatcp!(
            RP_UNIFIED_DECORATOR, CGP_GCID_OPT,
            "Concurrent (?:reset|marking|precleaning|evacuation|update references|cleanup|class unloading|weak references|weak roots|strong roots|thread roots|mark roots|update thread roots|uncommit)",
            RP_SHENANDOAH_QUALIFIERS, "(?: ", CGP_COMBINED, ")? ", CGP_DURATION_MS, RP_TRAILING
        ),
        LogEventType::ShenandoahConcurrent, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.437s][info][gc] GC(0) Concurrent reset 15M->16M(64M) 0.032ms",
            "[0.528s][info][gc] GC(1) Concurrent marking (process weakrefs) 17M->19M(64M) 2.302ms",
            "[2.345s][info][gc] Concurrent uncommit 1M->1M(64M) 0.101ms",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // Z
    //
    GP!(
        concatcp!(UDG, "Pause Mark Start ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZMarkStart, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.129s][info][gc,phases   ] GC(0) Pause Mark Start 0.009ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Mark End ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZMarkEnd, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.132s][info][gc,phases   ] GC(0) Pause Mark End 0.012ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "Pause Relocate Start ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZRelocateStart, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.135s][info][gc,phases   ] GC(0) Pause Relocate Start 0.006ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, r"[yY]: Pause Mark Start(?: \(Major\))? ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZMarkStartYoung, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.129s][info][gc,phases   ] GC(0) y: Pause Mark Start 0.007ms",
            "[0.023s][info][gc,phases   ] GC(0) Y: Pause Mark Start (Major) 0.018ms",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "[yY]: Pause Mark End ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZMarkEndYoung, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.131s][info][gc,phases   ] GC(0) y: Pause Mark End 0.010ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "[yY]: Pause Relocate Start ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZRelocateStartYoung, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.133s][info][gc,phases   ] GC(0) y: Pause Relocate Start 0.005ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, r"O: Pause Mark Start(?: \(Major\))? ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZMarkStartOld, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.201s][info][gc,phases   ] GC(2) O: Pause Mark Start 0.004ms"],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "O: Pause Mark End ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZMarkEndOld, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.213s][info][gc,phases   ] GC(2) O: Pause Mark End 0.005ms",
            "[2021-03-09T14:45:02.441-0300][0.213s][info][gc,phases   ] GC(2) O: Pause Mark End 0.005ms",
        ],
        line!(),
    ),
    GP!(
        concatcp!(UDG, "O: Pause Relocate Start ", CGP_DURATION_MS, RP_TRAILING),
        LogEventType::ZRelocateStartOld, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &["[0.255s][info][gc,phases   ] GC(2) O: Pause Relocate Start 0.006ms"],
        line!(),
    ),
    GP!(
        concatcp!(
            UDG, "(?:Garbage|Major|Minor) Collection ", CGP_TRIGGER,
            " (?P<", CGN_COMBINED_INIT, ">", RP_SIZE, r")\(\d{1,3}%\)->(?P<", CGN_COMBINED_END, ">", RP_SIZE, r")\(\d{1,3}%\)",
            r"(?: (?P<", CGN_DURATION_SECS, r">\d{1,7}[\.,]\d{3})s)?", RP_TRAILING
        ),
        LogEventType::ZCollection, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[0.275s][info][gc          ] GC(2) Garbage Collection (Warmup) 25M(2%)->12M(1%)",
            "[1.064s][info][gc] GC(0) Major Collection (Warmup) 34M(0%)->20M(0%) 0.049s",
        ],
        line!(),
    ),
    // ---------------------------------------------------------------------------------------------
    // unified concurrent phases (CMS, G1, Z)
    //
    GP!(
        concatcp!(
            UDG,
            r"(?:[yYO]: )?Concurrent (?:Mark Cycle|Mark From Roots|Mark Abort|Mark Free|Mark Continue|Mark Roots Colored|Mark Roots Uncolored|Mark Roots|Mark|Preclean|Abortable Preclean|Sweep|Reset Relocation Set|Reset|Cycle|Clear Claimed Marks|Scan Root Regions|Rebuild Remembered Sets and Scrub Regions|Rebuild Remembered Sets|Cleanup for Next Mark|Create Live Data|Complete Cleanup|Undo Cycle|Process Non-Strong References|Process Non-Strong|Relocate|Select Relocation Set|Prepare Relocation Set|Remap Roots Colored|Remap Roots Uncolored|Remap Roots|Rebuild and Scrub)",
            r"(?: \(\d{1,7}[\.,]\d{3}s(?:, \d{1,7}[\.,]\d{3}s)?\))?(?: ", CGP_DURATION_MS, ")?", RP_TRAILING
        ),
        LogEventType::UnifiedConcurrent, StampRule::EndUnlessStartTag, Derive::Nothing, extract_standard,
        &[
            "[16.601s][info][gc] GC(1355) Concurrent Mark Cycle",
            "[16.050s][info][gc,marking   ] GC(969) Concurrent Mark (16.017s, 16.050s) 33.614ms",
            "[0.092s][info][gc] GC(3) Concurrent Reset 0.150ms",
            "[0.260s][info][gc,phases   ] GC(2) O: Concurrent Mark 8.125ms",
        ],
        line!(),
    ),
];

lazy_static! {
    /// [`GRAMMAR_DATAS`] compiled, same index order.
    pub static ref GRAMMAR_DATAS_REGEX_VEC: Vec<Regex> = {
        GRAMMAR_DATAS
            .iter()
            .map(|x| Regex::new(x.regex_pattern).unwrap())
            .collect()
    };
}
