// src/common.rs

//! Common imports, type aliases, and other globals for _gclslib_.

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling, command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ake `Path` or `F`ile `Path`.
///
/// Type alias `FPath` is a simpler stand-in for formalized file system path
/// [`std::path::Path`].
pub type FPath = String;

/// A list of `FPath`.
pub type FPaths = Vec<FPath>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// counting, time, and size units
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// General purpose counting type, typically used for internal statistics.
pub type Count = u64;

/// Milliseconds since JVM start. The one timeline every event is placed on.
pub type Millis = i64;

/// Microseconds. Event durations are stored in this unit.
pub type Micros = i64;

/// Nanoseconds, as logged by unified safepoint lines.
pub type Nanos = u64;

/// Hundredths of a second. CPU times (`User`, `Sys`, `Real`) are stored in
/// this unit.
pub type Centis = i32;

/// Collector parallelism as a percentage, i.e. `(user + sys) / real * 100`.
pub type Parallelism = i32;

/// The unified logging event sequence id, the `n` in `GC(n)`.
pub type GcId = u64;

/// Kilobytes, the canonical memory unit.
pub type Kilobytes = u64;

/// Bytes, used for environment metadata (physical memory, swap).
pub type Bytes = i64;

/// Parallelism when `real` time is zero but `user + sys` is not.
pub const PARALLELISM_MAX: Parallelism = Parallelism::MAX;

/// Parallelism when all CPU times are zero.
pub const PARALLELISM_UNITY: Parallelism = 100;

/// Environment memory metadata not reported or not configured.
/// Distinguishes "swap absent" from "swap disabled" (zero).
pub const BYTES_UNSET: Bytes = -1;
