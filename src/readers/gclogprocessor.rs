// src/readers/gclogprocessor.rs

//! Implements a [`GcLogProcessor`], the driver of the processing stages for
//! one JVM garbage collection log.
//!
//! Each physical line passes through these stages, in input order:
//! 1. [`UnifiedPreprocessor`] merges the multi-line unified logging
//!    fragments of one collection into a logical line
//! 2. [`classify_line`] finds the first matching grammar
//! 3. the grammar's extractor builds a [`LogEvent`]
//! 4. the event is inserted into the [`EventStore`]
//!
//! A line that fails stages 2 or 3 is kept verbatim as an unidentified line.
//! Nothing about a single line aborts the run.
//!
//! [`classify_line`]: crate::readers::classifier::classify_line

use crate::common::{Bytes, Count, Kilobytes, Parallelism, PARALLELISM_UNITY};
use crate::data::decorator::DateTimeL;
use crate::data::event::{HeaderData, LogEvent};
use crate::data::extract::ExtractContext;
use crate::data::jdkmath::is_inverted_parallelism;
use crate::readers::analysis::analyze_store;
use crate::readers::classifier::parse_log_line;
use crate::readers::eventstore::{new_shared_store, EventStore, SharedEventStore};
use crate::readers::preprocessor::{PreprocessedLine, PreprocessedLines, UnifiedPreprocessor};

use std::fmt;
use std::io::{BufRead, Error, ErrorKind, Result};
use std::sync::MutexGuard;

use ::si_trace_print::{defn, defo, defx, defñ};

/// Settings of one [`GcLogProcessor`] run.
///
/// The environment metadata, when set, is copied into the store at
/// construction and takes the place of any parsed from the log.
#[derive(Clone, Debug)]
pub struct ProcessorConfig {
    /// Parallel collections with parallelism strictly below this are
    /// inverted.
    pub parallelism_low_threshold: Parallelism,
    /// Reference instant for lines with only a datestamp.
    pub jvm_start: Option<DateTimeL>,
    pub jvm_version: Option<String>,
    pub jvm_options: Option<String>,
    pub physical_memory: Option<Bytes>,
    pub physical_memory_free: Option<Bytes>,
    pub swap: Option<Bytes>,
    pub swap_free: Option<Bytes>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            parallelism_low_threshold: PARALLELISM_UNITY,
            jvm_start: None,
            jvm_version: None,
            jvm_options: None,
            physical_memory: None,
            physical_memory_free: None,
            swap: None,
            swap_free: None,
        }
    }
}

/// Counts from one run of a [`GcLogProcessor`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SummaryGcLogProcessor {
    /// Physical lines passed to the processor.
    pub lines_processed: Count,
    /// Logical lines that left the preprocessor, identified or not.
    pub logical_lines: Count,
    pub events_identified: Count,
    pub lines_unidentified: Count,
    /// Logical lines synthesized from unified logging fragments.
    pub lines_merged: Count,
    /// Informational fragments outside any collection, not classified.
    pub lines_informational: Count,
    pub parallelism_low_threshold: Parallelism,
}

/// Drives one log through the pipeline into one [`EventStore`].
pub struct GcLogProcessor {
    config: ProcessorConfig,
    store: SharedEventStore,
    preprocessor: UnifiedPreprocessor,
    ctx: ExtractContext,
    lines_processed: Count,
    logical_lines: Count,
    events_identified: Count,
    lines_unidentified: Count,
    inverted_parallelism_count: Count,
    /// Lowest parallelism seen among inverted events.
    worst_inverted_parallelism: Option<Parallelism>,
    parallel_count: Count,
    finished: bool,
}

impl fmt::Debug for GcLogProcessor {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("GcLogProcessor")
            .field("config", &self.config)
            .field("preprocessor", &self.preprocessor)
            .field("lines processed", &self.lines_processed)
            .field("events identified", &self.events_identified)
            .field("lines unidentified", &self.lines_unidentified)
            .field("inverted parallelism", &self.inverted_parallelism_count)
            .field("finished?", &self.finished)
            .finish()
    }
}

/// Lock `store`, recovering the guard of a poisoned lock.
///
/// Each store belongs to one run so a panic elsewhere cannot leave it
/// half-written by this run.
fn lock_store(store: &SharedEventStore) -> MutexGuard<'_, EventStore> {
    match store.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl GcLogProcessor {
    /// Create a `GcLogProcessor` with a new store.
    pub fn new(config: ProcessorConfig) -> GcLogProcessor {
        defñ!();
        GcLogProcessor::start(config, new_shared_store())
    }

    /// Create a `GcLogProcessor` that fills `store`.
    ///
    /// Returns `Err` with `ErrorKind::InvalidInput` if another run is using
    /// `store`.
    pub fn with_store(
        config: ProcessorConfig,
        store: SharedEventStore,
    ) -> Result<GcLogProcessor> {
        defn!("({:?})", config);
        {
            let mut guard = lock_store(&store);
            if guard.is_in_use() {
                defx!("store in use");
                return Err(Error::new(
                    ErrorKind::InvalidInput,
                    "EventStore is in use by another run; reset it or create a new one",
                ));
            }
            guard.mark_in_use();
        }
        defx!();

        Ok(GcLogProcessor::start(config, store))
    }

    /// Claim `store` and copy the configured metadata into it.
    fn start(
        config: ProcessorConfig,
        store: SharedEventStore,
    ) -> GcLogProcessor {
        {
            let mut guard = lock_store(&store);
            guard.mark_in_use();
            if let Some(version) = config.jvm_version.as_ref() {
                guard.set_version(version.clone());
            }
            if let Some(options) = config.jvm_options.as_ref() {
                guard.set_options(options.clone());
            }
            if let Some(bytes) = config.physical_memory {
                guard.set_physical_memory(bytes);
            }
            if let Some(bytes) = config.physical_memory_free {
                guard.set_physical_memory_free(bytes);
            }
            if let Some(bytes) = config.swap {
                guard.set_swap(bytes);
            }
            if let Some(bytes) = config.swap_free {
                guard.set_swap_free(bytes);
            }
        }
        let ctx = ExtractContext::new(config.jvm_start);

        GcLogProcessor {
            config,
            store,
            preprocessor: UnifiedPreprocessor::new(),
            ctx,
            lines_processed: 0,
            logical_lines: 0,
            events_identified: 0,
            lines_unidentified: 0,
            inverted_parallelism_count: 0,
            worst_inverted_parallelism: None,
            parallel_count: 0,
            finished: false,
        }
    }

    /// The store this processor fills.
    pub fn store(&self) -> SharedEventStore {
        self.store.clone()
    }

    pub const fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The JVM start reference, set from the configuration or from the first
    /// datestamp seen.
    pub fn jvm_start(&self) -> Option<DateTimeL> {
        self.ctx.jvm_start
    }

    /// Process one physical line, without line terminator.
    pub fn process_line(
        &mut self,
        line: &str,
    ) {
        defn!();
        self.lines_processed += 1;
        let lines: PreprocessedLines = self.preprocessor.process_line(line);
        self.process_preprocessed(lines);
        defx!();
    }

    /// Process every line from `reader`.
    ///
    /// Line terminators `\n` and `\r\n` are removed. Bytes that are not
    /// UTF-8 are replaced.
    pub fn process_reader<R: BufRead>(
        &mut self,
        mut reader: R,
    ) -> Result<()> {
        defn!();
        let mut buffer: Vec<u8> = Vec::with_capacity(256);
        loop {
            buffer.clear();
            let read: usize = match reader.read_until(b'\n', &mut buffer) {
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    defx!("error {}", err);
                    return Err(err);
                }
            };
            if read == 0 {
                break;
            }
            let mut end: usize = buffer.len();
            if end > 0 && buffer[end - 1] == b'\n' {
                end -= 1;
                if end > 0 && buffer[end - 1] == b'\r' {
                    end -= 1;
                }
            }
            let line = String::from_utf8_lossy(&buffer[..end]);
            self.process_line(&line);
        }
        defx!("processed {} lines", self.lines_processed);

        Ok(())
    }

    /// Flush the preprocessor, store the derived state and the analysis
    /// keys.
    ///
    /// Calling `finish` more than once has no further effect.
    pub fn finish(&mut self) -> SummaryGcLogProcessor {
        defn!();
        if !self.finished {
            self.finished = true;
            let lines: PreprocessedLines = self.preprocessor.finish();
            self.process_preprocessed(lines);
            let mut store = lock_store(&self.store);
            store.set_inverted_parallelism_count(self.inverted_parallelism_count);
            store.set_parallel_count(self.parallel_count);
            for key in analyze_store(&store).into_iter() {
                store.add_analysis(key);
            }
        }
        defx!();

        self.summary()
    }

    pub fn summary(&self) -> SummaryGcLogProcessor {
        SummaryGcLogProcessor {
            lines_processed: self.lines_processed,
            logical_lines: self.logical_lines,
            events_identified: self.events_identified,
            lines_unidentified: self.lines_unidentified,
            lines_merged: self.preprocessor.merged_count(),
            lines_informational: self.preprocessor.informational_count(),
            parallelism_low_threshold: self.config.parallelism_low_threshold,
        }
    }

    fn process_preprocessed(
        &mut self,
        lines: PreprocessedLines,
    ) {
        for line in lines.into_iter() {
            match line {
                PreprocessedLine::Logical(text) => {
                    self.logical_lines += 1;
                    match parse_log_line(text.as_str(), &mut self.ctx) {
                        Some(event) => self.process_event(event),
                        None => self.add_unidentified(text),
                    }
                }
                PreprocessedLine::Unidentified(text) => {
                    self.logical_lines += 1;
                    self.add_unidentified(text);
                }
                PreprocessedLine::Informational(_text) => {
                    defñ!("informational {:?}", _text);
                }
            }
        }
    }

    fn add_unidentified(
        &mut self,
        text: String,
    ) {
        defñ!("{:?}", text);
        self.lines_unidentified += 1;
        lock_store(&self.store).add_unidentified_log_line(text);
    }

    /// Update the derived state for `event` then insert it.
    fn process_event(
        &mut self,
        event: LogEvent,
    ) {
        defn!("{:?}", event.kind());
        self.events_identified += 1;
        let store_arc: SharedEventStore = self.store.clone();
        let mut store = lock_store(&store_arc);

        if event.kind().is_parallel_collection() {
            if let Some(parallelism) = event.parallelism() {
                self.parallel_count += 1;
                if is_inverted_parallelism(parallelism, self.config.parallelism_low_threshold) {
                    self.inverted_parallelism_count += 1;
                    let worse: bool = match self.worst_inverted_parallelism {
                        Some(worst) => parallelism < worst,
                        None => true,
                    };
                    if worse {
                        defo!("worst inverted parallelism {}", parallelism);
                        self.worst_inverted_parallelism = Some(parallelism);
                        store.set_worst_inverted_parallelism_event(Some(event.clone()));
                    }
                }
            }
        }

        if !event.is_blocking() {
            Self::update_non_blocking_maxima(&mut store, &event);
        }

        if let Some(header) = event.header() {
            self.apply_header(&mut store, header);
        }

        store.insert(event);
        defx!();
    }

    fn update_non_blocking_maxima(
        store: &mut EventStore,
        event: &LogEvent,
    ) {
        if let Some(combined) = event.combined() {
            if let Some(init) = combined.occupancy_init {
                let kb: Kilobytes = init.as_kilobytes();
                if kb > store.max_heap_occupancy_non_blocking() {
                    store.set_max_heap_occupancy_non_blocking(kb);
                }
            }
            if let Some(space) = combined.space {
                let kb: Kilobytes = space.as_kilobytes();
                if kb > store.max_heap_space_non_blocking() {
                    store.set_max_heap_space_non_blocking(kb);
                }
            }
        }
        if let Some(perm) = event.perm() {
            if let Some(init) = perm.occupancy_init {
                let kb: Kilobytes = init.as_kilobytes();
                if kb > store.max_perm_occupancy_non_blocking() {
                    store.set_max_perm_occupancy_non_blocking(kb);
                }
            }
            if let Some(space) = perm.space {
                let kb: Kilobytes = space.as_kilobytes();
                if kb > store.max_perm_space_non_blocking() {
                    store.set_max_perm_space_non_blocking(kb);
                }
            }
        }
    }

    /// Copy the environment metadata of a banner line into `store` unless
    /// configured.
    fn apply_header(
        &self,
        store: &mut EventStore,
        header: &HeaderData,
    ) {
        match header {
            HeaderData::Version(version) => {
                if self.config.jvm_version.is_none() {
                    store.set_version(version.clone());
                }
            }
            HeaderData::Options(options) => {
                if self.config.jvm_options.is_none() {
                    store.set_options(options.clone());
                }
            }
            HeaderData::Memory { text, physical, physical_free, swap, swap_free } => {
                store.set_memory(text.clone());
                if self.config.physical_memory.is_none() {
                    store.set_physical_memory(*physical);
                }
                if self.config.physical_memory_free.is_none() {
                    store.set_physical_memory_free(*physical_free);
                }
                if self.config.swap.is_none() {
                    store.set_swap(*swap);
                }
                if self.config.swap_free.is_none() {
                    store.set_swap_free(*swap_free);
                }
            }
        }
    }
}

/// Process all of `reader` with a new store, return the store and summary.
pub fn process_log<R: BufRead>(
    config: ProcessorConfig,
    reader: R,
) -> Result<(SharedEventStore, SummaryGcLogProcessor)> {
    let mut processor = GcLogProcessor::new(config);
    processor.process_reader(reader)?;
    let summary = processor.finish();
    defo!("{:?}", summary);

    Ok((processor.store(), summary))
}
