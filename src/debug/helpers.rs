// src/debug/helpers.rs

//! Temporary log file helpers for testing.

#[allow(unused_imports)] // XXX: clippy wrongly marks this as unused
use std::io::Write; // for `NamedTempFile.write_all`

use ::si_trace_print::defñ;

#[doc(hidden)]
pub use ::tempfile::NamedTempFile;

/// NamedTempFile instances default to this file name prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-gcls-test-";

/// Testing helper function to write GC log `content` to a temporary file.
///
/// The file is removed when the returned `NamedTempFile` is dropped.
pub fn create_temp_log(content: &str) -> NamedTempFile {
    let mut ntf = ::tempfile::Builder::new()
        .prefix(STR_TEMPFILE_PREFIX)
        .suffix(".log")
        .tempfile()
        .unwrap();
    ntf.write_all(content.as_bytes()).unwrap();
    ntf.flush().unwrap();
    defñ!("wrote {} bytes to {:?}", content.len(), ntf.path());

    ntf
}
