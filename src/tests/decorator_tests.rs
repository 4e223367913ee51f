// src/tests/decorator_tests.rs

//! tests for `decorator.rs` and timestamp resolution in `extract.rs`

#![allow(non_snake_case)]

use crate::common::Millis;
use crate::data::decorator::{
    datestamp_millis_since,
    datestamp_to_datetime,
    is_start_tags,
    DateTimeL,
    RP_LEGACY_PREFIX,
    RP_UNIFIED_DECORATOR,
};
use crate::data::extract::{resolve_timestamp, ExtractContext};

use ::lazy_static::lazy_static;
use ::regex::Regex;
use ::si_trace_print::stack::stack_offset_set;
use ::test_case::test_case;

lazy_static! {
    static ref UNIFIED_REGEX: Regex = Regex::new(RP_UNIFIED_DECORATOR).unwrap();
    static ref LEGACY_REGEX: Regex = Regex::new(RP_LEGACY_PREFIX).unwrap();
    static ref JVM_START: DateTimeL = datestamp_to_datetime("2021-03-09T14:45:00.000-0300").unwrap();
}

#[test_case("2021-03-09T14:45:02.441-0300")]
#[test_case("2021-03-09T14:45:02,441-0300"; "comma")]
#[test_case("2021-03-09T17:45:02.441Z"; "zulu")]
#[test_case("2021-03-09T17:45:02.441+0000"; "utc")]
fn test_datestamp_to_datetime(datestamp: &str) {
    stack_offset_set(Some(2));
    let dt = datestamp_to_datetime(datestamp).unwrap();
    let expect = DateTimeL::parse_from_rfc3339("2021-03-09T17:45:02.441+00:00").unwrap();
    assert_eq!(dt, expect, "datestamp {:?}", datestamp);
}

#[test_case("2021-03-09 14:45:02.441-0300"; "space separator")]
#[test_case("2021-03-09T14:45:02-0300"; "no millis")]
#[test_case("7.944"; "uptime")]
#[test_case(""; "empty")]
fn test_datestamp_to_datetime_err(datestamp: &str) {
    assert!(datestamp_to_datetime(datestamp).is_err());
}

#[test]
fn test_datestamp_millis_since() {
    let millis = datestamp_millis_since("2021-03-09T14:45:02.441-0300", &JVM_START).unwrap();
    assert_eq!(millis, 2441);
    let millis = datestamp_millis_since("2021-03-09T14:45:00.000-0300", &JVM_START).unwrap();
    assert_eq!(millis, 0);
}

#[test]
fn test_datestamp_millis_since_before_start() {
    assert!(datestamp_millis_since("2021-03-09T14:44:59.999-0300", &JVM_START).is_err());
}

#[test_case("gc,start", true)]
#[test_case("gc,start     ", true; "padded")]
#[test_case("gc", false)]
#[test_case("gc,phases,start", false)]
#[test_case("gc,cpu", false)]
fn test_is_start_tags(
    tags: &str,
    expect: bool,
) {
    assert_eq!(is_start_tags(tags), expect);
}

#[test_case("[7.944s][info][gc] ", 7944; "uptime")]
#[test_case("[7944ms][info][gc] ", 7944; "uptimemillis")]
#[test_case("[7.944s][7944ms] ", 7944; "both agree")]
#[test_case("[7.000s][7944ms] ", 7944; "uptimemillis preferred")]
#[test_case("[2021-03-09T14:45:02.441-0300][0.213s][info][gc,phases   ] ", 213; "uptime preferred over datestamp")]
#[test_case("[2021-03-09T14:45:02.441-0300][info][gc] ", 2441; "datestamp only")]
fn test_resolve_timestamp_unified(
    line: &str,
    expect: Millis,
) {
    stack_offset_set(Some(2));
    let captures = UNIFIED_REGEX.captures(line).unwrap();
    let mut ctx = ExtractContext::new(Some(*JVM_START));
    assert_eq!(resolve_timestamp(&captures, &mut ctx).unwrap(), expect, "line {:?}", line);
}

#[test_case("19810.091: ", 19810091; "uptime")]
#[test_case("2021-03-09T14:45:02.441-0300: 2.124: ", 2124; "uptime preferred over datestamp")]
#[test_case("2021-03-09T14:45:02.441-0300: ", 2441; "datestamp only")]
fn test_resolve_timestamp_legacy(
    line: &str,
    expect: Millis,
) {
    let captures = LEGACY_REGEX.captures(line).unwrap();
    let mut ctx = ExtractContext::new(Some(*JVM_START));
    assert_eq!(resolve_timestamp(&captures, &mut ctx).unwrap(), expect, "line {:?}", line);
}

#[test]
fn test_resolve_timestamp_missing() {
    let captures = UNIFIED_REGEX.captures("[info][gc] ").unwrap();
    let mut ctx = ExtractContext::default();
    assert!(resolve_timestamp(&captures, &mut ctx).is_err());
}

#[test]
fn test_resolve_timestamp_first_datestamp_is_reference() {
    let mut ctx = ExtractContext::default();
    assert!(ctx.jvm_start.is_none());
    let captures = UNIFIED_REGEX
        .captures("[2021-03-09T14:45:02.441-0300][info][gc] ")
        .unwrap();
    assert_eq!(resolve_timestamp(&captures, &mut ctx).unwrap(), 0);
    assert!(ctx.jvm_start.is_some());
    let captures = UNIFIED_REGEX
        .captures("[2021-03-09T14:45:03.000-0300][info][gc] ")
        .unwrap();
    assert_eq!(resolve_timestamp(&captures, &mut ctx).unwrap(), 559);
}
