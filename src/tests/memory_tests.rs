// src/tests/memory_tests.rs

//! tests for `memory.rs`

#![allow(non_snake_case)]

use crate::common::Kilobytes;
use crate::data::memory::{Memory, Unit};

use ::si_trace_print::stack::stack_offset_set;
use ::test_case::test_case;

#[test_case("983K", 983; "kilobytes")]
#[test_case("983k", 983; "kilobytes lowercase")]
#[test_case("24M", 24 * 1024; "megabytes")]
#[test_case("1G", 1024 * 1024; "gigabytes")]
#[test_case("2048B", 2; "bytes")]
#[test_case("1023B", 0; "bytes rounds down")]
#[test_case("112.0M", 112 * 1024; "fraction zero")]
#[test_case("1.5M", 1536; "fraction half")]
#[test_case("1,5M", 1536; "fraction comma")]
#[test_case("0.1K", 0; "fraction below one kilobyte")]
#[test_case(" 7K ", 7; "surrounding whitespace")]
fn test_Memory_parse(
    text: &str,
    expect_kb: Kilobytes,
) {
    stack_offset_set(Some(2));
    let memory = Memory::parse(text).unwrap();
    assert_eq!(memory.as_kilobytes(), expect_kb, "parse {:?}", text);
    assert_eq!(memory.unit(), Unit::Kilobytes);
}

#[test_case(""; "empty")]
#[test_case("K"; "no magnitude")]
#[test_case("12"; "no unit")]
#[test_case("12X"; "bad unit")]
#[test_case("1.2.3M"; "two separators")]
#[test_case("-1K"; "negative")]
fn test_Memory_parse_err(text: &str) {
    stack_offset_set(Some(2));
    assert!(Memory::parse(text).is_err(), "expected error for {:?}", text);
}

#[test]
fn test_Memory_convert_to_round_trip() {
    let mb = Memory::new(24, Unit::Megabytes);
    let kb = mb.convert_to(Unit::Kilobytes);
    assert_eq!(kb.value(), 24 * 1024);
    assert_eq!(kb.convert_to(Unit::Megabytes), mb);
    assert_eq!(Memory::new(3, Unit::Gigabytes).convert_to(Unit::Megabytes).value(), 3072);
}

#[test]
fn test_Memory_convert_to_rounds_down() {
    assert_eq!(Memory::new(1536, Unit::Kilobytes).convert_to(Unit::Megabytes).value(), 1);
    assert_eq!(Memory::new(1023, Unit::Bytes).convert_to(Unit::Kilobytes).value(), 0);
}

#[test]
fn test_Memory_add() {
    let a = Memory::new(1, Unit::Megabytes);
    let b = Memory::new(512, Unit::Kilobytes);
    assert_eq!((a + b).as_kilobytes(), 1536);
}

#[test]
fn test_Memory_add_opt() {
    let a = Memory::kilobytes(10);
    assert_eq!(Memory::add_opt(Some(a), Some(a)).as_kilobytes(), 20);
    assert_eq!(Memory::add_opt(Some(a), None).as_kilobytes(), 10);
    assert_eq!(Memory::add_opt(None, Some(a)).as_kilobytes(), 10);
    assert_eq!(Memory::add_opt(None, None), Memory::ZERO);
}

#[test]
fn test_Memory_saturating_sub() {
    let a = Memory::kilobytes(10);
    let b = Memory::kilobytes(4);
    assert_eq!(a.saturating_sub(&b).as_kilobytes(), 6);
    assert_eq!(b.saturating_sub(&a).as_kilobytes(), 0);
}

#[test_case('b', Some(Unit::Bytes))]
#[test_case('K', Some(Unit::Kilobytes))]
#[test_case('m', Some(Unit::Megabytes))]
#[test_case('G', Some(Unit::Gigabytes))]
#[test_case('T', None)]
fn test_Unit_from_char(
    c: char,
    expect: Option<Unit>,
) {
    assert_eq!(Unit::from_char(c), expect);
}
