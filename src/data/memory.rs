// src/data/memory.rs

//! Implements [`Memory`], a memory quantity as logged by a JVM collector,
//! and [`Unit`].
//!
//! Logged quantities look like `983K`, `24M`, `1G`, `512B`, or (legacy G1
//! detail) `112.0M`. Every quantity is normalized to kilobytes as soon as it
//! is parsed, rounding down.

use crate::common::Kilobytes;

use std::fmt;
use std::io::{Error, ErrorKind, Result};
use std::ops::Add;

use ::si_trace_print::{defn, defx};

/// Memory unit, ordered smallest to largest.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Unit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl Unit {
    /// Number of bytes in one of this `Unit`.
    pub const fn bytes(&self) -> u64 {
        match self {
            Unit::Bytes => 1,
            Unit::Kilobytes => 1 << 10,
            Unit::Megabytes => 1 << 20,
            Unit::Gigabytes => 1 << 30,
        }
    }

    /// `Unit` for the single-character suffix used in logs, case insensitive.
    pub const fn from_char(c: char) -> Option<Unit> {
        match c {
            'b' | 'B' => Some(Unit::Bytes),
            'k' | 'K' => Some(Unit::Kilobytes),
            'm' | 'M' => Some(Unit::Megabytes),
            'g' | 'G' => Some(Unit::Gigabytes),
            _ => None,
        }
    }

    pub const fn as_char(&self) -> char {
        match self {
            Unit::Bytes => 'B',
            Unit::Kilobytes => 'K',
            Unit::Megabytes => 'M',
            Unit::Gigabytes => 'G',
        }
    }
}

/// A non-negative memory quantity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Memory {
    value: u64,
    unit: Unit,
}

impl Memory {
    /// Zero kilobytes, the value an absent quantity contributes to [`add_opt`].
    ///
    /// [`add_opt`]: Memory::add_opt
    pub const ZERO: Memory = Memory { value: 0, unit: Unit::Kilobytes };

    pub const fn new(value: u64, unit: Unit) -> Memory {
        Memory { value, unit }
    }

    pub const fn kilobytes(value: Kilobytes) -> Memory {
        Memory { value, unit: Unit::Kilobytes }
    }

    pub const fn value(&self) -> u64 {
        self.value
    }

    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// This quantity re-expressed in `unit`, rounding down.
    pub const fn convert_to(&self, unit: Unit) -> Memory {
        let value: u64 = if self.unit.bytes() >= unit.bytes() {
            self.value * (self.unit.bytes() / unit.bytes())
        } else {
            self.value / (unit.bytes() / self.unit.bytes())
        };
        Memory { value, unit }
    }

    /// The magnitude of this quantity in kilobytes, rounding down.
    pub const fn as_kilobytes(&self) -> Kilobytes {
        self.convert_to(Unit::Kilobytes).value
    }

    /// Parse logged text like `983K` or `112.0M` into a `Memory` normalized to
    /// kilobytes.
    ///
    /// A fractional magnitude (either `.` or `,` decimal separator) is scaled
    /// exactly before rounding down to whole kilobytes.
    pub fn parse(text: &str) -> Result<Memory> {
        defn!("({:?})", text);
        let text = text.trim();
        let unit_c: char = match text.chars().last() {
            Some(c) => c,
            None => {
                defx!("empty");
                return Err(Error::new(ErrorKind::InvalidData, "empty memory quantity"));
            }
        };
        let unit: Unit = match Unit::from_char(unit_c) {
            Some(unit) => unit,
            None => {
                defx!("bad unit {:?}", unit_c);
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("unknown memory unit {:?} in {:?}", unit_c, text),
                ));
            }
        };
        let number: &str = &text[..text.len() - unit_c.len_utf8()];
        let (whole, frac): (&str, &str) = match number.find(|c: char| c == '.' || c == ',') {
            Some(at) => (&number[..at], &number[at + 1..]),
            None => (number, ""),
        };
        let bad_number = || {
            Error::new(ErrorKind::InvalidData, format!("bad memory magnitude {:?}", text))
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            defx!("bad whole {:?}", whole);
            return Err(bad_number());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) || frac.len() > 6 {
            defx!("bad fraction {:?}", frac);
            return Err(bad_number());
        }
        let scale: u128 = 10u128.pow(frac.len() as u32);
        let whole_v: u128 = whole.parse::<u128>().map_err(|_| bad_number())?;
        let frac_v: u128 = if frac.is_empty() {
            0
        } else {
            frac.parse::<u128>().map_err(|_| bad_number())?
        };
        let bytes: u128 = (whole_v * scale + frac_v) * (unit.bytes() as u128) / scale;
        let kb: u128 = bytes / (Unit::Kilobytes.bytes() as u128);
        if kb > u64::MAX as u128 {
            defx!("overflow");
            return Err(bad_number());
        }
        let memory = Memory::kilobytes(kb as Kilobytes);
        defx!("return {:?}", memory);

        Ok(memory)
    }

    /// Sum of two quantities where an absent quantity counts as zero.
    pub fn add_opt(
        a: Option<Memory>,
        b: Option<Memory>,
    ) -> Memory {
        a.unwrap_or(Memory::ZERO) + b.unwrap_or(Memory::ZERO)
    }

    /// `self - other` in kilobytes, clamped at zero.
    pub fn saturating_sub(
        &self,
        other: &Memory,
    ) -> Memory {
        Memory::kilobytes(self.as_kilobytes().saturating_sub(other.as_kilobytes()))
    }
}

impl Add for Memory {
    type Output = Memory;

    /// Sum in kilobytes.
    fn add(
        self,
        other: Memory,
    ) -> Memory {
        Memory::kilobytes(self.as_kilobytes() + other.as_kilobytes())
    }
}

impl fmt::Display for Memory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_char())
    }
}
