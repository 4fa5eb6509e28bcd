//! Collected option values and typed extraction.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// The values collected for one option flag during a parse.
///
/// A flag under [`Selection::TakeFirst`](crate::Selection::TakeFirst) or
/// [`Selection::TakeLast`](crate::Selection::TakeLast) holds at most one
/// value; [`Selection::TakeAll`](crate::Selection::TakeAll) keeps every
/// occurrence in scan order. Flags that take no value hold none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionValue {
    flag: String,
    value_name: String,
    values: Vec<String>,
}

impl OptionValue {
    pub(crate) fn new(flag: String, value_name: String) -> Self {
        Self {
            flag,
            value_name,
            values: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, value: String) {
        self.values.push(value);
    }

    pub(crate) fn replace(&mut self, value: String) {
        self.values.clear();
        self.values.push(value);
    }

    /// The canonical option flag these values came from.
    pub fn flag(&self) -> &str {
        &self.flag
    }

    /// The value name the option was registered under; empty for flags that
    /// take no value.
    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    /// Number of values collected.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All collected values in scan order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The value at `index`.
    pub fn value(&self, index: usize) -> Result<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::IndexOutOfRange {
                flag: self.flag.clone(),
                index,
                len: self.values.len(),
            })
    }

    /// The value at `index` converted to `T`.
    ///
    /// Numeric conversions never fail: overflow saturates at the target
    /// type's bounds and unparseable input yields zero. See [`FromArgStr`].
    pub fn value_as<T: FromArgStr>(&self, index: usize) -> Result<T> {
        self.value(index).map(T::from_arg_str)
    }
}

/// Conversion from a collected value string.
///
/// Integer conversions use a locale-independent, base-auto-detecting prefix
/// parse (`0x`/`0X` hex, leading `0` octal, decimal otherwise) and saturate
/// at the target type's bounds instead of erroring; a negative value for an
/// unsigned target saturates to zero, and input with no leading number
/// yields zero. Float conversions parse the longest numeric prefix and
/// yield `0.0` for non-numeric input. These conversions intentionally never
/// abort a parse over a single bad value.
pub trait FromArgStr: Sized {
    fn from_arg_str(value: &str) -> Self;
}

/// Sign and saturated magnitude of the longest integer prefix, with
/// `strtol(_, _, 0)`-style base detection.
fn integer_prefix(input: &str) -> (bool, u128) {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let (radix, digits) = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, hex)
    } else if rest.starts_with('0') {
        (8, rest)
    } else {
        (10, rest)
    };
    let mut magnitude: u128 = 0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            break;
        };
        magnitude = magnitude
            .saturating_mul(u128::from(radix))
            .saturating_add(u128::from(digit));
    }
    (negative, magnitude)
}

fn clamp_signed(negative: bool, magnitude: u128, min: i128, max: i128) -> i128 {
    if negative {
        if magnitude >= min.unsigned_abs() {
            min
        } else {
            -(magnitude as i128)
        }
    } else if magnitude > max as u128 {
        max
    } else {
        magnitude as i128
    }
}

fn clamp_unsigned(negative: bool, magnitude: u128, max: u128) -> u128 {
    if negative { 0 } else { magnitude.min(max) }
}

/// `f64` value of the longest float prefix, `0.0` when there is none.
fn float_prefix(input: &str) -> f64 {
    let input = input.trim_start();
    let bytes = input.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut saw_digit = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        saw_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac = frac_start;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > frac_start || saw_digit {
            end = frac;
            saw_digit = saw_digit || frac > frac_start;
        }
    }
    if saw_digit && end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > exp_start {
            end = exp;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    input[..end].parse().unwrap_or(0.0)
}

macro_rules! impl_from_arg_signed {
    ($($ty:ty)*) => {$(
        impl FromArgStr for $ty {
            fn from_arg_str(value: &str) -> Self {
                let (negative, magnitude) = integer_prefix(value);
                clamp_signed(negative, magnitude, Self::MIN as i128, Self::MAX as i128) as Self
            }
        }
    )*};
}

macro_rules! impl_from_arg_unsigned {
    ($($ty:ty)*) => {$(
        impl FromArgStr for $ty {
            fn from_arg_str(value: &str) -> Self {
                let (negative, magnitude) = integer_prefix(value);
                clamp_unsigned(negative, magnitude, Self::MAX as u128) as Self
            }
        }
    )*};
}

impl_from_arg_signed!(i8 i16 i32 i64 i128 isize);
impl_from_arg_unsigned!(u8 u16 u32 u64 u128 usize);

impl FromArgStr for f64 {
    fn from_arg_str(value: &str) -> Self {
        float_prefix(value)
    }
}

impl FromArgStr for f32 {
    fn from_arg_str(value: &str) -> Self {
        float_prefix(value) as f32
    }
}

impl FromArgStr for bool {
    /// Arithmetic truthiness: any nonzero integer prefix is `true`,
    /// sign included, so `"-1"` is `true`.
    fn from_arg_str(value: &str) -> Self {
        let (_, magnitude) = integer_prefix(value);
        magnitude != 0
    }
}

impl FromArgStr for String {
    fn from_arg_str(value: &str) -> Self {
        value.to_string()
    }
}

impl FromArgStr for PathBuf {
    fn from_arg_str(value: &str) -> Self {
        PathBuf::from(value)
    }
}

impl FromArgStr for OsString {
    fn from_arg_str(value: &str) -> Self {
        OsString::from(value)
    }
}
