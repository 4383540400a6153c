#![no_std]

#[cfg(feature = "std")]
extern crate std;

use core::fmt;

pub use self::flags::{Bits, FlagSet, ALL_ON};
pub use self::reader_writer::{FlagsReader, FlagsWriter, FLAG_COUNT};

pub mod flags;
pub mod reader_writer;

pub type FlagsResult<T> = Result<T, FlagsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagsError {
    /// The text form was not exactly 64 characters long.
    InvalidLength(usize),
    /// A character other than `'0'` or `'1'` at the given position.
    InvalidDigit { position: usize, found: char },
    /// A typed flag whose value can't be represented as a `u64` mask.
    InvalidMask,
}

impl fmt::Display for FlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagsError::InvalidLength(found) => {
                write!(f, "expected {} binary digits, found {}", FLAG_COUNT, found)
            }
            FlagsError::InvalidDigit { position, found } => {
                write!(f, "invalid binary digit {:?} at position {}", found, position)
            }
            FlagsError::InvalidMask => f.write_str("flag value does not fit in a u64 mask"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FlagsError {}
