use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use heapless::String;
use num_traits::{FromPrimitive, ToPrimitive};

use super::reader_writer::{FlagsReader, FlagsWriter, FLAG_COUNT};
use super::{FlagsError, FlagsResult};

/// Value written by [`FlagSet::turn_on_all`]: every bit except bit 63.
///
/// Sets 63 of the 64 flags, matching the historical "all on" value of the
/// signed 64-bit representation. Kept for compatibility.
pub const ALL_ON: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Up to 64 boolean flags packed into a single `u64`.
///
/// Bit positions carry no meaning of their own; callers usually assign each
/// flag a power of two. Masks passed to the query and mutation methods may
/// combine several flags.
///
/// `turn_on` and `turn_off` are plain read-modify-write operations. Sharing
/// one set between threads requires external locking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct FlagSet {
    bits: u64,
}

impl FlagSet {
    pub const fn new(bits: u64) -> Self {
        Self { bits }
    }

    pub const fn value(&self) -> u64 {
        self.bits
    }

    /// Returns `true` if *any* bit of `mask` is on.
    ///
    /// For a single flag this is the obvious test. For a combined mask such
    /// as `3` it does not require every bit to be on.
    #[inline]
    pub const fn is_on(&self, mask: u64) -> bool {
        (self.bits & mask) != 0
    }

    /// Returns `true` if *every* bit of `mask` is off.
    #[inline]
    pub const fn is_off(&self, mask: u64) -> bool {
        (self.bits & mask) == 0
    }

    #[inline]
    pub fn turn_on(&mut self, mask: u64) -> &mut Self {
        self.bits |= mask;
        self
    }

    #[inline]
    pub fn turn_off(&mut self, mask: u64) -> &mut Self {
        self.bits &= !mask;
        self
    }

    /// Turns every flag off.
    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Same as [`clear`](Self::clear).
    pub fn turn_off_all(&mut self) {
        self.clear();
    }

    /// Turns on flags 0 through 62. Bit 63 stays off, see [`ALL_ON`].
    pub fn turn_on_all(&mut self) {
        self.bits = ALL_ON;
    }

    /// Low 32 bits of the bitmask.
    pub const fn hash_code(&self) -> u32 {
        self.bits as u32
    }

    /// The 64-digit text form, without allocating.
    pub fn to_binary(&self) -> String<FLAG_COUNT> {
        let mut writer = FlagsWriter::new(String::new());
        // 64 digits always fit the buffer
        let _ = writer.write_flags(self.bits);
        writer.into_inner()
    }

    /// Mask for a typed flag, usually an enum deriving `ToPrimitive`.
    pub fn mask_of<F: ToPrimitive>(flag: F) -> FlagsResult<u64> {
        flag.to_u64().ok_or(FlagsError::InvalidMask)
    }

    /// Indices of the bits that are on, lowest first.
    pub fn bits(&self) -> Bits {
        Bits { remaining: self.bits }
    }

    /// Decodes every bit that is on into a typed flag, skipping bits that
    /// have no matching variant.
    pub fn flags<F: FromPrimitive>(&self) -> impl Iterator<Item = F> {
        self.bits().filter_map(|index| F::from_u64(1 << index))
    }
}

impl Hash for FlagSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash_code());
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        FlagsWriter::new(f).write_flags(self.bits)
    }
}

impl FromStr for FlagSet {
    type Err = FlagsError;

    fn from_str(s: &str) -> FlagsResult<Self> {
        FlagsReader::new(s).read_flags().map(Self::new)
    }
}

impl From<u64> for FlagSet {
    fn from(bits: u64) -> Self {
        Self::new(bits)
    }
}

impl From<FlagSet> for u64 {
    fn from(flags: FlagSet) -> Self {
        flags.bits
    }
}

/// Iterator over the indices of the bits that are on in a [`FlagSet`].
#[derive(Debug, Clone)]
pub struct Bits {
    remaining: u64,
}

impl Iterator for Bits {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.remaining.trailing_zeros();
        self.remaining &= self.remaining - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Bits {}
