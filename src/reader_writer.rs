use core::fmt;
use core::str::Chars;

use super::{FlagsError, FlagsResult};

/// Number of flags held by a [`FlagSet`](crate::FlagSet), and the length of its text form.
pub const FLAG_COUNT: usize = 64;

/// Writes bitmasks as `'0'`/`'1'` digits, most significant bit first.
pub struct FlagsWriter<W: fmt::Write> {
    out: W,
    cursor: usize,
}

impl<W: fmt::Write> FlagsWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, cursor: 0 }
    }

    pub fn write_bit(&mut self, on: bool) -> fmt::Result {
        self.out.write_char(if on { '1' } else { '0' })?;
        self.cursor += 1;
        Ok(())
    }

    /// Writes all 64 bits of `value`, zero-padded on the left.
    pub fn write_flags(&mut self, value: u64) -> fmt::Result {
        for index in (0..FLAG_COUNT).rev() {
            self.write_bit((value >> index) & 1 == 1)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Reads the text form produced by [`FlagsWriter`] back into a bitmask.
pub struct FlagsReader<'a> {
    chars: Chars<'a>,
    cursor: usize,
}

impl<'a> FlagsReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            cursor: 0,
        }
    }

    pub fn read_bit(&mut self) -> FlagsResult<bool> {
        let position = self.cursor;
        let found = self
            .chars
            .next()
            .ok_or(FlagsError::InvalidLength(position))?;
        self.cursor += 1;
        match found {
            '0' => Ok(false),
            '1' => Ok(true),
            found => Err(FlagsError::InvalidDigit { position, found }),
        }
    }

    /// Reads exactly 64 digits. Anything shorter or longer is rejected before
    /// any digit is inspected.
    pub fn read_flags(&mut self) -> FlagsResult<u64> {
        let remaining = self.remaining();
        if remaining != FLAG_COUNT {
            return Err(FlagsError::InvalidLength(self.cursor + remaining));
        }

        let mut value = 0u64;
        for _ in 0..FLAG_COUNT {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    pub fn remaining(&self) -> usize {
        self.chars.clone().count()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use heapless::String;

    use super::*;

    #[test]
    fn writer_pads_to_full_width() {
        let mut writer = FlagsWriter::new(String::<FLAG_COUNT>::new());
        writer.write_flags(0b101).unwrap();
        assert_eq!(writer.len(), FLAG_COUNT);

        let text = writer.into_inner();
        assert!(text.ends_with("00000101"));
        assert!(text[..61].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn writer_reports_full_buffer() {
        let mut writer = FlagsWriter::new(String::<4>::new());
        assert!(writer.write_flags(u64::MAX).is_err());
    }

    #[test]
    fn reader_parses_most_significant_first() {
        let mut text = String::<FLAG_COUNT>::new();
        text.push('1').unwrap();
        for _ in 1..FLAG_COUNT - 1 {
            text.push('0').unwrap();
        }
        text.push('1').unwrap();

        let mut reader = FlagsReader::new(&text);
        assert_eq!(reader.read_flags(), Ok((1 << 63) | 1));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reader_rejects_wrong_length() {
        assert_eq!(
            FlagsReader::new("0101").read_flags(),
            Err(FlagsError::InvalidLength(4))
        );
        assert_eq!(
            FlagsReader::new("").read_flags(),
            Err(FlagsError::InvalidLength(0))
        );
    }

    #[test]
    fn reader_rejects_bad_digit() {
        let mut text = String::<FLAG_COUNT>::new();
        for _ in 0..10 {
            text.push('0').unwrap();
        }
        text.push('2').unwrap();
        for _ in 11..FLAG_COUNT {
            text.push('1').unwrap();
        }

        let mut reader = FlagsReader::new(&text);
        assert_eq!(
            reader.read_flags(),
            Err(FlagsError::InvalidDigit {
                position: 10,
                found: '2'
            })
        );
        assert_eq!(reader.position(), 11);
    }

    #[test]
    fn read_bit_past_end() {
        let mut reader = FlagsReader::new("1");
        assert_eq!(reader.read_bit(), Ok(true));
        assert_eq!(reader.read_bit(), Err(FlagsError::InvalidLength(1)));
    }
}
