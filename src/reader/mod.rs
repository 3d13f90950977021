#![doc = r#"
Contains the [`Reader`], a sequential byte cursor over MIDI file data

The reader only moves forward. Every other part of the decoder is built
on [`Reader::read_u8`] and [`Reader::read_bytes`].

# Example
```rust
# use smf_notes::reader::{Reader, ReaderErrorKind};
let mut reader = Reader::from_byte_slice(&[b'M', b'T', b'h', b'd', 0, 0, 0, 6]);

reader.expect_tag(*b"MThd").unwrap();
assert_eq!(reader.read_be_i32().unwrap(), 6);

let err = reader.read_u8().unwrap_err();
assert_eq!(err.error_kind(), &ReaderErrorKind::UnexpectedEof);
```
"#]

mod error;
pub use error::*;

use alloc::borrow::Cow;

/// A forward-only cursor over a byte buffer.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: Cow<'a, [u8]>,
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over borrowed or owned bytes
    pub fn from_bytes<B>(bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            data: bytes.into(),
            position: 0,
        }
    }

    /// Create a reader over a byte slice
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            data: Cow::Borrowed(bytes),
            position: 0,
        }
    }

    /// The offset of the next byte to be read.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// True when the underlying buffer holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True when no bytes are left to read.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads the next byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(ReaderError::oob(self.position))?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads the next `n` bytes.
    ///
    /// The position does not move if fewer than `n` bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> ReadResult<&[u8]> {
        if self.remaining() < n {
            return Err(ReaderError::oob(self.position));
        }
        let start = self.position;
        self.position += n;
        Ok(&self.data[start..self.position])
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Reads a big-endian `u16`
    pub fn read_be_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `i16`
    pub fn read_be_i16(&mut self) -> ReadResult<i16> {
        self.read_exact_size().map(i16::from_be_bytes)
    }

    /// Reads a big-endian `u32`
    pub fn read_be_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Reads a big-endian `i32`
    pub fn read_be_i32(&mut self) -> ReadResult<i32> {
        self.read_exact_size().map(i32::from_be_bytes)
    }

    /// Reads four bytes and checks them against `expected`.
    pub fn expect_tag(&mut self, expected: [u8; 4]) -> ReadResult<()> {
        let position = self.position;
        let found = self.read_exact_size::<4>()?;
        if found != expected {
            return Err(ReaderError::new(
                position,
                ReaderErrorKind::BadMagic { expected, found },
            ));
        }
        Ok(())
    }

    /// Moves the cursor forward to `position`.
    ///
    /// Fails without moving if `position` is behind the cursor or past
    /// the end of the buffer.
    pub fn jump_to(&mut self, position: usize) -> ReadResult<()> {
        if position < self.position || position > self.data.len() {
            return Err(ReaderError::new(
                self.position,
                ReaderErrorKind::CorruptStream,
            ));
        }
        self.position = position;
        Ok(())
    }
}

#[test]
fn reads_big_endian_values() {
    let mut reader = Reader::from_byte_slice(&[0x01, 0xE0, 0xFF, 0xFF, 0xFF, 0xFE, 0x7F]);
    assert_eq!(reader.read_be_u16().unwrap(), 480);
    assert_eq!(reader.read_be_i32().unwrap(), -2);
    assert_eq!(reader.read_u8().unwrap(), 0x7F);
    assert!(reader.is_exhausted());
}

#[test]
fn short_read_does_not_advance() {
    let mut reader = Reader::from_byte_slice(&[1, 2, 3]);
    let err = reader.read_bytes(4).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(reader.buffer_position(), 0);
    assert_eq!(reader.read_bytes(3).unwrap(), &[1, 2, 3]);
}

#[test]
fn bad_tag_reports_found_bytes() {
    let mut reader = Reader::from_byte_slice(b"XXXX\0\0\0\x06");
    let err = reader.expect_tag(*b"MThd").unwrap_err();
    assert_eq!(err.position(), 0);
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::BadMagic {
            expected: *b"MThd",
            found: *b"XXXX"
        }
    );
}

#[test]
fn jump_is_forward_only() {
    let mut reader = Reader::from_byte_slice(&[0; 8]);
    reader.jump_to(5).unwrap();
    assert_eq!(reader.remaining(), 3);
    assert!(reader.jump_to(2).is_err());
    assert!(reader.jump_to(9).is_err());
    reader.jump_to(8).unwrap();
    assert!(reader.is_exhausted());
}

#[test]
fn exhausted_is_not_empty() {
    let mut reader = Reader::from_byte_slice(&[0x2F]);
    assert!(!reader.is_empty());
    assert!(!reader.is_exhausted());
    reader.read_u8().unwrap();
    assert!(reader.is_exhausted());
    assert!(!reader.is_empty());
    assert_eq!(reader.len(), 1);

    assert!(Reader::from_byte_slice(&[]).is_empty());
}
