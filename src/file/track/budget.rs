use crate::reader::*;

/// The largest value a variable length quantity may hold (four bytes)
pub const VLQ_MAX: u32 = 0x0FFF_FFFF;

#[doc = r#"
The bytes left in the track chunk being decoded.

Every read inside a track goes through the budget. A read the budget cannot
cover fails with [`ReaderErrorKind::TruncatedChunk`] and leaves the reader
where it was, so nothing past the declared chunk end is ever consumed.

```rust
# use smf_notes::{file::ChunkBudget, reader::*};
let mut reader = Reader::from_byte_slice(&[0x81, 0x00, 0x40]);
let mut budget = ChunkBudget::new(2);

assert_eq!(budget.read_vlq(&mut reader).unwrap(), 0x80);
assert!(budget.is_spent());

let err = budget.read_u8(&mut reader).unwrap_err();
assert_eq!(err.error_kind(), &ReaderErrorKind::TruncatedChunk);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkBudget {
    remaining: u32,
}

impl ChunkBudget {
    /// A budget of `length` bytes
    pub const fn new(length: u32) -> Self {
        Self { remaining: length }
    }

    /// Bytes still available
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// True when the whole chunk has been consumed
    pub const fn is_spent(&self) -> bool {
        self.remaining == 0
    }

    /// Reads one byte, charging it to the budget.
    pub fn read_u8(&mut self, reader: &mut Reader<'_>) -> ReadResult<u8> {
        if self.is_spent() {
            return Err(ReaderError::truncated(reader.buffer_position()));
        }
        let byte = reader.read_u8()?;
        self.remaining -= 1;
        Ok(byte)
    }

    /// Reads `n` bytes, charging them to the budget.
    pub fn read_bytes<'r>(
        &mut self,
        reader: &'r mut Reader<'_>,
        n: usize,
    ) -> ReadResult<&'r [u8]> {
        if (self.remaining as usize) < n {
            return Err(ReaderError::truncated(reader.buffer_position()));
        }
        let bytes = reader.read_bytes(n)?;
        self.remaining -= n as u32;
        Ok(bytes)
    }

    /// Reads a variable length quantity.
    ///
    /// Each byte adds its low seven bits to the value, most significant
    /// group first. A clear high bit marks the last byte.
    pub fn read_vlq(&mut self, reader: &mut Reader<'_>) -> ReadResult<u32> {
        let start = reader.buffer_position();
        let mut value: u32 = 0;
        for _ in 0..4 {
            let byte = self.read_u8(reader)?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(ReaderError::new(start, ReaderErrorKind::VlqOverflow))
    }
}

#[test]
fn reads_multi_byte_quantities() {
    let bytes = [0x00, 0x7F, 0x81, 0x00, 0xC0, 0x00, 0xFF, 0xFF, 0xFF, 0x7F];
    let mut reader = Reader::from_byte_slice(&bytes);
    let mut budget = ChunkBudget::new(bytes.len() as u32);

    assert_eq!(budget.read_vlq(&mut reader).unwrap(), 0);
    assert_eq!(budget.read_vlq(&mut reader).unwrap(), 0x7F);
    assert_eq!(budget.read_vlq(&mut reader).unwrap(), 0x80);
    assert_eq!(budget.read_vlq(&mut reader).unwrap(), 0x2000);
    assert_eq!(budget.read_vlq(&mut reader).unwrap(), VLQ_MAX);
    assert!(budget.is_spent());
}

#[test]
fn budget_decrements_by_bytes_consumed() {
    let mut reader = Reader::from_byte_slice(&[0x83, 0xFF, 0x7F, 0x10]);
    let mut budget = ChunkBudget::new(4);
    assert_eq!(budget.read_vlq(&mut reader).unwrap(), 0xFFFF);
    assert_eq!(budget.remaining(), 1);
}

#[test]
fn quantity_cut_by_budget() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x80, 0x00]);
    let mut budget = ChunkBudget::new(2);
    let err = budget.read_vlq(&mut reader).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::TruncatedChunk);
    assert_eq!(reader.buffer_position(), 2);
}

#[test]
fn five_byte_quantity_overflows() {
    let mut reader = Reader::from_byte_slice(&[0x81, 0x81, 0x81, 0x81, 0x01]);
    let mut budget = ChunkBudget::new(5);
    let err = budget.read_vlq(&mut reader).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::VlqOverflow);
    assert_eq!(err.position(), 0);
}

#[test]
fn payload_larger_than_budget() {
    let mut reader = Reader::from_byte_slice(&[1, 2, 3, 4]);
    let mut budget = ChunkBudget::new(3);
    let err = budget.read_bytes(&mut reader, 4).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::TruncatedChunk);
    assert_eq!(budget.read_bytes(&mut reader, 3).unwrap(), &[1, 2, 3]);
}
