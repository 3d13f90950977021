use crate::{file::RawFormat, reader::*};

/// Tag of the header chunk
pub const HEADER_TAG: [u8; 4] = *b"MThd";

/// The header chunk's fixed length
pub const HEADER_LENGTH: i32 = 6;

#[doc = r#"
The decoded `MThd` chunk.

```text
"MThd" | length: i32 = 6 | format: u16 | track count: u16 | time division: i16
```

Only ticks-per-quarter-note timing is accepted. A time division with its
high bit set (SMPTE timing) reads as negative and is rejected, as is zero.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: RawFormat,
    track_count: u16,
    time_division: u16,
}

impl Header {
    /// Create a header. Fails if `time_division` is zero or has its high bit set.
    pub fn new(
        format: RawFormat,
        track_count: u16,
        time_division: u16,
    ) -> Result<Self, ReaderErrorKind> {
        let signed = time_division as i16;
        if signed <= 0 {
            return Err(ReaderErrorKind::InvalidTimeDivision(signed));
        }
        Ok(Self {
            format,
            track_count,
            time_division,
        })
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        reader.expect_tag(HEADER_TAG)?;

        let position = reader.buffer_position();
        let length = reader.read_be_i32()?;
        if length != HEADER_LENGTH {
            return Err(ReaderError::new(
                position,
                ReaderErrorKind::BadHeaderSize(length),
            ));
        }

        let format = RawFormat::new(reader.read_be_u16()?);
        let track_count = reader.read_be_u16()?;

        let position = reader.buffer_position();
        let time_division = reader.read_be_i16()?;
        Self::new(format, track_count, time_division as u16)
            .map_err(|kind| ReaderError::new(position, kind))
    }

    /// The format field
    pub const fn format(&self) -> RawFormat {
        self.format
    }

    /// Number of track chunks the header declares
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// Ticks per quarter note. Always greater than zero.
    pub const fn time_division(&self) -> u16 {
        self.time_division
    }
}

#[test]
fn reads_header() {
    let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 3, 0x01, 0xE0];
    let header = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(header.format().value(), 1);
    assert_eq!(header.track_count(), 3);
    assert_eq!(header.time_division(), 480);
}

#[test]
fn rejects_long_header() {
    let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 8, 0, 1, 0, 3, 0x01, 0xE0, 0, 0];
    let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::BadHeaderSize(8));
    assert_eq!(err.position(), 4);
}

#[test]
fn rejects_smpte_division() {
    // -25 fps, 40 ticks per frame
    let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0xE7, 0x28];
    let err = Header::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::InvalidTimeDivision(v) if *v < 0
    ));
}
