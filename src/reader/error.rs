use thiserror::Error;

#[doc = r#"
A set of errors that can occur while decoding a MIDI file
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReaderErrorKind {
    /// A four byte chunk tag did not match the one required here.
    #[error("Expected chunk tag {expected:?}, found {found:?}")]
    BadMagic {
        /// The tag the decoder required
        expected: [u8; 4],
        /// The bytes actually present
        found: [u8; 4],
    },
    /// The header chunk declared a length other than 6.
    #[error("Header chunk length must be 6, was {0}")]
    BadHeaderSize(i32),
    /// The header's time division was zero, negative, or SMPTE coded.
    #[error("Invalid time division {0}")]
    InvalidTimeDivision(i16),
    /// Reading out of bounds.
    #[error("Read out of bounds!")]
    UnexpectedEof,
    /// A read would run past the end of the current track chunk.
    #[error("Read past the end of the track chunk")]
    TruncatedChunk,
    /// A variable length quantity used more than four bytes.
    #[error("Variable length quantity longer than 4 bytes")]
    VlqOverflow,
    /// A data byte appeared before any status byte in the track.
    #[error("Data byte without a running status")]
    MissingRunningStatus,
    /// A system common or real-time status byte, which has no meaning in a file.
    #[error("Unsupported status byte {0:#04X}")]
    UnsupportedStatus(u8),
    /// A track's declared length could not be reconciled with the stream,
    /// so the next chunk boundary is unknown.
    #[error("Could not resynchronize to the next chunk")]
    CorruptStream,
}

impl ReaderErrorKind {
    /// True if this kind always aborts the whole decode.
    ///
    /// Everything else is only fatal when hit before the first track.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::BadMagic { .. }
                | Self::BadHeaderSize(_)
                | Self::InvalidTimeDivision(_)
                | Self::CorruptStream
        )
    }
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::UnexpectedEof)
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::UnexpectedEof,
        }
    }

    /// Create a new truncated chunk error
    pub const fn truncated(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::TruncatedChunk,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;

#[test]
fn fatal_kinds() {
    assert!(
        ReaderErrorKind::BadMagic {
            expected: *b"MThd",
            found: *b"XXXX"
        }
        .is_fatal()
    );
    assert!(ReaderErrorKind::CorruptStream.is_fatal());
    assert!(!ReaderErrorKind::TruncatedChunk.is_fatal());
    assert!(!ReaderErrorKind::MissingRunningStatus.is_fatal());
}

#[test]
fn display_includes_position() {
    let err = ReaderError::new(14, ReaderErrorKind::UnsupportedStatus(0xF3));
    assert_eq!(
        alloc::format!("{err}"),
        "Reading at Position 14, Unsupported status byte 0xF3"
    );
}
