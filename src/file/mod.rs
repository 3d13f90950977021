#![doc = r#"
Rusty representation of a decoded [`SequenceFile`]

# Overview

A Standard MIDI File is a header chunk followed by track chunks:

```text
[Header Chunk: "MThd" | 6 | format | track count | time division]
[Track Chunk 1: "MTrk" | length | events...]
...
[Track Chunk N: "MTrk" | length | events...]
```

Each track event is a delta time in ticks followed by a channel voice,
system exclusive, or meta message. Decoding keeps the notes and the tempo
and throws the rest away.

# Failure handling

Errors in the header, or before the first track chunk, fail the decode.
An error inside a track stops only that track: the notes read so far are
kept, a [`TrackError`] is recorded, and decoding carries on from the chunk
end the track declared. If that end cannot be trusted the decode fails with
[`ReaderErrorKind::CorruptStream`]. Input that runs out inside a track
ends the decode with the tracks gathered so far. [`TrackRecovery`] selects
whether to try.
"#]

mod format;
pub use format::*;

mod header;
pub use header::*;

mod tempo;
pub use tempo::*;

mod track;
pub use track::*;

use crate::reader::{ReadResult, Reader, ReaderError, ReaderErrorKind};
use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

/// What to do with the remaining tracks after one fails part way through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackRecovery {
    /// Skip to the failed track's declared end and keep decoding.
    #[default]
    Resynchronize,
    /// Keep the partial track and stop.
    AbortRemaining,
}

/// Options for [`SequenceFile::parse_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    recovery: TrackRecovery,
}

impl DecodeOptions {
    /// Default options: [`TrackRecovery::Resynchronize`]
    pub const fn new() -> Self {
        Self {
            recovery: TrackRecovery::Resynchronize,
        }
    }

    /// Set the recovery policy
    pub const fn with_recovery(mut self, recovery: TrackRecovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// The recovery policy
    pub const fn recovery(&self) -> TrackRecovery {
        self.recovery
    }
}

#[doc = r#"
The notes and tempo of a Standard MIDI File.

# Example
```rust
# use smf_notes::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 18,
    0x00, 0xFF, 0x51, 0x03, 0x09, 0x27, 0xC0, // 100 bpm
    0x00, 0x90, 60, 100,
    0x60, 60, 0, // running status note off
    0x00, 0xFF, 0x2F, 0x00,
];
let file = SequenceFile::parse(&bytes[..]).unwrap();

assert_eq!(file.tempo(), 100.);
assert_eq!(file.tracks().len(), 1);
assert_eq!(file.tracks()[0].notes()[0].duration(), 1.);
assert!(file.track_errors().is_empty());
```
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceFile {
    header: Header,
    tempo: Tempo,
    tracks: Vec<Track>,
    #[cfg_attr(feature = "serde", serde(skip))]
    track_errors: Vec<TrackError>,
}

impl SequenceFile {
    /// Parse a set of bytes into a file struct
    pub fn parse<'a, B>(bytes: B) -> ReadResult<Self>
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self::parse_with(bytes, DecodeOptions::default())
    }

    /// Parse a set of bytes with the provided options
    pub fn parse_with<'a, B>(bytes: B, options: DecodeOptions) -> ReadResult<Self>
    where
        B: Into<Cow<'a, [u8]>>,
    {
        let mut reader = Reader::from_bytes(bytes);
        let header = Header::read(&mut reader)?;

        let track_count = header.track_count() as usize;
        let mut tracks = Vec::with_capacity(track_count);
        let mut track_errors = Vec::new();
        let mut tempo = None;
        // true when the previous chunk's declared end is unconfirmed
        let mut suspect_boundary = false;

        for index in 0..track_count {
            let length = match read_track_length(&mut reader) {
                Ok(length) => length,
                Err(e) if e.is_out_of_bounds() && index > 0 => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(track = index, "input ended before all declared tracks");
                    track_errors.push(TrackError::new(index, e));
                    break;
                }
                Err(e)
                    if suspect_boundary
                        && matches!(e.error_kind(), ReaderErrorKind::BadMagic { .. }) =>
                {
                    return Err(ReaderError::new(
                        e.position(),
                        ReaderErrorKind::CorruptStream,
                    ));
                }
                Err(e) => return Err(e),
            };
            let chunk_start = reader.buffer_position();
            let chunk_end = chunk_start
                .checked_add(length as usize)
                .ok_or(ReaderError::new(chunk_start, ReaderErrorKind::CorruptStream))?;

            let decoded = TrackDecoder::new(header.time_division(), length).decode(&mut reader);
            tracks.push(decoded.track);
            if decoded.tempo.is_some() {
                tempo = decoded.tempo;
            }
            suspect_boundary = !decoded.terminated || decoded.error.is_some();
            let input_ended = decoded
                .error
                .as_ref()
                .is_some_and(ReaderError::is_out_of_bounds);

            if let Some(error) = decoded.error {
                #[cfg(feature = "tracing")]
                tracing::warn!(track = index, %error, "track stopped early");
                track_errors.push(TrackError::new(index, error));
                if options.recovery() == TrackRecovery::AbortRemaining {
                    break;
                }
            }

            if chunk_end <= reader.len() {
                reader.jump_to(chunk_end)?;
            } else if input_ended {
                // nothing left to resynchronize to
                break;
            } else if index + 1 < track_count {
                return Err(ReaderError::new(
                    reader.buffer_position(),
                    ReaderErrorKind::CorruptStream,
                ));
            }
        }

        Ok(Self {
            header,
            tempo: tempo.unwrap_or_default(),
            tracks,
            track_errors,
        })
    }

    /// Returns the decoded header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The format field of the header. Informational only.
    pub fn format(&self) -> RawFormat {
        self.header.format()
    }

    /// Number of tracks the header declares.
    ///
    /// This can be more than [`Self::tracks`] holds if the input ended early.
    pub fn track_count(&self) -> u16 {
        self.header.track_count()
    }

    /// Ticks per quarter note
    pub fn time_division(&self) -> u16 {
        self.header.time_division()
    }

    /// Beats per minute from the last Set Tempo event in the file, or 120.
    pub fn tempo(&self) -> f64 {
        self.tempo.bpm()
    }

    /// The last Set Tempo event in the file, or the 120 bpm default
    pub fn raw_tempo(&self) -> Tempo {
        self.tempo
    }

    /// Returns the decoded tracks
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Errors that stopped individual tracks early
    pub fn track_errors(&self) -> &[TrackError] {
        &self.track_errors
    }

    /// Total number of notes across all tracks
    pub fn note_count(&self) -> usize {
        self.tracks.iter().map(Track::len).sum()
    }
}

impl fmt::Display for SequenceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, track) in self.tracks.iter().enumerate() {
            writeln!(f, "Track {}", i + 1)?;
            write!(f, "{track}")?;
        }
        Ok(())
    }
}

/// Reads a track chunk's tag and length.
fn read_track_length(reader: &mut Reader<'_>) -> ReadResult<u32> {
    reader.expect_tag(TRACK_TAG)?;
    let position = reader.buffer_position();
    let length = reader.read_be_i32()?;
    u32::try_from(length)
        .map_err(|_| ReaderError::new(position, ReaderErrorKind::CorruptStream))
}
