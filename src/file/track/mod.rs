mod budget;
pub use budget::*;

mod decoder;
pub(crate) use decoder::*;

use alloc::vec::Vec;
use core::{fmt, slice};

use crate::{note::Note, reader::ReaderError};

/// Tag of a track chunk
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

#[doc = r#"
The notes of one track chunk, in the order their note-on events appeared.
"#]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    notes: Vec<Note>,
}

impl Track {
    pub(crate) fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Returns the notes of the track
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Iterate over the notes of the track
    pub fn iter(&self) -> slice::Iter<'_, Note> {
        self.notes.iter()
    }

    /// Number of notes in the track
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True if the track holds no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Track {
    type Item = &'a Note;
    type IntoIter = slice::Iter<'a, Note>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for note in &self.notes {
            writeln!(f, "{note}")?;
        }
        Ok(())
    }
}

/// An error that stopped one track early without failing the file.
///
/// The notes decoded before the error are kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Track {track}: {error}")]
pub struct TrackError {
    track: usize,
    error: ReaderError,
}

impl TrackError {
    pub(crate) const fn new(track: usize, error: ReaderError) -> Self {
        Self { track, error }
    }

    /// Index of the track chunk, starting at 0
    pub const fn track(&self) -> usize {
        self.track
    }

    /// The underlying reader error
    pub const fn error(&self) -> &ReaderError {
        &self.error
    }
}
