#![doc = r#"
Decode Standard MIDI Files into notes with start times and durations

`smf-notes` reads the header and track chunks of a `.mid` file, follows
running status through every track, and pairs each note-on with its
note-off. What comes back is a [`SequenceFile`](file::SequenceFile): one
list of [`Note`]s per track plus the file's tempo.

# Example
```rust
use smf_notes::prelude::*;

let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96,
    b'M', b'T', b'r', b'k', 0, 0, 0, 16,
    0x00, 0x90, 60, 100, // C4 on
    0x00, 64, 100,       // E4 on, running status
    0x60, 60, 0,         // C4 off one quarter note later
    0x00, 64, 0,         // E4 off
    0x00, 0xFF, 0x2F,    // end of track
];

let file = SequenceFile::parse(&bytes[..]).unwrap();
let notes = file.tracks()[0].notes();

assert_eq!(file.tempo(), 120.);
assert_eq!(notes.len(), 2);
assert!(notes.iter().all(|note| note.duration() == 1.));
```

# Features
- `std` (default): std error integration and the [`playlist`] module
- `tracing` (default): log skipped events and recovered errors with `tracing`
- `serde`: `Serialize`/`Deserialize` for the decoded types
"#]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod file;
pub mod message;
pub mod reader;
pub mod timeline;

#[cfg(feature = "std")]
pub mod playlist;

mod note;
pub use note::*;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        file::{
            DecodeOptions, FormatType, Header, RawFormat, SequenceFile, Tempo, Track,
            TrackError, TrackRecovery,
        },
        note::{Key, Note, Octave},
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
        timeline::{Timeline, TimelineEvent},
    };
}
