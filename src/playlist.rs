#![doc = r#"
Decoding a list of files where one bad file must not stop the rest

```rust,no_run
# use smf_notes::playlist::Playlist;
let playlist = Playlist::from_dir("songs").unwrap();
for song in playlist.decode_all() {
    println!("{}: {} notes", song.path.display(), song.file.note_count());
}
```
"#]

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    file::{DecodeOptions, SequenceFile},
    reader::ReaderError,
};

/// Extensions picked up by [`Playlist::from_dir`]
pub const MIDI_EXTENSIONS: [&str; 2] = ["mid", "midi"];

/// Why a file in a playlist could not be loaded
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// The file could not be read
    #[error("Reading {path}: {source}")]
    Io {
        /// The file
        path: PathBuf,
        /// The io error
        source: io::Error,
    },
    /// The file was read but failed to decode
    #[error("Decoding {path}: {source}")]
    Decode {
        /// The file
        path: PathBuf,
        /// The decode error
        source: ReaderError,
    },
}

/// A file that decoded
#[derive(Debug, Clone)]
pub struct LoadedFile {
    /// Where the file was read from
    pub path: PathBuf,
    /// The decoded file
    pub file: SequenceFile,
}

/// An ordered list of MIDI files.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    paths: Vec<PathBuf>,
    options: DecodeOptions,
}

impl Playlist {
    /// A playlist of the given paths, in order
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            options: DecodeOptions::default(),
        }
    }

    /// Every `.mid` and `.midi` file directly inside `dir`, sorted by path.
    pub fn from_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_midi = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    MIDI_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                });
            if is_midi && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(Self::new(paths))
    }

    /// Decode every file with these options
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// The paths in the playlist
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Number of paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True if the playlist has no paths
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Read and decode one file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<SequenceFile, PlaylistError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| PlaylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SequenceFile::parse_with(bytes, self.options).map_err(|source| PlaylistError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decode the files in order, yielding the result for each.
    pub fn iter(&self) -> impl Iterator<Item = Result<LoadedFile, PlaylistError>> + '_ {
        self.paths.iter().map(|path| {
            self.load(path).map(|file| LoadedFile {
                path: path.clone(),
                file,
            })
        })
    }

    /// Decode every file, skipping and logging the ones that fail.
    pub fn decode_all(&self) -> Vec<LoadedFile> {
        self.iter()
            .filter_map(|loaded| match loaded {
                Ok(loaded) => {
                    #[cfg(feature = "tracing")]
                    for error in loaded.file.track_errors() {
                        tracing::warn!(path = %loaded.path.display(), %error, "partial track");
                    }
                    Some(loaded)
                }
                Err(_error) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_error, "skipping file");
                    None
                }
            })
            .collect()
    }
}
