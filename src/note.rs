use core::fmt;

#[doc = r#"
One note decoded from a track: where it starts, how long it sounds, and
how hard it was struck.

Times are kept in ticks and converted to quarter notes with the file's
time division, so `start() + duration() == end()` for every closed note.

A note opens on a note-on event with a duration of zero and is closed once,
by the matching note-off. Notes that are never closed keep a duration of zero.

# Example
```rust
# use smf_notes::prelude::*;
let bytes = [
    b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 10,
    b'M', b'T', b'r', b'k', 0, 0, 0, 12,
    0x00, 0x90, 64, 80,
    0x0A, 0x80, 64, 0,
    0x00, 0xFF, 0x2F, 0x00,
];
let file = SequenceFile::parse(&bytes[..]).unwrap();
let note = file.tracks()[0].notes()[0];

assert_eq!(note.key(), Key::E);
assert_eq!(note.octave(), Octave::new(4));
assert_eq!(note.start(), 0.);
assert_eq!(note.duration(), 1.);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    channel: u8,
    pitch: u8,
    velocity: u8,
    start_ticks: u64,
    duration_ticks: u64,
    time_division: u16,
}

impl Note {
    /// Open a note at `start_ticks`.
    ///
    /// `time_division` is the file's ticks per quarter note.
    pub const fn new(
        channel: u8,
        pitch: u8,
        velocity: u8,
        start_ticks: u64,
        time_division: u16,
    ) -> Self {
        Self {
            channel,
            pitch,
            velocity,
            start_ticks,
            duration_ticks: 0,
            time_division,
        }
    }

    pub(crate) fn close(&mut self, end_ticks: u64) {
        self.duration_ticks = end_ticks.saturating_sub(self.start_ticks);
    }

    /// The channel the note was played on, 0 to 15
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Key number, 0 to 127. Middle C is 60.
    pub const fn pitch(&self) -> u8 {
        self.pitch
    }

    /// Attack velocity, 0 to 127
    pub const fn velocity(&self) -> u8 {
        self.velocity
    }

    /// Start time in ticks
    pub const fn start_ticks(&self) -> u64 {
        self.start_ticks
    }

    /// Duration in ticks
    pub const fn duration_ticks(&self) -> u64 {
        self.duration_ticks
    }

    /// Start time in quarter notes
    pub fn start(&self) -> f64 {
        self.start_ticks as f64 / self.time_division as f64
    }

    /// Duration in quarter notes. Zero if the note was never closed.
    pub fn duration(&self) -> f64 {
        self.duration_ticks as f64 / self.time_division as f64
    }

    /// End time in quarter notes
    pub fn end(&self) -> f64 {
        (self.start_ticks + self.duration_ticks) as f64 / self.time_division as f64
    }

    /// Identifies the key of the note
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_pitch(self.pitch)
    }

    /// Identifies the octave of the note
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave::from_pitch(self.pitch)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {} {}",
            self.key(),
            self.octave(),
            self.velocity,
            self.start(),
            self.end()
        )
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[doc = r#"
The pitch class of a [`Note`], ignoring octave.
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    /// Returns an array beginning with [`Key::C`] to [`Key::B`]
    pub fn all() -> [Key; 12] {
        use Key::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// Identify the key from a key number.
    #[inline]
    pub const fn from_pitch(pitch: u8) -> Self {
        use Key::*;
        match pitch % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    /// Returns true if the key is sharp.
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        let name = match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        };
        f.write_str(name)
    }
}

#[doc = r#"
The octave of a [`Note`]. Values range from -1 to 9; key number 60 is in octave 4.
"#]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octave(i8);

impl Octave {
    /// Create an octave, clamped to -1..=9
    pub const fn new(octave: i8) -> Self {
        let octave = if octave < -1 {
            -1
        } else if octave > 9 {
            9
        } else {
            octave
        };
        Self(octave)
    }

    /// Identify the octave from a key number.
    pub const fn from_pitch(pitch: u8) -> Self {
        Self((pitch / 12) as i8 - 1)
    }

    /// The octave as a number
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_key() {
    assert_eq!(Key::from_pitch(12), Key::C);
    assert_eq!(Key::from_pitch(94), Key::ASharp);
    assert_eq!(Key::from_pitch(21), Key::A);
}

#[test]
fn test_octave() {
    assert_eq!(Octave::from_pitch(12).value(), 0);
    assert_eq!(Octave::from_pitch(94).value(), 6);
    assert_eq!(Octave::from_pitch(0).value(), -1);
    assert_eq!(Octave::from_pitch(127).value(), 9);
}

#[test]
fn closing_sets_duration() {
    let mut note = Note::new(2, 60, 100, 48, 96);
    assert_eq!(note.duration(), 0.);
    note.close(144);
    assert_eq!(note.start(), 0.5);
    assert_eq!(note.duration(), 1.);
    assert_eq!(note.end(), 1.5);
}

#[test]
fn display_note() {
    let mut note = Note::new(0, 61, 90, 0, 4);
    note.close(6);
    assert_eq!(alloc::format!("{note}"), "C#4 90 0 1.5");
}
