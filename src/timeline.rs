#![doc = r#"
The flattened note view a playback or visualization layer works from

The decoder reports time in quarter notes. A [`Timeline`] converts that
into the units such a layer uses: one [`TimelineEvent`] per sounding
note, with `display_pitch = pitch - 20` (so the lowest piano key, 21, is 1)
and `time_ms = round(1000 * start)`.

Notes with a velocity of zero are left out. Events keep track order, then
note order, the same order the tracks hold them in.
"#]

use alloc::vec::Vec;

use crate::{file::SequenceFile, note::Note};

/// Offset between a key number and its display pitch
pub const DISPLAY_PITCH_OFFSET: i16 = 20;

/// One note on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEvent {
    /// `pitch - 20`
    pub display_pitch: i16,
    /// `round(1000 * start)`
    pub time_ms: u64,
}

impl TimelineEvent {
    /// Convert a decoded note
    pub fn from_note(note: &Note) -> Self {
        Self {
            display_pitch: i16::from(note.pitch()) - DISPLAY_PITCH_OFFSET,
            // start is never negative
            time_ms: (note.start() * 1000. + 0.5) as u64,
        }
    }
}

/// All sounding notes of a file, with the first and last start times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    events: Vec<TimelineEvent>,
    first_ms: Option<u64>,
    last_ms: Option<u64>,
}

impl Timeline {
    /// Flatten the tracks of a decoded file
    pub fn from_file(file: &SequenceFile) -> Self {
        let events: Vec<_> = file
            .tracks()
            .iter()
            .flat_map(|track| track.iter())
            .filter(|note| note.velocity() > 0)
            .map(TimelineEvent::from_note)
            .collect();

        let first_ms = events.iter().map(|e| e.time_ms).min();
        let last_ms = events.iter().map(|e| e.time_ms).max();

        Self {
            events,
            first_ms,
            last_ms,
        }
    }

    /// The events in track order
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Earliest start time, `None` if there are no notes
    pub fn first_ms(&self) -> Option<u64> {
        self.first_ms
    }

    /// Latest start time, `None` if there are no notes
    pub fn last_ms(&self) -> Option<u64> {
        self.last_ms
    }

    /// Time between the first and last note starts
    pub fn span_ms(&self) -> u64 {
        match (self.first_ms, self.last_ms) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        }
    }

    /// Events whose start, measured from the first note, lies in
    /// `from_ms..to_ms`.
    pub fn window(&self, from_ms: u64, to_ms: u64) -> impl Iterator<Item = &TimelineEvent> {
        let first = self.first_ms.unwrap_or(0);
        self.events.iter().filter(move |e| {
            let offset = e.time_ms - first;
            from_ms <= offset && offset < to_ms
        })
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if no note sounds
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<&SequenceFile> for Timeline {
    fn from(file: &SequenceFile) -> Self {
        Self::from_file(file)
    }
}

#[test]
fn converts_units() {
    // 480 ticks per quarter, start at 720 ticks = 1.5 quarter notes
    let note = Note::new(0, 60, 100, 720, 480);
    assert_eq!(
        TimelineEvent::from_note(&note),
        TimelineEvent {
            display_pitch: 40,
            time_ms: 1500
        }
    );

    let low = Note::new(0, 5, 100, 1, 3);
    let event = TimelineEvent::from_note(&low);
    assert_eq!(event.display_pitch, -15);
    assert_eq!(event.time_ms, 333);
}

#[test]
fn empty_timeline() {
    let timeline = Timeline::default();
    assert_eq!(timeline.first_ms(), None);
    assert_eq!(timeline.span_ms(), 0);
    assert_eq!(timeline.window(0, 1000).count(), 0);
}
