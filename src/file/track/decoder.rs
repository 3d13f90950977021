use alloc::{collections::BTreeMap, vec::Vec};

use super::{ChunkBudget, Track};
use crate::{
    file::Tempo,
    message::{ChannelStatus, EventClass, MetaType, VoiceKind},
    note::Note,
    reader::*,
};

/// Indices of notes still waiting for their note-off, per `(channel, pitch)`.
///
/// The most recently opened note is closed first.
#[derive(Debug, Default)]
struct OpenNotes {
    open: BTreeMap<(u8, u8), Vec<usize>>,
}

impl OpenNotes {
    fn push(&mut self, channel: u8, pitch: u8, index: usize) {
        self.open.entry((channel, pitch)).or_default().push(index);
    }

    fn pop(&mut self, channel: u8, pitch: u8) -> Option<usize> {
        self.open.get_mut(&(channel, pitch))?.pop()
    }
}

enum Step {
    Continue,
    EndOfTrack,
}

/// What came out of one track chunk.
#[derive(Debug)]
pub(crate) struct DecodedTrack {
    pub track: Track,
    /// The last valid Set Tempo event seen in the track
    pub tempo: Option<Tempo>,
    /// True if the track finished with an end-of-track event
    pub terminated: bool,
    /// The error that stopped the track early, if any
    pub error: Option<ReaderError>,
}

/// The decoding state of a single track chunk.
pub(crate) struct TrackDecoder {
    time_division: u16,
    ticks: u64,
    running_status: Option<ChannelStatus>,
    budget: ChunkBudget,
    notes: Vec<Note>,
    open: OpenNotes,
    tempo: Option<Tempo>,
}

impl TrackDecoder {
    pub fn new(time_division: u16, length: u32) -> Self {
        Self {
            time_division,
            ticks: 0,
            running_status: None,
            budget: ChunkBudget::new(length),
            notes: Vec::new(),
            open: OpenNotes::default(),
            tempo: None,
        }
    }

    /// Decodes events until the end-of-track event, the end of the chunk,
    /// or the first error.
    pub fn decode(mut self, reader: &mut Reader<'_>) -> DecodedTrack {
        let mut terminated = false;
        let mut error = None;
        while !self.budget.is_spent() {
            match self.next_event(reader) {
                Ok(Step::Continue) => {}
                Ok(Step::EndOfTrack) => {
                    terminated = true;
                    break;
                }
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        DecodedTrack {
            track: Track::new(self.notes),
            tempo: self.tempo,
            terminated,
            error,
        }
    }

    fn next_event(&mut self, reader: &mut Reader<'_>) -> ReadResult<Step> {
        let delta = self.budget.read_vlq(reader)?;
        self.ticks += u64::from(delta);

        let position = reader.buffer_position();
        let flag = self.budget.read_u8(reader)?;

        if flag & 0x80 == 0 {
            // running status: the flag is already the first data byte
            let status = self.running_status.ok_or(ReaderError::new(
                position,
                ReaderErrorKind::MissingRunningStatus,
            ))?;
            return self.channel_message(reader, status, flag);
        }

        let class =
            EventClass::from_status(flag).map_err(|kind| ReaderError::new(position, kind))?;
        match class {
            EventClass::SystemExclusive => self.skip_sysex(reader),
            EventClass::Meta => self.meta_event(reader),
            EventClass::ChannelVoice(status) => {
                self.running_status = Some(status);
                let first = self.budget.read_u8(reader)?;
                self.channel_message(reader, status, first)
            }
        }
    }

    fn skip_sysex(&mut self, reader: &mut Reader<'_>) -> ReadResult<Step> {
        while self.budget.read_u8(reader)? != 0xF7 {}
        Ok(Step::Continue)
    }

    fn meta_event(&mut self, reader: &mut Reader<'_>) -> ReadResult<Step> {
        let meta_type = MetaType::from(self.budget.read_u8(reader)?);
        if meta_type == MetaType::EndOfTrack {
            if !self.budget.is_spent() {
                self.budget.read_u8(reader)?;
            }
            return Ok(Step::EndOfTrack);
        }

        let length = self.budget.read_vlq(reader)? as usize;
        let payload = self.budget.read_bytes(reader, length)?;

        match meta_type {
            MetaType::Tempo => match Tempo::new_from_bytes(payload) {
                Some(tempo) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(bpm = tempo.bpm(), ticks = self.ticks, "tempo change");
                    self.tempo = Some(tempo);
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(?payload, "ignoring malformed tempo event");
                }
            },
            _other => {
                #[cfg(feature = "tracing")]
                tracing::trace!(meta_type = ?_other, length, "skipping meta event");
            }
        }
        Ok(Step::Continue)
    }

    fn channel_message(
        &mut self,
        reader: &mut Reader<'_>,
        status: ChannelStatus,
        first: u8,
    ) -> ReadResult<Step> {
        let second = match status.kind().data_len() {
            2 => Some(self.budget.read_u8(reader)? & 0x7F),
            _ => None,
        };
        let channel = status.channel();
        let first = first & 0x7F;

        match (status.kind(), second) {
            (VoiceKind::NoteOn, Some(velocity)) if velocity > 0 => {
                self.note_on(channel, first, velocity)
            }
            (VoiceKind::NoteOn | VoiceKind::NoteOff, _) => self.note_off(channel, first),
            (VoiceKind::ProgramChange, _) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(channel, program = first, "program change");
            }
            _ => {}
        }
        Ok(Step::Continue)
    }

    fn note_on(&mut self, channel: u8, pitch: u8, velocity: u8) {
        self.open.push(channel, pitch, self.notes.len());
        self.notes.push(Note::new(
            channel,
            pitch,
            velocity,
            self.ticks,
            self.time_division,
        ));
    }

    fn note_off(&mut self, channel: u8, pitch: u8) {
        // an off with nothing open is dropped
        if let Some(index) = self.open.pop(channel, pitch) {
            self.notes[index].close(self.ticks);
        }
    }
}

#[cfg(test)]
fn decode_events(time_division: u16, events: &[u8]) -> DecodedTrack {
    let mut reader = Reader::from_byte_slice(events);
    TrackDecoder::new(time_division, events.len() as u32).decode(&mut reader)
}

#[test]
fn running_status_note_on() {
    let decoded = decode_events(96, &[0x00, 0x90, 60, 100, 0x00, 62, 100]);
    assert!(decoded.error.is_none());
    let notes = decoded.track.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!((notes[0].pitch(), notes[0].velocity()), (60, 100));
    assert_eq!((notes[1].pitch(), notes[1].velocity()), (62, 100));
}

#[test]
fn pairs_with_most_recent_open_note() {
    let decoded = decode_events(
        1,
        &[
            0x00, 0x90, 60, 100, // first 60
            0x02, 0x90, 60, 90, // second 60, overlapping
            0x03, 0x80, 60, 0, // closes the second
            0x04, 0x80, 60, 0, // closes the first
        ],
    );
    let notes = decoded.track.notes();
    assert_eq!(notes[0].duration_ticks(), 9);
    assert_eq!(notes[1].duration_ticks(), 3);
}

#[test]
fn channels_are_paired_separately() {
    let decoded = decode_events(
        1,
        &[
            0x00, 0x90, 60, 100, //
            0x00, 0x91, 60, 100, //
            0x05, 0x81, 60, 0, //
        ],
    );
    let notes = decoded.track.notes();
    assert_eq!(notes[0].duration_ticks(), 0);
    assert_eq!(notes[1].duration_ticks(), 5);
}

#[test]
fn program_change_takes_one_byte() {
    let decoded = decode_events(
        1,
        &[
            0x00, 0xC0, 5, // program change
            0x00, 0xD0, 40, // channel pressure
            0x00, 0x90, 60, 100,
        ],
    );
    assert!(decoded.error.is_none());
    assert_eq!(decoded.track.len(), 1);
}

#[test]
fn sysex_is_skipped() {
    let decoded = decode_events(
        1,
        &[
            0x00, 0xF0, 0x43, 0x12, 0x00, 0xF7, //
            0x00, 0x90, 60, 100,
        ],
    );
    assert!(decoded.error.is_none());
    assert_eq!(decoded.track.notes()[0].pitch(), 60);
}

#[test]
fn end_of_track_stops_decoding() {
    let decoded = decode_events(1, &[0x00, 0xFF, 0x2F, 0x00, 0x00, 0x90, 60, 100]);
    assert!(decoded.terminated);
    assert!(decoded.track.is_empty());
}

#[test]
fn last_tempo_in_track_wins() {
    let decoded = decode_events(
        1,
        &[
            0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
            0x00, 0xFF, 0x03, 0x02, b'h', b'i', // track name
            0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40,
        ],
    );
    assert_eq!(decoded.tempo.map(|t| t.bpm()), Some(60.));
}

#[test]
fn end_of_track_at_chunk_end() {
    let decoded = decode_events(1, &[0x00, 0x90, 60, 100, 0x00, 0xFF, 0x2F]);
    assert!(decoded.terminated);
    assert!(decoded.error.is_none());
}

#[test]
fn data_byte_without_status() {
    let decoded = decode_events(1, &[0x00, 60, 100]);
    let err = decoded.error.unwrap();
    assert_eq!(err.error_kind(), &ReaderErrorKind::MissingRunningStatus);
    assert_eq!(err.position(), 1);
}

#[test]
fn system_common_status_is_rejected() {
    let decoded = decode_events(1, &[0x00, 0x90, 60, 100, 0x00, 0xF2, 0x00, 0x00]);
    assert_eq!(decoded.track.len(), 1);
    assert_eq!(
        decoded.error.unwrap().error_kind(),
        &ReaderErrorKind::UnsupportedStatus(0xF2)
    );
}
