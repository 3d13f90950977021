mod common;

use common::*;
use pretty_assertions::assert_eq;
use smf_notes::prelude::*;

fn note_summary(track: &Track) -> Vec<(u8, u8, u8, f64, f64)> {
    track
        .iter()
        .map(|n| (n.channel(), n.pitch(), n.velocity(), n.start(), n.duration()))
        .collect()
}

#[test]
fn vlq_round_trip() {
    let values = [
        0, 1, 0x7F, 0x80, 0x2000, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0x0FFF_FFFF,
    ];
    for value in values {
        let mut events = event(value, &[0x90, 60, 100]);
        events.extend_from_slice(&END_OF_TRACK);
        let file = SequenceFile::parse(smf(1, &[track(&events)])).unwrap();
        assert_eq!(file.tracks()[0].notes()[0].start_ticks(), u64::from(value));
    }
}

#[test]
fn running_status_yields_two_notes() {
    let events = events(&[&[0x00, 0x90, 60, 100, 0x00, 62, 100], &END_OF_TRACK]);
    let file = SequenceFile::parse(smf(96, &[track(&events)])).unwrap();

    assert_eq!(
        note_summary(&file.tracks()[0]),
        vec![(0, 60, 100, 0., 0.), (0, 62, 100, 0., 0.)]
    );
}

#[test]
fn note_pairing() {
    let events = events(&[&[0x00, 0x90, 64, 80], &[0x0A, 0x80, 64, 0], &END_OF_TRACK]);
    let file = SequenceFile::parse(smf(10, &[track(&events)])).unwrap();

    assert_eq!(note_summary(&file.tracks()[0]), vec![(0, 64, 80, 0., 1.)]);
}

#[test]
fn zero_velocity_note_on_closes_note() {
    let with_off = events(&[&[0x00, 0x90, 64, 80], &[0x0A, 0x80, 64, 33], &END_OF_TRACK]);
    let with_on = events(&[&[0x00, 0x90, 64, 80], &[0x0A, 0x90, 64, 0], &END_OF_TRACK]);

    let a = SequenceFile::parse(smf(10, &[track(&with_off)])).unwrap();
    let b = SequenceFile::parse(smf(10, &[track(&with_on)])).unwrap();

    assert_eq!(a.tracks(), b.tracks());
    assert_eq!(b.tracks()[0].notes()[0].duration(), 1.);
}

#[test]
fn unmatched_note_off_changes_nothing() {
    let events = events(&[
        &[0x00, 0x90, 60, 100],
        &[0x05, 0x80, 61, 0], // never opened
        &[0x00, 0x81, 60, 0], // right pitch, wrong channel
        &END_OF_TRACK,
    ]);
    let file = SequenceFile::parse(smf(1, &[track(&events)])).unwrap();

    assert_eq!(note_summary(&file.tracks()[0]), vec![(0, 60, 100, 0., 0.)]);
    assert!(file.track_errors().is_empty());
}

#[test]
fn closed_notes_end_at_their_off_event() {
    let events = events(&[
        &[0x00, 0x90, 60, 100],
        &[0x30, 0x91, 67, 90],
        &[0x30, 0x80, 60, 0],
        &[0x60, 0x81, 67, 0],
        &END_OF_TRACK,
    ]);
    let file = SequenceFile::parse(smf(96, &[track(&events)])).unwrap();
    let notes = file.tracks()[0].notes();

    assert_eq!((notes[0].start(), notes[0].end()), (0., 1.));
    assert_eq!((notes[1].start(), notes[1].end()), (0.5, 2.));
    assert_eq!(notes[1].duration_ticks(), 144);
}

#[test]
fn tempo_from_meta_event() {
    let events = events(&[&tempo(500_000), &END_OF_TRACK]);
    let file = SequenceFile::parse(smf(96, &[track(&events)])).unwrap();
    assert_eq!(file.tempo(), 120.);
    assert_eq!(file.raw_tempo().micros_per_quarter_note(), 500_000);
}

#[test]
fn default_tempo() {
    let file = SequenceFile::parse(smf(96, &[track(&END_OF_TRACK)])).unwrap();
    assert_eq!(file.tempo(), 120.);
}

#[test]
fn last_tempo_in_file_wins() {
    let first = events(&[&tempo(400_000), &END_OF_TRACK]);
    let second = events(&[&tempo(750_000), &[0x00, 0x90, 60, 100], &END_OF_TRACK]);
    let third = events(&[&[0x00, 0x90, 48, 100], &END_OF_TRACK]);
    let file =
        SequenceFile::parse(smf(96, &[track(&first), track(&second), track(&third)])).unwrap();

    assert_eq!(file.tempo(), 80.);
}

#[test]
fn meta_and_sysex_are_skipped() {
    let events = events(&[
        &[0x00, 0xFF, 0x03, 0x05],
        b"Piano",
        &[0x00, 0xF0, 0x7E, 0x7F, 0x09, 0x01, 0xF7],
        &[0x00, 0xFF, 0x58, 0x04, 4, 2, 24, 8],
        &[0x00, 0xFF, 0x60, 0x01, 0x00], // unknown meta type
        &[0x10, 0x90, 72, 64],
        &END_OF_TRACK,
    ]);
    let file = SequenceFile::parse(smf(16, &[track(&events)])).unwrap();

    assert_eq!(note_summary(&file.tracks()[0]), vec![(0, 72, 64, 1., 0.)]);
}

#[test]
fn other_voice_messages_keep_running_status() {
    let events = events(&[
        &[0x00, 0xB2, 64, 127],    // sustain on
        &[0x00, 0x92, 60, 100],    //
        &[0x00, 0xE2, 0x00, 0x40], // pitch bend
        &[0x00, 0x30, 0x00],       // running pitch bend
        &[0x08, 0x92, 60, 0],
        &END_OF_TRACK,
    ]);
    let file = SequenceFile::parse(smf(8, &[track(&events)])).unwrap();

    assert_eq!(note_summary(&file.tracks()[0]), vec![(2, 60, 100, 0., 1.)]);
}

#[test]
fn header_fields_are_reported() {
    let mut bytes = header(0, 1, 480);
    bytes.extend(track(&END_OF_TRACK));
    let file = SequenceFile::parse(bytes).unwrap();

    assert_eq!(file.format().format_type(), Some(FormatType::SingleMultiChannel));
    assert_eq!(file.track_count(), 1);
    assert_eq!(file.time_division(), 480);
}

#[test]
fn display_lists_tracks() {
    let first = events(&[&[0x00, 0x90, 69, 100], &[0x04, 0x80, 69, 0], &END_OF_TRACK]);
    let second = events(&[&[0x02, 0x90, 60, 50], &END_OF_TRACK]);
    let file = SequenceFile::parse(smf(4, &[track(&first), track(&second)])).unwrap();

    assert_eq!(
        file.to_string(),
        "Track 1\nA4 100 0 1\nTrack 2\nC4 50 0.5 0.5\n"
    );
}

#[test]
fn bad_magic() {
    let mut bytes = smf(96, &[track(&END_OF_TRACK)]);
    bytes[..4].copy_from_slice(b"XXXX");
    let err = SequenceFile::parse(bytes).unwrap_err();

    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::BadMagic {
            expected: *b"MThd",
            found: *b"XXXX"
        }
    );
}

#[test]
fn zero_time_division() {
    let err = SequenceFile::parse(smf(0, &[track(&END_OF_TRACK)])).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::InvalidTimeDivision(0));
}

#[test]
fn bad_header_size() {
    let mut bytes = smf(96, &[track(&END_OF_TRACK)]);
    bytes[7] = 7;
    let err = SequenceFile::parse(bytes).unwrap_err();
    assert_eq!(err.error_kind(), &ReaderErrorKind::BadHeaderSize(7));
}

#[test]
fn short_header_is_eof() {
    let bytes = header(1, 1, 96);
    let err = SequenceFile::parse(&bytes[..10]).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn missing_first_track_is_eof() {
    let err = SequenceFile::parse(header(1, 1, 96)).unwrap_err();
    assert!(err.is_out_of_bounds());
}

#[test]
fn bad_track_tag() {
    let mut bytes = header(1, 1, 96);
    bytes.extend(b"MTrx\0\0\0\x04");
    bytes.extend(END_OF_TRACK);
    let err = SequenceFile::parse(bytes).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::BadMagic { expected, .. } if expected == b"MTrk"
    ));
    assert_eq!(err.position(), 14);
}
