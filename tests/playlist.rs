#![cfg(feature = "std")]

mod common;

use std::{fs, path::PathBuf};

use common::*;
use pretty_assertions::assert_eq;
use smf_notes::playlist::{Playlist, PlaylistError};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("smf-notes-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn song(pitch: u8) -> Vec<u8> {
    let events = events(&[&[0x00, 0x90, pitch, 100], &[0x60, 0x80, pitch, 0], &END_OF_TRACK]);
    smf(96, &[track(&events)])
}

#[test]
fn skips_files_that_fail_to_decode() {
    let dir = scratch_dir("skip");
    fs::write(dir.join("a.mid"), song(60)).unwrap();
    fs::write(dir.join("b.mid"), b"RIFF not a midi file").unwrap();
    fs::write(dir.join("c.MIDI"), song(64)).unwrap();
    fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let playlist = Playlist::from_dir(&dir).unwrap();
    assert_eq!(playlist.len(), 3);

    let loaded = playlist.decode_all();
    let names: Vec<_> = loaded
        .iter()
        .map(|l| l.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.mid", "c.MIDI"]);
    assert_eq!(loaded[1].file.tracks()[0].notes()[0].pitch(), 64);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn reports_which_file_failed() {
    let dir = scratch_dir("report");
    let bad = dir.join("bad.mid");
    fs::write(&bad, b"MThd\0\0\0\x07").unwrap();
    let missing = dir.join("missing.mid");

    let playlist = Playlist::new([bad.clone(), missing.clone()]);
    let results: Vec<_> = playlist.iter().collect();

    assert!(matches!(&results[0], Err(PlaylistError::Decode { path, .. }) if *path == bad));
    assert!(matches!(&results[1], Err(PlaylistError::Io { path, .. }) if *path == missing));
    assert!(playlist.decode_all().is_empty());

    fs::remove_dir_all(&dir).unwrap();
}
