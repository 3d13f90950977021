//! Builds Standard MIDI File bytes for the integration tests.
#![allow(dead_code)]

/// `FF 2F 00`, preceded by a zero delta
pub const END_OF_TRACK: [u8; 4] = [0x00, 0xFF, 0x2F, 0x00];

/// Encode a variable length quantity
pub fn vlq(mut value: u32) -> Vec<u8> {
    let mut out = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        out.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    out.reverse();
    out
}

/// An `MThd` chunk
pub fn header(format: u16, track_count: u16, time_division: u16) -> Vec<u8> {
    let mut out = b"MThd".to_vec();
    out.extend_from_slice(&6i32.to_be_bytes());
    out.extend_from_slice(&format.to_be_bytes());
    out.extend_from_slice(&track_count.to_be_bytes());
    out.extend_from_slice(&time_division.to_be_bytes());
    out
}

/// An `MTrk` chunk whose length matches its events
pub fn track(events: &[u8]) -> Vec<u8> {
    track_with_length(events.len() as i32, events)
}

/// An `MTrk` chunk declaring `length`, whatever the events hold
pub fn track_with_length(length: i32, events: &[u8]) -> Vec<u8> {
    let mut out = b"MTrk".to_vec();
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(events);
    out
}

/// A format 1 file with one chunk per entry of `tracks`
pub fn smf(time_division: u16, tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header(1, tracks.len() as u16, time_division);
    for chunk in tracks {
        out.extend_from_slice(chunk);
    }
    out
}

/// Delta time followed by an event
pub fn event(delta: u32, bytes: &[u8]) -> Vec<u8> {
    let mut out = vlq(delta);
    out.extend_from_slice(bytes);
    out
}

/// A Set Tempo meta event at delta 0
pub fn tempo(micros_per_quarter: u32) -> Vec<u8> {
    let [_, a, b, c] = micros_per_quarter.to_be_bytes();
    vec![0x00, 0xFF, 0x51, 0x03, a, b, c]
}

/// Concatenate event byte groups
pub fn events(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}
