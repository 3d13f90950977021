use num_enum::FromPrimitive;

/// The type byte following `0xFF` in a meta event.
///
/// Only [`MetaType::EndOfTrack`] and [`MetaType::Tempo`] change what the
/// decoder produces. Everything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MetaType {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    MidiPort = 0x21,
    /// `FF 2F 00`
    EndOfTrack = 0x2F,
    /// `FF 51 03 tt tt tt`
    Tempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
    /// A type this crate does not name
    #[num_enum(catch_all)]
    Unknown(u8),
}

#[test]
fn unknown_types_keep_their_byte() {
    assert_eq!(MetaType::from(0x51), MetaType::Tempo);
    assert_eq!(MetaType::from(0x60), MetaType::Unknown(0x60));
}
