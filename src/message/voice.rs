use num_enum::TryFromPrimitive;

use crate::reader::ReaderErrorKind;

/// The message type held in the high nibble of a channel voice status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum VoiceKind {
    /// `0x8n key velocity`
    NoteOff = 0x8,
    /// `0x9n key velocity`. A velocity of 0 means note off.
    NoteOn = 0x9,
    /// `0xAn key pressure`
    PolyphonicAftertouch = 0xA,
    /// `0xBn controller value`
    ControlChange = 0xB,
    /// `0xCn program`
    ProgramChange = 0xC,
    /// `0xDn pressure`
    ChannelPressure = 0xD,
    /// `0xEn lsb msb`
    PitchBend = 0xE,
}

impl VoiceKind {
    /// Number of data bytes following the status byte.
    ///
    /// Channel pressure takes one byte as the MIDI standard defines it,
    /// rather than the two bytes assumed for every type but program change.
    pub const fn data_len(&self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

/// A decoded channel voice status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStatus {
    kind: VoiceKind,
    channel: u8,
}

impl ChannelStatus {
    /// Split a status byte into its message type and channel.
    pub fn from_status(status: u8) -> Result<Self, ReaderErrorKind> {
        let kind = VoiceKind::try_from(status >> 4)
            .map_err(|_| ReaderErrorKind::UnsupportedStatus(status))?;
        Ok(Self {
            kind,
            channel: status & 0x0F,
        })
    }

    /// The message type
    pub const fn kind(&self) -> VoiceKind {
        self.kind
    }

    /// Channel, 0 to 15
    pub const fn channel(&self) -> u8 {
        self.channel
    }
}

#[test]
fn one_byte_messages() {
    assert_eq!(VoiceKind::ProgramChange.data_len(), 1);
    assert_eq!(VoiceKind::ChannelPressure.data_len(), 1);
    assert_eq!(VoiceKind::NoteOff.data_len(), 2);
    assert_eq!(VoiceKind::PitchBend.data_len(), 2);
}

#[test]
fn data_bytes_are_not_status() {
    assert_eq!(
        ChannelStatus::from_status(0x45),
        Err(ReaderErrorKind::UnsupportedStatus(0x45))
    );
}
