#![doc = r#"
Classification of the status bytes found in a track chunk

# Hierarchy
```text
                    |--------------|
                    | Status Byte  |
                    |--------------|
                   /       |        \
|-----------------|  |---------|  |----------------------|
| Channel Voice   |  | Meta    |  | System Exclusive     |
| 0x80..=0xEF     |  | 0xFF    |  | 0xF0, 0xF7           |
|-----------------|  |---------|  |----------------------|
```

Any other `0xF_` status is a system common or real-time message, which
has no place in a file.
"#]

mod meta;
pub use meta::*;

mod voice;
pub use voice::*;

use crate::reader::ReaderErrorKind;

/// The class of event a status byte introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    /// `0xF0` or `0xF7`
    SystemExclusive,
    /// `0xFF`
    Meta,
    /// `0x80..=0xEF`
    ChannelVoice(ChannelStatus),
}

impl EventClass {
    /// Classify a byte with its high bit set.
    pub fn from_status(status: u8) -> Result<Self, ReaderErrorKind> {
        match status {
            0xF0 | 0xF7 => Ok(Self::SystemExclusive),
            0xFF => Ok(Self::Meta),
            _ => ChannelStatus::from_status(status).map(Self::ChannelVoice),
        }
    }
}

#[test]
fn classifies_status_bytes() {
    assert_eq!(
        EventClass::from_status(0xF7),
        Ok(EventClass::SystemExclusive)
    );
    assert_eq!(EventClass::from_status(0xFF), Ok(EventClass::Meta));
    assert!(matches!(
        EventClass::from_status(0x93),
        Ok(EventClass::ChannelVoice(s)) if s.kind() == VoiceKind::NoteOn && s.channel() == 3
    ));
    assert_eq!(
        EventClass::from_status(0xF8),
        Err(ReaderErrorKind::UnsupportedStatus(0xF8))
    );
}
