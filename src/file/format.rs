use num_enum::TryFromPrimitive;

/// The SMF sub-type named in the header.
///
/// The decoder only reports it. Tracks are decoded the same way for every format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: one track holding every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks played together
    Simultaneous = 1,
    /// Format 2: independent patterns played one after another
    SequentiallyIndependent = 2,
}

/// The raw 16-bit format field of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFormat(pub(crate) u16);

impl RawFormat {
    /// Wrap a raw format value
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// The value as written in the file
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns the format type, or `None` for values other than 0, 1 and 2.
    pub fn format_type(&self) -> Option<FormatType> {
        FormatType::try_from(self.0).ok()
    }
}

#[test]
fn known_and_unknown_formats() {
    assert_eq!(
        RawFormat::new(1).format_type(),
        Some(FormatType::Simultaneous)
    );
    assert_eq!(RawFormat::new(7).format_type(), None);
}
