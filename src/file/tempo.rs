/// Microseconds in one minute
const MICROS_PER_MINUTE: f64 = 60_000_000.;

#[doc = r#"
The payload of a Set Tempo meta event (`FF 51 03 tt tt tt`): a 24-bit
big-endian count of microseconds per quarter note.

```rust
# use smf_notes::prelude::*;
let tempo = Tempo::new_from_bytes(&[0x07, 0xA1, 0x20]).unwrap();
assert_eq!(tempo.micros_per_quarter_note(), 500_000);
assert_eq!(tempo.bpm(), 120.);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Default for Tempo {
    /// 120 beats per minute
    fn default() -> Self {
        Self(500_000)
    }
}

impl Tempo {
    /// Create a tempo from microseconds per quarter note.
    ///
    /// Returns `None` for zero.
    pub const fn new(micros_per_quarter_note: u32) -> Option<Self> {
        if micros_per_quarter_note == 0 {
            return None;
        }
        Some(Self(micros_per_quarter_note))
    }

    /// Decode a Set Tempo payload.
    ///
    /// Returns `None` unless the payload is exactly three bytes and nonzero.
    pub fn new_from_bytes(bytes: &[u8]) -> Option<Self> {
        let &[hi, mid, lo] = bytes else {
            return None;
        };
        Self::new(u32::from_be_bytes([0, hi, mid, lo]))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Quarter notes per minute
    pub fn bpm(&self) -> f64 {
        MICROS_PER_MINUTE / self.0 as f64
    }
}

#[test]
fn rejects_bad_payloads() {
    assert_eq!(Tempo::new_from_bytes(&[0, 0, 0]), None);
    assert_eq!(Tempo::new_from_bytes(&[0x07, 0xA1]), None);
    assert_eq!(Tempo::new_from_bytes(&[0, 0x07, 0xA1, 0x20]), None);
}

#[test]
fn converts_to_bpm() {
    assert_eq!(Tempo::default().bpm(), 120.);
    assert_eq!(Tempo::new(1_000_000).unwrap().bpm(), 60.);
}
