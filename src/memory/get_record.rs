use crate::connection::{Command, Message, ParseResponseError};

use super::{Measurement, RecordIndex};

/// First byte of a 9-byte response carrying a stored measurement.
pub const PRESENT_MARKER: u8 = 0xAC;

/// Sole byte of a 1-byte response for a slot that was never written.
pub const ABSENT_MARKER: u8 = 0xA9;

/// The Request Record command: fetch the slot at a 1-based index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GetRecord {
    index: RecordIndex,
}

impl GetRecord {
    pub fn new(index: RecordIndex) -> Self {
        Self { index }
    }
}

impl From<GetRecord> for Message {
    fn from(value: GetRecord) -> Self {
        Message::with_argument(0xA3, value.index.value())
    }
}

impl Command for GetRecord {
    type Output = SlotRecord;

    type Error = ();

    const RESPONSE_LIMIT: usize = 9;

    fn parse_response(data: &[u8]) -> Result<Self::Output, ParseResponseError<Self::Error>> {
        Ok(SlotRecord::classify(data))
    }
}

/// What came back for a single storage slot.
///
/// One of these is produced for every requested index. `Malformed` is a
/// reported, non-fatal condition: the fetch loop carries on with the next
/// slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotRecord {
    Present(Measurement),
    /// The slot exists but holds no measurement.
    Absent,
    /// The response matched neither the present nor the absent shape.
    Malformed { len: usize },
}

impl SlotRecord {
    /// Classify a raw fetch response by its length and leading byte.
    pub fn classify(data: &[u8]) -> Self {
        match data {
            [PRESENT_MARKER, payload @ ..] if payload.len() == 8 => {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(payload);
                Self::Present(Measurement::from_payload(&bytes))
            }
            [ABSENT_MARKER] => Self::Absent,
            _ => Self::Malformed { len: data.len() },
        }
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            Self::Present(measurement) => Some(measurement),
            _ => None,
        }
    }
}
