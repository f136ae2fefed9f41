use std::num::NonZeroU8;

mod get_record;
pub use get_record::{GetRecord, SlotRecord, ABSENT_MARKER, PRESENT_MARKER};

/// The 1-based index of a storage slot in the device's memory.
///
/// The wire protocol carries the index as a single raw byte, so valid
/// indices are 1 through 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordIndex(NonZeroU8);

impl RecordIndex {
    pub const FIRST: Self = Self(NonZeroU8::MIN);

    pub fn new(index: u8) -> Option<Self> {
        NonZeroU8::new(index).map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0.get()
    }

    pub(crate) fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl core::fmt::Display for RecordIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A single stored blood-pressure measurement.
///
/// Pressures already include the device's +25 mmHg storage offset; the
/// calendar fields are the raw stored bytes and are not validated, since
/// the device itself never rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Systolic pressure in mmHg.
    pub systole: u16,
    /// Diastolic pressure in mmHg.
    pub diastole: u16,
    /// Pulse in bpm.
    pub pulse: u8,
    /// Month, 1-12 on a well-behaved device.
    pub month: u8,
    /// Day of month, 1-31 on a well-behaved device.
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// Full year; the device stores it as an offset from 2000.
    pub year: u16,
}

impl Measurement {
    /// Decode the 8 payload bytes that follow the record-present marker.
    ///
    /// The offsets are fixed by the wire format: pressures first, then
    /// month, day, hour, minute and the two-digit year.
    pub fn from_payload(payload: &[u8; 8]) -> Self {
        Self {
            systole: payload[0] as u16 + 25,
            diastole: payload[1] as u16 + 25,
            pulse: payload[2],
            month: payload[3],
            day: payload[4],
            hour: payload[5],
            minute: payload[6],
            year: 2000 + payload[7] as u16,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        Timestamp {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
        }
    }
}

/// The recording time of a [`Measurement`], minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl Timestamp {
    /// Convert to a calendar date and time.
    ///
    /// Returns `None` if the stored bytes do not name a real moment
    /// (month 13, day 32, ...). That does not make the record malformed
    /// on the wire, so the conversion is separate from decoding.
    #[cfg(feature = "time")]
    pub fn to_datetime(&self) -> Option<time::PrimitiveDateTime> {
        let month = time::Month::try_from(self.month).ok()?;
        let date = time::Date::from_calendar_date(self.year as i32, month, self.day).ok()?;
        let time = time::Time::from_hms(self.hour, self.minute, 0).ok()?;

        Some(time::PrimitiveDateTime::new(date, time))
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}
