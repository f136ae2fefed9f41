use std::borrow::Cow;

use crate::{
    connection::{Command, Message, ParseResponseError},
    log_vec, Loggable,
};

/// The Request Device Identity command.
///
/// The device answers with up to 128 bytes of identity text. Shorter
/// responses are common and legal; whatever arrives before the timeout is
/// the complete identity.
pub struct GetIdent;

impl From<GetIdent> for Message {
    fn from(_: GetIdent) -> Self {
        Message::new(0xA4)
    }
}

impl Command for GetIdent {
    type Output = DeviceIdent;

    type Error = ();

    const RESPONSE_LIMIT: usize = 128;

    fn parse_response(data: &[u8]) -> Result<Self::Output, ParseResponseError<Self::Error>> {
        Ok(DeviceIdent::from_data(data))
    }
}

/// The identity text reported by the device.
///
/// Kept as raw bytes: the device does not promise UTF-8 or a NUL
/// terminator.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceIdent {
    data: Vec<u8>,
}

impl DeviceIdent {
    pub fn from_data(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn raw(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The identity as text, with invalid UTF-8 replaced and trailing NUL
    /// padding removed.
    pub fn text(&self) -> Cow<'_, str> {
        let trimmed = match self.data.iter().rposition(|&b| b != 0) {
            Some(last) => &self.data[..=last],
            None => &[],
        };

        String::from_utf8_lossy(trimmed)
    }
}

impl Loggable for DeviceIdent {
    fn as_log(&self) -> Vec<crate::LogItem> {
        log_vec![
            (0, "Device identity"),
            (1, "Name", self.text()),
            (1, "Raw length", self.len()),
        ]
    }
}
