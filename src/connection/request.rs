/// A device-bound message: one command byte, optionally followed by a
/// single argument byte.
///
/// The BM-58 protocol has no longer requests than that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Message {
    bytes: [u8; 2],
    len: u8,
}

impl Message {
    pub const fn new(command: u8) -> Self {
        Self {
            bytes: [command, 0],
            len: 1,
        }
    }

    pub const fn with_argument(command: u8, argument: u8) -> Self {
        Self {
            bytes: [command, argument],
            len: 2,
        }
    }

    pub fn command(&self) -> u8 {
        self.bytes[0]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// A [`Message`] paired with the number of response bytes to wait for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Request {
    message: Message,
    response_limit: usize,
}

impl Request {
    pub const fn new(message: Message, response_limit: usize) -> Self {
        Self {
            message,
            response_limit,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn response_limit(&self) -> usize {
        self.response_limit
    }
}
