mod request;
pub use request::{Message, Request};

mod response;
pub use response::Response;

#[cfg(feature = "serial")]
mod serial;

#[cfg(feature = "serial")]
pub use serial::Serial;

/// A byte-oriented duplex channel to a BM-58.
///
/// The link is half-duplex without any framing beyond fixed response
/// lengths, so implementations must fully complete one request/response
/// exchange before the next request is written.
pub trait Connection {
    type Error: core::fmt::Debug;

    fn send(&mut self, request: &Request) -> Result<(), Self::Error>;

    /// Read up to `limit` bytes, bounded by the per-read timeout.
    ///
    /// Receiving fewer than `limit` bytes (including none at all) is not
    /// an error: the device answers several commands with responses whose
    /// length carries meaning. Callers must consult the length of the
    /// returned [`Response`].
    fn recv(&mut self, limit: usize) -> Result<Response, Self::Error>;

    fn send_recv(&mut self, request: &Request) -> Result<Response, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParseResponseError<T> {
    /// The device sent no bytes for a command whose response is mandatory.
    NotEnoughData,
    Parse(T),
}

impl<T> From<T> for ParseResponseError<T> {
    fn from(value: T) -> Self {
        Self::Parse(value)
    }
}

/// A single command in the BM-58 protocol.
pub trait Command: Into<Message> {
    type Output;
    type Error;

    /// The maximum number of response bytes the device will send for
    /// this command.
    const RESPONSE_LIMIT: usize;

    fn parse_response(data: &[u8]) -> Result<Self::Output, ParseResponseError<Self::Error>>;
}
