/// The bytes actually received in reply to a [`Request`].
///
/// May hold fewer bytes than the request's response limit; the length is
/// part of the protocol and is interpreted by the command that issued the
/// request.
///
/// [`Request`]: super::Request
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    data: Vec<u8>,
}

impl Response {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
