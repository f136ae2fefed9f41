use crate::connection::{Command, Message, ParseResponseError};

/// The Request Record Count command.
///
/// The single response byte is the number of stored records. Unlike the
/// identity query, a response here is mandatory: the link was confirmed
/// moments before, so silence means the device stopped responding rather
/// than "zero records".
pub struct GetRecordCount;

impl From<GetRecordCount> for Message {
    fn from(_: GetRecordCount) -> Self {
        Message::new(0xA2)
    }
}

impl Command for GetRecordCount {
    type Output = u8;

    type Error = ();

    const RESPONSE_LIMIT: usize = 1;

    fn parse_response(data: &[u8]) -> Result<Self::Output, ParseResponseError<Self::Error>> {
        data.first()
            .copied()
            .ok_or(ParseResponseError::NotEnoughData)
    }
}
