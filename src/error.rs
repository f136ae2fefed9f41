#[derive(Clone, Debug, PartialEq)]
pub enum Bm58Error<CON, P> {
    /// The device did not acknowledge the attention byte. Either nothing
    /// came back within the timeout (`response` is `None`) or the byte
    /// received was not the acknowledge value.
    ///
    /// The device only listens after it has been switched to ON and MEM
    /// has been pressed.
    NoAcknowledge { response: Option<u8> },
    /// A command whose response is mandatory got no bytes back, even
    /// though the link had just been confirmed.
    NotResponding { command: u8 },
    /// The response to `command` could not be parsed.
    Command {
        error: P,
        command: u8,
        data: Vec<u8>,
    },
    Connection(CON),
}

impl<CON, P> From<CON> for Bm58Error<CON, P> {
    fn from(value: CON) -> Self {
        Self::Connection(value)
    }
}

impl<CON, P> Bm58Error<CON, P> {
    /// Map the connection error to a different type, keeping all other
    /// variants intact.
    pub fn map<CON2, F>(self, f: F) -> Bm58Error<CON2, P>
    where
        F: FnOnce(CON) -> CON2,
    {
        match self {
            Bm58Error::NoAcknowledge { response } => Bm58Error::NoAcknowledge { response },
            Bm58Error::NotResponding { command } => Bm58Error::NotResponding { command },
            Bm58Error::Command {
                error,
                command,
                data,
            } => Bm58Error::Command {
                error,
                command,
                data,
            },
            Bm58Error::Connection(e) => Bm58Error::Connection(f(e)),
        }
    }
}
