//! bm58-rs: a pure-rust client for the serial protocol of the Beurer
//! BM-58 blood pressure meter.
//!
//! This library provides command serialization and deserialization (in the
//! [`device`] and [`memory`] modules), and a way of connecting to a meter
//! over a serial port (in the [`connection`] module).
//!
//! A session is established with [`Bm58::connect`], which performs the
//! attention/acknowledge handshake; queries and record fetches are only
//! reachable through a linked session. Stored measurements are retrieved
//! in slot order with [`Bm58::records`]:
//!
//! ```no_run
//! use bm58_rs::{connection::Serial, Bm58};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let port = Serial::open("/dev/ttyUSB0")?;
//! let mut bm58 = Bm58::connect(port).map_err(|e| format!("{e:?}"))?;
//!
//! for (index, record) in bm58.records().map_err(|e| format!("{e:?}"))? {
//!     println!("{index}: {record:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod connection;

pub mod device;

mod error;
pub use error::Bm58Error;

pub mod memory;

#[macro_use]
mod fmt;
#[cfg(test)]
mod tests;

pub use fmt::{LogItem, LogOutput, Loggable, Logger};

use connection::{Command, Connection, Message, ParseResponseError, Request};
use device::{DeviceIdent, GetIdent, GetRecordCount};
use memory::{GetRecord, RecordIndex, SlotRecord};

/// Byte written to get the device's attention.
pub const ATTENTION: u8 = 0xAA;

/// Byte the device answers with when it is switched on and listening.
pub const ACKNOWLEDGE: u8 = 0x55;

/// A linked session with a BM-58.
///
/// Owns the connection exclusively for its lifetime. Constructing one
/// runs the handshake, so a value of this type is proof that the device
/// acknowledged the link; there is no way to issue a query or a record
/// fetch against an unlinked connection.
pub struct Bm58<CON> {
    inner: CON,
}

impl<CON> Bm58<CON> {
    /// Hand the connection back, ending the session.
    pub fn release(self) -> CON {
        self.inner
    }
}

impl<CON> Bm58<CON>
where
    CON: Connection,
{
    /// Perform the attention/acknowledge exchange and return a linked
    /// session.
    ///
    /// On failure the connection is dropped, which closes the underlying
    /// port: a timeout mid-handshake leaves the device's response buffer
    /// in an unknown position, so the whole session is abandoned rather
    /// than partially recovered. Connecting again on a fresh connection
    /// simply re-runs the exchange.
    pub fn connect(connection: CON) -> Result<Self, Bm58Error<CON::Error, ()>> {
        let mut bm58 = Self { inner: connection };
        bm58.handshake()?;
        Ok(bm58)
    }

    fn handshake(&mut self) -> Result<(), Bm58Error<CON::Error, ()>> {
        let request = Request::new(Message::new(ATTENTION), 1);
        let response = self.inner.send_recv(&request)?;

        match response.data() {
            [ACKNOWLEDGE] => {
                log::debug!("Device acknowledged attention byte");
                Ok(())
            }
            data => Err(Bm58Error::NoAcknowledge {
                response: data.first().copied(),
            }),
        }
    }

    pub fn inner_mut(&mut self) -> &mut CON {
        &mut self.inner
    }

    /// Send a command and parse its response.
    pub fn send_recv<CMD>(
        &mut self,
        command: CMD,
    ) -> Result<CMD::Output, Bm58Error<CON::Error, CMD::Error>>
    where
        CMD: Command,
    {
        let message: Message = command.into();
        let command_byte = message.command();

        let request = Request::new(message, CMD::RESPONSE_LIMIT);
        let response = self.inner.send_recv(&request)?;

        CMD::parse_response(response.data()).map_err(|e| match e {
            ParseResponseError::NotEnoughData => Bm58Error::NotResponding {
                command: command_byte,
            },
            ParseResponseError::Parse(error) => Bm58Error::Command {
                error,
                command: command_byte,
                data: response.data().to_vec(),
            },
        })
    }

    /// Query the device's identity text.
    pub fn ident(&mut self) -> Result<DeviceIdent, Bm58Error<CON::Error, ()>> {
        self.send_recv(GetIdent)
    }

    /// Query the number of stored records.
    pub fn record_count(&mut self) -> Result<u8, Bm58Error<CON::Error, ()>> {
        self.send_recv(GetRecordCount)
    }

    /// Fetch a single storage slot.
    pub fn read_record(
        &mut self,
        index: RecordIndex,
    ) -> Result<SlotRecord, Bm58Error<CON::Error, ()>> {
        self.send_recv(GetRecord::new(index))
    }

    /// Query the record count once, then iterate every slot from 1 up to
    /// it in ascending order.
    ///
    /// The iterator yields exactly one [`SlotRecord`] per slot, absent
    /// and malformed ones included, and fetches lazily: each `next()`
    /// call performs one request/response exchange.
    pub fn records(&mut self) -> Result<Records<'_, CON>, Bm58Error<CON::Error, ()>> {
        let count = self.record_count()?;
        log::debug!("Device reports {count} stored records");

        Ok(Records {
            bm58: self,
            next: Some(RecordIndex::FIRST),
            remaining: count,
        })
    }
}

/// Iterator over every storage slot of a session, in slot order.
///
/// Returned by [`Bm58::records`].
pub struct Records<'bm58, CON> {
    bm58: &'bm58 mut Bm58<CON>,
    next: Option<RecordIndex>,
    remaining: u8,
}

impl<CON> Records<'_, CON> {
    /// The number of slots left to fetch.
    pub fn len(&self) -> usize {
        self.remaining as usize
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
}

impl<T> Iterator for Records<'_, T>
where
    T: Connection,
{
    type Item = (RecordIndex, SlotRecord);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.next?;

        match self.bm58.read_record(index) {
            Ok(record) => {
                if let SlotRecord::Malformed { len } = record {
                    log::warn!("Malformed response for slot {index}: {len} bytes received");
                }

                self.remaining -= 1;
                self.next = index.next();
                Some((index, record))
            }
            Err(e) => {
                log::error!("Unrecoverable error while fetching slot {index}: {e:?}");
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining as usize))
    }
}
