use std::{
    io::{self, Read, Write},
    time::{Duration, Instant},
};

use serialport::{DataBits, Parity, SerialPort, StopBits};

use crate::connection::{Request, Response};

/// A [`Connection`] over a local serial port.
///
/// The BM-58 side of the link is fixed at 4800 baud, 8 data bits, no
/// parity, 1 stop bit; none of it is negotiated, so [`Serial::open`]
/// always configures the port that way.
///
/// [`Connection`]: super::Connection
pub struct Serial {
    port: Box<dyn SerialPort>,
}

impl Serial {
    pub const BAUD_RATE: u32 = 4800;

    /// Per-read timeout. The device answers well within this window when
    /// it answers at all.
    pub const READ_TIMEOUT: Duration = Duration::from_millis(500);

    pub fn open(path: &str) -> Result<Self, serialport::Error> {
        Self::open_with_timeout(path, Self::READ_TIMEOUT)
    }

    pub fn open_with_timeout(
        path: &str,
        read_timeout: Duration,
    ) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, Self::BAUD_RATE)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(read_timeout)
            .open()?;

        log::debug!("Opened serial port {path} at {} baud", Self::BAUD_RATE);

        Ok(Self { port })
    }
}

impl super::Connection for Serial {
    type Error = io::Error;

    fn send(&mut self, request: &Request) -> io::Result<()> {
        let bytes = request.message().as_bytes();
        log::debug!("Sending request {bytes:02X?}");

        self.port.write_all(bytes)?;
        self.port.flush()
    }

    fn recv(&mut self, limit: usize) -> io::Result<Response> {
        let start = Instant::now();

        let mut data = vec![0u8; limit];
        let mut received = 0;

        while received < limit {
            match self.port.read(&mut data[received..]) {
                Ok(0) => break,
                Ok(n) => received += n,
                // The timeout ends the response; whatever arrived before
                // it is the complete answer as far as this layer knows.
                Err(e)
                    if e.kind() == io::ErrorKind::TimedOut
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    break
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        data.truncate(received);

        let duration = start.elapsed().as_millis();
        log::debug!("Received {received}/{limit} bytes after {duration} ms");

        Ok(Response::new(data))
    }

    fn send_recv(&mut self, request: &Request) -> io::Result<Response> {
        self.send(request)?;
        self.recv(request.response_limit())
    }
}
