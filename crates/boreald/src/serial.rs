//! The concrete [`boreal_core::collab::SerialLink`] used on real hardware:
//! a UART/USB-serial device opened via `serialport`. Reads are
//! non-blocking-tolerant: a zero-byte read means "nothing available yet",
//! matching the trait's partial-read contract.

use std::time::Duration;

use boreal_core::collab::SerialLink;

pub struct DeviceLink {
    port: Box<dyn serialport::SerialPort>,
}

impl DeviceLink {
    pub fn open(device: &str, baud_rate: u32) -> Result<Self, serialport::Error> {
        let port = serialport::new(device, baud_rate)
            .timeout(Duration::from_millis(1))
            .open()?;
        Ok(Self { port })
    }
}

impl SerialLink for DeviceLink {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // A timed-out read with nothing available is not an error here —
            // the ingest loop just tries again next tick.
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(buf)
    }
}
