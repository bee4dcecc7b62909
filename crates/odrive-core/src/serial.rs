use serialport::{ClearBuffer, SerialPort};
use std::io::{self, Read, Write};
use std::time::Duration;

use crate::transport::ByteTransport;

/// [`ByteTransport`] over an already opened serial port.
///
/// Opening and configuring the port (baud rate, framing) is left to the
/// caller, e.g. through `serialport::new(..).open()`.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    read_timeout: Option<Duration>,
}

impl SerialLink {
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        Self {
            port,
            read_timeout: None,
        }
    }

    pub fn port_name(&self) -> Option<String> {
        self.port.name()
    }

    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }

    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        if self.read_timeout != Some(timeout) {
            self.port.set_timeout(timeout)?;
            self.read_timeout = Some(timeout);
        }
        Ok(())
    }
}

impl From<Box<dyn SerialPort>> for SerialLink {
    fn from(port: Box<dyn SerialPort>) -> Self {
        Self::from_port(port)
    }
}

impl ByteTransport for SerialLink {
    fn bytes_available(&mut self) -> io::Result<usize> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        if timeout.is_zero() && self.bytes_available()? == 0 {
            return Ok(None);
        }
        // a zero port timeout means "block forever" on some platforms
        self.set_read_timeout(timeout.max(Duration::from_millis(1)))?;

        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(1) => Ok(Some(buf[0])),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.port.write_all(data)?;
        self.port.flush()
    }

    fn discard_input(&mut self) -> io::Result<usize> {
        let pending = self.port.bytes_to_read()? as usize;
        self.port.clear(ClearBuffer::Input)?;
        Ok(pending)
    }
}
