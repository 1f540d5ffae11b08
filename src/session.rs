//! TCP echo session.
//!
//! A thin wrapper over `embassy_net::tcp::TcpSocket`: connect to the fixed
//! server, exchange raw byte payloads, close. No framing, no retries, no
//! reconnection - a session that hits an error is simply over.

use embassy_net::tcp::{ConnectError, Error, TcpSocket};
use embassy_net::{Ipv4Address, Stack};
use embedded_io_async::Write;

use crate::config;

/// One TCP connection to the echo server.
pub struct EchoSession<'a> {
    socket: TcpSocket<'a>,
}

impl<'a> EchoSession<'a> {
    /// Open a connection to `addr:port`.
    ///
    /// The caller provides the socket buffers; `rx` is the single receive
    /// buffer of the whole session.
    pub async fn connect(
        stack: Stack<'static>,
        rx_buffer: &'a mut [u8],
        tx_buffer: &'a mut [u8],
        addr: Ipv4Address,
        port: u16,
    ) -> Result<EchoSession<'a>, ConnectError> {
        let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
        socket.set_timeout(Some(config::SOCKET_TIMEOUT));
        socket.connect((addr, port)).await?;
        Ok(EchoSession { socket })
    }

    /// Send one payload, flushing it onto the wire.
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), Error> {
        self.socket.write_all(payload).await?;
        self.socket.flush().await
    }

    /// Receive up to `buf.len()` bytes. Returns the number of bytes read;
    /// zero means the server closed the connection.
    pub async fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        self.socket.read(buf).await
    }

    /// Close the connection, draining any queued outgoing data.
    pub async fn close(mut self) {
        self.socket.close();
        let _ = self.socket.flush().await;
    }
}
