//! Compiled-in configuration for the station and the echo session.
//!
//! Everything here is fixed at build time. The credentials and server
//! address are placeholders - change them to match your network.

use embassy_net::Ipv4Address;
use embassy_time::Duration;

/// WiFi station credentials and retry budget.
pub struct StationConfig {
    /// SSID of the access point to associate with.
    pub ssid: &'static str,
    /// WPA2 passphrase.
    pub password: &'static str,
    /// Disconnect events tolerated before giving up. Each one triggers an
    /// immediate reconnect request; the radio driver provides the
    /// per-attempt timeout.
    pub max_retries: u8,
}

/// Station configuration baked into this build.
pub const STATION: StationConfig = StationConfig {
    ssid: "Esp_Test",
    password: "12345678",
    max_retries: 5,
};

/// Echo server address.
pub const SERVER_IP: Ipv4Address = Ipv4Address::new(192, 168, 137, 1);

/// Echo server TCP port.
pub const SERVER_PORT: u16 = 30000;

/// Pause between echo rounds.
pub const ECHO_INTERVAL: Duration = Duration::from_secs(2);

/// Number of send/receive rounds before the session is closed.
pub const ECHO_ROUNDS: u32 = 10;

/// Payload sent to the server each round.
pub const ECHO_PAYLOAD: &str = "hello";

/// Receive buffer size, matching the single fixed buffer of the original
/// client.
pub const RECV_BUFFER_LEN: usize = 1500;

/// Socket-level timeout for connect, send and receive.
pub const SOCKET_TIMEOUT: Duration = Duration::from_secs(10);
