//! ESP32 WiFi station + TCP echo client library
//!
//! This library brings an ESP32 online as a WiFi station with a bounded
//! connect-retry policy, then exposes a small TCP echo session over the
//! Embassy async runtime and esp-hal ecosystem.
//!
//! ## Features
//!
//! - WiFi station bring-up with a bounded reconnect budget
//! - One-shot connection gate the program blocks on exactly once
//! - Typed link lifecycle events driving a small state machine
//! - TCP echo session over `embassy-net`
//!
//! ## Example
//!
//! ```no_run
//! use echo_station::{allocator, config, station};
//! use embassy_executor::Spawner;
//!
//! #[esp_rtos::main]
//! async fn main(spawner: Spawner) -> ! {
//!     // Initialize heap
//!     allocator::init_heap();
//!
//!     // Bring the station up and wait on the connection gate
//!     // ... (see bin/main.rs for complete example)
//! }
//! ```

#![no_std]
#![warn(missing_docs)]

/// Memory allocation configuration
pub mod allocator;

/// Compiled-in network configuration
pub mod config;

/// One-shot connection outcome gate
pub mod gate;

/// Link lifecycle events and the connect state machine
pub mod link;

/// TCP echo session over the network stack
pub mod session;

/// WiFi station bring-up and link supervision tasks
pub mod station;

/// Global static storage for network components
pub mod types;
