//! Global static storage for network components.
//!
//! This module provides static cells for the radio controller, the network
//! stack resources and the connection gate, ensuring they have the 'static
//! lifetime required by Embassy async tasks. The link event channel lives
//! here as well so both producer tasks can hold a sender to it.

use embassy_net::StackResources;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;

use crate::gate::ConnectionGate;
use crate::link::LinkEvent;

/// Depth of the link event channel. Lifecycle events are rare; a small
/// queue is plenty.
pub const LINK_EVENT_QUEUE_DEPTH: usize = 4;

/// Static storage for the radio initialization controller.
///
/// This static cell stores the radio controller that manages the WiFi
/// hardware.
pub static RADIO_INIT: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();

/// Static storage for the network stack resources.
///
/// Sized for the DHCP socket plus the single TCP socket of the echo
/// session.
pub static STACK_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

/// Static storage for the connection gate.
///
/// The gate is created by [`station::start`](crate::station::start) and
/// handed to the supervision task and the main flow by reference.
pub static GATE: StaticCell<ConnectionGate> = StaticCell::new();

/// Channel carrying typed link lifecycle events to the supervision task.
pub static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, LINK_EVENT_QUEUE_DEPTH> =
    Channel::new();
