//! Link lifecycle events and the connect state machine.
//!
//! The platform event sources (radio driver, DHCP) are translated into
//! [`LinkEvent`] messages; [`LinkMachine`] consumes them one at a time and
//! answers with the [`LinkAction`] the supervision task must perform. The
//! machine itself does no I/O, which keeps the retry policy testable
//! without a radio.

use core::net::Ipv4Addr;

/// A typed link lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    /// The radio came up in station mode.
    StationStarted,
    /// The station lost (or failed to gain) its association with the AP.
    Disconnected,
    /// DHCP assigned an address to the station interface.
    GotIp {
        /// Address assigned to this station.
        address: Ipv4Addr,
        /// Default gateway, when the lease carried one.
        gateway: Option<Ipv4Addr>,
    },
}

/// Final outcome of the connection phase, as reported through the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LinkOutcome {
    /// The station associated and obtained an IP address.
    Connected,
    /// The retry budget was exhausted without obtaining an address.
    Failed,
}

/// What the supervision task must do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LinkAction {
    /// Ask the radio to (re)connect to the configured AP.
    RequestConnect,
    /// Report a final outcome through the gate.
    Settle(LinkOutcome),
}

/// Connection phase the machine believes the link is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LinkState {
    /// Radio not started yet.
    Idle,
    /// A connect request is outstanding.
    Connecting,
    /// An address was obtained.
    Connected,
    /// The retry budget ran out.
    Failed,
}

/// The connect/retry state machine.
///
/// `Idle -> Connecting -> {Connected, Failed}`. Terminal states are terminal
/// only with respect to the single gate wait: the radio may keep emitting
/// events afterwards and the machine keeps answering them, exactly as the
/// registered callback of the original firmware stays installed for the
/// lifetime of the process.
pub struct LinkMachine {
    state: LinkState,
    attempts: u8,
    max_retries: u8,
}

impl LinkMachine {
    /// Create a machine in the `Idle` state with the given retry budget.
    pub const fn new(max_retries: u8) -> Self {
        Self {
            state: LinkState::Idle,
            attempts: 0,
            max_retries,
        }
    }

    /// Current phase of the link.
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Disconnect events absorbed so far. Not reset on a successful
    /// connection: the retry budget spans the process lifetime.
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// Feed one event and get the action to carry out.
    pub fn on_event(&mut self, event: LinkEvent) -> LinkAction {
        match event {
            LinkEvent::StationStarted => {
                self.state = LinkState::Connecting;
                LinkAction::RequestConnect
            }
            LinkEvent::Disconnected => {
                if self.attempts < self.max_retries {
                    self.attempts += 1;
                    self.state = LinkState::Connecting;
                    LinkAction::RequestConnect
                } else {
                    self.state = LinkState::Failed;
                    LinkAction::Settle(LinkOutcome::Failed)
                }
            }
            LinkEvent::GotIp { .. } => {
                self.state = LinkState::Connected;
                LinkAction::Settle(LinkOutcome::Connected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u8 = 5;

    fn got_ip() -> LinkEvent {
        LinkEvent::GotIp {
            address: Ipv4Addr::new(192, 168, 137, 42),
            gateway: Some(Ipv4Addr::new(192, 168, 137, 1)),
        }
    }

    #[test]
    fn station_start_requests_connect() {
        let mut machine = LinkMachine::new(MAX);
        assert_eq!(machine.state(), LinkState::Idle);
        assert_eq!(
            machine.on_event(LinkEvent::StationStarted),
            LinkAction::RequestConnect
        );
        assert_eq!(machine.state(), LinkState::Connecting);
        assert_eq!(machine.attempts(), 0);
    }

    #[test]
    fn each_disconnect_below_budget_reconnects_once() {
        let mut machine = LinkMachine::new(MAX);
        machine.on_event(LinkEvent::StationStarted);
        for k in 0..MAX {
            assert_eq!(machine.attempts(), k);
            assert_eq!(
                machine.on_event(LinkEvent::Disconnected),
                LinkAction::RequestConnect
            );
            assert_eq!(machine.attempts(), k + 1);
            assert_eq!(machine.state(), LinkState::Connecting);
        }
    }

    #[test]
    fn disconnect_at_budget_settles_failed_without_reconnect() {
        let mut machine = LinkMachine::new(MAX);
        machine.on_event(LinkEvent::StationStarted);
        for _ in 0..MAX {
            machine.on_event(LinkEvent::Disconnected);
        }
        assert_eq!(machine.attempts(), MAX);
        assert_eq!(
            machine.on_event(LinkEvent::Disconnected),
            LinkAction::Settle(LinkOutcome::Failed)
        );
        assert_eq!(machine.state(), LinkState::Failed);
        assert_eq!(machine.attempts(), MAX);
    }

    #[test]
    fn got_ip_settles_connected_regardless_of_prior_disconnects() {
        let mut machine = LinkMachine::new(MAX);
        machine.on_event(LinkEvent::StationStarted);
        machine.on_event(LinkEvent::Disconnected);
        machine.on_event(LinkEvent::Disconnected);
        machine.on_event(LinkEvent::Disconnected);
        assert_eq!(
            machine.on_event(got_ip()),
            LinkAction::Settle(LinkOutcome::Connected)
        );
        assert_eq!(machine.state(), LinkState::Connected);
        assert_eq!(machine.attempts(), 3);
    }

    #[test]
    fn immediate_got_ip_connects_with_zero_attempts() {
        let mut machine = LinkMachine::new(MAX);
        machine.on_event(LinkEvent::StationStarted);
        assert_eq!(
            machine.on_event(got_ip()),
            LinkAction::Settle(LinkOutcome::Connected)
        );
        assert_eq!(machine.attempts(), 0);
    }

    #[test]
    fn attempts_keep_climbing_after_a_successful_connection() {
        // The counter is never reset on success, so a later disconnect
        // spends budget left over from the initial association.
        let mut machine = LinkMachine::new(MAX);
        machine.on_event(LinkEvent::StationStarted);
        machine.on_event(LinkEvent::Disconnected);
        machine.on_event(got_ip());
        assert_eq!(
            machine.on_event(LinkEvent::Disconnected),
            LinkAction::RequestConnect
        );
        assert_eq!(machine.attempts(), 2);
    }

    #[test]
    fn zero_budget_fails_on_first_disconnect() {
        let mut machine = LinkMachine::new(0);
        machine.on_event(LinkEvent::StationStarted);
        assert_eq!(
            machine.on_event(LinkEvent::Disconnected),
            LinkAction::Settle(LinkOutcome::Failed)
        );
    }
}
