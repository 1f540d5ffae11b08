//! On-target tests for the connect state machine and the connection gate.
//!
//! These exercise only the host-independent core, so no radio or network
//! traffic is involved.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_rtos::embassy::Executor::new())]
mod tests {
    use core::net::Ipv4Addr;

    use echo_station::gate::ConnectionGate;
    use echo_station::link::{LinkAction, LinkEvent, LinkMachine, LinkOutcome, LinkState};

    const MAX: u8 = 5;

    fn got_ip() -> LinkEvent {
        LinkEvent::GotIp {
            address: Ipv4Addr::new(192, 168, 137, 42),
            gateway: Some(Ipv4Addr::new(192, 168, 137, 1)),
        }
    }

    #[init]
    fn init() {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timg0 = esp_hal::timer::timg::TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);
    }

    #[test]
    fn reconnects_until_budget_then_fails() {
        let mut machine = LinkMachine::new(MAX);
        assert_eq!(
            machine.on_event(LinkEvent::StationStarted),
            LinkAction::RequestConnect
        );
        for k in 0..MAX {
            assert_eq!(
                machine.on_event(LinkEvent::Disconnected),
                LinkAction::RequestConnect
            );
            assert_eq!(machine.attempts(), k + 1);
        }
        assert_eq!(
            machine.on_event(LinkEvent::Disconnected),
            LinkAction::Settle(LinkOutcome::Failed)
        );
        assert_eq!(machine.state(), LinkState::Failed);
        assert_eq!(machine.attempts(), MAX);
    }

    #[test]
    fn got_ip_after_three_disconnects_connects() {
        let mut machine = LinkMachine::new(MAX);
        machine.on_event(LinkEvent::StationStarted);
        for _ in 0..3 {
            machine.on_event(LinkEvent::Disconnected);
        }
        assert_eq!(
            machine.on_event(got_ip()),
            LinkAction::Settle(LinkOutcome::Connected)
        );
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
    async fn gate_wait_returns_settled_outcome_once() {
        let gate = ConnectionGate::new();
        gate.settle(LinkOutcome::Connected);
        assert_eq!(gate.outcome().await, LinkOutcome::Connected);
        // Clear-on-read: a second wait would block forever, so only probe.
        assert_eq!(gate.try_outcome(), None);
    }

    #[test]
    fn gate_reports_failure_to_its_single_waiter() {
        let gate = ConnectionGate::new();
        gate.settle(LinkOutcome::Failed);
        assert_eq!(gate.try_outcome(), Some(LinkOutcome::Failed));
        assert_eq!(gate.try_outcome(), None);
    }
}
