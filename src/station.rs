//! WiFi station bring-up and link supervision.
//!
//! [`start`] performs the one-time setup: radio controller, WiFi driver in
//! station mode with the compiled-in credentials, power save disabled, and
//! the `embassy-net` stack with DHCPv4. It spawns the supervision tasks
//! before the radio starts, so no lifecycle event is missed, and returns a
//! [`Station`] handle whose gate the caller blocks on exactly once.

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_net::{Runner, Stack, StackResources};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_time::Duration;
use esp_hal::peripherals::WIFI;
use esp_hal::rng::Rng;
use esp_println::println;
use esp_radio::wifi::{
    ClientConfig, ModeConfig, PowerSaveMode, WifiController, WifiDevice, WifiEvent,
};

use crate::config;
use crate::gate::ConnectionGate;
use crate::link::{LinkAction, LinkEvent, LinkMachine, LinkOutcome};
use crate::types::{GATE, LINK_EVENT_QUEUE_DEPTH, LINK_EVENTS, RADIO_INIT, STACK_RESOURCES};

type LinkEventSender = Sender<'static, CriticalSectionRawMutex, LinkEvent, LINK_EVENT_QUEUE_DEPTH>;
type LinkEventReceiver =
    Receiver<'static, CriticalSectionRawMutex, LinkEvent, LINK_EVENT_QUEUE_DEPTH>;

/// Fatal setup error. Any of these aborts startup; the program never runs
/// in a degraded mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum StationError {
    /// Radio controller initialization failed.
    RadioInit,
    /// WiFi driver creation failed.
    Driver,
    /// Disabling power save was rejected by the driver.
    PowerSave,
    /// The station mode configuration was rejected (for example, SSID or
    /// password longer than the driver allows).
    Configuration,
    /// A supervision task could not be spawned.
    TaskSpawn,
}

/// Handle to a started station.
///
/// Holds the network stack and the connection gate. The gate is meant to be
/// consumed exactly once, before the socket phase.
pub struct Station {
    stack: Stack<'static>,
    gate: &'static ConnectionGate,
}

impl Station {
    /// The network stack, for opening sockets once the gate reports
    /// [`LinkOutcome::Connected`].
    pub fn stack(&self) -> Stack<'static> {
        self.stack
    }

    /// Block until the connection phase settles. Unbounded: if the radio
    /// never reports either outcome, this never returns.
    pub async fn await_connection_outcome(&self) -> LinkOutcome {
        self.gate.outcome().await
    }

    /// Bounded variant of
    /// [`await_connection_outcome`](Self::await_connection_outcome);
    /// `None` on timeout.
    pub async fn await_connection_outcome_with_timeout(
        &self,
        timeout: Duration,
    ) -> Option<LinkOutcome> {
        self.gate.outcome_with_timeout(timeout).await
    }
}

/// Bring the radio up in station mode and spawn the supervision tasks.
///
/// # Errors
///
/// Returns a [`StationError`] if radio initialization, driver creation,
/// configuration or task spawning fails. All of these are fatal; the caller
/// is expected to log and halt.
pub fn start(spawner: Spawner, device: WIFI<'static>) -> Result<Station, StationError> {
    let station = &config::STATION;

    let radio_init = esp_radio::init().map_err(|e| {
        println!("Failed to initialize radio controller: {:?}", e);
        StationError::RadioInit
    })?;
    let radio_init = RADIO_INIT.init(radio_init);

    let (mut controller, interfaces) = esp_radio::wifi::new(radio_init, device, Default::default())
        .map_err(|e| {
            println!("Failed to create WiFi controller: {:?}", e);
            StationError::Driver
        })?;

    controller
        .set_power_saving(PowerSaveMode::None)
        .map_err(|e| {
            println!("Failed to disable power save: {:?}", e);
            StationError::PowerSave
        })?;

    let client_config = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(
                station
                    .ssid
                    .try_into()
                    .map_err(|_| StationError::Configuration)?,
            )
            .with_password(
                station
                    .password
                    .try_into()
                    .map_err(|_| StationError::Configuration)?,
            ),
    );
    controller.set_config(&client_config).map_err(|e| {
        println!("Failed to apply station config: {:?}", e);
        StationError::Configuration
    })?;

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let (stack, runner) = embassy_net::new(
        interfaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::new()),
        seed,
    );

    let gate: &'static ConnectionGate = GATE.init(ConnectionGate::new());

    // All consumers of radio and DHCP events go up before the radio is
    // started inside link_task, so nothing is missed.
    spawner
        .spawn(net_task(runner))
        .map_err(|_| StationError::TaskSpawn)?;
    spawner
        .spawn(ip_watch_task(stack, LINK_EVENTS.sender()))
        .map_err(|_| StationError::TaskSpawn)?;
    spawner
        .spawn(link_task(controller, LINK_EVENTS.receiver(), gate))
        .map_err(|_| StationError::TaskSpawn)?;

    Ok(Station { stack, gate })
}

/// Network stack runner task.
#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// Watches the interface configuration and reports DHCP leases as
/// [`LinkEvent::GotIp`] messages.
#[embassy_executor::task]
async fn ip_watch_task(stack: Stack<'static>, events: LinkEventSender) {
    loop {
        stack.wait_config_up().await;
        if let Some(v4) = stack.config_v4() {
            events
                .send(LinkEvent::GotIp {
                    address: v4.address.address(),
                    gateway: v4.gateway,
                })
                .await;
        }
        stack.wait_config_down().await;
    }
}

/// Drives the connect state machine from lifecycle events.
///
/// Owns the WiFi controller and the [`LinkMachine`]. Events arrive either
/// from the event channel (got-IP) or from the controller itself
/// (disconnects, including failed association attempts). The task keeps
/// running after the gate settles, mirroring the event callback of the
/// original firmware which stays registered for the process lifetime.
#[embassy_executor::task]
async fn link_task(
    mut controller: WifiController<'static>,
    events: LinkEventReceiver,
    gate: &'static ConnectionGate,
) {
    println!("Starting WiFi...");
    if let Err(e) = controller.start_async().await {
        println!("Failed to start WiFi controller: {:?}", e);
        gate.settle(LinkOutcome::Failed);
        return;
    }
    println!("WiFi started in station mode");

    let mut machine = LinkMachine::new(config::STATION.max_retries);
    let mut action = machine.on_event(LinkEvent::StationStarted);

    loop {
        match action {
            LinkAction::RequestConnect => {
                println!(
                    "Connecting to {} (attempt {})...",
                    config::STATION.ssid,
                    machine.attempts() + 1
                );
                if let Err(e) = controller.connect_async().await {
                    // A failed association surfaces as a disconnect, same
                    // as a drop after a successful one.
                    println!("Association failed: {:?}", e);
                    action = machine.on_event(LinkEvent::Disconnected);
                    continue;
                }
                println!("Associated, waiting for DHCP...");
            }
            LinkAction::Settle(outcome) => {
                gate.settle(outcome);
            }
        }

        let event = match select(
            events.receive(),
            controller.wait_for_event(WifiEvent::StaDisconnected),
        )
        .await
        {
            Either::First(event) => event,
            Either::Second(_) => {
                println!("Station disconnected");
                LinkEvent::Disconnected
            }
        };

        if let LinkEvent::GotIp { address, gateway } = event {
            println!("Connected to AP, got IP address: {}", address);
            match gateway {
                Some(gw) => println!("Gateway IP address: {}", gw),
                None => println!("No gateway in DHCP lease"),
            }
        }

        action = machine.on_event(event);
    }
}
