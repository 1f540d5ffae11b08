#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use echo_station::link::LinkOutcome;
use echo_station::session::EchoSession;
use echo_station::{allocator, config, station};
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use esp_println::println;
use panic_rtt_target as _;

esp_bootloader_esp_idf::esp_app_desc!();

/// Park the program once it has nothing left to do. `main` never returns.
async fn halt() -> ! {
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}

fn log_reply(buf: &[u8]) {
    match core::str::from_utf8(buf) {
        Ok(text) => println!("Server says: {}", text),
        Err(_) => println!("Server sent {} raw bytes", buf.len()),
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_defmt!();

    let hal_config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(hal_config);

    allocator::init_heap();

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    println!("Embassy initialized!");

    let station = match station::start(spawner, peripherals.WIFI) {
        Ok(station) => station,
        Err(e) => {
            println!("WiFi setup failed: {:?}", e);
            halt().await
        }
    };

    println!("Waiting for connection outcome...");
    match station.await_connection_outcome().await {
        LinkOutcome::Connected => println!("WiFi connection succeeded"),
        LinkOutcome::Failed => {
            println!("WiFi connection failed");
            halt().await
        }
    }

    let mut rx_buffer = [0u8; config::RECV_BUFFER_LEN];
    let mut tx_buffer = [0u8; 1024];
    let mut recv_buf = [0u8; config::RECV_BUFFER_LEN];

    println!(
        "Connecting to server {}:{}...",
        config::SERVER_IP,
        config::SERVER_PORT
    );
    let mut session = match EchoSession::connect(
        station.stack(),
        &mut rx_buffer,
        &mut tx_buffer,
        config::SERVER_IP,
        config::SERVER_PORT,
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            println!("Failed to connect to server: {:?}", e);
            halt().await
        }
    };
    println!("Connected to server!");

    // The server speaks first.
    match session.receive(&mut recv_buf).await {
        Ok(n) => log_reply(&recv_buf[..n]),
        Err(e) => {
            println!("Receive error: {:?}", e);
            halt().await
        }
    }

    for round in 1..=config::ECHO_ROUNDS {
        Timer::after(config::ECHO_INTERVAL).await;

        if let Err(e) = session.send(config::ECHO_PAYLOAD.as_bytes()).await {
            println!("Send error in round {}: {:?}", round, e);
            break;
        }
        match session.receive(&mut recv_buf).await {
            Ok(0) => {
                println!("Server closed the connection");
                break;
            }
            Ok(n) => log_reply(&recv_buf[..n]),
            Err(e) => {
                println!("Receive error in round {}: {:?}", round, e);
                break;
            }
        }
    }

    session.close().await;
    println!("Echo session finished");

    halt().await
}
