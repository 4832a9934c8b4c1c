use color_eyre::{eyre::eyre, Result};
use edgepad::controller::{Axis, Button, GilrsSource, InputDevice, Trigger};
use edgepad::{drive, ControlLoop, InputSettings};
use std::rc::Rc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let settings_path = InputSettings::default_path()?;
    info!("Loading input settings from {:?}", settings_path);
    let settings = InputSettings::load_or_create(&settings_path)?;

    let source = Rc::new(GilrsSource::new().map_err(|e| eyre!("Failed to open gamepad: {}", e))?);
    match source.active_gamepad() {
        Some(id) => info!("Driving from gamepad {}", id),
        None => warn!("No gamepad yet, waiting for one to connect"),
    }
    let mut device = InputDevice::new(Rc::clone(&source), &settings)?;
    if !device.is_negating_y() {
        warn!("negate_y is off: pushing a stick forward drives backward");
    }

    // Both bumpers held together arm the drive; right trigger toggles slow mode
    let armed = device.button_trigger(vec![Button::LeftBumper, Button::RightBumper]);
    let mut slow_mode = device.toggle(Axis::RightTrigger, 0.5)?;

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
        info!("Shutdown requested");
        ctrl_c.cancel();
    });

    let control = ControlLoop::create(settings, shutdown).initialize()?;
    let stats = control
        .run(&mut device, |device| {
            slow_mode.sample();
            let slow = slow_mode.get();

            if device.was_just_pressed(Button::A) {
                info!("A pressed");
            }
            if !armed.get() {
                return;
            }

            let scale = if slow { 0.4 } else { 1.0 };
            let speeds = drive::mecanum(
                device.left_x() * scale,
                device.left_y() * scale,
                device.right_x() * scale,
            );
            info!("Wheel speeds: {:.2?} (slow mode: {})", speeds, slow);
        })
        .await;

    info!(
        "Stopped after {} ticks ({} presses, {} releases)",
        stats.ticks, stats.presses, stats.releases
    );
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
