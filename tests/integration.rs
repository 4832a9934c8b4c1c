//! End-to-end tests driving an `InputDevice` over a virtual gamepad

use edgepad::controller::{Axis, Button, EdgeQuery, InputDevice, VirtualSource};
use edgepad::{InputError, InputSettings, Trigger};
use std::rc::Rc;

fn device_with(settings: &InputSettings) -> (Rc<VirtualSource>, InputDevice<VirtualSource>) {
    let source = Rc::new(VirtualSource::new());
    let device = InputDevice::new(Rc::clone(&source), settings).unwrap();
    (source, device)
}

#[test]
fn axis_scenario_with_threshold_override() {
    let mut settings = InputSettings::default();
    settings
        .axis_thresholds
        .insert("left_trigger".to_string(), 0.5);
    let (source, mut device) = device_with(&settings);

    let mut down = Vec::new();
    let mut pressed = Vec::new();
    let mut released = Vec::new();
    for value in [0.0, 0.6, 0.6, 0.2, 0.6] {
        source.set_axis(Axis::LeftTrigger, value);
        device.poll_all();
        down.push(device.is_down(Axis::LeftTrigger));
        pressed.push(device.was_just_pressed(Axis::LeftTrigger));
        released.push(device.was_just_released(Axis::LeftTrigger));
    }

    assert_eq!(down, [false, true, true, false, true]);
    assert_eq!(pressed, [false, true, false, false, true]);
    assert_eq!(released, [false, false, false, true, false]);
}

#[test]
fn rising_edge_reported_exactly_once() {
    let (source, mut device) = device_with(&InputSettings::default());
    let pattern = [false, true, true, true, false, false, true, false, true, true];

    let mut rising = 0;
    let mut previous = false;
    for held in pattern {
        source.set_button(Button::Y, held);
        device.poll_all();
        // Repeated queries inside one tick agree
        let first = device.was_just_pressed(Button::Y);
        assert_eq!(first, device.was_just_pressed(Button::Y));
        assert_eq!(first, !previous && held);
        assert_eq!(device.is_down(Button::Y), held);
        if first {
            rising += 1;
        }
        previous = held;
    }
    assert_eq!(rising, 3);
}

#[test]
fn toggle_follows_registry_cadence() {
    let mut settings = InputSettings::default();
    settings
        .axis_thresholds
        .insert("right_trigger".to_string(), 0.5);
    let (source, mut device) = device_with(&settings);
    let mut toggle = device.toggle(Axis::RightTrigger, 0.5).unwrap();

    let mut states = Vec::new();
    for value in [0.0, 0.6, 0.6, 0.2, 0.6] {
        source.set_axis(Axis::RightTrigger, value);
        device.poll_all();
        toggle.sample();
        states.push(toggle.get_state());
        assert_eq!(
            toggle.detector().was_just_released(),
            device.was_just_released(Axis::RightTrigger)
        );
    }
    assert_eq!(states, [false, false, false, true, true]);
}

#[test]
fn composite_trigger_reads_immediate_state() {
    let (source, mut device) = device_with(&InputSettings::default());
    let mut chord = device.button_trigger(vec![Button::LeftBumper, Button::RightBumper]);

    source.set_button(Button::LeftBumper, true);
    assert!(!Trigger::get(&mut chord));

    // No poll needed: triggers bypass the buffered detectors
    source.set_button(Button::RightBumper, true);
    assert!(Trigger::get(&mut chord));
    assert!(!device.is_down(Button::RightBumper));

    device.poll_all();
    assert!(device.is_down(Button::RightBumper));
}

#[test]
fn axis_trigger_and_semantics() {
    let (source, device) = device_with(&InputSettings::default());
    let both = device
        .axis_trigger(0.5, vec![Axis::LeftTrigger, Axis::RightTrigger])
        .unwrap();

    source.set_axis(Axis::LeftTrigger, 0.7);
    assert!(!both.get());
    source.set_axis(Axis::RightTrigger, 0.7);
    assert!(both.get());
}

#[test]
fn empty_trigger_is_always_true() {
    let (_source, device) = device_with(&InputSettings::default());
    assert!(device.button_trigger(Vec::new()).get());
    assert!(device.axis_trigger(0.3, Vec::new()).unwrap().get());
}

#[test]
fn right_y_reads_its_own_channel() {
    let (source, mut device) = device_with(&InputSettings::default());
    source.set_axis(Axis::LeftStickY, -1.0);
    source.set_axis(Axis::RightStickY, 0.0);
    assert_eq!(device.right_y(), 0.0);

    source.set_axis(Axis::LeftStickY, 0.0);
    source.set_axis(Axis::RightStickY, 0.5);
    assert_eq!(device.left_y(), 0.0);
    assert_eq!(device.right_y(), 0.5);

    device.set_negate_y(true);
    assert_eq!(device.right_y(), -0.5);
}

#[test]
fn negate_y_from_settings() {
    let settings = InputSettings {
        negate_y: true,
        ..InputSettings::default()
    };
    let (source, device) = device_with(&settings);
    assert!(device.is_negating_y());

    source.set_axis(Axis::LeftStickY, -1.0);
    assert_eq!(device.left_y(), 1.0);
}

#[test]
fn invalid_configuration_is_rejected() {
    let source = Rc::new(VirtualSource::new());

    let settings = InputSettings {
        axis_threshold: 1.01,
        ..InputSettings::default()
    };
    assert!(matches!(
        InputDevice::new(Rc::clone(&source), &settings),
        Err(InputError::InvalidThreshold { .. })
    ));

    let mut settings = InputSettings::default();
    settings.axis_thresholds.insert("LeftWheel".to_string(), 0.2);
    assert!(matches!(
        InputDevice::new(Rc::clone(&source), &settings),
        Err(InputError::ChannelNotFound(_))
    ));
}

#[test]
fn readers_expose_buffered_state() {
    let (source, mut device) = device_with(&InputSettings::default());
    source.set_button(Button::DpadLeft, true);
    device.poll_buttons();

    let reader = device.button_reader(Button::DpadLeft);
    assert!(reader.was_just_pressed());
    assert!(reader.state_just_changed());
    assert!(!device.axis_reader(Axis::LeftStickX).is_down());
}
