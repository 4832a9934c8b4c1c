use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Button type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Y,
    X,
    A,
    B,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftStickButton,
    RightStickButton,
}

impl Button {
    pub const COUNT: usize = 14;

    /// Every button in declaration order; `ALL[b.index()] == b`.
    pub const ALL: [Button; Button::COUNT] = [
        Button::Y,
        Button::X,
        Button::A,
        Button::B,
        Button::LeftBumper,
        Button::RightBumper,
        Button::Back,
        Button::Start,
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
        Button::LeftStickButton,
        Button::RightStickButton,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Button::Y => "Y",
            Button::X => "X",
            Button::A => "A",
            Button::B => "B",
            Button::LeftBumper => "LeftBumper",
            Button::RightBumper => "RightBumper",
            Button::Back => "Back",
            Button::Start => "Start",
            Button::DpadUp => "DpadUp",
            Button::DpadDown => "DpadDown",
            Button::DpadLeft => "DpadLeft",
            Button::DpadRight => "DpadRight",
            Button::LeftStickButton => "LeftStickButton",
            Button::RightStickButton => "RightStickButton",
        }
    }
}

// Axis type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    LeftTrigger,
    RightTrigger,
    LeftStickX,
    RightStickX,
    LeftStickY,
    RightStickY,
}

/// Physical domain of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Reports in `[0.0, 1.0]`
    Trigger,
    /// Reports in `[-1.0, 1.0]`
    Stick,
}

impl AxisKind {
    /// Largest magnitude a reading of this kind can take
    pub const fn max_magnitude(self) -> f32 {
        match self {
            AxisKind::Trigger | AxisKind::Stick => 1.0,
        }
    }
}

impl Axis {
    pub const COUNT: usize = 6;

    /// Every axis in declaration order; `ALL[a.index()] == a`.
    pub const ALL: [Axis; Axis::COUNT] = [
        Axis::LeftTrigger,
        Axis::RightTrigger,
        Axis::LeftStickX,
        Axis::RightStickX,
        Axis::LeftStickY,
        Axis::RightStickY,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn kind(self) -> AxisKind {
        match self {
            Axis::LeftTrigger | Axis::RightTrigger => AxisKind::Trigger,
            _ => AxisKind::Stick,
        }
    }

    /// Vertical stick axes carry the configurable sign convention
    pub const fn is_vertical(self) -> bool {
        matches!(self, Axis::LeftStickY | Axis::RightStickY)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Axis::LeftTrigger => "LeftTrigger",
            Axis::RightTrigger => "RightTrigger",
            Axis::LeftStickX => "LeftStickX",
            Axis::RightStickX => "RightStickX",
            Axis::LeftStickY => "LeftStickY",
            Axis::RightStickY => "RightStickY",
        }
    }
}

/// Any input channel of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Button(Button),
    Axis(Axis),
}

impl From<Button> for Channel {
    fn from(button: Button) -> Self {
        Channel::Button(button)
    }
}

impl From<Axis> for Channel {
    fn from(axis: Axis) -> Self {
        Channel::Axis(axis)
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Button(button) => write!(f, "{}", button),
            Channel::Axis(axis) => write!(f, "{}", axis),
        }
    }
}

// Names are matched case-insensitively, ignoring '_' and '-', so both
// "left_stick_y" and "LeftStickY" resolve.
fn canonical(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Button {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical(s);
        Button::ALL
            .into_iter()
            .find(|button| canonical(button.name()) == wanted)
            .ok_or_else(|| InputError::ChannelNotFound(s.to_string()))
    }
}

impl FromStr for Axis {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical(s);
        Axis::ALL
            .into_iter()
            .find(|axis| canonical(axis.name()) == wanted)
            .ok_or_else(|| InputError::ChannelNotFound(s.to_string()))
    }
}

impl FromStr for Channel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Axis>()
            .map(Channel::Axis)
            .or_else(|_| s.parse::<Button>().map(Channel::Button))
            .map_err(|_| InputError::ChannelNotFound(s.to_string()))
    }
}
