use super::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Behaviour {
    Idle,
    MovingUp,
    MovingDown,
    DoorsOpening,
    DoorsClosing,
}

impl Behaviour {
    pub fn as_string(&self) -> String {
        match self {
            Behaviour::Idle => String::from("Idle"),
            Behaviour::MovingUp => String::from("Moving up"),
            Behaviour::MovingDown => String::from("Moving down"),
            Behaviour::DoorsOpening => String::from("Doors opening"),
            Behaviour::DoorsClosing => String::from("Doors closing"),
        }
    }
}

/// Snapshot of one car's panel state, sent to the presentation sink on
/// every transition. `floor` is the last completed floor while in transit.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CarPanel {
    pub floor: u8,
    pub direction: Direction,
    pub queue: Vec<u8>,
}
