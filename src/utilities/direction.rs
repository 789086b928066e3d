#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Stop,
    Up,
}

impl Direction {
    pub fn as_string(self) -> String {
        match self {
            Direction::Down => String::from("down"),
            Direction::Stop => String::from("stop"),
            Direction::Up => String::from("up"),
        }
    }
}
