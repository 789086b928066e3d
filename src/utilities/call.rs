#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Up = 0,
    Down = 1,
}

impl Call {
    pub fn as_string(self) -> String {
        match self {
            Call::Up => String::from("up"),
            Call::Down => String::from("down"),
        }
    }
}
