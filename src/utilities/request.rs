use std::time::Duration;

use super::call::Call;

/// One outstanding pickup request. Identity is (floor, call); the registry
/// guarantees at most one live request per key.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub floor: u8,
    pub call: Call,
    pub created_at: Duration,
}

impl Request {
    pub fn new(floor: u8, call: Call, created_at: Duration) -> Self {
        Request {
            floor,
            call,
            created_at,
        }
    }
}
