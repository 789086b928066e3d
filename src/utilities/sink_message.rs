use std::time::Duration;

use crossbeam_channel::Sender;

use super::call::Call;
use super::request::Request;
use super::status::{Behaviour, CarPanel};

/// One-way notifications to the presentation sink. The sink animates car
/// movement itself from `CarPositionChanged`; the core never holds
/// rendering handles, cars and buttons are correlated by id and floor only.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum SinkMessage {
    CallButtonChanged {
        floor: u8,
        call: Call,
        active: bool,
    },
    CarStatusChanged {
        car: u8,
        behaviour: Behaviour,
    },
    CarPositionChanged {
        car: u8,
        target_floor: u8,
        travel_time: Duration,
    },
    CarPanelUpdated {
        car: u8,
        panel: CarPanel,
    },
    ActiveCallsChanged(Vec<Request>),
}

/// Notifications are fire and forget: a sink that hung up must not stop
/// the cars.
pub fn notify(sink_tx: &Sender<SinkMessage>, message: SinkMessage) {
    let _ = sink_tx.send(message);
}
