use std::time::Duration;

use crossbeam_channel::Sender;
use tracing::debug;

use crate::config::SimulationSettings;
use crate::timer::TimerQueue;
use crate::utilities::direction::Direction;
use crate::utilities::sink_message::{notify, SinkMessage};
use crate::utilities::status::{Behaviour, CarPanel};

/// One elevator car. `floor` is authoritative only between moves; it is
/// updated atomically when travel completes, never during transit.
/// `destination` holds the popped target while the car is mid-travel or in
/// a door cycle; `queue` holds the stops not yet begun, each floor at most
/// once.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct Car {
    pub id: u8,
    pub floor: u8,
    pub queue: Vec<u8>,
    pub direction: Direction,
    pub behaviour: Behaviour,
    pub destination: Option<u8>,
}

impl Car {
    pub fn new(id: u8) -> Self {
        Car {
            id,
            floor: 0,
            queue: Vec::new(),
            direction: Direction::Stop,
            behaviour: Behaviour::Idle,
            destination: None,
        }
    }

    /// True while the car is draining its queue. Guards against starting a
    /// second processing pass on a car that already has one running.
    pub fn busy(&self) -> bool {
        self.behaviour != Behaviour::Idle
    }

    pub fn panel(&self) -> CarPanel {
        CarPanel {
            floor: self.floor,
            direction: self.direction,
            queue: self.queue.clone(),
        }
    }
}

fn report_status(car: &Car, sink_tx: &Sender<SinkMessage>) {
    notify(
        sink_tx,
        SinkMessage::CarStatusChanged {
            car: car.id,
            behaviour: car.behaviour,
        },
    );
    notify(
        sink_tx,
        SinkMessage::CarPanelUpdated {
            car: car.id,
            panel: car.panel(),
        },
    );
}

/// Pops the front of the queue and commits the car to it: either a timed
/// travel phase, or straight into the door cycle when the car is already at
/// the target floor.
pub fn begin_next_trip(
    car: &mut Car,
    timers: &mut TimerQueue,
    settings: &SimulationSettings,
    sink_tx: &Sender<SinkMessage>,
    now: Duration,
) {
    if car.queue.is_empty() {
        set_idle(car, sink_tx);
        return;
    }
    let target = car.queue.remove(0);
    car.destination = Some(target);

    if target == car.floor {
        car.direction = Direction::Stop;
        begin_door_cycle(car, timers, settings, sink_tx, now);
        return;
    }

    car.behaviour = if target > car.floor {
        car.direction = Direction::Up;
        Behaviour::MovingUp
    } else {
        car.direction = Direction::Down;
        Behaviour::MovingDown
    };
    let travel_time = settings.floor_travel_time() * u32::from(car.floor.abs_diff(target));
    timers.schedule(now, travel_time, car.id);
    debug!(car = car.id, target, ?travel_time, "travel started");
    report_status(car, sink_tx);
    notify(
        sink_tx,
        SinkMessage::CarPositionChanged {
            car: car.id,
            target_floor: target,
            travel_time,
        },
    );
}

fn begin_door_cycle(
    car: &mut Car,
    timers: &mut TimerQueue,
    settings: &SimulationSettings,
    sink_tx: &Sender<SinkMessage>,
    now: Duration,
) {
    car.behaviour = Behaviour::DoorsOpening;
    timers.schedule(now, settings.door_time(), car.id);
    report_status(car, sink_tx);
}

/// Advances the car past the phase whose timer fired at `deadline`.
/// Returns the served floor once the door cycle has fully completed there,
/// so the caller can clear the registry and decide between the next trip
/// and going idle. Follow-up phases are scheduled from `deadline`.
pub fn on_timer(
    car: &mut Car,
    timers: &mut TimerQueue,
    settings: &SimulationSettings,
    sink_tx: &Sender<SinkMessage>,
    deadline: Duration,
) -> Option<u8> {
    match car.behaviour {
        Behaviour::MovingUp | Behaviour::MovingDown => {
            if let Some(target) = car.destination {
                car.floor = target;
            }
            debug!(car = car.id, floor = car.floor, "travel complete");
            begin_door_cycle(car, timers, settings, sink_tx, deadline);
            None
        }
        Behaviour::DoorsOpening => {
            car.behaviour = Behaviour::DoorsClosing;
            timers.schedule(deadline, settings.door_time(), car.id);
            report_status(car, sink_tx);
            None
        }
        Behaviour::DoorsClosing => {
            let served = car.destination.take().unwrap_or(car.floor);
            debug!(car = car.id, floor = served, "stop served");
            Some(served)
        }
        // reset clears the timer queue, so an idle car never sees a timer
        Behaviour::Idle => None,
    }
}

pub fn set_idle(car: &mut Car, sink_tx: &Sender<SinkMessage>) {
    car.behaviour = Behaviour::Idle;
    car.direction = Direction::Stop;
    car.destination = None;
    report_status(car, sink_tx);
}
