/// ----- SIMULATION MODULE -----
/// Owns the call registry, the cars and the timer queue. Incoming pickup
/// requests are deduplicated, scored onto a car and inserted into its
/// queue; car phase timers are drained in deadline order against the
/// logical clock. Every state change is relayed to the presentation sink.
///
/// `Simulation` itself is synchronous and deterministic; tests drive it
/// with explicit logical times. `init` wraps it in a driver thread that
/// maps wall-clock time onto the logical clock, the single thread that
/// owns all shared state.
use std::thread::spawn;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, unbounded, Receiver, Sender};
use tracing::{info, warn};

use crate::config::{ConfigError, SimulationSettings};
use crate::dispatch;
use crate::fsm::{self, Car};
use crate::requests::CallRegistry;
use crate::timer::TimerQueue;
use crate::utilities::call::Call;
use crate::utilities::sink_message::{notify, SinkMessage};
use crate::utilities::status::Behaviour;

const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub enum Command {
    RequestPickup { floor: u8, call: Call },
    Reset,
}

pub struct Simulation {
    settings: SimulationSettings,
    registry: CallRegistry,
    cars: Vec<Car>,
    timers: TimerQueue,
    sink_tx: Sender<SinkMessage>,
}

impl Simulation {
    /// The configure operation: validates the settings and builds a fresh
    /// simulation with every car idle at floor 0.
    pub fn new(
        settings: SimulationSettings,
        sink_tx: Sender<SinkMessage>,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        info!(
            num_floors = settings.num_floors,
            num_cars = settings.num_cars,
            "simulation configured"
        );
        let cars = (0..settings.num_cars).map(Car::new).collect();
        Ok(Simulation {
            settings,
            registry: CallRegistry::new(),
            cars,
            timers: TimerQueue::new(),
            sink_tx,
        })
    }

    /// Registers a hall call and assigns it to the best-scoring car. A
    /// duplicate (floor, call) is a silent no-op. The caller guarantees
    /// `floor` is in range and the call is legal for the floor's position
    /// (ground floor up only, top floor down only) and is not re-validated
    /// here.
    pub fn request_pickup(&mut self, floor: u8, call: Call, now: Duration) {
        if !self.registry.add(floor, call, now) {
            return;
        }
        notify(
            &self.sink_tx,
            SinkMessage::CallButtonChanged {
                floor,
                call,
                active: true,
            },
        );
        self.notify_active_calls();

        let index = match dispatch::select_car(&self.cars, floor, call) {
            Some(index) => index,
            None => {
                // configure forbids zero cars, so this branch is defensive
                warn!(floor, "no cars available to serve call");
                return;
            }
        };
        let car = &mut self.cars[index];
        dispatch::assign(car, floor);
        if car.busy() {
            notify(
                &self.sink_tx,
                SinkMessage::CarPanelUpdated {
                    car: car.id,
                    panel: car.panel(),
                },
            );
        } else {
            fsm::begin_next_trip(car, &mut self.timers, &self.settings, &self.sink_tx, now);
        }
    }

    /// Drains every timer due at or before `now`, in deadline order,
    /// advancing the owning cars. One call can carry a car through travel,
    /// both door phases, registry clearing and into its next trip, because
    /// follow-up phases are scheduled from the fired deadline.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((deadline, car_id)) = self.timers.pop_due(now) {
            self.car_timer_fired(car_id, deadline);
        }
    }

    fn car_timer_fired(&mut self, car_id: u8, deadline: Duration) {
        let index = car_id as usize;
        let served = fsm::on_timer(
            &mut self.cars[index],
            &mut self.timers,
            &self.settings,
            &self.sink_tx,
            deadline,
        );
        let Some(floor) = served else { return };

        let cleared = self.registry.clear_at_floor(floor);
        if !cleared.is_empty() {
            for request in &cleared {
                notify(
                    &self.sink_tx,
                    SinkMessage::CallButtonChanged {
                        floor: request.floor,
                        call: request.call,
                        active: false,
                    },
                );
            }
            self.notify_active_calls();
        }

        let car = &mut self.cars[index];
        if car.queue.is_empty() {
            fsm::set_idle(car, &self.sink_tx);
        } else {
            fsm::begin_next_trip(car, &mut self.timers, &self.settings, &self.sink_tx, deadline);
        }
    }

    /// Earliest pending logical deadline, None when every car is idle.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Discards all calls and cars atomically: armed timers are dropped
    /// first so no stale phase completion can mutate the fresh state, then
    /// the registry empties (deactivating every button) and the cars are
    /// recreated idle at floor 0.
    pub fn reset(&mut self) {
        info!("simulation reset");
        self.timers.clear();
        for request in self.registry.active() {
            notify(
                &self.sink_tx,
                SinkMessage::CallButtonChanged {
                    floor: request.floor,
                    call: request.call,
                    active: false,
                },
            );
        }
        self.registry.clear();
        self.notify_active_calls();
        self.cars = (0..self.settings.num_cars).map(Car::new).collect();
        for car in &self.cars {
            notify(
                &self.sink_tx,
                SinkMessage::CarStatusChanged {
                    car: car.id,
                    behaviour: Behaviour::Idle,
                },
            );
            notify(
                &self.sink_tx,
                SinkMessage::CarPanelUpdated {
                    car: car.id,
                    panel: car.panel(),
                },
            );
        }
    }

    fn notify_active_calls(&self) {
        notify(
            &self.sink_tx,
            SinkMessage::ActiveCallsChanged(self.registry.active().to_vec()),
        );
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn registry(&self) -> &CallRegistry {
        &self.registry
    }
}

/// Spawns the driver thread and returns the command and notification
/// endpoints. Dropping the command sender shuts the thread down (the
/// pre-configure state); call `init` again to reconfigure.
pub fn init(
    settings: SimulationSettings,
) -> Result<(Sender<Command>, Receiver<SinkMessage>), ConfigError> {
    let (command_tx, command_rx) = unbounded();
    let (sink_message_tx, sink_message_rx) = unbounded();
    let simulation = Simulation::new(settings, sink_message_tx)?;
    spawn(move || main(simulation, command_rx));
    Ok((command_tx, sink_message_rx))
}

fn main(mut simulation: Simulation, command_rx: Receiver<Command>) {
    let start = Instant::now();
    loop {
        let timeout = match simulation.next_deadline() {
            Some(deadline) => deadline.saturating_sub(start.elapsed()),
            None => IDLE_POLL,
        };
        select! {
            recv(command_rx) -> msg => {
                let now = start.elapsed();
                simulation.advance_to(now);
                match msg {
                    Ok(Command::RequestPickup { floor, call }) => {
                        simulation.request_pickup(floor, call, now);
                    },
                    Ok(Command::Reset) => simulation.reset(),
                    Err(_) => return, // controller dropped the handle
                }
            },
            default(timeout) => {
                simulation.advance_to(start.elapsed());
            },
        }
    }
}
