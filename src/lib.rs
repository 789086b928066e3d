//! Multi-car elevator dispatch and movement simulation.
//!
//! The core is an embedded, deterministic engine: hall calls are
//! deduplicated in a registry, scored onto cars by a greedy dispatcher and
//! served by per-car state machines whose travel and door phases complete
//! on a shared logical clock. A presentation sink receives one-way
//! notifications over a channel and issues commands back; nothing is
//! rendered or persisted here.
//!
//! Embed [`sim::Simulation`] directly and drive the clock yourself, or use
//! [`sim::init`] to spawn the wall-clock driver thread.

pub mod config;
pub mod debug;
pub mod dispatch;
pub mod fsm;
pub mod requests;
pub mod sim;
pub mod timer;
pub mod utilities;

pub use config::{ConfigError, SimulationSettings};
pub use sim::{init, Command, Simulation};
pub use utilities::call::Call;
pub use utilities::direction::Direction;
pub use utilities::sink_message::SinkMessage;
pub use utilities::status::Behaviour;
