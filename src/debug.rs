/// ----- DEBUG MODULE -----
/// Terminal status monitor for the simulation. Consumes the sink stream
/// and redraws a fixed-height status table: one row per car plus the list
/// of active calls. This is a development stand-in for the presentation
/// sink, not part of the core.
use std::io::{stdout, Write};

use crossbeam_channel::Receiver;
use crossterm::{cursor, terminal, ExecutableCommand, Result};

use crate::config::SimulationSettings;
use crate::utilities::direction::Direction;
use crate::utilities::request::Request;
use crate::utilities::sink_message::SinkMessage;
use crate::utilities::status::{Behaviour, CarPanel};

struct CarView {
    behaviour: Behaviour,
    panel: CarPanel,
    target: Option<u8>,
}

impl CarView {
    fn new() -> Self {
        CarView {
            behaviour: Behaviour::Idle,
            panel: CarPanel {
                floor: 0,
                direction: Direction::Stop,
                queue: Vec::new(),
            },
            target: None,
        }
    }
}

pub fn main(settings: SimulationSettings, sink_message_rx: Receiver<SinkMessage>) -> Result<()> {
    let mut stdout = stdout();
    let mut cars: Vec<CarView> = (0..settings.num_cars).map(|_| CarView::new()).collect();
    let mut active_calls: Vec<Request> = Vec::new();

    let rows = status_rows(settings.num_cars);
    for _ in 0..rows {
        writeln!(stdout)?;
    }

    for message in sink_message_rx.iter() {
        apply(&mut cars, &mut active_calls, message);
        printstatus(&mut stdout, rows, &cars, &active_calls)?;
    }
    Ok(())
}

fn status_rows(num_cars: u8) -> u16 {
    2 * u16::from(num_cars) + 8
}

fn apply(cars: &mut [CarView], active_calls: &mut Vec<Request>, message: SinkMessage) {
    match message {
        SinkMessage::CarStatusChanged { car, behaviour } => {
            if let Some(view) = cars.get_mut(car as usize) {
                view.behaviour = behaviour;
                if behaviour == Behaviour::Idle {
                    view.target = None;
                }
            }
        }
        SinkMessage::CarPanelUpdated { car, panel } => {
            if let Some(view) = cars.get_mut(car as usize) {
                view.panel = panel;
            }
        }
        SinkMessage::CarPositionChanged {
            car, target_floor, ..
        } => {
            if let Some(view) = cars.get_mut(car as usize) {
                view.target = Some(target_floor);
            }
        }
        SinkMessage::ActiveCallsChanged(calls) => *active_calls = calls,
        // button states are covered by the active-calls list
        SinkMessage::CallButtonChanged { .. } => (),
    }
}

fn printstatus<W: Write>(
    out: &mut W,
    rows: u16,
    cars: &[CarView],
    active_calls: &[Request],
) -> Result<()> {
    out.execute(cursor::MoveUp(rows))?;
    out.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

    let separator =
        "+------------+--------------------+------------+------------+------------+--------------------+";
    writeln!(out, "{}", separator)?;
    writeln!(
        out,
        "| {0:<10} | {1:<18} | {2:<10} | {3:<10} | {4:<10} | {5:<18} |",
        "CAR", "STATE", "FLOOR", "DIRECTION", "TARGET", "QUEUE"
    )?;
    for (id, view) in cars.iter().enumerate() {
        let queue = view
            .panel
            .queue
            .iter()
            .map(u8::to_string)
            .collect::<Vec<String>>()
            .join(" ");
        let target = match view.target {
            Some(floor) => floor.to_string(),
            None => String::from("-"),
        };
        writeln!(out, "{}", separator)?;
        writeln!(
            out,
            "| {0:<10} | {1:<18} | {2:<10} | {3:<10} | {4:<10} | {5:<18} |",
            id,
            view.behaviour.as_string(),
            view.panel.floor,
            view.panel.direction.as_string(),
            target,
            queue
        )?;
    }
    writeln!(out, "{}", separator)?;
    writeln!(out)?;

    let calls = if active_calls.is_empty() {
        String::from("none")
    } else {
        active_calls
            .iter()
            .map(|request| format!("{} {}", request.floor, request.call.as_string()))
            .collect::<Vec<String>>()
            .join("  ")
    };
    writeln!(out, "+--------------------------------------------------+")?;
    writeln!(out, "| ACTIVE CALLS: {0:<34} |", calls)?;
    writeln!(out, "+--------------------------------------------------+")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::call::Call;
    use std::time::Duration;

    #[test]
    fn apply_tracks_car_and_call_state() {
        let mut cars = vec![CarView::new()];
        let mut active_calls = Vec::new();

        apply(
            &mut cars,
            &mut active_calls,
            SinkMessage::CarStatusChanged {
                car: 0,
                behaviour: Behaviour::MovingUp,
            },
        );
        apply(
            &mut cars,
            &mut active_calls,
            SinkMessage::CarPositionChanged {
                car: 0,
                target_floor: 3,
                travel_time: Duration::from_millis(100),
            },
        );
        apply(
            &mut cars,
            &mut active_calls,
            SinkMessage::ActiveCallsChanged(vec![Request::new(
                3,
                Call::Up,
                Duration::from_millis(0),
            )]),
        );

        assert_eq!(cars[0].behaviour, Behaviour::MovingUp);
        assert_eq!(cars[0].target, Some(3));
        assert_eq!(active_calls.len(), 1);

        // going idle clears the shown target
        apply(
            &mut cars,
            &mut active_calls,
            SinkMessage::CarStatusChanged {
                car: 0,
                behaviour: Behaviour::Idle,
            },
        );
        assert_eq!(cars[0].target, None);
    }

    #[test]
    fn printstatus_renders_cars_and_calls() {
        let mut cars = vec![CarView::new()];
        cars[0].behaviour = Behaviour::MovingUp;
        cars[0].target = Some(2);
        let active_calls = vec![Request::new(2, Call::Up, Duration::from_millis(0))];

        let mut out: Vec<u8> = Vec::new();
        printstatus(&mut out, status_rows(1), &cars, &active_calls).unwrap();
        let rendered = String::from_utf8_lossy(&out).to_string();

        assert!(rendered.contains("Moving up"));
        assert!(rendered.contains("ACTIVE CALLS: 2 up"));
    }
}
