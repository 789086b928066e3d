use tracing::debug;

use crate::fsm::Car;
use crate::utilities::call::Call;
use crate::utilities::direction::Direction;

/// Cost per queued stop. Discourages piling work onto an already-busy car.
const QUEUE_PENALTY: f64 = 0.7;

/// Reward for a car already heading the call's way with the target ahead of
/// it: picking up en route beats detouring.
const DIRECTION_BONUS: f64 = -1.5;

/// Scores one car for a call. Pure function of the car's state: distance
/// from its last committed stop (its current floor when the queue is empty,
/// which is the last completed floor even mid-travel), plus the queue
/// penalty, plus the en-route bonus when applicable.
pub fn score(car: &Car, target: u8, call: Call) -> f64 {
    let last_stop = car.queue.last().copied().unwrap_or(car.floor);
    let distance = f64::from(last_stop.abs_diff(target));
    let penalty = car.queue.len() as f64 * QUEUE_PENALTY;
    let en_route = match (car.direction, call) {
        (Direction::Up, Call::Up) => target >= car.floor,
        (Direction::Down, Call::Down) => target <= car.floor,
        _ => false,
    };
    let bonus = if en_route { DIRECTION_BONUS } else { 0.0 };
    distance + penalty + bonus
}

/// Picks the car with the strictly minimal score; the first car in id order
/// wins ties. Returns None only when there are zero cars. Greedy per call;
/// already-assigned calls are never reassigned.
pub fn select_car(cars: &[Car], target: u8, call: Call) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, car) in cars.iter().enumerate() {
        let candidate = score(car, target, call);
        match best {
            Some((_, best_score)) if candidate >= best_score => (),
            _ => best = Some((index, candidate)),
        }
    }
    if let Some((index, best_score)) = best {
        debug!(target, car = cars[index].id, score = best_score, "call assigned");
    }
    best.map(|(index, _)| index)
}

/// Inserts `floor` into the car's queue (duplicates suppressed) and
/// re-sorts by the car's committed direction: ascending for Up or Stop,
/// descending for Down.
///
/// This is an absolute-order resort, not a true sweep keyed off the car's
/// position: an up-bound car handed a floor below it sorts that floor to
/// the front and will reverse after its current stop. Accepted heuristic
/// limitation, see DESIGN.md.
pub fn assign(car: &mut Car, floor: u8) {
    if !car.queue.contains(&floor) {
        car.queue.push(floor);
    }
    match car.direction {
        Direction::Down => car.queue.sort_unstable_by(|a, b| b.cmp(a)),
        _ => car.queue.sort_unstable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::status::Behaviour;

    #[test]
    fn scores_distance_from_last_stop() {
        let mut car = Car::new(0);
        car.floor = 1;
        assert_eq!(score(&car, 4, Call::Up), 3.0);

        car.queue = vec![2, 5];
        // last stop 5, distance 1, two queued stops
        assert_eq!(score(&car, 4, Call::Up), 1.0 + 2.0 * 0.7);
    }

    #[test]
    fn en_route_bonus_needs_matching_call_and_target_ahead() {
        let mut car = Car::new(0);
        car.floor = 2;
        car.direction = Direction::Up;
        car.behaviour = Behaviour::MovingUp;

        assert_eq!(score(&car, 4, Call::Up), 2.0 - 1.5);
        // call for the other direction gets no bonus
        assert_eq!(score(&car, 4, Call::Down), 2.0);
        // target behind the car gets no bonus
        assert_eq!(score(&car, 1, Call::Up), 1.0);
    }

    #[test]
    fn first_car_wins_ties() {
        let cars = vec![Car::new(0), Car::new(1)];
        assert_eq!(select_car(&cars, 3, Call::Up), Some(0));
    }

    #[test]
    fn no_cars_means_no_assignment() {
        assert_eq!(select_car(&[], 3, Call::Up), None);
    }

    #[test]
    fn closer_car_is_selected() {
        let mut far = Car::new(0);
        far.floor = 0;
        let mut near = Car::new(1);
        near.floor = 3;
        assert_eq!(select_car(&[far, near], 4, Call::Up), Some(1));
    }

    #[test]
    fn assign_suppresses_duplicates() {
        let mut car = Car::new(0);
        assign(&mut car, 3);
        assign(&mut car, 3);
        assert_eq!(car.queue, vec![3]);
    }

    #[test]
    fn queue_sorts_with_committed_direction() {
        let mut car = Car::new(0);
        car.direction = Direction::Up;
        assign(&mut car, 4);
        assign(&mut car, 2);
        assert_eq!(car.queue, vec![2, 4]);

        let mut car = Car::new(0);
        car.floor = 5;
        car.direction = Direction::Down;
        assign(&mut car, 1);
        assign(&mut car, 3);
        assert_eq!(car.queue, vec![3, 1]);
    }

    #[test]
    fn up_car_sorts_lower_floor_to_the_front() {
        // the accepted resort limitation: a floor behind an up-bound car
        // jumps ahead of its queued stops
        let mut car = Car::new(0);
        car.floor = 2;
        car.direction = Direction::Up;
        car.queue = vec![4];
        assign(&mut car, 1);
        assert_eq!(car.queue, vec![1, 4]);
    }
}
