use std::time::Duration;

use tracing::debug;

use crate::utilities::call::Call;
use crate::utilities::request::Request;

/// Outstanding pickup requests, deduplicated by (floor, call) and kept in
/// creation order. Owned by the simulation; cars never hold references into
/// it beyond the current run.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
pub struct CallRegistry {
    calls: Vec<Request>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pickup request. Returns false without touching the
    /// registry when a request with the same (floor, call) key is already
    /// active. A duplicate press is a no-op, not an error.
    pub fn add(&mut self, floor: u8, call: Call, now: Duration) -> bool {
        if self.contains(floor, call) {
            debug!(floor, call = %call.as_string(), "duplicate call ignored");
            return false;
        }
        self.calls.push(Request::new(floor, call, now));
        true
    }

    pub fn contains(&self, floor: u8, call: Call) -> bool {
        self.calls
            .iter()
            .any(|request| request.floor == floor && request.call == call)
    }

    /// Removes every active request at `floor`, regardless of call kind,
    /// and returns the removed entries so the caller can deactivate each
    /// button. A stopping car clears both kinds even though it serves one
    /// heading; see DESIGN.md.
    pub fn clear_at_floor(&mut self, floor: u8) -> Vec<Request> {
        let mut cleared = Vec::new();
        for index in (0..self.calls.len()).rev() {
            if self.calls[index].floor == floor {
                cleared.push(self.calls.remove(index));
            }
        }
        cleared.reverse();
        cleared
    }

    /// Active requests ordered by creation time ascending; ties keep
    /// insertion order.
    pub fn active(&self) -> &[Request] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn duplicate_key_is_ignored() {
        let mut registry = CallRegistry::new();
        assert!(registry.add(2, Call::Up, ms(0)));
        assert!(!registry.add(2, Call::Up, ms(10)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.active()[0].created_at, ms(0));
    }

    #[test]
    fn same_floor_other_call_is_separate() {
        let mut registry = CallRegistry::new();
        assert!(registry.add(2, Call::Up, ms(0)));
        assert!(registry.add(2, Call::Down, ms(1)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn clear_at_floor_removes_both_kinds() {
        let mut registry = CallRegistry::new();
        registry.add(1, Call::Up, ms(0));
        registry.add(2, Call::Up, ms(1));
        registry.add(2, Call::Down, ms(2));

        let cleared = registry.clear_at_floor(2);
        assert_eq!(cleared.len(), 2);
        assert_eq!(cleared[0].call, Call::Up);
        assert_eq!(cleared[1].call, Call::Down);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(1, Call::Up));
    }

    #[test]
    fn active_is_in_creation_order() {
        let mut registry = CallRegistry::new();
        registry.add(3, Call::Down, ms(5));
        registry.add(0, Call::Up, ms(7));
        registry.add(1, Call::Up, ms(7));

        let floors: Vec<u8> = registry.active().iter().map(|r| r.floor).collect();
        assert_eq!(floors, vec![3, 0, 1]);
    }

    #[test]
    fn clearing_unknown_floor_is_a_noop() {
        let mut registry = CallRegistry::new();
        registry.add(1, Call::Up, ms(0));
        assert!(registry.clear_at_floor(4).is_empty());
        assert_eq!(registry.len(), 1);
    }
}
