//! # Departure Board Module
//!
//! The station's register of scheduled departures. The board owns every
//! departure added to it, keyed by train id, and answers the operator's
//! queries. All orderings are computed on demand; the backing map iterates in
//! train id order, which makes ties in sorted output deterministic.

use chrono::NaiveTime;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::departure::Departure;
use crate::time::format_hhmm;

#[derive(Debug, Default)]
pub struct DepartureBoard {
    departures: BTreeMap<String, Departure>,
}

impl DepartureBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.departures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }

    /// Iterates over all departures in train id order.
    pub fn iter(&self) -> impl Iterator<Item = &Departure> {
        self.departures.values()
    }

    /// Adds a departure to the board.
    ///
    /// Returns `false` without touching the board when no departure is given
    /// or when a departure with the same train id is already registered.
    pub fn add(&mut self, departure: impl Into<Option<Departure>>) -> bool {
        let Some(departure) = departure.into() else {
            debug!("rejected add: no departure given");
            return false;
        };
        if self.departures.contains_key(departure.train_id()) {
            debug!(train_id = departure.train_id(), "rejected add: duplicate train id");
            return false;
        }

        debug!(
            train_id = departure.train_id(),
            scheduled = %format_hhmm(departure.scheduled_time()),
            "departure added"
        );
        self.departures
            .insert(departure.train_id().to_string(), departure);
        true
    }

    /// Removes the entry with the same train id as `departure`.
    ///
    /// Returns `false` only when no departure is given. Removing a train id
    /// that is not on the board still reports success.
    pub fn delete(&mut self, departure: Option<&Departure>) -> bool {
        let Some(departure) = departure else {
            return false;
        };
        let removed = self.departures.remove(departure.train_id()).is_some();
        debug!(train_id = departure.train_id(), removed, "departure deleted");
        true
    }

    /// Looks up a departure by train id. An empty id never matches.
    pub fn get_by_id(&self, train_id: &str) -> Option<&Departure> {
        if train_id.is_empty() {
            return None;
        }
        self.departures.get(train_id)
    }

    /// Mutable lookup, used to change the delay or track of a registered departure.
    pub fn get_by_id_mut(&mut self, train_id: &str) -> Option<&mut Departure> {
        if train_id.is_empty() {
            return None;
        }
        self.departures.get_mut(train_id)
    }

    /// All departures whose destination equals `destination` exactly (case-sensitive).
    pub fn get_by_destination(&self, destination: &str) -> Vec<&Departure> {
        self.departures
            .values()
            .filter(|departure| departure.destination() == destination)
            .collect()
    }

    /// All departures ordered by scheduled time.
    ///
    /// Delay is deliberately left out of the sort key, so a heavily delayed
    /// early train still sorts before a later one. The sort is stable: equal
    /// scheduled times keep train id order.
    pub fn all_sorted_by_scheduled_time(&self) -> Vec<&Departure> {
        let mut departures: Vec<&Departure> = self.departures.values().collect();
        departures.sort_by_key(|departure| departure.scheduled_time());
        departures
    }

    /// Removes every departure whose effective departure time (scheduled time
    /// plus delay) is strictly before `reference`, returning how many were removed.
    pub fn evict_before(&mut self, reference: NaiveTime) -> usize {
        let before = self.departures.len();
        self.departures
            .retain(|_, departure| !departure.effective_departure_time().is_before(reference));
        let evicted = before - self.departures.len();

        info!(
            reference = %format_hhmm(reference),
            evicted,
            remaining = self.departures.len(),
            "evicted departed trains"
        );
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn sample_board() -> DepartureBoard {
        let mut board = DepartureBoard::new();
        assert!(board.add(Departure::with_track_and_delay(hm(1, 45), "Trondheim", "N002", "J8", 2, hm(0, 0))));
        assert!(board.add(Departure::with_track_and_delay(hm(3, 23), "Bodø", "N003", "J9", 8, hm(1, 14))));
        assert!(board.add(Departure::with_track_and_delay(hm(8, 23), "Trondheim", "N004", "J1", 3, hm(0, 37))));
        board
    }

    fn ids(departures: &[&Departure]) -> Vec<String> {
        departures.iter().map(|d| d.train_id().to_string()).collect()
    }

    #[test]
    fn add_fresh_id_grows_board() {
        let mut board = DepartureBoard::new();
        assert!(board.is_empty());
        assert!(board.add(Departure::new(hm(10, 0), "Oslo S", "R10", "L1")));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn add_none_is_rejected() {
        let mut board = sample_board();
        assert!(!board.add(None::<Departure>));
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn add_duplicate_id_is_rejected_and_keeps_original() {
        let mut board = sample_board();
        assert!(!board.add(Departure::new(hm(23, 0), "Bergen", "N002", "X1")));
        assert_eq!(board.len(), 3);
        assert_eq!(board.get_by_id("N002").unwrap().destination(), "Trondheim");
    }

    #[test]
    fn delete_removes_entry() {
        let mut board = sample_board();
        let departure = board.get_by_id("N003").cloned();
        assert!(board.delete(departure.as_ref()));
        assert!(board.get_by_id("N003").is_none());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn delete_none_fails() {
        let mut board = sample_board();
        assert!(!board.delete(None));
        assert_eq!(board.len(), 3);
    }

    // Absent train ids are reported as deleted; callers rely on this.
    #[test]
    fn delete_absent_id_still_succeeds() {
        let mut board = sample_board();
        let stranger = Departure::new(hm(12, 0), "Narvik", "X999", "K1");
        assert!(board.delete(Some(&stranger)));
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn get_by_id_soft_misses() {
        let board = sample_board();
        assert_eq!(board.get_by_id("N004").unwrap().line(), "J1");
        assert!(board.get_by_id("").is_none());
        assert!(board.get_by_id("n004").is_none());
        assert!(board.get_by_id("N999").is_none());
    }

    #[test]
    fn get_by_id_mut_changes_board_held_instance() {
        let mut board = sample_board();
        let departure = board.get_by_id_mut("N002").unwrap();
        departure.set_track(-5);
        departure.set_delay(hm(0, 10));

        let departure = board.get_by_id("N002").unwrap();
        assert_eq!(departure.track(), -1);
        assert_eq!(departure.delay(), hm(0, 10));
        assert!(board.get_by_id_mut("").is_none());
    }

    #[test]
    fn get_by_destination_exact_match_only() {
        let board = sample_board();
        assert_eq!(ids(&board.get_by_destination("Trondheim")), ["N002", "N004"]);
        assert_eq!(ids(&board.get_by_destination("Bodø")), ["N003"]);
        assert!(board.get_by_destination("trondheim").is_empty());
        assert!(board.get_by_destination("").is_empty());
        assert!(board.get_by_destination("Stavanger").is_empty());
    }

    #[test]
    fn sorted_by_scheduled_time_ignores_delay() {
        let mut board = DepartureBoard::new();
        board.add(Departure::new(hm(8, 23), "Trondheim", "B", "J1"));
        board.add(Departure::with_track_and_delay(hm(3, 23), "Bodø", "A", "J9", 8, hm(6, 0)));
        board.add(Departure::new(hm(1, 45), "Trondheim", "C", "J8"));
        assert_eq!(ids(&board.all_sorted_by_scheduled_time()), ["C", "A", "B"]);
    }

    #[test]
    fn sorted_ties_keep_train_id_order() {
        let mut board = DepartureBoard::new();
        board.add(Departure::new(hm(9, 0), "Trondheim", "Z1", "J1"));
        board.add(Departure::new(hm(9, 0), "Bodø", "A1", "J2"));
        board.add(Departure::new(hm(7, 0), "Oslo S", "M1", "J3"));
        assert_eq!(ids(&board.all_sorted_by_scheduled_time()), ["M1", "A1", "Z1"]);
    }

    #[test]
    fn station_scenario() {
        let mut board = sample_board();
        assert_eq!(ids(&board.all_sorted_by_scheduled_time()), ["N002", "N003", "N004"]);

        let effective: Vec<String> = board
            .all_sorted_by_scheduled_time()
            .iter()
            .map(|d| d.effective_departure_time().to_string())
            .collect();
        assert_eq!(effective, ["01:45", "04:37", "09:00"]);

        assert_eq!(board.evict_before(hm(4, 0)), 1);
        assert!(board.get_by_id("N002").is_none());
        assert_eq!(ids(&board.all_sorted_by_scheduled_time()), ["N003", "N004"]);
    }

    #[test]
    fn evict_uses_delay_and_is_strict() {
        let mut board = sample_board();
        // N003 is scheduled 03:23 but effectively leaves 04:37.
        assert_eq!(board.evict_before(hm(4, 37)), 1);
        assert!(board.get_by_id("N003").is_some());
        assert_eq!(board.evict_before(hm(4, 38)), 1);
        assert!(board.get_by_id("N003").is_none());
    }

    #[test]
    fn evict_on_empty_board_is_zero() {
        let mut board = DepartureBoard::new();
        assert_eq!(board.evict_before(hm(23, 59)), 0);
    }

    #[test]
    fn evict_keeps_departures_delayed_past_midnight() {
        let mut board = DepartureBoard::new();
        board.add(Departure::with_track_and_delay(hm(23, 30), "Oslo S", "F1", "F", 1, hm(1, 0)));
        assert_eq!(board.evict_before(hm(23, 59)), 0);
        assert_eq!(board.len(), 1);
    }
}
