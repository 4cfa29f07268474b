use chrono::NaiveTime;

use crate::constants::{INVALID_DESTINATION, INVALID_ID, INVALID_LINE, UNASSIGNED_TRACK};
use crate::time::{EffectiveTime, is_midnight};

/// One scheduled train departure from the station.
///
/// The train id, line, destination and scheduled time are fixed once the
/// departure is built. Only the delay and the track can change afterwards.
/// Invalid input is never rejected: empty text becomes a sentinel string, a
/// negative track becomes [`UNASSIGNED_TRACK`] and a missing time becomes 00:00.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    scheduled_time: NaiveTime,
    delay: NaiveTime,
    line: String,
    train_id: String,
    destination: String,
    track: i32,
}

impl Departure {
    /// Creates a departure with no track assigned and no delay.
    pub fn new(
        scheduled_time: impl Into<Option<NaiveTime>>,
        destination: &str,
        train_id: &str,
        line: &str,
    ) -> Self {
        Self {
            scheduled_time: scheduled_time.into().unwrap_or(NaiveTime::MIN),
            delay: NaiveTime::MIN,
            line: normalize_text(line, INVALID_LINE),
            train_id: normalize_text(train_id, INVALID_ID),
            destination: normalize_text(destination, INVALID_DESTINATION),
            track: UNASSIGNED_TRACK,
        }
    }

    /// Creates a departure and applies a track and a delay straight away.
    pub fn with_track_and_delay(
        scheduled_time: impl Into<Option<NaiveTime>>,
        destination: &str,
        train_id: &str,
        line: &str,
        track: i32,
        delay: impl Into<Option<NaiveTime>>,
    ) -> Self {
        let mut departure = Self::new(scheduled_time, destination, train_id, line);
        departure.set_track(track);
        departure.set_delay(delay);
        departure
    }

    pub fn scheduled_time(&self) -> NaiveTime {
        self.scheduled_time
    }

    pub fn delay(&self) -> NaiveTime {
        self.delay
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn train_id(&self) -> &str {
        &self.train_id
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// The raw track number, `-1` when unassigned.
    pub fn track(&self) -> i32 {
        self.track
    }

    /// The track number if one has been assigned.
    pub fn assigned_track(&self) -> Option<u32> {
        u32::try_from(self.track).ok()
    }

    pub fn is_delayed(&self) -> bool {
        !is_midnight(self.delay)
    }

    /// Scheduled time plus delay, without wrapping past midnight.
    pub fn effective_departure_time(&self) -> EffectiveTime {
        EffectiveTime::from_time(self.scheduled_time).plus(self.delay)
    }

    /// Replaces the delay. `None` resets it to 00:00.
    pub fn set_delay(&mut self, delay: impl Into<Option<NaiveTime>>) {
        self.delay = delay.into().unwrap_or(NaiveTime::MIN);
    }

    /// Replaces the track. Any negative value marks the track as unassigned.
    pub fn set_track(&mut self, track: i32) {
        self.track = normalize_track(track);
    }
}

/// Returns `value`, or `sentinel` when `value` is empty.
pub fn normalize_text(value: &str, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value.to_string()
    }
}

pub fn normalize_track(track: i32) -> i32 {
    if track >= 0 { track } else { UNASSIGNED_TRACK }
}
