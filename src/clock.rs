use chrono::NaiveTime;

/// The station's reference clock, set by the operator.
///
/// Starts at 00:00 unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    current_time: NaiveTime,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(NaiveTime::MIN)
    }

    pub fn starting_at(current_time: NaiveTime) -> Self {
        Self { current_time }
    }

    pub fn current_time(&self) -> NaiveTime {
        self.current_time
    }

    /// Moves the clock to `current_time`. `None` leaves the clock unchanged.
    pub fn set_current_time(&mut self, current_time: impl Into<Option<NaiveTime>>) {
        if let Some(current_time) = current_time.into() {
            self.current_time = current_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_midnight() {
        assert_eq!(Clock::new().current_time(), NaiveTime::MIN);
        assert_eq!(Clock::default(), Clock::new());
    }

    #[test]
    fn set_and_ignore_none() {
        let mut clock = Clock::new();
        let four = NaiveTime::from_hms_opt(4, 0, 0).unwrap();
        clock.set_current_time(four);
        assert_eq!(clock.current_time(), four);
        clock.set_current_time(None);
        assert_eq!(clock.current_time(), four);
    }
}
