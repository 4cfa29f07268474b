//! # Rusty Dispatch
//!
//! A single-station train departure register. Departures are held in memory
//! on a [`DepartureBoard`](departure_board::DepartureBoard), where an operator
//! can delay them, assign tracks, look them up and purge the trains that have
//! already left according to the station [`Clock`](clock::Clock).

pub mod clock;
pub mod constants;
pub mod departure;
pub mod departure_board;
pub mod error;
pub mod menu;
pub mod time;
