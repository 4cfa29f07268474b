//! # Menu Module
//!
//! The operator's numbered text menu. A [`Session`] owns the departure board
//! and the station clock and turns lines of operator input into board
//! operations. Input and output are generic so the whole menu can be driven
//! from memory in tests.

use chrono::NaiveTime;
use crossterm::style::Stylize;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::clock::Clock;
use crate::departure::Departure;
use crate::departure_board::DepartureBoard;
use crate::error::AppError;
use crate::time::{format_hhmm, parse_hhmm};

pub mod table;

use table::departures_table;

const RULE: &str = "--------------------";

/// One entry of the operator menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddDeparture,
    AddDelay,
    AssignTrack,
    ShowAll,
    SearchByDestination,
    ShowById,
    DeleteById,
    UpdateClock,
    Exit,
}

impl MenuChoice {
    /// All choices in menu order.
    pub const ALL: [MenuChoice; 9] = [
        MenuChoice::AddDeparture,
        MenuChoice::AddDelay,
        MenuChoice::AssignTrack,
        MenuChoice::ShowAll,
        MenuChoice::SearchByDestination,
        MenuChoice::ShowById,
        MenuChoice::DeleteById,
        MenuChoice::UpdateClock,
        MenuChoice::Exit,
    ];

    /// The number the operator types to pick this choice.
    pub fn number(&self) -> usize {
        match self {
            MenuChoice::AddDeparture => 1,
            MenuChoice::AddDelay => 2,
            MenuChoice::AssignTrack => 3,
            MenuChoice::ShowAll => 4,
            MenuChoice::SearchByDestination => 5,
            MenuChoice::ShowById => 6,
            MenuChoice::DeleteById => 7,
            MenuChoice::UpdateClock => 8,
            MenuChoice::Exit => 9,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddDeparture => "Add new departure",
            MenuChoice::AddDelay => "Add delay to departure",
            MenuChoice::AssignTrack => "Assign track to departure",
            MenuChoice::ShowAll => "Show all departures",
            MenuChoice::SearchByDestination => "Search for departures going to destination",
            MenuChoice::ShowById => "Show specific departure by Id",
            MenuChoice::DeleteById => "Delete specific departure by Id",
            MenuChoice::UpdateClock => "Update the system clock",
            MenuChoice::Exit => "Exit application",
        }
    }

    /// Parses the operator's menu input, e.g. `"4"`.
    pub fn from_input(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        Self::ALL.into_iter().find(|choice| choice.number() == number)
    }
}

/// The departures a freshly started station is seeded with.
pub fn sample_departures() -> Vec<Departure> {
    let hm = |hour, minute| NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    vec![
        Departure::with_track_and_delay(hm(1, 45), "Trondheim", "N002", "J8", 2, hm(0, 0)),
        Departure::with_track_and_delay(hm(3, 23), "Bodø", "N003", "J9", 8, hm(1, 14)),
        Departure::with_track_and_delay(hm(8, 23), "Trondheim", "N004", "J1", 3, hm(0, 37)),
    ]
}

/// An interactive operator session over a departure board.
pub struct Session<R, W> {
    board: DepartureBoard,
    clock: Clock,
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(board: DepartureBoard, clock: Clock, input: R, output: W) -> Self {
        Self {
            board,
            clock,
            input,
            output,
            clear_screen: false,
        }
    }

    /// Clear the terminal before each menu is shown.
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn board(&self) -> &DepartureBoard {
        &self.board
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu loop until the operator exits or input ends.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.print_welcome()?;

        loop {
            self.display_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let keep_going = match MenuChoice::from_input(&line) {
                Some(choice) => self.handle(choice)?,
                None => {
                    writeln!(
                        self.output,
                        "Invalid menu choice. Please enter a number between 1-{}.",
                        MenuChoice::ALL.len()
                    )?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }

        Ok(())
    }

    /// Executes one menu choice. Returns `false` when the session should end.
    pub fn handle(&mut self, choice: MenuChoice) -> Result<bool, AppError> {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::AddDeparture => self.add_departure()?,
            MenuChoice::AddDelay => self.add_delay()?,
            MenuChoice::AssignTrack => self.assign_track()?,
            MenuChoice::ShowAll => self.show_all()?,
            MenuChoice::SearchByDestination => self.search_by_destination()?,
            MenuChoice::ShowById => self.show_by_id()?,
            MenuChoice::DeleteById => self.delete_by_id()?,
            MenuChoice::UpdateClock => self.update_clock()?,
            MenuChoice::Exit => return Ok(false),
        }
        self.hold_for_enter()?;
        Ok(true)
    }

    fn print_welcome(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}Train Dispatch System{RULE}")?;
        writeln!(self.output, "Current version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.output, "{RULE}{RULE}{RULE}")?;
        Ok(())
    }

    fn display_menu(&mut self) -> Result<(), AppError> {
        if self.clear_screen {
            clearscreen::clear()?;
        }
        writeln!(
            self.output,
            "Current system time: {}",
            format_hhmm(self.clock.current_time())
        )?;
        writeln!(self.output)?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        writeln!(
            self.output,
            "Please enter a menu choice between 1-{}:",
            MenuChoice::ALL.len()
        )?;
        self.output.flush()?;
        Ok(())
    }

    /// Reads one line without its line ending. `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, AppError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, message: &str) -> Result<String, AppError> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn prompt_train_id(&mut self, message: &str) -> Result<String, AppError> {
        Ok(self.prompt(message)?.trim().to_uppercase())
    }

    /// Prints a notice and returns `false` when no departure has this id.
    fn departure_exists(&mut self, train_id: &str) -> Result<bool, AppError> {
        if self.board.get_by_id(train_id).is_some() {
            return Ok(true);
        }
        writeln!(
            self.output,
            "No departure with provided ID was found. Please provide a valid ID"
        )?;
        Ok(false)
    }

    fn hold_for_enter(&mut self) -> Result<(), AppError> {
        writeln!(
            self.output,
            "\n{}\n",
            "Press enter to return to menu.".bold().italic()
        )?;
        self.output.flush()?;
        self.read_line()?;
        Ok(())
    }

    fn add_departure(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}Add new departure{RULE}")?;

        let raw_time = self.prompt("Enter departure time with format \"hh:mm\":")?;
        let scheduled_time = match parse_hhmm(&raw_time) {
            Ok(time) => time,
            Err(e) => {
                writeln!(self.output, "Provided departure time was incorrectly formatted ({e}). Returning to menu.")?;
                return Ok(());
            }
        };
        let destination = self.prompt("Enter destination:")?.trim().to_string();
        let train_id = self.prompt_train_id("Enter train number:")?;
        let line = self.prompt("Enter line:")?.trim().to_uppercase();

        let departure = Departure::new(scheduled_time, &destination, &train_id, &line);
        let train_id = departure.train_id().to_string();
        if self.board.add(departure) {
            writeln!(self.output, "Departure created successfully!")?;
            if let Some(created) = self.board.get_by_id(&train_id) {
                writeln!(self.output, "{}", departures_table(&[created]))?;
            }
        } else {
            writeln!(self.output, "Departure could not be added to register.")?;
        }
        Ok(())
    }

    fn add_delay(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}Add delay to departure{RULE}")?;

        let train_id =
            self.prompt_train_id("Please provide the ID of the departure you wish to add a delay to")?;
        if !self.departure_exists(&train_id)? {
            return Ok(());
        }

        let raw_delay =
            self.prompt("Please provide the delay you wish to apply with format \"hh:mm\"")?;
        match parse_hhmm(&raw_delay) {
            Ok(delay) => {
                if let Some(departure) = self.board.get_by_id_mut(&train_id) {
                    departure.set_delay(delay);
                }
                writeln!(self.output, "Delay of {} applied to {train_id}.", format_hhmm(delay))?;
            }
            Err(e) => writeln!(self.output, "Provided delay was not formatted correctly ({e}).")?,
        }
        Ok(())
    }

    fn assign_track(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}Assign track to departure{RULE}")?;

        let train_id = self
            .prompt_train_id("Please provide the ID of the departure you wish to assign a track to")?;
        if !self.departure_exists(&train_id)? {
            return Ok(());
        }

        let raw_track = self.prompt("Please provide the track to assign the departure")?;
        match raw_track.trim().parse::<i32>() {
            Ok(track) => {
                if let Some(departure) = self.board.get_by_id_mut(&train_id) {
                    departure.set_track(track);
                }
                writeln!(self.output, "Track assigned to {train_id}.")?;
            }
            Err(_) => writeln!(self.output, "Provided track was not a whole number.")?,
        }
        Ok(())
    }

    fn show_all(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}All departures{RULE}")?;
        let table = departures_table(&self.board.all_sorted_by_scheduled_time());
        writeln!(self.output, "{table}")?;
        Ok(())
    }

    fn search_by_destination(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}Show departures by destination{RULE}")?;

        let destination = self.prompt("Please provide a destination")?.trim().to_string();
        let found = self.board.get_by_destination(&destination);
        if found.is_empty() {
            writeln!(self.output, "No departures found going to '{destination}'.")?;
        } else {
            writeln!(self.output, "{}", departures_table(&found))?;
        }
        Ok(())
    }

    fn show_by_id(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}Show departure by Id{RULE}")?;

        let train_id = self.prompt_train_id("Please provide an Id")?;
        if !self.departure_exists(&train_id)? {
            return Ok(());
        }
        if let Some(departure) = self.board.get_by_id(&train_id) {
            writeln!(self.output, "{}", departures_table(&[departure]))?;
        }
        Ok(())
    }

    fn delete_by_id(&mut self) -> Result<(), AppError> {
        writeln!(self.output, "{RULE}Delete departure by Id{RULE}")?;

        let train_id = self.prompt_train_id("Please provide an Id")?;
        if !self.departure_exists(&train_id)? {
            return Ok(());
        }
        let departure = self.board.get_by_id(&train_id).cloned();
        if self.board.delete(departure.as_ref()) {
            writeln!(self.output, "Departure deleted successfully")?;
        }
        Ok(())
    }

    fn update_clock(&mut self) -> Result<(), AppError> {
        let raw_time = self.prompt("Please provide the system time with format \"hh:mm\"")?;
        let current_time = match parse_hhmm(&raw_time) {
            Ok(time) => time,
            Err(e) => {
                writeln!(self.output, "Provided system time was not formatted correctly ({e}).")?;
                return Ok(());
            }
        };

        self.clock.set_current_time(current_time);
        writeln!(
            self.output,
            "Successfully updated system time. New system time is: {}",
            format_hhmm(self.clock.current_time())
        )?;

        let evicted = self.board.evict_before(self.clock.current_time());
        writeln!(self.output, "Number of departures deleted from register: {evicted}")?;
        Ok(())
    }
}
