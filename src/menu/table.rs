//! Table rendering for departures, using `comfy_table`.

use chrono::NaiveTime;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
    modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS},
    presets::UTF8_FULL,
};

use crate::departure::Departure;
use crate::time::{format_hhmm, is_midnight};

const HEADERS: [&str; 6] = ["Departure", "Line", "Train", "Destination", "Delay", "Track"];

/// Creates and configures a new `comfy_table::Table` with default styling.
///
/// Headers are bold and center-aligned; borders use the UTF-8 presets.
pub fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.into_iter().map(|h| {
            Cell::new(h)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center)
        }));
    table
}

/// Renders a delay cell: green "On time" for no delay, otherwise red "+HH:MM".
pub fn colourise_delay(delay: NaiveTime) -> Cell {
    let (text, color) = if is_midnight(delay) {
        ("On time".to_string(), Color::Green)
    } else {
        (format!("+{}", format_hhmm(delay)), Color::Red)
    };
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Center)
        .fg(color)
}

pub fn format_track(track: Option<u32>) -> String {
    track.map_or_else(|| "--".to_string(), |track| track.to_string())
}

/// Builds a table with one row per departure, in the order given.
pub fn departures_table(departures: &[&Departure]) -> Table {
    let mut table = create_table(HEADERS.to_vec());

    for departure in departures {
        table.add_row(vec![
            Cell::new(format_hhmm(departure.scheduled_time())).set_alignment(CellAlignment::Center),
            Cell::new(departure.line()).set_alignment(CellAlignment::Center),
            Cell::new(departure.train_id()).set_alignment(CellAlignment::Center),
            Cell::new(departure.destination()),
            colourise_delay(departure.delay()),
            Cell::new(format_track(departure.assigned_track())).set_alignment(CellAlignment::Center),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_colourise_delay_on_time() {
        let actual_cell = colourise_delay(hm(0, 0));
        let expected_cell = Cell::new("On time")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Center)
            .fg(Color::Green);
        assert_eq!(actual_cell, expected_cell);
    }

    #[test]
    fn test_colourise_delay_delayed() {
        let actual_cell = colourise_delay(hm(1, 14));
        let expected_cell = Cell::new("+01:14")
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Center)
            .fg(Color::Red);
        assert_eq!(actual_cell, expected_cell);
    }

    #[test]
    fn test_format_track() {
        assert_eq!(format_track(None), "--");
        assert_eq!(format_track(Some(0)), "0");
        assert_eq!(format_track(Some(12)), "12");
    }

    #[test]
    fn test_departures_table_rows() {
        let on_time = Departure::new(hm(1, 45), "Trondheim", "N002", "J8");
        let delayed = Departure::with_track_and_delay(hm(3, 23), "Bodø", "N003", "J9", 8, hm(1, 14));
        let table = departures_table(&[&on_time, &delayed]);
        assert_eq!(table.row_count(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("N002"));
        assert!(rendered.contains("Bodø"));
        assert!(rendered.contains("+01:14"));
        assert!(rendered.contains("--"));
    }
}
