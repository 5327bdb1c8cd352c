//! Text for each region

use core::fmt::Write;

use heapless::String;

use super::layout::Region;
use crate::model::SensorSnapshot;

/// Longest line any region can produce
pub const LINE_CAPACITY: usize = 32;

/// Formatted region text
pub type Line = String<LINE_CAPACITY>;

/// Format the text of one region from a snapshot
pub fn format_region(region: Region, snapshot: &SensorSnapshot) -> Line {
    let mut line = Line::new();
    let t = &snapshot.timestamp;

    // Overflow only happens for absurd readings; the line is then cut short
    let _ = match region {
        Region::AmbientTemperature => write!(line, "Temp: {:.2} C", snapshot.ambient_temperature),
        Region::AmbientHumidity => write!(line, "Humidity: {:.2} %", snapshot.ambient_humidity),
        Region::Pressure => write!(line, "Pressure: {:.2} hPa", snapshot.pressure_hpa),
        Region::Weekday => line.push_str(t.weekday().name()).map_err(|_| core::fmt::Error),
        Region::Date => write!(line, "{:04}-{:02}-{:02}", t.year, t.month, t.day),
        Region::Time => write!(line, "{:02}:{:02}:{:02}", t.hour, t.minute, t.second),
        Region::EditIndicator => {
            if snapshot.edit.editing {
                write!(line, "EDIT > {}", snapshot.edit.field.label())
            } else {
                Ok(())
            }
        }
    };

    line
}

/// Cut a line to at most `max_chars` characters
pub fn fit_line(mut line: Line, max_chars: usize) -> Line {
    if let Some((end, _)) = line.char_indices().nth(max_chars) {
        line.truncate(end);
    }
    line
}
