//! Test doubles for the collaborator traits

use crate::model::{BarometricReading, ClimateReading, DateTime};
use crate::traits::{
    BarometricSensor, Button, ClimateSensor, Clock, Color, DisplayError, TextDisplay,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

pub struct MockClimate {
    pub reading: ClimateReading,
    pub fail: bool,
}

impl MockClimate {
    pub fn new(reading: ClimateReading) -> Self {
        Self {
            reading,
            fail: false,
        }
    }
}

impl ClimateSensor for MockClimate {
    type Error = MockError;

    async fn read(&mut self) -> Result<ClimateReading, MockError> {
        if self.fail {
            Err(MockError)
        } else {
            Ok(self.reading)
        }
    }
}

pub struct MockBarometric {
    pub reading: BarometricReading,
    pub fail: bool,
}

impl MockBarometric {
    pub fn new(reading: BarometricReading) -> Self {
        Self {
            reading,
            fail: false,
        }
    }
}

impl BarometricSensor for MockBarometric {
    type Error = MockError;

    async fn read(&mut self) -> Result<BarometricReading, MockError> {
        if self.fail {
            Err(MockError)
        } else {
            Ok(self.reading)
        }
    }
}

pub struct MockClock {
    pub time: DateTime,
    pub writes: Vec<DateTime>,
    pub fail: bool,
    /// Fail `now` only, writes still succeed
    pub unreadable: bool,
}

impl MockClock {
    pub fn new(time: DateTime) -> Self {
        Self {
            time,
            writes: Vec::new(),
            fail: false,
            unreadable: false,
        }
    }
}

impl Clock for MockClock {
    type Error = MockError;

    async fn now(&mut self) -> Result<DateTime, MockError> {
        if self.fail || self.unreadable {
            Err(MockError)
        } else {
            Ok(self.time)
        }
    }

    async fn set(&mut self, datetime: &DateTime) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.time = *datetime;
        self.writes.push(*datetime);
        Ok(())
    }
}

/// Button whose level is set by the test
pub struct MockButton {
    pub pressed: bool,
}

impl Button for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

/// Recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear(Color),
    Fill {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    },
    Text {
        x: u16,
        y: u16,
        text: String,
        color: Color,
    },
}

#[derive(Default)]
pub struct MockDisplay {
    pub ops: Vec<DisplayOp>,
    pub fail: bool,
}

impl MockDisplay {
    pub fn fills(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DisplayOp::Fill { .. }))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl TextDisplay for MockDisplay {
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.ops.push(DisplayOp::Clear(color));
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.ops.push(DisplayOp::Fill {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.ops.push(DisplayOp::Text {
            x,
            y,
            text: text.into(),
            color,
        });
        Ok(())
    }
}
