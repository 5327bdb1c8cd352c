//! Panel layout, line formatting and the redraw cache

pub mod cache;
pub mod format;
pub mod layout;

pub use cache::{RedrawPlan, RenderCache};
pub use format::{fit_line, format_region, Line, LINE_CAPACITY};
pub use layout::{Region, RegionRect, RenderLayout};
