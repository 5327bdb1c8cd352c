//! Embassy async tasks
//!
//! Boot runs once on the thread executor and spawns the three periodic
//! tasks, each onto the executor matching its priority.

pub mod acquisition;
pub mod boot;
pub mod input;
pub mod render;

pub use acquisition::acquisition_task;
pub use boot::{boot_task, Board};
pub use input::input_task;
pub use render::render_task;
