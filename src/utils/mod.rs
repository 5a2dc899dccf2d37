pub mod constants;
pub mod dates;
pub mod progress;

pub use constants::*;
pub use dates::{datetime_to_serial, serial_to_datetime};
pub use progress::LoadProgress;
