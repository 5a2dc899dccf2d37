pub mod controls;
pub mod options;
pub mod period;
pub mod table;

pub use controls::{AgbControls, BgbControls, GhgControls, Selection, Tab, WeatherControls};
pub use options::{FilterOptions, OptionEntry, OptionList};
pub use period::Period;
pub use table::{Row, Table, TableView, Value};
