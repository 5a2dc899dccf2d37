pub mod dispatch;
pub mod figure;
pub mod layout;

pub use dispatch::{
    render_agb, render_bgb, render_ch4, render_co2, render_ghg, render_weather, ControlState,
    RenderOutput, Section, SummaryBlock,
};
pub use figure::{Figure, Mode, Trace};
pub use layout::{escape_html, render_panel, render_shell};
