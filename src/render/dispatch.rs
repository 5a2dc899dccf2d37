use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{
    AgbControls, BgbControls, GhgControls, Period, Selection, Tab, Table, TableView,
    WeatherControls,
};
use crate::processors::{resample, RowFilter, Summary};
use crate::readers::DataContext;
use crate::render::figure::{box_title, Figure, Mode};
use crate::utils::constants::{
    CH4_COLUMN, CO2_COLUMN, HUMIDITY_COLUMN, RAIN_COLUMN, REGION_COLUMN, SITE_COLUMN,
    TEMPERATURE_COLUMN, TREATMENT_COLUMN, TYPE_COLUMN,
};

/// Current values of one tab's controls
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ControlState {
    Ghg(GhgControls),
    Weather(WeatherControls),
    Agb(AgbControls),
    Bgb(BgbControls),
}

impl ControlState {
    pub fn tab(&self) -> Tab {
        match self {
            ControlState::Ghg(_) => Tab::Ghg,
            ControlState::Weather(_) => Tab::Weather,
            ControlState::Agb(_) => Tab::Agb,
            ControlState::Bgb(_) => Tab::Bgb,
        }
    }

    /// Default control values of `tab`, as first shown in its panel
    pub fn initial(tab: Tab) -> Self {
        match tab {
            Tab::Ghg => ControlState::Ghg(GhgControls::default()),
            Tab::Weather => ControlState::Weather(WeatherControls::default()),
            Tab::Agb => ControlState::Agb(AgbControls::default()),
            Tab::Bgb => ControlState::Bgb(BgbControls::default()),
        }
    }

    pub fn render(&self, data: &DataContext) -> RenderOutput {
        let sections = match self {
            ControlState::Ghg(controls) => render_ghg(controls, data),
            ControlState::Weather(controls) => vec![render_weather(controls, data)],
            ControlState::Agb(controls) => vec![render_agb(controls, data)],
            ControlState::Bgb(controls) => vec![render_bgb(controls, data)],
        };

        RenderOutput {
            tab: self.tab(),
            sections,
            debug: None,
        }
    }
}

/// Everything the page needs to redraw one tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOutput {
    pub tab: Tab,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
}

/// Content drawn into one output container of the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub target: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryBlock>,
    pub charts: Vec<Chart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub figure: Figure,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBox {
    pub heading: String,
    pub value: String,
}

/// The three summary boxes shown above a GHG chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryBlock {
    pub summary: Summary,
    pub boxes: Vec<SummaryBox>,
}

impl SummaryBlock {
    pub fn new(title: &str, summary: Summary) -> Self {
        let boxes = vec![
            SummaryBox {
                heading: format!("Average {}", title),
                value: summary.mean_text(),
            },
            SummaryBox {
                heading: format!("Cumulative {}", title),
                value: summary.sum_text(),
            },
            SummaryBox {
                heading: "Number of Data".to_string(),
                value: summary.count_text(),
            },
        ];
        Self { summary, boxes }
    }
}

fn ghg_filter(controls: &GhgControls) -> RowFilter {
    RowFilter::new()
        .with_predicate(SITE_COLUMN, Selection::from_choice(&controls.site))
        .with_predicate(TREATMENT_COLUMN, Selection::from_choice(&controls.treatment))
        .with_predicate(TYPE_COLUMN, Selection::from_choice(&controls.kind))
}

/// Summary block and line chart for one GHG flux column
fn render_flux(
    controls: &GhgControls,
    data: &DataContext,
    column: &str,
    period: Period,
    target: &'static str,
) -> Section {
    let view = ghg_filter(controls).apply(&data.ghg);
    let resampled = resample(&view, period);
    let series = resampled.series(column).unwrap_or_default();

    debug!(
        column,
        period = period.code(),
        rows = view.len(),
        points = series.len(),
        "rendered flux chart"
    );

    let summary = Summary::from_values(&series.y);
    let title = format!("{} Over Time", column);
    let figure = Figure::time_series(&title, column, series, Mode::LinesMarkers);

    Section {
        target,
        summary: Some(SummaryBlock::new(column, summary)),
        charts: vec![Chart {
            heading: None,
            figure,
        }],
    }
}

pub fn render_co2(controls: &GhgControls, data: &DataContext) -> Section {
    render_flux(controls, data, CO2_COLUMN, controls.co2_period, "co2-graph")
}

pub fn render_ch4(controls: &GhgControls, data: &DataContext) -> Section {
    render_flux(controls, data, CH4_COLUMN, controls.ch4_period, "ch4-graph")
}

pub fn render_ghg(controls: &GhgControls, data: &DataContext) -> Vec<Section> {
    vec![render_co2(controls, data), render_ch4(controls, data)]
}

pub fn render_weather(controls: &WeatherControls, data: &DataContext) -> Section {
    let resampled = resample(&data.weather.view(), controls.period);

    let charts = [
        (HUMIDITY_COLUMN, "Relative Humidity", Mode::Markers),
        (RAIN_COLUMN, "Rain", Mode::Lines),
        (TEMPERATURE_COLUMN, "Temperature", Mode::Markers),
    ]
    .into_iter()
    .map(|(column, name, mode)| {
        let title = format!("{} Over Time", name);
        let series = resampled.series(column).unwrap_or_else(|| {
            warn!(column, "weather column missing, drawing empty chart");
            Default::default()
        });
        Chart {
            heading: Some(title.clone()),
            figure: Figure::time_series(&title, name, series, mode),
        }
    })
    .collect();

    Section {
        target: "aws-graphs",
        summary: None,
        charts,
    }
}

/// Box plot of `attribute` grouped by `category` over the given rows.
///
/// Missing columns give an empty figure; rows without a category label or a
/// numeric attribute value are left out.
fn box_figure(view: &TableView<'_>, attribute: &str, category: &str) -> Figure {
    let table: &Table = view.table();
    let (Some(attr_idx), Some(cat_idx)) =
        (table.column_index(attribute), table.column_index(category))
    else {
        warn!(
            sheet = table.name(),
            attribute, category, "box plot column missing, drawing empty chart"
        );
        return Figure::empty(box_title(attribute, category));
    };

    let (categories, values): (Vec<String>, Vec<f64>) = view
        .rows()
        .iter()
        .filter_map(|row| {
            let label = row.get(cat_idx).display_text()?;
            let value = row.get(attr_idx).as_number()?;
            Some((label, value))
        })
        .unzip();

    debug!(
        sheet = table.name(),
        attribute,
        category,
        rows = view.len(),
        points = values.len(),
        "rendered box plot"
    );
    Figure::box_plot(attribute, category, categories, values)
}

pub fn render_agb(controls: &AgbControls, data: &DataContext) -> Section {
    let view = RowFilter::new()
        .with_predicate(REGION_COLUMN, Selection::from_optional(controls.region.as_deref()))
        .with_predicate(SITE_COLUMN, Selection::from_optional(controls.site.as_deref()))
        .apply(&data.agb);

    Section {
        target: "agb-boxplot",
        summary: None,
        charts: vec![Chart {
            heading: None,
            figure: box_figure(&view, &controls.attribute, &controls.category),
        }],
    }
}

pub fn render_bgb(controls: &BgbControls, data: &DataContext) -> Section {
    Section {
        target: "bgb-boxplot",
        summary: None,
        charts: vec![Chart {
            heading: None,
            figure: box_figure(&data.bgb.view(), &controls.attribute, &controls.category),
        }],
    }
}
