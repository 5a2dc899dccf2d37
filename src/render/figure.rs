//! Plotly figure descriptions, serialized as the JSON that `Plotly.react`
//! accepts on the page.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::processors::Series;
use crate::utils::constants::SERIES_COLOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "lines+markers")]
    LinesMarkers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub color: &'static str,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: SERIES_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<NaiveDateTime>,
    pub y: Vec<f64>,
    pub mode: Mode,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Style>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Trace {
    #[serde(rename = "scatter")]
    Scatter(ScatterTrace),
    #[serde(rename = "box")]
    BoxPlot(BoxTrace),
}

impl Trace {
    pub fn point_count(&self) -> usize {
        match self {
            Trace::Scatter(t) => t.y.len(),
            Trace::BoxPlot(t) => t.y.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureLayout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

impl Figure {
    /// A titled figure with no traces
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            layout: FigureLayout {
                title: Title { text: title.into() },
                xaxis: None,
                yaxis: None,
            },
        }
    }

    /// Time series of one resampled column
    pub fn time_series(title: &str, name: &str, series: Series, mode: Mode) -> Self {
        let (line, marker) = match mode {
            Mode::Markers => (None, Some(Style::default())),
            Mode::Lines | Mode::LinesMarkers => (Some(Style::default()), None),
        };

        let mut figure = Self::empty(title);
        figure.data.push(Trace::Scatter(ScatterTrace {
            x: series.x,
            y: series.y,
            mode,
            name: name.to_string(),
            line,
            marker,
        }));
        figure
    }

    /// Single box trace; plotly groups the values by their category label
    pub fn box_plot(
        attribute: &str,
        category: &str,
        categories: Vec<String>,
        values: Vec<f64>,
    ) -> Self {
        let mut figure = Self::empty(box_title(attribute, category));
        figure.layout.xaxis = Some(Axis {
            title: Title {
                text: category.to_string(),
            },
        });
        figure.layout.yaxis = Some(Axis {
            title: Title {
                text: attribute.to_string(),
            },
        });
        figure.data.push(Trace::BoxPlot(BoxTrace {
            x: categories,
            y: values,
            name: attribute.to_string(),
        }));
        figure
    }

    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::point_count).sum()
    }
}

pub fn box_title(attribute: &str, category: &str) -> String {
    format!("{} Distribution by {}", attribute, category)
}
