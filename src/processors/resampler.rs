use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::models::{Period, TableView};

/// One non-empty calendar bucket with the mean of each numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub timestamp: NaiveDateTime,
    pub means: Vec<Option<f64>>,
}

/// Buckets in ascending time order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resampled {
    pub period: Period,
    pub columns: Vec<String>,
    pub buckets: Vec<Bucket>,
}

/// Points of one column, skipping buckets where the column had no values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub x: Vec<NaiveDateTime>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

impl Resampled {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn series(&self, column: &str) -> Option<Series> {
        let idx = self.columns.iter().position(|c| c == column)?;
        let mut series = Series::default();
        for bucket in &self.buckets {
            if let Some(value) = bucket.means[idx] {
                series.x.push(bucket.timestamp);
                series.y.push(value);
            }
        }
        Some(series)
    }
}

#[derive(Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Groups rows by calendar period and averages every numeric column
pub struct Resampler {
    period: Period,
}

impl Resampler {
    pub fn new(period: Period) -> Self {
        Self { period }
    }

    pub fn resample(&self, view: &TableView<'_>) -> Resampled {
        let table = view.table();
        let numeric = table.numeric_columns();
        let columns: Vec<String> = numeric
            .iter()
            .map(|&idx| table.columns()[idx].clone())
            .collect();

        let Some(date_idx) = table.date_column() else {
            warn!(sheet = table.name(), "resample requested on table without a date column");
            return Resampled {
                period: self.period,
                columns,
                buckets: Vec::new(),
            };
        };

        let dated: Vec<(NaiveDateTime, _)> = view
            .rows()
            .iter()
            .filter_map(|row| row.get(date_idx).as_timestamp().map(|ts| (ts, *row)))
            .collect();

        let anchor = dated
            .iter()
            .map(|(ts, _)| ts.date())
            .min()
            .map(sunday_on_or_after);

        let mut grouped: BTreeMap<NaiveDateTime, Vec<Accumulator>> = BTreeMap::new();
        for (ts, row) in dated {
            let key = bucket_label(ts, self.period, anchor);
            let accumulators = grouped
                .entry(key)
                .or_insert_with(|| vec![Accumulator::default(); numeric.len()]);
            for (acc, &idx) in accumulators.iter_mut().zip(&numeric) {
                if let Some(value) = row.get(idx).as_number() {
                    acc.sum += value;
                    acc.count += 1;
                }
            }
        }

        let buckets: Vec<Bucket> = grouped
            .into_iter()
            .map(|(timestamp, accumulators)| Bucket {
                timestamp,
                means: accumulators
                    .into_iter()
                    .map(|acc| (acc.count > 0).then(|| acc.sum / acc.count as f64))
                    .collect(),
            })
            .collect();

        debug!(
            sheet = table.name(),
            period = self.period.code(),
            rows = view.len(),
            buckets = buckets.len(),
            "resampled"
        );

        Resampled {
            period: self.period,
            columns,
            buckets,
        }
    }
}

/// Bucket rows by `period` and reduce each numeric column to its mean
pub fn resample(view: &TableView<'_>, period: Period) -> Resampled {
    Resampler::new(period).resample(view)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_default()
}

fn sunday_on_or_after(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - date.weekday().num_days_from_monday() as i64;
    date + Duration::days(days_to_sunday)
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}

/// Label of the bucket holding `ts`.
///
/// Hourly and daily buckets are labelled by their start, weekly ones by the
/// closing Sunday, monthly ones by the month's last day. Two-week buckets
/// close on every second Sunday counted from `anchor`, the first Sunday on
/// or after the earliest row.
fn bucket_label(ts: NaiveDateTime, period: Period, anchor: Option<NaiveDate>) -> NaiveDateTime {
    let date = ts.date();
    match period {
        Period::Hourly => date
            .and_hms_opt(ts.hour(), 0, 0)
            .unwrap_or_else(|| midnight(date)),
        Period::Daily => midnight(date),
        Period::Weekly => midnight(sunday_on_or_after(date)),
        Period::TwoWeek => {
            let anchor = anchor.unwrap_or_else(|| sunday_on_or_after(date));
            let offset = (date - anchor).num_days();
            let steps = if offset <= 0 { 0 } else { (offset + 13) / 14 };
            midnight(anchor + Duration::days(steps * 14))
        }
        Period::Monthly => midnight(last_day_of_month(date)),
    }
}
