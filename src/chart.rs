//! Price series normalization for charting
//!
//! One raw sample maps to exactly one labeled point, in order. Samples that
//! share a calendar day keep their repeated labels.

use std::slice;

use chrono::{Datelike, Local, TimeZone};

use crate::types::{ChartPoint, RawPricePoint};

/// Day-labeled view over a raw series.
///
/// Holds no cursor of its own: every call to [`ChartSeries::iter`] starts
/// from the first sample and yields the same points.
#[derive(Debug, Clone)]
pub struct ChartSeries<'a, Tz: TimeZone> {
    raw: &'a [RawPricePoint],
    tz: Tz,
}

impl<'a, Tz: TimeZone> ChartSeries<'a, Tz> {
    pub fn iter(&self) -> ChartPoints<'_, Tz> {
        ChartPoints {
            raw: self.raw.iter(),
            tz: &self.tz,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl<'s, 'a, Tz: TimeZone> IntoIterator for &'s ChartSeries<'a, Tz> {
    type Item = ChartPoint;
    type IntoIter = ChartPoints<'s, Tz>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator of labeled points
#[derive(Debug, Clone)]
pub struct ChartPoints<'s, Tz: TimeZone> {
    raw: slice::Iter<'s, RawPricePoint>,
    tz: &'s Tz,
}

impl<'s, Tz: TimeZone> Iterator for ChartPoints<'s, Tz> {
    type Item = ChartPoint;

    fn next(&mut self) -> Option<ChartPoint> {
        self.raw.next().map(|&(timestamp, value)| ChartPoint {
            timestamp,
            value,
            label: day_label(timestamp, self.tz),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<'s, Tz: TimeZone> ExactSizeIterator for ChartPoints<'s, Tz> {}

/// Normalize in the viewer's local calendar
pub fn normalize(raw: &[RawPricePoint]) -> ChartSeries<'_, Local> {
    normalize_in(raw, Local)
}

/// Normalize in an explicit time zone
pub fn normalize_in<Tz: TimeZone>(raw: &[RawPricePoint], tz: Tz) -> ChartSeries<'_, Tz> {
    ChartSeries { raw, tz }
}

/// `"{month}/{day}"` without zero padding, e.g. `8/8`.
///
/// Out-of-range timestamps get an empty label.
pub fn day_label<Tz: TimeZone>(timestamp_ms: i64, tz: &Tz) -> String {
    tz.timestamp_millis_opt(timestamp_ms)
        .earliest()
        .map(|dt| format!("{}/{}", dt.month(), dt.day()))
        .unwrap_or_default()
}
