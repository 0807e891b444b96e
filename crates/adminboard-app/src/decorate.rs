// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::model::StatusCategory;
use crate::record::JobRecord;

pub const NOT_AVAILABLE: &str = "N/A";
pub const UNKNOWN_STATUS_LABEL: &str = "Unknown";

/// A job plus everything the list view derives from it for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecoratedJob {
    pub record: JobRecord,
    pub formatted_next_fire_time: String,
    pub next_fire_time_is_na: bool,
    pub formatted_previous_fire_time: String,
    pub previous_fire_time_is_na: bool,
    pub status: StatusCategory,
    pub status_class: &'static str,
    pub status_label: String,
    pub progress_percentage: i64,
    pub progress_color_class: &'static str,
    pub show_progress: bool,
    pub progress_width_style: String,
    #[serde(skip)]
    pub next_fire_at: Option<OffsetDateTime>,
    #[serde(skip)]
    pub previous_fire_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorator {
    offset: UtcOffset,
}

impl Default for Decorator {
    fn default() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl Decorator {
    pub const fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn decorate(&self, record: &JobRecord) -> DecoratedJob {
        let next_fire_at = record.next_fire_time.as_deref().and_then(parse_instant);
        let previous_fire_at = record
            .previous_fire_time
            .as_deref()
            .and_then(parse_instant);
        let formatted_next_fire_time = self.format(next_fire_at);
        let formatted_previous_fire_time = self.format(previous_fire_at);

        let status = StatusCategory::classify(record.state.as_deref());
        let status_label = record
            .state
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty())
            .unwrap_or(UNKNOWN_STATUS_LABEL)
            .to_owned();
        let progress_percentage = record.progress.unwrap_or(0);

        DecoratedJob {
            record: record.clone(),
            next_fire_time_is_na: formatted_next_fire_time == NOT_AVAILABLE,
            formatted_next_fire_time,
            previous_fire_time_is_na: formatted_previous_fire_time == NOT_AVAILABLE,
            formatted_previous_fire_time,
            status,
            status_class: status.status_class(),
            status_label,
            progress_percentage,
            progress_color_class: status.progress_color_class(),
            show_progress: status.shows_progress() && progress_percentage > 0,
            progress_width_style: format!("width: {progress_percentage}%;"),
            next_fire_at,
            previous_fire_at,
        }
    }

    pub fn decorate_all(&self, records: &[JobRecord]) -> Vec<DecoratedJob> {
        records.iter().map(|record| self.decorate(record)).collect()
    }

    pub fn format_timestamp(&self, raw: Option<&str>) -> String {
        self.format(raw.and_then(parse_instant))
    }

    fn format(&self, instant: Option<OffsetDateTime>) -> String {
        instant
            .and_then(|instant| format_instant(instant, self.offset))
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
    }
}

/// Decorates with UTC display times.
pub fn decorate(record: &JobRecord) -> DecoratedJob {
    Decorator::default().decorate(record)
}

/// Accepts RFC 3339, the backend's `+0000` offset style, naive date-times
/// (read as UTC) and bare dates (midnight UTC).
pub fn parse_instant(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case(NOT_AVAILABLE) {
        return None;
    }

    if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(instant);
    }
    if let Ok(instant) = OffsetDateTime::parse(
        raw,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]"
        ),
    ) {
        return Some(instant);
    }
    if let Ok(instant) = OffsetDateTime::parse(
        raw,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
        ),
    ) {
        return Some(instant);
    }
    if let Ok(naive) = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(naive.assume_utc());
    }
    if let Ok(naive) = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Some(naive.assume_utc());
    }
    if let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }
    None
}

/// `Jan 5, 2024, 10:00 AM`.
fn format_instant(instant: OffsetDateTime, offset: UtcOffset) -> Option<String> {
    // Shifting the last representable year can overflow the calendar.
    if instant.year() >= 9999 || instant.year() <= -9999 {
        return None;
    }
    instant
        .to_offset(offset)
        .format(format_description!(
            "[month repr:short] [day padding:none], [year], [hour repr:12]:[minute] [period]"
        ))
        .ok()
}
