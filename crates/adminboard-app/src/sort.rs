// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::OffsetDateTime;

use crate::decorate::DecoratedJob;
use crate::model::SortDirection;

/// Sortable columns of a job list. Each field owns exactly one extractor,
/// so nested backend paths like `CronJobDetail.Name` are never split at
/// comparison time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortField {
    JobName,
    NextFireTime,
    PreviousFireTime,
    State,
    CreatedBy,
}

impl SortField {
    pub const ALL: [Self; 5] = [
        Self::JobName,
        Self::NextFireTime,
        Self::PreviousFireTime,
        Self::State,
        Self::CreatedBy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JobName => "CronJobDetail.Name",
            Self::NextFireTime => "NextFireTime",
            Self::PreviousFireTime => "PreviousFireTime",
            Self::State => "State",
            Self::CreatedBy => "CreatedBy.Name",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::JobName => "Job Name",
            Self::NextFireTime => "Next Run",
            Self::PreviousFireTime => "Last Run",
            Self::State => "State",
            Self::CreatedBy => "Submitted By",
        }
    }

    /// Accepts the backend field paths and their flattened forms.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(value))
            .or_else(|| match value.to_ascii_lowercase().as_str() {
                "cronjobdetailname" | "name" | "job" => Some(Self::JobName),
                "createdbyname" | "createdby" | "submittedby" => Some(Self::CreatedBy),
                "next" => Some(Self::NextFireTime),
                "last" | "previous" => Some(Self::PreviousFireTime),
                _ => None,
            })
    }

    pub const fn is_time(self) -> bool {
        matches!(self, Self::NextFireTime | Self::PreviousFireTime)
    }

    pub fn key(self, job: &DecoratedJob) -> SortKey<'_> {
        match self {
            Self::JobName => SortKey::Text(job.record.name.as_deref()),
            Self::NextFireTime => SortKey::Instant(job.next_fire_at),
            Self::PreviousFireTime => SortKey::Instant(job.previous_fire_at),
            Self::State => SortKey::Text(job.record.state.as_deref()),
            Self::CreatedBy => SortKey::Text(job.record.created_by.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
    Text(Option<&'a str>),
    Instant(Option<OffsetDateTime>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortField::NextFireTime)
    }
}

impl SortSpec {
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub const fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub const fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Clicking the active column flips it; any other column starts
    /// ascending.
    pub fn toggle(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.flipped())
        } else {
            Self::ascending(field)
        }
    }

    pub fn compare(&self, left: &DecoratedJob, right: &DecoratedJob) -> Ordering {
        match (self.field.key(left), self.field.key(right)) {
            (SortKey::Instant(left), SortKey::Instant(right)) => match (left, right) {
                (Some(left), Some(right)) => self.direction.apply(left.cmp(&right)),
                (None, None) => Ordering::Equal,
                // Missing times trail in both directions.
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
            },
            (SortKey::Text(left), SortKey::Text(right)) => self.direction.apply(cmp_text(
                left.unwrap_or_default(),
                right.unwrap_or_default(),
            )),
            _ => Ordering::Equal,
        }
    }
}

fn cmp_text(left: &str, right: &str) -> Ordering {
    left.chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
}

/// Stable: rows with equal keys keep their input order, so sorting an
/// already sorted list changes nothing.
pub fn sort_records(records: &[DecoratedJob], spec: SortSpec) -> Vec<DecoratedJob> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|left, right| spec.compare(left, right));
    sorted
}
