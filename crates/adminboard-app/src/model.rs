// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Running,
    Completed,
    Failed,
    Waiting,
    Unknown,
}

impl StatusCategory {
    pub const ALL: [Self; 5] = [
        Self::Running,
        Self::Completed,
        Self::Failed,
        Self::Waiting,
        Self::Unknown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Waiting => "waiting",
            Self::Unknown => "unknown",
        }
    }

    /// Case-insensitive; anything unrecognized is `Unknown`.
    pub fn classify(state: Option<&str>) -> Self {
        let Some(state) = state else {
            return Self::Unknown;
        };
        match state.trim().to_ascii_lowercase().as_str() {
            "executing" | "running" => Self::Running,
            "complete" | "completed" => Self::Completed,
            "failed" | "error" => Self::Failed,
            "waiting" | "queued" => Self::Waiting,
            _ => Self::Unknown,
        }
    }

    pub const fn status_class(self) -> &'static str {
        match self {
            Self::Running => "my-job-item running",
            Self::Completed => "my-job-item completed",
            Self::Failed => "my-job-item failed",
            Self::Waiting => "my-job-item waiting",
            Self::Unknown => "my-job-item",
        }
    }

    pub const fn progress_color_class(self) -> &'static str {
        match self {
            Self::Running => "progress-bar-info",
            Self::Completed => "progress-bar-success",
            Self::Failed => "progress-bar-error",
            Self::Waiting => "progress-bar-warning",
            Self::Unknown => "progress-bar-default",
        }
    }

    pub const fn shows_progress(self) -> bool {
        matches!(self, Self::Running | Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Asc => "utility:arrowup",
            Self::Desc => "utility:arrowdown",
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Top-level split of the scheduled-jobs widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Running,
    Mine,
}

impl Section {
    pub const ALL: [Self; 2] = [Self::Running, Self::Mine];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Mine => "myJobs",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "jobs running",
            Self::Mine => "my jobs",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "running" | "system" => Some(Self::Running),
            "myjobs" | "mine" | "my" => Some(Self::Mine),
            _ => None,
        }
    }
}
