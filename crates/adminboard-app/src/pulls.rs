// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decorate::{Decorator, parse_instant};
use crate::lenient;

/// Rows shown before "Show All" is pressed.
pub const COLLAPSED_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrStatus {
    Merged,
    Open,
    Closed,
    Other,
}

impl PrStatus {
    pub fn parse(state: Option<&str>) -> Self {
        match state.map(str::to_lowercase).as_deref() {
            Some("merged") => Self::Merged,
            Some("open") => Self::Open,
            Some("closed") => Self::Closed,
            _ => Self::Other,
        }
    }

    pub const fn status_class(self) -> &'static str {
        match self {
            Self::Merged => "status-merged",
            Self::Open => "status-open",
            Self::Closed => "status-closed",
            Self::Other => "status-default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    #[serde(default, deserialize_with = "lenient::de_opt_i64")]
    pub number: Option<i64>,
    #[serde(default, deserialize_with = "lenient::de_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::de_opt_string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::de_opt_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::de_list")]
    pub reviewers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::de_opt_string")]
    pub reviewers_text: Option<String>,
    #[serde(default, deserialize_with = "lenient::de_bool")]
    pub has_reviewers: bool,
}

impl PullRequest {
    pub fn status(&self) -> PrStatus {
        PrStatus::parse(self.state.as_deref())
    }

    pub fn status_class(&self) -> &'static str {
        self.status().status_class()
    }

    pub fn approvers_text(&self) -> &str {
        self.reviewers_text.as_deref().unwrap_or("No reviewers")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestStats {
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub total_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub open_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub merged_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub closed_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64", rename = "prodPRsCount")]
    pub prod_prs_count: i64,
    #[serde(default, deserialize_with = "lenient::de_opt_string")]
    pub last_sync_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub total_repo_records: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub unique_contributors: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PullRequests {
    pub prs: Vec<PullRequest>,
    pub stats: PullRequestStats,
}

impl PullRequests {
    /// Reads `pullRequests` and `statistics` from a sync result.
    pub fn from_value(value: &Value) -> Self {
        Self {
            prs: lenient::list(value.get("pullRequests")),
            stats: value
                .get("statistics")
                .and_then(|stats| PullRequestStats::deserialize(stats).ok())
                .unwrap_or_default(),
        }
    }

    pub fn displayed(&self, show_all: bool) -> &[PullRequest] {
        if show_all {
            &self.prs
        } else {
            &self.prs[..self.prs.len().min(COLLAPSED_ROWS)]
        }
    }

    pub fn has_more(&self) -> bool {
        self.prs.len() > COLLAPSED_ROWS
    }

    pub fn has_data(&self) -> bool {
        self.stats.total_count > 0
    }

    pub fn toggle_label(&self, show_all: bool) -> String {
        if show_all {
            "Show Less".to_owned()
        } else {
            format!("Show All ({})", self.stats.total_count)
        }
    }

    pub fn formatted_last_sync(&self, decorator: &Decorator) -> String {
        match self.stats.last_sync_date.as_deref() {
            None => "Never".to_owned(),
            Some(raw) if parse_instant(raw).is_none() => "Unknown".to_owned(),
            Some(raw) => decorator.format_timestamp(Some(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PrStatus, PullRequests};
    use crate::decorate::Decorator;
    use serde_json::{Value, json};

    fn sync_result(count: usize) -> Value {
        let prs: Vec<Value> = (1..=count)
            .map(|number| {
                json!({
                    "number": number,
                    "title": format!("PR {number}"),
                    "state": if number % 2 == 0 { "MERGED" } else { "open" }
                })
            })
            .collect();
        json!({
            "pullRequests": prs,
            "statistics": {"totalCount": count, "lastSyncDate": "2024-01-05T10:00:00Z"}
        })
    }

    #[test]
    fn collapsed_view_shows_five() {
        let pulls = PullRequests::from_value(&sync_result(7));
        assert_eq!(pulls.displayed(false).len(), 5);
        assert_eq!(pulls.displayed(true).len(), 7);
        assert!(pulls.has_more());
        assert_eq!(pulls.toggle_label(false), "Show All (7)");
        assert_eq!(pulls.toggle_label(true), "Show Less");

        let few = PullRequests::from_value(&sync_result(3));
        assert_eq!(few.displayed(false).len(), 3);
        assert!(!few.has_more());
    }

    #[test]
    fn status_classes_ignore_case() {
        let pulls = PullRequests::from_value(&sync_result(2));
        let classes: Vec<_> = pulls.prs.iter().map(|pr| pr.status_class()).collect();
        assert_eq!(classes, vec!["status-open", "status-merged"]);
        assert_eq!(PrStatus::parse(Some("draft")).status_class(), "status-default");
        assert_eq!(PrStatus::parse(None), PrStatus::Other);
        assert_eq!(pulls.prs[0].approvers_text(), "No reviewers");
    }

    #[test]
    fn last_sync_reads_never_and_unknown() {
        let decorator = Decorator::default();
        let pulls = PullRequests::from_value(&sync_result(1));
        assert_eq!(pulls.formatted_last_sync(&decorator), "Jan 5, 2024, 10:00 AM");

        let empty = PullRequests::from_value(&json!({}));
        assert_eq!(empty.formatted_last_sync(&decorator), "Never");
        assert!(!empty.has_data());

        let garbled = PullRequests::from_value(&json!({"statistics": {"lastSyncDate": "soon"}}));
        assert_eq!(garbled.formatted_last_sync(&decorator), "Unknown");
    }
}
