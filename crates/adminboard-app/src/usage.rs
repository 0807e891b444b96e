// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

/// Daily API request allowance for the org.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiUsage {
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub limit: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub used: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub remaining: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UsageLevel {
    Good,
    Warning,
    Critical,
}

impl UsageLevel {
    pub fn from_percentage(percentage: i64) -> Self {
        if percentage > 90 {
            Self::Critical
        } else if percentage > 70 {
            Self::Warning
        } else {
            Self::Good
        }
    }

    pub const fn status_class(self) -> &'static str {
        match self {
            Self::Good => "usage-status good",
            Self::Warning => "usage-status warning",
            Self::Critical => "usage-status error",
        }
    }

    pub const fn status_text(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            Self::Good => "var(--success-color)",
            Self::Warning => "var(--warning-color)",
            Self::Critical => "var(--error-color)",
        }
    }
}

impl ApiUsage {
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    /// Rounded share of the limit used so far; 0 without a limit.
    pub fn percentage(&self) -> i64 {
        if self.limit == 0 {
            return 0;
        }
        (self.used as f64 / self.limit as f64 * 100.0).round() as i64
    }

    pub fn level(&self) -> UsageLevel {
        UsageLevel::from_percentage(self.percentage())
    }

    pub fn status_class(&self) -> &'static str {
        self.level().status_class()
    }

    pub fn status_text(&self) -> &'static str {
        self.level().status_text()
    }

    pub fn bar_style(&self) -> String {
        format!(
            "width: {}%; background-color: {};",
            self.percentage(),
            self.level().color()
        )
    }
}
