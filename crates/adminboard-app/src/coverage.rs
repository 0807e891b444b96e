// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::ClassId;
use crate::lenient;

pub const APEX_CLASSES_SETUP_LINK: &str = "/lightning/setup/ApexClasses/home";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApexClass {
    #[serde(rename = "Id", default)]
    pub id: Option<ClassId>,
    #[serde(rename = "Name", default, deserialize_with = "lenient::de_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::de_f64")]
    pub coverage: f64,
}

impl ApexClass {
    pub fn tier(&self) -> CoverageTier {
        CoverageTier::from_coverage(self.coverage)
    }

    pub fn bar_style(&self) -> String {
        format!(
            "width: {}%; background-color: {};",
            self.coverage,
            self.tier().color()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoverageTier {
    High,
    Medium,
    Low,
}

impl CoverageTier {
    pub fn from_coverage(coverage: f64) -> Self {
        if coverage >= 75.0 {
            Self::High
        } else if coverage >= 50.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::High => "var(--accent-green)",
            Self::Medium => "var(--accent-orange)",
            Self::Low => "var(--accent-red)",
        }
    }
}

/// Apex class coverage summary. Missing lists read as empty and missing
/// counts as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeCoverage {
    #[serde(default, deserialize_with = "lenient::de_list")]
    pub classes: Vec<ApexClass>,
    #[serde(default, deserialize_with = "lenient::de_list")]
    pub my_classes: Vec<ApexClass>,
    #[serde(default, deserialize_with = "lenient::de_list")]
    pub low_coverage_classes: Vec<ApexClass>,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub class_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub my_classes_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub low_coverage_count: i64,
    #[serde(default, deserialize_with = "lenient::de_bool")]
    pub can_view_details: bool,
}

impl CodeCoverage {
    /// `null` resets to the empty summary.
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}
