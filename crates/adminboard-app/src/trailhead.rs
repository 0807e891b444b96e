// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecommendedModule {
    #[serde(default, deserialize_with = "lenient::de_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::de_opt_string")]
    pub url: Option<String>,
}

/// Learning progress for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trailhead {
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub points: i64,
    #[serde(default, deserialize_with = "lenient::de_opt_string")]
    pub ranger_level: Option<String>,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub superbadges_completed: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub badges: i64,
    #[serde(default, deserialize_with = "lenient::de_list")]
    pub recommended_modules: Vec<RecommendedModule>,
}

impl Trailhead {
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    pub fn rank(&self) -> &str {
        self.ranger_level.as_deref().unwrap_or("Unranked")
    }
}
