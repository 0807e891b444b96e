// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use adminboard_app::{
    BucketKey, BucketRule, ClassificationRules, DEFAULT_PAGE_SIZE, SortDirection, SortField,
    SortSpec, StateMatcher,
};
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::UtcOffset;
use time::macros::format_description;

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "adminboard";
const MAX_PAGE_SIZE: usize = 200;
pub const CONFIG_PATH_ENV: &str = "ADMINBOARD_CONFIG_PATH";
pub const PAYLOAD_PATH_ENV: &str = "ADMINBOARD_PAYLOAD_PATH";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub display: Display,
    #[serde(default)]
    pub paging: Paging,
    #[serde(default)]
    pub buckets: Vec<BucketConfig>,
    #[serde(default)]
    pub source: Source,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display: Display::default(),
            paging: Paging::default(),
            buckets: Vec::new(),
            source: Source::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Display {
    pub utc_offset: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    pub page_size: Option<usize>,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

/// One `[[buckets]]` entry. Order in the file is tab order.
#[derive(Debug, Clone, Deserialize)]
pub struct BucketConfig {
    pub key: String,
    pub label: Option<String>,
    pub states: Vec<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Source {
    pub payload_path: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [display], [paging], [[buckets]], and [source]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        self.utc_offset()
            .with_context(|| format!("invalid [display] in {}", path.display()))?;

        if let Some(size) = self.paging.page_size
            && !(1..=MAX_PAGE_SIZE).contains(&size)
        {
            bail!(
                "paging.page_size in {} must be between 1 and {MAX_PAGE_SIZE}, got {size}",
                path.display()
            );
        }

        self.classification_rules()
            .with_context(|| format!("invalid [[buckets]] in {}", path.display()))?;

        if let Some(payload) = &self.source.payload_path
            && payload.trim().is_empty()
        {
            bail!(
                "source.payload_path in {} is empty; remove it or point it at a JSON file",
                path.display()
            );
        }

        Ok(())
    }

    /// Offset used for every displayed time. Accepts `UTC`, `Z`, or `+HH:MM`.
    pub fn utc_offset(&self) -> Result<UtcOffset> {
        let Some(raw) = self.display.utc_offset.as_deref().map(str::trim) else {
            return Ok(UtcOffset::UTC);
        };
        if raw.eq_ignore_ascii_case("utc") || raw.eq_ignore_ascii_case("z") {
            return Ok(UtcOffset::UTC);
        }
        UtcOffset::parse(
            raw,
            format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
        )
        .with_context(|| format!("display.utc_offset {raw:?} is not an offset like +05:30"))
    }

    pub fn page_size(&self) -> usize {
        self.paging.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Bucket rules from the file, or the built-in scheduled-job rules when
    /// none are configured. The "unknown" bucket is always appended.
    pub fn classification_rules(&self) -> Result<ClassificationRules> {
        if self.buckets.is_empty() {
            return Ok(ClassificationRules::scheduled_jobs());
        }

        let mut seen = BTreeSet::new();
        let mut rules = Vec::with_capacity(self.buckets.len());
        for bucket in &self.buckets {
            let key = bucket.key.trim();
            if key.is_empty() {
                bail!("bucket key must not be empty");
            }
            if key == BucketKey::UNKNOWN {
                bail!("bucket key {key:?} is reserved for unmatched states");
            }
            if !seen.insert(key.to_owned()) {
                bail!("bucket key {key:?} appears more than once");
            }
            if bucket.states.iter().all(|state| state.trim().is_empty()) {
                bail!("bucket {key:?} needs at least one state");
            }

            let field = match bucket.sort_field.as_deref() {
                Some(raw) => SortField::parse(raw).ok_or_else(|| {
                    anyhow!(
                        "bucket {key:?} has unknown sort_field {raw:?}; use one of {}",
                        sort_field_names()
                    )
                })?,
                None => SortField::NextFireTime,
            };
            let direction = match bucket.sort_direction.as_deref() {
                Some(raw) => SortDirection::parse(raw).ok_or_else(|| {
                    anyhow!("bucket {key:?} has sort_direction {raw:?}; use asc or desc")
                })?,
                None => SortDirection::Asc,
            };

            rules.push(BucketRule::new(
                key,
                bucket.label.clone().unwrap_or_else(|| key.to_owned()),
                StateMatcher::any_of(&bucket.states),
                SortSpec::new(field, direction),
            ));
        }
        Ok(ClassificationRules::new(rules, BucketRule::unknown()))
    }

    /// `[source].payload_path`, then `ADMINBOARD_PAYLOAD_PATH`.
    pub fn payload_path(&self) -> Option<PathBuf> {
        self.source
            .payload_path
            .as_ref()
            .map(PathBuf::from)
            .or_else(|| env::var_os(PAYLOAD_PATH_ENV).map(PathBuf::from))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# adminboard config\n# Place this file at: {}\n\nversion = 1\n\n[display]\n# Offset for displayed times: \"UTC\" or +HH:MM\nutc_offset = \"UTC\"\n\n[paging]\npage_size = {DEFAULT_PAGE_SIZE}\n\n# Optional. Without any [[buckets]] the built-in upcoming/succeeded/failed\n# split is used. States match case-insensitively; the first match wins.\n# [[buckets]]\n# key = \"upcoming\"\n# label = \"Upcoming\"\n# states = [\"WAITING\", \"ACQUIRED\", \"EXECUTING\"]\n# sort_field = \"NextFireTime\"\n# sort_direction = \"asc\"\n\n[source]\n# payload_path = \"/absolute/path/to/dashboard.json\"\n",
            path.display(),
        )
    }
}

fn sort_field_names() -> String {
    SortField::ALL
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
