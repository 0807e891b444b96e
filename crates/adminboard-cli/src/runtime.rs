// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use adminboard_app::{
    ApiUsage, CodeCoverage, CodeScan, DashboardSource, JobRecord, ListKind, PageCursor,
    PageRequest, PageResult, Permissions, PullRequests, ScheduledJobsPayload, Trailhead, UserInfo,
    paginate,
};
use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serves dashboard data from one JSON document. The document is either a
/// bare scheduled-jobs payload or an object with `scheduledJobs`,
/// `apiUsage`, `codeCoverage`, `permissions`, `user`, `github`,
/// `codeAnalysis` and `trailhead` sections.
pub struct FileSource {
    origin: String,
    payload: Value,
}

impl FileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read payload file {}", path.display()))?;
        let payload: Value = serde_json::from_str(&raw)
            .with_context(|| format!("parse JSON payload {}", path.display()))?;
        if !payload.is_object() {
            bail!(
                "payload {} must be a JSON object with scheduled job lists",
                path.display()
            );
        }
        debug!(path = %path.display(), "loaded payload file");
        Ok(Self {
            origin: path.display().to_string(),
            payload,
        })
    }

    pub fn demo() -> Self {
        Self {
            origin: "demo data".to_owned(),
            payload: adminboard_testkit::demo_payload(),
        }
    }

    pub fn from_value(origin: impl Into<String>, payload: Value) -> Self {
        Self {
            origin: origin.into(),
            payload,
        }
    }

    pub fn resolve(payload: Option<PathBuf>, demo: bool) -> Result<Self> {
        if demo {
            return Ok(Self::demo());
        }
        let path = payload.ok_or_else(|| {
            anyhow!(
                "no payload to show; pass --payload <file>, set [source].payload_path, or run with --demo"
            )
        })?;
        Self::open(&path)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    fn section(&self, key: &str) -> Result<&Value> {
        self.payload
            .get(key)
            .ok_or_else(|| anyhow!("{} has no {key:?} section", self.origin))
    }

    fn scheduled_jobs(&self) -> ScheduledJobsPayload {
        let value = self.payload.get("scheduledJobs").unwrap_or(&self.payload);
        ScheduledJobsPayload::from_value(value)
    }
}

impl DashboardSource for FileSource {
    fn fetch_scheduled_jobs(&mut self) -> Result<ScheduledJobsPayload> {
        Ok(self.scheduled_jobs())
    }

    /// Slices the matching list in memory, the way the paged endpoint
    /// would on the server.
    fn fetch_page(&mut self, request: &PageRequest) -> Result<PageResult> {
        let payload = self.scheduled_jobs();
        let records: &[JobRecord] = match &request.kind {
            ListKind::MyScheduledJobs => &payload.my_jobs,
            ListKind::UpcomingScheduledJobs => &payload.upcoming_jobs,
            ListKind::SucceededScheduledJobs => &payload.succeeded_jobs,
            ListKind::FailedScheduledJobs => &payload.failed_jobs,
            ListKind::Unsupported(_) => bail!(request.kind.unsupported_message()),
        };
        let page = paginate(
            records,
            PageCursor {
                number: request.page_number,
                size: request.page_size,
            },
        );
        Ok(PageResult {
            records: page.records,
            page_number: page.page_number,
            page_size: page.page_size,
            total_records: page.total_records,
            total_pages: page.total_pages,
        })
    }

    fn fetch_api_usage(&mut self) -> Result<ApiUsage> {
        self.section("apiUsage").map(ApiUsage::from_value)
    }

    fn fetch_code_coverage(&mut self) -> Result<CodeCoverage> {
        self.section("codeCoverage").map(CodeCoverage::from_value)
    }

    fn fetch_permissions(&mut self) -> Result<Permissions> {
        self.section("permissions").map(Permissions::from_value)
    }

    fn fetch_user(&mut self) -> Result<UserInfo> {
        self.section("user").map(UserInfo::from_value)
    }

    fn fetch_pull_requests(&mut self) -> Result<PullRequests> {
        self.section("github").map(PullRequests::from_value)
    }

    fn fetch_code_scan(&mut self) -> Result<CodeScan> {
        self.section("codeAnalysis").map(CodeScan::from_value)
    }

    fn fetch_trailhead(&mut self) -> Result<Trailhead> {
        self.section("trailhead").map(Trailhead::from_value)
    }
}
