// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::debug;

use crate::access::{Permissions, UserInfo};
use crate::coverage::CodeCoverage;
use crate::findings::CodeScan;
use crate::full_list::{PageRequest, PageResult};
use crate::ids::{RequestId, RequestIds};
use crate::jobs::JobBoard;
use crate::load::{Dataset, FailurePolicy, LoadState};
use crate::pulls::PullRequests;
use crate::record::ScheduledJobsPayload;
use crate::trailhead::Trailhead;
use crate::usage::ApiUsage;
use crate::view::{ViewCommand, ViewEvent};

/// Where dashboard data comes from. Each call is one independent request.
pub trait DashboardSource {
    fn fetch_scheduled_jobs(&mut self) -> Result<ScheduledJobsPayload>;
    fn fetch_page(&mut self, request: &PageRequest) -> Result<PageResult>;
    fn fetch_api_usage(&mut self) -> Result<ApiUsage>;
    fn fetch_code_coverage(&mut self) -> Result<CodeCoverage>;
    fn fetch_permissions(&mut self) -> Result<Permissions>;
    fn fetch_user(&mut self) -> Result<UserInfo>;
    fn fetch_pull_requests(&mut self) -> Result<PullRequests>;
    fn fetch_code_scan(&mut self) -> Result<CodeScan>;
    fn fetch_trailhead(&mut self) -> Result<Trailhead>;
}

/// The dashboard's datasets. Each loads and fails on its own. A failure
/// keeps whatever was shown before, except Trailhead progress, which is
/// cleared.
#[derive(Debug, Clone)]
pub struct Dashboard {
    board: JobBoard,
    jobs: Dataset<ScheduledJobsPayload>,
    api_usage: Dataset<ApiUsage>,
    coverage: Dataset<CodeCoverage>,
    permissions: Dataset<Permissions>,
    user: Dataset<UserInfo>,
    pull_requests: Dataset<PullRequests>,
    code_scan: Dataset<CodeScan>,
    trailhead: Dataset<Trailhead>,
    ids: RequestIds,
}

impl Dashboard {
    pub fn new(board: JobBoard) -> Self {
        Self {
            board,
            jobs: Dataset::new("scheduled jobs", FailurePolicy::RetainLastKnown),
            api_usage: Dataset::new("api usage", FailurePolicy::RetainLastKnown),
            coverage: Dataset::new("code coverage", FailurePolicy::RetainLastKnown),
            permissions: Dataset::new("permissions", FailurePolicy::RetainLastKnown),
            user: Dataset::new("user", FailurePolicy::RetainLastKnown),
            pull_requests: Dataset::new("pull requests", FailurePolicy::RetainLastKnown),
            code_scan: Dataset::new("code analysis", FailurePolicy::RetainLastKnown),
            trailhead: Dataset::new("trailhead", FailurePolicy::Clear),
            ids: RequestIds::default(),
        }
    }

    pub fn board(&self) -> &JobBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut JobBoard {
        &mut self.board
    }

    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        self.board.dispatch(command)
    }

    pub fn begin_jobs(&mut self) -> RequestId {
        let request = self.ids.next_id();
        self.jobs.begin(request);
        request
    }

    /// A successful payload replaces the board's data. A failure leaves
    /// the board as it was.
    pub fn complete_jobs(
        &mut self,
        request: RequestId,
        result: Result<ScheduledJobsPayload>,
    ) -> &LoadState {
        if self.jobs.complete(request, result) == &LoadState::Loaded
            && let Some(payload) = self.jobs.value()
        {
            self.board.apply_payload(payload);
        }
        self.jobs.state()
    }

    pub fn refresh_jobs(&mut self, source: &mut dyn DashboardSource) {
        let request = self.begin_jobs();
        let result = source.fetch_scheduled_jobs();
        self.complete_jobs(request, result);
    }

    /// Runs every fetch as its own request.
    pub fn refresh_all(&mut self, source: &mut dyn DashboardSource) {
        debug!("refreshing dashboard");
        self.refresh_jobs(source);

        let request = self.ids.next_id();
        self.api_usage.begin(request);
        self.api_usage.complete(request, source.fetch_api_usage());

        let request = self.ids.next_id();
        self.coverage.begin(request);
        self.coverage.complete(request, source.fetch_code_coverage());

        let request = self.ids.next_id();
        self.permissions.begin(request);
        self.permissions
            .complete(request, source.fetch_permissions());

        let request = self.ids.next_id();
        self.user.begin(request);
        self.user.complete(request, source.fetch_user());

        let request = self.ids.next_id();
        self.pull_requests.begin(request);
        self.pull_requests
            .complete(request, source.fetch_pull_requests());

        let request = self.ids.next_id();
        self.code_scan.begin(request);
        self.code_scan.complete(request, source.fetch_code_scan());

        let request = self.ids.next_id();
        self.trailhead.begin(request);
        self.trailhead.complete(request, source.fetch_trailhead());
    }

    pub fn jobs(&self) -> &Dataset<ScheduledJobsPayload> {
        &self.jobs
    }

    pub fn api_usage(&self) -> &Dataset<ApiUsage> {
        &self.api_usage
    }

    pub fn coverage(&self) -> &Dataset<CodeCoverage> {
        &self.coverage
    }

    pub fn permissions(&self) -> &Dataset<Permissions> {
        &self.permissions
    }

    pub fn user(&self) -> &Dataset<UserInfo> {
        &self.user
    }

    pub fn pull_requests(&self) -> &Dataset<PullRequests> {
        &self.pull_requests
    }

    pub fn code_scan(&self) -> &Dataset<CodeScan> {
        &self.code_scan
    }

    pub fn trailhead(&self) -> &Dataset<Trailhead> {
        &self.trailhead
    }

    pub fn is_loading(&self) -> bool {
        self.jobs.is_loading()
            || self.api_usage.is_loading()
            || self.coverage.is_loading()
            || self.permissions.is_loading()
            || self.user.is_loading()
            || self.pull_requests.is_loading()
            || self.code_scan.is_loading()
            || self.trailhead.is_loading()
    }

    /// `(dataset, message)` for every dataset whose last load failed.
    pub fn errors(&self) -> Vec<(&'static str, &str)> {
        [
            (self.jobs.name(), self.jobs.error_text()),
            (self.api_usage.name(), self.api_usage.error_text()),
            (self.coverage.name(), self.coverage.error_text()),
            (self.permissions.name(), self.permissions.error_text()),
            (self.user.name(), self.user.error_text()),
            (self.pull_requests.name(), self.pull_requests.error_text()),
            (self.code_scan.name(), self.code_scan.error_text()),
            (self.trailhead.name(), self.trailhead.error_text()),
        ]
        .into_iter()
        .filter_map(|(name, error)| error.map(|error| (name, error)))
        .collect()
    }
}
