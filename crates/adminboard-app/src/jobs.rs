// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::bucket::{BucketRule, Buckets, ClassificationRules, bucketize};
use crate::decorate::{DecoratedJob, Decorator};
use crate::ids::BucketKey;
use crate::model::Section;
use crate::page::PageView;
use crate::record::ScheduledJobsPayload;
use crate::view::{JobListView, ListViewConfig, ViewCommand, ViewEvent};

/// The scheduled-jobs widget: system jobs the backend already split into
/// upcoming/succeeded/failed, plus the current user's jobs which are split
/// here with the classification rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobBoard {
    decorator: Decorator,
    rules: ClassificationRules,
    active_section: Section,
    running: JobListView,
    mine: JobListView,
}

impl JobBoard {
    pub fn new(decorator: Decorator, rules: ClassificationRules, config: ListViewConfig) -> Self {
        let running = JobListView::new(
            system_buckets(&rules, Vec::new(), Vec::new(), Vec::new()),
            config,
        );
        let mine = JobListView::new(bucketize(&[], &rules), config);
        Self {
            decorator,
            rules,
            active_section: Section::Running,
            running,
            mine,
        }
    }

    pub fn rules(&self) -> &ClassificationRules {
        &self.rules
    }

    /// Decorates the payload once and hands the result to both sections.
    pub fn apply_payload(&mut self, payload: &ScheduledJobsPayload) {
        debug!(
            system = payload.system_total(),
            mine = payload.my_jobs.len(),
            "applying scheduled jobs payload"
        );
        self.running.replace_buckets(system_buckets(
            &self.rules,
            self.decorator.decorate_all(&payload.upcoming_jobs),
            self.decorator.decorate_all(&payload.succeeded_jobs),
            self.decorator.decorate_all(&payload.failed_jobs),
        ));
        let mine = self.decorator.decorate_all(&payload.my_jobs);
        self.mine.replace_buckets(bucketize(&mine, &self.rules));
    }

    /// Back to the well-defined empty state.
    pub fn clear(&mut self) {
        self.apply_payload(&ScheduledJobsPayload::default());
    }

    /// Changing the rules rebuilds both sections from the records they
    /// already hold and puts each back on its first bucket and page.
    pub fn reclassify(&mut self, rules: ClassificationRules) {
        let running = self.running.buckets();
        let system = |key: BucketKey| running.records(&key).to_vec();
        let upcoming = system(BucketKey::upcoming());
        let succeeded = system(BucketKey::succeeded());
        let failed = system(BucketKey::failed());
        let mine: Vec<DecoratedJob> = self
            .mine
            .buckets()
            .iter()
            .flat_map(|bucket| bucket.records.iter().cloned())
            .collect();

        self.rules = rules;
        self.running
            .replace_buckets(system_buckets(&self.rules, upcoming, succeeded, failed));
        self.mine.replace_buckets(bucketize(&mine, &self.rules));
        self.running.dispatch(ViewCommand::Reset);
        self.mine.dispatch(ViewCommand::Reset);
    }

    pub fn decorator(&self) -> &Decorator {
        &self.decorator
    }

    pub fn active_section(&self) -> Section {
        self.active_section
    }

    /// Entering a section always lands on its first bucket.
    pub fn switch_section(&mut self, section: Section) -> Vec<ViewEvent> {
        self.active_section = section;
        self.view_mut(section).dispatch(ViewCommand::Reset)
    }

    /// Routes a command to the active section.
    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        let section = self.active_section;
        self.view_mut(section).dispatch(command)
    }

    pub fn view(&self, section: Section) -> &JobListView {
        match section {
            Section::Running => &self.running,
            Section::Mine => &self.mine,
        }
    }

    fn view_mut(&mut self, section: Section) -> &mut JobListView {
        match section {
            Section::Running => &mut self.running,
            Section::Mine => &mut self.mine,
        }
    }

    /// Only the active section renders rows.
    pub fn displayed(&self, section: Section) -> PageView<DecoratedJob> {
        if section == self.active_section {
            self.view(section).projection()
        } else {
            PageView::empty(0)
        }
    }

    pub fn count(&self, section: Section, key: &BucketKey) -> usize {
        self.view(section).count(key)
    }

    pub fn my_jobs_count(&self) -> usize {
        self.mine.buckets().total()
    }

    pub fn is_section_active(&self, section: Section) -> bool {
        self.active_section == section
    }

    pub fn section_class(&self, section: Section) -> &'static str {
        if self.is_section_active(section) {
            "section-tab active"
        } else {
            "section-tab"
        }
    }

    /// Tabs of an inactive section are never highlighted.
    pub fn tab_class(&self, section: Section, key: &BucketKey) -> &'static str {
        if self.is_section_active(section) {
            self.view(section).tab_class(key)
        } else {
            "tab"
        }
    }
}

/// Labels and default sorts come from the rules when they name the
/// backend's keys, else from the built-in rules.
fn system_buckets(
    rules: &ClassificationRules,
    upcoming: Vec<DecoratedJob>,
    succeeded: Vec<DecoratedJob>,
    failed: Vec<DecoratedJob>,
) -> Buckets {
    let rule_for = |key: BucketKey, default: fn() -> BucketRule| {
        rules.rule(&key).cloned().unwrap_or_else(default)
    };

    Buckets::from_partitions([
        (rule_for(BucketKey::upcoming(), BucketRule::upcoming), upcoming),
        (rule_for(BucketKey::succeeded(), BucketRule::succeeded), succeeded),
        (rule_for(BucketKey::failed(), BucketRule::failed), failed),
    ])
}
