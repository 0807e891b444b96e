// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::bucket::Buckets;
use crate::decorate::DecoratedJob;
use crate::ids::BucketKey;
use crate::page::{PageCursor, PageView, paginate, total_pages};
use crate::sort::{SortField, SortSpec, sort_records};

/// How one list widget behaves. The dashboard summary, the jobs card and
/// the full list page differ only in these knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewConfig {
    /// Switching bucket restores that bucket's default sort.
    pub reset_sort_on_bucket_change: bool,
    pub page_size: Option<usize>,
}

impl ListViewConfig {
    pub const fn summary() -> Self {
        Self {
            reset_sort_on_bucket_change: false,
            page_size: None,
        }
    }

    pub const fn card() -> Self {
        Self {
            reset_sort_on_bucket_change: true,
            page_size: None,
        }
    }

    pub const fn paged(page_size: usize) -> Self {
        Self {
            reset_sort_on_bucket_change: true,
            page_size: Some(page_size),
        }
    }

    fn cursor(self) -> PageCursor {
        match self.page_size {
            Some(size) if size > 0 => PageCursor::first(size),
            _ => PageCursor::unpaged(),
        }
    }
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self::card()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_bucket: BucketKey,
    pub sort: SortSpec,
    pub page: PageCursor,
}

impl ViewState {
    fn initial(buckets: &Buckets, config: ListViewConfig) -> Self {
        let first = buckets.iter().next();
        Self {
            active_bucket: first
                .map(|bucket| bucket.key.clone())
                .unwrap_or_else(BucketKey::upcoming),
            sort: first.map(|bucket| bucket.default_sort).unwrap_or_default(),
            page: config.cursor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    SelectBucket(BucketKey),
    SortBy(SortField),
    NextPage,
    PreviousPage,
    Reset,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    UnknownBucket(String),
    FirstPage,
    LastPage,
}

impl ViewStatus {
    pub fn message(&self) -> String {
        match self {
            Self::UnknownBucket(key) => format!("no bucket named {key:?}"),
            Self::FirstPage => "already on the first page".to_owned(),
            Self::LastPage => "already on the last page".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    BucketChanged(BucketKey),
    SortChanged(SortSpec),
    PageChanged(usize),
    /// Asks the data collaborator to fetch again. Carries nothing.
    RefreshRequested,
    Status(ViewStatus),
}

/// A bucketed, sortable, optionally paged list. Buckets are decorated once
/// per data refresh; every state change only re-runs the projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListView {
    config: ListViewConfig,
    buckets: Buckets,
    state: ViewState,
}

impl JobListView {
    pub fn new(buckets: Buckets, config: ListViewConfig) -> Self {
        let state = ViewState::initial(&buckets, config);
        Self {
            config,
            buckets,
            state,
        }
    }

    pub fn config(&self) -> ListViewConfig {
        self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        debug!(?command, "list view command");
        match command {
            ViewCommand::SelectBucket(key) => self.select_bucket(key),
            ViewCommand::SortBy(field) => {
                self.state.sort = self.state.sort.toggle(field);
                self.state.page.rewind();
                vec![ViewEvent::SortChanged(self.state.sort)]
            }
            ViewCommand::NextPage => {
                let total = self.total_pages();
                if self.state.page.advance(total) {
                    vec![ViewEvent::PageChanged(self.state.page.number)]
                } else {
                    vec![ViewEvent::Status(ViewStatus::LastPage)]
                }
            }
            ViewCommand::PreviousPage => {
                if self.state.page.retreat() {
                    vec![ViewEvent::PageChanged(self.state.page.number)]
                } else {
                    vec![ViewEvent::Status(ViewStatus::FirstPage)]
                }
            }
            ViewCommand::Reset => self.reset(),
            ViewCommand::Refresh => vec![ViewEvent::RefreshRequested],
        }
    }

    fn select_bucket(&mut self, key: BucketKey) -> Vec<ViewEvent> {
        let Some(bucket) = self.buckets.get(&key) else {
            return vec![ViewEvent::Status(ViewStatus::UnknownBucket(
                key.as_str().to_owned(),
            ))];
        };

        let mut events = vec![ViewEvent::BucketChanged(key.clone())];
        if self.config.reset_sort_on_bucket_change {
            self.state.sort = bucket.default_sort;
            events.push(ViewEvent::SortChanged(self.state.sort));
        }
        self.state.active_bucket = key;
        self.state.page.rewind();
        events
    }

    fn reset(&mut self) -> Vec<ViewEvent> {
        let previous_sort = self.state.sort;
        let mut next = ViewState::initial(&self.buckets, self.config);
        if !self.config.reset_sort_on_bucket_change {
            next.sort = previous_sort;
        }
        self.state = next;

        let mut events = vec![ViewEvent::BucketChanged(self.state.active_bucket.clone())];
        if self.state.sort != previous_sort {
            events.push(ViewEvent::SortChanged(self.state.sort));
        }
        events
    }

    /// Swaps in freshly decorated data. The active bucket survives when the
    /// new data still has it; otherwise the view falls back to the first
    /// bucket and page 1.
    pub fn replace_buckets(&mut self, buckets: Buckets) {
        self.buckets = buckets;
        if self.buckets.contains(&self.state.active_bucket) {
            let total = self.total_pages();
            self.state.page.clamp(total);
        } else {
            let sort = self.state.sort;
            self.state = ViewState::initial(&self.buckets, self.config);
            if !self.config.reset_sort_on_bucket_change {
                self.state.sort = sort;
            }
        }
    }

    pub fn active_records(&self) -> &[DecoratedJob] {
        self.buckets.records(&self.state.active_bucket)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.active_records().len(), self.state.page.size)
    }

    pub fn projection(&self) -> PageView<DecoratedJob> {
        let sorted = sort_records(self.active_records(), self.state.sort);
        paginate(&sorted, self.state.page)
    }

    pub fn count(&self, key: &BucketKey) -> usize {
        self.buckets.count(key)
    }

    pub fn is_active(&self, key: &BucketKey) -> bool {
        &self.state.active_bucket == key
    }

    pub fn tab_class(&self, key: &BucketKey) -> &'static str {
        if self.is_active(key) { "tab active" } else { "tab" }
    }

    pub fn is_sorted_by(&self, field: SortField) -> bool {
        self.state.sort.field == field
    }

    pub fn sort_icon(&self, field: SortField) -> Option<&'static str> {
        self.is_sorted_by(field)
            .then(|| self.state.sort.direction.icon())
    }

    pub fn is_previous_disabled(&self) -> bool {
        self.state.page.number <= 1
    }

    pub fn is_next_disabled(&self) -> bool {
        self.state.page.number >= self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::{JobListView, ListViewConfig, ViewCommand, ViewEvent, ViewStatus};
    use crate::bucket::{ClassificationRules, bucketize};
    use crate::decorate::{DecoratedJob, decorate};
    use crate::ids::BucketKey;
    use crate::model::SortDirection;
    use crate::record::JobRecord;
    use crate::sort::{SortField, SortSpec};

    fn job(name: &str, state: &str, next: &str, previous: &str) -> DecoratedJob {
        decorate(&JobRecord {
            name: Some(name.to_owned()),
            state: Some(state.to_owned()),
            next_fire_time: Some(next.to_owned()),
            previous_fire_time: Some(previous.to_owned()),
            ..JobRecord::default()
        })
    }

    fn sample() -> Vec<DecoratedJob> {
        vec![
            job("later", "WAITING", "2024-03-01", "2024-01-01"),
            job("sooner", "WAITING", "2024-02-01", "2024-01-02"),
            job("old win", "COMPLETE", "", "2024-01-01"),
            job("new win", "COMPLETE", "", "2024-02-01"),
            job("boom", "ERROR", "", "2024-01-15"),
        ]
    }

    fn view(config: ListViewConfig) -> JobListView {
        JobListView::new(
            bucketize(&sample(), &ClassificationRules::scheduled_jobs()),
            config,
        )
    }

    fn names(view: &JobListView) -> Vec<String> {
        view.projection()
            .records
            .into_iter()
            .filter_map(|job| job.record.name)
            .collect()
    }

    #[test]
    fn starts_on_first_bucket_with_its_default_sort() {
        let view = view(ListViewConfig::card());
        assert_eq!(view.state().active_bucket, BucketKey::upcoming());
        assert_eq!(view.state().sort, SortSpec::ascending(SortField::NextFireTime));
        assert_eq!(names(&view), vec!["sooner", "later"]);
    }

    #[test]
    fn card_switch_restores_time_descending_default() {
        let mut view = view(ListViewConfig::card());
        let events = view.dispatch(ViewCommand::SelectBucket(BucketKey::succeeded()));
        assert_eq!(
            events,
            vec![
                ViewEvent::BucketChanged(BucketKey::succeeded()),
                ViewEvent::SortChanged(SortSpec::descending(SortField::PreviousFireTime)),
            ]
        );
        assert_eq!(names(&view), vec!["new win", "old win"]);
    }

    #[test]
    fn summary_switch_keeps_current_sort() {
        let mut view = view(ListViewConfig::summary());
        view.dispatch(ViewCommand::SortBy(SortField::JobName));
        let events = view.dispatch(ViewCommand::SelectBucket(BucketKey::succeeded()));
        assert_eq!(events, vec![ViewEvent::BucketChanged(BucketKey::succeeded())]);
        assert_eq!(view.state().sort, SortSpec::ascending(SortField::JobName));
        assert_eq!(names(&view), vec!["new win", "old win"]);
    }

    #[test]
    fn sorting_same_field_twice_returns_to_ascending() {
        let mut view = view(ListViewConfig::card());
        view.dispatch(ViewCommand::SortBy(SortField::JobName));
        assert_eq!(view.state().sort.direction, SortDirection::Asc);
        view.dispatch(ViewCommand::SortBy(SortField::JobName));
        assert_eq!(view.state().sort.direction, SortDirection::Desc);
        assert_eq!(view.sort_icon(SortField::JobName), Some("utility:arrowdown"));
        view.dispatch(ViewCommand::SortBy(SortField::JobName));
        assert_eq!(view.state().sort.direction, SortDirection::Asc);
        assert_eq!(names(&view), vec!["later", "sooner"]);
        assert_eq!(view.sort_icon(SortField::State), None);
    }

    #[test]
    fn unknown_bucket_is_reported_and_ignored() {
        let mut view = view(ListViewConfig::card());
        let events = view.dispatch(ViewCommand::SelectBucket(BucketKey::from("archived")));
        assert_eq!(
            events,
            vec![ViewEvent::Status(ViewStatus::UnknownBucket(
                "archived".to_owned()
            ))]
        );
        assert_eq!(view.state().active_bucket, BucketKey::upcoming());
    }

    #[test]
    fn paging_stops_at_bounds_and_bucket_switch_rewinds() {
        let mut view = view(ListViewConfig::paged(1));
        assert_eq!(view.total_pages(), 2);
        assert!(view.is_previous_disabled());

        assert_eq!(
            view.dispatch(ViewCommand::PreviousPage),
            vec![ViewEvent::Status(ViewStatus::FirstPage)]
        );
        assert_eq!(
            view.dispatch(ViewCommand::NextPage),
            vec![ViewEvent::PageChanged(2)]
        );
        assert!(view.is_next_disabled());
        assert_eq!(
            view.dispatch(ViewCommand::NextPage),
            vec![ViewEvent::Status(ViewStatus::LastPage)]
        );
        assert_eq!(view.state().page.number, 2);
        assert_eq!(names(&view), vec!["later"]);

        view.dispatch(ViewCommand::SelectBucket(BucketKey::failed()));
        assert_eq!(view.state().page.number, 1);
    }

    #[test]
    fn refresh_only_emits_a_request() {
        let mut view = view(ListViewConfig::card());
        let before = view.clone();
        assert_eq!(
            view.dispatch(ViewCommand::Refresh),
            vec![ViewEvent::RefreshRequested]
        );
        assert_eq!(view, before);
    }

    #[test]
    fn replacing_data_keeps_active_bucket_when_present() {
        let mut view = view(ListViewConfig::paged(1));
        view.dispatch(ViewCommand::NextPage);
        view.replace_buckets(bucketize(
            &sample()[..1],
            &ClassificationRules::scheduled_jobs(),
        ));
        assert_eq!(view.state().active_bucket, BucketKey::upcoming());
        assert_eq!(view.state().page.number, 1);
        assert_eq!(names(&view), vec!["later"]);
    }

    #[test]
    fn tab_classes_mark_only_the_active_bucket() {
        let view = view(ListViewConfig::card());
        assert_eq!(view.tab_class(&BucketKey::upcoming()), "tab active");
        assert_eq!(view.tab_class(&BucketKey::failed()), "tab");
        assert_eq!(view.count(&BucketKey::succeeded()), 2);
    }

    #[test]
    fn reset_returns_to_first_bucket() {
        let mut view = view(ListViewConfig::card());
        view.dispatch(ViewCommand::SelectBucket(BucketKey::failed()));
        view.dispatch(ViewCommand::Reset);
        assert_eq!(view.state().active_bucket, BucketKey::upcoming());
        assert_eq!(view.state().sort, SortSpec::ascending(SortField::NextFireTime));
    }
}
