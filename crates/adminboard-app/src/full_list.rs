// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::decorate::{DecoratedJob, Decorator};
use crate::ids::{RequestId, RequestIds};
use crate::lenient;
use crate::load::{Dataset, FailurePolicy, LoadState};
use crate::page::{DEFAULT_PAGE_SIZE, PageCursor, PageView};
use crate::record::{JobRecord, job_records};
use crate::sort::SortField;

/// Which list the full page shows, from its `c__listType` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ListKind {
    MyScheduledJobs,
    UpcomingScheduledJobs,
    SucceededScheduledJobs,
    FailedScheduledJobs,
    Unsupported(String),
}

impl ListKind {
    pub const SUPPORTED: [Self; 4] = [
        Self::MyScheduledJobs,
        Self::UpcomingScheduledJobs,
        Self::SucceededScheduledJobs,
        Self::FailedScheduledJobs,
    ];

    /// Exact match on the wire name; anything else is kept verbatim as
    /// unsupported.
    pub fn parse(value: &str) -> Self {
        Self::SUPPORTED
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .unwrap_or_else(|| Self::Unsupported(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::MyScheduledJobs => "myScheduledJobs",
            Self::UpcomingScheduledJobs => "upcomingScheduledJobs",
            Self::SucceededScheduledJobs => "succeededScheduledJobs",
            Self::FailedScheduledJobs => "failedScheduledJobs",
            Self::Unsupported(raw) => raw,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Backend state category for system lists. `None` for the user's own
    /// jobs, which are looked up by creator instead.
    pub fn job_state_category(&self) -> Option<&'static str> {
        match self {
            Self::UpcomingScheduledJobs => Some("upcoming"),
            Self::SucceededScheduledJobs => Some("succeeded"),
            Self::FailedScheduledJobs => Some("failed"),
            Self::MyScheduledJobs | Self::Unsupported(_) => None,
        }
    }

    pub fn unsupported_message(&self) -> String {
        format!(
            "Configuration error: List type \"{}\" is not supported.",
            self.as_str()
        )
    }
}

/// What a column shows. Serialized as the backend's field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColumnField {
    #[serde(rename = "CronJobDetailName")]
    JobName,
    #[serde(rename = "FormattedNextFireTime")]
    NextRun,
    #[serde(rename = "FormattedPreviousFireTime")]
    LastRun,
    #[serde(rename = "State")]
    State,
    #[serde(rename = "CreatedByName")]
    SubmittedBy,
    #[serde(rename = "Name")]
    Name,
}

impl ColumnField {
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::JobName => "CronJobDetailName",
            Self::NextRun => "FormattedNextFireTime",
            Self::LastRun => "FormattedPreviousFireTime",
            Self::State => "State",
            Self::SubmittedBy => "CreatedByName",
            Self::Name => "Name",
        }
    }

    pub fn cell(self, job: &DecoratedJob) -> &str {
        match self {
            Self::JobName | Self::Name => job.record.name.as_deref().unwrap_or_default(),
            Self::NextRun => &job.formatted_next_fire_time,
            Self::LastRun => &job.formatted_previous_fire_time,
            Self::State => job.record.state.as_deref().unwrap_or_default(),
            Self::SubmittedBy => job.record.created_by.as_deref().unwrap_or_default(),
        }
    }

    /// The sort that orders rows by this column, if any.
    pub const fn sort_field(self) -> Option<SortField> {
        match self {
            Self::JobName => Some(SortField::JobName),
            Self::NextRun => Some(SortField::NextFireTime),
            Self::LastRun => Some(SortField::PreviousFireTime),
            Self::State => Some(SortField::State),
            Self::SubmittedBy => Some(SortField::CreatedBy),
            Self::Name => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub label: &'static str,
    #[serde(rename = "fieldName")]
    pub field: ColumnField,
    pub width: Option<u16>,
}

impl ColumnSpec {
    const fn new(label: &'static str, field: ColumnField, width: Option<u16>) -> Self {
        Self {
            label,
            field,
            width,
        }
    }

    pub fn cell<'a>(&self, job: &'a DecoratedJob) -> &'a str {
        self.field.cell(job)
    }
}

const JOB_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::new("Job Name", ColumnField::JobName, Some(350)),
    ColumnSpec::new("Next Run", ColumnField::NextRun, Some(200)),
    ColumnSpec::new("Last Run", ColumnField::LastRun, Some(200)),
    ColumnSpec::new("State", ColumnField::State, Some(120)),
    ColumnSpec::new("Submitted By", ColumnField::SubmittedBy, Some(180)),
];

/// Columns shared by every job table.
pub fn job_columns() -> Vec<ColumnSpec> {
    JOB_COLUMNS.to_vec()
}

pub fn columns_for(kind: &ListKind) -> Vec<ColumnSpec> {
    if kind.is_supported() {
        job_columns()
    } else {
        vec![ColumnSpec::new("Name", ColumnField::Name, None)]
    }
}

/// A page fetch the caller should perform and then report back via
/// [`FullListPage::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub id: RequestId,
    pub kind: ListKind,
    pub page_number: usize,
    pub page_size: usize,
}

/// One server-side page. The paging numbers are the server's, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    pub records: Vec<JobRecord>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_records: usize,
    pub total_pages: usize,
}

impl PageResult {
    /// `null` or a non-object reads as an empty result.
    pub fn from_value(value: &Value) -> Self {
        let count = |key: &str| {
            lenient::number(value.get(key))
                .and_then(|number| usize::try_from(number).ok())
                .unwrap_or_default()
        };
        Self {
            records: job_records(value.get("records")),
            page_number: count("pageNumber").max(1),
            page_size: count("pageSize"),
            total_records: count("totalRecords"),
            total_pages: count("totalPages"),
        }
    }
}

/// The paginated full-list page. The server does the slicing; this tracks
/// which page is wanted and what came back.
#[derive(Debug, Clone)]
pub struct FullListPage {
    kind: ListKind,
    decorator: Decorator,
    cursor: PageCursor,
    data: Dataset<PageView<DecoratedJob>>,
    ids: RequestIds,
}

impl FullListPage {
    pub fn new(decorator: Decorator, page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            kind: ListKind::MyScheduledJobs,
            decorator,
            cursor: PageCursor::first(page_size),
            data: Dataset::new("full list", FailurePolicy::Clear),
            ids: RequestIds::default(),
        }
    }

    /// Switches to `kind` on page 1. Unsupported kinds settle immediately
    /// into an error with nothing to fetch.
    pub fn open(&mut self, kind: ListKind) -> Option<PageRequest> {
        debug!(list = kind.as_str(), "opening full list");
        self.kind = kind;
        self.cursor.rewind();
        if self.kind.is_supported() {
            return Some(self.request());
        }

        let id = self.ids.next_id();
        self.data.begin(id);
        self.data
            .complete(id, Err(anyhow!(self.kind.unsupported_message())));
        None
    }

    pub fn handle_next(&mut self) -> Option<PageRequest> {
        if self.is_next_disabled() {
            return None;
        }
        self.cursor.number += 1;
        Some(self.request())
    }

    pub fn handle_previous(&mut self) -> Option<PageRequest> {
        if self.is_previous_disabled() {
            return None;
        }
        self.cursor.number -= 1;
        Some(self.request())
    }

    /// Re-requests the current page.
    pub fn refresh(&mut self) -> Option<PageRequest> {
        self.kind.is_supported().then(|| self.request())
    }

    fn request(&mut self) -> PageRequest {
        let id = self.ids.next_id();
        self.data.begin(id);
        PageRequest {
            id,
            kind: self.kind.clone(),
            page_number: self.cursor.number,
            page_size: self.cursor.size,
        }
    }

    /// Success adopts the server's paging numbers. Failure empties the
    /// list and keeps the error text.
    pub fn apply(&mut self, request: RequestId, result: Result<PageResult>) -> &LoadState {
        let decorator = self.decorator;
        let result = result.map(|page| {
            self.cursor.number = page.page_number.max(1);
            if page.page_size > 0 {
                self.cursor.size = page.page_size;
            }
            PageView {
                records: decorator.decorate_all(&page.records),
                page_number: self.cursor.number,
                page_size: self.cursor.size,
                total_records: page.total_records,
                total_pages: page.total_pages,
            }
        });
        self.data.complete(request, result)
    }

    pub fn kind(&self) -> &ListKind {
        &self.kind
    }

    pub fn columns(&self) -> Vec<ColumnSpec> {
        columns_for(&self.kind)
    }

    pub fn page_number(&self) -> usize {
        self.cursor.number
    }

    pub fn page_size(&self) -> usize {
        self.cursor.size
    }

    /// The current page, or the empty page when nothing has loaded.
    pub fn page(&self) -> PageView<DecoratedJob> {
        self.data.value().cloned().unwrap_or_else(|| PageView {
            page_number: self.cursor.number,
            ..PageView::empty(self.cursor.size)
        })
    }

    pub fn records(&self) -> &[DecoratedJob] {
        self.data
            .value()
            .map(|page| page.records.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_records(&self) -> usize {
        self.data.value().map_or(0, |page| page.total_records)
    }

    pub fn total_pages(&self) -> usize {
        self.data.value().map_or(0, |page| page.total_pages)
    }

    pub fn state(&self) -> &LoadState {
        self.data.state()
    }

    pub fn is_loading(&self) -> bool {
        self.data.is_loading()
    }

    pub fn error_text(&self) -> Option<&str> {
        self.data.error_text()
    }

    pub fn has_records(&self) -> bool {
        !self.records().is_empty()
    }

    pub fn is_previous_disabled(&self) -> bool {
        self.is_loading() || self.cursor.number <= 1
    }

    pub fn is_next_disabled(&self) -> bool {
        self.is_loading() || self.cursor.number >= self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnField, FullListPage, ListKind, PageResult, columns_for, job_columns};
    use crate::sort::SortField;
    use crate::decorate::Decorator;
    use crate::load::LoadState;
    use anyhow::{Result, anyhow};
    use serde_json::json;

    fn result(page: usize, total_pages: usize) -> PageResult {
        PageResult::from_value(&json!({
            "records": [
                {"CronJobDetail": {"Name": format!("job {page}")}, "State": "WAITING",
                 "NextFireTime": "2024-01-05T10:00:00Z"}
            ],
            "pageNumber": page,
            "pageSize": 10,
            "totalRecords": total_pages * 10,
            "totalPages": total_pages
        }))
    }

    #[test]
    fn list_kind_parses_wire_names() {
        assert_eq!(
            ListKind::parse("failedScheduledJobs"),
            ListKind::FailedScheduledJobs
        );
        assert_eq!(
            ListKind::parse("bogus"),
            ListKind::Unsupported("bogus".to_owned())
        );
        assert_eq!(
            ListKind::UpcomingScheduledJobs.job_state_category(),
            Some("upcoming")
        );
        assert_eq!(ListKind::MyScheduledJobs.job_state_category(), None);
    }

    #[test]
    fn job_lists_share_the_five_columns() {
        let labels: Vec<_> = columns_for(&ListKind::MyScheduledJobs)
            .iter()
            .map(|column| column.label)
            .collect();
        assert_eq!(
            labels,
            vec!["Job Name", "Next Run", "Last Run", "State", "Submitted By"]
        );
        let widths: Vec<_> = columns_for(&ListKind::FailedScheduledJobs)
            .iter()
            .map(|column| column.width)
            .collect();
        assert_eq!(
            widths,
            vec![Some(350), Some(200), Some(200), Some(120), Some(180)]
        );
        assert_eq!(
            columns_for(&ListKind::Unsupported("x".to_owned())).len(),
            1
        );
    }

    #[test]
    fn each_column_reads_its_own_field() -> Result<()> {
        let record = crate::record::JobRecord::from_value(&json!({
            "CronJobDetail": {"Name": "Nightly export"},
            "State": "WAITING",
            "NextFireTime": "2024-01-05T10:00:00Z",
            "CreatedBy": {"Name": "Ada"}
        }));
        let job = Decorator::default().decorate(&record);
        let cells: Vec<(&str, &str)> = job_columns()
            .iter()
            .map(|column| (column.field.field_name(), column.cell(&job)))
            .collect();
        assert_eq!(
            cells,
            vec![
                ("CronJobDetailName", "Nightly export"),
                ("FormattedNextFireTime", "Jan 5, 2024, 10:00 AM"),
                ("FormattedPreviousFireTime", "N/A"),
                ("State", "WAITING"),
                ("CreatedByName", "Ada"),
            ]
        );
        assert_eq!(ColumnField::Name.cell(&job), "Nightly export");
        assert_eq!(ColumnField::Name.sort_field(), None);
        assert_eq!(
            ColumnField::SubmittedBy.sort_field(),
            Some(SortField::CreatedBy)
        );

        let encoded = serde_json::to_value(job_columns()[1])?;
        assert_eq!(encoded["fieldName"], json!("FormattedNextFireTime"));
        Ok(())
    }

    #[test]
    fn open_requests_the_first_page() -> Result<()> {
        let mut page = FullListPage::new(Decorator::default(), 10);
        let request = page
            .open(ListKind::UpcomingScheduledJobs)
            .ok_or_else(|| anyhow!("expected a request"))?;
        assert_eq!(request.page_number, 1);
        assert_eq!(request.page_size, 10);
        assert!(page.is_loading());
        assert!(page.is_next_disabled());
        assert!(page.is_previous_disabled());
        Ok(())
    }

    #[test]
    fn unsupported_kind_reports_configuration_error() {
        let mut page = FullListPage::new(Decorator::default(), 10);
        assert!(page.open(ListKind::parse("myApexClasses")).is_none());
        assert_eq!(
            page.error_text(),
            Some("Configuration error: List type \"myApexClasses\" is not supported.")
        );
        assert!(!page.has_records());
        assert_eq!(page.total_pages(), 0);
        assert!(page.refresh().is_none());
    }

    #[test]
    fn paging_follows_server_numbers_and_stops_at_bounds() -> Result<()> {
        let mut page = FullListPage::new(Decorator::default(), 10);
        let first = page
            .open(ListKind::MyScheduledJobs)
            .ok_or_else(|| anyhow!("expected a request"))?;
        page.apply(first.id, Ok(result(1, 2)));
        assert_eq!(page.state(), &LoadState::Loaded);
        assert!(page.is_previous_disabled());
        assert!(!page.is_next_disabled());
        assert_eq!(
            page.records()[0].formatted_next_fire_time,
            "Jan 5, 2024, 10:00 AM"
        );

        let second = page
            .handle_next()
            .ok_or_else(|| anyhow!("expected next page"))?;
        assert_eq!(second.page_number, 2);
        assert!(page.handle_next().is_none(), "no paging while loading");

        page.apply(second.id, Ok(result(2, 2)));
        assert!(page.handle_next().is_none());
        assert_eq!(page.page_number(), 2);

        let back = page
            .handle_previous()
            .ok_or_else(|| anyhow!("expected previous page"))?;
        assert_eq!(back.page_number, 1);
        Ok(())
    }

    #[test]
    fn failure_empties_the_list() -> Result<()> {
        let mut page = FullListPage::new(Decorator::default(), 10);
        let first = page
            .open(ListKind::SucceededScheduledJobs)
            .ok_or_else(|| anyhow!("expected a request"))?;
        page.apply(first.id, Ok(result(1, 3)));
        assert!(page.has_records());

        let again = page.refresh().ok_or_else(|| anyhow!("expected refresh"))?;
        page.apply(again.id, Err(anyhow!("insufficient privileges")));
        assert!(page.records().is_empty());
        assert_eq!(page.total_records(), 0);
        assert_eq!(page.total_pages(), 0);
        assert_eq!(page.error_text(), Some("insufficient privileges"));
        Ok(())
    }

    #[test]
    fn page_result_tolerates_null_and_bad_fields() {
        let empty = PageResult::from_value(&serde_json::Value::Null);
        assert!(empty.records.is_empty());
        assert_eq!(empty.total_pages, 0);

        let odd = PageResult::from_value(&json!({"records": {"a": 1}, "totalPages": "3"}));
        assert!(odd.records.is_empty());
        assert_eq!(odd.total_pages, 3);
        assert_eq!(odd.page_number, 1);
    }
}
