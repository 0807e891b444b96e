// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use adminboard_app::{
    APEX_CLASSES_SETUP_LINK, ColumnSpec, Dashboard, DecoratedJob, FullListPage, JobBoard,
    PERMISSION_SETS_SETUP_LINK, PageView, Section, SortSpec, TRAILHEAD_PROFILE_LINK, job_columns,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;

const MAX_CELL_WIDTH: usize = 36;
const COLUMN_GAP: &str = "  ";

pub fn dashboard(dashboard: &Dashboard) -> String {
    let board = dashboard.board();
    let mut out = String::new();
    out.push_str(&section_tabs(board));
    out.push('\n');
    out.push_str(&bucket_tabs(board));
    out.push_str("\n\n");

    let section = board.active_section();
    let page = board.displayed(section);
    let sort = board.view(section).state().sort;
    if page.has_records() {
        out.push_str(&job_table(&job_columns(), &page.records, Some(sort)));
    } else {
        out.push_str("No jobs to show.\n");
    }
    out.push_str(&page_footer(&page));
    out.push('\n');

    out.push('\n');
    out.push_str(&widgets(dashboard));
    out
}

fn section_tabs(board: &JobBoard) -> String {
    Section::ALL
        .into_iter()
        .map(|section| {
            let label = match section {
                Section::Running => "Jobs Running".to_owned(),
                Section::Mine => format!("My Jobs ({})", board.my_jobs_count()),
            };
            active_tab(&label, board.is_section_active(section))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bucket_tabs(board: &JobBoard) -> String {
    let section = board.active_section();
    let view = board.view(section);
    view.buckets()
        .iter()
        .map(|bucket| {
            let label = format!("{} ({})", bucket.label, bucket.count());
            active_tab(&label, view.is_active(&bucket.key))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn active_tab(label: &str, active: bool) -> String {
    if active {
        format!("[{label}]")
    } else {
        format!(" {label} ")
    }
}

/// Column header, with the sort marker on the sorted column.
fn header(column: &ColumnSpec, sort: Option<SortSpec>) -> String {
    match (column.field.sort_field(), sort) {
        (Some(field), Some(sort)) if sort.field == field => {
            format!("{} {}", column.label, sort.direction.marker())
        }
        _ => column.label.to_owned(),
    }
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_owned();
    }
    let mut short: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
    short.push('…');
    short
}

pub fn job_table(
    columns: &[ColumnSpec],
    records: &[DecoratedJob],
    sort: Option<SortSpec>,
) -> String {
    let headers: Vec<String> = columns.iter().map(|column| header(column, sort)).collect();
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|job| {
            columns
                .iter()
                .map(|column| truncate(column.cell(job)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}

fn page_footer<T>(page: &PageView<T>) -> String {
    let noun = if page.total_records == 1 { "job" } else { "jobs" };
    if page.total_pages <= 1 {
        return format!("{} {noun}", page.total_records);
    }
    format!(
        "Page {} of {} ({} {noun})",
        page.page_number, page.total_pages, page.total_records
    )
}

pub fn full_list(page: &FullListPage) -> String {
    let mut out = format!("{}\n\n", page.kind().as_str());
    if let Some(error) = page.error_text() {
        let _ = writeln!(out, "Error: {error}");
        return out;
    }
    if page.has_records() {
        out.push_str(&job_table(&page.columns(), page.records(), None));
    } else {
        out.push_str("No records found.\n");
    }
    let view = page.page();
    let _ = writeln!(
        out,
        "{}{}",
        page_footer(&view),
        nav_hint(page.is_previous_disabled(), page.is_next_disabled())
    );
    out
}

fn nav_hint(previous_disabled: bool, next_disabled: bool) -> &'static str {
    match (previous_disabled, next_disabled) {
        (true, true) => "",
        (true, false) => "  [next]",
        (false, true) => "  [previous]",
        (false, false) => "  [previous] [next]",
    }
}

/// Widget summaries. A widget whose load failed shows its error instead.
pub fn widgets(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    if let Some(user) = dashboard.user().value() {
        let _ = writeln!(out, "User: {} <{}>", user.name, user.email);
        let _ = writeln!(out, "  profile: {}", user.profile_link());
    }

    if let Some(usage) = dashboard.api_usage().value() {
        let _ = writeln!(
            out,
            "API usage: {}% ({} of {}, {} remaining) {}",
            usage.percentage(),
            usage.used,
            usage.limit,
            usage.remaining,
            usage.status_text()
        );
    }

    if let Some(coverage) = dashboard.coverage().value() {
        let _ = writeln!(
            out,
            "Code coverage: {} classes, {} below threshold",
            coverage.class_count, coverage.low_coverage_count
        );
        let _ = writeln!(out, "  setup: {APEX_CLASSES_SETUP_LINK}");
        for class in &coverage.low_coverage_classes {
            let _ = writeln!(
                out,
                "  {:<30} {:>5.1}% {:?}",
                truncate(&class.name),
                class.coverage,
                class.tier()
            );
        }
    }

    if let Some(permissions) = dashboard.permissions().value() {
        let _ = writeln!(
            out,
            "Permissions: {} ({} assigned)",
            permissions.view_access_label(),
            permissions.my_permission_count
        );
        let _ = writeln!(out, "  setup: {PERMISSION_SETS_SETUP_LINK}");
        for set in &permissions.my_permissions {
            let _ = writeln!(
                out,
                "  {:<30} {}",
                truncate(set.display_name()),
                set.permission_type()
            );
        }
    }

    if let Some(pulls) = dashboard.pull_requests().value() {
        let stats = &pulls.stats;
        let _ = writeln!(
            out,
            "Pull requests: {} open, {} merged, {} closed (last sync {})",
            stats.open_count,
            stats.merged_count,
            stats.closed_count,
            pulls.formatted_last_sync(dashboard.board().decorator())
        );
        for pr in pulls.displayed(false) {
            let number = pr.number.map(|number| format!("#{number}")).unwrap_or_default();
            let _ = writeln!(
                out,
                "  {number:<6} {:<30} {:<14} {}",
                truncate(&pr.title),
                pr.status_class(),
                pr.approvers_text()
            );
        }
        if pulls.has_more() {
            let _ = writeln!(out, "  {}", pulls.toggle_label(false));
        }
    }

    if let Some(scan) = dashboard.code_scan().value() {
        let _ = writeln!(out, "Code analysis: {}", scan.header());
        for finding in &scan.findings {
            let _ = writeln!(
                out,
                "  line {:<5} {:<30} {}",
                finding.line,
                truncate(&finding.rule),
                finding.severity
            );
        }
    }

    if let Some(trailhead) = dashboard.trailhead().value() {
        let _ = writeln!(
            out,
            "Trailhead: {} with {} points, {} badges, {} superbadges",
            trailhead.rank(),
            trailhead.points,
            trailhead.badges,
            trailhead.superbadges_completed
        );
        let _ = writeln!(out, "  profile: {TRAILHEAD_PROFILE_LINK}");
        for module in &trailhead.recommended_modules {
            let _ = writeln!(out, "  recommended: {}", module.name);
        }
    }

    for (name, error) in dashboard.errors() {
        let _ = writeln!(out, "{name}: unavailable ({error})");
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardSnapshot<'a> {
    section: &'static str,
    active_bucket: &'a str,
    sort: SortSpec,
    counts: Vec<(&'a str, usize)>,
    page: PageView<DecoratedJob>,
    errors: Vec<(&'static str, &'a str)>,
}

pub fn dashboard_json(dashboard: &Dashboard) -> Result<String> {
    let board = dashboard.board();
    let section = board.active_section();
    let view = board.view(section);
    let snapshot = BoardSnapshot {
        section: section.as_str(),
        active_bucket: view.state().active_bucket.as_str(),
        sort: view.state().sort,
        counts: view
            .buckets()
            .iter()
            .map(|bucket| (bucket.key.as_str(), bucket.count()))
            .collect(),
        page: board.displayed(section),
        errors: dashboard.errors(),
    };
    serde_json::to_string_pretty(&snapshot).context("encode dashboard snapshot")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FullListSnapshot<'a> {
    list_type: &'a str,
    columns: Vec<ColumnSpec>,
    page: PageView<DecoratedJob>,
    error: Option<&'a str>,
}

pub fn full_list_json(page: &FullListPage) -> Result<String> {
    let snapshot = FullListSnapshot {
        list_type: page.kind().as_str(),
        columns: page.columns(),
        page: page.page(),
        error: page.error_text(),
    };
    serde_json::to_string_pretty(&snapshot).context("encode full list page")
}
