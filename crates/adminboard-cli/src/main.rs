// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod render;
mod runtime;

use adminboard_app::{
    BucketKey, Dashboard, DashboardSource, Decorator, FullListPage, JobBoard, ListKind,
    ListViewConfig, Section, SortField, ViewCommand, ViewEvent,
};
use anyhow::{Context, Result, anyhow};
use config::Config;
use runtime::FileSource;
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ADMINBOARD_LOG";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    init_logging()?;

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `adminboard --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let decorator = Decorator::new(config.utc_offset()?);
    let rules = config.classification_rules().with_context(|| {
        format!(
            "invalid [[buckets]] config in {}",
            options.config_path.display()
        )
    })?;

    let payload_path = options.payload.clone().or_else(|| config.payload_path());
    let mut source = FileSource::resolve(payload_path, options.demo)?;
    debug!(origin = source.origin(), "resolved payload source");
    if options.check_only {
        return Ok(());
    }

    if let Some(kind) = options.list.clone() {
        let page = load_full_list(
            &mut source,
            FullListPage::new(decorator, config.page_size()),
            kind,
            options.page,
        );
        let output = if options.json {
            render::full_list_json(&page)?
        } else {
            render::full_list(&page)
        };
        print!("{output}");
        return Ok(());
    }

    let board = JobBoard::new(decorator, rules, ListViewConfig::paged(config.page_size()));
    let mut dashboard = Dashboard::new(board);
    dashboard.refresh_all(&mut source);
    for event in navigate(&mut dashboard, &options) {
        if let ViewEvent::Status(status) = event {
            eprintln!("note: {}", status.message());
        }
    }

    let output = if options.json {
        render::dashboard_json(&dashboard)?
    } else {
        render::dashboard(&dashboard)
    };
    print!("{output}");
    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|error| anyhow!("initialize logging: {error}"))
}

/// Replays the command-line navigation against the loaded board.
fn navigate(dashboard: &mut Dashboard, options: &CliOptions) -> Vec<ViewEvent> {
    let mut events = Vec::new();
    if let Some(section) = options.section {
        events.extend(dashboard.board_mut().switch_section(section));
    }
    if let Some(bucket) = &options.bucket {
        events.extend(dashboard.dispatch(ViewCommand::SelectBucket(bucket.clone())));
    }
    for field in &options.sort {
        events.extend(dashboard.dispatch(ViewCommand::SortBy(*field)));
    }
    for _ in 1..options.page {
        events.extend(dashboard.dispatch(ViewCommand::NextPage));
    }
    events
}

/// Opens `kind` and walks forward to `target_page`, one request per page.
fn load_full_list(
    source: &mut dyn DashboardSource,
    mut page: FullListPage,
    kind: ListKind,
    target_page: usize,
) -> FullListPage {
    let mut pending = page.open(kind);
    while let Some(request) = pending.take() {
        let result = source.fetch_page(&request);
        page.apply(request.id, result);
        if page.page_number() < target_page {
            pending = page.handle_next();
        }
    }
    page
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    payload: Option<PathBuf>,
    demo: bool,
    section: Option<Section>,
    bucket: Option<BucketKey>,
    sort: Vec<SortField>,
    page: usize,
    list: Option<ListKind>,
    json: bool,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        payload: None,
        demo: false,
        section: None,
        bucket: None,
        sort: Vec::new(),
        page: 1,
        list: None,
        json: false,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--payload" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--payload requires a file path"))?;
                options.payload = Some(PathBuf::from(value.as_ref()));
            }
            "--demo" => {
                options.demo = true;
            }
            "--section" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--section requires running or mine"))?;
                let section = Section::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown section {:?}; expected running or mine",
                        value.as_ref()
                    )
                })?;
                options.section = Some(section);
            }
            "--bucket" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--bucket requires a bucket key"))?;
                options.bucket = Some(BucketKey::new(value.as_ref().trim()));
            }
            "--sort" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--sort requires a field name"))?;
                let field = SortField::parse(value.as_ref()).ok_or_else(|| {
                    let known: Vec<&str> =
                        SortField::ALL.iter().map(|field| field.as_str()).collect();
                    anyhow!(
                        "unknown sort field {:?}; expected one of {}",
                        value.as_ref(),
                        known.join(", ")
                    )
                })?;
                options.sort.push(field);
            }
            "--page" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--page requires a page number"))?;
                let page: usize = value
                    .as_ref()
                    .parse()
                    .ok()
                    .filter(|page| *page >= 1)
                    .ok_or_else(|| {
                        anyhow!("--page must be a positive integer, got {:?}", value.as_ref())
                    })?;
                options.page = page;
            }
            "--list" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--list requires a list type"))?;
                options.list = Some(ListKind::parse(value.as_ref()));
            }
            "--json" => {
                options.json = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("adminboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --payload <file>         Read dashboard data from a JSON file");
    println!("  --demo                   Show generated demo data");
    println!("  --section <name>         running or mine");
    println!("  --bucket <key>           Select a bucket, e.g. upcoming, succeeded, failed");
    println!("  --sort <field>           Sort by a field; repeat to toggle direction");
    println!("  --page <n>               Show page n");
    println!("  --list <listType>        Show a full list, e.g. failedScheduledJobs");
    println!("  --json                   Print the current view as JSON");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config and payload, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, load_full_list, navigate, parse_cli_args};
    use crate::runtime::FileSource;
    use adminboard_app::{
        BucketKey, ClassificationRules, Dashboard, Decorator, FullListPage, JobBoard, ListKind,
        ListViewConfig, Section, SortDirection, SortField,
    };
    use adminboard_testkit::JobFaker;
    use anyhow::Result;
    use serde_json::json;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/adminboard-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                payload: None,
                demo: false,
                section: None,
                bucket: None,
                sort: Vec::new(),
                page: 1,
                list: None,
                json: false,
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_and_payload_paths() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--config",
                "/custom/config.toml",
                "--payload",
                "/data/jobs.json",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(options.payload, Some(PathBuf::from("/data/jobs.json")));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_collects_navigation() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--section", "mine", "--bucket", "failed", "--sort", "State", "--sort",
                "State", "--page", "2",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.section, Some(Section::Mine));
        assert_eq!(options.bucket, Some(BucketKey::failed()));
        assert_eq!(options.sort, vec![SortField::State, SortField::State]);
        assert_eq!(options.page, 2);
        Ok(())
    }

    #[test]
    fn parse_cli_args_rejects_bad_navigation_values() {
        for args in [
            vec!["--section", "elsewhere"],
            vec!["--sort", "Priority"],
            vec!["--page", "0"],
            vec!["--page", "two"],
        ] {
            let flag = args[0];
            let error = parse_cli_args(args, default_options_path())
                .expect_err("invalid value should fail");
            assert!(!error.to_string().is_empty(), "{flag} accepted a bad value");
        }
    }

    #[test]
    fn parse_cli_args_keeps_unsupported_list_types() -> Result<()> {
        let options = parse_cli_args(
            vec!["--list", "lowCoverageApexClasses", "--json"],
            default_options_path(),
        )?;
        assert_eq!(
            options.list,
            Some(ListKind::Unsupported("lowCoverageApexClasses".to_owned()))
        );
        assert!(options.json);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(!options.demo);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn navigate_applies_section_bucket_sort_and_page() -> Result<()> {
        let mut source = FileSource::from_value(
            "test",
            json!({"scheduledJobs": JobFaker::new(3).scheduled_jobs_payload(25, 0)}),
        );
        let mut dashboard = Dashboard::new(JobBoard::new(
            Decorator::default(),
            ClassificationRules::scheduled_jobs(),
            ListViewConfig::paged(10),
        ));
        dashboard.refresh_all(&mut source);

        let options = parse_cli_args(
            vec!["--bucket", "failed", "--sort", "State", "--page", "3"],
            default_options_path(),
        )?;
        let events = navigate(&mut dashboard, &options);
        assert!(!events.is_empty());

        let view = dashboard.board().view(Section::Running);
        assert!(view.is_active(&BucketKey::failed()));
        assert_eq!(view.state().sort.field, SortField::State);
        assert_eq!(view.state().sort.direction, SortDirection::Asc);
        assert_eq!(view.state().page.number, 3);
        assert_eq!(dashboard.board().displayed(Section::Running).records.len(), 5);
        Ok(())
    }

    #[test]
    fn load_full_list_walks_to_the_requested_page() {
        let mut source = FileSource::from_value(
            "test",
            json!({"scheduledJobs": JobFaker::new(5).scheduled_jobs_payload(12, 0)}),
        );
        let page = load_full_list(
            &mut source,
            FullListPage::new(Decorator::default(), 5),
            ListKind::SucceededScheduledJobs,
            9,
        );
        assert_eq!(page.page_number(), 3);
        assert_eq!(page.records().len(), 2);
        assert!(page.is_next_disabled());
        assert!(!page.is_previous_disabled());
    }
}
