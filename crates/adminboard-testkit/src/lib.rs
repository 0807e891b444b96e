// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::path::PathBuf;
use time::format_description::well_known::Rfc3339;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

const JOB_SUBJECTS: [&str; 12] = [
    "Account",
    "Billing",
    "Case",
    "Contact",
    "Invoice",
    "Lead",
    "Opportunity",
    "Order",
    "Quote",
    "Renewal",
    "Territory",
    "Usage",
];

const JOB_ACTIONS: [&str; 8] = [
    "Sync",
    "Cleanup",
    "Rollup",
    "Digest",
    "Archive",
    "Reminder",
    "Recalc",
    "Export",
];

const JOB_CADENCES: [&str; 5] = ["Nightly", "Hourly", "Weekly", "Daily", "Monthly"];

const FIRST_NAMES: [&str; 12] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Rowan",
];
const LAST_NAMES: [&str; 12] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Turner", "Brooks",
];

const UPCOMING_STATES: [&str; 3] = ["WAITING", "ACQUIRED", "EXECUTING"];
const SUCCEEDED_STATES: [&str; 3] = ["COMPLETE", "COMPLETED", "DELETED"];
const FAILED_STATES: [&str; 2] = ["ERROR", "FAILED"];
const OTHER_STATES: [&str; 3] = ["PAUSED", "BLOCKED", "PAUSED_BLOCKED"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Which group of raw job states to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateGroup {
    Upcoming,
    Succeeded,
    Failed,
    Other,
}

impl StateGroup {
    pub fn states(self) -> &'static [&'static str] {
        match self {
            Self::Upcoming => &UPCOMING_STATES,
            Self::Succeeded => &SUCCEEDED_STATES,
            Self::Failed => &FAILED_STATES,
            Self::Other => &OTHER_STATES,
        }
    }
}

/// Seeded generator of backend-shaped scheduled job records.
#[derive(Debug, Clone)]
pub struct JobFaker {
    rng: DeterministicRng,
    seed: u64,
    serial: u64,
}

impl JobFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            serial: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn job_name(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(&JOB_CADENCES),
            self.pick(&JOB_SUBJECTS),
            self.pick(&JOB_ACTIONS)
        )
    }

    pub fn user_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    /// One job record. Finished jobs always carry a last run. About one in
    /// eight next runs is dropped to exercise the "N/A" path.
    pub fn job(&mut self, group: StateGroup) -> Value {
        self.serial += 1;
        let state = self.pick(group.states());
        let id = format!("08e{:012}", self.serial);
        let user_id = format!("005{:012}", self.rng.int_n(40));
        let (next, previous) = match group {
            StateGroup::Upcoming => (self.fire_time(0, 30), self.maybe_fire_time(-30, 0)),
            StateGroup::Succeeded | StateGroup::Failed => {
                (self.maybe_fire_time(0, 30), self.fire_time(-30, 0))
            }
            StateGroup::Other => (self.maybe_fire_time(0, 30), self.maybe_fire_time(-30, 0)),
        };
        let next = if self.rng.int_n(8) == 0 { None } else { next };

        let mut job = json!({
            "Id": id,
            "CronJobDetail": {"Name": self.job_name()},
            "NextFireTime": next,
            "PreviousFireTime": previous,
            "State": state,
            "CreatedById": user_id,
            "CreatedBy": {"Name": self.user_name()},
        });
        if state == "EXECUTING" || group == StateGroup::Succeeded {
            job["progress"] = json!(if group == StateGroup::Succeeded {
                100
            } else {
                1 + self.rng.int_n(99)
            });
        }
        job
    }

    pub fn jobs(&mut self, group: StateGroup, count: usize) -> Vec<Value> {
        (0..count).map(|_| self.job(group)).collect()
    }

    /// A full scheduled-jobs payload with `per_list` system jobs in each
    /// backend list and `mine` jobs of mixed state for the current user.
    pub fn scheduled_jobs_payload(&mut self, per_list: usize, mine: usize) -> Value {
        let groups = [
            StateGroup::Upcoming,
            StateGroup::Succeeded,
            StateGroup::Failed,
            StateGroup::Other,
        ];
        let my_jobs: Vec<Value> = (0..mine)
            .map(|_| {
                let group = groups[self.rng.int_n(groups.len())];
                self.job(group)
            })
            .collect();
        json!({
            "upcomingJobs": self.jobs(StateGroup::Upcoming, per_list),
            "succeededJobs": self.jobs(StateGroup::Succeeded, per_list),
            "failedJobs": self.jobs(StateGroup::Failed, per_list),
            "myJobs": my_jobs,
        })
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn fire_time(&mut self, min_days: i64, max_days: i64) -> Option<String> {
        let span = (max_days - min_days).max(0) as usize;
        let days = min_days + self.rng.int_n(span + 1) as i64;
        let minutes = self.rng.int_n(24 * 4) as i64 * 15;
        let instant = reference_now() + Duration::days(days) + Duration::minutes(minutes);
        instant.format(&Rfc3339).ok()
    }

    fn maybe_fire_time(&mut self, min_days: i64, max_days: i64) -> Option<String> {
        if self.rng.bool() {
            self.fire_time(min_days, max_days)
        } else {
            None
        }
    }
}

/// Hand-built job record for tests that need exact values.
pub fn job_value(name: &str, state: &str, next: Option<&str>, previous: Option<&str>) -> Value {
    json!({
        "CronJobDetail": {"Name": name},
        "State": state,
        "NextFireTime": next,
        "PreviousFireTime": previous,
        "CreatedBy": {"Name": "Test User"},
    })
}

/// A server page as the paged list endpoint returns it.
pub fn page_result_value(
    records: Vec<Value>,
    page_number: usize,
    page_size: usize,
    total_records: usize,
) -> Value {
    let total_pages = if page_size == 0 {
        0
    } else {
        total_records.div_ceil(page_size)
    };
    json!({
        "records": records,
        "pageNumber": page_number,
        "pageSize": page_size,
        "totalRecords": total_records,
        "totalPages": total_pages,
    })
}

/// The full set of dashboard payloads used by the CLI's demo mode.
pub fn demo_payload() -> Value {
    let mut faker = JobFaker::new(7);
    json!({
        "scheduledJobs": faker.scheduled_jobs_payload(14, 9),
        "apiUsage": {"limit": 15000, "used": 11240, "remaining": 3760},
        "codeCoverage": {
            "classes": [],
            "myClasses": [],
            "lowCoverageClasses": [
                {"Id": "01p000000000001", "Name": "InvoiceService", "coverage": 42},
                {"Id": "01p000000000002", "Name": "TerritoryRollup", "coverage": 63}
            ],
            "classCount": 128,
            "myClassesCount": 11,
            "lowCoverageCount": 2,
            "canViewDetails": true
        },
        "permissions": {
            "permissions": [],
            "myPermissions": [
                {"Id": "0PS000000000001", "Name": "Billing_Admin", "Label": "Billing Admin", "IsCustom": true},
                {"Id": "0PS000000000002", "Name": "Reports_Viewer", "Label": "Reports Viewer", "IsCustom": false}
            ],
            "permissionCount": 42,
            "userPermissionCount": 2,
            "myPermissionCount": 2,
            "canViewAllPerms": false,
            "viewType": "user"
        },
        "github": {
            "pullRequests": [
                {"number": 412, "title": "Retry failed batch jobs", "state": "open", "url": "https://github.com/example/org-config/pull/412", "reviewersText": "J. Ortiz"},
                {"number": 409, "title": "Raise coverage on InvoiceService", "state": "merged", "url": "https://github.com/example/org-config/pull/409", "reviewersText": "A. Chen, J. Ortiz"},
                {"number": 401, "title": "Drop legacy territory trigger", "state": "closed", "url": "https://github.com/example/org-config/pull/401"}
            ],
            "statistics": {
                "totalCount": 3,
                "openCount": 1,
                "mergedCount": 1,
                "closedCount": 1,
                "lastSyncDate": "2026-01-01T09:30:00Z"
            }
        },
        "codeAnalysis": {
            "className": "InvoiceService",
            "findings": [
                {"rule": "ApexCRUDViolation", "line": 88, "message": "Validate CRUD permission before SOQL/DML operation", "severity": "2"},
                {"rule": "AvoidDebugStatements", "line": 141, "message": "Avoid debug statements since they impact performance", "severity": "3"}
            ]
        },
        "trailhead": {
            "points": 61375,
            "rangerLevel": "Mountaineer",
            "superbadgesCompleted": 4,
            "badges": 138,
            "recommendedModules": [
                {"name": "Asynchronous Apex", "url": "https://trailhead.salesforce.com/content/learn/modules/asynchronous_apex"}
            ]
        },
        "user": {
            "Id": "005000000000001",
            "Name": faker.user_name(),
            "Email": "admin@example.com",
            "SmallPhotoUrl": ""
        }
    })
}

pub fn temp_payload_path(payload: &Value) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("payload.json");
    let encoded = serde_json::to_string_pretty(payload).context("encode payload")?;
    std::fs::write(&path, encoded).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn fixture_datetime() -> &'static str {
    "2026-02-19T12:34:56Z"
}

pub fn state_groups() -> [StateGroup; 4] {
    [
        StateGroup::Upcoming,
        StateGroup::Succeeded,
        StateGroup::Failed,
        StateGroup::Other,
    ]
}

fn reference_now() -> OffsetDateTime {
    datetime!(2026-01-01 0:00 UTC)
}
