// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use serde_json::Value;

use crate::ids::{JobId, UserId};
use crate::lenient;

/// One scheduled job as the backend reports it. Nested objects such as
/// `CronJobDetail.Name` are resolved here, once, so later stages work with
/// plain fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct JobRecord {
    pub id: Option<JobId>,
    pub name: Option<String>,
    pub next_fire_time: Option<String>,
    pub previous_fire_time: Option<String>,
    pub state: Option<String>,
    pub created_by: Option<String>,
    pub created_by_id: Option<UserId>,
    pub progress: Option<i64>,
}

impl JobRecord {
    pub fn from_value(value: &Value) -> Self {
        let name = lenient::text(lenient::path(value, &["CronJobDetail", "Name"]))
            .or_else(|| lenient::text(value.get("CronJobDetailName")));
        let created_by = lenient::text(lenient::path(value, &["CreatedBy", "Name"]))
            .or_else(|| lenient::text(value.get("CreatedByName")));

        Self {
            id: lenient::text(value.get("Id")).map(JobId::new),
            name,
            next_fire_time: lenient::text(value.get("NextFireTime")),
            previous_fire_time: lenient::text(value.get("PreviousFireTime")),
            state: lenient::text(value.get("State")),
            created_by,
            created_by_id: lenient::text(value.get("CreatedById")).map(UserId::new),
            progress: lenient::number(value.get("progress")),
        }
    }
}

pub(crate) fn job_records(value: Option<&Value>) -> Vec<JobRecord> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| item.is_object())
            .map(JobRecord::from_value)
            .collect(),
        _ => Vec::new(),
    }
}

/// The scheduled-jobs payload. System jobs arrive already partitioned by
/// the backend; `my_jobs` is a flat list that gets bucketed locally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduledJobsPayload {
    pub upcoming_jobs: Vec<JobRecord>,
    pub succeeded_jobs: Vec<JobRecord>,
    pub failed_jobs: Vec<JobRecord>,
    pub my_jobs: Vec<JobRecord>,
}

impl ScheduledJobsPayload {
    pub fn from_value(value: &Value) -> Self {
        Self {
            upcoming_jobs: job_records(value.get("upcomingJobs")),
            succeeded_jobs: job_records(value.get("succeededJobs")),
            failed_jobs: job_records(value.get("failedJobs")),
            my_jobs: job_records(value.get("myJobs")),
        }
    }

    pub fn system_total(&self) -> usize {
        self.upcoming_jobs.len() + self.succeeded_jobs.len() + self.failed_jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system_total() == 0 && self.my_jobs.is_empty()
    }
}
