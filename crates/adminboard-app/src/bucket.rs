// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::decorate::DecoratedJob;
use crate::ids::BucketKey;
use crate::sort::{SortField, SortSpec};

/// Case-insensitive set of raw job states.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateMatcher {
    states: Vec<String>,
}

impl StateMatcher {
    pub fn any_of<S: AsRef<str>>(states: &[S]) -> Self {
        Self {
            states: states
                .iter()
                .map(|state| state.as_ref().trim().to_ascii_uppercase())
                .filter(|state| !state.is_empty())
                .collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn matches(&self, state: Option<&str>) -> bool {
        let Some(state) = state else {
            return false;
        };
        let state = state.trim();
        self.states
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(state))
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRule {
    pub key: BucketKey,
    pub label: String,
    pub matcher: StateMatcher,
    pub default_sort: SortSpec,
}

impl BucketRule {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        matcher: StateMatcher,
        default_sort: SortSpec,
    ) -> Self {
        Self {
            key: BucketKey::new(key),
            label: label.into(),
            matcher,
            default_sort,
        }
    }

    pub fn upcoming() -> Self {
        Self::new(
            BucketKey::UPCOMING,
            "Upcoming",
            StateMatcher::any_of(&["WAITING", "ACQUIRED", "EXECUTING"]),
            SortSpec::ascending(SortField::NextFireTime),
        )
    }

    pub fn succeeded() -> Self {
        Self::new(
            BucketKey::SUCCEEDED,
            "Succeeded",
            StateMatcher::any_of(&["COMPLETE", "COMPLETED", "DELETED"]),
            SortSpec::descending(SortField::PreviousFireTime),
        )
    }

    pub fn failed() -> Self {
        Self::new(
            BucketKey::FAILED,
            "Failed",
            StateMatcher::any_of(&["ERROR", "FAILED"]),
            SortSpec::descending(SortField::PreviousFireTime),
        )
    }

    pub fn unknown() -> Self {
        Self::new(
            BucketKey::UNKNOWN,
            "Other",
            StateMatcher::none(),
            SortSpec::ascending(SortField::JobName),
        )
    }
}

/// Ordered rules, first match wins. Anything no rule claims lands in the
/// fallback bucket, so every record ends up in exactly one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRules {
    pub rules: Vec<BucketRule>,
    pub fallback: BucketRule,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self::scheduled_jobs()
    }
}

impl ClassificationRules {
    pub fn new(rules: Vec<BucketRule>, fallback: BucketRule) -> Self {
        Self { rules, fallback }
    }

    pub fn scheduled_jobs() -> Self {
        Self::new(
            vec![
                BucketRule::upcoming(),
                BucketRule::succeeded(),
                BucketRule::failed(),
            ],
            BucketRule::unknown(),
        )
    }

    pub fn classify(&self, state: Option<&str>) -> &BucketRule {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(state))
            .unwrap_or(&self.fallback)
    }

    pub fn rule(&self, key: &BucketKey) -> Option<&BucketRule> {
        self.rules
            .iter()
            .chain(std::iter::once(&self.fallback))
            .find(|rule| &rule.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub key: BucketKey,
    pub label: String,
    pub default_sort: SortSpec,
    pub records: Vec<DecoratedJob>,
}

impl Bucket {
    fn empty(rule: &BucketRule) -> Self {
        Self {
            key: rule.key.clone(),
            label: rule.label.clone(),
            default_sort: rule.default_sort,
            records: Vec::new(),
        }
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Buckets in display order. Counts are always read off the backing
/// vectors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Buckets {
    buckets: Vec<Bucket>,
}

impl Buckets {
    /// For data the backend has already partitioned.
    pub fn from_partitions<I>(partitions: I) -> Self
    where
        I: IntoIterator<Item = (BucketRule, Vec<DecoratedJob>)>,
    {
        let buckets = partitions
            .into_iter()
            .map(|(rule, records)| Bucket {
                records,
                ..Bucket::empty(&rule)
            })
            .collect();
        Self { buckets }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &BucketKey> {
        self.buckets.iter().map(|bucket| &bucket.key)
    }

    pub fn first_key(&self) -> Option<&BucketKey> {
        self.buckets.first().map(|bucket| &bucket.key)
    }

    pub fn get(&self, key: &BucketKey) -> Option<&Bucket> {
        self.buckets.iter().find(|bucket| &bucket.key == key)
    }

    pub fn contains(&self, key: &BucketKey) -> bool {
        self.get(key).is_some()
    }

    pub fn records(&self, key: &BucketKey) -> &[DecoratedJob] {
        self.get(key)
            .map(|bucket| bucket.records.as_slice())
            .unwrap_or(&[])
    }

    pub fn count(&self, key: &BucketKey) -> usize {
        self.records(key).len()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Bucket::count).sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Partitions `records` by state. Every rule yields a bucket, even an
/// empty one, followed by the fallback bucket. Input order is kept inside
/// each bucket.
pub fn bucketize(records: &[DecoratedJob], rules: &ClassificationRules) -> Buckets {
    let mut buckets: Vec<Bucket> = rules
        .rules
        .iter()
        .chain(std::iter::once(&rules.fallback))
        .map(Bucket::empty)
        .collect();

    for record in records {
        let rule = rules.classify(record.record.state.as_deref());
        if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.key == rule.key) {
            bucket.records.push(record.clone());
        }
    }

    Buckets { buckets }
}

#[cfg(test)]
mod tests {
    use super::{BucketRule, ClassificationRules, StateMatcher, bucketize};
    use crate::decorate::{DecoratedJob, decorate};
    use crate::ids::BucketKey;
    use crate::record::JobRecord;
    use crate::sort::{SortField, SortSpec};

    fn job(name: &str, state: Option<&str>) -> DecoratedJob {
        decorate(&JobRecord {
            name: Some(name.to_owned()),
            state: state.map(str::to_owned),
            ..JobRecord::default()
        })
    }

    fn names(buckets: &super::Buckets, key: &str) -> Vec<String> {
        buckets
            .records(&BucketKey::from(key))
            .iter()
            .filter_map(|job| job.record.name.clone())
            .collect()
    }

    #[test]
    fn buckets_partition_the_input() {
        let records = vec![
            job("a", Some("WAITING")),
            job("b", Some("COMPLETE")),
            job("c", Some("ERROR")),
            job("d", Some("PAUSED")),
            job("e", None),
            job("f", Some("executing")),
        ];
        let buckets = bucketize(&records, &ClassificationRules::scheduled_jobs());

        assert_eq!(buckets.total(), records.len());
        assert_eq!(names(&buckets, "upcoming"), vec!["a", "f"]);
        assert_eq!(names(&buckets, "succeeded"), vec!["b"]);
        assert_eq!(names(&buckets, "failed"), vec!["c"]);
        assert_eq!(names(&buckets, "unknown"), vec!["d", "e"]);
    }

    #[test]
    fn every_rule_yields_a_bucket_even_when_empty() {
        let buckets = bucketize(&[], &ClassificationRules::scheduled_jobs());
        let keys: Vec<&str> = buckets.keys().map(BucketKey::as_str).collect();
        assert_eq!(keys, vec!["upcoming", "succeeded", "failed", "unknown"]);
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = ClassificationRules::new(
            vec![
                BucketRule::new(
                    "done",
                    "Done",
                    StateMatcher::any_of(&["COMPLETE"]),
                    SortSpec::descending(SortField::PreviousFireTime),
                ),
                BucketRule::new(
                    "also-done",
                    "Also done",
                    StateMatcher::any_of(&["COMPLETE", "COMPLETED"]),
                    SortSpec::default(),
                ),
            ],
            BucketRule::unknown(),
        );
        let buckets = bucketize(
            &[job("x", Some("COMPLETE")), job("y", Some("COMPLETED"))],
            &rules,
        );
        assert_eq!(names(&buckets, "done"), vec!["x"]);
        assert_eq!(names(&buckets, "also-done"), vec!["y"]);
    }

    #[test]
    fn bucketize_does_not_touch_input() {
        let records = vec![job("a", Some("ERROR")), job("b", Some("WAITING"))];
        let before = records.clone();
        let _ = bucketize(&records, &ClassificationRules::default());
        assert_eq!(records, before);
    }

    #[test]
    fn counts_are_derived_from_contents() {
        let buckets = bucketize(
            &[job("a", Some("ERROR")), job("b", Some("ERROR"))],
            &ClassificationRules::default(),
        );
        assert_eq!(buckets.count(&BucketKey::failed()), 2);
        assert_eq!(buckets.count(&BucketKey::from("missing")), 0);
        assert_eq!(
            buckets
                .get(&BucketKey::failed())
                .map(|bucket| bucket.count()),
            Some(2)
        );
    }

    #[test]
    fn matcher_ignores_case_and_whitespace() {
        let matcher = StateMatcher::any_of(&["waiting"]);
        assert!(matcher.matches(Some(" WAITING ")));
        assert!(!matcher.matches(Some("WAIT")));
        assert!(!matcher.matches(None));
        assert!(!StateMatcher::none().matches(Some("WAITING")));
    }

    #[test]
    fn rule_lookup_includes_fallback() {
        let rules = ClassificationRules::default();
        assert!(rules.rule(&BucketKey::unknown()).is_some());
        assert_eq!(
            rules
                .rule(&BucketKey::succeeded())
                .map(|rule| rule.default_sort),
            Some(SortSpec::descending(SortField::PreviousFireTime))
        );
    }
}
