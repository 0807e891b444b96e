// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;
use serde_json::Value;

use crate::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeverityClass {
    Error,
    Warning,
    Info,
    Default,
}

impl SeverityClass {
    /// PMD reports severity either by name or by priority 1-5.
    pub fn classify(severity: &str) -> Self {
        match severity.to_lowercase().as_str() {
            "error" | "high" | "1" => Self::Error,
            "warning" | "medium" | "2" => Self::Warning,
            "info" | "low" | "3" | "4" | "5" => Self::Info,
            _ => Self::Default,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "severity-error",
            Self::Warning => "severity-warning",
            Self::Info => "severity-info",
            Self::Default => "severity-default",
        }
    }
}

/// One static-analysis violation, with defaults filled in for anything the
/// scanner left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub id: usize,
    pub rule: String,
    pub line: i64,
    pub message: String,
    pub severity: String,
    pub severity_class: SeverityClass,
}

impl Finding {
    pub fn from_value(id: usize, value: &Value) -> Self {
        let severity =
            lenient::text(value.get("severity")).unwrap_or_else(|| "Info".to_owned());
        Self {
            id,
            rule: lenient::text(value.get("rule")).unwrap_or_else(|| "Unknown Rule".to_owned()),
            line: lenient::number(value.get("line"))
                .filter(|line| *line != 0)
                .unwrap_or(1),
            message: lenient::text(value.get("message"))
                .unwrap_or_else(|| "No message provided".to_owned()),
            severity_class: SeverityClass::classify(&severity),
            severity,
        }
    }
}

/// Scan results in report order; a non-array reads as no findings.
pub fn findings_from_value(value: &Value) -> Vec<Finding> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(id, item)| Finding::from_value(id, item))
                .collect()
        })
        .unwrap_or_default()
}

/// Empty when there is nothing to report.
pub fn findings_header(findings: &[Finding], class_name: &str) -> String {
    match findings.len() {
        0 => String::new(),
        1 => format!("Found 1 Issue in {class_name}"),
        count => format!("Found {count} Issues in {class_name}"),
    }
}

pub fn scan_summary(findings: &[Finding], class_name: &str) -> String {
    if findings.is_empty() {
        format!("No PMD violations found in {class_name}!")
    } else {
        format!(
            "Found {} PMD violation(s) in {class_name}",
            findings.len()
        )
    }
}

/// One class's scan: `{"className": .., "findings": [..]}`. A bare array
/// is read as findings for an unnamed class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CodeScan {
    pub class_name: String,
    pub findings: Vec<Finding>,
}

impl CodeScan {
    pub fn from_value(value: &Value) -> Self {
        if value.is_array() {
            return Self {
                class_name: String::new(),
                findings: findings_from_value(value),
            };
        }
        Self {
            class_name: lenient::text(value.get("className")).unwrap_or_default(),
            findings: value
                .get("findings")
                .map(findings_from_value)
                .unwrap_or_default(),
        }
    }

    pub fn header(&self) -> String {
        findings_header(&self.findings, &self.class_name)
    }

    pub fn summary(&self) -> String {
        scan_summary(&self.findings, &self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{CodeScan, SeverityClass, findings_from_value, findings_header, scan_summary};
    use serde_json::json;

    #[test]
    fn missing_fields_get_defaults() {
        let findings = findings_from_value(&json!([{}, {"line": 0, "severity": ""}]));
        assert_eq!(findings.len(), 2);
        let first = &findings[0];
        assert_eq!(first.rule, "Unknown Rule");
        assert_eq!(first.line, 1);
        assert_eq!(first.message, "No message provided");
        assert_eq!(first.severity, "Info");
        assert_eq!(first.severity_class, SeverityClass::Info);
        assert_eq!(findings[1].line, 1);
        assert_eq!(findings[1].id, 1);
    }

    #[test]
    fn severity_accepts_names_and_priorities() {
        assert_eq!(SeverityClass::classify("HIGH").as_str(), "severity-error");
        assert_eq!(SeverityClass::classify("1").as_str(), "severity-error");
        assert_eq!(SeverityClass::classify("Medium").as_str(), "severity-warning");
        assert_eq!(SeverityClass::classify("4").as_str(), "severity-info");
        assert_eq!(SeverityClass::classify("blocker").as_str(), "severity-default");
    }

    #[test]
    fn header_pluralizes() {
        let one = findings_from_value(&json!([{"rule": "ApexDoc", "line": 12, "severity": 3}]));
        assert_eq!(findings_header(&one, "InvoiceService"), "Found 1 Issue in InvoiceService");
        assert_eq!(one[0].severity_class, SeverityClass::Info);

        let two = findings_from_value(&json!([{}, {}]));
        assert_eq!(findings_header(&two, "TaxHelper"), "Found 2 Issues in TaxHelper");
        assert_eq!(findings_header(&[], "TaxHelper"), "");
        assert_eq!(scan_summary(&[], "TaxHelper"), "No PMD violations found in TaxHelper!");
    }

    #[test]
    fn non_array_reads_as_no_findings() {
        assert!(findings_from_value(&json!({"rule": "x"})).is_empty());
    }

    #[test]
    fn code_scan_reads_class_and_findings() {
        let scan = CodeScan::from_value(&json!({
            "className": "InvoiceService",
            "findings": [{"rule": "ApexCRUDViolation", "line": 40, "severity": "high"}]
        }));
        assert_eq!(scan.header(), "Found 1 Issue in InvoiceService");
        assert_eq!(scan.findings[0].severity_class, SeverityClass::Error);

        let bare = CodeScan::from_value(&json!([]));
        assert!(bare.findings.is_empty());
        assert_eq!(bare.header(), "");
    }
}
