// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use tracing::{debug, warn};

use crate::ids::RequestId;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl LoadState {
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What a failed load does to the value already on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    RetainLastKnown,
    Clear,
}

/// One independently loaded piece of data. Requests are tagged so a
/// completion can be matched to the load that started it; whichever
/// completion arrives last decides what is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    name: &'static str,
    policy: FailurePolicy,
    state: LoadState,
    value: Option<T>,
    latest: Option<RequestId>,
}

impl<T> Dataset<T> {
    pub fn new(name: &'static str, policy: FailurePolicy) -> Self {
        Self {
            name,
            policy,
            state: LoadState::Idle,
            value: None,
            latest: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Marks the dataset as loading. The last-known value stays visible.
    pub fn begin(&mut self, request: RequestId) {
        debug!(dataset = self.name, request = request.get(), "load started");
        self.latest = Some(request);
        self.state = LoadState::Loading;
    }

    /// Applies every completion's value. Only the newest request's
    /// completion ends the loading state.
    pub fn complete(&mut self, request: RequestId, result: Result<T>) -> &LoadState {
        if !self.is_latest(request) {
            debug!(
                dataset = self.name,
                request = request.get(),
                "applying completion of a superseded request"
            );
        }

        match result {
            Ok(value) => {
                debug!(dataset = self.name, request = request.get(), "load finished");
                self.value = Some(value);
                if self.is_latest(request) {
                    self.state = LoadState::Loaded;
                }
            }
            Err(error) => {
                let message = format!("{error:#}");
                warn!(dataset = self.name, request = request.get(), error = %message, "load failed");
                if self.policy == FailurePolicy::Clear {
                    self.value = None;
                }
                if self.is_latest(request) {
                    self.state = LoadState::Error(message);
                }
            }
        }
        &self.state
    }

    fn is_latest(&self, request: RequestId) -> bool {
        self.latest.is_none_or(|latest| latest == request)
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.state = LoadState::Idle;
        self.latest = None;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error_text(&self) -> Option<&str> {
        self.state.message()
    }
}
