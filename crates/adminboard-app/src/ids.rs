// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_id!(JobId);
record_id!(UserId);
record_id!(ClassId);
record_id!(BucketKey);

impl BucketKey {
    pub const UPCOMING: &'static str = "upcoming";
    pub const SUCCEEDED: &'static str = "succeeded";
    pub const FAILED: &'static str = "failed";
    pub const UNKNOWN: &'static str = "unknown";

    pub fn upcoming() -> Self {
        Self::from(Self::UPCOMING)
    }

    pub fn succeeded() -> Self {
        Self::from(Self::SUCCEEDED)
    }

    pub fn failed() -> Self {
        Self::from(Self::FAILED)
    }

    pub fn unknown() -> Self {
        Self::from(Self::UNKNOWN)
    }
}

/// Correlates a fetch with its completion. Issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestIds {
    last: u64,
}

impl RequestIds {
    pub fn next_id(&mut self) -> RequestId {
        self.last += 1;
        RequestId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::{BucketKey, RequestIds};

    #[test]
    fn request_ids_increase() {
        let mut ids = RequestIds::default();
        let first = ids.next_id();
        let second = ids.next_id();
        assert!(second > first);
        assert_eq!(first.get(), 1);
    }

    #[test]
    fn bucket_key_serializes_as_plain_string() {
        let encoded = serde_json::to_string(&BucketKey::failed()).expect("encode key");
        assert_eq!(encoded, "\"failed\"");
    }
}
