// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use crate::ids::UserId;
use crate::lenient;

pub const PERMISSION_SETS_SETUP_LINK: &str = "/lightning/setup/PermSets/home";
pub const TRAILHEAD_PROFILE_LINK: &str = "https://www.salesforce.com/trailblazer/profile";
const LOADING: &str = "Loading...";

/// Setup page for managing one user, or `#` when there is nobody to link to.
pub fn profile_link(user_id: Option<&UserId>) -> String {
    let Some(user_id) = user_id.filter(|id| !id.as_str().is_empty()) else {
        return "#".to_owned();
    };
    let address = format!("/{user_id}?noredirect=1&isUserEntityOverride=1");
    let encoded: String = byte_serialize(address.as_bytes()).collect();
    format!("/lightning/setup/ManageUsers/page?address={encoded}")
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionSet {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "Name", default, deserialize_with = "lenient::de_string")]
    pub name: String,
    #[serde(rename = "Label", default, deserialize_with = "lenient::de_opt_string")]
    pub label: Option<String>,
    #[serde(rename = "IsCustom", default, deserialize_with = "lenient::de_bool")]
    pub is_custom: bool,
}

impl PermissionSet {
    pub fn badge_class(&self) -> &'static str {
        if self.is_custom {
            "badge admin"
        } else {
            "badge active"
        }
    }

    pub fn permission_type(&self) -> &'static str {
        if self.is_custom { "Custom" } else { "Standard" }
    }

    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(default, deserialize_with = "lenient::de_list")]
    pub permissions: Vec<PermissionSet>,
    #[serde(default, deserialize_with = "lenient::de_list")]
    pub my_permissions: Vec<PermissionSet>,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub permission_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub user_permission_count: i64,
    #[serde(default, deserialize_with = "lenient::de_i64")]
    pub my_permission_count: i64,
    #[serde(default, deserialize_with = "lenient::de_bool")]
    pub can_view_all_perms: bool,
    #[serde(default, deserialize_with = "lenient::de_string")]
    pub view_type: String,
}

impl Permissions {
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }

    pub fn view_access_label(&self) -> &'static str {
        if self.can_view_all_perms {
            "Administrator View"
        } else {
            "User View (Assigned)"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub small_photo_url: String,
}

impl Default for UserInfo {
    /// Placeholder shown before the first load.
    fn default() -> Self {
        Self {
            id: None,
            name: LOADING.to_owned(),
            email: LOADING.to_owned(),
            small_photo_url: String::new(),
        }
    }
}

impl UserInfo {
    pub fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            email: String::new(),
            small_photo_url: String::new(),
        }
    }

    /// Fields present in `incoming` replace the current ones; `null` or a
    /// non-object blanks everything.
    pub fn merge(&mut self, incoming: &Value) {
        let Some(fields) = incoming.as_object() else {
            *self = Self::blank();
            return;
        };
        let read = |key: &str| fields.get(key).map(|value| lenient::text(Some(value)));
        if let Some(id) = read("Id") {
            self.id = id.map(UserId::new);
        }
        if let Some(name) = read("Name") {
            self.name = name.unwrap_or_default();
        }
        if let Some(email) = read("Email") {
            self.email = email.unwrap_or_default();
        }
        if let Some(photo) = read("SmallPhotoUrl") {
            self.small_photo_url = photo.unwrap_or_default();
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let mut user = Self::default();
        user.merge(value);
        user
    }

    pub fn profile_link(&self) -> String {
        profile_link(self.id.as_ref())
    }
}
