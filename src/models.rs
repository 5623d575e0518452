// Request and response shapes for the build server. Field names follow the
// server's JSON, including its camelCase timestamp fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Server record id. The server returns integers, but strings are accepted
/// so a schema change does not break parsing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /sessions`. Only the token is used.
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Reporter,
    Deployer,
}

impl Role {
    /// Picks the role from the `create-user` flags. Admin wins over
    /// reporter, which wins over deployer.
    pub fn from_flags(admin: bool, reporter: bool, deployer: bool) -> Option<Role> {
        if admin {
            Some(Role::Admin)
        } else if reporter {
            Some(Role::Reporter)
        } else if deployer {
            Some(Role::Deployer)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Reporter => "reporter",
            Role::Deployer => "deployer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_role: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub registered: bool,
    /// One-time registration token, only present on the create response.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub user_role: Role,
}

#[derive(Serialize, Debug)]
pub struct CompleteRegistration<'a> {
    pub token: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub struct EnableUser {
    pub enabled: bool,
}

/// Processing state of a package build, as reported in `processed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Processing,
    Complete,
    Error,
    Unknown,
}

impl ProcessingStatus {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => ProcessingStatus::Processing,
            Some(1) => ProcessingStatus::Complete,
            Some(2) => ProcessingStatus::Error,
            _ => ProcessingStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Processing => "Processing",
            ProcessingStatus::Complete => "Complete",
            ProcessingStatus::Error => "Error",
            ProcessingStatus::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A package record. Timestamps are kept as raw JSON values because the
/// server mixes strings, numbers and nulls for them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Package {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub email: String,
    pub application_version: String,
    #[serde(default)]
    pub be_version: Option<String>,
    #[serde(default)]
    pub fe_version: Option<String>,
    #[serde(default)]
    pub build_timestamp: Value,
    #[serde(default)]
    pub timestamp: Value,
    #[serde(default)]
    pub processed: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default, rename = "processingCompletedAt")]
    pub processing_completed_at: Value,
    #[serde(default, rename = "createdAt")]
    pub created_at: Value,
}

impl Package {
    pub fn status(&self) -> ProcessingStatus {
        ProcessingStatus::from_code(self.processed)
    }

    /// Line shown in the interactive package picker.
    pub fn selection_label(&self) -> String {
        format!(
            "{}: {} - {}",
            self.email,
            self.application_version,
            display_value(&self.build_timestamp)
        )
    }
}

#[derive(Serialize, Debug)]
pub struct NewPackage<'a> {
    pub application_version: &'a str,
    pub be_version: &'a str,
    pub fe_version: &'a str,
}

/// Renders a loose JSON value for a table cell: strings without quotes,
/// null as empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_precedence_follows_flag_order() {
        assert_eq!(Role::from_flags(true, true, true), Some(Role::Admin));
        assert_eq!(Role::from_flags(false, true, true), Some(Role::Reporter));
        assert_eq!(Role::from_flags(false, false, true), Some(Role::Deployer));
        assert_eq!(Role::from_flags(false, false, false), None);
    }

    #[test]
    fn role_serializes_lowercase() {
        let body = NewUser {
            email: "a@x.com",
            name: "Ann",
            user_role: Role::Reporter,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "email": "a@x.com", "name": "Ann", "user_role": "reporter" })
        );
    }

    #[test]
    fn status_codes_map_to_labels() {
        assert_eq!(ProcessingStatus::from_code(Some(0)).as_str(), "Processing");
        assert_eq!(ProcessingStatus::from_code(Some(1)).as_str(), "Complete");
        assert_eq!(ProcessingStatus::from_code(Some(2)).as_str(), "Error");
        assert_eq!(ProcessingStatus::from_code(Some(7)).as_str(), "Unknown");
        assert_eq!(ProcessingStatus::from_code(None).as_str(), "Unknown");
    }

    #[test]
    fn package_parses_server_shape() {
        let pkg: Package = serde_json::from_value(json!({
            "id": 12,
            "email": "a@x.com",
            "application_version": "1.0",
            "be_version": "1.0",
            "fe_version": "1.0",
            "build_timestamp": "20240101120000",
            "processed": 1,
            "error_message": null,
            "processingCompletedAt": "2024-01-01T12:05:00Z",
            "createdAt": "2024-01-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(pkg.id, Some(RecordId::Number(12)));
        assert_eq!(pkg.status(), ProcessingStatus::Complete);
        assert_eq!(pkg.selection_label(), "a@x.com: 1.0 - 20240101120000");
        assert_eq!(display_value(&pkg.created_at), "2024-01-01T12:00:00Z");
        assert!(pkg.stdout.is_none());
    }

    #[test]
    fn record_id_accepts_strings() {
        let user: User = serde_json::from_value(json!({
            "id": "u-1",
            "email": "a@x.com"
        }))
        .unwrap();
        assert_eq!(user.id.to_string(), "u-1");
        assert!(!user.enabled);
    }

    #[test]
    fn display_value_strips_quotes_and_nulls() {
        assert_eq!(display_value(&json!("text")), "text");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&Value::Null), "");
    }
}
