//! Records received from the backend. Nothing here is cached beyond a single
//! page load.

use serde::{Deserialize, Deserializer, Serialize};

/// Go encodes a nil slice as `null`; read it as the empty default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named storage folder, optionally encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bucket {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub encrypted: bool,
}

/// Bucket plus usage numbers, as returned by `/api/auto-get-buckets`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BucketStatus {
    #[serde(flatten)]
    pub bucket: Bucket,
    #[serde(rename = "TotalSize")]
    pub total_size: i64,
    #[serde(rename = "FilesCount")]
    pub files_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub host: String,
    pub title: String,
    pub subtitle: String,
    pub path: String,
    pub api_delay: i64,
    pub recent_files_limit: i64,
    pub is_backup: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub backup_projects: Vec<String>,
    pub last_backup_at: String,
    pub download_export: bool,
    pub markdown_style: String,
}

/// `/api/project-status`: project config plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectStatus {
    #[serde(flatten)]
    pub project: Project,
    #[serde(rename = "Root")]
    pub root: String,
    #[serde(rename = "TotalSize")]
    pub total_size: i64,
    #[serde(rename = "FilesCount")]
    pub files_count: i64,
    #[serde(rename = "WaitingCheckCount")]
    pub waiting_check_count: i64,
    #[serde(rename = "DamagedCount")]
    pub damaged_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    pub id: i64,
    pub checksum: String,
    pub bucket_name: String,
    pub name: String,
    pub notes: String,
    pub keywords: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub file_type: String,
    pub like: i64,
    pub ctime: String,
    pub utime: String,
    pub checked: String,
    pub damaged: bool,
    pub deleted: bool,
    /// Set on `/api/file-info` and list responses when the bucket is encrypted.
    pub encrypted: bool,
}

impl File {
    pub fn is_image(&self) -> bool {
        self.file_type.starts_with("image")
    }

    /// `utime` cut to `YYYY-MM-DD HH:MM:SS`, the cursor for the next page.
    pub fn utime_cursor(&self) -> &str {
        self.utime.get(..19).unwrap_or(&self.utime)
    }

    /// `utime` cut to the date.
    pub fn udate(&self) -> &str {
        self.utime.get(..10).unwrap_or(&self.utime)
    }
}

/// `{text}` responses (`/api/waiting-folder`, `/api/login-status`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMsg {
    pub text: String,
}

impl TextMsg {
    pub fn is_logged_in(&self) -> bool {
        self.text == "logged-in"
    }
}

/// Error payload when an uploaded file clashes with one already in a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SameNameFiles {
    pub file: File,
    #[serde(rename = "errType")]
    pub err_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bucket_status_flattens_bucket_fields() {
        let status: BucketStatus = serde_json::from_value(json!({
            "id": 3, "name": "photos", "title": "Photos", "subtitle": "",
            "encrypted": true, "TotalSize": 4096, "FilesCount": 2
        }))
        .unwrap();
        assert_eq!(status.bucket.id, 3);
        assert!(status.bucket.encrypted);
        assert_eq!(status.total_size, 4096);
        assert_eq!(status.files_count, 2);
    }

    #[test]
    fn missing_fields_default() {
        let file: File = serde_json::from_value(json!({"name": "a.txt", "type": "text/plain"})).unwrap();
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.file_type, "text/plain");
        assert_eq!(file.size, 0);

        let status: ProjectStatus = serde_json::from_value(json!({"is_backup": true, "Root": "/p"})).unwrap();
        assert!(status.project.is_backup);
        assert_eq!(status.root, "/p");
    }

    #[test]
    fn null_backup_projects_read_as_empty() {
        let project: Project = serde_json::from_str(
            r#"{"host": "127.0.0.1:3000", "title": "Docs", "is_backup": false, "backup_projects": null}"#,
        )
        .unwrap();
        assert!(project.backup_projects.is_empty());
        assert_eq!(project.title, "Docs");

        let status: ProjectStatus =
            serde_json::from_str(r#"{"backup_projects": null, "Root": "/p", "FilesCount": 3}"#).unwrap();
        assert!(status.project.backup_projects.is_empty());
        assert_eq!(status.files_count, 3);

        let project: Project = serde_json::from_value(json!({"backup_projects": ["/mnt/a"]})).unwrap();
        assert_eq!(project.backup_projects, vec!["/mnt/a".to_string()]);
    }

    #[test]
    fn file_time_cursors() {
        let file = File { utime: "2023-05-01 10:20:30+08:00".into(), ..Default::default() };
        assert_eq!(file.utime_cursor(), "2023-05-01 10:20:30");
        assert_eq!(file.udate(), "2023-05-01");
        let file = File { utime: "short".into(), ..Default::default() };
        assert_eq!(file.utime_cursor(), "short");
        assert!(File { file_type: "image/png".into(), ..Default::default() }.is_image());
    }

    #[test]
    fn login_status_text() {
        assert!(TextMsg { text: "logged-in".into() }.is_logged_in());
        assert!(!TextMsg { text: "logged-out".into() }.is_logged_in());
    }
}
