//! Typed request builders for every backend endpoint the pages call.
//!
//! Each function only builds the request; the caller attaches the alert and
//! continuations, then calls `send()`.
//!
//! List endpoints decode as `Option<Vec<_>>`: the backend sends `null` for
//! an empty list.

use serde::Serialize;

use super::http::{get, post, HttpRequest, Ignored};
use crate::models::{Bucket, BucketStatus, File, Project, ProjectStatus, TextMsg};

// ---------------- Request bodies ----------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdBody {
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBody {
    pub text: String,
}

impl TextBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathBody {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBucketBody {
    pub name: String,
    pub encrypted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateBucketBody {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilesQuery {
    pub id: i64,
    pub name: String,
    pub sort: String,
    pub utime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PicsQuery {
    pub id: i64,
    pub name: String,
    /// Cursor for the next page; empty for the first one.
    pub utime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateFileBody {
    pub id: i64,
    pub name: String,
    pub notes: String,
    pub keywords: String,
    pub like: i64,
    pub ctime: String,
    pub utime: String,
}

/// Target bucket by id or by name, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BucketRef {
    Id { bucket_id: i64 },
    Name { bucket_name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveFileBody {
    pub file_id: i64,
    #[serde(flatten)]
    pub bucket: BucketRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameWaitingFileBody {
    pub old_name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangePasswordBody {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckPasswordBody {
    pub old_password: String,
}

// ---------------- Session & password ----------------

pub fn login_status() -> HttpRequest<TextMsg> {
    get("/api/login-status")
}

pub fn admin_login(password: &str) -> HttpRequest<Ignored> {
    post("/api/admin-login", &TextBody::new(password))
}

pub fn logout() -> HttpRequest<Ignored> {
    get("/api/logout")
}

pub fn change_password(body: &ChangePasswordBody) -> HttpRequest<Ignored> {
    post("/api/change-password", body)
}

pub fn check_password(old_password: &str) -> HttpRequest<Ignored> {
    post("/api/check-password", &CheckPasswordBody { old_password: old_password.to_string() })
}

// ---------------- Projects ----------------

pub fn project_status() -> HttpRequest<ProjectStatus> {
    get("/api/project-status")
}

pub fn project_config() -> HttpRequest<Project> {
    get("/api/project-config")
}

pub fn project_info() -> HttpRequest<ProjectStatus> {
    get("/api/project-info")
}

pub fn change_project(id: i64) -> HttpRequest<Ignored> {
    post("/api/change-project", &IdBody { id })
}

pub fn add_project(path: &str) -> HttpRequest<Ignored> {
    post("/api/add-project", &PathBody { path: path.to_string() })
}

// ---------------- Buckets ----------------

pub fn create_bucket(body: &CreateBucketBody) -> HttpRequest<Bucket> {
    post("/api/create-bucket", body)
}

pub fn update_bucket_info(body: &UpdateBucketBody) -> HttpRequest<Ignored> {
    post("/api/update-bucket-info", body)
}

pub fn get_bucket(id: i64) -> HttpRequest<Bucket> {
    post("/api/get-bucket", &IdBody { id })
}

pub fn delete_bucket(id: i64) -> HttpRequest<Ignored> {
    post("/api/delete-bucket", &IdBody { id })
}

pub fn all_buckets() -> HttpRequest<Option<Vec<Bucket>>> {
    get("/api/all-buckets")
}

pub fn auto_get_buckets() -> HttpRequest<Option<Vec<BucketStatus>>> {
    get("/api/auto-get-buckets")
}

// ---------------- Files & pictures ----------------

pub fn files(query: &FilesQuery) -> HttpRequest<Option<Vec<File>>> {
    post("/api/files", query)
}

pub fn pics(query: &PicsQuery) -> HttpRequest<Option<Vec<File>>> {
    post("/api/pics", query)
}

pub fn recent_files() -> HttpRequest<Option<Vec<File>>> {
    get("/api/recent-files")
}

pub fn recent_files_in(bucket_id: i64) -> HttpRequest<Option<Vec<File>>> {
    post("/api/recent-files", &IdBody { id: bucket_id })
}

pub fn recent_pics() -> HttpRequest<Option<Vec<File>>> {
    get("/api/recent-pics")
}

pub fn recent_pics_in(bucket_id: i64) -> HttpRequest<Option<Vec<File>>> {
    post("/api/recent-pics", &IdBody { id: bucket_id })
}

pub fn damaged_files() -> HttpRequest<Option<Vec<File>>> {
    get("/api/damaged-files")
}

pub fn search_files(text: &str) -> HttpRequest<Option<Vec<File>>> {
    post("/api/search-files", &TextBody::new(text))
}

pub fn search_pics(text: &str) -> HttpRequest<Option<Vec<File>>> {
    post("/api/search-pics", &TextBody::new(text))
}

pub fn file_info(id: i64) -> HttpRequest<File> {
    post("/api/file-info", &IdBody { id })
}

pub fn update_file_info(body: &UpdateFileBody) -> HttpRequest<File> {
    post("/api/update-file-info", body)
}

/// Responds with the moved file.
pub fn move_file_to_bucket(body: &MoveFileBody) -> HttpRequest<File> {
    post("/api/move-file-to-bucket", body)
}

pub fn delete_file(id: i64) -> HttpRequest<Ignored> {
    post("/api/delete-file", &IdBody { id })
}

pub fn download_file(id: i64) -> HttpRequest<TextMsg> {
    post("/api/download-file", &IdBody { id })
}

pub fn download_small_pic(id: i64) -> HttpRequest<TextMsg> {
    post("/api/download-small-pic", &IdBody { id })
}

pub fn auto_get_keywords() -> HttpRequest<Option<Vec<String>>> {
    get("/api/auto-get-keywords")
}

// ---------------- Waiting folder ----------------

pub fn waiting_files() -> HttpRequest<Option<Vec<File>>> {
    get("/api/waiting-files")
}

pub fn imported_files() -> HttpRequest<Option<Vec<File>>> {
    get("/api/imported-files")
}

pub fn waiting_folder() -> HttpRequest<TextMsg> {
    get("/api/waiting-folder")
}

pub fn import_files(bucket_name: &str) -> HttpRequest<Ignored> {
    post("/api/import-files", &TextBody::new(bucket_name))
}

pub fn upload_new_files(bucket_name: &str) -> HttpRequest<Ignored> {
    post("/api/upload-new-files", &TextBody::new(bucket_name))
}

/// Replace the bucket copy of `name` with the waiting-folder file.
pub fn overwrite_file(name: &str) -> HttpRequest<Ignored> {
    post("/api/overwrite-file", &TextBody::new(name))
}

pub fn rename_waiting_file(body: &RenameWaitingFileBody) -> HttpRequest<Ignored> {
    post("/api/rename-waiting-file", body)
}

pub fn create_new_note() -> HttpRequest<TextMsg> {
    get("/api/create-new-note")
}

pub fn set_export(text: &str) -> HttpRequest<Ignored> {
    post("/api/set-export", &TextBody::new(text))
}

// ---------------- Backup projects ----------------

pub fn create_backup_project(path: &str) -> HttpRequest<Ignored> {
    post("/api/create-bk-proj", &TextBody::new(path))
}

pub fn backup_project_status(path: &str) -> HttpRequest<ProjectStatus> {
    post("/api/bk-project-status", &TextBody::new(path))
}

pub fn delete_backup_project(path: &str) -> HttpRequest<Ignored> {
    post("/api/delete-bk-proj", &TextBody::new(path))
}

/// Empty body on success; re-read the status afterwards.
pub fn sync_backup(path: &str) -> HttpRequest<Ignored> {
    post("/api/sync-backup", &TextBody::new(path))
}

pub fn check_now(path: &str) -> HttpRequest<ProjectStatus> {
    post("/api/check-now", &TextBody::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::http::Method;

    #[test]
    fn bodies_match_backend_field_names() {
        let req = move_file_to_bucket(&MoveFileBody {
            file_id: 5,
            bucket: BucketRef::Name { bucket_name: "photos".into() },
        });
        assert_eq!(req.body(), Some(r#"{"file_id":5,"bucket_name":"photos"}"#));

        let req = move_file_to_bucket(&MoveFileBody { file_id: 5, bucket: BucketRef::Id { bucket_id: 2 } });
        assert_eq!(req.body(), Some(r#"{"file_id":5,"bucket_id":2}"#));

        let req = change_password(&ChangePasswordBody {
            old_password: "abc123".into(),
            new_password: "xyz".into(),
        });
        assert_eq!(req.body(), Some(r#"{"old_password":"abc123","new_password":"xyz"}"#));
    }

    #[test]
    fn methods_and_paths() {
        let req = auto_get_buckets();
        assert_eq!((req.method(), req.path()), (Method::Get, "/api/auto-get-buckets"));

        let req = delete_bucket(9);
        assert_eq!((req.method(), req.path()), (Method::Post, "/api/delete-bucket"));
        assert_eq!(req.body(), Some(r#"{"id":9}"#));

        let req = sync_backup("/mnt/backup");
        assert_eq!((req.method(), req.path()), (Method::Post, "/api/sync-backup"));

        let req = create_backup_project("/mnt/backup");
        assert_eq!(req.path(), "/api/create-bk-proj");
        assert_eq!(req.body(), Some(r#"{"text":"/mnt/backup"}"#));
    }
}
