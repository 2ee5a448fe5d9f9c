// Shared helpers for the store integration tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use modvault_core::model::{License, LicenseInfo, Module, Package};
use modvault_store::search::SearchIndexer;
use rusqlite::Connection;
use std::sync::Mutex;
use tempfile::TempDir;

/// Open a migrated file-backed database in a fresh temp dir
pub fn setup_test_env() -> (TempDir, Connection) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let mut conn = modvault_store::db::open(&db_path).unwrap();
    modvault_store::migrations::apply_migrations(&mut conn).unwrap();

    (temp_dir, conn)
}

pub fn commit_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_587_486_381, 0).unwrap()
}

/// A redistributable package with documentation and an MIT license pairing
pub fn test_package(path: &str, name: &str) -> Package {
    let mut pkg = Package::new(path.to_string(), name.to_string());
    pkg.synopsis = format!("Package {}.", name);
    pkg.v1_path = path.to_string();
    pkg.is_redistributable = true;
    pkg.documentation_html = Some(format!("<p>{}</p>", name));
    pkg.goos = "linux".to_string();
    pkg.goarch = "amd64".to_string();
    pkg.licenses = vec![LicenseInfo {
        file_path: "LICENSE".to_string(),
        types: vec!["MIT".to_string()],
    }];
    pkg
}

/// A redistributable module with one package named after the path's last
/// element, a readme, and one license
pub fn test_module(module_path: &str, version: &str) -> Module {
    let name = module_path.rsplit('/').next().unwrap_or(module_path);

    let mut module = Module::new(module_path.to_string(), version.to_string(), commit_time());
    module.is_redistributable = true;
    module.readme_file_path = "README.md".to_string();
    module.readme_contents = format!("# {}", name);
    module.source_info = serde_json::json!({"repo_url": format!("https://{}", module_path)});
    module.licenses = vec![License {
        file_path: "LICENSE".to_string(),
        contents: "MIT License".to_string(),
        types: vec!["MIT".to_string()],
        coverage: serde_json::json!({"percent": 100.0}),
    }];
    module.packages = vec![test_package(module_path, name)];
    module
}

pub fn module_count(conn: &Connection, module_path: &str, version: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM modules WHERE module_path = ?1 AND version = ?2",
        [module_path, version],
        |row| row.get(0),
    )
    .unwrap()
}

pub fn package_count(conn: &Connection, module_path: &str, version: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM packages WHERE module_path = ?1 AND version = ?2",
        [module_path, version],
        |row| row.get(0),
    )
    .unwrap()
}

pub fn license_count(conn: &Connection, module_path: &str, version: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM licenses WHERE module_path = ?1 AND version = ?2",
        [module_path, version],
        |row| row.get(0),
    )
    .unwrap()
}

pub fn import_count(conn: &Connection, module_path: &str, version: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM imports WHERE from_module_path = ?1 AND from_version = ?2",
        [module_path, version],
        |row| row.get(0),
    )
    .unwrap()
}

/// Latest-import targets for a module path, in lexical order
pub fn unique_import_targets(conn: &Connection, module_path: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(
            "SELECT to_path FROM imports_unique
             WHERE from_module_path = ?1 ORDER BY to_path",
        )
        .unwrap();
    let targets = stmt
        .query_map([module_path], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    targets
}

/// Indexer that records which modules it was handed
#[derive(Default)]
pub struct RecordingIndexer {
    pub calls: Mutex<Vec<(String, String)>>,
}

impl RecordingIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SearchIndexer for RecordingIndexer {
    fn upsert_search_documents(&self, module: &Module) -> modvault_store::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((module.module_path.clone(), module.version.clone()));
        Ok(())
    }
}
