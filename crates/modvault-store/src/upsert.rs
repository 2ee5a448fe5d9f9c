//! Transactional module upsert
//!
//! The delete-and-replace orchestrator: validates and redacts a module,
//! persists it in one write-locked transaction, and hands it to the search
//! indexer unless a newer alternative module path suppresses indexing.

#![allow(clippy::result_large_err)]

use std::collections::HashMap;

use modvault_core::errors::{Error, ErrorKind};
use modvault_core::model::{license_pairs, Module};
use modvault_core::redact::redact_module;
use modvault_core::sanitize::sanitize_text;
use modvault_core::validate::validate_module;
use rusqlite::types::Value;
use rusqlite::{Connection, Transaction};

use crate::bulk::{bulk_insert, bulk_insert_returning, OnConflict};
use crate::db::transact;
use crate::delete::delete_module;
use crate::errors::Result;
use crate::latest::is_latest_version;
use crate::search::{has_newer_alternative, SearchIndexer};

/// Options for one upsert call
#[derive(Debug, Clone, Default)]
pub struct UpsertOptions {
    /// Also write the directory tree (paths, readmes, documentation,
    /// package_imports)
    pub write_directory_tables: bool,
}

/// Validate, redact, persist, and index one module version
///
/// Persistence runs as a single immediate transaction: any prior record of
/// the same `(module_path, version)` is deleted and the module is written
/// from scratch, so a failure anywhere leaves no partial module behind.
/// After a successful commit the module goes to the search indexer, unless
/// a newer version of the same module path was recorded as an alternative
/// module path.
///
/// ## Arguments
///
/// - `conn`: Database connection
/// - `module`: Resolved module to persist; sorted in place into canonical
///   write order
/// - `indexer`: Search indexer invoked after a successful persist
/// - `options`: Per-call toggles
///
/// ## Errors
///
/// - `ErrorKind::InvalidArgument`: the submission fails validation, or a
///   package is missing documentation HTML
/// - `ErrorKind::Storage`: a database failure; the whole transaction rolls
///   back
pub fn upsert_module(
    conn: &mut Connection,
    module: &mut Module,
    indexer: &dyn SearchIndexer,
    options: &UpsertOptions,
) -> Result<()> {
    validate_module(module)?;
    redact_module(module);
    save_module(conn, module, options)?;

    // The guard only controls search visibility; the rows written above
    // stay queryable by direct lookup either way.
    if has_newer_alternative(conn, &module.module_path, &module.version)? {
        tracing::info!(
            module_path = %module.module_path,
            version = %module.version,
            "Skipping search indexing: newer version marked as alternative path"
        );
        return Ok(());
    }
    indexer.upsert_search_documents(module)
}

/// Persist the module in one transaction
fn save_module(conn: &mut Connection, module: &mut Module, options: &UpsertOptions) -> Result<()> {
    // Identical row order in every transaction keeps concurrent writers
    // acquiring row locks in one global order.
    module.sort_for_write();

    tracing::debug!(
        module_path = %module.module_path,
        version = %module.version,
        packages = module.packages.len(),
        licenses = module.licenses.len(),
        directories = module.directories.len(),
        "Saving module"
    );

    transact(conn, |tx| {
        // 1. Drop any prior record of this module version; foreign keys
        //    cascade to everything below it.
        delete_module(tx, &module.module_path, &module.version)?;

        // 2. Module row.
        let module_id = insert_module_row(tx, module)?;

        // 3. Licenses.
        insert_licenses(tx, module, module_id)?;

        // 4. Packages and import edges, including the latest-import
        //    replacement.
        insert_packages(tx, module)?;

        // 5. Directory tree, when enabled for this call.
        if options.write_directory_tables {
            insert_directories(tx, module, module_id)?;
        }

        Ok(())
    })
}

/// Insert the modules row and return its generated id
///
/// A surviving row of the same identity keeps its id while the mutable
/// columns take the incoming values; either way the id comes back.
fn insert_module_row(tx: &Transaction, module: &Module) -> Result<i64> {
    let source_info = serde_json::to_string(&module.source_info)?;

    let mut stmt = tx
        .prepare(
            "INSERT INTO modules (
                module_path, version, commit_time, readme_file_path,
                readme_contents, series_path, sort_version, version_type,
                source_info, redistributable, has_build_descriptor
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ON CONFLICT (module_path, version) DO UPDATE SET
                readme_file_path = excluded.readme_file_path,
                readme_contents = excluded.readme_contents,
                source_info = excluded.source_info,
                redistributable = excluded.redistributable
            RETURNING id",
        )
        .map_err(|e| {
            Error::new(ErrorKind::Storage)
                .with_op("insert_module_row")
                .with_module(module.module_path.clone(), module.version.clone())
                .with_message(format!("Failed to prepare module insert: {}", e))
        })?;

    let module_id: i64 = stmt
        .query_row(
            rusqlite::params![
                module.module_path,
                module.version,
                module.commit_time.timestamp(),
                module.readme_file_path,
                sanitize_text(&module.readme_contents),
                module.series_path(),
                module.sort_version(),
                module.version_type().as_str(),
                source_info,
                module.is_redistributable,
                module.has_build_descriptor,
            ],
            |row| row.get(0),
        )
        .map_err(|e| {
            Error::new(ErrorKind::Storage)
                .with_op("insert_module_row")
                .with_module(module.module_path.clone(), module.version.clone())
                .with_message(format!("Failed to insert module row: {}", e))
        })?;

    tracing::debug!(
        module_path = %module.module_path,
        version = %module.version,
        module_id = module_id,
        "Inserted module row"
    );

    Ok(module_id)
}

/// Bulk-insert the module's licenses
fn insert_licenses(tx: &Transaction, module: &Module, module_id: i64) -> Result<()> {
    let columns = [
        "module_id",
        "module_path",
        "version",
        "file_path",
        "contents",
        "types",
        "coverage",
    ];
    let mut rows: Vec<Value> = Vec::with_capacity(module.licenses.len() * columns.len());
    for license in &module.licenses {
        rows.push(Value::Integer(module_id));
        rows.push(Value::Text(module.module_path.clone()));
        rows.push(Value::Text(module.version.clone()));
        rows.push(Value::Text(license.file_path.clone()));
        rows.push(Value::Text(sanitize_text(&license.contents)));
        rows.push(Value::Text(serde_json::to_string(&license.types)?));
        rows.push(Value::Text(serde_json::to_string(&license.coverage)?));
    }

    bulk_insert(tx, "licenses", &columns, &rows, OnConflict::DoNothing)
}

/// Bulk-insert packages with their import edges
///
/// The latest-version decision happens here, after the module row exists,
/// so an incoming version compares against a row set that includes itself:
/// equality with the top row means latest. When latest, the module path's
/// latest-import edges are replaced wholesale.
fn insert_packages(tx: &Transaction, module: &Module) -> Result<()> {
    let is_latest = is_latest_version(tx, &module.module_path, &module.version)?;
    if is_latest {
        tx.execute(
            "DELETE FROM imports_unique WHERE from_module_path = ?1",
            [&module.module_path],
        )
        .map_err(|e| {
            Error::new(ErrorKind::Storage)
                .with_op("insert_packages")
                .with_module(module.module_path.clone(), module.version.clone())
                .with_message(format!("Failed to clear latest imports: {}", e))
        })?;
    }

    let package_columns = [
        "path",
        "synopsis",
        "name",
        "version",
        "module_path",
        "v1_path",
        "redistributable",
        "documentation",
        "license_types",
        "license_paths",
        "goos",
        "goarch",
        "commit_time",
    ];
    let import_columns = ["from_path", "from_module_path", "from_version", "to_path"];
    let unique_columns = ["from_path", "from_module_path", "to_path"];

    let mut package_rows: Vec<Value> =
        Vec::with_capacity(module.packages.len() * package_columns.len());
    let mut import_rows: Vec<Value> = Vec::new();
    let mut unique_rows: Vec<Value> = Vec::new();

    for package in &module.packages {
        let documentation = match &package.documentation_html {
            Some(html) => html.clone(),
            None => {
                return Err(Error::new(ErrorKind::InvalidArgument)
                    .with_op("insert_packages")
                    .with_module(module.module_path.clone(), module.version.clone())
                    .with_message(format!(
                        "package {} has no documentation HTML",
                        package.path
                    )));
            }
        };
        let (license_types, license_paths) = license_pairs(&package.licenses);

        package_rows.push(Value::Text(package.path.clone()));
        package_rows.push(Value::Text(package.synopsis.clone()));
        package_rows.push(Value::Text(package.name.clone()));
        package_rows.push(Value::Text(module.version.clone()));
        package_rows.push(Value::Text(module.module_path.clone()));
        package_rows.push(Value::Text(package.v1_path.clone()));
        package_rows.push(Value::Integer(package.is_redistributable as i64));
        package_rows.push(Value::Text(documentation));
        package_rows.push(Value::Text(serde_json::to_string(&license_types)?));
        package_rows.push(Value::Text(serde_json::to_string(&license_paths)?));
        package_rows.push(Value::Text(package.goos.clone()));
        package_rows.push(Value::Text(package.goarch.clone()));
        package_rows.push(Value::Integer(module.commit_time.timestamp()));

        for import in &package.imports {
            import_rows.push(Value::Text(package.path.clone()));
            import_rows.push(Value::Text(module.module_path.clone()));
            import_rows.push(Value::Text(module.version.clone()));
            import_rows.push(Value::Text(import.clone()));
            if is_latest {
                unique_rows.push(Value::Text(package.path.clone()));
                unique_rows.push(Value::Text(module.module_path.clone()));
                unique_rows.push(Value::Text(import.clone()));
            }
        }
    }

    bulk_insert(
        tx,
        "packages",
        &package_columns,
        &package_rows,
        OnConflict::DoNothing,
    )?;
    bulk_insert(
        tx,
        "imports",
        &import_columns,
        &import_rows,
        OnConflict::DoNothing,
    )?;
    if is_latest {
        bulk_insert(
            tx,
            "imports_unique",
            &unique_columns,
            &unique_rows,
            OnConflict::DoNothing,
        )?;
    }

    tracing::debug!(
        module_path = %module.module_path,
        version = %module.version,
        packages = module.packages.len(),
        imports = import_rows.len() / import_columns.len(),
        is_latest = is_latest,
        "Inserted packages"
    );

    Ok(())
}

/// Bulk-insert the directory tree
///
/// Paths go in first with RETURNING so the generated ids are known, then
/// readmes, documentation, and package imports hang off them by id.
fn insert_directories(tx: &Transaction, module: &Module, module_id: i64) -> Result<()> {
    let path_columns = [
        "module_id",
        "path",
        "v1_path",
        "name",
        "license_types",
        "license_paths",
        "redistributable",
    ];
    let mut path_rows: Vec<Value> =
        Vec::with_capacity(module.directories.len() * path_columns.len());
    for directory in &module.directories {
        let name = directory
            .package
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let (license_types, license_paths) = license_pairs(&directory.licenses);

        path_rows.push(Value::Integer(module_id));
        path_rows.push(Value::Text(directory.path.clone()));
        path_rows.push(Value::Text(directory.v1_path.clone()));
        path_rows.push(Value::Text(name));
        path_rows.push(Value::Text(serde_json::to_string(&license_types)?));
        path_rows.push(Value::Text(serde_json::to_string(&license_paths)?));
        path_rows.push(Value::Integer(directory.is_redistributable as i64));
    }

    let mut path_ids: HashMap<String, i64> = HashMap::new();
    bulk_insert_returning(
        tx,
        "paths",
        &path_columns,
        &path_rows,
        OnConflict::DoNothing,
        Some(&["id", "path"]),
        |row| {
            let id: i64 = row.get(0)?;
            let path: String = row.get(1)?;
            path_ids.insert(path, id);
            Ok(())
        },
    )?;

    let readme_columns = ["path_id", "file_path", "contents"];
    let doc_columns = ["path_id", "goos", "goarch", "synopsis", "html"];
    let import_columns = ["path_id", "to_path"];
    let mut readme_rows: Vec<Value> = Vec::new();
    let mut doc_rows: Vec<Value> = Vec::new();
    let mut import_rows: Vec<Value> = Vec::new();

    for directory in &module.directories {
        let path_id = match path_ids.get(&directory.path) {
            Some(id) => *id,
            None => {
                return Err(Error::new(ErrorKind::Internal)
                    .with_op("insert_directories")
                    .with_module(module.module_path.clone(), module.version.clone())
                    .with_message(format!("no generated id for path {}", directory.path)));
            }
        };

        if let Some(readme) = &directory.readme {
            readme_rows.push(Value::Integer(path_id));
            readme_rows.push(Value::Text(readme.file_path.clone()));
            readme_rows.push(Value::Text(sanitize_text(&readme.contents)));
        }

        if let Some(package) = &directory.package {
            let documentation = match &package.documentation {
                Some(doc) => doc,
                None => {
                    return Err(Error::new(ErrorKind::InvalidArgument)
                        .with_op("insert_directories")
                        .with_module(module.module_path.clone(), module.version.clone())
                        .with_message(format!(
                            "package at {} has no documentation",
                            directory.path
                        )));
                }
            };
            doc_rows.push(Value::Integer(path_id));
            doc_rows.push(Value::Text(documentation.goos.clone()));
            doc_rows.push(Value::Text(documentation.goarch.clone()));
            doc_rows.push(Value::Text(documentation.synopsis.clone()));
            doc_rows.push(Value::Text(documentation.html.clone()));

            for import in &package.imports {
                import_rows.push(Value::Integer(path_id));
                import_rows.push(Value::Text(import.clone()));
            }
        }
    }

    bulk_insert(tx, "readmes", &readme_columns, &readme_rows, OnConflict::DoNothing)?;
    bulk_insert(tx, "documentation", &doc_columns, &doc_rows, OnConflict::DoNothing)?;
    bulk_insert(
        tx,
        "package_imports",
        &import_columns,
        &import_rows,
        OnConflict::DoNothing,
    )?;

    tracing::debug!(
        module_path = %module.module_path,
        version = %module.version,
        paths = module.directories.len(),
        "Inserted directory tree"
    );

    Ok(())
}
