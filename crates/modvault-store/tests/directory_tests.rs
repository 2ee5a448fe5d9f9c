// Test suite for directory-tree persistence (paths, readmes, documentation,
// package_imports), which is opt-in per upsert call

mod common;

use common::{module_count, setup_test_env, test_module};
use modvault_core::errors::ErrorKind;
use modvault_core::model::{Directory, DirectoryPackage, Documentation, LicenseInfo, Readme};
use modvault_store::search::NoopIndexer;
use modvault_store::upsert::{upsert_module, UpsertOptions};

fn directory(path: &str) -> Directory {
    Directory {
        path: path.to_string(),
        v1_path: path.to_string(),
        is_redistributable: true,
        licenses: vec![LicenseInfo {
            file_path: "LICENSE".to_string(),
            types: vec!["MIT".to_string()],
        }],
        readme: None,
        package: None,
    }
}

fn directory_options() -> UpsertOptions {
    UpsertOptions {
        write_directory_tables: true,
    }
}

#[test]
fn test_directory_flag_off_writes_nothing() {
    let (_temp_dir, mut conn) = setup_test_env();

    let mut module = test_module("example.com/widget", "v1.0.0");
    module.directories = vec![directory("example.com/widget")];

    upsert_module(&mut conn, &mut module, &NoopIndexer, &UpsertOptions::default()).unwrap();

    let paths: i64 = conn
        .query_row("SELECT COUNT(*) FROM paths", [], |row| row.get(0))
        .unwrap();
    assert_eq!(paths, 0);
    assert_eq!(module_count(&conn, "example.com/widget", "v1.0.0"), 1);
}

#[test]
fn test_directory_rows_written_when_enabled() {
    let (_temp_dir, mut conn) = setup_test_env();

    let mut module = test_module("example.com/widget", "v1.0.0");
    let mut root = directory("example.com/widget");
    root.readme = Some(Readme {
        file_path: "README.md".to_string(),
        contents: "# wid\0get".to_string(),
    });
    root.package = Some(DirectoryPackage {
        name: "widget".to_string(),
        imports: vec!["os".to_string(), "fmt".to_string()],
        documentation: Some(Documentation {
            goos: "linux".to_string(),
            goarch: "amd64".to_string(),
            synopsis: "A widget.".to_string(),
            html: "<p>widget</p>".to_string(),
        }),
    });
    let internal = directory("example.com/widget/internal");
    module.directories = vec![internal, root];

    upsert_module(&mut conn, &mut module, &NoopIndexer, &directory_options()).unwrap();

    // One paths row per directory; the package-bearing one carries its name.
    let (name, license_paths): (String, String) = conn
        .query_row(
            "SELECT name, license_paths FROM paths WHERE path = 'example.com/widget'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "widget");
    assert_eq!(license_paths, r#"["LICENSE"]"#);

    let bare_name: String = conn
        .query_row(
            "SELECT name FROM paths WHERE path = 'example.com/widget/internal'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(bare_name, "");

    // Readme hangs off the right path id, sanitized.
    let readme: String = conn
        .query_row(
            "SELECT r.contents FROM readmes r
             JOIN paths p ON p.id = r.path_id
             WHERE p.path = 'example.com/widget'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(readme, "# widget");

    let (goos, html): (String, String) = conn
        .query_row(
            "SELECT d.goos, d.html FROM documentation d
             JOIN paths p ON p.id = d.path_id
             WHERE p.path = 'example.com/widget'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(goos, "linux");
    assert_eq!(html, "<p>widget</p>");

    // Import edges keyed by path id, in sorted order.
    let mut stmt = conn
        .prepare(
            "SELECT i.to_path FROM package_imports i
             JOIN paths p ON p.id = i.path_id
             WHERE p.path = 'example.com/widget'
             ORDER BY i.to_path",
        )
        .unwrap();
    let imports = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    assert_eq!(imports, vec!["fmt", "os"]);
}

#[test]
fn test_directory_package_without_documentation_rolls_back() {
    let (_temp_dir, mut conn) = setup_test_env();

    let mut module = test_module("example.com/widget", "v1.0.0");
    let mut root = directory("example.com/widget");
    root.package = Some(DirectoryPackage {
        name: "widget".to_string(),
        imports: vec![],
        documentation: None,
    });
    module.directories = vec![root];

    let err = upsert_module(&mut conn, &mut module, &NoopIndexer, &directory_options())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    // The directory failure aborts the whole module write.
    assert_eq!(module_count(&conn, "example.com/widget", "v1.0.0"), 0);
    let paths: i64 = conn
        .query_row("SELECT COUNT(*) FROM paths", [], |row| row.get(0))
        .unwrap();
    assert_eq!(paths, 0);
}

#[test]
fn test_directories_replaced_with_module() {
    let (_temp_dir, mut conn) = setup_test_env();

    let mut module = test_module("example.com/widget", "v1.0.0");
    module.directories = vec![
        directory("example.com/widget"),
        directory("example.com/widget/old"),
    ];
    upsert_module(&mut conn, &mut module, &NoopIndexer, &directory_options()).unwrap();

    let mut replacement = test_module("example.com/widget", "v1.0.0");
    replacement.directories = vec![directory("example.com/widget")];
    upsert_module(&mut conn, &mut replacement, &NoopIndexer, &directory_options()).unwrap();

    let mut stmt = conn.prepare("SELECT path FROM paths ORDER BY path").unwrap();
    let paths = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    assert_eq!(paths, vec!["example.com/widget"]);
}
