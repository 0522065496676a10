use chrono::NaiveDate;
use schemagen::emit::{run_target, Target};
use schemagen::openapi::render_openapi;
use schemagen::settings::{OpenApiFormat, Settings};
use schemagen::sql::render_sql;
use schemagen::{load, render_diagram, Error, RenderError};

const SHOP: &str = r#"
database:
  name: Shop
  version: 1.0
tables:
  - name: users
    comment: users table
    columns:
      - { name: id, type: bigint, pk: true, auto_increment: true, not_null: true }
      - { name: name, type: varchar(100), not_null: true }
  - name: orders
    comment: orders
    columns:
      - { name: id, type: bigint, pk: true, auto_increment: true, not_null: true }
      - { name: user_id, type: bigint, not_null: true, fk: { table: users, column: id } }
      - { name: note, type: text, default: "n/a" }
    indexes:
      - { name: idx_orders_user, columns: [user_id] }
"#;

fn settings_in(dir: &std::path::Path) -> Settings {
    Settings {
        output_dir: dir.to_path_buf(),
        ..Settings::default()
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

#[test]
fn test_shop_scenario() {
    let doc = load(SHOP.as_bytes()).unwrap();

    let sql = render_sql(&doc).unwrap();
    assert!(sql.contains("`id` bigint AUTO_INCREMENT NOT NULL,"));
    assert!(sql.contains("PRIMARY KEY (`id`)"));
    assert!(sql.contains(
        "CONSTRAINT `fk_orders_user_id` FOREIGN KEY (`user_id`) REFERENCES `users`(`id`)"
    ));
    assert!(sql.contains("  INDEX `idx_orders_user` (`user_id`)\n"));

    let api = render_openapi(&doc);
    let users = &api.components.schemas["Users"];
    assert_eq!(users.required, vec!["id", "name"]);
    assert_eq!(users.properties["name"].typ, "string");
    assert_eq!(users.properties["name"].max_length, 100);

    let (uml, md) = render_diagram(&doc);
    assert!(uml.contains("users ||--o{ orders"));
    assert!(md.contains("users.id"));
}

#[test]
fn test_renderers_are_repeatable() {
    let doc = load(SHOP.as_bytes()).unwrap();
    assert_eq!(render_sql(&doc).unwrap(), render_sql(&doc).unwrap());
    assert_eq!(
        render_openapi(&doc).to_yaml().unwrap(),
        render_openapi(&doc).to_yaml().unwrap()
    );
    assert_eq!(render_diagram(&doc), render_diagram(&doc));
}

#[test]
fn test_all_targets_write_files() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let doc = load(SHOP.as_bytes()).unwrap();

    let mut written = Vec::new();
    for target in Target::ALL {
        written.extend(run_target(target, &doc, &settings, date()).unwrap());
    }

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "schema.sql",
            "openapi.yaml",
            "schema_er.puml",
            "schema.md",
            "schema_spec_20250131.xlsx"
        ]
    );

    let sql = std::fs::read_to_string(dir.path().join("schema.sql")).unwrap();
    assert!(sql.starts_with("SET FOREIGN_KEY_CHECKS = 0;"));
    let xlsx = std::fs::read(dir.path().join("schema_spec_20250131.xlsx")).unwrap();
    assert!(xlsx.starts_with(b"PK"));
}

#[test]
fn test_openapi_json_target() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        openapi_format: OpenApiFormat::Json,
        openapi_file: "openapi.json".to_string(),
        ..settings_in(dir.path())
    };
    let doc = load(SHOP.as_bytes()).unwrap();
    run_target(Target::Openapi, &doc, &settings, date()).unwrap();

    let text = std::fs::read_to_string(dir.path().join("openapi.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["info"]["title"], "Shop");
    assert_eq!(value["components"]["schemas"]["Orders"]["x-table-name"], "orders");
}

#[test]
fn test_one_failing_target_leaves_others_alone() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let doc = load(b"tables: [ { name: empty } ]").unwrap();

    let err = run_target(Target::Workbook, &doc, &settings, date()).unwrap_err();
    assert!(matches!(
        err,
        Error::Render(RenderError::EmptyFilterRange { .. })
    ));

    run_target(Target::Sql, &doc, &settings, date()).unwrap();
    assert!(dir.path().join("schema.sql").exists());
}

#[test]
fn test_workbook_with_case_colliding_tables() {
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_in(dir.path());
    let doc = load(
        b"tables: [ { name: users, columns: [ { name: id } ] }, { name: Users, columns: [ { name: id } ] } ]",
    )
    .unwrap();

    let written = run_target(Target::Workbook, &doc, &settings, date()).unwrap();
    assert_eq!(written.len(), 1);
    assert!(std::fs::read(&written[0]).unwrap().starts_with(b"PK"));
}
