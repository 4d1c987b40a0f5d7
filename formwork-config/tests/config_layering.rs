use std::fs;
use std::path::Path;

use formwork_config::{ConfigProvider, FileDiscovery};
use formwork_layout::{LabelPosition, SpanStrategy};
use serial_test::serial;
use tempfile::TempDir;

struct Dirs {
    _temp: TempDir,
    global: std::path::PathBuf,
    project: std::path::PathBuf,
}

fn dirs() -> Dirs {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("home").join(".formwork");
    let project = temp.path().join("project").join(".formwork");
    fs::create_dir_all(&global).unwrap();
    fs::create_dir_all(&project).unwrap();
    Dirs {
        _temp: temp,
        global,
        project,
    }
}

fn provider(dirs: &Dirs) -> ConfigProvider {
    ConfigProvider::new().with_discovery(FileDiscovery::with_directories(
        Some(dirs.project.clone()),
        Some(dirs.global.clone()),
    ))
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

#[test]
#[serial]
fn project_file_overrides_global_file() {
    let dirs = dirs();
    write(
        &dirs.global.join("form.toml"),
        "label_position = \"left\"\ninput_class_name = \"global\"\n",
    );
    write(&dirs.project.join("form.yaml"), "input_class_name: project\n");

    let config = provider(&dirs).load_form_config().unwrap();
    assert_eq!(config.label_position, LabelPosition::Left);
    assert_eq!(config.input_class_name, "project");
}

#[test]
#[serial]
fn explicit_file_overrides_discovered_files() {
    let dirs = dirs();
    write(&dirs.project.join("form.json"), r#"{"input_class_name": "project"}"#);
    let explicit = dirs.project.join("override.yaml");
    write(
        &explicit,
        "input_class_name: explicit\nspan_strategy:\n  kind: named\n",
    );

    let config = provider(&dirs).with_file(&explicit).load_form_config().unwrap();
    assert_eq!(config.input_class_name, "explicit");
    assert_eq!(config.span_strategy, SpanStrategy::Named);
}

#[test]
#[serial]
fn environment_overrides_every_file() {
    let dirs = dirs();
    write(&dirs.project.join("form.toml"), "label_position = \"left\"\n");
    std::env::set_var("FORMWORK_LABEL_POSITION", "top");

    let config = provider(&dirs).load_form_config();
    std::env::remove_var("FORMWORK_LABEL_POSITION");

    assert_eq!(config.unwrap().label_position, LabelPosition::Top);
}

#[test]
#[serial]
fn grid_columns_from_file() {
    let dirs = dirs();
    write(
        &dirs.project.join("form.toml"),
        "[span_strategy]\nkind = \"grid\"\ncolumns = 24\n",
    );

    let config = provider(&dirs).load_form_config().unwrap();
    assert_eq!(config.span_strategy, SpanStrategy::Grid { columns: 24 });
}

#[test]
#[serial]
fn files_are_read_fresh_on_each_load() {
    let dirs = dirs();
    let path = dirs.project.join("form.toml");
    let provider = provider(&dirs);

    write(&path, "input_class_name = \"first\"\n");
    assert_eq!(provider.load_form_config().unwrap().input_class_name, "first");

    write(&path, "input_class_name = \"second\"\n");
    assert_eq!(provider.load_form_config().unwrap().input_class_name, "second");
}

#[test]
#[serial]
fn camel_case_file_keys_load() {
    let dirs = dirs();
    write(
        &dirs.project.join("form.json"),
        r#"{"labelPosition": "left", "inputClassName": "ring"}"#,
    );

    let config = provider(&dirs).load_form_config().unwrap();
    assert_eq!(config.label_position, LabelPosition::Left);
    assert_eq!(config.input_class_name, "ring");
}
