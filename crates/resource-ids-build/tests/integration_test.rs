//! Integration tests for resource-ids-build.

use resource_ids_build::{
    CacheStore, GenerateError, GeneratorConfig, Status, cache_key, generate, generate_with_config,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Write one metadata file.
fn write_meta(dir: &Path, file: &str, tag: &str, name: &str, path: &str, guid: u64) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let file_path = dir.join(file);
    let content = format!(
        "tag: {}\nname: {}\npath: \"{}\"\nguid: {}\n",
        tag, name, path, guid
    );
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Create a temp workspace with `res/ui` holding two button documents.
fn setup() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let ui = dir.path().join("res/ui");
    write_meta(&ui, "btn_ok.meta", "ui", "btn_ok", "/button/ok", 1);
    write_meta(&ui, "btn_cancel.meta", "ui", "btn_cancel", "/button/cancel", 2);
    let out = dir.path().join("gen");
    (dir, ui, out)
}

fn set_mtime(path: &Path, secs: u64) {
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

#[test]
fn first_build_creates_artifacts_and_cache() {
    let (_dir, ui, out) = setup();

    let status = generate([&ui], &out).unwrap();
    assert_eq!(status, Status::Regenerated);

    assert!(out.join("resources.h").exists());
    assert!(out.join("resources.cpp").exists());

    let cache = CacheStore::open(out.join("resources.cache.toml")).unwrap();
    assert!(cache.get(&cache_key(&ui.join("btn_ok.meta"))).is_some());
    assert!(cache.get(&cache_key(&ui.join("btn_cancel.meta"))).is_some());
}

#[test]
fn generated_code_has_correct_structure() {
    let (_dir, ui, out) = setup();
    generate([&ui], &out).unwrap();

    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    let source = fs::read_to_string(out.join("resources.cpp")).unwrap();

    assert!(header.starts_with("#include <cstddef>\n\nstruct R__ {\n"));
    assert!(header.ends_with("extern R__ R;\n"));
    assert_eq!(header.matches("struct ui__ {").count(), 1);
    assert_eq!(header.matches("struct button__ {").count(), 1);
    assert!(header.contains("btn_ok"));
    assert!(header.contains("btn_cancel"));
    assert!(header.contains("= 0x1;"));
    assert!(header.contains("= 0x2;"));

    assert_eq!(source, "#include \"resources.h\"\n\nR__ R;\n");
}

#[test]
fn documents_follow_file_order_within_directory() {
    let (_dir, ui, out) = setup();
    generate([&ui], &out).unwrap();

    // btn_cancel.meta sorts before btn_ok.meta
    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    let cancel = header.find("struct cancel__").unwrap();
    let ok = header.find("struct ok__").unwrap();
    assert!(cancel < ok);
}

#[test]
fn unchanged_inputs_skip_generation() {
    let (_dir, ui, out) = setup();

    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);

    // mark the header so a rewrite would be visible
    let header_path = out.join("resources.h");
    fs::write(&header_path, "untouched").unwrap();

    assert_eq!(generate([&ui], &out).unwrap(), Status::UpToDate);
    assert_eq!(fs::read_to_string(&header_path).unwrap(), "untouched");

    // still up to date the third time
    assert_eq!(generate([&ui], &out).unwrap(), Status::UpToDate);
}

#[test]
fn modified_file_triggers_regeneration() {
    let (_dir, ui, out) = setup();
    let file = ui.join("btn_ok.meta");
    set_mtime(&file, 1_000);
    generate([&ui], &out).unwrap();

    write_meta(&ui, "btn_ok.meta", "ui", "btn_ok", "/button/ok", 0x42);
    set_mtime(&file, 2_000);

    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);
    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    assert!(header.contains("= 0x42;"));
}

#[test]
fn added_file_triggers_regeneration() {
    let (_dir, ui, out) = setup();
    generate([&ui], &out).unwrap();

    write_meta(&ui, "quit.meta", "ui", "quit", "", 3);

    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);
    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    assert!(header.contains("size_t quit"));
}

#[test]
fn removed_file_triggers_regeneration() {
    let (_dir, ui, out) = setup();
    generate([&ui], &out).unwrap();

    fs::remove_file(ui.join("btn_cancel.meta")).unwrap();

    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);
    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    assert!(!header.contains("btn_cancel"));
}

#[test]
fn missing_artifact_triggers_regeneration() {
    let (_dir, ui, out) = setup();
    generate([&ui], &out).unwrap();

    fs::remove_file(out.join("resources.cpp")).unwrap();

    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);
    assert!(out.join("resources.cpp").exists());
}

#[test]
fn force_regenerates() {
    let (_dir, ui, out) = setup();
    generate([&ui], &out).unwrap();

    let mut config = GeneratorConfig::new(vec![ui.clone()], &out);
    config.force = true;
    assert_eq!(generate_with_config(&config).unwrap(), Status::Regenerated);
}

#[test]
fn changed_settings_trigger_regeneration() {
    let (dir, ui, out) = setup();
    generate([&ui], &out).unwrap();

    let config_path = dir.path().join("resource-ids.toml");
    fs::write(&config_path, "wrapper = \"Res\"\nalign_column = 40\n").unwrap();
    let config = GeneratorConfig::new(vec![ui.clone()], &out)
        .with_file(&config_path)
        .unwrap();

    assert_eq!(generate_with_config(&config).unwrap(), Status::Regenerated);
    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    assert!(header.contains("struct Res__ {"));
    assert!(!header.contains("struct R__ {"));

    assert_eq!(generate_with_config(&config).unwrap(), Status::UpToDate);

    // back to the defaults
    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);
    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    assert!(header.contains("struct R__ {"));
}

#[test]
fn dropped_directory_triggers_regeneration() {
    let dir = TempDir::new().unwrap();
    let ui = dir.path().join("ui");
    let snd = dir.path().join("snd");
    write_meta(&ui, "a.meta", "ui", "btn_ok", "/button", 1);
    write_meta(&snd, "b.meta", "snd", "click", "/fx", 2);
    let out = dir.path().join("gen");

    generate([&ui, &snd], &out).unwrap();
    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);

    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    assert!(header.contains("struct ui__"));
    assert!(!header.contains("struct snd__"));

    let cache = CacheStore::open(out.join("resources.cache.toml")).unwrap();
    assert_eq!(cache.len(), 1);
    assert_eq!(generate([&ui], &out).unwrap(), Status::UpToDate);
}

#[test]
fn directory_order_decides_tag_order() {
    let dir = TempDir::new().unwrap();
    let ui = dir.path().join("ui");
    let snd = dir.path().join("snd");
    write_meta(&ui, "a.meta", "ui", "btn_ok", "/button", 1);
    write_meta(&snd, "a.meta", "snd", "click", "/fx", 2);

    let out_a = dir.path().join("gen_a");
    let out_b = dir.path().join("gen_b");
    generate([&ui, &snd], &out_a).unwrap();
    generate([&snd, &ui], &out_b).unwrap();

    let a = fs::read_to_string(out_a.join("resources.h")).unwrap();
    let b = fs::read_to_string(out_b.join("resources.h")).unwrap();

    assert!(a.find("struct ui__").unwrap() < a.find("struct snd__").unwrap());
    assert!(b.find("struct snd__").unwrap() < b.find("struct ui__").unwrap());
    // same placement either way
    assert!(a.contains("struct button__") && b.contains("struct button__"));
    assert!(a.contains("struct fx__") && b.contains("struct fx__"));
}

#[test]
fn same_file_name_in_two_directories() {
    let dir = TempDir::new().unwrap();
    let ui = dir.path().join("ui");
    let snd = dir.path().join("snd");
    write_meta(&ui, "a.meta", "ui", "x", "", 1);
    write_meta(&snd, "a.meta", "snd", "y", "", 2);
    let out = dir.path().join("gen");

    generate([&ui, &snd], &out).unwrap();
    let cache = CacheStore::open(out.join("resources.cache.toml")).unwrap();
    assert_eq!(cache.len(), 2);
}

#[test]
fn empty_and_missing_directories_are_not_errors() {
    let dir = TempDir::new().unwrap();
    let empty = dir.path().join("empty");
    fs::create_dir(&empty).unwrap();
    let missing = dir.path().join("missing");
    let out = dir.path().join("gen");

    assert_eq!(generate([&empty, &missing], &out).unwrap(), Status::Regenerated);
    let header = fs::read_to_string(out.join("resources.h")).unwrap();
    assert_eq!(header, "#include <cstddef>\n\nstruct R__ {\n\n};\n\nextern R__ R;\n");
}

#[test]
fn malformed_document_fails_and_is_retried() {
    let (_dir, ui, out) = setup();
    fs::write(ui.join("broken.meta"), "tag: [ui\n").unwrap();

    let result = generate([&ui], &out);
    match result.unwrap_err() {
        GenerateError::DocumentError(e) => {
            assert!(e.to_string().contains("broken.meta"), "Error should name the file");
        }
        other => panic!("Expected DocumentError, got: {:?}", other),
    }

    // the failed pass left no cache behind, so fixing the file regenerates
    assert!(!out.join("resources.cache.toml").exists());
    fs::remove_file(ui.join("broken.meta")).unwrap();
    assert_eq!(generate([&ui], &out).unwrap(), Status::Regenerated);
}

#[test]
fn corrupt_cache_is_an_error() {
    let (_dir, ui, out) = setup();
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("resources.cache.toml"), "not = = toml").unwrap();

    assert!(matches!(
        generate([&ui], &out),
        Err(GenerateError::CacheError(_))
    ));
}

#[test]
fn config_file_renames_artifacts() {
    let (dir, ui, out) = setup();
    let config_path = dir.path().join("resource-ids.toml");
    fs::write(
        &config_path,
        r#"
wrapper = "Res"
header = "res.h"
source = "res.cpp"
"#,
    )
    .unwrap();

    let config = GeneratorConfig::new(vec![ui], &out)
        .with_file(&config_path)
        .unwrap();
    generate_with_config(&config).unwrap();

    let header = fs::read_to_string(out.join("res.h")).unwrap();
    let source = fs::read_to_string(out.join("res.cpp")).unwrap();
    assert!(header.contains("struct Res__ {"));
    assert!(header.ends_with("extern Res__ Res;\n"));
    assert_eq!(source, "#include \"res.h\"\n\nRes__ Res;\n");
}
