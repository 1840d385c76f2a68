/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use subhook::errors::HookError;
use subhook::file_utils::FileManager;
use crate::common;

/// Test that generate_output_path keeps the full stem and swaps the extension
#[test]
fn test_generate_output_path_withCaptionFile_shouldUseStemAndTxt() {
    let output_path = FileManager::generate_output_path(
        Path::new("/tmp/subs/My Video.en.vtt"),
        Path::new("/tmp/hooks"),
        "txt",
    );

    assert_eq!(output_path, Path::new("/tmp/hooks/My Video.en.txt"));
}

/// Test that a language suffix is stripped once, and only at the end
#[test]
fn test_title_from_stem_withLanguageSuffix_shouldStripIt() {
    let suffixes = ["en", "fr"];

    assert_eq!(FileManager::title_from_stem("My Video.en", &suffixes), "My Video");
    assert_eq!(FileManager::title_from_stem("My Video.fr", &suffixes), "My Video");
    assert_eq!(FileManager::title_from_stem("My Video", &suffixes), "My Video");
    assert_eq!(FileManager::title_from_stem("Opening.english", &suffixes), "Opening.english");
}

/// Test that find_files walks nested folders and matches extensions case-insensitively
#[test]
fn test_find_files_withNestedFolders_shouldFindAllCaptionFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "b.vtt", "")?;
    common::create_test_file(root, "a.VTT", "")?;
    common::create_test_file(root, "nested/deeper/c.vtt", "")?;
    common::create_test_file(root, "notes.txt", "")?;

    let files = FileManager::find_files(root, &["vtt"])?;
    let names: Vec<String> = files.iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names.len(), 3);
    assert!(names.contains(&"a.VTT".to_string()));
    assert!(names.contains(&"b.vtt".to_string()));
    assert!(names.contains(&"c.vtt".to_string()));
    assert!(!names.contains(&"notes.txt".to_string()));

    Ok(())
}

/// Test that a link loop is skipped instead of failing the walk
#[cfg(unix)]
#[test]
fn test_find_files_withSymlinkLoop_shouldSkipIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "loop/a.vtt", "")?;
    std::os::unix::fs::symlink(root.join("loop"), root.join("loop/back"))?;

    let files = FileManager::find_files(root, &["vtt"])?;

    assert_eq!(files, vec![root.join("loop/a.vtt")]);
    Ok(())
}

/// Test that list_files does not descend into sub-folders
#[test]
fn test_list_files_withSubfolder_shouldStayAtTopLevel() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "top.txt", "")?;
    common::create_test_file(root, "inner/below.txt", "")?;

    let files = FileManager::list_files(root, "txt")?;

    assert_eq!(files, vec![root.join("top.txt")]);
    Ok(())
}

/// Test that invalid UTF-8 is reported as an encoding error
#[test]
fn test_read_to_string_withInvalidUtf8_shouldReturnEncodingError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("bad.vtt");
    fs::write(&path, b"\xff\xfe\x00\xc3")?;

    match FileManager::read_to_string(&path) {
        Err(HookError::Encoding(reported)) => assert_eq!(reported, path),
        other => panic!("expected encoding error, got {:?}", other),
    }

    Ok(())
}

/// Test that reading a missing file is a read error
#[test]
fn test_read_to_string_withMissingFile_shouldReturnReadError() {
    let result = FileManager::read_to_string("./no_such_caption_12345.vtt");
    assert!(matches!(result, Err(HookError::Read { .. })));
}

/// Test that write_to_file creates missing parent folders
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a/b/hook.txt");

    FileManager::write_to_file(&path, "hook text")?;

    assert_eq!(fs::read_to_string(&path)?, "hook text");
    Ok(())
}

/// Test that ensure_dir and dir_exists agree
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let subdir = temp_dir.path().join("hooks");

    assert!(!FileManager::dir_exists(&subdir));
    FileManager::ensure_dir(&subdir)?;
    assert!(FileManager::dir_exists(&subdir));
    assert!(!FileManager::file_exists(&subdir));

    Ok(())
}
