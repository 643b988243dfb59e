//! Tests for native-library grouping, in memory and over real APK files

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

use apkdetails::application::{format_architectures, load_architectures};
use apkdetails::domain::{group_architectures, ArchiveEntry};
use apkdetails::infrastructure::{InMemoryArchive, ZipArchiveReader};

fn entry_names(entries: &[ArchiveEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

fn create_apk(dir: &TempDir, files: &[(&str, usize)], dirs: &[&str]) -> PathBuf {
    let path = dir.path().join("app.apk");
    let mut zip = zip::ZipWriter::new(File::create(&path).expect("create apk"));
    let options = SimpleFileOptions::default();
    for name in dirs {
        zip.add_directory(*name, options).expect("add directory");
    }
    for (name, size) in files {
        zip.start_file(*name, options).expect("start file");
        zip.write_all(&vec![0u8; *size]).expect("write file");
    }
    zip.finish().expect("finish apk");
    path
}

#[test]
fn given_mixed_lib_entries_when_grouping_then_two_architectures_and_stray_excluded() {
    // Arrange
    let entries = vec![
        ArchiveEntry::file("lib/armeabi/libfoo.so", 100),
        ArchiveEntry::directory("lib/armeabi/"),
        ArchiveEntry::file("lib/x86/libbar.so", 200),
        ArchiveEntry::file("lib/stray.so", 300),
    ];

    // Act
    let archs = group_architectures(&entries);

    // Assert
    assert_eq!(archs.len(), 2);
    assert_eq!(archs[0].name, "armeabi");
    assert_eq!(entry_names(&archs[0].entries), vec!["lib/armeabi/libfoo.so"]);
    assert_eq!(archs[1].name, "x86");
    assert_eq!(entry_names(&archs[1].entries), vec!["lib/x86/libbar.so"]);
}

#[test]
fn given_no_lib_entries_when_grouping_then_empty() {
    let entries = vec![
        ArchiveEntry::file("classes.dex", 10),
        ArchiveEntry::file("AndroidManifest.xml", 10),
    ];

    assert!(group_architectures(&entries).is_empty());
    assert!(group_architectures(&Vec::<ArchiveEntry>::new()).is_empty());
}

#[test]
fn given_unordered_entries_when_grouping_then_sorted_by_arch_and_entry_name() {
    let entries = vec![
        ArchiveEntry::file("lib/x86_64/libz.so", 1),
        ArchiveEntry::file("lib/arm64-v8a/libz.so", 1),
        ArchiveEntry::file("lib/arm64-v8a/liba.so", 1),
        ArchiveEntry::directory("lib/armeabi-v7a/"),
    ];

    let archs = group_architectures(&entries);

    let names: Vec<&str> = archs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["arm64-v8a", "armeabi-v7a", "x86_64"]);
    assert_eq!(
        entry_names(&archs[0].entries),
        vec!["lib/arm64-v8a/liba.so", "lib/arm64-v8a/libz.so"]
    );
    assert!(archs[1].entries.is_empty());
}

#[test]
fn given_apk_file_when_loading_architectures_then_groups_native_libs() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let apk = create_apk(
        &temp,
        &[
            ("AndroidManifest.xml", 8),
            ("lib/x86/libnative.so", 2048),
            ("lib/armeabi-v7a/libnative.so", 1024),
            ("lib/readme.txt", 3),
        ],
        &["lib/mips/"],
    );

    // Act
    let archs = load_architectures(&ZipArchiveReader::new(apk)).unwrap();

    // Assert
    let names: Vec<&str> = archs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["armeabi-v7a", "mips", "x86"]);
    assert_eq!(archs[2].total_size(), 2048);
}

#[test]
fn given_corrupt_apk_when_loading_architectures_then_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.apk");
    std::fs::write(&path, b"not a zip").unwrap();

    let result = load_architectures(&ZipArchiveReader::new(path));

    assert!(result.is_err());
}

#[test]
fn given_architectures_when_formatting_then_lists_files_per_arch() {
    let archive = InMemoryArchive::new(vec![
        ArchiveEntry::file("lib/armeabi/libfoo.so", 512),
        ArchiveEntry::file("lib/stray.so", 1),
    ]);

    let text = format_architectures(&load_architectures(&archive).unwrap());

    assert!(text.starts_with("Native libraries: 1 architecture(s)\n"));
    assert!(text.contains("armeabi (1 file(s), 512 B)"));
    assert!(text.contains("  lib/armeabi/libfoo.so (512 B)"));
    assert!(!text.contains("stray"));
}
