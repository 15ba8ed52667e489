//! Integration tests for batch conversion.

use std::fs;
use std::path::Path;

use lbpk::common::Error as FormatError;
use lbpk::{discover_tracks, Converter, Error, DATA_FILE_NAME};

/// Build a well-formed `data.bin` for a track with the given name and id.
fn build_archive(name: &[u8], id: [u8; 4], description: &[u8]) -> Vec<u8> {
    let mut cm2 = vec![0u8; 116];
    cm2[44..44 + name.len()].copy_from_slice(name);
    cm2[112..116].copy_from_slice(&id);
    cm2.extend_from_slice(b"\x01\x02");
    cm2.extend_from_slice(name);
    cm2.push(0);
    cm2.extend_from_slice(description);
    cm2.push(0);
    let payload = (cm2.len() - 16) as u16;
    cm2[6..8].copy_from_slice(&payload.to_be_bytes());
    cm2[10..12].copy_from_slice(&payload.to_be_bytes());

    let trk_len = 40u32;
    let mut trk = vec![0x54u8; trk_len as usize];
    trk[20..24].copy_from_slice(&trk_len.to_be_bytes());

    let nav = vec![0x4Eu8; 12];
    let hud = vec![0x48u8; 9];

    let mut data = vec![0x43u8; 20];
    data[12..16].copy_from_slice(&(nav.len() as u32).to_be_bytes());
    data.extend_from_slice(&trk);
    data.extend_from_slice(&cm2);
    data.extend_from_slice(&nav);
    data.extend_from_slice(&hud);
    data
}

fn write_track(archive: &Path, id: &str, data: &[u8]) {
    let dir = archive.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(DATA_FILE_NAME), data).unwrap();
}

#[test]
fn converts_track_with_exact_file_names() {
    let archive = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let data = build_archive(b"Lava Loop #2", [0x00, 0x0A, 0xFF, 0x10], b"Hot corners");
    write_track(archive.path(), "4711", &data);

    let sources = discover_tracks(archive.path()).unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].id, "4711");

    let converted = Converter::new(output.path()).convert(&sources[0]).unwrap();
    assert_eq!(converted.base_filename, "LAVALOOP2_000AFF10");
    assert_eq!(converted.metadata.description, "Hot corners");

    let track_dir = output.path().join("4711");
    let mut written: Vec<_> = fs::read_dir(&track_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    written.sort();
    assert_eq!(
        written,
        [
            "LAVALOOP2_000AFF10.CM2",
            "LAVALOOP2_000AFF10.HUD",
            "LAVALOOP2_000AFF10.NAV",
            "LAVALOOP2_000AFF10.TRK",
        ]
    );

    // Concatenating header + segments gives back the original archive.
    let mut rebuilt = data[..20].to_vec();
    for ext in ["TRK", "CM2", "NAV", "HUD"] {
        rebuilt.extend(fs::read(track_dir.join(format!("LAVALOOP2_000AFF10.{ext}"))).unwrap());
    }
    assert_eq!(rebuilt, data);
    assert_eq!(converted.segment_lens, [40, 116 + 2 + 12 + 1 + 11 + 1, 12, 9]);
}

#[test]
fn discovery_ignores_files_and_sorts() {
    let archive = tempfile::tempdir().unwrap();
    fs::create_dir(archive.path().join("b")).unwrap();
    fs::create_dir(archive.path().join("a")).unwrap();
    fs::write(archive.path().join("notes.txt"), b"not a track").unwrap();

    let ids: Vec<_> = discover_tracks(archive.path())
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn folder_without_data_is_skipped() {
    let archive = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::create_dir(archive.path().join("empty")).unwrap();

    let sources = discover_tracks(archive.path()).unwrap();
    let err = Converter::new(output.path()).convert(&sources[0]).unwrap_err();

    assert!(err.is_skip());
    assert!(!output.path().join("empty").exists());
}

#[test]
fn corrupt_archive_writes_nothing() {
    let archive = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut data = build_archive(b"Broken", [1, 2, 3, 4], b"x");
    // CM2 starts at 60; corrupt the second size copy.
    data[60 + 10] ^= 0xFF;
    write_track(archive.path(), "bad", &data);

    let sources = discover_tracks(archive.path()).unwrap();
    let err = Converter::new(output.path()).convert(&sources[0]).unwrap_err();

    assert!(matches!(
        err,
        Error::Format(FormatError::HeaderSizeMismatch { .. })
    ));
    assert!(!err.is_skip());
    assert!(!output.path().join("bad").exists());
}

#[test]
fn empty_sanitized_name_is_refused() {
    let archive = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_track(archive.path(), "7", &build_archive(b"!!!", [9, 9, 9, 9], b"d"));

    let sources = discover_tracks(archive.path()).unwrap();
    let err = Converter::new(output.path()).convert(&sources[0]).unwrap_err();

    assert!(matches!(err, Error::EmptyTrackName { .. }));
    assert!(!output.path().join("7").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let archive = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_track(archive.path(), "1", &build_archive(b"Dry", [0; 4], b""));

    let sources = discover_tracks(archive.path()).unwrap();
    let converted = Converter::new(output.path())
        .dry_run(true)
        .convert(&sources[0])
        .unwrap();

    assert_eq!(converted.base_filename, "DRY_00000000");
    assert!(converted.files.is_empty());
    assert!(!output.path().join("1").exists());
}

#[test]
fn failed_write_leaves_no_track_files() {
    let archive = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_track(
        archive.path(),
        "4711",
        &build_archive(b"Lava Loop #2", [0x00, 0x0A, 0xFF, 0x10], b"Hot corners"),
    );

    // A directory in place of the CM2 file makes the second write fail after
    // the TRK file is already on disk.
    let track_dir = output.path().join("4711");
    fs::create_dir_all(track_dir.join("LAVALOOP2_000AFF10.CM2")).unwrap();

    let sources = discover_tracks(archive.path()).unwrap();
    let err = Converter::new(output.path()).convert(&sources[0]).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));

    let leftovers: Vec<_> = fs::read_dir(&track_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file())
        .collect();
    assert!(leftovers.is_empty(), "partial output left: {leftovers:?}");
    for ext in ["TRK", "NAV", "HUD"] {
        assert!(!track_dir.join(format!("LAVALOOP2_000AFF10.{ext}")).exists());
    }
}
