use std::fs;

use tempfile::tempdir;
use ymtool::{load_file, save_file, DecodeOptions, Header, MetadataEdit, YmError, YmFile};

fn sample_file() -> YmFile {
    let header = Header {
        frame_count: 2,
        song_name: "Cuddly Demos".into(),
        author: "Mad Max".into(),
        ..Default::default()
    };
    YmFile::new(header, (0u8..32).collect()).unwrap()
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.ym");

    let file = sample_file();
    save_file(&path, &file).unwrap();

    let loaded = load_file(&path, DecodeOptions::strict()).unwrap();
    assert_eq!(loaded, file);
    assert_eq!(fs::read(&path).unwrap(), file.to_bytes().unwrap());
}

#[test]
fn save_replaces_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.ym");
    fs::write(&path, b"old contents that are longer than nothing").unwrap();

    let mut file = sample_file();
    save_file(&path, &file).unwrap();

    file.set_metadata(MetadataEdit {
        comment: Some("retagged".into()),
        ..Default::default()
    });
    save_file(&path, &file).unwrap();

    let loaded = load_file(&path, DecodeOptions::strict()).unwrap();
    assert_eq!(loaded.header().comment.to_string(), "retagged");
    assert_eq!(loaded.header().author.to_string(), "Mad Max");
    // No temporary files left behind
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = load_file(dir.path().join("absent.ym"), DecodeOptions::default());
    assert!(matches!(result, Err(YmError::Io(_))));
}

#[test]
fn load_packed_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("packed.ym");
    let mut lha = vec![0x24, 0x9c];
    lha.extend_from_slice(b"-lh5-");
    lha.extend_from_slice(&[0u8; 32]);
    fs::write(&path, &lha).unwrap();

    let err = load_file(&path, DecodeOptions::default()).unwrap_err();
    assert!(matches!(err, YmError::Compressed));
    assert!(!err.is_unsupported_version());
}

#[test]
fn failed_save_leaves_original() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.ym");
    let original = sample_file();
    save_file(&path, &original).unwrap();

    let mut broken = sample_file();
    broken.header_mut().frame_count = 5;
    assert!(matches!(
        save_file(&path, &broken),
        Err(YmError::FrameLengthMismatch { .. })
    ));
    assert_eq!(load_file(&path, DecodeOptions::strict()).unwrap(), original);
}
