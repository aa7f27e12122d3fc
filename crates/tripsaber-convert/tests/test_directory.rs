//! End-to-end conversion of a map directory on disk.

use std::fs;
use std::path::Path;

use tripsaber_convert::{
    build_document, write_outputs, DirectoryPackage, OutputLayout, SourcePackage,
};
use tripsaber_format::{MappingConfig, OutputDocument, SongIdentity};

fn write_wav(path: &Path, seconds: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..(8_000 * seconds) {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn write_map(dir: &Path) {
    let info = r#"{
        "_version": "2.0.0",
        "_songName": "Tune",
        "_songSubName": "Live",
        "_songAuthorName": "Band",
        "_levelAuthorName": "Mapper",
        "_beatsPerMinute": 100,
        "_previewStartTime": 5,
        "_previewDuration": 10,
        "_songFilename": "song.wav",
        "_difficultyBeatmapSets": [{
            "_beatmapCharacteristicName": "Standard",
            "_difficultyBeatmaps": [
                {"_difficulty": "Normal", "_difficultyRank": 3, "_beatmapFilename": "Normal.dat", "_noteJumpMovementSpeed": 10, "_noteJumpStartBeatOffset": 0},
                {"_difficulty": "Expert", "_difficultyRank": 7, "_beatmapFilename": "Expert.dat", "_noteJumpMovementSpeed": 16, "_noteJumpStartBeatOffset": 0}
            ]
        }]
    }"#;
    fs::write(dir.join("Info.dat"), info).unwrap();
    fs::write(
        dir.join("Normal.dat"),
        r#"{"version": "3.0.0", "colorNotes": [
            {"b": 1, "x": 1, "y": 0, "c": 0, "d": 1, "a": 0},
            {"b": 2, "x": 2, "y": 0, "c": 1, "d": 1, "a": 0}
        ]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("Expert.dat"),
        r#"{"version": "3.0.0", "colorNotes": [
            {"b": 1, "x": 0, "y": 2, "c": 0, "d": 1, "a": 0},
            {"b": 1.5, "x": 3, "y": 2, "c": 1, "d": 1, "a": 0},
            {"b": 2.75, "x": 1, "y": 1, "c": 0, "d": 1, "a": 0}
        ]}"#,
    )
    .unwrap();
    write_wav(&dir.join("song.wav"), 3);
}

#[test]
fn test_convert_directory_end_to_end() {
    let map = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_map(map.path());

    let package = DirectoryPackage::open(map.path()).unwrap();
    let config = MappingConfig::default();
    let identity = SongIdentity::derive(&package.content_hash().unwrap(), &config).unwrap();
    let document = build_document(&package, &config, &identity).unwrap();

    assert_eq!(document.difficulties().len(), 2);
    assert_eq!(document.event_count(), 5);
    assert!((document.metadata.song_full_length_in_seconds - 3.0).abs() < 1e-9);

    let info = package.info().unwrap();
    let layout = OutputLayout::for_song(&info);
    let written = write_outputs(
        &document,
        &layout,
        out.path(),
        &map.path().join(&info.song_filename),
    )
    .unwrap();

    assert_eq!(
        written,
        out.path()
            .join("Band • Tune Live - Mapper")
            .join("Band - Tune Live - Mapper.ats")
    );
    assert!(out
        .path()
        .join("Band • Tune Live - Mapper")
        .join("Tune - Band Live.ogg")
        .exists());

    let reread = OutputDocument::from_json(&fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(reread.metadata.song_id, identity.song_id);
    assert_eq!(reread.difficulties()[1].header.name, "Expert");
    assert_eq!(reread.difficulties()[1].events().len(), 3);
}

#[test]
fn test_same_map_same_bytes() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();
    write_map(a.path());
    write_map(b.path());
    let config = MappingConfig::default();

    let render = |dir: &Path| {
        let package = DirectoryPackage::open(dir).unwrap();
        let identity = SongIdentity::derive(&package.content_hash().unwrap(), &config).unwrap();
        build_document(&package, &config, &identity)
            .unwrap()
            .to_json()
            .unwrap()
    };
    assert_eq!(render(a.path()), render(b.path()));
}

#[test]
fn test_missing_difficulty_file_on_disk() {
    let map = tempfile::tempdir().unwrap();
    write_map(map.path());
    fs::remove_file(map.path().join("Expert.dat")).unwrap();

    let package = DirectoryPackage::open(map.path()).unwrap();
    let config = MappingConfig::default();
    let identity = SongIdentity::derive("fixed", &config).unwrap();
    let err = build_document(&package, &config, &identity).unwrap_err();
    assert!(err.to_string().contains("Expert.dat"), "{}", err);
}
