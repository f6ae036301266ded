mod common;

use common::RecordingExecutor;
use proptest::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vidkit_core::convert::{
    batch_convert, converted_output_path, convert_video, discover_videos, is_video_file,
    ConvertSettings,
};
use vidkit_core::{ToolkitConfig, VidError};

/// Generate valid video file names with allowed extensions
fn video_file_name() -> impl Strategy<Value = String> {
    let extensions = vec![".mp4", ".mov", ".avi", ".mkv", ".flv", ".wmv", ".MP4", ".MKV"];
    ("[a-zA-Z0-9-]{3,20}", prop::sample::select(extensions))
        .prop_map(|(name, ext)| format!("{}{}", name, ext))
}

/// Generate non-video file names
fn non_video_file_name() -> impl Strategy<Value = String> {
    let extensions = vec![".txt", ".jpg", ".png", ".nfo", ".srt", ".m4v"];
    ("[a-zA-Z0-9-]{3,20}", prop::sample::select(extensions))
        .prop_map(|(name, ext)| format!("{}{}", name, ext))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Discovery returns exactly the top-level videos, sorted by name.
    #[test]
    fn prop_discovery_finds_top_level_videos(
        videos in prop::collection::hash_set(video_file_name(), 0..12),
        others in prop::collection::hash_set(non_video_file_name(), 0..6),
    ) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        for name in videos.iter().chain(others.iter()) {
            fs::write(root.join(name), "content").unwrap();
        }
        let nested = root.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("deep.mp4"), "content").unwrap();

        let found = discover_videos(root).unwrap();

        let mut expected: Vec<PathBuf> = videos.iter().map(|n| root.join(n)).collect();
        expected.sort();
        let mut found_sorted = found.clone();
        found_sorted.sort();
        prop_assert_eq!(found_sorted, expected);

        let names: Vec<_> = found.iter().map(|p| p.file_name().unwrap().to_owned()).collect();
        let mut sorted_names = names.clone();
        sorted_names.sort();
        prop_assert_eq!(names, sorted_names);
    }

    #[test]
    fn prop_output_path_sits_next_to_input(
        stem in "[a-zA-Z0-9_-]{1,20}",
        input_ext in prop::sample::select(vec!["mov", "avi", "mkv"]),
        output_ext in prop::sample::select(vec!["mp4", "webm", "mkv"]),
    ) {
        let input = PathBuf::from("/library").join(format!("{}.{}", stem, input_ext));
        let output = converted_output_path(&input, output_ext);

        prop_assert_eq!(output.parent(), input.parent());
        let expected_name = format!("{}_converted.{}", stem, output_ext);
        prop_assert_eq!(
            output.file_name().and_then(|n| n.to_str()),
            Some(expected_name.as_str())
        );
    }
}

#[test]
fn test_video_extension_detection() {
    assert!(is_video_file(Path::new("a.mp4")));
    assert!(is_video_file(Path::new("a.WMV")));
    assert!(is_video_file(Path::new("dir/a.flv")));
    assert!(!is_video_file(Path::new("a.txt")));
    assert!(!is_video_file(Path::new("mp4")));
}

#[test]
fn test_discovery_skips_previous_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("clip.mov"), "v").unwrap();
    fs::write(root.join("clip_converted.mp4"), "v").unwrap();

    let found = discover_videos(root).unwrap();
    assert_eq!(found, vec![root.join("clip.mov")]);
}

#[test]
fn test_discovery_rejects_non_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("single.mp4");
    fs::write(&file, "v").unwrap();

    assert!(matches!(
        discover_videos(&file),
        Err(VidError::InvalidInput(_))
    ));
}

#[test]
fn test_batch_continues_past_failures() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.avi"), "v").unwrap();
    fs::write(root.join("b.mkv"), "v").unwrap();
    fs::write(root.join("notes.txt"), "n").unwrap();

    let config = ToolkitConfig::default();
    let settings = ConvertSettings::from_config(&config);
    let executor = RecordingExecutor::failing(1, "Unknown encoder");

    let summary = batch_convert(&executor, &config, root, "mp4", &settings).unwrap();

    assert_eq!(executor.calls(), 2);
    assert!(summary.converted.is_empty());
    assert_eq!(summary.failed.len(), 2);
    assert!(!summary.all_succeeded());
    assert_eq!(summary.failed[0].0, root.join("a.avi"));
    assert!(summary.failed[0].1.contains("Unknown encoder"));
}

#[test]
fn test_batch_success_collects_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.avi"), "v").unwrap();
    fs::write(root.join("b.mkv"), "v").unwrap();

    let config = ToolkitConfig::default();
    let settings = ConvertSettings {
        video_codec: "libx265".to_string(),
        crf: 28,
    };
    let executor = RecordingExecutor::succeeding();

    let summary = batch_convert(&executor, &config, root, "webm", &settings).unwrap();

    assert!(summary.all_succeeded());
    assert_eq!(
        summary.converted,
        vec![root.join("a_converted.webm"), root.join("b_converted.webm")]
    );

    let command = executor.last().command;
    assert!(command.windows(2).any(|w| w[0] == "-c:v" && w[1] == "libx265"));
    assert!(command.windows(2).any(|w| w[0] == "-crf" && w[1] == "28"));
    assert_eq!(
        command.last().map(PathBuf::from),
        Some(root.join("b_converted.webm"))
    );
}

#[test]
fn test_single_convert_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = ToolkitConfig::default();
    let executor = RecordingExecutor::succeeding();

    let result = convert_video(
        &executor,
        &config,
        &temp_dir.path().join("gone.mov"),
        &temp_dir.path().join("gone_converted.mp4"),
        &ConvertSettings::from_config(&config),
    );

    assert!(matches!(result, Err(VidError::InvalidInput(_))));
    assert_eq!(executor.calls(), 0);
}

#[test]
fn test_single_convert_failure_carries_diagnostics() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("broken.avi");
    fs::write(&input, "v").unwrap();

    let config = ToolkitConfig::default();
    let executor = RecordingExecutor::failing(183, "moov atom not found");

    let err = convert_video(
        &executor,
        &config,
        &input,
        &temp_dir.path().join("broken_converted.mp4"),
        &ConvertSettings::from_config(&config),
    )
    .unwrap_err();

    match err {
        VidError::ConvertFailed {
            input: failed_input,
            status,
            diagnostics,
        } => {
            assert_eq!(failed_input, input);
            assert_eq!(status, "exit code 183");
            assert_eq!(diagnostics, "moov atom not found");
        }
        other => panic!("expected ConvertFailed, got {:?}", other),
    }
}
