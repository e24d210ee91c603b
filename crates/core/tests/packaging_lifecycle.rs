//! Packaging lifecycle integration tests.
//!
//! Exercise the full flow with the mock torrent writer: intake a download,
//! preview, create the release, then find it in the library and delete it.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use packrat_core::{
    library,
    naming::ReleaseFields,
    packager::PackagerError,
    testing::{MockProber, MockTorrentWriter},
    Config, MediaKind, Packager, SceneParser,
};

struct TestHarness {
    config: Config,
    packager: Packager,
    writer: Arc<MockTorrentWriter>,
    parser: SceneParser,
    prober: MockProber,
    _output_dir: TempDir,
    source_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let output_dir = TempDir::new().expect("Failed to create output dir");
        let source_dir = TempDir::new().expect("Failed to create source dir");
        let config = Config {
            output_directory: output_dir.path().to_path_buf(),
            trackers: vec!["http://tracker.example/announce".to_string()],
            ..Config::default()
        };
        let writer = Arc::new(MockTorrentWriter::new());
        let packager = Packager::new(Arc::new(SceneParser::new()), writer.clone());
        Self {
            config,
            packager,
            writer,
            parser: SceneParser::new(),
            prober: MockProber::failing(),
            _output_dir: output_dir,
            source_dir,
        }
    }

    async fn drop_file(&self, name: &str) -> std::path::PathBuf {
        let path = self.source_dir.path().join(name);
        tokio::fs::write(&path, vec![0u8; 4096]).await.unwrap();
        path
    }
}

fn movie_fields() -> ReleaseFields {
    ReleaseFields {
        title: "The Thing".to_string(),
        year: "1982".to_string(),
        resolution: "1080p".to_string(),
        source: "BluRay".to_string(),
        video_codec: "x265".to_string(),
        release_group: "GRP".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn movie_intake_preview_create_roundtrip() {
    let h = TestHarness::new();
    let dropped = h
        .drop_file("the.thing.1982.1080p.bluray.x264-OLD.mkv")
        .await;

    // Intake stages the file into its own folder under the output dir.
    let intake = library::intake_file(&h.config, &h.parser, &h.prober, dropped.to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(intake.media_type, MediaKind::Movie);
    assert_eq!(intake.parsed.title.as_deref(), Some("The Thing"));
    assert!(intake.target_folder.is_dir());
    assert!(intake.nfo_path.exists());

    let staging = intake.target_folder.to_string_lossy().into_owned();

    // Preview renders names without mutating anything.
    let preview = h
        .packager
        .preview_movie(&h.config, &staging, &movie_fields())
        .await
        .unwrap();
    assert_eq!(preview.base_name, "The.Thing.1982.1080p.BluRay.x265-GRP");
    assert!(preview.warnings.is_empty());
    assert!(Path::new(&staging).exists());
    assert!(h.writer.calls().is_empty());

    // Create renames the file and folder, replaces the NFO, writes the torrent.
    let report = h
        .packager
        .create_movie(&h.config, &staging, &movie_fields())
        .await
        .unwrap();
    assert_eq!(report.base_name, "The.Thing.1982.1080p.BluRay.x265-GRP");

    let release = Path::new(&report.folder_path);
    assert!(release.ends_with("The.Thing.1982.1080p.BluRay.x265-GRP"));
    assert!(release
        .join("The.Thing.1982.1080p.BluRay.x265-GRP.mkv")
        .exists());
    let nfo = tokio::fs::read_to_string(
        release.join("The.Thing.1982.1080p.BluRay.x265-GRP.NFO"),
    )
    .await
    .unwrap();
    assert!(nfo.contains("Title       : The Thing"));

    let calls = h.writer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].trackers, h.config.trackers);

    // The release shows up in the library listing.
    let releases = library::list_releases(&h.config).await.unwrap();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].name, "The.Thing.1982.1080p.BluRay.x265-GRP");

    // And can be soft-deleted.
    let method = library::delete_release(&h.config, &report.folder_path)
        .await
        .unwrap();
    assert_eq!(method, library::DeleteMethod::Trash);
    assert!(library::list_releases(&h.config).await.unwrap().is_empty());
}

#[tokio::test]
async fn season_intake_and_create_batch_renames() {
    let h = TestHarness::new();
    let season_dir = h.source_dir.path().join("the.wire.s01.720p.web");
    tokio::fs::create_dir(&season_dir).await.unwrap();
    for name in [
        "the.wire.s01e01.720p.mkv",
        "the.wire.s01e02.720p.mkv",
        "the.wire.s01e03.720p.mkv",
    ] {
        tokio::fs::write(season_dir.join(name), vec![0u8; 1024])
            .await
            .unwrap();
    }

    let intake = library::intake_season(
        &h.config,
        &h.parser,
        &h.prober,
        season_dir.to_str().unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(intake.episode_count, 3);
    assert_eq!(intake.media_type, MediaKind::SeasonPack);
    assert_eq!(intake.total_size, "3.00 KB");

    let fields = ReleaseFields {
        title: "The Wire".to_string(),
        season: Some(1),
        resolution: "720p".to_string(),
        source: "WEB-DL".to_string(),
        release_group: "GRP".to_string(),
        ..Default::default()
    };
    let staging = intake.target_folder.to_string_lossy().into_owned();
    let report = h
        .packager
        .create_season(&h.config, &staging, &fields)
        .await
        .unwrap();

    assert_eq!(report.base_name, "The.Wire.S01.720p.WEB-DL-GRP");
    assert_eq!(report.renamed_files.len(), 3);
    let release = Path::new(&report.folder_path);
    for episode in 1..=3 {
        assert!(release
            .join(format!("The.Wire.S01E{:02}.720p.WEB-DL-GRP.mkv", episode))
            .exists());
    }
    let nfo = tokio::fs::read_to_string(release.join("The.Wire.S01.720p.WEB-DL-GRP.NFO"))
        .await
        .unwrap();
    assert!(nfo.contains("Type        : Season Pack"));
    assert!(nfo.contains("The.Wire.S01E02.720p.WEB-DL-GRP.mkv"));
}

#[tokio::test]
async fn conflict_detector_sees_created_release() {
    let h = TestHarness::new();
    let dropped = h.drop_file("Movie.Name.2020.mkv").await;

    let clear = library::check_file_conflict(&h.config, dropped.to_str().unwrap())
        .await
        .unwrap();
    assert!(!clear.conflict);

    library::intake_file(&h.config, &h.parser, &h.prober, dropped.to_str().unwrap())
        .await
        .unwrap();

    let hit = library::check_file_conflict(&h.config, dropped.to_str().unwrap())
        .await
        .unwrap();
    assert!(hit.conflict);
    let existing = hit.existing.unwrap();
    assert_eq!(existing.name, "Movie.Name.2020");
    assert!(existing.created.is_some());
}

#[tokio::test]
async fn failed_torrent_write_surfaces_after_renames() {
    let h = TestHarness::new();
    let dropped = h.drop_file("the.thing.1982.mkv").await;
    let intake = library::intake_file(&h.config, &h.parser, &h.prober, dropped.to_str().unwrap())
        .await
        .unwrap();

    h.writer.fail_next();
    let staging = intake.target_folder.to_string_lossy().into_owned();
    let result = h
        .packager
        .create_movie(&h.config, &staging, &movie_fields())
        .await;
    assert!(matches!(result, Err(PackagerError::Torrent(_))));
}
