use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, intake, middleware::metrics_middleware, packaging, tmdb, torrents};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/config", put(handlers::put_config))
        // Intake and conflict checks
        .route("/parse", post(intake::parse_file))
        .route("/parse-season", post(intake::parse_season))
        .route("/check-conflict", post(intake::check_conflict))
        .route("/check-season-conflict", post(intake::check_season_conflict))
        // Packaging pipeline
        .route("/preview-torrent", post(packaging::preview_movie))
        .route("/preview-episode-torrent", post(packaging::preview_episode))
        .route("/preview-season-torrent", post(packaging::preview_season))
        .route("/create-torrent", post(packaging::create_movie))
        .route("/create-episode-torrent", post(packaging::create_episode))
        .route("/create-season-torrent", post(packaging::create_season))
        // Release library
        .route("/torrents", get(torrents::list_torrents))
        .route("/torrent-details", post(torrents::torrent_details))
        .route("/torrent", delete(torrents::delete_torrent))
        .route("/system/delete-capability", get(torrents::delete_capability))
        // TMDB catalog
        .route("/tmdb/search", post(tmdb::search_movies))
        .route("/tmdb/movie/{id}", get(tmdb::get_movie))
        .route("/tmdb/search-tv", post(tmdb::search_tv))
        .route("/tmdb/tv/{id}", get(tmdb::get_tv))
        .route("/tmdb/tv/{id}/season/{season}", get(tmdb::get_tv_season))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::TempDir;
    use tokio_test::assert_ok;
    use tower::ServiceExt;

    use packrat_core::testing::{MockProber, MockTorrentWriter};
    use packrat_core::SceneParser;

    struct TestServer {
        app: Router,
        writer: Arc<MockTorrentWriter>,
        // Holds config file, staging area and output directory alive.
        dir: TempDir,
    }

    impl TestServer {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let output_dir = dir.path().join("torrents");
            std::fs::create_dir_all(&output_dir).unwrap();

            let config_path = dir.path().join("config.toml");
            std::fs::write(
                &config_path,
                format!(
                    "output_directory = {:?}\ntrackers = [\"udp://tracker.example.com:1337/announce\"]\n",
                    output_dir
                ),
            )
            .unwrap();

            let writer = Arc::new(MockTorrentWriter::new());
            let state = Arc::new(AppState::new(
                config_path,
                Arc::new(SceneParser::new()),
                Arc::new(MockProber::failing()),
                writer.clone(),
            ));
            Self {
                app: create_router(state),
                writer,
                dir,
            }
        }

        fn output_dir(&self) -> std::path::PathBuf {
            self.dir.path().join("torrents")
        }

        fn staging_dir(&self) -> std::path::PathBuf {
            let staging = self.dir.path().join("staging");
            std::fs::create_dir_all(&staging).unwrap();
            staging
        }

        async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(value) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(value.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let response = assert_ok!(self.app.clone().oneshot(request).await);
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::String(
                    String::from_utf8_lossy(&bytes).into_owned(),
                ))
            };
            (status, body)
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.request(Method::GET, uri, None).await
        }

        async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.request(Method::POST, uri, Some(body)).await
        }
    }

    fn write_file(path: &Path, bytes: &[u8]) {
        std::fs::write(path, bytes).unwrap();
    }

    fn movie_fields(folder_path: &Path) -> Value {
        json!({
            "folder_path": folder_path.to_str().unwrap(),
            "title": "The Thing",
            "year": "1982",
            "resolution": "1080p",
            "source": "BluRay",
            "video_codec": "x265",
            "release_group": "GRP",
        })
    }

    #[tokio::test]
    async fn test_health() {
        let server = TestServer::new();
        let (status, body) = server.get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_config_redacts_tmdb_key() {
        let server = TestServer::new();
        let config_path = server.dir.path().join("config.toml");
        let mut contents = std::fs::read_to_string(&config_path).unwrap();
        contents.push_str("\n[tmdb]\napi_key = \"super-secret\"\n");
        std::fs::write(&config_path, contents).unwrap();

        let (status, body) = server.get("/api/config").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tmdb"]["api_key"], "***");
        assert_eq!(body["trackers"][0], "udp://tracker.example.com:1337/announce");
    }

    #[tokio::test]
    async fn test_put_config_persists() {
        let server = TestServer::new();
        let (status, body) = server
            .request(
                Method::PUT,
                "/api/config",
                Some(json!({
                    "output_directory": server.output_dir().to_str().unwrap(),
                    "release_group": "NEWGRP",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["release_group"], "NEWGRP");

        let (_, body) = server.get("/api/config").await;
        assert_eq!(body["release_group"], "NEWGRP");
    }

    #[tokio::test]
    async fn test_parse_stages_file_into_output_dir() {
        let server = TestServer::new();
        let source = server.staging_dir().join("The.Thing.1982.1080p.BluRay.x265-GRP.mkv");
        write_file(&source, b"fake video content");

        let (status, body) = server
            .post("/api/parse", json!({ "filepath": source.to_str().unwrap() }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["media_type"], "movie");
        assert_eq!(body["parsed"]["title"], "The Thing");

        let target = server.output_dir().join("The.Thing.1982.1080p.BluRay.x265-GRP");
        assert!(target.join("The.Thing.1982.1080p.BluRay.x265-GRP.mkv").is_file());
        assert!(target.join("The.Thing.1982.1080p.BluRay.x265-GRP.NFO").is_file());
    }

    #[tokio::test]
    async fn test_parse_missing_file_is_bad_request() {
        let server = TestServer::new();
        let (status, body) = server
            .post("/api/parse", json!({ "filepath": "/nonexistent/nothing.mkv" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("File not found"));
    }

    #[tokio::test]
    async fn test_check_conflict_clear_then_detected() {
        let server = TestServer::new();
        let source = server.staging_dir().join("Heat.1995.1080p.BluRay.x264-GRP.mkv");
        write_file(&source, b"fake video content");

        let (status, body) = server
            .post("/api/check-conflict", json!({ "filepath": source.to_str().unwrap() }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["conflict"], false);

        // An existing folder with the same base name flips the result.
        let existing = server.output_dir().join("Heat.1995.1080p.BluRay.x264-GRP");
        std::fs::create_dir_all(&existing).unwrap();
        write_file(&existing.join("Heat.1995.1080p.BluRay.x264-GRP.mkv"), b"old");

        let (status, body) = server
            .post("/api/check-conflict", json!({ "filepath": source.to_str().unwrap() }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["conflict"], true);
        assert_eq!(body["existing"]["file_count"], 1);
        assert_eq!(body["new"]["name"], "Heat.1995.1080p.BluRay.x264-GRP");
    }

    #[tokio::test]
    async fn test_preview_does_not_mutate() {
        let server = TestServer::new();
        let folder = server.staging_dir().join("the thing 1982");
        std::fs::create_dir_all(&folder).unwrap();
        write_file(&folder.join("thing.mkv"), b"fake video content");

        let (status, body) = server
            .post("/api/preview-torrent", movie_fields(&folder))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["base_name"], "The.Thing.1982.1080p.BluRay.x265-GRP");
        assert_eq!(body["torrent_name"], "The.Thing.1982.1080p.BluRay.x265-GRP.torrent");

        // Source untouched, nothing written.
        assert!(folder.join("thing.mkv").is_file());
        assert!(server.writer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_preview_without_video_is_bad_request() {
        let server = TestServer::new();
        let folder = server.staging_dir().join("empty-folder");
        std::fs::create_dir_all(&folder).unwrap();
        write_file(&folder.join("notes.txt"), b"no video here");

        let (status, _) = server
            .post("/api/preview-torrent", movie_fields(&folder))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_torrent_full_flow() {
        let server = TestServer::new();
        let folder = server.staging_dir().join("the thing 1982");
        std::fs::create_dir_all(&folder).unwrap();
        write_file(&folder.join("thing.mkv"), b"fake video content");

        let (status, body) = server
            .post("/api/create-torrent", movie_fields(&folder))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["base_name"], "The.Thing.1982.1080p.BluRay.x265-GRP");
        assert_eq!(body["info_hash"].as_str().unwrap().len(), 40);

        let renamed = server.staging_dir().join("The.Thing.1982.1080p.BluRay.x265-GRP");
        assert!(renamed.join("The.Thing.1982.1080p.BluRay.x265-GRP.mkv").is_file());
        assert!(renamed.join("The.Thing.1982.1080p.BluRay.x265-GRP.NFO").is_file());

        let calls = server.writer.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].overwrite);
        assert_eq!(
            calls[0].trackers,
            vec!["udp://tracker.example.com:1337/announce".to_string()]
        );
    }

    #[tokio::test]
    async fn test_create_torrent_conflict_is_409() {
        let server = TestServer::new();
        let staging = server.staging_dir();
        let folder = staging.join("the thing 1982");
        std::fs::create_dir_all(&folder).unwrap();
        write_file(&folder.join("thing.mkv"), b"fake video content");

        // A sibling already holds the canonical name.
        std::fs::create_dir_all(staging.join("The.Thing.1982.1080p.BluRay.x265-GRP")).unwrap();

        let (status, body) = server
            .post("/api/create-torrent", movie_fields(&folder))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("already exists"));
        assert!(server.writer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_list_and_delete_torrents() {
        let server = TestServer::new();
        let release = server.output_dir().join("Old.Release.2019.1080p.WEB-GRP");
        std::fs::create_dir_all(&release).unwrap();
        write_file(&release.join("old.mkv"), b"x");

        let (status, body) = server.get("/api/torrents").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["torrents"][0]["name"], "Old.Release.2019.1080p.WEB-GRP");

        let (status, body) = server
            .request(
                Method::DELETE,
                "/api/torrent",
                Some(json!({ "folder_path": release.to_str().unwrap() })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);
        assert_eq!(body["method"], "trash");
        assert!(!release.exists());

        // The trash move hides it from subsequent listings.
        let (_, body) = server.get("/api/torrents").await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_delete_capability() {
        let server = TestServer::new();
        let (status, body) = server.get("/api/system/delete-capability").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_trash"], true);
        assert!(body["platform"].is_string());
    }

    #[tokio::test]
    async fn test_tmdb_not_configured_is_bad_request() {
        let server = TestServer::new();
        let (status, body) = server
            .post("/api/tmdb/search", json!({ "query": "the thing" }))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Not configured"));
    }

    #[tokio::test]
    async fn test_metrics_endpoint_renders_text() {
        let server = TestServer::new();
        // Drive one request through the middleware so counters have samples.
        let (status, _) = server.get("/api/health").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = server.get("/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body
            .as_str()
            .unwrap()
            .contains("packrat_http_requests_total"));
    }
}
