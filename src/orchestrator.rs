use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

use crate::error::ComicwallError;
use crate::images::ImageStore;
use crate::ui::PostProgress;
use crate::vk::VkClient;
use crate::xkcd::XkcdClient;

/// Drives one comic from xkcd to the group wall.
pub struct Orchestrator {
    xkcd: XkcdClient,
    vk: VkClient,
    images: ImageStore,
    group_id: u64,
}

/// Summary of a finished publication, printed as the final report.
#[derive(Debug, Serialize)]
pub struct PostReport {
    pub comic: u32,
    pub title: String,
    pub caption: String,
    pub attachment: String,
    pub post_id: i64,
    pub posted_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Pick the comic number to publish: the requested one when given, otherwise
/// a random draw between 1 and the latest. A request past the latest is
/// rejected before any further network call.
pub fn resolve_comic_number(requested: Option<u32>, latest: u32) -> Result<u32, ComicwallError> {
    match requested {
        Some(n) if n > latest => Err(ComicwallError::ComicOutOfRange {
            requested: n,
            latest,
        }),
        Some(n) => Ok(n),
        // `gen_range(1..=0)` would panic, so an empty feed fails typed.
        None if latest == 0 => Err(ComicwallError::EmptyComicFeed),
        None => Ok(rand::thread_rng().gen_range(1..=latest)),
    }
}

impl Orchestrator {
    pub fn new(xkcd: XkcdClient, vk: VkClient, images: ImageStore, group_id: u64) -> Self {
        Self {
            xkcd,
            vk,
            images,
            group_id,
        }
    }

    /// Publish one comic end to end, reporting stage changes through
    /// `progress`. The downloaded image file is removed before this returns,
    /// whether the publication succeeded or not.
    pub async fn run(
        &self,
        requested: Option<u32>,
        progress: &PostProgress,
    ) -> Result<PostReport, ComicwallError> {
        let started = Instant::now();

        // The latest comic bounds the id space for both explicit and random picks.
        let latest = self.xkcd.get(None).await?;
        let number = resolve_comic_number(requested, latest.num)?;

        progress.stage(&format!("Fetching comic #{number}"));
        let comic = self.xkcd.get(Some(number)).await?;

        progress.stage("Downloading the comic image");
        let image = self.images.download(&comic.img).await?;

        progress.stage("Publishing to the group wall");
        let published = self
            .vk
            .publish_photo(self.group_id, image.path(), &comic.alt)
            .await?;
        drop(image);

        Ok(PostReport {
            comic: comic.num,
            title: comic.title,
            caption: comic.alt,
            attachment: published.attachment(),
            post_id: published.post_id,
            posted_at: Utc::now(),
            duration_ms: started.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vk::VkError;
    use tempfile::TempDir;
    use wiremock::matchers::{any, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn resolve_keeps_an_in_range_number() {
        assert_eq!(resolve_comic_number(Some(614), 2500).unwrap(), 614);
    }

    #[test]
    fn resolve_accepts_the_latest_itself() {
        assert_eq!(resolve_comic_number(Some(2500), 2500).unwrap(), 2500);
    }

    #[test]
    fn resolve_rejects_a_number_past_the_latest() {
        let err = resolve_comic_number(Some(9999), 2500).unwrap_err();
        match err {
            ComicwallError::ComicOutOfRange { requested, latest } => {
                assert_eq!(requested, 9999);
                assert_eq!(latest, 2500);
            }
            other => panic!("expected ComicOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn resolve_accepts_zero_without_special_casing() {
        assert_eq!(resolve_comic_number(Some(0), 2500).unwrap(), 0);
    }

    #[test]
    fn resolve_fails_typed_when_the_feed_is_empty() {
        let err = resolve_comic_number(None, 0).unwrap_err();
        assert!(matches!(err, ComicwallError::EmptyComicFeed));
    }

    #[test]
    fn resolve_draws_within_range_without_a_request() {
        for _ in 0..500 {
            let n = resolve_comic_number(None, 10).unwrap();
            assert!((1..=10).contains(&n));
        }
    }

    fn comic_json(num: u32, img: &str) -> serde_json::Value {
        serde_json::json!({
            "num": num,
            "title": "Woodpecker",
            "img": img,
            "alt": "If you don't have an extension cord I can get that for you."
        })
    }

    fn vk_response(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "response": body }))
    }

    async fn mount_xkcd(server: &MockServer, num: u32) {
        let img = format!("{}/comics/abc.png", server.uri());
        Mock::given(method("GET"))
            .and(path("/info.0.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comic_json(2500, &img)))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/{num}/info.0.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(comic_json(num, &img)))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/comics/abc.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png bytes".to_vec()))
            .mount(server)
            .await;
    }

    fn orchestrator_for(xkcd: &MockServer, vk: &MockServer, dir: &TempDir) -> Orchestrator {
        Orchestrator::new(
            XkcdClient::with_base_url(xkcd.uri()),
            VkClient::with_base_url("token123".into(), "5.131".into(), vk.uri()),
            ImageStore::new(dir.path()),
            123,
        )
    }

    #[tokio::test]
    async fn posting_an_explicit_comic_publishes_and_cleans_up() {
        let xkcd = MockServer::start().await;
        let vk = MockServer::start().await;
        mount_xkcd(&xkcd, 614).await;

        Mock::given(method("GET"))
            .and(path("/photos.getWallUploadServer"))
            .and(query_param("group_id", "123"))
            .respond_with(vk_response(
                serde_json::json!({ "upload_url": format!("{}/upload", vk.uri()) }),
            ))
            .mount(&vk)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .and(body_string_contains("filename=\"abc.png\""))
            .and(body_string_contains("png bytes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "server": 626627, "photo": "[]", "hash": "abcdef"
            })))
            .mount(&vk)
            .await;
        Mock::given(method("POST"))
            .and(path("/photos.saveWallPhoto"))
            .respond_with(vk_response(serde_json::json!([
                { "id": 457239017, "owner_id": -123 }
            ])))
            .mount(&vk)
            .await;
        Mock::given(method("POST"))
            .and(path("/wall.post"))
            .and(query_param("attachments", "photo-123_457239017"))
            .and(query_param(
                "message",
                "If you don't have an extension cord I can get that for you.",
            ))
            .respond_with(vk_response(serde_json::json!({ "post_id": 42 })))
            .mount(&vk)
            .await;

        let tmp = TempDir::new().unwrap();
        let orchestrator = orchestrator_for(&xkcd, &vk, &tmp);
        let report = orchestrator
            .run(Some(614), &PostProgress::hidden())
            .await
            .unwrap();

        assert_eq!(report.comic, 614);
        assert_eq!(report.title, "Woodpecker");
        assert_eq!(report.attachment, "photo-123_457239017");
        assert_eq!(report.post_id, 42);
        assert!(!tmp.path().join("abc.png").exists());
    }

    #[tokio::test]
    async fn an_out_of_range_comic_fails_before_any_vk_call() {
        let xkcd = MockServer::start().await;
        let vk = MockServer::start().await;
        let img = format!("{}/comics/abc.png", xkcd.uri());
        Mock::given(method("GET"))
            .and(path("/info.0.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(comic_json(2500, &img)))
            .mount(&xkcd)
            .await;
        Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&vk).await;

        let tmp = TempDir::new().unwrap();
        let orchestrator = orchestrator_for(&xkcd, &vk, &tmp);
        let err = orchestrator
            .run(Some(9999), &PostProgress::hidden())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "There is no comic #9999: the latest comic is #2500"
        );
        vk.verify().await;
    }

    #[tokio::test]
    async fn a_failed_upload_stops_the_pipeline_and_still_cleans_up() {
        let xkcd = MockServer::start().await;
        let vk = MockServer::start().await;
        mount_xkcd(&xkcd, 614).await;

        Mock::given(method("GET"))
            .and(path("/photos.getWallUploadServer"))
            .respond_with(vk_response(
                serde_json::json!({ "upload_url": format!("{}/upload", vk.uri()) }),
            ))
            .mount(&vk)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&vk)
            .await;
        Mock::given(method("POST"))
            .and(path("/photos.saveWallPhoto"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&vk)
            .await;
        Mock::given(method("POST"))
            .and(path("/wall.post"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&vk)
            .await;

        let tmp = TempDir::new().unwrap();
        let orchestrator = orchestrator_for(&xkcd, &vk, &tmp);
        let err = orchestrator
            .run(Some(614), &PostProgress::hidden())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ComicwallError::Vk(VkError::RequestFailed { status: 500, .. })
        ));
        assert!(!tmp.path().join("abc.png").exists());
        vk.verify().await;
    }
}
