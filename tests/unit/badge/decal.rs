use std::future::pending;

use super::*;

fn solid(width: u32, height: u32) -> DecalImage {
    DecalImage::from_premul_rgba8(width, height, vec![255; (width * height * 4) as usize]).unwrap()
}

struct Fixed(u32, u32);

impl DecalLoader for Fixed {
    async fn load(&self, _url: &str) -> BadgeResult<DecalImage> {
        Ok(solid(self.0, self.1))
    }
}

struct Never;

impl DecalLoader for Never {
    async fn load(&self, _url: &str) -> BadgeResult<DecalImage> {
        pending().await
    }
}

struct Broken;

impl DecalLoader for Broken {
    async fn load(&self, _url: &str) -> BadgeResult<DecalImage> {
        Err(BadgeError::surface("boom"))
    }
}

fn req(url: &str, revision: u64) -> DecalRequest {
    DecalRequest {
        url: url.to_owned(),
        scale: 1.0,
        revision,
    }
}

#[test]
fn fit_wide_image_spans_full_width() {
    let r = fit_decal(256.0, 1.0, 200, 100);
    assert_eq!(r.width(), 256.0);
    assert_eq!(r.height(), 128.0);
    assert_eq!(r.center(), crate::foundation::core::Point::new(256.0, 256.0));
}

#[test]
fn fit_tall_or_square_image_spans_full_height() {
    let r = fit_decal(256.0, 0.5, 50, 100);
    assert_eq!(r.height(), 128.0);
    assert_eq!(r.width(), 64.0);
    assert_eq!((r.x0, r.y0), (224.0, 192.0));

    let sq = fit_decal(100.0, 1.0, 7, 7);
    assert_eq!((sq.width(), sq.height()), (100.0, 100.0));
}

#[test]
fn fit_floors_scaled_radius() {
    let r = fit_decal(255.0, 0.3, 10, 10);
    assert_eq!(r.width(), 76.0);
}

#[test]
fn outcome_helpers() {
    assert!(!DecalOutcome::None.drawn());
    assert!(DecalOutcome::Cached.drawn());
    assert!(DecalOutcome::Loaded.drawn());
    let failed = DecalOutcome::Failed(BadgeError::decal_load("a.png", "gone"));
    assert!(!failed.drawn());
    assert!(failed.error().is_some());
}

#[tokio::test]
async fn load_populates_cache_for_revision() {
    let mut cache = DecalCache::new();
    let loader = Fixed(4, 2);
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &loader,
        timeout: None,
        cancel: None,
    };
    assert!(src.cached(&req("a.png", 1)).is_none());
    let img = src.load(&req("a.png", 1)).await.unwrap();
    assert_eq!((img.width, img.height), (4, 2));
    assert!(src.cached(&req("a.png", 1)).is_some());
    assert!(src.cached(&req("a.png", 2)).is_none());
}

#[tokio::test]
async fn load_drops_pixels_of_other_urls() {
    let mut cache = DecalCache::new();
    let loader = Fixed(1, 1);
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &loader,
        timeout: None,
        cancel: None,
    };
    src.load(&req("a.png", 1)).await.unwrap();
    src.load(&req("b.png", 2)).await.unwrap();
    assert_eq!(cache.len(), 1);
    assert!(cache.get("b.png", 2).is_some());
}

#[tokio::test]
async fn foreign_errors_become_decal_load_errors() {
    let mut cache = DecalCache::new();
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &Broken,
        timeout: None,
        cancel: None,
    };
    let err = src.load(&req("x.png", 1)).await.unwrap_err();
    let BadgeError::DecalLoad { url, cause } = err else {
        panic!("expected decal load error");
    };
    assert_eq!(url, "x.png");
    assert!(cause.contains("boom"));
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn load_times_out() {
    let mut cache = DecalCache::new();
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &Never,
        timeout: Some(Duration::from_millis(50)),
        cancel: None,
    };
    let err = src.load(&req("slow.png", 1)).await.unwrap_err();
    assert!(matches!(err, BadgeError::DecalLoad { .. }));
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn cancel_aborts_pending_load() {
    let mut cache = DecalCache::new();
    let handle = CancelHandle::new();
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &Never,
        timeout: None,
        cancel: Some(handle.arm()),
    };
    let slow = req("slow.png", 1);
    let (res, ()) = tokio::join!(src.load(&slow), async {
        tokio::task::yield_now().await;
        handle.cancel();
    });
    assert!(matches!(res, Err(BadgeError::Cancelled)));
}

#[test]
fn arming_clears_a_previous_cancel() {
    let handle = CancelHandle::new();
    handle.cancel();
    let rx = handle.arm();
    assert!(!*rx.borrow());
}
