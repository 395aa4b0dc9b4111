use std::task::{Context, Poll, Waker};

use super::*;
use crate::assets::cache::DecalCache;
use crate::assets::decode::DecalImage;
use crate::config::badge::BadgeConfig;
use crate::config::patch::BadgePatch;
use crate::render::recording::{DrawCommand, RecordingSurface};

struct NoLoads;

impl DecalLoader for NoLoads {
    async fn load(&self, url: &str) -> BadgeResult<DecalImage> {
        Err(BadgeError::decal_load(url, "unreachable"))
    }
}

struct Square;

impl DecalLoader for Square {
    async fn load(&self, _url: &str) -> BadgeResult<DecalImage> {
        DecalImage::from_premul_rgba8(2, 2, vec![255; 16])
    }
}

fn request(patch: &str) -> RenderRequest {
    let patch = BadgePatch::from_json_str(patch).unwrap();
    RenderRequest::from_config(&BadgeConfig::from_patch(&patch)).unwrap()
}

#[test]
fn no_decal_render_completes_on_first_poll() {
    let req = request(r#"{"name":"JS","title":"DEV","size":512,"fontSize":52}"#);
    let mut surface = RecordingSurface::new();
    let mut cache = DecalCache::new();
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &NoLoads,
        timeout: None,
        cancel: None,
    };
    let mut states = Vec::new();
    let polled = {
        let fut = render_badge(&req, &mut surface, &mut src, |s| states.push(s));
        let mut fut = std::pin::pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        fut.as_mut().poll(&mut cx)
    };
    let Poll::Ready(report) = polled else {
        panic!("render without decal must not suspend");
    };
    let report = report.unwrap();
    assert_eq!(report.state, RenderState::Done);
    assert!(matches!(report.decal, DecalOutcome::None));
    assert_eq!(
        states,
        vec![
            RenderState::GeometryComputed,
            RenderState::DiscFilled,
            RenderState::DecalSkipped,
            RenderState::OutlineStroked,
            RenderState::TextPainted,
            RenderState::DecorationPainted,
            RenderState::Done,
        ]
    );
}

#[tokio::test]
async fn layers_are_painted_in_order() {
    let req = request(r#"{"name":"A","title":"B","image":"d.png"}"#);
    let mut surface = RecordingSurface::new();
    let mut cache = DecalCache::new();
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &Square,
        timeout: None,
        cancel: None,
    };
    let report = render_badge(&req, &mut surface, &mut src, |_| {})
        .await
        .unwrap();
    assert!(matches!(report.decal, DecalOutcome::Loaded));
    assert_eq!(report.decal_pixels, Some((2, 2)));

    let kinds: Vec<&'static str> = surface
        .commands()
        .iter()
        .filter(|c| c.is_paint())
        .map(|c| match c {
            DrawCommand::FillArc { .. } => "disc",
            DrawCommand::DrawImage { .. } => "decal",
            DrawCommand::StrokeArc { .. } => "stroke",
            DrawCommand::FillText { .. } => "text",
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(
        kinds,
        ["disc", "decal", "stroke", "stroke", "text", "text", "stroke", "stroke"]
    );
}

#[tokio::test]
async fn cached_decal_is_redrawn_without_loading() {
    let req = request(r#"{"image":"d.png"}"#);
    let mut cache = DecalCache::new();
    let mut surface = RecordingSurface::new();
    {
        let mut src = DecalSource {
            cache: &mut cache,
            loader: &Square,
            timeout: None,
            cancel: None,
        };
        render_badge(&req, &mut surface, &mut src, |_| {})
            .await
            .unwrap();
    }
    let first = surface.commands();

    let mut src = DecalSource {
        cache: &mut cache,
        loader: &NoLoads,
        timeout: None,
        cancel: None,
    };
    let mut states = Vec::new();
    let report = render_badge(&req, &mut surface, &mut src, |s| states.push(s))
        .await
        .unwrap();
    assert!(matches!(report.decal, DecalOutcome::Cached));
    assert!(!states.contains(&RenderState::DecalPending));
    assert_eq!(surface.commands(), first);
}

#[tokio::test]
async fn surface_errors_abort_the_render() {
    let mut req = request("{}");
    req.size = 0;
    let mut surface = RecordingSurface::new();
    let mut cache = DecalCache::new();
    let mut src = DecalSource {
        cache: &mut cache,
        loader: &NoLoads,
        timeout: None,
        cancel: None,
    };
    let err = render_badge(&req, &mut surface, &mut src, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, BadgeError::Surface(_)));
}
