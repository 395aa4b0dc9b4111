use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn fs_loader_resolves_relative_and_file_urls() {
    let loader = FsDecalLoader::new("/srv/badges");
    assert_eq!(
        loader.resolve("img/a.png").unwrap(),
        PathBuf::from("/srv/badges/img/a.png")
    );
    assert_eq!(
        loader.resolve("file:///tmp/a.png").unwrap(),
        PathBuf::from("/tmp/a.png")
    );
    assert!(matches!(
        loader.resolve("https://example.com/a.png"),
        Err(BadgeError::DecalLoad { .. })
    ));
    assert!(loader.resolve("../escape.png").is_err());
}

#[tokio::test]
async fn fs_loader_reads_and_decodes() {
    let dir = std::env::temp_dir().join(format!("roundel-loader-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("decal.png"), png_bytes(3, 5)).unwrap();

    let loader = FsDecalLoader::new(&dir);
    let decal = loader.load("decal.png").await.unwrap();
    assert_eq!((decal.width, decal.height), (3, 5));

    let err = loader.load("missing.png").await.unwrap_err();
    let BadgeError::DecalLoad { url, .. } = err else {
        panic!("expected decal load error");
    };
    assert_eq!(url, "missing.png");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn memory_loader_maps_decode_failures_to_decal_errors() {
    let loader = MemoryDecalLoader::new()
        .with("ok.png", png_bytes(2, 2))
        .with("broken.png", b"nope".to_vec());

    assert_eq!(loader.load("ok.png").await.unwrap().width, 2);
    assert!(matches!(
        loader.load("broken.png").await,
        Err(BadgeError::DecalLoad { .. })
    ));
    assert!(matches!(
        loader.load("absent.png").await,
        Err(BadgeError::DecalLoad { .. })
    ));
}
