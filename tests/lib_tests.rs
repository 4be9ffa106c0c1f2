use picsift::engine::{
    Classifier, DecodeError, LowSaturation, Resolution, is_image_file, is_match, path_relative_to,
};
use picsift::{ProgressUpdate, RunSummary};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};

fn save(img: &RgbImage, path: &Path) {
    img.save(path).unwrap();
}

// --- path_relative_to ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/foo/bar/baz/qux.png");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("baz/qux.png"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/other/qux.png");
    assert_eq!(path_relative_to(&path, &base), None);
}

// --- is_image_file ---

#[test]
fn test_is_image_file_allow_list() {
    for name in ["a.jpg", "a.JPEG", "a.png", "a.GIF", "a.bmp"] {
        assert!(is_image_file(Path::new(name)), "{name}");
    }
    for name in ["a.tiff", "a.webp", "a.txt", "README"] {
        assert!(!is_image_file(Path::new(name)), "{name}");
    }
}

// --- low saturation classifier on files ---

#[test]
fn test_gray_png_matches() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("gray.png");
    save(&RgbImage::from_pixel(16, 16, Rgb([120, 121, 119])), &p);
    assert!(LowSaturation::default().classify(&p).unwrap());
}

#[test]
fn test_solid_saturated_color_does_not_match() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("green.png");
    save(&RgbImage::from_pixel(16, 16, Rgb([0, 255, 0])), &p);
    assert!(!LowSaturation::default().classify(&p).unwrap());
}

#[test]
fn test_grayscale_jpeg_matches() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("bw.jpg");
    let img = RgbImage::from_fn(32, 32, |x, y| {
        // Mid tones only: JPEG rounding on very dark grays would read as saturation.
        let v = (100 + (x * 4 + y) % 120) as u8;
        Rgb([v, v, v])
    });
    save(&img, &p);
    assert!(LowSaturation::default().classify(&p).unwrap());
}

#[test]
fn test_corrupt_image_is_decode_error_and_non_match() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("broken.png");
    std::fs::write(&p, b"definitely not a png").unwrap();
    let c = LowSaturation::default();
    assert!(c.classify(&p).is_err());
    assert!(!is_match(&c, &p));
    let r = Resolution::new(10_000, 10_000);
    assert!(r.classify(&p).is_err());
    assert!(!is_match(&r, &p));
}

#[test]
fn test_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("gone.png");
    assert!(matches!(
        LowSaturation::default().classify(&p),
        Err(DecodeError::Io(_))
    ));
}

#[test]
fn test_mislabelled_extension_still_decodes() {
    let tmp = tempfile::tempdir().unwrap();
    let png = tmp.path().join("real.png");
    save(&RgbImage::from_pixel(4, 4, Rgb([10, 10, 10])), &png);
    let jpg = tmp.path().join("fake.jpg");
    std::fs::copy(&png, &jpg).unwrap();
    assert!(LowSaturation::default().classify(&jpg).unwrap());
}

// --- resolution classifier on files ---

#[test]
fn test_resolution_below_either_threshold_matches() {
    let tmp = tempfile::tempdir().unwrap();
    let narrow = tmp.path().join("narrow.bmp");
    let short = tmp.path().join("short.png");
    let exact = tmp.path().join("exact.png");
    let big = tmp.path().join("big.png");
    save(&RgbImage::new(39, 100), &narrow);
    save(&RgbImage::new(100, 29), &short);
    save(&RgbImage::new(40, 30), &exact);
    save(&RgbImage::new(80, 60), &big);

    let r = Resolution::new(40, 30);
    assert!(r.classify(&narrow).unwrap());
    assert!(r.classify(&short).unwrap());
    assert!(!r.classify(&exact).unwrap());
    assert!(!r.classify(&big).unwrap());
}

// --- progress / summary types ---

#[test]
fn test_status_line_format() {
    let u = ProgressUpdate {
        processed: 7,
        total: 12,
        matched: 2,
        current: "x.png".into(),
    };
    assert_eq!(u.status_line(), "7/12");
}

#[test]
fn test_summary_serializes_to_json() {
    let s = RunSummary {
        processed: 3,
        matched: 1,
        copied: vec![PathBuf::from("a/b.png")],
        ..Default::default()
    };
    let v: serde_json::Value = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
    assert_eq!(v["processed"], 3);
    assert_eq!(v["paused"], false);
    assert_eq!(v["copied"][0], "a/b.png");
}
