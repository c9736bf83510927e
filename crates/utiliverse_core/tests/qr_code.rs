use std::cell::RefCell;
use std::time::Duration;
use utiliverse_core::service::qr_service::{
    copy_image, export_png, export_svg, render_options, share, AutoGenerate,
};
use utiliverse_core::tools::debounce::Debouncer;
use utiliverse_core::tools::platform::{HeadlessPlatform, Platform, PlatformError, SharedFile};
use utiliverse_core::tools::qr::{encode, RenderOptions, DEFAULT_SIZE};
use utiliverse_core::{AppContext, FormError, Notice};

/// Platform that records every successful call.
#[derive(Default)]
struct RecordingPlatform {
    copied_text: RefCell<Option<String>>,
    copied_png: RefCell<Option<Vec<u8>>>,
    shared_name: RefCell<Option<String>>,
}

impl Platform for RecordingPlatform {
    fn copy_text(&self, text: &str) -> Result<(), PlatformError> {
        *self.copied_text.borrow_mut() = Some(text.to_string());
        Ok(())
    }

    fn copy_png(&self, png: &[u8]) -> Result<(), PlatformError> {
        *self.copied_png.borrow_mut() = Some(png.to_vec());
        Ok(())
    }

    fn share(&self, file: &SharedFile<'_>) -> Result<(), PlatformError> {
        *self.shared_name.borrow_mut() = Some(file.name.to_string());
        Ok(())
    }
}

struct FailingPlatform;

impl Platform for FailingPlatform {
    fn copy_text(&self, _text: &str) -> Result<(), PlatformError> {
        Err(PlatformError::Failed("denied".to_string()))
    }

    fn copy_png(&self, _png: &[u8]) -> Result<(), PlatformError> {
        Err(PlatformError::Failed("denied".to_string()))
    }

    fn share(&self, _file: &SharedFile<'_>) -> Result<(), PlatformError> {
        Err(PlatformError::Failed("cancelled".to_string()))
    }
}

#[test]
fn png_is_exactly_the_requested_size() {
    let symbol = encode("https://example.com").unwrap();
    for size in [64, DEFAULT_SIZE, 200, 256] {
        let options = render_options(size, "#000000", "#ffffff").unwrap();
        let png = symbol.to_png(&options).unwrap();
        let image = image::load_from_memory(&png).unwrap();
        assert_eq!((image.width(), image.height()), (size, size));
    }
}

#[test]
fn png_uses_the_chosen_colours() {
    let symbol = encode("hello").unwrap();
    let options = render_options(128, "#123456", "#fedcba").unwrap();
    let image = image::load_from_memory(&symbol.to_png(&options).unwrap())
        .unwrap()
        .to_rgba8();

    // The quiet zone corner is always background.
    assert_eq!(image.get_pixel(0, 0).0, [0xfe, 0xdc, 0xba, 0xff]);
    assert!(image
        .pixels()
        .any(|pixel| pixel.0 == [0x12, 0x34, 0x56, 0xff]));
}

#[test]
fn svg_carries_the_chosen_colours() {
    let symbol = encode("hello").unwrap();
    let options = render_options(128, "#123456", "#FEDCBA").unwrap();
    let svg = symbol.to_svg(&options);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("#123456"));
    assert!(svg.contains("#fedcba"));
}

#[test]
fn render_options_reject_bad_form_values() {
    let err = render_options(300, "#000000", "#ffffff").unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::SizeOutOfRange));

    let err = render_options(128, "black", "#ffffff").unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::InvalidColor));
}

#[test]
fn generate_requires_text_and_keeps_it_verbatim() {
    let ctx = AppContext::open_in_memory().unwrap();
    let qr = ctx.qr();

    let err = qr.generate().unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::MissingQrText));
    assert_eq!(err.to_string(), "Please enter text or a URL.");

    qr.set_text("  padded text  ").unwrap();
    let symbol = qr.generate().unwrap();
    assert_eq!(symbol.payload(), "  padded text  ");
    assert!(symbol.width() >= 21);
}

#[test]
fn generate_rejects_text_beyond_qr_capacity() {
    let ctx = AppContext::open_in_memory().unwrap();
    let qr = ctx.qr();
    qr.set_text(&"x".repeat(5000)).unwrap();

    let err = qr.generate().unwrap_err();
    assert_eq!(err.as_form(), Some(&FormError::QrTextTooLong));
    assert_eq!(err.to_string(), "Text is too long to fit in a QR code.");
}

#[test]
fn svg_width_matches_the_requested_size() {
    let symbol = encode("https://example.com").unwrap();
    for size in [64, DEFAULT_SIZE, 200, 256] {
        let options = render_options(size, "#000000", "#ffffff").unwrap();
        let svg = symbol.to_svg(&options);
        assert!(svg.contains(&format!("width=\"{size}\"")), "{svg}");
        assert!(svg.contains(&format!("height=\"{size}\"")), "{svg}");
    }
}

#[test]
fn reset_clears_text_and_restores_default_options() {
    let ctx = AppContext::open_in_memory().unwrap();
    ctx.qr().set_text("https://example.com").unwrap();

    let options = ctx.qr().reset().unwrap();
    assert_eq!(options, RenderOptions::default());
    assert_eq!(options.size, DEFAULT_SIZE);
    assert_eq!(options.foreground.as_str(), "#000000");
    assert_eq!(options.background.as_str(), "#ffffff");
    assert_eq!(ctx.qr().text().unwrap(), "");
}

#[test]
fn exports_write_svg_and_png_files() {
    let dir = tempfile::tempdir().unwrap();
    let symbol = encode("https://example.com").unwrap();
    let options = render_options(96, "#000000", "#ffffff").unwrap();

    let svg_path = dir.path().join("qr-code.svg");
    assert_eq!(
        export_svg(&symbol, &options, &svg_path).unwrap(),
        Notice::SvgDownloaded
    );
    assert!(std::fs::read_to_string(&svg_path).unwrap().contains("<svg"));

    let png_path = dir.path().join("qr-code.png");
    assert_eq!(
        export_png(&symbol, &options, &png_path).unwrap(),
        Notice::PngDownloaded
    );
    let image = image::open(&png_path).unwrap();
    assert_eq!(image.width(), 96);
}

#[test]
fn headless_platform_degrades_to_notices() {
    let ctx = AppContext::open_in_memory().unwrap();
    ctx.qr().set_text("hello").unwrap();
    let symbol = ctx.qr().generate().unwrap();
    let options = RenderOptions::default();

    assert_eq!(
        copy_image(&HeadlessPlatform, &symbol, &options).unwrap(),
        Notice::ImageCopyUnsupported
    );
    assert_eq!(
        share(&HeadlessPlatform, &symbol, &options).unwrap(),
        Notice::ShareUnsupported
    );
    let notice = ctx.qr().copy_text(&HeadlessPlatform).unwrap();
    assert_eq!(notice, Notice::TextCopyFailed);
    assert!(notice.is_failure());
}

#[test]
fn failing_platform_reports_failed_notices() {
    let symbol = encode("hello").unwrap();
    let options = RenderOptions::default();
    assert_eq!(
        copy_image(&FailingPlatform, &symbol, &options).unwrap(),
        Notice::ImageCopyFailed
    );
    assert_eq!(
        share(&FailingPlatform, &symbol, &options).unwrap(),
        Notice::ShareFailed
    );
}

#[test]
fn capable_platform_receives_png_and_text() {
    let ctx = AppContext::open_in_memory().unwrap();
    ctx.qr().set_text("hello").unwrap();
    let symbol = ctx.qr().generate().unwrap();
    let options = RenderOptions::default();
    let platform = RecordingPlatform::default();

    assert_eq!(ctx.qr().copy_text(&platform).unwrap(), Notice::TextCopied);
    assert_eq!(platform.copied_text.borrow().as_deref(), Some("hello"));

    assert_eq!(
        copy_image(&platform, &symbol, &options).unwrap(),
        Notice::ImageCopied
    );
    let png = platform.copied_png.borrow().clone().unwrap();
    assert!(image::load_from_memory(&png).is_ok());

    assert_eq!(share(&platform, &symbol, &options).unwrap(), Notice::Shared);
    assert_eq!(platform.shared_name.borrow().as_deref(), Some("qr-code.png"));
}

#[tokio::test(start_paused = true)]
async fn auto_generate_delivers_only_the_settled_edit() {
    let (mut auto, mut settled) = AutoGenerate::new();

    auto.on_edit("h".to_string());
    tokio::time::sleep(Duration::from_millis(200)).await;
    auto.on_edit("he".to_string());
    tokio::time::sleep(Duration::from_millis(499)).await;
    assert!(settled.try_recv().is_err());

    auto.on_edit("hel".to_string());
    assert_eq!(settled.recv().await.unwrap(), "hel");

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(settled.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn disabling_auto_generate_drops_the_pending_edit() {
    let (mut auto, mut settled) = AutoGenerate::new();
    auto.on_edit("pending".to_string());
    auto.disable();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(settled.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn debouncer_delivers_each_value_after_a_quiet_period() {
    let (mut debouncer, mut settled) = Debouncer::new(Duration::from_millis(100));
    assert_eq!(debouncer.quiet_period(), Duration::from_millis(100));

    debouncer.push(1_u32);
    assert_eq!(settled.recv().await, Some(1));

    debouncer.push(2);
    debouncer.push(3);
    assert_eq!(settled.recv().await, Some(3));
}
