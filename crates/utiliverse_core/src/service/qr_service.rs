//! QR code generator use-cases.
//!
//! # Responsibility
//! - Remember the input text and turn it into a symbol on demand.
//! - Export symbols to files and hand them to optional platform capabilities.
//! - Drive debounced auto-generation from successive text edits.
//!
//! # Invariants
//! - Platform capability failures become [`Notice`]s, never errors.
//! - Render options are not remembered; reset restores their defaults.

use crate::persist::keys::QR_INPUT;
use crate::persist::persisted;
use crate::repo::kv_repo::KvRepository;
use crate::service::{FormError, Notice, ServiceError, ServiceResult};
use crate::tools::debounce::{Debouncer, QR_QUIET_PERIOD};
use crate::tools::platform::{Platform, PlatformError, SharedFile};
use crate::tools::qr::{self, QrSymbol, RenderOptions, PNG_FILE_NAME};
use log::{info, warn};
use std::path::Path;
use tokio::sync::mpsc::UnboundedReceiver;

const SHARE_TITLE: &str = "QR Code";
const SHARE_TEXT: &str = "Here is your QR code.";

pub struct QrService<R: KvRepository> {
    repo: R,
}

impl<R: KvRepository> QrService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn text(&self) -> ServiceResult<String> {
        Ok(persisted(&self.repo, QR_INPUT, String::new())?.into_inner())
    }

    /// Remembers `text` verbatim; QR payloads are not trimmed.
    pub fn set_text(&self, text: &str) -> ServiceResult<()> {
        persisted(&self.repo, QR_INPUT, String::new())?.set(text.to_string())?;
        Ok(())
    }

    /// Encodes the remembered text.
    pub fn generate(&self) -> ServiceResult<QrSymbol> {
        let text = self.text()?;
        if text.is_empty() {
            warn!("event=qr_generate module=service status=rejected reason=missing_qr_text");
            return Err(FormError::MissingQrText.into());
        }
        let symbol = qr::encode(&text).map_err(|err| {
            let err = ServiceError::from(err);
            if let Some(form) = err.as_form() {
                warn!(
                    "event=qr_generate module=service status=rejected reason={} payload_len={}",
                    form.code(),
                    text.len()
                );
            }
            err
        })?;
        info!(
            "event=qr_generate module=service status=ok payload_len={} modules={}",
            text.len(),
            symbol.width()
        );
        Ok(symbol)
    }

    /// Clears the remembered text and returns default render options.
    pub fn reset(&self) -> ServiceResult<RenderOptions> {
        self.set_text("")?;
        Ok(RenderOptions::default())
    }

    /// Copies the raw input text to the clipboard.
    pub fn copy_text(&self, platform: &dyn Platform) -> ServiceResult<Notice> {
        let text = self.text()?;
        let notice = match platform.copy_text(&text) {
            Ok(()) => Notice::TextCopied,
            Err(_) => Notice::TextCopyFailed,
        };
        Ok(log_notice("qr_copy_text", notice))
    }
}

/// Parses render options from form values.
pub fn render_options(size: u32, foreground: &str, background: &str) -> ServiceResult<RenderOptions> {
    Ok(RenderOptions::new(size, foreground, background)?)
}

/// Writes the SVG document to `path`.
pub fn export_svg(symbol: &QrSymbol, options: &RenderOptions, path: &Path) -> ServiceResult<Notice> {
    qr::write_export(path, symbol.to_svg(options).as_bytes())?;
    Ok(log_notice("qr_export_svg", Notice::SvgDownloaded))
}

/// Writes the PNG raster to `path`.
pub fn export_png(symbol: &QrSymbol, options: &RenderOptions, path: &Path) -> ServiceResult<Notice> {
    qr::write_export(path, &symbol.to_png(options)?)?;
    Ok(log_notice("qr_export_png", Notice::PngDownloaded))
}

/// Copies the PNG raster to the clipboard when the platform allows it.
pub fn copy_image(
    platform: &dyn Platform,
    symbol: &QrSymbol,
    options: &RenderOptions,
) -> ServiceResult<Notice> {
    let png = symbol.to_png(options)?;
    let notice = match platform.copy_png(&png) {
        Ok(()) => Notice::ImageCopied,
        Err(PlatformError::Unsupported) => Notice::ImageCopyUnsupported,
        Err(PlatformError::Failed(_)) => Notice::ImageCopyFailed,
    };
    Ok(log_notice("qr_copy_image", notice))
}

/// Hands the PNG raster to the native share sheet when available.
pub fn share(
    platform: &dyn Platform,
    symbol: &QrSymbol,
    options: &RenderOptions,
) -> ServiceResult<Notice> {
    let png = symbol.to_png(options)?;
    let file = SharedFile {
        name: PNG_FILE_NAME,
        mime_type: "image/png",
        bytes: &png,
        title: SHARE_TITLE,
        text: SHARE_TEXT,
    };
    let notice = match platform.share(&file) {
        Ok(()) => Notice::Shared,
        Err(PlatformError::Unsupported) => Notice::ShareUnsupported,
        Err(PlatformError::Failed(_)) => Notice::ShareFailed,
    };
    Ok(log_notice("qr_share", notice))
}

fn log_notice(event: &str, notice: Notice) -> Notice {
    if notice.is_failure() {
        warn!("event={event} module=service status=degraded notice={notice:?}");
    } else {
        info!("event={event} module=service status=ok");
    }
    notice
}

/// Auto-generate toggle: text edits settle after the quiet period.
pub struct AutoGenerate {
    debouncer: Debouncer<String>,
}

impl AutoGenerate {
    /// Must be called inside a tokio runtime.
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (debouncer, settled) = Debouncer::new(QR_QUIET_PERIOD);
        (Self { debouncer }, settled)
    }

    /// Records an edit; any earlier unsettled edit is dropped.
    pub fn on_edit(&mut self, text: String) {
        self.debouncer.push(text);
    }

    /// Turning auto-generation off drops the pending edit.
    pub fn disable(&mut self) {
        self.debouncer.cancel();
    }
}
