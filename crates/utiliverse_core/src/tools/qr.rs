//! QR code rendering and export.
//!
//! # Responsibility
//! - Encode a text payload into a QR symbol (delegated to `qrcode`).
//! - Render the symbol as SVG markup or as a PNG raster at a chosen size
//!   and colour pair.
//! - Write export files atomically.
//!
//! # Invariants
//! - Payloads are passed through unchanged; empty payloads are rejected.
//! - Size is within `MIN_SIZE..=MAX_SIZE`; SVG and PNG output are both
//!   exactly `size` pixels square and share one module layout.
//! - Colours are `#rrggbb`.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use once_cell::sync::Lazy;
use qrcode::render::unicode;
use qrcode::types::QrError as EncodeError;
use qrcode::{Color, QrCode};
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter, Write as _};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const MIN_SIZE: u32 = 64;
pub const MAX_SIZE: u32 = 256;
pub const DEFAULT_SIZE: u32 = 128;
pub const DEFAULT_FOREGROUND: &str = "#000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

pub const SVG_FILE_NAME: &str = "qr-code.svg";
pub const PNG_FILE_NAME: &str = "qr-code.png";

/// Light modules around the symbol, per side.
const QUIET_ZONE: u32 = 4;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex colour regex"));

#[derive(Debug)]
pub enum QrError {
    EmptyPayload,
    Encode(EncodeError),
    InvalidColor(String),
    SizeOutOfRange(u32),
    Raster(image::ImageError),
    Io(std::io::Error),
}

impl Display for QrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "QR payload is empty"),
            Self::Encode(err) => write!(f, "failed to encode QR payload: {err}"),
            Self::InvalidColor(raw) => write!(f, "invalid colour `{raw}`, expected #rrggbb"),
            Self::SizeOutOfRange(size) => write!(
                f,
                "QR size {size}px is outside {MIN_SIZE}..={MAX_SIZE}px"
            ),
            Self::Raster(err) => write!(f, "failed to rasterize QR code: {err}"),
            Self::Io(err) => write!(f, "failed to write QR export: {err}"),
        }
    }
}

impl Error for QrError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Raster(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::EmptyPayload | Self::InvalidColor(_) | Self::SizeOutOfRange(_) => None,
        }
    }
}

impl From<EncodeError> for QrError {
    fn from(value: EncodeError) -> Self {
        Self::Encode(value)
    }
}

impl From<image::ImageError> for QrError {
    fn from(value: image::ImageError) -> Self {
        Self::Raster(value)
    }
}

impl From<std::io::Error> for QrError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// `#rrggbb` colour, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(raw: &str) -> Result<Self, QrError> {
        let trimmed = raw.trim();
        if !HEX_COLOR_RE.is_match(trimmed) {
            return Err(QrError::InvalidColor(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn rgba(&self) -> Rgba<u8> {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or_default()
        };
        Rgba([channel(1..3), channel(3..5), channel(5..7), u8::MAX])
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Size and colour pair used for both export formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub size: u32,
    pub foreground: HexColor,
    pub background: HexColor,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            foreground: HexColor(DEFAULT_FOREGROUND.to_string()),
            background: HexColor(DEFAULT_BACKGROUND.to_string()),
        }
    }
}

impl RenderOptions {
    pub fn new(size: u32, foreground: &str, background: &str) -> Result<Self, QrError> {
        Ok(Self {
            size: validate_size(size)?,
            foreground: HexColor::parse(foreground)?,
            background: HexColor::parse(background)?,
        })
    }
}

pub fn validate_size(size: u32) -> Result<u32, QrError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(QrError::SizeOutOfRange(size));
    }
    Ok(size)
}

/// Encoded QR symbol for one payload.
pub struct QrSymbol {
    payload: String,
    code: QrCode,
}

impl std::fmt::Debug for QrSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrSymbol")
            .field("payload_len", &self.payload.len())
            .field("modules", &self.code.width())
            .finish()
    }
}

/// Encodes `text` verbatim.
pub fn encode(text: &str) -> Result<QrSymbol, QrError> {
    if text.is_empty() {
        return Err(QrError::EmptyPayload);
    }
    let code = QrCode::new(text.as_bytes())?;
    Ok(QrSymbol {
        payload: text.to_string(),
        code,
    })
}

impl QrSymbol {
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Modules per side, quiet zone excluded.
    pub fn width(&self) -> usize {
        self.code.width()
    }

    /// Modules per side including the quiet zone.
    fn side(&self) -> u32 {
        self.code.width() as u32 + 2 * QUIET_ZONE
    }

    /// Whether the module at `(x, y)` is dark; coordinates include the quiet zone.
    fn is_dark(&self, x: u32, y: u32) -> bool {
        let width = self.code.width() as u32;
        if x < QUIET_ZONE || y < QUIET_ZONE {
            return false;
        }
        let (column, row) = (x - QUIET_ZONE, y - QUIET_ZONE);
        column < width && row < width && self.code[(column as usize, row as usize)] == Color::Dark
    }

    fn layout(&self, size: u32) -> Layout {
        Layout::fit(self.side(), size)
    }

    /// Standalone SVG document, `options.size` pixels square.
    pub fn to_svg(&self, options: &RenderOptions) -> String {
        let size = options.size;
        let side = self.side();
        let (view_box, module, margin) = match self.layout(size) {
            Layout::Aligned {
                module_px, margin, ..
            } => (size, module_px, margin),
            Layout::Scaled { .. } => (side, 1, 0),
        };

        let mut path = String::new();
        for y in 0..side {
            for x in 0..side {
                if self.is_dark(x, y) {
                    let _ = write!(
                        path,
                        "M{} {}h{module}v{module}h-{module}z",
                        margin + x * module,
                        margin + y * module
                    );
                }
            }
        }

        let mut svg = String::from(r#"<?xml version="1.0" standalone="yes"?>"#);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{size}" height="{size}" viewBox="0 0 {view_box} {view_box}" shape-rendering="crispEdges">"#
        );
        let _ = write!(
            svg,
            r#"<rect width="{view_box}" height="{view_box}" fill="{}"/>"#,
            options.background
        );
        let _ = write!(svg, r#"<path fill="{}" d="{path}"/></svg>"#, options.foreground);
        svg
    }

    /// Block-character rendering for terminals, two module rows per line.
    ///
    /// Colours are inverted so the symbol reads on dark backgrounds.
    pub fn to_terminal(&self) -> String {
        self.code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build()
    }

    /// PNG bytes, exactly `options.size` pixels square, rasterized from the
    /// same layout as [`QrSymbol::to_svg`].
    pub fn to_png(&self, options: &RenderOptions) -> Result<Vec<u8>, QrError> {
        let layout = self.layout(options.size);
        let dark = options.foreground.rgba();
        let light = options.background.rgba();
        let surface = RgbaImage::from_fn(options.size, options.size, |px, py| {
            match layout.module_at(px, py) {
                Some((x, y)) if self.is_dark(x, y) => dark,
                _ => light,
            }
        });

        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(surface).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Placement of the module grid on a square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Whole-pixel modules centred on the canvas; the leftover border is background.
    Aligned { side: u32, module_px: u32, margin: u32 },
    /// More modules than pixels: the grid is scaled down to the canvas.
    Scaled { side: u32, size: u32 },
}

impl Layout {
    fn fit(side: u32, size: u32) -> Self {
        if side > size {
            return Self::Scaled { side, size };
        }
        let module_px = size / side;
        Self::Aligned {
            side,
            module_px,
            margin: (size - module_px * side) / 2,
        }
    }

    /// Module under pixel `(px, py)`, or `None` on the padding border.
    fn module_at(self, px: u32, py: u32) -> Option<(u32, u32)> {
        match self {
            Self::Aligned {
                side,
                module_px,
                margin,
            } => {
                let x = px.checked_sub(margin)? / module_px;
                let y = py.checked_sub(margin)? / module_px;
                (x < side && y < side).then_some((x, y))
            }
            Self::Scaled { side, size } => Some((px * side / size, py * side / size)),
        }
    }
}

/// Writes `contents` to `path` through a sibling temp file and a rename.
pub fn write_export(path: &Path, contents: &[u8]) -> Result<(), QrError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    file.persist(path).map_err(|err| QrError::Io(err.error))?;
    Ok(())
}
