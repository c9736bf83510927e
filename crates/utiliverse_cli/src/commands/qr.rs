//! `qr`: QR code generator page.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use utiliverse_core::service::qr_service::{
    copy_image, export_png, export_svg, render_options, share, AutoGenerate,
};
use utiliverse_core::tools::debounce::QR_QUIET_PERIOD;
use utiliverse_core::tools::platform::HeadlessPlatform;
use utiliverse_core::tools::qr::{
    self, QrSymbol, RenderOptions, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_SIZE,
    PNG_FILE_NAME, SVG_FILE_NAME,
};
use utiliverse_core::{AppContext, ServiceError};

use super::print_notice;

#[derive(Debug, Args)]
pub struct QrArgs {
    /// Text or URL to encode; remembered for later runs
    #[arg(long, allow_hyphen_values = true)]
    text: Option<String>,

    /// Image size in pixels (64 to 256)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: u32,

    /// Foreground colour, #rrggbb
    #[arg(long, default_value = DEFAULT_FOREGROUND)]
    fg: String,

    /// Background colour, #rrggbb
    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    bg: String,

    /// Write an SVG file
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = SVG_FILE_NAME)]
    svg: Option<PathBuf>,

    /// Write a PNG file
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = PNG_FILE_NAME)]
    png: Option<PathBuf>,

    /// Copy the PNG image to the clipboard
    #[arg(long)]
    copy: bool,

    /// Copy the input text to the clipboard
    #[arg(long)]
    copy_text: bool,

    /// Open the share sheet with the PNG image
    #[arg(long)]
    share: bool,

    /// Read edits from stdin, regenerating once typing settles
    #[arg(long, conflicts_with = "text")]
    watch: bool,

    /// Clear the remembered text
    #[arg(long, conflicts_with_all = ["text", "watch"])]
    reset: bool,
}

pub fn run(ctx: &AppContext, args: QrArgs) -> Result<()> {
    let service = ctx.qr();
    if args.reset {
        let defaults = service.reset()?;
        println!(
            "QR input cleared (size {}px, colours {} on {}).",
            defaults.size, defaults.foreground, defaults.background
        );
        return Ok(());
    }

    let options = render_options(args.size, &args.fg, &args.bg)?;
    if args.watch {
        return watch(ctx, &args, &options);
    }

    if let Some(text) = &args.text {
        service.set_text(text)?;
    }
    let symbol = service.generate()?;
    print!("{}", symbol.to_terminal());
    println!();
    deliver(&symbol, &args, &options)?;

    let platform = HeadlessPlatform;
    if args.copy_text {
        print_notice(service.copy_text(&platform)?);
    }
    Ok(())
}

/// Exports and platform actions requested alongside generation.
fn deliver(symbol: &QrSymbol, args: &QrArgs, options: &RenderOptions) -> Result<()> {
    let platform = HeadlessPlatform;
    if let Some(path) = &args.svg {
        print_notice(export_svg(symbol, options, path)?);
    }
    if let Some(path) = &args.png {
        print_notice(export_png(symbol, options, path)?);
    }
    if args.copy {
        print_notice(copy_image(&platform, symbol, options)?);
    }
    if args.share {
        print_notice(share(&platform, symbol, options)?);
    }
    Ok(())
}

/// Auto-generate mode: every stdin line is an edit of the text field.
fn watch(ctx: &AppContext, args: &QrArgs, options: &RenderOptions) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let service = ctx.qr();
        let (mut auto, mut settled) = AutoGenerate::new();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        eprintln!(
            "Type text, one edit per line; the code refreshes after {} ms of quiet. Ctrl-D ends.",
            QR_QUIET_PERIOD.as_millis()
        );

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line.context("failed to read stdin")? {
                        Some(text) => {
                            service.set_text(&text)?;
                            auto.on_edit(text);
                        }
                        None => break,
                    }
                }
                Some(text) = settled.recv() => render_settled(&text, args, options)?,
            }
        }

        // Input closed: flush the last edit once it settles.
        if let Ok(Some(text)) = tokio::time::timeout(QR_QUIET_PERIOD * 2, settled.recv()).await {
            render_settled(&text, args, options)?;
        }
        Ok::<(), anyhow::Error>(())
    })
}

/// Renders one settled edit; a rejected edit prints its form message and
/// leaves the session running.
fn render_settled(text: &str, args: &QrArgs, options: &RenderOptions) -> Result<()> {
    let symbol = match qr::encode(text).map_err(ServiceError::from) {
        Ok(symbol) => symbol,
        Err(err) => match err.as_form() {
            Some(form) => {
                eprintln!("{form}");
                return Ok(());
            }
            None => return Err(err.into()),
        },
    };
    print!("{}", symbol.to_terminal());
    println!();
    deliver(&symbol, args, options)
}

#[cfg(test)]
mod tests {
    use super::{render_settled, QrArgs};
    use clap::Parser;
    use utiliverse_core::tools::qr::RenderOptions;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        qr: QrArgs,
    }

    fn no_exports() -> QrArgs {
        Harness::try_parse_from(["qr", "--watch"]).unwrap().qr
    }

    #[test]
    fn rejected_edits_keep_the_watch_session_alive() {
        let args = no_exports();
        let options = RenderOptions::default();
        assert!(render_settled("", &args, &options).is_ok());
        assert!(render_settled(&"x".repeat(5000), &args, &options).is_ok());
        assert!(render_settled("hello", &args, &options).is_ok());
    }
}
