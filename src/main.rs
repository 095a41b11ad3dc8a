//! Demo CLI: decode a single frame, or walk the whole file, through
//! `frame-reader-core`.

use anyhow::{bail, Context};
use argh::FromArgs;
use frame_reader_core::FrameReader;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(FromArgs)]
/// Decode frames from a video container via frame-reader-core.
struct Args {
    /// path to the input container
    #[argh(positional)]
    input: String,

    /// frame index to decode; if omitted, walks every frame in the file
    #[argh(option)]
    frame: Option<i64>,

    /// clamp out-of-range frame requests instead of failing
    #[argh(switch)]
    load_nearest: bool,

    /// retry budget passed to decode()
    #[argh(option, default = "4")]
    max_retries: u32,

    /// verbose logging
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    init_logging(args.verbose);

    let reader = FrameReader::open(&args.input);
    if reader.is_invalid() {
        bail!("failed to open '{}': {}", args.input, reader.get_error());
    }

    let mut width = 0u32;
    let mut height = 0u32;
    let mut aspect = 0.0f64;
    let mut frames = 0i64;
    if !reader.get_info(0, &mut width, &mut height, &mut aspect, &mut frames) {
        bail!("no usable video stream in '{}'", args.input);
    }

    log::info!(
        "{}: {}x{} (aspect {:.3}), {} frames, colorspace {}",
        args.input,
        width,
        height,
        aspect,
        frames,
        reader.get_colorspace()
    );

    match args.frame {
        Some(frame) => {
            if !reader.decode(frame, args.load_nearest, args.max_retries) {
                bail!("decode({}) failed: {}", frame, reader.get_error());
            }
            println!(
                "decoded frame {}: {} bytes ({}x{}, {} bpc)",
                frame,
                reader.get_buffer_size(),
                width,
                height,
                reader.get_bit_depth()
            );
        }
        None => decode_all(&reader, frames, args.load_nearest, args.max_retries)?,
    }

    Ok(())
}

fn decode_all(reader: &FrameReader, frames: i64, load_nearest: bool, max_retries: u32) -> anyhow::Result<()> {
    let progress = indicatif::ProgressBar::new(frames.max(0) as u64);
    progress.set_style(
        indicatif::ProgressStyle::with_template("{bar:40} {pos}/{len} frames ({eta})")
            .context("invalid progress bar template")?,
    );

    for frame in 0..frames {
        if !reader.decode(frame, load_nearest, max_retries) {
            bail!("decode({}) failed: {}", frame, reader.get_error());
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");
    Ok(())
}
