// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;

use vgscene::{Scene, SkiaCanvas};
use vgtypes::Color;

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            let level = if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            };
            log::set_max_level(level);
        }
    }

    let svg_data = std::fs::read(&args.in_svg).map_err(|_| "failed to open the provided file")?;

    let opt = vgscene::vgtree::Options::default();
    let mut scene = Scene::from_data(&svg_data, &opt).map_err(|e| e.to_string())?;

    if args.info {
        print_info(&scene);
        return Ok(());
    }

    let pixmap = render_scene(&args, &mut scene)?;

    // Checked by `parse_args`.
    let out_png = args.out_png.ok_or("<out-png> must be set")?;
    pixmap.save_png(&out_png).map_err(|e| e.to_string())?;

    Ok(())
}

const HELP: &str = "\
vgscene renders vector documents to PNG.

USAGE:
  vgscene [OPTIONS] <in-svg> <out-png>

  vgscene in.svg out.png
  vgscene -w 512 -h 512 in.svg out.png
  vgscene --info in.svg

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  -w, --width LENGTH            Fits the drawing into this width in pixels
  -h, --height LENGTH           Fits the drawing into this height in pixels
  --background COLOR            Sets the background color
                                Examples: red, #fff, #fff000

  --info                        Prints the size, the bounding box
                                and the animation interval without rendering
  --quiet                       Disables warnings
  --verbose                     Prints debug messages

ARGS:
  <in-svg>                      Input file
  <out-png>                     Output file
";

#[derive(Debug)]
struct CliArgs {
    width: Option<u32>,
    height: Option<u32>,
    background: Option<Color>,
    info: bool,
    quiet: bool,
    verbose: bool,
    input: String,
    output: Option<String>,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        width: input.opt_value_from_fn(["-w", "--width"], parse_length)?,
        height: input.opt_value_from_fn(["-h", "--height"], parse_length)?,
        background: input.opt_value_from_str("--background")?,
        info: input.contains("--info"),
        quiet: input.contains("--quiet"),
        verbose: input.contains("--verbose"),
        input: input.free_from_str()?,
        output: input.opt_free_from_str()?,
    })
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("LENGTH cannot be zero".to_string())
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum FitTo {
    /// Keep the declared size.
    Original,
    /// Fit into a width.
    Width(u32),
    /// Fit into a height.
    Height(u32),
    /// Fit into a size.
    Size(u32, u32),
}

struct Args {
    in_svg: path::PathBuf,
    out_png: Option<path::PathBuf>,
    fit_to: FitTo,
    background: Option<Color>,
    info: bool,
    quiet: bool,
    verbose: bool,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    if !args.info && args.output.is_none() {
        return Err("<out-png> must be set".to_string());
    }

    if args.quiet && args.verbose {
        println!("Warning: --verbose has no effect when --quiet is set.");
    }

    let fit_to = match (args.width, args.height) {
        (Some(w), Some(h)) => FitTo::Size(w, h),
        (Some(w), None) => FitTo::Width(w),
        (None, Some(h)) => FitTo::Height(h),
        (None, None) => FitTo::Original,
    };

    Ok(Args {
        in_svg: args.input.into(),
        out_png: args.output.map(path::PathBuf::from),
        fit_to,
        background: args.background,
        info: args.info,
        quiet: args.quiet,
        verbose: args.verbose,
    })
}

fn print_info(scene: &Scene) {
    let size = scene.size();
    println!("size: {}x{}", size.width(), size.height());

    match scene.bbox().to_rect() {
        Some(r) => println!("bbox: {},{},{},{}", r.x(), r.y(), r.width(), r.height()),
        None => println!("bbox: none"),
    }

    match scene.delay() {
        Some(d) => println!("delay: {}ms", d.as_millis()),
        None => println!("delay: none"),
    }
}

fn render_scene(args: &Args, scene: &mut Scene) -> Result<tiny_skia::Pixmap, String> {
    let fit = match args.fit_to {
        FitTo::Original => None,
        FitTo::Width(w) => Some((w as f64, f64::INFINITY)),
        FitTo::Height(h) => Some((f64::INFINITY, h as f64)),
        FitTo::Size(w, h) => Some((w as f64, h as f64)),
    };

    let mut offset = tiny_skia::Transform::identity();
    let (width, height) = match fit {
        Some((w, h)) => {
            scene.rescale_to_fit(w, h);

            // The drawing is moved to the origin, so only its bounds are visible.
            let bbox = scene.bbox();
            if let Some(r) = bbox.to_rect() {
                offset = tiny_skia::Transform::from_translate(-r.x() as f32, -r.y() as f32);
            }

            (
                pick_length(w, bbox.width()),
                pick_length(h, bbox.height()),
            )
        }
        None => {
            let size = scene.size();
            let viewport = scene.document().viewport();
            (
                pick_length(size.width(), viewport.width()),
                pick_length(size.height(), viewport.height()),
            )
        }
    };

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or_else(|| "target size is zero".to_string())?;

    if let Some(c) = args.background {
        pixmap.fill(tiny_skia::Color::from_rgba8(c.red, c.green, c.blue, c.alpha));
    }

    {
        let mut canvas = SkiaCanvas::from(pixmap.as_mut());
        canvas.apply_transform(offset);
        scene.render(&mut canvas);
    }

    Ok(pixmap)
}

/// Picks the first finite positive length.
fn pick_length(value: f64, fallback: f64) -> u32 {
    let n = if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    };

    n.ceil().max(0.0) as u32
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
