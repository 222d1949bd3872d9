//! Render a steerable noise field to a grayscale PNG for visual inspection.
//! Samples a `width × height` grid spanning `extent` noise units.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use glam::DVec3;
use log::info;
use steer_core::{NoiseConfig, SteerableNoise};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Widened anisotropic 2D kernel.
    #[value(name = "2d")]
    Planar,
    /// 3D field sliced at `y = --slice`.
    #[value(name = "3d")]
    Volume,
    /// 3D field with a planar metric orthogonal to `--normal`.
    Projected,
}

#[derive(Parser, Debug)]
#[command(name = "render", about = "Render a steerable noise field to PNG")]
struct Args {
    /// Noise config JSON (defaults apply to missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "3d")]
    mode: Mode,

    #[arg(long, default_value = "512")]
    width: u32,

    #[arg(long, default_value = "512")]
    height: u32,

    /// Noise-space span of the longer image axis
    #[arg(long, default_value = "8.0")]
    extent: f64,

    /// Fixed coordinate for 3D slices
    #[arg(long, default_value = "0.5")]
    slice: f64,

    /// Plane normal for projected mode, as x,y,z
    #[arg(long, value_delimiter = ',', default_value = "1,1,0")]
    normal: Vec<f64>,

    #[arg(short, long, default_value = "steerable.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.width == 0 || args.height == 0 {
        bail!("image dimensions must be non-zero, got {}×{}", args.width, args.height);
    }
    let [nx, ny, nz] = args.normal[..] else {
        bail!("--normal expects three components, got {:?}", args.normal);
    };
    let normal = DVec3::new(nx, ny, nz);

    let config = match &args.config {
        Some(path) => NoiseConfig::from_json_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => NoiseConfig::default(),
    };
    let noise = SteerableNoise::new(config);

    let (w, h) = (args.width as usize, args.height as usize);
    let step = args.extent / w.max(h) as f64;
    info!("sampling {w}×{h} grid in {:?} mode, step {step}", args.mode);

    let mut values = Vec::with_capacity(w * h);
    for r in 0..h {
        for c in 0..w {
            let x = c as f64 * step;
            let y = r as f64 * step;
            let v = match args.mode {
                Mode::Planar => noise.sample_2d(x, y),
                Mode::Volume => noise.sample_3d(x, args.slice, y),
                Mode::Projected => noise.sample_projected(DVec3::new(x, args.slice, y), normal),
            };
            values.push(v);
        }
    }

    // NaN marks degenerate steering and renders black.
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let min_v = finite.clone().fold(f64::INFINITY, f64::min);
    let max_v = finite.fold(f64::NEG_INFINITY, f64::max);
    let range = (max_v - min_v).max(1e-12);
    let nan_count = values.iter().filter(|v| !v.is_finite()).count();
    if nan_count > 0 {
        info!("{nan_count} samples were not finite");
    }

    let mut img = image::GrayImage::new(args.width, args.height);
    for (i, v) in values.iter().enumerate() {
        let shade = if v.is_finite() { ((v - min_v) / range * 255.0) as u8 } else { 0 };
        img.put_pixel((i % w) as u32, (i / w) as u32, image::Luma([shade]));
    }
    img.save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {} (range {min_v:.4} … {max_v:.4})", args.output.display());

    Ok(())
}
