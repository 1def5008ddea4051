use anyhow::Result;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ImageReader, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod assets;
pub mod task;

/// A required source image that was not found on disk.
#[derive(Debug, Error)]
#[error("missing asset: {}", path.display())]
pub struct MissingSource {
    pub path: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    /// Resize straight to the target without preserving aspect ratio.
    Stretch,
    /// Scale to cover the target, then crop symmetrically about the center.
    Cover,
}

#[derive(Clone, Copy, Debug)]
pub struct ScalerOpts {
    width: u32,
    height: u32,
    mode: Mode,
}

impl ScalerOpts {
    pub fn stretch(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mode: Mode::Stretch,
        }
    }

    pub fn cover(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mode: Mode::Cover,
        }
    }
}

#[derive(Debug)]
pub struct Scaler {
    img: RgbaImage,
}

impl Scaler {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MissingSource {
                path: path.to_path_buf(),
            }
            .into());
        }
        let img = ImageReader::open(path)?.decode()?.to_rgba8();
        Ok(Self { img })
    }

    pub fn from_image(img: RgbaImage) -> Self {
        Self { img }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    /// Produces a new buffer of exactly `opts.width` x `opts.height`.
    ///
    /// In `Cover` mode a source that already has the target dimensions
    /// passes through unchanged, a source with the target's aspect ratio
    /// is scaled uniformly, and anything else is scaled to cover the
    /// target and center cropped.
    pub fn normalize(&self, opts: ScalerOpts) -> RgbaImage {
        let ScalerOpts {
            width,
            height,
            mode,
        } = opts;
        match mode {
            Mode::Stretch => imageops::resize(&self.img, width, height, FilterType::Lanczos3),
            Mode::Cover => {
                let (sw, sh) = self.img.dimensions();
                if (sw, sh) == (width, height) {
                    return self.img.clone();
                }
                if u64::from(sw) * u64::from(height) == u64::from(sh) * u64::from(width) {
                    return imageops::resize(&self.img, width, height, FilterType::Lanczos3);
                }
                let fitted = fit_and_crop(&self.img, width, height);
                if fitted.dimensions() == (width, height) {
                    fitted
                } else {
                    // Unreachable through fit_and_crop. Pad instead of
                    // stretching if it ever does not line up.
                    center_on_canvas(&fitted, width, height)
                }
            }
        }
    }

    pub fn write<P: AsRef<Path>>(&self, path: P, opts: ScalerOpts) -> Result<()> {
        save_png(&self.normalize(opts), path)
    }
}

fn fit_and_crop(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = img.dimensions();
    let scale = f64::max(
        f64::from(width) / f64::from(sw),
        f64::from(height) / f64::from(sh),
    );
    let rw = ((f64::from(sw) * scale).round() as u32).max(width);
    let rh = ((f64::from(sh) * scale).round() as u32).max(height);
    let resized = imageops::resize(img, rw, rh, FilterType::Lanczos3);
    let x = (rw - width) / 2;
    let y = (rh - height) / 2;
    imageops::crop_imm(&resized, x, y, width, height).to_image()
}

fn center_on_canvas(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let (iw, ih) = img.dimensions();
    let x = (i64::from(width) - i64::from(iw)) / 2;
    let y = (i64::from(height) - i64::from(ih)) / 2;
    imageops::overlay(&mut canvas, img, x, y);
    canvas
}

/// Writes `img` as an RGBA png with maximum compression, creating parent
/// directories as needed.
pub fn save_png<P: AsRef<Path>>(img: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);
    let encoder =
        PngEncoder::new_with_quality(file, CompressionType::Best, PngFilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(())
}
