//! Bitmaps and the rasterizer contract.
//!
//! Turning HTML into pixels is delegated to an external program. The library
//! only depends on the [`Rasterizer`] trait; [`CommandRasterizer`] is the
//! production implementation and tests supply their own.

use crate::error::{Result, VitaeError};
use std::fs;
use std::io::Cursor;
use std::process::Command;
use tracing::debug;

/// An 8-bit RGB bitmap, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VitaeError::Export("rasterized image is empty".to_string()));
        }
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(VitaeError::Export(format!(
                "expected {} bytes of RGB data for {}x{}, got {}",
                expected,
                width,
                height,
                rgb.len()
            )));
        }
        Ok(Self { width, height, rgb })
    }

    /// A bitmap filled with one color.
    pub fn solid(width: u32, height: u32, color: [u8; 3]) -> Result<Self> {
        let rgb = color.repeat(width as usize * height as usize);
        Self::new(width, height, rgb)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Decodes a PNG. Transparent pixels are composited onto white.
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| VitaeError::Export(format!("invalid PNG: {}", e)))?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader
            .next_frame(&mut buf)
            .map_err(|e| VitaeError::Export(format!("invalid PNG: {}", e)))?;
        let pixels = &buf[..frame.buffer_size()];

        let rgb: Vec<u8> = match frame.color_type {
            png::ColorType::Rgb => pixels.to_vec(),
            png::ColorType::Rgba => pixels
                .chunks_exact(4)
                .flat_map(|p| {
                    let a = p[3];
                    [over_white(p[0], a), over_white(p[1], a), over_white(p[2], a)]
                })
                .collect(),
            png::ColorType::Grayscale => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            png::ColorType::GrayscaleAlpha => pixels
                .chunks_exact(2)
                .flat_map(|p| {
                    let g = over_white(p[0], p[1]);
                    [g, g, g]
                })
                .collect(),
            png::ColorType::Indexed => {
                return Err(VitaeError::Export(
                    "indexed PNG was not expanded".to_string(),
                ))
            }
        };

        Self::new(frame.width, frame.height, rgb)
    }
}

fn over_white(channel: u8, alpha: u8) -> u8 {
    let c = channel as u32;
    let a = alpha as u32;
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Turns an HTML page into a bitmap.
pub trait Rasterizer {
    fn rasterize(&self, html: &str) -> Result<Raster>;
}

/// Runs an external program such as `wkhtmltoimage`.
///
/// `{input}` and `{output}` in `args` are replaced with the paths of the
/// HTML file written for the program and the PNG it must produce.
pub struct CommandRasterizer {
    program: String,
    args: Vec<String>,
}

impl CommandRasterizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Rasterizer for CommandRasterizer {
    fn rasterize(&self, html: &str) -> Result<Raster> {
        let work = tempfile::tempdir()?;
        let input = work.path().join("cv.html");
        let output = work.path().join("cv.png");
        fs::write(&input, html)?;

        let input_arg = input.to_string_lossy();
        let output_arg = output.to_string_lossy();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| {
                a.replace("{input}", &input_arg)
                    .replace("{output}", &output_arg)
            })
            .collect();

        debug!(program = %self.program, ?args, "running rasterizer");
        let result = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| VitaeError::Export(format!("failed to run {}: {}", self.program, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(VitaeError::Export(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }

        let png = fs::read(&output).map_err(|_| {
            VitaeError::Export(format!("{} produced no image", self.program))
        })?;
        Raster::from_png(&png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn raster_rejects_bad_dimensions() {
        assert!(Raster::new(0, 10, vec![]).is_err());
        assert!(Raster::new(2, 2, vec![0; 11]).is_err());
        assert!(Raster::new(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn decodes_rgb_png() {
        let png = encode_png(2, 1, png::ColorType::Rgb, &[255, 0, 0, 0, 0, 255]);
        let raster = Raster::from_png(&png).unwrap();
        assert_eq!((raster.width(), raster.height()), (2, 1));
        assert_eq!(raster.rgb(), &[255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn transparent_pixels_become_white() {
        let png = encode_png(2, 1, png::ColorType::Rgba, &[0, 0, 0, 0, 10, 20, 30, 255]);
        let raster = Raster::from_png(&png).unwrap();
        assert_eq!(raster.rgb(), &[255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn garbage_is_not_a_png() {
        assert!(matches!(
            Raster::from_png(b"definitely not a png"),
            Err(VitaeError::Export(_))
        ));
    }

    #[test]
    fn missing_program_is_an_export_error() {
        let rasterizer = CommandRasterizer::new("vitae-no-such-rasterizer", vec![]);
        assert!(matches!(
            rasterizer.rasterize("<html></html>"),
            Err(VitaeError::Export(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn program_without_output_is_an_export_error() {
        let rasterizer = CommandRasterizer::new("true", vec!["{input}".into(), "{output}".into()]);
        let err = rasterizer.rasterize("<html></html>").unwrap_err();
        assert!(err.to_string().contains("produced no image"));
    }

    #[cfg(unix)]
    #[test]
    fn placeholders_are_substituted() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = dir.path().join("fixture.png");
        fs::write(&fixture, encode_png(1, 1, png::ColorType::Rgb, &[1, 2, 3])).unwrap();

        let rasterizer = CommandRasterizer::new(
            "cp",
            vec![fixture.to_string_lossy().into_owned(), "{output}".into()],
        );
        let raster = rasterizer.rasterize("<html></html>").unwrap();
        assert_eq!(raster.rgb(), &[1, 2, 3]);
    }
}
