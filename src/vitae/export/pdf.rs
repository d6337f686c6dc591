//! Single-page PDF assembly.
//!
//! The bitmap is embedded as one Flate-compressed RGB image XObject on an A4
//! portrait page. It is scaled to the page width; if that makes it taller
//! than the page it is scaled to the page height instead. It is centered
//! horizontally and anchored to the top edge.

use super::raster::{Raster, Rasterizer};
use super::write_atomically;
use crate::error::{Result, VitaeError};
use crate::model::CvDocument;
use crate::render;
use crate::theme::ThemeSettings;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

const IMAGE_NAME: &str = "Im0";

/// Where the image lands on the page. PDF coordinates: origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scales an image of `width` x `height` pixels to fit the page.
pub fn fit_to_page(width: u32, height: u32) -> Placement {
    let ratio = height as f32 / width as f32;
    let (w, h) = if PAGE_WIDTH * ratio > PAGE_HEIGHT {
        (PAGE_HEIGHT / ratio, PAGE_HEIGHT)
    } else {
        (PAGE_WIDTH, PAGE_WIDTH * ratio)
    };
    Placement {
        x: (PAGE_WIDTH - w) / 2.0,
        y: PAGE_HEIGHT - h,
        width: w,
        height: h,
    }
}

/// `Jane Doe-Smith` becomes `jane_doe_smith_cv.pdf`.
pub fn pdf_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_cv.pdf", stem)
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

/// Builds the PDF bytes for a single page showing `raster`.
pub fn build_pdf(raster: &Raster) -> Result<Vec<u8>> {
    let placement = fit_to_page(raster.width(), raster.height());

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let image = Stream::new(
        Dictionary::from_iter(vec![
            ("Type", Object::Name(b"XObject".to_vec())),
            ("Subtype", Object::Name(b"Image".to_vec())),
            ("Width", Object::Integer(raster.width() as i64)),
            ("Height", Object::Integer(raster.height() as i64)),
            ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
            ("BitsPerComponent", Object::Integer(8)),
            ("Filter", Object::Name(b"FlateDecode".to_vec())),
        ]),
        deflate(raster.rgb())?,
    );
    let image_id = doc.add_object(image);

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(placement.width),
                    real(0.0),
                    real(0.0),
                    real(placement.height),
                    real(placement.x),
                    real(placement.y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| VitaeError::Export(format!("content stream: {}", e)))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let xobjects = Dictionary::from_iter(vec![(IMAGE_NAME, Object::Reference(image_id))]);
    let resources = Dictionary::from_iter(vec![("XObject", Object::Dictionary(xobjects))]);

    let page = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)]),
        ),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]);
    let page_id = doc.add_object(page);

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(1)),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| VitaeError::Export(format!("Save failed: {}", e)))?;
    Ok(buffer)
}

/// Renders, rasterizes and writes `<name>_cv.pdf` into `dir`.
///
/// Nothing is written unless every step succeeds.
pub fn export_to(
    doc: &CvDocument,
    theme: &ThemeSettings,
    rasterizer: &dyn Rasterizer,
    dir: &Path,
) -> Result<PathBuf> {
    let html = render::render_html(doc, theme)?;
    let raster = rasterizer.rasterize(&html)?;
    let bytes = build_pdf(&raster)?;
    let path = write_atomically(dir, &pdf_file_name(&doc.personal.name), &bytes)?;
    info!(path = %path.display(), width = raster.width(), height = raster.height(), "pdf exported");
    Ok(path)
}
