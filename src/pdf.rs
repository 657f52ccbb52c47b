//! PDF composition
//!
//! This module appends the robot preview screenshot as a trailing page of
//! the receipt PDF, keeping the receipt pages untouched.

use crate::error::{Error, PdfError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::Path;
use tracing::{debug, instrument};

/// CSS pixel to PDF point scale (96dpi capture on a 72dpi page)
const PX_TO_PT: f32 = 72.0 / 96.0;

fn doc_err(e: lopdf::Error) -> Error {
    PdfError::Document(e.to_string()).into()
}

/// Append a PNG image as a new trailing page of an existing PDF
///
/// The new page is sized to the image so the screenshot keeps its aspect
/// ratio. Each call appends one page; callers invoke this exactly once per
/// receipt.
#[instrument]
pub fn append_image_page(pdf_path: &Path, image_path: &Path) -> Result<()> {
    let rgb = image::open(image_path)
        .map_err(|e| PdfError::ImageDecode(e.to_string()))?
        .to_rgb8();
    let (px_w, px_h) = rgb.dimensions();

    let mut doc = Document::load(pdf_path).map_err(doc_err)?;
    let pages_id = doc
        .catalog()
        .map_err(doc_err)?
        .get(b"Pages")
        .map_err(doc_err)?
        .as_reference()
        .map_err(doc_err)?;

    // Screenshots arrive as RGBA PNGs; stored flattened to raw RGB samples
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => px_w as i64,
            "Height" => px_h as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb.into_raw(),
    ));

    let page_w = px_w as f32 * PX_TO_PT;
    let page_h = px_h as f32 * PX_TO_PT;

    // Scale the unit image square to fill the page
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(page_w),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(page_h),
                    Object::Real(0.0),
                    Object::Real(0.0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().map_err(doc_err)?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(page_w),
            Object::Real(page_h),
        ],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im1" => image_id },
        },
        "Contents" => content_id,
    });

    let pages = doc
        .get_object_mut(pages_id)
        .map_err(doc_err)?
        .as_dict_mut()
        .map_err(doc_err)?;
    pages
        .get_mut(b"Kids")
        .map_err(doc_err)?
        .as_array_mut()
        .map_err(doc_err)?
        .push(page_id.into());
    let count = pages
        .get(b"Count")
        .map_err(doc_err)?
        .as_i64()
        .map_err(doc_err)?;
    pages.set("Count", count + 1);

    doc.compress();
    doc.save(pdf_path)?;

    debug!(
        "Appended {}x{}px image page to {}",
        px_w,
        px_h,
        pdf_path.display()
    );
    Ok(())
}

/// Number of pages in a PDF file
pub fn page_count(pdf_path: &Path) -> Result<usize> {
    let doc = Document::load(pdf_path).map_err(doc_err)?;
    Ok(doc.get_pages().len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_single_page_pdf(path: &Path) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([180, 40, 40, 255]));
        img.save(path).unwrap();
    }

    fn fixture(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
        let pdf_path = dir.path().join("order_1.pdf");
        let png_path = dir.path().join("order_1.png");
        write_single_page_pdf(&pdf_path);
        write_png(&png_path, 4, 6);
        (pdf_path, png_path)
    }

    #[test]
    fn test_append_adds_one_page() {
        let dir = tempfile::tempdir().unwrap();
        let (pdf_path, png_path) = fixture(&dir);

        assert_eq!(page_count(&pdf_path).unwrap(), 1);
        append_image_page(&pdf_path, &png_path).unwrap();
        assert_eq!(page_count(&pdf_path).unwrap(), 2);
    }

    #[test]
    fn test_appended_page_carries_image() {
        let dir = tempfile::tempdir().unwrap();
        let (pdf_path, png_path) = fixture(&dir);

        append_image_page(&pdf_path, &png_path).unwrap();

        let doc = Document::load(&pdf_path).unwrap();
        let last_id = *doc.get_pages().values().last().unwrap();
        let page = doc.get_object(last_id).unwrap().as_dict().unwrap();
        assert!(page.has(b"Contents"));
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        assert!(resources.get(b"XObject").unwrap().as_dict().unwrap().has(b"Im1"));
    }

    #[test]
    fn test_append_is_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let (pdf_path, png_path) = fixture(&dir);

        // Each call appends exactly one page; the caller owns once-only
        append_image_page(&pdf_path, &png_path).unwrap();
        append_image_page(&pdf_path, &png_path).unwrap();
        assert_eq!(page_count(&pdf_path).unwrap(), 3);
    }

    #[test]
    fn test_append_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let (pdf_path, _) = fixture(&dir);

        let missing = dir.path().join("nope.png");
        let err = append_image_page(&pdf_path, &missing).unwrap_err();
        assert!(err.to_string().contains("Image decode failed"));
    }

    #[test]
    fn test_page_count_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();
        assert!(page_count(&path).is_err());
    }
}
