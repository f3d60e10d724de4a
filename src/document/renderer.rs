// SPDX-License-Identifier: MPL-2.0
//! PDF renderer capability.
//!
//! The viewer never parses PDF itself; it goes through [`DocumentRenderer`].
//! Two backends exist:
//!
//! - [`LopdfRenderer`] (always available): parses the document structure with
//!   `lopdf` and draws blank page canvases sized from each page's `MediaBox`.
//! - `PdfiumRenderer` (cargo feature `pdfium`): full rasterization through the
//!   system PDFium library.
//!
//! Renderers are stateless with respect to documents: every call receives the
//! bytes, so calls can run on any task without sharing handles.

use crate::config::{MAX_PAGE_EXTENT_PT, MAX_RENDER_PIXELS};
use crate::error::DocumentError;
use image_rs::{ImageBuffer, Rgba};
use lopdf::{Document, Object, ObjectId};
use std::fmt;
use std::sync::Arc;

type RgbaImage = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// US Letter, used when a page has no usable `MediaBox`.
const FALLBACK_PAGE_SIZE: PageSize = PageSize {
    width_pt: 612.0,
    height_pt: 792.0,
};

/// Bound on `Parent` hops when looking up inherited page attributes.
const MAX_TREE_DEPTH: usize = 64;

const PAGE_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PAGE_BORDER: Rgba<u8> = Rgba([220, 220, 220, 255]);

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageSize {
    /// Pixel dimensions of this page drawn at `zoom` (one point per pixel at 1.0).
    ///
    /// Sides are clamped to [`MAX_PAGE_EXTENT_PT`] and the result is scaled
    /// down to stay within [`MAX_RENDER_PIXELS`].
    #[must_use]
    pub fn scaled(self, zoom: f32) -> (u32, u32) {
        let zoom = if zoom > 0.0 && zoom.is_finite() {
            f64::from(zoom)
        } else {
            1.0
        };
        let width = f64::from(self.width_pt.clamp(0.0, MAX_PAGE_EXTENT_PT)) * zoom;
        let height = f64::from(self.height_pt.clamp(0.0, MAX_PAGE_EXTENT_PT)) * zoom;

        let area = width * height;
        let max_area = MAX_RENDER_PIXELS as f64;
        let (width, height) = if area > max_area {
            let fit = (max_area / area).sqrt();
            ((width * fit).floor(), (height * fit).floor())
        } else {
            (width.round(), height.round())
        };
        (width.max(1.0) as u32, height.max(1.0) as u32)
    }
}

/// What a renderer learns when opening a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub page_sizes: Vec<PageSize>,
}

impl DocumentInfo {
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page_sizes.len() as u32
    }
}

/// A rasterized page in straight RGBA8.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl fmt::Debug for RenderedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedPage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("{} bytes", self.pixels.len()))
            .finish()
    }
}

impl From<RgbaImage> for RenderedPage {
    fn from(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }
}

/// Opens and draws PDF documents.
pub trait DocumentRenderer: Send + Sync + fmt::Debug {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Parses `bytes` and reports the document's pages.
    fn open(&self, bytes: &[u8]) -> Result<DocumentInfo, DocumentError>;

    /// Draws the zero-based `page_index` at `zoom`.
    fn render_page(
        &self,
        bytes: &[u8],
        page_index: u32,
        zoom: f32,
    ) -> Result<RenderedPage, DocumentError>;

    /// Draws a page of a document already described by [`open`](Self::open).
    ///
    /// Backends that can reuse `info` instead of re-reading `bytes` override
    /// this.
    fn render_known_page(
        &self,
        bytes: &[u8],
        info: &DocumentInfo,
        page_index: u32,
        zoom: f32,
    ) -> Result<RenderedPage, DocumentError> {
        let _ = info;
        self.render_page(bytes, page_index, zoom)
    }
}

/// Structure-only backend built on `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfRenderer;

impl LopdfRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn page_sizes(bytes: &[u8]) -> Result<Vec<PageSize>, DocumentError> {
        let doc = Document::load_mem(bytes)?;
        // lopdf decrypts files whose user password is empty while loading;
        // anything still locked needs a password.
        if doc.is_encrypted() && doc.encryption_state.is_none() {
            return Err(DocumentError::Encrypted);
        }

        let sizes: Vec<PageSize> = doc
            .get_pages()
            .into_values()
            .map(|page_id| media_box(&doc, page_id).unwrap_or(FALLBACK_PAGE_SIZE))
            .collect();

        if sizes.is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(sizes)
    }

    fn draw(size: PageSize, zoom: f32) -> RenderedPage {
        let (width, height) = size.scaled(zoom);
        let mut image = RgbaImage::from_pixel(width, height, PAGE_BACKGROUND);
        if width >= 4 && height >= 4 {
            for x in 0..width {
                image.put_pixel(x, 0, PAGE_BORDER);
                image.put_pixel(x, height - 1, PAGE_BORDER);
            }
            for y in 0..height {
                image.put_pixel(0, y, PAGE_BORDER);
                image.put_pixel(width - 1, y, PAGE_BORDER);
            }
        }
        image.into()
    }
}

/// Finds the page's `MediaBox`, inherited from the nearest `Pages` ancestor
/// when the page does not carry one.
fn media_box(doc: &Document, page_id: ObjectId) -> Option<PageSize> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(entry) = node.get(b"MediaBox") {
            return resolve(doc, entry)
                .as_array()
                .ok()
                .and_then(|array| media_box_size(array));
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(object),
        _ => object,
    }
}

fn media_box_size(array: &[Object]) -> Option<PageSize> {
    let [x0, y0, x1, y1] = array else {
        return None;
    };
    let x0 = x0.as_float().ok()?;
    let y0 = y0.as_float().ok()?;
    let x1 = x1.as_float().ok()?;
    let y1 = y1.as_float().ok()?;
    let size = PageSize {
        width_pt: (x1 - x0).abs().min(MAX_PAGE_EXTENT_PT),
        height_pt: (y1 - y0).abs().min(MAX_PAGE_EXTENT_PT),
    };
    (size.width_pt > 0.0 && size.height_pt > 0.0).then_some(size)
}

fn page_size(info: &DocumentInfo, page_index: u32) -> Result<PageSize, DocumentError> {
    info.page_sizes
        .get(page_index as usize)
        .copied()
        .ok_or(DocumentError::PageOutOfRange {
            page: page_index,
            page_count: info.page_count(),
        })
}

impl DocumentRenderer for LopdfRenderer {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn open(&self, bytes: &[u8]) -> Result<DocumentInfo, DocumentError> {
        let page_sizes = Self::page_sizes(bytes)?;
        Ok(DocumentInfo { page_sizes })
    }

    fn render_page(
        &self,
        bytes: &[u8],
        page_index: u32,
        zoom: f32,
    ) -> Result<RenderedPage, DocumentError> {
        let info = self.open(bytes)?;
        self.render_known_page(bytes, &info, page_index, zoom)
    }

    fn render_known_page(
        &self,
        _bytes: &[u8],
        info: &DocumentInfo,
        page_index: u32,
        zoom: f32,
    ) -> Result<RenderedPage, DocumentError> {
        Ok(Self::draw(page_size(info, page_index)?, zoom))
    }
}

#[cfg(feature = "pdfium")]
pub use pdfium_backend::PdfiumRenderer;

#[cfg(feature = "pdfium")]
mod pdfium_backend {
    use super::{DocumentInfo, DocumentRenderer, PageSize, RenderedPage};
    use crate::error::DocumentError;
    use pdfium_render::prelude::*;

    /// Full rasterizer backed by the system PDFium library.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct PdfiumRenderer;

    impl PdfiumRenderer {
        /// Checks that PDFium can be bound before committing to this backend.
        pub fn from_system_library() -> Result<Self, DocumentError> {
            bind()?;
            Ok(Self)
        }
    }

    fn bind() -> Result<Pdfium, DocumentError> {
        let bindings = Pdfium::bind_to_system_library().map_err(|err| {
            DocumentError::Backend(format!("failed to bind pdfium system library: {err}"))
        })?;
        Ok(Pdfium::new(bindings))
    }

    fn convert(err: PdfiumError) -> DocumentError {
        match err {
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                DocumentError::Encrypted
            }
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::FormatError) => {
                DocumentError::Malformed(err.to_string())
            }
            other => DocumentError::Backend(other.to_string()),
        }
    }

    impl DocumentRenderer for PdfiumRenderer {
        fn name(&self) -> &'static str {
            "pdfium"
        }

        fn open(&self, bytes: &[u8]) -> Result<DocumentInfo, DocumentError> {
            let pdfium = bind()?;
            let document = pdfium
                .load_pdf_from_byte_slice(bytes, None)
                .map_err(convert)?;
            let page_sizes: Vec<PageSize> = document
                .pages()
                .iter()
                .map(|page| PageSize {
                    width_pt: page.width().value,
                    height_pt: page.height().value,
                })
                .collect();
            if page_sizes.is_empty() {
                return Err(DocumentError::Empty);
            }
            Ok(DocumentInfo { page_sizes })
        }

        fn render_page(
            &self,
            bytes: &[u8],
            page_index: u32,
            zoom: f32,
        ) -> Result<RenderedPage, DocumentError> {
            let pdfium = bind()?;
            let document = pdfium
                .load_pdf_from_byte_slice(bytes, None)
                .map_err(convert)?;
            let pages = document.pages();
            let page_count = u32::from(pages.len());
            let index = u16::try_from(page_index)
                .ok()
                .filter(|_| page_index < page_count)
                .ok_or(DocumentError::PageOutOfRange {
                    page: page_index,
                    page_count,
                })?;
            let page = pages.get(index).map_err(convert)?;

            let size = PageSize {
                width_pt: page.width().value,
                height_pt: page.height().value,
            };
            let (width, height) = size.scaled(zoom);
            let config = PdfRenderConfig::new()
                .set_target_width(width as i32)
                .set_maximum_height(height as i32);
            let bitmap = page.render_with_config(&config).map_err(convert)?;

            Ok(RenderedPage {
                width: bitmap.width() as u32,
                height: bitmap.height() as u32,
                pixels: bitmap.as_rgba_bytes(),
            })
        }
    }
}

/// Picks the best available backend.
///
/// With the `pdfium` feature the PDFium backend is used when the system
/// library can be bound; otherwise the lopdf backend.
#[must_use]
pub fn default_renderer() -> Arc<dyn DocumentRenderer> {
    #[cfg(feature = "pdfium")]
    match PdfiumRenderer::from_system_library() {
        Ok(renderer) => return Arc::new(renderer),
        Err(err) => log::warn!("{}; falling back to lopdf", err),
    }

    Arc::new(LopdfRenderer::new())
}
