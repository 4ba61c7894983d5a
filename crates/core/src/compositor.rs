//! Rasterising the overlay onto the template.
//!
//! The template is decoded to RGBA8, premultiplied into a `tiny_skia` pixmap, and the overlay
//! tree is rendered straight onto it at the origin. The pixmap is then demultiplied and encoded
//! as PNG.

use std::io::Cursor;
use std::sync::Arc;

use resvg::tiny_skia;
use usvg::fontdb;

use crate::overlay::OverlayMarkup;
use crate::template::TemplateAsset;
use crate::{CertificateError, CertificateResult};

/// Renders overlays onto templates. Cheap to clone; the font database is shared read-only.
#[derive(Clone)]
pub struct Compositor {
    fontdb: Arc<fontdb::Database>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("faces", &self.fontdb.len())
            .finish()
    }
}

impl Default for Compositor {
    /// A compositor with no fonts loaded. Text runs are skipped when rendering.
    fn default() -> Self {
        Self::new(Arc::new(fontdb::Database::new()))
    }
}

impl Compositor {
    pub fn new(fontdb: Arc<fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Composite `overlay` onto `template` and return PNG bytes.
    ///
    /// The output has the template's own dimensions; overlay content outside them is clipped.
    pub fn composite(
        &self,
        template: &TemplateAsset,
        overlay: &OverlayMarkup,
    ) -> CertificateResult<Vec<u8>> {
        let base = template.decode()?;
        let (width, height) = base.dimensions();

        let size = tiny_skia::IntSize::from_wh(width, height).ok_or_else(|| {
            CertificateError::Canvas(format!("invalid template size {width}x{height}"))
        })?;
        let mut rgba = base.into_raw();
        premultiply_rgba8_in_place(&mut rgba);
        let mut pixmap = tiny_skia::Pixmap::from_vec(rgba, size).ok_or_else(|| {
            CertificateError::Canvas("template buffer does not match its size".into())
        })?;

        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            font_resolver: fallback_font_resolver(),
            ..Default::default()
        };
        let tree =
            usvg::Tree::from_str(overlay.as_str(), &opts).map_err(CertificateError::OverlayParse)?;

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let mut rgba = pixmap.take();
        demultiply_rgba8_in_place(&mut rgba);
        let flattened = image::RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            CertificateError::Canvas("rendered buffer does not match template size".into())
        })?;

        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(flattened)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(CertificateError::Encode)?;

        Ok(png)
    }
}

/// Resolve fonts as usual, but fall back to any loaded face instead of dropping the text.
fn fallback_font_resolver() -> usvg::FontResolver<'static> {
    let select_default = usvg::FontResolver::default_font_selector();
    usvg::FontResolver {
        select_font: Box::new(move |font, db| {
            select_default(font, db).or_else(|| db.faces().next().map(|face| face.id))
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 || a == 0 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::CertificateLayout;
    use crate::validation::CertificateRequest;

    fn template(width: u32, height: u32) -> TemplateAsset {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 51, 102, 255]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        TemplateAsset::from_bytes("template.png", buf)
    }

    fn overlay(width: u32, height: u32) -> OverlayMarkup {
        let req = CertificateRequest::from_params(Some("João Silva"), Some("123.456.789-00"))
            .unwrap();
        OverlayMarkup::build(&CertificateLayout::standard(), &req, width, height)
    }

    fn compositor() -> Compositor {
        Compositor::default()
    }

    fn compositor_with_fixture_font() -> Compositor {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/data/fonts/DejaVuSans.ttf");
        let mut db = fontdb::Database::new();
        db.load_font_file(path).unwrap();
        Compositor::new(Arc::new(db))
    }

    fn changed_pixels(
        img: &image::RgbaImage,
        base: image::Rgba<u8>,
        rows: std::ops::RangeInclusive<u32>,
        cols: std::ops::Range<u32>,
    ) -> usize {
        rows.flat_map(|y| cols.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| img.get_pixel(x, y) != &base)
            .count()
    }

    #[test]
    fn output_is_png_with_template_dimensions() {
        let png = compositor()
            .composite(&template(400, 600), &overlay(400, 600))
            .unwrap();

        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (400, 600));
    }

    #[test]
    fn compositing_is_deterministic() {
        let c = compositor();
        let t = template(120, 80);
        let o = overlay(120, 80);
        assert_eq!(c.composite(&t, &o).unwrap(), c.composite(&t, &o).unwrap());
    }

    #[test]
    fn opaque_template_pixels_survive_untouched_outside_text() {
        let png = compositor()
            .composite(&template(10, 10), &overlay(10, 10))
            .unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgba([0, 51, 102, 255]));
    }

    #[test]
    fn text_runs_are_drawn_at_their_layout_positions() {
        let base = image::Rgba([150, 150, 150, 255]);
        let img = image::RgbaImage::from_pixel(400, 600, base);
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        let template = TemplateAsset::from_bytes("grey.png", buf);

        let png = compositor_with_fixture_font()
            .composite(&template, &overlay(400, 600))
            .unwrap();
        let out = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(out.dimensions(), (400, 600));

        // name at baseline 215, tax id at 245, holder line at 445
        assert!(changed_pixels(&out, base, 195..=220, 120..400) > 0);
        assert!(changed_pixels(&out, base, 228..=250, 120..400) > 0);
        assert!(changed_pixels(&out, base, 430..=450, 55..400) > 0);

        assert_eq!(changed_pixels(&out, base, 0..=185, 0..400), 0);
        assert_eq!(changed_pixels(&out, base, 256..=424, 0..400), 0);
        assert_eq!(changed_pixels(&out, base, 456..=599, 0..400), 0);
        assert_eq!(changed_pixels(&out, base, 0..=599, 0..50), 0);
    }

    #[test]
    fn undecodable_template_is_a_render_failure() {
        let broken = TemplateAsset::from_bytes("broken.png", vec![0x89, b'P', b'N', b'G', 0, 0]);
        let err = compositor()
            .composite(&broken, &overlay(400, 600))
            .expect_err("must fail");
        assert_eq!(err.kind(), crate::ErrorKind::RenderingFailure);
    }

    #[test]
    fn alpha_conversions_round_trip_common_values() {
        let mut px = vec![200, 100, 0, 255, 10, 20, 30, 0, 255, 128, 0, 128];
        let original = px.clone();
        premultiply_rgba8_in_place(&mut px);
        assert_eq!(&px[4..8], &[0, 0, 0, 0]);
        demultiply_rgba8_in_place(&mut px);
        assert_eq!(&px[0..4], &original[0..4]);
        assert_eq!(&px[8..12], &original[8..12]);
    }
}
