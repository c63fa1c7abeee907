//! PDF rendering
//!
//! Paints a [`ReportLayout`] onto a single A4 page with printpdf. The
//! layout works top-down; PDF space grows upward, so every y is flipped
//! against the page height here.

use std::io::BufWriter;

use printpdf::image_crate::{DynamicImage, GenericImageView};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;

use crate::report::layout::{DrawOp, ReportLayout};
use crate::report::metrics::FontStyle;
use crate::report::ReportError;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Italic => &self.italic,
        }
    }
}

// ============================================================================
// PDF Generation Helper Functions
// ============================================================================

fn rgb_to_printpdf(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

fn add_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    x: Mm,
    y: Mm,
    size: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color));
    layer.use_text(text, size, x, y, font);
}

fn add_line(
    layer: &PdfLayerReference,
    x1: Mm,
    y1: Mm,
    x2: Mm,
    y2: Mm,
    color: (u8, u8, u8),
    width_mm: f32,
) {
    layer.set_outline_color(rgb_to_printpdf(color));
    layer.set_outline_thickness(mm_to_pt(width_mm));

    let line = Line {
        points: vec![(Point::new(x1, y1), false), (Point::new(x2, y2), false)],
        is_closed: false,
    };
    layer.add_line(line);
}

const CORNER_SEGMENTS: usize = 6;

/// `x`/`y` give the lower-left corner in PDF space
fn add_filled_rect(
    layer: &PdfLayerReference,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    radius: f32,
    color: (u8, u8, u8),
) {
    layer.set_fill_color(rgb_to_printpdf(color));

    let ring = rounded_rect_ring(x, y, width, height, radius)
        .into_iter()
        .map(|(px, py)| (Point::new(Mm(px), Mm(py)), false))
        .collect();
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

/// Outline of a rectangle whose corners are arcs of `radius`, each flattened
/// into straight segments. Counter-clockwise from the bottom edge, in mm.
fn rounded_rect_ring(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Vec<(f32, f32)> {
    let radius = radius.min(width.min(height) / 2.0);
    if radius <= 0.0 {
        return vec![(x, y), (x + width, y), (x + width, y + height), (x, y + height)];
    }

    let centers = [
        (x + width - radius, y + radius),
        (x + width - radius, y + height - radius),
        (x + radius, y + height - radius),
        (x + radius, y + radius),
    ];
    let mut ring = Vec::with_capacity(centers.len() * (CORNER_SEGMENTS + 1));
    for (quadrant, (cx, cy)) in centers.iter().enumerate() {
        let start = (quadrant as f32 - 1.0) * std::f32::consts::FRAC_PI_2;
        for step in 0..=CORNER_SEGMENTS {
            let angle = start + std::f32::consts::FRAC_PI_2 * step as f32 / CORNER_SEGMENTS as f32;
            ring.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
        }
    }
    ring
}

fn pdf_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(e.to_string())
}

fn mm_to_pt(mm: f32) -> f32 {
    mm * 2.834645669
}

fn add_logo(layer: &PdfLayerReference, logo: &DynamicImage, x: f32, top: f32, size: f32) {
    let (width_px, height_px) = logo.dimensions();
    let (width_px, height_px) = (width_px.max(1) as f32, height_px.max(1) as f32);

    // Pick the dpi that makes the image `size` wide, then stretch it square
    let dpi = width_px * 25.4 / size;
    let natural_height = height_px / dpi * 25.4;

    let rgb = DynamicImage::ImageRgb8(logo.to_rgb8());
    let image = Image::from_dynamic_image(&rgb);
    let transform = ImageTransform {
        translate_x: Some(Mm(x)),
        translate_y: Some(Mm(top - size)),
        dpi: Some(dpi),
        scale_y: Some(size / natural_height),
        ..Default::default()
    };
    image.add_to_layer(layer.clone(), transform);
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the layout to PDF bytes. The logo is painted into the layout's
/// logo slot when given.
pub fn render_pdf(
    layout: &ReportLayout,
    document_title: &str,
    logo: Option<&DynamicImage>,
) -> Result<Vec<u8>, ReportError> {
    let page_height = layout.page_height;
    let (doc, page, layer) = PdfDocument::new(
        document_title,
        Mm(layout.page_width),
        Mm(page_height),
        "Report",
    );

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
        italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(pdf_err)?,
    };

    let layer = doc.get_page(page).get_layer(layer);

    if let Some(logo) = logo {
        let slot = layout.logo_slot;
        add_logo(&layer, logo, slot.x, page_height - slot.y, slot.size);
    }

    for op in &layout.ops {
        match op {
            DrawOp::Text { text, x, y, size, style, color } => {
                add_text(&layer, fonts.get(*style), text, Mm(*x), Mm(page_height - y), *size, *color);
            }
            DrawOp::Line { x1, y1, x2, y2, width, color } => {
                add_line(
                    &layer,
                    Mm(*x1),
                    Mm(page_height - y1),
                    Mm(*x2),
                    Mm(page_height - y2),
                    *color,
                    *width,
                );
            }
            DrawOp::FilledRect { x, y, width, height, radius, color } => {
                add_filled_rect(
                    &layer,
                    *x,
                    page_height - y - height,
                    *width,
                    *height,
                    *radius,
                    *color,
                );
            }
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Pdf(format!("PDF buffer error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskCategory;
    use crate::report::classifier::RiskAssessment;
    use crate::report::layout::{compose, ReportContent};
    use crate::report::patient::PatientIdentity;
    use printpdf::image_crate::{Rgb, RgbImage};

    fn layout() -> ReportLayout {
        compose(&ReportContent {
            report_id: "RPT-ABC123".to_string(),
            date_label: "3/14/2026".to_string(),
            title: "Bone Fracture Assessment".to_string(),
            patient: PatientIdentity {
                name: "Not Provided".to_string(),
                age: "41".to_string(),
                gender: "Male".to_string(),
            },
            parameters: vec![],
            assessment: RiskAssessment {
                category: RiskCategory::Fracture,
                confidence: Some(0.91),
            },
            factors: vec!["Visible cortical disruption".to_string()],
            recommendations: vec!["Immobilize the limb".to_string()],
            meal_plan: vec!["Dairy or fortified alternatives".to_string()],
        })
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_pdf(&layout(), "HealthAI Report", None).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn test_rounded_ring_stays_inside_and_cuts_corners() {
        let (x, y, w, h) = (20.0, 100.0, 170.0, 18.0);
        let ring = rounded_rect_ring(x, y, w, h, 2.0);
        assert_eq!(ring.len(), 4 * (CORNER_SEGMENTS + 1));

        let eps = 1e-3;
        for &(px, py) in &ring {
            assert!(px >= x - eps && px <= x + w + eps, "{}", px);
            assert!(py >= y - eps && py <= y + h + eps, "{}", py);
        }
        for corner in [(x, y), (x + w, y), (x + w, y + h), (x, y + h)] {
            assert!(ring
                .iter()
                .all(|p| (p.0 - corner.0).abs() > 0.5 || (p.1 - corner.1).abs() > 0.5));
        }
        // Arcs meet the straight edges
        assert!((ring[0].0 - (x + w - 2.0)).abs() < eps && (ring[0].1 - y).abs() < eps);
        assert!((ring[CORNER_SEGMENTS].0 - (x + w)).abs() < eps);
    }

    #[test]
    fn test_zero_radius_ring_is_plain_rectangle() {
        assert_eq!(
            rounded_rect_ring(0.0, 0.0, 10.0, 5.0, 0.0),
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]
        );
        assert_eq!(rounded_rect_ring(0.0, 0.0, 10.0, 4.0, 9.0).len(), 4 * (CORNER_SEGMENTS + 1));
    }

    #[test]
    fn test_render_with_logo() {
        let image = RgbImage::from_pixel(64, 32, Rgb([34, 139, 94]));
        let logo = DynamicImage::ImageRgb8(image);
        let with_logo = render_pdf(&layout(), "HealthAI Report", Some(&logo)).unwrap();
        let without = render_pdf(&layout(), "HealthAI Report", None).unwrap();
        assert_eq!(&with_logo[0..4], b"%PDF");
        assert!(with_logo.len() > without.len());
    }
}
