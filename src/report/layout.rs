//! Report layout
//!
//! Places every block of the report on a single A4 page using a running
//! vertical cursor. Coordinates are millimetres from the top-left corner;
//! the renderer flips them for PDF space. Layout is pure so the exact
//! content and positions can be checked without decoding a PDF.

use serde::Serialize;

use crate::report::classifier::RiskAssessment;
use crate::report::metrics::{text_width_mm, wrap_to_width, FontStyle};
use crate::report::patient::PatientIdentity;

// ============================================================================
// Page Geometry (mm)
// ============================================================================

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const LOGO_SIZE: f32 = 22.0;
pub const RISK_BOX_RADIUS: f32 = 2.0;

/// Meal plan lines whose cursor passes this point are dropped
pub const MEAL_PLAN_CUTOFF: f32 = PAGE_HEIGHT - 45.0;

const MAX_FACTORS: usize = 3;
const MAX_RECOMMENDATIONS: usize = 4;
const LINE_STEP: f32 = 5.0;
const BODY_SIZE: f32 = 10.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

pub const COLOR_MEDICAL_GREEN: (u8, u8, u8) = (34, 139, 94);
pub const COLOR_DARK_GRAY: (u8, u8, u8) = (60, 60, 60);
pub const COLOR_LIGHT_GRAY: (u8, u8, u8) = (180, 180, 180);
pub const COLOR_SUBTITLE: (u8, u8, u8) = (120, 120, 120);
pub const COLOR_META: (u8, u8, u8) = (100, 100, 100);
pub const COLOR_FOOTER: (u8, u8, u8) = (110, 110, 110);
pub const COLOR_ELEVATED: (u8, u8, u8) = (178, 34, 34);
pub const COLOR_NORMAL: (u8, u8, u8) = (40, 167, 69);
pub const COLOR_BLACK: (u8, u8, u8) = (0, 0, 0);
pub const COLOR_WHITE: (u8, u8, u8) = (255, 255, 255);

pub const DISCLAIMER: &str = "This report provides AI-assisted screening only and does not replace professional medical diagnosis.";
pub const SIGNATURE: &str = "Generated by HealthAI System v1.0";

// ============================================================================
// Layout Types
// ============================================================================

/// Everything the report prints, already resolved to strings
#[derive(Debug, Clone, Serialize)]
pub struct ReportContent {
    pub report_id: String,
    pub date_label: String,
    pub title: String,
    pub patient: PatientIdentity,
    /// Rendered `label: value unit` lines, configured order
    pub parameters: Vec<String>,
    pub assessment: RiskAssessment,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub meal_plan: Vec<String>,
}

/// A positioned drawing primitive; `y` is the text baseline or the top edge
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        color: (u8, u8, u8),
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: (u8, u8, u8),
    },
    FilledRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Corner radius, 0 for square corners
        radius: f32,
        color: (u8, u8, u8),
    },
}

/// Square slot the logo is painted into, when one loaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoSlot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

/// A fully laid out single-page report
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub logo_slot: LogoSlot,
    pub ops: Vec<DrawOp>,
    /// Meal plan lines that fell past the cutoff and were not drawn
    pub meal_lines_dropped: usize,
}

impl ReportLayout {
    /// All text, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// The text op with exactly this content
    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

// ============================================================================
// Composition
// ============================================================================

struct Composer {
    ops: Vec<DrawOp>,
}

impl Composer {
    fn text(&mut self, text: &str, x: f32, y: f32, size: f32, style: FontStyle, color: (u8, u8, u8)) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            style,
            color,
        });
    }

    fn text_right(&mut self, text: &str, right: f32, y: f32, size: f32, style: FontStyle, color: (u8, u8, u8)) {
        let x = right - text_width_mm(text, style, size);
        self.text(text, x, y, size, style, color);
    }

    fn text_center(&mut self, text: &str, center: f32, y: f32, size: f32, style: FontStyle, color: (u8, u8, u8)) {
        let x = center - text_width_mm(text, style, size) / 2.0;
        self.text(text, x, y, size, style, color);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: (u8, u8, u8)) {
        self.ops.push(DrawOp::Line { x1, y1, x2, y2, width, color });
    }

    fn rounded_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32, color: (u8, u8, u8)) {
        self.ops.push(DrawOp::FilledRect { x, y, width, height, radius, color });
    }

    fn bullets(&mut self, items: &[String], limit: usize, y: &mut f32) {
        for item in items.iter().take(limit) {
            self.text(&format!("• {}", item), MARGIN + 5.0, *y, BODY_SIZE, FontStyle::Regular, COLOR_BLACK);
            *y += LINE_STEP;
        }
    }
}

/// Lay out the report
pub fn compose(content: &ReportContent) -> ReportLayout {
    let mut c = Composer { ops: Vec::new() };
    let right = PAGE_WIDTH - MARGIN;
    let mut y = MARGIN;

    // Header
    let logo_slot = LogoSlot { x: MARGIN, y, size: LOGO_SIZE };
    c.text("HealthAI", MARGIN + 28.0, y + 9.0, 18.0, FontStyle::Bold, COLOR_DARK_GRAY);
    c.text("Smart Healthcare System", MARGIN + 28.0, y + 15.0, 8.0, FontStyle::Regular, COLOR_SUBTITLE);
    c.text_right(&format!("Date: {}", content.date_label), right, y + 6.0, 8.0, FontStyle::Regular, COLOR_META);
    c.text_right(&format!("ID: {}", content.report_id), right, y + 12.0, 8.0, FontStyle::Regular, COLOR_META);
    y += 28.0;

    c.line(MARGIN, y, right, y, 0.5, COLOR_LIGHT_GRAY);
    c.line(MARGIN, y + 1.0, MARGIN + 40.0, y + 1.0, 2.0, COLOR_MEDICAL_GREEN);
    y += 10.0;

    c.text_center(
        &format!("AI-Assisted {} Report", content.title),
        PAGE_WIDTH / 2.0,
        y,
        13.0,
        FontStyle::Bold,
        COLOR_BLACK,
    );
    y += 10.0;
    c.line(MARGIN, y, right, y, 0.3, COLOR_LIGHT_GRAY);
    y += 10.0;

    // Patient information
    c.text("PATIENT INFORMATION", MARGIN, y, 11.0, FontStyle::Bold, COLOR_BLACK);
    y += 6.0;
    let patient = &content.patient;
    c.text(&format!("Name: {}", patient.name), MARGIN + 5.0, y, 9.0, FontStyle::Regular, COLOR_BLACK);
    c.text(&format!("Age: {}", patient.age), MARGIN + 75.0, y, 9.0, FontStyle::Regular, COLOR_BLACK);
    c.text(&format!("Gender: {}", patient.gender), MARGIN + 125.0, y, 9.0, FontStyle::Regular, COLOR_BLACK);
    y += 12.0;

    // Clinical parameters
    c.text("KEY CLINICAL PARAMETERS", MARGIN, y, 9.0, FontStyle::Bold, COLOR_BLACK);
    y += 6.0;
    for line in &content.parameters {
        c.text(line, MARGIN + 5.0, y, 9.0, FontStyle::Regular, COLOR_BLACK);
        y += LINE_STEP;
    }
    y += 10.0;

    // Risk box
    let assessment = &content.assessment;
    let box_color = if assessment.category.is_elevated() {
        COLOR_ELEVATED
    } else {
        COLOR_NORMAL
    };
    c.rounded_rect(MARGIN, y, PAGE_WIDTH - 2.0 * MARGIN, 18.0, RISK_BOX_RADIUS, box_color);
    c.text("RISK ASSESSMENT", MARGIN + 5.0, y + 7.0, 11.0, FontStyle::Bold, COLOR_WHITE);
    c.text(
        &format!("Assessment: {}", assessment.category.as_str().to_uppercase()),
        MARGIN + 5.0,
        y + 14.0,
        BODY_SIZE,
        FontStyle::Bold,
        COLOR_WHITE,
    );
    c.text_right(
        &format!("Confidence: {}%", assessment.confidence_label()),
        right - 5.0,
        y + 14.0,
        BODY_SIZE,
        FontStyle::Bold,
        COLOR_WHITE,
    );
    y += 26.0;

    // Factors
    c.text("KEY CONTRIBUTING FACTORS", MARGIN, y, BODY_SIZE, FontStyle::Bold, COLOR_BLACK);
    y += 6.0;
    c.bullets(&content.factors, MAX_FACTORS, &mut y);
    y += 8.0;

    // Recommendations
    c.text("PERSONALIZED RECOMMENDATIONS", MARGIN, y, BODY_SIZE, FontStyle::Bold, COLOR_BLACK);
    y += 6.0;
    c.bullets(&content.recommendations, MAX_RECOMMENDATIONS, &mut y);
    y += 8.0;

    // Meal plan. Overflow is dropped, never continued on a second page.
    let mut meal_lines_dropped = 0;
    if !content.meal_plan.is_empty() {
        c.text("RECOMMENDED MEAL PLAN", MARGIN, y, BODY_SIZE, FontStyle::Bold, COLOR_BLACK);
        y += 6.0;

        let wrap_width = PAGE_WIDTH - 2.0 * MARGIN - 10.0;
        for meal in &content.meal_plan {
            let bullet = format!("• {}", meal);
            for line in wrap_to_width(&bullet, wrap_width, FontStyle::Regular, BODY_SIZE) {
                if y > MEAL_PLAN_CUTOFF {
                    meal_lines_dropped += 1;
                    continue;
                }
                c.text(&line, MARGIN + 5.0, y, BODY_SIZE, FontStyle::Regular, COLOR_BLACK);
                y += LINE_STEP;
            }
        }
    }

    if meal_lines_dropped > 0 {
        tracing::debug!(meal_lines_dropped, report_id = %content.report_id, "Meal plan truncated at page bottom");
    }

    // Footer
    c.line(MARGIN, PAGE_HEIGHT - 28.0, right, PAGE_HEIGHT - 28.0, 0.3, COLOR_LIGHT_GRAY);
    let mut footer_y = PAGE_HEIGHT - 20.0;
    for line in wrap_to_width(DISCLAIMER, PAGE_WIDTH - 40.0, FontStyle::Italic, 8.0) {
        c.text_center(&line, PAGE_WIDTH / 2.0, footer_y, 8.0, FontStyle::Italic, COLOR_FOOTER);
        footer_y += 8.0 * 1.15 * PT_TO_MM;
    }
    c.text_center(SIGNATURE, PAGE_WIDTH / 2.0, PAGE_HEIGHT - 14.0, 8.0, FontStyle::Regular, COLOR_FOOTER);

    ReportLayout {
        page_width: PAGE_WIDTH,
        page_height: PAGE_HEIGHT,
        logo_slot,
        ops: c.ops,
        meal_lines_dropped,
    }
}
