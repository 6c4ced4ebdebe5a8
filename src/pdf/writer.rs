use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rect, Rgb,
};
use std::io::BufWriter;
use std::path::Path;

use super::Logo;
use crate::error::{PayslipError, Result};
use crate::slip::layout::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::slip::{DrawOp, Font, SlipPlan};

/// Logo pixels are mapped one-to-one onto points before scaling
const LOGO_DPI: f32 = 72.0;

/// Paint a slip plan and write it to `path`.
pub fn write_slip(plan: &SlipPlan, logo: Option<&Logo>, path: &Path) -> Result<()> {
    let bytes = render_pdf(plan, logo)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Paint a slip plan onto a single A4 page and return the PDF bytes.
///
/// A `DrawOp::Logo` without a logo to draw is skipped.
pub fn render_pdf(plan: &SlipPlan, logo: Option<&Logo>) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        plan.title.clone(),
        mm(PAGE_WIDTH),
        mm(PAGE_HEIGHT),
        "Slip",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for op in &plan.ops {
        match op {
            DrawOp::Text(text) => {
                let font = match text.font {
                    Font::Regular => &regular,
                    Font::Bold => &bold,
                };
                layer.set_fill_color(gray(0.0));
                push_text(&layer, font, &text.text, text.size, text.x, text.depth);
            }
            DrawOp::Line {
                from,
                to,
                gray: level,
                width,
            } => {
                layer.set_outline_color(gray(*level));
                layer.set_outline_thickness(*width);
                layer.add_line(Line {
                    points: vec![(point(from.0, from.1), false), (point(to.0, to.1), false)],
                    is_closed: false,
                });
            }
            DrawOp::Rect {
                x,
                top,
                width,
                height,
                fill,
                stroke,
            } => {
                let mode = match (fill, stroke) {
                    (Some(_), Some(_)) => PaintMode::FillStroke,
                    (Some(_), None) => PaintMode::Fill,
                    (None, _) => PaintMode::Stroke,
                };
                if let Some(level) = fill {
                    layer.set_fill_color(gray(*level));
                }
                if let Some(level) = stroke {
                    layer.set_outline_color(gray(*level));
                    layer.set_outline_thickness(1.0);
                }
                let bottom = PAGE_HEIGHT - (top + height);
                let rect = Rect::new(mm(*x), mm(bottom), mm(x + width), mm(PAGE_HEIGHT - top))
                    .with_mode(mode);
                layer.add_rect(rect);
            }
            DrawOp::Logo {
                x,
                bottom,
                width,
                height,
            } => {
                if let Some(logo) = logo {
                    place_logo(&layer, logo, *x, *bottom, *width, *height);
                }
            }
        }
    }

    let mut writer = BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer).map_err(pdf_error)?;
    writer.into_inner().map_err(pdf_error)
}

fn push_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    text: &str,
    font_size: f32,
    x: f32,
    depth: f32,
) {
    // Blank values still get their slot, but there is nothing to emit
    if text.is_empty() {
        return;
    }
    layer.use_text(text, font_size, mm(x), mm(PAGE_HEIGHT - depth), font);
}

/// Stretch the logo into its box, bottom-left corner at (x, bottom depth).
fn place_logo(layer: &PdfLayerReference, logo: &Logo, x: f32, bottom: f32, width: f32, height: f32) {
    let (px_width, px_height) = logo.dimensions();
    if px_width == 0 || px_height == 0 {
        return;
    }

    let image = Image::from_dynamic_image(logo.image());
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(PAGE_HEIGHT - bottom)),
            scale_x: Some(width / px_width as f32),
            scale_y: Some(height / px_height as f32),
            dpi: Some(LOGO_DPI),
            ..Default::default()
        },
    );
}

/// Points to millimetres
fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn point(x: f32, depth: f32) -> Point {
    Point::new(mm(x), mm(PAGE_HEIGHT - depth))
}

fn gray(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn pdf_error(err: impl std::fmt::Display) -> PayslipError {
    PayslipError::PdfGeneration(err.to_string())
}
