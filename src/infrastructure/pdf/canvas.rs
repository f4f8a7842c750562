//! Flowing layout over printpdf: a top-down cursor inside the margin frame
//! that starts a fresh page when a block would cross the bottom margin.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use crate::config::Margins;
use crate::error::RenderError;

/// US Letter.
pub const PAGE_WIDTH: Mm = Mm(215.9);
pub const PAGE_HEIGHT: Mm = Mm(279.4);

const LAYER_NAME: &str = "Payslip";
const MM_PER_PT: f32 = 25.4 / 72.0;
const MM_PER_INCH: f32 = 25.4;

pub type Rgb3 = (f32, f32, f32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f32,
    /// Line advance in points.
    pub leading: f32,
    pub bold: bool,
    pub color: Rgb3,
    pub align: Align,
}

#[derive(Debug, Clone, Copy)]
pub struct TableStyle {
    pub column_widths: [f32; 2],
    pub row_height: f32,
    pub padding: f32,
    pub font_size: f32,
    pub header_fill: Rgb3,
    pub header_text: Rgb3,
    pub body_text: Rgb3,
    pub grid: Rgb3,
    /// Grid stroke in points.
    pub grid_width: f32,
}

/// Printable area in millimetres from the page origin (bottom left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Frame {
    pub fn from_margins(margins: &Margins) -> Result<Self, RenderError> {
        let frame = Self {
            left: Margins::to_mm(margins.left),
            right: PAGE_WIDTH.0 - Margins::to_mm(margins.right),
            top: PAGE_HEIGHT.0 - Margins::to_mm(margins.top),
            bottom: Margins::to_mm(margins.bottom),
        };
        if frame.width() <= 0.0 || frame.top <= frame.bottom {
            return Err(RenderError::Layout(
                "margins leave no printable area".to_string(),
            ));
        }
        Ok(frame)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

pub struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    frame: Frame,
    cursor: f32,
    pages: usize,
}

impl Canvas {
    pub fn new(title: &str, frame: Frame) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            frame,
            cursor: frame.top,
            pages: 1,
        })
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn spacer(&mut self, inches: f32) {
        self.cursor -= inches * MM_PER_INCH;
    }

    /// One line of text per entry, each advancing by the style's leading.
    pub fn paragraph<S: AsRef<str>>(&mut self, lines: &[S], style: &TextStyle) {
        let leading = style.leading * MM_PER_PT;
        let size = style.size * MM_PER_PT;
        for line in lines {
            let line = line.as_ref();
            self.ensure_room(leading);
            self.cursor -= leading;

            let x = match style.align {
                Align::Left => self.frame.left,
                Align::Center => {
                    let width = text_width(line, style.size, style.bold);
                    self.frame.left + ((self.frame.width() - width) / 2.0).max(0.0)
                }
            };
            let font = if style.bold { &self.bold } else { &self.regular };
            self.layer.set_fill_color(rgb(style.color));
            self.layer
                .use_text(line, style.size, Mm(x), Mm(self.cursor + size * 0.25), font);
        }
    }

    /// A bordered two-column table, centred in the frame. The first row is
    /// filled as a header.
    pub fn table<S: AsRef<str>>(&mut self, rows: &[(&str, S)], style: &TableStyle) {
        let [label_width, value_width] = style.column_widths;
        let table_width = label_width + value_width;
        let height = style.row_height * rows.len() as f32;
        self.ensure_room(height);

        let left = self.frame.left + ((self.frame.width() - table_width) / 2.0).max(0.0);
        let top = self.cursor;
        let text_size = style.font_size * MM_PER_PT;

        for (index, (label, value)) in rows.iter().enumerate() {
            let row_top = top - style.row_height * index as f32;
            let row_bottom = row_top - style.row_height;

            let text_color = if index == 0 {
                self.layer.set_fill_color(rgb(style.header_fill));
                self.layer.add_rect(
                    Rect::new(Mm(left), Mm(row_bottom), Mm(left + table_width), Mm(row_top))
                        .with_mode(PaintMode::Fill),
                );
                style.header_text
            } else {
                style.body_text
            };

            let baseline = row_bottom + (style.row_height - text_size) / 2.0 + text_size * 0.25;
            self.layer.set_fill_color(rgb(text_color));
            self.layer.use_text(
                *label,
                style.font_size,
                Mm(left + style.padding),
                Mm(baseline),
                &self.regular,
            );
            self.layer.use_text(
                value.as_ref(),
                style.font_size,
                Mm(left + label_width + style.padding),
                Mm(baseline),
                &self.regular,
            );
        }

        self.layer.set_outline_color(rgb(style.grid));
        self.layer.set_outline_thickness(style.grid_width);
        for index in 0..=rows.len() {
            let y = top - style.row_height * index as f32;
            self.stroke((left, y), (left + table_width, y));
        }
        for x in [left, left + label_width, left + table_width] {
            self.stroke((x, top), (x, top - height));
        }

        self.cursor = top - height;
    }

    pub fn save(self, destination: &Path) -> Result<(), RenderError> {
        let file = File::create(destination)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(pdf_error)
    }

    fn stroke(&self, from: (f32, f32), to: (f32, f32)) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(from.1)), false),
                (Point::new(Mm(to.0), Mm(to.1)), false),
            ],
            is_closed: false,
        });
    }

    fn ensure_room(&mut self, height: f32) {
        let at_page_top = self.cursor >= self.frame.top;
        if self.cursor - height < self.frame.bottom && !at_page_top {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, LAYER_NAME);
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = self.frame.top;
            self.pages += 1;
        }
    }
}

/// Approximate Helvetica advance width in millimetres.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em = if bold { 0.56 } else { 0.5 };
    text.chars().count() as f32 * size * em * MM_PER_PT
}

fn rgb((r, g, b): Rgb3) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn pdf_error(e: printpdf::Error) -> RenderError {
    RenderError::Pdf(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_frame_from_default_margins() {
        let frame = Frame::from_margins(&Margins::default()).unwrap();
        assert!((frame.left - 19.05).abs() < 0.01);
        assert!((frame.right - (215.9 - 19.05)).abs() < 0.01);
        assert!((frame.top - (279.4 - 25.4)).abs() < 0.01);
        assert!((frame.bottom - 12.7).abs() < 0.01);
    }

    #[test]
    fn test_frame_rejects_overlapping_margins() {
        let margins = Margins {
            left: dec!(5),
            right: dec!(5),
            ..Margins::default()
        };
        assert!(matches!(
            Frame::from_margins(&margins),
            Err(RenderError::Layout(_))
        ));
    }

    #[test]
    fn test_bold_text_is_wider() {
        assert!(text_width("Net Salary", 10.0, true) > text_width("Net Salary", 10.0, false));
        assert_eq!(text_width("", 10.0, false), 0.0);
    }

    #[test]
    fn test_long_content_spills_onto_new_page() {
        let frame = Frame::from_margins(&Margins::default()).unwrap();
        let mut canvas = Canvas::new("overflow", frame).unwrap();
        let style = TextStyle {
            size: 10.0,
            leading: 12.0,
            bold: false,
            color: (0.0, 0.0, 0.0),
            align: Align::Left,
        };
        let lines: Vec<String> = (0..200).map(|i| format!("line {i}")).collect();

        canvas.paragraph(&lines, &style);
        assert!(canvas.pages() > 1);
    }
}
