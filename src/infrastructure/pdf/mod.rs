//! Payslip rendering to PDF.

mod canvas;
mod content;

pub use canvas::{Frame, PAGE_HEIGHT, PAGE_WIDTH};
pub use content::PayslipContent;

use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::config::{Branding, TextColor};
use crate::domain::ports::PayslipRenderer;
use crate::domain::record::EmployeeRecord;
use crate::error::RenderError;
use canvas::{Align, Canvas, TableStyle, TextStyle};

const SALARY_TABLE: TableStyle = TableStyle {
    column_widths: [50.8, 50.8],
    row_height: 7.0,
    padding: 2.0,
    font_size: 10.0,
    header_fill: (0.0, 0.0, 1.0),
    header_text: (0.96, 0.96, 0.96),
    body_text: (0.0, 0.0, 0.0),
    grid: (0.0, 0.0, 0.0),
    grid_width: 1.0,
};

/// Renders a single-page (overflowing when needed) US Letter payslip with
/// the organization's branding.
///
/// The issue date defaults to the day of rendering; pin it with
/// [`PdfPayslipRenderer::issued_on`] for reproducible output.
#[derive(Debug, Clone)]
pub struct PdfPayslipRenderer {
    branding: Branding,
    issued: Option<NaiveDate>,
}

impl PdfPayslipRenderer {
    pub fn new(branding: Branding) -> Self {
        Self {
            branding,
            issued: None,
        }
    }

    pub fn issued_on(mut self, date: NaiveDate) -> Self {
        self.issued = Some(date);
        self
    }

    fn issue_date(&self) -> NaiveDate {
        self.issued.unwrap_or_else(|| Local::now().date_naive())
    }

    fn styles(&self) -> Styles {
        let text = |size, leading, bold, color: TextColor, align| TextStyle {
            size,
            leading,
            bold,
            color: color.rgb(),
            align,
        };
        Styles {
            heading: text(16.0, 20.0, true, self.branding.heading_color, Align::Center),
            subheading: text(12.0, 14.0, true, TextColor::Black, Align::Left),
            body: text(10.0, 12.0, false, self.branding.body_color, Align::Left),
            signature: text(12.0, 14.0, true, TextColor::Blue, Align::Center),
        }
    }
}

struct Styles {
    heading: TextStyle,
    subheading: TextStyle,
    body: TextStyle,
    signature: TextStyle,
}

impl PayslipRenderer for PdfPayslipRenderer {
    fn render(&self, record: &EmployeeRecord, destination: &Path) -> Result<(), RenderError> {
        let content =
            PayslipContent::new(record, &self.branding.organization, self.issue_date());
        let styles = self.styles();
        let frame = Frame::from_margins(&self.branding.margins)?;
        let title = format!("Payslip {}", record.employee_id());
        let mut canvas = Canvas::new(&title, frame)?;

        canvas.paragraph(&[content.heading.as_str()], &styles.heading);
        canvas.spacer(0.2);
        canvas.paragraph(&[content.subheading], &styles.subheading);
        canvas.spacer(0.2);
        canvas.paragraph(&content.details, &styles.body);
        canvas.spacer(0.3);
        canvas.table(&content.salary_rows, &SALARY_TABLE);
        canvas.spacer(0.3);
        canvas.paragraph(&content.footer, &styles.body);
        canvas.spacer(0.5);
        canvas.paragraph(&content.signature, &styles.signature);

        debug!(
            employee_id = %record.employee_id(),
            pages = canvas.pages(),
            path = %destination.display(),
            "payslip laid out"
        );
        canvas.save(destination)
    }
}
