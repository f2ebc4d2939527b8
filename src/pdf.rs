//! Confirmation document generation.
//!
//! Renders a one-page PDF for an appointment record and writes it into the
//! configured output directory as `appointment_<reference_id>.pdf`.

use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use thiserror::Error;

use crate::models::{AppointmentRecord, APPOINTMENT_DATE_FORMAT};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes confirmation documents for appointment records. Cloning is cheap;
/// every clone writes into the same directory.
#[derive(Clone, Debug)]
pub struct PdfGenerator {
    dir: PathBuf,
}

impl PdfGenerator {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Creates the output directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<(), PdfError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn document_path(&self, reference_id: &str) -> PathBuf {
        self.dir.join(format!("appointment_{reference_id}.pdf"))
    }

    /// Renders the confirmation and writes it to the document path, replacing
    /// any previous file for the same reference identifier.
    pub fn generate(&self, record: &AppointmentRecord) -> Result<PathBuf, PdfError> {
        let bytes = render(record)?;
        let path = self.document_path(&record.reference_id);
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "wrote confirmation document");
        Ok(path)
    }
}

fn render(record: &AppointmentRecord) -> Result<Vec<u8>, PdfError> {
    // US letter sheet, sized in millimetres.
    let (doc, page1, layer1) =
        PdfDocument::new("Appointment Confirmation", Mm(215.9), Mm(279.4), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PdfError::Render(format!("failed to add font: {e}")))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PdfError::Render(format!("failed to add font: {e}")))?;

    layer.use_text("Appointment Confirmation", 24.0, Mm(52.0), Mm(240.0), &font_bold);

    let rows = [
        ("Reference ID:", record.reference_id.clone()),
        ("Patient Name:", record.patient_name.clone()),
        ("Contact Number:", record.contact_number.clone()),
        (
            "Appointment Date:",
            record
                .appointment_date
                .format(APPOINTMENT_DATE_FORMAT)
                .to_string(),
        ),
        ("Status:", record.status.to_string()),
    ];

    // Two-column table below the title. Labels sit on a grey column, the
    // closing status row on beige. Column breaks at 76.2 and 177.8.
    let label_left = Mm(25.4);
    let value_left = Mm(76.2);
    let right_edge = Mm(177.8);
    let table_top = Mm(225.0);
    let row_height = Mm(10.0);

    let grey = Color::Rgb(Rgb::new(0.83, 0.83, 0.83, None));
    let beige = Color::Rgb(Rgb::new(0.96, 0.96, 0.86, None));

    let mut row_top = table_top;
    for i in 0..rows.len() {
        let row_bottom = row_top - row_height;
        if i == rows.len() - 1 {
            layer.set_fill_color(beige.clone());
            layer.add_polygon(cell_fill(label_left, right_edge, row_top, row_bottom));
        } else {
            layer.set_fill_color(grey.clone());
            layer.add_polygon(cell_fill(label_left, value_left, row_top, row_bottom));
        }
        row_top = row_bottom;
    }
    // After the last row the cursor sits on the table's bottom edge.
    let table_bottom = row_top;

    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(1.0);
    for x in [label_left, value_left, right_edge] {
        layer.add_line(border_line(
            Point::new(x, table_top),
            Point::new(x, table_bottom),
        ));
    }
    let mut y = table_top;
    for _ in 0..=rows.len() {
        layer.add_line(border_line(
            Point::new(label_left, y),
            Point::new(right_edge, y),
        ));
        y -= row_height;
    }

    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    let mut row_top = table_top;
    for (label, value) in rows.iter() {
        let text_y = row_top - Mm(6.5);
        layer.use_text(*label, 12.0, Mm(27.5), text_y, &font_bold);
        layer.use_text(value.clone(), 12.0, Mm(78.3), text_y, &font_bold);
        row_top -= row_height;
    }

    let footer = "Thank you for choosing our healthcare services. Please arrive \
                  15 minutes before your scheduled appointment.";
    let mut footer_y = table_bottom - Mm(11.0);
    for line in wrap_text(footer, 80) {
        layer.use_text(line, 10.0, label_left, footer_y, &font);
        footer_y -= Mm(5.0);
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| PdfError::Render(format!("failed to save document: {e}")))?;
    Ok(bytes)
}

fn cell_fill(left: Mm, right: Mm, top: Mm, bottom: Mm) -> Polygon {
    Polygon {
        rings: vec![vec![
            (Point::new(left, top), false),
            (Point::new(right, top), false),
            (Point::new(right, bottom), false),
            (Point::new(left, bottom), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

fn border_line(from: Point, to: Point) -> Line {
    Line {
        points: vec![(from, false), (to, false)],
        is_closed: false,
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + word.len() + 1 <= max_chars {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line.clone());
            current_line = word.to_string();
        }
    }
    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}
