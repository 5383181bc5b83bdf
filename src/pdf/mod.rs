//! Service report document rendering
//!
//! Rendering is delegated to `printpdf`; this module only lays
//! structured content onto a single A4 page. The resulting bytes go to
//! the blob store and are never re-opened by this service.

use crate::error::{AppError, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};

/// Structured content of a service report document
#[derive(Debug, Clone)]
pub struct ReportContent<'a> {
    pub vehicle_description: &'a str,
    pub condition: &'a str,
    pub services_performed: &'a [String],
    pub total_cost: f64,
}

/// Render a one-page service report PDF
pub fn render_service_report(content: &ReportContent<'_>) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new("Service Report", Mm(210.0), Mm(297.0), "Layer 1");
    let current_layer = doc.get_page(page).get_layer(layer);

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to load font: {}", e)))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to load font: {}", e)))?;

    let mut y = 270.0;
    current_layer.use_text("Service Report", 20.0, Mm(20.0), Mm(y), &bold);
    y -= 14.0;

    current_layer.use_text(
        format!("Vehicle: {}", content.vehicle_description),
        11.0,
        Mm(20.0),
        Mm(y),
        &regular,
    );
    y -= 8.0;
    current_layer.use_text(
        format!("Condition: {}", content.condition),
        11.0,
        Mm(20.0),
        Mm(y),
        &regular,
    );
    y -= 12.0;

    current_layer.use_text("Services performed", 13.0, Mm(20.0), Mm(y), &bold);
    y -= 8.0;
    for service in content.services_performed {
        current_layer.use_text(format!("- {}", service), 11.0, Mm(24.0), Mm(y), &regular);
        y -= 6.0;
    }

    y -= 8.0;
    current_layer.use_text(
        format!("Total cost: ${:.2}", content.total_cost),
        13.0,
        Mm(20.0),
        Mm(y),
        &bold,
    );

    doc.save_to_bytes()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to render report: {}", e)))
}
