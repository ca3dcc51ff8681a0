//! # PDF Generation Module
//!
//! Renders an [`Invoice`] to PDF using Typst. This is what "Download PDF"
//! produces; "Print Invoice" goes through the HTML document in
//! [`crate::print`] instead.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Invoice data is injected via string replacement before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use booking_core::booking::BookingRecord;
//! use booking_core::config::CheckoutConfig;
//! use booking_core::invoice::Invoice;
//! use booking_core::pdf::render_invoice_pdf;
//!
//! let invoice = Invoice::issue(&BookingRecord::sample(), &CheckoutConfig::default());
//! let pdf_bytes = render_invoice_pdf(&invoice).unwrap();
//! std::fs::write("invoice.pdf", pdf_bytes).unwrap();
//! ```

use std::path::Path;

use chrono::Utc;
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{BookingError, BookingResult};
use crate::invoice::Invoice;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Bundled fonts, parsed once per process
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    typst_assets::fonts()
        .flat_map(|data| Font::iter(Bytes::new(data.to_vec())))
        .collect()
});

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the invoice. `{{KEY}}` placeholders are replaced with
/// escaped invoice values.
const INVOICE_TEMPLATE: &str = r##"
#set page(paper: "a4", margin: 20mm)
#set text(size: 11pt, fill: rgb("#333333"))

#block(width: 100%, stroke: (bottom: 3pt + rgb("#3b82f6")), inset: (bottom: 14pt))[
  #text(size: 24pt, weight: "bold", fill: rgb("#1e40af"))[{{BRAND}}]
  #v(2pt)
  #text(fill: rgb("#666666"))[{{TAGLINE}}]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [#text(size: 9pt, fill: rgb("#666666"))[Invoice Number] \ #strong[{{NUMBER}}]],
  [#text(size: 9pt, fill: rgb("#666666"))[Invoice Date] \ #strong[{{DATE}}]],
)

{{SECTIONS}}

#v(16pt)

#block(width: 100%, fill: rgb("#f3f4f6"), inset: 14pt, radius: 6pt)[
  #grid(
    columns: (1fr, auto),
    align: (left + horizon, right + horizon),
    text(size: 14pt, weight: "bold")[{{TOTAL_LABEL}}:],
    text(size: 20pt, weight: "bold", fill: rgb("#3b82f6"))[{{TOTAL}}],
  )
]

#v(16pt)

#block(width: 100%, fill: rgb("#eff6ff"), stroke: (left: 4pt + rgb("#3b82f6")), inset: 14pt)[
  {{FOOTER}}
]
"##;

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Build the Typst source for an invoice
fn invoice_source(invoice: &Invoice) -> String {
    INVOICE_TEMPLATE
        .replace("{{BRAND}}", &escape_typst(&invoice.brand_name))
        .replace("{{TAGLINE}}", &escape_typst(&invoice.brand_tagline))
        .replace("{{NUMBER}}", &escape_typst(invoice.number.as_str()))
        .replace("{{DATE}}", &escape_typst(&invoice.date_display()))
        .replace("{{SECTIONS}}", &build_section_blocks(invoice))
        .replace("{{TOTAL_LABEL}}", &escape_typst(&invoice.total_label))
        .replace("{{TOTAL}}", &escape_typst(&invoice.total))
        .replace("{{FOOTER}}", &escape_typst(&invoice.footer))
}

/// Render an invoice to PDF.
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(BookingError::RenderFailed)` - If Typst compilation or export fails
pub fn render_invoice_pdf(invoice: &Invoice) -> BookingResult<Vec<u8>> {
    let world = PdfWorld::new(invoice_source(invoice));
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        BookingError::render_failed("typst compile", error_msgs.join("; "))
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        BookingError::render_failed("pdf export", error_msgs.join("; "))
    })?;

    tracing::debug!(number = %invoice.number, bytes = pdf_bytes.len(), "rendered invoice pdf");
    Ok(pdf_bytes)
}

/// Render an invoice and write it to `path`
pub fn save_invoice_pdf(invoice: &Invoice, path: &Path) -> BookingResult<()> {
    let bytes = render_invoice_pdf(invoice)?;
    std::fs::write(path, bytes)
        .map_err(|e| BookingError::file_error("write", path.display().to_string(), e.to_string()))?;
    tracing::info!(number = %invoice.number, path = %path.display(), "saved invoice pdf");
    Ok(())
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '~' => "\\~".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '/' => "\\/".to_string(),
            '\n' => " ".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// One heading plus a two-column table per invoice section
fn build_section_blocks(invoice: &Invoice) -> String {
    invoice
        .sections
        .iter()
        .map(|section| {
            let rows = section
                .rows
                .iter()
                .map(|row| format!("  [{}:], [#strong[{}]],", escape_typst(&row.label), escape_typst(&row.value)))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "#v(16pt)\n#text(size: 14pt, weight: \"bold\", fill: rgb(\"#1e40af\"))[{}]\n#table(\n  columns: (1fr, auto),\n  stroke: none,\n  inset: (x: 0pt, y: 5pt),\n{}\n)\n#line(length: 100%, stroke: 0.5pt + rgb(\"#e5e7eb\"))\n",
                escape_typst(&section.title),
                rows
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingRecord;
    use crate::config::CheckoutConfig;
    use crate::invoice::InvoiceNumber;
    use chrono::NaiveDate;

    fn invoice() -> Invoice {
        Invoice::build(
            &BookingRecord::sample(),
            &CheckoutConfig::default(),
            InvoiceNumber::from_millis(1_700_000_000_321),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        )
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("$499.00"), "\\$499.00");
        assert_eq!(escape_typst("#1 [a]"), "\\#1 \\[a\\]");
        assert_eq!(escape_typst("TX//1"), "TX\\/\\/1");
    }

    #[test]
    fn test_pdf_with_comment_markers_in_values() {
        let mut record = BookingRecord::sample();
        record.payment.transaction_id = "TX//1 tail".to_string();
        record.address.street_name = "Nile /* Street".to_string();
        let invoice = Invoice::build(
            &record,
            &CheckoutConfig::default(),
            InvoiceNumber::from_millis(1_700_000_000_321),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        );

        let pdf = render_invoice_pdf(&invoice);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    }

    #[test]
    fn test_source_has_no_placeholders_left() {
        let source = invoice_source(&invoice());
        assert!(!source.contains("{{"));
        assert!(source.contains("INV-000321"));
        assert!(source.contains("[Address:], [#strong[12 Nile Street, Zamalek, Floor 3, Apt 7B]],"));
        assert!(source.contains("\\$499.00"));
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_invoice_pdf(&invoice());
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }
}
