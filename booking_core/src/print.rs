//! # Print Document
//!
//! Turns an [`Invoice`] into a self-contained HTML document (inline styles,
//! no external resources) and hands it to a secondary rendering surface for
//! printing.
//!
//! The document is produced straight from the invoice model, never from a
//! live widget tree, so on-screen layout changes cannot affect print output.
//!
//! ## Surfaces
//!
//! A [`SurfaceHost`] opens [`PrintSurface`]s. Opening may fail (a blocked
//! popup, no temp directory); the print action is then silently abandoned.
//!
//! ```rust
//! use std::time::Duration;
//! use booking_core::print::{begin_print, PrintSurface, SurfaceHost};
//! # use booking_core::{booking::BookingRecord, config::CheckoutConfig, invoice::Invoice};
//!
//! struct Page(String);
//! impl PrintSurface for Page {
//!     fn write_document(&mut self, html: &str) { self.0 = html.to_string(); }
//!     fn print(&mut self) {}
//! }
//!
//! struct Blocked;
//! impl SurfaceHost for Blocked {
//!     type Surface = Page;
//!     fn open_surface(&self) -> Option<Page> { None }
//! }
//!
//! # let invoice = Invoice::issue(&BookingRecord::sample(), &CheckoutConfig::default());
//! assert!(begin_print(&Blocked, &invoice, Duration::from_millis(250)).is_none());
//! ```

use std::time::Duration;

use crate::invoice::Invoice;

/// Stylesheet embedded in every print document
const PRINT_STYLES: &str = r#"
    @media print {
      @page { margin: 20mm; }
    }
    body {
      font-family: 'Arial', sans-serif;
      margin: 0;
      padding: 20px;
      color: #333;
    }
    .invoice-header {
      border-bottom: 3px solid #3b82f6;
      padding-bottom: 20px;
      margin-bottom: 30px;
    }
    .invoice-header h1 {
      margin: 0;
      color: #1e40af;
      font-size: 28px;
    }
    .invoice-header p {
      margin: 5px 0;
      color: #666;
    }
    .invoice-info {
      display: grid;
      grid-template-columns: 1fr 1fr;
      gap: 20px;
      margin-bottom: 30px;
    }
    .invoice-info .label {
      font-size: 12px;
      color: #666;
      margin: 0 0 4px 0;
    }
    .invoice-info .value {
      font-weight: 700;
      margin: 0;
    }
    .section {
      margin-bottom: 30px;
      padding-bottom: 20px;
      border-bottom: 1px solid #e5e7eb;
    }
    .section h3 {
      color: #1e40af;
      margin-bottom: 15px;
      font-size: 18px;
    }
    .section-row {
      display: flex;
      justify-content: space-between;
      padding: 8px 0;
    }
    .section-row span:first-child {
      color: #666;
    }
    .section-row span:last-child {
      font-weight: 600;
      color: #333;
    }
    .total {
      background: #f3f4f6;
      padding: 20px;
      border-radius: 8px;
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin: 30px 0;
    }
    .total-label {
      font-size: 20px;
      font-weight: 700;
    }
    .total-amount {
      font-size: 28px;
      color: #3b82f6;
      font-weight: 700;
    }
    .footer {
      margin-top: 40px;
      padding: 20px;
      background: #eff6ff;
      border-left: 4px solid #3b82f6;
      border-radius: 4px;
    }
"#;

/// Render the printable HTML document for an invoice
pub fn render_print_document(invoice: &Invoice) -> String {
    let mut sections = String::new();
    for section in &invoice.sections {
        sections.push_str(&format!(
            "      <div class=\"section\">\n        <h3>{}</h3>\n",
            escape_html(&section.title)
        ));
        for row in &section.rows {
            sections.push_str(&format!(
                "        <div class=\"section-row\"><span>{}:</span><span>{}</span></div>\n",
                escape_html(&row.label),
                escape_html(&row.value)
            ));
        }
        sections.push_str("      </div>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Invoice {number}</title>
    <style>{styles}</style>
  </head>
  <body>
    <div class="invoice-header">
      <h1>{brand}</h1>
      <p>{tagline}</p>
    </div>
    <div class="invoice-info">
      <div><p class="label">Invoice Number</p><p class="value">{number}</p></div>
      <div><p class="label">Invoice Date</p><p class="value">{date}</p></div>
    </div>
{sections}    <div class="total">
      <span class="total-label">{total_label}:</span>
      <span class="total-amount">{total}</span>
    </div>
    <div class="footer">
      <p>&#10003; {footer}</p>
    </div>
  </body>
</html>
"#,
        number = escape_html(invoice.number.as_str()),
        styles = PRINT_STYLES,
        brand = escape_html(&invoice.brand_name),
        tagline = escape_html(&invoice.brand_tagline),
        date = escape_html(&invoice.date_display()),
        sections = sections,
        total_label = escape_html(&invoice.total_label),
        total = escape_html(&invoice.total),
        footer = escape_html(&invoice.footer),
    )
}

/// Escape text for inclusion in HTML element content or attributes
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// An auxiliary document context used only to produce printable output
pub trait PrintSurface {
    /// Replace the surface contents with a complete document
    fn write_document(&mut self, html: &str);
    /// Invoke the platform print facility on the surface
    fn print(&mut self);
}

/// Something that can open print surfaces
pub trait SurfaceHost {
    type Surface: PrintSurface;

    /// Open a new surface, or `None` if the host refuses
    fn open_surface(&self) -> Option<Self::Surface>;
}

/// A populated surface waiting for its delayed print call
#[derive(Debug)]
pub struct PrintJob<S> {
    surface: S,
    print_after: Duration,
}

impl<S: PrintSurface> PrintJob<S> {
    /// How long the host should wait before calling [`PrintJob::print`]
    pub fn print_after(&self) -> Duration {
        self.print_after
    }

    /// Invoke platform print, consuming the job
    pub fn print(mut self) {
        self.surface.print();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Open a surface, write the invoice document into it, and return the job
/// whose `print` should run after `print_after`.
///
/// Returns `None` when the host cannot open a surface; the caller then
/// simply drops the action.
pub fn begin_print<H: SurfaceHost>(host: &H, invoice: &Invoice, print_after: Duration) -> Option<PrintJob<H::Surface>> {
    let Some(mut surface) = host.open_surface() else {
        tracing::debug!(number = %invoice.number, "print surface unavailable; abandoning print");
        return None;
    };
    surface.write_document(&render_print_document(invoice));
    tracing::info!(number = %invoice.number, "invoice document sent to print surface");
    Some(PrintJob { surface, print_after })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingRecord;
    use crate::config::CheckoutConfig;
    use crate::invoice::InvoiceNumber;
    use chrono::NaiveDate;
    use std::cell::RefCell;

    fn invoice(record: &BookingRecord) -> Invoice {
        Invoice::build(
            record,
            &CheckoutConfig::default(),
            InvoiceNumber::from_millis(1_700_000_555_111),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        )
    }

    #[derive(Default)]
    struct Recorder {
        documents: Vec<String>,
        prints: usize,
    }

    impl PrintSurface for Recorder {
        fn write_document(&mut self, html: &str) {
            self.documents.push(html.to_string());
        }
        fn print(&mut self) {
            self.prints += 1;
        }
    }

    struct Host {
        allow: bool,
        opened: RefCell<usize>,
    }

    impl SurfaceHost for Host {
        type Surface = Recorder;
        fn open_surface(&self) -> Option<Recorder> {
            *self.opened.borrow_mut() += 1;
            self.allow.then(Recorder::default)
        }
    }

    #[test]
    fn test_document_is_self_contained() {
        let html = render_print_document(&invoice(&BookingRecord::sample()));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Invoice INV-555111</title>"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_document_mirrors_invoice_fields() {
        let html = render_print_document(&invoice(&BookingRecord::sample()));
        assert!(html.contains("<h1>LearnHub</h1>"));
        assert!(html.contains("October 19, 2026"));
        assert!(html.contains("<span>Name:</span><span>Omar Adel Samir Hassan</span>"));
        assert!(html.contains("<span>Address:</span><span>12 Nile Street, Zamalek, Floor 3, Apt 7B</span>"));
        assert!(html.contains("<span class=\"total-amount\">$499.00</span>"));

        let program = html.find("Program Information").unwrap();
        let student = html.find("Student Information").unwrap();
        let payment = html.find("Payment Information").unwrap();
        assert!(program < student && student < payment);
    }

    #[test]
    fn test_document_escapes_booking_text() {
        let mut record = BookingRecord::sample();
        record.student.first_name = "<b>Tom & \"Jerry\"</b>".to_string();
        let html = render_print_document(&invoice(&record));
        assert!(html.contains("&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"));
        assert!(!html.contains("<b>Tom"));
    }

    #[test]
    fn test_begin_print_populates_then_defers_print() {
        let host = Host { allow: true, opened: RefCell::new(0) };
        let invoice = invoice(&BookingRecord::sample());
        let job = begin_print(&host, &invoice, Duration::from_millis(250)).unwrap();

        assert_eq!(job.print_after(), Duration::from_millis(250));
        assert_eq!(job.surface().documents, vec![render_print_document(&invoice)]);
        assert_eq!(job.surface().prints, 0);
    }

    #[test]
    fn test_blocked_surface_is_silently_abandoned() {
        let host = Host { allow: false, opened: RefCell::new(0) };
        let job = begin_print(&host, &invoice(&BookingRecord::sample()), Duration::ZERO);
        assert!(job.is_none());
        assert_eq!(*host.opened.borrow(), 1);
    }
}
