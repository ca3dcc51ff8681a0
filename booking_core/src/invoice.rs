//! # Invoice Model
//!
//! Builds the invoice shown after checkout from a [`BookingRecord`]. The
//! resulting [`Invoice`] is a plain view model: the GUI, the print document
//! and the PDF all render from it, so they always agree on field values.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use booking_core::booking::BookingRecord;
//! use booking_core::config::CheckoutConfig;
//! use booking_core::invoice::{Invoice, InvoiceNumber};
//!
//! let invoice = Invoice::build(
//!     &BookingRecord::sample(),
//!     &CheckoutConfig::default(),
//!     InvoiceNumber::from_millis(1_760_000_123_456),
//!     NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
//! );
//! assert_eq!(invoice.number.as_str(), "INV-123456");
//! assert_eq!(invoice.date_display(), "October 19, 2026");
//! ```

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::booking::BookingRecord;
use crate::config::CheckoutConfig;

/// Success banner copy shown above the invoice
pub const SUCCESS_TITLE: &str = "Booking Confirmed!";
pub const SUCCESS_SUBTITLE: &str = "Your enrollment has been successfully processed";
pub const SUCCESS_NOTE: &str = "Confirmation email has been sent to you and your parents";

/// Closing note at the bottom of the invoice
pub const FOOTER_NOTE: &str =
    "Thank you for your enrollment! You'll receive a confirmation email with next steps and program details.";

/// Invoice identifier, derived from a timestamp.
///
/// Not globally unique and never persisted; one is generated per invoice
/// screen and discarded with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Generate from the current time
    pub fn generate() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    /// `INV-` plus the last six digits of a millisecond Unix timestamp
    pub fn from_millis(millis: i64) -> Self {
        let digits = millis.to_string();
        let tail = &digits[digits.len().saturating_sub(6)..];
        InvoiceNumber(format!("INV-{}", tail.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One "Label: value" line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub label: String,
    pub value: String,
}

impl InvoiceRow {
    fn new(label: &str, value: impl Into<String>) -> Self {
        InvoiceRow {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A titled group of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSection {
    pub title: String,
    pub rows: Vec<InvoiceRow>,
}

impl InvoiceSection {
    /// Value of the row with the given label
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }
}

/// Everything an invoice displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: InvoiceNumber,
    pub date: NaiveDate,
    pub brand_name: String,
    pub brand_tagline: String,
    /// Program, Student and Payment information, in display order
    pub sections: Vec<InvoiceSection>,
    pub total_label: String,
    pub total: String,
    pub footer: String,
}

impl Invoice {
    /// Build an invoice. Pure: the same inputs always give the same invoice.
    pub fn build(
        record: &BookingRecord,
        config: &CheckoutConfig,
        number: InvoiceNumber,
        date: NaiveDate,
    ) -> Self {
        let amount = config.amount_display();

        let program = InvoiceSection {
            title: "Program Information".to_string(),
            rows: vec![
                InvoiceRow::new("Program", &config.program.name),
                InvoiceRow::new("Age Group", &config.program.age_group),
                InvoiceRow::new("Duration", &config.program.duration),
            ],
        };

        let student = InvoiceSection {
            title: "Student Information".to_string(),
            rows: vec![
                InvoiceRow::new("Name", record.student.full_name()),
                InvoiceRow::new("Location", record.location()),
                InvoiceRow::new("Address", record.address.line()),
                InvoiceRow::new("Age", record.student.age.to_string()),
                InvoiceRow::new("Gender", &record.student.gender),
            ],
        };

        let payment = InvoiceSection {
            title: "Payment Information".to_string(),
            rows: vec![
                InvoiceRow::new("Payment Method", record.payment.payment_method().display_name()),
                InvoiceRow::new("Transaction ID", &record.payment.transaction_id),
                InvoiceRow::new("Amount", &amount),
            ],
        };

        Invoice {
            number,
            date,
            brand_name: config.brand_name.clone(),
            brand_tagline: config.brand_tagline.clone(),
            sections: vec![program, student, payment],
            total_label: "Total Amount Paid".to_string(),
            total: amount,
            footer: FOOTER_NOTE.to_string(),
        }
    }

    /// Build an invoice numbered and dated now
    pub fn issue(record: &BookingRecord, config: &CheckoutConfig) -> Self {
        let invoice = Self::build(record, config, InvoiceNumber::generate(), Local::now().date_naive());
        tracing::info!(number = %invoice.number, "issued invoice");
        invoice
    }

    /// Date as "Month D, YYYY"
    pub fn date_display(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    /// Find a section by title
    pub fn section(&self, title: &str) -> Option<&InvoiceSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Plain-text rendering for terminals and logs
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n{}\n\n", self.brand_name, self.brand_tagline));
        out.push_str(&format!("Invoice Number: {}\n", self.number));
        out.push_str(&format!("Invoice Date:   {}\n", self.date_display()));
        for section in &self.sections {
            out.push_str(&format!("\n{}\n", section.title));
            for row in &section.rows {
                out.push_str(&format!("  {:<16}{}\n", format!("{}:", row.label), row.value));
            }
        }
        out.push_str(&format!("\n{}: {}\n\n{}\n", self.total_label, self.total, self.footer));
        out
    }
}
