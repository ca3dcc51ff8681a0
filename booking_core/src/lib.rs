//! # booking_core - Booking Checkout Engine
//!
//! `booking_core` holds everything behind the last screens of the LearnHub
//! booking flow that is not widget code: the payment walkthrough state
//! machine, the invoice model, and the documents rendered from it. Front ends
//! (`booking_gui`, `booking_cli`) only draw what this crate computes and
//! carry out the effects it asks for.
//!
//! ## Design Philosophy
//!
//! - **Effects as values**: the wizard returns what should happen; hosts do it
//! - **One model, many renderings**: screen, print HTML and PDF share [`Invoice`]
//! - **Owned timers**: delayed callbacks are cancelled when their handle drops
//!
//! ## Quick Start
//!
//! ```rust
//! use booking_core::{BookingRecord, CheckoutConfig, Invoice, PaymentWizard};
//! use booking_core::wizard::WizardAction;
//!
//! let config = CheckoutConfig::default();
//! let booking = BookingRecord::sample();
//!
//! let mut wizard = PaymentWizard::new(booking.payment.payment_method(), &config);
//! wizard.handle(WizardAction::Start);
//! assert_eq!(wizard.title(), "Vodafone Cash Payment Steps");
//!
//! let invoice = Invoice::issue(&booking, &config);
//! assert_eq!(invoice.total, "$499.00");
//! ```
//!
//! ## Modules
//!
//! - [`wizard`] - Payment walkthrough positions, actions and effects
//! - [`payment`] - Payment methods and step copy
//! - [`booking`] - Upstream booking record
//! - [`invoice`] - Invoice number and invoice view model
//! - [`print`] - Self-contained print document and print surfaces
//! - [`pdf`] - Typst-based PDF export
//! - [`timer`] - Cancel-on-drop one-shot timers
//! - [`config`] - TOML checkout configuration
//! - [`errors`] - Structured error types

pub mod booking;
pub mod config;
pub mod errors;
pub mod invoice;
pub mod payment;
pub mod pdf;
pub mod print;
pub mod timer;
pub mod wizard;

// Re-export commonly used types at crate root for convenience
pub use booking::BookingRecord;
pub use config::CheckoutConfig;
pub use errors::{BookingError, BookingResult};
pub use invoice::{Invoice, InvoiceNumber};
pub use payment::PaymentMethod;
pub use wizard::{PaymentWizard, WizardPosition};

/// Static copy of the dashboard placeholder
pub mod dashboard {
    pub const TITLE: &str = "Dashboard";
    pub const MESSAGE: &str = "Your dashboard is coming soon!";
}
