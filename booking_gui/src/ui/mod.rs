//! UI module for the checkout GUI
//!
//! # Screens
//! - `method_picker` - Choose the cash-wallet method (the wizard's caller)
//! - `payment_steps` - Overview, three payment steps, completion
//! - `invoice_view` - Invoice document with print/download/dashboard actions
//! - `dashboard` - Placeholder landing page
//!
//! # Chrome
//! - `header` - Brand title bar
//! - `status_bar` - Bottom status messages

// Screens
pub mod method_picker;
pub mod payment_steps;
pub mod invoice_view;
pub mod dashboard;

// Chrome
pub mod header;
pub mod status_bar;
