//! # Payment Wizard
//!
//! State machine behind the payment-confirmation walkthrough:
//!
//! ```text
//! Overview -> Step1 -> Step2 -> Step3 -> Completed
//! ```
//!
//! The wizard never performs side effects itself. Each action returns an
//! optional [`WizardEffect`] that the host turns into real work (scheduling
//! the confirm timer, leaving the wizard, opening the support link).
//!
//! ## Example
//!
//! ```rust
//! use booking_core::config::CheckoutConfig;
//! use booking_core::payment::PaymentMethod;
//! use booking_core::wizard::{PaymentWizard, WizardAction, WizardEffect, WizardPosition};
//!
//! let mut wizard = PaymentWizard::new(PaymentMethod::Vodafone, &CheckoutConfig::default());
//! wizard.handle(WizardAction::Start);
//! wizard.handle(WizardAction::Next);
//! wizard.handle(WizardAction::Next);
//! let effect = wizard.handle(WizardAction::Next);
//!
//! assert_eq!(wizard.position(), WizardPosition::Completed);
//! assert!(matches!(effect, Some(WizardEffect::ScheduleConfirm { .. })));
//! assert!(wizard.confirm_elapsed());
//! assert!(!wizard.confirm_elapsed());
//! ```

use std::time::Duration;

use crate::config::CheckoutConfig;
use crate::payment::{self, whatsapp_link, PaymentMethod, PaymentStep};

/// Position in the walkthrough
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardPosition {
    #[default]
    Overview,
    Step1,
    Step2,
    Step3,
    Completed,
}

impl WizardPosition {
    /// All positions in walkthrough order
    pub const ALL: &'static [WizardPosition] = &[
        WizardPosition::Overview,
        WizardPosition::Step1,
        WizardPosition::Step2,
        WizardPosition::Step3,
        WizardPosition::Completed,
    ];

    /// Successor position. Completed is its own successor.
    pub fn next(self) -> Self {
        match self {
            WizardPosition::Overview => WizardPosition::Step1,
            WizardPosition::Step1 => WizardPosition::Step2,
            WizardPosition::Step2 => WizardPosition::Step3,
            WizardPosition::Step3 => WizardPosition::Completed,
            WizardPosition::Completed => WizardPosition::Completed,
        }
    }

    /// Predecessor position.
    ///
    /// `None` from Overview, where going back leaves the wizard.
    /// Completed is terminal and stays put.
    pub fn previous(self) -> Option<Self> {
        match self {
            WizardPosition::Overview => None,
            WizardPosition::Step1 => Some(WizardPosition::Overview),
            WizardPosition::Step2 => Some(WizardPosition::Step1),
            WizardPosition::Step3 => Some(WizardPosition::Step2),
            WizardPosition::Completed => Some(WizardPosition::Completed),
        }
    }

    /// 1-based step number for the three instructional steps
    pub fn step_number(self) -> Option<u8> {
        match self {
            WizardPosition::Step1 => Some(1),
            WizardPosition::Step2 => Some(2),
            WizardPosition::Step3 => Some(3),
            _ => None,
        }
    }

    /// Static content for the current step, if on one
    pub fn step(self) -> Option<&'static PaymentStep> {
        self.step_number().and_then(payment::step)
    }

    pub fn is_terminal(self) -> bool {
        self == WizardPosition::Completed
    }
}

/// User intents the wizard reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// "Start Payment" on the overview
    Start,
    /// "Next" / "Complete Payment"
    Next,
    /// "Back" / "Previous"
    Back,
    /// "Talk to Customer Support" on step 3
    ContactSupport,
}

/// Side effects the host must carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    /// Arm the one-shot confirm timer; call [`PaymentWizard::confirm_elapsed`]
    /// when it fires
    ScheduleConfirm { after: Duration },
    /// Hand control back to the caller (the `on_back` prop)
    ExitToCaller,
    /// Open an external link in a new context
    OpenExternal { url: String },
}

/// Payment walkthrough state
#[derive(Debug, Clone)]
pub struct PaymentWizard {
    method: PaymentMethod,
    position: WizardPosition,
    confirm_delay: Duration,
    support_url: String,
    confirm_delivered: bool,
}

impl PaymentWizard {
    pub fn new(method: PaymentMethod, config: &CheckoutConfig) -> Self {
        PaymentWizard {
            method,
            position: WizardPosition::Overview,
            confirm_delay: config.confirm_delay(),
            support_url: whatsapp_link(&config.support_whatsapp),
            confirm_delivered: false,
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn position(&self) -> WizardPosition {
        self.position
    }

    pub fn support_url(&self) -> &str {
        &self.support_url
    }

    /// Header title, e.g. "Vodafone Cash Payment Steps"
    pub fn title(&self) -> String {
        format!("{} Payment Steps", self.method.display_name())
    }

    /// Label of the back button at the current position
    pub fn back_label(&self) -> &'static str {
        match self.position {
            WizardPosition::Overview | WizardPosition::Step1 => "Back",
            _ => "Previous",
        }
    }

    /// Label of the forward button at the current position
    pub fn next_label(&self) -> &'static str {
        match self.position {
            WizardPosition::Overview => "Start Payment",
            WizardPosition::Step3 => "Complete Payment",
            _ => "Next",
        }
    }

    /// Whether the support escape hatch is offered at the current position
    pub fn offers_support(&self) -> bool {
        self.position == WizardPosition::Step3
    }

    /// Apply a user action. Actions that make no sense at the current
    /// position are ignored.
    pub fn handle(&mut self, action: WizardAction) -> Option<WizardEffect> {
        if self.position.is_terminal() {
            tracing::debug!(?action, "wizard completed; ignoring action");
            return None;
        }

        match action {
            WizardAction::Start if self.position == WizardPosition::Overview => {
                self.move_to(WizardPosition::Step1);
                None
            }
            WizardAction::Next if self.position != WizardPosition::Overview => {
                let next = self.position.next();
                self.move_to(next);
                next.is_terminal().then_some(WizardEffect::ScheduleConfirm {
                    after: self.confirm_delay,
                })
            }
            WizardAction::Back => match self.position.previous() {
                Some(previous) => {
                    self.move_to(previous);
                    None
                }
                None => Some(WizardEffect::ExitToCaller),
            },
            WizardAction::ContactSupport if self.offers_support() => Some(WizardEffect::OpenExternal {
                url: self.support_url.clone(),
            }),
            _ => {
                tracing::debug!(?action, position = ?self.position, "action not available here");
                None
            }
        }
    }

    /// Report that the confirm timer fired.
    ///
    /// Returns `true` exactly once, and only after Completed was reached;
    /// the host invokes its `on_confirm` callback when it does.
    pub fn confirm_elapsed(&mut self) -> bool {
        if !self.position.is_terminal() || self.confirm_delivered {
            return false;
        }
        self.confirm_delivered = true;
        tracing::info!(method = %self.method, "payment walkthrough confirmed");
        true
    }

    fn move_to(&mut self, position: WizardPosition) {
        tracing::debug!(from = ?self.position, to = ?position, "wizard transition");
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> PaymentWizard {
        PaymentWizard::new(PaymentMethod::Vodafone, &CheckoutConfig::default())
    }

    fn at(position: WizardPosition) -> PaymentWizard {
        let mut w = wizard();
        while w.position() != position {
            let action = if w.position() == WizardPosition::Overview {
                WizardAction::Start
            } else {
                WizardAction::Next
            };
            w.handle(action);
        }
        w
    }

    #[test]
    fn test_successor_never_skips() {
        let all = WizardPosition::ALL;
        for pair in all.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert_eq!(WizardPosition::Completed.next(), WizardPosition::Completed);
    }

    #[test]
    fn test_predecessors() {
        assert_eq!(WizardPosition::Overview.previous(), None);
        assert_eq!(WizardPosition::Step1.previous(), Some(WizardPosition::Overview));
        assert_eq!(WizardPosition::Step2.previous(), Some(WizardPosition::Step1));
        assert_eq!(WizardPosition::Step3.previous(), Some(WizardPosition::Step2));
    }

    #[test]
    fn test_forward_walk() {
        let mut w = wizard();
        assert_eq!(w.position(), WizardPosition::Overview);
        assert_eq!(w.handle(WizardAction::Start), None);
        assert_eq!(w.position(), WizardPosition::Step1);
        assert_eq!(w.handle(WizardAction::Next), None);
        assert_eq!(w.position(), WizardPosition::Step2);
        assert_eq!(w.handle(WizardAction::Next), None);
        assert_eq!(w.position(), WizardPosition::Step3);
        assert_eq!(
            w.handle(WizardAction::Next),
            Some(WizardEffect::ScheduleConfirm { after: Duration::from_secs(2) })
        );
        assert_eq!(w.position(), WizardPosition::Completed);
    }

    #[test]
    fn test_back_walk() {
        let mut w = at(WizardPosition::Step3);
        assert_eq!(w.handle(WizardAction::Back), None);
        assert_eq!(w.position(), WizardPosition::Step2);
        w.handle(WizardAction::Back);
        assert_eq!(w.position(), WizardPosition::Step1);
        w.handle(WizardAction::Back);
        assert_eq!(w.position(), WizardPosition::Overview);
        assert_eq!(w.handle(WizardAction::Back), Some(WizardEffect::ExitToCaller));
        assert_eq!(w.position(), WizardPosition::Overview);
    }

    #[test]
    fn test_start_only_from_overview() {
        let mut w = at(WizardPosition::Step2);
        assert_eq!(w.handle(WizardAction::Start), None);
        assert_eq!(w.position(), WizardPosition::Step2);

        // Next on the overview is not a shortcut past "Start Payment"
        let mut w = wizard();
        w.handle(WizardAction::Next);
        assert_eq!(w.position(), WizardPosition::Overview);
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut w = at(WizardPosition::Completed);
        for action in [WizardAction::Next, WizardAction::Back, WizardAction::Start, WizardAction::ContactSupport] {
            assert_eq!(w.handle(action), None);
            assert_eq!(w.position(), WizardPosition::Completed);
        }
    }

    #[test]
    fn test_confirm_fires_exactly_once() {
        let mut w = at(WizardPosition::Step3);
        assert!(!w.confirm_elapsed(), "must not confirm before completion");
        w.handle(WizardAction::Next);
        assert!(w.confirm_elapsed());
        assert!(!w.confirm_elapsed());
        w.handle(WizardAction::Next);
        assert!(!w.confirm_elapsed());
    }

    #[test]
    fn test_support_only_on_step_three() {
        let mut w = at(WizardPosition::Step2);
        assert!(!w.offers_support());
        assert_eq!(w.handle(WizardAction::ContactSupport), None);

        let mut w = at(WizardPosition::Step3);
        let effect = w.handle(WizardAction::ContactSupport);
        assert_eq!(
            effect,
            Some(WizardEffect::OpenExternal { url: "https://wa.me/1234567890".to_string() })
        );
        assert_eq!(w.position(), WizardPosition::Step3);
    }

    #[test]
    fn test_button_labels() {
        let w = wizard();
        assert_eq!((w.back_label(), w.next_label()), ("Back", "Start Payment"));
        let w = at(WizardPosition::Step1);
        assert_eq!((w.back_label(), w.next_label()), ("Back", "Next"));
        let w = at(WizardPosition::Step2);
        assert_eq!((w.back_label(), w.next_label()), ("Previous", "Next"));
        let w = at(WizardPosition::Step3);
        assert_eq!((w.back_label(), w.next_label()), ("Previous", "Complete Payment"));
    }

    #[test]
    fn test_header_names_method() {
        let config = CheckoutConfig::default();
        assert_eq!(
            PaymentWizard::new(PaymentMethod::from_selector("vodafone"), &config).title(),
            "Vodafone Cash Payment Steps"
        );
        assert_eq!(
            PaymentWizard::new(PaymentMethod::from_selector("endc"), &config).title(),
            "e& Cash Payment Steps"
        );
        assert_eq!(
            PaymentWizard::new(PaymentMethod::from_selector("other"), &config).title(),
            "InstaPay Payment Steps"
        );
    }

    #[test]
    fn test_step_content_follows_position() {
        assert!(WizardPosition::Overview.step().is_none());
        assert_eq!(WizardPosition::Step2.step().map(|s| s.number), Some(2));
        assert!(WizardPosition::Completed.step().is_none());
    }
}
