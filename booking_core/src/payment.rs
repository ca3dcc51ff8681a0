//! # Payment Methods
//!
//! Cash-wallet payment methods offered at checkout and the static copy for
//! the three instructional payment steps.

/// Cash-wallet payment method chosen upstream.
///
/// Resolved from an opaque selector string. Unknown selectors resolve to
/// [`PaymentMethod::InstaPay`]; there is no other validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    /// Selector `"vodafone"`
    Vodafone,
    /// Selector `"endc"`
    EndCash,
    /// Any other selector
    #[default]
    InstaPay,
}

impl PaymentMethod {
    /// All methods, in the order they are offered
    pub const ALL: &'static [PaymentMethod] = &[
        PaymentMethod::Vodafone,
        PaymentMethod::EndCash,
        PaymentMethod::InstaPay,
    ];

    /// Resolve an upstream selector string.
    ///
    /// ```rust
    /// use booking_core::payment::PaymentMethod;
    ///
    /// assert_eq!(PaymentMethod::from_selector("vodafone").display_name(), "Vodafone Cash");
    /// assert_eq!(PaymentMethod::from_selector("endc").display_name(), "e& Cash");
    /// assert_eq!(PaymentMethod::from_selector("fawry").display_name(), "InstaPay");
    /// ```
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "vodafone" => PaymentMethod::Vodafone,
            "endc" => PaymentMethod::EndCash,
            _ => PaymentMethod::InstaPay,
        }
    }

    /// Selector string understood by [`PaymentMethod::from_selector`]
    pub fn selector(&self) -> &'static str {
        match self {
            PaymentMethod::Vodafone => "vodafone",
            PaymentMethod::EndCash => "endc",
            PaymentMethod::InstaPay => "instapay",
        }
    }

    /// Name shown in the wizard header
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Vodafone => "Vodafone Cash",
            PaymentMethod::EndCash => "e& Cash",
            PaymentMethod::InstaPay => "InstaPay",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What the instruction panel of a step shows below its description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPanel {
    /// A QR code placeholder with a caption
    QrCode { caption: &'static str },
    /// A note to finish the transfer in the wallet app
    AppInstructions,
}

/// Static content of one instructional payment step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentStep {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub panel: StepPanel,
}

/// The three payment steps, indexed by `number - 1`
pub static PAYMENT_STEPS: [PaymentStep; 3] = [
    PaymentStep {
        number: 1,
        title: "Scan QR Code",
        description: "A QR code will be displayed for you to scan using your phone camera",
        panel: StepPanel::QrCode { caption: "Payment QR Code" },
    },
    PaymentStep {
        number: 2,
        title: "Complete Payment",
        description: "Follow the payment app instructions to complete your transaction",
        panel: StepPanel::AppInstructions,
    },
    PaymentStep {
        number: 3,
        title: "Confirm with WhatsApp",
        description: "Scan a WhatsApp QR code to send us your payment confirmation",
        panel: StepPanel::QrCode { caption: "WhatsApp QR Code" },
    },
];

/// Number of instructional steps
pub const STEP_COUNT: u8 = 3;

/// Look up a step by its 1-based number
pub fn step(number: u8) -> Option<&'static PaymentStep> {
    PAYMENT_STEPS.get(usize::from(number).checked_sub(1)?)
}

impl PaymentStep {
    /// Caption text for the step's instruction panel
    pub fn panel_text(&self, method: PaymentMethod) -> String {
        match self.panel {
            StepPanel::QrCode { caption } => caption.to_string(),
            StepPanel::AppInstructions => {
                format!("Complete the payment in your {} app", method.display_name())
            }
        }
    }
}

/// Build the wa.me link for a support phone number.
///
/// Everything except ASCII digits is stripped from the number.
pub fn whatsapp_link(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}", digits)
}
