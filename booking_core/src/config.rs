//! # Checkout Configuration
//!
//! Branding, pricing, support contact and timer delays for the checkout
//! screens. Loaded from an optional TOML file; every field has a default so
//! a missing file or a partial file both work.
//!
//! ```toml
//! brand_name = "LearnHub"
//! support_whatsapp = "+20 100 000 0000"
//! confirm_delay_ms = 2000
//!
//! [program]
//! name = "Coding 101"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Environment variable consulted when no explicit config path is given
pub const CONFIG_ENV_VAR: &str = "LEARNHUB_CONFIG";

/// Program the booking enrolls the student in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramInfo {
    pub name: String,
    pub age_group: String,
    pub duration: String,
}

impl Default for ProgramInfo {
    fn default() -> Self {
        ProgramInfo {
            name: "Coding 101".to_string(),
            age_group: "10-13 years".to_string(),
            duration: "2 months".to_string(),
        }
    }
}

/// Checkout settings shared by the wizard and the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub brand_name: String,
    pub brand_tagline: String,
    pub program: ProgramInfo,

    /// Program price in minor units (cents)
    pub amount_cents: u64,
    pub currency_symbol: String,

    /// WhatsApp number behind "Talk to Customer Support"
    pub support_whatsapp: String,
    /// Route the invoice's dashboard button navigates to
    pub dashboard_route: String,

    /// Delay between reaching Completed and confirming to the caller
    pub confirm_delay_ms: u64,
    /// Delay between populating the print surface and invoking print
    pub print_delay_ms: u64,
    /// Delay before the invoice success banner is revealed
    pub success_reveal_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            brand_name: "LearnHub".to_string(),
            brand_tagline: "Empowering Young Minds Through Quality Education".to_string(),
            program: ProgramInfo::default(),
            amount_cents: 49_900,
            currency_symbol: "$".to_string(),
            support_whatsapp: "+1234567890".to_string(),
            dashboard_route: "/dashboard".to_string(),
            confirm_delay_ms: 2000,
            print_delay_ms: 250,
            success_reveal_ms: 500,
        }
    }
}

impl CheckoutConfig {
    /// Parse a config from TOML text. `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &str) -> BookingResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| BookingError::config_error(origin, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the checkout screens cannot work with
    pub fn validate(&self) -> BookingResult<()> {
        if !self.support_whatsapp.chars().any(|c| c.is_ascii_digit()) {
            return Err(BookingError::invalid_input(
                "support_whatsapp",
                &self.support_whatsapp,
                "support number must contain digits",
            ));
        }
        Ok(())
    }

    /// Load a config file from disk
    pub fn load(path: &Path) -> BookingResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| BookingError::file_error("read", path.display().to_string(), e.to_string()))?;
        let config = Self::from_toml_str(&text, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), "loaded checkout config");
        Ok(config)
    }

    /// Resolve the config from an explicit path, then `LEARNHUB_CONFIG`,
    /// then defaults.
    pub fn resolve(explicit: Option<&Path>) -> BookingResult<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Price formatted for display, e.g. `$499.00`
    pub fn amount_display(&self) -> String {
        format!(
            "{}{}.{:02}",
            self.currency_symbol,
            self.amount_cents / 100,
            self.amount_cents % 100
        )
    }

    pub fn confirm_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_delay_ms)
    }

    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print_delay_ms)
    }

    pub fn success_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.success_reveal_ms)
    }
}
