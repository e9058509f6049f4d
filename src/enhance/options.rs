use crate::{Error, Result};

/// Tunables for the enhancements. `Default` reproduces the stock page behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancerOptions {
    /// How long a toast stays on screen.
    pub toast_timeout_ms: i64,
    /// Upper bound for quantity inputs without a usable `max` attribute.
    pub quantity_ceiling: i64,
    /// Minimum password length accepted by the registration form.
    pub min_password_chars: usize,
    /// Text of the checkout confirmation dialog.
    pub checkout_prompt: String,
}

impl Default for EnhancerOptions {
    fn default() -> Self {
        Self {
            toast_timeout_ms: 3000,
            quantity_ceiling: 9999,
            min_password_chars: 6,
            checkout_prompt: "Place order? This demo does not process payments.".to_string(),
        }
    }
}

impl EnhancerOptions {
    pub fn with_toast_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.toast_timeout_ms = timeout_ms;
        self
    }

    pub fn with_quantity_ceiling(mut self, ceiling: i64) -> Self {
        self.quantity_ceiling = ceiling;
        self
    }

    pub fn with_min_password_chars(mut self, chars: usize) -> Self {
        self.min_password_chars = chars;
        self
    }

    pub fn with_checkout_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.checkout_prompt = prompt.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.toast_timeout_ms < 0 {
            return Err(Error::InvalidOption(format!(
                "toast_timeout_ms must be non-negative (got {})",
                self.toast_timeout_ms
            )));
        }
        if self.quantity_ceiling < 1 {
            return Err(Error::InvalidOption(format!(
                "quantity_ceiling must be at least 1 (got {})",
                self.quantity_ceiling
            )));
        }
        Ok(())
    }
}
