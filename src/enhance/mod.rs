//! The page enhancements and the handlers they attach.

use crate::dom::NodeId;
use crate::page::Page;
use crate::runtime_state::{EventState, Listener};
use crate::Result;

pub(crate) mod cart;
pub(crate) mod checkout;
pub(crate) mod options;
pub(crate) mod quantity;
pub(crate) mod toast;
pub(crate) mod validation;

/// Every listener the enhancements can register.
///
/// Handlers are plain data so the runtime can store them per node and the
/// page stays the single owner of all mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handler {
    AddToCart,
    RemoveFromCart,
    StepDown { input: NodeId },
    StepUp { input: NodeId },
    ClampQuantity { input: NodeId },
    ValidateRegistration,
    ValidateLogin,
    ConfirmCheckout,
}

impl Handler {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::AddToCart => "add-to-cart",
            Self::RemoveFromCart => "remove-from-cart",
            Self::StepDown { .. } => "quantity-step-down",
            Self::StepUp { .. } => "quantity-step-up",
            Self::ClampQuantity { .. } => "quantity-clamp",
            Self::ValidateRegistration => "validate-registration",
            Self::ValidateLogin => "validate-login",
            Self::ConfirmCheckout => "confirm-checkout",
        }
    }
}

impl Page {
    /// Runs once per page load: style injection first, then the four
    /// initializers in their fixed order.
    pub(crate) fn enhance(&mut self) -> Result<()> {
        self.inject_toast_styles()?;
        self.init_ajax_cart()?;
        self.init_quantity_controls()?;
        self.init_form_validation()?;
        self.init_checkout_confirm()?;
        tracing::debug!(
            nodes = self.dom.nodes.len(),
            "page enhancements initialized"
        );
        Ok(())
    }

    pub(crate) fn listen(&mut self, node: NodeId, event: &str, handler: Handler) {
        self.listeners.add(node, event, Listener { handler });
    }

    pub(crate) fn run_handler(&mut self, handler: Handler, event: &mut EventState) -> Result<()> {
        let form = event.current_target;
        match handler {
            Handler::AddToCart => self.submit_add_to_cart(form, event),
            Handler::RemoveFromCart => self.submit_remove_from_cart(form, event),
            Handler::StepDown { input } => self.step_quantity_down(input),
            Handler::StepUp { input } => self.step_quantity_up(input),
            Handler::ClampQuantity { input } => self.clamp_quantity(input),
            Handler::ValidateRegistration => self.validate_registration(form, event),
            Handler::ValidateLogin => self.validate_login(form, event),
            Handler::ConfirmCheckout => {
                self.confirm_checkout(event);
                Ok(())
            }
        }
    }

    /// Mirrors `console.error`: captured for inspection and forwarded to `tracing`.
    pub(crate) fn console_error(&mut self, message: String) {
        tracing::error!(target: "storefront_enhancer::console", "{message}");
        self.trace_state.push(format!("[console] error {message}"));
        self.platform_mocks.console_errors.push(message);
    }
}
