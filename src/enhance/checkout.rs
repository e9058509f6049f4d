use crate::enhance::Handler;
use crate::page::Page;
use crate::runtime_state::EventState;
use crate::Result;

const CHECKOUT_FORM_SELECTOR: &str = r#"form[action$="/checkout"], form[action="/checkout/"]"#;

impl Page {
    pub(crate) fn init_checkout_confirm(&mut self) -> Result<()> {
        if let Some(form) = self.dom.query_selector(CHECKOUT_FORM_SELECTOR)? {
            self.listen(form, "submit", Handler::ConfirmCheckout);
        }
        Ok(())
    }

    /// Blocks on the confirm dialog; declining cancels the submission.
    pub(crate) fn confirm_checkout(&mut self, event: &mut EventState) {
        let prompt = self.options.checkout_prompt.clone();
        if !self.confirm(&prompt) {
            event.prevent_default();
        }
    }
}
