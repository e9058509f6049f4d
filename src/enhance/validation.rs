use crate::dom::NodeId;
use crate::enhance::Handler;
use crate::enhance::toast::Severity;
use crate::page::Page;
use crate::runtime_state::EventState;
use crate::Result;

const REGISTER_FORM_SELECTOR: &str =
    r#"form[method="post"][action$="/register"], form[action="/register"]"#;
const LOGIN_FORM_SELECTOR: &str = r#"form[method="post"][action$="/login"], form[action="/login"]"#;

const LOGIN_MESSAGE: &str = "Please enter email and password.";

fn registration_message(min_password_chars: usize) -> String {
    format!("Please fill all fields; password must be at least {min_password_chars} characters.")
}

impl Page {
    pub(crate) fn init_form_validation(&mut self) -> Result<()> {
        if let Some(form) = self.dom.query_selector(REGISTER_FORM_SELECTOR)? {
            self.listen(form, "submit", Handler::ValidateRegistration);
        }
        if let Some(form) = self.dom.query_selector(LOGIN_FORM_SELECTOR)? {
            self.listen(form, "submit", Handler::ValidateLogin);
        }
        Ok(())
    }

    /// Value of `input[name=...]` inside `form`; empty when the input is missing.
    fn named_input_value(&self, form: NodeId, name: &str) -> Result<String> {
        match self
            .dom
            .query_selector_from(form, &format!(r#"input[name="{name}"]"#))?
        {
            Some(input) => self.dom.value(input),
            None => Ok(String::new()),
        }
    }

    pub(crate) fn validate_registration(
        &mut self,
        form: NodeId,
        event: &mut EventState,
    ) -> Result<()> {
        let name = self.named_input_value(form, "name")?;
        let email = self.named_input_value(form, "email")?;
        let password = self.named_input_value(form, "password")?;
        let min_chars = self.options.min_password_chars;

        if name.trim().is_empty() || email.trim().is_empty() || password.chars().count() < min_chars
        {
            event.prevent_default();
            tracing::debug!("registration form rejected on the client");
            self.show_toast(&registration_message(min_chars), Severity::Danger)?;
        }
        Ok(())
    }

    pub(crate) fn validate_login(&mut self, form: NodeId, event: &mut EventState) -> Result<()> {
        let email = self.named_input_value(form, "email")?;
        let password = self.named_input_value(form, "password")?;

        if email.trim().is_empty() || password.is_empty() {
            event.prevent_default();
            tracing::debug!("login form rejected on the client");
            self.show_toast(LOGIN_MESSAGE, Severity::Danger)?;
        }
        Ok(())
    }
}
