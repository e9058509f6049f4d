use super::*;
use crate::dom::{input_type, is_form_control};

impl Page {
    /// Name/value pairs a browser would submit for `form`, in tree order.
    pub(crate) fn form_data_entries(&self, form: NodeId) -> Result<Vec<(String, String)>> {
        if !self.dom.is_tag(form, "form") {
            return Err(Error::Runtime(format!(
                "{} is not a form",
                self.node_label(form)
            )));
        }

        let mut descendants = Vec::new();
        self.dom.collect_elements_descendants_dfs(form, &mut descendants);

        let mut out = Vec::new();
        for control in descendants {
            if !is_form_control(&self.dom, control) || !self.is_successful_control(control) {
                continue;
            }
            let name = self.dom.attr(control, "name").unwrap_or_default();
            let value = self.control_value(control)?;
            out.push((name, value));
        }
        Ok(out)
    }

    fn is_successful_control(&self, control: NodeId) -> bool {
        if self.dom.disabled(control) {
            return false;
        }
        if self.dom.attr(control, "name").unwrap_or_default().is_empty() {
            return false;
        }
        if self.dom.is_tag(control, "button") {
            return false;
        }
        if self.dom.is_tag(control, "input") {
            let kind = input_type(&self.dom, control);
            if matches!(kind.as_str(), "button" | "submit" | "reset" | "file" | "image") {
                return false;
            }
            if kind == "checkbox" || kind == "radio" {
                return self.dom.checked(control);
            }
        }
        true
    }

    fn control_value(&self, control: NodeId) -> Result<String> {
        let value = self.dom.value(control)?;
        let checkable = self.dom.is_tag(control, "input")
            && matches!(input_type(&self.dom, control).as_str(), "checkbox" | "radio");
        if value.is_empty() && checkable {
            return Ok("on".into());
        }
        Ok(value)
    }

}
