use super::*;
use crate::dom::is_submit_control;

impl Page {
    /// Sets the value of an input or textarea and fires `input`.
    ///
    /// Like a real browser, typing alone does not fire `change`; follow up
    /// with `dispatch(selector, "change")` to commit the edit.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input")?;
        self.finish_task()
    }

    /// Clicks the first match. Submit buttons submit their form.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let click_outcome = self.dispatch_event(target, "click")?;
        if !click_outcome.default_prevented && is_submit_control(&self.dom, target) {
            if let Some(form) = self.resolve_form_for_submit(target) {
                self.submit_form(form)?;
            }
        }
        self.finish_task()
    }

    /// Submits the matched form, or the form owning the matched element.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if let Some(form) = self.resolve_form_for_submit(target) {
            self.submit_form(form)?;
        }
        self.finish_task()
    }

    /// Fires a bare event at the first match. No default action runs.
    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, event)?;
        self.finish_task()
    }

    /// Asks the simulated `confirm` dialog and records the prompt.
    pub(crate) fn confirm(&mut self, message: &str) -> bool {
        let answer = self.platform_mocks.next_confirm_response();
        self.platform_mocks.confirm_messages.push(message.to_string());
        self.trace_event_line(format!("[dialog] confirm answer={answer} message={message:?}"));
        answer
    }

    fn submit_form(&mut self, form: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(form, "submit")?;
        if outcome.default_prevented {
            return Ok(());
        }

        let method = self
            .dom
            .attr(form, "method")
            .filter(|method| !method.is_empty())
            .unwrap_or_else(|| "get".to_string())
            .to_ascii_uppercase();
        let action = self.dom.attr(form, "action").unwrap_or_default();
        let body = crate::enhance::cart::encode_form_body(&self.form_data_entries(form)?);
        self.trace_event_line(format!("[event] default submit {method} {action}"));
        self.platform_mocks.form_submissions.push(FormSubmission {
            method,
            action,
            body,
        });
        Ok(())
    }

    fn resolve_form_for_submit(&self, target: NodeId) -> Option<NodeId> {
        if self.dom.is_tag(target, "form") {
            return Some(target);
        }
        self.dom.find_ancestor_by_tag(target, "form")
    }

    /// Bubbles `event_type` from `target` up to the document.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, event_type: &str) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);

        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        for node in path {
            event.current_target = node;
            for listener in self.listeners.get(node, &event.event_type) {
                self.trace_event_line(format!(
                    "[event] {} target={} current={} handler={} default_prevented={}",
                    event.event_type,
                    self.node_label(event.target),
                    self.node_label(event.current_target),
                    listener.handler.label(),
                    event.default_prevented
                ));
                self.run_handler(listener.handler, &mut event)?;
            }
        }

        self.trace_event_line(format!(
            "[event] done {} target={} default_prevented={}",
            event.event_type,
            self.node_label(event.target),
            event.default_prevented
        ));
        Ok(event)
    }

    /// End of a user-action task: pending responses are delivered unless held.
    fn finish_task(&mut self) -> Result<()> {
        if self.platform_mocks.hold_fetch_responses {
            return Ok(());
        }
        self.settle_in_flight_fetches()?;
        Ok(())
    }
}
