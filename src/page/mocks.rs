use super::*;

impl Page {
    /// Answers requests to `url` with an HTTP status.
    pub fn set_fetch_status(&mut self, url: &str, status: u16) {
        self.platform_mocks
            .fetch_mocks
            .insert(url.to_string(), FetchOutcome::Status(status));
    }

    /// Fails requests to `url` before any response arrives.
    pub fn set_fetch_network_error(&mut self, url: &str, message: &str) {
        self.platform_mocks.fetch_mocks.insert(
            url.to_string(),
            FetchOutcome::NetworkError(message.to_string()),
        );
    }

    /// Status for URLs without a mock. Without a default such requests fail.
    pub fn set_default_fetch_status(&mut self, status: Option<u16>) {
        self.platform_mocks.default_fetch_outcome = status.map(FetchOutcome::Status);
    }

    pub fn clear_fetch_mocks(&mut self) {
        self.platform_mocks.fetch_mocks.clear();
        self.platform_mocks.default_fetch_outcome = None;
    }

    pub fn take_fetch_calls(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.platform_mocks.fetch_calls)
    }

    /// While held, responses stay in flight until `resolve_pending_fetches`.
    pub fn hold_fetch_responses(&mut self, hold: bool) {
        self.platform_mocks.hold_fetch_responses = hold;
    }

    pub fn pending_fetch_count(&self) -> usize {
        self.platform_mocks.in_flight.len()
    }

    /// Delivers held responses in the order the requests were issued.
    pub fn resolve_pending_fetches(&mut self) -> Result<usize> {
        self.settle_in_flight_fetches()
    }

    /// Form navigations that no handler intercepted.
    pub fn take_form_submissions(&mut self) -> Vec<FormSubmission> {
        std::mem::take(&mut self.platform_mocks.form_submissions)
    }

    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.confirm_responses.push_back(accepted);
    }

    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.default_confirm_response = accepted;
    }

    pub fn take_confirm_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.confirm_messages)
    }

    pub fn take_console_errors(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.console_errors)
    }
}
