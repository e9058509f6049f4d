use super::*;

impl Page {
    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_state.to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_network(&mut self, enabled: bool) {
        self.trace_state.network = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > max_entries {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace_state.events {
            self.trace_state.push(line);
        }
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace_state.timers {
            self.trace_state.push(line);
        }
    }

    pub(crate) fn trace_network_line(&mut self, line: String) {
        if self.trace_state.network {
            self.trace_state.push(line);
        }
    }
}
