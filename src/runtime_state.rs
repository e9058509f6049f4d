use std::collections::{HashMap, VecDeque};

use crate::dom::NodeId;
use crate::enhance::Handler;
use crate::enhance::cart::CartAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) handler: Handler,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, listener: Listener) {
        let listeners = self
            .map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default();

        // Re-registering the same handler for the same event is a no-op.
        if listeners.contains(&listener) {
            return;
        }
        listeners.push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerTask {
    RemoveNode(NodeId),
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) task: TimerTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    next_timer_id: i64,
    next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    /// Queues a one-shot task `delay_ms` from now and returns its id.
    pub(crate) fn schedule(&mut self, delay_ms: i64, task: TimerTask) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        self.task_queue.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order,
            task,
        });
        id
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }
}

/// An outgoing asynchronous request issued by a cart handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl FetchRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// How a mocked endpoint answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Status(u16),
    NetworkError(String),
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Status(status) if (200..300).contains(status))
    }
}

/// A form submission that was not intercepted and would navigate the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub method: String,
    pub action: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub(crate) struct InFlightFetch {
    pub(crate) request: FetchRequest,
    pub(crate) outcome: FetchOutcome,
    pub(crate) action: CartAction,
}

#[derive(Debug)]
pub(crate) struct PlatformMockState {
    pub(crate) fetch_mocks: HashMap<String, FetchOutcome>,
    pub(crate) default_fetch_outcome: Option<FetchOutcome>,
    pub(crate) fetch_calls: Vec<FetchRequest>,
    pub(crate) in_flight: VecDeque<InFlightFetch>,
    pub(crate) hold_fetch_responses: bool,
    pub(crate) form_submissions: Vec<FormSubmission>,
    pub(crate) confirm_responses: VecDeque<bool>,
    pub(crate) default_confirm_response: bool,
    pub(crate) confirm_messages: Vec<String>,
    pub(crate) console_errors: Vec<String>,
}

impl Default for PlatformMockState {
    fn default() -> Self {
        Self {
            fetch_mocks: HashMap::new(),
            default_fetch_outcome: None,
            fetch_calls: Vec::new(),
            in_flight: VecDeque::new(),
            hold_fetch_responses: false,
            form_submissions: Vec::new(),
            confirm_responses: VecDeque::new(),
            default_confirm_response: false,
            confirm_messages: Vec::new(),
            console_errors: Vec::new(),
        }
    }
}

impl PlatformMockState {
    pub(crate) fn outcome_for(&self, url: &str) -> FetchOutcome {
        self.fetch_mocks
            .get(url)
            .or(self.default_fetch_outcome.as_ref())
            .cloned()
            .unwrap_or_else(|| FetchOutcome::NetworkError(format!("no fetch mock for {url}")))
    }

    pub(crate) fn next_confirm_response(&mut self) -> bool {
        self.confirm_responses
            .pop_front()
            .unwrap_or(self.default_confirm_response)
    }
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) network: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            network: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

impl TraceState {
    pub(crate) fn push(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        if self.to_stderr {
            eprintln!("{line}");
        }
        while self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }
}
