use crate::dom::{Dom, NodeId, truncate_chars};
use crate::enhance::cart::CartBadge;
use crate::enhance::options::EnhancerOptions;
use crate::enhance::toast::Toaster;
use crate::html::parse_html;
use crate::runtime_state::{
    EventState, FetchOutcome, FetchRequest, FormSubmission, ListenerStore, PendingTimer,
    PlatformMockState, SchedulerState, TimerTask, TraceState,
};
use crate::{Error, Result};

mod actions;
mod assertions;
mod forms;
mod mocks;
mod timers;
mod trace;

/// A loaded page with its enhancements attached.
///
/// All platform services (network, dialogs, timers, console) are simulated,
/// so a `Page` is fully deterministic.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: SchedulerState,
    pub(crate) platform_mocks: PlatformMockState,
    pub(crate) trace_state: TraceState,
    pub(crate) toaster: Toaster,
    pub(crate) cart_badge: CartBadge,
    pub(crate) options: EnhancerOptions,
}

impl Page {
    /// Parses `html` and runs the enhancements with default options.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_options(html, EnhancerOptions::default())
    }

    pub fn from_html_with_options(html: &str, options: EnhancerOptions) -> Result<Self> {
        options.validate()?;
        let dom = parse_html(html)?;
        let mut page = Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler: SchedulerState::default(),
            platform_mocks: PlatformMockState::default(),
            trace_state: TraceState::default(),
            toaster: Toaster::default(),
            cart_badge: CartBadge::new()?,
            options,
        };
        page.enhance()?;
        Ok(page)
    }

    pub fn options(&self) -> &EnhancerOptions {
        &self.options
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    fn node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }
}
