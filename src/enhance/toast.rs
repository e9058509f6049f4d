use crate::dom::{Dom, NodeId};
use crate::page::Page;
use crate::runtime_state::{SchedulerState, TimerTask};
use crate::Result;

const CONTAINER_ID: &str = "toast-container";
const STYLES_ID: &str = "toast-styles";

const TOAST_CSS: &str = "
  #toast-container { max-width: 320px; }
  @media (max-width: 480px) {
    #toast-container { left: 8px; right: 8px; top: 8px; }
  }
  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Danger,
}

impl Severity {
    /// Class name added next to `toast`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Info => "#2563eb",
            Self::Success => "#059669",
            Self::Danger => "#dc2626",
        }
    }

    fn from_classes(dom: &Dom, node: NodeId) -> Self {
        [Self::Success, Self::Danger]
            .into_iter()
            .find(|severity| dom.class_contains(node, severity.as_str()))
            .unwrap_or(Self::Info)
    }
}

/// A toast currently attached to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
}

/// Owns the toast container for the lifetime of a page.
#[derive(Debug, Default)]
pub(crate) struct Toaster {
    container: Option<NodeId>,
}

impl Toaster {
    pub(crate) fn show(
        &mut self,
        dom: &mut Dom,
        scheduler: &mut SchedulerState,
        message: &str,
        severity: Severity,
        timeout_ms: i64,
    ) -> Result<NodeId> {
        let container = self.container(dom)?;

        let el = dom.create_detached_element("div");
        dom.set_attr(el, "class", &format!("toast {}", severity.as_str()))?;
        dom.set_text_content(el, message)?;
        for (name, value) in [
            ("margin-bottom", "8px"),
            ("padding", "10px 14px"),
            ("border-radius", "8px"),
            ("color", "#fff"),
            ("background", severity.background()),
            ("box-shadow", "0 6px 20px rgba(2,6,23,0.08)"),
            ("font-size", "0.95rem"),
        ] {
            dom.style_set(el, name, value)?;
        }
        dom.append_child(container, el)?;
        scheduler.schedule(timeout_ms, TimerTask::RemoveNode(el));
        Ok(el)
    }

    /// Reuses the container while it is still attached; otherwise adopts one
    /// the page already has or creates a new one.
    fn container(&mut self, dom: &mut Dom) -> Result<NodeId> {
        if let Some(existing) = self.container.filter(|node| dom.is_connected(*node)) {
            return Ok(existing);
        }
        if let Some(existing) = dom.by_id(CONTAINER_ID) {
            self.container = Some(existing);
            return Ok(existing);
        }

        let container = dom.create_detached_element("div");
        dom.set_attr(container, "id", CONTAINER_ID)?;
        for (name, value) in [
            ("position", "fixed"),
            ("top", "1rem"),
            ("right", "1rem"),
            ("z-index", "9999"),
        ] {
            dom.style_set(container, name, value)?;
        }
        let host = dom.first_by_tag("body").unwrap_or(dom.root);
        dom.append_child(host, container)?;
        self.container = Some(container);
        Ok(container)
    }

    pub(crate) fn visible(&self, dom: &Dom) -> Vec<Toast> {
        let Some(container) = self.container.filter(|node| dom.is_connected(*node)) else {
            return Vec::new();
        };
        dom.nodes[container.0]
            .children
            .iter()
            .copied()
            .filter(|node| dom.class_contains(*node, "toast"))
            .map(|node| Toast {
                message: dom.text_content(node),
                severity: Severity::from_classes(dom, node),
            })
            .collect()
    }
}

impl Page {
    /// Shows a toast for the configured timeout.
    pub fn show_toast(&mut self, message: &str, severity: Severity) -> Result<()> {
        self.show_toast_for(message, severity, self.options.toast_timeout_ms)
    }

    pub fn show_toast_for(&mut self, message: &str, severity: Severity, timeout_ms: i64) -> Result<()> {
        let toast = self.toaster.show(
            &mut self.dom,
            &mut self.scheduler,
            message,
            severity,
            timeout_ms,
        )?;
        self.trace_state.push(format!(
            "[toast] {} node-{} timeout_ms={} message={message:?}",
            severity.as_str(),
            toast.0,
            timeout_ms
        ));
        Ok(())
    }

    /// Toasts currently on screen, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toaster.visible(&self.dom)
    }

    pub(crate) fn inject_toast_styles(&mut self) -> Result<()> {
        if self.dom.by_id(STYLES_ID).is_some() {
            return Ok(());
        }
        let Some(head) = self.dom.first_by_tag("head") else {
            return Ok(());
        };
        let style = self.dom.create_detached_element("style");
        self.dom.set_attr(style, "id", STYLES_ID)?;
        self.dom.set_text_content(style, TOAST_CSS)?;
        self.dom.append_child(head, style)
    }
}
