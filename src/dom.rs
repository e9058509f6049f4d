use std::collections::{HashMap, HashSet};

use crate::selector::{SelectorPart, SelectorStep, matches_chain, parse_selector_groups};
use crate::{Error, Result};

// Recursion over the tree grows the stack on demand for deeply nested markup.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    // Attribute order is kept so serialized markup stays stable.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
}

impl Element {
    fn new(tag_name: String, attrs: Vec<(String, String)>) -> Self {
        let mut element = Self {
            tag_name,
            attrs,
            value: String::new(),
            checked: false,
            disabled: false,
        };
        element.value = element.attr("value").unwrap_or_default().to_string();
        element.checked = element.attr("checked").is_some();
        element.disabled = element.attr("disabled").is_some();
        element
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn insert_attr(&mut self, name: String, value: String) {
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    pub(crate) fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    /// Appends a parsed element. `parent` must be connected: elements arrive in
    /// tree order, so the first element carrying an id keeps the index entry.
    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        let id = self.create_node(Some(parent), NodeType::Element(Element::new(tag_name, attrs)));
        if let Some(id_attr) = self.attr(id, "id") {
            if !id_attr.is_empty() {
                self.id_index.entry(id_attr).or_insert(id);
            }
        }
        id
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Element::new(tag_name.to_ascii_lowercase(), Vec::new());
        self.create_node(None, NodeType::Element(element))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn is_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0).and_then(|node| node.parent)
    }

    /// Parent only when it is an element, mirroring `parentElement`.
    pub(crate) fn parent_element(&self, node_id: NodeId) -> Option<NodeId> {
        self.parent(node_id)
            .filter(|parent| self.element(*parent).is_some())
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node_id, &mut out);
        out
    }

    fn collect_text(&self, node_id: NodeId, out: &mut String) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document | NodeType::Element(_) => {
                    for child in &self.nodes[node_id.0].children {
                        self.collect_text(*child, out);
                    }
                }
                NodeType::Text(text) => out.push_str(text),
            }
        })
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Runtime(
                "textContent target is not an element".into(),
            ));
        }
        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        let dropped_ids = old_children.iter().any(|child| self.subtree_has_id(*child));
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        if dropped_ids {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn checked(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.checked).unwrap_or(false)
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.disabled).unwrap_or(false)
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attr(name))
            .map(ToOwned::to_owned)
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        {
            let element = self.element_mut(node_id).ok_or_else(|| {
                Error::Runtime("setAttribute target is not an element".into())
            })?;
            element.insert_attr(lowered.clone(), value.to_string());
            match lowered.as_str() {
                "value" => element.value = value.to_string(),
                "checked" => element.checked = true,
                "disabled" => element.disabled = true,
                _ => {}
            }
        }
        if lowered == "id" {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.has_class(class_name))
    }

    pub(crate) fn style_get(&self, node_id: NodeId, name: &str) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;
        let decls = parse_style_declarations(element.attr("style"));
        Ok(decls
            .iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default())
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Runtime("style target is not an element".into()))?;

        let mut decls = parse_style_declarations(element.attr("style"));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name.to_string(), value.to_string()));
        }

        if decls.is_empty() {
            element.remove_attr("style");
        } else {
            element.insert_attr("style".to_string(), serialize_style_declarations(&decls));
        }
        Ok(())
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.can_have_children(parent) {
            return Err(Error::Runtime(
                "appendChild target cannot have children".into(),
            ));
        }
        if child == self.root || child == parent {
            return Err(Error::Runtime("invalid appendChild node".into()));
        }
        if !self.is_valid_node(child) {
            return Err(Error::Runtime("appendChild node is invalid".into()));
        }

        // Parent must not be inside child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::Runtime("appendChild would create a cycle".into()));
            }
            cursor = self.parent(node);
        }

        if let Some(old_parent) = self.parent(child) {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        if self.subtree_has_id(child) {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::Runtime("cannot remove document root".into()));
        }
        let Some(parent) = self.parent(node) else {
            return Ok(());
        };
        self.nodes[parent.0].children.retain(|id| *id != node);
        self.nodes[node.0].parent = None;
        if self.subtree_has_id(node) {
            self.rebuild_id_index();
        }
        Ok(())
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let all = self.query_selector_all(selector)?;
        Ok(all.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        if groups.len() == 1 && groups[0].len() == 1 {
            if let Some(id) = groups[0][0].step.id_only() {
                return Ok(self.by_id(id).into_iter().collect());
            }
        }

        let mut ids = Vec::new();
        self.collect_elements_dfs(self.root, &mut ids);
        Ok(self.filter_matching(ids, &groups))
    }

    pub(crate) fn query_selector_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut ids = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut ids);
        Ok(self.filter_matching(ids, &groups).into_iter().next())
    }

    fn filter_matching(&self, candidates: Vec<NodeId>, groups: &[Vec<SelectorPart>]) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        let mut matched = Vec::new();
        for candidate in candidates {
            if groups
                .iter()
                .any(|steps| matches_chain(self, candidate, steps))
                && seen.insert(candidate)
            {
                matched.push(candidate);
            }
        }
        matched
    }

    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        if self.element(node_id).is_none() {
            return Ok(None);
        }

        let groups = parse_selector_groups(selector)?;
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if groups
                .iter()
                .any(|steps| matches_chain(self, current, steps))
            {
                return Ok(Some(current));
            }
            cursor = self.parent(current);
        }
        Ok(None)
    }

    pub(crate) fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        step.matches(element)
    }

    pub(crate) fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|id| *id == node_id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self.is_tag(current, tag) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    pub(crate) fn first_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.all_element_nodes()
            .into_iter()
            .find(|node| self.is_tag(*node, tag))
    }

    fn can_have_children(&self, node_id: NodeId) -> bool {
        matches!(
            self.nodes.get(node_id.0).map(|n| &n.node_type),
            Some(NodeType::Document | NodeType::Element(_))
        )
    }

    fn is_valid_node(&self, node_id: NodeId) -> bool {
        node_id.0 < self.nodes.len()
    }

    pub(crate) fn is_connected(&self, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(node) = cursor {
            if node == self.root {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    /// Whether moving `node_id` can change which element owns an id.
    fn subtree_has_id(&self, node_id: NodeId) -> bool {
        let mut stack = vec![node_id];
        while let Some(node) = stack.pop() {
            if let NodeType::Element(element) = &self.nodes[node.0].node_type {
                if element.attr("id").is_some_and(|id| !id.is_empty()) {
                    return true;
                }
            }
            stack.extend(self.nodes[node.0].children.iter().copied());
        }
        false
    }

    fn rebuild_id_index(&mut self) {
        let mut next = HashMap::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if let NodeType::Element(element) = &self.nodes[node.0].node_type {
                if let Some(id) = element.attr("id") {
                    if !id.is_empty() {
                        next.entry(id.to_string()).or_insert(node);
                    }
                }
            }
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        self.id_index = next;
    }

    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            if matches!(self.nodes[node_id.0].node_type, NodeType::Element(_)) {
                out.push(node_id);
            }
            for child in &self.nodes[node_id.0].children {
                self.collect_elements_dfs(*child, out);
            }
        })
    }

    pub(crate) fn collect_elements_descendants_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn all_element_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_elements_dfs(self.root, &mut out);
        out
    }

    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node_id, &mut out);
        out
    }

    fn write_node(&self, node_id: NodeId, out: &mut String) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document => {
                    for child in &self.nodes[node_id.0].children {
                        self.write_node(*child, out);
                    }
                }
                NodeType::Text(text) => out.push_str(text),
                NodeType::Element(element) => {
                    out.push('<');
                    out.push_str(&element.tag_name);
                    for (k, v) in &element.attrs {
                        out.push(' ');
                        out.push_str(k);
                        out.push_str("=\"");
                        out.push_str(v);
                        out.push('"');
                    }
                    out.push('>');
                    for child in &self.nodes[node_id.0].children {
                        self.write_node(*child, out);
                    }
                    out.push_str("</");
                    out.push_str(&element.tag_name);
                    out.push('>');
                }
            }
        })
    }
}

fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    for decl in style_attr.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }
        let value = value.trim().to_string();
        if let Some(pos) = out.iter().position(|(existing, _)| existing == &name) {
            out[pos].1 = value;
        } else {
            out.push((name, value));
        }
    }

    out
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    let mut out = String::new();
    for (idx, (name, value)) in decls.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push(';');
    }
    out
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}

pub(crate) fn is_form_control(dom: &Dom, node_id: NodeId) -> bool {
    ["input", "select", "textarea", "button"]
        .iter()
        .any(|tag| dom.is_tag(node_id, tag))
}

pub(crate) fn input_type(dom: &Dom, node_id: NodeId) -> String {
    dom.attr(node_id, "type")
        .unwrap_or_else(|| "text".to_string())
        .to_ascii_lowercase()
}

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    if dom.is_tag(node_id, "button") {
        return dom
            .attr(node_id, "type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }
    if dom.is_tag(node_id, "input") {
        return matches!(input_type(dom, node_id).as_str(), "submit" | "image");
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;

    #[test]
    fn first_duplicate_id_owns_the_index_until_it_leaves() -> Result<()> {
        let mut dom = parse_html(r#"<p id="dup">first</p><div><span id="dup">second</span></div>"#)?;
        let first = dom.by_id("dup").expect("duplicate id should be indexed");
        assert_eq!(dom.text_content(first), "first");

        dom.remove_node(first)?;
        let second = dom.by_id("dup").expect("later duplicate should take over");
        assert_eq!(dom.text_content(second), "second");

        dom.remove_node(second)?;
        assert_eq!(dom.by_id("dup"), None);
        Ok(())
    }

    #[test]
    fn moving_id_free_nodes_keeps_the_index() -> Result<()> {
        let mut dom = parse_html(r#"<div id="host"></div><section id="other"></section>"#)?;
        let host = dom.by_id("host").expect("host should be indexed");
        let plain = dom.create_detached_element("span");
        dom.append_child(host, plain)?;
        dom.set_text_content(plain, "hi")?;
        dom.remove_node(plain)?;
        assert_eq!(dom.by_id("host"), Some(host));
        assert!(dom.by_id("other").is_some());

        let tagged = dom.create_detached_element("aside");
        dom.set_attr(tagged, "id", "late")?;
        assert_eq!(dom.by_id("late"), None);
        dom.append_child(host, tagged)?;
        assert_eq!(dom.by_id("late"), Some(tagged));

        dom.set_text_content(host, "")?;
        assert_eq!(dom.by_id("late"), None);
        Ok(())
    }
}
