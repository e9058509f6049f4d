use crate::dom::{Dom, Element, NodeId};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
}

impl SelectorAttrCondition {
    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Exists { key } => element.attr(key).is_some(),
            Self::Eq { key, value } => element.attr(key) == Some(value.as_str()),
            // An empty operand never matches for the substring operators.
            Self::StartsWith { key, value } => {
                !value.is_empty() && element.attr(key).is_some_and(|v| v.starts_with(value.as_str()))
            }
            Self::EndsWith { key, value } => {
                !value.is_empty() && element.attr(key).is_some_and(|v| v.ends_with(value.as_str()))
            }
            Self::Contains { key, value } => {
                !value.is_empty() && element.attr(key).is_some_and(|v| v.contains(value.as_str()))
            }
            Self::Includes { key, value } => element
                .attr(key)
                .is_some_and(|v| v.split_whitespace().any(|token| token == value)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    tag: Option<String>,
    universal: bool,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<SelectorAttrCondition>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if !self.universal && self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }

    pub(crate) fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|class_name| element.has_class(class_name)) {
            return false;
        }
        self.attrs.iter().all(|cond| cond.matches(element))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to previous (left) selector part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

pub(crate) fn matches_chain(dom: &Dom, node_id: NodeId, steps: &[SelectorPart]) -> bool {
    let Some(last) = steps.last() else {
        return false;
    };
    if !dom.matches_step(node_id, &last.step) {
        return false;
    }

    let mut current = node_id;
    for idx in (1..steps.len()).rev() {
        let prev_step = &steps[idx - 1].step;
        let combinator = steps[idx]
            .combinator
            .unwrap_or(SelectorCombinator::Descendant);

        let matched = match combinator {
            SelectorCombinator::Child => dom
                .parent(current)
                .filter(|parent| dom.matches_step(*parent, prev_step)),
            SelectorCombinator::Descendant => {
                let mut cursor = dom.parent(current);
                let mut found = None;
                while let Some(parent) = cursor {
                    if dom.matches_step(parent, prev_step) {
                        found = Some(parent);
                        break;
                    }
                    cursor = dom.parent(parent);
                }
                found
            }
            SelectorCombinator::AdjacentSibling => dom
                .previous_element_sibling(current)
                .filter(|sibling| dom.matches_step(*sibling, prev_step)),
            SelectorCombinator::GeneralSibling => {
                let mut cursor = dom.previous_element_sibling(current);
                let mut found = None;
                while let Some(sibling) = cursor {
                    if dom.matches_step(sibling, prev_step) {
                        found = Some(sibling);
                        break;
                    }
                    cursor = dom.previous_element_sibling(sibling);
                }
                found
            }
        };

        let Some(matched) = matched else {
            return false;
        };
        current = matched;
    }

    true
}

pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    let groups = split_selector_groups(selector)?;
    let mut parsed = Vec::with_capacity(groups.len());
    for group in groups {
        parsed.push(parse_selector_chain(&group)?);
    }
    Ok(parsed)
}

fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let tokens = tokenize_selector(selector)?;
    let mut steps = Vec::new();
    let mut pending_combinator: Option<SelectorCombinator> = None;

    for token in tokens {
        let explicit = match token.as_str() {
            ">" => Some(SelectorCombinator::Child),
            "+" => Some(SelectorCombinator::AdjacentSibling),
            "~" => Some(SelectorCombinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = explicit {
            if pending_combinator.is_some() || steps.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending_combinator = Some(combinator);
            continue;
        }

        let step = parse_selector_step(&token)?;
        let combinator = if steps.is_empty() {
            None
        } else {
            Some(
                pending_combinator
                    .take()
                    .unwrap_or(SelectorCombinator::Descendant),
            )
        };
        steps.push(SelectorPart { step, combinator });
    }

    if steps.is_empty() || pending_combinator.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    Ok(steps)
}

/// Splits on `,` outside brackets and quotes.
fn split_selector_groups(selector: &str) -> Result<Vec<String>> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '\'' | '"' if bracket_depth > 0 => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                if bracket_depth == 0 {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                bracket_depth -= 1;
                current.push(ch);
            }
            ',' if bracket_depth == 0 => {
                let trimmed = current.trim();
                if trimmed.is_empty() {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                groups.push(trimmed.to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if bracket_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let trimmed = current.trim();
    if trimmed.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    groups.push(trimmed.to_string());
    Ok(groups)
}

fn tokenize_selector(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            current.push(ch);
            continue;
        }
        match ch {
            '\'' | '"' if bracket_depth > 0 => {
                quote = Some(ch);
                current.push(ch);
            }
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            ']' => {
                if bracket_depth == 0 {
                    return Err(Error::UnsupportedSelector(selector.into()));
                }
                bracket_depth -= 1;
                current.push(ch);
            }
            '>' | '+' | '~' if bracket_depth == 0 => {
                if !current.trim().is_empty() {
                    tokens.push(current.trim().to_string());
                }
                current.clear();
                tokens.push(ch.to_string());
            }
            ch if ch.is_ascii_whitespace() && bracket_depth == 0 => {
                if !current.trim().is_empty() {
                    tokens.push(current.trim().to_string());
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    if bracket_depth != 0 || quote.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    if !current.trim().is_empty() {
        tokens.push(current.trim().to_string());
    }

    Ok(tokens)
}

fn parse_selector_step(part: &str) -> Result<SelectorStep> {
    let part = part.trim();
    if part.is_empty() {
        return Err(Error::UnsupportedSelector(part.into()));
    }

    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = SelectorStep::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if step.universal {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let Some((id, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                if step.id.replace(id).is_some() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                i = next;
            }
            b'.' => {
                let Some((class_name, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_selector_attr_condition(part, i)?;
                step.attrs.push(attr);
                i = next;
            }
            _ => {
                if step.tag.is_some()
                    || step.id.is_some()
                    || !step.classes.is_empty()
                    || !step.attrs.is_empty()
                    || step.universal
                {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                let Some((tag, next)) = parse_selector_ident(part, i) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    Ok(step)
}

fn parse_selector_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    if start >= bytes.len() || !is_selector_ident_char(bytes[start]) {
        return None;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_selector_ident_char(bytes[end]) {
        end += 1;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn is_selector_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn parse_selector_attr_condition(
    src: &str,
    open_bracket: usize,
) -> Result<(SelectorAttrCondition, usize)> {
    let bytes = src.as_bytes();
    let mut i = open_bracket + 1;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i = (i + 2).min(bytes.len());
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        if b == b'\'' || b == b'"' {
            quote = Some(b);
            i += 1;
            continue;
        }

        if b == b']' {
            let Some(body) = src.get(open_bracket + 1..i) else {
                return Err(Error::UnsupportedSelector(src.into()));
            };
            let cond = parse_attr_body(body.trim())
                .ok_or_else(|| Error::UnsupportedSelector(src.into()))?;
            return Ok((cond, i + 1));
        }

        i += 1;
    }

    Err(Error::UnsupportedSelector(src.into()))
}

fn parse_attr_body(body: &str) -> Option<SelectorAttrCondition> {
    if body.is_empty() {
        return None;
    }
    let Some((lhs, value)) = body.split_once('=') else {
        if !body.bytes().all(is_selector_ident_char) {
            return None;
        }
        return Some(SelectorAttrCondition::Exists {
            key: body.to_ascii_lowercase(),
        });
    };

    let (key, operator) = match lhs.as_bytes().last() {
        Some(op @ (b'^' | b'$' | b'*' | b'~')) => (&lhs[..lhs.len() - 1], Some(*op)),
        _ => (lhs, None),
    };
    let key = key.trim().to_ascii_lowercase();
    if key.is_empty() || !key.bytes().all(is_selector_ident_char) {
        return None;
    }
    let value = unquote(value.trim()).to_string();

    Some(match operator {
        None => SelectorAttrCondition::Eq { key, value },
        Some(b'^') => SelectorAttrCondition::StartsWith { key, value },
        Some(b'$') => SelectorAttrCondition::EndsWith { key, value },
        Some(b'*') => SelectorAttrCondition::Contains { key, value },
        Some(_) => SelectorAttrCondition::Includes { key, value },
    })
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted { &value[1..value.len() - 1] } else { value }
}
