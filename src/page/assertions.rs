use super::*;

impl Page {
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    /// Current value of a form control.
    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_not_exists(&self, selector: &str) -> Result<()> {
        if let Some(found) = self.dom.query_selector(selector)? {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "no match".into(),
                actual: self.node_label(found),
                dom_snippet: self.node_snippet(found),
            });
        }
        Ok(())
    }

    pub fn query_count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    /// Serialized HTML of the first match.
    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    /// Inline style property of the first match, empty when unset.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, property)
    }
}
