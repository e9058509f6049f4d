use crate::dom::NodeId;
use crate::enhance::Handler;
use crate::page::Page;
use crate::Result;

const QUANTITY_INPUT_SELECTOR: &str = r#"input[type="number"][name="quantity"]"#;
const CONTROL_CLASS: &str = "qty-control";
const BUTTON_CLASS: &str = "qty-btn";

/// Inclusive range a quantity input is kept within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityBounds {
    min: i64,
    max: i64,
}

impl QuantityBounds {
    /// `max` is raised to `min` when the pair is inverted.
    pub fn new(min: i64, max: i64) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Bounds from `min`/`max` attribute text. Missing, zero or non-numeric
    /// values fall back to 1 and `ceiling`.
    pub fn from_attrs(min: Option<&str>, max: Option<&str>, ceiling: i64) -> Self {
        let min = min.and_then(parse_quantity).unwrap_or(1);
        let max = max.and_then(parse_quantity).unwrap_or(ceiling);
        Self::new(min, max)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn clamp(&self, value: i64) -> i64 {
        num_traits::clamp(value, self.min, self.max)
    }

    /// Value after pressing `−`; an unusable current value counts as `min`.
    pub fn step_down(&self, current: Option<i64>) -> i64 {
        self.clamp(current.unwrap_or(self.min).saturating_sub(1))
    }

    /// Value after pressing `+`; an unusable current value counts as 1.
    pub fn step_up(&self, current: Option<i64>) -> i64 {
        self.clamp(current.unwrap_or(1).saturating_add(1))
    }

    /// Value after a manual edit; an unusable value resets to `min`.
    pub fn normalize(&self, current: Option<i64>) -> i64 {
        self.clamp(current.unwrap_or(self.min))
    }
}

/// Numeric reading of a field, or `None` when it is blank, zero or not a
/// number. Accepts `Infinity` and `0x`/`0o`/`0b` integers the way form
/// fields are coerced in the browser; out-of-range values saturate.
/// Fractions are truncated toward zero.
pub(crate) fn parse_quantity(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let value = match trimmed {
        "" => return None,
        "Infinity" | "+Infinity" => return Some(i64::MAX),
        "-Infinity" => return Some(i64::MIN),
        _ => match radix_literal(trimmed) {
            Some(parsed) => parsed?,
            None => parse_decimal(trimmed)?,
        },
    };
    (value != 0).then_some(value)
}

/// `Some(reading)` when `text` carries a radix prefix.
fn radix_literal(text: &str) -> Option<Option<i64>> {
    let prefix = text.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(None);
    }
    Some(Some(i64::from_str_radix(digits, radix).unwrap_or(i64::MAX)))
}

fn parse_decimal(text: &str) -> Option<i64> {
    // f64 parsing also takes `inf` and `nan` spellings, which fields never coerce.
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    let value = text.parse::<f64>().ok()?;
    // `as` saturates at the i64 range, including for infinities.
    Some(value.trunc() as i64)
}

impl Page {
    pub(crate) fn init_quantity_controls(&mut self) -> Result<()> {
        for input in self.dom.query_selector_all(QUANTITY_INPUT_SELECTOR)? {
            let Some(parent) = self.dom.parent_element(input) else {
                continue;
            };
            if self.dom.class_contains(parent, CONTROL_CLASS)
                || self
                    .dom
                    .query_selector_from(parent, &format!(".{CONTROL_CLASS}"))?
                    .is_some()
            {
                continue;
            }
            self.wrap_quantity_input(parent, input)?;
        }
        Ok(())
    }

    fn wrap_quantity_input(&mut self, parent: NodeId, input: NodeId) -> Result<()> {
        let wrap = self.dom.create_detached_element("div");
        self.dom.set_attr(wrap, "class", CONTROL_CLASS)?;
        self.dom.style_set(wrap, "display", "flex")?;
        self.dom.style_set(wrap, "align-items", "center")?;
        self.dom.style_set(wrap, "gap", "8px")?;

        let minus = self.stepper_button("\u{2212}")?;
        let plus = self.stepper_button("+")?;
        self.dom.style_set(input, "width", "72px")?;

        self.dom.append_child(wrap, minus)?;
        self.dom.append_child(wrap, input)?;
        self.dom.append_child(wrap, plus)?;
        self.dom.append_child(parent, wrap)?;

        self.listen(minus, "click", Handler::StepDown { input });
        self.listen(plus, "click", Handler::StepUp { input });
        self.listen(input, "change", Handler::ClampQuantity { input });
        Ok(())
    }

    fn stepper_button(&mut self, label: &str) -> Result<NodeId> {
        let button = self.dom.create_detached_element("button");
        self.dom.set_attr(button, "type", "button")?;
        self.dom.set_attr(button, "class", BUTTON_CLASS)?;
        self.dom.set_text_content(button, label)?;
        for (name, value) in [("width", "36px"), ("height", "36px"), ("border-radius", "6px")] {
            self.dom.style_set(button, name, value)?;
        }
        Ok(button)
    }

    /// Bounds currently declared on a quantity input.
    pub(crate) fn quantity_bounds(&self, input: NodeId) -> QuantityBounds {
        QuantityBounds::from_attrs(
            self.dom.attr(input, "min").as_deref(),
            self.dom.attr(input, "max").as_deref(),
            self.options.quantity_ceiling,
        )
    }

    fn current_quantity(&self, input: NodeId) -> Result<Option<i64>> {
        Ok(parse_quantity(&self.dom.value(input)?))
    }

    pub(crate) fn step_quantity_down(&mut self, input: NodeId) -> Result<()> {
        let next = self.quantity_bounds(input).step_down(self.current_quantity(input)?);
        self.dom.set_value(input, &next.to_string())
    }

    pub(crate) fn step_quantity_up(&mut self, input: NodeId) -> Result<()> {
        let next = self.quantity_bounds(input).step_up(self.current_quantity(input)?);
        self.dom.set_value(input, &next.to_string())
    }

    pub(crate) fn clamp_quantity(&mut self, input: NodeId) -> Result<()> {
        let next = self.quantity_bounds(input).normalize(self.current_quantity(input)?);
        self.dom.set_value(input, &next.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quantity_treats_blank_zero_and_garbage_as_missing() {
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity("0"), None);
        assert_eq!(parse_quantity("NaN"), None);
        assert_eq!(parse_quantity("inf"), None);
        assert_eq!(parse_quantity(" 7 "), Some(7));
        assert_eq!(parse_quantity("2.9"), Some(2));
        assert_eq!(parse_quantity("-4"), Some(-4));
        assert_eq!(parse_quantity("1e3"), Some(1000));
        assert_eq!(parse_quantity("0.4"), None);
    }

    #[test]
    fn parse_quantity_coerces_like_a_number_field() {
        assert_eq!(parse_quantity("Infinity"), Some(i64::MAX));
        assert_eq!(parse_quantity("+Infinity"), Some(i64::MAX));
        assert_eq!(parse_quantity("-Infinity"), Some(i64::MIN));
        assert_eq!(parse_quantity("infinity"), None);
        assert_eq!(parse_quantity("1e400"), Some(i64::MAX));
        assert_eq!(parse_quantity("0x10"), Some(16));
        assert_eq!(parse_quantity("0X1f"), Some(31));
        assert_eq!(parse_quantity("0o17"), Some(15));
        assert_eq!(parse_quantity("0b101"), Some(5));
        assert_eq!(parse_quantity("0x"), None);
        assert_eq!(parse_quantity("0x-5"), None);
        assert_eq!(parse_quantity("0b12"), None);
        assert_eq!(parse_quantity("0x0"), None);
        assert_eq!(parse_quantity("0xffffffffffffffffff"), Some(i64::MAX));
    }

    #[test]
    fn infinite_entry_clamps_to_max() {
        let bounds = QuantityBounds::from_attrs(Some("2"), Some("12"), 9999);
        assert_eq!(bounds.normalize(parse_quantity("Infinity")), 12);
        assert_eq!(bounds.normalize(parse_quantity("-Infinity")), 2);
        assert_eq!(bounds.normalize(parse_quantity("0x10")), 12);
    }

    #[test]
    fn bounds_default_and_repair_inverted_pairs() {
        let bounds = QuantityBounds::from_attrs(None, None, 9999);
        assert_eq!((bounds.min(), bounds.max()), (1, 9999));

        let bounds = QuantityBounds::from_attrs(Some("0"), Some("x"), 50);
        assert_eq!((bounds.min(), bounds.max()), (1, 50));

        let bounds = QuantityBounds::from_attrs(Some("8"), Some("3"), 9999);
        assert_eq!((bounds.min(), bounds.max()), (8, 8));
    }

    #[test]
    fn inverted_bounds_settle_on_min() {
        // The declared `min` wins over a smaller `max` for every operation.
        let bounds = QuantityBounds::new(8, 3);
        assert_eq!(bounds.normalize(Some(5)), 8);
        assert_eq!(bounds.normalize(Some(100)), 8);
        assert_eq!(bounds.normalize(None), 8);
        assert_eq!(bounds.step_up(Some(8)), 8);
        assert_eq!(bounds.step_down(Some(8)), 8);
    }

    #[test]
    fn stepping_stays_inside_bounds() {
        let bounds = QuantityBounds::new(1, 10);
        assert_eq!(bounds.step_down(Some(1)), 1);
        assert_eq!(bounds.step_down(Some(5)), 4);
        assert_eq!(bounds.step_down(None), 1);
        assert_eq!(bounds.step_up(Some(10)), 10);
        assert_eq!(bounds.step_up(None), 2);
        assert_eq!(bounds.step_up(Some(-20)), 1);
        assert_eq!(bounds.normalize(None), 1);
        assert_eq!(bounds.normalize(Some(42)), 10);
    }

    #[test]
    fn step_up_from_missing_value_respects_large_min() {
        let bounds = QuantityBounds::new(5, 10);
        assert_eq!(bounds.step_up(None), 5);
        assert_eq!(bounds.step_down(None), 5);
    }

    #[test]
    fn extreme_values_saturate() {
        let bounds = QuantityBounds::new(i64::MIN, i64::MAX);
        assert_eq!(bounds.step_up(Some(i64::MAX)), i64::MAX);
        assert_eq!(bounds.step_down(Some(i64::MIN)), i64::MIN);
    }
}
