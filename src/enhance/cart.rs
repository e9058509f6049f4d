use crate::dom::{Dom, NodeId};
use crate::enhance::Handler;
use crate::enhance::toast::Severity;
use crate::page::Page;
use crate::pattern::Pattern;
use crate::runtime_state::{EventState, FetchRequest, InFlightFetch};
use crate::Result;

const CART_LINK_SELECTOR: &str = r#"a[href*="/cart"]"#;
const ADD_FORM_SELECTOR: &str = r#"form[action^="/cart/add"]"#;
const REMOVE_FORM_SELECTOR: &str = r#"form[action^="/cart/remove"]"#;

const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Number of items shown next to the header cart link.
///
/// Unsigned with saturating arithmetic, so the count can never go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CartCount(u32);

impl CartCount {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn added(self, quantity: u32) -> Self {
        Self(self.0.saturating_add(quantity))
    }

    /// The remove endpoint does not report how many units went away, so a
    /// successful removal always counts as one.
    pub fn removed_one(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Digits that overflow `u32` saturate instead of failing.
    fn from_digits(digits: &str) -> Self {
        Self(digits.parse().unwrap_or(u32::MAX))
    }
}

/// Reads and renders the `(N)` suffix of the header cart link.
#[derive(Debug, Clone)]
pub(crate) struct CartBadge {
    count_pattern: Pattern,
}

impl CartBadge {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            // ASCII digits only; other scripts' digits are not a badge.
            count_pattern: Pattern::new(r"\(([0-9]+)\)")?,
        })
    }

    fn link(dom: &Dom) -> Result<Option<NodeId>> {
        dom.query_selector(CART_LINK_SELECTOR)
    }

    /// Zero when the link or the pattern is missing.
    pub(crate) fn read(&self, dom: &Dom) -> Result<CartCount> {
        let Some(link) = Self::link(dom)? else {
            return Ok(CartCount::default());
        };
        let text = dom.text_content(link);
        Ok(self
            .count_pattern
            .capture(&text, 1)?
            .map(|digits| CartCount::from_digits(&digits))
            .unwrap_or_default())
    }

    pub(crate) fn write(&self, dom: &mut Dom, count: CartCount) -> Result<()> {
        let Some(link) = Self::link(dom)? else {
            return Ok(());
        };
        let text = dom.text_content(link);
        let rendered = self.render(&text, count)?;
        dom.set_text_content(link, &rendered)
    }

    fn render(&self, text: &str, count: CartCount) -> Result<String> {
        let badge = format!("({})", count.get());
        if self.count_pattern.is_match(text)? {
            Ok(self.count_pattern.replace_first(text, &badge)?)
        } else {
            Ok(format!("{text} {badge}"))
        }
    }
}

/// What to do with the page once a cart request settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CartAction {
    Add { quantity: u32 },
    Remove { form: NodeId },
}

/// Positive integer quantity from a form entry, or 1.
fn submitted_quantity(entries: &[(String, String)]) -> u32 {
    entries
        .iter()
        .find(|(name, _)| name == "quantity")
        .and_then(|(_, value)| value.trim().parse::<u32>().ok())
        .filter(|quantity| *quantity > 0)
        .unwrap_or(1)
}

impl Page {
    pub(crate) fn init_ajax_cart(&mut self) -> Result<()> {
        for form in self.dom.query_selector_all(ADD_FORM_SELECTOR)? {
            self.listen(form, "submit", Handler::AddToCart);
        }
        for form in self.dom.query_selector_all(REMOVE_FORM_SELECTOR)? {
            self.listen(form, "submit", Handler::RemoveFromCart);
        }
        Ok(())
    }

    /// Current count as displayed in the header.
    pub fn cart_count(&self) -> Result<u32> {
        Ok(self.cart_badge.read(&self.dom)?.get())
    }

    /// Renders `count` into the header cart link; no-op without a link.
    pub fn set_cart_count(&mut self, count: u32) -> Result<()> {
        self.cart_badge.write(&mut self.dom, CartCount::new(count))
    }

    pub(crate) fn submit_add_to_cart(&mut self, form: NodeId, event: &mut EventState) -> Result<()> {
        event.prevent_default();
        let entries = self.form_data_entries(form)?;
        let quantity = submitted_quantity(&entries);
        self.start_cart_fetch(form, &entries, CartAction::Add { quantity })
    }

    pub(crate) fn submit_remove_from_cart(
        &mut self,
        form: NodeId,
        event: &mut EventState,
    ) -> Result<()> {
        event.prevent_default();
        let entries = self.form_data_entries(form)?;
        self.start_cart_fetch(form, &entries, CartAction::Remove { form })
    }

    fn start_cart_fetch(
        &mut self,
        form: NodeId,
        entries: &[(String, String)],
        action: CartAction,
    ) -> Result<()> {
        let url = self.dom.attr(form, "action").unwrap_or_default();
        let request = FetchRequest {
            method: "POST".to_string(),
            url: url.clone(),
            headers: vec![(AJAX_HEADER.0.to_string(), AJAX_HEADER.1.to_string())],
            body: encode_form_body(entries),
        };
        let outcome = self.platform_mocks.outcome_for(&url);
        self.trace_network_line(format!("[fetch] start POST {url} body={:?}", request.body));
        self.platform_mocks.fetch_calls.push(request.clone());
        self.platform_mocks.in_flight.push_back(InFlightFetch {
            request,
            outcome,
            action,
        });
        Ok(())
    }

    /// Delivers every in-flight response, in issue order.
    pub(crate) fn settle_in_flight_fetches(&mut self) -> Result<usize> {
        let mut settled = 0usize;
        while let Some(fetch) = self.platform_mocks.in_flight.pop_front() {
            settled += 1;
            self.settle_fetch(fetch)?;
        }
        Ok(settled)
    }

    fn settle_fetch(&mut self, fetch: InFlightFetch) -> Result<()> {
        let InFlightFetch {
            request,
            outcome,
            action,
        } = fetch;
        self.trace_network_line(format!(
            "[fetch] settle POST {} outcome={:?} ok={}",
            request.url,
            outcome,
            outcome.is_ok()
        ));

        if !outcome.is_ok() {
            let (context, message) = match action {
                CartAction::Add { .. } => ("Add to cart failed", "Failed to add to cart"),
                CartAction::Remove { .. } => {
                    ("Remove from cart failed", "Failed to remove from cart")
                }
            };
            self.console_error(format!("{context}: {}", describe_failure(&outcome)));
            return self.show_toast(message, Severity::Danger);
        }

        // The count is re-read here: other responses may have landed since submit.
        let current = self.cart_badge.read(&self.dom)?;
        match action {
            CartAction::Add { quantity } => {
                self.cart_badge.write(&mut self.dom, current.added(quantity))?;
                tracing::debug!(url = %request.url, quantity, "item added to cart");
                self.show_toast("Added to cart", Severity::Success)
            }
            CartAction::Remove { form } => {
                self.cart_badge.write(&mut self.dom, current.removed_one())?;
                if let Some(row) = self.dom.closest(form, "tr")? {
                    self.dom.remove_node(row)?;
                }
                tracing::debug!(url = %request.url, "item removed from cart");
                self.show_toast("Removed from cart", Severity::Info)
            }
        }
    }
}

fn describe_failure(outcome: &crate::FetchOutcome) -> String {
    match outcome {
        crate::FetchOutcome::Status(status) => format!("Network error (status {status})"),
        crate::FetchOutcome::NetworkError(message) => message.clone(),
    }
}

pub(crate) fn encode_form_body(entries: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(entries)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn count_arithmetic_never_goes_negative() {
        assert_eq!(CartCount::new(0).removed_one(), CartCount::new(0));
        assert_eq!(CartCount::new(3).removed_one().get(), 2);
        assert_eq!(CartCount::new(u32::MAX).added(5).get(), u32::MAX);
    }

    #[test]
    fn render_replaces_first_badge_or_appends_one() -> Result<()> {
        let badge = CartBadge::new()?;
        assert_eq!(badge.render("Cart (2)", CartCount::new(7))?, "Cart (7)");
        assert_eq!(badge.render("Cart", CartCount::new(1))?, "Cart (1)");
        assert_eq!(
            badge.render("Cart (2) (3)", CartCount::new(0))?,
            "Cart (0) (3)"
        );
        Ok(())
    }

    #[test]
    fn oversized_digits_saturate() {
        assert_eq!(CartCount::from_digits("99999999999999").get(), u32::MAX);
    }

    #[test]
    fn non_ascii_digits_are_not_a_badge() -> Result<()> {
        let badge = CartBadge::new()?;
        let mut dom = crate::html::parse_html("<a href=\"/cart\">Cart (\u{663})</a>")?;
        assert_eq!(badge.read(&dom)?, CartCount::default());

        badge.write(&mut dom, CartCount::new(1))?;
        assert_eq!(badge.read(&dom)?.get(), 1);
        Ok(())
    }

    #[test]
    fn submitted_quantity_defaults_to_one() {
        assert_eq!(submitted_quantity(&entries(&[("quantity", "4")])), 4);
        assert_eq!(submitted_quantity(&entries(&[("quantity", " 2 ")])), 2);
        assert_eq!(submitted_quantity(&entries(&[("quantity", "0")])), 1);
        assert_eq!(submitted_quantity(&entries(&[("quantity", "-3")])), 1);
        assert_eq!(submitted_quantity(&entries(&[("quantity", "abc")])), 1);
        assert_eq!(submitted_quantity(&entries(&[("sku", "9")])), 1);
    }

    #[test]
    fn form_body_is_url_encoded() {
        let body = encode_form_body(&entries(&[("quantity", "2"), ("note", "gift wrap & card")]));
        assert_eq!(body, "quantity=2&note=gift+wrap+%26+card");
    }
}
