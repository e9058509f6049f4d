//! Progressive enhancements for a server-rendered shopping-cart page.
//!
//! A [`Page`] parses HTML into a headless DOM and runs the enhancement
//! initializers once, the way a browser would on `DOMContentLoaded`:
//!
//! - add/remove-from-cart forms are submitted asynchronously and keep the
//!   header cart count in sync,
//! - numeric quantity inputs get `−`/`+` steppers and stay within bounds,
//! - the registration and login forms get minimal client-side checks,
//! - the checkout form asks for confirmation,
//! - feedback is shown as auto-dismissing toasts.
//!
//! Everything runs on a virtual clock with mocked platform services, so the
//! behavior is fully deterministic:
//!
//! ```
//! use storefront_enhancer::Page;
//!
//! let html = r#"
//!   <body>
//!     <a href="/cart">Cart (2)</a>
//!     <form action="/cart/add/7" method="post">
//!       <input type="number" name="quantity" value="3">
//!       <button type="submit">Add</button>
//!     </form>
//!   </body>
//! "#;
//!
//! let mut page = Page::from_html(html)?;
//! page.set_fetch_status("/cart/add/7", 200);
//! page.submit("form")?;
//! assert_eq!(page.cart_count()?, 5);
//! page.assert_text("a", "Cart (5)")?;
//! # Ok::<(), storefront_enhancer::Error>(())
//! ```

use std::error::Error as StdError;
use std::fmt;

mod dom;
mod enhance;
mod html;
mod page;
mod pattern;
mod runtime_state;
mod selector;

pub use enhance::cart::CartCount;
pub use enhance::options::EnhancerOptions;
pub use enhance::quantity::QuantityBounds;
pub use enhance::toast::{Severity, Toast};
pub use page::Page;
pub use runtime_state::{FetchOutcome, FetchRequest, FormSubmission, PendingTimer};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    Runtime(String),
    InvalidOption(String),
    Pattern(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::InvalidOption(msg) => write!(f, "invalid option: {msg}"),
            Self::Pattern(msg) => write!(f, "pattern error: {msg}"),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests;
