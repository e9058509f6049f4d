use super::*;

const PRODUCT_HTML: &str = r#"
    <header><a id="cart" href="/cart">Cart (2)</a></header>
    <main>
      <form id="add" action="/cart/add/7" method="post">
        <input type="hidden" name="sku" value="TEA-7">
        <div class="row">
          <input id="qty" type="number" name="quantity" value="3" min="1" max="10">
        </div>
        <button id="add-btn" type="submit">Add to cart</button>
      </form>
    </main>
    "#;

const CART_HTML: &str = r#"
    <a id="cart" href="/cart">Cart (1)</a>
    <table>
      <tbody>
        <tr id="row-1">
          <td>Green tea</td>
          <td><form action="/cart/remove/1" method="post"><button id="rm-1">Remove</button></form></td>
        </tr>
        <tr id="row-2">
          <td>Black tea</td>
          <td><form action="/cart/remove/2" method="post"><button id="rm-2">Remove</button></form></td>
        </tr>
      </tbody>
    </table>
    "#;

#[test]
fn successful_add_increments_count_by_submitted_quantity() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;
    page.set_fetch_status("/cart/add/7", 200);

    page.click("#add-btn")?;

    assert_eq!(page.cart_count()?, 5);
    page.assert_text("#cart", "Cart (5)")?;
    assert_eq!(
        page.toasts(),
        vec![Toast {
            message: "Added to cart".into(),
            severity: Severity::Success,
        }]
    );
    assert!(page.take_form_submissions().is_empty());
    Ok(())
}

#[test]
fn add_request_is_an_ajax_post_with_the_form_body() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;
    page.set_fetch_status("/cart/add/7", 201);

    page.submit("#add")?;

    let calls = page.take_fetch_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].url, "/cart/add/7");
    assert_eq!(calls[0].header("x-requested-with"), Some("XMLHttpRequest"));
    assert_eq!(calls[0].body, "sku=TEA-7&quantity=3");
    assert_eq!(page.cart_count()?, 5);
    Ok(())
}

#[test]
fn quantity_is_read_when_the_form_is_submitted() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;
    page.set_fetch_status("/cart/add/7", 200);

    page.type_text("#qty", "4")?;
    page.submit("#add")?;
    assert_eq!(page.cart_count()?, 6);

    page.type_text("#qty", "abc")?;
    page.submit("#add")?;
    assert_eq!(page.cart_count()?, 7);
    Ok(())
}

#[test]
fn add_without_quantity_field_counts_one() -> Result<()> {
    let html = r#"
        <a href="/cart">Cart (0)</a>
        <form action="/cart/add/3" method="post"><button>Add</button></form>
        "#;
    let mut page = Page::from_html(html)?;
    page.set_fetch_status("/cart/add/3", 200);

    page.click("button")?;

    assert_eq!(page.cart_count()?, 1);
    page.assert_text("a", "Cart (1)")?;
    Ok(())
}

#[test]
fn non_ok_status_leaves_count_and_logs_once() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;
    page.set_fetch_status("/cart/add/7", 500);

    page.submit("#add")?;

    page.assert_text("#cart", "Cart (2)")?;
    assert_eq!(
        page.take_console_errors(),
        vec!["Add to cart failed: Network error (status 500)".to_string()]
    );
    assert_eq!(
        page.toasts(),
        vec![Toast {
            message: "Failed to add to cart".into(),
            severity: Severity::Danger,
        }]
    );
    Ok(())
}

#[test]
fn unmocked_endpoint_behaves_like_a_transport_failure() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;

    page.submit("#add")?;

    assert_eq!(page.cart_count()?, 2);
    assert_eq!(
        page.take_console_errors(),
        vec!["Add to cart failed: no fetch mock for /cart/add/7".to_string()]
    );
    Ok(())
}

#[test]
fn default_fetch_status_applies_to_unmocked_urls() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;
    page.set_default_fetch_status(Some(204));

    page.submit("#add")?;
    assert_eq!(page.cart_count()?, 5);

    page.clear_fetch_mocks();
    page.submit("#add")?;
    assert_eq!(page.cart_count()?, 5);
    assert_eq!(page.take_console_errors().len(), 1);
    Ok(())
}

#[test]
fn successful_remove_decrements_and_drops_the_row() -> Result<()> {
    let mut page = Page::from_html(CART_HTML)?;
    page.set_fetch_status("/cart/remove/1", 200);
    page.set_fetch_status("/cart/remove/2", 200);

    page.click("#rm-1")?;
    assert_eq!(page.cart_count()?, 0);
    page.assert_not_exists("#row-1")?;
    page.assert_exists("#row-2")?;

    page.click("#rm-2")?;
    assert_eq!(page.cart_count()?, 0);
    page.assert_text("#cart", "Cart (0)")?;
    page.assert_not_exists("#row-2")?;

    let messages: Vec<_> = page.toasts().into_iter().map(|t| t.message).collect();
    assert_eq!(messages, vec!["Removed from cart", "Removed from cart"]);
    Ok(())
}

#[test]
fn failed_remove_keeps_row_and_count() -> Result<()> {
    let mut page = Page::from_html(CART_HTML)?;
    page.set_fetch_network_error("/cart/remove/1", "connection reset");

    page.click("#rm-1")?;

    page.assert_exists("#row-1")?;
    assert_eq!(page.cart_count()?, 1);
    assert_eq!(
        page.take_console_errors(),
        vec!["Remove from cart failed: connection reset".to_string()]
    );
    assert_eq!(page.toasts()[0].severity, Severity::Danger);
    assert_eq!(page.toasts()[0].message, "Failed to remove from cart");
    Ok(())
}

#[test]
fn remove_form_outside_a_row_only_updates_count() -> Result<()> {
    let html = r#"
        <a href="/cart">Cart (4)</a>
        <div id="line"><form action="/cart/remove/9" method="post"><button>x</button></form></div>
        "#;
    let mut page = Page::from_html(html)?;
    page.set_fetch_status("/cart/remove/9", 200);

    page.click("button")?;

    assert_eq!(page.cart_count()?, 3);
    page.assert_exists("#line form")?;
    Ok(())
}

#[test]
fn double_submit_issues_two_requests_and_applies_both() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;
    page.set_fetch_status("/cart/add/7", 200);
    page.hold_fetch_responses(true);

    page.click("#add-btn")?;
    page.click("#add-btn")?;

    assert_eq!(page.pending_fetch_count(), 2);
    assert_eq!(page.cart_count()?, 2);
    assert_eq!(page.resolve_pending_fetches()?, 2);
    assert_eq!(page.pending_fetch_count(), 0);
    assert_eq!(page.cart_count()?, 8);
    assert_eq!(page.take_fetch_calls().len(), 2);
    assert_eq!(page.toasts().len(), 2);
    Ok(())
}

#[test]
fn response_applies_to_the_count_displayed_when_it_arrives() -> Result<()> {
    let mut page = Page::from_html(PRODUCT_HTML)?;
    page.set_fetch_status("/cart/add/7", 200);
    page.hold_fetch_responses(true);

    page.submit("#add")?;
    page.set_cart_count(10)?;
    page.resolve_pending_fetches()?;

    assert_eq!(page.cart_count()?, 13);
    Ok(())
}

#[test]
fn missing_cart_link_degrades_to_a_no_op() -> Result<()> {
    let html = r#"
        <form action="/cart/add/1" method="post"><button>Add</button></form>
        "#;
    let mut page = Page::from_html(html)?;
    page.set_fetch_status("/cart/add/1", 200);

    page.click("button")?;

    assert_eq!(page.cart_count()?, 0);
    page.set_cart_count(3)?;
    assert_eq!(page.cart_count()?, 0);
    assert_eq!(page.toasts()[0].message, "Added to cart");
    Ok(())
}

#[test]
fn link_without_badge_gets_one_appended() -> Result<()> {
    let html = r#"
        <nav><a href="/products">Shop</a><a id="cart" href="/cart">Cart</a></nav>
        <form action="/cart/add/1" method="post"><button>Add</button></form>
        "#;
    let mut page = Page::from_html(html)?;
    page.set_fetch_status("/cart/add/1", 200);
    assert_eq!(page.cart_count()?, 0);

    page.click("button")?;

    page.assert_text("#cart", "Cart (1)")?;
    page.assert_text("nav a", "Shop")?;
    Ok(())
}

#[test]
fn badge_with_non_ascii_digits_reads_as_zero() -> Result<()> {
    let html = "<a id=\"cart\" href=\"/cart\">Cart (\u{663})</a>\
        <form action=\"/cart/add/1\" method=\"post\"><button>Add</button></form>";
    let mut page = Page::from_html(html)?;
    page.set_fetch_status("/cart/add/1", 200);
    assert_eq!(page.cart_count()?, 0);

    page.click("button")?;

    page.assert_text("#cart", "Cart (\u{663}) (1)")?;
    assert_eq!(page.cart_count()?, 1);
    Ok(())
}

#[test]
fn deeply_nested_quantity_field_is_submitted() -> Result<()> {
    let depth = 40_000;
    let html = format!(
        r#"<a id="cart" href="/cart">Cart (0)</a><form id="add" action="/cart/add/1" method="post">{}<input type="number" name="quantity" value="4">{}</form>"#,
        "<div>".repeat(depth),
        "</div>".repeat(depth),
    );
    let mut page = Page::from_html(&html)?;
    page.set_fetch_status("/cart/add/1", 200);

    page.submit("#add")?;

    let calls = page.take_fetch_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, "quantity=4");
    assert_eq!(page.cart_count()?, 4);
    Ok(())
}

#[test]
fn forms_with_other_actions_are_left_alone() -> Result<()> {
    let html = r#"
        <a href="/cart">Cart (1)</a>
        <form action="/wishlist/add/1" method="post"><button>Save</button></form>
        "#;
    let mut page = Page::from_html(html)?;

    page.click("button")?;

    assert!(page.take_fetch_calls().is_empty());
    assert_eq!(
        page.take_form_submissions(),
        vec![FormSubmission {
            method: "POST".into(),
            action: "/wishlist/add/1".into(),
            body: String::new(),
        }]
    );
    Ok(())
}
