use super::*;

const BOUNDED_HTML: &str = r#"
    <div id="field">
      <label for="q">Qty</label>
      <input id="q" type="number" name="quantity" min="1" max="10" value="1">
    </div>
    "#;

#[test]
fn stepper_wraps_the_input_between_two_buttons() -> Result<()> {
    let page = Page::from_html(BOUNDED_HTML)?;

    assert_eq!(page.query_count("#field > .qty-control")?, 1);
    page.assert_exists(".qty-control > #q")?;
    assert_eq!(page.query_count(".qty-control > button.qty-btn")?, 2);
    page.assert_text(".qty-control > button", "\u{2212}")?;
    page.assert_text("#q + button", "+")?;
    assert_eq!(page.style(".qty-control", "display")?, "flex");
    assert_eq!(page.style(".qty-control", "gap")?, "8px");
    assert_eq!(page.style("#q", "width")?, "72px");
    assert_eq!(page.style("#q + button", "width")?, "36px");
    Ok(())
}

#[test]
fn decrement_at_minimum_stays_at_minimum() -> Result<()> {
    let mut page = Page::from_html(BOUNDED_HTML)?;

    page.click(".qty-control > button")?;
    page.assert_value("#q", "1")?;
    Ok(())
}

#[test]
fn increment_at_maximum_stays_at_maximum() -> Result<()> {
    let mut page = Page::from_html(BOUNDED_HTML)?;
    page.type_text("#q", "10")?;

    page.click("#q + button")?;
    page.assert_value("#q", "10")?;

    page.click(".qty-control > button")?;
    page.assert_value("#q", "9")?;
    Ok(())
}

#[test]
fn steppers_move_one_unit_inside_the_range() -> Result<()> {
    let mut page = Page::from_html(BOUNDED_HTML)?;

    page.click("#q + button")?;
    page.click("#q + button")?;
    page.assert_value("#q", "3")?;
    page.click(".qty-control > button")?;
    page.assert_value("#q", "2")?;
    Ok(())
}

#[test]
fn unusable_values_fall_back_before_stepping() -> Result<()> {
    let html = r#"
        <p><input id="q" type="number" name="quantity" min="4" max="6"></p>
        "#;
    let mut page = Page::from_html(html)?;

    page.click(".qty-control > button")?;
    page.assert_value("#q", "4")?;

    page.type_text("#q", "")?;
    page.click("#q + button")?;
    page.assert_value("#q", "4")?;
    Ok(())
}

#[test]
fn change_resets_garbage_or_blank_to_minimum() -> Result<()> {
    let html = r#"
        <p><input id="bounded" type="number" name="quantity" min="3"></p>
        <p><input id="plain" type="number" name="quantity"></p>
        "#;
    let mut page = Page::from_html(html)?;

    page.type_text("#bounded", "abc")?;
    page.dispatch("#bounded", "change")?;
    page.assert_value("#bounded", "3")?;

    page.type_text("#plain", "")?;
    page.dispatch("#plain", "change")?;
    page.assert_value("#plain", "1")?;

    page.type_text("#plain", "   ")?;
    page.dispatch("#plain", "change")?;
    page.assert_value("#plain", "1")?;
    Ok(())
}

#[test]
fn change_clamps_typed_values_into_range() -> Result<()> {
    let mut page = Page::from_html(BOUNDED_HTML)?;

    page.type_text("#q", "50")?;
    page.assert_value("#q", "50")?;
    page.dispatch("#q", "change")?;
    page.assert_value("#q", "10")?;

    page.type_text("#q", "-7")?;
    page.dispatch("#q", "change")?;
    page.assert_value("#q", "1")?;

    page.type_text("#q", "4.8")?;
    page.dispatch("#q", "change")?;
    page.assert_value("#q", "4")?;
    Ok(())
}

#[test]
fn change_coerces_infinity_and_hex_entries() -> Result<()> {
    let mut page = Page::from_html(BOUNDED_HTML)?;

    page.type_text("#q", "Infinity")?;
    page.dispatch("#q", "change")?;
    page.assert_value("#q", "10")?;

    page.type_text("#q", "-Infinity")?;
    page.dispatch("#q", "change")?;
    page.assert_value("#q", "1")?;

    page.type_text("#q", "0x5")?;
    page.dispatch("#q", "change")?;
    page.assert_value("#q", "5")?;
    Ok(())
}

#[test]
fn inverted_bounds_hold_the_declared_min() -> Result<()> {
    let mut page = Page::from_html(
        r#"<p><input id="q" type="number" name="quantity" min="8" max="3" value="5"></p>"#,
    )?;

    page.dispatch("#q", "change")?;
    page.assert_value("#q", "8")?;
    page.click("#q + button")?;
    page.assert_value("#q", "8")?;
    Ok(())
}

#[test]
fn missing_max_uses_the_configured_ceiling() -> Result<()> {
    let html = r#"<p><input id="q" type="number" name="quantity" value="24"></p>"#;
    let options = EnhancerOptions::default().with_quantity_ceiling(25);
    let mut page = Page::from_html_with_options(html, options)?;

    page.click("#q + button")?;
    page.click("#q + button")?;
    page.assert_value("#q", "25")?;
    Ok(())
}

#[test]
fn default_ceiling_is_9999() -> Result<()> {
    let html = r#"<p><input id="q" type="number" name="quantity" value="9999"></p>"#;
    let mut page = Page::from_html(html)?;

    page.click("#q + button")?;
    page.assert_value("#q", "9999")?;
    Ok(())
}

#[test]
fn existing_control_in_parent_prevents_injection() -> Result<()> {
    let html = r#"
        <div>
          <div class="qty-control"><button>-</button><button>+</button></div>
          <input id="q" type="number" name="quantity">
        </div>
        "#;
    let page = Page::from_html(html)?;

    assert_eq!(page.query_count(".qty-control")?, 1);
    assert_eq!(page.query_count(".qty-btn")?, 0);
    page.assert_exists("div > #q")?;
    Ok(())
}

#[test]
fn running_the_enhancements_again_does_not_double_inject() -> Result<()> {
    let mut page = Page::from_html(BOUNDED_HTML)?;

    page.enhance()?;

    assert_eq!(page.query_count(".qty-control")?, 1);
    assert_eq!(page.query_count(".qty-btn")?, 2);
    page.click("#q + button")?;
    page.assert_value("#q", "2")?;
    Ok(())
}

#[test]
fn only_named_number_inputs_get_steppers() -> Result<()> {
    let html = r#"
        <div><input type="text" name="quantity"></div>
        <div><input type="number" name="amount"></div>
        <input id="top" type="number" name="quantity">
        "#;
    let page = Page::from_html(html)?;

    page.assert_not_exists(".qty-control")?;
    Ok(())
}
