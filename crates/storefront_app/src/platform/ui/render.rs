use storefront_core::{
    format_price, AlertSeverity, CheckoutStep, PaymentMethod, SearchStatus, SearchView,
    StorefrontViewModel,
};

/// Renders one frame as plain text.
pub fn render(view: &StorefrontViewModel) -> String {
    let mut lines = Vec::new();

    match &view.search {
        Some(search) => render_search(search, view, &mut lines),
        None => lines.push("Results view closed (`open` to reopen).".to_string()),
    }

    lines.push(String::new());
    lines.push(format!(
        "Cart: {} item(s), subtotal ${}",
        view.cart.item_count,
        format_price(view.cart.subtotal_cents)
    ));
    for line in &view.cart.lines {
        lines.push(format!(
            "  [{}] {} {} x ${} = ${}",
            line.id,
            line.name,
            line.quantity,
            format_price(line.unit_price_cents),
            format_price(line.line_total_cents)
        ));
    }

    let checkout = &view.checkout;
    if checkout.completed {
        lines.push("Checkout: order placed.".to_string());
    } else {
        let step = match checkout.step {
            CheckoutStep::Cart => "Cart",
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
        };
        let payment = match checkout.payment_method {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        };
        let mut status = format!("Checkout: step {step}, payment {payment}");
        if checkout.submitting {
            status.push_str(" (submitting...)");
        }
        lines.push(status);
        if checkout.step != CheckoutStep::Cart {
            let shipping = &checkout.shipping;
            lines.push(format!(
                "  ship to: {} / {} / {} / {} / {}",
                shipping.name, shipping.phone, shipping.email, shipping.address, shipping.country
            ));
        }
        if let Some(error) = &checkout.validation_error {
            lines.push(format!("  ! {error}"));
        }
    }

    if let Some(alert) = &view.alert {
        let marker = match alert.severity {
            AlertSeverity::Success => "OK",
            AlertSeverity::Error => "ERROR",
        };
        lines.push(format!("[{marker}] {}", alert.message));
    }

    lines.join("\n")
}

fn render_search(search: &SearchView, view: &StorefrontViewModel, lines: &mut Vec<String>) {
    let criteria = &search.criteria;
    let (min, max) = criteria.price_range();
    lines.push(format!(
        "Results for \"{}\" in {} | sort {} | price {}-{}",
        criteria.query_text(),
        criteria.category(),
        criteria.sort_key().as_wire(),
        min,
        max
    ));
    if view.price_draft != (min, max) {
        lines.push(format!(
            "  slider at {}-{} (not applied)",
            view.price_draft.0, view.price_draft.1
        ));
    }
    if view.query_draft != criteria.query_text() {
        lines.push(format!("  search box: \"{}\"", view.query_draft));
    }
    if !view.suggestions.is_empty() {
        lines.push(format!("  suggestions: {}", view.suggestions.join(", ")));
    }

    if search.show_spinner {
        lines.push("  loading...".to_string());
        return;
    }

    for (index, item) in search.items.iter().enumerate() {
        lines.push(format!(
            "  {:>3}. {} ({}) ${} [{}]",
            index + 1,
            item.name,
            item.category,
            format_price(item.price_cents),
            item.id
        ));
    }

    let footer = match search.status {
        SearchStatus::Loading => "loading...".to_string(),
        SearchStatus::LoadingMore => "loading more...".to_string(),
        SearchStatus::Error => match &search.last_error {
            Some(error) => format!("failed: {error} (`retry`)"),
            None => "failed (`retry`)".to_string(),
        },
        SearchStatus::Exhausted if search.no_results => "No products found.".to_string(),
        SearchStatus::Exhausted => "End of results".to_string(),
        SearchStatus::Idle if search.has_more => format!(
            "page {} loaded (`more` for page {})",
            search.highest_loaded_page,
            search.highest_loaded_page + 1
        ),
        SearchStatus::Idle => format!("page {} loaded", search.highest_loaded_page),
    };
    lines.push(format!("  -- {footer}"));
}
