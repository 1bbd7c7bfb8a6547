use storefront_logging::{store_debug, store_info, store_warn};

use crate::{
    normalize_price_range, Alert, Cart, CheckoutStep, Completion, Effect, Msg, OrderConfirmation,
    SearchCriteria, StorefrontState,
};

pub const ORDER_PLACED: &str = "Order placed successfully!";
pub const CHECKOUT_FAILED: &str = "Checkout failed.";
pub const CART_EMPTY: &str = "Your cart is empty";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: StorefrontState, msg: Msg) -> (StorefrontState, Vec<Effect>) {
    let effects = match msg {
        Msg::ViewOpened(criteria) => {
            let request = state.open_search(criteria);
            vec![Effect::FetchPage(request)]
        }
        Msg::ViewClosed => {
            state.close_search();
            Vec::new()
        }
        Msg::QueryEdited(text) => {
            state.set_query_draft(text);
            Vec::new()
        }
        Msg::QuerySubmitted => {
            let next = state.criteria().clone().with_query(state.query_draft());
            change_criteria(&mut state, next)
        }
        Msg::CategoryChanged(category) => {
            let next = state.criteria().clone().with_category(category);
            change_criteria(&mut state, next)
        }
        Msg::CategoryBrowsed(category) => {
            let next = SearchCriteria::default()
                .with_page_size(state.criteria().page_size())
                .with_category(category.as_wire());
            change_criteria(&mut state, next)
        }
        Msg::SortChanged(sort_key) => {
            let next = state.criteria().clone().with_sort(sort_key);
            change_criteria(&mut state, next)
        }
        Msg::PriceRangeDragged { min, max } => {
            state.set_price_draft(normalize_price_range(min, max));
            Vec::new()
        }
        Msg::PriceRangeCommitted { min, max } => {
            state.set_price_draft(normalize_price_range(min, max));
            let next = state.criteria().clone().with_price_range(min, max);
            change_criteria(&mut state, next)
        }
        Msg::LoadMoreRequested => {
            let request = state.search_mut().and_then(|session| session.load_more());
            match request {
                Some(request) => {
                    state.mark_dirty();
                    vec![Effect::FetchPage(request)]
                }
                None => Vec::new(),
            }
        }
        Msg::RetryRequested => {
            let request = state.search_mut().and_then(|session| session.retry());
            match request {
                Some(request) => {
                    store_info!("retrying page {} of {}", request.page, request.generation);
                    state.mark_dirty();
                    vec![Effect::FetchPage(request)]
                }
                None => Vec::new(),
            }
        }
        Msg::PageFetched { generation, page } => {
            let page_number = page.page_number;
            let completion = match state.search_mut() {
                Some(session) => session.apply_success(generation, page),
                None => {
                    store_debug!("page {} of {} arrived with no open view", page_number, generation);
                    Completion::Stale
                }
            };
            if completion == Completion::Applied {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PageFailed {
            generation,
            page_number,
            error,
        } => {
            let completion = match state.search_mut() {
                Some(session) => session.apply_failure(generation, page_number, error.clone()),
                None => Completion::Stale,
            };
            if completion == Completion::Applied {
                store_warn!("page {} of {} failed: {}", page_number, generation, error);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AddResultToCart { index } => {
            let product = state
                .search()
                .and_then(|session| session.items().get(index))
                .cloned();
            match product {
                Some(product) => {
                    state.cart.add_item(product);
                    cart_changed(&mut state)
                }
                None => Vec::new(),
            }
        }
        Msg::RemoveFromCart(id) => {
            if state.cart.remove_item(&id) {
                cart_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::CartQuantityChanged { id, quantity } => {
            if state.cart.update_quantity(&id, quantity) {
                cart_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::CartCleared => {
            if state.cart.is_empty() {
                Vec::new()
            } else {
                state.cart.clear();
                cart_changed(&mut state)
            }
        }
        Msg::RestoreCart(lines) => {
            state.cart = Cart::from_lines(lines);
            state.mark_dirty();
            Vec::new()
        }
        Msg::CheckoutNext => {
            state.checkout.next();
            state.mark_dirty();
            Vec::new()
        }
        Msg::CheckoutBack => {
            if state.checkout.back() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CheckoutRestarted => {
            state.checkout.restart();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ShippingEdited { field, value } => {
            state.checkout.edit_shipping(field, value);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PaymentMethodSelected(method) => {
            state.checkout.select_payment(method);
            state.mark_dirty();
            Vec::new()
        }
        Msg::PayNowClicked => pay_now(&mut state),
        Msg::OrderCompleted(result) => order_completed(&mut state, result),
        Msg::AlertDismissed => {
            state.set_alert(None);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Starts a new session unless `next` equals the live session's criteria.
fn change_criteria(state: &mut StorefrontState, next: SearchCriteria) -> Vec<Effect> {
    if state
        .search()
        .is_some_and(|session| session.criteria() == &next)
    {
        return Vec::new();
    }
    let request = state.open_search(next);
    store_debug!("criteria changed, now {}", request.generation);
    vec![Effect::FetchPage(request)]
}

fn cart_changed(state: &mut StorefrontState) -> Vec<Effect> {
    state.mark_dirty();
    vec![Effect::PersistCart {
        lines: state.cart().lines().to_vec(),
    }]
}

fn pay_now(state: &mut StorefrontState) -> Vec<Effect> {
    if state.checkout().step() != CheckoutStep::Payment || state.checkout().is_submitting() {
        return Vec::new();
    }
    if state.cart().is_empty() {
        state.set_alert(Some(Alert::error(CART_EMPTY)));
        return Vec::new();
    }
    match state.checkout.begin_submit(&state.cart) {
        Some(order) => {
            state.set_alert(None);
            state.mark_dirty();
            vec![Effect::SubmitOrder { order }]
        }
        None => Vec::new(),
    }
}

fn order_completed(
    state: &mut StorefrontState,
    result: Result<OrderConfirmation, crate::ErrorInfo>,
) -> Vec<Effect> {
    if !state.checkout().is_submitting() {
        store_warn!("order completion arrived with no submission pending");
        return Vec::new();
    }
    match result {
        Ok(confirmation) if confirmation.is_success => {
            state.checkout.finish_submit(true);
            state.cart.clear();
            state.set_alert(Some(Alert::success(ORDER_PLACED)));
            cart_changed(state)
        }
        Ok(confirmation) => {
            state.checkout.finish_submit(false);
            let message = confirmation
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| CHECKOUT_FAILED.to_string());
            state.set_alert(Some(Alert::error(message)));
            state.mark_dirty();
            Vec::new()
        }
        Err(error) => {
            store_warn!("order submission failed: {}", error);
            state.checkout.finish_submit(false);
            state.set_alert(Some(Alert::error(CHECKOUT_FAILED)));
            state.mark_dirty();
            Vec::new()
        }
    }
}
