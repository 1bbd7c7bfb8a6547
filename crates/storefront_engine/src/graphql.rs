use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use storefront_core::{OrderConfirmation, OrderInput, Product, SearchCriteria};

use crate::{ApiError, FailureKind};

pub const SEARCH_PRODUCTS_QUERY: &str = r#"
query SearchProducts($query: String!, $category: String, $sortBy: String, $minPrice: Float, $maxPrice: Float, $limit: Int, $page: Int) {
  searchProducts(query: $query, category: $category, sortBy: $sortBy, minPrice: $minPrice, maxPrice: $maxPrice, limit: $limit, page: $page) {
    id
    productName
    category
    imageUrl
    desc
    price
  }
}
"#;

pub const CREATE_ORDER_MUTATION: &str = r#"
mutation CreateOrder($input: OrderInput) {
  createOrder(input: $input) {
    isSuccess
    message
  }
}
"#;

#[derive(Debug, Serialize)]
pub(crate) struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

pub(crate) fn search_request(criteria: &SearchCriteria, page: u32) -> GraphqlRequest<'static> {
    let (min_price, max_price) = criteria.price_range();
    GraphqlRequest {
        query: SEARCH_PRODUCTS_QUERY,
        variables: json!({
            "query": criteria.query_text(),
            "category": criteria.category(),
            "sortBy": criteria.sort_key().as_wire(),
            "minPrice": min_price,
            "maxPrice": max_price,
            "limit": criteria.page_size(),
            "page": page,
        }),
    }
}

pub(crate) fn create_order_request(order: &OrderInput) -> GraphqlRequest<'static> {
    let shipping = &order.shipping;
    let items: Vec<Value> = order
        .items
        .iter()
        .map(|item| {
            json!({
                "productId": item.product_id.as_str(),
                "quantity": item.quantity,
            })
        })
        .collect();
    GraphqlRequest {
        query: CREATE_ORDER_MUTATION,
        variables: json!({
            "input": {
                "shippingInfo": {
                    "name": shipping.name,
                    "phone": shipping.phone,
                    "email": shipping.email,
                    "address": shipping.address,
                    "country": shipping.country,
                },
                "items": items,
                "paymentMethod": order.payment_method.as_wire(),
            }
        }),
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    #[serde(default)]
    search_products: Option<Vec<WireProduct>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProduct {
    id: WireId,
    #[serde(default)]
    product_name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    price: Option<f64>,
}

/// GraphQL `ID` may arrive as a string or a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl WireProduct {
    fn into_product(self) -> Product {
        let id = match self.id {
            WireId::Text(text) => text,
            WireId::Number(number) => number.to_string(),
        };
        let mut product = Product::new(id, self.product_name, price_to_cents(self.price));
        product.category = self.category.unwrap_or_default();
        product.image_url = self.image_url.filter(|url| !url.is_empty());
        product.description = self.desc;
        product
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateOrderData {
    create_order: Option<WireOrderResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOrderResult {
    #[serde(default)]
    is_success: bool,
    #[serde(default)]
    message: Option<String>,
}

fn price_to_cents(price: Option<f64>) -> u64 {
    match price {
        Some(value) if value.is_finite() && value > 0.0 => (value * 100.0).round() as u64,
        _ => 0,
    }
}

fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let envelope: GraphqlResponse<T> = serde_json::from_slice(body)
        .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
    if !envelope.errors.is_empty() {
        let message = envelope
            .errors
            .into_iter()
            .map(|entry| entry.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ApiError::new(FailureKind::GraphQl, message));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::new(FailureKind::Decode, "response has no data"))
}

/// A missing or null `searchProducts` list is treated as an empty page.
pub(crate) fn decode_search_response(body: &[u8]) -> Result<Vec<Product>, ApiError> {
    let data: SearchData = decode_envelope(body)?;
    Ok(data
        .search_products
        .unwrap_or_default()
        .into_iter()
        .map(WireProduct::into_product)
        .collect())
}

pub(crate) fn decode_order_response(body: &[u8]) -> Result<OrderConfirmation, ApiError> {
    let data: CreateOrderData = decode_envelope(body)?;
    let result = data
        .create_order
        .ok_or_else(|| ApiError::new(FailureKind::Decode, "createOrder returned null"))?;
    Ok(OrderConfirmation {
        is_success: result.is_success,
        message: result.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_maps_wire_fields() {
        let body = br#"{"data":{"searchProducts":[
            {"id":"a1","productName":"Milk","category":"Milk_and_Diary","imageUrl":"","desc":"Fresh","price":1.25},
            {"id":7,"productName":"Bread","price":null}
        ]}}"#;

        let products = decode_search_response(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id.as_str(), "a1");
        assert_eq!(products[0].price_cents, 125);
        assert_eq!(products[0].image_url, None);
        assert_eq!(products[0].description.as_deref(), Some("Fresh"));
        assert_eq!(products[1].id.as_str(), "7");
        assert_eq!(products[1].price_cents, 0);
    }

    #[test]
    fn graphql_errors_win_over_data() {
        let body = br#"{"data":null,"errors":[{"message":"bad category"},{"message":"try again"}]}"#;
        let err = decode_search_response(body).unwrap_err();
        assert_eq!(err.kind, FailureKind::GraphQl);
        assert_eq!(err.message, "bad category; try again");
    }

    #[test]
    fn search_variables_carry_every_criteria_field() {
        let criteria = SearchCriteria::new("milk")
            .with_category("Dairy")
            .with_sort(storefront_core::SortKey::PriceDesc)
            .with_price_range(5, 50)
            .with_page_size(12);
        let request = search_request(&criteria, 3);
        assert_eq!(
            request.variables,
            json!({
                "query": "milk",
                "category": "Dairy",
                "sortBy": "priceHighLow",
                "minPrice": 5,
                "maxPrice": 50,
                "limit": 12,
                "page": 3,
            })
        );
    }
}
