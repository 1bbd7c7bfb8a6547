use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use storefront_core::{
    ErrorKind, OrderInput, OrderItem, PaymentMethod, ProductId, SearchCriteria, ShippingInfo,
};
use storefront_engine::{ClientSettings, FailureKind, GraphqlClient, OrderClient, SearchClient};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GraphqlClient {
    GraphqlClient::new(ClientSettings::new(format!("{}/graphql", server.uri()))).expect("client")
}

#[tokio::test]
async fn search_posts_variables_and_decodes_products() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": { "query": "milk", "category": "Dairy", "limit": 2, "page": 2 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "searchProducts": [
                { "id": "m1", "productName": "Whole milk", "category": "Dairy", "price": 2.5 },
                { "id": "m2", "productName": "Skim milk", "category": "Dairy", "price": 2.0 }
            ]}
        })))
        .mount(&server)
        .await;

    let criteria = SearchCriteria::new("milk")
        .with_category("Dairy")
        .with_page_size(2);
    let page = client_for(&server).search(&criteria, 2).await.expect("search ok");

    assert_eq!(page.page_number, 2);
    let names: Vec<_> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Whole milk", "Skim milk"]);
    assert_eq!(page.items[0].price_cents, 250);
}

#[tokio::test]
async fn graphql_errors_are_server_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Variable \"$query\" of required type \"String!\" was not provided." }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&SearchCriteria::default(), 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::GraphQl);
    assert_eq!(err.to_error_info().kind, ErrorKind::Server);
}

#[tokio::test]
async fn http_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search(&SearchCriteria::new("tea"), 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn slow_server_hits_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "data": { "searchProducts": [] } })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::new(format!("{}/graphql", server.uri()))
    };
    let client = GraphqlClient::new(settings).unwrap();
    let err = client.search(&SearchCriteria::new("tea"), 1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
    assert_eq!(err.to_error_info().kind, ErrorKind::Timeout);
}

#[tokio::test]
async fn create_order_sends_input_and_reads_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "input": {
                "paymentMethod": "cash",
                "items": [{ "productId": "m1", "quantity": 3 }]
            }}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "createOrder": { "isSuccess": true, "message": "ok" } }
        })))
        .mount(&server)
        .await;

    let order = OrderInput {
        shipping: ShippingInfo::default(),
        items: vec![OrderItem {
            product_id: ProductId::new("m1"),
            quantity: 3,
        }],
        payment_method: PaymentMethod::Cash,
    };
    let confirmation = client_for(&server).create_order(&order).await.unwrap();
    assert!(confirmation.is_success);
    assert_eq!(confirmation.message.as_deref(), Some("ok"));
}

#[test]
fn rejects_non_http_endpoint() {
    let err = GraphqlClient::new(ClientSettings::new("ftp://example.com/graphql")).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);

    let err = GraphqlClient::new(ClientSettings::new("not a url")).unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidEndpoint);
}
