//! REST integration test macro for storage backends.
//!
//! The `rest_integration_tests!` macro generates HTTP-level tests that validate
//! an `InvoiceService` through full REST round-trips:
//! JSON → HTTP request → handler → InvoiceService → HTTP response → JSON.

/// Generate a REST integration test suite for a storage backend.
///
/// `$factory` must produce an `impl InvoiceService + 'static`.
///
/// # Generated Tests
///
/// ## CRUD
/// - `test_rest_create`: POST 201 + id, then GET 200
/// - `test_rest_list_filters`: search and status query parameters
/// - `test_rest_update_partial`: PUT keeps the fields not supplied
/// - `test_rest_delete_twice`: DELETE 200, then 404
///
/// ## Error handling
/// - `test_rest_create_invalid`: 422 with one message per failing field
/// - `test_rest_update_invalid`: 422 for a supplied field only
/// - `test_rest_error_not_found`: GET/PUT unknown id → 404
/// - `test_rest_error_invalid_uuid`: garbage id → 400
/// - `test_rest_error_unknown_status`: unknown status filter → 400
/// - `test_rest_error_malformed_json`: body that is not JSON → 400
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum_test::TestServer;
            use invoice_desk::server::ServerBuilder;
            use serde_json::{Value, json};

            async fn make_server() -> TestServer {
                let router = ServerBuilder::new().with_service($factory).build().unwrap();
                TestServer::new(router)
            }

            async fn create(server: &TestServer, body: Value) -> String {
                let response = server.post("/invoices").json(&body).await;
                response.assert_status(axum::http::StatusCode::CREATED);
                let body: Value = response.json();
                body["id"].as_str().expect("id in response").to_string()
            }

            async fn seed(server: &TestServer) -> Vec<String> {
                let mut ids = Vec::new();
                for d in sample_drafts() {
                    ids.push(create(server, serde_json::to_value(&d).unwrap()).await);
                }
                ids
            }

            // ==============================================================
            // CRUD
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create() {
                let server = make_server().await;

                let id = create(
                    &server,
                    invoice_json("Internet Subscription", "INV202501", "2025-01-13", "582901", "Pending"),
                )
                .await;

                let response = server.get(&format!("/invoices/{}", id)).await;
                response.assert_status_ok();
                let invoice: Value = response.json();
                assert_eq!(invoice["id"], id);
                assert_eq!(invoice["name"], "Internet Subscription");
                assert_eq!(invoice["dueDate"], "2025-01-13");
                assert_eq!(invoice["amount"], "582901");
                assert_eq!(invoice["status"], "Pending");
            }

            #[tokio::test]
            async fn test_rest_list_filters() {
                let server = make_server().await;
                seed(&server).await;

                let all: Vec<Value> = server.get("/invoices").await.json();
                assert_eq!(all.len(), 4);

                let response = server
                    .get("/invoices")
                    .add_query_param("search", "bill")
                    .add_query_param("status", "Paid")
                    .await;
                response.assert_status_ok();
                let paid_bills: Vec<Value> = response.json();
                assert_eq!(paid_bills.len(), 1);
                assert_eq!(paid_bills[0]["number"], "INV202502");

                let everything: Vec<Value> = server
                    .get("/invoices")
                    .add_query_param("status", "all")
                    .await
                    .json();
                assert_eq!(everything.len(), 4);

                let nothing: Vec<Value> = server
                    .get("/invoices")
                    .add_query_param("search", "water")
                    .await
                    .json();
                assert!(nothing.is_empty());
            }

            #[tokio::test]
            async fn test_rest_update_partial() {
                let server = make_server().await;
                let ids = seed(&server).await;

                let response = server
                    .put(&format!("/invoices/{}", ids[2]))
                    .json(&json!({ "status": "Paid" }))
                    .await;
                response.assert_status_ok();
                response.assert_json(&json!({ "message": "Invoice updated successfully" }));

                let invoice: Value = server.get(&format!("/invoices/{}", ids[2])).await.json();
                assert_eq!(invoice["status"], "Paid");
                assert_eq!(invoice["name"], "Gym Membership");
                assert_eq!(invoice["amount"], "425000");
            }

            #[tokio::test]
            async fn test_rest_delete_twice() {
                let server = make_server().await;
                let ids = seed(&server).await;
                let path = format!("/invoices/{}", ids[0]);

                let response = server.delete(&path).await;
                response.assert_status_ok();
                response.assert_json(&json!({ "message": "Invoice deleted successfully" }));

                server
                    .delete(&path)
                    .expect_failure()
                    .await
                    .assert_status_not_found();
                server
                    .get(&path)
                    .expect_failure()
                    .await
                    .assert_status_not_found();
            }

            // ==============================================================
            // Error handling
            // ==============================================================

            #[tokio::test]
            async fn test_rest_create_invalid() {
                let server = make_server().await;

                let response = server
                    .post("/invoices")
                    .json(&invoice_json("", "INV12", "", "12.50", "Overdue"))
                    .expect_failure()
                    .await;
                response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

                let body: Value = response.json();
                assert_eq!(body["code"], "VALIDATION_ERROR");
                let fields = &body["details"]["fields"];
                assert_eq!(fields["name"], "Invoice name is required");
                assert_eq!(fields["number"], "Invoice number must start with INV followed by 6 digits");
                assert_eq!(fields["dueDate"], "Due date is required");
                assert_eq!(fields["amount"], "Amount must be a number without decimals");
                assert_eq!(fields["status"], "Please select a valid status");

                let all: Vec<Value> = server.get("/invoices").await.json();
                assert!(all.is_empty(), "invalid invoices are never stored");
            }

            #[tokio::test]
            async fn test_rest_update_invalid() {
                let server = make_server().await;
                let ids = seed(&server).await;

                let response = server
                    .put(&format!("/invoices/{}", ids[0]))
                    .json(&json!({ "amount": "1e5" }))
                    .expect_failure()
                    .await;
                response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

                let body: Value = response.json();
                let fields = body["details"]["fields"].as_object().unwrap();
                assert_eq!(fields.len(), 1);
                assert_eq!(fields["amount"], "Amount must be a number without decimals");
            }

            #[tokio::test]
            async fn test_rest_error_not_found() {
                let server = make_server().await;
                let path = format!("/invoices/{}", uuid::Uuid::new_v4());

                let response = server.get(&path).expect_failure().await;
                response.assert_status_not_found();
                let body: Value = response.json();
                assert_eq!(body["code"], "INVOICE_NOT_FOUND");

                server
                    .put(&path)
                    .json(&json!({ "name": "Ghost" }))
                    .expect_failure()
                    .await
                    .assert_status_not_found();
            }

            #[tokio::test]
            async fn test_rest_error_invalid_uuid() {
                let server = make_server().await;

                let response = server.get("/invoices/not-a-uuid").expect_failure().await;
                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_ID");

                server
                    .delete("/invoices/123")
                    .expect_failure()
                    .await
                    .assert_status_bad_request();
            }

            #[tokio::test]
            async fn test_rest_error_unknown_status() {
                let server = make_server().await;

                let response = server
                    .get("/invoices")
                    .add_query_param("status", "Overdue")
                    .expect_failure()
                    .await;
                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_QUERY");
            }

            #[tokio::test]
            async fn test_rest_error_malformed_json() {
                let server = make_server().await;

                let response = server
                    .post("/invoices")
                    .text("{not json")
                    .content_type("application/json")
                    .expect_failure()
                    .await;
                response.assert_status_bad_request();
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_JSON");
            }
        }
    };
}
