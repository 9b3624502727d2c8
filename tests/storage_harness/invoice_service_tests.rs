//! Macro-generated test suite for `InvoiceService` contract validation.
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: unknown id is `NotFound`
//! - `test_update_partial`: only supplied fields change
//! - `test_update_nonexistent`: unknown id is `NotFound`
//! - `test_update_empty_patch`: no-op on existing, `NotFound` on unknown
//! - `test_delete_twice`: second delete is `NotFound` again
//! - `test_duplicate_numbers_allowed`: numbers are not unique
//!
//! ## Query
//! - `test_list_empty`
//! - `test_list_order_due_date_desc`
//! - `test_list_search_name_and_number`
//! - `test_list_status_filter`
//! - `test_list_search_and_status`
//! - `test_list_search_is_literal`
//! - `test_pending_invoice_scenario`
//!
//! ## Edge Cases
//! - `test_concurrent_access`: parallel creates from spawned tasks

/// Generate a full `InvoiceService` conformance test suite.
///
/// `$factory` is re-evaluated for each test to ensure isolation. The
/// returned service must also implement `Clone + 'static` for the
/// concurrent access test.
#[macro_export]
macro_rules! invoice_service_tests {
    ($factory:expr) => {
        mod invoice_service_contract_tests {
            use super::*;
            use invoice_desk::core::invoice::{InvoicePatch, InvoiceStatus, StatusFilter};
            use invoice_desk::core::query::InvoiceQuery;
            use invoice_desk::core::service::InvoiceService;
            use uuid::Uuid;

            async fn seeded<S: InvoiceService>(service: &S) -> Vec<Uuid> {
                let mut ids = Vec::new();
                for d in sample_drafts() {
                    ids.push(service.create(d).await.unwrap());
                }
                ids
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let d = draft("Internet Subscription", "INV202501", "2025-01-13", "582901", InvoiceStatus::Paid);

                let id = service.create(d.clone()).await.unwrap();
                let stored = service.get(&id).await.unwrap();

                assert_eq!(stored, d.into_invoice(id));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                let err = service.get(&Uuid::new_v4()).await.unwrap_err();
                assert!(err.is_not_found(), "expected NotFound, got {err}");
            }

            #[tokio::test]
            async fn test_update_partial() {
                let service = $factory;
                let ids = seeded(&service).await;

                let patch = InvoicePatch {
                    amount: Some("450000".to_string()),
                    status: Some(InvoiceStatus::Paid),
                    ..Default::default()
                };
                service.update(&ids[2], patch).await.unwrap();

                let updated = service.get(&ids[2]).await.unwrap();
                assert_eq!(updated.amount, "450000");
                assert_eq!(updated.status, InvoiceStatus::Paid);
                assert_eq!(updated.name, "Gym Membership");
                assert_eq!(updated.number, "INV202503");
                assert_eq!(updated.due_date, "2025-02-23");

                let untouched = service.get(&ids[3]).await.unwrap();
                assert_eq!(untouched.status, InvoiceStatus::Pending);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let patch = InvoicePatch {
                    name: Some("Ghost".to_string()),
                    ..Default::default()
                };
                let err = service.update(&Uuid::new_v4(), patch).await.unwrap_err();
                assert!(err.is_not_found());
            }

            #[tokio::test]
            async fn test_update_empty_patch() {
                let service = $factory;
                let ids = seeded(&service).await;

                service.update(&ids[0], InvoicePatch::default()).await.unwrap();
                assert_eq!(service.get(&ids[0]).await.unwrap().name, "Internet Subscription");

                let err = service
                    .update(&Uuid::new_v4(), InvoicePatch::default())
                    .await
                    .unwrap_err();
                assert!(err.is_not_found());
            }

            #[tokio::test]
            async fn test_delete_twice() {
                let service = $factory;
                let ids = seeded(&service).await;

                service.delete(&ids[1]).await.unwrap();
                assert!(service.get(&ids[1]).await.unwrap_err().is_not_found());
                assert!(service.delete(&ids[1]).await.unwrap_err().is_not_found());
                assert!(service.delete(&ids[1]).await.unwrap_err().is_not_found());

                let remaining = service.list(&InvoiceQuery::default()).await.unwrap();
                assert_eq!(remaining.len(), 3);
            }

            #[tokio::test]
            async fn test_duplicate_numbers_allowed() {
                let service = $factory;
                let d = draft("Phone Bill", "INV202504", "2025-02-23", "148891", InvoiceStatus::Pending);

                let first = service.create(d.clone()).await.unwrap();
                let second = service.create(d).await.unwrap();

                assert_ne!(first, second);
                let found = service
                    .list(&InvoiceQuery::new("INV202504", StatusFilter::All))
                    .await
                    .unwrap();
                assert_eq!(found.len(), 2);
            }

            // ==================================================================
            // Query
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let all = service.list(&InvoiceQuery::default()).await.unwrap();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_list_order_due_date_desc() {
                let service = $factory;
                seeded(&service).await;

                let all = service.list(&InvoiceQuery::default()).await.unwrap();
                let numbers = numbers(&all);
                assert_eq!(numbers.len(), 4);

                // The two invoices due 2025-02-23 come first, in either order
                let mut latest = numbers[..2].to_vec();
                latest.sort();
                assert_eq!(latest, vec!["INV202503", "INV202504"]);
                assert_eq!(&numbers[2..], &["INV202502", "INV202501"]);
            }

            #[tokio::test]
            async fn test_list_search_name_and_number() {
                let service = $factory;
                seeded(&service).await;

                let bills = service
                    .list(&InvoiceQuery::new("BILL", StatusFilter::All))
                    .await
                    .unwrap();
                assert_eq!(numbers(&bills), vec!["INV202504", "INV202502"]);

                let by_number = service
                    .list(&InvoiceQuery::new("inv202501", StatusFilter::All))
                    .await
                    .unwrap();
                assert_eq!(by_number.len(), 1);
                assert_eq!(by_number[0].name, "Internet Subscription");
            }

            #[tokio::test]
            async fn test_list_status_filter() {
                let service = $factory;
                seeded(&service).await;

                let paid = service
                    .list(&InvoiceQuery::new("", StatusFilter::Paid))
                    .await
                    .unwrap();
                assert_eq!(numbers(&paid), vec!["INV202502", "INV202501"]);
                assert!(paid.iter().all(|i| i.status == InvoiceStatus::Paid));

                let unpaid = service
                    .list(&InvoiceQuery::new("", StatusFilter::Unpaid))
                    .await
                    .unwrap();
                assert_eq!(numbers(&unpaid), vec!["INV202503"]);
            }

            #[tokio::test]
            async fn test_list_search_and_status() {
                let service = $factory;
                seeded(&service).await;

                let result = service
                    .list(&InvoiceQuery::new("bill", StatusFilter::Pending))
                    .await
                    .unwrap();
                assert_eq!(numbers(&result), vec!["INV202504"]);

                let none = service
                    .list(&InvoiceQuery::new("gym", StatusFilter::Paid))
                    .await
                    .unwrap();
                assert!(none.is_empty());
            }

            #[tokio::test]
            async fn test_list_search_is_literal() {
                let service = $factory;
                seeded(&service).await;
                service
                    .create(draft("Repair (urgent)", "INV202505", "2025-03-01", "90000", InvoiceStatus::Unpaid))
                    .await
                    .unwrap();

                let found = service
                    .list(&InvoiceQuery::new("(urgent", StatusFilter::All))
                    .await
                    .unwrap();
                assert_eq!(numbers(&found), vec!["INV202505"]);

                let dot = service
                    .list(&InvoiceQuery::new(".*", StatusFilter::All))
                    .await
                    .unwrap();
                assert!(dot.is_empty(), "'.*' must not act as a pattern");
            }

            #[tokio::test]
            async fn test_pending_invoice_scenario() {
                let service = $factory;
                let id = service
                    .create(draft("Internet Subscription", "INV202501", "2025-01-13", "582901", InvoiceStatus::Pending))
                    .await
                    .unwrap();

                let pending = service
                    .list(&InvoiceQuery::new("", StatusFilter::Pending))
                    .await
                    .unwrap();
                assert_eq!(pending.len(), 1);
                assert_eq!(pending[0].id, id);
                assert_eq!(pending[0].formatted_amount().as_deref(), Some("Rp 582.901"));

                let paid = service
                    .list(&InvoiceQuery::new("", StatusFilter::Paid))
                    .await
                    .unwrap();
                assert!(paid.is_empty());
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_access() {
                let service = $factory;
                let s1 = service.clone();
                let s2 = service.clone();

                let h1 = tokio::spawn(async move {
                    s1.create(draft("Concurrent A", "INV250101", "2025-01-01", "1", InvoiceStatus::Paid)).await
                });
                let h2 = tokio::spawn(async move {
                    s2.create(draft("Concurrent B", "INV250102", "2025-01-02", "2", InvoiceStatus::Unpaid)).await
                });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent creates timed out after 30s - possible deadlock");

                let id1 = r1.unwrap();
                let id2 = r2.unwrap();

                let all = service.list(&InvoiceQuery::default()).await.unwrap();
                let ids: Vec<Uuid> = all.iter().map(|i| i.id).collect();
                assert_eq!(ids, vec![id2, id1]);
            }
        }
    };
}
