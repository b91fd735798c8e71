//! Tests for the entity stores
//!
//! These tests verify the guard → call → normalize-or-report skeleton of
//! `fetch_all`, `create` and `delete_one` for both entity stores.

mod store_harness;

use medoc::prelude::*;
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use store_harness::*;

fn brand_list() -> Value {
    json!([
        {"id": 1, "name": "Aspirin"},
        {"id": 2, "name": "Ibuprofen", "createdAt": "2024-01-15T08:30:00Z"}
    ])
}

fn user_drug(id: i64) -> Value {
    json!({
        "id": id,
        "drugBrand": {"id": 1, "name": "Doliprane"},
        "drugName": {"id": 3, "name": "Paracétamol"},
        "form": "tablet",
        "dose": 1000,
        "note": "max 3 par jour",
        "unit": "mg",
        "expirationDateTime": "2026-05-31T00:00:00Z"
    })
}

// =============================================================================
// Session guard
// =============================================================================

mod guard_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_all_without_token_is_silent_noop() {
        let transport = Arc::new(MockTransport::ok(brand_list()));
        let app = app_with(transport.clone(), SessionStore::new());
        let before = app.drug_brands.items();

        let outcome = app.drug_brands.fetch_all().await;

        assert_eq!(outcome, ActionOutcome::Skipped);
        assert_eq!(transport.call_count(), 0);
        assert!(Arc::ptr_eq(&before, &app.drug_brands.items()));
        assert!(app.toasts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_delete_without_token_are_noops() {
        let transport = Arc::new(MockTransport::ok(json!({"id": 2, "name": "Ibuprofen"})));
        let app = app_with(transport.clone(), SessionStore::new());

        assert_eq!(
            app.drug_brands.create_named("Ibuprofen").await,
            ActionOutcome::Skipped
        );
        assert_eq!(app.user_drugs.delete_one(1).await, ActionOutcome::Skipped);

        assert_eq!(transport.call_count(), 0);
        assert!(app.drug_brands.is_empty());
    }

    #[tokio::test]
    async fn test_token_source_is_consulted_before_the_guard() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        let session = SessionStore::new().with_source(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Some("late-token".to_string())
        });
        let transport = Arc::new(MockTransport::ok(brand_list()));
        let app = app_with(transport.clone(), session);

        assert_eq!(app.drug_brands.fetch_all().await, ActionOutcome::Applied);

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(
            transport.requests()[0].header("Authorization"),
            Some("Bearer late-token")
        );
    }
}

// =============================================================================
// fetch_all
// =============================================================================

mod fetch_all_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_all_normalizes_single_brand() {
        let transport = Arc::new(MockTransport::ok(json!([{"id": 1, "name": "Aspirin"}])));
        let app = app_with(transport.clone(), logged_in());

        assert_eq!(app.drug_brands.fetch_all().await, ActionOutcome::Applied);

        let items = app.drug_brands.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].name, "Aspirin");

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "http://backend.test/api/v1/drug-brand");
        assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn test_fetch_all_keeps_server_order_and_replaces_collection() {
        let transport = Arc::new(MockTransport::ok(brand_list()));
        let app = app_with(transport, logged_in());

        app.drug_brands.fetch_all().await;
        let first = app.drug_brands.items();
        app.drug_brands.fetch_all().await;
        let second = app.drug_brands.items();

        let ids: Vec<i64> = second.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(second[1].created_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_collection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let transport = Arc::new(MockTransport::new(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(brand_list())
            } else {
                Err(TransportError::Status {
                    status_code: 500,
                    status_message: "Internal Server Error".to_string(),
                })
            }
        }));
        let app = app_with(transport, logged_in());

        app.drug_brands.fetch_all().await;
        let before = app.drug_brands.items();

        assert_eq!(app.drug_brands.fetch_all().await, ActionOutcome::Failed);

        assert!(Arc::ptr_eq(&before, &app.drug_brands.items()));
        assert_eq!(app.drug_brands.len(), 2);
        assert_eq!(
            error_toasts(&app),
            vec!["Impossible de récupérer les marques de médicaments"]
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_reported_not_applied() {
        let transport = Arc::new(MockTransport::ok(json!([{"id": "one"}])));
        let app = app_with(transport, logged_in());

        assert_eq!(app.drug_brands.fetch_all().await, ActionOutcome::Failed);

        assert!(app.drug_brands.is_empty());
        assert_eq!(error_toasts(&app).len(), 1);
    }

    #[tokio::test]
    async fn test_non_array_payload_is_reported() {
        let transport = Arc::new(MockTransport::ok(json!({"items": []})));
        let app = app_with(transport, logged_in());

        assert_eq!(app.user_drugs.fetch_all().await, ActionOutcome::Failed);
        assert_eq!(
            error_toasts(&app),
            vec!["Impossible de récupérer vos médicaments"]
        );
    }

    #[tokio::test]
    async fn test_user_drugs_fetch_normalizes_embedded_records() {
        let transport = Arc::new(MockTransport::ok(json!([user_drug(7), user_drug(8)])));
        let app = app_with(transport.clone(), logged_in());

        assert_eq!(app.user_drugs.fetch_all().await, ActionOutcome::Applied);

        let drug = app.user_drugs.get(7).unwrap();
        assert_eq!(drug.drug_brand.name, "Doliprane");
        assert_eq!(drug.drug_name.name, "Paracétamol");
        assert_eq!(drug.unit, DrugUnit::Milligram);
        assert!(drug.expiration_date_time.is_some());
        assert_eq!(
            transport.requests()[0].url,
            "http://backend.test/api/v1/user-drug"
        );
    }
}

// =============================================================================
// create
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_brand_appends_server_entity() {
        let transport = Arc::new(MockTransport::ok(json!({"id": 2, "name": "Ibuprofen"})));
        let app = app_with(transport.clone(), logged_in());

        assert_eq!(
            app.drug_brands.create_named("Ibuprofen").await,
            ActionOutcome::Applied
        );

        let items = app.drug_brands.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.body, Some(json!({"name": "Ibuprofen"})));
        assert_eq!(request.header("Authorization"), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn test_create_appends_after_fetched_items() {
        let transport = Arc::new(MockTransport::new(|request| {
            if request.method == Method::GET {
                Ok(brand_list())
            } else {
                Ok(json!({"id": 3, "name": "Advil"}))
            }
        }));
        let app = app_with(transport, logged_in());

        app.drug_brands.fetch_all().await;
        let snapshot = app.drug_brands.items();
        app.drug_brands.create_named("Advil").await;

        let ids: Vec<i64> = app.drug_brands.items().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(snapshot.len(), 2);
    }

    #[tokio::test]
    async fn test_create_user_drug_appends_and_sends_payload() {
        let transport = Arc::new(MockTransport::ok(user_drug(11)));
        let app = app_with(transport.clone(), logged_in());

        let payload = NewUserDrug {
            drug_brand: DrugBrand::from_json(&json!({"id": 1, "name": "Doliprane"})).unwrap(),
            drug_name: DrugName::normalize(&json!({"id": 3, "name": "Paracétamol"})).unwrap(),
            form: DrugForm::Tablet,
            dose: 1000.0,
            note: Some("max 3 par jour".to_string()),
            unit: DrugUnit::Milligram,
            expiration_date_time: None,
        };

        assert_eq!(app.user_drugs.create(&payload).await, ActionOutcome::Applied);

        assert_eq!(app.user_drugs.len(), 1);
        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["drugBrand"]["name"], "Doliprane");
        assert_eq!(body["note"], "max 3 par jour");
    }

    #[tokio::test]
    async fn test_failed_create_toasts_without_mutation() {
        let app = app_with(Arc::new(MockTransport::status(422, "Unprocessable Entity")), logged_in());

        assert_eq!(
            app.drug_brands.create_named("Ibuprofen").await,
            ActionOutcome::Failed
        );

        assert!(app.drug_brands.is_empty());
        assert_eq!(
            error_toasts(&app),
            vec!["Impossible de créer la marque de médicament"]
        );
    }
}

// =============================================================================
// delete_one
// =============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_prunes_local_entity() {
        let transport = Arc::new(MockTransport::new(|request| {
            if request.method == Method::DELETE {
                Ok(Value::Null)
            } else {
                Ok(brand_list())
            }
        }));
        let app = app_with(transport.clone(), logged_in());
        app.drug_brands.fetch_all().await;

        assert_eq!(app.drug_brands.delete_one(1).await, ActionOutcome::Applied);

        let request = transport.requests().pop().unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url, "http://backend.test/api/v1/drug-brand/1");
        assert_eq!(request.header("Authorization"), Some("Bearer test-token"));

        let ids: Vec<i64> = app.drug_brands.items().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_leaves_collection_identical() {
        let transport = Arc::new(MockTransport::new(|request| {
            if request.method == Method::DELETE {
                Ok(Value::Null)
            } else {
                Ok(brand_list())
            }
        }));
        let app = app_with(transport, logged_in());
        app.drug_brands.fetch_all().await;
        let before = app.drug_brands.items();

        assert_eq!(app.drug_brands.delete_one(99).await, ActionOutcome::Applied);
        assert!(Arc::ptr_eq(&before, &app.drug_brands.items()));
    }

    #[tokio::test]
    async fn test_failed_delete_toasts_entity_message() {
        let app = app_with(Arc::new(MockTransport::network()), logged_in());

        assert_eq!(app.user_drugs.delete_one(4).await, ActionOutcome::Failed);
        assert_eq!(error_toasts(&app), vec!["Suppression impossible"]);
    }
}

// =============================================================================
// Forbidden responses
// =============================================================================

mod forbidden_tests {
    use super::*;

    #[tokio::test]
    async fn test_forbidden_logs_out_once_and_toasts() {
        let session = logged_in();
        let app = app_with(Arc::new(MockTransport::status(403, "Forbidden")), session.clone());

        assert_eq!(app.user_drugs.fetch_all().await, ActionOutcome::Failed);

        assert_eq!(session.logout_count(), 1);
        assert_eq!(
            error_toasts(&app),
            vec!["Impossible de récupérer vos médicaments"]
        );
    }

    #[tokio::test]
    async fn test_after_forbidden_next_action_is_skipped() {
        let session = logged_in();
        let transport = Arc::new(MockTransport::status(403, "Forbidden"));
        let app = app_with(transport.clone(), session.clone());

        app.drug_brands.fetch_all().await;
        assert_eq!(app.drug_brands.fetch_all().await, ActionOutcome::Skipped);

        assert_eq!(transport.call_count(), 1);
        assert_eq!(session.logout_count(), 1);
    }
}

// =============================================================================
// Concurrency
// =============================================================================

mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_creates_all_append() {
        let next_id = Arc::new(AtomicUsize::new(1));
        let ids = next_id.clone();
        let transport = Arc::new(MockTransport::new(move |request| {
            let id = ids.fetch_add(1, Ordering::SeqCst);
            let name = request.body.as_ref().unwrap()["name"].clone();
            Ok(json!({"id": id, "name": name}))
        }));
        let app = app_with(transport.clone(), logged_in());

        let (a, b, c) = futures::join!(
            app.drug_brands.create_named("A"),
            app.drug_brands.create_named("B"),
            app.drug_brands.create_named("C"),
        );

        assert_eq!([a, b, c], [ActionOutcome::Applied; 3]);
        assert_eq!(app.drug_brands.len(), 3);
        assert_eq!(transport.call_count(), 3);
    }
}

// =============================================================================
// Toast queue
// =============================================================================

mod toast_queue_tests {
    use super::*;

    #[tokio::test]
    async fn test_repeated_failures_keep_toast_queue_bounded() {
        let transport = Arc::new(MockTransport::network());
        let app = app_with(transport.clone(), logged_in());
        let _rx = app.toasts.subscribe();

        for _ in 0..200 {
            assert_eq!(app.drug_brands.fetch_all().await, ActionOutcome::Failed);
        }

        assert_eq!(transport.call_count(), 200);
        assert_eq!(app.toasts.messages().len(), app.config.toast_capacity);
    }
}
