use promo_service::{NotificationKind, PromotionInput, SubmitRequest, SubmitResponse};

const MINIMUM: &str = "Please specify at least one recommendation for this search term.";

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn create_without_promotions_writes_nothing() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping create_without_promotions_writes_nothing; set PROMO_PG_DSN to run.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let response = service
		.create(SubmitRequest {
			query_string: "umbrellas".to_string(),
			items: vec![PromotionInput::default()],
		})
		.await
		.expect("Create failed.");
	let SubmitResponse::Form(form) = response else {
		panic!("Expected the form to be re-rendered, got {response:?}.");
	};
	let notification = form.notification.expect("Expected an error notification.");

	assert_eq!(notification.kind, NotificationKind::Error);
	assert_eq!(notification.text, MINIMUM);
	assert_eq!(form.collection_errors, vec![MINIMUM.to_string()]);
	assert_eq!(super::query_count(&service).await, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn deleting_every_row_in_an_edit_is_rejected() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping deleting_every_row_in_an_edit_is_rejected; set PROMO_PG_DSN to run.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let query_id =
		super::create(&service, "scarves", vec![super::page_item(1), super::page_item(2)]).await;
	let before = super::promotions_of(&service, query_id).await;
	let items = before
		.iter()
		.map(|row| PromotionInput { delete: true, ..super::existing_item(row) })
		.collect();
	let response = service
		.edit(&query_id.to_string(), SubmitRequest { query_string: "wraps".to_string(), items })
		.await
		.expect("Edit failed.");

	assert!(matches!(response, SubmitResponse::Form(_)));
	assert_eq!(super::promotions_of(&service, query_id).await, before);
	assert_eq!(super::query_string_of(&service, query_id).await, "scarves");
	assert_eq!(super::query_count(&service).await, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn query_field_errors_are_reported_without_a_notification() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping query_field_errors_are_reported_without_a_notification; set PROMO_PG_DSN.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let response = service
		.create(SubmitRequest { query_string: "?!".to_string(), items: vec![super::page_item(1)] })
		.await
		.expect("Create failed.");
	let SubmitResponse::Form(form) = response else {
		panic!("Expected the form to be re-rendered, got {response:?}.");
	};

	assert!(form.notification.is_none());
	assert_eq!(form.query_errors, vec!["Enter a search term containing letters or numbers."]);
	assert_eq!(form.items.len(), 1);
	assert_eq!(form.items[0].input.page_id, Some(1));
	assert_eq!(super::query_count(&service).await, 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
