use promo_service::{NotificationKind, PromotionInput, SubmitRequest, SubmitResponse};

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn edit_rederives_dense_sort_order_from_submitted_order() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping edit_rederives_dense_sort_order_from_submitted_order; set PROMO_PG_DSN.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let query_id = super::create(
		&service,
		"shoes",
		vec![super::page_item(1), super::page_item(2), super::page_item(3)],
	)
	.await;
	let rows = super::promotions_of(&service, query_id).await;

	assert_eq!(rows.iter().map(|row| row.sort_order).collect::<Vec<_>>(), vec![0, 1, 2]);

	let items = vec![
		PromotionInput { order: Some(2), ..super::existing_item(&rows[0]) },
		PromotionInput { order: Some(0), ..super::existing_item(&rows[1]) },
		PromotionInput { order: Some(1), ..super::existing_item(&rows[2]) },
	];
	let response = service
		.edit(&query_id.to_string(), SubmitRequest { query_string: "shoes".to_string(), items })
		.await
		.expect("Edit failed.");
	let SubmitResponse::Redirect(redirect) = response else {
		panic!("Expected edit to redirect, got {response:?}.");
	};

	assert_eq!(redirect.redirect_to, format!("/admin/searchpicks/{query_id}/"));
	assert_eq!(redirect.notification.kind, NotificationKind::Success);
	assert_eq!(redirect.notification.text, "Editor's picks for 'shoes' updated.");

	let reordered = super::promotions_of(&service, query_id).await;
	let pages: Vec<Option<i64>> = reordered.iter().map(|row| row.page_id).collect();
	let orders: Vec<i32> = reordered.iter().map(|row| row.sort_order).collect();

	assert_eq!(pages, vec![Some(2), Some(3), Some(1)]);
	assert_eq!(orders, vec![0, 1, 2]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn deleted_rows_are_removed_and_remaining_rows_close_the_gap() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping deleted_rows_are_removed_and_remaining_rows_close_the_gap; set PROMO_PG_DSN.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let query_id = super::create(
		&service,
		"boots",
		vec![
			super::page_item(10),
			super::link_item("https://example.com/sale", "Sale"),
			super::page_item(30),
		],
	)
	.await;
	let rows = super::promotions_of(&service, query_id).await;
	let items = vec![
		super::existing_item(&rows[0]),
		PromotionInput { delete: true, ..super::existing_item(&rows[1]) },
		super::existing_item(&rows[2]),
		super::page_item(40),
	];
	let response = service
		.edit(&query_id.to_string(), SubmitRequest { query_string: "boots".to_string(), items })
		.await
		.expect("Edit failed.");

	assert!(matches!(response, SubmitResponse::Redirect(_)));

	let after = super::promotions_of(&service, query_id).await;
	let pages: Vec<Option<i64>> = after.iter().map(|row| row.page_id).collect();
	let orders: Vec<i32> = after.iter().map(|row| row.sort_order).collect();

	assert_eq!(pages, vec![Some(10), Some(30), Some(40)]);
	assert_eq!(orders, vec![0, 1, 2]);
	assert!(after.iter().all(|row| row.promotion_id != rows[1].promotion_id));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn invalid_rows_are_reported_and_nothing_is_written() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping invalid_rows_are_reported_and_nothing_is_written; set PROMO_PG_DSN.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let query_id = super::create(&service, "hats", vec![super::page_item(5)]).await;
	let before = super::promotions_of(&service, query_id).await;
	let items = vec![
		super::existing_item(&before[0]),
		PromotionInput {
			external_link_url: Some("https://example.com".to_string()),
			..PromotionInput::default()
		},
	];
	let response = service
		.edit(&query_id.to_string(), SubmitRequest { query_string: "caps".to_string(), items })
		.await
		.expect("Edit failed.");
	let SubmitResponse::Form(form) = response else {
		panic!("Expected the form to be re-rendered, got {response:?}.");
	};
	let notification = form.notification.expect("Expected an error notification.");

	assert_eq!(notification.kind, NotificationKind::Error);
	assert_eq!(notification.text, "Recommendations have not been saved due to errors");
	assert!(form.items[0].errors.is_empty());
	assert_eq!(form.items[1].errors[0].field, "external_link_text");
	assert_eq!(form.query_string, "caps");
	assert_eq!(super::promotions_of(&service, query_id).await, before);
	// The rejected target query must not have been created.
	assert_eq!(super::query_count(&service).await, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
