use promo_service::ListRequest;

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn created_query_is_found_by_a_partial_filter() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping created_query_is_found_by_a_partial_filter; set PROMO_PG_DSN to run.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let query_id = super::create(&service, "shoes", vec![super::page_item(1)]).await;

	super::create(&service, "hats", vec![super::page_item(2)]).await;

	let filtered = service
		.list(ListRequest { q: Some("shoe".to_string()), p: None })
		.await
		.expect("List failed.");

	assert!(filtered.is_searching);
	assert_eq!(filtered.query_string.as_deref(), Some("shoe"));
	assert_eq!(filtered.items.len(), 1);
	assert_eq!(filtered.items[0].query_id, query_id);
	assert_eq!(filtered.items[0].promotion_count, 1);

	let all = service.list(ListRequest::default()).await.expect("List failed.");
	let strings: Vec<&str> = all.items.iter().map(|item| item.query_string.as_str()).collect();

	assert!(!all.is_searching);
	assert_eq!(strings, vec!["hats", "shoes"]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn page_requests_are_clamped() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping page_requests_are_clamped; set PROMO_PG_DSN to run.");

		return;
	};
	let service = super::build_service(&test_db).await;

	for n in 0..25 {
		super::create(&service, &format!("term {n:02}"), vec![super::page_item(n + 1)]).await;
	}

	let last = service
		.list(ListRequest { q: None, p: Some("99".to_string()) })
		.await
		.expect("List failed.");

	assert_eq!(last.page.number, 2);
	assert_eq!(last.page.num_pages, 2);
	assert_eq!(last.page.count, 25);
	assert_eq!(last.items.len(), 5);
	assert!(last.page.has_previous);
	assert!(!last.page.has_next);

	for raw in ["abc", "0", "-3", ""] {
		let first = service
			.list(ListRequest { q: None, p: Some(raw.to_string()) })
			.await
			.expect("List failed.");

		assert_eq!(first.page.number, 1, "Page {raw:?} should resolve to 1.");
		assert_eq!(first.items.len(), 20);
	}

	let empty = service
		.list(ListRequest { q: Some("nothing matches".to_string()), p: Some("3".to_string()) })
		.await
		.expect("List failed.");

	assert_eq!(empty.page.number, 1);
	assert_eq!(empty.page.num_pages, 1);
	assert!(empty.items.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
