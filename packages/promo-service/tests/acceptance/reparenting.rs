use promo_service::{SubmitRequest, SubmitResponse};

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn renaming_a_query_moves_every_promotion_to_the_target() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping renaming_a_query_moves_every_promotion_to_the_target; set PROMO_PG_DSN.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let old_id =
		super::create(&service, "trainers", vec![super::page_item(1), super::page_item(2)]).await;
	let new_id = super::create(&service, "sneakers", vec![super::page_item(3)]).await;
	let untouched = super::promotions_of(&service, new_id).await.remove(0);
	let items = super::promotions_of(&service, old_id).await.iter().map(super::existing_item).collect();
	let response = service
		.edit(&old_id.to_string(), SubmitRequest { query_string: "Sneakers!".to_string(), items })
		.await
		.expect("Edit failed.");
	let SubmitResponse::Redirect(redirect) = response else {
		panic!("Expected edit to redirect, got {response:?}.");
	};

	assert_eq!(redirect.redirect_to, format!("/admin/searchpicks/{new_id}/"));
	assert_eq!(redirect.notification.text, "Editor's picks for 'sneakers' updated.");
	assert!(super::promotions_of(&service, old_id).await.is_empty());
	// The old query row is kept, only its promotions move.
	assert_eq!(super::query_string_of(&service, old_id).await, "trainers");

	let moved = super::promotions_of(&service, new_id).await;
	let mut pages: Vec<i64> = moved.iter().filter_map(|row| row.page_id).collect();

	pages.sort_unstable();

	assert_eq!(pages, vec![1, 2, 3]);
	assert_eq!(moved.iter().find(|row| row.promotion_id == untouched.promotion_id), Some(&untouched));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn renaming_to_a_fresh_query_creates_it() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping renaming_to_a_fresh_query_creates_it; set PROMO_PG_DSN to run.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let old_id = super::create(&service, "jumpers", vec![super::page_item(7)]).await;
	let items = super::promotions_of(&service, old_id).await.iter().map(super::existing_item).collect();
	let response = service
		.edit(&old_id.to_string(), SubmitRequest { query_string: "sweaters".to_string(), items })
		.await
		.expect("Edit failed.");
	let SubmitResponse::Redirect(redirect) = response else {
		panic!("Expected edit to redirect, got {response:?}.");
	};
	let list = service
		.list(promo_service::ListRequest { q: Some("sweat".to_string()), p: None })
		.await
		.expect("List failed.");

	assert_eq!(list.items.len(), 1);
	assert_eq!(list.items[0].query_string, "sweaters");
	assert_eq!(redirect.redirect_to, format!("/admin/searchpicks/{}/", list.items[0].query_id));
	assert_eq!(super::query_count(&service).await, 2);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
