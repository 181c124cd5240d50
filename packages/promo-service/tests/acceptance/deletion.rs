use uuid::Uuid;

use promo_service::{Error, NotificationKind};

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn delete_removes_promotions_and_is_idempotent() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping delete_removes_promotions_and_is_idempotent; set PROMO_PG_DSN to run.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let query_id =
		super::create(&service, "gloves", vec![super::page_item(1), super::page_item(2)]).await;
	let confirmation =
		service.delete_confirmation(&query_id.to_string()).await.expect("Confirmation failed.");

	assert_eq!(confirmation.query.query_string, "gloves");
	assert_eq!(confirmation.promotion_count, 2);

	let first = service.delete(&query_id.to_string()).await.expect("First delete failed.");

	assert_eq!(first.deleted, 2);
	assert_eq!(first.redirect_to, "/admin/searchpicks/");
	assert_eq!(first.notification.kind, NotificationKind::Success);
	assert_eq!(first.notification.text, "Editor's picks deleted.");
	assert!(first.notification.link.is_none());

	let second = service.delete(&query_id.to_string()).await.expect("Second delete failed.");

	assert_eq!(second.deleted, 0);
	assert!(super::promotions_of(&service, query_id).await.is_empty());
	assert_eq!(super::query_string_of(&service, query_id).await, "gloves");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set PROMO_PG_DSN to run."]
async fn unknown_or_malformed_ids_are_not_found() {
	let Some(test_db) = super::test_db().await else {
		eprintln!("Skipping unknown_or_malformed_ids_are_not_found; set PROMO_PG_DSN to run.");

		return;
	};
	let service = super::build_service(&test_db).await;
	let unknown = Uuid::new_v4().to_string();

	assert!(matches!(service.delete(&unknown).await, Err(Error::NotFound { .. })));
	assert!(matches!(service.delete("not-a-uuid").await, Err(Error::NotFound { .. })));
	assert!(matches!(service.delete_confirmation(&unknown).await, Err(Error::NotFound { .. })));
	assert!(matches!(service.edit_form("42").await, Err(Error::NotFound { .. })));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
