//! Word-of-the-day item maintenance.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::enums::{ItemStatus, RotationMode};
use super::helpers::*;

#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn items_can_be_filtered_by_status() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let service = create_db_test_service(&test_db.url()).await;

    let created = TestRequest::post(&wotd_path(""))
        .json(json!({
            "title": "Courage",
            "text": "Be strong and courageous.",
            "attribution": "Joshua 1:9",
            "status": "published",
            "tags": ["strength", " strength ", "faith"],
        }))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["tags"], json!(["strength", "faith"]));

    #[expect(unused_must_use)]
    TestRequest::post(&wotd_path(""))
        .json(json!({ "title": "Unfinished", "text": "Draft text" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);

    let published = TestRequest::get(&wotd_path("?status=published"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let titles: Vec<&str> = published
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["Courage"]);

    #[expect(unused_must_use)]
    TestRequest::get(&wotd_path("?status=archived"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

/// ## Summary
/// Removing the current item clears it from the rotation and drops entries
/// that targeted it.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn deleting_an_item_clears_rotation_references() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let item = test_db.seed_word("Faith", ItemStatus::Published).await.expect("seed");
    test_db
        .set_rotation(Some(item), RotationMode::Fixed, None, None)
        .await
        .expect("seed rotation");
    test_db
        .seed_schedule_entry(
            RotationMode::Fixed,
            chrono::Utc::now() + chrono::Duration::days(1),
            Some(item),
        )
        .await
        .expect("seed entry");

    let service = create_db_test_service(&test_db.url()).await;
    #[expect(unused_must_use)]
    TestRequest::delete(&wotd_path(&format!("/{item}")))
        .send(&service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert_eq!(test_db.rotation().await.expect("rotation").current_id, None);
    assert_eq!(test_db.count_schedule_entries().await.expect("count"), 0);

    let current = TestRequest::get(&wotd_path("/current"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(current["fallback"], true);
}
