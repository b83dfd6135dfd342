//! Ranked spiritual-parent overview.

use salvo::http::StatusCode;
use uuid::Uuid;

use super::helpers::*;

/// ## Summary
/// Parents are ranked by downlines; members without children are left out.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn overview_ranks_by_downlines() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let one = test_db.seed_member("Ana Cruz", None).await.expect("seed");
    let two = test_db.seed_member("Ben Reyes", Some(one)).await.expect("seed");
    test_db.seed_member("Carla Diaz", Some(one)).await.expect("seed");
    test_db.seed_member("Dan Lim", Some(two)).await.expect("seed");

    let service = create_db_test_service(&test_db.url()).await;
    let body = TestRequest::get(&members_path("/spiritual-parents"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let parents = body["spiritualParents"].as_array().expect("array");
    assert_eq!(parents.len(), 2);
    assert_eq!(parents[0]["id"], one.to_string());
    assert_eq!(parents[0]["directChildren"], 2);
    assert_eq!(parents[0]["totalDownlines"], 3);
    assert_eq!(parents[1]["id"], two.to_string());
    assert_eq!(parents[1]["totalDownlines"], 1);

    assert_eq!(body["statistics"]["totalMembers"], 4);
    assert_eq!(body["statistics"]["totalSpiritualParents"], 2);
    assert_eq!(body["statistics"]["averageDownlines"], 2.0);
    assert_eq!(body["pagination"]["total"], 2);
}

/// ## Summary
/// Pages slice the ranked list; the statistics still cover every parent.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn overview_is_paginated() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    for name in ["Ana", "Ben", "Carla"] {
        let parent = test_db.seed_member(name, None).await.expect("seed");
        test_db
            .seed_member(&format!("{name} Junior"), Some(parent))
            .await
            .expect("seed");
    }

    let service = create_db_test_service(&test_db.url()).await;
    let body = TestRequest::get(&members_path("/spiritual-parents?page=2&limit=2"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["spiritualParents"].as_array().expect("array").len(), 1);
    assert_eq!(body["spiritualParents"][0]["fullName"], "Carla");
    assert_eq!(body["statistics"]["totalSpiritualParents"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrev"], true);
}

/// ## Summary
/// Downline counting stops at the configured depth.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn downlines_respect_configured_depth() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let mut parent = test_db.seed_member("Level 0", None).await.expect("seed");
    let root = parent;
    for level in 1..=5 {
        parent = test_db
            .seed_member(&format!("Level {level}"), Some(parent))
            .await
            .expect("seed");
    }

    let mut settings = test_config();
    settings.lineage.max_depth = 2;
    let service = create_db_test_service_with(&test_db.url(), settings).await;
    let body = TestRequest::get(&members_path("/spiritual-parents"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["spiritualParents"][0]["id"], root.to_string());
    assert_eq!(body["spiritualParents"][0]["totalDownlines"], 2);
}

/// ## Summary
/// Members caught in a cycle still get a finite count.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn cycle_members_are_counted_once() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    test_db.seed_member_with_id(a, "Ana", Some(b)).await.expect("seed");
    test_db.seed_member_with_id(b, "Ben", Some(a)).await.expect("seed");

    let service = create_db_test_service(&test_db.url()).await;
    let body = TestRequest::get(&members_path("/spiritual-parents"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    for parent in body["spiritualParents"].as_array().expect("array") {
        assert_eq!(parent["totalDownlines"], 1);
    }
}

#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn zero_page_is_rejected() {
    let test_db = TestDb::new().await.expect("Failed to create test database");

    let service = create_db_test_service(&test_db.url()).await;
    #[expect(unused_must_use)]
    TestRequest::get(&members_path("/spiritual-parents?page=0"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
