//! Family tree over the stored member directory.

use salvo::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use super::helpers::*;

fn child_ids(node: &Value) -> Vec<String> {
    node["children"]
        .as_array()
        .expect("children is an array")
        .iter()
        .map(|child| child["id"].as_str().expect("id is a string").to_string())
        .collect()
}

/// ## Summary
/// 1 <- {2, 3}, 2 <- {4}: the tree from 1 carries the expected shape and counts.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn tree_from_root_counts_downlines() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let one = test_db.seed_member("Ana Cruz", None).await.expect("seed");
    let two = test_db.seed_member("Ben Reyes", Some(one)).await.expect("seed");
    let three = test_db.seed_member("Carla Diaz", Some(one)).await.expect("seed");
    let four = test_db.seed_member("Dan Lim", Some(two)).await.expect("seed");

    let service = create_db_test_service(&test_db.url()).await;
    let response = TestRequest::get(&members_path(&format!("/family-tree?rootId={one}")))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    let body = response.json();

    let roots = body["familyTree"].as_array().expect("familyTree is an array");
    assert_eq!(roots.len(), 1);
    let root = &roots[0];
    assert_eq!(root["id"], one.to_string());
    assert_eq!(root["totalDownlines"], 3);
    assert_eq!(root["directChildCount"], 2);
    assert_eq!(child_ids(root), vec![two.to_string(), three.to_string()]);

    let second = &root["children"][0];
    assert_eq!(child_ids(second), vec![four.to_string()]);
    assert_eq!(second["totalDownlines"], 1);

    assert_eq!(body["statistics"]["totalMembers"], 4);
    assert_eq!(body["statistics"]["rootMembers"], 1);
    assert_eq!(body["statistics"]["membersWithParent"], 3);
}

/// ## Summary
/// Without a root every parentless member starts a tree; a dangling parent
/// reference hides its member from the forest.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn forest_lists_every_root() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let first = test_db.seed_member("Ana Cruz", None).await.expect("seed");
    test_db.seed_member("Ben Reyes", Some(first)).await.expect("seed");
    let second = test_db.seed_member("Carla Diaz", None).await.expect("seed");
    test_db
        .seed_member("Orphan", Some(Uuid::now_v7()))
        .await
        .expect("seed");

    let service = create_db_test_service(&test_db.url()).await;
    let body = TestRequest::get(&members_path("/family-tree"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let roots: Vec<&str> = body["familyTree"]
        .as_array()
        .expect("familyTree is an array")
        .iter()
        .map(|node| node["id"].as_str().expect("id"))
        .collect();
    assert_eq!(roots, vec![first.to_string(), second.to_string()]);
    assert_eq!(body["statistics"]["totalMembers"], 4);
}

/// ## Summary
/// A <-> B cycle: the tree from A stops when B points back at A.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn two_member_cycle_terminates() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let a = Uuid::now_v7();
    let b = Uuid::now_v7();
    test_db.seed_member_with_id(a, "Ana Cruz", Some(b)).await.expect("seed");
    test_db.seed_member_with_id(b, "Ben Reyes", Some(a)).await.expect("seed");

    let service = create_db_test_service(&test_db.url()).await;
    let body = TestRequest::get(&members_path(&format!("/family-tree?rootId={a}")))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let root = &body["familyTree"][0];
    assert_eq!(child_ids(root), vec![b.to_string()]);
    assert!(child_ids(&root["children"][0]).is_empty());
    assert_eq!(root["totalDownlines"], 1);
}

/// ## Summary
/// A member naming itself as parent is not its own child.
#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn self_reference_is_not_expanded() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let id = Uuid::now_v7();
    test_db.seed_member_with_id(id, "Ana Cruz", Some(id)).await.expect("seed");

    let service = create_db_test_service(&test_db.url()).await;
    let body = TestRequest::get(&members_path(&format!("/family-tree?rootId={id}")))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(child_ids(&body["familyTree"][0]).is_empty());
    assert_eq!(body["familyTree"][0]["totalDownlines"], 0);
}

#[test_log::test(tokio::test)]
#[ignore = "requires a PostgreSQL test database"]
async fn unknown_root_is_404() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    test_db.seed_member("Ana Cruz", None).await.expect("seed");

    let service = create_db_test_service(&test_db.url()).await;
    #[expect(unused_must_use)]
    TestRequest::get(&members_path(&format!("/family-tree?rootId={}", Uuid::now_v7())))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
