mod common;

use common::TestApp;
use httpmock::MockServer;
use mongodb::bson::doc;
use secrecy::Secret;
use serde_json::json;
use uuid::Uuid;

const LOCAL_MONGO: &str = "mongodb://localhost:27017";

#[tokio::test]
async fn missing_database_config_surfaces_on_first_use() {
    // test_config leaves the database section empty, so the first store
    // call must fail with a configuration error, not the build step.
    let registry = MockServer::start_async().await;
    let app = TestApp::spawn(&registry.base_url()).await;

    let response = app
        .post_json("/search-loads", json!({ "equipment_type": "flatbed" }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "error");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("MONGODB_URL not found"));
}

#[tokio::test]
async fn missing_equipment_type_is_a_bad_request() {
    let registry = MockServer::start_async().await;
    let app = TestApp::spawn(&registry.base_url()).await;

    let response = app.post_json("/search-loads", json!({})).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "equipment_type is required");
}

#[tokio::test]
#[ignore = "requires a running MongoDB at localhost:27017"]
async fn inserted_flatbed_load_round_trips_with_string_id() {
    let registry = MockServer::start_async().await;
    let db_name = format!("carrier_test_{}", Uuid::new_v4().simple());

    let mut config = common::test_config(&registry.base_url());
    config.database.url = Some(Secret::new(LOCAL_MONGO.to_string()));
    config.database.db_name = Some(db_name.clone());
    config.database.loads_collection = Some("loads".to_string());

    let client = mongodb::Client::with_uri_str(LOCAL_MONGO)
        .await
        .expect("Failed to connect to MongoDB");
    let loads = client.database(&db_name).collection("loads");
    loads
        .insert_one(
            doc! { "equipment_type": "flatbed", "origin": "PHX", "destination": "LAX" },
            None,
        )
        .await
        .expect("Failed to seed load");

    let app = TestApp::spawn_with(config).await;
    let response = app
        .post_json("/search-loads", json!({ "equipment_type": "flatbed" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["equipment_type"], "flatbed");
    assert_eq!(body["count"], 1);
    // The database-native ObjectId comes back rendered as a plain string
    assert!(body["loads"][0]["_id"].is_string());
    assert_eq!(body["loads"][0]["origin"], "PHX");

    client.database(&db_name).drop(None).await.ok();
}

#[tokio::test]
#[ignore = "requires a running MongoDB at localhost:27017"]
async fn recorded_carrier_call_is_stamped_and_acknowledged() {
    let registry = MockServer::start_async().await;
    let db_name = format!("carrier_test_{}", Uuid::new_v4().simple());

    let mut config = common::test_config(&registry.base_url());
    config.database.url = Some(Secret::new(LOCAL_MONGO.to_string()));
    config.database.db_name = Some(db_name.clone());
    config.database.loads_collection = Some("loads".to_string());

    let app = TestApp::spawn_with(config).await;
    let response = app
        .post_json(
            "/carriers-calls",
            json!({ "mc_number": "227271", "outcome": "voicemail" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["acknowledged"], true);
    let inserted_id = body["data"]["inserted_id"].as_str().expect("string id");

    // The stored record carries the server-stamped creation time
    let client = mongodb::Client::with_uri_str(LOCAL_MONGO)
        .await
        .expect("Failed to connect to MongoDB");
    let calls = client
        .database(&db_name)
        .collection::<mongodb::bson::Document>("carriers_calls");
    let oid = mongodb::bson::oid::ObjectId::parse_str(inserted_id).expect("hex ObjectId");
    let stored = calls
        .find_one(doc! { "_id": oid }, None)
        .await
        .expect("Failed to query carrier call")
        .expect("carrier call not found");

    assert_eq!(stored.get_str("mc_number").unwrap(), "227271");
    assert!(stored.get_datetime("created_at").is_ok());

    client.database(&db_name).drop(None).await.ok();
}

#[tokio::test]
#[ignore = "requires a running MongoDB at localhost:27017"]
async fn store_recovers_after_a_failed_connection() {
    let registry = MockServer::start_async().await;
    let db_name = format!("carrier_test_{}", Uuid::new_v4().simple());

    // First point the store at a dead port so the lazy connect fails
    let mut config = common::test_config(&registry.base_url());
    config.database.url = Some(Secret::new(
        "mongodb://localhost:1/?serverSelectionTimeoutMS=500&connectTimeoutMS=500".to_string(),
    ));
    config.database.db_name = Some(db_name.clone());
    config.database.loads_collection = Some("loads".to_string());

    let store = carrier_service::services::LoadStore::new(config.database.clone());
    assert!(store.find_loads_by_equipment("flatbed").await.is_err());

    // A fresh store against the live server succeeds, mirroring the
    // reconnect-on-next-call policy after a reset
    config.database.url = Some(Secret::new(LOCAL_MONGO.to_string()));
    let store = carrier_service::services::LoadStore::new(config.database.clone());
    let loads = store
        .find_loads_by_equipment("flatbed")
        .await
        .expect("query against live server");
    assert!(loads.is_empty());

    let client = mongodb::Client::with_uri_str(LOCAL_MONGO)
        .await
        .expect("Failed to connect to MongoDB");
    client.database(&db_name).drop(None).await.ok();
}
