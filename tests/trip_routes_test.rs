mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::{bearer, create_trip, oid, register, TestApp};

#[actix_rt::test]
async fn test_new_user_has_no_trips() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = register(&app, "empty").await;

    let req = test::TestRequest::get()
        .uri("/trips")
        .insert_header(bearer(&token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_add_trip_then_fetch_it() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = register(&app, "planner").await;

    let req = test::TestRequest::post()
        .uri("/trips/add")
        .insert_header(bearer(&token))
        .set_json(json!({
            "tripName": "Paris",
            "departureDate": "2024-05-01",
            "endDate": "2024-05-05",
            "selections": { "hotels": true, "flights": true }
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["name"], "Paris");
    assert_eq!(created["startDate"], "2024-05-01");
    assert_eq!(created["selections"]["hotels"], true);
    assert_eq!(created["selections"]["cruises"], false);
    assert_eq!(created["hotels"], json!([]));

    let trip_id = oid(&created["_id"]);
    let req = test::TestRequest::get()
        .uri(&format!("/trips/{}", trip_id))
        .insert_header(bearer(&token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched, created);
}

#[actix_rt::test]
async fn test_add_trip_validates_input() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = register(&app, "planner").await;

    let cases = [
        json!({ "name": "  " }),
        json!({ "name": "Backwards", "startDate": "2024-05-10", "endDate": "2024-05-01" }),
        json!({ "name": "Bad date", "startDate": "May first" }),
    ];

    for body in cases {
        let req = test::TestRequest::post()
            .uri("/trips/add")
            .insert_header(bearer(&token))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "accepted {}", body);
    }
}

#[actix_rt::test]
async fn test_update_trip_changes_only_given_fields() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = register(&app, "planner").await;
    let trip_id = create_trip(&app, &token, "Rome").await;

    let req = test::TestRequest::put()
        .uri(&format!("/trips/{}", trip_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Rome and Naples" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Rome and Naples");
    assert_eq!(body["startDate"], "2024-05-01");
    assert_eq!(body["endDate"], "2024-05-10");

    let req = test::TestRequest::put()
        .uri(&format!("/trips/{}", trip_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "endDate": "2024-04-01" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_update_selections_keeps_unsent_flags() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = register(&app, "planner").await;

    let req = test::TestRequest::post()
        .uri("/trips/add")
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Kyoto", "selections": { "flights": true } }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let trip_id = oid(&created["_id"]);

    let req = test::TestRequest::put()
        .uri(&format!("/trips/{}", trip_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "selections": { "hotels": true } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["selections"]["flights"], true);
    assert_eq!(body["selections"]["hotels"], true);
    assert_eq!(body["selections"]["cruises"], false);
}

#[actix_rt::test]
async fn test_delete_trip_returns_removed_trip() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = register(&app, "planner").await;
    let first = create_trip(&app, &token, "First").await;
    let second = create_trip(&app, &token, "Second").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/trips/{}", first))
        .insert_header(bearer(&token))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "First");

    let req = test::TestRequest::get()
        .uri("/trips")
        .insert_header(bearer(&token))
        .to_request();
    let trips: Value = test::call_and_read_body_json(&app, req).await;
    let trips = trips.as_array().unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(oid(&trips[0]["_id"]), second);

    let req = test::TestRequest::get()
        .uri(&format!("/trips/{}", first))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_unknown_or_malformed_trip_id_is_not_found() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = register(&app, "planner").await;

    for id in ["65f0c0ffee0000000000abcd", "not-an-id"] {
        let req = test::TestRequest::get()
            .uri(&format!("/trips/{}", id))
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Trip not found");
    }
}

#[actix_rt::test]
async fn test_trips_are_private_to_their_owner() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let trip_id = create_trip(&app, &alice, "Alice's trip").await;

    let req = test::TestRequest::get()
        .uri(&format!("/trips/{}", trip_id))
        .insert_header(bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/trips/{}", trip_id))
        .insert_header(bearer(&bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get()
        .uri("/trips")
        .insert_header(bearer(&bob))
        .to_request();
    let trips: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(trips, json!([]));
}
