use actix_web::http::StatusCode;
use actix_web::test;
use classroom_server::AppState;
use serde_json::json;

use crate::common::{assert_problem_response, read_parts};
use crate::support::create_test_app;
use crate::support::factory::{membership_body, player};

#[actix_web::test]
async fn create_join_list_leave_round_trip() {
    let state = AppState::in_memory();
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(json!({"code": "482913", "playerId": "p1", "playerName": "Alice"}))
        .to_request();
    let (status, _, body) = read_parts(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["classroom"]["code"], "482913");
    assert_eq!(
        body["classroom"]["players"],
        json!([{"playerId": "p1", "playerName": "Alice"}])
    );
    assert!(body["classroom"]["createdAt"].is_i64());

    let req = test::TestRequest::post()
        .uri("/api/classroom/join")
        .set_json(json!({"code": "482913", "playerId": "p2", "playerName": "Bob"}))
        .to_request();
    let (status, _, body) = read_parts(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classroom"]["players"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/classroom/players/482913")
        .to_request();
    let (status, _, body) = read_parts(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["players"][1], json!({"playerId": "p2", "playerName": "Bob"}));

    let req = test::TestRequest::post()
        .uri("/api/classroom/leave")
        .set_json(json!({"code": "482913", "playerId": "p1"}))
        .to_request();
    let (status, _, body) = read_parts(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let roster = state.store.classroom("482913").unwrap().players;
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].player_id, "p2");
}

#[actix_web::test]
async fn create_with_taken_code_is_400_and_keeps_original() {
    let state = AppState::in_memory();
    let app = create_test_app(state.clone()).await;
    let alice = player("alice");
    let mallory = player("mallory");

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(membership_body("111111", &alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(membership_body("111111", &mallory))
        .to_request();
    let body = assert_problem_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "CLASSROOM_CODE_CONFLICT",
    )
    .await;
    assert!(body["detail"].as_str().unwrap().contains("111111"));

    let kept = state.store.classroom("111111").unwrap();
    assert_eq!(kept.players, vec![alice]);
}

#[actix_web::test]
async fn create_without_code_generates_one() {
    let state = AppState::in_memory();
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(json!({"playerId": "p1", "playerName": "Alice"}))
        .to_request();
    let (status, _, body) = read_parts(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::OK);
    let code = body["classroom"]["code"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert!(state.store.contains(code));
}

#[actix_web::test]
async fn create_with_malformed_code_is_validation_error() {
    let app = create_test_app(AppState::in_memory()).await;

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(json!({"code": "ABC", "playerId": "p1", "playerName": "Alice"}))
        .to_request();
    assert_problem_response(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
    )
    .await;
}

#[actix_web::test]
async fn join_unknown_code_is_404() {
    let app = create_test_app(AppState::in_memory()).await;

    let req = test::TestRequest::post()
        .uri("/api/classroom/join")
        .set_json(membership_body("999999", &player("bob")))
        .to_request();
    assert_problem_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "CLASSROOM_NOT_FOUND",
    )
    .await;
}

#[actix_web::test]
async fn joining_twice_keeps_roster_length() {
    let state = AppState::in_memory();
    let app = create_test_app(state.clone()).await;
    let alice = player("alice");
    let bob = player("bob");

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(membership_body("222222", &alice))
        .to_request();
    test::call_service(&app, req).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/classroom/join")
            .set_json(membership_body("222222", &bob))
            .to_request();
        let (status, _, body) = read_parts(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["classroom"]["players"].as_array().unwrap().len(), 2);
    }
}

#[actix_web::test]
async fn leave_never_errors() {
    let state = AppState::in_memory();
    let app = create_test_app(state.clone()).await;
    let alice = player("alice");

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(membership_body("333333", &alice))
        .to_request();
    test::call_service(&app, req).await;

    for body in [
        json!({"code": "333333", "playerId": "ghost"}),
        json!({"code": "000000", "playerId": alice.player_id}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/classroom/leave")
            .set_json(body)
            .to_request();
        let (status, _, body) = read_parts(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    assert_eq!(state.store.classroom("333333").unwrap().players, vec![alice]);
}

#[actix_web::test]
async fn players_of_unknown_code_is_404() {
    let app = create_test_app(AppState::in_memory()).await;

    let req = test::TestRequest::get()
        .uri("/api/classroom/players/123456")
        .to_request();
    assert_problem_response(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "CLASSROOM_NOT_FOUND",
    )
    .await;
}

#[actix_web::test]
async fn blank_player_name_gets_default() {
    let state = AppState::in_memory();
    let app = create_test_app(state.clone()).await;

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(json!({"code": "444444", "playerId": "player_1712_x9y8z7w6", "playerName": ""}))
        .to_request();
    let (_, _, body) = read_parts(test::call_service(&app, req).await).await;

    assert_eq!(body["classroom"]["players"][0]["playerName"], "Player_y8z7w6");
}

#[actix_web::test]
async fn leave_with_missing_fields_still_succeeds() {
    let state = AppState::in_memory();
    let app = create_test_app(state.clone()).await;
    let alice = player("alice");

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(membership_body("123456", &alice))
        .to_request();
    test::call_service(&app, req).await;

    for body in [json!({"code": "123456"}), json!({})] {
        let req = test::TestRequest::post()
            .uri("/api/classroom/leave")
            .set_json(body)
            .to_request();
        let (status, _, body) = read_parts(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }

    let players = state.store.classroom("123456").map(|c| c.players);
    assert_eq!(players, Some(vec![alice]));
}

#[actix_web::test]
async fn long_player_names_are_capped() {
    let app = create_test_app(AppState::in_memory()).await;

    let req = test::TestRequest::post()
        .uri("/api/classroom/create")
        .set_json(json!({"code": "246810", "playerId": "p1", "playerName": "x".repeat(1000)}))
        .to_request();
    let (status, _, body) = read_parts(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::OK);
    let name = body["classroom"]["players"][0]["playerName"].as_str().unwrap();
    assert_eq!(name.len(), classroom_server::services::classrooms::MAX_PLAYER_NAME_CHARS);
}
