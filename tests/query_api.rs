//! Integration tests for the query API.

mod common;

use axum::body::Body;
use axum::http::Request;
use common::*;
use store::DatabaseState;
use tower::ServiceExt;
use vumock::{ServerConfig, ServerState};

#[tokio::test]
async fn query_with_no_matching_targets_returns_an_empty_success() {
    let mock = TestMock::quick();
    let response = vwq_request(&mock, &[("image", &high_contrast_png())]).await;
    assert_eq!(response.status(), 200);
    assert_eq!(header(&response, "Server"), Some("nginx"));
    let body = response_json(response).await;
    assert_eq!(body["result_code"], "Success");
    assert_eq!(body["results"].as_array().expect("results").len(), 0);
    assert_eq!(body["query_id"].as_str().expect("query id").len(), 32);
}

#[tokio::test]
async fn query_finds_a_processed_target_with_top_data() {
    let mock = TestMock::quick();
    let image = high_contrast_png();
    let target_id = add_processed_target(&mock, "findable", &image).await;

    let response = vwq_request(&mock, &[("image", &image)]).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    let results = body["results"].as_array().expect("results");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["target_id"], target_id.as_str());
    // include_target_data defaults to "top": the first result carries data.
    assert_eq!(results[0]["target_data"]["name"], "findable");
    assert!(results[0]["target_data"]["target_timestamp"].is_i64());
}

#[tokio::test]
async fn include_target_data_none_strips_data() {
    let mock = TestMock::quick();
    let image = high_contrast_png();
    add_processed_target(&mock, "bare", &image).await;

    let response = vwq_request(
        &mock,
        &[("image", &image), ("include_target_data", b"none")],
    )
    .await;
    let body = response_json(response).await;
    let results = body["results"].as_array().expect("results");
    assert_eq!(results.len(), 1);
    assert!(results[0].get("target_data").is_none());
}

#[tokio::test]
async fn inactive_targets_are_not_recognized() {
    let mock = TestMock::quick();
    let image = high_contrast_png();
    let target_id = add_processed_target(&mock, "inactive", &image).await;
    let update = serde_json::json!({ "active_flag": false })
        .to_string()
        .into_bytes();
    let response = vws_request(&mock, "PUT", &format!("/targets/{target_id}"), update).await;
    assert_eq!(response.status(), 200);
    wait_past_processing(&mock).await;

    let response = vwq_request(&mock, &[("image", &image)]).await;
    let body = response_json(response).await;
    assert_eq!(body["results"].as_array().expect("results").len(), 0);
}

#[tokio::test]
async fn querying_a_processing_target_is_a_transient_500() {
    let mock = TestMock::new(ServerConfig {
        processing_time_seconds: 30.0,
        ..Default::default()
    });
    let image = high_contrast_png();
    let response = vws_request(
        &mock,
        "POST",
        "/targets",
        add_target_body("in-flux", &image),
    )
    .await;
    assert_eq!(response.status(), 201);

    let response = vwq_request(&mock, &[("image", &image)]).await;
    assert_eq!(response.status(), 500);
    assert_eq!(
        header(&response, "Cache-Control"),
        Some("must-revalidate,no-cache,no-store")
    );
    let text = response_text(response).await;
    assert!(text.contains("Error 500 Server Error"));
}

#[tokio::test]
async fn deleted_targets_stay_loudly_visible_for_the_recognition_window() {
    let mock = TestMock::new(ServerConfig {
        processing_time_seconds: 0.1,
        query_recognizes_deletion_seconds: 30.0,
        ..Default::default()
    });
    let image = high_contrast_png();
    let target_id = add_processed_target(&mock, "short-lived", &image).await;
    let response =
        vws_request(&mock, "DELETE", &format!("/targets/{target_id}"), Vec::new()).await;
    assert_eq!(response.status(), 200);

    let response = vwq_request(&mock, &[("image", &image)]).await;
    assert_eq!(response.status(), 500);
    assert_eq!(
        header(&response, "Cache-Control"),
        Some("must-revalidate,no-cache,no-store")
    );
}

#[tokio::test]
async fn deleted_targets_disappear_after_the_recognition_window() {
    let mock = TestMock::new(ServerConfig {
        processing_time_seconds: 0.1,
        query_recognizes_deletion_seconds: 0.1,
        ..Default::default()
    });
    let image = high_contrast_png();
    let target_id = add_processed_target(&mock, "fading", &image).await;
    let response =
        vws_request(&mock, "DELETE", &format!("/targets/{target_id}"), Vec::new()).await;
    assert_eq!(response.status(), 200);
    tokio::time::sleep(std::time::Duration::from_millis(300)).await;

    let response = vwq_request(&mock, &[("image", &image)]).await;
    assert_eq!(response.status(), 200);
    let body = response_json(response).await;
    assert_eq!(body["results"].as_array().expect("results").len(), 0);
}

#[tokio::test]
async fn max_num_results_out_of_range_has_the_documented_message() {
    let mock = TestMock::quick();
    let response = vwq_request(
        &mock,
        &[("image", &high_contrast_png()), ("max_num_results", b"51")],
    )
    .await;
    assert_eq!(response.status(), 400);
    let text = response_text(response).await;
    assert_eq!(
        text,
        "Integer out of range (51) in form data part 'max_result'. \
         Accepted range is from 1 to 50 (inclusive)."
    );
}

#[tokio::test]
async fn max_num_results_not_an_integer_has_the_other_message() {
    let mock = TestMock::quick();
    let response = vwq_request(
        &mock,
        &[("image", &high_contrast_png()), ("max_num_results", b"ten")],
    )
    .await;
    assert_eq!(response.status(), 400);
    let text = response_text(response).await;
    assert_eq!(
        text,
        "Invalid value 'ten' in form data part 'max_result'. \
         Expecting integer value in range from 1 to 50 (inclusive)."
    );
}

#[tokio::test]
async fn unknown_form_fields_are_rejected() {
    let mock = TestMock::quick();
    let response = vwq_request(
        &mock,
        &[("image", &high_contrast_png()), ("surprise", b"x")],
    )
    .await;
    assert_eq!(response.status(), 400);
    assert_eq!(
        response_text(response).await,
        "Unknown parameters in the request."
    );
}

#[tokio::test]
async fn unacceptable_accept_header_is_a_406() {
    let mock = TestMock::quick();
    let body = multipart_body(&[("image", &high_contrast_png())]);
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    let date = rfc1123_now();
    let authorization = auth::authorization_header(
        &mock.database.client_access_key,
        &mock.database.client_secret_key,
        "POST",
        &body,
        &content_type,
        &date,
        "/v1/query",
    );
    let request = Request::builder()
        .method("POST")
        .uri("/v1/query")
        .header("Authorization", authorization)
        .header("Date", date)
        .header("Content-Type", content_type)
        .header("Accept", "text/html")
        .body(Body::from(body))
        .expect("request builds");
    let response = mock.vwq().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), 406);
    assert!(response_text(response).await.is_empty());
}

#[tokio::test]
async fn inactive_projects_reject_queries_with_the_variant_body() {
    let state = ServerState::new(ServerConfig::default());
    let database = store::VuforiaDatabase::new().with_state(DatabaseState::ProjectInactive);
    state
        .target_manager
        .add_database(database.clone())
        .expect("add succeeds");
    let mock = TestMock {
        state,
        database,
    };

    let response = vwq_request(&mock, &[("image", &high_contrast_png())]).await;
    assert_eq!(response.status(), 403);
    let text = response_text(response).await;
    assert!(text.starts_with("{\"transaction_id\": \""));
    assert!(text.contains("\"result_code\":\"InactiveProject\""));
}

#[tokio::test]
async fn missing_date_header_is_a_400() {
    let mock = TestMock::quick();
    let body = multipart_body(&[("image", &high_contrast_png())]);
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    let authorization = auth::authorization_header(
        &mock.database.client_access_key,
        &mock.database.client_secret_key,
        "POST",
        &body,
        &content_type,
        "",
        "/v1/query",
    );
    let request = Request::builder()
        .method("POST")
        .uri("/v1/query")
        .header("Authorization", authorization)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .expect("request builds");
    let response = mock.vwq().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), 400);
    assert_eq!(response_text(response).await, "Date header required.");
}

#[tokio::test]
async fn query_dates_tolerate_an_hour_of_skew() {
    let mock = TestMock::quick();
    let image = high_contrast_png();
    add_processed_target(&mock, "tolerant", &image).await;

    let body = multipart_body(&[("image", &image)]);
    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    let date = (chrono::Utc::now() - chrono::Duration::minutes(60))
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();
    let authorization = auth::authorization_header(
        &mock.database.client_access_key,
        &mock.database.client_secret_key,
        "POST",
        &body,
        &content_type,
        &date,
        "/v1/query",
    );
    let request = Request::builder()
        .method("POST")
        .uri("/v1/query")
        .header("Authorization", authorization)
        .header("Date", date)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .expect("request builds");
    let response = mock.vwq().oneshot(request).await.expect("router responds");
    assert_eq!(response.status(), 200);
}
