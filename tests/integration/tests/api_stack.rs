//! End-to-end API tests over the real flow and Data API clients.
//!
//! Both upstream services are mock servers; everything between the router
//! and the wire is production code.

use axum::http::{Method, StatusCode};
use fitflow_core::config::{DEFAULT_MACRO_FLOW_ID, DEFAULT_WORKOUT_FLOW_ID};
use fitflow_integration_tests::{collection_path, Stack, FLOW_API_KEY, STORE_TOKEN};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn profiles() -> String {
    collection_path("fitness_profiles")
}

fn notes() -> String {
    collection_path("notes")
}

#[tokio::test]
async fn test_profile_auto_creation() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(header("Token", STORE_TOKEN))
        .and(body_partial_json(json!({"findOne": {"filter": {"_id": {"$eq": "u9"}}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"document": null}})))
        .expect(1)
        .mount(&stack.database)
        .await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({
            "insertOne": {"document": {"_id": "u9", "goals": ["Muscle Gain"]}}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": {"insertedIds": ["u9"]}})),
        )
        .expect(1)
        .mount(&stack.database)
        .await;

    let (status, body) = stack.send(Method::GET, "/profile/u9", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "u9");
    assert_eq!(body["profile"]["goals"], json!(["Muscle Gain"]));
    assert_eq!(body["profile"]["general"]["activity_level"], "Moderately Active");
}

#[tokio::test]
async fn test_profile_nutrition_merge() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({"findOne": {"filter": {"_id": {"$eq": "u1"}}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"document": {
                "_id": "u1",
                "general": {"name": "Ana"},
                "goals": ["A"],
                "nutrition": {"calories": 2000, "protein": 140}
            }}
        })))
        .mount(&stack.database)
        .await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({
            "updateOne": {
                "filter": {"_id": {"$eq": "u1"}},
                "update": {"$set": {"nutrition": {"calories": 2000, "protein": 150}}}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": {"matchedCount": 1, "modifiedCount": 1}
        })))
        .expect(1)
        .mount(&stack.database)
        .await;

    let (status, body) = stack
        .send(
            Method::POST,
            "/profile",
            Some(json!({"userId": "u1", "nutrition": {"protein": 150}})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["profile"]["nutrition"],
        json!({"calories": 2000, "protein": 150})
    );
    assert_eq!(body["profile"]["goals"], json!(["A"]));
}

#[tokio::test]
async fn test_profile_created_concurrently() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({"findOne": {"filter": {"_id": {"$eq": "u9"}}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"document": null}})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&stack.database)
        .await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({"insertOne": {"document": {"_id": "u9"}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{
                "message": "Document already exists with the given _id",
                "errorCode": "DOCUMENT_ALREADY_EXISTS"
            }]
        })))
        .expect(1)
        .mount(&stack.database)
        .await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({"findOne": {"filter": {"_id": {"$eq": "u9"}}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"document": {"_id": "u9", "goals": ["Endurance"]}}
        })))
        .expect(1)
        .mount(&stack.database)
        .await;

    let (status, body) = stack.send(Method::GET, "/profile/u9", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], "u9");
    assert_eq!(body["profile"]["goals"], json!(["Endurance"]));
}

#[tokio::test]
async fn test_profile_groups_written_together() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({"findOne": {"filter": {"_id": {"$eq": "u1"}}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"document": {
                "_id": "u1",
                "general": {"name": "Ana", "age": 30},
                "goals": ["A"],
                "nutrition": {"calories": 2000}
            }}
        })))
        .expect(1)
        .mount(&stack.database)
        .await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .and(body_partial_json(json!({
            "updateOne": {
                "filter": {"_id": {"$eq": "u1"}},
                "update": {"$set": {
                    "general": {"name": "Bea", "age": 30},
                    "goals": ["B"],
                    "nutrition": {"calories": 2200}
                }}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": {"matchedCount": 1, "modifiedCount": 1}
        })))
        .expect(1)
        .mount(&stack.database)
        .await;

    let (status, body) = stack
        .send(
            Method::POST,
            "/profile",
            Some(json!({
                "userId": "u1",
                "general": {"name": "Bea"},
                "goals": ["B"],
                "nutrition": {"calories": 2200}
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["general"]["name"], "Bea");
    assert_eq!(body["profile"]["goals"], json!(["B"]));
}

#[tokio::test]
async fn test_store_outage_is_server_error() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(profiles()))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream connect error"))
        .mount(&stack.database)
        .await;

    let (status, body) = stack.send(Method::GET, "/profile/u1", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to retrieve profile"));
}

#[tokio::test]
async fn test_workout_advice_with_note_context() {
    let stack = Stack::start().await;
    let question = "How do I train legs?";

    Mock::given(method("POST"))
        .and(path(notes()))
        .and(body_partial_json(json!({
            "find": {
                "filter": {"user_id": {"$eq": "u1"}},
                "sort": {"$vectorize": question},
                "options": {"limit": 3, "includeSimilarity": true}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "documents": [
                    {"_id": "n1", "user_id": "u1", "text": "left knee pain", "$similarity": 0.91},
                    {"_id": "n2", "user_id": "u1", "text": "", "$similarity": 0.52}
                ],
                "nextPageState": null
            }
        })))
        .expect(1)
        .mount(&stack.database)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/run/{}", DEFAULT_WORKOUT_FLOW_ID)))
        .and(header("x-api-key", FLOW_API_KEY))
        .and(body_partial_json(json!({
            "output_type": "text",
            "input_type": "text",
            "tweaks": {
                "TextInput-TnbDG": {"input_value": "Age 30"},
                "TextInput-Pt27D": {
                    "input_value": "How do I train legs?\n\n**Relevant context from your notes:**\n- left knee pain"
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "outputs": [{"outputs": [{"results": {"text": {"data": {"text": "Box squats."}}}}]}]
        })))
        .expect(1)
        .mount(&stack.flow_engine)
        .await;

    let (status, body) = stack
        .send(
            Method::POST,
            "/workout-advice",
            Some(json!({"question": question, "profile": {"age": 30}, "userId": "u1"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"text": "Box squats."}));
}

#[tokio::test]
async fn test_workout_advice_survives_search_failure() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(notes()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "vector search unavailable", "errorCode": "SERVER_UNHANDLED_ERROR"}]
        })))
        .mount(&stack.database)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/run/{}", DEFAULT_WORKOUT_FLOW_ID)))
        .and(body_partial_json(json!({
            "tweaks": {"TextInput-Pt27D": {"input_value": "Rest days?"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "Two per week."})))
        .expect(1)
        .mount(&stack.flow_engine)
        .await;

    let (status, body) = stack
        .send(
            Method::POST,
            "/workout-advice",
            Some(json!({"question": "Rest days?", "userId": "u1"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Two per week.");
}

#[tokio::test]
async fn test_macro_plan_rejected_by_flow_engine() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/run/{}", DEFAULT_MACRO_FLOW_ID)))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid API key"})))
        .mount(&stack.flow_engine)
        .await;

    let (status, body) = stack
        .send(Method::POST, "/macro-plan", Some(json!({"goal": "cut"})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn test_macro_plan_unreadable_response() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/v1/run/{}", DEFAULT_MACRO_FLOW_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"outputs": []})))
        .mount(&stack.flow_engine)
        .await;

    let (status, _) = stack
        .send(Method::POST, "/macro-plan", Some(json!({"goal": "cut"})))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unconfirmed_note_is_bad_request() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(notes()))
        .and(body_partial_json(json!({
            "insertOne": {"document": {"user_id": "u1", "text": "hi", "$vectorize": "hi"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": {}})))
        .expect(1)
        .mount(&stack.database)
        .await;

    let (status, body) = stack
        .send(Method::POST, "/notes", Some(json!({"userId": "u1", "text": "hi"})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Note creation returned no data");
}

#[tokio::test]
async fn test_delete_note_uses_id_filter() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(notes()))
        .and(body_partial_json(json!({"deleteOne": {"filter": {"_id": {"$eq": "n1"}}}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": {"deletedCount": 1}})))
        .expect(1)
        .mount(&stack.database)
        .await;

    let (status, body) = stack.send(Method::DELETE, "/notes/n1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "deleted", "noteId": "n1"}));
}

#[tokio::test]
async fn test_search_failure_yields_empty_results() {
    let stack = Stack::start().await;

    Mock::given(method("POST"))
        .and(path(notes()))
        .respond_with(ResponseTemplate::new(500))
        .mount(&stack.database)
        .await;

    let (status, body) = stack
        .send(
            Method::POST,
            "/notes/search",
            Some(json!({"userId": "u1", "query": "knee"})),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"results": [], "count": 0}));
}
