mod common;

use axum::http::{Method, StatusCode};
use common::{db_error, TestApp};
use devprojects::AppError;
use serde_json::json;

fn developer(id: i64, info: Option<i64>) -> serde_json::Value {
    json!({"id": id, "name": "Ada", "email": "ada@example.com", "developerInfoId": info})
}

#[tokio::test]
async fn create_developer_returns_created_row() {
    let app = TestApp::new();
    app.rows(vec![]).rows(vec![developer(1, None)]);

    let (status, body) = app
        .send(Method::POST, "/developers", Some(json!({"name": "Ada", "email": "ada@example.com"})))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, developer(1, None));
    let sql = app.executed_sql();
    assert_eq!(sql.len(), 2);
    assert!(sql[0].contains("WHERE \"email\" = $1::varchar"));
    assert!(sql[1].starts_with("INSERT INTO \"developers\" (\"name\", \"email\")"));
}

#[tokio::test]
async fn duplicate_email_is_rejected_before_insert() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]);

    let (status, body) = app
        .send(Method::POST, "/developers", Some(json!({"name": "Other", "email": "ada@example.com"})))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"message": "Email already exists"}));
    assert_eq!(app.executed().len(), 1);
}

#[tokio::test]
async fn create_developer_without_email_is_a_validation_error() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::POST, "/developers", Some(json!({"name": "Ada"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Missing required keys: email"));
    assert!(app.executed().is_empty());
}

#[tokio::test]
async fn null_required_value_is_a_client_error() {
    let app = TestApp::new();
    app.fail(db_error("23502"));

    let (status, body) = app
        .send(Method::POST, "/developers", Some(json!({"name": "Ada", "email": null})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid value"));
    let sql = app.executed_sql();
    assert_eq!(sql.len(), 1);
    assert!(sql[0].starts_with("INSERT INTO \"developers\""));
}

#[tokio::test]
async fn non_object_body_is_rejected() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::POST, "/developers", Some(json!(["Ada"]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "body must be a JSON object"}));
}

#[tokio::test]
async fn patch_with_only_unknown_keys_fails() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]);

    let (status, body) = app.send(Method::PATCH, "/developers/1", Some(json!({"age": 36}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "At least one of the keys name, email, developerInfoId is required"
    );
    assert_eq!(app.executed().len(), 1);
}

#[tokio::test]
async fn patch_updates_only_given_columns() {
    let app = TestApp::new();
    let updated = json!({"id": 1, "name": "Grace", "email": "ada@example.com", "developerInfoId": null});
    app.rows(vec![developer(1, None)]).rows(vec![updated.clone()]);

    let (status, body) = app
        .send(Method::PATCH, "/developers/1", Some(json!({"name": "Grace", "age": 85})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, updated);
    let update = &app.executed()[1];
    assert_eq!(
        update.sql,
        "UPDATE \"developers\" SET \"name\" = $1::varchar WHERE \"id\" = $2 \
         RETURNING \"id\", \"name\", \"email\", \"developerInfoId\""
    );
    assert_eq!(update.params, vec![json!("Grace"), json!(1)]);
}

#[tokio::test]
async fn patch_to_an_email_owned_by_someone_else_conflicts() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]).rows(vec![developer(2, None)]);

    let (status, _) = app
        .send(Method::PATCH, "/developers/1", Some(json!({"email": "ada@example.com"})))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let check = &app.executed()[1];
    assert!(check.sql.contains("\"email\" = $1::varchar AND \"id\" <> $2"));
    assert_eq!(check.params, vec![json!("ada@example.com"), json!(1)]);
}

#[tokio::test]
async fn patch_keeping_own_email_passes() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]).rows(vec![]).rows(vec![developer(1, None)]);

    let (status, body) = app
        .send(Method::PATCH, "/developers/1", Some(json!({"email": "ada@example.com"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, developer(1, None));
    let executed = app.executed();
    assert_eq!(executed.len(), 3);
    assert!(executed[1].sql.contains("\"email\" = $1::varchar AND \"id\" <> $2"));
    assert_eq!(executed[1].params, vec![json!("ada@example.com"), json!(1)]);
    assert!(executed[2].sql.starts_with("UPDATE \"developers\" SET \"email\" = $1::varchar"));
}

#[tokio::test]
async fn delete_missing_developer_is_404_without_delete() {
    let app = TestApp::new();
    app.rows(vec![]);

    let (status, body) = app.send(Method::DELETE, "/developers/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Developer not found"}));
    assert!(app.executed_sql().iter().all(|sql| !sql.starts_with("DELETE")));
}

#[tokio::test]
async fn delete_developer_returns_no_content() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]).affected(1);

    let (status, body) = app.send(Method::DELETE, "/developers/1", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert_eq!(app.executed_sql()[1], "DELETE FROM \"developers\" WHERE \"id\" = $1");
}

#[tokio::test]
async fn invalid_id_is_a_bad_request() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/developers/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "invalid id"}));
    assert!(app.executed().is_empty());
}

#[tokio::test]
async fn read_developer_returns_joined_row() {
    let app = TestApp::new();
    let joined = json!({
        "developerID": 1,
        "developerName": "Ada",
        "developerEmail": "ada@example.com",
        "developerInfoID": 5,
        "developerInfoDeveloperSince": "2020-01-01",
        "developerInfoPreferredOS": "Linux",
    });
    app.rows(vec![developer(1, Some(5))]).rows(vec![joined.clone()]);

    let (status, body) = app.send(Method::GET, "/developers/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, joined);
    let view = &app.executed()[1];
    assert!(view.sql.contains("LEFT JOIN \"developer_infos\" AS \"di\""));
    assert_eq!(view.params, vec![json!(1)]);
}

#[tokio::test]
async fn list_developer_projects_joins_projects_and_technologies() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]).rows(vec![json!({"developerID": 1, "projectID": null})]);

    let (status, body) = app.send(Method::GET, "/developers/1/projects", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"developerID": 1, "projectID": null}]));
    let sql = &app.executed_sql()[1];
    assert!(sql.contains("LEFT JOIN \"projects\" AS \"p\" ON \"d\".\"id\" = \"p\".\"developerId\""));
    assert!(sql.contains("LEFT JOIN \"technologies\" AS \"t\" ON \"pt\".\"technologyId\" = \"t\".\"id\""));
}

#[tokio::test]
async fn list_developers_has_no_gate() {
    let app = TestApp::new();
    app.rows(vec![json!({"developerID": 1}), json!({"developerID": 2})]);

    let (status, body) = app.send(Method::GET, "/developers", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(app.executed().len(), 1);
}

#[tokio::test]
async fn driver_failures_answer_500_with_generic_message() {
    let app = TestApp::new();
    app.fail(AppError::Db(sqlx::Error::PoolTimedOut));

    let (status, body) = app.send(Method::GET, "/developers", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Internal server error"}));
}

#[tokio::test]
async fn create_info_inserts_and_links_it() {
    let app = TestApp::new();
    let info = json!({"id": 5, "developerSince": "2020-01-01", "preferredOS": "Linux"});
    app.rows(vec![developer(1, None)])
        .rows(vec![developer(1, None)])
        .rows(vec![info.clone()])
        .rows(vec![developer(1, Some(5))]);

    let (status, body) = app
        .send(
            Method::POST,
            "/developers/1/infos",
            Some(json!({"developerSince": "2020-01-01", "preferredOS": "Linux"})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, info);
    let executed = app.executed();
    assert!(executed[2].sql.starts_with("INSERT INTO \"developer_infos\""));
    assert!(executed[3].sql.starts_with("UPDATE \"developers\" SET \"developerInfoId\" = $1::integer"));
    assert_eq!(executed[3].params, vec![json!(5), json!(1)]);
}

#[tokio::test]
async fn second_info_for_a_developer_conflicts() {
    let app = TestApp::new();
    app.rows(vec![developer(1, Some(5))]).rows(vec![developer(1, Some(5))]);

    let (status, body) = app
        .send(
            Method::POST,
            "/developers/1/infos",
            Some(json!({"developerSince": "2020-01-01", "preferredOS": "Windows"})),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"message": "Developer infos already exists"}));
    assert_eq!(app.executed().len(), 2);
}

#[tokio::test]
async fn info_with_unknown_os_is_rejected() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]);

    let (status, body) = app
        .send(
            Method::POST,
            "/developers/1/infos",
            Some(json!({"developerSince": "2020-01-01", "preferredOS": "Plan9"})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "preferredOS must be one of: Linux, Windows, MacOS");
}

#[tokio::test]
async fn update_info_uses_the_linked_info_id() {
    let app = TestApp::new();
    let info = json!({"id": 5, "developerSince": "2020-01-01", "preferredOS": "MacOS"});
    app.rows(vec![developer(1, Some(5))]).rows(vec![info.clone()]);

    let (status, body) = app
        .send(Method::PATCH, "/developers/1/infos", Some(json!({"preferredOS": "MacOS"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, info);
    let update = &app.executed()[1];
    assert!(update.sql.starts_with("UPDATE \"developer_infos\" SET \"preferredOS\" = $1::public.os"));
    assert_eq!(update.params, vec![json!("MacOS"), json!(5)]);
}

#[tokio::test]
async fn update_info_without_profile_is_404() {
    let app = TestApp::new();
    app.rows(vec![developer(1, None)]);

    let (status, body) = app
        .send(Method::PATCH, "/developers/1/infos", Some(json!({"preferredOS": "MacOS"})))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Developer infos not found"}));
}

#[tokio::test]
async fn update_info_for_missing_developer_is_404_before_validation() {
    let app = TestApp::new();
    app.rows(vec![]);

    let (status, body) = app
        .send(Method::PATCH, "/developers/9/infos", Some(json!({"favouriteEditor": "vim"})))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Developer not found"}));
    assert_eq!(app.executed().len(), 1);
}
