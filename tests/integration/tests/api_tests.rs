//! API Integration Tests
//!
//! These tests require:
//! - Running MySQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use cafe_client::{ClientError, ClientState};
use cafe_service::dto::{
    HealthResponse, RegisterRequest, ReviewSearchQuery, UpdateListRequest, UpdateProfileRequest,
};
use integration_tests::{
    assert_json, assert_status, check_test_env, favorite_request, list_item_request,
    list_request, register_request, review_request, test_config, tiny_png, unique_place_id,
    TestServer, TEST_PASSWORD,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn code_of(err: &ClientError) -> &str {
    err.code().unwrap_or("<none>")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health").await.expect("Request failed");
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let readiness = server.api().readiness().await.unwrap();
    assert!(readiness.is_ready());
    assert_eq!(readiness.checks.database, "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = register_request();

    let response = server.post("/api/register", &request).await.unwrap();
    let auth: Value = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth["user"]["nickname"], request.nickname.as_str());
    assert_eq!(auth["user"]["email"], request.email.as_str());
    assert!(auth["user"]["id"].is_string());
    assert!(auth["user"].get("password_hash").is_none());
    assert!(!auth["token"].as_str().unwrap().is_empty());
    assert!(!auth["refresh_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_duplicates_are_distinct_errors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let api = server.api();
    let first = register_request();
    api.register(&first).await.unwrap();

    let same_nickname = RegisterRequest {
        email: register_request().email,
        ..first.clone()
    };
    let err = api.register(&same_nickname).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(code_of(&err), "NICKNAME_TAKEN");

    let same_email = RegisterRequest {
        nickname: register_request().nickname,
        ..first.clone()
    };
    let err = api.register(&same_email).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(code_of(&err), "EMAIL_TAKEN");
}

#[tokio::test]
async fn test_register_validation_error_shape() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post(
            "/api/register",
            &json!({"name":"A","nickname":"ab","email":"nope","password":"x"}),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();

    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
    assert!(body["error"]["details"]["email"].is_array());
}

#[tokio::test]
async fn test_login_with_email_or_nickname() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = register_request();
    server.api().register(&request).await.unwrap();

    let by_email = server.api().login(&request.email, TEST_PASSWORD).await.unwrap();
    let by_nickname = server
        .api()
        .login(&request.nickname, TEST_PASSWORD)
        .await
        .unwrap();
    assert_eq!(by_email.user.id, by_nickname.user.id);

    let err = server
        .api()
        .login(&request.email, "wrong-password1")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(code_of(&err), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_revokes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (api, auth) = server.signed_in().await.unwrap();

    let rotated = api.refresh(&auth.refresh_token).await.unwrap();
    assert_eq!(rotated.user.id, auth.user.id);

    // The consumed refresh token is dead
    let err = api.refresh(&auth.refresh_token).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    api.logout().await.unwrap();
    let err = server
        .api()
        .refresh(&rotated.refresh_token)
        .await
        .unwrap_err();
    assert_eq!(code_of(&err), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_auth_failures() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/profile").await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "MISSING_AUTH");

    let response = server.get_auth("/api/profile", "garbage").await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Profile Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update_and_nickname_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (api, auth) = server.signed_in().await.unwrap();
    let (other, other_auth) = server.signed_in().await.unwrap();

    let profile = api.profile().await.unwrap();
    assert_eq!(profile.id, auth.user.id);

    // Own nickname is available to its owner, not to others
    assert!(api.check_nickname(&auth.user.nickname).await.unwrap());
    assert!(!other.check_nickname(&auth.user.nickname).await.unwrap());
    assert!(!server.api().check_nickname(&auth.user.nickname).await.unwrap());

    let updated = api
        .update_profile(&UpdateProfileRequest {
            name: Some("Olena".to_string()),
            surname: Some(String::new()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Olena");
    assert_eq!(updated.surname, None);

    let err = api
        .update_profile(&UpdateProfileRequest {
            nickname: Some(other_auth.user.nickname.clone()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(code_of(&err), "NICKNAME_TAKEN");

    let err = api
        .update_profile(&UpdateProfileRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
}

#[tokio::test]
async fn test_avatar_upload_is_served() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (api, _) = server.signed_in().await.unwrap();

    let avatar = api
        .upload_avatar("me.png", "image/png", tiny_png())
        .await
        .unwrap();
    assert!(avatar.avatar_url.starts_with("/uploads/"));
    assert_eq!(
        api.profile().await.unwrap().avatar_url.as_deref(),
        Some(avatar.avatar_url.as_str())
    );

    let response = server.get(&avatar.avatar_url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().to_vec(), tiny_png());

    // Replacing the avatar removes the previous file
    let replaced = api
        .upload_avatar("me2.png", "image/png", tiny_png())
        .await
        .unwrap();
    assert_ne!(replaced.avatar_url, avatar.avatar_url);
    let old_file = avatar.avatar_url.trim_start_matches("/uploads/");
    assert!(!server.upload_dir().join(old_file).exists());

    let err = api
        .upload_avatar("notes.txt", "text/plain", b"hello".to_vec())
        .await
        .unwrap_err();
    assert_eq!(code_of(&err), "UNSUPPORTED_FILE_TYPE");
}

#[tokio::test]
async fn test_avatar_size_limit() {
    if !check_test_env().await {
        return;
    }

    let mut config = test_config().unwrap();
    config.storage.max_avatar_size_mb = 1;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");
    let (api, _) = server.signed_in().await.unwrap();

    let err = api
        .upload_avatar("big.png", "image/png", vec![0u8; 1024 * 1024 + 1])
        .await
        .unwrap_err();
    assert_eq!(code_of(&err), "FILE_TOO_LARGE");
}

// ============================================================================
// Favorite Tests
// ============================================================================

#[tokio::test]
async fn test_favorites_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (api, _) = server.signed_in().await.unwrap();
    let place_id = unique_place_id();

    assert!(!api.is_favorite(&place_id).await.unwrap());

    let favorite = api.add_favorite(&favorite_request(&place_id)).await.unwrap();
    assert_eq!(favorite.id, place_id);
    assert_eq!(favorite.rating, Some(4.7));

    let err = api
        .add_favorite(&favorite_request(&place_id))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(code_of(&err), "ALREADY_FAVORITED");

    assert!(api.is_favorite(&place_id).await.unwrap());
    let favorites = api.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);

    // The client cache mirrors the server
    let mut state = ClientState::new(server.api_url());
    state.set_favorites(favorites);
    assert!(state.is_favorite(&place_id));

    api.remove_favorite(&place_id).await.unwrap();
    assert!(!api.is_favorite(&place_id).await.unwrap());

    let err = api.remove_favorite(&place_id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

// ============================================================================
// Review Tests
// ============================================================================

#[tokio::test]
async fn test_review_upsert_and_like_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, author_auth) = server.signed_in().await.unwrap();
    let (reader, _) = server.signed_in().await.unwrap();
    let place_id = unique_place_id();

    let (review, created) = author
        .save_review(&review_request(&place_id, 4, "Great flat white"))
        .await
        .unwrap();
    assert!(created);
    assert_eq!(review.user.id, author_auth.user.id);

    let (updated, created) = author
        .save_review(&review_request(&place_id, 5, "Even better"))
        .await
        .unwrap();
    assert!(!created);
    assert_eq!(updated.id, review.id);
    assert_eq!(updated.rating, 5);

    let err = author
        .save_review(&review_request(&place_id, 6, "off the scale"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

    let liked = reader.toggle_like(review.id).await.unwrap();
    assert!(liked.liked);
    assert_eq!(liked.likes_count, 1);

    let reviews = reader.place_reviews(&place_id).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert!(reviews[0].is_liked);

    let anonymous = server.api().place_reviews(&place_id).await.unwrap();
    assert!(!anonymous[0].is_liked);
    assert_eq!(anonymous[0].likes_count, 1);

    let unliked = reader.toggle_like(review.id).await.unwrap();
    assert!(!unliked.liked);
    assert_eq!(unliked.likes_count, 0);
}

#[tokio::test]
async fn test_review_search_and_delete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author, author_auth) = server.signed_in().await.unwrap();
    let (stranger, _) = server.signed_in().await.unwrap();
    let first = unique_place_id();
    let second = unique_place_id();

    author
        .save_review(&review_request(&first, 3, "ok"))
        .await
        .unwrap();
    let (latest, _) = author
        .save_review(&review_request(&second, 5, "superb"))
        .await
        .unwrap();

    let mine = server
        .api()
        .search_reviews(&ReviewSearchQuery {
            place_id: None,
            user_id: Some(author_auth.user.id.to_string()),
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, latest.id);

    let err = server
        .api()
        .search_reviews(&ReviewSearchQuery {
            place_id: None,
            user_id: Some("abc".to_string()),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

    let err = stranger.delete_review(latest.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    author.delete_review(latest.id).await.unwrap();
    assert!(author.place_reviews(&second).await.unwrap().is_empty());

    let err = author.delete_review(latest.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

// ============================================================================
// List Tests
// ============================================================================

#[tokio::test]
async fn test_list_visibility_and_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, owner_auth) = server.signed_in().await.unwrap();
    let (stranger, _) = server.signed_in().await.unwrap();

    let public = owner
        .create_list(&list_request("Morning spots", true))
        .await
        .unwrap();
    let private = owner
        .create_list(&list_request("Secret spots", false))
        .await
        .unwrap();

    assert_eq!(owner.my_lists().await.unwrap().len(), 2);

    let visible = server.api().user_lists(owner_auth.user.id).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, public.id);

    let err = stranger.get_list(private.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(owner.get_list(private.id).await.is_ok());

    let err = stranger
        .update_list(
            public.id,
            &UpdateListRequest {
                name: Some("Mine now".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    let renamed = owner
        .update_list(
            public.id,
            &UpdateListRequest {
                name: Some("Best mornings".to_string()),
                is_public: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Best mornings");
    assert!(!renamed.is_public);

    owner.delete_list(private.id).await.unwrap();
    let err = owner.get_list(private.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_list_items() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, _) = server.signed_in().await.unwrap();
    let (stranger, _) = server.signed_in().await.unwrap();
    let list = owner
        .create_list(&list_request("Weekend", true))
        .await
        .unwrap();
    let place_id = unique_place_id();

    let item = owner
        .add_list_item(list.id, &list_item_request(&place_id))
        .await
        .unwrap();
    assert_eq!(item.list_id, list.id);

    let err = owner
        .add_list_item(list.id, &list_item_request(&place_id))
        .await
        .unwrap_err();
    assert_eq!(code_of(&err), "PLACE_ALREADY_IN_LIST");

    let err = stranger
        .add_list_item(list.id, &list_item_request(&unique_place_id()))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));

    let detail = server.api().get_list(list.id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].place_id, place_id);

    owner.remove_list_item(list.id, &place_id).await.unwrap();
    let err = owner
        .remove_list_item(list.id, &place_id)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_unknown_route_and_bad_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/nowhere").await.unwrap();
    let body: Value = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let response = server.get("/api/lists/not-a-number").await.unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_PATH_PARAMETER");
}
