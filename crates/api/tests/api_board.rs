//! Job moderation, capability isolation, and application rules.

mod common;

use reqwest::StatusCode;
use serde_json::json;

use common::TestServer;

async fn public_job_titles(client: &reqwest::Client, base_url: &str) -> Vec<String> {
    let res = client
        .get(format!("{base_url}/api/jobs"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn pending_employer_cannot_post_until_approved() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = common::register(
        &client,
        &srv.base_url,
        "Acme HR",
        "hr@acme.test",
        "employer-pass-1",
        "employer",
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"]["status"], "pending");
    let employer_id = body["user"]["id"].as_str().unwrap().to_string();

    // Login works while pending; posting does not.
    let token = common::login(&client, &srv.base_url, "hr@acme.test", "employer-pass-1").await;
    let res = client
        .post(format!("{}/api/employer/jobs", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Backend Engineer",
            "description": "Build services",
            "company": "Acme",
            "location": "Remote",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "account_not_active");

    let admin = common::admin_token(&client, &srv.base_url).await;
    let res = client
        .put(format!(
            "{}/api/admin/employers/{employer_id}/approve",
            srv.base_url
        ))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Same token, now the live account is active.
    let res = client
        .post(format!("{}/api/employer/jobs", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Backend Engineer",
            "description": "Build services",
            "company": "Acme",
            "location": "Remote",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["job"]["status"], "pending");

    // Pending jobs stay invisible publicly.
    assert!(public_job_titles(&client, &srv.base_url).await.is_empty());
}

#[tokio::test]
async fn owner_edit_resets_approval_and_foreign_edit_reads_absent() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let owner = common::approved_employer_token(&client, &srv.base_url, "hr@acme.test").await;
    let job_id = common::approved_job(&client, &srv.base_url, &owner, "Backend Engineer").await;
    assert_eq!(
        public_job_titles(&client, &srv.base_url).await,
        vec!["Backend Engineer"]
    );

    // A single-field edit by the owner pulls it back to moderation.
    let res = client
        .put(format!("{}/api/employer/jobs/{job_id}", srv.base_url))
        .bearer_auth(&owner)
        .json(&json!({ "salary": "100k" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["job"]["status"], "pending");
    assert!(body["job"]["approved_by"].is_null());
    assert!(public_job_titles(&client, &srv.base_url).await.is_empty());

    // Another employer cannot even see the posting through this endpoint.
    let other = common::approved_employer_token(&client, &srv.base_url, "hr@other.test").await;
    let res = client
        .put(format!("{}/api/employer/jobs/{job_id}", srv.base_url))
        .bearer_auth(&other)
        .json(&json!({ "salary": "1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn capabilities_are_isolated_between_subadmins() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let job_mod = common::subadmin_token(
        &client,
        &srv.base_url,
        "jobs@test.local",
        &["MANAGE_JOBS"],
    )
    .await;
    let employer_mod = common::subadmin_token(
        &client,
        &srv.base_url,
        "employers@test.local",
        &["APPROVE_EMPLOYERS"],
    )
    .await;

    // MANAGE_JOBS can see the moderation queue but not employer approvals.
    let res = client
        .get(format!("{}/api/admin/jobs/pending", srv.base_url))
        .bearer_auth(&job_mod)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/admin/employers/pending", srv.base_url))
        .bearer_auth(&job_mod)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "permission denied");

    // And the mirror image.
    let res = client
        .get(format!("{}/api/admin/employers/pending", srv.base_url))
        .bearer_auth(&employer_mod)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/admin/jobs/pending", srv.base_url))
        .bearer_auth(&employer_mod)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_capability_rejected_at_subadmin_creation() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let admin = common::admin_token(&client, &srv.base_url).await;
    let res = client
        .post(format!("{}/api/admin/subadmins", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({
            "name": "Over Reach",
            "email": "over@test.local",
            "password": "subadmin-pass-1",
            "permissions": ["MANAGE_JOBS", "DELETE_EVERYTHING"],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("invalid capability"));
}

#[tokio::test]
async fn subadmin_management_is_superadmin_only() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Even a subadmin holding every capability cannot mint peers.
    let all_caps = common::subadmin_token(
        &client,
        &srv.base_url,
        "allcaps@test.local",
        &[
            "MANAGE_JOBS",
            "MANAGE_USERS",
            "APPROVE_EMPLOYERS",
            "VIEW_REPORTS",
            "MANAGE_BLOG",
        ],
    )
    .await;

    let res = client
        .post(format!("{}/api/admin/subadmins", srv.base_url))
        .bearer_auth(&all_caps)
        .json(&json!({
            "name": "Peer",
            "email": "peer@test.local",
            "password": "subadmin-pass-1",
            "permissions": [],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_application_conflicts_until_withdrawn() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let employer = common::approved_employer_token(&client, &srv.base_url, "hr@acme.test").await;
    let job_id = common::approved_job(&client, &srv.base_url, &employer, "Backend Engineer").await;
    let candidate = common::candidate_token(&client, &srv.base_url, "jane@example.com").await;

    let apply = || {
        client
            .post(format!("{}/api/candidate/applications", srv.base_url))
            .bearer_auth(&candidate)
            .json(&json!({ "job_id": job_id, "cover_letter": "Hi" }))
            .send()
    };

    let res = apply().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let application_id = body["application"]["id"].as_str().unwrap().to_string();

    let res = apply().await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Withdraw, then the pair is free again.
    let res = client
        .delete(format!(
            "{}/api/candidate/applications/{application_id}",
            srv.base_url
        ))
        .bearer_auth(&candidate)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = apply().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn application_status_is_owner_employer_only() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let owner = common::approved_employer_token(&client, &srv.base_url, "hr@acme.test").await;
    let job_id = common::approved_job(&client, &srv.base_url, &owner, "Backend Engineer").await;
    let candidate = common::candidate_token(&client, &srv.base_url, "jane@example.com").await;

    let res = client
        .post(format!("{}/api/candidate/applications", srv.base_url))
        .bearer_auth(&candidate)
        .json(&json!({ "job_id": job_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let application_id = body["application"]["id"].as_str().unwrap().to_string();

    // A different employer gets absence, not forbidden.
    let other = common::approved_employer_token(&client, &srv.base_url, "hr@other.test").await;
    let res = client
        .put(format!(
            "{}/api/employer/applications/{application_id}/status",
            srv.base_url
        ))
        .bearer_auth(&other)
        .json(&json!({ "status": "shortlisted" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Unknown status values are rejected.
    let res = client
        .put(format!(
            "{}/api/employer/applications/{application_id}/status",
            srv.base_url
        ))
        .bearer_auth(&owner)
        .json(&json!({ "status": "ghosted" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .put(format!(
            "{}/api/employer/applications/{application_id}/status",
            srv.base_url
        ))
        .bearer_auth(&owner)
        .json(&json!({ "status": "shortlisted" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["application"]["status"], "shortlisted");
}

#[tokio::test]
async fn applying_to_an_unapproved_job_reads_absent() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let employer = common::approved_employer_token(&client, &srv.base_url, "hr@acme.test").await;

    // Posted but never approved.
    let res = client
        .post(format!("{}/api/employer/jobs", srv.base_url))
        .bearer_auth(&employer)
        .json(&json!({
            "title": "Shadow Role",
            "description": "Unmoderated",
            "company": "Acme",
            "location": "Remote",
        }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let job_id = body["job"]["id"].as_str().unwrap().to_string();

    let candidate = common::candidate_token(&client, &srv.base_url, "jane@example.com").await;
    let res = client
        .post(format!("{}/api/candidate/applications", srv.base_url))
        .bearer_auth(&candidate)
        .json(&json!({ "job_id": job_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Same through the public detail endpoint.
    let res = client
        .get(format!("{}/api/jobs/{job_id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_search_is_substring_matching() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let employer = common::approved_employer_token(&client, &srv.base_url, "hr@acme.test").await;
    common::approved_job(&client, &srv.base_url, &employer, "Backend Engineer").await;
    common::approved_job(&client, &srv.base_url, &employer, "Product Designer").await;

    let res = client
        .get(format!("{}/api/jobs?search=engin", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    // Metacharacters are treated as text, not patterns.
    let res = client
        .get(format!("{}/api/jobs?search=.%2A", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}
