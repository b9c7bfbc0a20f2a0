//! Shared harness: a real server on an ephemeral port, a capturing mailer,
//! and a stub identity verifier.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use jobnexus_api::app::services::{AppServices, IdentityVerifier, VerifiedIdentity};
use jobnexus_api::app::{build_app, cors_layer};
use jobnexus_api::bootstrap::ensure_seed_admin;
use jobnexus_api::config::Config;
use jobnexus_auth::TokenService;
use jobnexus_core::DomainResult;
use jobnexus_infra::{InMemoryStore, MailError, Mailer};

pub const ADMIN_EMAIL: &str = "admin@test.local";
pub const ADMIN_PASSWORD: &str = "admin-password-1";
pub const JWT_SECRET: &str = "test-secret";

/// Records reset secrets instead of sending them anywhere.
#[derive(Default)]
pub struct CaptureMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Mailer for CaptureMailer {
    async fn send_password_reset(&self, to: &str, secret: &str) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), secret.to_string()));
        Ok(())
    }
}

/// Accepts any id token and asserts a fixed identity.
pub struct StubVerifier {
    pub email: String,
    pub name: String,
}

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, _id_token: &str) -> DomainResult<VerifiedIdentity> {
        Ok(VerifiedIdentity {
            email: self.email.clone(),
            name: self.name.clone(),
        })
    }
}

pub struct TestServer {
    pub base_url: String,
    pub mailer: Arc<CaptureMailer>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        let config = Config {
            jwt_secret: JWT_SECRET.to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            cors_origins: "*".to_string(),
            token_ttl_hours: 24,
            seed_admin_email: ADMIN_EMAIL.to_string(),
            seed_admin_password: ADMIN_PASSWORD.to_string(),
            google_client_id: None,
        };

        let mailer = Arc::new(CaptureMailer::default());
        let services = Arc::new(AppServices {
            store: Arc::new(InMemoryStore::new()),
            tokens: TokenService::new(JWT_SECRET.as_bytes(), config.token_ttl_hours),
            mailer: Arc::clone(&mailer) as Arc<dyn Mailer>,
            verifier: Arc::new(StubVerifier {
                email: "sso.candidate@example.com".to_string(),
                name: "Sso Candidate".to_string(),
            }),
        });

        ensure_seed_admin(services.store.as_ref(), &config)
            .await
            .expect("failed to seed superadmin");

        let app = build_app(Arc::clone(&services), cors_layer("*"));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            mailer,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn register(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> reqwest::Response {
    client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": name, "email": email, "password": password, "role": role }))
        .send()
        .await
        .unwrap()
}

/// Login and return the bearer token, asserting success.
pub async fn login(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    password: &str,
) -> String {
    let res = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK, "login failed for {email}");
    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

pub async fn admin_token(client: &reqwest::Client, base_url: &str) -> String {
    login(client, base_url, ADMIN_EMAIL, ADMIN_PASSWORD).await
}

/// Create a subadmin with the given capability names and log it in.
pub async fn subadmin_token(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
    permissions: &[&str],
) -> String {
    let admin = admin_token(client, base_url).await;
    let res = client
        .post(format!("{base_url}/api/admin/subadmins"))
        .bearer_auth(&admin)
        .json(&json!({
            "name": "Delegated Admin",
            "email": email,
            "password": "subadmin-pass-1",
            "permissions": permissions,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    login(client, base_url, email, "subadmin-pass-1").await
}

/// Register an employer, approve it as the superadmin, and log it in.
pub async fn approved_employer_token(
    client: &reqwest::Client,
    base_url: &str,
    email: &str,
) -> String {
    let res = register(client, base_url, "Acme HR", email, "employer-pass-1", "employer").await;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["user"]["id"].as_str().unwrap().to_string();

    let admin = admin_token(client, base_url).await;
    let res = client
        .put(format!("{base_url}/api/admin/employers/{id}/approve"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    login(client, base_url, email, "employer-pass-1").await
}

pub async fn candidate_token(client: &reqwest::Client, base_url: &str, email: &str) -> String {
    let res = register(client, base_url, "Jane Doe", email, "candidate-pass-1", "candidate").await;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    login(client, base_url, email, "candidate-pass-1").await
}

/// Post a job as the employer and approve it as the superadmin, returning
/// the job id.
pub async fn approved_job(
    client: &reqwest::Client,
    base_url: &str,
    employer_token: &str,
    title: &str,
) -> String {
    let res = client
        .post(format!("{base_url}/api/employer/jobs"))
        .bearer_auth(employer_token)
        .json(&json!({
            "title": title,
            "description": "Build and run services",
            "company": "Acme",
            "location": "Berlin",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["job"]["id"].as_str().unwrap().to_string();

    let admin = admin_token(client, base_url).await;
    let res = client
        .put(format!("{base_url}/api/admin/jobs/{id}/approve"))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    id
}
