use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenCodec;
use chrono::Duration;
use identity_service::domain::principal::errors::IdentityError;
use identity_service::domain::principal::models::Principal;
use identity_service::domain::principal::models::Username;
use identity_service::domain::principal::ports::PrincipalRepository;
use identity_service::domain::principal::service::IdentityService;
use identity_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory credential store standing in for Postgres.
///
/// The guarded map insert plays the role of the uniqueness constraint:
/// concurrent duplicate registrations see exactly one success. Lookups are
/// counted so tests can assert the gate never touched the resolver.
pub struct InMemoryPrincipalRepository {
    principals: Mutex<HashMap<String, Principal>>,
    lookup_count: AtomicUsize,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self {
            principals: Mutex::new(HashMap::new()),
            lookup_count: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookup_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn create(&self, principal: Principal) -> Result<Principal, IdentityError> {
        let mut principals = self.principals.lock().unwrap();

        if principals.contains_key(principal.username.as_str()) {
            return Err(IdentityError::AlreadyExists(principal.username.to_string()));
        }

        principals.insert(principal.username.to_string(), principal.clone());
        Ok(principal)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Principal>, IdentityError> {
        self.lookup_count.fetch_add(1, Ordering::SeqCst);

        Ok(self
            .principals
            .lock()
            .unwrap()
            .get(username.as_str())
            .cloned())
    }
}

/// Test application that spawns the real router on a random port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryPrincipalRepository>,
    /// Codec sharing the app's secret, for minting hand-rolled tokens.
    pub token_codec: TokenCodec,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryPrincipalRepository::new());
        let identity_service = Arc::new(IdentityService::new(Arc::clone(&repository)));
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, Duration::hours(1)));

        let application = create_router(identity_service, authenticator);
        tokio::spawn(async move {
            axum::serve(listener, application)
                .await
                .expect("Server failed");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            token_codec: TokenCodec::new(TEST_SECRET),
        }
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Register a user, asserting success.
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .post("/auth/register")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the issued bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Login response missing token")
            .to_string()
    }
}
