#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Duration;
use post_service::domain::post::ports::PostServicePort;
use post_service::domain::post::service::PostService;
use post_service::inbound::grpc::PostGrpcService;
use post_service::inbound::http::router::create_router;
use post_service::outbound::grpc::GrpcAuthorizationClient;
use post_service::outbound::repositories::InMemoryPostRepository;
use post_service::proto::post::post_service_client::PostServiceClient;
use post_service::proto::post::post_service_server::PostServiceServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;
use user_service::domain::user::models::AccessToken;
use user_service::domain::user::models::Credential;
use user_service::domain::user::models::EmailAddress;
use user_service::domain::user::models::LoginCommand;
use user_service::domain::user::models::RegisterCommand;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::TokenAuthority;
use user_service::inbound::grpc::UserGrpcService;
use user_service::outbound::clock::SystemClock;
use user_service::outbound::repositories::InMemoryCredentialStore;
use user_service::proto::user_service_server::UserServiceServer;

const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const AUTHORITY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// In-memory token authority with cheap password hashing.
pub fn token_authority() -> Arc<dyn UserServicePort> {
    Arc::new(TokenAuthority::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(SystemClock),
        Arc::new(Authenticator::with_password_hasher(
            JWT_SECRET,
            PasswordHasher::with_cost(1024, 1, 1).expect("Invalid password cost"),
        )),
        Duration::hours(1),
    ))
}

pub async fn random_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// Post service wired to a real token authority over gRPC, both in-process
/// with in-memory storage.
pub struct TestApp {
    pub address: String,
    pub grpc_address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<dyn UserServicePort>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let users = token_authority();

        let (user_listener, user_port) = random_listener().await;
        let user_grpc = UserGrpcService::new(Arc::clone(&users));
        tokio::spawn(async move {
            Server::builder()
                .add_service(UserServiceServer::new(user_grpc))
                .serve_with_incoming(TcpListenerStream::new(user_listener))
                .await
                .expect("user-service gRPC error");
        });

        Self::spawn_with_authority(
            users,
            &format!("http://127.0.0.1:{}", user_port),
            AUTHORITY_TIMEOUT,
        )
        .await
    }

    /// Spawn the post service against an arbitrary token authority URL.
    pub async fn spawn_with_authority(
        users: Arc<dyn UserServicePort>,
        authority_url: &str,
        timeout: std::time::Duration,
    ) -> Self {
        let authorizer = Arc::new(
            GrpcAuthorizationClient::new(authority_url, timeout)
                .expect("Failed to create authorization client"),
        );
        let posts: Arc<dyn PostServicePort> = Arc::new(PostService::new(
            Arc::new(InMemoryPostRepository::new()),
            authorizer,
        ));

        let (http_listener, http_port) = random_listener().await;
        let router = create_router(Arc::clone(&posts));
        tokio::spawn(async move {
            axum::serve(http_listener, router).await.expect("Server error");
        });

        let (grpc_listener, grpc_port) = random_listener().await;
        let post_grpc = PostGrpcService::new(posts);
        tokio::spawn(async move {
            Server::builder()
                .add_service(PostServiceServer::new(post_grpc))
                .serve_with_incoming(TcpListenerStream::new(grpc_listener))
                .await
                .expect("post-service gRPC error");
        });

        Self {
            address: format!("http://127.0.0.1:{}", http_port),
            grpc_address: format!("http://127.0.0.1:{}", grpc_port),
            api_client: reqwest::Client::new(),
            users,
        }
    }

    /// Register an identity and log it in, returning the token.
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        let email = EmailAddress::new(email.to_string()).unwrap();
        let password = Credential::new(password.to_string()).unwrap();

        self.users
            .register(RegisterCommand::new(email.clone(), password.clone()))
            .await
            .expect("Register failed");
        self.users
            .login(LoginCommand::new(email, password))
            .await
            .expect("Login failed")
            .into_inner()
    }

    pub async fn logout(&self, token: &str) {
        let token = AccessToken::new(token.to_string()).unwrap();
        self.users.logout(&token).await.expect("Logout failed");
    }

    pub async fn grpc_client(&self) -> PostServiceClient<Channel> {
        PostServiceClient::connect(self.grpc_address.clone())
            .await
            .expect("Failed to connect gRPC client")
    }

    pub fn post(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn patch(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub fn delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
