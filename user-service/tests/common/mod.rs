#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use auth::Authenticator;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;
use user_service::domain::user::ports::Clock;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::TokenAuthority;
use user_service::inbound::grpc::UserGrpcService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryCredentialStore;
use user_service::proto::user_service_client::UserServiceClient;
use user_service::proto::user_service_server::UserServiceServer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Clock the tests move forward by hand.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Test application serving HTTP and gRPC on random ports, backed by an
/// in-memory credential store.
pub struct TestApp {
    pub address: String,
    pub grpc_address: String,
    pub api_client: reqwest::Client,
    pub clock: Arc<ManualClock>,
    pub store: Arc<InMemoryCredentialStore>,
    pub service: Arc<dyn UserServicePort>,
}

impl TestApp {
    /// Spawn the application in background tasks and return TestApp
    pub async fn spawn() -> Self {
        let store = Arc::new(InMemoryCredentialStore::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let authenticator = Arc::new(Authenticator::with_password_hasher(
            JWT_SECRET,
            PasswordHasher::with_cost(1024, 1, 1).expect("Invalid password cost"),
        ));

        let service: Arc<dyn UserServicePort> = Arc::new(TokenAuthority::new(
            Arc::clone(&store),
            Arc::clone(&clock),
            authenticator,
            Duration::hours(1),
        ));

        // Use random ports (0 = OS assigns)
        let http_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let http_port = http_listener.local_addr().unwrap().port();

        let grpc_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let grpc_port = grpc_listener.local_addr().unwrap().port();

        let router = create_router(Arc::clone(&service));
        tokio::spawn(async move {
            axum::serve(http_listener, router).await.expect("Server error");
        });

        let grpc_service = UserGrpcService::new(Arc::clone(&service));
        tokio::spawn(async move {
            Server::builder()
                .add_service(UserServiceServer::new(grpc_service))
                .serve_with_incoming(TcpListenerStream::new(grpc_listener))
                .await
                .expect("gRPC server error");
        });

        Self {
            address: format!("http://127.0.0.1:{}", http_port),
            grpc_address: format!("http://127.0.0.1:{}", grpc_port),
            api_client: reqwest::Client::new(),
            clock,
            store,
            service,
        }
    }

    /// Connect a generated gRPC client to the running server
    pub async fn grpc_client(&self) -> UserServiceClient<Channel> {
        UserServiceClient::connect(self.grpc_address.clone())
            .await
            .expect("Failed to connect gRPC client")
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}
