use std::time::Duration;

use anyhow::Error;
use async_trait::async_trait;
use tonic::transport::Channel;
use tonic::transport::Endpoint;

use crate::domain::post::models::AccessToken;
use crate::domain::post::models::UserId;
use crate::domain::post::ports::Authorizer;
use crate::post::errors::PostError;
use crate::proto::user::user_service_client::UserServiceClient;
use crate::proto::user::TokenRequest;

/// Asks the token authority who a token belongs to via `CheckToken`.
pub struct GrpcAuthorizationClient {
    client: UserServiceClient<Channel>,
}

impl GrpcAuthorizationClient {
    /// Does not dial. The channel connects on first use and reconnects
    /// after failures. `timeout` bounds both the connect and each call.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let channel = Endpoint::from_shared(url.to_string())?
            .connect_timeout(timeout)
            .timeout(timeout)
            .connect_lazy();
        Ok(Self {
            client: UserServiceClient::new(channel),
        })
    }

    fn deny(reason: impl std::fmt::Display) -> PostError {
        tracing::warn!(reason = %reason, "Authorization denied");
        PostError::Denied
    }
}

#[async_trait]
impl Authorizer for GrpcAuthorizationClient {
    async fn authorize(&self, token: &AccessToken) -> Result<UserId, PostError> {
        let request = tonic::Request::new(TokenRequest {
            token: token.as_str().to_string(),
        });

        let mut client = self.client.clone();
        let response = client
            .check_token(request)
            .await
            .map_err(|status| {
                Self::deny(format!(
                    "check_token failed: {:?} {}",
                    status.code(),
                    status.message()
                ))
            })?
            .into_inner();

        if !response.is_authenticated {
            return Err(Self::deny("token authority reported is_authenticated=false"));
        }

        Ok(UserId(response.user_id))
    }
}
