use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::check_token;
use super::handlers::login;
use super::handlers::logout;
use super::handlers::register;
use crate::domain::user::ports::UserServicePort;
use crate::proto::user_service_server::UserService as UserServiceProto;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::LogoutResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::proto::TokenRequest;
use crate::proto::TokenResponse;

pub struct UserGrpcService {
    service: Arc<dyn UserServicePort>,
}

impl UserGrpcService {
    pub fn new(service: Arc<dyn UserServicePort>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let response = register::register(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn check_token(
        &self,
        request: Request<TokenRequest>,
    ) -> Result<Response<TokenResponse>, Status> {
        let response =
            check_token::check_token(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn logout(
        &self,
        request: Request<TokenRequest>,
    ) -> Result<Response<LogoutResponse>, Status> {
        let response = logout::logout(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
