use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::create_post;
use super::handlers::delete_post;
use super::handlers::read_post;
use super::handlers::update_post;
use crate::domain::post::ports::PostServicePort;
use crate::proto::post::post_service_server::PostService as PostServiceProto;
use crate::proto::post::CreatePostRequest;
use crate::proto::post::CreatePostResponse;
use crate::proto::post::DeletePostRequest;
use crate::proto::post::DeletePostResponse;
use crate::proto::post::ReadPostRequest;
use crate::proto::post::ReadPostResponse;
use crate::proto::post::UpdatePostRequest;
use crate::proto::post::UpdatePostResponse;

pub struct PostGrpcService {
    service: Arc<dyn PostServicePort>,
}

impl PostGrpcService {
    pub fn new(service: Arc<dyn PostServicePort>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl PostServiceProto for PostGrpcService {
    async fn create_post(
        &self,
        request: Request<CreatePostRequest>,
    ) -> Result<Response<CreatePostResponse>, Status> {
        let response =
            create_post::create_post(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn read_post(
        &self,
        request: Request<ReadPostRequest>,
    ) -> Result<Response<ReadPostResponse>, Status> {
        let response = read_post::read_post(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn update_post(
        &self,
        request: Request<UpdatePostRequest>,
    ) -> Result<Response<UpdatePostResponse>, Status> {
        let response =
            update_post::update_post(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn delete_post(
        &self,
        request: Request<DeletePostRequest>,
    ) -> Result<Response<DeletePostResponse>, Status> {
        let response =
            delete_post::delete_post(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
