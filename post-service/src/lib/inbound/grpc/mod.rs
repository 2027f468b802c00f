pub mod grpc_post_server;
pub mod handlers;

pub use grpc_post_server::PostGrpcService;
