pub mod grpc_user_server;
pub mod handlers;

pub use grpc_user_server::UserGrpcService;
