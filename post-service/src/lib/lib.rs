pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::post;

pub mod proto {
    pub mod post {
        tonic::include_proto!("post");
    }

    pub mod user {
        tonic::include_proto!("user");
    }
}
