fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server for post.PostService, client for user.UserService/CheckToken
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/post.proto", "../proto/user.proto"], &["../proto"])?;

    Ok(())
}
