fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server for this service, client for integration tests and peers
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/user.proto"], &["../proto"])?;

    Ok(())
}
