use docdepot::presentation::cli::CliApp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is installed by the app once configuration is known
    let app = CliApp::new();
    app.run().await
}
