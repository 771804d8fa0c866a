use mock_server::MockMisskey;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let token = std::env::var("MOCK_TOKEN").unwrap_or_else(|_| "mock-token".to_string());
    let addr = format!("127.0.0.1:{port}");

    let mock = MockMisskey::new(&token)
        .with_note("9mock1", "2024-03-01T12:00:00.000Z", Some("hello world"))
        .with_note("9mock2", "2024-03-01T12:00:01.000Z", Some("spam link"))
        .with_note("9mock3", "2024-03-01T12:00:02.000Z", Some("say hi"))
        .with_note("9mock4", "2024-03-01T12:00:03.000Z", None);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock misskey listening");
    mock_server::run(listener, mock).await
}
