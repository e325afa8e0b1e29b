use retry_http::{Form, RetryingClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let base = std::env::var("RETRY_HTTP_DEMO_URL")
        .unwrap_or_else(|_| "https://httpbin.org".to_owned());

    // Built once, cloned into whatever needs outbound HTTP.
    let client = RetryingClient::new()?;

    let body = client.get(&format!("{base}/get")).await?;
    println!("GET: {}", String::from_utf8_lossy(&body));

    let form = Form::from_pairs([("tag", vec!["a", "b"]), ("name", vec!["demo"])]);
    let body = client.post_form(&format!("{base}/post"), form).await?;
    println!("POST form: {}", String::from_utf8_lossy(&body));

    let body = client
        .post_body(&format!("{base}/post"), "application/json", r#"{"ping":true}"#)
        .await?;
    println!("POST body: {}", String::from_utf8_lossy(&body));

    Ok(())
}
