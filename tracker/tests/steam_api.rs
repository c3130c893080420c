use std::time::Duration;

use tracker::steam_api::{ApiError, Client};

/// A local address nothing listens on.
fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn transport_error_hides_api_key() {
    let client = Client::new("very-secret-key", closed_address(), Duration::from_secs(2)).unwrap();

    let err = client.user_stats("76561198000000001").await.unwrap_err();

    assert!(matches!(err, ApiError::Http(_)), "{:?}", err);
    assert!(!err.to_string().contains("very-secret-key"), "{}", err);
    assert!(!format!("{:?}", err).contains("very-secret-key"), "{:?}", err);
}

#[tokio::test]
async fn profile_error_hides_api_key() {
    let client = Client::new("very-secret-key", closed_address(), Duration::from_secs(2)).unwrap();

    let err = client.player_summaries(&["1", "2"]).await.unwrap_err();

    assert!(!err.to_string().contains("very-secret-key"), "{}", err);
}
