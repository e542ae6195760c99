use mongodb::{Client, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Round-trip a `ping` to the server.
pub async fn ping(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::options::ClientOptions;
    use std::time::Duration;

    #[tokio::test]
    async fn test_ping_unreachable_server_fails() {
        // Nothing listens on port 1; server selection fails fast.
        let mut options = ClientOptions::parse("mongodb://127.0.0.1:1").await.unwrap();
        options.server_selection_timeout = Some(Duration::from_millis(200));
        let client = Client::with_options(options).unwrap();

        let err = ping(&client).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
        assert!(err.to_string().starts_with("Health check failed"));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_ping_live_server() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(ping(&client).await.is_ok());
    }
}
