//! Live service test.

#[cfg(test)]
mod tests {
    use topsites_auth::{Credentials, TopSitesRequest};
    use topsites_client::{ClientError, TopSitesClient, TopSitesConfig};

    use crate::init_tracing;

    #[tokio::test]
    #[ignore = "requires AWS credentials"]
    async fn test_should_fetch_live_country_ranking() {
        init_tracing();
        let access_key = std::env::var("AWS_ACCESS_KEY_ID").expect("AWS_ACCESS_KEY_ID");
        let secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").expect("AWS_SECRET_ACCESS_KEY");

        let client = TopSitesClient::new(&TopSitesConfig::from_env()).unwrap();
        let request = TopSitesRequest::builder()
            .country_code("US")
            .start(1)
            .count(10)
            .build();

        match client
            .fetch(&Credentials::new(&access_key, secret_key.as_bytes()), &request)
            .await
        {
            Ok(response) => {
                let status = response
                    .response()
                    .response_status()
                    .and_then(|s| s.status_code())
                    .map(|c| c.value().to_owned());
                assert_eq!(status.as_deref(), Some("Success"));
            }
            // A rejected key still proves the request was signed and the
            // error document decoded.
            Err(ClientError::Service(service)) => {
                assert!(!service.response().errors().is_empty());
            }
            Err(other) => panic!("live request failed: {other}"),
        }
    }
}
