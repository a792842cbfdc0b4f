//! Service error integration tests.

#[cfg(test)]
mod tests {
    use topsites_auth::{Credentials, TopSitesRequest};
    use topsites_client::{ClientError, TransportError};

    use crate::{ACCESS_KEY, ERROR_DOC, SECRET_KEY, StubReply, StubTransport, stub_client};

    fn bad_request() -> TopSitesRequest {
        TopSitesRequest::builder().country_code("ZZ").build()
    }

    #[tokio::test]
    async fn test_should_surface_service_error_with_one_error_pair() {
        let client = stub_client(StubTransport::new(StubReply::Status(
            http::StatusCode::BAD_REQUEST,
            Some(ERROR_DOC),
        )));

        let err = client
            .fetch(&Credentials::new(ACCESS_KEY, SECRET_KEY), &bad_request())
            .await
            .unwrap_err();

        let ClientError::Service(service) = err else {
            panic!("expected a service error, got {err:?}");
        };
        let errors = service.response().errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code().unwrap().value(), "InvalidParameterValue");
        assert_eq!(
            service.response().request_id().unwrap().value(),
            "8f0e3c61-2b7a-4d0e-a6a1-3c5d9e2f7b40"
        );
        assert!(matches!(
            service.transport(),
            TransportError::Status { status, .. } if *status == http::StatusCode::BAD_REQUEST
        ));
        assert!(std::error::Error::source(&service).is_some());
    }

    #[tokio::test]
    async fn test_should_surface_bare_transport_error_without_body() {
        let client = stub_client(StubTransport::new(StubReply::Status(
            http::StatusCode::SERVICE_UNAVAILABLE,
            None,
        )));

        let err = client
            .fetch(&Credentials::new(ACCESS_KEY, SECRET_KEY), &bad_request())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Transport(TransportError::Status { body: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_should_surface_timeout_as_transport_error() {
        let client = stub_client(StubTransport::new(StubReply::Timeout));
        let err = client
            .fetch(&Credentials::new(ACCESS_KEY, SECRET_KEY), &bad_request())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
    }
}
