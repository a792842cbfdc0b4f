//! Request lifecycle integration tests.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use topsites_auth::{Credentials, TopSitesRequest};
    use topsites_client::{ClientError, RequestState};

    use crate::{ACCESS_KEY, COUNTRY_DOC, SECRET_KEY, StubReply, StubTransport, stub_client};

    const END_DEADLINE: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_should_reach_terminal_state_after_immediate_cancel() {
        let client = stub_client(StubTransport::new(StubReply::Body(COUNTRY_DOC)));
        let handle = client
            .begin(
                &Credentials::new(ACCESS_KEY, SECRET_KEY),
                &TopSitesRequest::default(),
            )
            .unwrap();

        handle.cancel();
        assert!(handle.state().is_terminal());

        let result = tokio::time::timeout(END_DEADLINE, handle.end())
            .await
            .expect("end must not hang");
        match result {
            Err(ClientError::Cancelled) => {
                assert_eq!(client.state(), RequestState::Cancelled);
            }
            Ok(_) => assert_eq!(client.state(), RequestState::Completed),
            Err(other) => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_should_cancel_request_that_never_answers() {
        let client = stub_client(StubTransport::new(StubReply::Hang));
        let handle = client
            .begin(
                &Credentials::new(ACCESS_KEY, SECRET_KEY),
                &TopSitesRequest::default(),
            )
            .unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(handle.state(), RequestState::InFlight);
        assert!(handle.cancel());

        let result = tokio::time::timeout(END_DEADLINE, handle.end())
            .await
            .expect("end must not hang");
        assert!(matches!(result, Err(ClientError::Cancelled)));
    }

    #[tokio::test]
    async fn test_should_notify_waiters_on_completion() {
        let client = stub_client(StubTransport::new(StubReply::Body(COUNTRY_DOC)));
        let handle = client
            .begin(
                &Credentials::new(ACCESS_KEY, SECRET_KEY),
                &TopSitesRequest::default(),
            )
            .unwrap();

        let state = tokio::time::timeout(END_DEADLINE, handle.finished())
            .await
            .expect("completion is signalled");
        assert_eq!(state, RequestState::Completed);
        assert!(handle.end().await.is_ok());
    }

    #[tokio::test]
    async fn test_should_allow_new_request_after_terminal_state() {
        let client = stub_client(StubTransport::new(StubReply::Hang));
        let creds = Credentials::new(ACCESS_KEY, SECRET_KEY);

        let first = client.begin(&creds, &TopSitesRequest::default()).unwrap();
        assert!(matches!(
            client.begin(&creds, &TopSitesRequest::default()),
            Err(ClientError::Busy)
        ));

        first.cancel();
        let second = client.begin(&creds, &TopSitesRequest::default()).unwrap();
        second.cancel();
        assert!(matches!(second.end().await, Err(ClientError::Cancelled)));
        assert!(matches!(first.end().await, Err(ClientError::Cancelled)));
    }
}
