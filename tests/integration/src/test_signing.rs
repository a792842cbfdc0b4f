//! Signing integration tests.

#[cfg(test)]
mod tests {
    use topsites_auth::{
        Credentials, Endpoint, ResponseGroup, TopSitesRequest, build_signed_uri,
        verify_signed_query,
    };

    use crate::{
        ACCESS_KEY, COUNTRY_DOC, SECRET_KEY, StubReply, StubTransport, fixed_time, stub_client,
    };

    fn us_request() -> TopSitesRequest {
        TopSitesRequest::builder()
            .country_code("US")
            .start(1)
            .count(100)
            .response_group(ResponseGroup::Country)
            .build()
    }

    fn param_names(query: &str) -> Vec<&str> {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('=').map(|(name, _)| name))
            .collect()
    }

    #[test]
    fn test_should_build_string_to_sign_in_canonical_order() {
        let creds = Credentials::new(ACCESS_KEY, SECRET_KEY);
        let signed =
            build_signed_uri(&creds, &us_request(), &Endpoint::default(), &fixed_time()).unwrap();

        let query = signed
            .string_to_sign
            .strip_prefix("GET\nats.amazonaws.com\n/\n")
            .expect("string to sign starts with method, host and path");
        assert_eq!(
            param_names(query),
            [
                "AWSAccessKeyId",
                "Action",
                "Count",
                "CountryCode",
                "ResponseGroup",
                "SignatureMethod",
                "SignatureVersion",
                "Start",
                "Timestamp",
            ]
        );
        assert!(query.contains("Count=100&CountryCode=US&ResponseGroup=Country"));
        assert!(!signed.string_to_sign.ends_with('\n'));
    }

    #[test]
    fn test_should_sign_deterministically() {
        let creds = Credentials::new(ACCESS_KEY, SECRET_KEY);
        let first =
            build_signed_uri(&creds, &us_request(), &Endpoint::default(), &fixed_time()).unwrap();
        let second =
            build_signed_uri(&creds, &us_request(), &Endpoint::default(), &fixed_time()).unwrap();
        assert_eq!(first.uri.to_string(), second.uri.to_string());
    }

    #[test]
    fn test_should_detect_any_tampered_parameter() {
        let creds = Credentials::new(ACCESS_KEY, SECRET_KEY);
        let signed =
            build_signed_uri(&creds, &us_request(), &Endpoint::default(), &fixed_time()).unwrap();
        let query = signed.uri.query().unwrap().to_owned();
        verify_signed_query(SECRET_KEY, "ats.amazonaws.com", &query).unwrap();

        let (unsigned, signature) = query.rsplit_once("&Signature=").unwrap();
        for (i, pair) in unsigned.split('&').enumerate() {
            let (name, value) = pair.split_once('=').unwrap();
            let mut pairs: Vec<String> = unsigned.split('&').map(str::to_owned).collect();
            pairs[i] = format!("{name}={value}X");
            let tampered = format!("{}&Signature={signature}", pairs.join("&"));

            assert!(
                verify_signed_query(SECRET_KEY, "ats.amazonaws.com", &tampered).is_err(),
                "changing {name} must invalidate the signature"
            );
        }
    }

    #[tokio::test]
    async fn test_should_send_signed_uri_through_transport() {
        let transport = StubTransport::new(StubReply::Body(COUNTRY_DOC));
        let client = stub_client(transport.clone());
        let creds = Credentials::new(ACCESS_KEY, SECRET_KEY);

        client.fetch(&creds, &us_request()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].host(), Some("ats.amazonaws.com"));
        verify_signed_query(SECRET_KEY, "ats.amazonaws.com", requests[0].query().unwrap())
            .unwrap();
    }
}
