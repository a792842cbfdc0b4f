//! Response decoding integration tests.

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use topsites_auth::{Credentials, ResponseGroup, TopSitesRequest};
    use topsites_xml::{AtomError, parse_top_sites_response};

    use crate::{
        ACCESS_KEY, CITIES_DOC, COUNTRY_DOC, SECRET_KEY, StubReply, StubTransport, stub_client,
    };

    #[tokio::test]
    async fn test_should_decode_success_document_end_to_end() {
        let client = stub_client(StubTransport::new(StubReply::Body(COUNTRY_DOC)));
        let request = TopSitesRequest::builder().country_code("US").build();

        let decoded = client
            .fetch(&Credentials::new(ACCESS_KEY, SECRET_KEY), &request)
            .await
            .unwrap();
        let response = decoded.response();

        assert_eq!(
            response
                .response_status()
                .and_then(|s| s.status_code())
                .map(|c| c.value()),
            Some("Success")
        );
        let sites = response
            .top_sites_result()
            .and_then(|r| r.alexa())
            .and_then(|a| a.top_sites())
            .and_then(|t| t.list())
            .and_then(|l| l.sites())
            .unwrap();
        let first = sites.get(0).expect("first site is present");
        assert_eq!(first.data_url().unwrap().value(), "google.com");
        assert_eq!(first.global().and_then(|g| g.rank()).map(|r| r.value()), Some(1));
        assert_eq!(
            first
                .country()
                .and_then(|c| c.page_views())
                .and_then(|p| p.per_user())
                .map(|p| p.value()),
            Some(Decimal::new(1381, 2))
        );
    }

    #[tokio::test]
    async fn test_should_decode_city_listing() {
        let client = stub_client(StubTransport::new(StubReply::Body(CITIES_DOC)));
        let request = TopSitesRequest::builder()
            .response_group(ResponseGroup::ListCities)
            .build();

        let decoded = client
            .fetch(&Credentials::new(ACCESS_KEY, SECRET_KEY), &request)
            .await
            .unwrap();
        let top_sites = decoded
            .response()
            .top_sites_result()
            .and_then(|r| r.alexa())
            .and_then(|a| a.top_sites())
            .unwrap();

        assert!(top_sites.list().is_none());
        let cities = top_sites.cities().unwrap();
        let names: Vec<&str> = cities
            .iter()
            .filter_map(|c| c.name())
            .map(|n| n.value())
            .collect();
        assert_eq!(names, ["New York", "Los Angeles"]);
        assert_eq!(cities[0].users().map(|u| u.value()), Some(Decimal::new(275, 2)));
        assert!(cities[1].page_views().is_none());
    }

    #[test]
    fn test_should_serialize_decoded_tree_to_json() {
        let decoded = parse_top_sites_response(COUNTRY_DOC.as_bytes()).unwrap();
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(
            json["Response"]["ResponseStatus"]["StatusCode"],
            serde_json::json!("Success")
        );
    }

    #[test]
    fn test_should_fail_whole_parse_on_bad_number() {
        let doc = COUNTRY_DOC.replace(
            "<aws:TotalSites>674102</aws:TotalSites>",
            "<aws:TotalSites>many</aws:TotalSites>",
        );
        assert!(matches!(
            parse_top_sites_response(doc.as_bytes()),
            Err(AtomError::NumericFormat { .. })
        ));
    }

    #[test]
    fn test_should_fail_when_response_container_is_missing() {
        let doc = "<aws:TopSitesResponse xmlns:aws=\"urn:x\"></aws:TopSitesResponse>";
        let err = parse_top_sites_response(doc.as_bytes()).unwrap_err();
        assert!(matches!(err, AtomError::SchemaMismatch { .. }));
        assert_eq!(err.fragment(), Some(doc));
    }
}
