use async_trait::async_trait;
use serde_json::Value;

use super::http_client::{HttpFailure, ListingsHttpClient};
use super::parse::parse_listing;
use crate::domain::listing::{PropertyListing, RegionCode};
use crate::domain::region::ListingFetcher;
use crate::domain::DomainError;

pub const DEFAULT_REALTOR_BASE_URL: &str = "https://realty-in-us.p.rapidapi.com";
pub const DEFAULT_REALTOR_HOST: &str = "realty-in-us.p.rapidapi.com";
const DEFAULT_PAGE_SIZE: u32 = 200;

/// Connection settings for the RapidAPI realtor endpoint
#[derive(Debug, Clone)]
pub struct RealtorConfig {
    pub base_url: String,
    pub host: String,
    pub api_key: String,
    pub page_size: u32,
}

impl RealtorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_REALTOR_BASE_URL.to_string(),
            host: DEFAULT_REALTOR_HOST.to_string(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Listing fetcher for the RapidAPI realtor listings service
#[derive(Debug)]
pub struct RealtorListingFetcher<C: ListingsHttpClient> {
    client: C,
    config: RealtorConfig,
}

impl<C: ListingsHttpClient> RealtorListingFetcher<C> {
    pub fn new(client: C, config: RealtorConfig) -> Self {
        Self { client, config }
    }

    fn list_url(&self) -> String {
        format!("{}/properties/v3/list", self.config.base_url)
    }

    /// Only a 404 means the region has no data; rejected credentials are a
    /// configuration problem, everything else may succeed later
    fn classify(region: &RegionCode, failure: HttpFailure) -> DomainError {
        if failure.status == Some(404) {
            DomainError::permanent_fetch(region.as_str(), failure.message)
        } else if failure.is_auth_failure() {
            DomainError::configuration(format!(
                "Listings provider rejected the API key: {}",
                failure.message
            ))
        } else {
            DomainError::transient_fetch(region.as_str(), failure.message)
        }
    }

    /// Result records, accepting both the flat and the nested response shape
    fn records(body: &Value) -> Option<&Vec<Value>> {
        body.get("properties")
            .and_then(Value::as_array)
            .or_else(|| body.pointer("/data/home_search/results").and_then(Value::as_array))
    }
}

#[async_trait]
impl<C: ListingsHttpClient> ListingFetcher for RealtorListingFetcher<C> {
    async fn fetch(&self, region: &RegionCode) -> Result<Vec<PropertyListing>, DomainError> {
        let query = [
            ("postal_code", region.to_string()),
            ("limit", self.config.page_size.to_string()),
            ("offset", "0".to_string()),
        ];
        let headers = vec![
            ("X-RapidAPI-Key", self.config.api_key.as_str()),
            ("X-RapidAPI-Host", self.config.host.as_str()),
        ];

        let body = self
            .client
            .get_json(&self.list_url(), headers, &query)
            .await
            .map_err(|failure| Self::classify(region, failure))?;

        let records = match Self::records(&body) {
            Some(records) if !records.is_empty() => records,
            _ => {
                return Err(DomainError::permanent_fetch(
                    region.as_str(),
                    "No properties returned",
                ));
            }
        };

        let listings: Vec<PropertyListing> = records.iter().filter_map(parse_listing).collect();

        tracing::debug!(
            region = %region,
            records = records.len(),
            listings = listings.len(),
            "Parsed provider records"
        );

        Ok(listings)
    }

    fn fetcher_name(&self) -> &'static str {
        "realtor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::listings::http_client::mock::MockListingsHttpClient;
    use crate::infrastructure::listings::ReqwestListingsClient;
    use crate::infrastructure::region::RegionCache;
    use std::time::Duration;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BASE: &str = "http://listings.test";
    const URL: &str = "http://listings.test/properties/v3/list";

    fn zip() -> RegionCode {
        RegionCode::new("55104").unwrap()
    }

    fn fetcher(client: MockListingsHttpClient) -> RealtorListingFetcher<MockListingsHttpClient> {
        RealtorListingFetcher::new(client, RealtorConfig::new("key").with_base_url(BASE))
    }

    #[tokio::test]
    async fn test_fetch_parses_flat_response() {
        let client = MockListingsHttpClient::new().with_response(
            URL,
            json!({"properties": [
                {"address": {"line": "1 A St"}, "price": 100000},
                {"address": {"line": "2 B St"}},
                {"address": {"line": "3 C St"}, "list_price": 200000}
            ]}),
        );
        let fetcher = fetcher(client);

        let listings = fetcher.fetch(&zip()).await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].address, "1 a st");

        let requests = fetcher.client.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0]
            .1
            .contains(&("postal_code".to_string(), "55104".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_parses_nested_response() {
        let client = MockListingsHttpClient::new().with_response(
            URL,
            json!({"data": {"home_search": {"results": [
                {"location": {"address": {"line": "9 Oak Ave"}}, "list_price": 310000}
            ]}}}),
        );

        let listings = fetcher(client).fetch(&zip()).await.unwrap();
        assert_eq!(listings[0].address, "9 oak ave");
    }

    #[tokio::test]
    async fn test_empty_result_is_permanent() {
        let client =
            MockListingsHttpClient::new().with_response(URL, json!({"properties": []}));

        let err = fetcher(client).fetch(&zip()).await.unwrap_err();
        assert!(matches!(err, DomainError::PermanentFetch { .. }));
    }

    #[tokio::test]
    async fn test_status_classification() {
        let cases = [
            (HttpFailure::status(429, "HTTP 429"), true),
            (HttpFailure::status(502, "HTTP 502"), true),
            (HttpFailure::transport("connection refused"), true),
            (HttpFailure::status(400, "HTTP 400"), true),
            (HttpFailure::status(404, "HTTP 404"), false),
        ];

        for (failure, transient) in cases {
            let client = MockListingsHttpClient::new().with_error(URL, failure.clone());
            let err = fetcher(client).fetch(&zip()).await.unwrap_err();

            assert_eq!(err.is_transient(), transient, "failure {:?}", failure);
        }

        let client =
            MockListingsHttpClient::new().with_error(URL, HttpFailure::status(404, "HTTP 404"));
        let err = fetcher(client).fetch(&zip()).await.unwrap_err();
        assert!(matches!(err, DomainError::PermanentFetch { .. }));
    }

    #[tokio::test]
    async fn test_rejected_api_key_is_a_configuration_error() {
        for status in [401, 403] {
            let client = MockListingsHttpClient::new()
                .with_error(URL, HttpFailure::status(status, format!("HTTP {}", status)));
            let err = fetcher(client).fetch(&zip()).await.unwrap_err();

            assert!(matches!(err, DomainError::Configuration { .. }), "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_rejected_api_key_is_never_cached() {
        let client =
            MockListingsHttpClient::new().with_error(URL, HttpFailure::status(401, "HTTP 401"));
        let cache = RegionCache::new(fetcher(client));
        let max_age = Duration::from_secs(30 * 24 * 3600);

        let err = cache.get_or_fetch(&zip(), max_age).await.unwrap_err();
        assert!(err.is_transient());
        assert!(cache.entry(&zip()).await.is_none());

        assert!(cache.get_or_fetch(&zip(), max_age).await.is_err());
        assert_eq!(cache.fetcher().client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_against_http_server() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/properties/v3/list"))
            .and(query_param("postal_code", "55104"))
            .and(query_param("limit", "50"))
            .and(header("X-RapidAPI-Key", "secret"))
            .and(header("X-RapidAPI-Host", "listings.test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "properties": [{"address": "12 Elm St", "list_price": 250000}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = RealtorConfig::new("secret")
            .with_base_url(server.uri())
            .with_host("listings.test")
            .with_page_size(50);
        let fetcher = RealtorListingFetcher::new(ReqwestListingsClient::new(), config);

        let listings = fetcher.fetch(&zip()).await.unwrap();

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].price, 250_000);
    }
}
