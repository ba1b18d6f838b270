use crate::domain::model::{ApiCountry, CountryProfile, OneOrMany};
use crate::domain::ports::{ConfigProvider, CountryApi};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// `CountryApi` backed by the restcountries.com v3.1 REST API (or anything serving the same
/// shape under the configured base URL).
pub struct RestCountriesClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> RestCountriesClient<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder = Client::builder();
        // No timeout unless one is configured.
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let base = self.config.api_base_url();
        let mut url = Url::parse(base)?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| LookupError::ConfigError {
                    message: format!("API base URL cannot carry a path: {}", base),
                })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<ApiCountry>> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(LookupError::StatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let payload: OneOrMany = serde_json::from_slice(&body)?;
        Ok(payload.into_vec())
    }
}

#[async_trait]
impl<C: ConfigProvider> CountryApi for RestCountriesClient<C> {
    async fn search_by_name(&self, name: &str) -> Result<Vec<CountryProfile>> {
        let mut url = self.endpoint(&["name", name])?;
        if self.config.full_text_match() {
            url.query_pairs_mut().append_pair("fullText", "true");
        }

        let countries = self.fetch(url).await?;
        if countries.is_empty() {
            return Err(LookupError::NotFoundError {
                query: name.to_string(),
            });
        }

        tracing::debug!("'{}' matched {} countries", name, countries.len());
        Ok(countries.into_iter().map(CountryProfile::from).collect())
    }

    async fn lookup_by_code(&self, code: &str) -> Result<CountryProfile> {
        let url = self.endpoint(&["alpha", code])?;

        self.fetch(url)
            .await?
            .into_iter()
            .next()
            .map(CountryProfile::from)
            .ok_or_else(|| LookupError::NotFoundError {
                query: code.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use httpmock::prelude::*;

    fn country_json(code: &str, name: &str, borders: &[&str]) -> serde_json::Value {
        serde_json::json!({
            "name": {"common": name},
            "capital": [format!("{} City", name)],
            "region": "Europe",
            "subregion": "Test",
            "population": 1000,
            "area": 12.5,
            "flags": {"png": format!("https://flags.test/{}.png", code)},
            "borders": borders,
            "cca3": code
        })
    }

    fn client_for(server: &MockServer) -> RestCountriesClient<ApiConfig> {
        RestCountriesClient::new(ApiConfig::new(server.base_url())).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_matches_in_order() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/name/guinea");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!([
                        country_json("GIN", "Guinea", &["CIV"]),
                        country_json("GNB", "Guinea-Bissau", &["GIN"]),
                    ]));
            })
            .await;

        let result = client_for(&server).search_by_name("guinea").await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].code, "GIN");
        assert_eq!(result[1].code, "GNB");
    }

    #[tokio::test]
    async fn test_search_404_is_reported_as_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/name/Atlantis");
                then.status(404)
                    .json_body(serde_json::json!({"status": 404, "message": "Not Found"}));
            })
            .await;

        let err = client_for(&server)
            .search_by_name("Atlantis")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_empty_array_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/name/Nowhere");
                then.status(200).json_body(serde_json::json!([]));
            })
            .await;

        let err = client_for(&server)
            .search_by_name("Nowhere")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::NotFoundError { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_serialization_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/name/France");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client_for(&server)
            .search_by_name("France")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::SerializationError(_)));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_full_text_flag_adds_query_parameter() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/name/Niger")
                    .query_param("fullText", "true");
                then.status(200)
                    .json_body(serde_json::json!([country_json("NER", "Niger", &[])]));
            })
            .await;

        let mut config = ApiConfig::new(server.base_url());
        config.full_text_match = true;
        let client = RestCountriesClient::new(config).unwrap();

        let result = client.search_by_name("Niger").await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(result[0].code, "NER");
    }

    #[tokio::test]
    async fn test_lookup_by_code_accepts_array_and_object() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/alpha/ESP");
                then.status(200)
                    .json_body(serde_json::json!([country_json("ESP", "Spain", &["FRA"])]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/alpha/PRT");
                then.status(200)
                    .json_body(country_json("PRT", "Portugal", &["ESP"]));
            })
            .await;

        let client = client_for(&server);

        assert_eq!(client.lookup_by_code("ESP").await.unwrap().name, "Spain");
        assert_eq!(client.lookup_by_code("PRT").await.unwrap().name, "Portugal");
    }

    #[tokio::test]
    async fn test_base_url_path_is_preserved() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v3.1/alpha/ISL");
                then.status(200)
                    .json_body(serde_json::json!([country_json("ISL", "Iceland", &[])]));
            })
            .await;

        let client = RestCountriesClient::new(ApiConfig::new(server.url("/v3.1"))).unwrap();
        let iceland = client.lookup_by_code("ISL").await.unwrap();

        api_mock.assert_async().await;
        assert!(iceland.borders.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/alpha/GIB");
                then.status(500);
            })
            .await;

        let err = client_for(&server).lookup_by_code("GIB").await.unwrap_err();

        assert!(matches!(err, LookupError::StatusError { status: 500, .. }));
    }
}
