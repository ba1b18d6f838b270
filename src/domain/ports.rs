use crate::domain::model::CountryProfile;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote source of country records.
#[async_trait]
pub trait CountryApi: Send + Sync {
    /// Countries whose name matches `name`, in the order the service returns them. An empty
    /// match is reported as `LookupError::NotFoundError`, never as an empty vector.
    async fn search_by_name(&self, name: &str) -> Result<Vec<CountryProfile>>;

    /// The single country identified by a 3-letter code.
    async fn lookup_by_code(&self, code: &str) -> Result<CountryProfile>;
}

#[async_trait]
impl<T: CountryApi + ?Sized> CountryApi for std::sync::Arc<T> {
    async fn search_by_name(&self, name: &str) -> Result<Vec<CountryProfile>> {
        (**self).search_by_name(name).await
    }

    async fn lookup_by_code(&self, code: &str) -> Result<CountryProfile> {
        (**self).lookup_by_code(code).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn full_text_match(&self) -> bool;
}
