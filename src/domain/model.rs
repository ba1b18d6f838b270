use serde::{Deserialize, Serialize};

/// One country as the rest of the crate sees it. Built from an [`ApiCountry`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryProfile {
    pub name: String,
    pub capital: Option<String>,
    pub region: String,
    pub subregion: String,
    pub population: u64,
    pub area_km2: f64,
    pub flag_url: String,
    pub borders: Vec<String>,
    pub code: String,
}

/// Country record as returned by the REST API. Only the fields the lookup needs are decoded;
/// anything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCountry {
    pub name: ApiName,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub flags: ApiFlags,
    #[serde(default)]
    pub borders: Vec<String>,
    pub cca3: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiName {
    pub common: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiFlags {
    #[serde(default)]
    pub png: String,
}

/// `/alpha/{code}` answers with an array on current API versions and a bare object on older
/// ones; accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<ApiCountry>),
    One(Box<ApiCountry>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<ApiCountry> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![*item],
        }
    }
}

impl From<ApiCountry> for CountryProfile {
    fn from(raw: ApiCountry) -> Self {
        let capital = if raw.capital.is_empty() {
            None
        } else {
            Some(raw.capital.join(", "))
        };

        Self {
            name: raw.name.common,
            capital,
            region: raw.region,
            subregion: raw.subregion.unwrap_or_default(),
            population: raw.population,
            area_km2: raw.area,
            flag_url: raw.flags.png,
            borders: raw.borders,
            code: raw.cca3,
        }
    }
}
