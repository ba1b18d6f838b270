// Adapters layer: concrete implementations of the domain ports.

pub mod rest_countries;

pub use rest_countries::RestCountriesClient;
