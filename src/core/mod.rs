pub mod state;
pub mod workflow;

pub use crate::domain::model::CountryProfile;
pub use crate::domain::ports::{ConfigProvider, CountryApi};
pub use crate::utils::error::Result;
