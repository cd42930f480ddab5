//! Listings infrastructure - the external listings provider

pub mod http_client;
mod parse;
mod realtor;

pub use http_client::{HttpFailure, ListingsHttpClient, ReqwestListingsClient};
pub use parse::parse_listing;
pub use realtor::{
    RealtorConfig, RealtorListingFetcher, DEFAULT_REALTOR_BASE_URL, DEFAULT_REALTOR_HOST,
};
