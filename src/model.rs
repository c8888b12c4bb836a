pub mod geo_model;
pub mod sunspot_api_model;
