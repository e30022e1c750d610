pub mod date_deserialization_ops;
pub mod geo_utils;
