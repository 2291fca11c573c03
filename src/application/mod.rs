pub mod builder;
pub mod dto;
pub mod errors;
pub mod ports;
pub mod reference_resolver;
pub mod use_cases;
