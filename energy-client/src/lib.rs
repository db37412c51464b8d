pub mod aggregate;
pub mod domain;
