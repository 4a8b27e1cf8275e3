pub mod config;
pub mod convert;
pub mod detect;
pub mod peek;
