pub mod rest;
pub mod unconfigured;

pub use rest::RestTableStore;
pub use unconfigured::UnconfiguredTableStore;
