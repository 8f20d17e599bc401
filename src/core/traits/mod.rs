pub mod registry;
pub mod toolkit;
