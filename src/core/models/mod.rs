pub mod certificate;
pub mod keystore;
pub mod requests;
pub mod signing_strategy;
pub mod validity;
