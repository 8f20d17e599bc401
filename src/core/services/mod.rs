pub mod keystore_service;
pub mod truststore_service;

#[cfg(test)]
pub(crate) mod test_support;
