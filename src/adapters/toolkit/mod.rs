pub mod keytool_backend;
