pub mod file_registry;
