pub mod describe;
pub mod list;
pub mod new;
pub mod remove;
pub mod sign;
pub mod trust;
