pub mod gateway;
pub mod modules;
