pub mod catalog;
pub mod components;
pub mod config;
pub mod session;
pub mod system_order;
