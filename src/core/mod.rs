pub mod aggregate;
pub mod completion;
pub mod models;
pub mod ports;
pub mod services;
pub mod sync;
