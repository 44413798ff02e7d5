pub mod gate;
pub mod http;
pub mod services;
pub mod sizing;
