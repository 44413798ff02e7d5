pub mod responses;
pub mod rest_broker;

pub use rest_broker::RestBrokerClient;
