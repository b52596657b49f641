pub mod cli;
pub mod metrics;
pub mod probe;
pub mod server;
pub mod status;
pub mod tls;
