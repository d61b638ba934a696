pub mod addr;
pub mod addrs;
pub mod createaddress;
pub mod metrics;
pub mod root;
