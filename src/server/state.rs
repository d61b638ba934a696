use crate::{config::Config, controller::AddressController, node::Node};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: AddressController,
    pub node: Arc<dyn Node>,
}

/// Mount point of the address API; empty when served from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiPrefix(pub String);

impl ApiPrefix {
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ApiPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
