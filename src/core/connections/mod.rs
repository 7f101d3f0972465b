pub mod connection_validator;
pub mod manager;
pub mod port_validator;

pub use connection_validator::{ConnectionRejection, ConnectionValidator};
pub use manager::{
    ConnectState, Connection, ConnectionManager, ConnectionStartInfo, PortClickOutcome,
};
pub use port_validator::PortValidator;
