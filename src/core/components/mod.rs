pub mod manager;
pub mod port_specs;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use manager::ComponentStore;
pub use port_specs::{Port, PortSpec};
pub use registry::{ComponentRegistry, ComponentTemplate};
pub use types::{CircuitError, ComponentInstance, ComponentSubtype, ComponentType};
