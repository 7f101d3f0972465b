pub mod core;
pub mod kmap;

// Re-export commonly used types
pub use crate::core::circuit::{Circuit, CircuitGraph, SharedCircuit};
pub use crate::core::components::{
    CircuitError, ComponentInstance, ComponentRegistry, ComponentSubtype, ComponentType,
};
pub use crate::core::config::CircuitConfig;
pub use crate::core::connections::{Connection, ConnectionRejection, PortClickOutcome};
pub use crate::core::geometry::ViewTransform;
pub use crate::core::types::{ComponentId, ConnectionId, PortHandle, PortId, PortType, Point, Size};
pub use crate::kmap::{KmapExercise, KmapGrid, ValidationResult};
