use crate::core::components::manager::ComponentStore;
use crate::core::connections::connection_validator::ConnectionRejection;
use crate::core::geometry::{resolve_port, ResolvedPort, ViewTransform};
use crate::core::types::PortHandle;

/// Port lookup and validation against the component store
pub struct PortValidator;

impl PortValidator {
    /// Resolve a clicked port against current geometry
    ///
    /// Fails if the component or port no longer exists, or if the port sits
    /// on the other side of the component than the click claimed.
    pub fn resolve(
        store: &ComponentStore,
        handle: &PortHandle,
        transform: &ViewTransform,
    ) -> Result<ResolvedPort, ConnectionRejection> {
        let component = store
            .get(&handle.component_id)
            .ok_or(ConnectionRejection::UnresolvedPort(*handle))?;
        let resolved = resolve_port(component, &handle.port_id, transform)
            .ok_or(ConnectionRejection::UnresolvedPort(*handle))?;
        if resolved.port_type != handle.port_type {
            return Err(ConnectionRejection::UnresolvedPort(*handle));
        }
        Ok(resolved)
    }

    /// Resolve a port without a claimed side
    pub fn resolve_any(
        store: &ComponentStore,
        handle: &PortHandle,
        transform: &ViewTransform,
    ) -> Option<ResolvedPort> {
        store
            .get(&handle.component_id)
            .and_then(|component| resolve_port(component, &handle.port_id, transform))
    }
}
