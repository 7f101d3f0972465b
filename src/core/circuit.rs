use crate::core::components::manager::ComponentStore;
use crate::core::components::registry::{ComponentRegistry, ComponentTemplate};
use crate::core::components::types::{CircuitError, ComponentInstance, ComponentSubtype};
use crate::core::config::CircuitConfig;
use crate::core::connections::manager::{
    ConnectState, Connection, ConnectionManager, ConnectionStartInfo, PortClickOutcome,
};
use crate::core::geometry::ViewTransform;
use crate::core::types::{ComponentId, ConnectionId, PortHandle, PortId, Point, Size};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Serializable view of the whole circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitGraph {
    pub components: Vec<ComponentInstance>,
    pub connections: Vec<Connection>,
    pub pending_start: Option<ConnectionStartInfo>,
    pub selected_connection: Option<ConnectionId>,
    pub view: ViewTransform,
}

/// One editing session: components, wires and view
///
/// Each gesture method mutates the store first and then runs the wire
/// repair or pruning that gesture needs, so callers never observe a store
/// change without the matching wire update.
#[derive(Debug, Clone)]
pub struct Circuit {
    config: CircuitConfig,
    store: ComponentStore,
    connections: ConnectionManager,
    view: ViewTransform,
}

impl Circuit {
    /// Create an empty circuit with the standard templates
    pub fn new() -> Self {
        Self::with_config(ComponentRegistry::standard(), CircuitConfig::default())
    }

    /// Create an empty circuit with injected templates and configuration
    pub fn with_config(registry: ComponentRegistry, config: CircuitConfig) -> Self {
        Self {
            connections: ConnectionManager::new(&config),
            store: ComponentStore::new(registry),
            view: ViewTransform::IDENTITY,
            config,
        }
    }

    /// Rebuild a session from a snapshot
    ///
    /// Wires are replayed through the same legality rules as a click:
    /// a wire that would duplicate another or give an input a second
    /// driver is dropped with a warning, and reversed wires are flipped
    /// to run output to input. A reconciliation pass then refreshes the
    /// cached positions against the snapshot's components.
    pub fn from_graph(graph: CircuitGraph, registry: ComponentRegistry, config: CircuitConfig) -> Self {
        let mut circuit = Self::with_config(registry, config);
        for component in graph.components {
            circuit.store.insert(component);
        }
        let state = match graph.pending_start {
            Some(start) => ConnectState::Pending(start),
            None => ConnectState::Idle,
        };
        circuit
            .connections
            .restore(graph.connections, state, graph.selected_connection);
        circuit.view = graph.view;
        circuit.reconcile();
        circuit
    }

    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    pub fn store(&self) -> &ComponentStore {
        &self.store
    }

    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connections
    }

    pub fn components(&self) -> &[ComponentInstance] {
        self.store.components()
    }

    pub fn component(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.store.get(id)
    }

    pub fn connections(&self) -> &[Connection] {
        self.connections.connections()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Place a component from the registry
    pub fn add(&mut self, subtype: ComponentSubtype, position: Point) -> Result<ComponentId, CircuitError> {
        self.store.add_subtype(subtype, position)
    }

    /// Place a component from an explicit template
    pub fn add_template(&mut self, template: &ComponentTemplate, position: Point) -> ComponentId {
        self.store.add(template, position)
    }

    /// Move a component and drag its wire endpoints along
    pub fn move_component(&mut self, id: &ComponentId, position: Point) -> Result<(), CircuitError> {
        self.store.move_component(id, position)?;
        self.connections
            .update_connections_after_move(&self.store, &self.view, id);
        Ok(())
    }

    /// Resize a component and refresh its wire endpoints
    pub fn resize(&mut self, id: &ComponentId, dw: f64, dh: f64) -> Result<Size, CircuitError> {
        let size = self.store.resize(id, dw, dh)?;
        self.connections
            .update_connections_after_move(&self.store, &self.view, id);
        Ok(size)
    }

    /// Add an input to a variadic gate; existing inputs shift, so wires are refreshed
    pub fn add_input_port(&mut self, id: &ComponentId) -> Result<PortId, CircuitError> {
        let port = self.store.add_input_port(id)?;
        self.connections
            .update_connections_after_move(&self.store, &self.view, id);
        Ok(port)
    }

    /// Remove the last input of a variadic gate along with its wire
    pub fn remove_input_port(&mut self, id: &ComponentId) -> Result<PortId, CircuitError> {
        let port = self.store.remove_input_port(id)?;
        let remaining = self.connections.delete_connections_for_port(id, &port);
        self.connections.replace_connections(remaining);
        if let Some(start) = self.connections.pending_start() {
            if start.component_id == *id && start.port_id == port {
                self.connections.cancel_pending();
            }
        }
        self.connections
            .update_connections_after_move(&self.store, &self.view, id);
        Ok(port)
    }

    pub fn duplicate(&mut self, id: &ComponentId) -> Result<ComponentId, CircuitError> {
        self.store.duplicate(id)
    }

    /// Remove a component and every wire touching it
    pub fn remove(&mut self, id: &ComponentId) -> Result<ComponentInstance, CircuitError> {
        let removed = self.store.remove(id)?;
        let remaining = self.connections.delete_connections_for_component(id);
        self.connections.replace_connections(remaining);
        if let Some(start) = self.connections.pending_start() {
            if start.component_id == *id {
                self.connections.cancel_pending();
            }
        }
        Ok(removed)
    }

    pub fn toggle_state(&mut self, id: &ComponentId) -> Result<bool, CircuitError> {
        self.store.toggle_state(id)
    }

    pub fn edit_name(&mut self, id: &ComponentId, name: &str) -> Result<(), CircuitError> {
        self.store.edit_name(id, name)
    }

    /// Feed a port click into the two-click connect protocol
    pub fn port_click(&mut self, port: PortHandle) -> PortClickOutcome {
        self.connections.port_click(&self.store, &self.view, port)
    }

    pub fn cancel_pending(&mut self) {
        self.connections.cancel_pending();
    }

    pub fn select_connection(&mut self, id: Option<ConnectionId>) {
        self.connections.select_connection(id);
    }

    pub fn delete_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.connections.delete_connection(id)
    }

    /// Set the zoom (clamped to the configured range) and refresh all wires
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        if !zoom.is_finite() {
            warn!("Ignoring non-finite zoom {}", zoom);
            return self.view.zoom;
        }
        let clamped = self.config.clamp_zoom(zoom);
        if clamped != zoom {
            warn!("Zoom {} clamped to {}", zoom, clamped);
        }
        self.view.zoom = clamped;
        self.reconcile();
        clamped
    }

    /// Shift the view and refresh all wires; non-finite offsets are ignored
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if !(dx.is_finite() && dy.is_finite()) {
            warn!("Ignoring non-finite pan ({}, {})", dx, dy);
            return;
        }
        self.view.pan = self.view.pan.offset(dx, dy);
        self.reconcile();
    }

    /// Full reconciliation of cached wire positions
    pub fn reconcile(&mut self) -> usize {
        self.connections
            .update_connections_for_changed_components(&self.store, &self.view)
    }

    /// Snapshot everything the rendering layer needs
    pub fn graph(&self) -> CircuitGraph {
        CircuitGraph {
            components: self.store.components().to_vec(),
            connections: self.connections.connections().to_vec(),
            pending_start: self.connections.pending_start(),
            selected_connection: self.connections.selected_connection(),
            view: self.view,
        }
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

/// A circuit shared between threads
///
/// Each gesture runs under one lock so the store mutation and the wire
/// repair it triggers are never interleaved with another gesture.
#[derive(Debug, Clone, Default)]
pub struct SharedCircuit {
    inner: Arc<Mutex<Circuit>>,
}

impl SharedCircuit {
    pub fn new(circuit: Circuit) -> Self {
        Self {
            inner: Arc::new(Mutex::new(circuit)),
        }
    }

    /// Run one gesture with exclusive access to the circuit
    pub fn gesture<R>(&self, f: impl FnOnce(&mut Circuit) -> R) -> R {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Circuit lock poisoned by a panicking gesture; continuing");
                poisoned.into_inner()
            }
        };
        f(&mut guard)
    }

    pub fn graph(&self) -> CircuitGraph {
        self.gesture(|circuit| circuit.graph())
    }
}

impl From<Circuit> for SharedCircuit {
    fn from(circuit: Circuit) -> Self {
        info!("Sharing circuit with {} components", circuit.components().len());
        Self::new(circuit)
    }
}
