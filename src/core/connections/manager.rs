use crate::core::components::manager::ComponentStore;
use crate::core::config::CircuitConfig;
use crate::core::connections::connection_validator::{ConnectionRejection, ConnectionValidator};
use crate::core::connections::port_validator::PortValidator;
use crate::core::geometry::{port_position, ResolvedPort, ViewTransform};
use crate::core::types::{ComponentId, ConnectionId, PortHandle, PortId, PortType, Point};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// A wire from one output to one input
///
/// Both endpoints cache a view-space position. The cache goes stale when a
/// component moves, is resized, changes arity or the view changes, and is
/// refreshed by the repair passes on [`ConnectionManager`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    /// Always an output
    pub from_port: ResolvedPort,
    /// Always an input
    pub to_port: ResolvedPort,
    /// Routed polyline, cosmetic only
    pub points: Vec<Point>,
}

impl Connection {
    /// Check if this connection touches a component at either end
    pub fn involves_component(&self, component_id: &ComponentId) -> bool {
        self.from_port.component_id == *component_id || self.to_port.component_id == *component_id
    }

    /// Check if this connection touches a specific port
    pub fn involves_port(&self, component_id: &ComponentId, port_id: &PortId) -> bool {
        (self.from_port.component_id == *component_id && self.from_port.port_id == *port_id)
            || (self.to_port.component_id == *component_id && self.to_port.port_id == *port_id)
    }
}

/// The pending first half of a two-click connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStartInfo {
    pub component_id: ComponentId,
    pub port_id: PortId,
    pub port_type: PortType,
}

impl ConnectionStartInfo {
    pub fn handle(&self) -> PortHandle {
        PortHandle {
            component_id: self.component_id,
            port_id: self.port_id,
            port_type: self.port_type,
        }
    }
}

impl From<PortHandle> for ConnectionStartInfo {
    fn from(handle: PortHandle) -> Self {
        Self {
            component_id: handle.component_id,
            port_id: handle.port_id,
            port_type: handle.port_type,
        }
    }
}

/// Two-click connect protocol state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectState {
    #[default]
    Idle,
    Pending(ConnectionStartInfo),
}

/// What a port click did
#[derive(Debug, Clone, PartialEq)]
pub enum PortClickOutcome {
    /// First click recorded; waiting for the other end
    Armed(ConnectionStartInfo),
    /// Second click created a wire
    Connected(ConnectionId),
    /// Second click (or an unresolvable first click) was declined
    Rejected(ConnectionRejection),
}

impl PortClickOutcome {
    pub fn connection_id(&self) -> Option<ConnectionId> {
        match self {
            PortClickOutcome::Connected(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PortClickOutcome::Rejected(_))
    }
}

/// Owns the wire set, the connect protocol and the selected wire
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    connections: Vec<Connection>,
    state: ConnectState,
    selected: Option<ConnectionId>,
    repair_epsilon: f64,
    allow_feedback_loops: bool,
}

impl ConnectionManager {
    /// Create an empty connection manager
    pub fn new(config: &CircuitConfig) -> Self {
        Self {
            connections: Vec::new(),
            state: ConnectState::Idle,
            selected: None,
            repair_epsilon: config.repair_epsilon,
            allow_feedback_loops: config.allow_feedback_loops,
        }
    }

    /// All wires in creation order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == *id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn state(&self) -> ConnectState {
        self.state
    }

    /// The armed first click, if any
    pub fn pending_start(&self) -> Option<ConnectionStartInfo> {
        match self.state {
            ConnectState::Idle => None,
            ConnectState::Pending(start) => Some(start),
        }
    }

    /// Forget an armed first click
    pub fn cancel_pending(&mut self) {
        self.state = ConnectState::Idle;
    }

    /// Wires touching a component
    pub fn connections_for_component(&self, component_id: &ComponentId) -> Vec<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.involves_component(component_id))
            .collect()
    }

    /// The wire driving an input, if any
    pub fn driver_of(&self, component_id: &ComponentId, port_id: &PortId) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.to_port.component_id == *component_id && c.to_port.port_id == *port_id)
    }

    /// Handle one click on a port
    ///
    /// From idle the click is armed. From pending the two ports are
    /// resolved, validated and, if legal, wired. The protocol returns to
    /// idle after every second click whatever the result.
    pub fn port_click(
        &mut self,
        store: &ComponentStore,
        transform: &ViewTransform,
        target: PortHandle,
    ) -> PortClickOutcome {
        match self.state {
            ConnectState::Idle => match PortValidator::resolve(store, &target, transform) {
                Ok(_) => {
                    let start = ConnectionStartInfo::from(target);
                    self.state = ConnectState::Pending(start);
                    debug!(
                        "Armed connection from {} port '{}' on '{}'",
                        start.port_type, start.port_id, start.component_id
                    );
                    PortClickOutcome::Armed(start)
                }
                Err(rejection) => {
                    warn!("Ignoring click on unknown port: {}", rejection);
                    PortClickOutcome::Rejected(rejection)
                }
            },
            ConnectState::Pending(start) => {
                self.state = ConnectState::Idle;
                match self.complete(store, transform, start.handle(), target) {
                    Ok(id) => PortClickOutcome::Connected(id),
                    Err(rejection) => {
                        debug!("Connection rejected: {}", rejection);
                        PortClickOutcome::Rejected(rejection)
                    }
                }
            }
        }
    }

    fn complete(
        &mut self,
        store: &ComponentStore,
        transform: &ViewTransform,
        start: PortHandle,
        target: PortHandle,
    ) -> Result<ConnectionId, ConnectionRejection> {
        if start.same_port(&target) {
            return Err(ConnectionRejection::SamePort(target));
        }
        let start = PortValidator::resolve(store, &start, transform)?;
        let target = PortValidator::resolve(store, &target, transform)?;
        let (from, to) = ConnectionValidator::validate_new_connection(
            &self.connections,
            start,
            target,
            self.allow_feedback_loops,
        )?;

        let connection = Connection {
            id: ConnectionId::new(),
            from_port: from,
            to_port: to,
            points: Vec::new(),
        };
        let id = connection.id;
        info!(
            "Connected '{}':{} -> '{}':{}",
            from.component_id, from.port_id, to.component_id, to.port_id
        );
        self.connections.push(connection);
        Ok(id)
    }

    /// Refresh the endpoints sitting on one component
    ///
    /// The far endpoint of each wire is left as is. Returns the number of
    /// endpoints rewritten.
    pub fn update_connections_after_move(
        &mut self,
        store: &ComponentStore,
        transform: &ViewTransform,
        component_id: &ComponentId,
    ) -> usize {
        let Some(component) = store.get(component_id) else {
            return 0;
        };
        let mut updated = 0;
        for connection in self
            .connections
            .iter_mut()
            .filter(|c| c.involves_component(component_id))
        {
            for endpoint in [&mut connection.from_port, &mut connection.to_port] {
                if endpoint.component_id != *component_id {
                    continue;
                }
                let Some(index) = component.port_index(endpoint.port_type, &endpoint.port_id) else {
                    continue;
                };
                if let Some(position) = port_position(component, endpoint.port_type, index, transform) {
                    endpoint.position = position;
                    updated += 1;
                }
            }
        }
        debug!(
            "Repaired {} endpoints after moving component '{}'",
            updated, component_id
        );
        updated
    }

    /// Reconcile every wire against the current store
    ///
    /// Endpoints are only rewritten when they drifted by more than the
    /// repair epsilon. Wires referring to a missing component or port are
    /// left untouched. Returns the number of wires changed; a second call
    /// with no structural change in between returns 0.
    pub fn update_connections_for_changed_components(
        &mut self,
        store: &ComponentStore,
        transform: &ViewTransform,
    ) -> usize {
        let epsilon = self.repair_epsilon;
        let mut changed = 0;
        for connection in &mut self.connections {
            let from = PortValidator::resolve(store, &connection.from_port.handle(), transform);
            let to = PortValidator::resolve(store, &connection.to_port.handle(), transform);
            let (Ok(from), Ok(to)) = (from, to) else {
                continue;
            };
            // a NaN distance counts as drift
            let from_moved = !(from.position.distance_to(&connection.from_port.position) <= epsilon);
            let to_moved = !(to.position.distance_to(&connection.to_port.position) <= epsilon);
            if from_moved {
                connection.from_port.position = from.position;
            }
            if to_moved {
                connection.to_port.position = to.position;
            }
            if from_moved || to_moved {
                changed += 1;
            }
        }
        if changed > 0 {
            debug!("Reconciled {} connections", changed);
        }
        changed
    }

    /// Mark a wire as selected; unknown IDs clear the selection
    pub fn select_connection(&mut self, id: Option<ConnectionId>) {
        self.selected = id.filter(|id| self.get(id).is_some());
    }

    pub fn selected_connection(&self) -> Option<ConnectionId> {
        self.selected
    }

    /// Remove a wire by ID, clearing the selection if it was selected
    pub fn delete_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.id == *id)?;
        if self.selected == Some(*id) {
            self.selected = None;
        }
        info!("Deleted connection '{}'", id);
        Some(self.connections.remove(index))
    }

    /// The wire set without any wire touching a component
    ///
    /// Pure: nothing changes until the result is passed to
    /// [`ConnectionManager::replace_connections`].
    pub fn delete_connections_for_component(&self, component_id: &ComponentId) -> Vec<Connection> {
        self.connections
            .iter()
            .filter(|c| !c.involves_component(component_id))
            .cloned()
            .collect()
    }

    /// The wire set without any wire touching one port. Pure, like
    /// [`ConnectionManager::delete_connections_for_component`].
    pub fn delete_connections_for_port(
        &self,
        component_id: &ComponentId,
        port_id: &PortId,
    ) -> Vec<Connection> {
        self.connections
            .iter()
            .filter(|c| !c.involves_port(component_id, port_id))
            .cloned()
            .collect()
    }

    /// Commit a new wire set, dropping a selection that no longer exists
    pub fn replace_connections(&mut self, connections: Vec<Connection>) {
        let removed = self.connections.len().saturating_sub(connections.len());
        self.connections = connections;
        if let Some(selected) = self.selected {
            if self.get(&selected).is_none() {
                self.selected = None;
            }
        }
        if removed > 0 {
            info!("Dropped {} connections", removed);
        }
    }

    /// Restore wires from a snapshot, replaying the legality rules
    ///
    /// Each wire is checked against the ones accepted before it. Illegal
    /// wires and repeated IDs are dropped; reversed wires are flipped.
    /// Returns the number of wires dropped.
    pub(crate) fn restore(
        &mut self,
        connections: Vec<Connection>,
        state: ConnectState,
        selected: Option<ConnectionId>,
    ) -> usize {
        let mut accepted: Vec<Connection> = Vec::with_capacity(connections.len());
        let mut dropped = 0;
        for connection in connections {
            if accepted.iter().any(|c| c.id == connection.id) {
                warn!("Dropping restored connection '{}': repeated ID", connection.id);
                dropped += 1;
                continue;
            }
            match ConnectionValidator::validate_new_connection(
                &accepted,
                connection.from_port,
                connection.to_port,
                self.allow_feedback_loops,
            ) {
                Ok((from, to)) => accepted.push(Connection {
                    from_port: from,
                    to_port: to,
                    ..connection
                }),
                Err(rejection) => {
                    warn!("Dropping restored connection '{}': {}", connection.id, rejection);
                    dropped += 1;
                }
            }
        }
        self.connections = accepted;
        self.state = state;
        self.selected = None;
        self.select_connection(selected);
        dropped
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new(&CircuitConfig::default())
    }
}
