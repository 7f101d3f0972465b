use crate::core::connections::manager::Connection;
use crate::core::geometry::ResolvedPort;
use crate::core::types::{PortHandle, PortType};

/// Why a connection attempt was declined
///
/// A rejection is an ordinary outcome: the connection set is left exactly
/// as it was and the connect protocol returns to idle.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionRejection {
    /// The same port was clicked to start and finish the wire
    SamePort(PortHandle),
    /// Both ends are inputs or both are outputs
    SamePortType(PortType),
    /// The exact (output, input) pair is already wired
    DuplicateConnection,
    /// The input already has a driver
    InputAlreadyDriven(PortHandle),
    /// The port no longer exists on the component, or the component is gone
    UnresolvedPort(PortHandle),
    /// The wire would feed a component's output back into itself
    FeedbackLoop,
}

impl std::fmt::Display for ConnectionRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionRejection::SamePort(_) => write!(f, "Cannot connect a port to itself"),
            ConnectionRejection::SamePortType(port_type) => write!(
                f,
                "Cannot connect {} to {}: wires must join one output to one input",
                port_type, port_type
            ),
            ConnectionRejection::DuplicateConnection => {
                write!(f, "These ports are already connected")
            }
            ConnectionRejection::InputAlreadyDriven(handle) => write!(
                f,
                "Input port '{}' on component '{}' is already connected. Multiple drivers not allowed.",
                handle.port_id, handle.component_id
            ),
            ConnectionRejection::UnresolvedPort(handle) => write!(
                f,
                "Port '{}' not found on component '{}'",
                handle.port_id, handle.component_id
            ),
            ConnectionRejection::FeedbackLoop => {
                write!(f, "A component cannot drive its own inputs")
            }
        }
    }
}

impl std::error::Error for ConnectionRejection {}

/// Centralized wiring legality rules
pub struct ConnectionValidator;

impl ConnectionValidator {
    /// Reject output→output and input→input
    pub fn check_port_types(
        start: &ResolvedPort,
        target: &ResolvedPort,
    ) -> Result<(), ConnectionRejection> {
        if !start.port_type.can_connect_to(&target.port_type) {
            return Err(ConnectionRejection::SamePortType(start.port_type));
        }
        Ok(())
    }

    /// Put the output first, whichever end was clicked first
    pub fn normalize(a: ResolvedPort, b: ResolvedPort) -> (ResolvedPort, ResolvedPort) {
        if a.port_type == PortType::Output {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Reject a wire from a component into itself when feedback is disabled
    pub fn check_feedback(
        from: &ResolvedPort,
        to: &ResolvedPort,
        allow_feedback_loops: bool,
    ) -> Result<(), ConnectionRejection> {
        if !allow_feedback_loops && from.component_id == to.component_id {
            return Err(ConnectionRejection::FeedbackLoop);
        }
        Ok(())
    }

    /// Reject an (output, input) pair that already exists
    pub fn check_duplicate(
        connections: &[Connection],
        from: &ResolvedPort,
        to: &ResolvedPort,
    ) -> Result<(), ConnectionRejection> {
        let exists = connections.iter().any(|c| {
            c.from_port.component_id == from.component_id
                && c.from_port.port_id == from.port_id
                && c.to_port.component_id == to.component_id
                && c.to_port.port_id == to.port_id
        });
        if exists {
            return Err(ConnectionRejection::DuplicateConnection);
        }
        Ok(())
    }

    /// Check if an input port is already connected (prevents multiple drivers)
    pub fn check_input_port_collision(
        connections: &[Connection],
        to: &ResolvedPort,
    ) -> Result<(), ConnectionRejection> {
        let driven = connections.iter().any(|c| {
            c.to_port.component_id == to.component_id && c.to_port.port_id == to.port_id
        });
        if driven {
            return Err(ConnectionRejection::InputAlreadyDriven(to.handle()));
        }
        Ok(())
    }

    /// Run every rule in order and return the normalized (output, input) pair
    pub fn validate_new_connection(
        connections: &[Connection],
        start: ResolvedPort,
        target: ResolvedPort,
        allow_feedback_loops: bool,
    ) -> Result<(ResolvedPort, ResolvedPort), ConnectionRejection> {
        Self::check_port_types(&start, &target)?;
        let (from, to) = Self::normalize(start, target);
        Self::check_feedback(&from, &to, allow_feedback_loops)?;
        Self::check_duplicate(connections, &from, &to)?;
        Self::check_input_port_collision(connections, &to)?;
        Ok((from, to))
    }
}
