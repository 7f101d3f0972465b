use crate::core::components::port_specs::Port;
use crate::core::types::{ComponentId, PortId, PortType, Point, Size};
use serde::{Deserialize, Serialize};

/// Coarse category of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Gate,
    FlipFlop,
    Input,
    Output,
}

/// Fine-grained kind of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentSubtype {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
    D,
    Jk,
    Sr,
    T,
    High,
    Low,
    Clock,
    Variable,
    Led,
}

impl ComponentSubtype {
    /// Every subtype, in palette order
    pub const ALL: [ComponentSubtype; 16] = [
        ComponentSubtype::And,
        ComponentSubtype::Or,
        ComponentSubtype::Not,
        ComponentSubtype::Nand,
        ComponentSubtype::Nor,
        ComponentSubtype::Xor,
        ComponentSubtype::Xnor,
        ComponentSubtype::D,
        ComponentSubtype::Jk,
        ComponentSubtype::Sr,
        ComponentSubtype::T,
        ComponentSubtype::High,
        ComponentSubtype::Low,
        ComponentSubtype::Clock,
        ComponentSubtype::Variable,
        ComponentSubtype::Led,
    ];

    /// The coarse category this subtype belongs to
    pub fn component_type(&self) -> ComponentType {
        use ComponentSubtype::*;
        match self {
            And | Or | Not | Nand | Nor | Xor | Xnor => ComponentType::Gate,
            D | Jk | Sr | T => ComponentType::FlipFlop,
            High | Low | Clock | Variable => ComponentType::Input,
            Led => ComponentType::Output,
        }
    }

    /// AND/OR/XOR families accept any number of inputs >= 1
    pub fn is_variadic(&self) -> bool {
        use ComponentSubtype::*;
        matches!(self, And | Or | Nand | Nor | Xor | Xnor)
    }

    /// Whether instances carry a toggleable boolean
    pub fn has_state(&self) -> bool {
        use ComponentSubtype::*;
        matches!(self, High | Low | Clock | Led)
    }

    /// Whether instances carry a user label
    pub fn has_name(&self) -> bool {
        matches!(self, ComponentSubtype::Variable)
    }

    pub fn label(&self) -> &'static str {
        use ComponentSubtype::*;
        match self {
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Nand => "NAND",
            Nor => "NOR",
            Xor => "XOR",
            Xnor => "XNOR",
            D => "D",
            Jk => "JK",
            Sr => "SR",
            T => "T",
            High => "HIGH",
            Low => "LOW",
            Clock => "CLOCK",
            Variable => "VARIABLE",
            Led => "LED",
        }
    }
}

impl std::fmt::Display for ComponentSubtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A component placed on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub id: ComponentId,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub subtype: ComponentSubtype,
    pub position: Point,
    pub size: Size,
    pub inputs: Vec<Port>,
    pub outputs: Vec<Port>,
    pub state: Option<bool>,
    pub name: Option<String>,
}

impl ComponentInstance {
    /// Get the component ID
    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Ordered ports on one side of the component
    pub fn ports(&self, port_type: PortType) -> &[Port] {
        match port_type {
            PortType::Input => &self.inputs,
            PortType::Output => &self.outputs,
        }
    }

    /// Index of a port within its side, together with the side
    pub fn find_port(&self, port_id: &PortId) -> Option<(PortType, usize)> {
        if let Some(index) = self.inputs.iter().position(|p| p.id == *port_id) {
            return Some((PortType::Input, index));
        }
        self.outputs
            .iter()
            .position(|p| p.id == *port_id)
            .map(|index| (PortType::Output, index))
    }

    /// Index of a port on the given side
    pub fn port_index(&self, port_type: PortType, port_id: &PortId) -> Option<usize> {
        self.ports(port_type).iter().position(|p| p.id == *port_id)
    }

    pub fn is_variadic(&self) -> bool {
        self.subtype.is_variadic()
    }
}

/// Rejections raised by the component store and the circuit session
///
/// Every variant means the requested command was not applied and the
/// state is exactly as it was before.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitError {
    /// No component with this ID
    ComponentNotFound(ComponentId),
    /// No port with this ID on the component
    PortNotFound(ComponentId, PortId),
    /// No template registered for the subtype
    TemplateNotFound(ComponentSubtype),
    /// The operation does not apply to this subtype
    UnsupportedOperation(String),
    /// Removing a port would leave fewer than the minimum number of inputs
    ArityFloor(ComponentId),
    /// Resize would produce a non-positive dimension
    InvalidSize(Size),
}

impl std::fmt::Display for CircuitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitError::ComponentNotFound(id) => write!(f, "Component not found: {}", id),
            CircuitError::PortNotFound(id, port) => {
                write!(f, "Port '{}' not found on component '{}'", port, id)
            }
            CircuitError::TemplateNotFound(subtype) => {
                write!(f, "No template registered for subtype {}", subtype)
            }
            CircuitError::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            CircuitError::ArityFloor(id) => {
                write!(f, "Component '{}' cannot lose its last input", id)
            }
            CircuitError::InvalidSize(size) => write!(
                f,
                "Invalid size {}x{}: dimensions must be positive",
                size.width, size.height
            ),
        }
    }
}

impl std::error::Error for CircuitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_categories() {
        assert_eq!(ComponentSubtype::Nand.component_type(), ComponentType::Gate);
        assert_eq!(ComponentSubtype::Jk.component_type(), ComponentType::FlipFlop);
        assert_eq!(ComponentSubtype::Clock.component_type(), ComponentType::Input);
        assert_eq!(ComponentSubtype::Led.component_type(), ComponentType::Output);
    }

    #[test]
    fn test_variadic_families() {
        assert!(ComponentSubtype::And.is_variadic());
        assert!(ComponentSubtype::Xnor.is_variadic());
        assert!(!ComponentSubtype::Not.is_variadic());
        assert!(!ComponentSubtype::D.is_variadic());
        assert!(!ComponentSubtype::Led.is_variadic());
    }

    #[test]
    fn test_stateful_subtypes() {
        let stateful: Vec<_> = ComponentSubtype::ALL
            .iter()
            .filter(|s| s.has_state())
            .collect();
        assert_eq!(stateful.len(), 4);
        assert!(!ComponentSubtype::Variable.has_state());
        assert!(ComponentSubtype::Variable.has_name());
    }
}
