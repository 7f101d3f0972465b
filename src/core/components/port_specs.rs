use crate::core::types::{PortId, PortType};
use serde::{Deserialize, Serialize};

/// Port specification used by component templates
#[derive(Debug, Clone, PartialEq)]
pub struct PortSpec {
    /// Port name
    pub name: String,
    /// Port type (input or output)
    pub port_type: PortType,
}

impl PortSpec {
    /// Create a new input port
    pub fn input(name: &str) -> Self {
        Self {
            name: name.to_string(),
            port_type: PortType::Input,
        }
    }

    /// Create a new output port
    pub fn output(name: &str) -> Self {
        Self {
            name: name.to_string(),
            port_type: PortType::Output,
        }
    }

    /// Instantiate this spec with a fresh port ID
    pub fn instantiate(&self) -> Port {
        Port::new(&self.name)
    }
}

/// A port on a placed component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub id: PortId,
    pub name: String,
}

impl Port {
    /// Create a port with a fresh ID
    pub fn new(name: &str) -> Self {
        Self {
            id: PortId::new(),
            name: name.to_string(),
        }
    }
}

/// Name for the input at `index` on a variadic gate: A, B, C, ... then I27, I28, ...
pub fn input_name(index: usize) -> String {
    if index < 26 {
        ((b'A' + index as u8) as char).to_string()
    } else {
        format!("I{}", index + 1)
    }
}
