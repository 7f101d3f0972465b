use crate::core::components::port_specs::{input_name, PortSpec};
use crate::core::components::types::ComponentSubtype;
use crate::core::types::Size;
use std::collections::HashMap;

/// Default footprint of a logic gate
pub const GATE_SIZE: Size = Size::new(80.0, 60.0);
/// Default footprint of a flip-flop
pub const FLIP_FLOP_SIZE: Size = Size::new(80.0, 100.0);
/// Default footprint of a source or indicator
pub const IO_SIZE: Size = Size::new(50.0, 50.0);

/// Number of inputs a freshly placed variadic gate gets
pub const DEFAULT_GATE_INPUTS: usize = 2;

/// Canonical shape of a component subtype
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTemplate {
    pub subtype: ComponentSubtype,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
    pub size: Size,
    /// Initial state for stateful subtypes, `None` otherwise
    pub default_state: Option<bool>,
    /// Initial label for named subtypes
    pub default_name: Option<String>,
}

impl ComponentTemplate {
    /// Create an empty template for a subtype
    pub fn new(subtype: ComponentSubtype, size: Size) -> Self {
        Self {
            subtype,
            inputs: Vec::new(),
            outputs: Vec::new(),
            size,
            default_state: None,
            default_name: None,
        }
    }

    pub fn with_inputs(mut self, names: &[&str]) -> Self {
        self.inputs = names.iter().map(|n| PortSpec::input(n)).collect();
        self
    }

    pub fn with_outputs(mut self, names: &[&str]) -> Self {
        self.outputs = names.iter().map(|n| PortSpec::output(n)).collect();
        self
    }

    pub fn with_state(mut self, state: bool) -> Self {
        self.default_state = Some(state);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.default_name = Some(name.to_string());
        self
    }

    /// Template for a variadic gate with `inputs` inputs named A, B, ...
    pub fn gate(subtype: ComponentSubtype, inputs: usize) -> Self {
        let names: Vec<String> = (0..inputs.max(1)).map(input_name).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::new(subtype, GATE_SIZE)
            .with_inputs(&refs)
            .with_outputs(&["Y"])
    }
}

/// Immutable catalogue of component templates, keyed by subtype
///
/// Built once and handed to the component store; the store never mutates it.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    templates: HashMap<ComponentSubtype, ComponentTemplate>,
}

impl ComponentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registry with a template for every built-in subtype
    pub fn standard() -> Self {
        use ComponentSubtype::*;

        let mut templates = HashMap::new();
        for subtype in [And, Or, Nand, Nor, Xor, Xnor] {
            templates.insert(subtype, ComponentTemplate::gate(subtype, DEFAULT_GATE_INPUTS));
        }
        let fixed = [
            ComponentTemplate::new(Not, GATE_SIZE)
                .with_inputs(&["A"])
                .with_outputs(&["Y"]),
            ComponentTemplate::new(D, FLIP_FLOP_SIZE)
                .with_inputs(&["D", "CLK"])
                .with_outputs(&["Q", "Q'"]),
            ComponentTemplate::new(Jk, FLIP_FLOP_SIZE)
                .with_inputs(&["J", "CLK", "K"])
                .with_outputs(&["Q", "Q'"]),
            ComponentTemplate::new(Sr, FLIP_FLOP_SIZE)
                .with_inputs(&["S", "CLK", "R"])
                .with_outputs(&["Q", "Q'"]),
            ComponentTemplate::new(T, FLIP_FLOP_SIZE)
                .with_inputs(&["T", "CLK"])
                .with_outputs(&["Q", "Q'"]),
            ComponentTemplate::new(High, IO_SIZE)
                .with_outputs(&["OUT"])
                .with_state(true),
            ComponentTemplate::new(Low, IO_SIZE)
                .with_outputs(&["OUT"])
                .with_state(false),
            ComponentTemplate::new(Clock, IO_SIZE)
                .with_outputs(&["CLK"])
                .with_state(false),
            ComponentTemplate::new(Variable, IO_SIZE).with_outputs(&["OUT"]),
            ComponentTemplate::new(Led, IO_SIZE)
                .with_inputs(&["IN"])
                .with_state(false),
        ];
        for template in fixed {
            templates.insert(template.subtype, template);
        }

        Self { templates }
    }

    /// Register a template; fails if the subtype already has one
    pub fn register(&mut self, template: ComponentTemplate) -> Result<(), String> {
        if self.templates.contains_key(&template.subtype) {
            return Err(format!(
                "Template for subtype '{}' is already registered",
                template.subtype
            ));
        }
        self.templates.insert(template.subtype, template);
        Ok(())
    }

    /// Look up the template for a subtype
    pub fn template(&self, subtype: ComponentSubtype) -> Option<&ComponentTemplate> {
        self.templates.get(&subtype)
    }

    pub fn has_template(&self, subtype: ComponentSubtype) -> bool {
        self.templates.contains_key(&subtype)
    }

    /// Registered subtypes in palette order
    pub fn subtypes(&self) -> Vec<ComponentSubtype> {
        let mut subtypes: Vec<_> = self.templates.keys().copied().collect();
        subtypes.sort();
        subtypes
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
