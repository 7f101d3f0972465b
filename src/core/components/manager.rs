use crate::core::components::port_specs::{input_name, Port};
use crate::core::components::registry::{ComponentRegistry, ComponentTemplate};
use crate::core::components::types::{CircuitError, ComponentInstance, ComponentSubtype};
use crate::core::types::{ComponentId, PortId, Point, Size};
use log::{debug, info};

/// Owns the placed component instances and applies structural commands
///
/// The store knows nothing about wires. Callers that move, resize or remove
/// components are responsible for asking the connection manager to repair
/// or prune the wires afterwards.
#[derive(Debug, Clone)]
pub struct ComponentStore {
    /// Templates used for palette placement and default resets
    registry: ComponentRegistry,
    /// Placed components in insertion order
    components: Vec<ComponentInstance>,
}

impl ComponentStore {
    /// Create an empty store backed by a template registry
    pub fn new(registry: ComponentRegistry) -> Self {
        Self {
            registry,
            components: Vec::new(),
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Instantiate a template at a position with fresh component and port IDs
    pub fn add(&mut self, template: &ComponentTemplate, position: Point) -> ComponentId {
        let instance = ComponentInstance {
            id: ComponentId::new(),
            component_type: template.subtype.component_type(),
            subtype: template.subtype,
            position,
            size: template.size,
            inputs: template.inputs.iter().map(|spec| spec.instantiate()).collect(),
            outputs: template.outputs.iter().map(|spec| spec.instantiate()).collect(),
            state: template
                .default_state
                .or_else(|| template.subtype.has_state().then_some(false)),
            name: template.default_name.clone(),
        };
        let id = instance.id;
        info!(
            "Added {} component '{}' at ({}, {})",
            instance.subtype, id, position.x, position.y
        );
        self.components.push(instance);
        id
    }

    /// Instantiate the registered template for a subtype
    pub fn add_subtype(
        &mut self,
        subtype: ComponentSubtype,
        position: Point,
    ) -> Result<ComponentId, CircuitError> {
        let template = self
            .registry
            .template(subtype)
            .cloned()
            .ok_or(CircuitError::TemplateNotFound(subtype))?;
        Ok(self.add(&template, position))
    }

    /// Insert an already-built instance, replacing one with the same ID
    pub(crate) fn insert(&mut self, instance: ComponentInstance) {
        match self.components.iter_mut().find(|c| c.id == instance.id) {
            Some(existing) => *existing = instance,
            None => self.components.push(instance),
        }
    }

    /// Get a component by ID
    pub fn get(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.components.iter().find(|c| c.id == *id)
    }

    fn get_mut(&mut self, id: &ComponentId) -> Result<&mut ComponentInstance, CircuitError> {
        self.components
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or(CircuitError::ComponentNotFound(*id))
    }

    /// All components in insertion order
    pub fn components(&self) -> &[ComponentInstance] {
        &self.components
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Update the position only; wire repair is the caller's job
    pub fn move_component(&mut self, id: &ComponentId, position: Point) -> Result<(), CircuitError> {
        let component = self.get_mut(id)?;
        component.position = position;
        debug!("Moved component '{}' to ({}, {})", id, position.x, position.y);
        Ok(())
    }

    /// Grow or shrink by a delta, refusing to produce a non-positive size
    pub fn resize(&mut self, id: &ComponentId, dw: f64, dh: f64) -> Result<Size, CircuitError> {
        let component = self.get_mut(id)?;
        let size = Size::new(component.size.width + dw, component.size.height + dh);
        if !size.is_positive() {
            return Err(CircuitError::InvalidSize(size));
        }
        component.size = size;
        debug!("Resized component '{}' to {}x{}", id, size.width, size.height);
        Ok(size)
    }

    /// Append an input to a variadic gate
    pub fn add_input_port(&mut self, id: &ComponentId) -> Result<PortId, CircuitError> {
        let component = self.get_mut(id)?;
        if !component.is_variadic() {
            return Err(CircuitError::UnsupportedOperation(format!(
                "{} has a fixed number of inputs",
                component.subtype
            )));
        }
        let port = Port::new(&input_name(component.inputs.len()));
        let port_id = port.id;
        component.inputs.push(port);
        debug!(
            "Component '{}' now has {} inputs",
            id,
            component.inputs.len()
        );
        Ok(port_id)
    }

    /// Drop the last input of a variadic gate, keeping at least one
    pub fn remove_input_port(&mut self, id: &ComponentId) -> Result<PortId, CircuitError> {
        let component = self.get_mut(id)?;
        if !component.is_variadic() {
            return Err(CircuitError::UnsupportedOperation(format!(
                "{} has a fixed number of inputs",
                component.subtype
            )));
        }
        if component.inputs.len() <= 1 {
            return Err(CircuitError::ArityFloor(*id));
        }
        let removed = component
            .inputs
            .pop()
            .ok_or(CircuitError::ArityFloor(*id))?;
        debug!(
            "Component '{}' now has {} inputs",
            id,
            component.inputs.len()
        );
        Ok(removed.id)
    }

    /// Clone geometry, subtype and port shape under brand new IDs
    pub fn duplicate(&mut self, id: &ComponentId) -> Result<ComponentId, CircuitError> {
        let source = self.get(id).ok_or(CircuitError::ComponentNotFound(*id))?;
        let template = self.registry.template(source.subtype);
        let state = template
            .and_then(|t| t.default_state)
            .or_else(|| source.subtype.has_state().then_some(false));
        let name = template.and_then(|t| t.default_name.clone());

        let copy = ComponentInstance {
            id: ComponentId::new(),
            component_type: source.component_type,
            subtype: source.subtype,
            position: source.position,
            size: source.size,
            inputs: source.inputs.iter().map(|p| Port::new(&p.name)).collect(),
            outputs: source.outputs.iter().map(|p| Port::new(&p.name)).collect(),
            state,
            name,
        };
        let copy_id = copy.id;
        info!("Duplicated component '{}' as '{}'", id, copy_id);
        self.components.push(copy);
        Ok(copy_id)
    }

    /// Delete a component; dangling wires are the caller's job
    pub fn remove(&mut self, id: &ComponentId) -> Result<ComponentInstance, CircuitError> {
        let index = self
            .components
            .iter()
            .position(|c| c.id == *id)
            .ok_or(CircuitError::ComponentNotFound(*id))?;
        info!("Removed component '{}'", id);
        Ok(self.components.remove(index))
    }

    /// Flip the boolean of a stateful source or indicator
    pub fn toggle_state(&mut self, id: &ComponentId) -> Result<bool, CircuitError> {
        let component = self.get_mut(id)?;
        if !component.subtype.has_state() {
            return Err(CircuitError::UnsupportedOperation(format!(
                "{} carries no state",
                component.subtype
            )));
        }
        let next = !component.state.unwrap_or(false);
        component.state = Some(next);
        debug!("Component '{}' state is now {}", id, next);
        Ok(next)
    }

    /// Set the label of a VARIABLE input
    pub fn edit_name(&mut self, id: &ComponentId, name: &str) -> Result<(), CircuitError> {
        let component = self.get_mut(id)?;
        if !component.subtype.has_name() {
            return Err(CircuitError::UnsupportedOperation(format!(
                "{} cannot be named",
                component.subtype
            )));
        }
        let trimmed = name.trim();
        component.name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(())
    }
}

impl Default for ComponentStore {
    fn default() -> Self {
        Self::new(ComponentRegistry::standard())
    }
}
