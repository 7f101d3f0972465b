//! Port geometry.
//!
//! Ports have no stored position. Everything here is recomputed from the
//! component's current position and size, then mapped through the view
//! transform into the space wires are drawn and hit-tested in.

use crate::core::components::types::{ComponentInstance, ComponentSubtype};
use crate::core::types::{ComponentId, PortHandle, PortId, PortType, Point};
use serde::{Deserialize, Serialize};

/// Pan and zoom of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub pan: Point,
    pub zoom: f64,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        pan: Point::new(0.0, 0.0),
        zoom: 1.0,
    };

    pub fn new(pan: Point, zoom: f64) -> Self {
        Self { pan, zoom }
    }

    /// Map a canvas logical point into view space
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.zoom + self.pan.x,
            point.y * self.zoom + self.pan.y,
        )
    }

    /// Map a view-space point back into canvas logical space
    pub fn invert(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.pan.x) / self.zoom,
            (point.y - self.pan.y) / self.zoom,
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A port resolved against current geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPort {
    pub component_id: ComponentId,
    pub port_id: PortId,
    pub port_type: PortType,
    pub position: Point,
}

impl ResolvedPort {
    pub fn handle(&self) -> PortHandle {
        PortHandle {
            component_id: self.component_id,
            port_id: self.port_id,
            port_type: self.port_type,
        }
    }
}

/// Offset of port `index` of `count` relative to the component origin
pub fn port_offset(component: &ComponentInstance, port_type: PortType, index: usize) -> Option<Point> {
    let count = component.ports(port_type).len();
    if index >= count {
        return None;
    }
    let w = component.size.width;
    let h = component.size.height;

    let offset = match port_type {
        PortType::Output if component.is_variadic() => Point::new(5.0 * w / 6.0, h / 2.0),
        PortType::Input if component.is_variadic() => {
            let spread = (count.saturating_sub(1)).max(1) as f64;
            let y = if count == 1 {
                h / 2.0
            } else {
                h / 6.0 + (index as f64 / spread) * (2.0 * h / 3.0)
            };
            Point::new(w / 6.0, y)
        }
        PortType::Input if component.subtype == ComponentSubtype::Not => Point::new(w / 6.0, h / 2.0),
        PortType::Output if component.subtype == ComponentSubtype::Not => {
            Point::new(5.0 * w / 6.0, h / 2.0)
        }
        // flip-flops and I/O: evenly spaced along the edge, centred when single
        PortType::Input => Point::new(w / 6.0, edge_slot(h, index, count)),
        PortType::Output => Point::new(5.0 * w / 6.0, edge_slot(h, index, count)),
    };
    Some(offset)
}

fn edge_slot(height: f64, index: usize, count: usize) -> f64 {
    height * (index as f64 + 1.0) / (count as f64 + 1.0)
}

/// Absolute, view-space position of a port identified by side and index
pub fn port_position(
    component: &ComponentInstance,
    port_type: PortType,
    index: usize,
    transform: &ViewTransform,
) -> Option<Point> {
    let offset = port_offset(component, port_type, index)?;
    Some(transform.apply(component.position.offset(offset.x, offset.y)))
}

/// Resolve a port by ID against a component's current geometry
pub fn resolve_port(
    component: &ComponentInstance,
    port_id: &PortId,
    transform: &ViewTransform,
) -> Option<ResolvedPort> {
    let (port_type, index) = component.find_port(port_id)?;
    let position = port_position(component, port_type, index, transform)?;
    Some(ResolvedPort {
        component_id: component.id,
        port_id: *port_id,
        port_type,
        position,
    })
}
