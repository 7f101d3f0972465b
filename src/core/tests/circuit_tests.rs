#[cfg(test)]
mod tests {
    use crate::core::circuit::{Circuit, SharedCircuit};
    use crate::core::components::registry::ComponentRegistry;
    use crate::core::components::types::{CircuitError, ComponentSubtype};
    use crate::core::config::CircuitConfig;
    use crate::core::geometry::port_position;
    use crate::core::types::{ComponentId, ConnectionId, PortHandle, PortType, Point};

    fn output(circuit: &Circuit, id: ComponentId, index: usize) -> PortHandle {
        id.output(circuit.component(&id).unwrap().outputs[index].id)
    }

    fn input(circuit: &Circuit, id: ComponentId, index: usize) -> PortHandle {
        id.input(circuit.component(&id).unwrap().inputs[index].id)
    }

    fn wire(circuit: &mut Circuit, from: PortHandle, to: PortHandle) {
        circuit.port_click(from);
        assert!(
            circuit.port_click(to).connection_id().is_some(),
            "expected wire to be created"
        );
    }

    #[test]
    fn test_move_component_repairs_wires() {
        let mut circuit = Circuit::new();
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let led = circuit.add(ComponentSubtype::Led, Point::new(100.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, led, 0));
        wire(&mut circuit, from, to);

        circuit.move_component(&led, Point::new(250.0, 120.0)).unwrap();
        let expected = port_position(
            circuit.component(&led).unwrap(),
            PortType::Input,
            0,
            circuit.view(),
        );
        assert_eq!(Some(circuit.connections()[0].to_port.position), expected);
        assert_eq!(circuit.reconcile(), 0);
    }

    #[test]
    fn test_arity_change_shifts_wired_inputs() {
        let mut circuit = Circuit::new();
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let gate = circuit.add(ComponentSubtype::And, Point::new(100.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, gate, 1));
        wire(&mut circuit, from, to);
        let before = circuit.connections()[0].to_port.position;

        circuit.add_input_port(&gate).unwrap();
        let after = circuit.connections()[0].to_port.position;
        assert_ne!(before, after, "second of three inputs sits at a new height");
        assert_eq!(circuit.reconcile(), 0);
    }

    #[test]
    fn test_remove_input_port_drops_its_wire() {
        let mut circuit = Circuit::new();
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let gate = circuit.add(ComponentSubtype::Or, Point::new(100.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, gate, 0));
        wire(&mut circuit, from, to);
        let (from, to) = (output(&circuit, high, 0), input(&circuit, gate, 1));
        wire(&mut circuit, from, to);

        circuit.remove_input_port(&gate).unwrap();
        assert_eq!(circuit.connections().len(), 1);
        assert_eq!(
            circuit.remove_input_port(&gate),
            Err(CircuitError::ArityFloor(gate))
        );
        assert_eq!(circuit.connections().len(), 1);
    }

    #[test]
    fn test_remove_component_prunes_wires_and_pending() {
        let mut circuit = Circuit::new();
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let not = circuit.add(ComponentSubtype::Not, Point::new(100.0, 0.0)).unwrap();
        let led = circuit.add(ComponentSubtype::Led, Point::new(200.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, not, 0));
        wire(&mut circuit, from, to);
        let (from, to) = (output(&circuit, not, 0), input(&circuit, led, 0));
        wire(&mut circuit, from, to);
        let selected = circuit.connections()[1].id;
        circuit.select_connection(Some(selected));
        circuit.port_click(output(&circuit, not, 0));

        circuit.remove(&not).unwrap();
        assert!(circuit.connections().is_empty());
        assert_eq!(circuit.connection_manager().selected_connection(), None);
        assert_eq!(circuit.connection_manager().pending_start(), None);
    }

    #[test]
    fn test_zoom_and_pan_reconcile() {
        let config = CircuitConfig::new().with_zoom_range(0.5, 2.0);
        let mut circuit = Circuit::with_config(ComponentRegistry::standard(), config);
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let led = circuit.add(ComponentSubtype::Led, Point::new(100.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, led, 0));
        wire(&mut circuit, from, to);

        assert_eq!(circuit.set_zoom(3.0), 2.0);
        circuit.pan_by(15.0, -5.0);
        let expected = port_position(
            circuit.component(&high).unwrap(),
            PortType::Output,
            0,
            circuit.view(),
        );
        assert_eq!(Some(circuit.connections()[0].from_port.position), expected);
    }

    #[test]
    fn test_rejected_commands_leave_state_unchanged() {
        let mut circuit = Circuit::new();
        let not = circuit.add(ComponentSubtype::Not, Point::new(0.0, 0.0)).unwrap();
        let before = circuit.graph();

        assert!(circuit.add_input_port(&not).is_err());
        assert!(circuit.remove_input_port(&not).is_err());
        assert!(circuit.resize(&not, -1000.0, 0.0).is_err());
        assert!(circuit.toggle_state(&not).is_err());
        assert!(circuit.edit_name(&not, "x").is_err());
        assert!(circuit.move_component(&ComponentId::new(), Point::default()).is_err());
        assert_eq!(circuit.graph(), before);
    }

    #[test]
    fn test_graph_round_trip_restores_session() {
        let mut circuit = Circuit::new();
        let var = circuit.add(ComponentSubtype::Variable, Point::new(0.0, 0.0)).unwrap();
        let led = circuit.add(ComponentSubtype::Led, Point::new(90.0, 30.0)).unwrap();
        circuit.edit_name(&var, "A").unwrap();
        let (from, to) = (input(&circuit, led, 0), output(&circuit, var, 0));
        wire(&mut circuit, from, to);

        let graph = circuit.graph();
        let json = serde_json::to_string(&graph).unwrap();
        assert!(json.contains("\"type\":\"input\""));
        assert!(json.contains("\"subtype\":\"VARIABLE\""));
        assert!(json.contains("\"fromPort\""));
        assert!(json.contains("\"componentId\""));
        assert!(json.contains("\"pendingStart\":null"));

        let parsed = serde_json::from_str(&json).unwrap();
        let restored = Circuit::from_graph(parsed, ComponentRegistry::standard(), CircuitConfig::default());
        assert_eq!(restored.graph(), graph);
    }

    #[test]
    fn test_shared_circuit_gestures() {
        let shared = SharedCircuit::new(Circuit::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared.gesture(|circuit| {
                        circuit
                            .add(ComponentSubtype::And, Point::new(i as f64 * 100.0, 0.0))
                            .unwrap()
                    })
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.graph().components.len(), 4);
    }

    #[test]
    fn test_non_finite_view_input_is_ignored() {
        let mut circuit = Circuit::new();
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let led = circuit.add(ComponentSubtype::Led, Point::new(100.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, led, 0));
        wire(&mut circuit, from, to);
        let before = circuit.graph();

        assert_eq!(circuit.set_zoom(f64::NAN), 1.0);
        assert_eq!(circuit.set_zoom(f64::INFINITY), 1.0);
        circuit.pan_by(f64::NAN, 0.0);
        circuit.pan_by(0.0, f64::NEG_INFINITY);
        assert_eq!(circuit.graph(), before);
    }

    #[test]
    fn test_restore_drops_second_driver_and_duplicates() {
        let mut circuit = Circuit::new();
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let low = circuit.add(ComponentSubtype::Low, Point::new(0.0, 100.0)).unwrap();
        let led = circuit.add(ComponentSubtype::Led, Point::new(100.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, led, 0));
        wire(&mut circuit, from, to);

        let mut graph = circuit.graph();
        let original = graph.connections[0].clone();
        let mut copy = original.clone();
        copy.id = ConnectionId::new();
        let mut second_driver = original.clone();
        second_driver.id = ConnectionId::new();
        second_driver.from_port.component_id = low;
        second_driver.from_port.port_id = circuit.component(&low).unwrap().outputs[0].id;
        graph.connections.push(copy);
        graph.connections.push(second_driver);
        graph.connections.push(original.clone());

        let restored = Circuit::from_graph(graph, ComponentRegistry::standard(), CircuitConfig::default());
        assert_eq!(restored.connections().len(), 1);
        assert_eq!(restored.connections()[0], original);
    }

    #[test]
    fn test_restore_flips_reversed_wire() {
        let mut circuit = Circuit::new();
        let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
        let led = circuit.add(ComponentSubtype::Led, Point::new(100.0, 0.0)).unwrap();
        let (from, to) = (output(&circuit, high, 0), input(&circuit, led, 0));
        wire(&mut circuit, from, to);

        let mut graph = circuit.graph();
        let reversed = &mut graph.connections[0];
        std::mem::swap(&mut reversed.from_port, &mut reversed.to_port);

        let restored = Circuit::from_graph(graph, ComponentRegistry::standard(), CircuitConfig::default());
        let connection = &restored.connections()[0];
        assert_eq!(connection.from_port.port_type, PortType::Output);
        assert_eq!(connection.from_port.handle(), from);
        assert_eq!(connection.to_port.handle(), to);
    }

    #[test]
    fn test_remove_input_port_cancels_pending_on_that_port() {
        let mut circuit = Circuit::new();
        let gate = circuit.add(ComponentSubtype::And, Point::new(0.0, 0.0)).unwrap();
        let last = input(&circuit, gate, 1);
        circuit.port_click(last);
        assert!(circuit.graph().pending_start.is_some());

        circuit.remove_input_port(&gate).unwrap();
        assert_eq!(circuit.graph().pending_start, None);
    }

    #[test]
    fn test_remove_input_port_keeps_pending_on_other_port() {
        let mut circuit = Circuit::new();
        let gate = circuit.add(ComponentSubtype::And, Point::new(0.0, 0.0)).unwrap();
        let first = input(&circuit, gate, 0);
        circuit.port_click(first);

        circuit.remove_input_port(&gate).unwrap();
        assert_eq!(circuit.graph().pending_start.map(|s| s.handle()), Some(first));
    }
}
