use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rlogic::core::geometry::port_position;
use rlogic::{
    Circuit, CircuitConfig, CircuitGraph, ComponentId, ComponentRegistry, ComponentSubtype,
    ConnectionRejection, PortClickOutcome, PortHandle, PortType, Point,
};
use std::collections::HashSet;

fn handles(circuit: &Circuit, id: ComponentId) -> Vec<PortHandle> {
    let component = circuit.component(&id).unwrap();
    let inputs = component.inputs.iter().map(|p| id.input(p.id));
    let outputs = component.outputs.iter().map(|p| id.output(p.id));
    inputs.chain(outputs).collect()
}

/// Wires are oriented, single-driver, unique and positioned near their ports
fn assert_graph_invariants(circuit: &Circuit, tolerance: f64) {
    let mut driven = HashSet::new();
    let mut pairs = HashSet::new();
    for connection in circuit.connections() {
        assert_eq!(connection.from_port.port_type, PortType::Output);
        assert_eq!(connection.to_port.port_type, PortType::Input);
        assert!(
            driven.insert((connection.to_port.component_id, connection.to_port.port_id)),
            "input driven twice"
        );
        assert!(pairs.insert((connection.from_port.handle(), connection.to_port.handle())));

        for end in [&connection.from_port, &connection.to_port] {
            let component = circuit.component(&end.component_id).unwrap();
            let index = component.port_index(end.port_type, &end.port_id).unwrap();
            let expected = port_position(component, end.port_type, index, circuit.view()).unwrap();
            assert!(
                end.position.distance_to(&expected) <= tolerance,
                "endpoint {:?} drifted from {:?}",
                end.position,
                expected
            );
        }
    }
}

#[test]
fn test_input_clicked_first_is_normalized() {
    let mut circuit = Circuit::new();
    let a = circuit.add(ComponentSubtype::Variable, Point::new(0.0, 0.0)).unwrap();
    let gate = circuit.add(ComponentSubtype::And, Point::new(120.0, 0.0)).unwrap();
    let gate_in = handles(&circuit, gate)[0];
    let a_out = handles(&circuit, a)[0];

    assert!(matches!(circuit.port_click(gate_in), PortClickOutcome::Armed(_)));
    assert!(circuit.graph().pending_start.is_some());
    let id = circuit.port_click(a_out).connection_id().unwrap();
    assert!(circuit.graph().pending_start.is_none());

    let graph = circuit.graph();
    let wire = graph.connections.iter().find(|c| c.id == id).unwrap();
    assert_eq!(wire.from_port.component_id, a);
    assert_eq!(wire.to_port.component_id, gate);
}

#[test]
fn test_second_driver_rejected_and_state_cleared() {
    let mut circuit = Circuit::new();
    let high = circuit.add(ComponentSubtype::High, Point::new(0.0, 0.0)).unwrap();
    let low = circuit.add(ComponentSubtype::Low, Point::new(0.0, 100.0)).unwrap();
    let led = circuit.add(ComponentSubtype::Led, Point::new(200.0, 50.0)).unwrap();
    let led_in = handles(&circuit, led)[0];

    circuit.port_click(handles(&circuit, high)[0]);
    assert!(circuit.port_click(led_in).connection_id().is_some());

    circuit.port_click(handles(&circuit, low)[0]);
    let outcome = circuit.port_click(led_in);
    assert!(matches!(
        outcome,
        PortClickOutcome::Rejected(ConnectionRejection::InputAlreadyDriven(_))
    ));
    assert!(circuit.graph().pending_start.is_none());
    assert_eq!(circuit.connections().len(), 1);
}

#[test]
fn test_flip_flop_ports_follow_resize() {
    let mut circuit = Circuit::new();
    let clock = circuit.add(ComponentSubtype::Clock, Point::new(0.0, 0.0)).unwrap();
    let ff = circuit.add(ComponentSubtype::D, Point::new(150.0, 0.0)).unwrap();
    let component = circuit.component(&ff).unwrap();
    let names: Vec<&str> = component.inputs.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["D", "CLK"]);
    let clk = ff.input(component.inputs[1].id);

    circuit.port_click(handles(&circuit, clock)[0]);
    circuit.port_click(clk);
    circuit.resize(&ff, 40.0, 20.0).unwrap();

    let wire = &circuit.connections()[0];
    let component = circuit.component(&ff).unwrap();
    // 120 wide, 120 tall: second of two inputs sits at 2/3 of the height
    let expected = Point::new(150.0 + 120.0 / 6.0, 120.0 * 2.0 / 3.0);
    assert!(wire.to_port.position.distance_to(&expected) < 1e-9);
    assert_eq!(component.size.width, 120.0);
}

#[test]
fn test_graph_survives_json() {
    let mut circuit = Circuit::new();
    let a = circuit.add(ComponentSubtype::Variable, Point::new(0.0, 0.0)).unwrap();
    let not = circuit.add(ComponentSubtype::Not, Point::new(100.0, 0.0)).unwrap();
    circuit.edit_name(&a, "A").unwrap();
    circuit.port_click(handles(&circuit, a)[0]);
    circuit.port_click(handles(&circuit, not)[0]);
    circuit.set_zoom(1.5);

    let json = serde_json::to_string(&circuit.graph()).unwrap();
    let graph: CircuitGraph = serde_json::from_str(&json).unwrap();
    let restored = Circuit::from_graph(graph, ComponentRegistry::standard(), CircuitConfig::default());
    assert_eq!(restored.graph(), circuit.graph());
    assert_eq!(restored.component(&a).unwrap().name.as_deref(), Some("A"));
}

#[test]
fn test_random_gestures_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = CircuitConfig::default();
    let tolerance = config.repair_epsilon + 1e-9;
    let mut circuit = Circuit::with_config(ComponentRegistry::standard(), config);

    let palette = [
        ComponentSubtype::And,
        ComponentSubtype::Or,
        ComponentSubtype::Not,
        ComponentSubtype::Xor,
        ComponentSubtype::Jk,
        ComponentSubtype::High,
        ComponentSubtype::Variable,
        ComponentSubtype::Led,
    ];
    let mut ids = Vec::new();
    for subtype in palette {
        let position = Point::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
        ids.push(circuit.add(subtype, position).unwrap());
    }

    for step in 0..400 {
        let id = ids[rng.gen_range(0..ids.len())];
        match rng.gen_range(0..10) {
            0 => {
                let position = Point::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
                circuit.move_component(&id, position).unwrap();
            }
            1 => {
                circuit.set_zoom(rng.gen_range(0.5..2.0));
            }
            2 => {
                let _ = circuit.add_input_port(&id);
            }
            _ => {
                let ports = handles(&circuit, id);
                let port = ports[rng.gen_range(0..ports.len())];
                let was_pending = circuit.graph().pending_start.is_some();
                let outcome = circuit.port_click(port);
                let pending = circuit.graph().pending_start.is_some();
                assert_eq!(pending, !was_pending, "step {}: {:?}", step, outcome);
                assert_eq!(pending, matches!(outcome, PortClickOutcome::Armed(_)));
            }
        }
        assert_graph_invariants(&circuit, tolerance);
    }
    assert!(!circuit.connections().is_empty());
}
