use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rlogic::kmap::Group;
use rlogic::{
    Circuit, CircuitConfig, ComponentId, ComponentRegistry, ComponentSubtype, KmapExercise,
    PortClickOutcome, PortHandle, Point,
};

/// Configuration for the editing session demo
#[derive(Debug, Clone)]
pub struct DemoConfig {
    // Canvas the random components are scattered over
    pub canvas_width: f64,
    pub canvas_height: f64,

    // Random gestures after the half adder is wired
    pub extra_components: usize,
    pub random_clicks: usize,
    pub random_seed: u64,

    pub zoom: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            extra_components: 6,
            random_clicks: 40,
            random_seed: 42,
            zoom: 1.25,
        }
    }
}

fn output(circuit: &Circuit, id: ComponentId, index: usize) -> Option<PortHandle> {
    let port = circuit.component(&id)?.outputs.get(index)?;
    Some(id.output(port.id))
}

fn input(circuit: &Circuit, id: ComponentId, index: usize) -> Option<PortHandle> {
    let port = circuit.component(&id)?.inputs.get(index)?;
    Some(id.input(port.id))
}

fn connect(circuit: &mut Circuit, from: Option<PortHandle>, to: Option<PortHandle>) {
    let (Some(from), Some(to)) = (from, to) else {
        warn!("Skipping wire with a missing port");
        return;
    };
    circuit.port_click(from);
    if let PortClickOutcome::Rejected(reason) = circuit.port_click(to) {
        warn!("Wire rejected: {}", reason);
    }
}

fn build_half_adder(circuit: &mut Circuit) -> Result<(), Box<dyn std::error::Error>> {
    let a = circuit.add(ComponentSubtype::Variable, Point::new(40.0, 60.0))?;
    let b = circuit.add(ComponentSubtype::Variable, Point::new(40.0, 180.0))?;
    circuit.edit_name(&a, "A")?;
    circuit.edit_name(&b, "B")?;
    let sum = circuit.add(ComponentSubtype::Xor, Point::new(200.0, 60.0))?;
    let carry = circuit.add(ComponentSubtype::And, Point::new(200.0, 180.0))?;
    let sum_led = circuit.add(ComponentSubtype::Led, Point::new(360.0, 65.0))?;
    let carry_led = circuit.add(ComponentSubtype::Led, Point::new(360.0, 185.0))?;

    // Inputs clicked first on purpose; the wire still runs output to input
    for (gate, led) in [(sum, sum_led), (carry, carry_led)] {
        let (gate_a, a_out) = (input(circuit, gate, 0), output(circuit, a, 0));
        connect(circuit, gate_a, a_out);
        let (b_out, gate_b) = (output(circuit, b, 0), input(circuit, gate, 1));
        connect(circuit, b_out, gate_b);
        let (gate_out, led_in) = (output(circuit, gate, 0), input(circuit, led, 0));
        connect(circuit, gate_out, led_in);
    }
    Ok(())
}

fn scatter(circuit: &mut Circuit, config: &DemoConfig, rng: &mut StdRng) -> Vec<ComponentId> {
    let mut placed = Vec::new();
    for _ in 0..config.extra_components {
        let subtype = ComponentSubtype::ALL[rng.gen_range(0..ComponentSubtype::ALL.len())];
        let position = Point::new(
            rng.gen_range(0.0..config.canvas_width),
            rng.gen_range(0.0..config.canvas_height),
        );
        match circuit.add(subtype, position) {
            Ok(id) => placed.push(id),
            Err(e) => warn!("Could not place {}: {}", subtype, e),
        }
    }
    placed
}

fn random_clicks(circuit: &mut Circuit, ids: &[ComponentId], config: &DemoConfig, rng: &mut StdRng) {
    if ids.is_empty() {
        return;
    }
    let (mut created, mut rejected) = (0, 0);
    for _ in 0..config.random_clicks {
        let id = ids[rng.gen_range(0..ids.len())];
        let Some(component) = circuit.component(&id) else {
            continue;
        };
        let ports: Vec<PortHandle> = component
            .inputs
            .iter()
            .map(|p| id.input(p.id))
            .chain(component.outputs.iter().map(|p| id.output(p.id)))
            .collect();
        if ports.is_empty() {
            continue;
        }
        match circuit.port_click(ports[rng.gen_range(0..ports.len())]) {
            PortClickOutcome::Connected(_) => created += 1,
            PortClickOutcome::Rejected(_) => rejected += 1,
            PortClickOutcome::Armed(_) => {}
        }
    }
    circuit.cancel_pending();
    info!("Random clicks: {} wires created, {} rejected", created, rejected);
}

fn run_kmap() {
    let exercise = KmapExercise::sample();
    let grid = exercise.solution_grid();
    println!("{}", grid);

    let filling = exercise.check_filling(&grid);
    println!("Filling: {}", filling.message);

    let lazy = vec![Group::from_indices("lazy", &[0], "red")];
    let first_try = exercise.check_grouping(&grid, &lazy);
    println!(
        "Grouping (one cell): {} {}",
        first_try.message,
        first_try.error.unwrap_or_default()
    );
    let grouping = exercise.check_grouping(&grid, &exercise.solution_groups());
    println!("Grouping (solution): {}", grouping.message);

    for attempt in ["a*d + b'cd", "b'cd + a'd + abd' + bcd' + b'c'd'"] {
        let verdict = exercise.check_expression(attempt);
        println!("Expression '{}': {}", attempt, verdict.message);
        if let Some(error) = verdict.error {
            println!("  {}", error.replace('\n', "\n  "));
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let config = DemoConfig::default();
    println!("Circuit editing demo (seed {})", config.random_seed);

    let mut circuit = Circuit::with_config(ComponentRegistry::standard(), CircuitConfig::default());
    build_half_adder(&mut circuit)?;
    println!(
        "Half adder: {} components, {} wires",
        circuit.components().len(),
        circuit.connections().len()
    );

    let mut rng = StdRng::seed_from_u64(config.random_seed);
    let placed = scatter(&mut circuit, &config, &mut rng);
    random_clicks(&mut circuit, &placed, &config, &mut rng);

    let zoom = circuit.set_zoom(config.zoom);
    circuit.pan_by(20.0, -10.0);
    info!("View at zoom {} with {} wires", zoom, circuit.connections().len());

    for connection in circuit.connections() {
        println!(
            "  {} ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            connection.id,
            connection.from_port.position.x,
            connection.from_port.position.y,
            connection.to_port.position.x,
            connection.to_port.position.y
        );
    }
    println!();

    run_kmap();
    Ok(())
}
