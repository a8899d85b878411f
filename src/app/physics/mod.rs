mod forces;
mod quadtree;

use eframe::egui::{Vec2, vec2};

use crate::theory::TheoryNetwork;

use super::{PhysicsScratch, RenderNode};
use forces::{LinkSpring, apply_centering, apply_charge, apply_collisions, apply_links};

pub(in crate::app) const LARGE_LAYOUT_NODES: usize = 150;

const ALPHA_MIN: f32 = 0.001;
const LINK_DISTANCE_SPAN: f32 = 200.0;
const COLLIDE_STRENGTH: f32 = 1.0;
pub(in crate::app) const DRAG_ALPHA_TARGET: f32 = 0.3;
pub(in crate::app) const RESIZE_ALPHA: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct SimulationParams {
    pub charge_strength: f32,
    pub collide_radius: f32,
    pub alpha_decay: f32,
    pub velocity_decay: f32,
}

impl SimulationParams {
    pub(in crate::app) fn for_node_count(node_count: usize) -> Self {
        if node_count > LARGE_LAYOUT_NODES {
            Self {
                charge_strength: -100.0,
                collide_radius: 30.0,
                alpha_decay: 0.02,
                velocity_decay: 0.4,
            }
        } else {
            Self {
                charge_strength: -150.0,
                collide_radius: 30.0,
                // cools from 1 to ALPHA_MIN in 300 ticks
                alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
                velocity_decay: 0.4,
            }
        }
    }
}

pub(in crate::app) struct Simulation {
    alpha: f32,
    alpha_target: f32,
    running: bool,
    params: SimulationParams,
    links: Vec<LinkSpring>,
    center: Vec2,
}

impl Simulation {
    pub(in crate::app) fn new(network: &TheoryNetwork) -> Self {
        let mut degree = vec![0usize; network.node_count()];
        for edge in &network.edges {
            degree[edge.source] += 1;
            degree[edge.target] += 1;
        }

        let links = network
            .edges
            .iter()
            .map(|edge| {
                let source_degree = degree[edge.source] as f32;
                let target_degree = degree[edge.target] as f32;
                LinkSpring {
                    source: edge.source,
                    target: edge.target,
                    distance: LINK_DISTANCE_SPAN * (1.0 - edge.strength as f32),
                    strength: 1.0 / source_degree.min(target_degree),
                    bias: source_degree / (source_degree + target_degree),
                }
            })
            .collect();

        Self {
            alpha: 1.0,
            alpha_target: 0.0,
            running: true,
            params: SimulationParams::for_node_count(network.node_count()),
            links,
            center: Vec2::ZERO,
        }
    }

    pub(in crate::app) fn alpha(&self) -> f32 {
        self.alpha
    }

    #[cfg(test)]
    pub(in crate::app) fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub(in crate::app) fn params(&self) -> SimulationParams {
        self.params
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        self.running
    }

    pub(in crate::app) fn set_alpha(&mut self, alpha: f32) -> &mut Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub(in crate::app) fn set_alpha_target(&mut self, alpha_target: f32) -> &mut Self {
        self.alpha_target = alpha_target.clamp(0.0, 1.0);
        self
    }

    pub(in crate::app) fn restart(&mut self) -> &mut Self {
        self.running = true;
        self
    }

    pub(in crate::app) fn tick(&mut self, nodes: &mut [RenderNode], scratch: &mut PhysicsScratch) -> bool {
        if !self.running {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
        let alpha = self.alpha;

        apply_links(&self.links, nodes, alpha);
        apply_charge(
            nodes,
            &mut scratch.positions,
            &mut scratch.deltas,
            self.params.charge_strength,
            alpha,
        );
        apply_centering(nodes, self.center);
        apply_collisions(
            nodes,
            &mut scratch.positions,
            &mut scratch.deltas,
            self.params.collide_radius,
            COLLIDE_STRENGTH,
        );

        let retained = 1.0 - self.params.velocity_decay;
        for node in nodes.iter_mut() {
            if let Some(pin) = node.pinned {
                node.world_pos = pin;
                node.velocity = Vec2::ZERO;
            } else {
                node.velocity *= retained;
                node.world_pos += node.velocity;
            }
        }

        if self.alpha < ALPHA_MIN {
            self.running = false;
        }
        self.running
    }
}

pub(in crate::app) fn initial_position(index: usize) -> Vec2 {
    let radius = 10.0 * (0.5 + index as f32).sqrt();
    let angle = index as f32 * std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
    vec2(radius * angle.cos(), radius * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::{TheoryNetwork, TheoryRow};

    fn network(rows: &[(&str, &str, f64, f64)]) -> TheoryNetwork {
        let rows = rows
            .iter()
            .map(|(theory, category, quantum_fidelity, stability)| TheoryRow {
                theory: (*theory).to_owned(),
                category: (*category).to_owned(),
                quantum_fidelity: *quantum_fidelity,
                stability: *stability,
                ..TheoryRow::default()
            })
            .collect::<Vec<_>>();
        TheoryNetwork::build(&rows)
    }

    fn nodes_for(network: &TheoryNetwork) -> Vec<RenderNode> {
        (0..network.node_count())
            .map(|index| RenderNode::at(initial_position(index), 6.0))
            .collect()
    }

    fn scratch() -> PhysicsScratch {
        PhysicsScratch {
            positions: Vec::new(),
            deltas: Vec::new(),
        }
    }

    #[test]
    fn large_layouts_use_lighter_forces() {
        let small = SimulationParams::for_node_count(LARGE_LAYOUT_NODES);
        let large = SimulationParams::for_node_count(LARGE_LAYOUT_NODES + 1);
        assert_eq!(small.charge_strength, -150.0);
        assert_eq!(large.charge_strength, -100.0);
        assert_eq!(large.alpha_decay, 0.02);
        assert!((small.alpha_decay - 0.0228).abs() < 1e-3);
        assert_eq!(small.collide_radius, large.collide_radius);
    }

    #[test]
    fn link_springs_follow_degree() {
        let network = network(&[
            ("a", "Topology", 10.0, 0.5),
            ("b", "Topology", 10.0, 0.5),
            ("c", "Topology", 10.0, 0.5),
        ]);
        let simulation = Simulation::new(&network);
        assert_eq!(simulation.links.len(), 3);
        for link in &simulation.links {
            assert!((link.strength - 0.5).abs() < 1e-6);
            assert!((link.bias - 0.5).abs() < 1e-6);
            // strength 1.3 gives a negative rest length, pulling the pair together
            assert!(link.distance < 0.0);
        }
    }

    #[test]
    fn simulation_cools_and_stops() {
        let network = network(&[
            ("a", "Topology", 10.0, 0.5),
            ("b", "Knot Theory", 12.0, 0.4),
            ("c", "Number Theory", 40.0, 0.1),
        ]);
        let mut nodes = nodes_for(&network);
        let mut scratch = scratch();
        let mut simulation = Simulation::new(&network);

        let mut ticks = 0;
        while simulation.tick(&mut nodes, &mut scratch) {
            ticks += 1;
            assert!(ticks < 1000, "simulation never cooled");
        }
        assert!(simulation.alpha() < ALPHA_MIN);
        assert!(!simulation.is_running());
        assert!(nodes.iter().all(|node| node.world_pos.is_finite()));

        simulation.set_alpha(1.0).restart();
        assert!(simulation.tick(&mut nodes, &mut scratch));
    }

    #[test]
    fn layout_is_centered_and_separated() {
        let rows = (0..12)
            .map(|index| (format!("n{index}"), index as f64 * 3.0))
            .collect::<Vec<_>>();
        let network = network(
            &rows
                .iter()
                .map(|(name, qf)| (name.as_str(), "Number Theory", *qf, 0.5))
                .collect::<Vec<_>>(),
        );
        let mut nodes = nodes_for(&network);
        let mut scratch = scratch();
        let mut simulation = Simulation::new(&network);
        while simulation.tick(&mut nodes, &mut scratch) {}

        let mean = nodes.iter().fold(Vec2::ZERO, |sum, node| sum + node.world_pos)
            / nodes.len() as f32;
        assert!(mean.length() < 5.0);

        for a in 0..nodes.len() {
            for b in a + 1..nodes.len() {
                let gap = (nodes[a].world_pos - nodes[b].world_pos).length();
                assert!(gap > 10.0, "nodes {a} and {b} overlap at {gap}");
            }
        }
    }

    #[test]
    fn pinned_nodes_hold_their_position() {
        let network = network(&[
            ("a", "Topology", 10.0, 0.5),
            ("b", "Topology", 10.0, 0.5),
        ]);
        let mut nodes = nodes_for(&network);
        let pin = vec2(120.0, -40.0);
        nodes[0].pinned = Some(pin);

        let mut scratch = scratch();
        let mut simulation = Simulation::new(&network);
        simulation.set_alpha_target(DRAG_ALPHA_TARGET).restart();
        for _ in 0..50 {
            simulation.tick(&mut nodes, &mut scratch);
            assert_eq!(nodes[0].world_pos, pin);
            assert_eq!(nodes[0].velocity, Vec2::ZERO);
        }
        assert!(simulation.is_running());
        assert!(simulation.alpha() > 0.2);
    }

    #[test]
    fn phyllotaxis_seeds_are_distinct() {
        let seeds = (0..50).map(initial_position).collect::<Vec<_>>();
        for a in 0..seeds.len() {
            for b in a + 1..seeds.len() {
                assert!((seeds[a] - seeds[b]).length() > 1.0);
            }
        }
    }
}
