use eframe::egui::Vec2;

use crate::theory::{CategoryFilter, TheoryNetwork};

use super::super::physics::{Simulation, initial_position};
use super::super::render_utils::{node_fill, node_radius};
use super::super::{PhysicsScratch, RenderGraph, RenderNode, ViewModel, ViewScratch};

impl ViewModel {
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.render_graph_revision = self.render_graph_revision.wrapping_add(1);
        self.search_match_cache = None;
        self.hovered = None;
        self.dragging = None;
        self.view_reset = None;
        self.pan = Vec2::ZERO;
        self.zoom = 1.0;

        let network = TheoryNetwork::build(self.dataset.filtered(&self.category));
        let domain = self.dataset.color_domain();

        let nodes = network
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| RenderNode {
                fill: node_fill(node, domain),
                ..RenderNode::at(initial_position(index), node_radius(node))
            })
            .collect::<Vec<_>>();

        let simulation = Simulation::new(&network);
        tracing::debug!(
            category = %self.category,
            nodes = network.node_count(),
            edges = network.edge_count(),
            charge = simulation.params().charge_strength,
            "rebuilt theory network"
        );

        self.graph_cache = Some(RenderGraph {
            network,
            nodes,
            simulation,
            physics_scratch: PhysicsScratch {
                positions: Vec::new(),
                deltas: Vec::new(),
            },
            view_scratch: ViewScratch {
                screen_positions: Vec::new(),
                screen_radii: Vec::new(),
            },
        });
        self.graph_dirty = false;
    }

    pub(in crate::app) fn set_category(&mut self, category: CategoryFilter) {
        if self.category == category {
            return;
        }

        self.category = category;
        self.graph_dirty = true;
    }
}
