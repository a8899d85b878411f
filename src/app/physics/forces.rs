use eframe::egui::{Vec2, vec2};

use super::super::RenderNode;
use super::quadtree::QuadNode;

const THETA: f32 = 0.9;
const MIN_DISTANCE_SQ: f32 = 1.0;

#[derive(Clone, Copy, Debug)]
pub(super) struct LinkSpring {
    pub(super) source: usize,
    pub(super) target: usize,
    pub(super) distance: f32,
    pub(super) strength: f32,
    pub(super) bias: f32,
}

fn jiggle(seed: usize) -> f32 {
    let offset = ((seed as f32) * 0.618_034).fract() - 0.5;
    offset.signum() * offset.abs().max(1e-3) * 1e-6
}

fn non_zero(mut delta: Vec2, seed: usize) -> Vec2 {
    if delta.x == 0.0 {
        delta.x = jiggle(seed);
    }
    if delta.y == 0.0 {
        delta.y = jiggle(seed.wrapping_add(7));
    }
    delta
}

pub(super) fn apply_links(links: &[LinkSpring], nodes: &mut [RenderNode], alpha: f32) {
    for (index, link) in links.iter().enumerate() {
        if link.source == link.target || link.source >= nodes.len() || link.target >= nodes.len() {
            continue;
        }

        let source = &nodes[link.source];
        let target = &nodes[link.target];
        let delta = non_zero(
            (target.world_pos + target.velocity) - (source.world_pos + source.velocity),
            index,
        );
        let length = delta.length();
        let correction = delta * ((length - link.distance) / length * alpha * link.strength);

        nodes[link.target].velocity -= correction * link.bias;
        nodes[link.source].velocity += correction * (1.0 - link.bias);
    }
}

fn charge_on(
    cell: &QuadNode,
    index: usize,
    positions: &[Vec2],
    strength: f32,
    alpha: f32,
    delta_velocity: &mut Vec2,
) {
    if cell.count == 0 {
        return;
    }

    let point = positions[index];
    let offset = cell.centroid - point;
    let distance_sq = offset.length_sq();

    if !cell.is_leaf() {
        let far_enough = !cell.bounds.contains(point)
            && cell.bounds.width() * cell.bounds.width() / (THETA * THETA) < distance_sq;
        if far_enough {
            let offset = non_zero(offset, index);
            let distance_sq = clamp_distance_sq(offset.length_sq());
            *delta_velocity += offset * (strength * cell.count as f32 * alpha / distance_sq);
            return;
        }

        for child in cell.children.iter().flatten() {
            charge_on(child, index, positions, strength, alpha, delta_velocity);
        }
        return;
    }

    for &other in &cell.indices {
        if other == index {
            continue;
        }
        let offset = non_zero(positions[other] - point, index ^ other);
        let distance_sq = clamp_distance_sq(offset.length_sq());
        *delta_velocity += offset * (strength * alpha / distance_sq);
    }
}

fn clamp_distance_sq(distance_sq: f32) -> f32 {
    if distance_sq < MIN_DISTANCE_SQ {
        (MIN_DISTANCE_SQ * distance_sq).sqrt().max(f32::EPSILON)
    } else {
        distance_sq
    }
}

pub(super) fn apply_charge(
    nodes: &mut [RenderNode],
    positions: &mut Vec<Vec2>,
    deltas: &mut Vec<Vec2>,
    strength: f32,
    alpha: f32,
) {
    positions.clear();
    positions.extend(nodes.iter().map(|node| node.world_pos));

    let Some(tree) = QuadNode::build(positions) else {
        return;
    };

    deltas.clear();
    deltas.resize(nodes.len(), Vec2::ZERO);
    for (index, delta) in deltas.iter_mut().enumerate() {
        charge_on(&tree, index, positions, strength, alpha, delta);
    }

    for (node, delta) in nodes.iter_mut().zip(deltas.iter()) {
        node.velocity += *delta;
    }
}

pub(super) fn apply_centering(nodes: &mut [RenderNode], center: Vec2) {
    if nodes.is_empty() {
        return;
    }

    let mean = nodes
        .iter()
        .fold(Vec2::ZERO, |sum, node| sum + node.world_pos)
        / nodes.len() as f32;
    let shift = mean - center;
    for node in nodes.iter_mut() {
        node.world_pos -= shift;
    }
}

pub(super) fn apply_collisions(
    nodes: &mut [RenderNode],
    positions: &mut Vec<Vec2>,
    deltas: &mut Vec<Vec2>,
    radius: f32,
    strength: f32,
) {
    positions.clear();
    positions.extend(nodes.iter().map(|node| node.world_pos + node.velocity));

    let Some(tree) = QuadNode::build(positions) else {
        return;
    };

    deltas.clear();
    deltas.resize(nodes.len(), Vec2::ZERO);
    let reach = radius * 2.0;
    tree.for_each_close_pair(reach, &mut |from, to| {
        let offset = positions[from] - positions[to];
        let distance_sq = offset.length_sq();
        if distance_sq >= reach * reach {
            return;
        }

        let offset = if distance_sq == 0.0 {
            let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
            vec2(angle.cos(), angle.sin()) * 1e-3
        } else {
            offset
        };
        let distance = offset.length();
        let push = offset * ((reach - distance) / distance * strength);

        // equal radii share the correction evenly
        deltas[from] += push * 0.5;
        deltas[to] -= push * 0.5;
    });

    for (node, delta) in nodes.iter_mut().zip(deltas.iter()) {
        node.velocity += *delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jiggle_is_never_zero() {
        for seed in 0..10_000 {
            let nudge = jiggle(seed);
            assert!(nudge != 0.0 && nudge.is_finite(), "seed {seed} gave {nudge}");
        }
    }

    #[test]
    fn coincident_link_endpoints_stay_finite() {
        let mut nodes = vec![
            RenderNode::at(vec2(5.0, 5.0), 8.0),
            RenderNode::at(vec2(5.0, 5.0), 8.0),
        ];
        let links = [LinkSpring {
            source: 0,
            target: 1,
            distance: 40.0,
            strength: 1.0,
            bias: 0.5,
        }];

        apply_links(&links, &mut nodes, 1.0);

        for node in &nodes {
            assert!(node.velocity.x.is_finite() && node.velocity.y.is_finite());
        }
    }
}
