use std::collections::HashSet;
use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::AxisRange;
use crate::constants::{
    NETWORK_ATTEMPTS_PER_NODE, NETWORK_MAX_CONNECTIONS, NETWORK_MAX_DISTANCE,
};

const X: AxisRange = AxisRange::new(-39.0, 39.0);
const Y: AxisRange = AxisRange::new(6.0, 38.0);
const Z: AxisRange = AxisRange::new(-60.0, 60.0);

/// Connection sampling parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkParams {
    pub attempts_per_node: usize,
    pub max_connections: usize,
    pub max_distance: f32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            attempts_per_node: NETWORK_ATTEMPTS_PER_NODE,
            max_connections: NETWORK_MAX_CONNECTIONS,
            max_distance: NETWORK_MAX_DISTANCE,
        }
    }
}

/// Network backdrop: drifting nodes joined by a fixed sparse graph
///
/// Connections are sampled once: every node tries a bounded number of random
/// partners and keeps those within range while both endpoints have spare
/// degree. Line endpoints follow the nodes every frame.
pub struct Network {
    base: Vec<Vec3>,
    seeds: Vec<f32>,
    positions: Vec<[f32; 3]>,
    connections: Vec<(u32, u32)>,
    lines: Vec<[f32; 3]>,
}

impl Network {
    pub fn new(count: usize, params: NetworkParams, mut rng: Pcg32) -> Self {
        let mut base = Vec::with_capacity(count);
        let mut seeds = Vec::with_capacity(count);
        for _ in 0..count {
            base.push(Vec3::new(X.sample(&mut rng), Y.sample(&mut rng), Z.sample(&mut rng)));
            seeds.push(rng.random::<f32>() * TAU);
        }

        let connections = connect(&base, params, &mut rng);
        log::debug!(
            "[backdrop] network: {} nodes, {} connections",
            count,
            connections.len()
        );

        let positions = base.iter().map(|p| p.to_array()).collect();
        let lines = vec![[0.0; 3]; connections.len() * 2];
        let mut network = Self {
            base,
            seeds,
            positions,
            connections,
            lines,
        };
        network.update(0.0);
        network
    }

    /// Oscillate nodes around their base positions and rebuild line segments
    pub fn update(&mut self, t: f32) {
        for ((p, base), seed) in self.positions.iter_mut().zip(&self.base).zip(&self.seeds) {
            p[0] = base.x + (t * 0.08 + seed).sin() * 0.6;
            p[1] = base.y + (t * 0.07 + seed).cos() * 0.4;
            p[2] = base.z + (t * 0.06 + seed * 1.3).sin() * 0.5;
        }
        for (segment, &(a, b)) in self.lines.chunks_exact_mut(2).zip(&self.connections) {
            segment[0] = self.positions[a as usize];
            segment[1] = self.positions[b as usize];
        }
    }

    /// Node and line opacity for the `show_network` channel
    #[inline]
    pub fn opacities(visibility: f32) -> (f32, f32) {
        (0.10 * visibility, 0.12 * visibility)
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Line-list vertices, two per connection
    #[inline]
    pub fn lines(&self) -> &[[f32; 3]] {
        &self.lines
    }

    #[inline]
    pub fn connections(&self) -> &[(u32, u32)] {
        &self.connections
    }

    #[inline]
    pub fn base_positions(&self) -> &[Vec3] {
        &self.base
    }
}

fn connect(base: &[Vec3], params: NetworkParams, rng: &mut Pcg32) -> Vec<(u32, u32)> {
    let count = base.len();
    let mut degree = vec![0usize; count];
    let mut seen = HashSet::new();
    let mut connections = Vec::new();
    if count < 2 {
        return connections;
    }

    for i in 0..count {
        for _ in 0..params.attempts_per_node {
            if degree[i] >= params.max_connections {
                break;
            }
            let j = rng.random_range(0..count);
            if i == j || degree[j] >= params.max_connections {
                continue;
            }
            if base[i].distance(base[j]) > params.max_distance {
                continue;
            }
            if !seen.insert((i.min(j), i.max(j))) {
                continue;
            }
            degree[i] += 1;
            degree[j] += 1;
            connections.push((i as u32, j as u32));
        }
    }
    connections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NETWORK_NODES;
    use crate::particles::{system_rng, NETWORK_RNG};

    #[test]
    fn test_connection_bounds() {
        let params = NetworkParams::default();
        for seed in 0..20 {
            let network = Network::new(NETWORK_NODES, params, system_rng(seed, NETWORK_RNG));
            let mut degree = vec![0; NETWORK_NODES];
            for &(a, b) in network.connections() {
                assert_ne!(a, b);
                let d = network.base_positions()[a as usize]
                    .distance(network.base_positions()[b as usize]);
                assert!(d <= params.max_distance);
                degree[a as usize] += 1;
                degree[b as usize] += 1;
            }
            assert!(degree.iter().all(|&d| d <= params.max_connections));
        }
    }

    #[test]
    fn test_no_duplicate_pairs() {
        let network =
            Network::new(NETWORK_NODES, NetworkParams::default(), system_rng(5, NETWORK_RNG));
        let mut pairs: Vec<_> = network
            .connections()
            .iter()
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect();
        let len = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), len);
    }

    #[test]
    fn test_lines_follow_nodes() {
        let params = NetworkParams {
            max_distance: 1000.0,
            ..Default::default()
        };
        let mut network = Network::new(60, params, system_rng(2, NETWORK_RNG));
        assert!(!network.connections().is_empty());
        network.update(12.5);
        let (a, b) = network.connections()[0];
        assert_eq!(network.lines()[0], network.positions()[a as usize]);
        assert_eq!(network.lines()[1], network.positions()[b as usize]);
    }

    #[test]
    fn test_oscillation_stays_near_base() {
        let mut network = Network::new(30, NetworkParams::default(), system_rng(8, NETWORK_RNG));
        network.update(1234.0);
        for (p, base) in network.positions().iter().zip(network.base_positions()) {
            assert!((Vec3::from_array(*p) - *base).length() <= 0.9);
        }
    }

    #[test]
    fn test_tiny_network() {
        let network = Network::new(1, NetworkParams::default(), system_rng(1, NETWORK_RNG));
        assert!(network.connections().is_empty());
        assert_eq!(network.positions().len(), 1);
    }

    #[test]
    fn test_opacities_scale_with_visibility() {
        assert_eq!(Network::opacities(0.0), (0.0, 0.0));
        let (node, line) = Network::opacities(1.0);
        assert!((node - 0.10).abs() < 1e-6);
        assert!((line - 0.12).abs() < 1e-6);
    }
}
