use rayon::prelude::*;
use std::collections::HashMap;

use crate::Float;
use crate::image::features::matches::Match;
use crate::image::descriptors::surf_descriptor::SurfDescriptor;
use crate::image::pyramid::surf::surf_runtime_parameters::SurfRuntimeParameters;

/// Best and second best squared distances of one query against the searched set.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct NearestNeighbours {
    pub best_index: Option<usize>,
    pub best_distance: Float,
    pub second_distance: Float
}

/// Scans every descriptor of `candidates` with the same laplacian sign as `query`.
/// Distances at or beyond `max_distance` never displace the initial values.
pub fn nearest_neighbours(query: &SurfDescriptor, candidates: &[SurfDescriptor], max_distance: Float) -> NearestNeighbours {
    let mut neighbours = NearestNeighbours { best_index: None, best_distance: max_distance, second_distance: max_distance };

    for (j, candidate) in candidates.iter().enumerate() {
        if candidate.key_point.sign_laplacian != query.key_point.sign_laplacian {
            continue;
        }
        let distance = query.squared_distance_to(candidate);
        if neighbours.second_distance > distance {
            neighbours.second_distance = distance;
        }
        if neighbours.best_distance > distance {
            neighbours.best_index = Some(j);
            neighbours.second_distance = neighbours.best_distance;
            neighbours.best_distance = distance;
        }
    }

    neighbours
}

/// Ratio test on squared distances: `ratio^2 * second > best`.
pub fn passes_ratio_test(neighbours: &NearestNeighbours, ratio: Float) -> Option<usize> {
    match neighbours.best_index {
        Some(idx) if ratio*ratio*neighbours.second_distance > neighbours.best_distance => Some(idx),
        _ => None
    }
}

/// Directional matching of `descriptors_a` into `descriptors_b`. Swapping the arguments can give a
/// different answer. Matches keep the order of `descriptors_a`, after duplicate pruning.
pub fn match_descriptors(descriptors_a: &[SurfDescriptor], descriptors_b: &[SurfDescriptor], runtime_parameters: &SurfRuntimeParameters) -> Vec<Match<SurfDescriptor>> {
    let ratio = runtime_parameters.match_ratio;
    let max_distance = runtime_parameters.max_match_distance_squared;

    let matches = descriptors_a.par_iter()
        .map(|a| passes_ratio_test(&nearest_neighbours(a, descriptors_b, max_distance), ratio).map(|idx| Match::new(a.clone(), descriptors_b[idx].clone())))
        .collect::<Vec<Option<Match<SurfDescriptor>>>>()
        .into_iter()
        .flatten()
        .collect::<Vec<Match<SurfDescriptor>>>();

    let accepted = matches.len();
    let pruned = prune_duplicate_matches(matches);
    log::info!("{} of {} descriptors matched, {} dropped as duplicates", pruned.len(), descriptors_a.len(), accepted - pruned.len());
    pruned
}

/// Removes every match whose first keypoint shares its truncated pixel with another match.
pub fn prune_duplicate_matches(matches: Vec<Match<SurfDescriptor>>) -> Vec<Match<SurfDescriptor>> {
    let mut pixel_counts = HashMap::<(usize,usize), usize>::with_capacity(matches.len());
    for m in matches.iter() {
        *pixel_counts.entry(m.get_pixel_one()).or_insert(0) += 1;
    }

    matches.into_iter().filter(|m| pixel_counts[&m.get_pixel_one()] == 1).collect()
}
