// End-to-end clustering behavior: growth, merging, and convergence.
use geo::polygon;
use morphocluster::{Collection, Footprint, GrowthSchedule, Iteration, RunConfig, Runner, Uniter};

fn square(x0: f64, y0: f64, side: f64) -> Footprint {
    Footprint::from_polygon(polygon![
        (x: x0, y: y0),
        (x: x0 + side, y: y0),
        (x: x0 + side, y: y0 + side),
        (x: x0, y: y0 + side),
    ])
}

/// Unit squares (0,0)-(1,1) and (2,0)-(3,1): gap of 1 along x.
fn gap_one_pair() -> Collection {
    let mut c = Collection::new();
    c.add(square(0.0, 0.0, 1.0));
    c.add(square(2.0, 0.0, 1.0));
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_half_gap_keeps_two_clusters() {
        // Growing by 0.5 closes the gap to exactly 0: boundary contact,
        // no shared area, still two clusters.
        let next = Iteration::new(gap_one_pair(), 0.5).unwrap().make().unwrap();
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_growth_past_half_gap_merges() {
        let next = Iteration::new(gap_one_pair(), 0.6).unwrap().make().unwrap();
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_union_area_of_half_overlapping_squares() {
        // Two unit squares sharing half their area fuse into one footprint
        // whose area is the union area, strictly less than the sum.
        let mut c = Collection::new();
        c.add(square(0.0, 0.0, 1.0));
        let merged = Uniter::merge(c, square(0.5, 0.0, 1.0));
        assert_eq!(merged.len(), 1);
        let area = merged.get(0).unwrap().area();
        assert!((area - 1.5).abs() < 1e-9);
        assert!(area < 2.0);
    }

    #[test]
    fn test_remerge_of_disjoint_elements_is_idempotent() {
        let mut original = Collection::new();
        for (x, y) in [(0.0, 0.0), (3.0, 0.0), (0.0, 3.0)] {
            original = Uniter::merge(original, square(x, y, 1.0));
        }
        let total_area: f64 = original.iter().map(|f| f.area()).sum();

        let mut remerged = Collection::new();
        for footprint in original.iter() {
            remerged = Uniter::merge(remerged, footprint.clone());
        }
        assert_eq!(remerged.len(), original.len());
        let remerged_area: f64 = remerged.iter().map(|f| f.area()).sum();
        assert!((remerged_area - total_area).abs() < 1e-9);
    }

    #[test]
    fn test_convergence_is_monotonic_and_finite() {
        let mut collection = Collection::new();
        for (x, y) in [(0.0, 0.0), (4.0, 0.0), (0.0, 5.0), (7.0, 7.0), (12.0, 2.0)] {
            collection = Uniter::merge(collection, square(x, y, 1.0));
        }
        let run = Runner::new(RunConfig::default_catalog()).run(collection).unwrap();
        let counts: Vec<f64> = run
            .history
            .iter_numbered()
            .map(|(_, r)| r["cluster_number"].as_number().unwrap())
            .collect();
        assert!(
            counts.windows(2).all(|w| w[1] <= w[0]),
            "cluster count increased: {:?}",
            counts
        );
        assert_eq!(*counts.last().unwrap(), 1.0);
        assert_eq!(run.final_collection.len(), 1);
    }

    #[test]
    fn test_every_iteration_state_is_pairwise_disjoint() {
        let mut collection = Collection::new();
        for (x, y) in [(0.0, 0.0), (3.0, 0.5), (6.0, 0.0), (3.0, 6.0)] {
            collection = Uniter::merge(collection, square(x, y, 1.0));
        }
        let mut checked = 0;
        Runner::new(RunConfig::default_catalog())
            .run_with(collection, |_, state| {
                for (i, a) in state.iter().enumerate() {
                    for b in state.iter().skip(i + 1) {
                        let shared = {
                            use geo::{Area, BooleanOps};
                            a.shape().intersection(b.shape()).unsigned_area()
                        };
                        assert!(shared == 0.0, "clusters share area {shared}");
                        checked += 1;
                    }
                }
            })
            .unwrap();
        assert!(checked > 0);
    }

    #[test]
    fn test_ramp_schedule_converges_faster_than_constant() {
        let config_constant = RunConfig {
            schedule: GrowthSchedule::Constant(0.5),
            ..RunConfig::default_catalog()
        };
        let config_ramp = RunConfig {
            schedule: GrowthSchedule::Ramp(0.5),
            ..RunConfig::default_catalog()
        };
        // Gap of 4: constant 0.5 needs five iterations, ramp three.
        let mut far = Collection::new();
        far.add(square(0.0, 0.0, 1.0));
        far.add(square(5.0, 0.0, 1.0));
        let constant = Runner::new(config_constant).run(far.clone()).unwrap();
        let ramp = Runner::new(config_ramp).run(far).unwrap();
        assert!(ramp.iterations <= constant.iterations);
        assert_eq!(ramp.final_collection.len(), 1);
    }

    #[test]
    fn test_initial_merge_fuses_transitively() {
        // The bridge overlaps both outer squares, so one merge call fuses
        // all three even though the outer squares never touch each other.
        let mut c = Collection::new();
        c.add(square(0.0, 0.0, 1.0));
        c.add(square(4.0, 0.0, 1.0));
        let bridge = Footprint::from_polygon(polygon![
            (x: 0.5, y: 0.25), (x: 4.5, y: 0.25), (x: 4.5, y: 0.75), (x: 0.5, y: 0.75),
        ]);
        let merged = Uniter::merge(c, bridge);
        assert_eq!(merged.len(), 1);
    }
}
