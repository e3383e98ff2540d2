// Metric catalog behavior on known configurations, plus the exported
// result shape.
use geo::polygon;
use morphocluster::{
    ClusterError, Collection, Footprint, MetricContext, MetricKind, RunConfig, Runner,
};

fn square(x0: f64, y0: f64, side: f64) -> Footprint {
    Footprint::from_polygon(polygon![
        (x: x0, y: y0),
        (x: x0 + side, y: y0),
        (x: x0 + side, y: y0 + side),
        (x: x0, y: y0 + side),
    ])
}

/// Unit squares (0,0)-(1,1) and (2,0)-(3,1).
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
    fn test_minimum_cluster_distance_is_the_gap() {
        let value = MetricKind::MinimumClusterDistance
            .calculate(&gap_one_pair(), &MetricContext::default())
            .unwrap();
        assert_eq!(value.as_number(), Some(1.0));
    }

    #[test]
    fn test_dlimit_is_half_the_worst_nearest_neighbor() {
        let value = MetricKind::Dlimit
            .calculate(&gap_one_pair(), &MetricContext::default())
            .unwrap();
        assert_eq!(value.as_number(), Some(0.5));
    }

    #[test]
    fn test_total_area_under_hull_without_overlaps() {
        // With the hull covering every footprint and no overlaps, the
        // clipped sum is exactly the sum of the individual areas.
        let collection = gap_one_pair();
        let hull = collection.hull();
        let context = MetricContext {
            hull: Some(&hull),
            ..MetricContext::default()
        };
        let value = MetricKind::TotalArea
            .calculate(&collection, &context)
            .unwrap();
        assert!((value.as_number().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_perimeter_sums_boundaries() {
        let value = MetricKind::TotalPerimeter
            .calculate(&gap_one_pair(), &MetricContext::default())
            .unwrap();
        assert!((value.as_number().unwrap() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_ratio_against_own_hull() {
        // Hull spans (0,0)-(3,1): area 3; each unit square contributes 1/3.
        let collection = gap_one_pair();
        let hull = collection.hull();
        let context = MetricContext {
            hull: Some(&hull),
            ..MetricContext::default()
        };
        let value = MetricKind::AreaRatio
            .calculate(&collection, &context)
            .unwrap();
        assert!((value.as_number().unwrap() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_area_ratio_cell_prefers_the_sample_region() {
        // Sample covers only the left square.
        let collection = gap_one_pair();
        let hull = collection.hull();
        let sample = polygon![
            (x: -0.5, y: -0.5), (x: 1.5, y: -0.5), (x: 1.5, y: 1.5), (x: -0.5, y: 1.5),
        ];
        let context = MetricContext {
            hull: Some(&hull),
            sample: Some(&sample),
            ..MetricContext::default()
        };
        let value = MetricKind::AreaRatioCell
            .calculate(&collection, &context)
            .unwrap();
        // Left square fully inside a 4-area sample: ratio 1/4.
        assert!((value.as_number().unwrap() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_distance_matrix_entries_are_symmetric_in_input_order() {
        let forward = MetricKind::DistanceMatrix
            .calculate(&gap_one_pair(), &MetricContext::default())
            .unwrap();
        let mut reversed_input = Collection::new();
        reversed_input.add(square(2.0, 0.0, 1.0));
        reversed_input.add(square(0.0, 0.0, 1.0));
        let reversed = MetricKind::DistanceMatrix
            .calculate(&reversed_input, &MetricContext::default())
            .unwrap();
        let (morphocluster::MetricValue::Matrix(a), morphocluster::MetricValue::Matrix(b)) =
            (forward, reversed)
        else {
            panic!("distance_matrix must produce a matrix");
        };
        assert!((a[0][1] - b[0][1]).abs() < 1e-12);
        assert_eq!(a[1][0], 0.0);
    }

    #[test]
    fn test_hindex_counts_reference_coverage() {
        // After full convergence one cluster intersects both originals;
        // the distribution [2] never qualifies, so the index defaults to 1.
        let initial = gap_one_pair();
        let mut fused = Collection::new();
        fused.add(square(0.0, 0.0, 3.0));
        let context = MetricContext {
            initial: Some(&initial),
            ..MetricContext::default()
        };
        let value = MetricKind::Hindex.calculate(&fused, &context).unwrap();
        assert_eq!(value.as_number(), Some(1.0));
    }

    #[test]
    fn test_unknown_metric_name_fails_before_any_geometry() {
        let err = MetricKind::from_name("not_a_real_metric").unwrap_err();
        assert!(matches!(
            err,
            ClusterError::UnknownMetric { name } if name == "not_a_real_metric"
        ));
    }

    #[test]
    fn test_exported_history_shape() {
        let run = Runner::new(RunConfig::default_catalog())
            .run(gap_one_pair())
            .unwrap();
        let json = serde_json::to_value(&run.history).unwrap();
        let map = json.as_object().unwrap();
        assert!(map.contains_key("0"), "iteration labels are stringified");
        let record = map["0"].as_object().unwrap();
        assert_eq!(record["cluster_number"], serde_json::json!(2.0));
        assert!(record.contains_key("total_area"));

        let summary = serde_json::to_value(&run.summary).unwrap();
        assert!(summary.as_object().unwrap().contains_key("cluster_number_xy"));
        assert!(summary.as_object().unwrap().contains_key("total_area_total_sum"));
    }

    #[test]
    fn test_run_records_match_direct_metric_calls() {
        let collection = gap_one_pair();
        let hull = collection.hull();
        let context = MetricContext {
            initial: Some(&collection),
            hull: Some(&hull),
            ..MetricContext::default()
        };
        let direct = MetricKind::MinimumClusterDistance
            .calculate(&collection, &context)
            .unwrap();

        let run = Runner::new(RunConfig::default_catalog())
            .run(collection.clone())
            .unwrap();
        let recorded = &run.history.get("0").unwrap()["minimum_cluster_distance"];
        assert_eq!(recorded.as_number(), direct.as_number());
    }
}
