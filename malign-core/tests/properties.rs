use malign_core::matrix::for_each_match;
use malign_core::sorting::{sort_features, sort_markers};
use malign_core::{align, CoordinateTransform, KmerId, Options, SparseMatrix};
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn transform_and_point() -> impl Strategy<Value = (CoordinateTransform, (u32, u32))> {
    (1u32..500, 1u32..500, 1u32..64, 1u32..64).prop_flat_map(|(nx, ny, dx, dy)| {
        (Just(CoordinateTransform::new(nx, ny, dx, dy)), (0..nx, 0..ny))
    })
}

fn markers(alphabet: u32, max_len: usize) -> impl Strategy<Value = Vec<KmerId>> {
    prop::collection::vec(0..alphabet, 1..max_len)
}

proptest! {
    #[test]
    fn cell_of_point_is_cell_of_its_diagonal_coordinates((t, xy) in transform_and_point()) {
        prop_assert_eq!(t.xy_to_cell(xy), t.diagonal_to_cell(t.xy_to_diagonal(xy)));
    }

    #[test]
    fn diagonal_coordinates_round_trip((t, xy) in transform_and_point()) {
        let (big_x, big_y) = t.xy_to_diagonal(xy);
        prop_assert!(big_x < t.diagonal_extent());
        prop_assert!(big_y < t.diagonal_extent());
        prop_assert_eq!(t.diagonal_to_xy((big_x, big_y)), Some(xy));
    }

    #[test]
    fn cell_ranges_contain_the_point((t, xy) in transform_and_point()) {
        let cell = t.xy_to_cell(xy);
        let (x0, x1) = t.x_range_of_cell(cell).unwrap();
        prop_assert!(x0 <= xy.0 && xy.0 <= x1);
        let (y0, y1) = t.y_range_in_cell(cell, xy.0).unwrap();
        prop_assert!(y0 <= xy.1 && xy.1 <= y1);
    }

    #[test]
    fn distinct_markers_use_every_diagonal_coordinate(nx in 1u32..100, ny in 1u32..100) {
        // No marker repeats within a sequence.
        let seq0: Vec<KmerId> = (0..nx).collect();
        let seq1: Vec<KmerId> = (0..ny).collect();
        let t = CoordinateTransform::new(nx, ny, 1, 1);

        let mut xs = HashSet::new();
        let mut ys = HashSet::new();
        for x in 0..nx {
            for y in 0..ny {
                let (big_x, big_y) = t.xy_to_diagonal((x, y));
                xs.insert(big_x);
                ys.insert(big_y);
            }
        }
        prop_assert_eq!(xs.len() as u32, nx + ny - 1);
        prop_assert_eq!(ys.len() as u32, nx + ny - 1);

        let mut matches = 0u32;
        for_each_match(&sort_markers(&seq0), &sort_markers(&seq1), |(x, y)| {
            assert_eq!(x, y);
            matches += 1;
        });
        prop_assert_eq!(matches, nx.min(ny));
    }

    #[test]
    fn join_emits_the_full_cross_product(seq0 in markers(12, 60), seq1 in markers(12, 60)) {
        let mut count0: HashMap<KmerId, u64> = HashMap::new();
        let mut count1: HashMap<KmerId, u64> = HashMap::new();
        for &m in &seq0 { *count0.entry(m).or_default() += 1; }
        for &m in &seq1 { *count1.entry(m).or_default() += 1; }
        let expected: u64 = count0.iter().map(|(m, c)| c * count1.get(m).copied().unwrap_or(0)).sum();

        let mut emitted = 0u64;
        for_each_match(&sort_markers(&seq0), &sort_markers(&seq1), |(x, y)| {
            assert_eq!(seq0[x as usize], seq1[y as usize]);
            emitted += 1;
        });
        prop_assert_eq!(emitted, expected);

        let t = CoordinateTransform::new(seq0.len() as u32, seq1.len() as u32, 7, 3);
        let mut matrix = SparseMatrix::new();
        matrix.build(&sort_markers(&seq0), &sort_markers(&seq1), &t);
        prop_assert_eq!(matrix.entry_count() as u64, expected);
    }

    #[test]
    fn feature_join_matches_windows(seq0 in markers(4, 40), seq1 in markers(4, 40)) {
        prop_assume!(seq0.len() >= 3 && seq1.len() >= 3);
        let mut expected = 0usize;
        for a in seq0.windows(3) {
            for b in seq1.windows(3) {
                if a == b {
                    expected += 1;
                }
            }
        }
        let mut emitted = 0usize;
        for_each_match(&sort_features::<3>(&seq0), &sort_features::<3>(&seq1), |(x, y)| {
            let (x, y) = (x as usize, y as usize);
            assert_eq!(&seq0[x..x + 3], &seq1[y..y + 3]);
            emitted += 1;
        });
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn alignment_is_deterministic_and_consistent(
        seq0 in markers(30, 80),
        seq1 in markers(30, 80),
        m in 0u32..4,
    ) {
        prop_assume!(seq0.len() >= m as usize && seq1.len() >= m as usize);
        let options = Options {
            m,
            delta_x: 16,
            delta_y: 4,
            min_entry_count_per_cell: 2,
            ..Default::default()
        };
        let mut work_area = SparseMatrix::new();
        let first = align(&seq0, &seq1, &options, &mut work_area, None);
        let second = align(&seq0, &seq1, &options, &mut work_area, None);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(&a, &b);
                let (alignment, info) = a;
                prop_assert!(info.match_count > 0);
                for (x, y) in alignment.ordinals() {
                    prop_assert_eq!(seq0[x as usize], seq1[y as usize]);
                }
                let pairs: Vec<_> = alignment.aligned_pairs().collect();
                prop_assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1));
            }
            (Err(a), Err(b)) => {
                prop_assert!(a.is_not_found());
                prop_assert_eq!(a.to_string(), b.to_string());
            }
            _ => prop_assert!(false, "repeated calls disagree"),
        }
    }
}
