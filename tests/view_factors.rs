//! End-to-end validation of the visibility and view-factor analysis.

use asterotherm::shape::visibility::find_visible_facets;
use asterotherm::{Facet, Point, Shape, ShapeConfig, TriangleIndex};
use anyhow::Result;

/// Unit square at height `z`, cut into an `n` x `n` grid of cells with two
/// triangles each. `facing_down` selects the winding.
fn square_grid(n: usize, z: f64, facing_down: bool) -> Vec<Facet> {
    let mut facets = Vec::with_capacity(2 * n * n);
    let h = 1. / n as f64;
    for i in 0..n {
        for j in 0..n {
            let (x0, x1) = (i as f64 * h, (i + 1) as f64 * h);
            let (y0, y1) = (j as f64 * h, (j + 1) as f64 * h);
            let a = Point::new(x0, y0, z);
            let b = Point::new(x1, y0, z);
            let c = Point::new(x1, y1, z);
            let d = Point::new(x0, y1, z);
            if facing_down {
                facets.push(Facet::new(a, c, b).unwrap());
                facets.push(Facet::new(a, d, c).unwrap());
            } else {
                facets.push(Facet::new(a, b, c).unwrap());
                facets.push(Facet::new(a, c, d).unwrap());
            }
        }
    }
    facets
}

/// Two parallel unit squares one apart, facing each other. The summed
/// point-to-area view factors, averaged over one square, approach the
/// analytic parallel-plate exchange factor 0.1998 as the decomposition
/// refines; an 8x8 grid per square is within 1%.
#[test]
fn parallel_plates_match_analytic_view_factor() {
    let n = 8;
    let mut facets = square_grid(n, 0., false); // bottom, facing up
    facets.extend(square_grid(n, 1., true)); // top, facing down
    let bottom_count = 2 * n * n;
    find_visible_facets(&mut facets);

    let mut weighted_sum = 0.;
    let mut total_area = 0.;
    for facet in facets.iter().take(bottom_count) {
        let sum: f64 = facet.visible.iter().map(|vf| vf.view_factor).sum();
        // Coplanar neighbours are invisible: everything seen is up top.
        for vf in &facet.visible {
            assert!(vf.index >= bottom_count);
            assert!(vf.view_factor > 0.);
            assert!((vf.direction.length() - 1.).abs() < 1e-12);
        }
        weighted_sum += sum * facet.area;
        total_area += facet.area;
    }

    let mean = weighted_sum / total_area;
    let analytic = 0.1998;
    assert!(
        ((mean - analytic) / analytic).abs() < 0.01,
        "mean summed view factor = {mean:.5}, analytic = {analytic}"
    );
}

/// Reciprocity `f_ij * A_i = f_ji * A_j` for every mutually visible pair.
#[test]
fn parallel_plates_reciprocity() {
    let n = 4;
    let mut facets = square_grid(n, 0., false);
    facets.extend(square_grid(n, 1., true));
    find_visible_facets(&mut facets);

    let mut checked = 0;
    for (i, facet) in facets.iter().enumerate() {
        for vf in &facet.visible {
            let back = facets[vf.index]
                .visible
                .iter()
                .find(|other| other.index == i)
                .expect("mutual visibility");
            let lhs = vf.view_factor * facet.area;
            let rhs = back.view_factor * facets[vf.index].area;
            assert!(
                (lhs - rhs).abs() < 1e-9,
                "reciprocity violated between {i} and {}",
                vf.index
            );
            checked += 1;
        }
    }
    assert!(checked > 0);
}

/// A convex body: no facet of a cube sees any other facet.
#[test]
fn cube_facets_see_nothing() -> Result<()> {
    let vertices = vec![
        Point::new(0., 0., 0.),
        Point::new(1., 0., 0.),
        Point::new(0., 1., 0.),
        Point::new(1., 1., 0.),
        Point::new(0., 0., 1.),
        Point::new(1., 0., 1.),
        Point::new(0., 1., 1.),
        Point::new(1., 1., 1.),
    ];
    let faces = vec![
        TriangleIndex(0, 2, 3),
        TriangleIndex(0, 3, 1),
        TriangleIndex(4, 5, 7),
        TriangleIndex(4, 7, 6),
        TriangleIndex(0, 1, 5),
        TriangleIndex(0, 5, 4),
        TriangleIndex(2, 6, 7),
        TriangleIndex(2, 7, 3),
        TriangleIndex(0, 4, 6),
        TriangleIndex(0, 6, 2),
        TriangleIndex(1, 3, 7),
        TriangleIndex(1, 7, 5),
    ];
    let shape = Shape::build(vertices, faces, &ShapeConfig::default())?;

    assert!((shape.area - 6.).abs() < 1e-9);
    assert!((shape.volume - 1.).abs() < 1e-9);
    assert!(shape.cof.is_close(&Point::new(0.5, 0.5, 0.5)));
    for facet in &shape.facets {
        assert!(facet.visible.is_empty());
        assert!(facet.is_above_horizon());
    }
    Ok(())
}
