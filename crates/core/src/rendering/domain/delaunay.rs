//! Incremental (Bowyer-Watson) Delaunay triangulation over a bounding
//! rectangle.
//!
//! Three virtual vertices far outside the rectangle seed the mesh. Triangles
//! touching them are still returned, so callers decide what to keep (they lie
//! outside the rectangle by construction).

use thiserror::Error;

use crate::shared::point::PointF;

type Vertex = (f64, f64);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriangulationError {
    #[error("landmark ({x}, {y}) lies outside the {width}x{height} triangulation rectangle")]
    PointOutOfRange {
        x: f32,
        y: f32,
        width: u32,
        height: u32,
    },
}

/// Triangulate `points` inside the rectangle `[0, width) × [0, height)`.
///
/// Any point outside the rectangle fails the whole triangulation. Exact
/// duplicates are inserted once. Returned triangles are counter-clockwise.
pub fn triangulate(
    points: &[PointF],
    width: u32,
    height: u32,
) -> Result<Vec<[PointF; 3]>, TriangulationError> {
    let (w, h) = (width as f64, height as f64);
    let big = 3.0 * w.max(h).max(1.0);

    let mut vertices: Vec<Vertex> = vec![(big, 0.0), (0.0, big), (-big, -big)];
    let mut triangles: Vec<[usize; 3]> = vec![ccw([0, 1, 2], &vertices)];

    for p in points {
        let v = (p.x as f64, p.y as f64);
        if !(v.0 >= 0.0 && v.1 >= 0.0 && v.0 < w && v.1 < h) {
            return Err(TriangulationError::PointOutOfRange {
                x: p.x,
                y: p.y,
                width,
                height,
            });
        }
        if vertices[3..].contains(&v) {
            continue;
        }
        vertices.push(v);
        insert(&mut triangles, &vertices, vertices.len() - 1);
    }

    Ok(triangles
        .iter()
        .map(|t| t.map(|i| PointF::new(vertices[i].0 as f32, vertices[i].1 as f32)))
        .collect())
}

fn insert(triangles: &mut Vec<[usize; 3]>, vertices: &[Vertex], new: usize) {
    let p = vertices[new];
    let (bad, good): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
        .iter()
        .copied()
        .partition(|t| in_circumcircle(vertices[t[0]], vertices[t[1]], vertices[t[2]], p));

    if bad.is_empty() {
        return;
    }

    // Cavity boundary: edges of bad triangles not shared by another bad one.
    let edges: Vec<(usize, usize)> = bad
        .iter()
        .flat_map(|t| [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])])
        .collect();
    let boundary = edges
        .iter()
        .filter(|&&(a, b)| !edges.iter().any(|&(c, d)| c == b && d == a));

    *triangles = good;
    for &(a, b) in boundary {
        triangles.push(ccw([a, b, new], vertices));
    }
}

fn orient(a: Vertex, b: Vertex, c: Vertex) -> f64 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

fn ccw(t: [usize; 3], vertices: &[Vertex]) -> [usize; 3] {
    if orient(vertices[t[0]], vertices[t[1]], vertices[t[2]]) < 0.0 {
        [t[0], t[2], t[1]]
    } else {
        t
    }
}

/// Strictly inside the circumcircle of counter-clockwise `(a, b, c)`.
fn in_circumcircle(a: Vertex, b: Vertex, c: Vertex, p: Vertex) -> bool {
    let (adx, ady) = (a.0 - p.0, a.1 - p.1);
    let (bdx, bdy) = (b.0 - p.0, b.1 - p.1);
    let (cdx, cdy) = (c.0 - p.0, c.1 - p.1);
    let det = (adx * adx + ady * ady) * (bdx * cdy - cdx * bdy)
        - (bdx * bdx + bdy * bdy) * (adx * cdy - cdx * ady)
        + (cdx * cdx + cdy * cdy) * (adx * bdy - bdx * ady);
    det > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pts(coords: &[(f32, f32)]) -> Vec<PointF> {
        coords.iter().map(|&(x, y)| PointF::new(x, y)).collect()
    }

    fn inside(t: &[PointF; 3], w: f32, h: f32) -> bool {
        t.iter().all(|p| p.x >= 0.0 && p.y >= 0.0 && p.x < w && p.y < h)
    }

    fn inner(triangles: &[[PointF; 3]]) -> Vec<[PointF; 3]> {
        triangles
            .iter()
            .filter(|t| inside(t, 100.0, 100.0))
            .copied()
            .collect()
    }

    #[test]
    fn test_no_points_yields_only_virtual_triangle() {
        let triangles = triangulate(&[], 100, 100).unwrap();
        assert_eq!(triangles.len(), 1);
        assert!(inner(&triangles).is_empty());
    }

    #[test]
    fn test_three_points_one_inner_triangle() {
        let triangles = triangulate(&pts(&[(10.0, 10.0), (80.0, 20.0), (40.0, 70.0)]), 100, 100).unwrap();
        assert_eq!(inner(&triangles).len(), 1);
    }

    #[test]
    fn test_convex_quad_two_inner_triangles() {
        let triangles = triangulate(
            &pts(&[(10.0, 10.0), (60.0, 12.0), (55.0, 70.0), (12.0, 50.0)]),
            100,
            100,
        )
        .unwrap();
        assert_eq!(inner(&triangles).len(), 2);
    }

    #[test]
    fn test_square_with_center_four_inner_triangles() {
        let center = PointF::new(50.0, 50.0);
        let triangles = triangulate(
            &pts(&[(10.0, 10.0), (90.0, 10.0), (90.0, 90.0), (10.0, 90.0), (50.0, 50.0)]),
            100,
            100,
        )
        .unwrap();
        let inner = inner(&triangles);
        assert_eq!(inner.len(), 4);
        assert!(inner.iter().all(|t| t.contains(&center)));
    }

    #[test]
    fn test_result_is_delaunay() {
        let points = pts(&[
            (12.0, 15.0),
            (70.0, 8.0),
            (88.0, 60.0),
            (45.0, 92.0),
            (5.0, 70.0),
            (40.0, 40.0),
            (60.0, 55.0),
        ]);
        let triangles = triangulate(&points, 100, 100).unwrap();
        for t in inner(&triangles) {
            let [a, b, c] = t.map(|p| (p.x as f64, p.y as f64));
            for p in &points {
                let v = (p.x as f64, p.y as f64);
                if v == a || v == b || v == c {
                    continue;
                }
                assert!(!in_circumcircle(a, b, c, v), "{v:?} inside circumcircle of {t:?}");
            }
        }
    }

    #[test]
    fn test_triangles_are_counter_clockwise() {
        let triangles = triangulate(&pts(&[(10.0, 10.0), (80.0, 20.0), (40.0, 70.0)]), 100, 100).unwrap();
        for t in triangles {
            let [a, b, c] = t.map(|p| (p.x as f64, p.y as f64));
            assert!(orient(a, b, c) > 0.0);
        }
    }

    #[test]
    fn test_duplicate_points_inserted_once() {
        let triangles = triangulate(
            &pts(&[(10.0, 10.0), (80.0, 20.0), (40.0, 70.0), (40.0, 70.0)]),
            100,
            100,
        )
        .unwrap();
        assert_eq!(inner(&triangles).len(), 1);
    }

    #[rstest]
    #[case::right_of_frame(120.0, 50.0)]
    #[case::on_right_edge(100.0, 50.0)]
    #[case::above_frame(50.0, -0.5)]
    #[case::below_frame(50.0, 100.0)]
    fn test_point_outside_rect_fails(#[case] x: f32, #[case] y: f32) {
        let err = triangulate(
            &pts(&[(10.0, 10.0), (80.0, 20.0), (40.0, 70.0), (x, y)]),
            100,
            100,
        )
        .unwrap_err();
        assert_eq!(
            err,
            TriangulationError::PointOutOfRange {
                x,
                y,
                width: 100,
                height: 100
            }
        );
    }

    #[test]
    fn test_point_on_origin_is_inside() {
        assert!(triangulate(&pts(&[(0.0, 0.0), (99.0, 0.0), (0.0, 99.0)]), 100, 100).is_ok());
    }
}
