//! Sutherland-Hodgman clipping of segments and polygons against half-spaces
//!
//! The narrow phase clips the incident feature of a shape pair against the
//! side planes of the reference face to obtain the contact manifold. Each
//! half-space is given as a point on its plane and an outward unit normal;
//! a vertex with signed distance `>= 0` (exactly on the plane included) is
//! inside and kept.

use crate::foundation::math::Vec3;
use super::queries::plane_segment_intersection;

/// Clip a segment against multiple half-spaces and return the clipped
/// segment vertices
///
/// `planes_points` and `planes_normals` are index-aligned and must have the
/// same length. The working set holds exactly two points between planes;
/// once it is emptied by a plane the remaining planes are skipped and the
/// result is empty. The output holds 0, 1, or 2 points.
pub fn clip_segment_with_planes(
    seg_a: Vec3,
    seg_b: Vec3,
    planes_points: &[Vec3],
    planes_normals: &[Vec3],
) -> Vec<Vec3> {
    assert_eq!(planes_points.len(), planes_normals.len());

    let mut input_vertices = vec![seg_a, seg_b];
    let mut output_vertices: Vec<Vec3> = Vec::with_capacity(2);

    // For each clipping plane
    for (plane_point, plane_normal) in planes_points.iter().zip(planes_normals) {
        // If there are no more vertices, stop
        if input_vertices.is_empty() {
            return input_vertices;
        }

        debug_assert_eq!(input_vertices.len(), 2);

        output_vertices.clear();

        let v1 = input_vertices[0];
        let v2 = input_vertices[1];

        let v1_dot_n = (v1 - plane_point).dot(plane_normal);
        let v2_dot_n = (v2 - plane_point).dot(plane_normal);

        if v2_dot_n >= 0.0 {
            // Second vertex is in front of the clipping plane
            if v1_dot_n < 0.0 {
                // The segment enters the half-space: keep the intersection
                // point, falling back to the inside endpoint when the
                // parameter is numerically degenerate
                let t = plane_segment_intersection(v1, v2, plane_normal.dot(plane_point), *plane_normal);

                if (0.0..=1.0).contains(&t) {
                    output_vertices.push(v1 + t * (v2 - v1));
                } else {
                    output_vertices.push(v2);
                }
            } else {
                output_vertices.push(v1);
            }

            // Add the second vertex
            output_vertices.push(v2);
        } else if v1_dot_n >= 0.0 {
            // The segment leaves the half-space: keep the first vertex and
            // the intersection point. The offset/normal pair is negated so
            // the direction-agnostic intersection routine sees a consistent
            // pairing for the leaving direction.
            output_vertices.push(v1);

            let t = plane_segment_intersection(v1, v2, -plane_normal.dot(plane_point), -plane_normal);

            if (0.0..=1.0).contains(&t) {
                output_vertices.push(v1 + t * (v2 - v1));
            }
        }
        // Both vertices behind the plane: keep nothing

        std::mem::swap(&mut input_vertices, &mut output_vertices);
    }

    input_vertices
}

/// Clip a polygon against multiple half-spaces and return the clipped
/// polygon vertices
///
/// The polygon is an implicitly closed vertex loop (an edge runs from the
/// last vertex back to the first), assumed planar and consistently wound by
/// the caller. `planes_points` and `planes_normals` are index-aligned and
/// must have the same length.
///
/// Unlike [`clip_segment_with_planes`] there is no early exit once the
/// polygon becomes empty: an empty loop has no edges, so the remaining
/// planes simply produce empty output.
pub fn clip_polygon_with_planes(
    polygon_vertices: &[Vec3],
    planes_points: &[Vec3],
    planes_normals: &[Vec3],
) -> Vec<Vec3> {
    assert_eq!(planes_points.len(), planes_normals.len());

    let mut input_vertices = polygon_vertices.to_vec();
    let mut output_vertices: Vec<Vec3> = Vec::with_capacity(polygon_vertices.len() + 1);

    // For each clipping plane
    for (plane_point, plane_normal) in planes_points.iter().zip(planes_normals) {
        output_vertices.clear();

        // For each edge (v_start, v_end) of the polygon, wrapping around
        let mut v_start = input_vertices.len().wrapping_sub(1);
        for v_end in 0..input_vertices.len() {
            let v1 = input_vertices[v_start];
            let v2 = input_vertices[v_end];

            let v1_dot_n = (v1 - plane_point).dot(plane_normal);
            let v2_dot_n = (v2 - plane_point).dot(plane_normal);

            if v2_dot_n >= 0.0 {
                // Second vertex is in front of the clipping plane
                if v1_dot_n < 0.0 {
                    // Entering edge: keep the intersection point, or the
                    // inside endpoint when the parameter is degenerate
                    let t = plane_segment_intersection(v1, v2, plane_normal.dot(plane_point), *plane_normal);

                    if (0.0..=1.0).contains(&t) {
                        output_vertices.push(v1 + t * (v2 - v1));
                    } else {
                        output_vertices.push(v2);
                    }
                }

                // Add the second vertex
                output_vertices.push(v2);
            } else if v1_dot_n >= 0.0 {
                // Leaving edge: keep the intersection point, or the first
                // vertex when the parameter is degenerate
                let t = plane_segment_intersection(v1, v2, -plane_normal.dot(plane_point), -plane_normal);

                if (0.0..=1.0).contains(&t) {
                    output_vertices.push(v1 + t * (v2 - v1));
                } else {
                    output_vertices.push(v1);
                }
            }

            v_start = v_end;
        }

        std::mem::swap(&mut input_vertices, &mut output_vertices);
    }

    input_vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_clip_segment_empty_plane_list_is_identity() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, 5.0, 6.0);

        let clipped = clip_segment_with_planes(a, b, &[], &[]);

        assert_eq!(clipped, vec![a, b]);
    }

    #[test]
    fn test_clip_segment_fully_inside_is_unchanged() {
        let a = Vec3::new(1.0, 1.0, 0.0);
        let b = Vec3::new(3.0, 1.0, 0.0);
        // Half-space x >= 0
        let points = [Vec3::zeros()];
        let normals = [Vec3::new(1.0, 0.0, 0.0)];

        let clipped = clip_segment_with_planes(a, b, &points, &normals);

        assert_eq!(clipped, vec![a, b]);
    }

    #[test]
    fn test_clip_segment_crossing_plane() {
        let a = Vec3::new(-2.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        // Half-space x >= 0: the first vertex is cut away
        let points = [Vec3::zeros()];
        let normals = [Vec3::new(1.0, 0.0, 0.0)];

        let clipped = clip_segment_with_planes(a, b, &points, &normals);

        assert_eq!(clipped.len(), 2);
        assert_relative_eq!(clipped[0], Vec3::zeros(), epsilon = 1e-5);
        assert_relative_eq!(clipped[1], b, epsilon = 1e-5);
    }

    #[test]
    fn test_clip_segment_leaving_plane_keeps_first_and_intersection() {
        let a = Vec3::new(2.0, 0.0, 0.0);
        let b = Vec3::new(-2.0, 0.0, 0.0);
        let points = [Vec3::zeros()];
        let normals = [Vec3::new(1.0, 0.0, 0.0)];

        let clipped = clip_segment_with_planes(a, b, &points, &normals);

        assert_eq!(clipped.len(), 2);
        assert_relative_eq!(clipped[0], a, epsilon = 1e-5);
        assert_relative_eq!(clipped[1], Vec3::zeros(), epsilon = 1e-5);
    }

    #[test]
    fn test_clip_segment_fully_outside_is_empty() {
        let a = Vec3::new(-3.0, 1.0, 0.0);
        let b = Vec3::new(-1.0, -1.0, 0.0);
        // First plane keeps everything, second (x >= 0) eliminates the
        // segment, third is never able to resurrect it
        let points = [Vec3::new(0.0, -5.0, 0.0), Vec3::zeros(), Vec3::zeros()];
        let normals = [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
        ];

        let clipped = clip_segment_with_planes(a, b, &points, &normals);

        assert!(clipped.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_clip_segment_mismatched_plane_lists_panics() {
        clip_segment_with_planes(
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            &[Vec3::zeros()],
            &[],
        );
    }

    #[test]
    fn test_clip_polygon_containing_half_space_is_identity() {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
        ];
        // Half-space x >= -1 contains every vertex
        let points = [Vec3::new(-1.0, 0.0, 0.0)];
        let normals = [Vec3::new(1.0, 0.0, 0.0)];

        let clipped = clip_polygon_with_planes(&vertices, &points, &normals);

        assert_eq!(clipped, vertices.to_vec());
    }

    #[test]
    fn test_clip_unit_square_against_half_plane() {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        // Half-space x <= 0.5
        let points = [Vec3::new(0.5, 0.0, 0.0)];
        let normals = [Vec3::new(-1.0, 0.0, 0.0)];

        let clipped = clip_polygon_with_planes(&vertices, &points, &normals);

        assert_eq!(clipped.len(), 4);
        assert_relative_eq!(clipped[0], Vec3::new(0.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(clipped[1], Vec3::new(0.5, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(clipped[2], Vec3::new(0.5, 1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(clipped[3], Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_clip_polygon_empty_input_stays_empty() {
        // No early exit in the polygon variant: every plane still runs over
        // the (empty) edge set and produces an empty polygon
        let points = [Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)];
        let normals = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];

        let clipped = clip_polygon_with_planes(&[], &points, &normals);

        assert!(clipped.is_empty());
    }

    #[test]
    fn test_clip_polygon_eliminated_then_more_planes() {
        let vertices = [
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(-2.0, 1.0, 0.0),
        ];
        // First plane (x >= 0) removes the whole triangle; the second plane
        // must still be processed without panicking
        let points = [Vec3::zeros(), Vec3::zeros()];
        let normals = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];

        let clipped = clip_polygon_with_planes(&vertices, &points, &normals);

        assert!(clipped.is_empty());
    }

    #[test]
    fn test_clip_triangle_corner() {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        ];
        // Half-space y <= 2 cuts off the top corner, yielding a quad
        let points = [Vec3::new(0.0, 2.0, 0.0)];
        let normals = [Vec3::new(0.0, -1.0, 0.0)];

        let clipped = clip_polygon_with_planes(&vertices, &points, &normals);

        assert_eq!(clipped.len(), 4);
        for v in &clipped {
            assert!(v.y <= 2.0 + 1e-5);
        }
    }
}
