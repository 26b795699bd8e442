//! Closest-point and distance queries between points, segments, and planes
//!
//! Pure functions with no state. Numerical degeneracies (zero-length
//! segments, parallel lines) are resolved with epsilon branches and never
//! reported as errors.

use crate::foundation::math::{Vec3, MACHINE_EPSILON};

/// Compute the barycentric coordinates `(u, v, w)` of point `p` in the
/// triangle `(a, b, c)`
///
/// Uses the dot-product technique described in Real-Time Collision
/// Detection by Christer Ericson. The coordinates always satisfy
/// `u + v + w = 1` for a non-degenerate triangle.
///
/// Degenerate (collinear or zero-area) triangles make the denominator
/// vanish and the result undefined; callers must exclude them upstream.
pub fn barycentric_coordinates(a: Vec3, b: Vec3, c: Vec3, p: Vec3) -> (f32, f32, f32) {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);

    let denom = d00 * d11 - d01 * d01;
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;

    (u, v, w)
}

/// Clamp a vector such that it is no longer than a given maximum length
///
/// Vectors already within the bound (including the zero vector) are
/// returned unchanged.
pub fn clamp_vector_length(vector: Vec3, max_length: f32) -> Vec3 {
    if vector.magnitude_squared() > max_length * max_length {
        return vector.normalize() * max_length;
    }
    vector
}

/// Compute the point on the segment `(seg_a, seg_b)` that is closest to `point`
///
/// Projects `point` onto the infinite line through the segment and clamps
/// the parameter to `[0, 1]`. A near-zero-length segment collapses to its
/// first endpoint.
pub fn closest_point_on_segment(seg_a: Vec3, seg_b: Vec3, point: Vec3) -> Vec3 {
    let ab = seg_b - seg_a;

    let ab_length_square = ab.magnitude_squared();

    // If the segment has almost zero length
    if ab_length_square < MACHINE_EPSILON {
        return seg_a;
    }

    // Project the point onto the "ab" line
    let mut t = (point - seg_a).dot(&ab) / ab_length_square;

    // If the projection falls outside the segment, clamp it to the segment
    t = t.clamp(0.0, 1.0);

    seg_a + t * ab
}

/// Compute the closest points between the segments `(seg1_a, seg1_b)` and
/// `(seg2_a, seg2_b)`
///
/// Returns `(closest_on_seg1, closest_on_seg2)`. Uses the technique
/// described in Real-Time Collision Detection by Christer Ericson: when
/// the first candidate parameter on segment 2 leaves `[0, 1]` it is
/// clamped and the parameter on segment 1 re-derived by re-projection
/// (clamping both independently is not optimal). Parallel segments pick
/// an arbitrary point on segment 1 rather than dividing by zero.
pub fn closest_points_between_segments(
    seg1_a: Vec3,
    seg1_b: Vec3,
    seg2_a: Vec3,
    seg2_b: Vec3,
) -> (Vec3, Vec3) {
    let d1 = seg1_b - seg1_a;
    let d2 = seg2_b - seg2_a;
    let r = seg1_a - seg2_a;
    let a = d1.magnitude_squared();
    let e = d2.magnitude_squared();
    let f = d2.dot(&r);

    // If both segments degenerate into points
    if a <= MACHINE_EPSILON && e <= MACHINE_EPSILON {
        return (seg1_a, seg2_a);
    }

    let s;
    let t;
    if a <= MACHINE_EPSILON {
        // First segment degenerates into a point
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(&r);

        if e <= MACHINE_EPSILON {
            // Second segment degenerates into a point
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;

            // If the segments are not parallel, compute the closest point on
            // line 1 to line 2 and clamp to the first segment; otherwise pick
            // an arbitrary point on the first segment
            let s_candidate = if denom == 0.0 {
                0.0
            } else {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            };

            // Point on line 2 closest to the point we just found
            let t_candidate = (b * s_candidate + f) / e;

            // If that point lies inside segment 2 we are done; otherwise
            // clamp it and recompute the closest point on segment 1
            if t_candidate < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t_candidate > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            } else {
                t = t_candidate;
                s = s_candidate;
            }
        }
    }

    (seg1_a + d1 * s, seg2_a + d2 * t)
}

/// Compute the intersection between a plane and a segment
///
/// The plane is defined by `plane_normal.dot(x) = plane_d` for points `x`
/// on the plane. Returns the parameter `t` such that
/// `p = seg_a + t * (seg_b - seg_a)` is the intersection point. Only a
/// returned value in `[0, 1]` is a valid intersection on the segment; a
/// (near-)parallel segment yields the sentinel `-1.0`.
pub fn plane_segment_intersection(seg_a: Vec3, seg_b: Vec3, plane_d: f32, plane_normal: Vec3) -> f32 {
    // Larger than the generic geometric epsilon: grazing segments are
    // treated as parallel rather than producing a wild parameter
    const PARALLEL_EPSILON: f32 = 0.0001;

    let ab = seg_b - seg_a;
    let n_dot_ab = plane_normal.dot(&ab);

    // If the segment is not parallel to the plane
    if n_dot_ab.abs() > PARALLEL_EPSILON {
        return (plane_d - plane_normal.dot(&seg_a)) / n_dot_ab;
    }

    -1.0
}

/// Compute the distance between `point` and the line through `line_a` and
/// `line_b`
///
/// A degenerate line (`line_a` ≈ `line_b`) degrades to the point-to-point
/// distance to `line_a`.
pub fn point_to_line_distance(line_a: Vec3, line_b: Vec3, point: Vec3) -> f32 {
    let dist_ab = (line_b - line_a).magnitude();

    if dist_ab < MACHINE_EPSILON {
        return (point - line_a).magnitude();
    }

    (point - line_a).cross(&(point - line_b)).magnitude() / dist_ab
}
