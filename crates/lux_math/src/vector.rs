//! Vector helpers that glam does not provide in the form the tracer needs.

use crate::Vec3;

/// Reflect `d` about the normal `n`.
///
/// `n` must be unit length. Returns `d - n * 2 * dot(d, n)`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - n * (2.0 * d.dot(n))
}

/// Build two tangent axes `(u, v)` so that `(u, v, w)` is orthonormal.
///
/// `w` must be unit length. The helper axis is `Y` unless `w` is close to it,
/// in which case `X` is used instead.
#[inline]
pub fn orthonormal_basis(w: Vec3) -> (Vec3, Vec3) {
    let helper = if w.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
    let u = helper.cross(w).normalize();
    let v = w.cross(u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let d = Vec3::new(1.0, -1.0, 0.0);
        let r = reflect(d, Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));

        // Head-on reflection turns the vector around
        assert_eq!(reflect(-Vec3::Z, Vec3::Z), Vec3::Z);
    }

    #[test]
    fn test_reflect_preserves_length() {
        let d = Vec3::new(0.3, -0.8, 0.52).normalize();
        let n = Vec3::new(0.1, 1.0, -0.2).normalize();
        assert!((reflect(d, n).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_orthonormal_basis() {
        let axes = [
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::Y,
            Vec3::new(0.05, 0.99, 0.1).normalize(),
            Vec3::new(-0.6, 0.0, 0.8),
        ];

        for w in axes {
            let (u, v) = orthonormal_basis(w);
            assert!((u.length() - 1.0).abs() < 1e-5);
            assert!((v.length() - 1.0).abs() < 1e-5);
            assert!(u.dot(v).abs() < 1e-5);
            assert!(u.dot(w).abs() < 1e-5);
            assert!(v.dot(w).abs() < 1e-5);
        }
    }
}
