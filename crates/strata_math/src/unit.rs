//! Unit-length 3-vectors and the direction sampling built on them.
//!
//! Ray directions, surface normals, and every reflect/refract/scatter output
//! carry the unit-length invariant in the type. The invariant is established
//! only by [`UnitVec3::new`]; arithmetic that could break it returns a plain
//! [`Vec3`] instead.

use crate::rng;
use glam::Vec3;
use std::f32::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

/// Squared-norm tolerance under which a vector already counts as unit length.
const UNIT_TOLERANCE: f32 = 1e-6;

/// Magnitude below which every component counts as zero.
const NEAR_ZERO: f32 = 1e-4;

/// A 3-vector with length (approximately) 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVec3(Vec3);

impl UnitVec3 {
    /// Normalize `v` into a unit vector.
    ///
    /// Inputs already within tolerance of unit length are taken as-is. The
    /// zero vector stays zero rather than producing NaNs.
    pub fn new(v: Vec3) -> Self {
        if (v.length_squared() - 1.0).abs() < UNIT_TOLERANCE {
            Self(v)
        } else {
            Self(v.normalize_or_zero())
        }
    }

    pub fn x(self) -> f32 {
        self.0.x
    }

    pub fn y(self) -> f32 {
        self.0.y
    }

    pub fn z(self) -> f32 {
        self.0.z
    }

    /// The underlying vector, shedding the unit-length guarantee.
    pub fn get(self) -> Vec3 {
        self.0
    }

    pub fn dot(self, rhs: Vec3) -> f32 {
        self.0.dot(rhs)
    }

    pub fn cross(self, rhs: Vec3) -> Vec3 {
        self.0.cross(rhs)
    }
}

impl From<UnitVec3> for Vec3 {
    fn from(v: UnitVec3) -> Vec3 {
        v.0
    }
}

// Negation keeps the length; everything else decays to Vec3.

impl Neg for UnitVec3 {
    type Output = UnitVec3;

    fn neg(self) -> UnitVec3 {
        UnitVec3(-self.0)
    }
}

impl Mul<f32> for UnitVec3 {
    type Output = Vec3;

    fn mul(self, t: f32) -> Vec3 {
        self.0 * t
    }
}

impl Mul<UnitVec3> for f32 {
    type Output = Vec3;

    fn mul(self, v: UnitVec3) -> Vec3 {
        v.0 * self
    }
}

impl Add<Vec3> for UnitVec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        self.0 + rhs
    }
}

impl Add<UnitVec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: UnitVec3) -> Vec3 {
        self + rhs.0
    }
}

impl Sub<Vec3> for UnitVec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        self.0 - rhs
    }
}

impl Sub<UnitVec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: UnitVec3) -> Vec3 {
        self - rhs.0
    }
}

/// True when every component of `v` is below 1e-4 in magnitude.
///
/// Used to replace near-zero scatter directions with the surface normal.
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO
}

/// Reflect `v` about the unit normal `n`.
pub fn reflect(v: UnitVec3, n: UnitVec3) -> UnitVec3 {
    let v = v.get();
    let n = n.get();
    UnitVec3::new(v - 2.0 * v.dot(n) * n)
}

/// Refract unit `v` across a surface with incident-facing unit normal `n`,
/// passing from refractive index `eta` into `eta_prime`.
///
/// Falls back to specular reflection on total internal reflection, or when
/// Schlick's approximation of the Fresnel reflectance wins the coin flip.
pub fn refract(v: UnitVec3, n: UnitVec3, eta: f32, eta_prime: f32) -> UnitVec3 {
    let cos_theta = (-n.dot(v.get())).min(1.0);
    let ratio = eta / eta_prime;
    let k = 1.0 - ratio * ratio * (1.0 - cos_theta * cos_theta);

    let r0 = ((eta - eta_prime) / (eta + eta_prime)).powi(2);
    let reflectance = r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5);

    if k < 0.0 || reflectance > rng::random_float() {
        return reflect(v, n);
    }
    UnitVec3::new(ratio * v.get() + (ratio * cos_theta - k.sqrt()) * n.get())
}

/// Cosine-weighted hemisphere sample around the unit normal.
pub fn scatter_around(normal: UnitVec3) -> UnitVec3 {
    let r = rng::random_float().sqrt();
    let phi = 2.0 * PI * rng::random_float();
    let x = r * phi.cos();
    let y = r * phi.sin();
    let z = (1.0 - r * r).max(0.0).sqrt();

    // Orthonormal basis with w along the normal
    let w = normal.get();
    let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
    let v = w.cross(a).normalize();
    let u = v.cross(w).normalize();

    let direction = x * u + y * v + z * w;
    if near_zero(direction) {
        normal
    } else {
        UnitVec3::new(direction)
    }
}
