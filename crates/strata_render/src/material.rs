//! Surface material model: probabilistic reflection, refraction, emission.

use crate::primitive::HitRecord;
use strata_math::{reflect, refract, rng, scatter_around, Color, Ray};

/// A surviving bounce: the color filter applied to the child ray's radiance,
/// and the child ray itself.
#[derive(Debug, Clone, Copy)]
pub struct Bounce {
    pub attenuation: Color,
    pub next: Ray,
}

/// Surface properties steering the bounce decision at every hit.
///
/// `reflectance` is the probability a hit bounces (specularly with
/// probability `shininess`, diffusely otherwise), `refraction` the
/// probability it refracts; whatever remains is absorption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    albedo: Color,
    emittance: f32,
    reflectance: f32,
    shininess: f32,
    refraction: f32,
    refraction_index: f32,
}

impl Material {
    /// Build a material from raw properties.
    ///
    /// If `reflectance + refraction` exceeds 1, both are rescaled
    /// proportionally so the absorption probability stays non-negative.
    pub fn new(
        albedo: Color,
        emittance: f32,
        reflectance: f32,
        shininess: f32,
        refraction: f32,
        refraction_index: f32,
    ) -> Self {
        let sum = reflectance + refraction;
        let (reflectance, refraction) = if sum > 1.0 {
            (reflectance / sum, refraction / sum)
        } else {
            (reflectance, refraction)
        };
        Self {
            albedo,
            emittance,
            reflectance,
            shininess,
            refraction,
            refraction_index,
        }
    }

    /// A reflecting surface: bounces with probability `reflectance`,
    /// specularly with probability `shininess` within a bounce.
    pub fn reflective(albedo: Color, reflectance: f32, shininess: f32) -> Self {
        Self::new(albedo, 0.0, reflectance, shininess, 0.0, 1.0)
    }

    /// A dielectric surface: refracts with probability `refraction`.
    pub fn refractive(albedo: Color, refraction: f32, refraction_index: f32) -> Self {
        Self::new(albedo, 0.0, 0.0, 0.0, refraction, refraction_index)
    }

    /// A pure emitter: absorbs every incoming ray and radiates
    /// `color * emittance`.
    pub fn light(color: Color, emittance: f32) -> Self {
        Self::new(color, emittance, 0.0, 0.0, 0.0, 1.0)
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn emittance(&self) -> f32 {
        self.emittance
    }

    pub fn reflectance(&self) -> f32 {
        self.reflectance
    }

    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    pub fn refraction(&self) -> f32 {
        self.refraction
    }

    pub fn refraction_index(&self) -> f32 {
        self.refraction_index
    }

    /// Radiance emitted at a hit.
    pub fn emitted(&self) -> Color {
        self.albedo * self.emittance
    }

    /// Decide how `ray` continues after the hit described by `record`.
    ///
    /// Returns `None` when the ray is absorbed.
    pub fn bounce(&self, ray: &Ray, record: &HitRecord) -> Option<Bounce> {
        // The record's normal faces outward; bounce off the side that was hit.
        let normal = if record.front_face {
            record.normal
        } else {
            -record.normal
        };

        let u = rng::random_float();
        if u <= self.reflectance {
            let direction = if rng::random_float() <= self.shininess {
                reflect(ray.direction(), normal)
            } else {
                scatter_around(normal)
            };
            return Some(Bounce {
                attenuation: self.albedo,
                next: Ray::new(record.point, direction),
            });
        }

        if u <= self.reflectance + self.refraction {
            let (eta, eta_prime) = if record.front_face {
                (1.0, self.refraction_index)
            } else {
                (self.refraction_index, 1.0)
            };
            return Some(Bounce {
                attenuation: Color::ONE,
                next: Ray::new(
                    record.point,
                    refract(ray.direction(), normal, eta, eta_prime),
                ),
            });
        }

        None
    }
}
