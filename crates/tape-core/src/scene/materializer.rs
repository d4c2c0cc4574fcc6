//! Object materializer.
//!
//! Interprets an [`ObjectDescriptor`] into a [`SceneNode`]. This is the only
//! failure surface of the generation pipeline: a descriptor that did not come
//! from the synthesizer (for example one loaded from tampered storage) may be
//! malformed and is rejected here.

use super::node::{Geometry, Material, SceneNode, Transform};
use crate::error::{Result, TapeError};
use crate::generation::{
    AnimationDescriptor, MaterialDescriptor, ObjectDescriptor, ShapeKind,
};

const MAX_COLOR: u32 = 0xffffff;

/// Builds a scene node from a descriptor.
pub fn materialize(descriptor: &ObjectDescriptor) -> Result<SceneNode> {
    let geometry = build_geometry(descriptor.geometry.shape, &descriptor.geometry.params)?;
    let material = build_material(&descriptor.material)?;
    check_animation(&descriptor.animation)?;

    Ok(SceneNode {
        geometry,
        material,
        cast_shadow: descriptor.cast_shadow,
        receive_shadow: descriptor.receive_shadow,
        animation: descriptor.animation,
        transform: Transform::default(),
    })
}

/// Materializes a descriptor, substituting the fallback node on failure.
///
/// Returns the error alongside the fallback so callers can record it.
pub fn materialize_or_fallback(descriptor: &ObjectDescriptor) -> (SceneNode, Option<TapeError>) {
    match materialize(descriptor) {
        Ok(node) => (node, None),
        Err(e) => {
            tracing::error!("Failed to materialize object: {}", e);
            (SceneNode::fallback(), Some(e))
        }
    }
}

fn build_geometry(shape: ShapeKind, params: &[f64]) -> Result<Geometry> {
    let expected = shape.param_count();
    if params.len() != expected {
        return Err(TapeError::materialize(format!(
            "{} expects {} parameters, got {}",
            shape,
            expected,
            params.len()
        )));
    }
    if let Some(bad) = params.iter().find(|p| !p.is_finite() || **p <= 0.0) {
        return Err(TapeError::materialize(format!(
            "{} has invalid dimension {}",
            shape, bad
        )));
    }

    let p = params;
    let geometry = match shape {
        ShapeKind::Sphere => Geometry::Sphere {
            radius: p[0],
            width_segments: segments(p[1]),
            height_segments: segments(p[2]),
        },
        ShapeKind::Cube => Geometry::Box {
            width: p[0],
            height: p[1],
            depth: p[2],
        },
        ShapeKind::Cylinder => Geometry::Cylinder {
            radius_top: p[0],
            radius_bottom: p[1],
            height: p[2],
            radial_segments: segments(p[3]),
        },
        ShapeKind::Cone => Geometry::Cone {
            radius: p[0],
            height: p[1],
            radial_segments: segments(p[2]),
        },
        ShapeKind::Torus => Geometry::Torus {
            radius: p[0],
            tube: p[1],
            radial_segments: segments(p[2]),
            tubular_segments: segments(p[3]),
        },
        ShapeKind::Plane => Geometry::Plane {
            width: p[0],
            height: p[1],
        },
        ShapeKind::Ring => Geometry::Ring {
            inner_radius: p[0],
            outer_radius: p[1],
            theta_segments: segments(p[2]),
        },
        ShapeKind::Dodecahedron
        | ShapeKind::Icosahedron
        | ShapeKind::Octahedron
        | ShapeKind::Tetrahedron => Geometry::Polyhedron {
            shape,
            radius: p[0],
        },
    };
    Ok(geometry)
}

// Scaled templates can produce fractional segment counts.
fn segments(value: f64) -> u32 {
    value.round().max(1.0) as u32
}

fn build_material(material: &MaterialDescriptor) -> Result<Material> {
    if material.color.0 > MAX_COLOR {
        return Err(TapeError::materialize(format!(
            "color {} is out of range",
            material.color
        )));
    }
    for (name, value) in material.properties.numeric() {
        if !(0.0..=1.0).contains(&value) {
            return Err(TapeError::materialize(format!(
                "material property {} = {} is outside [0, 1]",
                name, value
            )));
        }
    }

    Ok(Material {
        kind: material.kind,
        color: material.color,
        emissive: material.properties.emissive_intensity.map(|_| material.color),
        properties: material.properties,
    })
}

fn check_animation(animation: &AnimationDescriptor) -> Result<()> {
    if animation.rates().iter().all(|rate| rate.is_finite()) {
        Ok(())
    } else {
        Err(TapeError::materialize("animation rate is not finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{Color, MaterialKind, classify, synthesize};

    fn descriptor(prompt: &str) -> ObjectDescriptor {
        synthesize(&classify(prompt))
    }

    #[test]
    fn test_materialize_large_red_cube() {
        let node = materialize(&descriptor("large red cube")).unwrap();
        assert_eq!(
            node.geometry,
            Geometry::Box {
                width: 3.0,
                height: 3.0,
                depth: 3.0
            }
        );
        assert_eq!(node.material.color, Color(0xff0000));
        assert!(node.cast_shadow && node.receive_shadow);
    }

    #[test]
    fn test_every_shape_materializes_at_every_size() {
        for entry in crate::generation::tables::SHAPES.iter() {
            for size in ["tiny", "", "huge"] {
                let prompt = format!("{} {}", size, entry.keywords[0]);
                let node = materialize(&descriptor(&prompt));
                assert!(node.is_ok(), "{}: {:?}", prompt, node);
            }
        }
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let d = descriptor("glowing golden torus");
        assert_eq!(materialize(&d).unwrap(), materialize(&d).unwrap());
    }

    #[test]
    fn test_glowing_material_sets_emissive() {
        let node = materialize(&descriptor("neon green ring")).unwrap();
        assert_eq!(node.material.emissive, Some(Color(0x00ff00)));
    }

    #[test]
    fn test_scaled_segments_are_rounded() {
        let mut d = descriptor("sphere");
        d.geometry.params = vec![1.0, 15.6, 0.2];
        let node = materialize(&d).unwrap();
        assert_eq!(
            node.geometry,
            Geometry::Sphere {
                radius: 1.0,
                width_segments: 16,
                height_segments: 1
            }
        );
    }

    #[test]
    fn test_rejects_wrong_param_count() {
        let mut d = descriptor("cube");
        d.geometry.params.pop();
        let err = materialize(&d).unwrap_err();
        assert!(err.is_materialize());
    }

    #[test]
    fn test_rejects_non_positive_or_nan_dimension() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut d = descriptor("cube");
            d.geometry.params[1] = bad;
            assert!(materialize(&d).is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_rejects_out_of_range_material() {
        let mut d = descriptor("metal cube");
        d.material.properties.metalness = Some(1.5);
        assert!(materialize(&d).is_err());

        let mut d = descriptor("cube");
        d.material.color = Color(0x1000000);
        assert!(materialize(&d).is_err());
    }

    #[test]
    fn test_rejects_non_finite_animation() {
        let mut d = descriptor("cube");
        d.animation = AnimationDescriptor::Spin { y: f64::NAN };
        assert!(materialize(&d).is_err());
    }

    #[test]
    fn test_fallback_on_failure() {
        let mut d = descriptor("sphere");
        d.geometry.params.clear();
        let (node, err) = materialize_or_fallback(&d);
        assert_eq!(node, SceneNode::fallback());
        assert_eq!(node.material.kind, MaterialKind::Basic);
        assert!(err.is_some());
    }
}
