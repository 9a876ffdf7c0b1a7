//! Geometry fillers: simple pore/throat size and shape models.

use pn_core::{EntityKind, Real};
use pn_data::PropArray;
use pn_models::{FunctionError, ModelFunction, ResolvedArgs};

use crate::common::{MIN_LENGTH, circle_area};

/// Fill the target with a constant. The `value` argument is usually a
/// literal binding; the output length comes from the caller's subdomain.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    kind: EntityKind,
}

impl Constant {
    pub fn pore() -> Self {
        Self {
            kind: EntityKind::Pore,
        }
    }

    pub fn throat() -> Self {
        Self {
            kind: EntityKind::Throat,
        }
    }
}

impl ModelFunction for Constant {
    fn name(&self) -> &str {
        "constant"
    }

    fn produces(&self) -> EntityKind {
        self.kind
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let value = args.scalar("value")?;
        Ok(PropArray::Scalar(vec![value; args.count()]))
    }
}

/// Cross-sectional area of a sphere of diameter `pore_diameter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereCrossSectionArea;

impl ModelFunction for SphereCrossSectionArea {
    fn name(&self) -> &str {
        "sphere_cross_section_area"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Pore
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let d = args.scalars("pore_diameter")?;
        Ok(PropArray::Scalar(d.iter().map(|&d| circle_area(d)).collect()))
    }
}

/// Cross-sectional area of a cylindrical throat of diameter
/// `throat_diameter`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CylinderArea;

impl ModelFunction for CylinderArea {
    fn name(&self) -> &str {
        "cylinder_area"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let d = args.scalars("throat_diameter")?;
        Ok(PropArray::Scalar(d.iter().map(|&d| circle_area(d)).collect()))
    }
}

/// Per-throat `factor` times the smaller of the two endpoint pore values.
/// The usual throat-diameter model: a throat cannot be wider than the
/// pores it connects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborMin;

impl ModelFunction for NeighborMin {
    fn name(&self) -> &str {
        "neighbor_min"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let conns = args.conns("conns")?;
        let values = args.scalars("pore_values")?;
        let factor = args.scalar("factor")?;

        conns
            .iter()
            .map(|&[p1, p2]| {
                let v1 = values.get(p1 as usize);
                let v2 = values.get(p2 as usize);
                match (v1, v2) {
                    (Some(&a), Some(&b)) => Ok(factor * a.min(b)),
                    _ => Err(FunctionError::WrongShape {
                        name: "pore_values".into(),
                        expected: "full-network pore array",
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PropArray::Scalar)
    }
}

/// Center-to-center distance minus the two pore radii, floored at
/// [`MIN_LENGTH`] so overlapping pores do not produce a non-positive
/// throat length.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightThroatLength;

impl ModelFunction for StraightThroatLength {
    fn name(&self) -> &str {
        "straight_throat_length"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let conns = args.conns("conns")?;
        let coords = args.vectors("pore_coords")?;
        let diameters = args.scalars("pore_diameter")?;

        conns
            .iter()
            .map(|&[p1, p2]| {
                let (p1, p2) = (p1 as usize, p2 as usize);
                let (c1, c2) = match (coords.get(p1), coords.get(p2)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => {
                        return Err(FunctionError::WrongShape {
                            name: "pore_coords".into(),
                            expected: "full-network pore array",
                        });
                    }
                };
                let (d1, d2) = match (diameters.get(p1), diameters.get(p2)) {
                    (Some(&a), Some(&b)) => (a, b),
                    _ => {
                        return Err(FunctionError::WrongShape {
                            name: "pore_diameter".into(),
                            expected: "full-network pore array",
                        });
                    }
                };
                let length = (c2 - c1).norm() - 0.5 * d1 - 0.5 * d2;
                Ok(length.max(MIN_LENGTH))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PropArray::Scalar)
    }
}
