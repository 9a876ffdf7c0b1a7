//! Throat direction vectors.

use nalgebra::Vector3;
use pn_core::{EntityKind, Real};
use pn_data::PropArray;
use pn_models::{FunctionError, ModelFunction, ResolvedArgs};

/// Unit vector along each throat, from the lower-indexed pore to the
/// higher-indexed pore.
///
/// Conns are stored canonically (first id <= second), so the sign of a
/// directional quantity is fixed by pore index, not by however the throat
/// was originally registered. Coincident pore centers yield a zero vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct PoreToPoreVector;

impl ModelFunction for PoreToPoreVector {
    fn name(&self) -> &str {
        "pore_to_pore_vector"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let conns = args.conns("conns")?;
        let coords = args.vectors("pore_coords")?;

        conns
            .iter()
            .map(|&[p1, p2]| {
                let (c1, c2) = match (coords.get(p1 as usize), coords.get(p2 as usize)) {
                    (Some(a), Some(b)) => (a, b),
                    _ => {
                        return Err(FunctionError::WrongShape {
                            name: "pore_coords".into(),
                            expected: "full-network pore array",
                        });
                    }
                };
                let delta = c2 - c1;
                let norm = delta.norm();
                if norm > 0.0 {
                    Ok(delta / norm)
                } else {
                    Ok(Vector3::<Real>::zeros())
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PropArray::Vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_models::ArgValue;

    #[test]
    fn direction_follows_pore_index_order() {
        // Two pores; the conns entry is canonical [0, 1] regardless of
        // registration order, so the vector points from pore 0 to pore 1.
        let coords = vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0)];
        let mut args = ResolvedArgs::new(1);
        args.insert("conns", ArgValue::Array(PropArray::Conns(vec![[0, 1]])));
        args.insert("pore_coords", ArgValue::Array(PropArray::Vector(coords)));

        let out = PoreToPoreVector.call(&args).unwrap();
        let v = out.as_vector().unwrap();
        assert_eq!(v[0], Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn result_is_unit_length() {
        let coords = vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(3.0, 4.0, 0.0)];
        let mut args = ResolvedArgs::new(1);
        args.insert("conns", ArgValue::Array(PropArray::Conns(vec![[0, 1]])));
        args.insert("pore_coords", ArgValue::Array(PropArray::Vector(coords)));

        let out = PoreToPoreVector.call(&args).unwrap();
        let v = out.as_vector().unwrap();
        assert!((v[0].norm() - 1.0).abs() < 1e-15);
        assert!((v[0] - Vector3::new(0.6, 0.8, 0.0)).norm() < 1e-15);
    }

    #[test]
    fn coincident_pores_give_zero_vector() {
        let coords = vec![Vector3::zeros(), Vector3::zeros()];
        let mut args = ResolvedArgs::new(1);
        args.insert("conns", ArgValue::Array(PropArray::Conns(vec![[0, 1]])));
        args.insert("pore_coords", ArgValue::Array(PropArray::Vector(coords)));

        let out = PoreToPoreVector.call(&args).unwrap();
        assert_eq!(out.as_vector().unwrap()[0], Vector3::zeros());
    }
}
