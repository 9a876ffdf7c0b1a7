//! Throat transport conductances from series resistances.
//!
//! Every throat is treated as three resistors in series: half of the
//! first pore, the throat itself, and half of the second pore. The
//! total conductance is the harmonic combination of the three segment
//! conductances, with non-positive segments treated as zero resistance
//! (boundary pores have zero diameter and must not choke the throat).

use pn_core::{EntityKind, Real};
use pn_data::PropArray;
use pn_models::{FunctionError, ModelFunction, ResolvedArgs};

use crate::common::{circle_area, clamp_length, series_conductance};

/// Per-throat geometry shared by every conductance formula.
struct ThroatGeometry<'a> {
    conns: &'a [[u32; 2]],
    pore_diameter: &'a [Real],
    throat_diameter: &'a [Real],
    throat_length: &'a [Real],
}

fn resolve_geometry<'a>(args: &'a ResolvedArgs) -> Result<ThroatGeometry<'a>, FunctionError> {
    let conns = args.conns("conns")?;
    let pore_diameter = args.scalars("pore_diameter")?;
    let throat_diameter = args.scalars("throat_diameter")?;
    let throat_length = args.scalars("throat_length")?;

    if throat_diameter.len() != conns.len() {
        return Err(FunctionError::LengthMismatch {
            a: "conns".into(),
            b: "throat_diameter".into(),
            len_a: conns.len(),
            len_b: throat_diameter.len(),
        });
    }
    if throat_length.len() != conns.len() {
        return Err(FunctionError::LengthMismatch {
            a: "conns".into(),
            b: "throat_length".into(),
            len_a: conns.len(),
            len_b: throat_length.len(),
        });
    }
    Ok(ThroatGeometry {
        conns,
        pore_diameter,
        throat_diameter,
        throat_length,
    })
}

/// Index a pore-indexed array through a throat's conns entry.
fn pore_value(values: &[Real], pore: u32, name: &'static str) -> Result<Real, FunctionError> {
    values
        .get(pore as usize)
        .copied()
        .ok_or(FunctionError::WrongShape {
            name: name.into(),
            expected: "full-network pore array",
        })
}

/// Half-pore conductance: coefficient times area over half the diameter.
///
/// Zero or negative diameter means a boundary/virtual pore; the segment
/// conductance is 0 and `series_conductance` drops its resistance.
fn half_pore_conductance(coeff: Real, diameter: Real) -> Real {
    if diameter <= 0.0 {
        0.0
    } else {
        coeff * circle_area(diameter) / clamp_length(0.5 * diameter)
    }
}

fn throat_segment_conductance(coeff: Real, diameter: Real, length: Real) -> Real {
    if diameter <= 0.0 {
        0.0
    } else {
        coeff * circle_area(diameter) / clamp_length(length)
    }
}

/// Compute one conductance per throat, with the transport coefficient
/// supplied per pore and interpolated onto the throat by endpoint
/// averaging. The interpolated value is applied to all three segments,
/// pore halves included.
fn series_over_throats(
    geo: &ThroatGeometry<'_>,
    coeff: &[Real],
    coeff_name: &'static str,
) -> Result<Vec<Real>, FunctionError> {
    geo.conns
        .iter()
        .enumerate()
        .map(|(t, &[p1, p2])| {
            let d1 = pore_value(geo.pore_diameter, p1, "pore_diameter")?;
            let d2 = pore_value(geo.pore_diameter, p2, "pore_diameter")?;
            let c1 = pore_value(coeff, p1, coeff_name)?;
            let c2 = pore_value(coeff, p2, coeff_name)?;
            let ct = 0.5 * (c1 + c2);

            let g1 = half_pore_conductance(ct, d1);
            let g2 = half_pore_conductance(ct, d2);
            let gt =
                throat_segment_conductance(ct, geo.throat_diameter[t], geo.throat_length[t]);
            Ok(series_conductance(g1, gt, g2))
        })
        .collect()
}

/// Electrical conductance of each throat.
///
/// Arguments: `conns`, `pore_diameter`, `throat_diameter`, `throat_length`
/// (all geometry), plus `pore_conductivity` in S/m, endpoint-averaged
/// onto the throat before any segment is evaluated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElectricalConductance;

impl ModelFunction for ElectricalConductance {
    fn name(&self) -> &str {
        "electrical_conductance"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let geo = resolve_geometry(args)?;
        let sigma = args.scalars("pore_conductivity")?;
        let g = series_over_throats(&geo, sigma, "pore_conductivity")?;
        Ok(PropArray::Scalar(g))
    }
}

/// Diffusive conductance of each throat.
///
/// Same series-resistor geometry as [`ElectricalConductance`] with the
/// coefficient taken from `pore_diffusivity` (m^2/s times molar density,
/// pre-multiplied by the caller).
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffusiveConductance;

impl ModelFunction for DiffusiveConductance {
    fn name(&self) -> &str {
        "diffusive_conductance"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let geo = resolve_geometry(args)?;
        let diff = args.scalars("pore_diffusivity")?;
        let g = series_over_throats(&geo, diff, "pore_diffusivity")?;
        Ok(PropArray::Scalar(g))
    }
}

/// Hydraulic conductance of each throat, Hagen-Poiseuille.
///
/// The throat segment is `pi d^4 / (128 mu L)`; a half-pore of diameter
/// `d` has length `d/2`, which reduces to `pi d^3 / (64 mu)`. Viscosity
/// comes from `pore_viscosity`, endpoint-averaged onto the throat and
/// applied to all three segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HydraulicConductance;

impl HydraulicConductance {
    fn poiseuille(diameter: Real, length: Real, mu: Real) -> Real {
        if diameter <= 0.0 || mu <= 0.0 {
            0.0
        } else {
            std::f64::consts::PI * diameter.powi(4) / (128.0 * mu * clamp_length(length))
        }
    }
}

impl ModelFunction for HydraulicConductance {
    fn name(&self) -> &str {
        "hydraulic_conductance"
    }

    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }

    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let geo = resolve_geometry(args)?;
        let mu = args.scalars("pore_viscosity")?;

        let g = geo
            .conns
            .iter()
            .enumerate()
            .map(|(t, &[p1, p2])| {
                let d1 = pore_value(geo.pore_diameter, p1, "pore_diameter")?;
                let d2 = pore_value(geo.pore_diameter, p2, "pore_diameter")?;
                let mu1 = pore_value(mu, p1, "pore_viscosity")?;
                let mu2 = pore_value(mu, p2, "pore_viscosity")?;
                let mu_t = 0.5 * (mu1 + mu2);

                let g1 = Self::poiseuille(d1, 0.5 * d1, mu_t);
                let g2 = Self::poiseuille(d2, 0.5 * d2, mu_t);
                let gt = Self::poiseuille(geo.throat_diameter[t], geo.throat_length[t], mu_t);
                Ok(series_conductance(g1, gt, g2))
            })
            .collect::<Result<Vec<_>, FunctionError>>()?;
        Ok(PropArray::Scalar(g))
    }
}
