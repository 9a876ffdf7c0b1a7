//! Phase-side helpers.

use pn_core::{PnError, PnResult, Real};
use pn_network::Network;

/// Map a pore-indexed property to a throat-indexed estimate by averaging
/// the two endpoint pore values of each throat.
///
/// This is the interpolation a phase offers physics models that need a
/// transport coefficient per throat but only store it per pore.
pub fn interpolate_data(network: &Network, pore_values: &[Real]) -> PnResult<Vec<Real>> {
    if pore_values.len() != network.num_pores() {
        return Err(PnError::Shape {
            key: "pore data for interpolation".into(),
            expected: network.num_pores(),
            got: pore_values.len(),
        });
    }
    Ok(network
        .conns()
        .iter()
        .map(|&[p1, p2]| 0.5 * (pore_values[p1 as usize] + pore_values[p2 as usize]))
        .collect())
}
