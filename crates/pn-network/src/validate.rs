//! Topology validation logic.

use std::collections::HashMap;

use crate::error::NetworkError;

/// Validate raw conns against the pore count: every referenced pore exists,
/// no self-loops, no duplicate connections.
///
/// Assumes conns are already canonicalized (lo <= hi), which the builder
/// guarantees.
pub(crate) fn validate_conns(num_pores: usize, conns: &[[u32; 2]]) -> Result<(), NetworkError> {
    let mut seen: HashMap<[u32; 2], usize> = HashMap::new();

    for (t, &[p1, p2] ) in conns.iter().enumerate() {
        for pore in [p1, p2] {
            if pore as usize >= num_pores {
                return Err(NetworkError::InvalidPoreRef { throat: t, pore });
            }
        }
        if p1 == p2 {
            return Err(NetworkError::SelfLoop { throat: t, pore: p1 });
        }
        if let Some(&first) = seen.get(&[p1, p2]) {
            return Err(NetworkError::DuplicateThroat {
                first,
                second: t,
                p1,
                p2,
            });
        }
        seen.insert([p1, p2], t);
    }

    Ok(())
}
