//! Network-specific error types.

use pn_core::PnError;
use thiserror::Error;

/// Network construction and validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A throat refers to a pore that doesn't exist.
    #[error("Throat {throat} refers to non-existent pore {pore}")]
    InvalidPoreRef { throat: usize, pore: u32 },

    /// A throat connects a pore to itself.
    #[error("Throat {throat} connects pore {pore} to itself")]
    SelfLoop { throat: usize, pore: u32 },

    /// Two throats connect the same pore pair.
    #[error("Throats {first} and {second} duplicate the connection {p1}-{p2}")]
    DuplicateThroat {
        first: usize,
        second: usize,
        p1: u32,
        p2: u32,
    },

    /// A label refers to an entity id outside the network.
    #[error("Label '{label}' contains out-of-range id {id}")]
    LabelOutOfRange { label: String, id: u32 },
}

impl From<NetworkError> for PnError {
    fn from(err: NetworkError) -> Self {
        PnError::Topology(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_entities() {
        let err = NetworkError::SelfLoop { throat: 3, pore: 7 };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('7'));
    }

    #[test]
    fn conversion_keeps_the_message() {
        let err = NetworkError::LabelOutOfRange {
            label: "inlet".into(),
            id: 12,
        };
        let msg = err.to_string();
        let converted = PnError::from(err);
        assert_eq!(converted, PnError::Topology(msg));
    }
}
