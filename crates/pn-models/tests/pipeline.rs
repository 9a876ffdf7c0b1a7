//! Cross-object regeneration tests for pn-models.

use std::sync::Arc;

use pn_core::{EntityKind, PropKey};
use pn_data::PropArray;
use pn_models::{
    FunctionError, HostRole, MissingPolicy, ModelDescriptor, ModelFunction, ModelHost, Project,
    RegenConfig, ResolvedArgs, interpolate_data,
};
use pn_network::{Network, NetworkBuilder};

/// Fills the target with a constant.
struct ConstFn {
    kind: EntityKind,
}
impl ModelFunction for ConstFn {
    fn name(&self) -> &str {
        "const"
    }
    fn produces(&self) -> EntityKind {
        self.kind
    }
    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let value = args.scalar("value")?;
        Ok(PropArray::Scalar(vec![value; args.count()]))
    }
}

/// Scales an input array elementwise.
struct ScaleFn {
    kind: EntityKind,
}
impl ModelFunction for ScaleFn {
    fn name(&self) -> &str {
        "scale"
    }
    fn produces(&self) -> EntityKind {
        self.kind
    }
    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let factor = args.scalar("factor")?;
        let input = args.scalars("input")?;
        Ok(PropArray::Scalar(input.iter().map(|v| v * factor).collect()))
    }
}

/// Per-throat sum of the two endpoint pore values.
struct EndpointSumFn;
impl ModelFunction for EndpointSumFn {
    fn name(&self) -> &str {
        "endpoint_sum"
    }
    fn produces(&self) -> EntityKind {
        EntityKind::Throat
    }
    fn call(&self, args: &ResolvedArgs) -> Result<PropArray, FunctionError> {
        let conns = args.conns("conns")?;
        let pore_values = args.scalars("pore_values")?;
        Ok(PropArray::Scalar(
            conns
                .iter()
                .map(|&[p1, p2]| pore_values[p1 as usize] + pore_values[p2 as usize])
                .collect(),
        ))
    }
}

fn line3() -> Network {
    let mut b = NetworkBuilder::new();
    let p0 = b.add_pore([0.0, 0.0, 0.0]);
    let p1 = b.add_pore([1.0, 0.0, 0.0]);
    let p2 = b.add_pore([2.0, 0.0, 0.0]);
    b.add_throat(p0, p1);
    b.add_throat(p1, p2);
    b.build().unwrap()
}

#[test]
fn physics_reads_phase_and_network_through_project() {
    let mut net = line3();
    net.store_mut()
        .set(PropKey::pore("diameter"), vec![1.0, 0.5, 1.0])
        .unwrap();
    let mut project = Project::new(net);

    // Phase stores a pore-level coefficient.
    let mut phase = ModelHost::full("water", HostRole::Phase, project.network());
    phase
        .set_data(PropKey::pore("conductivity"), vec![2.0, 4.0, 6.0])
        .unwrap();
    project.add_host(phase).unwrap();

    // Physics combines the phase coefficient with network topology.
    let mut physics = ModelHost::full("phys", HostRole::Physics, project.network());
    physics
        .add_model(
            ModelDescriptor::new(
                PropKey::throat("coeff_sum"),
                Arc::new(EndpointSumFn),
            )
            .unwrap()
            .with_key("conns", PropKey::throat("conns"))
            .with_key("pore_values", PropKey::pore("conductivity")),
        )
        .unwrap();
    let phys_index = project.add_host(physics).unwrap();

    project
        .regenerate_host(phys_index, &RegenConfig::default())
        .unwrap();

    let host = project.host(phys_index).unwrap();
    let sums = host
        .store()
        .get(&PropKey::throat("coeff_sum"))
        .unwrap()
        .as_scalar()
        .unwrap()
        .to_vec();
    assert_eq!(sums, vec![6.0, 10.0]);
}

#[test]
fn chained_hosts_regenerate_in_project_order() {
    let net = line3();
    let mut project = Project::new(net);

    // Geometry computes pore.diameter from a manually seeded value.
    let mut geometry = ModelHost::full("geo", HostRole::Geometry, project.network());
    geometry
        .set_data(PropKey::pore("seed"), vec![0.5, 0.25, 0.5])
        .unwrap();
    geometry
        .add_model(
            ModelDescriptor::new(
                PropKey::pore("diameter"),
                Arc::new(ScaleFn {
                    kind: EntityKind::Pore,
                }),
            )
            .unwrap()
            .with_value("factor", 2.0)
            .with_key("input", PropKey::pore("seed")),
        )
        .unwrap();
    project.add_host(geometry).unwrap();

    // Physics scales the geometry's output (a sibling-store read).
    let mut physics = ModelHost::full("phys", HostRole::Physics, project.network());
    physics
        .add_model(
            ModelDescriptor::new(
                PropKey::pore("resistance"),
                Arc::new(ScaleFn {
                    kind: EntityKind::Pore,
                }),
            )
            .unwrap()
            .with_value("factor", 10.0)
            .with_key("input", PropKey::pore("diameter")),
        )
        .unwrap();
    project.add_host(physics).unwrap();

    project.regenerate_all(&RegenConfig::default()).unwrap();

    let phys = project.host_by_name("phys").unwrap();
    let r = phys
        .store()
        .get(&PropKey::pore("resistance"))
        .unwrap()
        .as_scalar()
        .unwrap()
        .to_vec();
    assert_eq!(r, vec![10.0, 5.0, 10.0]);
}

#[test]
fn interpolation_matches_endpoint_average() {
    let net = line3();
    let throat_vals = interpolate_data(&net, &[2.0, 4.0, 6.0]).unwrap();
    assert_eq!(throat_vals, vec![3.0, 5.0]);
}

#[test]
fn defer_policy_is_the_default_and_fail_is_opt_in() {
    let config = RegenConfig::default();
    assert_eq!(config.on_missing, MissingPolicy::Defer);
    assert!(config.max_passes >= 1);
}

mod determinism {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Regenerating a dependency chain twice with unchanged inputs
        /// must produce bit-identical arrays.
        #[test]
        fn double_regeneration_is_bit_identical(
            seeds in proptest::collection::vec(0.01f64..100.0, 3),
            factor in 0.01f64..50.0,
        ) {
            let net = line3();
            let mut host = ModelHost::full("geo", HostRole::Geometry, &net);
            host.set_data(PropKey::pore("seed"), seeds).unwrap();
            host.add_model(
                ModelDescriptor::new(
                    PropKey::pore("diameter"),
                    Arc::new(ScaleFn { kind: EntityKind::Pore }),
                )
                .unwrap()
                .with_value("factor", factor)
                .with_key("input", PropKey::pore("seed")),
            )
            .unwrap();
            host.add_model(
                ModelDescriptor::new(
                    PropKey::pore("volume"),
                    Arc::new(ScaleFn { kind: EntityKind::Pore }),
                )
                .unwrap()
                .with_value("factor", factor * 0.5)
                .with_key("input", PropKey::pore("diameter")),
            )
            .unwrap();

            let ctx = pn_models::EvalContext::new(&net);
            host.regenerate_all(&ctx, &RegenConfig::default()).unwrap();
            let first = host.store().get(&PropKey::pore("volume")).unwrap().clone();

            host.regenerate_all(&ctx, &RegenConfig::default()).unwrap();
            let second = host.store().get(&PropKey::pore("volume")).unwrap().clone();

            prop_assert_eq!(first, second);
        }

        /// A constant model fills exactly the subdomain count, whatever
        /// the constant is.
        #[test]
        fn constant_model_fills_subdomain(value in -1e6f64..1e6) {
            let net = line3();
            let mut host = ModelHost::full("geo", HostRole::Geometry, &net);
            host.add_model(
                ModelDescriptor::new(
                    PropKey::throat("x"),
                    Arc::new(ConstFn { kind: EntityKind::Throat }),
                )
                .unwrap()
                .with_value("value", value),
            )
            .unwrap();

            let ctx = pn_models::EvalContext::new(&net);
            host.regenerate_all(&ctx, &RegenConfig::default()).unwrap();
            let arr = host.store().get(&PropKey::throat("x")).unwrap();
            prop_assert_eq!(arr.len(), 2);
            prop_assert!(arr.as_scalar().unwrap().iter().all(|&v| v == value));
        }
    }
}
