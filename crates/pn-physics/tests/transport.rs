//! End-to-end: leaf formulas driven by the regeneration engine over a
//! real network, reading geometry and phase data across hosts.

use std::sync::Arc;

use pn_core::{PropKey, Tolerances, nearly_equal};
use pn_models::{HostRole, ModelDescriptor, ModelHost, Project, RegenConfig};
use pn_network::{Network, NetworkBuilder};
use pn_physics::{
    Constant, ElectricalConductance, NeighborMin, PoreToPoreVector, StraightThroatLength,
};

fn line3() -> Network {
    let mut b = NetworkBuilder::new();
    let p0 = b.add_pore([0.0, 0.0, 0.0]);
    let p1 = b.add_pore([1.5, 0.0, 0.0]);
    let p2 = b.add_pore([3.0, 0.0, 0.0]);
    b.add_throat(p0, p1);
    b.add_throat(p1, p2);
    b.build().unwrap()
}

#[test]
fn conductance_chain_regenerates_across_hosts() {
    let net = line3();
    let mut project = Project::new(net);

    // Geometry: manual diameters and lengths per the reference scenario.
    let mut geometry = ModelHost::full("geo", HostRole::Geometry, project.network());
    geometry
        .set_data(PropKey::pore("diameter"), vec![1.0, 0.5, 1.0])
        .unwrap();
    geometry
        .set_data(PropKey::throat("diameter"), vec![0.2, 0.2])
        .unwrap();
    geometry
        .set_data(PropKey::throat("length"), vec![1.0, 1.0])
        .unwrap();
    project.add_host(geometry).unwrap();

    // Phase: uniform conductivity from a constant model.
    let mut phase = ModelHost::full("elec", HostRole::Phase, project.network());
    phase
        .add_model(
            ModelDescriptor::new(
                PropKey::pore("electrical_conductivity"),
                Arc::new(Constant::pore()),
            )
            .unwrap()
            .with_value("value", 1.0),
        )
        .unwrap();
    project.add_host(phase).unwrap();

    // Physics: the series-resistor conductance, bound across all three
    // collaborator stores (network conns, geometry sizes, phase coeff).
    let mut physics = ModelHost::full("phys", HostRole::Physics, project.network());
    physics
        .add_model(
            ModelDescriptor::new(
                PropKey::throat("electrical_conductance"),
                Arc::new(ElectricalConductance),
            )
            .unwrap()
            .with_key("conns", PropKey::throat("conns"))
            .with_key("pore_diameter", PropKey::pore("diameter"))
            .with_key("throat_diameter", PropKey::throat("diameter"))
            .with_key("throat_length", PropKey::throat("length"))
            .with_key("pore_conductivity", PropKey::pore("electrical_conductivity")),
        )
        .unwrap();
    project.add_host(physics).unwrap();

    project.regenerate_all(&RegenConfig::default()).unwrap();

    let phys = project.host_by_name("phys").unwrap();
    let g = phys
        .store()
        .get(&PropKey::throat("electrical_conductance"))
        .unwrap()
        .as_scalar()
        .unwrap()
        .to_vec();

    let gt_only = std::f64::consts::FRAC_PI_4 * 0.2 * 0.2 / 1.0;
    assert_eq!(g.len(), 2);
    for &gi in &g {
        assert!(gi.is_finite() && gi > 0.0);
        assert!(gi < gt_only);
    }
    assert!(nearly_equal(g[0], g[1], Tolerances::default()));
}

#[test]
fn geometry_models_chain_inside_one_host() {
    let net = line3();
    let mut project = Project::new(net);

    // Registered out of dependency order on purpose: length and diameter
    // both need pore.diameter, which is registered last. The deferral
    // pass sorts it out.
    let mut geometry = ModelHost::full("geo", HostRole::Geometry, project.network());
    geometry
        .add_model(
            ModelDescriptor::new(PropKey::throat("length"), Arc::new(StraightThroatLength))
                .unwrap()
                .with_key("conns", PropKey::throat("conns"))
                .with_key("pore_coords", PropKey::pore("coords"))
                .with_key("pore_diameter", PropKey::pore("diameter")),
        )
        .unwrap();
    geometry
        .add_model(
            ModelDescriptor::new(PropKey::throat("diameter"), Arc::new(NeighborMin))
                .unwrap()
                .with_key("conns", PropKey::throat("conns"))
                .with_key("pore_values", PropKey::pore("diameter"))
                .with_value("factor", 0.5),
        )
        .unwrap();
    geometry
        .add_model(
            ModelDescriptor::new(PropKey::pore("diameter"), Arc::new(Constant::pore()))
                .unwrap()
                .with_value("value", 1.0),
        )
        .unwrap();
    let geo_index = project.add_host(geometry).unwrap();

    project
        .regenerate_host(geo_index, &RegenConfig::default())
        .unwrap();

    let geo = project.host(geo_index).unwrap();
    let lengths = geo
        .store()
        .get(&PropKey::throat("length"))
        .unwrap()
        .as_scalar()
        .unwrap()
        .to_vec();
    let diameters = geo
        .store()
        .get(&PropKey::throat("diameter"))
        .unwrap()
        .as_scalar()
        .unwrap()
        .to_vec();

    // Spacing 1.5, both radii 0.5: throat length 0.5.
    assert_eq!(lengths, vec![0.5, 0.5]);
    assert_eq!(diameters, vec![0.5, 0.5]);
}

#[test]
fn throat_vectors_respect_canonical_conns() {
    // Register the throat backwards; conns are canonicalized at build
    // time, so the vector still points from pore 0 to pore 1.
    let mut b = NetworkBuilder::new();
    let p0 = b.add_pore([0.0, 0.0, 0.0]);
    let p1 = b.add_pore([0.0, 2.0, 0.0]);
    b.add_throat(p1, p0);
    let net = b.build().unwrap();

    let mut project = Project::new(net);
    let mut geometry = ModelHost::full("geo", HostRole::Geometry, project.network());
    geometry
        .add_model(
            ModelDescriptor::new(PropKey::throat("vector"), Arc::new(PoreToPoreVector))
                .unwrap()
                .with_key("conns", PropKey::throat("conns"))
                .with_key("pore_coords", PropKey::pore("coords")),
        )
        .unwrap();
    let geo_index = project.add_host(geometry).unwrap();

    project
        .regenerate_host(geo_index, &RegenConfig::default())
        .unwrap();

    let geo = project.host(geo_index).unwrap();
    let v = geo
        .store()
        .get(&PropKey::throat("vector"))
        .unwrap()
        .as_vector()
        .unwrap()
        .to_vec();
    assert_eq!(v[0], nalgebra::Vector3::new(0.0, 1.0, 0.0));
}
