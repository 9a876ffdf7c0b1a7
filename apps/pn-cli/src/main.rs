use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use pn_core::PropKey;
use pn_models::{HostRole, ModelDescriptor, ModelHost, Project, RegenConfig};
use pn_network::{Network, NetworkBuilder};
use pn_physics::{
    Constant, DiffusiveConductance, ElectricalConductance, HydraulicConductance, NeighborMin,
    StraightThroatLength,
};

#[derive(Parser)]
#[command(name = "pn-cli")]
#[command(about = "PoreNet CLI - Pore-network transport property tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a demo line network, regenerate all models, print conductances
    Demo {
        /// Number of pores in the line
        #[arg(long, default_value_t = 10)]
        pores: usize,
        /// Pore center spacing in meters
        #[arg(long, default_value_t = 1e-4)]
        spacing: f64,
        /// Which transport conductance to compute
        #[arg(long, value_enum, default_value = "electrical")]
        transport: Transport,
        /// Emit results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the registered models of the demo setup in regeneration order
    Models {
        /// Which transport conductance to register
        #[arg(long, value_enum, default_value = "electrical")]
        transport: Transport,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Transport {
    Electrical,
    Hydraulic,
    Diffusive,
}

impl Transport {
    fn conductance_key(self) -> PropKey {
        match self {
            Transport::Electrical => PropKey::throat("electrical_conductance"),
            Transport::Hydraulic => PropKey::throat("hydraulic_conductance"),
            Transport::Diffusive => PropKey::throat("diffusive_conductance"),
        }
    }

    fn coefficient_key(self) -> PropKey {
        match self {
            Transport::Electrical => PropKey::pore("electrical_conductivity"),
            Transport::Hydraulic => PropKey::pore("viscosity"),
            Transport::Diffusive => PropKey::pore("diffusivity"),
        }
    }

    // Rough room-temperature water values.
    fn coefficient_value(self) -> f64 {
        match self {
            Transport::Electrical => 5.5e-6,
            Transport::Hydraulic => 8.9e-4,
            Transport::Diffusive => 2.0e-9,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo {
            pores,
            spacing,
            transport,
            json,
        } => cmd_demo(pores, spacing, transport, json),
        Commands::Models { transport } => cmd_models(transport),
    }
}

fn build_line(pores: usize, spacing: f64) -> Result<Network, Box<dyn Error>> {
    let mut builder = NetworkBuilder::new();
    let ids: Vec<_> = (0..pores)
        .map(|i| builder.add_pore([i as f64 * spacing, 0.0, 0.0]))
        .collect();
    for pair in ids.windows(2) {
        builder.add_throat(pair[0], pair[1]);
    }
    Ok(builder.build()?)
}

fn build_project(pores: usize, spacing: f64, transport: Transport) -> Result<Project, Box<dyn Error>> {
    let network = build_line(pores, spacing)?;
    let mut project = Project::new(network);

    // Geometry: uniform pore diameters, throat sizes derived from them.
    let mut geometry = ModelHost::full("geometry", HostRole::Geometry, project.network());
    geometry.add_model(
        ModelDescriptor::new(PropKey::pore("diameter"), Arc::new(Constant::pore()))?
            .with_value("value", 0.5 * spacing),
    )?;
    geometry.add_model(
        ModelDescriptor::new(PropKey::throat("diameter"), Arc::new(NeighborMin))?
            .with_key("conns", PropKey::throat("conns"))
            .with_key("pore_values", PropKey::pore("diameter"))
            .with_value("factor", 0.5),
    )?;
    geometry.add_model(
        ModelDescriptor::new(PropKey::throat("length"), Arc::new(StraightThroatLength))?
            .with_key("conns", PropKey::throat("conns"))
            .with_key("pore_coords", PropKey::pore("coords"))
            .with_key("pore_diameter", PropKey::pore("diameter")),
    )?;
    project.add_host(geometry)?;

    // Phase: one uniform transport coefficient.
    let mut phase = ModelHost::full("water", HostRole::Phase, project.network());
    phase.add_model(
        ModelDescriptor::new(transport.coefficient_key(), Arc::new(Constant::pore()))?
            .with_value("value", transport.coefficient_value()),
    )?;
    project.add_host(phase)?;

    // Physics: the series-resistor conductance over the three segments.
    let mut physics = ModelHost::full("physics", HostRole::Physics, project.network());
    let descriptor = match transport {
        Transport::Electrical => {
            ModelDescriptor::new(transport.conductance_key(), Arc::new(ElectricalConductance))?
                .with_key("pore_conductivity", transport.coefficient_key())
        }
        Transport::Hydraulic => {
            ModelDescriptor::new(transport.conductance_key(), Arc::new(HydraulicConductance))?
                .with_key("pore_viscosity", transport.coefficient_key())
        }
        Transport::Diffusive => {
            ModelDescriptor::new(transport.conductance_key(), Arc::new(DiffusiveConductance))?
                .with_key("pore_diffusivity", transport.coefficient_key())
        }
    };
    physics.add_model(
        descriptor
            .with_key("conns", PropKey::throat("conns"))
            .with_key("pore_diameter", PropKey::pore("diameter"))
            .with_key("throat_diameter", PropKey::throat("diameter"))
            .with_key("throat_length", PropKey::throat("length")),
    )?;
    project.add_host(physics)?;

    Ok(project)
}

fn cmd_demo(pores: usize, spacing: f64, transport: Transport, json: bool) -> Result<(), Box<dyn Error>> {
    let mut project = build_project(pores, spacing, transport)?;
    project.regenerate_all(&RegenConfig::default())?;

    let key = transport.conductance_key();
    let physics = project
        .host_by_name("physics")
        .ok_or("physics host missing")?;
    let conductance = physics
        .store()
        .get(&key)?
        .as_scalar()
        .ok_or("conductance is not a scalar array")?;

    if json {
        let payload = serde_json::json!({
            "pores": pores,
            "spacing_m": spacing,
            "property": key,
            "values": conductance,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!(
        "Line network: {} pores, {} throats, spacing {:.3e} m",
        pores,
        conductance.len(),
        spacing
    );
    println!("{}:", key);
    for (t, g) in conductance.iter().enumerate() {
        println!("  throat {:>4}  g = {:.6e}", t, g);
    }
    Ok(())
}

fn cmd_models(transport: Transport) -> Result<(), Box<dyn Error>> {
    let project = build_project(4, 1e-4, transport)?;

    for host in project.hosts() {
        if host.registry().is_empty() {
            continue;
        }
        println!("{} ({:?}):", host.name(), host.role());
        for (target, descriptor) in host.registry().iter() {
            let deps: Vec<String> = descriptor
                .dependency_keys()
                .map(|k| k.to_string())
                .collect();
            if deps.is_empty() {
                println!("  {} <- {}", target, descriptor.function().name());
            } else {
                println!(
                    "  {} <- {}({})",
                    target,
                    descriptor.function().name(),
                    deps.join(", ")
                );
            }
        }
    }
    Ok(())
}
