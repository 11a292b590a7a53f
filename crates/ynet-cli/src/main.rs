//! ynet command-line interface.

mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use num_complex::Complex;
use ynet_core::NodeId;
use ynet_core::units::parse_value;
use ynet_parser::parse_file;
use ynet_solver::{
    FrequencySweep, FrequencyUnit, SolverConfig, SweepResult, UnknownComponentPolicy,
    ac_frequencies,
};

use crate::output::{print_gains, print_impedances, print_matrix, print_s_parameters};

#[derive(Parser)]
#[command(name = "ynet")]
#[command(about = "Small-signal two-port analysis of linear netlists")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SweepArgs {
    /// Path to the netlist file
    netlist: PathBuf,

    /// Frequencies to evaluate, comma separated (SI suffixes allowed).
    /// Defaults to the netlist's .AC line.
    #[arg(short, long, value_delimiter = ',', value_parser = parse_quantity)]
    freq: Vec<f64>,

    /// Interpret frequencies as angular frequency (rad/s)
    #[arg(long)]
    angular: bool,

    /// Fail on components with an unrecognized prefix instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PortArgs {
    /// Port 1 node
    #[arg(long, default_value_t = 1)]
    port1: u32,

    /// Port 2 node
    #[arg(long, default_value_t = 2)]
    port2: u32,
}

impl PortArgs {
    fn nodes(&self) -> (NodeId, NodeId) {
        (NodeId::new(self.port1), NodeId::new(self.port2))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print S-parameters of the two-port
    Sparams {
        #[command(flatten)]
        sweep: SweepArgs,

        #[command(flatten)]
        ports: PortArgs,

        /// Reference impedance (Ω)
        #[arg(long, default_value = "50", value_parser = parse_quantity)]
        z0: f64,

        /// Print magnitudes in dB
        #[arg(long)]
        db: bool,
    },

    /// Print open-circuit voltage gain and terminated network gain
    Gain {
        #[command(flatten)]
        sweep: SweepArgs,

        #[command(flatten)]
        ports: PortArgs,

        /// Source impedance (Ω)
        #[arg(long, default_value = "50", value_parser = parse_quantity)]
        zs: f64,

        /// Load impedance (Ω)
        #[arg(long, default_value = "50", value_parser = parse_quantity)]
        zl: f64,
    },

    /// Print terminated input and output impedance
    Impedance {
        #[command(flatten)]
        sweep: SweepArgs,

        #[command(flatten)]
        ports: PortArgs,

        /// Source impedance seen by port 1 (Ω)
        #[arg(long, default_value = "50", value_parser = parse_quantity)]
        zs: f64,

        /// Load impedance on port 2 (Ω)
        #[arg(long, default_value = "50", value_parser = parse_quantity)]
        zl: f64,
    },

    /// Print the full nodal admittance matrix
    Matrix {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Only print the matrix built for this frequency
        #[arg(long, value_parser = parse_quantity)]
        at: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sparams {
            sweep,
            ports,
            z0,
            db,
        } => cmd_sparams(&sweep, &ports, z0, db),
        Commands::Gain {
            sweep,
            ports,
            zs,
            zl,
        } => cmd_gain(&sweep, &ports, zs, zl),
        Commands::Impedance {
            sweep,
            ports,
            zs,
            zl,
        } => cmd_impedance(&sweep, &ports, zs, zl),
        Commands::Matrix { sweep, at } => cmd_matrix(&sweep, at),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_sparams(args: &SweepArgs, ports: &PortArgs, z0: f64, db: bool) -> Result<()> {
    let result = run_sweep(args)?;
    let (n1, n2) = ports.nodes();
    let s = result.s_parameters(n1, n2, Complex::new(z0, 0.0))?;
    print_s_parameters(&s, db, args.json)
}

fn cmd_gain(args: &SweepArgs, ports: &PortArgs, zs: f64, zl: f64) -> Result<()> {
    let result = run_sweep(args)?;
    let (n1, n2) = ports.nodes();
    let (zs, zl) = (Complex::new(zs, 0.0), Complex::new(zl, 0.0));
    let av = result.voltage_gain(n1, n2)?;
    let h = result.network_transfer(n1, n2, zs, zl)?;
    print_gains(&result.frequencies(), &av, &h, args.json)
}

fn cmd_impedance(args: &SweepArgs, ports: &PortArgs, zs: f64, zl: f64) -> Result<()> {
    let result = run_sweep(args)?;
    let (n1, n2) = ports.nodes();
    let zin = result.input_impedance(n1, n2, Complex::new(zl, 0.0))?;
    let zout = result.output_impedance(n1, n2, Complex::new(zs, 0.0))?;
    print_impedances(&result.frequencies(), &zin, &zout, args.json)
}

fn cmd_matrix(args: &SweepArgs, at: Option<f64>) -> Result<()> {
    let result = run_sweep(args)?;
    match at {
        Some(f) => {
            let y = result
                .matrix_at(f)
                .ok_or_else(|| anyhow!("frequency {f} is not part of the sweep"))?;
            print_matrix(y, args.json)
        }
        None => {
            for point in result.points() {
                print_matrix(&point.matrix, args.json)?;
            }
            Ok(())
        }
    }
}

/// Parse the netlist and build one matrix per requested frequency.
fn run_sweep(args: &SweepArgs) -> Result<SweepResult> {
    let parsed = parse_file(&args.netlist)?;

    let frequencies = if !args.freq.is_empty() {
        args.freq.clone()
    } else if let Some(ac) = &parsed.ac {
        ac_frequencies(ac)?
    } else {
        bail!(
            "no frequencies: pass --freq or add an .AC line to {}",
            args.netlist.display()
        );
    };

    let policy = if args.strict {
        UnknownComponentPolicy::Error
    } else {
        for component in parsed.table.unclassified() {
            eprintln!(
                "Warning: skipping {}: unrecognized component prefix",
                component.name
            );
        }
        UnknownComponentPolicy::Ignore
    };
    let unit = if args.angular {
        FrequencyUnit::Angular
    } else {
        FrequencyUnit::Hertz
    };
    let config = SolverConfig::default()
        .with_unknown_policy(policy)
        .with_frequency_unit(unit);

    let sweep = FrequencySweep::new(parsed.table, parsed.models, frequencies, config)?;
    Ok(sweep.run()?)
}

fn parse_quantity(s: &str) -> std::result::Result<f64, String> {
    parse_value(s).ok_or_else(|| format!("invalid value '{s}'"))
}
