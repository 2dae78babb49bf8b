//! The `abiforge` generator: ABI files in, Rust bindings or Solidity
//! interfaces out.

use std::fs;
use std::path::{Path, PathBuf};

use abiforge_codegen::{generate_host_source, generate_interface_source, EmbeddedBuild, Rustfmt};
use abiforge_core::abi::{parse_abi, AbiEntry, BuildDescriptor};
use abiforge_core::spec::ContractSpec;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

pub use abiforge_codegen::GeneratorConfig;

#[derive(Parser, Debug)]
#[command(
    name = "abiforge",
    version,
    about = "Generate contract bindings, CLIs and Solidity interfaces from ABI JSON"
)]
pub struct GeneratorCli {
    /// TOML file with generator settings
    #[arg(long, global = true, env = "ABIFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: GeneratorCommand,
}

#[derive(Subcommand, Debug)]
pub enum GeneratorCommand {
    /// Generate the Rust binding struct and its CLI
    Host(HostArgs),
    /// Generate a Solidity interface stub
    Interface(InterfaceArgs),
}

/// Where the ABI comes from and where the output goes.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// ABI JSON: a bare entry array or a build artifact
    #[arg(long, required_unless_present = "build")]
    pub abi: Option<PathBuf>,

    /// Build descriptor JSON with `contractName` and usually `abi`
    #[arg(long)]
    pub build: Option<PathBuf>,

    /// Contract name (defaults to the build descriptor's `contractName`)
    #[arg(long)]
    pub name: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct HostArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only generate the binding struct
    #[arg(long)]
    pub no_cli: bool,

    /// Skip running rustfmt over the output
    #[arg(long)]
    pub no_format: bool,

    /// Path generated code uses to reach the runtime crate
    #[arg(long)]
    pub runtime_path: Option<String>,

    /// Compile the build descriptor's ABI and bytecode into the bindings
    #[arg(long, requires = "build")]
    pub embed_build: bool,

    /// rustfmt executable
    #[arg(long, default_value = "rustfmt")]
    pub rustfmt: String,
}

#[derive(Args, Debug, Clone)]
pub struct InterfaceArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// `pragma solidity` constraint
    #[arg(long)]
    pub pragma: Option<String>,
}

/// Parse the process arguments and run the requested generator.
pub fn run() -> Result<()> {
    execute(GeneratorCli::parse())
}

pub fn execute(cli: GeneratorCli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let source = match &cli.command {
        GeneratorCommand::Host(args) => &args.source,
        GeneratorCommand::Interface(args) => &args.source,
    };
    let output = generate(&cli.command, config)?;

    match &source.output {
        Some(path) => {
            fs::write(path, &output).with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("✅ Wrote {} ({} bytes)", path.display(), output.len());
        }
        None => print!("{}", output),
    }
    Ok(())
}

/// Render the artifact for `command` without touching the output path.
pub fn generate(command: &GeneratorCommand, mut config: GeneratorConfig) -> Result<String> {
    match command {
        GeneratorCommand::Host(args) => {
            if args.no_cli {
                config.emit_cli = false;
            }
            if args.no_format {
                config.format = false;
            }
            if let Some(path) = &args.runtime_path {
                config.runtime_path = path.clone();
            }
            if args.embed_build {
                config.embed_build = true;
            }
            let source = load_source(&args.source)?;
            let embedded = if config.embed_build {
                let build = source
                    .build
                    .as_ref()
                    .ok_or_else(|| anyhow!("embedding a build needs --build"))?;
                Some(EmbeddedBuild::from_descriptor(build, Some(&source.entries))?)
            } else {
                None
            };
            let formatter = Rustfmt {
                program: args.rustfmt.clone(),
                ..Default::default()
            };
            Ok(generate_host_source(&source.spec, embedded.as_ref(), &config, &formatter)?)
        }
        GeneratorCommand::Interface(args) => {
            if let Some(pragma) = &args.pragma {
                config.pragma_version = pragma.clone();
            }
            let source = load_source(&args.source)?;
            Ok(generate_interface_source(&source.spec, &config)?)
        }
    }
}

/// Settings from a TOML file, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GeneratorConfig =
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
    debug!(path = %path.display(), "loaded generator config");
    Ok(config)
}

/// The contract a generator run works on.
struct LoadedSource {
    spec: ContractSpec,
    entries: Vec<AbiEntry>,
    build: Option<BuildDescriptor>,
}

fn load_source(source: &SourceArgs) -> Result<LoadedSource> {
    let build = match &source.build {
        Some(path) => {
            let text = read(path)?;
            Some(BuildDescriptor::from_json(&text).with_context(|| format!("invalid build descriptor {}", path.display()))?)
        }
        None => None,
    };

    let name = match (&source.name, &build) {
        (Some(name), _) => name.clone(),
        (None, Some(build)) => build.contract_name.clone(),
        (None, None) => bail!("--name is required when no build descriptor is given"),
    };

    let entries = match (&source.abi, &build) {
        (Some(path), _) => parse_abi(&read(path)?).with_context(|| format!("invalid ABI JSON {}", path.display()))?,
        (None, Some(build)) => build
            .abi
            .clone()
            .ok_or_else(|| anyhow!("build descriptor for {} has no abi; pass --abi", build.contract_name))?,
        (None, None) => bail!("one of --abi or --build is required"),
    };
    let spec = ContractSpec::build(&name, &entries)?;
    info!(
        contract = %spec.name,
        functions = spec.functions.len(),
        events = spec.events.len(),
        "loaded contract"
    );
    Ok(LoadedSource { spec, entries, build })
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
