//! `vref` command-line tool
//!
//! Decodes, encodes and converts virtual folder references:
//!
//! ```text
//! vref decode 3-v-c1~smart.json-2-w5f0c-s_2F
//! vref encode reference.json --encoding zero
//! vref convert 3-v-c1~smart.json-2-w5f0c-s_2F --to plain
//! vref virtual --template org/alfresco/repo/virtual/node/smart.json --path /1 \
//!     --node workspace://SpacesStore/5f0c
//! ```

#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vref_codec::{to_node_ref, CodecConfig, CodecRegistry, EncodeReference, Encoding};
use vref_model::{NodeRef, Parameter, Reference, RepositoryLocation, Resource, TemplatePath, VirtualProtocol};

pub fn build_cli() -> Command {
    Command::new("vref")
        .version(vref_codec::VERSION)
        .about("Encode and decode virtual folder references")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML codec configuration"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level"),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode an encoded reference")
                .arg(Arg::new("reference").required(true).help("Encoded reference"))
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode a JSON reference")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file holding the reference"),
                )
                .arg(encoding_arg("encoding", "Target encoding")),
        )
        .subcommand(
            Command::new("convert")
                .about("Re-encode a reference")
                .arg(Arg::new("reference").required(true).help("Encoded reference"))
                .arg(encoding_arg("to", "Target encoding").required(true)),
        )
        .subcommand(
            Command::new("virtual")
                .about("Build a virtual folder reference")
                .arg(
                    Arg::new("template")
                        .long("template")
                        .required(true)
                        .help("Template classpath"),
                )
                .arg(
                    Arg::new("path")
                        .long("path")
                        .default_value("/")
                        .value_parser(value_parser!(TemplatePath))
                        .help("Template path, e.g. /1/2"),
                )
                .arg(
                    Arg::new("node")
                        .long("node")
                        .required(true)
                        .value_parser(value_parser!(NodeRef))
                        .help("Actual folder node reference"),
                )
                .arg(encoding_arg("encoding", "Target encoding"))
                .arg(
                    Arg::new("as-node")
                        .long("as-node")
                        .action(ArgAction::SetTrue)
                        .help("Print as a virtual node reference in the actual node's store"),
                ),
        )
}

fn encoding_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(Encoding))
        .help(help)
}

/// Install the stderr subscriber; `RUST_LOG` overrides the level
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load `--config` and register its hash prefixes
pub fn load_config(matches: &ArgMatches) -> Result<CodecConfig> {
    let Some(path) = matches.get_one::<PathBuf>("config") else {
        return Ok(CodecConfig::default());
    };
    let config = CodecConfig::from_file(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    config.apply().context("failed to register configured hash prefixes")?;
    tracing::debug!(
        path = %path.display(),
        default_encoding = %config.default_encoding,
        max_depth = config.max_depth,
        "loaded configuration"
    );
    Ok(config)
}

pub fn run(matches: &ArgMatches, out: &mut dyn Write) -> Result<()> {
    let config = load_config(matches)?;
    if let Some((command, _)) = matches.subcommand() {
        tracing::debug!(command, "dispatching");
    }

    match matches.subcommand() {
        Some(("decode", args)) => {
            let input = required(args, "reference")?;
            let reference = CodecRegistry::global()
                .parse_with_depth(input, config.max_depth)
                .with_context(|| format!("cannot decode '{input}'"))?;
            tracing::debug!(protocol = %reference.protocol(), "decoded reference");
            if args.get_flag("json") {
                writeln!(out, "{}", serde_json::to_string_pretty(&reference)?)?;
            } else {
                let encoding = Encoding::detect(input)?;
                writeln!(out, "encoding: {encoding}")?;
                describe(&reference, 0, out)?;
            }
        }
        Some(("encode", args)) => {
            let path = args
                .get_one::<PathBuf>("file")
                .context("missing reference file")?;
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let reference: Reference = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a JSON reference", path.display()))?;
            let encoded = match args.get_one::<Encoding>("encoding") {
                Some(encoding) => reference.encode_as(*encoding)?,
                None => reference.encode_with(&config)?,
            };
            writeln!(out, "{encoded}")?;
        }
        Some(("convert", args)) => {
            let input = required(args, "reference")?;
            let to = target_encoding(args, "to", &config);
            tracing::debug!(from = ?Encoding::detect(input).ok(), %to, "converting");
            let reference = CodecRegistry::global()
                .parse_with_depth(input, config.max_depth)
                .with_context(|| format!("cannot decode '{input}'"))?;
            writeln!(out, "{}", reference.encode_as(to)?)?;
        }
        Some(("virtual", args)) => {
            let template = required(args, "template")?;
            let path = args
                .get_one::<TemplatePath>("path")
                .context("missing template path")?;
            let node = args.get_one::<NodeRef>("node").context("missing node")?;
            let reference = VirtualProtocol::new_reference(
                Resource::classpath(template),
                path,
                RepositoryLocation::Node(node.clone()),
            );
            let encoding = target_encoding(args, "encoding", &config);
            if args.get_flag("as-node") {
                let config = config.clone().with_default_encoding(encoding);
                writeln!(out, "{}", to_node_ref(&reference, node.store(), &config)?)?;
            } else {
                writeln!(out, "{}", reference.encode_as(encoding)?)?;
            }
        }
        Some((other, _)) => anyhow::bail!("unknown command '{other}'"),
        None => anyhow::bail!("no command given"),
    }
    Ok(())
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing <{name}>"))
}

fn target_encoding(args: &ArgMatches, name: &str, config: &CodecConfig) -> Encoding {
    args.get_one::<Encoding>(name)
        .copied()
        .unwrap_or(config.default_encoding)
}

/// Indented, one line per field
fn describe(reference: &Reference, indent: usize, out: &mut dyn Write) -> Result<()> {
    let pad = "  ".repeat(indent);
    writeln!(out, "{pad}protocol: {}", reference.protocol())?;
    writeln!(out, "{pad}resource: {}", reference.resource())?;
    if reference.parameters().is_empty() {
        return Ok(());
    }
    writeln!(out, "{pad}parameters:")?;
    for (i, parameter) in reference.parameters().iter().enumerate() {
        match parameter {
            Parameter::String(value) => writeln!(out, "{pad}  [{i}] string: {value}")?,
            Parameter::Resource(resource) => writeln!(out, "{pad}  [{i}] resource: {resource}")?,
            Parameter::Reference(nested) => {
                writeln!(out, "{pad}  [{i}] reference:")?;
                describe(nested, indent + 2, out)?;
            }
        }
    }
    Ok(())
}
