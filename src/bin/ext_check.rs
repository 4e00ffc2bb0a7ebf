//! Checks plugin manifests against the extension contracts.
//!
//! Every manifest entry is registered through an `ExtensionRegistry` exactly
//! as the host would register it. The binary prints a per-key summary (JSON
//! with `--json`) on stdout, rejection warnings go to stderr via `tracing`.
//! It exits non-zero when a manifest cannot be loaded, and also when any
//! plugin was rejected under `--strict` (or `INTERPRET_EXT_STRICT`).

use anyhow::{Context, Result, bail};
use interpret_ext::{
    ExtensionRegistry, TracingSink, Validator, config, load_manifests, logging,
    register_and_report,
};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    logging::init(&config::log_filter())?;

    let manifests = load_manifests(&cli.manifests)?;
    let mut entries = Vec::new();
    for (path, manifest) in &manifests {
        entries.extend(
            manifest
                .entries()
                .with_context(|| format!("reading entries of {}", path.display()))?,
        );
    }
    tracing::debug!(
        manifests = manifests.len(),
        plugins = entries.len(),
        "validating manifest entries"
    );

    let mut registry = ExtensionRegistry::new(Validator::new(TracingSink));
    let report = register_and_report(&mut registry, entries);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    if cli.strict && !report.all_accepted() {
        bail!("{} plugin(s) rejected", report.rejected_count());
    }
    Ok(())
}

struct Cli {
    manifests: Vec<PathBuf>,
    json: bool,
    strict: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut manifests = Vec::new();
        let mut json = false;
        let mut strict = config::strict_from_env();

        while let Some(arg) = args.next() {
            let flag = arg
                .to_str()
                .with_context(|| "Invalid UTF-8 in command flag")?;
            match flag {
                "--manifest" | "-m" => {
                    let Some(path) = args.next() else {
                        bail!("--manifest requires a path");
                    };
                    manifests.push(PathBuf::from(path));
                }
                "--json" => json = true,
                "--strict" => strict = true,
                "--help" | "-h" => usage(0),
                other => {
                    eprintln!("Unknown argument: {other}");
                    usage(1);
                }
            }
        }

        if manifests.is_empty() {
            manifests = config::manifests_from_env();
        }
        if manifests.is_empty() {
            usage(1);
        }

        Ok(Self {
            manifests,
            json,
            strict,
        })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: ext-check --manifest <path> [--manifest <path> ...] [--json] [--strict]\n\nOptions:\n  --manifest, -m   Manifest file, or directory searched for *.json (repeatable).\n  --json           Print the report as JSON.\n  --strict         Exit non-zero when any plugin is rejected.\n\nEnvironment:\n  INTERPRET_EXT_MANIFESTS   Manifest paths used when no --manifest is given.\n  INTERPRET_EXT_STRICT      Same as --strict when set to a value other than 0.\n  INTERPRET_EXT_LOG         tracing filter directives (default: warn)."
    );
    std::process::exit(code);
}
