//! Command-line interface for inspecting provisioning profiles.
//!
//! Prints the identity, classification, capabilities and developer
//! certificates of a `.mobileprovision` or `.provisionprofile` file.

use clap::Parser;
use log::{warn, LevelFilter};
use mobileprovision::{CmsVerifier, ProvisioningProfile};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mobileprovision")]
#[command(about = "Inspect Apple provisioning profiles")]
struct Cli {
    /// Provisioning profile to inspect
    profile: PathBuf,

    /// Verify the CMS signature before reading the profile
    #[arg(long)]
    verify: bool,

    /// Write the verified inner plist to this file
    #[arg(short = 'x', long)]
    extract: Option<PathBuf>,

    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let profile = if cli.verify {
        ProvisioningProfile::open_verified(&cli.profile, &CmsVerifier)?
    } else {
        ProvisioningProfile::open(&cli.profile)
    };

    if profile.is_empty() {
        return Err(format!("{} is not a readable provisioning profile", cli.profile.display()).into());
    }

    if let Some(output) = &cli.extract {
        profile.decode_to(&CmsVerifier, output)?;
        println!("Extracted: {}", output.display());
    }

    print_profile(&mut io::stdout().lock(), &profile)?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_str()),
    )
    .format_timestamp(None)
    .init();
}

const UNKNOWN: &str = "<unknown>";

/// Render a fallible lookup, showing the error in place of the value.
fn describe<T: fmt::Display>(value: mobileprovision::Result<Option<T>>) -> String {
    match value {
        Ok(Some(v)) => v.to_string(),
        Ok(None) => UNKNOWN.to_string(),
        Err(e) => {
            warn!("{}", e);
            format!("{} ({})", UNKNOWN, e)
        }
    }
}

fn print_profile(out: &mut impl Write, profile: &ProvisioningProfile) -> io::Result<()> {
    let or_unknown = |v: Option<&str>| v.unwrap_or(UNKNOWN).to_string();

    writeln!(out, "Name:             {}", or_unknown(profile.name()))?;
    writeln!(out, "App ID name:      {}", or_unknown(profile.app_id_name()))?;
    writeln!(out, "UUID:             {}", or_unknown(profile.uuid()))?;
    writeln!(out, "Team:             {}", or_unknown(profile.team_name()))?;
    writeln!(
        out,
        "Team identifier:  {}",
        or_unknown(profile.team_identifier_prefix().as_deref())
    )?;
    writeln!(
        out,
        "App ID prefix:    {}",
        or_unknown(profile.app_identifier_prefix().as_deref())
    )?;
    writeln!(out, "Bundle ID:        {}", describe(profile.bundle_id()))?;
    writeln!(
        out,
        "Platform:         {}",
        or_unknown(profile.platform().as_ref().map(|p| p.as_str()))
    )?;
    writeln!(out, "Type:             {}", describe(profile.profile_type()))?;
    if let Some(created) = profile.creation_date() {
        writeln!(out, "Created:          {}", created.to_rfc3339())?;
    }
    if let Some(expires) = profile.expiration_date() {
        writeln!(out, "Expires:          {}", expires.to_rfc3339())?;
    }
    match profile.devices() {
        Some(devices) => writeln!(out, "Devices:          {}", devices.len())?,
        None => writeln!(out, "Devices:          <none>")?,
    }

    writeln!(out, "Capabilities:")?;
    match profile.enabled_capabilities() {
        Ok(capabilities) => {
            for capability in capabilities {
                writeln!(out, "  {}", capability)?;
            }
        }
        Err(e) => writeln!(out, "  {}", describe::<&str>(Err(e)))?,
    }

    writeln!(out, "Developer certificates:")?;
    match profile.developer_certificates() {
        Ok(certs) => {
            for (i, cert) in certs.iter().enumerate() {
                writeln!(out, "  #{}: {}", i, describe(cert.common_name().map(Some)))?;
                writeln!(out, "      SHA-1:      {}", cert.fingerprint())?;
                writeln!(out, "      Not before: {}", cert.not_before().to_rfc3339())?;
                writeln!(out, "      Not after:  {}", cert.not_after().to_rfc3339())?;
            }
        }
        Err(e) => writeln!(out, "  {}", describe::<&str>(Err(e)))?,
    }

    Ok(())
}
