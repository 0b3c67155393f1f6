use crate::{
    manager::{LookUpByLvmId, VgCreate},
    vg::VgRemove,
};
use clap::{ArgAction, Parser};
use dbus::Path;
use std::collections::BTreeMap;

/// Creates a volume group through lvmdbus1 and checks that looking it up by
/// name immediately returns the same object.
#[derive(Parser, Debug, Clone)]
#[command(name = "vg-lookup", version)]
pub struct Config {
    /// Name of the volume group to create and look up
    #[arg(long, value_name = "NAME", default_value = "sdbus_vg")]
    pub vg_name: String,

    /// Object path of a physical volume to put in the group (repeatable)
    #[arg(
        long = "pv",
        value_name = "OBJECT_PATH",
        value_parser = parse_object_path,
        default_values = ["/com/redhat/lvmdbus1/Pv/0", "/com/redhat/lvmdbus1/Pv/1"]
    )]
    pub pvs: Vec<Path<'static>>,

    /// Seconds the service may spend before answering with a job (-1 blocks, 0 always jobs)
    #[arg(long, value_name = "SECONDS", default_value_t = 15, allow_negative_numbers = true)]
    pub timeout: i32,

    /// Create option passed to lvm as a string variant (repeatable)
    #[arg(long = "option", value_name = "KEY=VALUE", value_parser = parse_option)]
    pub options: Vec<(String, String)>,

    /// Wait on the job when the create call answers with one instead of a volume group
    #[arg(long)]
    pub wait_job: bool,

    /// Seconds to wait on a job before giving up (-1 waits forever)
    #[arg(long, value_name = "SECONDS", default_value_t = -1, allow_negative_numbers = true)]
    pub job_timeout: i32,

    /// Remove the volume group once the look-up has been checked
    #[arg(long)]
    pub remove: bool,

    /// Exit with a failure status when the look-up returns a different object
    #[arg(long)]
    pub strict: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn vg_create(&self) -> VgCreate {
        VgCreate {
            name:    self.vg_name.clone(),
            pvs:     self.pvs.clone(),
            tmo:     self.timeout,
            options: self.options.iter().cloned().collect::<BTreeMap<_, _>>(),
        }
    }

    pub fn look_up(&self) -> LookUpByLvmId { LookUpByLvmId { key: self.vg_name.clone() } }

    pub fn vg_remove(&self, vg: Path<'static>) -> VgRemove {
        VgRemove { vg, tmo: self.timeout, options: BTreeMap::new() }
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn parse_object_path(value: &str) -> Result<Path<'static>, String> { Path::new(value.to_owned()) }

fn parse_option(value: &str) -> Result<(String, String), String> {
    if value.contains('\0') {
        return Err("options may not contain NUL bytes".into());
    }

    match value.find('=') {
        Some(0) | None => Err(format!("expected KEY=VALUE, found '{}'", value)),
        Some(pos) => Ok((value[..pos].to_owned(), value[pos + 1..].to_owned())),
    }
}
