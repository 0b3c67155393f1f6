use crate::{
    bus::Bus,
    job::{JobError, JobRemove, JobResult, JobWait},
    manager::{invoke, VgCreateReply, NOT_FOUND},
    Config, Error,
};
use dbus::Path;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The look-up returned the object the create call produced.
    Found { path: Path<'static> },
    /// The look-up disagreed with the create call.
    Mismatch { expected: Path<'static>, actual: Path<'static> },
}

impl Outcome {
    pub fn compare(expected: Path<'static>, actual: Path<'static>) -> Self {
        if expected == actual {
            Outcome::Found { path: actual }
        } else {
            Outcome::Mismatch { expected, actual }
        }
    }

    pub fn is_mismatch(&self) -> bool {
        match self {
            Outcome::Mismatch { .. } => true,
            Outcome::Found { .. } => false,
        }
    }

    /// A mismatch is only a failure when `strict` is set.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && self.is_mismatch() {
            1
        } else {
            0
        }
    }

    fn write<W: Write>(&self, out: &mut W) -> Result<(), Error> {
        let written = match self {
            Outcome::Found { .. } => writeln!(out, "Look-up worked!"),
            Outcome::Mismatch { expected, actual } => {
                writeln!(out, "Expected = {}, actual = {}", &**expected, &**actual)
            }
        };

        written.map_err(Error::Output)
    }
}

/// A volume group torn down after the check.
#[derive(Debug, Clone, PartialEq)]
pub struct Removal {
    pub vg:  Path<'static>,
    /// `/` when the removal finished before `tmo` expired.
    pub job: Path<'static>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub outcome: Outcome,
    pub removed: Option<Removal>,
}

impl Report {
    pub fn exit_code(&self, strict: bool) -> i32 { self.outcome.exit_code(strict) }
}

/// Creates the configured volume group, looks it up by name, and writes the
/// comparison to `out`.
///
/// The connection opened by `connect` lives for the duration of this call
/// only. Any failure abandons the remaining steps.
pub fn run<B, F, W>(connect: F, config: &Config, out: &mut W) -> Result<Report, Error>
where
    B: Bus,
    F: FnOnce() -> Result<B, dbus::Error>,
    W: Write,
{
    let bus = connect().map_err(Error::Connect)?;
    info!("connected to the system bus");

    let created = invoke(&bus, &config.vg_create())?;
    info!("created {} ({}), job {}", config.vg_name, &*created.vg, &*created.job);

    let expected = if config.wait_job && created.is_pending() {
        created_by_job(&bus, &created, config.job_timeout)?
    } else {
        created.vg
    };

    let found = invoke(&bus, &config.look_up())?;
    if !found.found() {
        warn!("{} is not known to the service", config.vg_name);
    }

    let outcome = Outcome::compare(expected, found.path);
    outcome.write(out)?;

    let removed = if config.remove { remove(&bus, config, &outcome)? } else { None };

    Ok(Report { outcome, removed })
}

fn remove<B: Bus>(bus: &B, config: &Config, outcome: &Outcome) -> Result<Option<Removal>, Error> {
    let vg = match outcome {
        Outcome::Found { path } | Outcome::Mismatch { expected: path, .. }
            if &**path != NOT_FOUND =>
        {
            path.clone()
        }
        _ => {
            warn!("nothing to remove: the create call named no volume group");
            return Ok(None);
        }
    };

    let removed = invoke(bus, &config.vg_remove(vg.clone()))?;
    info!("removed {}, job {}", &*vg, &*removed.job);

    if &*removed.job != NOT_FOUND {
        await_job(bus, &removed.job, config.job_timeout)?;
        invoke(bus, &JobRemove { job: removed.job.clone() })?;
    }

    Ok(Some(Removal { vg, job: removed.job }))
}

/// Waits on the job a pending create handed back and returns the group it made.
fn created_by_job<B: Bus>(
    bus: &B,
    created: &VgCreateReply,
    timeout: i32,
) -> Result<Path<'static>, Error> {
    let job = created.job.clone();
    info!("create answered with job {}, waiting", &*job);

    await_job(bus, &job, timeout)?;
    let result = invoke(bus, &JobResult { job: job.clone() })?;
    invoke(bus, &JobRemove { job })?;
    Ok(result.path)
}

/// Blocks until `job` completes, failing if it timed out or lvm failed behind it.
fn await_job<B: Bus>(bus: &B, job: &Path<'static>, timeout: i32) -> Result<(), Error> {
    let waited = invoke(bus, &JobWait { job: job.clone(), timeout })?;
    if !waited.complete {
        return Err(Error::JobIncomplete { job: String::from(&**job) });
    }

    let status = invoke(bus, &JobError { job: job.clone() })?;
    if status.rc != 0 {
        return Err(Error::JobFailed {
            job:     String::from(&**job),
            rc:      status.rc,
            message: status.message,
        });
    }

    Ok(())
}
