//! Jobs stand in for a result when the service outlives the caller's `tmo`.

use crate::{
    codec::{self, DecodeError, EncodeError},
    manager::{FromReply, Method},
};
use dbus::{MessageItem, Path};

pub const JOB_INTERFACE: &str = "com.redhat.lvmdbus1.Job";

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// `Job.Wait(i timeout) -> b`, `-1` waits forever.
#[derive(Debug, Clone)]
pub struct JobWait {
    pub job:     Path<'static>,
    pub timeout: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobWaitReply {
    pub complete: bool,
}

impl Method for JobWait {
    type Reply = JobWaitReply;

    const INTERFACE: &'static str = JOB_INTERFACE;
    const MEMBER: &'static str = "Wait";

    fn path(&self) -> Path<'static> { self.job.clone() }

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError> {
        Ok(vec![MessageItem::Int32(self.timeout)])
    }
}

impl FromReply for JobWaitReply {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError> {
        codec::expect_count(items, 1)?;
        Ok(Self { complete: codec::boolean(items, 0)? })
    }
}

/// Reads the job's `Result` property, the object the job produced.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub job: Path<'static>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobResultReply {
    pub path: Path<'static>,
}

impl Method for JobResult {
    type Reply = JobResultReply;

    const INTERFACE: &'static str = PROPERTIES_INTERFACE;
    const MEMBER: &'static str = "Get";

    fn path(&self) -> Path<'static> { self.job.clone() }

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError> { Ok(property("Result")) }
}

impl FromReply for JobResultReply {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError> {
        codec::expect_count(items, 1)?;
        let inner = codec::variant(items, 0)?;
        Ok(Self { path: codec::object_path(std::slice::from_ref(inner), 0)? })
    }
}

/// Reads the job's `GetError` property: lvm's exit code and stderr.
#[derive(Debug, Clone)]
pub struct JobError {
    pub job: Path<'static>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobErrorReply {
    pub rc:      i32,
    pub message: String,
}

impl Method for JobError {
    type Reply = JobErrorReply;

    const INTERFACE: &'static str = PROPERTIES_INTERFACE;
    const MEMBER: &'static str = "Get";

    fn path(&self) -> Path<'static> { self.job.clone() }

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError> { Ok(property("GetError")) }
}

impl FromReply for JobErrorReply {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError> {
        codec::expect_count(items, 1)?;
        let inner = std::slice::from_ref(codec::variant(items, 0)?);
        let fields = codec::structure(inner, 0)?;
        codec::expect_count(fields, 2)?;

        Ok(Self { rc: codec::int32(fields, 0)?, message: codec::string(fields, 1)? })
    }
}

fn property(name: &str) -> Vec<MessageItem> {
    vec![MessageItem::Str(JOB_INTERFACE.into()), MessageItem::Str(name.into())]
}

/// `Job.Remove()`, only accepted once the job is complete.
#[derive(Debug, Clone)]
pub struct JobRemove {
    pub job: Path<'static>,
}

impl Method for JobRemove {
    type Reply = ();

    const INTERFACE: &'static str = JOB_INTERFACE;
    const MEMBER: &'static str = "Remove";

    fn path(&self) -> Path<'static> { self.job.clone() }

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError> { Ok(Vec::new()) }
}
