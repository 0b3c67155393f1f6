use crate::{
    bus::{Bus, MethodCall, Reply},
    codec::{self, DecodeError, EncodeError},
    Error,
};
use dbus::{MessageItem, Path};
use std::collections::BTreeMap;

pub const DEST: &str = "com.redhat.lvmdbus1";
pub const MANAGER_PATH: &str = "/com/redhat/lvmdbus1/Manager";
pub const MANAGER_INTERFACE: &str = "com.redhat.lvmdbus1.Manager";

/// Object path the service returns when there is no object to name.
pub const NOT_FOUND: &str = "/";

/// A remote method on the lvmdbus1 service, with its typed reply.
pub trait Method {
    const INTERFACE: &'static str;
    const MEMBER: &'static str;

    type Reply: FromReply;

    fn path(&self) -> Path<'static>;

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError>;
}

pub trait FromReply: Sized {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError>;
}

impl FromReply for () {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError> {
        codec::expect_count(items, 0)
    }
}

/// Encodes `method`, waits for its reply, and decodes it.
///
/// The reply message is released before this returns, whether or not it
/// decodes.
pub fn invoke<B: Bus, M: Method>(bus: &B, method: &M) -> Result<M::Reply, Error> {
    let call = MethodCall {
        dest:      DEST,
        path:      method.path(),
        interface: M::INTERFACE,
        member:    M::MEMBER,
        args:      method.args().map_err(|cause| Error::Encode { method: M::MEMBER, cause })?,
    };

    debug!("calling {}.{} on {}", M::INTERFACE, M::MEMBER, &*call.path);
    let reply = bus.call(&call).map_err(|cause| {
        debug!("{} failed: {:?}", M::MEMBER, cause.name());
        Error::Call { method: M::MEMBER, cause }
    })?;

    M::Reply::from_items(&reply.items()).map_err(|cause| Error::Decode { method: M::MEMBER, cause })
}

fn manager_path() -> Path<'static> { Path::from(MANAGER_PATH) }

/// `VgCreate(s name, ao pvs, i tmo, a{sv} options) -> (oo)`
#[derive(Debug, Clone)]
pub struct VgCreate {
    pub name:    String,
    pub pvs:     Vec<Path<'static>>,
    pub tmo:     i32,
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VgCreateReply {
    pub vg:  Path<'static>,
    pub job: Path<'static>,
}

impl VgCreateReply {
    /// The service timed out waiting on lvm and handed back a job instead.
    pub fn is_pending(&self) -> bool { &*self.vg == NOT_FOUND && &*self.job != NOT_FOUND }
}

impl Method for VgCreate {
    type Reply = VgCreateReply;

    const INTERFACE: &'static str = MANAGER_INTERFACE;
    const MEMBER: &'static str = "VgCreate";

    fn path(&self) -> Path<'static> { manager_path() }

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError> {
        Ok(vec![
            MessageItem::Str(self.name.clone()),
            codec::object_path_array(&self.pvs)?,
            MessageItem::Int32(self.tmo),
            codec::options_dict(&self.options)?,
        ])
    }
}

impl FromReply for VgCreateReply {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError> {
        codec::expect_count(items, 1)?;
        let fields = codec::structure(items, 0)?;
        codec::expect_count(fields, 2)?;

        Ok(Self { vg: codec::object_path(fields, 0)?, job: codec::object_path(fields, 1)? })
    }
}

/// `LookUpByLvmId(s key) -> o`
///
/// The key may be a device (`/dev/sda`), a vg name, `vg/lv`, or a uuid.
#[derive(Debug, Clone)]
pub struct LookUpByLvmId {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookUpReply {
    pub path: Path<'static>,
}

impl LookUpReply {
    pub fn found(&self) -> bool { &*self.path != NOT_FOUND }
}

impl Method for LookUpByLvmId {
    type Reply = LookUpReply;

    const INTERFACE: &'static str = MANAGER_INTERFACE;
    const MEMBER: &'static str = "LookUpByLvmId";

    fn path(&self) -> Path<'static> { manager_path() }

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError> {
        Ok(vec![MessageItem::Str(self.key.clone())])
    }
}

impl FromReply for LookUpReply {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError> {
        codec::expect_count(items, 1)?;
        Ok(Self { path: codec::object_path(items, 0)? })
    }
}
