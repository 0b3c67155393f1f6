use crate::{
    codec::{self, DecodeError, EncodeError},
    manager::{FromReply, Method},
};
use dbus::{MessageItem, Path};
use std::collections::BTreeMap;

pub const VG_INTERFACE: &str = "com.redhat.lvmdbus1.Vg";

/// `Vg.Remove(i tmo, a{sv} options) -> o`
#[derive(Debug, Clone)]
pub struct VgRemove {
    pub vg:      Path<'static>,
    pub tmo:     i32,
    pub options: BTreeMap<String, String>,
}

/// `job` is `/` when the removal finished before `tmo` expired.
#[derive(Debug, Clone, PartialEq)]
pub struct VgRemoveReply {
    pub job: Path<'static>,
}

impl Method for VgRemove {
    type Reply = VgRemoveReply;

    const INTERFACE: &'static str = VG_INTERFACE;
    const MEMBER: &'static str = "Remove";

    fn path(&self) -> Path<'static> { self.vg.clone() }

    fn args(&self) -> Result<Vec<MessageItem>, EncodeError> {
        Ok(vec![MessageItem::Int32(self.tmo), codec::options_dict(&self.options)?])
    }
}

impl FromReply for VgRemoveReply {
    fn from_items(items: &[MessageItem]) -> Result<Self, DecodeError> {
        codec::expect_count(items, 1)?;
        Ok(Self { job: codec::object_path(items, 0)? })
    }
}
