//! Conversions between typed request/reply fields and `MessageItem` lists.

use dbus::{MessageItem, MessageItemArray, Path, Signature};
use std::collections::BTreeMap;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(display = "invalid {} array: {}", signature, reason)]
    Array { signature: &'static str, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error(display = "expected {} reply argument(s), found {}", expected, found)]
    Count { expected: usize, found: usize },
    #[error(display = "expected '{}' at argument {}, found '{}'", expected, index, found)]
    Type { index: usize, expected: &'static str, found: String },
}

pub fn object_path_array(paths: &[Path<'static>]) -> Result<MessageItem, EncodeError> {
    let items = paths.iter().cloned().map(MessageItem::ObjectPath).collect();
    array(items, "ao")
}

/// Builds an `a{sv}` dictionary, with every value sent as a string variant.
pub fn options_dict(options: &BTreeMap<String, String>) -> Result<MessageItem, EncodeError> {
    let entries = options
        .iter()
        .map(|(key, value)| {
            MessageItem::DictEntry(
                Box::new(MessageItem::Str(key.clone())),
                Box::new(MessageItem::Variant(Box::new(MessageItem::Str(value.clone())))),
            )
        })
        .collect();

    array(entries, "a{sv}")
}

fn array(items: Vec<MessageItem>, signature: &'static str) -> Result<MessageItem, EncodeError> {
    MessageItemArray::new(items, Signature::from(signature))
        .map(MessageItem::Array)
        .map_err(|why| EncodeError::Array { signature, reason: format!("{:?}", why) })
}

pub fn expect_count(items: &[MessageItem], expected: usize) -> Result<(), DecodeError> {
    if items.len() == expected {
        Ok(())
    } else {
        Err(DecodeError::Count { expected, found: items.len() })
    }
}

pub fn object_path(items: &[MessageItem], index: usize) -> Result<Path<'static>, DecodeError> {
    match item(items, index)? {
        MessageItem::ObjectPath(path) => Ok(path.clone()),
        other => Err(mismatch(index, "o", other)),
    }
}

pub fn boolean(items: &[MessageItem], index: usize) -> Result<bool, DecodeError> {
    match item(items, index)? {
        MessageItem::Bool(value) => Ok(*value),
        other => Err(mismatch(index, "b", other)),
    }
}

pub fn int32(items: &[MessageItem], index: usize) -> Result<i32, DecodeError> {
    match item(items, index)? {
        MessageItem::Int32(value) => Ok(*value),
        other => Err(mismatch(index, "i", other)),
    }
}

pub fn string(items: &[MessageItem], index: usize) -> Result<String, DecodeError> {
    match item(items, index)? {
        MessageItem::Str(value) => Ok(value.clone()),
        other => Err(mismatch(index, "s", other)),
    }
}

pub fn structure(items: &[MessageItem], index: usize) -> Result<&[MessageItem], DecodeError> {
    match item(items, index)? {
        MessageItem::Struct(fields) => Ok(fields.as_slice()),
        other => Err(mismatch(index, "(...)", other)),
    }
}

pub fn variant(items: &[MessageItem], index: usize) -> Result<&MessageItem, DecodeError> {
    match item(items, index)? {
        MessageItem::Variant(inner) => Ok(&**inner),
        other => Err(mismatch(index, "v", other)),
    }
}

fn item(items: &[MessageItem], index: usize) -> Result<&MessageItem, DecodeError> {
    items.get(index).ok_or_else(|| DecodeError::Count { expected: index + 1, found: items.len() })
}

fn mismatch(index: usize, expected: &'static str, found: &MessageItem) -> DecodeError {
    DecodeError::Type { index, expected, found: String::from(&*found.signature()) }
}
