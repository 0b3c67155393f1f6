use dbus::{BusType, Connection, Message, MessageItem, Path};

/// Reply deadline handed to libdbus; `-1` selects the library default.
pub const REPLY_TIMEOUT: i32 = -1;

const INVALID_ARGS: &str = "org.freedesktop.DBus.Error.InvalidArgs";

/// A fully built request: where it goes, and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub dest:      &'static str,
    pub path:      Path<'static>,
    pub interface: &'static str,
    pub member:    &'static str,
    pub args:      Vec<MessageItem>,
}

impl MethodCall {
    pub fn to_message(&self) -> Result<Message, dbus::Error> {
        let mut message =
            Message::new_method_call(self.dest, self.path.clone(), self.interface, self.member)
                .map_err(|why| dbus::Error::new_custom(INVALID_ARGS, &why))?;

        message.append_items(&self.args);
        Ok(message)
    }
}

/// A reply owned by the caller until it is dropped.
pub trait Reply {
    fn items(&self) -> Vec<MessageItem>;
}

impl Reply for Message {
    fn items(&self) -> Vec<MessageItem> { self.get_items() }
}

/// Blocking request/response transport.
pub trait Bus {
    type Reply: Reply;

    fn call(&self, call: &MethodCall) -> Result<Self::Reply, dbus::Error>;
}

impl Bus for Connection {
    type Reply = Message;

    fn call(&self, call: &MethodCall) -> Result<Message, dbus::Error> {
        let message = call.to_message()?;
        self.send_with_reply_and_block(message, REPLY_TIMEOUT)
    }
}

/// Opens a private connection to the system bus.
pub fn connect_system() -> Result<Connection, dbus::Error> {
    Connection::get_private(BusType::System)
}
