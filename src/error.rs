use crate::codec::{DecodeError, EncodeError};
use std::{error::Error as StdError, io};

#[derive(Debug, Error)]
pub enum Error {
    #[error(display = "Failed to connect to system bus")]
    Connect(#[error(source)] dbus::Error),
    #[error(display = "Failed to encode {} request", method)]
    Encode {
        method: &'static str,
        #[error(source)]
        cause:  EncodeError,
    },
    #[error(display = "Failed to issue {} method call", method)]
    Call {
        method: &'static str,
        #[error(source)]
        cause:  dbus::Error,
    },
    #[error(display = "Failed to parse response message from {}", method)]
    Decode {
        method: &'static str,
        #[error(source)]
        cause:  DecodeError,
    },
    #[error(display = "job {} did not complete within the timeout", job)]
    JobIncomplete { job: String },
    #[error(display = "job {} failed with exit code {}: {}", job, rc, message)]
    JobFailed { job: String, rc: i32, message: String },
    #[error(display = "failed to write the look-up result")]
    Output(#[error(source)] io::Error),
}

impl Error {
    /// The D-Bus error name behind a connection or call failure.
    pub fn dbus_name(&self) -> Option<&str> {
        match self {
            Error::Connect(why) | Error::Call { cause: why, .. } => why.name(),
            _ => None,
        }
    }
}

/// Renders an error followed by every cause in its chain.
pub fn describe(why: &dyn StdError) -> String {
    let mut message = format!("{}", why);
    let mut cause = why.source();
    while let Some(source) = cause {
        message.push_str(&format!(": {}", source));
        cause = source.source();
    }

    message
}
