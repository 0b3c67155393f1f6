//! Checks that a volume group created through the lvmdbus1 service can be
//! looked up by name as soon as the create call returns.

#[macro_use]
extern crate err_derive;
#[macro_use]
extern crate log;

pub mod bus;
pub mod codec;
mod config;
mod error;
pub mod job;
pub mod lookup;
pub mod manager;
pub mod vg;


pub use self::{
    config::Config,
    error::{describe, Error},
    lookup::{run, Outcome, Removal, Report},
};
