//! Binary-crate error type. Manual enum + `From` impls, the same shape as
//! `virtual_dev.rs`'s `Error` — the error surface here (device open/grab
//! failure, uinput creation failure, stream I/O failure) is small enough
//! that a derive-macro error crate buys nothing over hand-rolled `From`
//! conversions.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    DeviceInit(String),
    DeviceGrab(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::DeviceInit(msg) => write!(f, "device initialization failed: {msg}"),
            Error::DeviceGrab(msg) => write!(f, "failed to grab device: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
