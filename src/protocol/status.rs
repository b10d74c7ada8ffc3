//! Response status codes and their error classification
//!
//! Every 16-bit status maps to either success or exactly one
//! [`ServerErrorKind`]. Whether the response value travels with the error is
//! decided by [`ERROR_TABLE`], not by the call site.

use std::fmt;

/// Known response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Status {
    NoError = 0x0000,
    KeyNotFound = 0x0001,
    KeyExists = 0x0002,
    ValueTooLarge = 0x0003,
    InvalidArguments = 0x0004,
    ItemNotStored = 0x0005,
    NonNumericValue = 0x0006,
    WrongVbucket = 0x0007,
    AuthError = 0x0008,
    AuthContinue = 0x0009,
    UnknownCommand = 0x0081,
    OutOfMemory = 0x0082,
    NotSupported = 0x0083,
    InternalError = 0x0084,
    Busy = 0x0085,
    TempFailure = 0x0086,
}

impl Status {
    /// Try to convert a u16 to a known status.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0000 => Some(Status::NoError),
            0x0001 => Some(Status::KeyNotFound),
            0x0002 => Some(Status::KeyExists),
            0x0003 => Some(Status::ValueTooLarge),
            0x0004 => Some(Status::InvalidArguments),
            0x0005 => Some(Status::ItemNotStored),
            0x0006 => Some(Status::NonNumericValue),
            0x0007 => Some(Status::WrongVbucket),
            0x0008 => Some(Status::AuthError),
            0x0009 => Some(Status::AuthContinue),
            0x0081 => Some(Status::UnknownCommand),
            0x0082 => Some(Status::OutOfMemory),
            0x0083 => Some(Status::NotSupported),
            0x0084 => Some(Status::InternalError),
            0x0085 => Some(Status::Busy),
            0x0086 => Some(Status::TempFailure),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        *self == Status::NoError
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NoError => "No error",
            Status::KeyNotFound => "Not found",
            Status::KeyExists => "Data exists for key.",
            Status::ValueTooLarge => "Too large.",
            Status::InvalidArguments => "Invalid arguments",
            Status::ItemNotStored => "Not stored.",
            Status::NonNumericValue => "Non-numeric server-side value for incr or decr",
            Status::WrongVbucket => "Wrong vbucket",
            Status::AuthError => "Auth failure.",
            Status::AuthContinue => "Auth continue",
            Status::UnknownCommand => "Unknown command",
            Status::OutOfMemory => "Out of memory",
            Status::NotSupported => "Not supported",
            Status::InternalError => "Internal error",
            Status::Busy => "Busy",
            Status::TempFailure => "Temporary failure",
        }
    }
}

/// Semantic classification of a non-success status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerErrorKind {
    NotFound,
    Exists,
    TooLarge,
    InvalidArguments,
    NotStored,
    NonNumeric,
    WrongVbucket,
    Auth,
    AuthContinue,
    UnknownCommand,
    OutOfMemory,
    NotSupported,
    Internal,
    Busy,
    TemporaryFailure,
    /// Any status outside the known set
    Other(u16),
}

impl fmt::Display for ServerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServerErrorKind::NotFound => "key not found",
            ServerErrorKind::Exists => "key exists",
            ServerErrorKind::TooLarge => "value too large",
            ServerErrorKind::InvalidArguments => "invalid arguments",
            ServerErrorKind::NotStored => "item not stored",
            ServerErrorKind::NonNumeric => "non-numeric value",
            ServerErrorKind::WrongVbucket => "wrong vbucket",
            ServerErrorKind::Auth => "authentication error",
            ServerErrorKind::AuthContinue => "authentication continue",
            ServerErrorKind::UnknownCommand => "unknown command",
            ServerErrorKind::OutOfMemory => "out of memory",
            ServerErrorKind::NotSupported => "not supported",
            ServerErrorKind::Internal => "internal error",
            ServerErrorKind::Busy => "busy",
            ServerErrorKind::TemporaryFailure => "temporary failure",
            ServerErrorKind::Other(code) => {
                return write!(f, "other server error (status {:#06x})", code)
            }
        };
        f.write_str(s)
    }
}

/// What happens to the response value when a status maps to an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The value is returned to the caller as the error payload
    Surface,
    /// The error is reported with no payload
    Bare,
}

/// Status code → error kind → payload disposition.
///
/// Statuses missing from this table map to [`ServerErrorKind::Other`] with
/// [`Disposition::Surface`].
pub const ERROR_TABLE: &[(u16, ServerErrorKind, Disposition)] = &[
    (0x0001, ServerErrorKind::NotFound, Disposition::Bare),
    (0x0002, ServerErrorKind::Exists, Disposition::Surface),
    (0x0003, ServerErrorKind::TooLarge, Disposition::Surface),
    (0x0004, ServerErrorKind::InvalidArguments, Disposition::Surface),
    (0x0005, ServerErrorKind::NotStored, Disposition::Surface),
    (0x0006, ServerErrorKind::NonNumeric, Disposition::Surface),
    (0x0007, ServerErrorKind::WrongVbucket, Disposition::Surface),
    (0x0008, ServerErrorKind::Auth, Disposition::Surface),
    (0x0009, ServerErrorKind::AuthContinue, Disposition::Surface),
    (0x0081, ServerErrorKind::UnknownCommand, Disposition::Surface),
    (0x0082, ServerErrorKind::OutOfMemory, Disposition::Surface),
    (0x0083, ServerErrorKind::NotSupported, Disposition::Surface),
    (0x0084, ServerErrorKind::Internal, Disposition::Surface),
    (0x0085, ServerErrorKind::Busy, Disposition::Surface),
    (0x0086, ServerErrorKind::TemporaryFailure, Disposition::Surface),
];

/// Map a response status to its error kind, `None` on success.
pub fn status_to_error(status: u16) -> Option<ServerErrorKind> {
    if status == Status::NoError as u16 {
        return None;
    }

    let kind = ERROR_TABLE
        .iter()
        .find(|(code, _, _)| *code == status)
        .map(|(_, kind, _)| *kind)
        .unwrap_or(ServerErrorKind::Other(status));

    Some(kind)
}

/// Payload disposition for an error kind.
pub fn disposition(kind: ServerErrorKind) -> Disposition {
    ERROR_TABLE
        .iter()
        .find(|(_, k, _)| *k == kind)
        .map(|(_, _, d)| *d)
        .unwrap_or(Disposition::Surface)
}

/// Whether errors of this kind carry the response value as a payload.
pub fn is_surface_worthy(kind: ServerErrorKind) -> bool {
    disposition(kind) == Disposition::Surface
}
