use core::fmt;

/// Side of a [`Rendezvous`](crate::channel::Rendezvous) an operation was issued from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Producer,
    Consumer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Producer => f.write_str("producer"),
            Role::Consumer => f.write_str("consumer"),
        }
    }
}

/// Errors reported by the rendezvous channel
///
/// Reaching the end of a stream is never an error: it is signaled with
/// `None`, both by [`Flattener`](crate::flatten::Flattener) and by the
/// [`handoff`](crate::handoff) helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A second `send` (or `receive`) was issued while another one of the same
    /// role was still in flight
    ///
    /// The rejected operation leaves the channel untouched.
    ConcurrentAccessViolation { role: Role },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConcurrentAccessViolation { role } => write!(
                f,
                "concurrent access violation: another {role} operation is already in flight"
            ),
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T, E = Error> = core::result::Result<T, E>;
