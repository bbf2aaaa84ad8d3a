use std::fmt::{Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The backlight pin is not connected (negative pin number).
    InvalidPin(i32),
    /// PWM duty resolution outside `1..=MAX_RESOLUTION_BITS`.
    InvalidResolution(u8),
    /// A GPIO or PWM driver call failed.
    Peripheral {
        op: &'static str,
        source: anyhow::Error,
    },
}

impl Error {
    pub(crate) fn peripheral(op: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |source| Error::Peripheral { op, source }
    }

    /// `true` for failures detected before any hardware access.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::InvalidPin(_) | Error::InvalidResolution(_))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPin(pin) => write!(f, "backlight pin {pin} is not connected"),
            Error::InvalidResolution(bits) => {
                write!(f, "unsupported PWM resolution: {bits} bits")
            }
            Error::Peripheral { op, source } => write!(f, "{op} failed: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Peripheral { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
