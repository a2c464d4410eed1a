use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PduParseErr {
    BufferEnded { field: Option<&'static str> },
    /// Attribute tag unknown to the dictionary, or its declared length runs past the buffer
    MalformedAttribute { id: u8, reason: &'static str },
    MissingAttribute { id: u8 },
    InvalidValue { field: &'static str, value: u64 },
    InconsistentLength { expected: usize, found: usize },
    Inconsistency { field: &'static str, reason: &'static str },
}

impl fmt::Display for PduParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PduParseErr::BufferEnded { field: Some(field) } => write!(f, "buffer ended while reading {}", field),
            PduParseErr::BufferEnded { field: None } => write!(f, "buffer ended"),
            PduParseErr::MalformedAttribute { id, reason } => write!(f, "malformed attribute 0x{:02x}: {}", id, reason),
            PduParseErr::MissingAttribute { id } => write!(f, "mandatory attribute 0x{:02x} missing", id),
            PduParseErr::InvalidValue { field, value } => write!(f, "invalid value {} for {}", value, field),
            PduParseErr::InconsistentLength { expected, found } => write!(f, "inconsistent length: expected {}, found {}", expected, found),
            PduParseErr::Inconsistency { field, reason } => write!(f, "inconsistent {}: {}", field, reason),
        }
    }
}

impl std::error::Error for PduParseErr {}

/// Checks whether a value matches an expected value. If not, returns PduParseErr::InvalidValue
#[macro_export]
macro_rules! expect_value {
    ($value:ident, $expected:expr) => {
        $crate::expect_value!(@inner $value, $expected, stringify!($value))
    };
    ($value:expr, $expected:expr, $field:expr) => {
        $crate::expect_value!(@inner $value, $expected, $field)
    };

    (@inner $value:expr, $expected:expr, $field:expr) => {{
        let val = $value;
        if val == $expected {
            Ok(())
        } else {
            Err($crate::PduParseErr::InvalidValue {
                field: $field,
                value: val.into(),
            })
        }
    }};
}

/// Fetches a mandatory attribute from an AttrList, or returns PduParseErr::MissingAttribute
#[macro_export]
macro_rules! require_attr {
    ($attrs:expr, $id:expr) => {
        $attrs.get($id.into_raw()).ok_or($crate::PduParseErr::MissingAttribute { id: $id.into_raw() })
    };
}
