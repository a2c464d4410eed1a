/// Declares a `#[repr(u8)]` enum together with the conversions every OML code table needs:
/// `TryFrom<u8>` (unknown values are `Err(())`), `into_raw()`, `From<E> for u8`,
/// a `name()` lookup and a `Display` impl printing that name.
macro_rules! oml_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $str:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $val, )*
        }

        impl std::convert::TryFrom<u8> for $name {
            type Error = ();
            fn try_from(x: u8) -> Result<Self, Self::Error> {
                match x {
                    $( $val => Ok($name::$variant), )*
                    _ => Err(()),
                }
            }
        }

        impl $name {
            /// Convert this enum back into the raw integer value
            pub fn into_raw(self) -> u8 {
                self as u8
            }

            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $str, )*
                }
            }
        }

        impl From<$name> for u8 {
            fn from(e: $name) -> Self { e.into_raw() }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.name())
            }
        }
    };
}

pub mod bs11;
pub mod discriminator;
pub mod event_type;
pub mod ipaccess_msg_type;
pub mod nack_cause;
pub mod nm_attr;
pub mod nm_msg_type;
pub mod state_names;
