use strum::{Display, EnumString, IntoStaticStr};

/// A comparable request field, in the order [`Field::ALL`] checks them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    Host,
    Port,
    Username,
    Password,
    Path,
    Scheme,
    ProtocolVersion,
    Method,
    Headers,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Host,
        Field::Port,
        Field::Username,
        Field::Password,
        Field::Path,
        Field::Scheme,
        Field::ProtocolVersion,
        Field::Method,
        Field::Headers,
    ];
}
