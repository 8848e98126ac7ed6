use prost_types::field_descriptor_proto::Type;

/// How the key of a Protobuf `map` field is carried in a JSON object key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MapKeyType {
    /// `string` keys, used as-is.
    String,
    /// `bool` keys, written as `"true"` / `"false"`.
    Bool,
    /// Every integral key kind, written in decimal.
    Number,
}

impl MapKeyType {
    /// The key type for a map entry's key field, or `None` if protobuf forbids it as a map key.
    pub fn from_field_type(ty: Type) -> Option<Self> {
        match ty {
            Type::String => Some(MapKeyType::String),
            Type::Bool => Some(MapKeyType::Bool),
            Type::Int32
            | Type::Int64
            | Type::Uint32
            | Type::Uint64
            | Type::Sint32
            | Type::Sint64
            | Type::Fixed32
            | Type::Fixed64
            | Type::Sfixed32
            | Type::Sfixed64 => Some(MapKeyType::Number),
            _ => None,
        }
    }

    /// The TypeScript type of the key in the generated `ReadonlyMap`.
    pub fn native_type(&self) -> &'static str {
        match self {
            MapKeyType::String => "string",
            MapKeyType::Bool => "boolean",
            MapKeyType::Number => "number",
        }
    }

    /// Expression turning the map key `key` into a JSON object key.
    pub fn to_wire(&self, key: &str) -> String {
        match self {
            MapKeyType::String => key.to_owned(),
            MapKeyType::Bool | MapKeyType::Number => format!("String({})", key),
        }
    }

    /// Expression turning the JSON object key `key` back into a map key.
    pub fn from_wire(&self, key: &str) -> String {
        match self {
            MapKeyType::String => key.to_owned(),
            MapKeyType::Bool => format!("{} === \"true\"", key),
            MapKeyType::Number => format!("Number({})", key),
        }
    }
}
