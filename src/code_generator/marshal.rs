//! Conversion expressions between the generated classes and canonical proto3 JSON.

use super::*;
use crate::collections::MapKeyType;

/// How one field's value is carried in canonical proto3 JSON.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Codec {
    /// Booleans, strings and numbers of at most 32 bits are JSON values as they are.
    Identity,
    /// 64-bit integers are decimal strings.
    Int64,
    /// Bytes are base64 strings.
    Bytes,
    /// A message, or well-known type, with the given TypeScript name.
    Message(String),
    Repeated(Box<Codec>),
    Map { key: MapKeyType, value: Box<Codec> },
}

impl Codec {
    fn needs_await(&self) -> bool {
        match self {
            Codec::Message(_) => true,
            Codec::Repeated(element) => element.needs_await(),
            Codec::Map { value, .. } => value.needs_await(),
            Codec::Identity | Codec::Int64 | Codec::Bytes => false,
        }
    }

    /// Expression converting the property `expr` into its JSON value.
    pub fn to_wire(&self, expr: &str) -> String {
        match self {
            Codec::Identity => expr.to_owned(),
            Codec::Repeated(element) => {
                lift_elements(element, expr, |element, e| element.to_wire_present(e))
            }
            _ => guard(expr, &self.to_wire_present(expr)),
        }
    }

    /// Expression converting the JSON value `expr` into the property's value.
    pub fn from_wire(&self, expr: &str) -> String {
        match self {
            Codec::Identity => expr.to_owned(),
            Codec::Repeated(element) => {
                lift_elements(element, expr, |element, e| element.from_wire_present(e))
            }
            _ => guard(expr, &self.from_wire_present(expr)),
        }
    }

    fn to_wire_present(&self, v: &str) -> String {
        match self {
            Codec::Identity => v.to_owned(),
            Codec::Int64 => format!("{}.toString()", v),
            Codec::Bytes => format!(
                "btoa(Array.from({}, (b) => String.fromCharCode(b)).join(\"\"))",
                v
            ),
            Codec::Message(_) => format!("await {}.ToProtoJSON()", v),
            Codec::Repeated(element) => {
                lift_elements(element, v, |element, e| element.to_wire_present(e))
            }
            Codec::Map { key, value } => {
                let entry = format!(
                    "[{}, {}]",
                    key.to_wire("k"),
                    nullable(value, value.to_wire_present("e"))
                );
                if value.needs_await() {
                    format!(
                        "Object.fromEntries(await Promise.all(Array.from({}.entries(), async ([k, e]) => {})))",
                        v, entry
                    )
                } else {
                    format!(
                        "Object.fromEntries(Array.from({}.entries(), ([k, e]) => {}))",
                        v, entry
                    )
                }
            }
        }
    }

    fn from_wire_present(&self, v: &str) -> String {
        match self {
            Codec::Identity => v.to_owned(),
            Codec::Int64 => format!("Number({})", v),
            // Accepts the URL-safe alphabet and missing padding too.
            Codec::Bytes => format!(
                "Uint8Array.from(atob({v}.replace(/-/g, \"+\").replace(/_/g, \"/\").padEnd(Math.ceil({v}.length / 4) * 4, \"=\")), (c) => c.charCodeAt(0))",
                v = v
            ),
            Codec::Message(type_name) => format!("await {}.Parse({})", type_name, v),
            Codec::Repeated(element) => {
                lift_elements(element, v, |element, e| element.from_wire_present(e))
            }
            Codec::Map { key, value } => {
                let entry = format!(
                    "[{}, {}] as const",
                    key.from_wire("k"),
                    nullable(value, value.from_wire_present("e"))
                );
                if value.needs_await() {
                    format!(
                        "new Map(await Promise.all(Object.entries({}).map(async ([k, e]) => {})))",
                        v, entry
                    )
                } else {
                    format!("new Map(Object.entries({}).map(([k, e]) => {}))", v, entry)
                }
            }
        }
    }
}

/// `undefined` and `null` stay `undefined`; anything else is converted.
fn guard(expr: &str, converted: &str) -> String {
    format!(
        "{} === undefined || {} === null ? undefined : {}",
        expr, expr, converted
    )
}

/// Map values keep an explicit `null`.
fn nullable(codec: &Codec, converted: String) -> String {
    match codec {
        Codec::Identity => converted,
        _ => format!("e === null ? null : {}", converted),
    }
}

/// Applies `convert` to every element of the sequence `expr`; an absent sequence is empty.
fn lift_elements(element: &Codec, expr: &str, convert: impl Fn(&Codec, &str) -> String) -> String {
    let list = format!("({} ?? [])", expr);
    match element {
        Codec::Identity => list,
        _ if element.needs_await() => format!(
            "await Promise.all({}.map(async (e) => {}))",
            list,
            convert(element, "e")
        ),
        _ => format!("{}.map((e) => {})", list, convert(element, "e")),
    }
}

impl CodeGenerator<'_> {
    /// The codec of `field`, or `None` if its marshalling is not supported yet.
    pub(super) fn synthesize(&mut self, field: &FieldDescriptorProto) -> Result<Option<Codec>> {
        if let Some(entry) = self.map_entry(field) {
            let key = MapKeyType::from_field_type(entry.key.r#type())
                .ok_or_else(|| self.unsupported_field(field))?;
            let value = self.element_codec(&entry.value)?;
            return Ok(value.map(|value| Codec::Map {
                key,
                value: Box::new(value),
            }));
        }

        let codec = self.element_codec(field)?;
        Ok(match field.label() {
            Label::Repeated => codec.map(|element| Codec::Repeated(Box::new(element))),
            _ => codec,
        })
    }

    fn element_codec(&mut self, field: &FieldDescriptorProto) -> Result<Option<Codec>> {
        let codec = match field.r#type() {
            Type::Bool
            | Type::String
            | Type::Double
            | Type::Float
            | Type::Int32
            | Type::Uint32
            | Type::Fixed32
            | Type::Sfixed32
            | Type::Sint32 => Codec::Identity,
            Type::Int64 | Type::Uint64 | Type::Fixed64 | Type::Sfixed64 | Type::Sint64 => {
                Codec::Int64
            }
            Type::Bytes => Codec::Bytes,
            Type::Message => {
                Codec::Message(self.resolver.resolve(field.name(), field.type_name())?)
            }
            Type::Enum => return Ok(None),
            Type::Group => return Err(self.unsupported_field(field)),
        };
        Ok(Some(codec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message(name: &str) -> Codec {
        Codec::Message(name.to_owned())
    }

    #[test]
    fn test_identity() {
        assert_eq!("this.name", Codec::Identity.to_wire("this.name"));
        assert_eq!(r#"data["name"]"#, Codec::Identity.from_wire(r#"data["name"]"#));
    }

    #[test]
    fn test_int64() {
        assert_eq!(
            "this.id === undefined || this.id === null ? undefined : this.id.toString()",
            Codec::Int64.to_wire("this.id")
        );
        assert_eq!(
            "v === undefined || v === null ? undefined : Number(v)",
            Codec::Int64.from_wire("v")
        );
    }

    #[test]
    fn test_bytes() {
        assert_eq!(
            r#"v === undefined || v === null ? undefined : btoa(Array.from(v, (b) => String.fromCharCode(b)).join(""))"#,
            Codec::Bytes.to_wire("v")
        );
        assert!(!Codec::Bytes.to_wire("v").contains("..."));
        assert_eq!(
            r#"v === undefined || v === null ? undefined : Uint8Array.from(atob(v.replace(/-/g, "+").replace(/_/g, "/").padEnd(Math.ceil(v.length / 4) * 4, "=")), (c) => c.charCodeAt(0))"#,
            Codec::Bytes.from_wire("v")
        );
    }

    #[test]
    fn test_repeated_bytes() {
        let blobs = Codec::Repeated(Box::new(Codec::Bytes));
        assert_eq!(
            r#"(v ?? []).map((e) => btoa(Array.from(e, (b) => String.fromCharCode(b)).join("")))"#,
            blobs.to_wire("v")
        );
        assert_eq!(
            r#"(v ?? []).map((e) => Uint8Array.from(atob(e.replace(/-/g, "+").replace(/_/g, "/").padEnd(Math.ceil(e.length / 4) * 4, "=")), (c) => c.charCodeAt(0)))"#,
            blobs.from_wire("v")
        );
    }

    #[test]
    fn test_message() {
        assert_eq!(
            "v === undefined || v === null ? undefined : await v.ToProtoJSON()",
            message("pkg__T").to_wire("v")
        );
        assert_eq!(
            "v === undefined || v === null ? undefined : await pkg__T.Parse(v)",
            message("pkg__T").from_wire("v")
        );
    }

    #[test]
    fn test_repeated() {
        let ints = Codec::Repeated(Box::new(Codec::Identity));
        assert_eq!("(v ?? [])", ints.to_wire("v"));
        assert_eq!("(v ?? [])", ints.from_wire("v"));

        let longs = Codec::Repeated(Box::new(Codec::Int64));
        assert_eq!("(v ?? []).map((e) => e.toString())", longs.to_wire("v"));
        assert_eq!("(v ?? []).map((e) => Number(e))", longs.from_wire("v"));

        let messages = Codec::Repeated(Box::new(message("T")));
        assert_eq!(
            "await Promise.all((v ?? []).map(async (e) => await e.ToProtoJSON()))",
            messages.to_wire("v")
        );
        assert_eq!(
            "await Promise.all((v ?? []).map(async (e) => await T.Parse(e)))",
            messages.from_wire("v")
        );
    }

    #[test]
    fn test_map() {
        let strings = Codec::Map {
            key: MapKeyType::Number,
            value: Box::new(Codec::Identity),
        };
        assert_eq!(
            "v === undefined || v === null ? undefined : Object.fromEntries(Array.from(v.entries(), ([k, e]) => [String(k), e]))",
            strings.to_wire("v")
        );
        assert_eq!(
            "v === undefined || v === null ? undefined : new Map(Object.entries(v).map(([k, e]) => [Number(k), e] as const))",
            strings.from_wire("v")
        );

        let messages = Codec::Map {
            key: MapKeyType::String,
            value: Box::new(message("T")),
        };
        assert_eq!(
            "v === undefined || v === null ? undefined : Object.fromEntries(await Promise.all(Array.from(v.entries(), async ([k, e]) => [k, e === null ? null : await e.ToProtoJSON()])))",
            messages.to_wire("v")
        );
        assert_eq!(
            "v === undefined || v === null ? undefined : new Map(await Promise.all(Object.entries(v).map(async ([k, e]) => [k, e === null ? null : await T.Parse(e)] as const)))",
            messages.from_wire("v")
        );
    }
}
