use super::*;
use crate::collections::MapKeyType;

impl CodeGenerator<'_> {
    /// The TypeScript type of the property generated for `field`.
    pub(super) fn native_type(&mut self, field: &FieldDescriptorProto) -> Result<String> {
        if let Some(entry) = self.map_entry(field) {
            let key = MapKeyType::from_field_type(entry.key.r#type())
                .ok_or_else(|| self.unsupported_field(field))?;
            let value = self.element_type(&entry.value)?;
            return Ok(format!(
                "ReadonlyMap<{}, {} | null>",
                key.native_type(),
                value
            ));
        }

        let ty = self.element_type(field)?;
        Ok(match field.label() {
            Label::Repeated => format!("{}[]", ty),
            _ => ty,
        })
    }

    fn element_type(&mut self, field: &FieldDescriptorProto) -> Result<String> {
        let ty = match field.r#type() {
            Type::Double
            | Type::Float
            | Type::Int64
            | Type::Uint64
            | Type::Int32
            | Type::Fixed64
            | Type::Fixed32
            | Type::Uint32
            | Type::Sfixed32
            | Type::Sfixed64
            | Type::Sint32
            | Type::Sint64 => "number".to_owned(),
            Type::Bool => "boolean".to_owned(),
            Type::String => "string".to_owned(),
            Type::Bytes => "Uint8Array".to_owned(),
            Type::Message | Type::Enum => self.resolver.resolve(field.name(), field.type_name())?,
            Type::Group => return Err(self.unsupported_field(field)),
        };
        Ok(ty)
    }
}
