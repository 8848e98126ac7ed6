use std::collections::HashSet;

use prost_types::{EnumDescriptorProto, EnumValueDescriptorProto};

use super::*;

impl<'a> CodeGenerator<'a> {
    pub(super) fn push_enums(&mut self, enum_types: &'a [EnumDescriptorProto]) {
        for desc in enum_types {
            self.push_enum(desc);
        }
    }

    /// Pushes the enums nested in `messages`, and in their nested messages, depth-first.
    pub(super) fn push_nested_enums(&mut self, messages: &'a [DescriptorProto]) {
        for message in messages {
            self.type_path.push(message.name());
            self.push_enums(&message.enum_type);
            self.push_nested_enums(&message.nested_type);
            self.type_path.pop();
        }
    }

    fn push_enum(&mut self, desc: &EnumDescriptorProto) {
        let enum_name = self.flat_name(desc.name());
        debug!("  enum: {:?}", enum_name);

        self.buf.push_str(&format!("export enum {} {{\n", enum_name));
        for value in &desc.value {
            self.buf
                .push_str(&format!("\t{} = {},\n", value.name(), value.number()));
        }
        self.buf.push_str("}\n\n");

        self.push_enum_json_namespace(&enum_name, &desc.value);
    }

    /// The `ToProtoJSON` and `Parse` helpers, merged into the enum's namespace.
    fn push_enum_json_namespace(&mut self, enum_name: &str, values: &[EnumValueDescriptorProto]) {
        self.buf
            .push_str(&format!("export namespace {} {{\n", enum_name));

        self.buf.push_str(&format!(
            "\texport function ToProtoJSON(value?: {}): string | number | undefined {{\n",
            enum_name
        ));
        self.buf.push_str("\t\tswitch (value) {\n");
        // Aliases share a number; the first name declared for it is the JSON name.
        let mut numbers = HashSet::new();
        for value in values
            .iter()
            .filter(|value| value.number() != 0 && numbers.insert(value.number()))
        {
            self.buf.push_str(&format!(
                "\t\t\tcase {}:\n\t\t\t\treturn \"{}\";\n",
                value.number(),
                value.name()
            ));
        }
        self.buf.push_str("\t\t\tdefault:\n");
        self.buf
            .push_str("\t\t\t\treturn value === 0 ? undefined : value;\n");
        self.buf.push_str("\t\t}\n");
        self.buf.push_str("\t}\n\n");

        self.buf.push_str(&format!(
            "\texport function Parse(data: any): {} {{\n",
            enum_name
        ));
        self.buf.push_str("\t\tswitch (data) {\n");
        self.buf
            .push_str("\t\t\tcase undefined:\n\t\t\tcase null:\n\t\t\tcase \"\":\n\t\t\t\treturn 0;\n");
        for value in values {
            self.buf.push_str(&format!(
                "\t\t\tcase \"{}\":\n\t\t\t\treturn {};\n",
                value.name(),
                value.number()
            ));
        }
        self.buf.push_str("\t\t}\n");
        self.buf
            .push_str("\t\tif (typeof data === \"number\") {\n\t\t\treturn data;\n\t\t}\n");
        self.buf.push_str(&format!(
            "\t\tthrow new Error(\"unknown value \" + data + \" for enum {}\");\n",
            enum_name
        ));
        self.buf.push_str("\t}\n");

        self.buf.push_str("}\n\n");
    }
}
