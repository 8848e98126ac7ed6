use log::warn;

use super::marshal::Codec;
use super::*;
use crate::ident::member;

/// A field of a generated class, with everything needed to emit its property and marshalling.
struct ClassField<'f> {
    json_name: &'f str,
    proto_name: &'f str,
    native_type: String,
    codec: Option<Codec>,
}

impl ClassField<'_> {
    /// Reads the field from a parsed JSON object, under either of the names proto3 JSON accepts.
    fn read_expr(&self) -> String {
        let json = member("data", self.json_name);
        if self.json_name == self.proto_name {
            json
        } else {
            format!("({} ?? {})", json, member("data", self.proto_name))
        }
    }
}

impl<'a> CodeGenerator<'a> {
    pub(super) fn push_messages(&mut self, message_types: &'a [DescriptorProto]) -> Result<()> {
        for message in message_types {
            self.push_message(message)?;
        }
        Ok(())
    }

    fn push_message(&mut self, message: &'a DescriptorProto) -> Result<()> {
        let class_name = self.flat_name(message.name());
        debug!("  message: {:?}", class_name);

        let fields = self.resolve_class_fields(&class_name, message)?;

        self.buf.push_str(&format!(
            "export class {} extends Object {{\n",
            class_name
        ));
        for field in &fields {
            self.buf.push_str(&format!(
                "\tpublic {}?: {};\n",
                field.json_name, field.native_type
            ));
        }
        if !fields.is_empty() {
            self.buf.push('\n');
        }

        self.buf
            .push_str("\tpublic async ToProtoJSON(): Promise<Object> {\n");
        self.buf.push_str("\t\treturn {\n");
        for field in &fields {
            if let Some(codec) = &field.codec {
                let property = format!("this.{}", field.json_name);
                self.buf.push_str(&format!(
                    "\t\t\t{}: {},\n",
                    field.json_name,
                    codec.to_wire(&property)
                ));
            }
        }
        self.buf.push_str("\t\t};\n");
        self.buf.push_str("\t}\n\n");

        self.buf.push_str(&format!(
            "\tpublic static async Parse(data: any): Promise<{}> {{\n",
            class_name
        ));
        self.buf
            .push_str(&format!("\t\tconst res = new {}();\n", class_name));
        for field in &fields {
            if let Some(codec) = &field.codec {
                self.buf.push_str(&format!(
                    "\t\tres.{} = {};\n",
                    field.json_name,
                    codec.from_wire(&field.read_expr())
                ));
            }
        }
        self.buf.push_str("\t\treturn res;\n");
        self.buf.push_str("\t}\n");
        self.buf.push_str("}\n\n");

        self.type_path.push(message.name());
        for nested in message.nested_type.iter().filter(|nested| !is_map_entry(nested)) {
            self.push_message(nested)?;
        }
        self.type_path.pop();
        Ok(())
    }

    fn resolve_class_fields(
        &mut self,
        class_name: &str,
        message: &'a DescriptorProto,
    ) -> Result<Vec<ClassField<'a>>> {
        let mut fields = Vec::with_capacity(message.field.len());
        for field in &message.field {
            if is_null_value(field) {
                debug!("    skipping NullValue field {:?}", field.name());
                continue;
            }

            let native_type = self.native_type(field)?;
            let codec = self.synthesize(field)?;
            if codec.is_none() {
                warn!(
                    "{}: JSON marshalling of {}.{} ({}) is not supported yet, skipping it",
                    self.file.name(),
                    class_name,
                    field.name(),
                    native_type
                );
            }

            fields.push(ClassField {
                json_name: match field.json_name() {
                    "" => field.name(),
                    json_name => json_name,
                },
                proto_name: field.name(),
                native_type,
                codec,
            });
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor_index::DescriptorIndex;
    use crate::test_utils::*;
    use crate::Config;
    use pretty_assertions::assert_eq;

    fn push_messages(files: &[FileDescriptorProto]) -> String {
        let config = Config::new();
        let index = DescriptorIndex::build(files).unwrap();
        let context = Context::new(&config, index);
        let file = &files[0];
        let mut code_gen = CodeGenerator {
            context: &context,
            file,
            resolver: Resolver::new(context.index(), file),
            type_path: Vec::new(),
            buf: String::new(),
        };
        code_gen.push_messages(&file.message_type).unwrap();
        code_gen.buf
    }

    #[test]
    fn test_message_class() {
        let mut file = file("widget.proto", "acme", "@acme/acme");
        file.message_type = vec![message(
            "Widget",
            vec![
                field("name", 1, Type::String),
                field("widget_id", 2, Type::Int64),
                typed_field("part", 3, Type::Message, ".acme.Part"),
            ],
        )];
        file.message_type.push(message("Part", vec![]));

        assert_eq!(
            push_messages(&[file]),
            r#"export class Widget extends Object {
	public name?: string;
	public widgetId?: number;
	public part?: Part;

	public async ToProtoJSON(): Promise<Object> {
		return {
			name: this.name,
			widgetId: this.widgetId === undefined || this.widgetId === null ? undefined : this.widgetId.toString(),
			part: this.part === undefined || this.part === null ? undefined : await this.part.ToProtoJSON(),
		};
	}

	public static async Parse(data: any): Promise<Widget> {
		const res = new Widget();
		res.name = data["name"];
		res.widgetId = (data["widgetId"] ?? data["widget_id"]) === undefined || (data["widgetId"] ?? data["widget_id"]) === null ? undefined : Number((data["widgetId"] ?? data["widget_id"]));
		res.part = data["part"] === undefined || data["part"] === null ? undefined : await Part.Parse(data["part"]);
		return res;
	}
}

export class Part extends Object {
	public async ToProtoJSON(): Promise<Object> {
		return {
		};
	}

	public static async Parse(data: any): Promise<Part> {
		const res = new Part();
		return res;
	}
}

"#
        );
    }

    #[test]
    fn test_nested_messages_follow_their_parent() {
        let mut inner = message("Inner", vec![]);
        inner.nested_type = vec![message("Deepest", vec![])];
        let mut outer = message(
            "Outer",
            vec![map_field("labels", 1, ".acme.Outer.LabelsEntry")],
        );
        outer.nested_type = vec![
            map_entry("LabelsEntry", Type::String, field("value", 2, Type::String)),
            inner,
        ];
        let mut file = file("nested.proto", "acme", "@acme/acme");
        file.message_type = vec![outer, message("Sibling", vec![])];

        let generated = push_messages(&[file]);
        let classes: Vec<_> = generated
            .lines()
            .filter(|line| line.starts_with("export class"))
            .collect();
        assert_eq!(
            classes,
            [
                "export class Outer extends Object {",
                "export class Outer__Inner extends Object {",
                "export class Outer__Inner__Deepest extends Object {",
                "export class Sibling extends Object {",
            ]
        );
        assert!(generated.contains("\tpublic labels?: ReadonlyMap<string, string | null>;\n"));
    }

    #[test]
    fn test_skipped_fields() {
        let mut file = file("skips.proto", "acme", "@acme/acme");
        file.message_type = vec![message(
            "Holder",
            vec![
                typed_field("nothing", 1, Type::Enum, ".google.protobuf.NullValue"),
                typed_field("mood", 2, Type::Enum, ".acme.Mood"),
            ],
        )];
        file.enum_type = vec![enumeration("Mood", &[("CALM", 0)])];

        let generated = push_messages(&[file]);
        assert!(!generated.contains("nothing"));
        assert!(generated.contains("\tpublic mood?: Mood;\n"));
        assert!(!generated.contains("this.mood"));
        assert!(!generated.contains("res.mood"));
    }

    #[test]
    fn test_enum_collections_are_declared_but_not_marshalled() {
        let mut holder = message(
            "Holder",
            vec![
                repeated(typed_field("moods", 1, Type::Enum, ".acme.Mood")),
                map_field("mood_by_name", 2, ".acme.Holder.MoodByNameEntry"),
                field("count", 3, Type::Int32),
            ],
        );
        holder.nested_type = vec![map_entry(
            "MoodByNameEntry",
            Type::String,
            typed_field("value", 2, Type::Enum, ".acme.Mood"),
        )];
        let mut file = file("collections.proto", "acme", "@acme/acme");
        file.message_type = vec![holder];
        file.enum_type = vec![enumeration("Mood", &[("CALM", 0)])];

        let generated = push_messages(&[file]);
        assert!(generated.contains("\tpublic moods?: Mood[];\n"));
        assert!(generated.contains("\tpublic moodByName?: ReadonlyMap<string, Mood | null>;\n"));
        assert!(!generated.contains("this.moods"));
        assert!(!generated.contains("res.moods"));
        assert!(!generated.contains("this.moodByName"));
        assert!(!generated.contains("res.moodByName"));
        assert!(generated.contains("\t\t\tcount: this.count,\n"));
        assert!(generated.contains("\t\tres.count = data[\"count\"];\n"));
    }
}
