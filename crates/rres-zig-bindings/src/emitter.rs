//! Zig source emission
//!
//! Renders enums, wrappers and aliases as Zig text. Every function here is a
//! pure text transform; nothing is written until the whole file is built.

use crate::config::BindgenConfig;
use crate::header::{EnumDefinition, EnumNameMap, FunctionSignature};

/// Emitter for the generated Zig module
pub struct ZigEmitter {
    library_title: String,
    generator_name: String,
}

impl ZigEmitter {
    pub fn new(config: &BindgenConfig) -> Self {
        Self {
            library_title: config.library_title.clone(),
            generator_name: config.generator_name.clone(),
        }
    }

    /// Doc comment block at the top of the file
    pub fn render_header(&self) -> String {
        let mut header = String::new();
        header.push_str(&format!("//! Zig bindings for {}\n", self.library_title));
        header.push_str(&format!("//! Auto-generated by {}\n", self.generator_name));
        header
    }

    /// Imports and the `@cImport` block
    pub fn render_preamble(&self) -> String {
        let mut preamble = String::new();
        preamble.push_str("const std = @import(\"std\");\n");
        preamble.push_str("const build_options = @import(\"build_options\");\n");
        preamble.push('\n');
        preamble.push_str("const c = if (build_options.enable_raylib) @cImport({\n");
        preamble.push_str("    @cInclude(\"raylib.h\");\n");
        preamble.push_str("    @cInclude(\"rres.h\");\n");
        preamble.push_str("    @cInclude(\"rres-raylib.h\");\n");
        preamble.push_str("}) else @cImport({\n");
        preamble.push_str("    @cInclude(\"rres.h\");\n");
        preamble.push_str("});\n");
        preamble.push('\n');
        preamble.push_str("pub const rres_raylib = if (build_options.enable_raylib) c else void;\n");
        preamble
    }

    /// A `c_uint`-backed Zig enum with `toCInt` / `fromCInt`
    ///
    /// Members without an explicit value are left implicit; Zig numbers them
    /// from the previous member exactly like C does. `fromCInt` is an
    /// unchecked `@enumFromInt`: an integer outside the enum is illegal
    /// behavior on the Zig side.
    pub fn render_enum(&self, definition: &EnumDefinition) -> String {
        let mut lines = vec![format!("pub const {} = enum(c_uint) {{", definition.target_name)];

        for member in &definition.members {
            match member.explicit_value {
                Some(value) => lines.push(format!("    {} = {},", member.target_name, value)),
                None => lines.push(format!("    {},", member.target_name)),
            }
        }

        lines.push(String::new());
        lines.push("    pub fn toCInt(self: @This()) c_uint {".to_string());
        lines.push("        return @intFromEnum(self);".to_string());
        lines.push("    }".to_string());
        lines.push(String::new());
        lines.push("    pub fn fromCInt(value: c_uint) @This() {".to_string());
        lines.push("        return @enumFromInt(value);".to_string());
        lines.push("    }".to_string());
        lines.push("};".to_string());

        lines.join("\n")
    }

    /// A wrapper converting enum parameters and an enum return value
    pub fn render_wrapper(&self, signature: &FunctionSignature, enum_map: &EnumNameMap) -> String {
        let mut zig_params = Vec::new();
        let mut conversions = Vec::new();
        let mut call_args = Vec::new();

        for param in &signature.parameters {
            // Pointers to enums keep their C type; only by-value enums are converted
            let zig_enum = match param.pointer_depth {
                0 => enum_map.get(&param.base_type()),
                _ => None,
            };
            match zig_enum {
                Some(zig_enum) => {
                    zig_params.push(format!("{}: {}", param.name, zig_enum));
                    conversions.push(format!("    const c_{} = {}.toCInt();", param.name, param.name));
                    call_args.push(format!("c_{}", param.name));
                }
                None => {
                    zig_params.push(format!("{}: {}", param.name, param.declared_type));
                    call_args.push(param.name.clone());
                }
            }
        }

        let converted_return = enum_map.get(&signature.return_type);
        let return_type = converted_return
            .map(String::as_str)
            .unwrap_or(signature.return_type.as_str());

        let mut lines = vec![format!(
            "pub fn {}({}) {} {{",
            signature.name,
            zig_params.join(", "),
            return_type
        )];
        lines.extend(conversions);

        let call = format!("c.{}({})", signature.name, call_args.join(", "));
        match converted_return {
            Some(zig_enum) => {
                lines.push(format!("    const result = {};", call));
                lines.push(format!("    return {}.fromCInt(result);", zig_enum));
            }
            None if return_type == "void" => lines.push(format!("    {};", call)),
            None => lines.push(format!("    return {};", call)),
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Alias re-exporting a C declaration unchanged
    pub fn render_direct_export(&self, name: &str) -> String {
        format!("pub const {} = c.{};", name, name)
    }

    /// Accessors for the integer-typed enum fields of `rresResourceChunkInfo`
    pub fn render_chunk_info_accessors(&self) -> String {
        let mut helpers = String::new();
        helpers.push_str("// Helper extensions for working with enums\n");
        helpers.push('\n');
        helpers.push_str("/// Helper to set compression type on ResourceChunkInfo using Zig enum\n");
        helpers.push_str("pub fn setCompressionType(info: *rresResourceChunkInfo, comp_type: CompressionType) void {\n");
        helpers.push_str("    info.compType = @intCast(comp_type.toCInt());\n");
        helpers.push_str("}\n");
        helpers.push('\n');
        helpers.push_str("/// Helper to get compression type from ResourceChunkInfo as Zig enum\n");
        helpers.push_str("pub fn getCompressionType(info: rresResourceChunkInfo) CompressionType {\n");
        helpers.push_str("    return CompressionType.fromCInt(info.compType);\n");
        helpers.push_str("}\n");
        helpers.push('\n');
        helpers.push_str("/// Helper to set encryption type on ResourceChunkInfo using Zig enum\n");
        helpers.push_str("pub fn setEncryptionType(info: *rresResourceChunkInfo, cipher_type: EncryptionType) void {\n");
        helpers.push_str("    info.cipherType = @intCast(cipher_type.toCInt());\n");
        helpers.push_str("}\n");
        helpers.push('\n');
        helpers.push_str("/// Helper to get encryption type from ResourceChunkInfo as Zig enum\n");
        helpers.push_str("pub fn getEncryptionType(info: rresResourceChunkInfo) EncryptionType {\n");
        helpers.push_str("    return EncryptionType.fromCInt(info.cipherType);\n");
        helpers.push_str("}\n");
        helpers
    }
}

impl Default for ZigEmitter {
    fn default() -> Self {
        Self::new(&BindgenConfig::default())
    }
}
