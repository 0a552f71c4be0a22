//! Read-only projections of a document snapshot.
//!
//! Both projections here are pure text functions of the snapshot and are
//! recomputed on every change; they carry no state of their own. The third
//! projection (the rendered form) lives with the GUI in
//! `gui/components/form_preview.rs`.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::tree::DocNode;

/// Canonical structural text of the snapshot: declaration key order,
/// 4-space indentation. This is the JSON the user inspects and the text
/// substituted into the generated editor code.
pub fn serialized(doc: &DocNode) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Generated config-editor source: fixed boilerplate with the serialized
/// document substituted at a single point. Byte-stable for a given document,
/// so regenerating for an unchanged snapshot produces identical text.
pub fn editor_code(doc: &DocNode) -> Result<String, serde_json::Error> {
    let definition = serialized(doc)?;
    Ok(format!(
        "import React from 'react';\n\
         import {{ PluginOptionsEditorProps }} from 'plugin-sdk';\n\
         import {{ NoCodeConfigComponent, NoCodeConfigProps }} from 'nocode-utils';\n\
         \n\
         type NoCodeJsonPluginOptions = {{}};\n\
         type ConfigEditorProps = PluginOptionsEditorProps<NoCodeJsonPluginOptions>;\n\
         \n\
         export const ConfigEditor = (props: ConfigEditorProps) => {{\n\
         \x20 return <NoCodeConfigComponent {{...props}} editorProps={{{definition}}}/>;\n\
         }};\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ConfigDocument;
    use crate::ops;
    use pretty_assertions::assert_eq;

    const SEED_JSON: &str = r#"{
    "general": {
        "useCollapse": true
    },
    "defaultHttpSettings": {
        "enabled": false,
        "defaultUrl": ""
    },
    "properties": [
        {
            "key": "apiKey",
            "type": "string",
            "label": "API Key"
        },
        {
            "key": "region",
            "type": "string",
            "label": "Region"
        }
    ]
}"#;

    #[test]
    fn seed_serialization_matches_golden_snapshot() {
        let snapshot = ConfigDocument::seed().to_snapshot().unwrap();
        assert_eq!(serialized(&snapshot).unwrap(), SEED_JSON);
    }

    #[test]
    fn serialization_keeps_declaration_order_after_edits() {
        let snapshot = ConfigDocument::seed().to_snapshot().unwrap();
        let snapshot = ops::toggle_options(&snapshot, 0, true).unwrap();
        let text = serialized(&snapshot).unwrap();
        // "options" lands after the declared attributes of the field, and
        // the root keys keep their order
        let general = text.find("\"general\"").unwrap();
        let http = text.find("\"defaultHttpSettings\"").unwrap();
        let properties = text.find("\"properties\"").unwrap();
        assert!(general < http && http < properties);
        assert!(text.contains("\"options\": [\n"));
    }

    #[test]
    fn editor_code_is_byte_stable_and_embeds_the_definition() {
        let snapshot = ConfigDocument::seed().to_snapshot().unwrap();
        let first = editor_code(&snapshot).unwrap();
        let second = editor_code(&snapshot).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("import React from 'react';\n"));
        assert!(first.contains(SEED_JSON));
        assert!(first.contains("export const ConfigEditor"));
    }

    #[test]
    fn editor_code_tracks_document_changes() {
        let snapshot = ConfigDocument::seed().to_snapshot().unwrap();
        let edited = ops::add_field(&snapshot).unwrap();
        assert_ne!(editor_code(&snapshot).unwrap(), editor_code(&edited).unwrap());
    }
}
