use serde_json::Value;

pub const REPORT_TITLE: &str = "RAFAEL — Clinical Report";
pub const EXPORT_FILENAME: &str = "rafael-report.pdf";

/// Section order is part of the export contract.
const SECTIONS: [(&str, &str); 7] = [
    ("Summary", "summary"),
    ("Text Reasoning", "text_reasoning"),
    ("Image Findings", "image_findings"),
    ("Integrated Assessment", "integrated_assessment"),
    ("Recommended Next Steps", "next_steps"),
    ("Patient-Friendly Summary", "patient_friendly"),
    ("Confidence", "confidence"),
];

/// Renders any report payload as a flat text document. Total over its input:
/// missing sections (and non-mapping payloads) render as `null`.
pub fn render_report(data: &Value) -> String {
    let mut lines = vec![
        REPORT_TITLE.to_string(),
        String::new(),
        "Sections:".to_string(),
    ];

    for (title, key) in SECTIONS {
        let value = data.get(key).unwrap_or(&Value::Null);
        lines.push(format!("\n== {title} =="));
        lines.push(render_value(value));
    }

    lines.join("\n")
}

/// Top-level scalars render in plain form (strings unquoted); mappings and
/// sequences render as an indented structured dump.
fn render_value(value: &Value) -> String {
    match value {
        Value::Array(_) | Value::Object(_) => {
            let mut out = String::new();
            render_nested(value, 0, &mut out);
            out
        }
        Value::String(s) => s.clone(),
        scalar => scalar.to_string(),
    }
}

/// JSON-style dump with 2-space indentation. Key order is stable: the map is
/// sorted by key. Nested scalars keep their JSON form (strings quoted).
fn render_nested(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                push_indent(out, depth + 1);
                render_nested(item, depth + 1, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                push_indent(out, depth + 1);
                out.push_str(&Value::String(key.clone()).to_string());
                out.push_str(": ");
                render_nested(item, depth + 1, out);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
