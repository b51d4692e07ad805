use serde_json::{Map, Value};
use std::path::Path;

pub fn run(report: &Path, input: Option<&Path>, config: Option<&Path>) -> anyhow::Result<()> {
    let payload = super::read_input(input)?;
    let merger = ukmacro_store::open_merger(config)?;
    let merged = ukmacro_store::merge_report(&merger, report, &payload)?;

    println!("{}", summarize(report, &merged));
    Ok(())
}

/// Series sizes per section, for a one-line confirmation
fn summarize(report: &Path, merged: &str) -> Value {
    let doc: Value = serde_json::from_str(merged).unwrap_or(Value::Null);

    let mut output = serde_json::json!({
        "report": report.display().to_string(),
        "updated_at": doc.pointer("/metadata/updated_at").cloned().unwrap_or(Value::Null),
    });

    for section in ["economic_indicators", "report_summaries"] {
        let counts: Map<String, Value> = doc
            .get(section)
            .and_then(Value::as_object)
            .map(|series| {
                series
                    .iter()
                    .map(|(key, records)| {
                        let len = records.as_array().map_or(0, Vec::len);
                        (key.clone(), serde_json::json!(len))
                    })
                    .collect()
            })
            .unwrap_or_default();
        output[section] = Value::Object(counts);
    }

    output
}
