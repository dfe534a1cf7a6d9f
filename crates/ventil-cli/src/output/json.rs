use serde_json::json;
use ventil_core::error::VentilError;
use ventil_core::reference::ReferenceSection;
use ventil_core::trace::ColumnDecision;
use ventil_core::AnalysisReport;

pub fn print_report(
    report: &AnalysisReport,
    reference: Option<&[ReferenceSection]>,
) -> Result<(), VentilError> {
    let json = match reference {
        Some(sections) => {
            let mut value = serde_json::to_value(report)?;
            if let Some(obj) = value.as_object_mut() {
                obj.insert("reference".to_string(), serde_json::to_value(sections)?);
            }
            serde_json::to_string_pretty(&value)?
        }
        None => serde_json::to_string_pretty(report)?,
    };
    println!("{json}");
    Ok(())
}

pub fn print_columns(sections: &[(String, Vec<ColumnDecision>)]) -> Result<(), VentilError> {
    let value: Vec<_> = sections
        .iter()
        .map(|(source, decisions)| json!({ "source": source, "columns": decisions }))
        .collect();
    let json = serde_json::to_string_pretty(&value)?;
    println!("{json}");
    Ok(())
}
