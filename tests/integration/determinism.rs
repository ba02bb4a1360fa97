//! Resolution output must be identical for identical inputs.

use simport_cli::resolver::resolve;
use simport_cli::template::Template;
use simport_cli::test_utils::{openmrs_schema, template_with_columns};

const COLUMNS: &[(&str, &str, &str, i32)] = &[
    ("Weight", "obs", "value_numeric", 1),
    ("Height", "obs", "value_numeric", 2),
    ("Identifier", "patient_identifier", "identifier", 0),
    ("Given name", "person_name", "given_name", 0),
    ("Gender", "person", "gender", 0),
    ("Patient voided", "patient", "voided", 0),
    ("Visit date", "encounter", "encounter_datetime", 0),
    ("Enrolled", "patient_program", "date_enrolled", 0),
    ("Address", "person_address", "address1", 0),
];

/// Everything resolution produces, keyed by spreadsheet header.
fn snapshot(template: &Template) -> Vec<String> {
    let name = |id| template.column(id).map(|c| c.name().to_string()).unwrap();

    let mut lines: Vec<String> = template
        .columns()
        .iter()
        .map(|c| format!("{} idx={:?}", c.name(), c.import_idx()))
        .collect();
    lines.extend(template.edges().map(|e| {
        format!("{} -> {} via {}", name(e.column_import_first), name(e.column_import_next), e.column_name)
    }));
    for value in template.prespecified_values() {
        for link in value.column_prespecified_values() {
            lines.push(format!("{} <- {} via {}", value.table_dot_column(), name(link.column), link.column_name));
        }
    }
    lines.sort();
    lines
}

#[test]
fn test_repeated_resolution_is_identical() {
    let schema = openmrs_schema();
    let mut baseline = template_with_columns("intake", true, COLUMNS);
    let baseline_plan = resolve(&mut baseline, &schema).unwrap();

    for _ in 0..10 {
        let mut template = template_with_columns("intake", true, COLUMNS);
        let plan = resolve(&mut template, &schema).unwrap();
        assert_eq!(plan, baseline_plan);
        assert_eq!(snapshot(&template), snapshot(&baseline));
    }
}

#[test]
fn test_declaration_order_does_not_change_the_plan() {
    let schema = openmrs_schema();
    let mut forward = template_with_columns("intake", true, COLUMNS);
    let forward_plan = resolve(&mut forward, &schema).unwrap();

    let mut reversed_columns = COLUMNS.to_vec();
    reversed_columns.reverse();
    let mut reversed = template_with_columns("intake", true, &reversed_columns);
    let reversed_plan = resolve(&mut reversed, &schema).unwrap();

    assert_eq!(forward_plan.table_order(), reversed_plan.table_order());
    assert_eq!(snapshot(&forward), snapshot(&reversed));
}
