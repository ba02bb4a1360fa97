//! Resolution of templates and schemas loaded from disk.

use simport_cli::cli::common::{load_rules, load_schema, load_template};
use simport_cli::core::SimportError;
use simport_cli::resolver::{resolve, resolve_template_dependencies};
use simport_cli::schema::StaticSchema;
use simport_cli::template::Template;
use simport_cli::test_utils::{
    RulesFixture, SchemaFixture, TemplateFixture, column_id, init_test_logging,
};
use tempfile::TempDir;

async fn load(template: &TemplateFixture, schema: &SchemaFixture) -> (Template, StaticSchema) {
    init_test_logging(None);
    let temp = TempDir::new().unwrap();
    let template_path = template.write_to(temp.path()).unwrap();
    let schema_path = schema.write_to(temp.path()).unwrap();
    (load_template(&template_path).await.unwrap(), load_schema(&schema_path).await.unwrap())
}

fn placeholder_keys(template: &Template) -> Vec<String> {
    template.prespecified_values().map(|v| v.table_dot_column().to_string()).collect()
}

#[tokio::test]
async fn test_patient_intake_with_standard_rules() {
    let (mut template, schema) =
        load(&TemplateFixture::patient_with_obs(), &SchemaFixture::openmrs()).await;

    let plan = resolve(&mut template, &schema).unwrap();

    assert_eq!(
        plan.table_order(),
        ["person", "patient", "encounter", "obs", "patient_identifier", "person_name"]
    );

    let headers: Vec<&str> = plan
        .column_order()
        .iter()
        .map(|id| template.column(*id).unwrap().name())
        .collect();
    assert_eq!(
        headers,
        [
            "Gender",
            "Patient",
            "Visit date",
            "Weight",
            "Height",
            "Identifier",
            "Given name",
            "Family name"
        ]
    );

    assert_eq!(
        placeholder_keys(&template),
        [
            "concept.concept_id",
            "encounter_type.encounter_type_id",
            "form.form_id",
            "location.location_id",
            "patient_identifier_type.patient_identifier_type_id",
        ]
    );

    // The template's literal location is kept and shared by every consumer
    let location = template.prespecified_value("location.location_id").unwrap();
    assert_eq!(location.value(), Some("1"));
    let consumers: Vec<_> = location
        .column_prespecified_values()
        .iter()
        .map(|link| template.column(link.column).unwrap().name())
        .collect();
    assert_eq!(consumers, ["Identifier", "Visit date", "Weight", "Height"]);

    // Observations follow the row's encounter and the person
    let weight = template.column(column_id(&template, "Weight")).unwrap();
    let visit = column_id(&template, "Visit date");
    let gender = column_id(&template, "Gender");
    let sources: Vec<_> = weight
        .import_before()
        .iter()
        .map(|e| (e.column_import_first, e.column_name.as_str()))
        .collect();
    assert_eq!(sources, [(gender, "person_id"), (visit, "encounter_id")]);

    // No placeholder for the encounter provider
    let visit_links = template.prespecified_values_for(visit);
    assert!(visit_links.iter().all(|(_, fk)| *fk != "provider_id"));
}

#[tokio::test]
async fn test_site_rules_extend_standard_rules() {
    let (mut template, schema) =
        load(&TemplateFixture::patient_with_obs(), &SchemaFixture::openmrs()).await;

    let temp = TempDir::new().unwrap();
    let rules_path = RulesFixture::drop_lookups().write_to(temp.path()).unwrap();
    let rules = load_rules(&[rules_path], true).await.unwrap();

    resolve_template_dependencies(&mut template, &schema, &rules).unwrap();

    assert_eq!(
        placeholder_keys(&template),
        ["encounter_type.encounter_type_id", "form.form_id", "location.location_id"]
    );
}

#[tokio::test]
async fn test_registration_without_patient() {
    let (mut template, schema) =
        load(&TemplateFixture::registration(), &SchemaFixture::openmrs()).await;

    let plan = resolve(&mut template, &schema).unwrap();

    assert_eq!(plan.table_order(), ["person", "encounter"]);
    let visit = column_id(&template, "Visit date");
    let gender = column_id(&template, "Gender");
    let visit_column = template.column(visit).unwrap();
    assert_eq!(visit_column.import_idx(), Some(2));
    assert_eq!(
        visit_column
            .import_before()
            .iter()
            .map(|e| (e.column_import_first, e.column_name.as_str()))
            .collect::<Vec<_>>(),
        [(gender, "patient_id")]
    );
    assert!(template.prespecified_value("patient.patient_id").is_none());
    assert!(template.prespecified_value("person.person_id").is_none());
}

#[tokio::test]
async fn test_cyclic_schema_is_reported() {
    let (mut template, schema) =
        load(&TemplateFixture::registration(), &SchemaFixture::cyclic()).await;

    // registration imports encounter, which the cyclic schema does not know
    let err = resolve(&mut template, &schema).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SimportError>(),
        Some(SimportError::UnknownTable { table }) if table == "encounter"
    ));

    let mut template = Template::new("names", false);
    template.add_column("Gender", "person", "gender", 0);
    template.add_column("Given name", "person_name", "given_name", 0);

    let err = resolve(&mut template, &schema).unwrap_err();
    assert!(err.to_string().contains("person_name → person → person_name"));
    assert!(!template.is_resolved());
}
