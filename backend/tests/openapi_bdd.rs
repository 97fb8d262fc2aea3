//! Behaviour tests for the generated OpenAPI document.

use std::sync::Mutex;

use coursenote::doc::ApiDoc;
use coursenote::test_support::openapi::{get_property, unwrap_object_schema};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use utoipa::OpenApi;

const ERROR_SCHEMA_REF: &str = "#/components/schemas/Error";

#[derive(Default)]
struct OpenApiWorld {
    document: Option<utoipa::openapi::OpenApi>,
    json: Option<Value>,
}

impl std::fmt::Debug for OpenApiWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiWorld")
            .field("document", &self.document.as_ref().map(|_| "<OpenApi>"))
            .field("json", &self.json.as_ref().map(|_| "<JSON>"))
            .finish()
    }
}

#[fixture]
fn world() -> Mutex<OpenApiWorld> {
    Mutex::new(OpenApiWorld::default())
}

fn with_json<R>(world: &Mutex<OpenApiWorld>, inspect: impl FnOnce(&Value) -> R) -> R {
    let world = world.lock().expect("world lock");
    inspect(world.json.as_ref().expect("JSON generated"))
}

#[given("the OpenAPI document is generated")]
fn generate_openapi_document(world: &Mutex<OpenApiWorld>) {
    let mut world = world.lock().expect("world lock");
    let doc = ApiDoc::openapi();
    world.json = Some(serde_json::to_value(&doc).expect("document serialises"));
    world.document = Some(doc);
}

#[when("the document is inspected")]
fn inspect_document(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.document.is_some(), "document should be generated");
}

#[then("the document title is {title}")]
fn document_title(world: &Mutex<OpenApiWorld>, title: String) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    assert_eq!(doc.info.title, title);
}

#[then("the document version is {version}")]
fn document_version(world: &Mutex<OpenApiWorld>, version: String) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    assert_eq!(doc.info.version, version);
}

#[then("the components section registers the {name} schema")]
fn schema_registered(world: &Mutex<OpenApiWorld>, name: String) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let components = doc.components.as_ref().expect("components present");
    let schema = components
        .schemas
        .get(&name)
        .unwrap_or_else(|| panic!("{name} schema should be registered"));

    let object = unwrap_object_schema(schema, &name);
    if name == "Error" {
        get_property(object, "code");
        get_property(object, "message");
    }
}

#[then("the tag {tag} is declared")]
fn tag_declared(world: &Mutex<OpenApiWorld>, tag: String) {
    let world = world.lock().expect("world lock");
    let doc = world.document.as_ref().expect("document generated");
    let declared = doc
        .tags
        .as_ref()
        .is_some_and(|tags| tags.iter().any(|candidate| candidate.name == tag));
    assert!(declared, "tag {tag} should be declared");
}

#[then("the path {path} supports {methods}")]
fn path_supports(world: &Mutex<OpenApiWorld>, path: String, methods: String) {
    with_json(world, |json| {
        let item = json["paths"]
            .get(&path)
            .unwrap_or_else(|| panic!("path {path} should be documented"));
        for method in methods
            .split([',', ' '])
            .filter(|word| !word.is_empty() && *word != "and")
        {
            assert!(
                item.get(method).is_some(),
                "{path} should support {method}"
            );
        }
    });
}

#[then("every API failure response references the Error schema")]
fn failures_reference_error_schema(world: &Mutex<OpenApiWorld>) {
    with_json(world, |json| {
        let paths = json["paths"].as_object().expect("paths object");
        let mut checked = 0;
        for (path, item) in paths.iter().filter(|(path, _)| path.starts_with("/api/v1")) {
            let operations = item.as_object().expect("path item object");
            for (method, operation) in operations {
                let Some(responses) = operation["responses"].as_object() else {
                    continue;
                };
                for (status, response) in responses
                    .iter()
                    .filter(|(status, _)| status.starts_with('4') || status.starts_with('5'))
                {
                    let reference = &response["content"]["application/json"]["schema"]["$ref"];
                    assert_eq!(
                        reference.as_str(),
                        Some(ERROR_SCHEMA_REF),
                        "{method} {path} {status} should use the Error schema"
                    );
                    checked += 1;
                }
            }
        }
        assert!(checked > 0, "expected documented failure responses");
    });
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "The document describes the CourseNote API"
)]
fn the_document_describes_the_coursenote_api(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "The document lists every resource path"
)]
fn the_document_lists_every_resource_path(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi.feature",
    name = "Failures share the Error schema"
)]
fn failures_share_the_error_schema(world: Mutex<OpenApiWorld>) {
    drop(world);
}
