pub mod error;

use crate::error::Error as HarnessError;
use error::{Constraint, SchemaValidationError, Violation};
use jsonschema::{error::ValidationErrorKind, Draft, ValidationError, Validator};
use serde_json::Value;
use std::{
    collections::HashMap,
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};
use tracing::debug;

/// A parsed and compiled Draft-07 schema.
pub struct SchemaDocument {
    name: String,
    schema: Value,
    validator: Validator,
}

impl SchemaDocument {
    /// Compiles `schema` with format assertions enabled.
    pub fn compile<S: Into<String>>(name: S, schema: Value) -> Result<Self, HarnessError> {
        let name = name.into();

        if schema.is_null() || schema.as_object().map_or(false, |object| object.is_empty()) {
            return Err(HarnessError::InvalidSchema(name, String::from("empty schema")));
        }

        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .should_validate_formats(true)
            .build(&schema)
            .map_err(|e| HarnessError::InvalidSchema(name.clone(), e.to_string()))?;

        Ok(Self {
            name,
            schema,
            validator,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    pub fn validate(&self, instance: &Value) -> Result<(), HarnessError> {
        validate(instance, self)
    }
}

impl Debug for SchemaDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaDocument")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish()
    }
}

/// Checks `instance` against `schema`, reporting every violation at once.
pub fn validate(instance: &Value, schema: &SchemaDocument) -> Result<(), HarnessError> {
    let violations = schema
        .validator
        .iter_errors(instance)
        .map(|error| violation(&error))
        .collect::<Vec<_>>();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError {
            schema: schema.name.clone(),
            violations,
        }
        .into())
    }
}

fn violation(error: &ValidationError<'_>) -> Violation {
    let schema_path = error.schema_path.to_string();

    let constraint = match &error.kind {
        ValidationErrorKind::Required { property } => Constraint::Required {
            property: property
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| property.to_string()),
        },
        ValidationErrorKind::Type { .. } => Constraint::Type,
        ValidationErrorKind::Format { format } => Constraint::Format {
            format: format.clone(),
        },
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            Constraint::AdditionalProperties {
                unexpected: unexpected.clone(),
            }
        }
        _ => Constraint::Other {
            keyword: schema_path
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
        },
    };

    Violation {
        instance_path: error.instance_path.to_string(),
        schema_path,
        constraint,
        message: error.to_string(),
    }
}

/// Loads schema files from one directory and keeps every loaded schema for later calls.
#[derive(Debug)]
pub struct SchemaStore {
    directory: PathBuf,
    cache: RwLock<HashMap<String, Arc<SchemaDocument>>>,
}

impl SchemaStore {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the schema stored as `name` (e.g. `user_list_schema.json`).
    ///
    /// # Errors
    /// `SchemaNotFoundError` when there is no such file in the schema directory, `SchemaParseError`
    /// when it is not JSON and `InvalidSchema` when it is not a usable schema.
    pub fn load_schema(&self, name: &str) -> Result<Arc<SchemaDocument>, HarnessError> {
        if let Some(document) = self.cached(name) {
            return Ok(document);
        }

        if !Self::is_plain_file_name(name) {
            return Err(HarnessError::SchemaNotFoundError(name.into()));
        }

        let path = self.directory.join(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(HarnessError::SchemaNotFoundError(name.into()))
            }
            Err(e) => return Err(e.into()),
        };

        let schema: Value = serde_json::from_str(&contents)
            .map_err(|e| HarnessError::SchemaParseError(name.into(), e))?;
        let document = Arc::new(SchemaDocument::compile(name, schema)?);

        debug!("Loaded schema {} from {}", name, path.display());

        let mut cache = self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(cache.entry(name.to_string()).or_insert(document).clone())
    }

    pub fn validate(&self, instance: &Value, name: &str) -> Result<(), HarnessError> {
        self.load_schema(name)?.validate(instance)
    }

    fn cached(&self, name: &str) -> Option<Arc<SchemaDocument>> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    fn is_plain_file_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.chars().any(|c| c == '/' || c == '\\')
    }
}
