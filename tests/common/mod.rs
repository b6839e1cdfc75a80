//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use period_archive::{Files, Metadata, Record};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a single record
pub struct RecordBuilder {
    title: String,
    date: Option<String>,
    collections: Vec<String>,
}

impl RecordBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            date: Some("2017-01-01T00:00:00.000Z".to_string()),
            collections: Vec::new(),
        }
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn without_date(mut self) -> Self {
        self.date = None;
        self
    }

    pub fn collection(mut self, name: &str) -> Self {
        self.collections.push(name.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut value = json!({ "title": self.title, "contents": format!("{} body", self.title) });
        if let Some(date) = &self.date {
            value["date"] = json!(date);
        }
        if !self.collections.is_empty() {
            value["collection"] = json!(self.collections);
        }
        value
    }

    pub fn build(&self) -> Record {
        Record::from_value(self.to_json()).expect("record fixture must be an object")
    }
}

/// In-memory host: a file map plus metadata
pub struct HostBuilder {
    files: Files,
    metadata: Metadata,
}

impl HostBuilder {
    pub fn new() -> Self {
        Self { files: Files::new(), metadata: Metadata::new() }
    }

    pub fn with_record(mut self, path: &str, record: RecordBuilder) -> Self {
        self.files.insert(path.to_string(), record.build());
        self
    }

    /// Register collections in metadata the way a collections plugin would
    pub fn with_collections(mut self, names: &[&str]) -> Self {
        let collections: serde_json::Map<String, Value> =
            names.iter().map(|name| (name.to_string(), json!([]))).collect();
        self.metadata.insert("collections".to_string(), Value::Object(collections));
        self
    }

    pub fn build(self) -> (Files, Metadata) {
        (self.files, self.metadata)
    }
}

impl Default for HostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Three posts, one per year, each in the `articles` collection
pub fn basic_host() -> HostBuilder {
    HostBuilder::new()
        .with_record(
            "2015-post.json",
            RecordBuilder::new("2015").date("2015-01-01T00:00:00.000Z").collection("articles"),
        )
        .with_record(
            "2016-post.json",
            RecordBuilder::new("2016").date("2016-01-01T00:00:00.000Z").collection("articles"),
        )
        .with_record(
            "2017-post.json",
            RecordBuilder::new("2017").date("2017-01-01T00:00:00.000Z").collection("articles"),
        )
        .with_collections(&["articles"])
}

/// Posts spread across `news`, `events` and `studies`
pub fn multiple_collections_host() -> HostBuilder {
    HostBuilder::new()
        .with_record(
            "news/one.json",
            RecordBuilder::new("news one").date("2016-08-08T09:00:00.000Z").collection("news"),
        )
        .with_record(
            "news/two.json",
            RecordBuilder::new("news two").date("2016-06-04T09:00:00.000Z").collection("news"),
        )
        .with_record(
            "events/christmas.json",
            RecordBuilder::new("christmas").date("2016-12-25T09:00:00.000Z").collection("events"),
        )
        .with_record(
            "events/boxing-day.json",
            RecordBuilder::new("boxing day").date("2016-12-26T09:00:00.000Z").collection("events"),
        )
        .with_record(
            "events/shared.json",
            RecordBuilder::new("shared")
                .date("2016-08-08T12:00:00.000Z")
                .collection("events")
                .collection("studies"),
        )
        .with_record(
            "studies/new-year.json",
            RecordBuilder::new("new year").date("2017-01-01T09:00:00.000Z").collection("studies"),
        )
        .with_record(
            "studies/new-years-eve.json",
            RecordBuilder::new("nye").date("2016-12-31T09:00:00.000Z").collection("studies"),
        )
        .with_collections(&["news", "events", "studies"])
}

/// Builder for a source directory of JSON record files
pub struct SourceDirBuilder {
    temp_dir: TempDir,
}

impl SourceDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_record(self, relative: &str, record: RecordBuilder) -> Self {
        let content = serde_json::to_string_pretty(&record.to_json()).expect("fixture serializes");
        self.with_file(relative, &content)
    }

    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(path, content).expect("Failed to write fixture file");
        self
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for SourceDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorted keys of a JSON object
pub fn object_keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> =
        value.as_object().expect("expected a JSON object").keys().cloned().collect();
    keys.sort();
    keys
}
