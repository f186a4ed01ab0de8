use crate::{FieldIndex, InvertedIndex, Schema};
use anyhow::{Context, Result};
use bincode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn fields(&self) -> PathBuf { self.root.join("fields.bin") }
    fn schema(&self) -> PathBuf { self.root.join("schema.json") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn save_fields(paths: &IndexPaths, fields: &HashMap<String, FieldIndex>) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.fields())?;
    let bytes = bincode::serialize(fields)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_fields(paths: &IndexPaths) -> Result<HashMap<String, FieldIndex>> {
    let mut f = File::open(paths.fields()).with_context(|| format!("opening {}", paths.fields().display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let fields = bincode::deserialize(&buf)?;
    Ok(fields)
}

pub fn save_schema(paths: &IndexPaths, schema: &Schema) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.schema())?;
    let json = serde_json::to_string_pretty(schema)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_schema(paths: &IndexPaths) -> Result<Schema> {
    let mut f = File::open(paths.schema()).with_context(|| format!("opening {}", paths.schema().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let schema: Schema = serde_json::from_str(&buf)?;
    Ok(schema)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta()).with_context(|| format!("opening {}", paths.meta().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Persist the schema, term dictionaries and meta file of `index`.
pub fn save_index(paths: &IndexPaths, index: &InvertedIndex) -> Result<()> {
    save_schema(paths, &index.schema)?;
    save_fields(paths, &index.fields)?;
    let meta = MetaFile {
        num_docs: index.num_docs,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: INDEX_VERSION,
    };
    save_meta(paths, &meta)?;
    tracing::info!(root = %paths.root.display(), num_docs = index.num_docs, "saved index");
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<InvertedIndex> {
    let meta = load_meta(paths)?;
    if meta.version != INDEX_VERSION {
        anyhow::bail!("unsupported index version {} (expected {})", meta.version, INDEX_VERSION);
    }
    let schema = load_schema(paths)?;
    let fields = load_fields(paths)?;
    tracing::info!(root = %paths.root.display(), num_docs = meta.num_docs, fields = fields.len(), "loaded index");
    Ok(InvertedIndex { schema, fields, num_docs: meta.num_docs })
}
