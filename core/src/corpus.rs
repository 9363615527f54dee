use crate::index::{DocId, Document};
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load documents from a JSON array/object file, a JSONL file, or a directory of either.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        bail!("corpus path {} does not exist", path.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }

    let mut seen: HashSet<DocId> = HashSet::with_capacity(docs.len());
    for doc in &docs {
        if !seen.insert(doc.id) {
            bail!("duplicate document id {} in {}", doc.id, path.display());
        }
    }
    tracing::info!(num_docs = docs.len(), path = %path.display(), "loaded corpus");
    Ok(docs)
}

/// Write documents as a pretty-printed JSON array.
pub fn save_corpus<P: AsRef<Path>>(path: P, docs: &[Document]) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, docs)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

fn read_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{}: invalid json", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: Document = serde_json::from_value(v)
                    .with_context(|| format!("{}: invalid document", file.display()))?;
                docs.push(doc);
            }
        }
        serde_json::Value::Object(_) => {
            let doc: Document = serde_json::from_value(json)
                .with_context(|| format!("{}: invalid document", file.display()))?;
            docs.push(doc);
        }
        _ => bail!("{}: expected a document or an array of documents", file.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn loads_array_and_jsonl_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id":1,"title":"One","abstract":"first","tags":["x"]},{"id":2,"title":"Two","abstract":"second"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("b.jsonl"),
            "{\"id\":3,\"title\":\"Three\",\"abstract\":\"third\"}\n\n{\"id\":4,\"title\":\"Four\",\"abstract\":\"fourth\"}\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = load_corpus(dir.path()).unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.json");
        fs::write(&path, r#"[{"id":1,"title":"A","abstract":""},{"id":1,"title":"B","abstract":""}]"#).unwrap();
        let err = load_corpus(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate document id 1"));
    }

    #[test]
    fn missing_path_errors() {
        assert!(load_corpus("/definitely/not/here.json").is_err());
    }

    #[test]
    fn save_then_load_preserves_documents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/corpus.json");
        let docs = vec![Document {
            id: 9,
            title: "Rail".into(),
            summary: "Line opens".into(),
            tags: vec!["transit".into()],
            date: "2023-04-01".into(),
            source: "Wire".into(),
            full_text: Some("Long body".into()),
        }];
        save_corpus(&path, &docs).unwrap();
        assert_eq!(load_corpus(&path).unwrap(), docs);
    }
}
