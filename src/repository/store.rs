//! Document merge store.
//!
//! Every address maps to one JSON document holding all transitions for that
//! address. Updates read the existing document (or start empty if the file
//! does not exist), overwrite the updated transition keys, and replace the
//! whole file through a temporary file and rename.
//!
//! There is no locking. Two processes updating the same address
//! concurrently race at whole-document granularity and the last rename
//! wins; callers needing multi-writer safety must serialise externally.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use super::address::RecordAddress;
use super::batch::{AddressBatch, UpdateBatch};
use super::codec::encode_transition;
use super::error::Error;
use super::record::RateRecord;
use crate::model::transition::Transition;

/// In-memory document. Backed by a `BTreeMap`, so keys serialise sorted.
pub(crate) type Document = Map<String, Value>;

/// Reads a document. Returns `Ok(None)` only if the file does not exist.
pub(crate) fn load_document(path: &Path) -> Result<Option<Document>, Error> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(doc)) => Ok(Some(doc)),
        Ok(_) => Err(Error::malformed_document(
            path,
            "top-level value is not a JSON object",
        )),
        Err(e) => Err(Error::malformed_document(path, e.to_string())),
    }
}

/// Renders a document as 2-space indented JSON with sorted keys.
pub(crate) fn render_document(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

/// Replaces the file at `path` with the rendered document.
///
/// The content is written to a temporary file in the destination directory
/// and renamed over the target, so readers observe either the old or the
/// new document. An existing document keeps its permissions; a new one gets
/// the mode a plain file create would give it under the process umask.
pub(crate) fn write_document(path: &Path, doc: &Document) -> Result<(), Error> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::malformed_document(path, "document path has no parent directory"))?;
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let text = render_document(doc).map_err(|e| Error::io(path, e.into()))?;

    let existing = match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(Error::io(path, e)),
    };

    let mut tmp = temp_file_in(dir).map_err(|e| Error::io(dir, e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| Error::io(tmp.path(), e))?;
    }
    tmp.write_all(text.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Requested mode is still masked by the umask, as for `File::create`.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Applies every address group in `batch`, in order.
///
/// Each group is validated completely before its document is touched. The
/// first failing group aborts the call; groups processed before it remain
/// written.
pub(crate) fn update<A: RecordAddress>(root: &Path, batch: &UpdateBatch<A>) -> Result<(), Error> {
    for group in batch.iter() {
        update_address(root, group)?;
    }
    Ok(())
}

fn update_address<A: RecordAddress>(root: &Path, group: &AddressBatch<A>) -> Result<(), Error> {
    group.address.check_segments()?;
    group.address.check_charges()?;

    let mut entries = Vec::with_capacity(group.rates.len());
    for (transition, raw) in &group.rates {
        let key = encode_transition(transition)?;
        let record = A::Record::validate(raw)?;
        entries.push((key, record.to_entry()));
    }

    let path = root.join(group.address.relative_path());
    let mut doc = match load_document(&path)? {
        Some(doc) => {
            debug!(path = %path.display(), existing = doc.len(), "loaded rate document");
            doc
        }
        None => {
            debug!(path = %path.display(), "no existing rate document, starting empty");
            Document::new()
        }
    };

    let updated = entries.len();
    for (key, entry) in entries {
        doc.insert(key, entry);
    }

    write_document(&path, &doc)?;
    info!(
        address = %group.address,
        path = %path.display(),
        updated,
        total = doc.len(),
        "wrote rate document"
    );
    Ok(())
}

/// Reads one record.
pub(crate) fn get<A: RecordAddress>(
    root: &Path,
    address: &A,
    transition: &Transition,
) -> Result<A::Record, Error> {
    address.check_segments()?;
    let key = encode_transition(transition)?;
    let path = root.join(address.relative_path());
    let not_found = || {
        debug!(%address, %transition, path = %path.display(), "rate not available");
        Error::NotFound {
            address: address.to_string(),
            transition: transition.to_string(),
            path: path.clone(),
        }
    };

    let doc = load_document(&path)?.ok_or_else(not_found)?;
    let entry = doc.get(&key).ok_or_else(not_found)?;

    A::Record::from_entry(entry).map_err(|e| Error::MalformedEntry {
        path: path.clone(),
        key,
        field: e.field,
        detail: e.detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        assert!(load_document(&dir.path().join("a/b.json")).unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }));

        fs::write(&path, "[1, 2]").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }));
    }

    #[test]
    fn render_sorts_keys_and_indents_two_spaces() {
        let mut doc = Document::new();
        doc.insert("b".into(), json!({"z": [1.0], "a": 2.0}));
        doc.insert("a".into(), json!(1.0));
        assert_eq!(
            render_document(&doc).unwrap(),
            "{\n  \"a\": 1.0,\n  \"b\": {\n    \"a\": 2.0,\n    \"z\": [\n      1.0\n    ]\n  }\n}"
        );
    }

    #[test]
    fn write_creates_directories_and_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pec/excitation/c/2.json");

        let mut doc = Document::new();
        doc.insert("3 -> 2".into(), json!({"ne": [1.0]}));
        write_document(&path, &doc).unwrap();
        assert_eq!(load_document(&path).unwrap(), Some(doc.clone()));

        doc.clear();
        doc.insert("4 -> 2".into(), json!({"ne": [2.0]}));
        write_document(&path, &doc).unwrap();
        assert_eq!(load_document(&path).unwrap(), Some(doc));

        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(leftovers, vec!["2.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pec/excitation/c/2.json");
        let mut doc = Document::new();
        doc.insert("3 -> 2".into(), json!({"ne": [1.0]}));
        write_document(&path, &doc).unwrap();

        for mode in [0o644, 0o640, 0o664] {
            fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
            doc.insert("4 -> 2".into(), json!({"ne": [f64::from(mode)]}));
            write_document(&path, &doc).unwrap();
            let after = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(after, mode);
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_document_is_not_owner_only_by_default() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.json");
        write_document(&path, &Document::new()).unwrap();
        let created = fs::metadata(&path).unwrap().permissions().mode() & 0o777;

        let reference = dir.path().join("reference");
        fs::File::create(&reference).unwrap();
        let expected = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;
        assert_eq!(created, expected);
    }
}
