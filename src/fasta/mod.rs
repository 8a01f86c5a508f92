use crate::error::{Result, SeqmarkError};

use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Body line width of written records.
pub const LINE_WIDTH: usize = 80;

pub const EXTENSION: &str = "fasta";

/// A single parsed record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub description: String,
    pub sequence: String,
}

/// Rejects identifiers and descriptions that would not survive a round trip
/// through a header line.
pub fn validate_header(id: &str, description: &str) -> Result<()> {
    if id.is_empty() {
        return Err(SeqmarkError::InvalidHeader("identifier is empty".to_owned()));
    }
    if id.chars().any(char::is_whitespace) {
        return Err(SeqmarkError::InvalidHeader(format!("identifier '{}' contains whitespace", id)));
    }
    // the identifier names the output file
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(SeqmarkError::InvalidHeader(format!("identifier '{}' is not a plain file name", id)));
    }
    if description.contains(['\n', '\r']) {
        return Err(SeqmarkError::InvalidHeader("description contains a line break".to_owned()));
    }
    Ok(())
}

/// Splits `sequence` into consecutive lines of `width` characters; only the
/// last may be shorter, and no empty line is produced. A zero width is
/// treated as one.
pub fn wrap(sequence: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let mut lines = Vec::with_capacity(sequence.len() / width + 1);
    let mut start = 0;
    let mut chars = 0;
    for (offset, _) in sequence.char_indices() {
        if chars == width {
            lines.push(&sequence[start..offset]);
            start = offset;
            chars = 0;
        }
        chars += 1;
    }
    if start < sequence.len() {
        lines.push(&sequence[start..]);
    }
    lines
}

/// Renders `>{id} {description}` followed by `sequence` wrapped at
/// [`LINE_WIDTH`], every line newline-terminated.
pub fn format_document(id: &str, description: &str, sequence: &str) -> String {
    let body = wrap(sequence, LINE_WIDTH);
    let mut document = String::with_capacity(id.len() + description.len() + sequence.len() + body.len() + 3);
    document.push('>');
    document.push_str(id);
    document.push(' ');
    document.push_str(description);
    document.push('\n');
    for line in body {
        document.push_str(line);
        document.push('\n');
    }
    document
}

/// Path a record with identifier `id` is written to inside `dir`.
pub fn document_path<P: AsRef<Path>>(dir: P, id: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.{}", id, EXTENSION))
}

/// Writes `document` to `{id}.fasta` inside `dir` and returns its path.
///
/// An existing file is overwritten after a warning and keeps its
/// permissions; a new file gets the same mode as `File::create` would give
/// it. Content goes to a temporary file in the same directory first, then
/// replaces the target.
pub fn write_document<P: AsRef<Path>>(dir: P, id: &str, document: &str) -> Result<PathBuf> {
    let path = document_path(&dir, id);
    let existing = fs::metadata(&path).ok().map(|metadata| metadata.permissions());
    if existing.is_some() {
        warn!("File {} already exists and will be overwritten.", path.display());
    }

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // masked by the umask at creation, like File::create
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir.as_ref())?;
    tmp.write_all(document.as_bytes())?;
    tmp.flush()?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(&path).map_err(|e| e.error)?;

    info!("wrote {} bytes to {}", document.len(), path.display());
    Ok(path)
}

/// Reads the first record of a file.
pub fn read_record<P: AsRef<Path>>(file_path: P) -> Result<Record> {
    let file = File::open(&file_path)?;
    let reader = BufReader::new(file);
    let mut record: Option<Record> = None;

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if record.is_some() {
                break;
            }
            let (id, description) = header.split_once(' ').unwrap_or((header, ""));
            record = Some(Record {
                id: id.to_owned(),
                description: description.to_owned(),
                sequence: String::new(),
            });
        } else if let Some(record) = record.as_mut() {
            record.sequence.push_str(line.trim_end_matches('\r'));
        }
    }

    match record {
        Some(record) => {
            debug!("read record '{}' of {} characters", record.id, record.sequence.chars().count());
            Ok(record)
        }
        None => Err(SeqmarkError::MalformedRecord(format!(
            "no '>' header in {}",
            file_path.as_ref().display()
        ))),
    }
}
