use std::fmt;

/// An opaque document chosen by the user: its file name and raw bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

// Document contents stay out of debug output and logs.
impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Current file selection and job-description text.
///
/// Both values are replaced wholesale and never validated here; the
/// operations that consume them decide whether they are usable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStore {
    files: Vec<FileHandle>,
    job_description: String,
}

impl SelectionStore {
    pub fn set_files(&mut self, files: Vec<FileHandle>) {
        self.files = files;
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    /// The trimmed job description, or `None` when it is blank.
    pub fn trimmed_job_description(&self) -> Option<&str> {
        let trimmed = self.job_description.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
