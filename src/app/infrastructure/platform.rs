use std::path::PathBuf;

/// Well-known name of the notes file inside the user's documents directory.
pub const NOTES_FILE_NAME: &str = "notes.ClonePad.JSON";

/// Default location of the notes file (cross-platform).
///
/// Uses the documents directory, then the home directory, then the current
/// directory when neither can be resolved.
pub fn default_notes_path() -> PathBuf {
    let mut path = dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(NOTES_FILE_NAME);
    path
}

/// Get config file path (cross-platform)
pub fn settings_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("clonepad");
    path.push("settings.json");
    path
}
