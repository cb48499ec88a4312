//! Directory tree rendering for visual verification of generated data.

use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

/// Render the directory tree under `root` as indented text.
///
/// Entries are sorted by name so output is stable across runs.
pub fn render(root: &Path) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("{}\n", root.display()));

    for entry in WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let indent = "    ".repeat(entry.depth() - 1);
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            out.push_str(&format!("{indent}{name}/\n"));
        } else {
            out.push_str(&format!("{indent}{name}\n"));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn renders_sorted_nested_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("albums")).unwrap();
        fs::write(dir.path().join("albums/b.m4a"), b"").unwrap();
        fs::write(dir.path().join("albums/a.m4a"), b"").unwrap();
        fs::write(dir.path().join("library.toml"), b"").unwrap();

        let rendered = render(dir.path()).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[1], "albums/");
        assert_eq!(lines[2], "    a.m4a");
        assert_eq!(lines[3], "    b.m4a");
        assert_eq!(lines[4], "library.toml");
    }

    #[test]
    fn empty_directory_renders_root_only() {
        let dir = tempfile::tempdir().unwrap();
        let rendered = render(dir.path()).unwrap();
        assert_eq!(rendered.lines().count(), 1);
    }
}
