use anyhow::{anyhow, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

pub fn open(path: &Path, kind: &str) -> Result<File> {
    match File::open(path) {
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
        Ok(file) => Ok(file),
    }
}

/// Escapes `&`, `<`, `>` and `"` so `s` can be placed in HTML text or in a
/// double-quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    // writing into a `String` can't fail
    let _ = pulldown_cmark::escape::escape_html(&mut escaped, s);
    escaped
}

/// Removes a generated file or directory. A missing path is not an error.
pub fn remove_path(path: &Path) -> io::Result<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Recursively copies the contents of `src` into `dst`, creating `dst` and
/// any intermediate directories. Returns the number of files copied.
pub fn copy_dir(src: &Path, dst: &Path) -> io::Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        // `WalkDir` only yields paths under `src`
        let relative = match entry.path().strip_prefix(src) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;",
            escape_html(r#"<b>Tom & "Jerry"</b>"#)
        );
        assert_eq!("ação", escape_html("ação"));
    }

    #[test]
    fn test_copy_dir_and_remove_path() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let src = tempfile::tempdir()?;
        std::fs::create_dir_all(src.path().join("img"))?;
        std::fs::write(src.path().join("style.css"), "body {}")?;
        std::fs::write(src.path().join("img").join("logo.svg"), "<svg/>")?;

        let out = tempfile::tempdir()?;
        let dst = out.path().join("static");
        assert_eq!(2, copy_dir(src.path(), &dst)?);
        assert_eq!("body {}", std::fs::read_to_string(dst.join("style.css"))?);
        assert!(dst.join("img").join("logo.svg").is_file());

        remove_path(&dst)?;
        assert!(!dst.exists());
        remove_path(&dst)?;
        Ok(())
    }
}
