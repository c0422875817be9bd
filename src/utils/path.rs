//! Output paths given on the command line.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// `~/x` → `$HOME/x`; anything else is taken as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

/// Ask on the terminal before clobbering `path`. Anything but y/yes is a no.
pub fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::expand_tilde;
    use std::path::PathBuf;

    #[test]
    fn only_a_leading_tilde_slash_is_expanded() {
        assert_eq!(expand_tilde("out/x.csv"), PathBuf::from("out/x.csv"));
        assert_eq!(expand_tilde("a~/b"), PathBuf::from("a~/b"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/x.csv"), home.join("x.csv"));
        }
    }
}
