use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::{env, fs};

use toml_edit::{Document, Item};

const UMBRELLA_NAME: &str = "rowkit";
const CRATE_PREFIX: &str = "rowkit_";

/// Dependency names of the crate invoking a proc-macro, used to decide how a
/// rowkit crate is reachable from generated code.
///
/// ```rust
/// # use rowkit_macro_utils::Manifest;
/// let m = Manifest::parse("[dependencies]\nrowkit = \"0.1\"\n").unwrap();
/// let path = m.get_crate_path("rowkit_reflect");
/// assert_eq!(path.segments.len(), 2);
/// ```
///
/// A `rowkit_*` crate is found as `::name` when it is a direct dependency,
/// then as `::rowkit::<rest>` when the umbrella crate is, checking
/// `dependencies` before `dev-dependencies`. Anything else is `::name`.
///
/// A crate that expands its own derives should declare
/// `extern crate self as rowkit_reflect;` so the absolute path resolves.
#[derive(Debug, Default)]
pub struct Manifest {
    dependencies: BTreeSet<String>,
    dev_dependencies: BTreeSet<String>,
}

impl Manifest {
    /// Reads the dependency tables of a `Cargo.toml` text.
    pub fn parse(text: &str) -> Result<Self, toml_edit::TomlError> {
        let document = Document::parse(text)?;
        let names = |table: &str| -> BTreeSet<String> {
            match document.get(table) {
                Some(Item::Table(deps)) => deps.iter().map(|(key, _)| key.to_owned()).collect(),
                _ => BTreeSet::new(),
            }
        };
        Ok(Self {
            dependencies: names("dependencies"),
            dev_dependencies: names("dev-dependencies"),
        })
    }

    fn load(path: &Path) -> Self {
        // An unreadable manifest only costs the umbrella lookup.
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    fn resolve(deps: &BTreeSet<String>, name: &str) -> Option<String> {
        if deps.contains(name) {
            return Some(format!("::{name}"));
        }
        let module = name.strip_prefix(CRATE_PREFIX)?;
        deps.contains(UMBRELLA_NAME)
            .then(|| format!("::{UMBRELLA_NAME}::{module}"))
    }

    /// Returns the path of the package `name` as seen from the caller.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let text = Self::resolve(&self.dependencies, name)
            .or_else(|| Self::resolve(&self.dev_dependencies, name))
            .unwrap_or_else(|| format!("::{name}"));
        syn::parse_str(&text).unwrap_or_else(|_| panic!("`{text}` is not a valid path"))
    }

    /// Runs `func` with the manifest of the crate being compiled.
    ///
    /// Manifests are read once per process and directory.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: Mutex<BTreeMap<PathBuf, Manifest>> = Mutex::new(BTreeMap::new());

        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .map(PathBuf::from)
            .unwrap_or_default();
        let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        let manifest = cache
            .entry(dir)
            .or_insert_with_key(|dir| Self::load(&dir.join("Cargo.toml")));
        func(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;

    fn render(text: &str, name: &str) -> String {
        let path = Manifest::parse(text).unwrap().get_crate_path(name);
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency() {
        let text = "[dependencies]\nrowkit_reflect = \"0.1\"\nrowkit = \"0.1\"\n";
        assert_eq!(render(text, "rowkit_reflect"), "rowkit_reflect");
    }

    #[test]
    fn through_umbrella() {
        assert_eq!(render("[dependencies]\nrowkit = \"0.1\"\n", "rowkit_reflect"), "rowkit::reflect");
        assert_eq!(render("[dependencies]\nrowkit = \"0.1\"\n", "serde"), "serde");
    }

    #[test]
    fn fallback_from_dev_dependencies() {
        let text = "[dev-dependencies]\nrowkit = \"0.1\"\n";
        assert_eq!(render(text, "rowkit_reflect"), "rowkit::reflect");
        assert_eq!(render("", "rowkit_reflect"), "rowkit_reflect");
    }
}
