//! Package name helpers for DefinitelyTyped-style layouts
//!
//! Scoped packages are stored under a flattened directory name:
//! `@scope/pkg` lives in `types/scope__pkg/index.d.ts`.

use std::path::{Path, PathBuf};

const SCOPE_SEPARATOR: &str = "__";

/// `@scope/pkg` -> `scope__pkg`; unscoped names are unchanged.
pub fn escape_package_name(package: &str) -> String {
    match package
        .strip_prefix('@')
        .and_then(|scoped| scoped.split_once('/'))
    {
        Some((scope, name)) => format!("{scope}{SCOPE_SEPARATOR}{name}"),
        None => package.to_string(),
    }
}

/// Inverse of [`escape_package_name`].
pub fn unescape_package_name(escaped: &str) -> String {
    match escaped.split_once(SCOPE_SEPARATOR) {
        Some((scope, name)) => format!("@{scope}/{name}"),
        None => escaped.to_string(),
    }
}

/// Location of a package's reference declaration below a types root.
pub fn reference_declaration_path(types_root: &Path, package: &str) -> PathBuf {
    types_root
        .join(escape_package_name(package))
        .join("index.d.ts")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_scoped_and_plain_names() {
        assert_eq!(escape_package_name("@babel/core"), "babel__core");
        assert_eq!(escape_package_name("left-pad"), "left-pad");
        assert_eq!(escape_package_name("@broken"), "@broken");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape_package_name("babel__core"), "@babel/core");
        assert_eq!(unescape_package_name("lodash"), "lodash");
    }

    #[test]
    fn test_reference_declaration_path() {
        let path = reference_declaration_path(Path::new("/dt/types"), "@types-x/util");
        assert_eq!(path, PathBuf::from("/dt/types/types-x__util/index.d.ts"));
    }

    proptest! {
        #[test]
        fn prop_escape_round_trips(scope in "[a-z][a-z0-9-]{0,8}", name in "[a-z][a-z0-9.-]{0,12}") {
            let scoped = format!("@{scope}/{name}");
            prop_assert_eq!(unescape_package_name(&escape_package_name(&scoped)), scoped);
            prop_assert_eq!(unescape_package_name(&escape_package_name(&name)), name);
        }
    }
}
