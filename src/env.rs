use crate::template::Variables;

/// Build [`Variables`] from environment variables matching `{PREFIX}__*`.
///
/// `MYAPP__PROJECT_ROOT_PATH=/srv/app` becomes `project_root_path = "/srv/app"`.
/// Names are lowercased; values are kept verbatim. The bare prefix and
/// variables with other prefixes are skipped.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn env_to_variables(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Variables {
    let needle = format!("{prefix}__");
    let mut out = Variables::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&needle) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        out.insert(rest.to_lowercase(), value);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn simple_name() {
        let out = env_to_variables("MYAPP", vars(&[("MYAPP__ROOT", "/srv")]));
        assert_eq!(out.get("root"), Some("/srv"));
    }

    #[test]
    fn single_underscore_preserved() {
        let out = env_to_variables(
            "MYAPP",
            vars(&[("MYAPP__PROJECT_ROOT_PATH", "path/to/project/root")]),
        );
        assert_eq!(out.get("project_root_path"), Some("path/to/project/root"));
    }

    #[test]
    fn value_kept_verbatim() {
        let out = env_to_variables("MYAPP", vars(&[("MYAPP__TITLE", "Hello World!")]));
        assert_eq!(out.get("title"), Some("Hello World!"));
    }

    #[test]
    fn no_matching_prefix_ignored() {
        let out = env_to_variables("MYAPP", vars(&[("OTHER__ROOT", "x")]));
        assert!(out.is_empty());
    }

    #[test]
    fn bare_prefix_ignored() {
        let out = env_to_variables("MYAPP", vars(&[("MYAPP", "x"), ("MYAPP__", "y")]));
        assert!(out.is_empty());
    }

    #[test]
    fn prefix_with_single_underscore_not_matched() {
        let out = env_to_variables("MYAPP", vars(&[("MYAPP_ROOT", "x")]));
        assert!(out.is_empty());
    }

    #[test]
    fn multiple_vars_combined() {
        let out = env_to_variables(
            "APP",
            vars(&[
                ("APP__ROOT", "/srv"),
                ("APP__USER", "deploy"),
                ("PATH", "/usr/bin"),
            ]),
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("root"), Some("/srv"));
        assert_eq!(out.get("user"), Some("deploy"));
    }
}
