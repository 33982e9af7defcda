#[cfg(test)]
pub mod test {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::handler::ConfigHandler;
    use crate::template::Variables;

    /// A concrete config with DEFAULT inheritance and no placeholders.
    pub const TEST_CONFIG: &str = "\
[DEFAULT]
send_email = true

[app1]
send_email = false
line_height = 12

[app2]
front_page_title = Hello World!
";

    /// Template for `config.ini`, with `{project_root_path}` placeholders.
    pub const CONFIG_TEMPLATE: &str = "\
[DEFAULT]
send_email = true
authenticate_user = true
track_user_activity = true

[app1]
send_email = false
line_height = 12
input_path = {project_root_path}/input/app1
track_user_activity = false

[app2]
front_page_title = Hello World!
input_path = {project_root_path}/input/app2
";

    pub fn project_vars() -> Variables {
        Variables::new().with("project_root_path", "path/to/project/root")
    }

    pub fn owned(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Temp dir holding the reference files:
    ///
    /// - `test_config.ini` and `test_config.ini.template` (both present)
    /// - `config.ini.template` only; `config.ini` is what sync generates
    pub struct Workspace {
        pub dir: TempDir,
    }

    impl Workspace {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("test_config.ini"), TEST_CONFIG).unwrap();
            fs::write(dir.path().join("test_config.ini.template"), CONFIG_TEMPLATE).unwrap();
            fs::write(dir.path().join("config.ini.template"), CONFIG_TEMPLATE).unwrap();
            Self { dir }
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        /// Handler over the existing `test_config.ini`.
        pub fn test_config(&self) -> ConfigHandler {
            ConfigHandler::new(self.path("test_config.ini"))
        }

        /// Handler over the not-yet-generated `config.ini`.
        pub fn config(&self) -> ConfigHandler {
            ConfigHandler::new(self.path("config.ini"))
        }
    }

    #[test]
    fn workspace_lays_out_reference_files() {
        let ws = Workspace::new();
        assert!(ws.path("test_config.ini").exists());
        assert!(ws.path("test_config.ini.template").exists());
        assert!(ws.path("config.ini.template").exists());
        assert!(!ws.path("config.ini").exists());
    }
}
