#[cfg(test)]
mod tests {
    use kiln::cli::{run, CookArgs};
    use kiln::constants::exit_codes;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use test_log::test;

    fn write_fixture(root: &Path, name: &str, content: &str) {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn valid_job(root: &Path, name: &str, output: &str) -> std::path::PathBuf {
        write_fixture(root, "data.json", r#"[{"id": 1}]"#);
        write_fixture(root, "page.j2", "ok");
        let config = format!("input: data.json\ntemplate: page.j2\noutput: {output}\n");
        write_fixture(root, name, &config);
        root.join(name)
    }

    #[test]
    fn test_run_single_config_succeeds() {
        let dir = TempDir::new().unwrap();
        let config = valid_job(dir.path(), "job.yaml", "out.txt");

        let args = CookArgs { configs: vec![config], verbose: 0 };
        assert_eq!(run(&args), exit_codes::SUCCESS);
        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "ok");
    }

    #[test]
    fn test_run_missing_config_fails_but_continues() {
        let dir = TempDir::new().unwrap();
        let good = valid_job(dir.path(), "good.yaml", "good.txt");
        let missing = dir.path().join("missing.yaml");

        let args = CookArgs { configs: vec![missing, good], verbose: 0 };
        assert_eq!(run(&args), exit_codes::FAILURE);
        // The good config after the missing one is still processed.
        assert!(dir.path().join("good.txt").exists());
    }

    #[test]
    fn test_run_invalid_config_fails_but_continues() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), "broken.yaml", "template: only.j2\n");
        let broken = dir.path().join("broken.yaml");
        let good = valid_job(dir.path(), "good.yaml", "good.txt");

        let args = CookArgs { configs: vec![broken, good], verbose: 0 };
        assert_eq!(run(&args), exit_codes::FAILURE);
        assert!(dir.path().join("good.txt").exists());
    }
}
