use std::path::Path;

use swrr_core::SwrrConfig;
use tracing::info;

pub fn init(path: &str, force: bool) -> anyhow::Result<()> {
    let output = Path::new(path);
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }

    std::fs::write(output, SwrrConfig::scaffold().to_toml_string()?)?;
    info!(path = %output.display(), "wrote scaffold config");
    println!("✓ Generated {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pools.toml");
        let path_str = path.to_str().unwrap();

        init(path_str, false).unwrap();
        let config = SwrrConfig::from_file(&path).unwrap();
        assert!(config.pool("api").is_some());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pools.toml");
        std::fs::write(&path, "# keep me\n").unwrap();
        let path_str = path.to_str().unwrap();

        assert!(init(path_str, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# keep me\n");

        init(path_str, true).unwrap();
        assert!(SwrrConfig::from_file(&path).unwrap().pool("api").is_some());
    }
}
