pub mod error;

pub use error::*;

use adeptflow_cloud::InfrastructureRequirement;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 設定ディレクトリを上書きする環境変数
pub const HOME_ENV: &str = "ADEPTFLOW_HOME";

/// 設定ファイルを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "ADEPTFLOW_CONFIG_PATH";

/// 資格情報ストレージのデフォルトファイル名
pub const DEFAULT_STORAGE_FILE: &str = "credentials.json";

const SETTINGS_FILE: &str = "adeptflow.yml";

/// AdeptFlowの設定ディレクトリを取得
///
/// `ADEPTFLOW_HOME` が設定されていればそれを使い、
/// なければ `~/.config/adeptflow` を使用する。存在しない場合は作成する。
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = match std::env::var_os(HOME_ENV) {
        Some(home) => PathBuf::from(home),
        None => dirs::config_dir()
            .ok_or(ConfigError::ConfigDirNotFound)?
            .join("adeptflow"),
    };

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        debug!(path = %config_dir.display(), "Created config directory");
    }

    Ok(config_dir)
}

/// 設定ファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 ADEPTFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: adeptflow.local.yml, adeptflow.yml
/// 3. ./.adeptflow/adeptflow.yml
/// 4. 設定ディレクトリ内の adeptflow.yml
///
/// 設定ファイルは任意なので、見つからない場合は `None` を返す。
pub fn find_settings_file() -> Result<Option<PathBuf>> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    // 2. カレントディレクトリで検索
    let current_dir = std::env::current_dir()?;
    for filename in ["adeptflow.local.yml", SETTINGS_FILE] {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    // 3. ./.adeptflow/ ディレクトリ
    let project_settings = current_dir.join(".adeptflow").join(SETTINGS_FILE);
    if project_settings.exists() {
        return Ok(Some(project_settings));
    }

    // 4. グローバル設定
    let global = get_config_dir()?.join(SETTINGS_FILE);
    if global.exists() {
        return Ok(Some(global));
    }

    Ok(None)
}

/// adeptflow.yml の内容
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// 必須リソースカタログの上書き（未指定ならアプリ既定のカタログ）
    pub requirements: Option<Vec<InfrastructureRequirement>>,

    /// 生成物の出力先ディレクトリ
    pub output_dir: Option<PathBuf>,

    /// 資格情報ストレージのファイル名（設定ディレクトリからの相対）
    pub storage_file: Option<String>,
}

impl Settings {
    /// 設定ファイルを探して読み込む。見つからなければ既定値
    pub fn load() -> Result<Self> {
        match find_settings_file()? {
            Some(path) => Self::from_path(&path),
            None => {
                debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 指定パスの設定ファイルを読み込む
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::InvalidSettings {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// 資格情報ストレージのフルパス
    pub fn storage_path(&self) -> Result<PathBuf> {
        let file = self.storage_file.as_deref().unwrap_or(DEFAULT_STORAGE_FILE);
        Ok(get_config_dir()?.join(file))
    }

    /// 出力ディレクトリ（未指定ならカレントディレクトリ）
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adeptflow_cloud::ResourceKind;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn test_get_config_dir_uses_home_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let home = temp_dir.path().join("adept-home");

        temp_env::with_var(HOME_ENV, Some(&home), || {
            let dir = get_config_dir().unwrap();
            assert_eq!(dir, home);
            // 存在しなければ作成される
            assert!(dir.exists());
        });
    }

    #[test]
    #[serial]
    fn test_find_settings_file_env_var() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("custom.yml");
        fs::write(&config_path, "output_dir: out\n").unwrap();

        temp_env::with_var(CONFIG_PATH_ENV, Some(&config_path), || {
            let found = find_settings_file().unwrap();
            assert_eq!(found, Some(config_path.clone()));
        });
    }

    #[test]
    #[serial]
    fn test_find_settings_file_local_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        fs::write(temp_dir.path().join("adeptflow.yml"), "").unwrap();
        fs::write(temp_dir.path().join("adeptflow.local.yml"), "").unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let home = temp_dir.path().join("home");
        let result = temp_env::with_vars(
            [(HOME_ENV, Some(home.as_os_str())), (CONFIG_PATH_ENV, None)],
            find_settings_file,
        );
        std::env::set_current_dir(original_dir).unwrap();

        // adeptflow.local.yml が優先される
        assert!(result.unwrap().unwrap().ends_with("adeptflow.local.yml"));
    }

    #[test]
    #[serial]
    fn test_find_settings_file_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let original_dir = std::env::current_dir().unwrap();

        std::env::set_current_dir(&temp_dir).unwrap();
        let home = temp_dir.path().join("home");
        let result = temp_env::with_vars(
            [(HOME_ENV, Some(home.as_os_str())), (CONFIG_PATH_ENV, None)],
            find_settings_file,
        );
        std::env::set_current_dir(original_dir).unwrap();

        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_settings_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("adeptflow.yml");
        fs::write(
            &path,
            r#"
requirements:
  - name: adeptai-models
    type: bucket
  - name: agent_definitions
    type: table
output_dir: ./deploy
storage_file: creds.json
"#,
        )
        .unwrap();

        let settings = Settings::from_path(&path).unwrap();
        let reqs = settings.requirements.unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].name, "adeptai-models");
        assert_eq!(reqs[0].kind, ResourceKind::Bucket);
        assert_eq!(reqs[1].kind, ResourceKind::Table);
        assert_eq!(settings.output_dir, Some(PathBuf::from("./deploy")));
        assert_eq!(settings.storage_file.as_deref(), Some("creds.json"));
    }

    #[test]
    fn test_settings_empty_file_is_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("adeptflow.yml");
        fs::write(&path, "\n").unwrap();

        let settings = Settings::from_path(&path).unwrap();
        assert!(settings.requirements.is_none());
        assert!(settings.output_dir.is_none());
    }

    #[test]
    fn test_settings_invalid_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("adeptflow.yml");
        fs::write(&path, "requirements:\n  - name: x\n    type: queue\n").unwrap();

        let result = Settings::from_path(&path);
        assert!(matches!(result, Err(ConfigError::InvalidSettings { .. })));
    }

    #[test]
    #[serial]
    fn test_storage_path_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        temp_env::with_var(HOME_ENV, Some(temp_dir.path()), || {
            let path = Settings::default().storage_path().unwrap();
            assert_eq!(path, temp_dir.path().join(DEFAULT_STORAGE_FILE));
        });
    }
}
