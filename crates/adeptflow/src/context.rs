use crate::provider::{AwsFactory, connect_aws};
use adeptflow_cloud::InfrastructureRequirement;
use adeptflow_cloud_aws::AwsProvider;
use adeptflow_config::Settings;
use adeptflow_core::credentials::FileStorage;
use adeptflow_core::{
    AwsCredentials, CredentialStore, ErrorBus, ReadinessOrchestrator, default_catalog,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// コマンド実行に必要な共有状態
pub struct AppContext {
    pub settings: Settings,
    pub store: CredentialStore,
    pub bus: ErrorBus,
    pub catalog: Vec<InfrastructureRequirement>,
    pub storage_path: PathBuf,
}

impl AppContext {
    pub fn load() -> anyhow::Result<Self> {
        let settings = Settings::load()?;
        let storage_path = settings.storage_path()?;
        let catalog = settings
            .requirements
            .clone()
            .unwrap_or_else(default_catalog);

        debug!(
            storage = %storage_path.display(),
            requirements = catalog.len(),
            "Loaded application context"
        );

        Ok(Self {
            store: CredentialStore::new(Arc::new(FileStorage::new(&storage_path))),
            bus: ErrorBus::new(),
            settings,
            catalog,
            storage_path,
        })
    }

    pub fn orchestrator(&self) -> ReadinessOrchestrator {
        ReadinessOrchestrator::new(
            self.store.clone(),
            Arc::new(AwsFactory),
            self.catalog.clone(),
            self.bus.clone(),
        )
    }

    /// 出力先: 引数 > 設定ファイル > カレントディレクトリ
    pub fn output_dir(&self, arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        match arg {
            Some(dir) => Ok(dir),
            None => Ok(self.settings.output_dir()?),
        }
    }

    /// 保存済みの AWS 資格情報（全フィールド空なら None）
    pub fn aws_credentials(&self) -> Option<AwsCredentials> {
        self.store
            .load()
            .and_then(|c| c.aws)
            .filter(|aws| !aws.is_empty())
    }

    /// 保存済み資格情報で AWS に接続
    pub async fn connect(&self) -> anyhow::Result<Option<AwsProvider>> {
        match self.aws_credentials() {
            Some(aws) => Ok(Some(connect_aws(&aws).await?)),
            None => Ok(None),
        }
    }
}
