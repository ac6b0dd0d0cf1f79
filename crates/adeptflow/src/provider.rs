use adeptflow_cloud::{CloudError, CloudProvider};
use adeptflow_cloud_aws::{AwsConnection, AwsProvider};
use adeptflow_core::{AwsCredentials, ProviderFactory};
use async_trait::async_trait;
use std::sync::Arc;

/// 保存済み資格情報から AWS クライアントを構築
pub async fn connect_aws(credentials: &AwsCredentials) -> Result<AwsProvider, CloudError> {
    let connection = AwsConnection::new(
        credentials.region.as_str(),
        credentials.access_key_id.as_str(),
        credentials.secret_access_key.as_str(),
    );
    Ok(AwsProvider::connect(&connection).await?)
}

/// オーケストレーター用のファクトリ
pub struct AwsFactory;

#[async_trait]
impl ProviderFactory for AwsFactory {
    async fn connect(
        &self,
        credentials: &AwsCredentials,
    ) -> adeptflow_core::Result<Arc<dyn CloudProvider>> {
        let provider: Arc<dyn CloudProvider> = Arc::new(connect_aws(credentials).await?);
        Ok(provider)
    }
}
