use crate::context::AppContext;
use adeptflow_core::{
    EnvironmentStatus, InfrastructureInspector, check_production_readiness,
    deployment_environments,
};
use colored::Colorize;
use std::sync::Arc;

pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    println!("{}", "デプロイ環境:".bold());
    for env in deployment_environments() {
        let status = match env.status {
            EnvironmentStatus::Ready => env.status.to_string().green(),
            EnvironmentStatus::NotConfigured => env.status.to_string().dimmed(),
            EnvironmentStatus::Incomplete => env.status.to_string().yellow(),
        };
        match &env.url {
            Some(url) => println!("  {:<12} {} ({})", env.name, status, url.cyan()),
            None => println!("  {:<12} {}", env.name, status),
        }
    }
    println!();

    let Some(provider) = ctx.connect().await? else {
        super::print_credentials_required();
        std::process::exit(1);
    };

    println!("{}", "本番デプロイの準備状況を確認中...".blue());
    let inspector = InfrastructureInspector::new(Arc::new(provider), ctx.catalog.clone());
    let readiness = check_production_readiness(&inspector).await;

    for check in &readiness.checks {
        let mark = if check.passed {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("  {} {}: {}", mark, check.name.bold(), check.message);
    }

    println!();
    if readiness.ready {
        println!("{}", "✓ 本番デプロイの準備ができています".green().bold());
        Ok(())
    } else {
        println!("{}", "✗ 本番デプロイの準備ができていません".red().bold());
        std::process::exit(1);
    }
}
