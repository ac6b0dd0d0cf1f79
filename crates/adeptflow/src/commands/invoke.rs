use crate::context::AppContext;
use adeptflow_cloud::CloudProvider;
use anyhow::Context;
use colored::Colorize;

pub async fn handle(ctx: &AppContext, function: &str, payload: &str) -> anyhow::Result<()> {
    let payload: serde_json::Value =
        serde_json::from_str(payload).context("ペイロードが JSON として不正です")?;

    let Some(provider) = ctx.connect().await? else {
        super::print_credentials_required();
        std::process::exit(1);
    };

    eprintln!("{} {}", "呼び出し中:".blue(), function.cyan());
    let response = provider.invoke_function(function, payload).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
