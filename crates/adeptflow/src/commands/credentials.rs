use crate::SetCredentialsArgs;
use crate::context::AppContext;
use adeptflow_core::credentials::mask_secret;
use adeptflow_core::{AppCredentials, AwsCredentials, ReadinessPhase, RefreshOutcome};
use colored::Colorize;

pub async fn handle_set(ctx: &AppContext, args: SetCredentialsArgs) -> anyhow::Result<()> {
    let mut credentials = AppCredentials::with_aws(AwsCredentials::new(
        args.region,
        args.access_key_id,
        args.secret_access_key,
    ));
    if let Some(key) = args.openai_api_key.filter(|k| !k.is_empty()) {
        credentials = credentials.with_openai_key(key);
    }

    if let Some(tenant) = &args.tenant {
        ctx.store.set_tenant_id(tenant);
    }

    ctx.store.store(&credentials);

    // 保存は best-effort なので読み戻して確認する
    if ctx.store.load().is_none() {
        anyhow::bail!(
            "資格情報を保存できませんでした: {}",
            ctx.storage_path.display()
        );
    }

    if args.check {
        println!("{}", "✓ 資格情報を保存しました".green().bold());
        // 保存済みの値を読み込んで確認する
        let outcome = ctx.orchestrator().initialize().await;
        if let RefreshOutcome::Completed(snapshot) = outcome {
            super::check::print_snapshot(&snapshot);
            if snapshot.phase != ReadinessPhase::Ready {
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    println!("{}", "✓ 資格情報を保存しました".green().bold());
    println!("  保存先: {}", ctx.storage_path.display().to_string().cyan());
    println!(
        "  {}",
        "注意: 値は難読化されているだけで暗号化されていません".yellow()
    );
    Ok(())
}

pub fn handle_show(ctx: &AppContext) -> anyhow::Result<()> {
    let Some(credentials) = ctx.store.load() else {
        println!("{}", "資格情報は未設定です".yellow());
        return Ok(());
    };

    println!("{}", "保存済みの資格情報:".bold());
    match &credentials.aws {
        Some(aws) => {
            println!("  AWS:");
            println!("    region:            {}", aws.region.cyan());
            println!("    access_key_id:     {}", mask_secret(&aws.access_key_id));
            println!(
                "    secret_access_key: {}",
                mask_secret(&aws.secret_access_key)
            );
        }
        None => println!("  AWS: {}", "(未設定)".dimmed()),
    }
    match &credentials.openai {
        Some(openai) => println!("  OpenAI api_key:      {}", mask_secret(&openai.api_key)),
        None => println!("  OpenAI: {}", "(未設定)".dimmed()),
    }
    for key in credentials.extra.keys() {
        println!("  {}: ****", key);
    }
    println!("  tenant:              {}", ctx.store.tenant_id().cyan());
    println!("  保存先: {}", ctx.storage_path.display());
    Ok(())
}

pub fn handle_clear(ctx: &AppContext) {
    ctx.store.clear();
    println!("{}", "✓ 資格情報を削除しました".green().bold());
}
