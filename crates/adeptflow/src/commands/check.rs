use crate::context::AppContext;
use adeptflow_core::template::{STACK_TEMPLATE_FILENAME, handle_download_template};
use adeptflow_core::{ReadinessPhase, ReadinessSnapshot};
use colored::Colorize;
use std::path::PathBuf;

pub async fn handle(
    ctx: &AppContext,
    output_dir: Option<PathBuf>,
    write_template: bool,
    json: bool,
) -> anyhow::Result<()> {
    let orchestrator = ctx.orchestrator();
    let mut errors = ctx.bus.subscribe();

    if !json {
        println!("{}", "インフラの準備状況を確認中...".blue());
    }
    orchestrator.initialize().await;
    let snapshot = orchestrator.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else if snapshot.phase == ReadinessPhase::CredentialsRequired {
        super::print_credentials_required();
    } else {
        print_snapshot(&snapshot);
        for error in errors.drain() {
            eprintln!("{} {}", "⚠".yellow(), error.user_message);
            eprintln!("  {}", "`adept check` で再試行してください".dimmed());
        }
    }

    if write_template
        && let Some(template) = snapshot
            .report
            .as_ref()
            .and_then(|r| r.cloud_formation_template())
    {
        let dir = ctx.output_dir(output_dir)?;
        let path = handle_download_template(&dir, STACK_TEMPLATE_FILENAME, template)?;
        if !json {
            println!();
            println!(
                "{} {}",
                "✓ スタックテンプレートを保存しました:".green(),
                path.display().to_string().cyan()
            );
        }
    }

    if snapshot.phase != ReadinessPhase::Ready {
        std::process::exit(1);
    }
    Ok(())
}

/// 準備状況を人間向けに表示
pub(crate) fn print_snapshot(snapshot: &ReadinessSnapshot) {
    println!();
    let phase = match snapshot.phase {
        ReadinessPhase::Ready => "✓ ready".green().bold(),
        ReadinessPhase::NotReady => "✗ not ready".red().bold(),
        ReadinessPhase::Error => "✗ error".red().bold(),
        other => other.to_string().yellow().bold(),
    };
    println!("状態: {}", phase);

    let backend = if snapshot.backend_ready {
        "接続済み".green()
    } else {
        "未接続".red()
    };
    println!("AWS 認証: {}", backend);

    if let Some(report) = &snapshot.report {
        if !report.missing_components().is_empty() {
            println!();
            println!("不足リソース: {}個", report.missing_components().len());
            for requirement in report.missing_components() {
                println!(
                    "  - {} ({})",
                    requirement.name.cyan(),
                    requirement.kind.service_label()
                );
            }
        }
        if report.cloud_formation_template().is_some() {
            println!();
            println!(
                "{}",
                "`adept check --write-template` で不足リソースのスタックテンプレートを保存できます"
                    .dimmed()
            );
        }
    }

    if !snapshot.issues.is_empty() {
        println!();
        println!("問題:");
        for issue in &snapshot.issues {
            println!("  - {}", issue);
        }
    }

    if let Some(checked) = snapshot.last_checked {
        println!();
        println!("最終確認: {}", checked.to_rfc3339().dimmed());
    }
}
