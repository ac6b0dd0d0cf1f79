use crate::context::AppContext;
use adeptflow_core::template::{
    MIME_TYPE, generate_cicd_pipeline, get_available_cicd_pipelines, handle_download_template,
};
use colored::Colorize;
use std::path::PathBuf;

pub fn handle_list() {
    println!("{}", "利用可能な CI/CD パイプライン:".bold());
    for pipeline in get_available_cicd_pipelines() {
        println!(
            "  {:<18} {:<28} {}",
            pipeline.provider.cyan(),
            pipeline.name,
            pipeline.description.dimmed()
        );
    }
}

pub fn handle_generate(
    ctx: &AppContext,
    provider: &str,
    output_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut errors = ctx.bus.subscribe();
    let artifact = generate_cicd_pipeline(provider, Some(&ctx.bus));

    if !artifact.success {
        eprintln!(
            "{}",
            "✗ CI/CD パイプライン定義を生成できませんでした".red().bold()
        );
        for error in errors.drain() {
            eprintln!("  {}", error.message);
        }
        eprintln!();
        eprintln!(
            "利用可能なプロバイダー: {}",
            get_available_cicd_pipelines()
                .iter()
                .map(|p| p.provider)
                .collect::<Vec<_>>()
                .join(", ")
        );
        std::process::exit(1);
    }

    let dir = ctx.output_dir(output_dir)?;
    let path = handle_download_template(&dir, &artifact.filename, &artifact.template)?;
    println!(
        "{} {} ({})",
        "✓ 保存しました:".green().bold(),
        path.display().to_string().cyan(),
        MIME_TYPE
    );
    Ok(())
}
