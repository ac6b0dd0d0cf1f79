mod commands;
mod context;
mod provider;

use clap::{Args, Parser, Subcommand};
use context::AppContext;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "adept")]
#[command(about = "AWS の準備状況を確認し、インフラと CI/CD のテンプレートを生成する", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 資格情報を管理
    #[command(subcommand)]
    Credentials(CredentialsCommands),
    /// AWS インフラの準備状況をチェック
    Check {
        /// スタックテンプレートの出力先（省略時は設定ファイルまたはカレントディレクトリ）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// 不足リソースがあればスタックテンプレートを書き出す
        #[arg(short, long)]
        write_template: bool,
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// CI/CD パイプライン定義を管理
    #[command(subcommand)]
    Pipeline(PipelineCommands),
    /// 本番デプロイの準備状況を表示
    Readiness,
    /// デプロイガイドを表示
    Docs,
    /// Lambda 関数を呼び出す
    Invoke {
        /// 関数名
        function: String,
        /// JSON ペイロード
        #[arg(short, long, default_value = "{}")]
        payload: String,
    },
    /// Secrets Manager からシークレットを取得
    Secret {
        /// シークレット名
        name: String,
        /// 値をマスクせずに表示
        #[arg(long)]
        reveal: bool,
    },
    /// バージョン情報を表示
    Version,
}

#[derive(Subcommand)]
enum CredentialsCommands {
    /// 資格情報を保存
    Set(SetCredentialsArgs),
    /// 保存済みの資格情報を表示（マスク済み）
    Show,
    /// 保存済みの資格情報を削除
    Clear,
}

#[derive(Args)]
pub struct SetCredentialsArgs {
    /// AWS リージョン
    #[arg(long, env = "AWS_REGION")]
    pub region: String,
    /// AWS アクセスキー ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key_id: String,
    /// AWS シークレットアクセスキー
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: String,
    /// OpenAI API キー
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,
    /// テナント ID
    #[arg(long)]
    pub tenant: Option<String>,
    /// 保存後にインフラをチェック
    #[arg(long)]
    pub check: bool,
}

#[derive(Subcommand)]
enum PipelineCommands {
    /// 利用可能なパイプライン一覧
    List,
    /// パイプライン定義を生成して保存
    Generate {
        /// プロバイダー (github, aws-codepipeline)
        provider: String,
        /// 出力先（省略時は設定ファイルまたはカレントディレクトリ）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログは stderr に出力（stdout はコマンド出力用）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Version / Pipeline list は設定不要
    match &cli.command {
        Commands::Version => {
            println!("adeptflow {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Pipeline(PipelineCommands::List) => {
            commands::pipeline::handle_list();
            return Ok(());
        }
        _ => {}
    }

    let ctx = AppContext::load()?;

    match cli.command {
        Commands::Credentials(cmd) => match cmd {
            CredentialsCommands::Set(args) => commands::credentials::handle_set(&ctx, args).await?,
            CredentialsCommands::Show => commands::credentials::handle_show(&ctx)?,
            CredentialsCommands::Clear => commands::credentials::handle_clear(&ctx),
        },
        Commands::Check {
            output_dir,
            write_template,
            json,
        } => {
            commands::check::handle(&ctx, output_dir, write_template, json).await?;
        }
        Commands::Pipeline(PipelineCommands::Generate {
            provider,
            output_dir,
        }) => {
            commands::pipeline::handle_generate(&ctx, &provider, output_dir)?;
        }
        Commands::Readiness => commands::readiness::handle(&ctx).await?,
        Commands::Docs => commands::docs::handle(&ctx),
        Commands::Invoke { function, payload } => {
            commands::invoke::handle(&ctx, &function, &payload).await?;
        }
        Commands::Secret { name, reveal } => {
            commands::secret::handle(&ctx, &name, reveal).await?;
        }
        Commands::Version | Commands::Pipeline(PipelineCommands::List) => {}
    }

    Ok(())
}
