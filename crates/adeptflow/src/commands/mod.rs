pub mod check;
pub mod credentials;
pub mod docs;
pub mod invoke;
pub mod pipeline;
pub mod readiness;
pub mod secret;

use colored::Colorize;

/// 資格情報が未設定のときの案内
pub(crate) fn print_credentials_required() {
    eprintln!("{}", "✗ AWS credentials required".red().bold());
    eprintln!();
    eprintln!("資格情報を保存してください:");
    eprintln!(
        "  {}",
        "adept credentials set --region <REGION> --access-key-id <KEY> --secret-access-key <SECRET>"
            .cyan()
    );
}
