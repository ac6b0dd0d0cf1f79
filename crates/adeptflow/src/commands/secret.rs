use crate::context::AppContext;
use adeptflow_cloud::CloudProvider;
use adeptflow_core::credentials::mask_secret;

pub async fn handle(ctx: &AppContext, name: &str, reveal: bool) -> anyhow::Result<()> {
    let Some(provider) = ctx.connect().await? else {
        super::print_credentials_required();
        std::process::exit(1);
    };

    let value = provider.get_secret(name).await?;
    if reveal {
        println!("{}", value);
    } else {
        println!("{}", mask_secret(&value));
    }
    Ok(())
}
