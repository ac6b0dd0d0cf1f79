use crate::context::AppContext;
use adeptflow_core::generate_deployment_docs;

pub fn handle(ctx: &AppContext) {
    print!("{}", generate_deployment_docs(&ctx.catalog));
}
