use super::Target;
use crate::cli::AuthProfileArgs;
use crate::error::Result;
use crate::merge::{apply_auth_profile_config, AuthProfileParams};

pub fn execute(target: &Target, args: &AuthProfileArgs) -> Result<()> {
    let params = AuthProfileParams::new(&args.profile_id, &args.provider, args.mode)
        .with_email(args.email.clone())
        .prefer_profile_first(!args.keep_order);

    let config = target.apply(|config| apply_auth_profile_config(config, &params))?;

    target.report(&format!(
        "✓ Auth profile '{}' ({}, {})",
        params.profile_id,
        params.provider,
        params.mode.as_str()
    ));
    if let Some(order) = config.provider_order(&params.provider) {
        if !target.dry_run {
            println!("  Order: {}", order.join(", "));
        }
    }
    Ok(())
}
