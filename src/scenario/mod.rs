use std::time::Duration;

use goose::prelude::*;

use crate::models::config::UserProfile;
use crate::models::probe::{self, Probe};
use crate::report;

/// Builds the simulated-user profile: weighted probes with a 1-3s think time
/// between picks.
pub fn ocis_user() -> Result<Scenario, GooseError> {
    let profile = UserProfile::DEFAULT;
    Ok(scenario!("OcisUser")
        .set_wait_time(profile.wait_min, profile.wait_max)?
        .register_transaction(
            transaction!(configure_session)
                .set_name("Session Setup")
                .set_on_start(),
        )
        .register_transaction(
            transaction!(access_homepage)
                .set_name(probe::HOMEPAGE.name)
                .set_weight(probe::HOMEPAGE.weight)?,
        )
        .register_transaction(
            transaction!(access_login_page)
                .set_name(probe::LOGIN_PAGE.name)
                .set_weight(probe::LOGIN_PAGE.weight)?,
        )
        .register_transaction(
            transaction!(health_check)
                .set_name(probe::HEALTH_CHECK.name)
                .set_weight(probe::HEALTH_CHECK.weight)?,
        ))
}

/// Runs once per virtual user before its first probe. Certificate
/// verification stays on; flip `verify_tls` only against self-signed test
/// deployments.
pub async fn configure_session(user: &mut GooseUser) -> TransactionResult {
    let profile = UserProfile::DEFAULT;
    let builder = reqwest::Client::builder()
        .danger_accept_invalid_certs(!profile.verify_tls)
        .cookie_store(true)
        .timeout(Duration::from_secs(60))
        .user_agent(concat!("ocis-loadtest/", env!("CARGO_PKG_VERSION")));
    user.set_client_builder(builder).await?;
    Ok(())
}

/// Test-start hook: announce the run and the host under test.
pub async fn announce_run(user: &mut GooseUser) -> TransactionResult {
    println!("{}", report::render_banner(user.base_url.as_str()));
    Ok(())
}

pub async fn access_homepage(user: &mut GooseUser) -> TransactionResult {
    run_probe(user, &probe::HOMEPAGE).await
}

pub async fn access_login_page(user: &mut GooseUser) -> TransactionResult {
    run_probe(user, &probe::LOGIN_PAGE).await
}

pub async fn health_check(user: &mut GooseUser) -> TransactionResult {
    run_probe(user, &probe::HEALTH_CHECK).await
}

/// One GET, recorded under the probe name and classified against the probe's
/// acceptable set instead of the client's default success inference. A bad
/// status becomes a failed sample, never an error out of the transaction.
async fn run_probe(user: &mut GooseUser, probe: &Probe) -> TransactionResult {
    let endpoint = probe.pick_endpoint();
    let mut goose = user.get_named(endpoint, probe.name).await?;
    match goose.response {
        Ok(response) => match probe.classify(response.status().as_u16()) {
            Ok(()) => user.set_success(&mut goose.request),
            Err(err) => {
                tracing::debug!(probe = probe.name, endpoint, "{err}");
                user.set_failure(&err.to_string(), &mut goose.request, None, None)
            }
        },
        Err(err) => {
            let reason = format!("{}: request error: {err}", probe.name);
            tracing::debug!(probe = probe.name, endpoint, "{reason}");
            user.set_failure(&reason, &mut goose.request, None, None)
        }
    }
}
