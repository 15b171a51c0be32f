//! One-shot GuessingGame deployment: build request, submit, await confirmation, report.

use std::{future::Future, io::Write};

use tracing::{debug, info, warn};

use crate::{DeployedContract, DeploymentError, DeploymentRequest, ExecutionEnvironment};

pub const GUESSING_GAME: &str = "GuessingGame";

/// Randomness subscription the GuessingGame constructor is bound to.
pub const GUESSING_GAME_SUBSCRIPTION_ID: u64 = 9806;

/// Process status for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Process status for any failed run.
pub const EXIT_FAILURE: u8 = 1;

pub fn guessing_game_request() -> DeploymentRequest {
    DeploymentRequest::new(GUESSING_GAME, vec![GUESSING_GAME_SUBSCRIPTION_ID])
}

/// Submits the GuessingGame deployment once and waits for its confirmation.
///
/// Submission and confirmation both race `shutdown`; once it resolves the
/// deployment is abandoned with no cleanup, so a submitted transaction may
/// still land. Work that blocks without yielding (a contract build, proving)
/// only observes `shutdown` at its next await point. The deployment is polled
/// before `shutdown` on every wake.
pub async fn deploy_guessing_game<E, S>(
    env: &mut E,
    shutdown: S,
) -> Result<DeployedContract, DeploymentError>
where
    E: ExecutionEnvironment,
    S: Future<Output = ()>,
{
    let request = guessing_game_request();

    tokio::select! {
        biased;
        deployed = submit_and_confirm(env, &request) => deployed,
        _ = shutdown => {
            warn!(contract = %request.contract_name, "interrupted before the deployment settled");
            Err(DeploymentError::Interrupted)
        }
    }
}

async fn submit_and_confirm<E: ExecutionEnvironment>(
    env: &mut E,
    request: &DeploymentRequest,
) -> Result<DeployedContract, DeploymentError> {
    debug!(contract = %request.contract_name, args = ?request.constructor_args, "submitting deployment");

    let pending = env.deploy_contract(request).await?;
    info!(
        contract = %pending.contract_name,
        address = %pending.address,
        tx_id = %pending.transaction_id,
        "deployment submitted, waiting for confirmation"
    );

    env.wait_for_deployment(&pending).await
}

/// Runs the deployment and reports the outcome, returning the process exit status.
///
/// The confirmation line goes to `out`, failure detail to `err`. Neither sink is
/// touched until the deployment has settled.
pub async fn run<E, S, O, W>(env: &mut E, shutdown: S, out: &mut O, err: &mut W) -> u8
where
    E: ExecutionEnvironment,
    S: Future<Output = ()>,
    O: Write,
    W: Write,
{
    let outcome = deploy_guessing_game(env, shutdown)
        .await
        .and_then(|deployed| report(&deployed, out).map_err(DeploymentError::from));

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            if let Err(e) = writeln!(err, "{}", error.detail()) {
                warn!("failed to write error report: {e}");
            }
            EXIT_FAILURE
        }
    }
}

fn report<O: Write>(deployed: &DeployedContract, out: &mut O) -> std::io::Result<()> {
    writeln!(out, "{GUESSING_GAME} contract deployed to {}", deployed.address)?;
    out.flush()
}
