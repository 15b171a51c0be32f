use helpers::{deploy_guessing_game, run, DeploymentError, EXIT_FAILURE, EXIT_SUCCESS};
use tests::{MockEnvironment, MockOutcome, SharedSink};

const ADDRESS: &str = "0xabc0000000000000000000000000000000000001";

#[tokio::test]
async fn reports_address_on_confirmation() -> anyhow::Result<()> {
    let (mut out, mut err) = (SharedSink::default(), SharedSink::default());
    let mut env = MockEnvironment::confirming(ADDRESS);

    let code = run(&mut env, std::future::pending(), &mut out, &mut err).await;

    assert_eq!(code, EXIT_SUCCESS);
    assert_eq!(
        out.contents(),
        format!("GuessingGame contract deployed to {ADDRESS}\n")
    );
    assert!(err.is_empty());
    Ok(())
}

#[tokio::test]
async fn submission_failure_goes_to_error_sink() -> anyhow::Result<()> {
    let (mut out, mut err) = (SharedSink::default(), SharedSink::default());
    let mut env = MockEnvironment::new(MockOutcome::RejectSubmission {
        reason: "insufficient funds for fee".into(),
    });

    let code = run(&mut env, std::future::pending(), &mut out, &mut err).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.is_empty());
    assert!(err.contents().contains("insufficient funds for fee"));
    assert_eq!(env.wait_calls, 0);
    Ok(())
}

#[tokio::test]
async fn confirmation_failure_goes_to_error_sink() -> anyhow::Result<()> {
    let (mut out, mut err) = (SharedSink::default(), SharedSink::default());
    let mut env = MockEnvironment::new(MockOutcome::RejectConfirmation {
        reason: "transaction discarded".into(),
    });

    let code = run(&mut env, std::future::pending(), &mut out, &mut err).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.is_empty());
    assert!(err
        .contents()
        .starts_with("Error: deployment of `GuessingGame` rejected: transaction discarded"));
    Ok(())
}

#[tokio::test]
async fn constructor_args_are_always_the_subscription_id() -> anyhow::Result<()> {
    let mut env = MockEnvironment::confirming(ADDRESS);

    deploy_guessing_game(&mut env, std::future::pending()).await?;

    assert_eq!(env.requests.len(), 1);
    assert_eq!(env.requests[0].contract_name, "GuessingGame");
    assert_eq!(env.requests[0].constructor_args, vec![9806]);
    Ok(())
}

#[tokio::test]
async fn deploys_at_most_once() -> anyhow::Result<()> {
    let mut ok = MockEnvironment::confirming(ADDRESS);
    let mut failing = MockEnvironment::new(MockOutcome::RejectSubmission {
        reason: "node unreachable".into(),
    });
    let (mut out, mut err) = (SharedSink::default(), SharedSink::default());

    run(&mut ok, std::future::pending(), &mut out, &mut err).await;
    run(&mut failing, std::future::pending(), &mut out, &mut err).await;

    assert_eq!(ok.deploy_calls, 1);
    assert_eq!(ok.wait_calls, 1);
    assert_eq!(failing.deploy_calls, 1);
    Ok(())
}

#[tokio::test]
async fn nothing_is_written_before_settling() -> anyhow::Result<()> {
    for outcome in [
        MockOutcome::Confirm {
            address: ADDRESS.into(),
        },
        MockOutcome::RejectConfirmation {
            reason: "reverted".into(),
        },
    ] {
        let (mut out, mut err) = (SharedSink::default(), SharedSink::default());
        let mut env = MockEnvironment::new(outcome).watching(&[&out, &err]);

        run(&mut env, std::future::pending(), &mut out, &mut err).await;

        assert_eq!(env.sink_bytes_at_calls, vec![0, 0]);
        assert!(out.len() + err.len() > 0);
    }
    Ok(())
}

#[tokio::test]
async fn interrupt_aborts_confirmation_wait() -> anyhow::Result<()> {
    let (mut out, mut err) = (SharedSink::default(), SharedSink::default());
    let mut env = MockEnvironment::new(MockOutcome::NeverConfirm {
        address: ADDRESS.into(),
    });

    let code = run(&mut env, async {}, &mut out, &mut err).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.is_empty());
    assert!(err.contents().contains("interrupted"));
    assert_eq!(env.deploy_calls, 1);
    Ok(())
}

#[tokio::test]
async fn interrupt_surfaces_as_error() {
    let mut env = MockEnvironment::new(MockOutcome::NeverConfirm {
        address: ADDRESS.into(),
    });

    let result = deploy_guessing_game(&mut env, async {}).await;

    assert!(matches!(result, Err(DeploymentError::Interrupted)));
}

#[tokio::test]
async fn interrupt_aborts_submission() -> anyhow::Result<()> {
    let (mut out, mut err) = (SharedSink::default(), SharedSink::default());
    let mut env = MockEnvironment::new(MockOutcome::NeverSubmit);

    let code = run(&mut env, async {}, &mut out, &mut err).await;

    assert_eq!(code, EXIT_FAILURE);
    assert!(out.is_empty());
    assert_eq!(
        err.contents(),
        "Error: interrupted before the deployment settled\n"
    );
    assert_eq!(env.deploy_calls, 1);
    assert_eq!(env.wait_calls, 0);
    Ok(())
}
