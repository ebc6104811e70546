use crate::*;

pub fn process_close_claim_status(
    args: &Args,
    close_claim_status_args: &CloseClaimStatusArgs,
) -> Result<()> {
    let signer = args.signer()?;
    let mut state = LocalState::load(&args.state_path)?;
    let closed = state
        .distributor
        .close_claim_status(&signer, &close_claim_status_args.claimant)?;
    state.save(&args.state_path)?;

    println!(
        "closed claim status of {} (claimed {} in epoch {})",
        closed.claimant, closed.amount, closed.root_epoch
    );
    Ok(())
}
