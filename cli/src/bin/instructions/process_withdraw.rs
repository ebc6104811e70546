use crate::*;

pub fn process_withdraw(args: &Args) -> Result<()> {
    let signer = args.signer()?;
    let mut state = LocalState::load(&args.state_path)?;
    let event = state
        .distributor
        .withdraw_tokens(&mut state.ledger, &signer)?;
    state.save(&args.state_path)?;

    println!("withdrew {} to {}", event.amount, event.receiver);
    Ok(())
}
