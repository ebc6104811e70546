use crate::*;

pub fn process_status(args: &Args, status_args: &StatusArgs) -> Result<()> {
    let state = LocalState::load(&args.state_path)?;
    let distributor = &state.distributor;

    if let Some(claimant) = status_args.claimant {
        match distributor.claim_status(&claimant) {
            Some(status) => println!(
                "{} claimed {} in epoch {} against root {}",
                claimant,
                status.amount,
                status.root_epoch,
                hex::encode(status.root)
            ),
            None => println!("{claimant} has not claimed"),
        }
        return Ok(());
    }

    println!("admin: {}", distributor.admin());
    println!("token ledger: {}", distributor.token_ledger());
    println!("vault: {}", distributor.vault());
    println!(
        "vault balance: {}",
        state.ledger.balance_of(&distributor.vault())
    );
    println!("root: {}", hex::encode(distributor.root()));
    println!("root epoch: {}", distributor.root_epoch());
    println!("total amount claimed: {}", distributor.total_amount_claimed());
    println!("num nodes claimed: {}", distributor.num_nodes_claimed());
    println!(
        "token supply: {} across {} holders",
        state.ledger.total_supply(),
        state.ledger.holders().count()
    );

    for status in distributor.claim_statuses() {
        println!(
            "  {} claimed {} in epoch {}",
            status.claimant, status.amount, status.root_epoch
        );
    }
    Ok(())
}
