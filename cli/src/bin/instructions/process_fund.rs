use crate::*;

pub fn process_fund(args: &Args, fund_args: &FundArgs) -> Result<()> {
    let mut state = LocalState::load(&args.state_path)?;
    let vault = state.distributor.vault();
    state.ledger.mint(&vault, fund_args.amount)?;
    state.save(&args.state_path)?;

    println!(
        "vault {} balance {}",
        vault,
        state.ledger.balance_of(&vault)
    );
    Ok(())
}
