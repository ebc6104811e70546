use crate::*;

pub fn process_set_admin(args: &Args, set_admin_args: &SetAdminArgs) -> Result<()> {
    let signer = args.signer()?;
    let mut state = LocalState::load(&args.state_path)?;
    state
        .distributor
        .set_admin(&signer, set_admin_args.new_admin)?;
    state.save(&args.state_path)?;

    println!("admin set to {}", set_admin_args.new_admin);
    Ok(())
}
