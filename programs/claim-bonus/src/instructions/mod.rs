pub use claim_bonus::*;
pub use close_claim_status::*;
pub use new_distributor::*;
pub use set_admin::*;
pub use update_root::*;
pub use withdraw_tokens::*;
pub mod claim_bonus;
pub mod close_claim_status;
pub mod new_distributor;
pub mod set_admin;
pub mod update_root;
pub mod withdraw_tokens;
