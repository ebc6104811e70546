pub use process_claim::*;
pub use process_close_claim_status::*;
pub use process_create_dummy_csv::*;
pub use process_create_merkle_tree::*;
pub use process_fund::*;
pub use process_get_proof::*;
pub use process_new_distributor::*;
pub use process_set_admin::*;
pub use process_status::*;
pub use process_update_root::*;
pub use process_verify::*;
pub use process_verify_proof::*;
pub use process_withdraw::*;

pub mod process_claim;
pub mod process_close_claim_status;
pub mod process_create_dummy_csv;
pub mod process_create_merkle_tree;
pub mod process_fund;
pub mod process_get_proof;
pub mod process_new_distributor;
pub mod process_set_admin;
pub mod process_status;
pub mod process_update_root;
pub mod process_verify;
pub mod process_verify_proof;
pub mod process_withdraw;
