pub mod claim_bonus;
pub mod claim_status;
pub mod claimed_event;
